//! # Grid Silhouette Edges
//!
//! Enumerates every unit pixel edge that separates a solid pixel from a
//! non-solid one. The scan covers `[-1, width] x [-1, height]` so edges on
//! the image border are found like any other. Each cell is compared with
//! its left and upper neighbor; both comparisons can fire at the same cell.
//!
//! Multiple disjoint silhouettes simply produce multiple closed loops of
//! edges; nothing here needs to know which loop an edge belongs to.

use glam::IVec2;
use tracing::{debug, warn};

use crate::error::{MeshError, MeshResult};
use crate::mask::OpacityMask;

/// Side of the solid pixel that is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// A unit edge between a solid and a non-solid pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryEdge {
    /// Exposed side of `solid`
    pub side: EdgeSide,
    /// The solid pixel
    pub solid: IVec2,
    /// The non-solid pixel across the edge (may lie outside the image)
    pub empty: IVec2,
}

impl BoundaryEdge {
    fn new(side: EdgeSide, solid: IVec2) -> Self {
        let empty = solid
            + match side {
                EdgeSide::Left => IVec2::new(-1, 0),
                EdgeSide::Right => IVec2::new(1, 0),
                EdgeSide::Top => IVec2::new(0, -1),
                EdgeSide::Bottom => IVec2::new(0, 1),
            };
        Self { side, solid, empty }
    }

    /// Endpoints of the edge on the pixel lattice (image coordinates,
    /// y down). Pixel `(x, y)` covers `[x, x + 1] x [y, y + 1]`.
    pub fn segment(&self) -> (IVec2, IVec2) {
        let IVec2 { x, y } = self.solid;
        match self.side {
            EdgeSide::Left => (IVec2::new(x, y), IVec2::new(x, y + 1)),
            EdgeSide::Right => (IVec2::new(x + 1, y), IVec2::new(x + 1, y + 1)),
            EdgeSide::Top => (IVec2::new(x, y), IVec2::new(x + 1, y)),
            EdgeSide::Bottom => (IVec2::new(x, y + 1), IVec2::new(x + 1, y + 1)),
        }
    }

    /// True for edges running along the y axis.
    pub fn is_vertical(&self) -> bool {
        matches!(self.side, EdgeSide::Left | EdgeSide::Right)
    }
}

/// All exposed edges of a mask, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBoundary {
    pub width: usize,
    pub height: usize,
    pub edges: Vec<BoundaryEdge>,
}

impl GridBoundary {
    /// Number of wall quads the edges will turn into.
    pub fn wall_count(&self) -> usize {
        self.edges.len()
    }
}

/// Vertices the assembler emits for `edges` wall quads plus two cap quads.
#[inline]
pub fn grid_vertex_count(edges: usize) -> usize {
    4 * (edges + 2)
}

/// Scans `mask` for exposed edges.
///
/// The scan gives up as soon as the edges found so far would assemble into
/// more than `max_vertices` vertices, so an oversized mask never gets its
/// full edge list built. The check runs once per scanned row.
///
/// # Errors
///
/// [`MeshError::TooManyVertices`] when the limit is crossed. `count` is the
/// vertex count reached when the scan stopped, a lower bound of the total.
///
/// # Example
///
/// ```rust
/// use sticker_mesh::{boundary::grid::scan_edges, OpacityMask, RgbaImage, ThresholdMode};
///
/// let image = RgbaImage::filled(3, 2, [0, 0, 0, 255]).unwrap();
/// let mask = OpacityMask::new(&image, 128, ThresholdMode::AtLeast);
/// let grid = scan_edges(&mask, 1_000).unwrap();
/// assert_eq!(grid.edges.len(), 2 * (3 + 2));
/// assert!(scan_edges(&mask, 16).is_err());
/// ```
pub fn scan_edges(mask: &OpacityMask<'_>, max_vertices: usize) -> MeshResult<GridBoundary> {
    let width = mask.width() as i64;
    let height = mask.height() as i64;
    let mut edges = Vec::new();

    for y in -1..=height {
        for x in -1..=width {
            let here = mask.is_solid(x, y);
            let left = mask.is_solid(x - 1, y);
            let up = mask.is_solid(x, y - 1);

            if here && !left {
                edges.push(BoundaryEdge::new(EdgeSide::Left, cell(x, y)));
            } else if left && !here {
                edges.push(BoundaryEdge::new(EdgeSide::Right, cell(x - 1, y)));
            }

            if here && !up {
                edges.push(BoundaryEdge::new(EdgeSide::Top, cell(x, y)));
            } else if up && !here {
                edges.push(BoundaryEdge::new(EdgeSide::Bottom, cell(x, y - 1)));
            }
        }

        let vertices = grid_vertex_count(edges.len());
        if vertices > max_vertices {
            warn!(row = y, vertices, max_vertices, "grid scan stopped at vertex limit");
            return Err(MeshError::TooManyVertices {
                count: vertices,
                max: max_vertices,
            });
        }
    }

    debug!(edges = edges.len(), "grid boundary scanned");

    Ok(GridBoundary {
        width: mask.width(),
        height: mask.height(),
        edges,
    })
}

// Image sides are bounded by MAX_IMAGE_DIMENSION, so cells fit in i32.
#[inline]
fn cell(x: i64, y: i64) -> IVec2 {
    IVec2::new(x as i32, y as i32)
}
