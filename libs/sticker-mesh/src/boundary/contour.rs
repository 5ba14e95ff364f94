//! # Contour Tracing
//!
//! Moore-neighbor tracing of a single silhouette outline.
//!
//! The raster scan picks the first edge pixel (solid, and on the image
//! border or next to a non-solid 4-neighbor). From there the walk sweeps
//! the 8 neighbors clockwise, starting at the neighbor examined just
//! before the current pixel was found, and steps to the first edge pixel
//! that has not been visited. The walk ends when it sweeps back onto the
//! start pixel (closed) or when no unvisited edge neighbor is left (open).
//!
//! Only the first silhouette component found is traced.

use std::collections::HashSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MeshError, MeshResult};
use crate::mask::OpacityMask;

/// Clockwise in image coordinates (y down), starting east.
const DIRS: [IVec2; 8] = [
    IVec2::new(1, 0),
    IVec2::new(1, 1),
    IVec2::new(0, 1),
    IVec2::new(-1, 1),
    IVec2::new(-1, 0),
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
];

/// The raster scan reaches the start pixel from the west.
const INITIAL_BACKTRACK: usize = 4;

/// Minimum number of points before sweeping onto the start closes the loop.
const MIN_CLOSED_POINTS: usize = 3;

/// Axis-aligned bounds of traced points, in pixel coordinates.
///
/// An empty box has `min` at the image dimensions and `max` at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// The degenerate box reported when nothing was traced.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            min_x: width as i32,
            min_y: height as i32,
            max_x: 0,
            max_y: 0,
        }
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: IVec2) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Distance between the extreme point columns.
    pub fn width(&self) -> i32 {
        (self.max_x - self.min_x).max(0)
    }

    /// Distance between the extreme point rows.
    pub fn height(&self) -> i32 {
        (self.max_y - self.min_y).max(0)
    }
}

/// One traced outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    /// Pixels in walk order; the start pixel is not repeated at the end
    pub points: Vec<IVec2>,
    /// Bounds of `points`
    pub bounds: BoundingBox,
    /// True if the walk swept back onto its start pixel
    pub closed: bool,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Visited pixels, keyed by packed coordinates.
#[derive(Debug, Default)]
struct VisitedSet(HashSet<u64>);

impl VisitedSet {
    #[inline]
    fn key(p: IVec2) -> u64 {
        ((p.y as u32 as u64) << 32) | (p.x as u32 as u64)
    }

    fn insert(&mut self, p: IVec2) {
        self.0.insert(Self::key(p));
    }

    fn contains(&self, p: IVec2) -> bool {
        self.0.contains(&Self::key(p))
    }
}

/// Solid, and on the border or next to a non-solid 4-neighbor.
fn is_edge_pixel(mask: &OpacityMask<'_>, p: IVec2) -> bool {
    let (x, y) = (p.x as i64, p.y as i64);
    if !mask.is_solid(x, y) {
        return false;
    }
    let on_border =
        x == 0 || y == 0 || x == mask.width() as i64 - 1 || y == mask.height() as i64 - 1;
    on_border
        || !mask.is_solid(x - 1, y)
        || !mask.is_solid(x + 1, y)
        || !mask.is_solid(x, y - 1)
        || !mask.is_solid(x, y + 1)
}

/// First edge pixel in row-major order.
fn find_start(mask: &OpacityMask<'_>) -> Option<IVec2> {
    for y in 0..mask.height() as i32 {
        for x in 0..mask.width() as i32 {
            let p = IVec2::new(x, y);
            if is_edge_pixel(mask, p) {
                return Some(p);
            }
        }
    }
    None
}

/// Vertices the assembler emits at most for a walk of `points` pixels:
/// front and back cap rings plus front and back wall rings.
#[inline]
pub fn contour_vertex_count(points: usize) -> usize {
    4 * points
}

/// Sweep start around a pixel entered via `dir`: the ring cell examined
/// right before it, seen from the new pixel.
#[inline]
fn backtrack_after(dir: usize) -> usize {
    if dir % 2 == 0 {
        (dir + 6) % 8
    } else {
        (dir + 5) % 8
    }
}

/// Traces the outline of the first silhouette component in `mask`.
///
/// An all-transparent mask yields an empty contour with an empty bounding
/// box; that is not an error.
///
/// # Errors
///
/// [`MeshError::TooManyVertices`] as soon as the walk holds more points
/// than `max_vertices / 4`, since each point becomes four mesh vertices.
///
/// # Example
///
/// ```rust
/// use sticker_mesh::{boundary::contour::trace_contour, OpacityMask, RgbaImage, ThresholdMode};
///
/// let image = RgbaImage::filled(4, 4, [0, 0, 0, 255]).unwrap();
/// let mask = OpacityMask::new(&image, 128, ThresholdMode::Above);
/// let contour = trace_contour(&mask, 1_000).unwrap();
/// assert!(contour.closed);
/// assert_eq!((contour.bounds.max_x, contour.bounds.max_y), (3, 3));
/// ```
pub fn trace_contour(mask: &OpacityMask<'_>, max_vertices: usize) -> MeshResult<Contour> {
    let mut bounds = BoundingBox::empty(mask.width(), mask.height());

    let Some(start) = find_start(mask) else {
        debug!("no solid pixel, contour is empty");
        return Ok(Contour {
            points: Vec::new(),
            bounds,
            closed: false,
        });
    };

    let mut visited = VisitedSet::default();
    let mut points = vec![start];
    visited.insert(start);
    bounds.include(start);

    let mut current = start;
    let mut backtrack = INITIAL_BACKTRACK;
    let mut closed = false;

    loop {
        let mut step = None;
        for k in 0..8 {
            let dir = (backtrack + k) % 8;
            let candidate = current + DIRS[dir];
            if candidate == start && points.len() >= MIN_CLOSED_POINTS {
                closed = true;
                break;
            }
            if is_edge_pixel(mask, candidate) && !visited.contains(candidate) {
                step = Some((candidate, dir));
                break;
            }
        }

        let Some((next, dir)) = step else {
            break;
        };

        visited.insert(next);
        points.push(next);
        let vertices = contour_vertex_count(points.len());
        if vertices > max_vertices {
            warn!(points = points.len(), max_vertices, "contour walk stopped at vertex limit");
            return Err(MeshError::TooManyVertices {
                count: vertices,
                max: max_vertices,
            });
        }
        bounds.include(next);
        current = next;
        backtrack = backtrack_after(dir);
    }

    if closed {
        debug!(points = points.len(), "contour closed");
    } else {
        warn!(
            points = points.len(),
            "contour walk stopped before returning to its start"
        );
    }

    Ok(Contour {
        points,
        bounds,
        closed,
    })
}
