//! Grid path: one wall quad per exposed pixel edge, plus two caps spanning
//! the whole image rectangle.

use glam::{DVec2, DVec3};
use tracing::debug;

use super::{lift, AssembledMesh, Normalization};
use crate::boundary::{BoundaryEdge, EdgeSide, GridBoundary};
use crate::mesh::{Mesh, Surface};
use crate::params::ExtrusionParams;
use crate::uv::UvProjector;

/// Outward normal of an exposed side, in lifted space (y up).
fn outward(side: EdgeSide) -> DVec2 {
    match side {
        EdgeSide::Left => DVec2::new(-1.0, 0.0),
        EdgeSide::Right => DVec2::new(1.0, 0.0),
        EdgeSide::Top => DVec2::new(0.0, 1.0),
        EdgeSide::Bottom => DVec2::new(0.0, -1.0),
    }
}

/// Wall quad corners for one edge, counter-clockwise seen from outside.
fn wall_corners(edge: &BoundaryEdge, half_depth: f64) -> [DVec3; 4] {
    let (a, b) = edge.segment();
    let mut p0 = lift(a.as_dvec2());
    let mut p1 = lift(b.as_dvec2());

    let n = outward(edge.side);
    if (p1 - p0).dot(n.perp()) < 0.0 {
        std::mem::swap(&mut p0, &mut p1);
    }

    [
        p0.extend(-half_depth),
        p1.extend(-half_depth),
        p1.extend(half_depth),
        p0.extend(half_depth),
    ]
}

/// Builds the grid sticker for `grid`.
///
/// Positions are laid out in pixel units, then centered on the image
/// rectangle and scaled so the longer image side measures `size`. Depth
/// keeps its pixel-unit span of `thickness`.
pub fn assemble_grid(grid: &GridBoundary, params: &ExtrusionParams) -> AssembledMesh {
    let width = grid.width as f64;
    let height = grid.height as f64;
    let half = params.thickness / 2.0;

    let quads = grid.edges.len() + 2;
    let mut mesh = Mesh::with_capacity(4 * quads, 2 * quads);

    for edge in &grid.edges {
        let (corner, _) = edge.segment();
        mesh.add_quad(wall_corners(edge, half), Surface::CellWall { corner });
    }

    let bl = DVec2::new(0.0, -height);
    let br = DVec2::new(width, -height);
    let tr = DVec2::new(width, 0.0);
    let tl = DVec2::ZERO;
    mesh.add_quad(
        [bl.extend(half), br.extend(half), tr.extend(half), tl.extend(half)],
        Surface::Cap,
    );
    mesh.add_quad(
        [bl.extend(-half), tl.extend(-half), tr.extend(-half), br.extend(-half)],
        Surface::Cap,
    );

    let (min, max) = mesh.bounding_box();
    let normalization = Normalization {
        center: ((min + max) / 2.0).truncate(),
        scale: params.size / width.max(height),
        depth_scale: 1.0,
    };
    normalization.apply(&mut mesh);

    debug!(
        walls = grid.edges.len(),
        vertices = mesh.vertex_count(),
        "grid sticker assembled"
    );

    AssembledMesh {
        mesh,
        projector: UvProjector::new(
            grid.width,
            grid.height,
            DVec2::ZERO,
            DVec2::new(width, height),
            normalization,
        ),
        wall_count: grid.edges.len(),
    }
}
