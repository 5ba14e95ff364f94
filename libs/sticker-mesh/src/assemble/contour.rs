//! Contour path: the traced outline becomes a polygon that is capped on
//! both sides and swept through the depth axis.

use config::constants::approx_zero;
use glam::DVec2;
use tracing::{debug, warn};

use super::triangulate::{drop_collinear, signed_area2, triangulate_polygon};
use super::{lift, AssembledMesh, Normalization};
use crate::boundary::Contour;
use crate::mesh::{Mesh, Surface};
use crate::params::ExtrusionParams;
use crate::uv::UvProjector;

/// Pixel centers of the contour in lifted space, simplified and
/// counter-clockwise.
fn outline(contour: &Contour) -> Vec<DVec2> {
    let centers: Vec<DVec2> = contour
        .points
        .iter()
        .map(|p| lift(p.as_dvec2() + DVec2::splat(0.5)))
        .collect();

    let mut ring = drop_collinear(&centers);
    if ring.len() >= 3 && signed_area2(&ring) < 0.0 {
        ring.reverse();
    }
    ring
}

/// Builds the contour sticker for `contour`.
///
/// The polygon is scaled so the longer side of the contour's own bounding
/// box measures `size`, and the depth span of `thickness` is scaled by the
/// same factor. A contour that encloses no area yields an empty mesh.
pub fn assemble_contour(
    contour: &Contour,
    image_width: usize,
    image_height: usize,
    params: &ExtrusionParams,
) -> AssembledMesh {
    let bounds = contour.bounds;
    let bounds_min = DVec2::new(bounds.min_x as f64, bounds.min_y as f64) + DVec2::splat(0.5);
    let bounds_size = DVec2::new(bounds.width() as f64, bounds.height() as f64);

    let ring = outline(contour);
    if ring.len() < 3 || approx_zero(signed_area2(&ring)) {
        warn!(
            points = contour.len(),
            "contour encloses no area, nothing to extrude"
        );
        return AssembledMesh {
            mesh: Mesh::new(),
            projector: UvProjector::new(
                image_width,
                image_height,
                bounds_min,
                bounds_size,
                Normalization {
                    center: DVec2::ZERO,
                    scale: 1.0,
                    depth_scale: 1.0,
                },
            ),
            wall_count: 0,
        };
    }

    let n = ring.len();
    let half = params.thickness / 2.0;
    let triangles = triangulate_polygon(&ring);

    let mut mesh = Mesh::with_capacity(4 * n, 2 * triangles.len() + 2 * n);

    // Vertex blocks: front cap, back cap, front wall ring, back wall ring
    let blocks = [
        (half, Surface::Cap),
        (-half, Surface::Cap),
        (half, Surface::Wall),
        (-half, Surface::Wall),
    ];
    for (z, surface) in blocks {
        for p in &ring {
            mesh.add_vertex(p.extend(z), surface);
        }
    }

    let n32 = n as u32;
    let (front, back) = (0, n32);
    let (front_wall, back_wall) = (2 * n32, 3 * n32);

    for &[a, b, c] in &triangles {
        mesh.add_triangle(front + a, front + b, front + c);
    }
    for &[a, b, c] in &triangles {
        mesh.add_triangle(back + a, back + c, back + b);
    }

    for i in 0..n32 {
        let j = (i + 1) % n32;
        let a = back_wall + i;
        let b = back_wall + j;
        let c = front_wall + j;
        let d = front_wall + i;
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(a, c, d);
    }

    let center = lift(bounds_min + bounds_size / 2.0);
    let scale = params.size / bounds_size.max_element();
    let normalization = Normalization {
        center,
        scale,
        depth_scale: scale,
    };
    normalization.apply(&mut mesh);

    debug!(
        outline = n,
        cap_triangles = triangles.len(),
        vertices = mesh.vertex_count(),
        "contour sticker assembled"
    );

    AssembledMesh {
        mesh,
        projector: UvProjector::new(
            image_width,
            image_height,
            bounds_min,
            bounds_size,
            normalization,
        ),
        wall_count: n,
    }
}
