//! # Mesh Assembly
//!
//! Turns boundary geometry into a closed sticker: front cap, back cap and
//! side walls, centered on the origin and scaled to the requested size.
//!
//! Positions are first laid out in *lifted* pixel space: image x to the
//! right, image y negated so the mesh is upright with y up, depth along z.
//! A [`Normalization`] then maps lifted space to mesh space. The same
//! normalization is handed to the UV projector so it can map mesh positions
//! back into the source image.

mod contour;
mod grid;
pub mod triangulate;


pub use contour::assemble_contour;
pub use grid::assemble_grid;

use glam::{DVec2, DVec3};

use crate::boundary::Boundary;
use crate::mesh::Mesh;
use crate::params::ExtrusionParams;
use crate::uv::UvProjector;

/// Maps an image-space point (y down) to lifted pixel space (y up).
#[inline]
pub fn lift(image_point: DVec2) -> DVec2 {
    DVec2::new(image_point.x, -image_point.y)
}

/// Affine map from lifted pixel space to mesh space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Lifted-space point that lands on the origin
    pub center: DVec2,
    /// Scale applied to x and y
    pub scale: f64,
    /// Scale applied to z
    pub depth_scale: f64,
}

impl Normalization {
    /// Maps a lifted-space position into mesh space.
    #[inline]
    pub fn to_mesh(&self, lifted: DVec3) -> DVec3 {
        DVec3::new(
            (lifted.x - self.center.x) * self.scale,
            (lifted.y - self.center.y) * self.scale,
            lifted.z * self.depth_scale,
        )
    }

    /// Maps a mesh-space position back to image coordinates (y down).
    #[inline]
    pub fn to_image(&self, position: DVec3) -> DVec2 {
        let lifted = position.truncate() / self.scale + self.center;
        lift(lifted)
    }

    /// Applies the map to every vertex of a lifted-space mesh.
    pub fn apply(&self, mesh: &mut Mesh) {
        mesh.translate(-self.center.extend(0.0));
        mesh.scale(DVec3::new(self.scale, self.scale, self.depth_scale));
    }
}

/// Assembled geometry plus everything needed to texture it.
#[derive(Debug, Clone)]
pub struct AssembledMesh {
    /// Mesh-space geometry, UVs not yet assigned
    pub mesh: Mesh,
    /// Projector for this mesh's vertices
    pub projector: UvProjector,
    /// Wall quads (grid) or wall segments (contour) emitted
    pub wall_count: usize,
}

/// Assembles the mesh for either kind of boundary.
pub fn assemble(
    boundary: &Boundary,
    image_width: usize,
    image_height: usize,
    params: &ExtrusionParams,
) -> AssembledMesh {
    match boundary {
        Boundary::Grid(grid) => assemble_grid(grid, params),
        Boundary::Contour(contour) => {
            assemble_contour(contour, image_width, image_height, params)
        }
    }
}
