//! # UV Projection
//!
//! Maps every mesh vertex back into the source image's `[0, 1]` texture
//! space. The treatment depends on the vertex's [`Surface`]:
//!
//! - **Cap**: planar. The position is mapped back to image pixels, taken
//!   relative to the boundary's bounding box, then remapped into full-image
//!   space. For the grid path the box is the whole image.
//! - **Wall** (contour path): cylindrical. `u` is the angle around the z
//!   axis, `v` the normalized depth. Wall rings share vertices, so the
//!   triangle crossing the `atan2` branch cut stretches over the whole
//!   texture width.
//! - **CellWall** (grid path): the first lattice endpoint of the wall's
//!   footprint edge, repeated on all four corners of the quad. Endpoints on
//!   the right or bottom image border land exactly on `u = 1` or `v = 0`.

use std::f64::consts::{PI, TAU};

use config::constants::EPSILON;
use glam::{DVec2, DVec3, IVec2};

use crate::assemble::Normalization;
use crate::mesh::{Mesh, Surface};

/// Projects mesh positions into image texture space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvProjector {
    image_size: DVec2,
    bounds_min: DVec2,
    bounds_size: DVec2,
    normalization: Normalization,
}

impl UvProjector {
    /// `bounds_min`/`bounds_size` are the boundary's bounding box in image
    /// pixels (y down); `normalization` is the map the assembler applied.
    pub fn new(
        image_width: usize,
        image_height: usize,
        bounds_min: DVec2,
        bounds_size: DVec2,
        normalization: Normalization,
    ) -> Self {
        Self {
            image_size: DVec2::new(image_width as f64, image_height as f64),
            bounds_min,
            bounds_size,
            normalization,
        }
    }

    /// Planar cap coordinate for a mesh-space position.
    pub fn cap(&self, position: DVec3) -> DVec2 {
        let image = self.normalization.to_image(position);
        let (min, size) = (self.bounds_min, self.bounds_size);

        let u = if size.x > EPSILON {
            (image.x - min.x) / size.x
        } else {
            0.0
        };
        let v = if size.y > EPSILON {
            1.0 - (image.y - min.y) / size.y
        } else {
            1.0
        };

        DVec2::new(
            min.x / self.image_size.x + u * size.x / self.image_size.x,
            1.0 - (min.y + (1.0 - v) * size.y) / self.image_size.y,
        )
    }

    /// Cylindrical wall coordinate for a mesh-space position, given the
    /// mesh's depth range.
    pub fn wall(&self, position: DVec3, z_min: f64, z_max: f64) -> DVec2 {
        let u = (position.y.atan2(position.x) + PI) / TAU;
        let span = z_max - z_min;
        let v = if span > EPSILON {
            (position.z - z_min) / span
        } else {
            0.0
        };
        DVec2::new(u, v)
    }

    /// Texture coordinate of a pixel lattice point.
    pub fn corner(&self, corner: IVec2) -> DVec2 {
        let point = corner.as_dvec2();
        DVec2::new(
            point.x / self.image_size.x,
            1.0 - point.y / self.image_size.y,
        )
    }

    /// Assigns a texture coordinate to every vertex of `mesh`.
    pub fn project(&self, mesh: &mut Mesh) {
        let (min, max) = mesh.bounding_box();
        let uvs = mesh
            .vertices()
            .iter()
            .zip(mesh.surfaces())
            .map(|(&position, surface)| match *surface {
                Surface::Cap => self.cap(position),
                Surface::Wall => self.wall(position, min.z, max.z),
                Surface::CellWall { corner } => self.corner(corner),
            })
            .collect();
        mesh.set_uvs(uvs);
    }
}
