//! # Sticker Mesh
//!
//! Turns the opaque silhouette of an RGBA image into a "sticker block": the
//! silhouette given thickness, with front and back caps and side walls,
//! textured with the image itself.
//!
//! ## Architecture
//!
//! ```text
//! RgbaImage → OpacityMask → Boundary (grid | contour) → Mesh → UVs
//! ```
//!
//! Each stage reads the previous stage's output and never modifies it.
//!
//! ## Strategies
//!
//! - **Grid**: one wall quad per exposed pixel edge. Handles any number of
//!   disconnected components. Caps are full image rectangles and rely on
//!   alpha-tested texturing to hide transparent regions.
//! - **Contour**: Moore-neighbor trace of one outline, ear-clipped caps and
//!   a swept wall. Fewer polygons, but only the first component is kept.
//!
//! ## Usage
//!
//! ```rust
//! use sticker_mesh::{extrude, BoundaryStrategy, ExtrusionParams, RgbaImage};
//!
//! let image = RgbaImage::filled(4, 4, [255, 0, 0, 255]).unwrap();
//! let sticker = extrude(&image, &ExtrusionParams::default(), BoundaryStrategy::Grid).unwrap();
//! assert_eq!(sticker.wall_count, 16);
//! assert_eq!(sticker.mesh.triangle_count(), 2 * (16 + 2));
//! ```

pub mod assemble;
pub mod boundary;
pub mod error;
pub mod image;
pub mod mask;
pub mod mesh;
pub mod params;
pub mod uv;

pub use boundary::{Boundary, BoundingBox, Contour};
pub use error::{MeshError, MeshResult};
pub use image::RgbaImage;
pub use mask::{OpacityMask, ThresholdMode};
pub use mesh::{Mesh, Surface};
pub use params::{BoundaryStrategy, ExtrusionParams, StickerOptions};

use tracing::debug;

use crate::assemble::assemble;
use crate::boundary::build_boundary;

/// A finished sticker mesh for one image.
#[derive(Debug, Clone)]
pub struct StickerMesh {
    /// Positions, UVs, triangles and normals
    pub mesh: Mesh,
    /// Bounds of the traced contour (contour strategy only)
    pub contour_bounds: Option<BoundingBox>,
    /// Strategy that built the boundary
    pub strategy: BoundaryStrategy,
    /// Wall quads (grid) or outline segments (contour)
    pub wall_count: usize,
}

impl StickerMesh {
    /// True if there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.mesh.triangle_count() == 0
    }
}

/// Builds the sticker mesh for `image`.
///
/// Parameters are validated before any geometry is built. A silhouette with
/// nothing above the threshold is not an error: the grid strategy still
/// returns its two cap quads, the contour strategy returns an empty mesh.
///
/// # Errors
///
/// - [`MeshError::InvalidThickness`] / [`MeshError::InvalidSize`] for
///   non-positive or non-finite parameters
/// - [`MeshError::TooManyVertices`] / [`MeshError::TooManyTriangles`] if the
///   result would exceed the configured limits; the vertex limit is checked
///   while the boundary is scanned, before the mesh is allocated
#[tracing::instrument(
    skip_all,
    fields(width = image.width(), height = image.height(), strategy = %strategy)
)]
pub fn extrude(
    image: &RgbaImage,
    params: &ExtrusionParams,
    strategy: BoundaryStrategy,
) -> MeshResult<StickerMesh> {
    params.validate()?;

    let boundary = build_boundary(image, params.alpha_threshold, strategy)?;

    let contour_bounds = match &boundary {
        Boundary::Contour(contour) => Some(contour.bounds),
        Boundary::Grid(_) => None,
    };

    let mut assembled = assemble(&boundary, image.width(), image.height(), params);
    assembled.projector.project(&mut assembled.mesh);
    assembled.mesh.compute_normals();
    assembled.mesh.check_limits()?;

    debug!(
        vertices = assembled.mesh.vertex_count(),
        triangles = assembled.mesh.triangle_count(),
        walls = assembled.wall_count,
        "sticker mesh built"
    );

    Ok(StickerMesh {
        mesh: assembled.mesh,
        contour_bounds,
        strategy,
        wall_count: assembled.wall_count,
    })
}

/// Builds the sticker mesh from a raw RGBA buffer.
///
/// # Errors
///
/// Fails if the buffer does not describe a valid image, then as [`extrude`].
pub fn extrude_rgba(
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    params: &ExtrusionParams,
    strategy: BoundaryStrategy,
) -> MeshResult<StickerMesh> {
    let image = RgbaImage::from_vec(width, height, pixels)?;
    extrude(&image, params, strategy)
}

/// Builds one independent sticker mesh per frame.
///
/// Frames are processed in parallel when the `parallel` feature is enabled.
/// The first error encountered is returned.
pub fn extrude_frames(
    frames: &[RgbaImage],
    params: &ExtrusionParams,
    strategy: BoundaryStrategy,
) -> MeshResult<Vec<StickerMesh>> {
    params.validate()?;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        frames
            .par_iter()
            .map(|frame| extrude(frame, params, strategy))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        frames
            .iter()
            .map(|frame| extrude(frame, params, strategy))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extrude_assigns_uvs_and_normals() {
        let image = RgbaImage::filled(3, 2, [0, 0, 0, 255]).unwrap();
        let sticker = extrude(&image, &ExtrusionParams::default(), BoundaryStrategy::Grid).unwrap();
        let mesh = &sticker.mesh;
        assert_eq!(mesh.uv_coords().len(), mesh.vertex_count());
        assert_eq!(mesh.normals().map(|n| n.len()), Some(mesh.vertex_count()));
        assert!(sticker.contour_bounds.is_none());
    }

    #[test]
    fn test_extrude_rejects_bad_params_first() {
        let image = RgbaImage::filled(1, 1, [0, 0, 0, 255]).unwrap();
        let params = ExtrusionParams {
            size: 0.0,
            ..Default::default()
        };
        assert_eq!(
            extrude(&image, &params, BoundaryStrategy::Contour).unwrap_err(),
            MeshError::InvalidSize(0.0)
        );
    }

    #[test]
    fn test_extrude_rejects_noisy_image_before_meshing() {
        // Every pixel differs from its neighbors: about 2·w·h wall quads
        let image = RgbaImage::from_alpha_fn(1200, 1200, |x, y| ((x + y) % 2 * 255) as u8).unwrap();
        let err = extrude(&image, &ExtrusionParams::default(), BoundaryStrategy::Grid).unwrap_err();
        let MeshError::TooManyVertices { count, max } = err else {
            panic!("expected a vertex limit error, got {err:?}");
        };
        assert_eq!(max, config::constants::MAX_VERTICES);
        assert!(count > max);
    }

    #[test]
    fn test_extrude_rgba_checks_buffer() {
        let err = extrude_rgba(
            2,
            2,
            vec![0; 15],
            &ExtrusionParams::default(),
            BoundaryStrategy::Grid,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_extrude_frames_keeps_order() {
        let frames: Vec<RgbaImage> = (1..=4)
            .map(|w| RgbaImage::filled(w, 1, [0, 0, 0, 255]).unwrap())
            .collect();
        let stickers =
            extrude_frames(&frames, &ExtrusionParams::default(), BoundaryStrategy::Grid).unwrap();
        let walls: Vec<usize> = stickers.iter().map(|s| s.wall_count).collect();
        assert_eq!(walls, vec![4, 6, 8, 10]);
    }
}
