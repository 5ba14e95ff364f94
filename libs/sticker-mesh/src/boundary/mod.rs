//! # Boundary Construction
//!
//! Turns an opacity mask into boundary geometry, using one of two
//! independent strategies:
//! - **Grid**: every exposed pixel edge, any number of components
//! - **Contour**: one ordered outline of the first component found
//!
//! Both return a [`Boundary`], the common input of the mesh assembler.

pub mod contour;
pub mod grid;

#[cfg(test)]
mod tests;

pub use contour::{contour_vertex_count, trace_contour, BoundingBox, Contour};
pub use grid::{grid_vertex_count, scan_edges, BoundaryEdge, EdgeSide, GridBoundary};

use config::constants::MAX_VERTICES;

use crate::error::MeshResult;
use crate::image::RgbaImage;
use crate::mask::{OpacityMask, ThresholdMode};
use crate::params::BoundaryStrategy;

/// Boundary geometry produced by one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    Grid(GridBoundary),
    Contour(Contour),
}

impl Boundary {
    /// The strategy that produced this boundary.
    pub fn strategy(&self) -> BoundaryStrategy {
        match self {
            Self::Grid(_) => BoundaryStrategy::Grid,
            Self::Contour(_) => BoundaryStrategy::Contour,
        }
    }
}

/// Builds the boundary of `image` with the given strategy.
///
/// The grid strategy counts a pixel as solid when `alpha >= threshold`.
/// The contour strategy first binarizes a copy of the image at `threshold`
/// and then counts a pixel as solid when `alpha > threshold`.
///
/// # Errors
///
/// [`MeshError::TooManyVertices`](crate::MeshError::TooManyVertices) if the
/// boundary would assemble into more than `MAX_VERTICES` vertices. Both
/// scans stop as soon as the limit is crossed.
pub fn build_boundary(
    image: &RgbaImage,
    threshold: u8,
    strategy: BoundaryStrategy,
) -> MeshResult<Boundary> {
    match strategy {
        BoundaryStrategy::Grid => {
            let mask = OpacityMask::new(image, threshold, ThresholdMode::AtLeast);
            scan_edges(&mask, MAX_VERTICES).map(Boundary::Grid)
        }
        BoundaryStrategy::Contour => {
            let binary = image.binarized(threshold);
            let mask = OpacityMask::new(&binary, threshold, ThresholdMode::Above);
            trace_contour(&mask, MAX_VERTICES).map(Boundary::Contour)
        }
    }
}
