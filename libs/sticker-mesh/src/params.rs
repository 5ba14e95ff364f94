//! # Extrusion Parameters
//!
//! Per-call configuration: how thick the sticker is, how large it is after
//! normalization, where the alpha cut-off sits, and which boundary
//! strategy builds the silhouette.

use std::fmt;
use std::str::FromStr;

use config::constants::{DEFAULT_ALPHA_THRESHOLD, DEFAULT_SIZE, DEFAULT_THICKNESS};
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};

/// Parameters for one extrusion call.
///
/// # Example
///
/// ```rust
/// use sticker_mesh::ExtrusionParams;
///
/// let params = ExtrusionParams {
///     thickness: 0.2,
///     ..Default::default()
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtrusionParams {
    /// Distance between the front and back caps
    pub thickness: f64,
    /// Uniform scale applied after normalization
    pub size: f64,
    /// Alpha cut-off; comparison operator depends on the strategy
    pub alpha_threshold: u8,
}

impl Default for ExtrusionParams {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS,
            size: DEFAULT_SIZE,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
        }
    }
}

impl ExtrusionParams {
    /// Rejects non-positive or non-finite thickness and size.
    pub fn validate(&self) -> MeshResult<()> {
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(MeshError::InvalidThickness(self.thickness));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(MeshError::InvalidSize(self.size));
        }
        Ok(())
    }
}

/// Boundary construction algorithm.
///
/// The two strategies are independent; neither is a refinement of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryStrategy {
    /// One wall quad per exposed pixel edge, full-rectangle caps.
    /// Solid means `alpha >= threshold`.
    #[default]
    Grid,
    /// Single traced outline, extruded and capped.
    /// Solid means `alpha > threshold` after binarization.
    Contour,
}

impl BoundaryStrategy {
    /// Returns the lowercase name used in JSON and at the JS boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Contour => "contour",
        }
    }
}

impl fmt::Display for BoundaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryStrategy {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "contour" => Ok(Self::Contour),
            other => Err(MeshError::unknown_strategy(other)),
        }
    }
}

/// Parameters plus strategy, as transported in JSON.
///
/// ```rust
/// use sticker_mesh::{BoundaryStrategy, StickerOptions};
///
/// let json = r#"{"thickness": 0.5, "alphaThreshold": 10, "strategy": "contour"}"#;
/// let options: StickerOptions = serde_json::from_str(json).unwrap();
/// assert_eq!(options.strategy, BoundaryStrategy::Contour);
/// assert_eq!(options.params.alpha_threshold, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StickerOptions {
    /// Extrusion parameters
    #[serde(flatten)]
    pub params: ExtrusionParams,
    /// Boundary construction algorithm
    pub strategy: BoundaryStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(ExtrusionParams::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_thickness_rejected() {
        for thickness in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let params = ExtrusionParams {
                thickness,
                ..Default::default()
            };
            assert!(matches!(
                params.validate(),
                Err(MeshError::InvalidThickness(_))
            ));
        }
    }

    #[test]
    fn test_non_positive_size_rejected() {
        let params = ExtrusionParams {
            size: 0.0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(MeshError::InvalidSize(0.0)));
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("grid".parse::<BoundaryStrategy>(), Ok(BoundaryStrategy::Grid));
        assert_eq!(
            " Contour ".parse::<BoundaryStrategy>(),
            Ok(BoundaryStrategy::Contour)
        );
        assert!("marching".parse::<BoundaryStrategy>().is_err());
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in [BoundaryStrategy::Grid, BoundaryStrategy::Contour] {
            assert_eq!(strategy.to_string().parse::<BoundaryStrategy>(), Ok(strategy));
        }
    }
}
