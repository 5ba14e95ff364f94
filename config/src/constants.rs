//! # Configuration Constants
//!
//! Centralized constants for the sticker extrusion pipeline. Extrusion
//! defaults, precision values, and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Extrusion**: Default thickness, size and alpha threshold
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance used when welding coincident vertex positions.
///
/// Cap and wall faces never share vertices (their texture coordinates
/// differ), so topology checks weld positions that lie within this
/// distance of each other before counting edge uses.
///
/// # Example
///
/// ```rust
/// use config::constants::{EPSILON, WELD_EPSILON};
///
/// assert!(WELD_EPSILON > EPSILON);
/// ```
pub const WELD_EPSILON: f64 = 1e-7;

// =============================================================================
// EXTRUSION DEFAULTS
// =============================================================================

/// Default distance between the front and back caps.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_THICKNESS;
///
/// let user_thickness: Option<f64> = None;
/// assert!(user_thickness.unwrap_or(DEFAULT_THICKNESS) > 0.0);
/// ```
pub const DEFAULT_THICKNESS: f64 = 1.0;

/// Default uniform scale applied after normalization.
///
/// With the default size the longer side of the sticker spans one unit.
pub const DEFAULT_SIZE: f64 = 1.0;

/// Default alpha threshold separating solid from transparent pixels.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_ALPHA_THRESHOLD;
///
/// let alpha: u8 = 200;
/// assert!(alpha >= DEFAULT_ALPHA_THRESHOLD);
/// ```
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;

/// Number of bytes per RGBA pixel.
pub const RGBA_CHANNELS: usize = 4;

/// Index of the alpha byte inside an RGBA pixel.
pub const ALPHA_CHANNEL: usize = 3;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum width or height of a source image, in pixels.
///
/// The grid path emits one quad per exposed pixel edge, so a noisy image
/// at this size already produces tens of millions of vertices.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_IMAGE_DIMENSION;
///
/// let (width, height) = (1024, 768);
/// assert!(width <= MAX_IMAGE_DIMENSION && height <= MAX_IMAGE_DIMENSION);
/// ```
pub const MAX_IMAGE_DIMENSION: usize = 8192;

/// Maximum number of vertices in a single mesh.
///
/// Safety limit to prevent memory exhaustion from extremely noisy masks.
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum number of triangles in a single mesh.
pub const MAX_TRIANGLES: usize = 10_000_000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
