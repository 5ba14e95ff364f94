//! # Config Crate
//!
//! Centralized configuration constants for the sticker extrusion pipeline.
//! All magic numbers and tunable parameters are defined here so the mesh
//! library and the WASM bridge agree on defaults and limits.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_ALPHA_THRESHOLD, DEFAULT_THICKNESS, EPSILON};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // Fall back to defaults when the caller leaves a field out
//! let thickness: Option<f64> = None;
//! assert_eq!(thickness.unwrap_or(DEFAULT_THICKNESS), DEFAULT_THICKNESS);
//! assert_eq!(DEFAULT_ALPHA_THRESHOLD, 128);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values

pub mod constants;
