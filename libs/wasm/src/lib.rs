//! WASM-facing entry points for the sticker mesh pipeline.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. The caller decodes the image (canvas `getImageData`,
//! GIF frame decoder, ...) and passes the raw RGBA bytes in. Native tests
//! use the `*_internal` helpers, which return Rust errors instead of
//! `JsValue`.
//!
//! ```
//! use sticker_wasm::extrude_image_internal;
//!
//! let pixels = vec![255u8; 4 * 4 * 4];
//! let mesh = extrude_image_internal(&pixels, 4, 4, 0.1, 1.0, 128.0, "grid").unwrap();
//! assert_eq!(mesh.wall_count(), 16);
//! assert_eq!(mesh.triangle_count(), 2 * (16 + 2));
//! ```

use std::str::FromStr;

use sticker_mesh::{extrude_rgba, BoundaryStrategy, ExtrusionParams, MeshError, StickerOptions};
use thiserror::Error;
use wasm_bindgen::prelude::*;

mod mesh_handle;

pub use mesh_handle::MeshHandle;

/// Errors surfaced at the JavaScript boundary.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("Invalid options JSON: {0}")]
    Options(#[from] serde_json::Error),
}

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "sticker-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Returns the default options as JSON, e.g.
/// `{"thickness":1.0,"size":1.0,"alphaThreshold":128,"strategy":"grid"}`.
///
/// # Errors
/// Returns a JavaScript error if serialization fails.
#[wasm_bindgen]
pub fn default_options() -> Result<String, JsValue> {
    default_options_internal().map_err(JsValue::from)
}

/// Host-only helper behind [`default_options`].
pub fn default_options_internal() -> Result<String, BridgeError> {
    Ok(serde_json::to_string(&StickerOptions::default())?)
}

/// Extrudes an RGBA pixel buffer into a sticker mesh.
///
/// `alpha_threshold` arrives as a JS number and must lie in `[0, 255]`; it
/// is rounded to the nearest integer. `strategy` is `"grid"` or
/// `"contour"`.
///
/// # Errors
/// Returns a JavaScript error with a human-readable message for invalid
/// dimensions, parameters or strategy names.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const { data, width, height } = ctx.getImageData(0, 0, w, h);
/// // const mesh = extrude_image(data, width, height, 0.1, 1.0, 128, "contour");
/// ```
#[wasm_bindgen]
pub fn extrude_image(
    pixels: &[u8],
    width: u32,
    height: u32,
    thickness: f64,
    size: f64,
    alpha_threshold: f64,
    strategy: &str,
) -> Result<MeshHandle, JsValue> {
    extrude_image_internal(pixels, width, height, thickness, size, alpha_threshold, strategy)
        .map_err(JsValue::from)
}

/// Host-only helper behind [`extrude_image`].
///
/// # Examples
///
/// ```
/// use sticker_wasm::extrude_image_internal;
///
/// // 2x1 image: one opaque pixel, one transparent
/// let pixels = [0u8, 0, 0, 255, 0, 0, 0, 0];
/// let mesh = extrude_image_internal(&pixels, 2, 1, 1.0, 1.0, 128.0, "grid").unwrap();
/// assert_eq!(mesh.wall_count(), 4);
/// ```
pub fn extrude_image_internal(
    pixels: &[u8],
    width: u32,
    height: u32,
    thickness: f64,
    size: f64,
    alpha_threshold: f64,
    strategy: &str,
) -> Result<MeshHandle, BridgeError> {
    let params = ExtrusionParams {
        thickness,
        size,
        alpha_threshold: threshold_from_js(alpha_threshold)?,
    };
    let strategy = BoundaryStrategy::from_str(strategy)?;
    run(pixels, width, height, &params, strategy)
}

/// Extrudes an RGBA pixel buffer using options given as JSON.
///
/// Missing fields take their defaults, see [`default_options`].
///
/// # Errors
/// Returns a JavaScript error for malformed JSON or invalid input.
#[wasm_bindgen]
pub fn extrude_image_with_options(
    pixels: &[u8],
    width: u32,
    height: u32,
    options_json: &str,
) -> Result<MeshHandle, JsValue> {
    extrude_image_with_options_internal(pixels, width, height, options_json).map_err(JsValue::from)
}

/// Host-only helper behind [`extrude_image_with_options`].
pub fn extrude_image_with_options_internal(
    pixels: &[u8],
    width: u32,
    height: u32,
    options_json: &str,
) -> Result<MeshHandle, BridgeError> {
    let options: StickerOptions = serde_json::from_str(options_json)?;
    run(pixels, width, height, &options.params, options.strategy)
}

fn run(
    pixels: &[u8],
    width: u32,
    height: u32,
    params: &ExtrusionParams,
    strategy: BoundaryStrategy,
) -> Result<MeshHandle, BridgeError> {
    let sticker = extrude_rgba(
        width as usize,
        height as usize,
        pixels.to_vec(),
        params,
        strategy,
    )?;
    Ok(MeshHandle::from_sticker(sticker))
}

fn threshold_from_js(value: f64) -> Result<u8, MeshError> {
    if !value.is_finite() || !(0.0..=255.0).contains(&value) {
        return Err(MeshError::invalid_threshold(value));
    }
    Ok(value.round() as u8)
}
