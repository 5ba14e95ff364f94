//! # RGBA Image
//!
//! Decoded, row-major, straight-alpha pixel buffer. Decoding from a file
//! format happens outside this crate.

use config::constants::{ALPHA_CHANNEL, MAX_IMAGE_DIMENSION, RGBA_CHANNELS};

use crate::error::{MeshError, MeshResult};

/// A width x height RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Wraps a pixel buffer, checking its dimensions.
    ///
    /// # Errors
    ///
    /// - [`MeshError::EmptyImage`] when either side is zero
    /// - [`MeshError::ImageTooLarge`] when either side exceeds
    ///   `MAX_IMAGE_DIMENSION`
    /// - [`MeshError::BufferSizeMismatch`] when `data` is not
    ///   `width * height * 4` bytes
    ///
    /// # Example
    ///
    /// ```rust
    /// use sticker_mesh::RgbaImage;
    ///
    /// let image = RgbaImage::from_vec(2, 1, vec![0, 0, 0, 255, 0, 0, 0, 0]).unwrap();
    /// assert_eq!(image.alpha(0, 0), 255);
    /// assert_eq!(image.alpha(1, 0), 0);
    /// ```
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> MeshResult<Self> {
        if width == 0 || height == 0 {
            return Err(MeshError::EmptyImage { width, height });
        }
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            return Err(MeshError::ImageTooLarge {
                width,
                height,
                max: MAX_IMAGE_DIMENSION,
            });
        }

        let expected = width * height * RGBA_CHANNELS;
        if data.len() != expected {
            return Err(MeshError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates an image where every pixel has the given RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> MeshResult<Self> {
        let data = rgba.repeat(width.saturating_mul(height));
        Self::from_vec(width, height, data)
    }

    /// Creates an image from a per-pixel alpha function; color channels are white.
    pub fn from_alpha_fn(
        width: usize,
        height: usize,
        mut alpha: impl FnMut(usize, usize) -> u8,
    ) -> MeshResult<Self> {
        let mut data = Vec::with_capacity(width.saturating_mul(height) * RGBA_CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[255, 255, 255, alpha(x, y)]);
            }
        }
        Self::from_vec(width, height, data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Alpha of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        self.data[(y * self.width + x) * RGBA_CHANNELS + ALPHA_CHANNEL]
    }

    /// Snaps every alpha to 0 or 255: below `threshold` becomes fully
    /// transparent, everything else fully opaque. Color channels are kept.
    ///
    /// Applying the same threshold twice changes nothing.
    pub fn binarize(&mut self, threshold: u8) {
        for pixel in self.data.chunks_exact_mut(RGBA_CHANNELS) {
            pixel[ALPHA_CHANNEL] = if pixel[ALPHA_CHANNEL] < threshold { 0 } else { 255 };
        }
    }

    /// Returns a binarized copy, leaving `self` untouched.
    pub fn binarized(&self, threshold: u8) -> Self {
        let mut copy = self.clone();
        copy.binarize(threshold);
        copy
    }
}
