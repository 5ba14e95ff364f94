//! # Opacity Mask
//!
//! Binary solid / not-solid classification of an image's pixels by alpha
//! threshold. The predicate is total: coordinates outside the image are
//! never solid, which lets boundary scans run over a padded range.

use crate::image::RgbaImage;

/// How a pixel's alpha is compared against the threshold.
///
/// The grid strategy uses `AtLeast`, the contour strategy `Above`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdMode {
    /// Solid iff `alpha >= threshold`.
    AtLeast,
    /// Solid iff `alpha > threshold`.
    Above,
}

impl ThresholdMode {
    #[inline]
    fn passes(self, alpha: u8, threshold: u8) -> bool {
        match self {
            Self::AtLeast => alpha >= threshold,
            Self::Above => alpha > threshold,
        }
    }
}

/// Lazy opacity predicate over a borrowed image.
#[derive(Debug, Clone, Copy)]
pub struct OpacityMask<'a> {
    image: &'a RgbaImage,
    threshold: u8,
    mode: ThresholdMode,
}

impl<'a> OpacityMask<'a> {
    /// Builds the mask for `image`. No pixels are touched until queried.
    ///
    /// ```rust
    /// use sticker_mesh::{OpacityMask, RgbaImage, ThresholdMode};
    ///
    /// let image = RgbaImage::filled(2, 2, [0, 0, 0, 128]).unwrap();
    /// let inclusive = OpacityMask::new(&image, 128, ThresholdMode::AtLeast);
    /// let exclusive = OpacityMask::new(&image, 128, ThresholdMode::Above);
    /// assert!(inclusive.is_solid(0, 0));
    /// assert!(!exclusive.is_solid(0, 0));
    /// assert!(!inclusive.is_solid(-1, 0));
    /// ```
    pub fn new(image: &'a RgbaImage, threshold: u8, mode: ThresholdMode) -> Self {
        Self {
            image,
            threshold,
            mode,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// Returns true if `(x, y)` is inside the image and its alpha passes.
    #[inline]
    pub fn is_solid(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.image.width() || y >= self.image.height() {
            return false;
        }
        self.mode.passes(self.image.alpha(x, y), self.threshold)
    }
}
