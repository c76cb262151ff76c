//! Binarization: intensity grid to foreground mask.
//!
//! Every pixel is classified as inside-the-shape (foreground) or
//! outside-the-shape (background) by comparing its intensity against a
//! threshold. A pixel is foreground when it is strictly brighter than
//! the threshold.
//!
//! This is step 1 in the pipeline: the mask drives seed extraction and,
//! later, the sign of the encoded distances.

use crate::types::{Dimensions, PixelGrid, SdfError};

/// A width×height grid of foreground/background flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl BinaryMask {
    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Width and height together.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Whether the pixel at `(x, y)` is foreground.
    /// Coordinates must be in bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Sample the mask with an explicit out-of-bounds value.
    ///
    /// In-bounds coordinates read the mask; anything off-grid reads as
    /// `outside`. Neighbor scans at the image border go through this
    /// accessor so the border policy is always spelled out at the call
    /// site.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn get_or(&self, x: i64, y: i64, outside: bool) -> bool {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return outside;
        }
        self.get(x as u32, y as u32)
    }

    /// Number of foreground pixels.
    #[must_use]
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&inside| inside).count()
    }
}

/// Binarize an intensity grid against `threshold`.
///
/// A pixel is foreground when its intensity is strictly greater than
/// `threshold`, so a threshold of 255 classifies everything as
/// background.
///
/// # Errors
///
/// Returns [`SdfError::Allocation`] if the mask buffer cannot be
/// reserved.
pub fn binarize(image: &PixelGrid<'_>, threshold: u8) -> Result<BinaryMask, SdfError> {
    let (width, height) = (image.width(), image.height());
    let mut data = Vec::new();
    data.try_reserve_exact(width as usize * height as usize)?;

    for y in 0..height {
        for x in 0..width {
            data.push(image.intensity(x, y) > threshold);
        }
    }

    Ok(BinaryMask {
        width,
        height,
        data,
    })
}
