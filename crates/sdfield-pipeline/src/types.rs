//! Shared types for the sdfield processing pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference the
/// quantized output without depending on `image` directly.
pub use image::GrayImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Total pixel count as a `usize`.
    #[must_use]
    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A borrowed, stride-aware view of an 8-bit intensity grid.
///
/// This is the input boundary of the pipeline: the caller (typically an
/// image codec) owns the byte buffer, and rows may be padded, so a row
/// starts every `stride` bytes even when `stride > width`. The pipeline
/// only ever reads through this view.
#[derive(Debug, Clone, Copy)]
pub struct PixelGrid<'a> {
    width: u32,
    height: u32,
    stride: usize,
    data: &'a [u8],
}

impl<'a> PixelGrid<'a> {
    /// Create a view over `data` with the given dimensions and row stride.
    ///
    /// # Errors
    ///
    /// Returns [`SdfError::EmptyGrid`] if either dimension is zero,
    /// [`SdfError::InvalidStride`] if `stride < width`, and
    /// [`SdfError::BufferTooSmall`] if `data` does not cover the last
    /// pixel of the last row.
    pub fn new(width: u32, height: u32, stride: usize, data: &'a [u8]) -> Result<Self, SdfError> {
        if width == 0 || height == 0 {
            return Err(SdfError::EmptyGrid);
        }
        if stride < width as usize {
            return Err(SdfError::InvalidStride { stride, width });
        }
        // The final row only needs `width` bytes, not a full stride.
        let needed = (height as usize - 1) * stride + width as usize;
        if data.len() < needed {
            return Err(SdfError::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// View a `GrayImage` as a tightly packed pixel grid (stride = width).
    ///
    /// # Errors
    ///
    /// Returns [`SdfError::EmptyGrid`] if the image has a zero dimension.
    pub fn from_gray(image: &'a GrayImage) -> Result<Self, SdfError> {
        Self::new(
            image.width(),
            image.height(),
            image.width() as usize,
            image.as_raw(),
        )
    }

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

    /// Row stride in bytes.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Width and height together.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Intensity sample at `(x, y)`. Coordinates must be in bounds.
    #[must_use]
    pub(crate) fn intensity(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.stride + x as usize]
    }
}

/// A mutable, stride-aware view of an 8-bit grid.
///
/// The output boundary for in-place quantization: the caller hands the
/// pipeline the same buffer layout it received from its codec, and pixel
/// values are overwritten row by row. Padding bytes are left untouched.
#[derive(Debug)]
pub struct PixelGridMut<'a> {
    width: u32,
    height: u32,
    stride: usize,
    data: &'a mut [u8],
}

impl<'a> PixelGridMut<'a> {
    /// Create a mutable view over `data`.
    ///
    /// # Errors
    ///
    /// Same validation as [`PixelGrid::new`].
    pub fn new(
        width: u32,
        height: u32,
        stride: usize,
        data: &'a mut [u8],
    ) -> Result<Self, SdfError> {
        // Run the shared validation on an immutable reborrow first.
        PixelGrid::new(width, height, stride, data)?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

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

    /// Overwrite the pixel at `(x, y)`. Coordinates must be in bounds.
    pub(crate) fn set(&mut self, x: u32, y: u32, value: u8) {
        self.data[y as usize * self.stride + x as usize] = value;
    }
}

/// An owned width×height grid of `f32` values.
///
/// One storage serves every stage of the pipeline: it starts life as the
/// seed cost grid, is overwritten in place by the squared distance
/// transform, and is overwritten again by the signed-distance encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarGrid {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl ScalarGrid {
    /// Allocate a grid with every cell set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SdfError::EmptyGrid`] for a zero dimension and
    /// [`SdfError::Allocation`] if the buffer cannot be reserved.
    pub fn filled(width: u32, height: u32, value: f32) -> Result<Self, SdfError> {
        if width == 0 || height == 0 {
            return Err(SdfError::EmptyGrid);
        }
        let len = width as usize * height as usize;
        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        data.resize(len, value);
        Ok(Self {
            width,
            height,
            data,
        })
    }

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

    /// Value at `(x, y)`. Coordinates must be in bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Overwrite the value at `(x, y)`. Coordinates must be in bounds.
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        self.data[y as usize * self.width as usize + x as usize] = value;
    }

    /// One row as a slice.
    #[must_use]
    pub fn row(&self, y: u32) -> &[f32] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    /// One row as a mutable slice.
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        let w = self.width as usize;
        let start = y as usize * w;
        &mut self.data[start..start + w]
    }

    /// All values in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Configuration for the signed-distance-field pipeline.
///
/// All parameters have defaults matching the conventional SDF rendering
/// setup: binarize at mid-gray, map a distance of zero to mid-range 127.5
/// and each pixel of distance to 4 steps of output intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdfConfig {
    /// Binarization threshold. A pixel is foreground when its intensity
    /// is strictly greater than this value.
    pub threshold: u8,

    /// Quantization scale: output intensity steps per pixel of distance.
    pub scale: f32,

    /// Quantization bias: the output intensity of distance zero.
    pub bias: f32,

    /// Largest supported width or height. Working buffers are sized to
    /// the actual line length, but lines longer than this are rejected
    /// with [`SdfError::DimensionTooLarge`] before anything is allocated.
    pub max_dimension: u32,
}

impl Default for SdfConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            scale: 4.0,
            bias: 127.5,
            max_dimension: 4096,
        }
    }
}

impl SdfConfig {
    /// Validate grid dimensions against this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SdfError::EmptyGrid`] for a zero dimension and
    /// [`SdfError::DimensionTooLarge`] when either axis exceeds
    /// [`max_dimension`](Self::max_dimension).
    pub fn check_dimensions(&self, dimensions: Dimensions) -> Result<(), SdfError> {
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(SdfError::EmptyGrid);
        }
        for dimension in [dimensions.width, dimensions.height] {
            if dimension > self.max_dimension {
                return Err(SdfError::DimensionTooLarge {
                    dimension,
                    max: self.max_dimension,
                });
            }
        }
        Ok(())
    }
}

/// Result of running the full pipeline.
///
/// Note: does not derive `PartialEq` or serde traits because `GrayImage`
/// implements neither.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// The signed distance field: negative inside foreground, positive
    /// outside, in pixels. This is the exact artifact; consumers that
    /// need full precision should serialize this grid.
    pub field: ScalarGrid,

    /// The field quantized to 8-bit intensities for display.
    pub quantized: GrayImage,

    /// Dimensions of the source image in pixels.
    pub dimensions: Dimensions,
}

/// Errors that can occur while building a distance field.
#[derive(Debug, thiserror::Error)]
pub enum SdfError {
    /// A grid or line had zero width or height.
    #[error("grid dimensions must be non-zero")]
    EmptyGrid,

    /// A grid dimension exceeds the configured maximum.
    #[error("grid dimension {dimension} exceeds the configured maximum of {max}")]
    DimensionTooLarge {
        /// The offending width or height.
        dimension: u32,
        /// The configured limit.
        max: u32,
    },

    /// A pixel buffer's stride is smaller than the row width.
    #[error("row stride {stride} is smaller than the width {width}")]
    InvalidStride {
        /// Bytes per row in the supplied buffer.
        stride: usize,
        /// Pixels per row.
        width: u32,
    },

    /// A pixel buffer does not cover the declared dimensions.
    #[error("pixel buffer too small: need {needed} bytes, have {actual}")]
    BufferTooSmall {
        /// Bytes required by the declared width/height/stride.
        needed: usize,
        /// Bytes actually supplied.
        actual: usize,
    },

    /// A working buffer could not be allocated.
    #[error("failed to allocate a working buffer: {0}")]
    Allocation(#[from] std::collections::TryReserveError),
}
