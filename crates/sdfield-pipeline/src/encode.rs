//! Signed-distance encoding and 8-bit quantization.
//!
//! The distance transform produces squared distances to the nearest
//! boundary seed. Encoding takes the square root and applies the sign
//! convention: negative inside the shape, positive outside. Interior
//! pixels are additionally pushed down by [`INSIDE_OFFSET`], so a seed
//! pixel (squared distance zero) reads as −0.5 instead of 0.0 and the
//! zero crossing of the field sits between the boundary pixel and the
//! background next to it. Exterior magnitudes carry no matching offset;
//! the field is deliberately asymmetric around the boundary.
//!
//! Quantization maps a signed distance `d` to
//! `clamp(round(bias + d * scale), 0, 255)`. Distances beyond the
//! representable range saturate at 0 and 255, which also soaks up the
//! huge magnitudes produced by seedless images.
//!
//! These are steps 4 and 5 in the pipeline.

use image::GrayImage;

use crate::mask::BinaryMask;
use crate::types::{PixelGridMut, ScalarGrid};

/// Extra distance subtracted from every interior pixel.
pub const INSIDE_OFFSET: f32 = 0.5;

/// Convert squared distances to signed distances, in place.
///
/// Per pixel: `d = sqrt(d²)`, then interior pixels become
/// `-d - INSIDE_OFFSET` while exterior pixels keep the unmodified
/// magnitude. `mask` must have the same dimensions as `squared`.
pub fn sign_distances(squared: &mut ScalarGrid, mask: &BinaryMask) {
    debug_assert_eq!(squared.dimensions(), mask.dimensions());

    for y in 0..squared.height() {
        for x in 0..squared.width() {
            let magnitude = squared.get(x, y).sqrt();
            let signed = if mask.get(x, y) {
                -magnitude - INSIDE_OFFSET
            } else {
                magnitude
            };
            squared.set(x, y, signed);
        }
    }
}

/// Quantize one signed distance to an 8-bit intensity.
///
/// Written as plain `bias + d * scale`: a fused multiply-add rounds
/// differently and the quantized values must be reproducible.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[allow(clippy::suboptimal_flops)]
fn quantize_value(distance: f32, scale: f32, bias: f32) -> u8 {
    (bias + distance * scale).round().clamp(0.0, 255.0) as u8
}

/// Quantize a signed distance field into a fresh 8-bit image.
#[must_use = "returns the quantized image"]
pub fn quantize(field: &ScalarGrid, scale: f32, bias: f32) -> GrayImage {
    GrayImage::from_fn(field.width(), field.height(), |x, y| {
        image::Luma([quantize_value(field.get(x, y), scale, bias)])
    })
}

/// Quantize a signed distance field into a caller-owned byte buffer,
/// overwriting pixel values in place and leaving row padding untouched.
///
/// `pixels` must have the same dimensions as `field`; this is how the
/// quantized output is handed back to an external codec that owns the
/// original (possibly padded) buffer.
pub fn quantize_into(field: &ScalarGrid, scale: f32, bias: f32, pixels: &mut PixelGridMut<'_>) {
    debug_assert_eq!(field.width(), pixels.width());
    debug_assert_eq!(field.height(), pixels.height());

    for y in 0..field.height() {
        for x in 0..field.width() {
            pixels.set(x, y, quantize_value(field.get(x, y), scale, bias));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::mask::binarize;
    use crate::transform::UNBOUNDED;
    use crate::types::PixelGrid;

    fn mask_of(width: u32, height: u32, bytes: &[u8]) -> BinaryMask {
        let grid = PixelGrid::new(width, height, width as usize, bytes).unwrap();
        binarize(&grid, 128).unwrap()
    }

    #[test]
    fn interior_pixels_are_negative_and_offset() {
        let mut grid = ScalarGrid::filled(2, 1, 0.0).unwrap();
        grid.set(1, 0, 4.0);
        let mask = mask_of(2, 1, &[255, 255]);
        sign_distances(&mut grid, &mask);
        assert_eq!(grid.get(0, 0), -0.5);
        assert_eq!(grid.get(1, 0), -2.5);
    }

    #[test]
    fn exterior_pixels_keep_the_plain_magnitude() {
        let mut grid = ScalarGrid::filled(2, 1, 9.0).unwrap();
        let mask = mask_of(2, 1, &[0, 0]);
        sign_distances(&mut grid, &mask);
        assert_eq!(grid.get(0, 0), 3.0);
        assert_eq!(grid.get(1, 0), 3.0);
    }

    #[test]
    fn quantize_zero_distance_hits_the_bias() {
        assert_eq!(quantize_value(0.0, 4.0, 127.5), 128);
    }

    #[test]
    fn quantize_rounds_half_away_from_zero() {
        // 127.5 + (-0.5 * 4.0) = 125.5, which rounds up to 126.
        assert_eq!(quantize_value(-0.5, 4.0, 127.5), 126);
        // 127.5 + (1.0 * 4.0) = 131.5 rounds to 132.
        assert_eq!(quantize_value(1.0, 4.0, 127.5), 132);
    }

    #[test]
    fn quantize_clamps_at_the_extremes() {
        // 127.5 + 31.875 * 4.0 = 255.0 exactly; anything larger clamps.
        assert_eq!(quantize_value(31.875, 4.0, 127.5), 255);
        assert_eq!(quantize_value(32.0, 4.0, 127.5), 255);
        assert_eq!(quantize_value(1000.0, 4.0, 127.5), 255);
        assert_eq!(quantize_value(-31.875, 4.0, 127.5), 0);
        assert_eq!(quantize_value(-1000.0, 4.0, 127.5), 0);
    }

    #[test]
    fn unbounded_distances_saturate_without_nan() {
        // A seedless image leaves the sentinel everywhere; after the
        // square root the magnitude is enormous but finite, and the
        // exterior quantizes to full white.
        let mut grid = ScalarGrid::filled(3, 1, UNBOUNDED).unwrap();
        let mask = mask_of(3, 1, &[0, 0, 0]);
        sign_distances(&mut grid, &mask);
        assert!(grid.as_slice().iter().all(|v| v.is_finite()));

        let image = quantize(&grid, 4.0, 127.5);
        assert!(image.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn quantize_preserves_dimensions() {
        let grid = ScalarGrid::filled(7, 3, 0.0).unwrap();
        let image = quantize(&grid, 4.0, 127.5);
        assert_eq!(image.width(), 7);
        assert_eq!(image.height(), 3);
    }

    #[test]
    fn quantize_into_respects_stride_padding() {
        let mut grid = ScalarGrid::filled(2, 2, 0.0).unwrap();
        grid.set(1, 1, -40.0);

        let mut bytes = [9_u8; 6];
        let mut pixels = PixelGridMut::new(2, 2, 4, &mut bytes).unwrap();
        quantize_into(&grid, 4.0, 127.5, &mut pixels);

        // Pixels overwritten, padding bytes untouched.
        assert_eq!(bytes, [128, 128, 9, 9, 128, 0]);
    }

    #[test]
    fn custom_scale_and_bias_are_honored() {
        assert_eq!(quantize_value(1.0, 10.0, 100.0), 110);
        assert_eq!(quantize_value(-1.0, 10.0, 100.0), 90);
    }
}
