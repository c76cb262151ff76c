//! Raw float serializer.
//!
//! Serializes a scalar grid as `width * height` 32-bit floats in
//! row-major order, native byte order, no header. This is the
//! full-precision artifact: unlike the quantized image it survives a
//! round trip bit for bit, so downstream tools can reconstruct the
//! exact field.
//!
//! This is a pure function with no I/O -- it returns a `Vec<u8>`.

use sdfield_pipeline::ScalarGrid;

/// Serialize a grid's values as raw native-endian `f32` bytes.
#[must_use = "returns the serialized bytes"]
pub fn to_raw_f32(field: &ScalarGrid) -> Vec<u8> {
    bytemuck::cast_slice(field.as_slice()).to_vec()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn four_bytes_per_pixel() {
        let grid = ScalarGrid::filled(7, 3, 0.0).unwrap();
        assert_eq!(to_raw_f32(&grid).len(), 7 * 3 * 4);
    }

    #[test]
    fn round_trips_through_native_bytes() {
        let mut grid = ScalarGrid::filled(2, 2, 0.0).unwrap();
        grid.set(0, 0, -0.5);
        grid.set(1, 0, 1.25);
        grid.set(0, 1, f32::MIN_POSITIVE);
        grid.set(1, 1, 1e30);

        let bytes = to_raw_f32(&grid);
        let floats: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(floats, grid.as_slice());
    }

    #[test]
    fn row_major_order() {
        let mut grid = ScalarGrid::filled(2, 2, 0.0).unwrap();
        grid.set(1, 0, 1.0);
        grid.set(0, 1, 2.0);

        let bytes = to_raw_f32(&grid);
        let second = f32::from_ne_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let third = f32::from_ne_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        assert_eq!(second, 1.0);
        assert_eq!(third, 2.0);
    }
}
