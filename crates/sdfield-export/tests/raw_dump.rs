//! Integration test: run a synthetic image through the full pipeline and
//! dump the field as raw floats.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]

use sdfield_pipeline::{PixelGrid, SdfConfig};

#[test]
fn center_dot_pipeline_to_raw_dump() {
    // 5x5 all-background image with a single bright center pixel: the
    // center is the sole boundary seed.
    let mut bytes = vec![0_u8; 25];
    bytes[2 * 5 + 2] = 255;
    let image = PixelGrid::new(5, 5, 5, &bytes).unwrap();

    let config = SdfConfig::default();
    let result = sdfield_pipeline::process(&image, &config).expect("pipeline should succeed");

    let dump = sdfield_export::to_raw_f32(&result.field);
    assert_eq!(dump.len(), 5 * 5 * 4);

    let floats: Vec<f32> = dump
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    // The dump is the exact field: sqrt of the squared distance to the
    // center, except the center itself which is inside and offset.
    for y in 0..5_i64 {
        for x in 0..5_i64 {
            let expected = if (x, y) == (2, 2) {
                -0.5
            } else {
                let squared = (x - 2) * (x - 2) + (y - 2) * (y - 2);
                (squared as f32).sqrt()
            };
            assert_eq!(
                floats[(y * 5 + x) as usize],
                expected,
                "raw dump mismatch at ({x}, {y})"
            );
        }
    }
}

#[test]
fn dump_is_bit_stable_across_runs() {
    let mut bytes = vec![0_u8; 8 * 6];
    // An L-shaped blob.
    for (x, y) in [(1, 1), (1, 2), (1, 3), (2, 3), (3, 3)] {
        bytes[y * 8 + x] = 200;
    }
    let image = PixelGrid::new(8, 6, 8, &bytes).unwrap();
    let config = SdfConfig::default();

    let first = sdfield_export::to_raw_f32(
        &sdfield_pipeline::process(&image, &config).unwrap().field,
    );
    let second = sdfield_export::to_raw_f32(
        &sdfield_pipeline::process(&image, &config).unwrap().field,
    );
    assert_eq!(first, second);
}
