//! sdfield-pipeline: Pure signed-distance-field pipeline (sans-IO).
//!
//! Converts a greyscale raster image into a signed Euclidean distance
//! field through: binarization -> seed extraction -> exact squared
//! distance transform (rows, then columns) -> signed-distance encoding
//! -> 8-bit quantization.
//!
//! This crate has **no I/O dependencies** -- it reads a borrowed,
//! stride-aware byte grid and returns in-memory grids. Decoding image
//! files into that byte grid, and writing the outputs anywhere, belong
//! to the caller (see `sdfield-export` for pure output serializers).

pub mod diagnostics;
pub mod encode;
pub mod mask;
pub mod seed;
pub mod transform;
pub mod types;

use std::time::Instant;

pub use diagnostics::{FieldDiagnostics, FieldSummary, StageDiagnostics, StageMetrics};
pub use mask::BinaryMask;
pub use transform::UNBOUNDED;
pub use types::{
    Dimensions, GrayImage, PixelGrid, PixelGridMut, ProcessResult, ScalarGrid, SdfConfig, SdfError,
};

/// Run the full distance-field pipeline.
///
/// Takes a stride-aware view of 8-bit intensities and a configuration,
/// and produces a [`ProcessResult`] with the signed distance field (in
/// pixels, negative inside the foreground) and its 8-bit quantization.
///
/// # Pipeline steps
///
/// 1. Binarize intensities against `config.threshold`
/// 2. Extract boundary seeds (foreground pixels touching background)
/// 3. Exact squared Euclidean distance transform, rows then columns
/// 4. Signed-distance encoding (square root, negative inside)
/// 5. Quantization to 8-bit intensities
///
/// # Errors
///
/// Returns [`SdfError::DimensionTooLarge`] if either axis exceeds
/// `config.max_dimension` and [`SdfError::Allocation`] if a grid cannot
/// be allocated. On error nothing partial is returned.
pub fn process(image: &PixelGrid<'_>, config: &SdfConfig) -> Result<ProcessResult, SdfError> {
    let dimensions = image.dimensions();
    config.check_dimensions(dimensions)?;

    // 1. Binarize.
    let mask = mask::binarize(image, config.threshold)?;

    // 2. Seed costs at foreground/background boundaries.
    let mut grid = seed::seed_costs(&mask)?;

    // 3. Exact squared distance transform, in place.
    transform::distance_transform_2d(&mut grid, config.max_dimension)?;

    // 4. Signed distances, in place.
    encode::sign_distances(&mut grid, &mask);

    // 5. Quantize for display.
    let quantized = encode::quantize(&grid, config.scale, config.bias);

    Ok(ProcessResult {
        field: grid,
        quantized,
        dimensions,
    })
}

/// Run the full pipeline and collect per-stage diagnostics.
///
/// Identical semantics to [`process`], plus wall-clock timing and
/// counts for every stage.
///
/// # Errors
///
/// Same as [`process`].
#[allow(clippy::float_cmp, clippy::too_many_lines)]
pub fn process_with_diagnostics(
    image: &PixelGrid<'_>,
    config: &SdfConfig,
) -> Result<(ProcessResult, FieldDiagnostics), SdfError> {
    let total_start = Instant::now();
    let dimensions = image.dimensions();
    config.check_dimensions(dimensions)?;
    let pixel_count = dimensions.pixel_count();

    let start = Instant::now();
    let mask = mask::binarize(image, config.threshold)?;
    let binarize = StageDiagnostics {
        duration: start.elapsed(),
        metrics: StageMetrics::Binarize {
            threshold: config.threshold,
            foreground_count: mask.foreground_count(),
            pixel_count,
        },
    };

    let start = Instant::now();
    let mut grid = seed::seed_costs(&mask)?;
    let seed_count = grid.as_slice().iter().filter(|&&c| c == 0.0).count();
    let seeds = StageDiagnostics {
        duration: start.elapsed(),
        metrics: StageMetrics::Seeds {
            seed_count,
            pixel_count,
        },
    };

    let start = Instant::now();
    transform::distance_transform_2d(&mut grid, config.max_dimension)?;
    let transform = StageDiagnostics {
        duration: start.elapsed(),
        metrics: StageMetrics::Transform {
            rows: dimensions.height,
            columns: dimensions.width,
        },
    };

    let start = Instant::now();
    encode::sign_distances(&mut grid, &mask);
    let (min_distance, max_distance) = grid
        .as_slice()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let encode = StageDiagnostics {
        duration: start.elapsed(),
        metrics: StageMetrics::Encode {
            min_distance,
            max_distance,
        },
    };

    let start = Instant::now();
    let quantized = encode::quantize(&grid, config.scale, config.bias);
    let saturated_low = quantized.pixels().filter(|p| p.0[0] == 0).count();
    let saturated_high = quantized.pixels().filter(|p| p.0[0] == 255).count();
    let quantize = StageDiagnostics {
        duration: start.elapsed(),
        metrics: StageMetrics::Quantize {
            scale: config.scale,
            bias: config.bias,
            saturated_low,
            saturated_high,
        },
    };

    let diagnostics = FieldDiagnostics {
        binarize,
        seeds,
        transform,
        encode,
        quantize,
        total_duration: total_start.elapsed(),
        summary: FieldSummary {
            image_width: dimensions.width,
            image_height: dimensions.height,
            pixel_count,
            seed_count,
        },
    };

    Ok((
        ProcessResult {
            field: grid,
            quantized,
            dimensions,
        },
        diagnostics,
    ))
}
