//! Pipeline diagnostics: timing and per-stage metrics.
//!
//! Permanent instrumentation for parameter experimentation. Every call
//! to [`process_with_diagnostics`](crate::process_with_diagnostics)
//! collects diagnostics alongside the pipeline result; plain
//! [`process`](crate::process) skips the bookkeeping.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDiagnostics {
    /// Stage 1: binarization.
    pub binarize: StageDiagnostics,
    /// Stage 2: seed extraction.
    pub seeds: StageDiagnostics,
    /// Stage 3: 2D squared distance transform.
    pub transform: StageDiagnostics,
    /// Stage 4: signed-distance encoding.
    pub encode: StageDiagnostics,
    /// Stage 5: quantization.
    pub quantize: StageDiagnostics,
    /// Total wall-clock duration of the entire pipeline (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts across all stages.
    pub summary: FieldSummary,
}

/// Diagnostics for a single pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics (counts, parameters, etc.).
    pub metrics: StageMetrics,
}

/// Stage-specific metrics that vary by pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Binarization metrics.
    Binarize {
        /// Threshold the intensities were compared against.
        threshold: u8,
        /// Number of foreground pixels in the mask.
        foreground_count: usize,
        /// Total pixel count for computing coverage.
        pixel_count: usize,
    },
    /// Seed extraction metrics.
    Seeds {
        /// Number of boundary pixels that became seeds.
        seed_count: usize,
        /// Total pixel count.
        pixel_count: usize,
    },
    /// Distance transform metrics.
    Transform {
        /// Lines transformed in the row pass.
        rows: u32,
        /// Lines transformed in the column pass.
        columns: u32,
    },
    /// Signed-distance encoding metrics.
    Encode {
        /// Smallest signed distance in the field.
        min_distance: f32,
        /// Largest signed distance in the field.
        max_distance: f32,
    },
    /// Quantization metrics.
    Quantize {
        /// Intensity steps per pixel of distance.
        scale: f32,
        /// Output intensity of distance zero.
        bias: f32,
        /// Pixels clamped to 0.
        saturated_low: usize,
        /// Pixels clamped to 255.
        saturated_high: usize,
    },
}

/// High-level summary counts for the entire pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Source image width in pixels.
    pub image_width: u32,
    /// Source image height in pixels.
    pub image_height: u32,
    /// Total pixel count.
    pub pixel_count: usize,
    /// Number of boundary seeds distances were measured from.
    pub seed_count: usize,
}

impl FieldDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Distance Field Diagnostics\n{}", "=".repeat(60)));
        lines.push(format!(
            "Image: {}x{} ({} pixels), {} seeds",
            self.summary.image_width,
            self.summary.image_height,
            self.summary.pixel_count,
            self.summary.seed_count,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<16} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(72));

        let total_ms = duration_ms(self.total_duration);
        let stages = [
            ("Binarize", &self.binarize),
            ("Seeds", &self.seeds),
            ("Transform", &self.transform),
            ("Encode", &self.encode),
            ("Quantize", &self.quantize),
        ];

        for (name, diag) in stages {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<16} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Binarize {
            threshold,
            foreground_count,
            pixel_count,
        } => {
            format!(
                "threshold={threshold} foreground={foreground_count} ({:.1}%)",
                percentage(*foreground_count, *pixel_count),
            )
        }
        StageMetrics::Seeds {
            seed_count,
            pixel_count,
        } => {
            format!(
                "seeds={seed_count} ({:.1}%)",
                percentage(*seed_count, *pixel_count),
            )
        }
        StageMetrics::Transform { rows, columns } => {
            format!("{rows} rows + {columns} columns")
        }
        StageMetrics::Encode {
            min_distance,
            max_distance,
        } => {
            format!("range=[{min_distance:.2}, {max_distance:.2}]")
        }
        StageMetrics::Quantize {
            scale,
            bias,
            saturated_low,
            saturated_high,
        } => {
            format!(
                "scale={scale:.1} bias={bias:.1} saturated={saturated_low}/{saturated_high}",
            )
        }
    }
}

/// Share of `count` in `total`, as a percentage.
#[allow(clippy::cast_precision_loss)]
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_diagnostics() -> FieldDiagnostics {
        FieldDiagnostics {
            binarize: StageDiagnostics {
                duration: Duration::from_millis(2),
                metrics: StageMetrics::Binarize {
                    threshold: 128,
                    foreground_count: 40,
                    pixel_count: 100,
                },
            },
            seeds: StageDiagnostics {
                duration: Duration::from_millis(1),
                metrics: StageMetrics::Seeds {
                    seed_count: 12,
                    pixel_count: 100,
                },
            },
            transform: StageDiagnostics {
                duration: Duration::from_millis(5),
                metrics: StageMetrics::Transform {
                    rows: 10,
                    columns: 10,
                },
            },
            encode: StageDiagnostics {
                duration: Duration::from_millis(1),
                metrics: StageMetrics::Encode {
                    min_distance: -3.5,
                    max_distance: 6.0,
                },
            },
            quantize: StageDiagnostics {
                duration: Duration::from_millis(1),
                metrics: StageMetrics::Quantize {
                    scale: 4.0,
                    bias: 127.5,
                    saturated_low: 0,
                    saturated_high: 3,
                },
            },
            total_duration: Duration::from_millis(10),
            summary: FieldSummary {
                image_width: 10,
                image_height: 10,
                pixel_count: 100,
                seed_count: 12,
            },
        }
    }

    #[test]
    fn duration_ms_converts_correctly() {
        let d = Duration::from_millis(1234);
        assert!((duration_ms(d) - 1234.0).abs() < 0.01);
    }

    #[test]
    fn percentage_handles_zero_total() {
        assert!((percentage(5, 0) - 0.0).abs() < f64::EPSILON);
        assert!((percentage(1, 4) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn report_mentions_every_stage() {
        let report = sample_diagnostics().report();
        for stage in ["Binarize", "Seeds", "Transform", "Encode", "Quantize"] {
            assert!(report.contains(stage), "report is missing {stage}");
        }
        assert!(report.contains("12 seeds"));
    }

    #[test]
    fn diagnostics_serde_round_trip() {
        let diag = sample_diagnostics();
        let json = serde_json::to_string(&diag).unwrap();
        let deserialized: FieldDiagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.summary.seed_count, 12);
        assert_eq!(deserialized.total_duration, diag.total_duration);
        assert!(matches!(
            deserialized.transform.metrics,
            StageMetrics::Transform {
                rows: 10,
                columns: 10,
            }
        ));
    }
}
