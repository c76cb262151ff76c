//! Exact squared Euclidean distance transform.
//!
//! Implements the Felzenszwalb–Huttenlocher lower-envelope method: the
//! squared distance `d[q] = min over p of (q - p)^2 + f[p]` is the
//! pointwise minimum of one upward parabola per sample, rooted at
//! `(p, f[p])`. The 1D transform builds the lower envelope of those
//! parabolas in a single left-to-right sweep and then evaluates it in a
//! second sweep — O(n) and exact, no geometric quantization.
//!
//! The 2D transform is two 1D passes (rows, then columns of the row
//! output), valid because the squared Euclidean metric splits into a sum
//! of per-axis squared differences. Lines within a pass are independent
//! of one another.
//!
//! All arithmetic is `f32`; the envelope crossovers and the output grid
//! are then reproducible bit for bit on any IEEE-754 platform.

use crate::types::{ScalarGrid, SdfError};

/// Cost sentinel for cells with no seed: larger than any attainable
/// squared distance, yet far enough below `f32::MAX` that adding
/// `(n - 1)^2` for any supported line length cannot overflow.
///
/// Cost inputs must be finite; use this sentinel, not `f32::INFINITY`,
/// for unreachable cells (infinities would poison the envelope
/// crossovers with NaN).
pub const UNBOUNDED: f32 = 1e30;

/// x-coordinate where the parabola rooted at `q` overtakes the one
/// rooted at `k` (`q > k`).
#[allow(clippy::cast_precision_loss)]
fn crossover(cost: &[f32], q: usize, k: usize) -> f32 {
    ((cost[q] + (q * q) as f32) - (cost[k] + (k * k) as f32)) / ((2 * (q - k)) as f32)
}

/// 1D transform of `cost` into `out`. Both slices must be the same
/// non-zero length.
#[allow(clippy::cast_precision_loss)]
fn transform_line(cost: &[f32], out: &mut [f32]) -> Result<(), SdfError> {
    let n = cost.len();
    debug_assert!(n > 0, "caller validates line length");
    debug_assert_eq!(out.len(), n);
    debug_assert!(cost.iter().all(|c| c.is_finite()), "costs must be finite");

    // The envelope: apex[i] is the source index of the i-th parabola on
    // the lower envelope (strictly increasing); boundary[i] is its left
    // crossover, with boundary[0] = -inf and a trailing +inf, so there
    // is always exactly one more boundary than apexes.
    let mut apex: Vec<usize> = Vec::new();
    apex.try_reserve_exact(n)?;
    let mut boundary: Vec<f32> = Vec::new();
    boundary.try_reserve_exact(n + 1)?;

    apex.push(0);
    boundary.push(f32::NEG_INFINITY);
    boundary.push(f32::INFINITY);

    for q in 1..n {
        let mut s = crossover(cost, q, apex[apex.len() - 1]);
        // A crossover at or before the incumbent's left boundary means
        // the incumbent is nowhere the minimum: evict it. Ties (s equal
        // to the boundary) evict as well, so the newer parabola wins.
        // boundary[0] = -inf stops the loop at the first parabola.
        while s <= boundary[apex.len() - 1] {
            apex.pop();
            boundary.pop();
            s = crossover(cost, q, apex[apex.len() - 1]);
        }
        let last = boundary.len() - 1;
        boundary[last] = s;
        apex.push(q);
        boundary.push(f32::INFINITY);
    }

    // Evaluate: walk the envelope left to right alongside q. The
    // trailing +inf boundary bounds the cursor.
    let mut k = 0;
    for (q, d) in out.iter_mut().enumerate() {
        while boundary[k + 1] < q as f32 {
            k += 1;
        }
        let dq = q as i64 - apex[k] as i64;
        *d = (dq * dq) as f32 + cost[apex[k]];
    }

    Ok(())
}

/// Exact 1D squared distance transform.
///
/// Returns `d` with `d[q] = min over p of (q - p)^2 + cost[p]`, in O(n).
/// Entries of `cost` must be finite; use [`UNBOUNDED`] for cells with no
/// seed.
///
/// # Errors
///
/// Returns [`SdfError::EmptyGrid`] if `cost` is empty and
/// [`SdfError::Allocation`] if a working buffer cannot be reserved.
pub fn distance_transform_1d(cost: &[f32]) -> Result<Vec<f32>, SdfError> {
    if cost.is_empty() {
        return Err(SdfError::EmptyGrid);
    }
    let mut out = try_line_buffer(cost.len())?;
    transform_line(cost, &mut out)?;
    Ok(out)
}

/// Exact 2D squared distance transform, in place.
///
/// On return, `grid[x, y] = min over (px, py) of
/// (x - px)^2 + (y - py)^2 + cost[px, py]` where `cost` is the grid's
/// prior contents. Rows are transformed first, then columns of the row
/// output.
///
/// # Errors
///
/// Returns [`SdfError::DimensionTooLarge`] if either axis exceeds
/// `max_dimension` (checked before any buffer is sized) and
/// [`SdfError::Allocation`] if a working buffer cannot be reserved.
pub fn distance_transform_2d(grid: &mut ScalarGrid, max_dimension: u32) -> Result<(), SdfError> {
    let (width, height) = (grid.width(), grid.height());
    for dimension in [width, height] {
        if dimension > max_dimension {
            return Err(SdfError::DimensionTooLarge {
                dimension,
                max: max_dimension,
            });
        }
    }

    let longest = width.max(height) as usize;
    let mut lane = try_line_buffer(longest)?;
    let mut out = try_line_buffer(longest)?;

    // Row pass: each row is an independent 1D problem over x.
    for y in 0..height {
        let row_out = &mut out[..width as usize];
        transform_line(grid.row(y), row_out)?;
        grid.row_mut(y).copy_from_slice(row_out);
    }

    // Column pass over the row-pass output: gather, transform, scatter.
    for x in 0..width {
        for y in 0..height {
            lane[y as usize] = grid.get(x, y);
        }
        let column_out = &mut out[..height as usize];
        transform_line(&lane[..height as usize], column_out)?;
        for y in 0..height {
            grid.set(x, y, column_out[y as usize]);
        }
    }

    Ok(())
}

/// Zero-filled line buffer, allocated fallibly.
fn try_line_buffer(len: usize) -> Result<Vec<f32>, SdfError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, 0.0);
    Ok(buffer)
}
