//! Seed extraction: foreground mask to seed cost grid.
//!
//! Distances are measured from the boundary between foreground and
//! background. A **boundary pixel** is a foreground pixel with at least
//! one of its four axis-aligned neighbors outside the foreground;
//! off-grid neighbors count as background. Background pixels are never
//! boundary pixels, even when they touch foreground — the sign encoding
//! relies on seeds sitting just inside the shape.
//!
//! Boundary pixels get cost 0.0; every other cell gets
//! [`UNBOUNDED`](crate::transform::UNBOUNDED), a sentinel the transform
//! treats as "no seed anywhere near yet".
//!
//! This is step 2 in the pipeline, between binarization and the distance
//! transform.

use crate::mask::BinaryMask;
use crate::transform::UNBOUNDED;
use crate::types::{ScalarGrid, SdfError};

/// Build the seed cost grid for a foreground mask.
///
/// # Errors
///
/// Returns [`SdfError::Allocation`] if the grid cannot be allocated and
/// [`SdfError::EmptyGrid`] if the mask has a zero dimension.
pub fn seed_costs(mask: &BinaryMask) -> Result<ScalarGrid, SdfError> {
    let (width, height) = (mask.width(), mask.height());
    let mut costs = ScalarGrid::filled(width, height, UNBOUNDED)?;

    for y in 0..height {
        for x in 0..width {
            if is_boundary(mask, x, y) {
                costs.set(x, y, 0.0);
            }
        }
    }

    Ok(costs)
}

/// Whether `(x, y)` is a foreground pixel touching non-foreground.
fn is_boundary(mask: &BinaryMask, x: u32, y: u32) -> bool {
    if !mask.get(x, y) {
        return false;
    }
    let (x, y) = (i64::from(x), i64::from(y));
    !mask.get_or(x - 1, y, false)
        || !mask.get_or(x + 1, y, false)
        || !mask.get_or(x, y - 1, false)
        || !mask.get_or(x, y + 1, false)
}
