//! Table lookup by piecewise-linear interpolation.
//!
//! A table holds samples of a function taken at uniformly spaced points of a
//! closed domain: `table[0]` at the lower bound, the last entry at the upper
//! bound. [`lookup`] works on the unit domain `[0, 1]` and [`lookup_in`] on an
//! arbitrary `[min_x, max_x]`.

use log::trace;

/// Error type for table lookups.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RangeError {
    /// Input lies outside the table's domain (NaN is never inside).
    #[error("Lookup input {x} is outside [{min}, {max}]")]
    OutOfDomain { x: f64, min: f64, max: f64 },

    /// Table has no samples.
    #[error("Lookup table is empty")]
    EmptyTable,

    /// Domain bounds are reversed, not finite, or too close together to
    /// tell the samples apart.
    #[error("Invalid lookup domain: [{min}, {max}]")]
    InvalidDomain { min: f64, max: f64 },
}

/// Interpolates `table` at `x` over the unit domain `[0, 1]`.
///
/// `x == 1` returns the last entry as is. A single-entry table is constant.
/// If either sample bounding `x` is infinite or NaN the result is NaN.
///
/// # Errors
/// Returns `RangeError::EmptyTable` for an empty table and
/// `RangeError::OutOfDomain` if `x` is not in `[0, 1]`.
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn lookup(table: &[f64], x: f64) -> Result<f64, RangeError> {
    let last = check_input(table, 0.0, 1.0, x)?;
    if x == 1.0 || table.len() == 1 {
        return Ok(last);
    }

    let intervals = (table.len() - 1) as f64;
    let i = segment(x * intervals, table.len());
    let x0 = i as f64 / intervals;
    Ok(blend(table, i, (x - x0) * intervals))
}

/// Interpolates `table` at `x` over the domain `[min_x, max_x]`.
///
/// Same rules as [`lookup`]: `x == max_x` returns the last entry, a
/// single-entry table is constant, and non-finite samples yield NaN.
///
/// # Errors
/// Returns `RangeError::EmptyTable` for an empty table,
/// `RangeError::InvalidDomain` if the bounds are not finite, `min_x > max_x`,
/// or the domain is too narrow to divide into the table's intervals,
/// and `RangeError::OutOfDomain` if `x` is not in `[min_x, max_x]`.
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn lookup_in(table: &[f64], min_x: f64, max_x: f64, x: f64) -> Result<f64, RangeError> {
    let last = check_input(table, min_x, max_x, x)?;
    if x == max_x || table.len() == 1 {
        return Ok(last);
    }

    // halved so the span cannot overflow for bounds near f64::MAX
    let half_span = max_x / 2.0 - min_x / 2.0;
    if half_span == 0.0 {
        return Err(RangeError::InvalidDomain {
            min: min_x,
            max: max_x,
        });
    }
    let intervals = (table.len() - 1) as f64;
    let pos = (x / 2.0 - min_x / 2.0) / half_span * intervals;
    let i = segment(pos, table.len());
    Ok(blend(table, i, pos - i as f64))
}

/// Validates the call and returns the table's last entry.
fn check_input(table: &[f64], min: f64, max: f64, x: f64) -> Result<f64, RangeError> {
    let Some(&last) = table.last() else {
        return Err(RangeError::EmptyTable);
    };
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(RangeError::InvalidDomain { min, max });
    }
    if !(min..=max).contains(&x) {
        return Err(RangeError::OutOfDomain { x, min, max });
    }
    Ok(last)
}

/// Index of the interval starting at or below fractional position `pos`.
/// Clamped so rounding just under the upper bound stays on the last interval.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn segment(pos: f64, len: usize) -> usize {
    (pos.floor() as usize).min(len - 2)
}

/// Linear blend of `table[i]` and `table[i + 1]` at fraction `t` of the interval.
fn blend(table: &[f64], i: usize, t: f64) -> f64 {
    let (y0, y1) = (table[i], table[i + 1]);
    if !y0.is_finite() || !y1.is_finite() {
        trace!("non-finite sample in interval {i}: {y0}, {y1}");
        return f64::NAN;
    }
    t.mul_add(y1 - y0, y0)
}
