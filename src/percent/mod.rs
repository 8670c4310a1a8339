// Percentage tables: 1..=99% of a base width, rounded to cents

use crate::types::{BaseWidth, PercentEntry};

pub const FULL_RANGE_MIN: u32 = 1;
pub const FULL_RANGE_MAX: u32 = 99;

/// Computes entries for every percent in `min_percent..=max_percent`, ascending.
///
/// Callers pass a validated range; an inverted range yields an empty table.
pub fn compute_range(
    base_width: BaseWidth,
    min_percent: u32,
    max_percent: u32,
) -> Vec<PercentEntry> {
    (min_percent..=max_percent)
        .map(|percent| PercentEntry {
            percent,
            value: percent_value(base_width.get(), percent),
        })
        .collect()
}

/// The table shown for a width: 1% through 99%
pub fn compute_full(base_width: BaseWidth) -> Vec<PercentEntry> {
    compute_range(base_width, FULL_RANGE_MIN, FULL_RANGE_MAX)
}

// Evaluation order is fixed (width * percent / 100 * 100) so results stay bit-exact
pub fn percent_value(base_width: f64, percent: u32) -> f64 {
    let scaled = base_width * f64::from(percent) / 100.0 * 100.0;
    round_half_up(scaled) / 100.0
}

// Nearest integer with ties toward positive infinity (0.5 -> 1, -0.5 -> 0)
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
