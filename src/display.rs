//! Display formatting for results
//!
//! Results are rounded to a fixed number of decimals so that float noise
//! such as `0.1+0.2` or `sin(180)` prints the way a person expects.

/// Decimals kept when no precision is configured
pub const DEFAULT_PRECISION: usize = 12;

/// Format a result rounded to `precision` decimal places.
///
/// Trailing zeros and a dangling `.` are dropped, and negative zero
/// prints as `0`.
pub fn format_result(value: f64, precision: usize) -> String {
    let mut out = format!("{:.*}", precision, value);

    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }

    if out == "-0" {
        out.remove(0);
    }
    out
}
