//! Guarded division for divisors that may legitimately be zero.

/// Fallback divisor for team size, expenses, cash and revenue.
pub const UNIT_FALLBACK: f64 = 1.0;

/// Fallback divisor for growth rate in the break-even estimate.
pub const GROWTH_FALLBACK: f64 = 0.01;

/// Divide, substituting `fallback` for the denominator when it is exactly zero.
pub fn guarded_div(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    numerator / nonzero_or(denominator, fallback)
}

/// `value`, or `fallback` when `value` is exactly zero.
pub fn nonzero_or(value: f64, fallback: f64) -> f64 {
    if value == 0.0 {
        fallback
    } else {
        value
    }
}
