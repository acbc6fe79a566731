//! Guarded arithmetic shared by every derivation.
//!
//! Every helper returns `None` instead of a non-finite number, so a zero or
//! absent denominator omits the metric rather than producing infinity or NaN.

/// Multiplier converting a fraction into a percentage.
pub const PERCENT: f64 = 100.0;

/// `numerator / denominator`, or `None` for a zero denominator or a
/// non-finite result.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    finite(numerator / denominator)
}

/// `numerator / denominator` expressed as a percentage.
pub fn percent(numerator: f64, denominator: f64) -> Option<f64> {
    ratio(numerator, denominator).map(|r| r * PERCENT)
}

/// Percentage change from `prior` to `current`: `(current / prior - 1) * 100`.
pub fn growth(current: f64, prior: f64) -> Option<f64> {
    ratio(current, prior).map(|r| (r - 1.0) * PERCENT)
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return None;
    }
    finite(sum / count as f64)
}

/// `Some(value)` when the value is finite.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
