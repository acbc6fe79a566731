//! Display formatting of single metric values.

use std::fmt;

/// Placeholder rendered for an absent metric.
pub const NOT_AVAILABLE: &str = "N/A";

/// How a metric value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStyle {
    /// Dollar amount, abbreviated to `B` or `M` for large magnitudes
    Currency,
    /// Already a percentage; two decimals and a trailing `%`
    Percent,
    /// Plain two-decimal number
    Plain,
}

/// A metric value paired with its style, rendered through [`fmt::Display`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Formatted {
    value: Option<f64>,
    style: ValueStyle,
}

impl Formatted {
    /// Wrap a value for display.
    pub const fn new(value: Option<f64>, style: ValueStyle) -> Self {
        Self { value, style }
    }

    /// Whether there is a value to render.
    pub const fn is_available(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(value) = self.value.filter(|v| !v.is_nan()) else {
            return f.write_str(NOT_AVAILABLE);
        };
        match self.style {
            ValueStyle::Percent => write!(f, "{value:.2}%"),
            ValueStyle::Plain => write!(f, "{value:.2}"),
            ValueStyle::Currency if value >= 1e9 => write!(f, "${:.2}B", value / 1e9),
            ValueStyle::Currency if value >= 1e6 => write!(f, "${:.2}M", value / 1e6),
            ValueStyle::Currency => write!(f, "${value:.2}"),
        }
    }
}

/// Render a value in the given style, `N/A` when absent.
pub fn format_value(value: Option<f64>, style: ValueStyle) -> String {
    Formatted::new(value, style).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(3.2e12), ValueStyle::Currency, "$3200.00B")]
    #[case(Some(2.5e9), ValueStyle::Currency, "$2.50B")]
    #[case(Some(1e9), ValueStyle::Currency, "$1.00B")]
    #[case(Some(4.56e6), ValueStyle::Currency, "$4.56M")]
    #[case(Some(189.5), ValueStyle::Currency, "$189.50")]
    #[case(Some(2.3), ValueStyle::Percent, "2.30%")]
    #[case(Some(-12.5), ValueStyle::Percent, "-12.50%")]
    #[case(Some(28.4), ValueStyle::Plain, "28.40")]
    #[case(None, ValueStyle::Currency, "N/A")]
    #[case(None, ValueStyle::Percent, "N/A")]
    #[case(Some(f64::NAN), ValueStyle::Plain, "N/A")]
    fn test_format_value(#[case] value: Option<f64>, #[case] style: ValueStyle, #[case] expected: &str) {
        assert_eq!(format_value(value, style), expected);
    }

    #[test]
    fn test_formatted_availability() {
        assert!(Formatted::new(Some(1.0), ValueStyle::Plain).is_available());
        assert!(!Formatted::new(None, ValueStyle::Plain).is_available());
    }
}
