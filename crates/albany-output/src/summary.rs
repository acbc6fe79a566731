//! Human-readable summaries of a ratio report.
//!
//! The text layout is fixed: a title block, then five sections each listing
//! its metrics in a stable order, with `N/A` for anything not computed.
//! Rendering is a pure function of the report.

use crate::format::{Formatted, NOT_AVAILABLE, ValueStyle};
use albany_ratios::{KeyStatistics, RatioReport};

/// Width of the `=` and `-` rules.
pub const RULE_WIDTH: usize = 53;

/// Printed in place of a summary when no report could be produced.
pub const NO_DATA_MESSAGE: &str = "Could not generate summary. No data available.";

struct Row {
    label: &'static str,
    value: String,
}

impl Row {
    fn new(label: &'static str, value: Option<f64>, style: ValueStyle) -> Self {
        Self {
            label,
            value: Formatted::new(value, style).to_string(),
        }
    }
}

struct Section {
    heading: &'static str,
    title: &'static str,
    rows: Vec<Row>,
}

fn sections(report: &RatioReport) -> [Section; 5] {
    use ValueStyle::{Currency, Percent, Plain};

    let price = &report.price_metrics;
    let valuation = &report.valuation_ratios;
    let profitability = &report.profitability_ratios;
    let liquidity = &report.liquidity_ratios;
    let growth = &report.growth_rates;

    [
        Section {
            heading: "PRICE METRICS",
            title: "Price Metrics",
            rows: vec![
                Row::new("Current Price", price.current_price, Currency),
                Row {
                    label: "52-Week Range",
                    value: week_range(price.low_52w, price.high_52w),
                },
                Row::new("Price Change (1Y)", price.price_change_1y, Percent),
                Row::new("Market Cap", price.market_cap, Currency),
            ],
        },
        Section {
            heading: "VALUATION RATIOS",
            title: "Valuation Ratios",
            rows: vec![
                Row::new("P/E Ratio", valuation.pe_ratio, Plain),
                Row::new("Forward P/E", valuation.forward_pe, Plain),
                Row::new("P/B Ratio", valuation.pb_ratio, Plain),
                Row::new("P/S Ratio", valuation.ps_ratio, Plain),
                Row::new("PEG Ratio", valuation.peg_ratio, Plain),
                Row::new("EV/EBITDA", valuation.ev_to_ebitda, Plain),
                Row::new("Dividend Yield", valuation.dividend_yield, Percent),
            ],
        },
        Section {
            heading: "PROFITABILITY RATIOS",
            title: "Profitability Ratios",
            rows: vec![
                Row::new("Return on Equity (ROE)", profitability.roe, Percent),
                Row::new("Return on Assets (ROA)", profitability.roa, Percent),
                Row::new("Gross Margin", profitability.gross_margin, Percent),
                Row::new("Operating Margin", profitability.operating_margin, Percent),
                Row::new("Profit Margin", profitability.profit_margin, Percent),
            ],
        },
        Section {
            heading: "LIQUIDITY & SOLVENCY",
            title: "Liquidity & Solvency",
            rows: vec![
                Row::new("Current Ratio", liquidity.current_ratio, Plain),
                Row::new("Quick Ratio", liquidity.quick_ratio, Plain),
                Row::new("Debt-to-Equity", liquidity.debt_to_equity, Plain),
                Row::new("Interest Coverage", liquidity.interest_coverage, Plain),
            ],
        },
        Section {
            heading: "GROWTH RATES (YoY)",
            title: "Growth Rates (YoY)",
            rows: vec![
                Row::new("Revenue Growth", growth.revenue_growth, Percent),
                Row::new("Earnings Growth", growth.earnings_growth, Percent),
                Row::new("EBITDA Growth", growth.ebitda_growth, Percent),
            ],
        },
    ]
}

/// `low - high`, or `N/A` unless both ends are known.
fn week_range(low: Option<f64>, high: Option<f64>) -> String {
    match (low, high) {
        (Some(_), Some(_)) => format!(
            "{} - {}",
            Formatted::new(low, ValueStyle::Currency),
            Formatted::new(high, ValueStyle::Currency)
        ),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Render the fixed-layout text summary.
pub fn format_report(report: &RatioReport) -> String {
    let mut lines = vec![
        "=".repeat(RULE_WIDTH),
        format!("FINANCIAL RATIOS SUMMARY FOR {}", report.ticker),
        "=".repeat(RULE_WIDTH),
        String::new(),
    ];

    for section in sections(report) {
        lines.push(format!("{}:", section.heading));
        lines.push("-".repeat(RULE_WIDTH));
        lines.extend(
            section
                .rows
                .iter()
                .map(|row| format!("{}: {}", row.label, row.value)),
        );
        lines.push(String::new());
    }

    lines.push("=".repeat(RULE_WIDTH));
    lines.join("\n")
}

/// Render the text summary, or [`NO_DATA_MESSAGE`] when there is no report.
pub fn format_summary(report: Option<&RatioReport>) -> String {
    report.map_or_else(|| NO_DATA_MESSAGE.to_string(), format_report)
}

/// Render the report as Markdown, one table per section.
pub fn format_markdown(report: &RatioReport) -> String {
    let mut output = format!("# Financial Ratios Summary: {}\n", report.ticker);

    for section in sections(report) {
        output.push_str(&format!("\n## {}\n\n", section.title));
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        for row in &section.rows {
            output.push_str(&format!("| {} | {} |\n", row.label, row.value));
        }
    }

    output
}

/// Render key statistics as a short block.
pub fn format_key_statistics(symbol: &str, stats: &KeyStatistics) -> String {
    use ValueStyle::{Percent, Plain};

    let rows = [
        Row::new("Last Share Price", stats.last_price, Plain),
        Row::new("PE Ratio", stats.pe_ratio, Plain),
        Row::new("Dividend Yield", stats.dividend_yield, Percent),
        Row::new("EPS", stats.eps, Plain),
        Row::new("ROA", stats.roa, Percent),
    ];

    let mut output = format!("Chosen Stock: {symbol}\n");
    for row in rows {
        output.push_str(&format!("{}: {}\n", row.label, row.value));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use albany_ratios::{GrowthRates, LiquidityRatios, PriceMetrics, ValuationRatios};

    fn report() -> RatioReport {
        RatioReport {
            ticker: "AAPL".to_string(),
            price_metrics: PriceMetrics {
                current_price: Some(189.5),
                high_52w: Some(199.62),
                low_52w: Some(164.08),
                market_cap: Some(2.95e12),
                price_change_1y: Some(12.5),
                ..Default::default()
            },
            valuation_ratios: ValuationRatios {
                pe_ratio: Some(29.25),
                dividend_yield: Some(0.5),
                ..Default::default()
            },
            liquidity_ratios: LiquidityRatios {
                current_ratio: Some(0.9),
                ..Default::default()
            },
            growth_rates: GrowthRates {
                revenue_growth: Some(-2.5),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_layout() {
        let text = format_report(&report());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(53));
        assert_eq!(lines[1], "FINANCIAL RATIOS SUMMARY FOR AAPL");
        assert_eq!(lines[2], "=".repeat(53));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "PRICE METRICS:");
        assert_eq!(lines[5], "-".repeat(53));
        assert_eq!(*lines.last().unwrap(), "=".repeat(53));

        for heading in [
            "VALUATION RATIOS:",
            "PROFITABILITY RATIOS:",
            "LIQUIDITY & SOLVENCY:",
            "GROWTH RATES (YoY):",
        ] {
            assert!(lines.contains(&heading), "missing {heading}");
        }
    }

    #[test]
    fn test_values_rendered() {
        let text = format_report(&report());

        assert!(text.contains("Current Price: $189.50\n"));
        assert!(text.contains("52-Week Range: $164.08 - $199.62\n"));
        assert!(text.contains("Price Change (1Y): 12.50%\n"));
        assert!(text.contains("Market Cap: $2950.00B\n"));
        assert!(text.contains("P/E Ratio: 29.25\n"));
        assert!(text.contains("Dividend Yield: 0.50%\n"));
        assert!(text.contains("Current Ratio: 0.90\n"));
        assert!(text.contains("Revenue Growth: -2.50%\n"));
    }

    #[test]
    fn test_absent_metrics_render_not_available() {
        let text = format_report(&report());

        assert!(text.contains("Forward P/E: N/A\n"));
        assert!(text.contains("Return on Equity (ROE): N/A\n"));
        assert!(text.contains("Interest Coverage: N/A\n"));
        assert!(text.contains("EBITDA Growth: N/A\n"));
    }

    #[test]
    fn test_range_needs_both_ends() {
        let mut report = report();
        report.price_metrics.high_52w = None;

        assert!(format_report(&report).contains("52-Week Range: N/A\n"));
    }

    #[test]
    fn test_empty_report_renders_every_line() {
        let text = format_report(&RatioReport::default());
        let na_lines = text.lines().filter(|l| l.ends_with(": N/A")).count();
        assert_eq!(na_lines, 23);
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let report = report();
        assert_eq!(format_report(&report), format_report(&report));
        assert_eq!(format_markdown(&report), format_markdown(&report));
    }

    #[test]
    fn test_no_data_message() {
        assert_eq!(format_summary(None), NO_DATA_MESSAGE);
        assert_eq!(format_summary(Some(&report())), format_report(&report()));
    }

    #[test]
    fn test_markdown() {
        let md = format_markdown(&report());

        assert!(md.starts_with("# Financial Ratios Summary: AAPL\n"));
        assert!(md.contains("## Liquidity & Solvency\n"));
        assert!(md.contains("| Market Cap | $2950.00B |\n"));
        assert!(md.contains("| Gross Margin | N/A |\n"));
    }

    #[test]
    fn test_key_statistics() {
        let stats = KeyStatistics {
            last_price: Some(45.5),
            eps: Some(3.25),
            pe_ratio: Some(14.0),
            dividend_yield: None,
            roa: Some(8.5),
        };
        let text = format_key_statistics("BHP.AX", &stats);

        assert!(text.starts_with("Chosen Stock: BHP.AX\n"));
        assert!(text.contains("Last Share Price: 45.50\n"));
        assert!(text.contains("Dividend Yield: N/A\n"));
        assert!(text.contains("ROA: 8.50%\n"));
    }
}
