//! CSV and JSON export of ratio reports.
//!
//! JSON is the report's serde form, with absent metrics omitted. CSV is long
//! format, one row per metric: `symbol,group,metric,value`, with an empty
//! value for a metric that was not computed.

use albany_ratios::RatioReport;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8.
    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values, one row per metric.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// One metric of one report, flattened for CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow<'a> {
    /// Instrument symbol.
    pub symbol: &'a str,
    /// Metric group key.
    pub group: &'static str,
    /// Metric name.
    pub metric: &'static str,
    /// Value, empty when absent.
    pub value: Option<f64>,
}

/// Flatten a report into CSV rows, in report order.
pub fn metric_rows(report: &RatioReport) -> Vec<MetricRow<'_>> {
    report
        .entries()
        .into_iter()
        .map(|(group, metric, value)| MetricRow {
            symbol: &report.ticker,
            group: group.key(),
            metric,
            value,
        })
        .collect()
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn write_rows<'a, I>(rows: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = MetricRow<'a>>,
{
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

impl Exporter for RatioReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_rows(metric_rows(self)),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<RatioReport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_rows(self.iter().flat_map(metric_rows)),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use albany_ratios::{GrowthRates, PriceMetrics};
    use std::io::Read;
    use tempfile::TempDir;

    fn report(ticker: &str) -> RatioReport {
        RatioReport {
            ticker: ticker.to_string(),
            price_metrics: PriceMetrics {
                current_price: Some(189.5),
                ..Default::default()
            },
            growth_rates: GrowthRates {
                revenue_growth: Some(20.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_csv_one_row_per_metric() {
        let csv = report("AAPL").export_to_string(ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "symbol,group,metric,value");
        assert_eq!(lines.len(), 1 + 27);
        assert_eq!(lines[1], "AAPL,price_metrics,current_price,189.5");
        assert!(lines.contains(&"AAPL,growth_rates,revenue_growth,20.0"));
        assert!(lines.contains(&"AAPL,valuation_ratios,pe_ratio,"));
    }

    #[test]
    fn test_csv_many_reports() {
        let reports = vec![report("AAPL"), report("MSFT")];
        let csv = reports.export_to_string(ExportFormat::Csv).unwrap();

        assert_eq!(csv.lines().count(), 1 + 2 * 27);
        assert_eq!(csv.lines().filter(|l| l.starts_with("MSFT,")).count(), 27);
    }

    #[test]
    fn test_json_omits_absent_metrics() {
        let json = report("AAPL").export_to_string(ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["ticker"], "AAPL");
        assert_eq!(value["price_metrics"]["current_price"], 189.5);
        assert!(value["price_metrics"].get("ma_50").is_none());
        assert!(value["valuation_ratios"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_pretty_json() {
        let json = report("AAPL")
            .export_to_string(ExportFormat::PrettyJson)
            .unwrap();
        assert!(json.contains("\n  \"ticker\": \"AAPL\""));
    }

    #[test]
    fn test_export_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ratios.csv");
        report("AAPL")
            .export_to_file(&path, ExportFormat::Csv)
            .unwrap();

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert!(content.starts_with("symbol,group,metric,value\n"));
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
