//! Rendering reports derived from the bundled fixture.

use albany_data::FixtureSource;
use albany_output::{ExportFormat, Exporter, NO_DATA_MESSAGE, format_report, format_summary};
use albany_ratios::RatioEngine;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures");

#[tokio::test]
async fn test_fixture_summary_has_no_gaps() {
    let engine = RatioEngine::new(FixtureSource::from_path(FIXTURES).unwrap());
    let report = engine.compute("ACME").await.unwrap();
    let text = format_report(&report);

    assert!(text.contains("FINANCIAL RATIOS SUMMARY FOR ACME"));
    assert!(text.contains("Market Cap: $3420.00B"));
    assert!(text.contains("Dividend Yield: 0.44%"));
    assert!(!text.contains("N/A"));
}

#[tokio::test]
async fn test_missing_symbol_prints_no_data() {
    let engine = RatioEngine::new(FixtureSource::from_path(FIXTURES).unwrap());
    let report = engine.compute("NOPE").await;

    assert_eq!(format_summary(report.as_ref()), NO_DATA_MESSAGE);
}

#[tokio::test]
async fn test_fixture_csv_has_every_value() {
    let engine = RatioEngine::new(FixtureSource::from_path(FIXTURES).unwrap());
    let report = engine.compute("ACME").await.unwrap();
    let csv = report.export_to_string(ExportFormat::Csv).unwrap();

    assert!(csv.lines().skip(1).all(|line| !line.ends_with(',')));
}
