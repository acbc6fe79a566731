//! Loading the bundled fixtures through the `DataSource` interface.

use albany_data::{
    DataSource, FixtureSource, HistoryWindow, LineItem, MarketData, SnapshotField,
};
use approx::assert_relative_eq;
use rstest::rstest;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures");

#[tokio::test]
async fn test_directory_fixture_loads_every_artifact() {
    let source = FixtureSource::from_path(FIXTURES).unwrap();
    assert!(!source.is_empty());

    let info = source.snapshot("ACME").await.unwrap();
    assert_eq!(info.get(SnapshotField::MarketCap), Some(3.42e12));
    assert!(info.get_key("currency").is_none());

    let history = source.price_history("ACME", HistoryWindow::ONE_YEAR).await.unwrap();
    assert!(history.len() >= 252);
    assert!(history.first().unwrap().date < history.latest().unwrap().date);

    let balance = source.balance_sheet("ACME").await.unwrap();
    assert_eq!(balance.len(), 2);
    assert!(balance.latest().unwrap().end_date() > balance.prior().unwrap().end_date());

    let income = source.income_statement("ACME").await.unwrap();
    assert_eq!(income.latest().unwrap().get(LineItem::TotalRevenue), Some(391.04e9));
}

#[rstest]
#[case(14)]
#[case(90)]
#[tokio::test]
async fn test_single_file_fixture(#[case] days: u32) {
    let source = FixtureSource::from_path(format!("{FIXTURES}/ACME.json")).unwrap();
    assert_eq!(source.len(), 1);

    let history = source.price_history("acme", HistoryWindow::days(days)).await.unwrap();
    assert!(!history.is_empty());
    assert!(history.len() <= days as usize);
    assert_relative_eq!(history.latest().unwrap().close, 223.14, epsilon = 1e-9);
}

#[test]
fn test_bundle_round_trips_through_json() {
    let source = std::fs::read_to_string(format!("{FIXTURES}/ACME.json")).unwrap();
    let bundle: MarketData = serde_json::from_str(&source).unwrap();
    let json = serde_json::to_string(&bundle).unwrap();
    let again: MarketData = serde_json::from_str(&json).unwrap();

    assert_eq!(again.symbol, bundle.symbol);
    assert_eq!(again.history.len(), bundle.history.len());
    assert_eq!(again.balance_sheet.len(), bundle.balance_sheet.len());
    assert_eq!(again.info.len(), bundle.info.len());
}

#[test]
fn test_history_dataframe() {
    let source = std::fs::read_to_string(format!("{FIXTURES}/ACME.json")).unwrap();
    let bundle: MarketData = serde_json::from_str(&source).unwrap();
    let df = bundle.history.to_dataframe().unwrap();

    assert_eq!(df.height(), bundle.history.len());
    let names: Vec<&str> = df.get_column_names().iter().map(|name| name.as_str()).collect();
    assert_eq!(names, ["date", "close", "volume"]);
}
