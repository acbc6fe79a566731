#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/albany/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dcf;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod growth;
pub mod liquidity;
pub mod numeric;
pub mod price;
pub mod profitability;
pub mod report;
pub mod stats;
pub mod valuation;

pub use dcf::{DiscountSchedule, npv};
pub use engine::{RatioEngine, compute, fetch_market_data};
pub use error::{RatioError, Result};
pub use fallback::{Candidate, Resolved, Source};
pub use growth::GrowthRates;
pub use liquidity::LiquidityRatios;
pub use price::PriceMetrics;
pub use profitability::ProfitabilityRatios;
pub use report::{MetricGroup, RatioReport};
pub use stats::KeyStatistics;
pub use valuation::ValuationRatios;

/// Version of the albany-ratios crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
pub(crate) mod test_support {
    use albany_data::{
        DailyBar, LineItem, MarketData, PriceHistory, SnapshotField, SnapshotInfo,
        StatementPeriod, StatementTable,
    };
    use chrono::{Duration, NaiveDate};

    /// Daily bars on consecutive days from 2023-01-01, one per close.
    pub(crate) fn history(closes: &[f64]) -> PriceHistory {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        PriceHistory::new(
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| DailyBar::new(start + Duration::days(i as i64), close, 1_000_000))
                .collect(),
        )
    }

    /// `n` closes rising linearly from `first` to `last`.
    pub(crate) fn ramp(n: usize, first: f64, last: f64) -> PriceHistory {
        let step = if n > 1 { (last - first) / (n - 1) as f64 } else { 0.0 };
        let closes: Vec<f64> = (0..n).map(|i| first + step * i as f64).collect();
        history(&closes)
    }

    /// Market data from which every metric can be derived.
    pub(crate) fn full_market_data() -> MarketData {
        let info = SnapshotField::ALL
            .iter()
            .fold(SnapshotInfo::new(), |info, &field| info.with(field, 1.0))
            .with(SnapshotField::CurrentPrice, 150.0)
            .with(SnapshotField::FiftyTwoWeekHigh, 160.0)
            .with(SnapshotField::FiftyTwoWeekLow, 95.0)
            .with(SnapshotField::MarketCap, 2.5e12)
            .with(SnapshotField::DividendYield, 0.005)
            .with(SnapshotField::SharesOutstanding, 1.6e10);

        let balance = |assets: f64| {
            StatementPeriod::new(None)
                .with(LineItem::TotalAssets, assets)
                .with(LineItem::TotalLiabilities, assets * 0.8)
                .with(LineItem::TotalStockholderEquity, assets * 0.2)
                .with(LineItem::TotalCurrentAssets, 1.4e11)
                .with(LineItem::TotalCurrentLiabilities, 1.3e11)
                .with(LineItem::Inventory, 6.0e9)
        };
        let income = |revenue: f64| {
            StatementPeriod::new(None)
                .with(LineItem::TotalRevenue, revenue)
                .with(LineItem::GrossProfit, revenue * 0.45)
                .with(LineItem::OperatingIncome, revenue * 0.3)
                .with(LineItem::NetIncome, revenue * 0.25)
                .with(LineItem::InterestExpense, -3.0e9)
                .with(LineItem::Ebitda, revenue * 0.33)
        };

        MarketData::new("ACME")
            .with_info(info)
            .with_history(ramp(260, 100.0, 150.0))
            .with_balance_sheet(StatementTable::new(vec![balance(3.5e11), balance(3.4e11)]))
            .with_income_statement(StatementTable::new(vec![income(3.9e11), income(3.6e11)]))
    }
}
