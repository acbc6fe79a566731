#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/albany/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod fixture;
pub mod model;
pub mod source;
pub mod yahoo;

pub use error::{DataError, Result};
pub use fixture::FixtureSource;
pub use model::{
    DailyBar, LineItem, MarketData, PriceHistory, SnapshotField, SnapshotInfo, StatementPeriod,
    StatementTable,
};
pub use source::{DataSource, HistoryWindow, SourceConfig};
pub use yahoo::YahooSource;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
