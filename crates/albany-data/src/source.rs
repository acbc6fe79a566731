//! The data source seam between the ratio engine and a market data provider.

use crate::error::Result;
use crate::model::{PriceHistory, SnapshotInfo, StatementTable};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::future::Future;
use std::time::Duration;

/// Trailing window of daily history to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    /// Calendar days back from the end of the window
    pub days: u32,
}

impl HistoryWindow {
    /// One calendar year, the window the ratio engine uses.
    pub const ONE_YEAR: Self = Self { days: 365 };

    /// Create a window of `days` calendar days.
    pub const fn days(days: u32) -> Self {
        Self { days }
    }

    /// Start and end instants of the window, ending at `end`.
    pub fn range_ending(&self, end: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (end - ChronoDuration::days(i64::from(self.days)), end)
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::ONE_YEAR
    }
}

/// Configuration shared by data sources.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Delay applied after every provider request
    pub rate_limit_delay: Duration,
    /// Price history window
    pub history_window: HistoryWindow,
    /// User agent sent to HTTP endpoints
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            rate_limit_delay: Duration::from_millis(1000),
            history_window: HistoryWindow::ONE_YEAR,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)".to_string(),
        }
    }
}

/// A provider of the four market data artifacts, keyed by symbol.
///
/// Any artifact may come back empty. Errors are reported per artifact so the
/// caller can decide which failures are fatal.
pub trait DataSource {
    /// Snapshot info fields.
    fn snapshot(&self, symbol: &str) -> impl Future<Output = Result<SnapshotInfo>>;

    /// Daily price history over a trailing window.
    fn price_history(
        &self,
        symbol: &str,
        window: HistoryWindow,
    ) -> impl Future<Output = Result<PriceHistory>>;

    /// Balance sheet, most recent period first.
    fn balance_sheet(&self, symbol: &str) -> impl Future<Output = Result<StatementTable>>;

    /// Income statement, most recent period first.
    fn income_statement(&self, symbol: &str) -> impl Future<Output = Result<StatementTable>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_range() {
        let end = Utc::now();
        let (start, stop) = HistoryWindow::days(30).range_ending(end);
        assert_eq!(stop, end);
        assert_eq!((end - start).num_days(), 30);
    }

    #[test]
    fn test_default_config() {
        let config = SourceConfig::default();
        assert_eq!(config.history_window, HistoryWindow::ONE_YEAR);
        assert_eq!(config.rate_limit_delay, Duration::from_millis(1000));
    }
}
