//! [`DataSource`] implementation over the Yahoo Finance providers.

use super::fundamentals::{StatementModule, YahooFundamentalsProvider};
use super::quotes::YahooQuoteProvider;
use crate::error::Result;
use crate::model::{PriceHistory, SnapshotInfo, StatementTable};
use crate::source::{DataSource, HistoryWindow, SourceConfig};
use chrono::Utc;

/// Live data source: quotes from the chart API, everything else from
/// `quoteSummary`. Each artifact is a single request.
#[derive(Debug)]
pub struct YahooSource {
    quotes: YahooQuoteProvider,
    fundamentals: YahooFundamentalsProvider,
}

impl YahooSource {
    /// Create a source from configuration.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            quotes: YahooQuoteProvider::with_rate_limit(config.rate_limit_delay)?,
            fundamentals: YahooFundamentalsProvider::with_rate_limit(
                &config.user_agent,
                config.rate_limit_delay,
            )?,
        })
    }
}

impl DataSource for YahooSource {
    async fn snapshot(&self, symbol: &str) -> Result<SnapshotInfo> {
        self.fundamentals.fetch_snapshot(symbol).await
    }

    async fn price_history(&self, symbol: &str, window: HistoryWindow) -> Result<PriceHistory> {
        let (start, end) = window.range_ending(Utc::now());
        self.quotes.fetch_history(symbol, start, end).await
    }

    async fn balance_sheet(&self, symbol: &str) -> Result<StatementTable> {
        self.fundamentals
            .fetch_statement(symbol, StatementModule::BalanceSheet)
            .await
    }

    async fn income_statement(&self, symbol: &str) -> Result<StatementTable> {
        self.fundamentals
            .fetch_statement(symbol, StatementModule::IncomeStatement)
            .await
    }
}
