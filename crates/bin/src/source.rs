//! Source selection: live Yahoo Finance, or JSON fixtures when a path is given.

use albany::data::{
    DataSource, FixtureSource, HistoryWindow, PriceHistory, Result, SnapshotInfo, SourceConfig,
    StatementTable, YahooSource,
};
use std::path::Path;

/// Either data source, chosen at startup.
#[derive(Debug)]
pub(crate) enum CliSource {
    Yahoo(YahooSource),
    Fixture(FixtureSource),
}

impl CliSource {
    pub(crate) fn open(fixtures: Option<&Path>, config: &SourceConfig) -> Result<Self> {
        match fixtures {
            Some(path) => {
                tracing::info!(path = %path.display(), "using fixture data");
                Ok(Self::Fixture(FixtureSource::from_path(path)?))
            }
            None => Ok(Self::Yahoo(YahooSource::new(config)?)),
        }
    }
}

impl DataSource for CliSource {
    async fn snapshot(&self, symbol: &str) -> Result<SnapshotInfo> {
        match self {
            Self::Yahoo(source) => source.snapshot(symbol).await,
            Self::Fixture(source) => source.snapshot(symbol).await,
        }
    }

    async fn price_history(&self, symbol: &str, window: HistoryWindow) -> Result<PriceHistory> {
        match self {
            Self::Yahoo(source) => source.price_history(symbol, window).await,
            Self::Fixture(source) => source.price_history(symbol, window).await,
        }
    }

    async fn balance_sheet(&self, symbol: &str) -> Result<StatementTable> {
        match self {
            Self::Yahoo(source) => source.balance_sheet(symbol).await,
            Self::Fixture(source) => source.balance_sheet(symbol).await,
        }
    }

    async fn income_statement(&self, symbol: &str) -> Result<StatementTable> {
        match self {
            Self::Yahoo(source) => source.income_statement(symbol).await,
            Self::Fixture(source) => source.income_statement(symbol).await,
        }
    }
}
