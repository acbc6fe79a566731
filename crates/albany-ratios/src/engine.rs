//! Ratio engine: fetch the four artifacts for a symbol and derive a report.
//!
//! Failures are absorbed at two levels. An artifact that cannot be fetched is
//! logged and treated as empty; only when every artifact comes back empty does
//! the engine report that no data is available. Inside a derivation, a metric
//! whose inputs are missing or degenerate is simply omitted.

use crate::report::RatioReport;
use albany_data::{DataSource, HistoryWindow, MarketData};
use std::future::Future;

/// Computes ratio reports from a [`DataSource`].
#[derive(Debug, Clone)]
pub struct RatioEngine<S> {
    source: S,
    window: HistoryWindow,
}

impl<S: DataSource> RatioEngine<S> {
    /// Create an engine reading a one-year price history.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            window: HistoryWindow::ONE_YEAR,
        }
    }

    /// Override the price history window.
    pub const fn with_window(mut self, window: HistoryWindow) -> Self {
        self.window = window;
        self
    }

    /// The underlying data source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetch all four artifacts. `None` when the symbol is blank or nothing
    /// at all is available for it.
    pub async fn fetch(&self, symbol: &str) -> Option<MarketData> {
        fetch_market_data(&self.source, symbol, self.window).await
    }

    /// Compute the ratio report for a symbol. `None` means no data is
    /// available, which is not an error.
    pub async fn compute(&self, symbol: &str) -> Option<RatioReport> {
        let data = self.fetch(symbol).await?;
        Some(RatioReport::derive(&data))
    }
}

/// Compute a ratio report for `symbol` from `source` with a one-year window.
pub async fn compute<S: DataSource>(source: &S, symbol: &str) -> Option<RatioReport> {
    let data = fetch_market_data(source, symbol, HistoryWindow::ONE_YEAR).await?;
    Some(RatioReport::derive(&data))
}

/// Fetch the four artifacts one after another, absorbing per-artifact errors.
pub async fn fetch_market_data<S: DataSource>(
    source: &S,
    symbol: &str,
    window: HistoryWindow,
) -> Option<MarketData> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        tracing::warn!("empty symbol, nothing to fetch");
        return None;
    }

    let data = MarketData {
        symbol: symbol.to_string(),
        info: artifact(symbol, "snapshot", source.snapshot(symbol)).await,
        history: artifact(symbol, "price history", source.price_history(symbol, window)).await,
        balance_sheet: artifact(symbol, "balance sheet", source.balance_sheet(symbol)).await,
        income_statement: artifact(symbol, "income statement", source.income_statement(symbol))
            .await,
    };

    if data.is_empty() {
        tracing::warn!(symbol, "no data available");
        return None;
    }

    tracing::info!(
        symbol,
        snapshot_fields = data.info.len(),
        bars = data.history.len(),
        balance_periods = data.balance_sheet.len(),
        income_periods = data.income_statement.len(),
        "fetched market data"
    );
    Some(data)
}

async fn artifact<T, F>(symbol: &str, name: &str, fetch: F) -> T
where
    T: Default,
    F: Future<Output = albany_data::Result<T>>,
{
    match fetch.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(symbol, artifact = name, error = %e, "fetch failed, treating as empty");
            T::default()
        }
    }
}
