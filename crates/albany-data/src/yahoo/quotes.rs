//! Daily quote history from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::model::{DailyBar, PriceHistory};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::sleep;
use yahoo_finance_api as yahoo;

/// Yahoo Finance quote provider with rate limiting.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
    rate_limit_delay: Duration,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider")
            .field("rate_limit_delay", &self.rate_limit_delay)
            .finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a new quote provider with default rate limiting (1 req/sec).
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(Duration::from_millis(1000))
    }

    /// Create a new quote provider with custom rate limiting.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
            rate_limit_delay,
        })
    }

    /// Fetch daily bars for a single symbol between `start` and `end`.
    ///
    /// The request is rate limited whether or not it succeeds.
    pub async fn fetch_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceHistory> {
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await;

        sleep(self.rate_limit_delay).await;

        let quotes = response?
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        let mut bars = Vec::with_capacity(quotes.len());
        for quote in &quotes {
            let timestamp = quote.timestamp as i64;
            let date = DateTime::from_timestamp(timestamp, 0)
                .ok_or_else(|| DataError::TimeConversion(format!("bad timestamp {timestamp}")))?
                .date_naive();
            bars.push(DailyBar::new(date, quote.close, quote.volume));
        }

        tracing::debug!(symbol, bars = bars.len(), "fetched quote history");
        Ok(PriceHistory::new(bars))
    }
}
