//! Price metrics: snapshot prices plus statistics over the daily history.

use crate::fallback::{Candidate, resolve};
use crate::numeric::{growth, mean};
use albany_data::{MarketData, PriceHistory, SnapshotField};
use serde::{Deserialize, Serialize};

/// Trading days in a year; the one-year change needs at least this many bars.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Short moving average window.
pub const SHORT_MA_WINDOW: usize = 50;

/// Long moving average window. Both averages need this many bars.
pub const LONG_MA_WINDOW: usize = 200;

/// Current price: first non-zero of current, regular-market, previous close.
pub const CURRENT_PRICE_CHAIN: &[Candidate] = &[
    Candidate::nonzero_field(SnapshotField::CurrentPrice),
    Candidate::nonzero_field(SnapshotField::RegularMarketPrice),
    Candidate::nonzero_field(SnapshotField::PreviousClose),
];

/// Price metrics for one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceMetrics {
    /// Current price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    /// 52-week high
    #[serde(rename = "52w_high", skip_serializing_if = "Option::is_none")]
    pub high_52w: Option<f64>,
    /// 52-week low
    #[serde(rename = "52w_low", skip_serializing_if = "Option::is_none")]
    pub low_52w: Option<f64>,
    /// Market capitalization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    /// One-year price change, %
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change_1y: Option<f64>,
    /// 50-day simple moving average of closes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_50: Option<f64>,
    /// 200-day simple moving average of closes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_200: Option<f64>,
    /// Average daily volume over the window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_volume: Option<f64>,
}

impl PriceMetrics {
    /// Derive price metrics from snapshot info and price history.
    pub fn derive(data: &MarketData) -> Self {
        let info = &data.info;
        let history = &data.history;
        let has_long_window = history.len() >= LONG_MA_WINDOW;

        Self {
            current_price: resolve(data, CURRENT_PRICE_CHAIN),
            high_52w: info.get(SnapshotField::FiftyTwoWeekHigh),
            low_52w: info.get(SnapshotField::FiftyTwoWeekLow),
            market_cap: info.get(SnapshotField::MarketCap),
            price_change_1y: price_change_1y(history),
            ma_50: has_long_window
                .then(|| moving_average(history, SHORT_MA_WINDOW))
                .flatten(),
            ma_200: has_long_window
                .then(|| moving_average(history, LONG_MA_WINDOW))
                .flatten(),
            avg_volume: average_volume(history),
        }
    }

    /// Metrics in display order, keyed by name.
    pub const fn metrics(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("current_price", self.current_price),
            ("52w_high", self.high_52w),
            ("52w_low", self.low_52w),
            ("market_cap", self.market_cap),
            ("price_change_1y", self.price_change_1y),
            ("ma_50", self.ma_50),
            ("ma_200", self.ma_200),
            ("avg_volume", self.avg_volume),
        ]
    }
}

/// Change from the oldest to the latest close, %.
///
/// Needs a full year of bars and a positive starting close.
pub fn price_change_1y(history: &PriceHistory) -> Option<f64> {
    if history.len() < TRADING_DAYS_PER_YEAR {
        return None;
    }
    let start = history.first()?.close;
    let end = history.latest()?.close;
    if start <= 0.0 {
        return None;
    }
    growth(end, start)
}

/// Simple moving average of the last `window` closes, as of the latest bar.
pub fn moving_average(history: &PriceHistory, window: usize) -> Option<f64> {
    if window == 0 || history.len() < window {
        return None;
    }
    mean(history.tail(window).iter().map(|bar| bar.close))
}

/// Mean daily volume over the whole history.
pub fn average_volume(history: &PriceHistory) -> Option<f64> {
    mean(history.bars().iter().map(|bar| bar.volume as f64))
}
