//! Daily price history.

use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// One trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading date
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: u64,
}

impl DailyBar {
    /// Create a new bar.
    pub const fn new(date: NaiveDate, close: f64, volume: u64) -> Self {
        Self {
            date,
            close,
            volume,
        }
    }
}

/// Daily bars ordered by date ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<DailyBar>", into = "Vec<DailyBar>")]
pub struct PriceHistory {
    bars: Vec<DailyBar>,
}

impl PriceHistory {
    /// Build a history, sorting the bars by date.
    pub fn new(mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self { bars }
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether there are no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// All bars, oldest first.
    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// Oldest bar.
    pub fn first(&self) -> Option<&DailyBar> {
        self.bars.first()
    }

    /// Most recent bar.
    pub fn latest(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// The most recent `n` bars (fewer if the history is shorter).
    pub fn tail(&self, n: usize) -> &[DailyBar] {
        &self.bars[self.bars.len().saturating_sub(n)..]
    }

    /// Keep only bars within `days` calendar days of the most recent bar.
    pub fn trailing_days(&self, days: u32) -> Self {
        let Some(latest) = self.latest() else {
            return Self::default();
        };
        let cutoff = latest.date - chrono::Duration::days(i64::from(days));
        Self {
            bars: self
                .bars
                .iter()
                .filter(|bar| bar.date > cutoff)
                .copied()
                .collect(),
        }
    }

    /// Convert to a Polars DataFrame with columns: date, close, volume.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let days: Vec<i32> = self
            .bars
            .iter()
            .map(|bar| bar.date.num_days_from_ce() - UNIX_EPOCH_CE_DAYS)
            .collect();
        let closes: Vec<f64> = self.bars.iter().map(|bar| bar.close).collect();
        let volumes: Vec<u64> = self.bars.iter().map(|bar| bar.volume).collect();

        let dates = Series::new("date".into(), days).cast(&DataType::Date)?;

        let df = DataFrame::new(vec![
            dates.into(),
            Series::new("close".into(), closes).into(),
            Series::new("volume".into(), volumes).into(),
        ])?;

        Ok(df)
    }
}

impl From<Vec<DailyBar>> for PriceHistory {
    fn from(bars: Vec<DailyBar>) -> Self {
        Self::new(bars)
    }
}

impl From<PriceHistory> for Vec<DailyBar> {
    fn from(history: PriceHistory) -> Self {
        history.bars
    }
}
