//! Market data model: the four artifacts the ratio engine reads.

pub mod history;
pub mod snapshot;
pub mod statement;

pub use history::{DailyBar, PriceHistory};
pub use snapshot::{SnapshotField, SnapshotInfo};
pub use statement::{LineItem, StatementPeriod, StatementTable};

use serde::{Deserialize, Serialize};

/// Everything fetched for one symbol at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Instrument symbol
    pub symbol: String,
    /// Snapshot info fields
    #[serde(default)]
    pub info: SnapshotInfo,
    /// Daily price history, oldest first
    #[serde(default)]
    pub history: PriceHistory,
    /// Balance sheet, most recent period first
    #[serde(default)]
    pub balance_sheet: StatementTable,
    /// Income statement, most recent period first
    #[serde(default)]
    pub income_statement: StatementTable,
}

impl MarketData {
    /// Create an empty bundle for a symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Set the snapshot info.
    pub fn with_info(mut self, info: SnapshotInfo) -> Self {
        self.info = info;
        self
    }

    /// Set the price history.
    pub fn with_history(mut self, history: PriceHistory) -> Self {
        self.history = history;
        self
    }

    /// Set the balance sheet.
    pub fn with_balance_sheet(mut self, table: StatementTable) -> Self {
        self.balance_sheet = table;
        self
    }

    /// Set the income statement.
    pub fn with_income_statement(mut self, table: StatementTable) -> Self {
        self.income_statement = table;
        self
    }

    /// True when none of the four artifacts carries any data.
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
            && self.history.is_empty()
            && self.balance_sheet.is_empty()
            && self.income_statement.is_empty()
    }
}
