//! Balance sheet and income statement tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Financial statement line items used by the ratio engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineItem {
    // Income statement
    /// Total revenue
    TotalRevenue,
    /// Gross profit
    GrossProfit,
    /// Operating income
    OperatingIncome,
    /// Net income
    NetIncome,
    /// Interest expense (sign varies by provider)
    InterestExpense,
    /// EBITDA
    Ebitda,

    // Balance sheet
    /// Total assets
    TotalAssets,
    /// Total liabilities
    TotalLiabilities,
    /// Total stockholders' equity
    TotalStockholderEquity,
    /// Total current assets
    TotalCurrentAssets,
    /// Total current liabilities
    TotalCurrentLiabilities,
    /// Inventory
    Inventory,
}

impl LineItem {
    /// Canonical key for this line item.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::TotalRevenue => "totalRevenue",
            Self::GrossProfit => "grossProfit",
            Self::OperatingIncome => "operatingIncome",
            Self::NetIncome => "netIncome",
            Self::InterestExpense => "interestExpense",
            Self::Ebitda => "ebitda",
            Self::TotalAssets => "totalAssets",
            Self::TotalLiabilities => "totalLiabilities",
            Self::TotalStockholderEquity => "totalStockholderEquity",
            Self::TotalCurrentAssets => "totalCurrentAssets",
            Self::TotalCurrentLiabilities => "totalCurrentLiabilities",
            Self::Inventory => "inventory",
        }
    }

    /// Resolve a provider row name to a line item.
    ///
    /// Accepts the canonical camelCase keys, the abbreviated keys of the
    /// quoteSummary endpoint, and the title-case row labels of the
    /// fundamentals timeseries.
    pub fn from_key(key: &str) -> Option<Self> {
        let item = match key {
            "totalRevenue" | "Total Revenue" => Self::TotalRevenue,
            "grossProfit" | "Gross Profit" => Self::GrossProfit,
            "operatingIncome" | "Operating Income" => Self::OperatingIncome,
            "netIncome" | "Net Income" => Self::NetIncome,
            "interestExpense" | "Interest Expense" => Self::InterestExpense,
            "ebitda" | "EBITDA" => Self::Ebitda,
            "totalAssets" | "Total Assets" => Self::TotalAssets,
            "totalLiabilities" | "totalLiab" | "Total Liabilities Net Minority Interest" => {
                Self::TotalLiabilities
            }
            "totalStockholderEquity" | "Stockholders Equity" => Self::TotalStockholderEquity,
            "totalCurrentAssets" | "Current Assets" => Self::TotalCurrentAssets,
            "totalCurrentLiabilities" | "Current Liabilities" => Self::TotalCurrentLiabilities,
            "inventory" | "Inventory" => Self::Inventory,
            _ => return None,
        };
        Some(item)
    }
}

/// One reporting period (one column of a statement table).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPeriod", into = "RawPeriod")]
pub struct StatementPeriod {
    end_date: Option<NaiveDate>,
    items: BTreeMap<LineItem, f64>,
}

impl StatementPeriod {
    /// Create an empty period.
    pub fn new(end_date: Option<NaiveDate>) -> Self {
        Self {
            end_date,
            items: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, item: LineItem, value: f64) -> Self {
        self.insert(item, value);
        self
    }

    /// Insert a line item. Non-finite values are dropped.
    pub fn insert(&mut self, item: LineItem, value: f64) {
        if value.is_finite() {
            self.items.insert(item, value);
        }
    }

    /// Read a line item.
    pub fn get(&self, item: LineItem) -> Option<f64> {
        self.items.get(&item).copied()
    }

    /// Period end date, when the provider reported one.
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Whether the period carries no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Serialized form of a period: an optional end date plus arbitrary named
/// rows, of which only recognised numeric line items are kept.
#[derive(Debug, Serialize, Deserialize)]
struct RawPeriod {
    #[serde(default, rename = "endDate", skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
    #[serde(flatten)]
    items: BTreeMap<String, serde_json::Value>,
}

impl From<RawPeriod> for StatementPeriod {
    fn from(raw: RawPeriod) -> Self {
        let mut period = Self::new(raw.end_date);
        for (key, value) in raw.items {
            if let (Some(item), Some(value)) = (LineItem::from_key(&key), value.as_f64()) {
                period.insert(item, value);
            }
        }
        period
    }
}

impl From<StatementPeriod> for RawPeriod {
    fn from(period: StatementPeriod) -> Self {
        Self {
            end_date: period.end_date,
            items: period
                .items
                .into_iter()
                .map(|(item, value)| (item.key().to_string(), serde_json::Value::from(value)))
                .collect(),
        }
    }
}

/// A statement table: reporting periods, most recent first.
///
/// Deserialized tables are reordered by end date when every period has one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<StatementPeriod>", into = "Vec<StatementPeriod>")]
pub struct StatementTable {
    periods: Vec<StatementPeriod>,
}

impl StatementTable {
    /// Build a table from periods already ordered most recent first.
    pub const fn new(periods: Vec<StatementPeriod>) -> Self {
        Self { periods }
    }

    /// Build a table, sorting by end date descending when every period is
    /// dated. Otherwise the given order is kept.
    pub fn newest_first(mut periods: Vec<StatementPeriod>) -> Self {
        if periods.iter().all(|p| p.end_date.is_some()) {
            periods.sort_by(|a, b| b.end_date.cmp(&a.end_date));
        } else if periods.len() > 1 {
            tracing::debug!(
                periods = periods.len(),
                "undated statement periods, keeping listed order"
            );
        }
        Self { periods }
    }

    /// Number of reporting periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the table has no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// The most recent (trailing) period.
    pub fn latest(&self) -> Option<&StatementPeriod> {
        self.periods.first()
    }

    /// The period before the most recent one.
    pub fn prior(&self) -> Option<&StatementPeriod> {
        self.periods.get(1)
    }

    /// All periods, most recent first.
    pub fn periods(&self) -> &[StatementPeriod] {
        &self.periods
    }
}

impl From<Vec<StatementPeriod>> for StatementTable {
    fn from(periods: Vec<StatementPeriod>) -> Self {
        Self::newest_first(periods)
    }
}

impl From<StatementTable> for Vec<StatementPeriod> {
    fn from(table: StatementTable) -> Self {
        table.periods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_aliases() {
        assert_eq!(LineItem::from_key("totalLiab"), Some(LineItem::TotalLiabilities));
        assert_eq!(
            LineItem::from_key("Stockholders Equity"),
            Some(LineItem::TotalStockholderEquity)
        );
        assert_eq!(LineItem::from_key("goodwill"), None);
    }

    #[test]
    fn test_period_deserialize_drops_unknown_rows() {
        let json = r#"{"endDate": "2024-09-28", "totalRevenue": 391035.0, "currency": "USD", "netIncome": null}"#;
        let period: StatementPeriod = serde_json::from_str(json).unwrap();

        assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 9, 28));
        assert_eq!(period.get(LineItem::TotalRevenue), Some(391_035.0));
        assert_eq!(period.get(LineItem::NetIncome), None);
    }

    #[test]
    fn test_table_latest_and_prior() {
        let table = StatementTable::new(vec![
            StatementPeriod::new(None).with(LineItem::TotalRevenue, 1200.0),
            StatementPeriod::new(None).with(LineItem::TotalRevenue, 1000.0),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.latest().unwrap().get(LineItem::TotalRevenue), Some(1200.0));
        assert_eq!(table.prior().unwrap().get(LineItem::TotalRevenue), Some(1000.0));
        assert!(StatementTable::default().latest().is_none());
    }

    #[test]
    fn test_table_deserialize_orders_newest_first() {
        let json = r#"[
            {"endDate": "2023-09-30", "totalRevenue": 1000.0},
            {"endDate": "2024-09-30", "totalRevenue": 1200.0}
        ]"#;
        let table: StatementTable = serde_json::from_str(json).unwrap();

        assert_eq!(table.latest().unwrap().end_date(), NaiveDate::from_ymd_opt(2024, 9, 30));
        assert_eq!(table.prior().unwrap().get(LineItem::TotalRevenue), Some(1000.0));

        let back = serde_json::to_value(&table).unwrap();
        assert_eq!(back[0]["endDate"], "2024-09-30");
    }

    #[test]
    fn test_table_undated_keeps_listed_order() {
        let table = StatementTable::newest_first(vec![
            StatementPeriod::new(NaiveDate::from_ymd_opt(2023, 9, 30))
                .with(LineItem::TotalRevenue, 1000.0),
            StatementPeriod::new(None).with(LineItem::TotalRevenue, 1200.0),
        ]);

        assert_eq!(table.latest().unwrap().get(LineItem::TotalRevenue), Some(1000.0));
    }
}
