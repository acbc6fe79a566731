//! Point-in-time snapshot fields published by the data provider.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot fields the ratio engine knows how to read.
///
/// The provider publishes many more fields than these; [`SnapshotInfo`] keeps
/// all of them keyed by name, and this enum is the typed view onto the subset
/// that feeds a derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapshotField {
    /// Latest traded price
    CurrentPrice,
    /// Regular-session market price
    RegularMarketPrice,
    /// Previous session close
    PreviousClose,
    /// 52-week high
    FiftyTwoWeekHigh,
    /// 52-week low
    FiftyTwoWeekLow,
    /// Market capitalization
    MarketCap,
    /// Trailing twelve-month P/E
    TrailingPe,
    /// Forward P/E
    ForwardPe,
    /// Price to book
    PriceToBook,
    /// Price to sales (TTM)
    PriceToSales,
    /// PEG ratio
    PegRatio,
    /// Enterprise value to EBITDA
    EnterpriseToEbitda,
    /// Forward dividend yield, as a fraction
    DividendYield,
    /// Trailing annual dividend yield, as a fraction
    TrailingAnnualDividendYield,
    /// Return on equity, as a fraction
    ReturnOnEquity,
    /// Return on assets, as a fraction
    ReturnOnAssets,
    /// Gross margin, as a fraction
    GrossMargins,
    /// Operating margin, as a fraction
    OperatingMargins,
    /// Net profit margin, as a fraction
    ProfitMargins,
    /// Most recent dividend per share
    LastDividendValue,
    /// Shares outstanding
    SharesOutstanding,
}

impl SnapshotField {
    /// Every known field, in declaration order.
    pub const ALL: [Self; 21] = [
        Self::CurrentPrice,
        Self::RegularMarketPrice,
        Self::PreviousClose,
        Self::FiftyTwoWeekHigh,
        Self::FiftyTwoWeekLow,
        Self::MarketCap,
        Self::TrailingPe,
        Self::ForwardPe,
        Self::PriceToBook,
        Self::PriceToSales,
        Self::PegRatio,
        Self::EnterpriseToEbitda,
        Self::DividendYield,
        Self::TrailingAnnualDividendYield,
        Self::ReturnOnEquity,
        Self::ReturnOnAssets,
        Self::GrossMargins,
        Self::OperatingMargins,
        Self::ProfitMargins,
        Self::LastDividendValue,
        Self::SharesOutstanding,
    ];

    /// Provider key for this field.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::CurrentPrice => "currentPrice",
            Self::RegularMarketPrice => "regularMarketPrice",
            Self::PreviousClose => "previousClose",
            Self::FiftyTwoWeekHigh => "fiftyTwoWeekHigh",
            Self::FiftyTwoWeekLow => "fiftyTwoWeekLow",
            Self::MarketCap => "marketCap",
            Self::TrailingPe => "trailingPE",
            Self::ForwardPe => "forwardPE",
            Self::PriceToBook => "priceToBook",
            Self::PriceToSales => "priceToSalesTrailing12Months",
            Self::PegRatio => "pegRatio",
            Self::EnterpriseToEbitda => "enterpriseToEbitda",
            Self::DividendYield => "dividendYield",
            Self::TrailingAnnualDividendYield => "trailingAnnualDividendYield",
            Self::ReturnOnEquity => "returnOnEquity",
            Self::ReturnOnAssets => "returnOnAssets",
            Self::GrossMargins => "grossMargins",
            Self::OperatingMargins => "operatingMargins",
            Self::ProfitMargins => "profitMargins",
            Self::LastDividendValue => "lastDividendValue",
            Self::SharesOutstanding => "sharesOutstanding",
        }
    }

    /// Look up a field by its provider key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// Snapshot info: named numeric fields, any of which may be absent.
///
/// Non-finite values never enter the map, so every value read back is a
/// usable number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, serde_json::Value>",
    into = "BTreeMap<String, f64>"
)]
pub struct SnapshotInfo {
    fields: BTreeMap<String, f64>,
}

impl SnapshotInfo {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a known field.
    pub fn with(mut self, field: SnapshotField, value: f64) -> Self {
        self.insert(field.key(), value);
        self
    }

    /// Insert a value under a provider key. Non-finite values are dropped.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        if value.is_finite() {
            self.fields.insert(key.into(), value);
        }
    }

    /// Read a known field.
    pub fn get(&self, field: SnapshotField) -> Option<f64> {
        self.get_key(field.key())
    }

    /// Read any field by provider key.
    pub fn get_key(&self, key: &str) -> Option<f64> {
        self.fields.get(key).copied()
    }

    /// Whether the field is present.
    pub fn contains(&self, field: SnapshotField) -> bool {
        self.fields.contains_key(field.key())
    }

    /// Number of populated fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is populated.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all populated fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<BTreeMap<String, serde_json::Value>> for SnapshotInfo {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let mut info = Self::new();
        for (key, value) in raw {
            if let Some(value) = value.as_f64() {
                info.insert(key, value);
            }
        }
        info
    }
}

impl From<SnapshotInfo> for BTreeMap<String, f64> {
    fn from(info: SnapshotInfo) -> Self {
        info.fields
    }
}
