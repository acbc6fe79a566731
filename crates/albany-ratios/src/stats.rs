//! Key per-share statistics built from the last close and the latest filings.

use crate::numeric::{mean, percent, ratio};
use albany_data::{LineItem, MarketData, SnapshotField};
use serde::{Deserialize, Serialize};

/// Headline statistics for one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyStatistics {
    /// Latest close in the price history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price: Option<f64>,
    /// Latest net income per share outstanding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    /// Last close over EPS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    /// Last dividend over last close, %
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    /// Net income over average total assets of the two latest periods, %
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roa: Option<f64>,
}

impl KeyStatistics {
    /// Derive key statistics.
    pub fn derive(data: &MarketData) -> Self {
        let last_price = data.history.latest().map(|bar| bar.close);
        let net_income = data
            .income_statement
            .latest()
            .and_then(|period| period.get(LineItem::NetIncome));

        let eps = net_income
            .zip(data.info.get(SnapshotField::SharesOutstanding))
            .and_then(|(income, shares)| ratio(income, shares));
        let pe_ratio = last_price.zip(eps).and_then(|(price, eps)| ratio(price, eps));
        let dividend_yield = data
            .info
            .get(SnapshotField::LastDividendValue)
            .zip(last_price)
            .and_then(|(dividend, price)| percent(dividend, price));
        let roa = net_income
            .zip(average_total_assets(data))
            .and_then(|(income, assets)| percent(income, assets));

        Self {
            last_price,
            eps,
            pe_ratio,
            dividend_yield,
            roa,
        }
    }

    /// Statistics in display order, keyed by name.
    pub const fn metrics(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("last_price", self.last_price),
            ("eps", self.eps),
            ("pe_ratio", self.pe_ratio),
            ("dividend_yield", self.dividend_yield),
            ("roa", self.roa),
        ]
    }
}

/// Mean total assets over the two most recent balance sheet periods.
fn average_total_assets(data: &MarketData) -> Option<f64> {
    let table = &data.balance_sheet;
    let latest = table.latest()?.get(LineItem::TotalAssets)?;
    let prior = table.prior()?.get(LineItem::TotalAssets)?;
    mean([latest, prior])
}
