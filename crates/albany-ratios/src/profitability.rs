//! Profitability ratios.
//!
//! Each ratio prefers a value computed from the most recent balance sheet and
//! income statement and falls back to the provider's precomputed snapshot
//! field. Statement derivation needs both tables to carry at least one period.

use crate::fallback::{Candidate, resolve};
use crate::numeric::percent;
use albany_data::{LineItem, MarketData, SnapshotField, StatementPeriod};
use serde::{Deserialize, Serialize};

/// Return on equity: statements, then `returnOnEquity`.
pub const ROE_CHAIN: &[Candidate] = &[
    Candidate::Statements(roe_from_statements),
    Candidate::percent_field(SnapshotField::ReturnOnEquity),
];

/// Return on assets: statements, then `returnOnAssets`.
pub const ROA_CHAIN: &[Candidate] = &[
    Candidate::Statements(roa_from_statements),
    Candidate::percent_field(SnapshotField::ReturnOnAssets),
];

/// Gross margin: statements, then `grossMargins`.
pub const GROSS_MARGIN_CHAIN: &[Candidate] = &[
    Candidate::Statements(gross_margin_from_statements),
    Candidate::percent_field(SnapshotField::GrossMargins),
];

/// Operating margin: statements, then `operatingMargins`.
pub const OPERATING_MARGIN_CHAIN: &[Candidate] = &[
    Candidate::Statements(operating_margin_from_statements),
    Candidate::percent_field(SnapshotField::OperatingMargins),
];

/// Profit margin: statements, then `profitMargins`.
pub const PROFIT_MARGIN_CHAIN: &[Candidate] = &[
    Candidate::Statements(profit_margin_from_statements),
    Candidate::percent_field(SnapshotField::ProfitMargins),
];

/// Profitability ratios for one instrument, all in %.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitabilityRatios {
    /// Return on equity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roe: Option<f64>,
    /// Return on assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roa: Option<f64>,
    /// Gross margin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_margin: Option<f64>,
    /// Operating margin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_margin: Option<f64>,
    /// Net profit margin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<f64>,
}

impl ProfitabilityRatios {
    /// Derive profitability ratios.
    pub fn derive(data: &MarketData) -> Self {
        Self {
            roe: resolve(data, ROE_CHAIN),
            roa: resolve(data, ROA_CHAIN),
            gross_margin: resolve(data, GROSS_MARGIN_CHAIN),
            operating_margin: resolve(data, OPERATING_MARGIN_CHAIN),
            profit_margin: resolve(data, PROFIT_MARGIN_CHAIN),
        }
    }

    /// Metrics in display order, keyed by name.
    pub const fn metrics(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("roe", self.roe),
            ("roa", self.roa),
            ("gross_margin", self.gross_margin),
            ("operating_margin", self.operating_margin),
            ("profit_margin", self.profit_margin),
        ]
    }
}

/// Latest balance sheet and income statement periods, when both tables have one.
fn latest_periods(data: &MarketData) -> Option<(&StatementPeriod, &StatementPeriod)> {
    Some((data.balance_sheet.latest()?, data.income_statement.latest()?))
}

fn roe_from_statements(data: &MarketData) -> Option<f64> {
    let (balance, income) = latest_periods(data)?;
    percent(
        income.get(LineItem::NetIncome)?,
        balance.get(LineItem::TotalStockholderEquity)?,
    )
}

fn roa_from_statements(data: &MarketData) -> Option<f64> {
    let (balance, income) = latest_periods(data)?;
    percent(
        income.get(LineItem::NetIncome)?,
        balance.get(LineItem::TotalAssets)?,
    )
}

/// `item / revenue` as %, from the latest income statement.
fn margin(data: &MarketData, item: LineItem) -> Option<f64> {
    let (_, income) = latest_periods(data)?;
    percent(income.get(item)?, income.get(LineItem::TotalRevenue)?)
}

fn gross_margin_from_statements(data: &MarketData) -> Option<f64> {
    margin(data, LineItem::GrossProfit)
}

fn operating_margin_from_statements(data: &MarketData) -> Option<f64> {
    margin(data, LineItem::OperatingIncome)
}

fn profit_margin_from_statements(data: &MarketData) -> Option<f64> {
    margin(data, LineItem::NetIncome)
}
