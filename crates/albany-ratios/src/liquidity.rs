//! Liquidity and solvency ratios from the most recent statement period.

use crate::numeric::ratio;
use albany_data::{LineItem, MarketData, StatementPeriod};
use serde::{Deserialize, Serialize};

/// Liquidity and solvency ratios for one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidityRatios {
    /// Current assets over current liabilities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_ratio: Option<f64>,
    /// Current assets less inventory, over current liabilities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_ratio: Option<f64>,
    /// Total liabilities over equity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_equity: Option<f64>,
    /// Operating income over the magnitude of interest expense
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_coverage: Option<f64>,
}

impl LiquidityRatios {
    /// Derive liquidity ratios.
    ///
    /// Nothing is computed without a balance sheet; interest coverage also
    /// reads the latest income statement.
    pub fn derive(data: &MarketData) -> Self {
        let Some(balance) = data.balance_sheet.latest() else {
            return Self::default();
        };
        let income = data.income_statement.latest();

        Self {
            current_ratio: current_ratio(balance),
            quick_ratio: quick_ratio(balance),
            debt_to_equity: debt_to_equity(balance),
            interest_coverage: income.and_then(interest_coverage),
        }
    }

    /// Metrics in display order, keyed by name.
    pub const fn metrics(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("current_ratio", self.current_ratio),
            ("quick_ratio", self.quick_ratio),
            ("debt_to_equity", self.debt_to_equity),
            ("interest_coverage", self.interest_coverage),
        ]
    }
}

fn current_ratio(balance: &StatementPeriod) -> Option<f64> {
    ratio(
        balance.get(LineItem::TotalCurrentAssets)?,
        balance.get(LineItem::TotalCurrentLiabilities)?,
    )
}

fn quick_ratio(balance: &StatementPeriod) -> Option<f64> {
    let quick_assets =
        balance.get(LineItem::TotalCurrentAssets)? - balance.get(LineItem::Inventory)?;
    ratio(quick_assets, balance.get(LineItem::TotalCurrentLiabilities)?)
}

fn debt_to_equity(balance: &StatementPeriod) -> Option<f64> {
    ratio(
        balance.get(LineItem::TotalLiabilities)?,
        balance.get(LineItem::TotalStockholderEquity)?,
    )
}

fn interest_coverage(income: &StatementPeriod) -> Option<f64> {
    ratio(
        income.get(LineItem::OperatingIncome)?,
        income.get(LineItem::InterestExpense)?.abs(),
    )
}
