//! Year-over-year growth rates from the two most recent income statements.

use crate::numeric::growth;
use albany_data::{LineItem, MarketData, StatementPeriod};
use serde::{Deserialize, Serialize};

/// Growth rates for one instrument, all in %.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthRates {
    /// Revenue growth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_growth: Option<f64>,
    /// Net income growth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings_growth: Option<f64>,
    /// EBITDA growth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda_growth: Option<f64>,
}

impl GrowthRates {
    /// Derive growth rates. Needs at least two income statement periods.
    pub fn derive(data: &MarketData) -> Self {
        let table = &data.income_statement;
        let (Some(current), Some(prior)) = (table.latest(), table.prior()) else {
            return Self::default();
        };

        Self {
            revenue_growth: item_growth(current, prior, LineItem::TotalRevenue),
            earnings_growth: item_growth(current, prior, LineItem::NetIncome),
            ebitda_growth: item_growth(current, prior, LineItem::Ebitda),
        }
    }

    /// Metrics in display order, keyed by name.
    pub const fn metrics(&self) -> [(&'static str, Option<f64>); 3] {
        [
            ("revenue_growth", self.revenue_growth),
            ("earnings_growth", self.earnings_growth),
            ("ebitda_growth", self.ebitda_growth),
        ]
    }
}

fn item_growth(current: &StatementPeriod, prior: &StatementPeriod, item: LineItem) -> Option<f64> {
    growth(current.get(item)?, prior.get(item)?)
}
