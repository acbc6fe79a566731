//! The ratio report: five independently derived metric groups.

use crate::growth::GrowthRates;
use crate::liquidity::LiquidityRatios;
use crate::price::PriceMetrics;
use crate::profitability::ProfitabilityRatios;
use crate::valuation::ValuationRatios;
use albany_data::MarketData;
use serde::{Deserialize, Serialize};

/// Metric group identifiers, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    /// Price metrics
    PriceMetrics,
    /// Valuation ratios
    ValuationRatios,
    /// Profitability ratios
    ProfitabilityRatios,
    /// Liquidity and solvency ratios
    LiquidityRatios,
    /// Growth rates
    GrowthRates,
}

impl MetricGroup {
    /// All groups in report order.
    pub const ALL: [Self; 5] = [
        Self::PriceMetrics,
        Self::ValuationRatios,
        Self::ProfitabilityRatios,
        Self::LiquidityRatios,
        Self::GrowthRates,
    ];

    /// Snake-case key of the group.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::PriceMetrics => "price_metrics",
            Self::ValuationRatios => "valuation_ratios",
            Self::ProfitabilityRatios => "profitability_ratios",
            Self::LiquidityRatios => "liquidity_ratios",
            Self::GrowthRates => "growth_rates",
        }
    }
}

/// Ratio report for one instrument.
///
/// Built fresh from a point-in-time read of the market data and never mutated
/// afterwards. No group depends on another; any metric may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioReport {
    /// Instrument symbol
    pub ticker: String,
    /// Price metrics
    pub price_metrics: PriceMetrics,
    /// Valuation ratios
    pub valuation_ratios: ValuationRatios,
    /// Profitability ratios
    pub profitability_ratios: ProfitabilityRatios,
    /// Liquidity and solvency ratios
    pub liquidity_ratios: LiquidityRatios,
    /// Growth rates
    pub growth_rates: GrowthRates,
}

impl RatioReport {
    /// Derive every metric group from the same market data.
    pub fn derive(data: &MarketData) -> Self {
        let report = Self {
            ticker: data.symbol.clone(),
            price_metrics: PriceMetrics::derive(data),
            valuation_ratios: ValuationRatios::derive(data),
            profitability_ratios: ProfitabilityRatios::derive(data),
            liquidity_ratios: LiquidityRatios::derive(data),
            growth_rates: GrowthRates::derive(data),
        };

        tracing::debug!(
            symbol = %report.ticker,
            populated = report.populated(),
            total = report.entries().len(),
            "derived ratio report"
        );
        report
    }

    /// Every metric as `(group, name, value)`, in report order.
    pub fn entries(&self) -> Vec<(MetricGroup, &'static str, Option<f64>)> {
        let groups: [(MetricGroup, Vec<(&'static str, Option<f64>)>); 5] = [
            (MetricGroup::PriceMetrics, self.price_metrics.metrics().to_vec()),
            (MetricGroup::ValuationRatios, self.valuation_ratios.metrics().to_vec()),
            (
                MetricGroup::ProfitabilityRatios,
                self.profitability_ratios.metrics().to_vec(),
            ),
            (MetricGroup::LiquidityRatios, self.liquidity_ratios.metrics().to_vec()),
            (MetricGroup::GrowthRates, self.growth_rates.metrics().to_vec()),
        ];

        groups
            .into_iter()
            .flat_map(|(group, metrics)| {
                metrics
                    .into_iter()
                    .map(move |(name, value)| (group, name, value))
            })
            .collect()
    }

    /// Number of metrics that were computed.
    pub fn populated(&self) -> usize {
        self.entries().iter().filter(|(_, _, v)| v.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::full_market_data;

    #[test]
    fn test_entries_cover_every_metric_in_order() {
        let report = RatioReport::default();
        let entries = report.entries();

        assert_eq!(entries.len(), 8 + 7 + 5 + 4 + 3);
        assert_eq!(entries[0].1, "current_price");
        assert_eq!(entries.last().unwrap().1, "ebitda_growth");
        assert_eq!(report.populated(), 0);
    }

    #[test]
    fn test_derive_full_data() {
        let report = RatioReport::derive(&full_market_data());

        assert_eq!(report.ticker, "ACME");
        assert_eq!(report.populated(), report.entries().len());
    }

    #[test]
    fn test_json_omits_absent_metrics() {
        let data = full_market_data().with_income_statement(Default::default());
        let report = RatioReport::derive(&data);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["growth_rates"].as_object().unwrap().is_empty());
        assert!(json["price_metrics"].get("52w_high").is_some());

        let back: RatioReport = serde_json::from_value(json).unwrap();
        assert_eq!(back.ticker, "ACME");
        assert_eq!(back.growth_rates, GrowthRates::default());
        assert_eq!(back.populated(), report.populated());
    }
}
