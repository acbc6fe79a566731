//! Valuation ratios, read directly from snapshot info.

use crate::fallback::{Candidate, resolve};
use albany_data::{MarketData, SnapshotField};
use serde::{Deserialize, Serialize};

/// Dividend yield: the forward yield, else the trailing annual yield, as %.
pub const DIVIDEND_YIELD_CHAIN: &[Candidate] = &[
    Candidate::percent_field(SnapshotField::DividendYield),
    Candidate::percent_field(SnapshotField::TrailingAnnualDividendYield),
];

/// Valuation ratios for one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationRatios {
    /// Trailing P/E
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    /// Forward P/E
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_pe: Option<f64>,
    /// Price to book
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pb_ratio: Option<f64>,
    /// Price to sales (TTM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps_ratio: Option<f64>,
    /// PEG ratio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peg_ratio: Option<f64>,
    /// Enterprise value to EBITDA
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ev_to_ebitda: Option<f64>,
    /// Dividend yield, %
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
}

impl ValuationRatios {
    /// Derive valuation ratios. Only snapshot fields are consulted.
    pub fn derive(data: &MarketData) -> Self {
        let info = &data.info;
        Self {
            pe_ratio: info.get(SnapshotField::TrailingPe),
            forward_pe: info.get(SnapshotField::ForwardPe),
            pb_ratio: info.get(SnapshotField::PriceToBook),
            ps_ratio: info.get(SnapshotField::PriceToSales),
            peg_ratio: info.get(SnapshotField::PegRatio),
            ev_to_ebitda: info.get(SnapshotField::EnterpriseToEbitda),
            dividend_yield: resolve(data, DIVIDEND_YIELD_CHAIN),
        }
    }

    /// Metrics in display order, keyed by name.
    pub const fn metrics(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("pe_ratio", self.pe_ratio),
            ("forward_pe", self.forward_pe),
            ("pb_ratio", self.pb_ratio),
            ("ps_ratio", self.ps_ratio),
            ("peg_ratio", self.peg_ratio),
            ("ev_to_ebitda", self.ev_to_ebitda),
            ("dividend_yield", self.dividend_yield),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use albany_data::SnapshotInfo;
    use approx::assert_relative_eq;

    fn derive(info: SnapshotInfo) -> ValuationRatios {
        ValuationRatios::derive(&MarketData::new("TEST").with_info(info))
    }

    #[test]
    fn test_direct_dividend_yield() {
        let ratios = derive(
            SnapshotInfo::new()
                .with(SnapshotField::DividendYield, 0.023)
                .with(SnapshotField::TrailingAnnualDividendYield, 0.05),
        );
        assert_relative_eq!(ratios.dividend_yield.unwrap(), 2.30, epsilon = 1e-9);
    }

    #[test]
    fn test_trailing_dividend_yield_fallback() {
        let ratios = derive(SnapshotInfo::new().with(SnapshotField::TrailingAnnualDividendYield, 0.0125));
        assert_relative_eq!(ratios.dividend_yield.unwrap(), 1.25, epsilon = 1e-9);
    }

    #[test]
    fn test_direct_fields_copied() {
        let ratios = derive(
            SnapshotInfo::new()
                .with(SnapshotField::TrailingPe, 28.4)
                .with(SnapshotField::ForwardPe, 25.1)
                .with(SnapshotField::PriceToBook, 45.0)
                .with(SnapshotField::PriceToSales, 7.6)
                .with(SnapshotField::PegRatio, 2.1)
                .with(SnapshotField::EnterpriseToEbitda, 21.9),
        );

        assert_eq!(ratios.pe_ratio, Some(28.4));
        assert_eq!(ratios.forward_pe, Some(25.1));
        assert_eq!(ratios.pb_ratio, Some(45.0));
        assert_eq!(ratios.ps_ratio, Some(7.6));
        assert_eq!(ratios.peg_ratio, Some(2.1));
        assert_eq!(ratios.ev_to_ebitda, Some(21.9));
        assert_eq!(ratios.dividend_yield, None);
    }

    #[test]
    fn test_empty_snapshot() {
        let ratios = derive(SnapshotInfo::new());
        assert!(ratios.metrics().iter().all(|(_, v)| v.is_none()));
    }
}
