//! Discounted cash flow checks.
//!
//! A discount schedule is a small CSV laid out the way a spreadsheet model
//! usually is: a header row, a row of cash flows, a row of discount factors,
//! and optionally a row carrying the model's own NPV. The first column of
//! every row is a label.
//!
//! ```text
//! ,2025,2026,2027
//! Cash flow,100,100,100
//! Discount factor,0.9,0.8,0.7
//! NPV,240
//! ```
//!
//! Periods are matched by column. A period missing either its cash flow or
//! its discount factor does not contribute to the NPV.

use crate::error::{RatioError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Net present value: the sum of each cash flow times its discount factor.
///
/// `None` when the slices differ in length or are empty.
pub fn npv(cash_flows: &[f64], discount_factors: &[f64]) -> Option<f64> {
    if cash_flows.is_empty() || cash_flows.len() != discount_factors.len() {
        return None;
    }
    Some(
        cash_flows
            .iter()
            .zip(discount_factors)
            .map(|(cf, df)| cf * df)
            .sum(),
    )
}

/// Cash flows and discount factors read from a CSV model.
///
/// Only complete periods are kept; the three vectors are aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountSchedule {
    /// Column of each complete period, 1-based after the label column
    pub periods: Vec<usize>,
    /// Cash flow per period
    pub cash_flows: Vec<f64>,
    /// Discount factor per period
    pub discount_factors: Vec<f64>,
    /// NPV stated by the model, if it carries one
    pub stated_npv: Option<f64>,
    /// Periods dropped because one of their two cells was blank
    pub skipped_periods: usize,
}

impl DiscountSchedule {
    /// Read a schedule from a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_csv_reader(File::open(path)?)
    }

    /// Read a schedule from CSV.
    ///
    /// The first data row holds cash flows and the second discount factors.
    /// A later row labelled `NPV` (any case) supplies the stated NPV from its
    /// first value cell. Blank or missing cells leave their period incomplete.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let label = record.get(0).unwrap_or_default().to_string();
            let cells = record
                .iter()
                .enumerate()
                .skip(1)
                .map(|(column, cell)| {
                    if cell.is_empty() {
                        Ok(None)
                    } else {
                        parse_cell(cell, index + 1, column).map(Some)
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push((label, cells));
        }

        let mut rows = rows.into_iter();
        let (_, cash_row) = rows.next().ok_or(RatioError::MissingRow("cash flows"))?;
        let (_, factor_row) = rows
            .next()
            .ok_or(RatioError::MissingRow("discount factors"))?;

        let width = cash_row.len().max(factor_row.len());
        let mut schedule = Self {
            periods: Vec::with_capacity(width),
            cash_flows: Vec::with_capacity(width),
            discount_factors: Vec::with_capacity(width),
            stated_npv: None,
            skipped_periods: 0,
        };
        for column in 0..width {
            let cash_flow = cash_row.get(column).copied().flatten();
            let factor = factor_row.get(column).copied().flatten();
            match (cash_flow, factor) {
                (Some(cf), Some(df)) => {
                    schedule.periods.push(column + 1);
                    schedule.cash_flows.push(cf);
                    schedule.discount_factors.push(df);
                }
                (None, None) => {}
                _ => schedule.skipped_periods += 1,
            }
        }

        if schedule.skipped_periods > 0 {
            tracing::warn!(
                skipped = schedule.skipped_periods,
                "discount schedule has incomplete periods"
            );
        }

        schedule.stated_npv = rows
            .find(|(label, _)| label.eq_ignore_ascii_case("npv"))
            .and_then(|(_, cells)| cells.into_iter().flatten().next());

        Ok(schedule)
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.cash_flows.len()
    }

    /// True when the schedule has no periods.
    pub fn is_empty(&self) -> bool {
        self.cash_flows.is_empty()
    }

    /// NPV computed from the schedule.
    pub fn npv(&self) -> Option<f64> {
        npv(&self.cash_flows, &self.discount_factors)
    }

    /// Computed minus stated NPV, when both exist.
    pub fn discrepancy(&self) -> Option<f64> {
        Some(self.npv()? - self.stated_npv?)
    }
}

/// Parse a numeric cell, allowing thousands separators and a leading `$`.
fn parse_cell(cell: &str, row: usize, column: usize) -> Result<f64> {
    let cleaned: String = cell
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse().map_err(|_| RatioError::Parse {
        row,
        column,
        value: cell.to_string(),
    })
}
