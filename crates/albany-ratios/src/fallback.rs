//! Ordered candidate chains for metrics with more than one possible source.
//!
//! A chain lists every way a metric can be obtained, highest precedence
//! first. [`first_match`] walks the chain and returns the first candidate that
//! yields a finite value, together with where that value came from. Keeping
//! the chains as data makes the precedence of each metric visible in one place
//! and testable on its own.

use crate::numeric::finite;
use albany_data::{MarketData, SnapshotField};
use serde::{Deserialize, Serialize};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Derived from the balance sheet and income statement
    Statements,
    /// Read from a snapshot info field
    Snapshot,
}

/// One way of obtaining a metric.
#[derive(Debug, Clone, Copy)]
pub enum Candidate {
    /// Computed from the financial statements.
    Statements(fn(&MarketData) -> Option<f64>),
    /// A snapshot field multiplied by `scale`.
    Snapshot {
        /// Field to read
        field: SnapshotField,
        /// Multiplier applied to the field (100 for fractions reported as %)
        scale: f64,
        /// Treat a zero value as absent
        skip_zero: bool,
    },
}

impl Candidate {
    /// A snapshot field read as-is.
    pub const fn field(field: SnapshotField) -> Self {
        Self::Snapshot {
            field,
            scale: 1.0,
            skip_zero: false,
        }
    }

    /// A snapshot field read as-is, where zero means "not published".
    pub const fn nonzero_field(field: SnapshotField) -> Self {
        Self::Snapshot {
            field,
            scale: 1.0,
            skip_zero: true,
        }
    }

    /// A snapshot fraction converted to a percentage.
    pub const fn percent_field(field: SnapshotField) -> Self {
        Self::Snapshot {
            field,
            scale: crate::numeric::PERCENT,
            skip_zero: false,
        }
    }

    /// Source tag of this candidate.
    pub const fn source(&self) -> Source {
        match self {
            Self::Statements(_) => Source::Statements,
            Self::Snapshot { .. } => Source::Snapshot,
        }
    }

    /// Evaluate against market data. Non-finite results count as absent.
    pub fn evaluate(&self, data: &MarketData) -> Option<f64> {
        let value = match self {
            Self::Statements(derive) => derive(data)?,
            Self::Snapshot {
                field,
                scale,
                skip_zero,
            } => {
                let raw = data.info.get(*field)?;
                if *skip_zero && raw == 0.0 {
                    return None;
                }
                raw * scale
            }
        };
        finite(value)
    }
}

/// A value together with the source that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// The metric value
    pub value: f64,
    /// Source of the value
    pub source: Source,
    /// Position of the winning candidate in its chain
    pub rank: usize,
}

/// Evaluate `chain` in order and return the first candidate that yields a value.
pub fn first_match(data: &MarketData, chain: &[Candidate]) -> Option<Resolved> {
    chain.iter().enumerate().find_map(|(rank, candidate)| {
        candidate.evaluate(data).map(|value| Resolved {
            value,
            source: candidate.source(),
            rank,
        })
    })
}

/// Convenience wrapper returning only the value.
pub fn resolve(data: &MarketData, chain: &[Candidate]) -> Option<f64> {
    first_match(data, chain).map(|r| r.value)
}
