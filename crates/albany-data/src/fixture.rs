//! Offline data source backed by JSON fixtures.
//!
//! A fixture is a serialized [`MarketData`] bundle. [`FixtureSource::from_path`]
//! accepts a single bundle, an array of bundles, or a directory of
//! `<SYMBOL>.json` files.

use crate::error::{DataError, Result};
use crate::model::{MarketData, PriceHistory, SnapshotInfo, StatementTable};
use crate::source::{DataSource, HistoryWindow};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// In-memory market data keyed by upper-cased symbol.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    data: HashMap<String, MarketData>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Many(Vec<MarketData>),
    One(Box<MarketData>),
}

impl FixtureSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, data: MarketData) -> Self {
        self.insert(data);
        self
    }

    /// Add or replace the bundle for its symbol.
    pub fn insert(&mut self, data: MarketData) {
        self.data.insert(data.symbol.to_uppercase(), data);
    }

    /// Number of symbols held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no symbol is held.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Load fixtures from a file or directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut source = Self::new();

        if path.is_dir() {
            let mut entries: Vec<_> = fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .collect();
            entries.sort();
            for file in entries {
                source.load_file(&file)?;
            }
        } else {
            source.load_file(path)?;
        }

        tracing::debug!(symbols = source.len(), path = %path.display(), "loaded fixtures");
        Ok(source)
    }

    /// Parse fixtures from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut source = Self::new();
        source.load_str(json)?;
        Ok(source)
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)?;
        self.load_str(&content)
    }

    fn load_str(&mut self, json: &str) -> Result<()> {
        match serde_json::from_str::<FixtureFile>(json)? {
            FixtureFile::Many(bundles) => bundles.into_iter().for_each(|b| self.insert(b)),
            FixtureFile::One(bundle) => self.insert(*bundle),
        }
        Ok(())
    }

    fn lookup(&self, symbol: &str) -> Result<&MarketData> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }
        self.data
            .get(&symbol.to_uppercase())
            .ok_or_else(|| DataError::missing(symbol, "no fixture for symbol"))
    }
}

impl DataSource for FixtureSource {
    async fn snapshot(&self, symbol: &str) -> Result<SnapshotInfo> {
        Ok(self.lookup(symbol)?.info.clone())
    }

    async fn price_history(&self, symbol: &str, window: HistoryWindow) -> Result<PriceHistory> {
        Ok(self.lookup(symbol)?.history.trailing_days(window.days))
    }

    async fn balance_sheet(&self, symbol: &str) -> Result<StatementTable> {
        Ok(self.lookup(symbol)?.balance_sheet.clone())
    }

    async fn income_statement(&self, symbol: &str) -> Result<StatementTable> {
        Ok(self.lookup(symbol)?.income_statement.clone())
    }
}
