//! Snapshot fields and financial statements from the Yahoo Finance
//! `quoteSummary` endpoint.
//!
//! The endpoint only answers requests that carry a session cookie and the
//! matching crumb. Both are obtained on first use and reused until the
//! endpoint rejects them.

use crate::error::{DataError, Result};
use crate::model::{LineItem, SnapshotInfo, StatementPeriod, StatementTable};
use chrono::DateTime;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;

const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Sets the session cookie. Responds 404, which is expected.
const COOKIE_URL: &str = "https://fc.yahoo.com";

const CRUMB_URL: &str = "https://query2.finance.yahoo.com/v1/test/getcrumb";

/// Modules that carry snapshot fields, in precedence order.
const SNAPSHOT_MODULES: &[&str] = &["financialData", "summaryDetail", "defaultKeyStatistics", "price"];

/// A `quoteSummary` module and the array inside it holding statement periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementModule {
    /// Annual balance sheets
    BalanceSheet,
    /// Annual income statements
    IncomeStatement,
}

impl StatementModule {
    /// Module name on the endpoint.
    pub const fn module(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "balanceSheetHistory",
            Self::IncomeStatement => "incomeStatementHistory",
        }
    }

    /// Key of the period array inside the module.
    pub const fn array_key(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "balanceSheetStatements",
            Self::IncomeStatement => "incomeStatementHistory",
        }
    }
}

/// Yahoo Finance fundamentals provider.
#[derive(Debug)]
pub struct YahooFundamentalsProvider {
    client: reqwest::Client,
    crumb: Mutex<Option<String>>,
    rate_limit_delay: Duration,
}

impl YahooFundamentalsProvider {
    /// Create a new provider with default rate limiting.
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_rate_limit(user_agent, Duration::from_millis(1000))
    }

    /// Create a new provider with custom rate limiting.
    pub fn with_rate_limit(user_agent: &str, rate_limit_delay: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            crumb: Mutex::new(None),
            rate_limit_delay,
        })
    }

    /// Fetch the snapshot fields for a symbol.
    pub async fn fetch_snapshot(&self, symbol: &str) -> Result<SnapshotInfo> {
        let summary = self.fetch_summary(symbol, SNAPSHOT_MODULES).await?;
        Ok(parse_snapshot(&summary))
    }

    /// Fetch one statement table for a symbol.
    pub async fn fetch_statement(
        &self,
        symbol: &str,
        module: StatementModule,
    ) -> Result<StatementTable> {
        let summary = self.fetch_summary(symbol, &[module.module()]).await?;
        parse_statement(&summary, module)
    }

    /// Fetch the raw `quoteSummary` result object for the given modules.
    async fn fetch_summary(&self, symbol: &str, modules: &[&str]) -> Result<Value> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let crumb = self.crumb().await?;
        let url = format!("{QUOTE_SUMMARY_URL}/{symbol}");
        let response = self
            .client
            .get(&url)
            .query(&[("modules", modules.join(",")), ("crumb", crumb)])
            .send()
            .await;

        sleep(self.rate_limit_delay).await;

        let response = response?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!(symbol, "crumb rejected, discarding session");
            self.crumb.lock().await.take();
        }

        let body: Value = response.error_for_status()?.json().await?;
        extract_result(symbol, body)
    }

    /// Session crumb, performing the cookie handshake when none is cached.
    async fn crumb(&self) -> Result<String> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }

        self.client.get(COOKIE_URL).send().await?;
        let body = self
            .client
            .get(CRUMB_URL)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let crumb = parse_crumb(&body)?;
        tracing::debug!("obtained Yahoo Finance session crumb");
        *cached = Some(crumb.clone());
        Ok(crumb)
    }
}

/// Validate the body of the crumb endpoint, which is the bare crumb on success.
fn parse_crumb(body: &str) -> Result<String> {
    let crumb = body.trim();
    if crumb.is_empty() || crumb.contains(char::is_whitespace) || crumb.starts_with(['<', '{']) {
        return Err(DataError::YahooApi(format!(
            "unexpected crumb response: {crumb:.40}"
        )));
    }
    Ok(crumb.to_string())
}

/// Pull the first entry of `quoteSummary.result`, surfacing the endpoint's
/// own error description when there is one.
fn extract_result(symbol: &str, mut body: Value) -> Result<Value> {
    let summary = body
        .get_mut("quoteSummary")
        .ok_or_else(|| DataError::Parse("response has no quoteSummary".to_string()))?;

    if let Some(error) = summary.get("error").filter(|e| !e.is_null()) {
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(DataError::YahooApi(description.to_string()));
    }

    match summary.get_mut("result").and_then(Value::as_array_mut) {
        Some(results) if !results.is_empty() => Ok(results.swap_remove(0)),
        _ => Err(DataError::missing(symbol, "quoteSummary returned no result")),
    }
}

/// Numeric value of a field, which the endpoint wraps as `{"raw": .., "fmt": ..}`.
fn raw_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(obj) => obj.get("raw").and_then(Value::as_f64),
        _ => None,
    }
}

/// Collect numeric snapshot fields. The first module to publish a key wins.
pub fn parse_snapshot(summary: &Value) -> SnapshotInfo {
    let mut info = SnapshotInfo::new();

    for module in SNAPSHOT_MODULES {
        let Some(fields) = summary.get(*module).and_then(Value::as_object) else {
            continue;
        };
        for (key, value) in fields {
            if key == "maxAge" || info.get_key(key).is_some() {
                continue;
            }
            if let Some(number) = raw_number(value) {
                info.insert(key.clone(), number);
            }
        }
    }

    info
}

/// Parse one statement module into a table, most recent period first.
pub fn parse_statement(summary: &Value, module: StatementModule) -> Result<StatementTable> {
    let Some(periods) = summary
        .get(module.module())
        .and_then(|m| m.get(module.array_key()))
        .and_then(Value::as_array)
    else {
        return Ok(StatementTable::default());
    };

    let mut parsed = Vec::with_capacity(periods.len());
    for entry in periods {
        let Some(fields) = entry.as_object() else {
            return Err(DataError::Parse(format!(
                "{} entry is not an object",
                module.module()
            )));
        };

        let end_date = fields
            .get("endDate")
            .and_then(raw_number)
            .and_then(|ts| DateTime::from_timestamp(ts as i64, 0))
            .map(|dt| dt.date_naive());

        let mut period = StatementPeriod::new(end_date);
        for (key, value) in fields {
            if let (Some(item), Some(number)) = (LineItem::from_key(key), raw_number(value)) {
                period.insert(item, number);
            }
        }
        parsed.push(period);
    }

    Ok(StatementTable::newest_first(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SnapshotField;
    use chrono::NaiveDate;
    use rstest::rstest;
    use serde_json::json;

    fn summary() -> Value {
        json!({
            "financialData": {
                "maxAge": 86400,
                "currentPrice": {"raw": 227.5, "fmt": "227.50"},
                "returnOnEquity": {"raw": 1.5741, "fmt": "157.41%"},
                "financialCurrency": "USD"
            },
            "summaryDetail": {
                "currentPrice": {"raw": 1.0},
                "dividendYield": {"raw": 0.0044, "fmt": "0.44%"},
                "trailingPE": {"raw": 37.4},
                "forwardPE": {}
            },
            "price": {
                "marketCap": {"raw": 3.44e12, "fmt": "3.44T"}
            },
            "balanceSheetHistory": {
                "balanceSheetStatements": [
                    {
                        "endDate": {"raw": 1_664_496_000, "fmt": "2022-09-30"},
                        "totalAssets": {"raw": 352_755_000_000.0}
                    },
                    {
                        "endDate": {"raw": 1_696_032_000, "fmt": "2023-09-30"},
                        "totalAssets": {"raw": 352_583_000_000.0},
                        "totalLiab": {"raw": 290_437_000_000.0},
                        "totalStockholderEquity": {"raw": 62_146_000_000.0}
                    }
                ]
            }
        })
    }

    #[test]
    fn test_parse_snapshot() {
        let info = parse_snapshot(&summary());

        assert_eq!(info.get(SnapshotField::CurrentPrice), Some(227.5));
        assert_eq!(info.get(SnapshotField::DividendYield), Some(0.0044));
        assert_eq!(info.get(SnapshotField::MarketCap), Some(3.44e12));
        assert_eq!(info.get(SnapshotField::ForwardPe), None);
        assert_eq!(info.get_key("maxAge"), None);
        assert_eq!(info.get_key("financialCurrency"), None);
    }

    #[test]
    fn test_parse_balance_sheet_newest_first() {
        let table = parse_statement(&summary(), StatementModule::BalanceSheet).unwrap();

        assert_eq!(table.len(), 2);
        let latest = table.latest().unwrap();
        assert_eq!(latest.end_date(), NaiveDate::from_ymd_opt(2023, 9, 30));
        assert_eq!(latest.get(LineItem::TotalLiabilities), Some(290_437_000_000.0));
        assert_eq!(latest.get(LineItem::TotalStockholderEquity), Some(62_146_000_000.0));
    }

    #[test]
    fn test_missing_module_is_empty_table() {
        let table = parse_statement(&summary(), StatementModule::IncomeStatement).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_extract_result_error() {
        let body = json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}
            }
        });
        let result = extract_result("ZZZZ", body);
        assert!(matches!(result, Err(DataError::YahooApi(msg)) if msg.contains("ZZZZ")));
    }

    #[test]
    fn test_extract_result_empty() {
        let body = json!({"quoteSummary": {"result": [], "error": null}});
        let result = extract_result("ZZZZ", body);
        assert!(matches!(result, Err(DataError::MissingData { .. })));
    }

    #[rstest]
    #[case("Xq2.kS/aB1c", "Xq2.kS/aB1c")]
    #[case("  abcDEF123\n", "abcDEF123")]
    fn test_parse_crumb(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(parse_crumb(body).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("Too Many Requests")]
    #[case("<html><body>Invalid Cookie</body></html>")]
    #[case("{\"finance\":{\"error\":{\"code\":\"Unauthorized\"}}}")]
    fn test_parse_crumb_rejects_error_bodies(#[case] body: &str) {
        assert!(matches!(parse_crumb(body), Err(DataError::YahooApi(_))));
    }

    #[tokio::test]
    async fn test_invalid_symbol() {
        let provider = YahooFundamentalsProvider::with_rate_limit("test", Duration::ZERO).unwrap();
        let result = provider.fetch_snapshot("").await;
        assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
    }
}
