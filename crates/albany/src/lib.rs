#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/albany/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use albany_data as data;
pub use albany_output as output;
pub use albany_ratios as ratios;

pub use albany_ratios::{RatioEngine, RatioReport};

/// Compute the report for `symbol` and render the text summary, or the
/// no-data message when nothing is available.
pub async fn summarize<S: data::DataSource>(source: &S, symbol: &str) -> String {
    let report = ratios::compute(source, symbol).await;
    output::format_summary(report.as_ref())
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
