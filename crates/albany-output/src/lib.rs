#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/albany/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod format;
pub mod summary;

pub use export::{ExportError, ExportFormat, Exporter, MetricRow, metric_rows};
pub use format::{Formatted, NOT_AVAILABLE, ValueStyle, format_value};
pub use summary::{
    NO_DATA_MESSAGE, RULE_WIDTH, format_key_statistics, format_markdown, format_report,
    format_summary,
};
