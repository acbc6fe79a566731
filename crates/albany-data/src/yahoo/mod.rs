//! Yahoo Finance data providers.

pub mod fundamentals;
pub mod quotes;
pub mod source;

pub use fundamentals::{StatementModule, YahooFundamentalsProvider};
pub use quotes::YahooQuoteProvider;
pub use source::YahooSource;
