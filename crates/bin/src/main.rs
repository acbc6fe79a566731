//! Albany CLI binary.
//!
//! Fetches market data for a symbol and prints its financial ratio summary.

mod logging;
mod source;

use albany::data::{DataSource, HistoryWindow, SnapshotField, SourceConfig};
use albany::output::{
    ExportFormat, Exporter, ValueStyle, format_key_statistics, format_markdown, format_report,
    format_value,
};
use albany::ratios::{DiscountSchedule, KeyStatistics, RatioEngine, fallback, price};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use source::CliSource;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

/// Rows of price history shown by `snapshot`.
const SNAPSHOT_TAIL_ROWS: usize = 5;

#[derive(Parser)]
#[command(name = "albany")]
#[command(about = "Albany: financial ratio reports for listed equities", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Delay after each provider request, in milliseconds
    #[arg(long, global = true, default_value_t = 1000)]
    rate_limit_ms: u64,

    /// Calendar days of price history to fetch
    #[arg(long, global = true, default_value_t = 365)]
    history_days: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Markdown,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the financial ratio summary for a stock
    Ratios {
        /// Stock symbol
        symbol: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Read market data from a JSON fixture file or directory
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },

    /// Print raw snapshot fields and the latest price history
    Snapshot {
        /// Stock symbol
        symbol: String,

        /// Read market data from a JSON fixture file or directory
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },

    /// Print key per-share statistics
    Stats {
        /// Stock symbol
        symbol: String,

        /// Read market data from a JSON fixture file or directory
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },

    /// Check the NPV of a discount schedule CSV
    Npv {
        /// CSV with a header row, a cash flow row and a discount factor row
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let config = SourceConfig {
        rate_limit_delay: Duration::from_millis(cli.rate_limit_ms),
        history_window: HistoryWindow::days(cli.history_days),
        ..SourceConfig::default()
    };

    match cli.command {
        Commands::Ratios {
            symbol,
            format,
            fixtures,
        } => {
            let symbol = normalize_symbol(&symbol)?;
            let source = CliSource::open(fixtures.as_deref(), &config)?;
            ratios(source, &symbol, format, &config).await?;
        }
        Commands::Snapshot { symbol, fixtures } => {
            let symbol = normalize_symbol(&symbol)?;
            let source = CliSource::open(fixtures.as_deref(), &config)?;
            snapshot(source, &symbol, &config).await?;
        }
        Commands::Stats { symbol, fixtures } => {
            let symbol = normalize_symbol(&symbol)?;
            let source = CliSource::open(fixtures.as_deref(), &config)?;
            stats(source, &symbol, &config).await?;
        }
        Commands::Npv { path } => npv(&path)?,
    }

    Ok(())
}

fn normalize_symbol(symbol: &str) -> Result<String, Box<dyn std::error::Error>> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err("No ticker symbol provided".into());
    }
    Ok(symbol)
}

fn spinner(message: String) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

fn no_data(symbol: &str) -> ! {
    println!("Failed to retrieve financial ratios for {symbol}.");
    process::exit(1);
}

async fn ratios<S: DataSource>(
    source: S,
    symbol: &str,
    format: OutputFormat,
    config: &SourceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = RatioEngine::new(source).with_window(config.history_window);

    let pb = spinner(format!("Fetching financial ratios for {symbol}..."))?;
    let report = engine.compute(symbol).await;
    pb.finish_and_clear();

    let Some(report) = report else {
        no_data(symbol);
    };

    match format {
        OutputFormat::Text => println!("{}", format_report(&report)),
        OutputFormat::Markdown => print!("{}", format_markdown(&report)),
        OutputFormat::Json => println!("{}", report.export_to_string(ExportFormat::PrettyJson)?),
        OutputFormat::Csv => print!("{}", report.export_to_string(ExportFormat::Csv)?),
    }

    Ok(())
}

async fn snapshot<S: DataSource>(
    source: S,
    symbol: &str,
    config: &SourceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = RatioEngine::new(source).with_window(config.history_window);

    let pb = spinner(format!("Fetching market data for {symbol}..."))?;
    let data = engine.fetch(symbol).await;
    pb.finish_and_clear();

    let Some(data) = data else {
        no_data(symbol);
    };

    let info = &data.info;
    let current_price = fallback::resolve(&data, price::CURRENT_PRICE_CHAIN);
    println!("Snapshot fields for {symbol}:");
    println!("Current Price: {}", format_value(current_price, ValueStyle::Currency));
    println!(
        "52-Week High: {}",
        format_value(info.get(SnapshotField::FiftyTwoWeekHigh), ValueStyle::Currency)
    );
    println!(
        "52-Week Low: {}",
        format_value(info.get(SnapshotField::FiftyTwoWeekLow), ValueStyle::Currency)
    );
    println!(
        "Market Cap: {}",
        format_value(info.get(SnapshotField::MarketCap), ValueStyle::Currency)
    );
    println!(
        "P/E Ratio: {}",
        format_value(info.get(SnapshotField::TrailingPe), ValueStyle::Plain)
    );

    if !info.is_empty() {
        println!("\nAll fields:");
        for (key, value) in info.iter() {
            println!("  {key}: {value}");
        }
    }

    println!();
    if data.history.is_empty() {
        println!("No price history available.");
    } else {
        let df = data.history.to_dataframe()?;
        println!("Last {SNAPSHOT_TAIL_ROWS} days of historical data:");
        println!("{}", df.tail(Some(SNAPSHOT_TAIL_ROWS)));
    }

    Ok(())
}

async fn stats<S: DataSource>(
    source: S,
    symbol: &str,
    config: &SourceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = RatioEngine::new(source).with_window(config.history_window);

    let pb = spinner(format!("Fetching market data for {symbol}..."))?;
    let data = engine.fetch(symbol).await;
    pb.finish_and_clear();

    let Some(data) = data else {
        no_data(symbol);
    };

    print!("{}", format_key_statistics(symbol, &KeyStatistics::derive(&data)));
    Ok(())
}

fn npv(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let schedule = DiscountSchedule::from_path(path)?;

    println!(
        "Stated NPV: {}",
        format_value(schedule.stated_npv, ValueStyle::Plain)
    );
    println!(
        "Computed NPV: {}",
        format_value(schedule.npv(), ValueStyle::Plain)
    );
    if let Some(diff) = schedule.discrepancy() {
        println!("Difference: {diff:.2}");
    }
    if schedule.skipped_periods > 0 {
        println!("Incomplete periods skipped: {}", schedule.skipped_periods);
    }

    println!("\nData Table:");
    println!("{}", schedule_frame(&schedule)?);
    Ok(())
}

/// Per-period cash flow, discount factor and present value.
fn schedule_frame(schedule: &DiscountSchedule) -> PolarsResult<DataFrame> {
    let periods: Vec<u32> = schedule.periods.iter().map(|&p| p as u32).collect();
    let present_values: Vec<f64> = schedule
        .cash_flows
        .iter()
        .zip(&schedule.discount_factors)
        .map(|(cf, df)| cf * df)
        .collect();

    df! {
        "period" => periods,
        "cash_flow" => schedule.cash_flows.clone(),
        "discount_factor" => schedule.discount_factors.clone(),
        "present_value" => present_values,
    }
}
