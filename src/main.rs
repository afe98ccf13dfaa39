mod analysis;
mod app;
mod config;
mod data;
mod error;
mod report;
mod ui;

use std::process::ExitCode;

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use config::ReportConfig;
use data::acquisition;
use data::models::PriceFrame;
use data::yahoo::YahooProvider;
use error::ReportError;
use report::Report;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ReportConfig::default();
    let as_of = chrono::Local::now().date_naive();

    // Kept outside `run` so a failure after the download can still list what arrived
    let mut fetched: Option<PriceFrame> = None;

    match run(&config, as_of, &mut fetched) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("An error occurred: {}", e);
            if let Some(frame) = &fetched {
                eprintln!("\nAvailable columns in data:");
                for label in frame.column_labels() {
                    eprintln!("  {}", label);
                }
            }
            ExitCode::FAILURE
        }
    }
}

/// Fetch, compute, then hand the finished report to the window.
fn run(
    config: &ReportConfig,
    as_of: NaiveDate,
    fetched: &mut Option<PriceFrame>,
) -> Result<(), ReportError> {
    let provider = YahooProvider::new()?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ReportError::provider("*", e))?;

    let frame = fetched.insert(rt.block_on(acquisition::fetch_prices(&provider, config, as_of))?);
    let table = frame.price_table()?;
    tracing::info!("Using '{}' prices", table.field);

    let names = rt.block_on(acquisition::resolve_display_names(
        &provider,
        &config.constituents,
    ));

    let report = Report::build(&table, &names, config, as_of);
    app::show(report)
}
