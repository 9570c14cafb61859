mod analysis;
mod config;
mod error;
mod model;
mod source;

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use clap::Parser;
use derive_more::{Display, Error};
use error_stack::{Report, ResultExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use model::AnalysisResponse;
use source::DataSource;
use source::json_file::JsonFileSource;

#[derive(Debug, Display, Error)]
pub enum AppError {
    #[display("configuration error")]
    Config,
    #[display("output error")]
    Output,
    #[display("every selected product failed to analyze")]
    Analysis,
}

#[derive(Parser)]
#[command(
    name = "product-analysis",
    about = "Daily trend and volatility analysis of price series"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Only analyze the product with this symbol
    #[arg(short, long)]
    symbol: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() {
    if let Err(report) = run().await {
        eprintln!("{report:?}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Report<AppError>> {
    let cli = Cli::parse();
    let config = config::load(Path::new(&cli.config)).change_context(AppError::Config)?;

    init_tracing(&config);

    let source: Box<dyn DataSource> = Box::new(JsonFileSource::new(&config.data.dir));
    let today = Utc::now().date_naive();

    let products: Vec<_> = config
        .products
        .iter()
        .filter(|p| cli.symbol.as_deref().is_none_or(|s| s == p.symbol))
        .collect();

    if products.is_empty() {
        warn!(symbol = ?cli.symbol, "no products selected; nothing to do");
        return Ok(());
    }

    let mut responses = Vec::with_capacity(products.len());
    for product in products {
        let spec = product.to_spec();
        match analysis::analyze_product(
            source.as_ref(),
            &spec,
            today,
            config.data.default_from,
        )
        .await
        {
            Ok(response) => responses.push(response),
            Err(e) => {
                warn!(error = ?e, id = spec.id, symbol = %spec.symbol, "analysis failed (continuing)");
            }
        }
    }

    ensure_any_analyzed(&responses)?;
    write_responses(&responses, cli.pretty)?;

    info!(products = responses.len(), "analysis complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    // stdout carries the JSON results.
    let filter = EnvFilter::new(&config.general.log_level);
    match config.general.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Selected products exist at this point, so an empty result means all failed.
fn ensure_any_analyzed(responses: &[AnalysisResponse]) -> Result<(), Report<AppError>> {
    if responses.is_empty() {
        return Err(Report::new(AppError::Analysis));
    }
    Ok(())
}

fn write_responses(responses: &[AnalysisResponse], pretty: bool) -> Result<(), Report<AppError>> {
    let json = if pretty {
        serde_json::to_string_pretty(responses)
    } else {
        serde_json::to_string(responses)
    }
    .change_context(AppError::Output)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").change_context(AppError::Output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn all_products_failing_is_an_error() {
        let err = ensure_any_analyzed(&[]).unwrap_err();
        assert!(matches!(err.current_context(), AppError::Analysis));
    }

    #[test]
    fn one_successful_product_is_enough() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let response = AnalysisResponse {
            id: 1,
            symbol: "ES".into(),
            from: date,
            to: date,
            days: 0,
            daily_results: Vec::new(),
        };
        assert!(ensure_any_analyzed(&[response]).is_ok());
    }
}
