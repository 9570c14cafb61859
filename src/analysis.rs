pub mod daily_change;
pub mod direction;
pub mod normalize;
pub mod rolling;
pub mod volatility;

use chrono::NaiveDate;
use error_stack::Report;
use tracing::{debug, info};

use crate::analysis::volatility::VolatilityBands;
use crate::error::SourceError;
use crate::model::{AnalysisResponse, AnalysisSpec, DailyResult, DateRange, RawObservation};
use crate::source::DataSource;

/// Run the full analysis pipeline over an ascending series of daily observations.
///
/// Produces `max(0, observations.len() - SQN_WINDOW)` records. Each stage consumes
/// the complete output of the previous one.
pub fn run(observations: &[RawObservation]) -> Vec<DailyResult> {
    let changes = daily_change::build(observations);
    let windows = rolling::annotate(&changes);

    let atr_series: Vec<f64> = windows.iter().map(|w| w.percent_atr20).collect();
    let bands = VolatilityBands::from_series(&atr_series);

    debug!(
        observations = observations.len(),
        changes = changes.len(),
        results = windows.len(),
        "analysis pipeline evaluated"
    );

    windows
        .into_iter()
        .map(|w| {
            let direction = direction::classify(w.sqn100);
            let volatility = bands.classify(w.percent_atr20);
            normalize::finalize(&w, direction, volatility)
        })
        .collect()
}

/// Resolve the requested date range, fetch the series and analyze it.
pub async fn analyze_product(
    source: &dyn DataSource,
    spec: &AnalysisSpec,
    today: NaiveDate,
    default_from: NaiveDate,
) -> Result<AnalysisResponse, Report<SourceError>> {
    let range = DateRange::resolve(spec.back_days, today, default_from);
    let observations = source.fetch_daily(&spec.symbol, range).await?;
    let daily_results = run(&observations);

    info!(
        id = spec.id,
        symbol = %spec.symbol,
        range = %range,
        observations = observations.len(),
        days = daily_results.len(),
        "product analyzed"
    );
    if let Some(latest) = daily_results.last() {
        info!(
            symbol = %spec.symbol,
            date = %latest.date,
            direction = %latest.direction,
            volatility = %latest.volatility,
            "latest regime"
        );
    }

    Ok(AnalysisResponse {
        id: spec.id,
        symbol: spec.symbol.clone(),
        from: range.from,
        to: range.to,
        days: daily_results.len(),
        daily_results,
    })
}

/// Population mean and standard deviation (divisor `n`).
///
/// Returns `(0.0, 0.0)` for an empty series.
pub fn population_stats<I>(values: I) -> (f64, f64)
where
    I: Iterator<Item = f64> + Clone,
{
    let (count, sum) = values
        .clone()
        .fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        return (0.0, 0.0);
    }
    let mean = sum / count as f64;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
    (mean, variance.sqrt())
}
