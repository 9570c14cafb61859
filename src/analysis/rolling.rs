use crate::analysis::daily_change::DailyChange;
use crate::analysis::population_stats;

/// Trailing window length for the SQN score.
pub const SQN_WINDOW: usize = 100;
/// Trailing window length for the average true range.
pub const ATR_WINDOW: usize = 20;

const _: () = assert!(ATR_WINDOW <= SQN_WINDOW);

/// Spreads this small relative to the mean are rounding noise.
const SPREAD_TOLERANCE: f64 = 1e-9;

/// A daily change annotated with its trailing-window statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub change: DailyChange,
    pub sqn100: f64,
    /// Fractional ATR relative to the day's price.
    pub percent_atr20: f64,
}

/// Annotate every change that has a full `SQN_WINDOW` of history.
///
/// The first `SQN_WINDOW - 1` changes only serve as history and are dropped.
pub fn annotate(changes: &[DailyChange]) -> Vec<WindowStats> {
    changes
        .windows(SQN_WINDOW)
        .map(|window| {
            let change = window[SQN_WINDOW - 1];
            WindowStats {
                change,
                sqn100: sqn(window),
                percent_atr20: percent_atr(&window[SQN_WINDOW - ATR_WINDOW..], change.price),
            }
        })
        .collect()
}

/// System quality number: `mean * sqrt(n) / stdDev` of the window's returns.
///
/// A window without spread has no meaningful score and yields `0.0`. The spread
/// counts as zero up to `SPREAD_TOLERANCE` times the mean's magnitude.
pub fn sqn(window: &[DailyChange]) -> f64 {
    let (mean, std_dev) = population_stats(window.iter().map(|c| c.percent_daily_change));
    if std_dev <= mean.abs() * SPREAD_TOLERANCE {
        return 0.0;
    }
    mean * (window.len() as f64).sqrt() / std_dev
}

/// Mean true range over `window`, as a fraction of `price`.
pub fn percent_atr(window: &[DailyChange], price: f64) -> f64 {
    if price == 0.0 || window.is_empty() {
        return 0.0;
    }
    let atr = window.iter().map(|c| c.true_range).sum::<f64>() / window.len() as f64;
    atr / price
}
