use crate::analysis::population_stats;
use crate::model::Volatility;

/// Band edges derived from the distribution of a whole percent-ATR series.
///
/// Built once per analysis, after every rolling value is known, then applied
/// to each record independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityBands {
    pub mean: f64,
    pub std_dev: f64,
}

impl VolatilityBands {
    pub fn from_series(series: &[f64]) -> Self {
        let (mean, std_dev) = population_stats(series.iter().copied());
        Self { mean, std_dev }
    }

    /// Bucket for one percent-ATR value.
    ///
    /// With `std_dev == 0` the Normal and Volatile bands are empty, so a value
    /// equal to the mean reads `VeryVolatile`.
    pub fn classify(&self, percent_atr: f64) -> Volatility {
        if percent_atr < self.mean - self.std_dev / 2.0 {
            Volatility::Quiet
        } else if percent_atr < self.mean + self.std_dev / 2.0 {
            Volatility::Normal
        } else if percent_atr < self.mean + self.std_dev * 3.0 {
            Volatility::Volatile
        } else {
            Volatility::VeryVolatile
        }
    }
}
