use crate::analysis::rolling::WindowStats;
use crate::model::{DailyResult, Direction, Volatility};

/// Truncate toward zero to two decimal digits.
pub fn truncate2(value: f64) -> f64 {
    (value * 100.0).trunc() / 100.0
}

/// Produce the display-ready record: fractional fields become percents and
/// scores are truncated.
pub fn finalize(stats: &WindowStats, direction: Direction, volatility: Volatility) -> DailyResult {
    DailyResult {
        date: stats.change.date,
        price: stats.change.price,
        percent_daily_change: truncate2(stats.change.percent_daily_change * 100.0),
        sqn100: truncate2(stats.sqn100),
        true_range: stats.change.true_range,
        percent_atr20: truncate2(stats.percent_atr20 * 100.0),
        direction,
        volatility,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::daily_change::DailyChange;
    use chrono::NaiveDate;

    #[test]
    fn truncates_instead_of_rounding() {
        assert_eq!(truncate2(1.2399), 1.23);
        assert_eq!(truncate2(-1.2399), -1.23);
        assert_eq!(truncate2(1.235), 1.23);
        assert_eq!(truncate2(0.009), 0.0);
        assert_eq!(truncate2(42.0), 42.0);
    }

    #[test]
    fn finalize_scales_percent_fields() {
        let stats = WindowStats {
            change: DailyChange {
                date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                price: 250.5,
                percent_daily_change: -0.012345,
                true_range: 3.75,
            },
            sqn100: 1.4789,
            percent_atr20: 0.0256789,
        };
        let result = finalize(&stats, Direction::StrongBull, Volatility::Volatile);
        assert_eq!(result.date, stats.change.date);
        assert_eq!(result.price, 250.5);
        assert_eq!(result.percent_daily_change, -1.23);
        assert_eq!(result.sqn100, 1.47);
        assert_eq!(result.true_range, 3.75);
        assert_eq!(result.percent_atr20, 2.56);
        assert_eq!(result.direction, Direction::StrongBull);
        assert_eq!(result.volatility, Volatility::Volatile);
    }
}
