use chrono::NaiveDate;

use crate::model::RawObservation;

/// Close-to-close return and true range for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyChange {
    pub date: NaiveDate,
    pub price: f64,
    /// Fractional return against the previous close.
    pub percent_daily_change: f64,
    pub true_range: f64,
}

/// Pair consecutive observations into daily changes.
///
/// Yields `len - 1` records; the first observation only seeds the previous close.
pub fn build(observations: &[RawObservation]) -> Vec<DailyChange> {
    observations
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let percent_daily_change = if prev.close != 0.0 {
                (curr.close - prev.close) / prev.close
            } else {
                0.0
            };
            DailyChange {
                date: curr.date,
                price: curr.close,
                percent_daily_change,
                true_range: true_range(curr, prev.close),
            }
        })
        .collect()
}

/// `max(H - L, |H - prevClose|, |L - prevClose|)`
pub fn true_range(curr: &RawObservation, prev_close: f64) -> f64 {
    let hl = curr.high - curr.low;
    let hc = (curr.high - prev_close).abs();
    let lc = (curr.low - prev_close).abs();
    hl.max(hc).max(lc)
}
