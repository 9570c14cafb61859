use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CategoryError;

/// One daily price observation as delivered by a [`DataSource`](crate::source::DataSource).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

/// Trend direction derived from the SQN score.
///
/// Wire values are ordered integers from `-2` (strong bear) to `2` (strong bull).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    StrongBear,
    Bear,
    Neutral,
    Bull,
    StrongBull,
}

impl Direction {
    pub fn value(self) -> i8 {
        match self {
            Self::StrongBear => -2,
            Self::Bear => -1,
            Self::Neutral => 0,
            Self::Bull => 1,
            Self::StrongBull => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongBear => "strong_bear",
            Self::Bear => "bear",
            Self::Neutral => "neutral",
            Self::Bull => "bull",
            Self::StrongBull => "strong_bull",
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        direction.value()
    }
}

impl TryFrom<i8> for Direction {
    type Error = CategoryError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -2 => Ok(Self::StrongBear),
            -1 => Ok(Self::Bear),
            0 => Ok(Self::Neutral),
            1 => Ok(Self::Bull),
            2 => Ok(Self::StrongBull),
            _ => Err(CategoryError {
                kind: "direction",
                value,
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Volatility regime relative to the analyzed series' own ATR distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Volatility {
    Quiet,
    Normal,
    Volatile,
    VeryVolatile,
}

impl Volatility {
    pub fn value(self) -> i8 {
        match self {
            Self::Quiet => 0,
            Self::Normal => 1,
            Self::Volatile => 2,
            Self::VeryVolatile => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Volatile => "volatile",
            Self::VeryVolatile => "very_volatile",
        }
    }
}

impl From<Volatility> for i8 {
    fn from(volatility: Volatility) -> Self {
        volatility.value()
    }
}

impl TryFrom<i8> for Volatility {
    type Error = CategoryError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Quiet),
            1 => Ok(Self::Normal),
            2 => Ok(Self::Volatile),
            3 => Ok(Self::VeryVolatile),
            _ => Err(CategoryError {
                kind: "volatility",
                value,
            }),
        }
    }
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final per-day analysis record.
///
/// `percent_daily_change` and `percent_atr20` are in percent units, and together
/// with `sqn100` truncated to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResult {
    pub date: NaiveDate,
    pub price: f64,
    #[serde(rename = "percDailyChange")]
    pub percent_daily_change: f64,
    pub sqn100: f64,
    pub true_range: f64,
    #[serde(rename = "percAtr20")]
    pub percent_atr20: f64,
    pub direction: Direction,
    pub volatility: Volatility,
}

/// Inclusive calendar range of requested observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Range ending at `today` and reaching `back_days` into the past.
    ///
    /// `back_days == 0` requests the full history starting at `default_from`.
    pub fn resolve(back_days: u32, today: NaiveDate, default_from: NaiveDate) -> Self {
        let from = if back_days == 0 {
            default_from
        } else {
            today
                .checked_sub_days(Days::new(u64::from(back_days)))
                .unwrap_or(NaiveDate::MIN)
        };
        Self { from, to: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisSpec {
    pub id: u32,
    pub symbol: String,
    pub back_days: u32,
}

/// Analysis output together with the request metadata it was produced for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub id: u32,
    pub symbol: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: usize,
    pub daily_results: Vec<DailyResult>,
}
