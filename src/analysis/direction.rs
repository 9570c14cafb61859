use crate::model::Direction;

const STRONG_BEAR_BELOW: f64 = -0.7;
const BEAR_BELOW: f64 = 0.0;
const NEUTRAL_BELOW: f64 = 0.7;
const BULL_BELOW: f64 = 1.47;

/// Map an SQN score to its trend bucket.
///
/// Each threshold belongs to the higher bucket. `NaN` reads as `Neutral`;
/// infinities land in the outermost buckets.
pub fn classify(sqn: f64) -> Direction {
    if sqn.is_nan() {
        return Direction::Neutral;
    }
    if sqn < STRONG_BEAR_BELOW {
        Direction::StrongBear
    } else if sqn < BEAR_BELOW {
        Direction::Bear
    } else if sqn < NEUTRAL_BELOW {
        Direction::Neutral
    } else if sqn < BULL_BELOW {
        Direction::Bull
    } else {
        Direction::StrongBull
    }
}
