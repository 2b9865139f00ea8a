//! Score arithmetic.
//!
//! Every percentage shown by the API is computed by [`score_percentage`] so the dashboard,
//! analytics, profile and history views agree.

/// Labels of the score distribution buckets with their inclusive upper bound.
pub const SCORE_BUCKETS: [(&str, i64); 5] = [
    ("0-20", 20),
    ("21-40", 40),
    ("41-60", 60),
    ("61-80", 80),
    ("81-100", 100),
];

/// Returns `score / total_possible * 100`, or 0 when `total_possible` is 0.
pub fn score_percentage(score: i32, total_possible: i32) -> f64 {
    if total_possible <= 0 {
        return 0.0;
    }

    score as f64 / total_possible as f64 * 100.0
}

/// Rounds to two decimals for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, 0 for an empty input
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0u64), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Index into [`SCORE_BUCKETS`] of the bucket a percentage belongs to.
///
/// The percentage is rounded to the nearest integer and placed in the first bucket whose
/// upper bound it does not exceed. Values above 100 land in the last bucket.
pub fn score_bucket(percentage: f64) -> usize {
    let rounded = percentage.round() as i64;

    SCORE_BUCKETS
        .iter()
        .position(|(_, upper)| rounded <= *upper)
        .unwrap_or(SCORE_BUCKETS.len() - 1)
}
