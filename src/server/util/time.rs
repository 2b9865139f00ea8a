//! Date window calculations for the admin analytics.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::server::error::Error;

/// Number of days covered by the daily submission counts
pub const DAILY_WINDOW_DAYS: i64 = 7;

/// Returns the `days` dates ending with `today`, oldest first.
///
/// # Arguments
/// - `today` - Last day of the window, in UTC
/// - `days` - Length of the window
///
/// # Returns
/// - `Ok(Vec<NaiveDate>)` - Consecutive dates, `today` last
/// - `Err(Error::ParseError)` - The window start falls outside the supported date range
///
/// # Example
/// ```ignore
/// let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let window = daily_window(today, 3)?;
/// // window == [2026-02-28, 2026-03-01, 2026-03-02]
/// ```
pub fn daily_window(today: NaiveDate, days: i64) -> Result<Vec<NaiveDate>, Error> {
    (0..days)
        .rev()
        .map(|offset| {
            today
                .checked_sub_signed(Duration::days(offset))
                .ok_or_else(|| {
                    Error::ParseError(format!(
                        "Failed to calculate the date {} days before {}",
                        offset, today
                    ))
                })
        })
        .collect()
}

/// Midnight at the start of `date`
pub fn start_of_day(date: NaiveDate) -> Result<NaiveDateTime, Error> {
    date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        Error::ParseError(format!("Failed to construct midnight of {}", date))
    })
}

/// Counts `timestamps` per day of `window`, zero-filled.
///
/// Timestamps outside the window are ignored. The result follows the order of `window`.
pub fn daily_counts(
    window: &[NaiveDate],
    timestamps: impl IntoIterator<Item = NaiveDateTime>,
) -> Vec<(NaiveDate, u64)> {
    let mut counts: Vec<(NaiveDate, u64)> = window.iter().map(|date| (*date, 0)).collect();

    for timestamp in timestamps {
        let date = timestamp.date();
        if let Some((_, count)) = counts.iter_mut().find(|(day, _)| *day == date) {
            *count += 1;
        }
    }

    counts
}
