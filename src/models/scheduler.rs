//! Simplified SM-2 spaced repetition scheduler.
//!
//! Each card carries an ease factor and a count of consecutive successful
//! recalls. After a review:
//! - Fail resets the repetition count and brings the card back tomorrow
//! - Good and Easy grow the count, adjust the ease factor (never below 1.3)
//!   and push the card out by 1 day, then 4 days, then a growing interval
//!
//! The function is pure: `now` is an argument and the input card is left as is.

use super::{Card, ReviewQuality};
use crate::error::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

const RELEARN_INTERVAL_DAYS: i64 = 1;
const FIRST_INTERVAL_DAYS: i64 = 1;
const SECOND_INTERVAL_DAYS: i64 = 4;
const INTERVAL_MULTIPLIER: f64 = 2.5;

/// Returns the card's state after a review graded `quality` at `now`.
///
/// Rejects cards whose ease factor is below the minimum or not finite.
pub fn compute_next_review(card: &Card, quality: ReviewQuality, now: DateTime<Utc>) -> Result<Card> {
    card.validate_schedule()?;

    let mut next = card.clone();
    next.last_reviewed_at = Some(now);

    if !quality.is_success() {
        next.repetition_count = 0;
        next.next_review_at = add_days(now, RELEARN_INTERVAL_DAYS)?;
        return Ok(next);
    }

    let q = quality.ordinal() as f64;
    let delta = 0.1 - (2.0 - q) * (0.08 + (2.0 - q) * 0.02);
    let ease_factor = (card.ease_factor + delta).max(MIN_EASE_FACTOR);

    let repetition_count = card.repetition_count.saturating_add(1);
    // The growth formula multiplies by the count before this review.
    let interval_days = match repetition_count {
        1 => FIRST_INTERVAL_DAYS,
        2 => SECOND_INTERVAL_DAYS,
        _ => (card.repetition_count as f64 * ease_factor * INTERVAL_MULTIPLIER).round() as i64,
    };

    next.repetition_count = repetition_count;
    next.ease_factor = ease_factor;
    next.next_review_at = add_days(now, interval_days.max(1))?;
    Ok(next)
}

/// Interval in days each grade would produce, in `ReviewQuality::ALL` order.
pub fn preview_intervals(card: &Card, now: DateTime<Utc>) -> Result<[i64; 3]> {
    let mut intervals = [0; 3];
    for (slot, quality) in intervals.iter_mut().zip(ReviewQuality::ALL) {
        let next = compute_next_review(card, quality, now)?;
        *slot = (next.next_review_at - now).num_days();
    }
    Ok(intervals)
}

/// Compact label for an interval, e.g. `4d`, `2w`, `3mo`.
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

fn add_days(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    TimeDelta::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or(Error::ScheduleOverflow(days))
}
