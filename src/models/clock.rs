//! Review clock: wall time shifted by a whole number of days so the user can
//! step ahead and see which cards come due.
use chrono::{DateTime, TimeDelta, Utc};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReviewClock {
    pub offset_days: i64,
}

impl ReviewClock {
    pub fn new(offset_days: i64) -> Self {
        Self { offset_days }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.at(Utc::now())
    }

    /// Applies the offset to a given wall-clock instant.
    pub fn at(&self, wall: DateTime<Utc>) -> DateTime<Utc> {
        match TimeDelta::try_days(self.offset_days).and_then(|offset| wall.checked_add_signed(offset)) {
            Some(shifted) => shifted,
            None => {
                tracing::warn!(offset_days = self.offset_days, "review clock offset out of range, using wall time");
                wall
            }
        }
    }

    pub fn advanced(self) -> Self {
        Self {
            offset_days: self.offset_days.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offset_applies_whole_days() {
        let wall = Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap();
        let clock = ReviewClock::default().advanced().advanced();

        assert_eq!(clock.offset_days, 2);
        assert_eq!(clock.at(wall), Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_default_clock_is_wall_time() {
        let wall = Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap();
        assert_eq!(ReviewClock::default().at(wall), wall);
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_wall_time() {
        let wall = Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap();
        assert_eq!(ReviewClock::new(i64::MAX).at(wall), wall);
        assert_eq!(ReviewClock::new(500_000_000).at(wall), wall);
    }
}
