use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimError};
use crate::types::Timebase;

/// external date format used by settings files and account charts
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// parse an external `%m/%d/%Y` date string
pub fn parse_mdy(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| SimError::InvalidDate {
        value: value.to_string(),
    })
}

/// walk calendar days from `start` (inclusive) to `end` (exclusive)
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day < end)
}

/// Calendar increment between recurring due dates.
///
/// Month steps clamp at month ends (Jan 31 + 1 month = Feb 28/29), matching
/// civil-calendar billing cycles rather than fixed day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStep {
    pub timebase: Timebase,
    pub frequency: u32,
}

impl TimeStep {
    pub fn new(timebase: Timebase, frequency: u32) -> Self {
        Self { timebase, frequency }
    }

    /// next due date after `date`
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        match self.timebase {
            Timebase::Weeks => date + Days::new(7 * u64::from(self.frequency)),
            Timebase::Months => date + Months::new(self.frequency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_mdy() {
        assert_eq!(parse_mdy("01/15/2026").unwrap(), d(2026, 1, 15));
        assert_eq!(parse_mdy(" 12/01/2026 ").unwrap(), d(2026, 12, 1));
        assert!(parse_mdy("2026-01-15").is_err());
    }

    #[test]
    fn test_date_range_is_end_exclusive() {
        let days: Vec<NaiveDate> = date_range(d(2026, 1, 1), d(2026, 1, 11)).collect();
        assert_eq!(days.len(), 10);
        assert_eq!(days[0], d(2026, 1, 1));
        assert_eq!(days[9], d(2026, 1, 10));
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(date_range(d(2026, 1, 1), d(2026, 1, 1)).count(), 0);
    }

    #[test]
    fn test_month_step_clamps_at_month_end() {
        let step = TimeStep::new(Timebase::Months, 1);
        assert_eq!(step.advance(d(2026, 1, 31)), d(2026, 2, 28));
        assert_eq!(step.advance(d(2024, 1, 31)), d(2024, 2, 29));
    }

    #[test]
    fn test_week_step_honors_frequency() {
        let step = TimeStep::new(Timebase::Weeks, 2);
        assert_eq!(step.advance(d(2026, 1, 1)), d(2026, 1, 15));
    }

    #[test]
    fn test_multi_month_step() {
        let step = TimeStep::new(Timebase::Months, 3);
        assert_eq!(step.advance(d(2026, 11, 15)), d(2027, 2, 15));
    }
}
