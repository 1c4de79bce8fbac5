//! Calendar arithmetic for the displayed week.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::ValidationError;

pub const DAYS_IN_WEEK: usize = 7;

/// Weekday a displayed week starts on.
///
/// Deserializes through [`FromStr`](std::str::FromStr), so config values
/// accept any case and the three-letter abbreviations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FirstDay {
    #[default]
    Monday,
    Sunday,
    Saturday,
}

impl FirstDay {
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
            Self::Saturday => Weekday::Sat,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Sunday => "sunday",
            Self::Saturday => "saturday",
        }
    }

    /// Days between the start of the week and `date`, in `0..7`.
    fn days_into_week(self, date: NaiveDate) -> u64 {
        let from = self.weekday().num_days_from_monday();
        let to = date.weekday().num_days_from_monday();
        u64::from((7 + to - from) % 7)
    }
}

impl std::str::FromStr for FirstDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "sunday" | "sun" => Ok(Self::Sunday),
            "saturday" | "sat" => Ok(Self::Saturday),
            _ => Err(ValidationError::InvalidValue {
                field: "first_day".to_string(),
                message: format!("expected monday, sunday or saturday, got '{s}'"),
            }),
        }
    }
}

impl TryFrom<String> for FirstDay {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// The seven consecutive dates of one displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekDates([NaiveDate; DAYS_IN_WEEK]);

impl WeekDates {
    /// Week starting on `first`.
    ///
    /// Returns `None` if the week runs past the end of the calendar.
    pub fn starting(first: NaiveDate) -> Option<Self> {
        first.checked_add_days(Days::new(6))?;
        let mut days = [first; DAYS_IN_WEEK];
        for (slot, day) in days.iter_mut().zip(first.iter_days()) {
            *slot = day;
        }
        Some(Self(days))
    }

    pub fn first(&self) -> NaiveDate {
        self.0[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.0[DAYS_IN_WEEK - 1]
    }

    pub fn days(&self) -> &[NaiveDate; DAYS_IN_WEEK] {
        &self.0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }

    /// Column index of `date`, if it is shown.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if date < self.first() || date > self.last() {
            return None;
        }
        usize::try_from((date - self.first()).num_days()).ok()
    }

    /// Column headers, e.g. `Mon 19 Oct`.
    pub fn day_labels(&self) -> [String; DAYS_IN_WEEK] {
        self.0.map(|d| d.format("%a %-d %b").to_string())
    }

    /// Title for the whole week, e.g. `19 Oct - 25 Oct 2026`.
    pub fn range_label(&self) -> String {
        let (first, last) = (self.first(), self.last());
        if first.year() == last.year() {
            format!("{} - {}", first.format("%-d %b"), last.format("%-d %b %Y"))
        } else {
            format!("{} - {}", first.format("%-d %b %Y"), last.format("%-d %b %Y"))
        }
    }
}

impl Index<usize> for WeekDates {
    type Output = NaiveDate;

    fn index(&self, index: usize) -> &NaiveDate {
        &self.0[index]
    }
}

/// Dates of the Monday-first week `offset` weeks away from the week
/// containing `today`.
///
/// # Errors
/// Returns [`ValidationError::DateOutOfRange`] if the week falls outside the
/// supported calendar.
pub fn dates_for_week(offset: i64, today: NaiveDate) -> Result<WeekDates, ValidationError> {
    dates_for_week_starting(offset, today, FirstDay::Monday)
}

/// Like [`dates_for_week`] with a configurable first weekday.
///
/// # Errors
/// Returns [`ValidationError::DateOutOfRange`] if the week falls outside the
/// supported calendar.
pub fn dates_for_week_starting(
    offset: i64,
    today: NaiveDate,
    first_day: FirstDay,
) -> Result<WeekDates, ValidationError> {
    let out_of_range = || ValidationError::DateOutOfRange { offset, today };

    let this_week = today
        .checked_sub_days(Days::new(first_day.days_into_week(today)))
        .ok_or_else(out_of_range)?;
    let shift = offset.checked_mul(7).ok_or_else(out_of_range)?;
    let start = if shift >= 0 {
        this_week.checked_add_days(Days::new(shift.unsigned_abs()))
    } else {
        this_week.checked_sub_days(Days::new(shift.unsigned_abs()))
    }
    .ok_or_else(out_of_range)?;

    WeekDates::starting(start).ok_or_else(out_of_range)
}

/// Offset of the week containing `date`, relative to the week containing
/// `today`.
pub fn week_offset_of(date: NaiveDate, today: NaiveDate, first_day: FirstDay) -> i64 {
    let anchor = |d: NaiveDate| {
        d.checked_sub_days(Days::new(first_day.days_into_week(d)))
            .unwrap_or(NaiveDate::MIN)
    };
    (anchor(date) - anchor(today)).num_days().div_euclid(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_week_contains_today_and_starts_monday() {
        let today = date(2026, 10, 22); // Thursday
        let week = dates_for_week(0, today).unwrap();
        assert!(week.contains(today));
        assert_eq!(week.first(), date(2026, 10, 19));
        assert_eq!(week.last(), date(2026, 10, 25));
        assert_eq!(week.first().weekday(), Weekday::Mon);
        assert_eq!(week.index_of(today), Some(3));
    }

    #[test]
    fn today_on_first_weekday() {
        let monday = date(2026, 10, 19);
        assert_eq!(dates_for_week(0, monday).unwrap().first(), monday);
        let sunday = date(2026, 10, 25);
        assert_eq!(dates_for_week(0, sunday).unwrap().first(), monday);
    }

    #[test]
    fn offsets_shift_by_whole_weeks() {
        let today = date(2026, 12, 30);
        let this = dates_for_week(0, today).unwrap();
        let next = dates_for_week(1, today).unwrap();
        let prev = dates_for_week(-1, today).unwrap();
        for i in 0..DAYS_IN_WEEK {
            assert_eq!(next[i] - this[i], chrono::Duration::days(7));
            assert_eq!(this[i] - prev[i], chrono::Duration::days(7));
        }
        assert_eq!(next.first(), date(2027, 1, 4));
    }

    #[test]
    fn sunday_first_weeks() {
        let today = date(2026, 10, 19); // Monday
        let week = dates_for_week_starting(0, today, FirstDay::Sunday).unwrap();
        assert_eq!(week.first(), date(2026, 10, 18));
        assert_eq!(week.first().weekday(), Weekday::Sun);
        assert!(week.contains(today));
    }

    #[test]
    fn across_dst_change_days_stay_consecutive() {
        // Europe moves clocks on 2026-10-25; dates are calendar days.
        let week = dates_for_week(0, date(2026, 10, 25)).unwrap();
        for pair in week.days().windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
        }
    }

    #[test]
    fn out_of_range_offsets_are_errors() {
        let today = date(2026, 10, 19);
        assert_eq!(
            dates_for_week(i64::MAX, today).unwrap_err(),
            ValidationError::DateOutOfRange {
                offset: i64::MAX,
                today
            }
        );
        assert!(dates_for_week(-100_000_000, today).is_err());
    }

    #[test]
    fn labels() {
        let week = dates_for_week(0, date(2026, 10, 19)).unwrap();
        assert_eq!(week.day_labels()[0], "Mon 19 Oct");
        assert_eq!(week.day_labels()[6], "Sun 25 Oct");
        assert_eq!(week.range_label(), "19 Oct - 25 Oct 2026");

        let week = dates_for_week(0, date(2026, 12, 31)).unwrap();
        assert_eq!(week.range_label(), "28 Dec 2026 - 3 Jan 2027");
    }

    #[test]
    fn index_outside_week() {
        let week = dates_for_week(0, date(2026, 10, 19)).unwrap();
        assert_eq!(week.index_of(date(2026, 10, 18)), None);
        assert_eq!(week.index_of(date(2026, 10, 26)), None);
    }

    #[test]
    fn offset_of_date() {
        let today = date(2026, 10, 21);
        assert_eq!(week_offset_of(date(2026, 10, 19), today, FirstDay::Monday), 0);
        assert_eq!(week_offset_of(date(2026, 10, 26), today, FirstDay::Monday), 1);
        assert_eq!(week_offset_of(date(2026, 10, 18), today, FirstDay::Monday), -1);
        assert_eq!(week_offset_of(date(2026, 10, 18), today, FirstDay::Sunday), 0);
    }

    #[test]
    fn first_day_parsing() {
        assert_eq!("Sunday".parse::<FirstDay>().unwrap(), FirstDay::Sunday);
        assert_eq!("mon".parse::<FirstDay>().unwrap(), FirstDay::Monday);
        assert!("friday".parse::<FirstDay>().is_err());
    }
}
