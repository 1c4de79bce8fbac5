//! Week-by-week navigation.

use chrono::NaiveDate;
use serde::Serialize;

use super::dates::{dates_for_week_starting, week_offset_of, FirstDay, WeekDates};
use crate::error::ValidationError;

/// A pending load of one week's items.
///
/// Tagged with the offset it was issued for, so a response that arrives after
/// the user has moved on can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadRequest {
    pub offset: i64,
    pub dates: WeekDates,
}

impl LoadRequest {
    /// Inclusive date range to ask the repository for.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.dates.first(), self.dates.last())
    }
}

/// Tracks which week is displayed, relative to the week containing `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekNavigator {
    today: NaiveDate,
    first_day: FirstDay,
    offset: i64,
}

impl WeekNavigator {
    /// Navigator showing the current week, Monday first.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            first_day: FirstDay::default(),
            offset: 0,
        }
    }

    pub fn with_first_day(mut self, first_day: FirstDay) -> Self {
        self.first_day = first_day;
        self
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn first_day(&self) -> FirstDay {
        self.first_day
    }

    /// Dates of the displayed week.
    ///
    /// # Errors
    /// Returns an error if the offset has left the supported calendar.
    pub fn dates(&self) -> Result<WeekDates, ValidationError> {
        dates_for_week_starting(self.offset, self.today, self.first_day)
    }

    /// Request for the displayed week, without moving.
    ///
    /// # Errors
    /// Returns an error if the offset has left the supported calendar.
    pub fn reload(&self) -> Result<LoadRequest, ValidationError> {
        Ok(LoadRequest {
            offset: self.offset,
            dates: self.dates()?,
        })
    }

    /// Move one week forward.
    ///
    /// # Errors
    /// Returns an error and stays put if the next week is out of range.
    pub fn next_week(&mut self) -> Result<LoadRequest, ValidationError> {
        self.go_to(self.offset.saturating_add(1))
    }

    /// Move one week back.
    ///
    /// # Errors
    /// Returns an error and stays put if the previous week is out of range.
    pub fn previous_week(&mut self) -> Result<LoadRequest, ValidationError> {
        self.go_to(self.offset.saturating_sub(1))
    }

    /// Go back to the week containing today.
    pub fn jump_to_today(&mut self) -> Result<LoadRequest, ValidationError> {
        self.go_to(0)
    }

    /// Show the week containing `date`.
    ///
    /// # Errors
    /// Returns an error if that week is out of range.
    pub fn jump_to_date(&mut self, date: NaiveDate) -> Result<LoadRequest, ValidationError> {
        self.go_to(week_offset_of(date, self.today, self.first_day))
    }

    /// Show the week `offset` weeks from the current one.
    ///
    /// # Errors
    /// Returns an error and stays put if that week is out of range.
    pub fn go_to(&mut self, offset: i64) -> Result<LoadRequest, ValidationError> {
        let dates = dates_for_week_starting(offset, self.today, self.first_day)?;
        self.offset = offset;
        Ok(LoadRequest { offset, dates })
    }

    /// Whether a response to `request` still belongs to the displayed week.
    pub fn is_current(&self, request: &LoadRequest) -> bool {
        request.offset == self.offset
    }
}
