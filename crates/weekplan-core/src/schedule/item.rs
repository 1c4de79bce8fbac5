//! Scheduled item types and utilities.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What a scheduled item points at.
///
/// Tasks reference a todo kept by the repository; events carry their own
/// free-text description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemKind {
    Task { todo_id: String },
    Event { description: String },
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task { .. } => "task",
            Self::Event { .. } => "event",
        }
    }

    /// Todo id or event description, whichever this kind carries.
    pub fn payload(&self) -> &str {
        match self {
            Self::Task { todo_id } => todo_id,
            Self::Event { description } => description,
        }
    }

    /// Rebuild a kind from its stored tag and payload.
    pub fn from_parts(kind: &str, payload: String) -> Option<Self> {
        match kind {
            "task" => Some(Self::Task { todo_id: payload }),
            "event" => Some(Self::Event {
                description: payload,
            }),
            _ => None,
        }
    }
}

/// A task or event occupying a time interval on one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub id: String,
    #[serde(flatten)]
    pub kind: ItemKind,
    /// Local wall-clock start, minute resolution
    pub start: NaiveDateTime,
    pub duration_millis: i64,
    pub owner_id: String,
    pub display_name: String,
}

impl ScheduledItem {
    /// Create a new scheduled item.
    ///
    /// The start is truncated to the minute.
    ///
    /// # Errors
    /// Returns an error if `duration_millis <= 0` or the end of the interval
    /// does not fit in the calendar.
    pub fn try_new(
        id: impl Into<String>,
        kind: ItemKind,
        start: NaiveDateTime,
        duration_millis: i64,
        owner_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let item = Self {
            id: id.into(),
            kind,
            start: truncate_to_minute(start),
            duration_millis,
            owner_id: owner_id.into(),
            display_name: display_name.into(),
        };
        item.validate()?;
        Ok(item)
    }

    /// Check the positive-duration invariant.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duration_millis <= 0 {
            return Err(ValidationError::NonPositiveDuration {
                id: self.id.clone(),
                duration_millis: self.duration_millis,
            });
        }
        if self
            .start
            .checked_add_signed(Duration::milliseconds(self.duration_millis))
            .is_none()
        {
            return Err(ValidationError::EndOutOfRange {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// End of the interval, saturating at the last representable instant.
    pub fn end(&self) -> NaiveDateTime {
        self.start
            .checked_add_signed(Duration::milliseconds(self.duration_millis))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Calendar day the item is shown on.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Duration in (possibly fractional) minutes.
    pub fn duration_minutes(&self) -> f64 {
        self.duration_millis as f64 / 60_000.0
    }

    /// Move the item to a new start, keeping its duration
    pub fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.start = truncate_to_minute(start);
        self
    }

    /// Set the duration in whole minutes
    pub fn with_duration_minutes(mut self, minutes: i64) -> Self {
        self.duration_millis = minutes.saturating_mul(60_000);
        self
    }

    /// Rename the item
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(id: &str, start: NaiveDateTime, minutes: i64) -> ScheduledItem {
        ScheduledItem::try_new(
            id,
            ItemKind::Event {
                description: String::new(),
            },
            start,
            minutes * 60_000,
            "owner",
            id,
        )
        .unwrap()
    }

    #[test]
    fn try_new_rejects_zero_and_negative_durations() {
        for millis in [0, -1, -60_000] {
            let err = ScheduledItem::try_new(
                "bad",
                ItemKind::Event {
                    description: String::new(),
                },
                at(9, 0),
                millis,
                "owner",
                "Bad",
            )
            .unwrap_err();
            assert_eq!(
                err,
                ValidationError::NonPositiveDuration {
                    id: "bad".to_string(),
                    duration_millis: millis,
                }
            );
        }
    }

    #[test]
    fn start_is_truncated_to_the_minute() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_milli_opt(9, 15, 42, 500)
            .unwrap();
        let item = event("a", start, 30);
        assert_eq!(item.start, at(9, 15));
    }

    #[test]
    fn end_and_duration() {
        let item = event("a", at(23, 30), 90);
        assert_eq!(item.end(), at(23, 30) + Duration::minutes(90));
        assert_eq!(item.duration_minutes(), 90.0);
        assert_eq!(item.day(), at(0, 0).date());
    }

    #[test]
    fn kind_serializes_as_tag_with_payload() {
        let item = ScheduledItem::try_new(
            "t1",
            ItemKind::Task {
                todo_id: "todo-7".to_string(),
            },
            at(8, 0),
            1_800_000,
            "owner",
            "Read chapter 3",
        )
        .unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "task");
        assert_eq!(json["todo_id"], "todo-7");

        let decoded: ScheduledItem = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, item);
    }

    #[test]
    fn kind_from_parts() {
        assert_eq!(
            ItemKind::from_parts("event", "Lab".to_string()),
            Some(ItemKind::Event {
                description: "Lab".to_string()
            })
        );
        assert_eq!(ItemKind::from_parts("meeting", String::new()), None);
    }
}
