//! Mapping from clock time to vertical row units.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Row units per hour used when nothing else is configured.
pub const DEFAULT_ROW_UNITS_PER_HOUR: f64 = 50.0;

/// Vertical scale of a day column.
///
/// One hour of the 24-hour day spans `units_per_hour` row units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowScale {
    pub units_per_hour: f64,
}

impl RowScale {
    pub fn new(units_per_hour: f64) -> Self {
        Self { units_per_hour }
    }

    /// Distance from midnight to `start`.
    pub fn offset_of(&self, start: NaiveDateTime) -> f64 {
        let hour = f64::from(start.hour());
        let minute = f64::from(start.minute());
        hour * self.units_per_hour + (minute / 60.0) * self.units_per_hour
    }

    /// Extent of an interval lasting `duration_minutes`.
    pub fn height_of(&self, duration_minutes: f64) -> f64 {
        (duration_minutes / 60.0) * self.units_per_hour
    }
}

impl Default for RowScale {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_UNITS_PER_HOUR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn offset_counts_hours_and_minutes() {
        let scale = RowScale::default();
        assert_eq!(scale.offset_of(at(0, 0)), 0.0);
        assert_eq!(scale.offset_of(at(3, 0)), 150.0);
        assert_eq!(scale.offset_of(at(3, 30)), 175.0);
        assert_eq!(scale.offset_of(at(23, 0)), 1150.0);
    }

    #[test]
    fn heights_for_reference_durations() {
        let scale = RowScale::default();
        assert_eq!(scale.height_of(60.0), 50.0);
        assert_eq!(scale.height_of(120.0), 100.0);
        assert_eq!(scale.height_of(150.0), 125.0);
    }

    #[test]
    fn custom_scale_applies_uniformly() {
        let scale = RowScale::new(60.0);
        assert_eq!(scale.offset_of(at(1, 15)), 75.0);
        assert_eq!(scale.height_of(45.0), 45.0);
    }
}
