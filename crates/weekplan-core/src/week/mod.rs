//! Week navigation, day-column assembly and the displayed week.

mod board;
mod dates;
mod grid;
mod navigator;

pub use board::{LoadOutcome, WeekBoard};
pub use dates::{
    dates_for_week, dates_for_week_starting, week_offset_of, FirstDay, WeekDates, DAYS_IN_WEEK,
};
pub use grid::{assemble, Assembly, RejectedItem, WeekGrid};
pub use navigator::{LoadRequest, WeekNavigator};
