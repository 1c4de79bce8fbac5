pub mod config;
pub mod item;
pub mod todo;
pub mod week;

use chrono::{Local, NaiveDate, NaiveDateTime};
use weekplan_core::{Config, ScheduleDb, WeekBoard};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

const START_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn runtime() -> CliResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

pub fn open_db() -> CliResult<ScheduleDb> {
    Ok(ScheduleDb::open()?)
}

/// Parse `YYYY-MM-DDTHH:MM`.
pub fn parse_start(text: &str) -> CliResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, START_FORMAT)
        .map_err(|e| format!("invalid start '{text}' (expected YYYY-MM-DDTHH:MM): {e}").into())
}

pub fn parse_date(text: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{text}' (expected YYYY-MM-DD): {e}").into())
}

/// Board positioned on `date`'s week, or `offset` weeks from today.
pub fn board_for(config: &Config, offset: i64, date: Option<NaiveDate>) -> CliResult<WeekBoard> {
    let mut navigator = config.navigator(today());
    match date {
        Some(date) => navigator.jump_to_date(date)?,
        None => navigator.go_to(offset)?,
    };
    Ok(WeekBoard::new(navigator)?)
}
