//! # Weekplan Core Library
//!
//! This library provides the core logic for the weekplan weekly schedule.
//! It follows a CLI-first philosophy: everything the board can do is
//! available through the standalone `weekplan` binary, which is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Schedule**: scheduled items (events and todo-backed tasks) and todos
//! - **Week**: week date ranges, navigation with stale-load protection, and
//!   assembly of items into sorted day columns
//! - **Layout**: the overlap layout engine that assigns each item of a day
//!   column a width fraction, horizontal offset and vertical extent
//! - **Storage**: SQLite-backed repository and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`OverlapLayoutEngine`]: side-by-side placement of overlapping items
//! - [`WeekNavigator`]: week offset state and tagged load requests
//! - [`WeekBoard`]: the displayed week, kept consistent across loads and edits
//! - [`ScheduleRepository`]: async persistence seam
//! - [`Config`]: application configuration management

pub mod error;
pub mod layout;
pub mod schedule;
pub mod storage;
pub mod week;

pub use error::{ConfigError, CoreError, RepositoryError, ValidationError};
pub use layout::{ItemGeometry, OverlapLayoutEngine, RowScale};
pub use schedule::{ItemKind, ScheduledItem, Todo};
pub use storage::{Config, MemoryRepository, ScheduleDb, ScheduleRepository, TodoRepository};
pub use week::{
    assemble, dates_for_week, FirstDay, LoadOutcome, LoadRequest, WeekBoard, WeekDates, WeekGrid,
    WeekNavigator,
};
