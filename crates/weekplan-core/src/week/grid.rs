//! Bucketing a week's items into sorted day columns.

use serde::Serialize;

use super::dates::{WeekDates, DAYS_IN_WEEK};
use crate::error::ValidationError;
use crate::layout::{ItemGeometry, OverlapLayoutEngine};
use crate::schedule::ScheduledItem;

/// Seven day columns, each sorted ascending by start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGrid {
    dates: WeekDates,
    columns: [Vec<ScheduledItem>; DAYS_IN_WEEK],
}

/// An item assembly refused to place, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedItem {
    pub item_id: String,
    pub reason: ValidationError,
}

/// Result of [`assemble`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub grid: WeekGrid,
    pub rejected: Vec<RejectedItem>,
}

impl WeekGrid {
    /// A grid with no items.
    pub fn empty(dates: WeekDates) -> Self {
        Self {
            dates,
            columns: Default::default(),
        }
    }

    pub fn dates(&self) -> &WeekDates {
        &self.dates
    }

    /// Items of one day, sorted by start.
    ///
    /// Returns an empty slice for an index past the last day.
    pub fn column(&self, day_index: usize) -> &[ScheduledItem] {
        self.columns
            .get(day_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn columns(&self) -> &[Vec<ScheduledItem>; DAYS_IN_WEEK] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    pub fn find(&self, id: &str) -> Option<&ScheduledItem> {
        self.columns.iter().flatten().find(|item| item.id == id)
    }

    /// All items in day order, then start order.
    pub fn items(&self) -> impl Iterator<Item = &ScheduledItem> {
        self.columns.iter().flatten()
    }

    pub fn layout_day(&self, engine: &OverlapLayoutEngine, day_index: usize) -> Vec<ItemGeometry<'_>> {
        engine.layout(self.column(day_index))
    }

    pub fn layout_week(&self, engine: &OverlapLayoutEngine) -> [Vec<ItemGeometry<'_>>; DAYS_IN_WEEK] {
        std::array::from_fn(|day_index| self.layout_day(engine, day_index))
    }
}

/// Build the grid for `dates` from a flat list of items.
///
/// Items with a non-positive duration are reported in
/// [`Assembly::rejected`]; items starting outside the week are dropped.
/// Each column is stable-sorted by start, so items with equal starts keep
/// their input order.
pub fn assemble<I>(dates: WeekDates, items: I) -> Assembly
where
    I: IntoIterator<Item = ScheduledItem>,
{
    let mut grid = WeekGrid::empty(dates);
    let mut rejected = Vec::new();

    for item in items {
        if let Err(reason) = item.validate() {
            log::warn!("rejecting scheduled item {}: {reason}", item.id);
            rejected.push(RejectedItem {
                item_id: item.id,
                reason,
            });
            continue;
        }
        match dates.index_of(item.day()) {
            Some(day_index) => grid.columns[day_index].push(item),
            None => log::debug!(
                "dropping scheduled item {} on {}: outside {}",
                item.id,
                item.day(),
                dates.range_label()
            ),
        }
    }

    for column in &mut grid.columns {
        column.sort_by_key(|item| item.start);
    }

    Assembly { grid, rejected }
}
