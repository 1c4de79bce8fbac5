//! The displayed week: navigation, loading and mutations.
//!
//! [`WeekBoard`] owns the grid of the week on screen. Every change to the
//! item list (a load, an add, an edit, a delete) re-runs [`assemble`] over
//! the full list, so the day columns are always freshly sorted before the
//! next layout.
//!
//! Loads are two-step: navigation hands out a [`LoadRequest`] tagged with
//! the week offset, and [`WeekBoard::apply_load`] drops any response whose
//! tag is no longer the displayed week.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::dates::{WeekDates, DAYS_IN_WEEK};
use super::grid::{assemble, RejectedItem, WeekGrid};
use super::navigator::{LoadRequest, WeekNavigator};
use crate::error::{RepoResult, Result};
use crate::layout::{ItemGeometry, OverlapLayoutEngine};
use crate::schedule::{ItemKind, ScheduledItem, Todo};
use crate::storage::ScheduleRepository;

/// What happened to a load response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The grid now shows the loaded items, minus the rejected ones
    Applied { rejected: Vec<RejectedItem> },
    /// The response was for a week no longer displayed and was dropped
    Stale { offset: i64 },
}

/// Owner of the week currently on screen.
#[derive(Debug, Clone)]
pub struct WeekBoard {
    navigator: WeekNavigator,
    items: Vec<ScheduledItem>,
    grid: WeekGrid,
    rejected: Vec<RejectedItem>,
}

impl WeekBoard {
    /// Board showing the navigator's week, with nothing loaded yet.
    ///
    /// # Errors
    /// Returns an error if the navigator's week is out of range.
    pub fn new(navigator: WeekNavigator) -> Result<Self> {
        let dates = navigator.dates()?;
        Ok(Self {
            navigator,
            items: Vec::new(),
            grid: WeekGrid::empty(dates),
            rejected: Vec::new(),
        })
    }

    pub fn navigator(&self) -> &WeekNavigator {
        &self.navigator
    }

    pub fn offset(&self) -> i64 {
        self.navigator.offset()
    }

    pub fn dates(&self) -> &WeekDates {
        self.grid.dates()
    }

    pub fn grid(&self) -> &WeekGrid {
        &self.grid
    }

    /// Items refused by the last assembly.
    pub fn rejected(&self) -> &[RejectedItem] {
        &self.rejected
    }

    pub fn layout_day(&self, engine: &OverlapLayoutEngine, day_index: usize) -> Vec<ItemGeometry<'_>> {
        self.grid.layout_day(engine, day_index)
    }

    pub fn layout_week(&self, engine: &OverlapLayoutEngine) -> [Vec<ItemGeometry<'_>>; DAYS_IN_WEEK] {
        self.grid.layout_week(engine)
    }

    /// Request a reload of the displayed week.
    pub fn request_load(&self) -> Result<LoadRequest> {
        Ok(self.navigator.reload()?)
    }

    /// Move forward one week and clear the grid until the new week loads.
    pub fn begin_next_week(&mut self) -> Result<LoadRequest> {
        let request = self.navigator.next_week()?;
        self.show_empty(request.dates);
        Ok(request)
    }

    /// Move back one week and clear the grid until the new week loads.
    pub fn begin_previous_week(&mut self) -> Result<LoadRequest> {
        let request = self.navigator.previous_week()?;
        self.show_empty(request.dates);
        Ok(request)
    }

    pub fn begin_jump_to_today(&mut self) -> Result<LoadRequest> {
        let request = self.navigator.jump_to_today()?;
        self.show_empty(request.dates);
        Ok(request)
    }

    pub fn begin_jump_to_date(&mut self, date: NaiveDate) -> Result<LoadRequest> {
        let request = self.navigator.jump_to_date(date)?;
        self.show_empty(request.dates);
        Ok(request)
    }

    /// Apply the repository's answer to `request`.
    ///
    /// # Errors
    /// A failed load for the displayed week is returned as
    /// [`CoreError::Repository`](crate::CoreError::Repository) and leaves
    /// the grid as it was.
    pub fn apply_load(
        &mut self,
        request: &LoadRequest,
        result: RepoResult<Vec<ScheduledItem>>,
    ) -> Result<LoadOutcome> {
        if !self.navigator.is_current(request) {
            log::debug!(
                "discarding stale load for week {} (showing {})",
                request.offset,
                self.navigator.offset()
            );
            return Ok(LoadOutcome::Stale {
                offset: request.offset,
            });
        }

        let items = result?;
        log::info!(
            "loaded {} items for {}",
            items.len(),
            request.dates.range_label()
        );
        self.grid = WeekGrid::empty(request.dates);
        self.items = items;
        self.reassemble();
        Ok(LoadOutcome::Applied {
            rejected: self.rejected.clone(),
        })
    }

    /// Reload the displayed week from `repo`.
    pub async fn refresh<R>(&mut self, repo: &R) -> Result<LoadOutcome>
    where
        R: ScheduleRepository + ?Sized,
    {
        let request = self.request_load()?;
        self.load(repo, request).await
    }

    pub async fn next_week<R>(&mut self, repo: &R) -> Result<LoadOutcome>
    where
        R: ScheduleRepository + ?Sized,
    {
        let request = self.begin_next_week()?;
        self.load(repo, request).await
    }

    pub async fn previous_week<R>(&mut self, repo: &R) -> Result<LoadOutcome>
    where
        R: ScheduleRepository + ?Sized,
    {
        let request = self.begin_previous_week()?;
        self.load(repo, request).await
    }

    pub async fn jump_to_today<R>(&mut self, repo: &R) -> Result<LoadOutcome>
    where
        R: ScheduleRepository + ?Sized,
    {
        let request = self.begin_jump_to_today()?;
        self.load(repo, request).await
    }

    pub async fn jump_to_date<R>(&mut self, repo: &R, date: NaiveDate) -> Result<LoadOutcome>
    where
        R: ScheduleRepository + ?Sized,
    {
        let request = self.begin_jump_to_date(date)?;
        self.load(repo, request).await
    }

    async fn load<R>(&mut self, repo: &R, request: LoadRequest) -> Result<LoadOutcome>
    where
        R: ScheduleRepository + ?Sized,
    {
        let (start, end) = request.range();
        let result = repo.scheduled_items(start, end).await;
        self.apply_load(&request, result)
    }

    /// Persist a new item and show it if it falls in the displayed week.
    ///
    /// # Errors
    /// Returns a validation error for a non-positive duration, or the
    /// repository's failure; the grid is unchanged in both cases.
    pub async fn add_item<R>(&mut self, repo: &R, item: ScheduledItem) -> Result<()>
    where
        R: ScheduleRepository + ?Sized,
    {
        item.validate()?;
        repo.add_scheduled_item(&item).await?;
        if self.dates().contains(item.day()) {
            self.items.push(item);
        }
        self.reassemble();
        Ok(())
    }

    /// Persist an edited item and re-sort its (old and new) columns.
    ///
    /// # Errors
    /// Returns a validation error for a non-positive duration, or the
    /// repository's failure; the grid is unchanged in both cases.
    pub async fn update_item<R>(&mut self, repo: &R, item: ScheduledItem) -> Result<()>
    where
        R: ScheduleRepository + ?Sized,
    {
        item.validate()?;
        repo.update_scheduled_item(&item).await?;
        self.items.retain(|existing| existing.id != item.id);
        if self.dates().contains(item.day()) {
            self.items.push(item);
        }
        self.reassemble();
        Ok(())
    }

    /// Delete an item from the repository and the grid.
    ///
    /// # Errors
    /// Returns the repository's failure; the grid is unchanged.
    pub async fn delete_item<R>(&mut self, repo: &R, item: &ScheduledItem) -> Result<()>
    where
        R: ScheduleRepository + ?Sized,
    {
        repo.delete_scheduled_item(item).await?;
        self.items.retain(|existing| existing.id != item.id);
        self.reassemble();
        Ok(())
    }

    /// Fetch the todo behind every task item in the grid, keyed by todo id.
    ///
    /// Task items whose todo has disappeared are left out.
    pub async fn resolve_todos<R>(&self, repo: &R) -> Result<HashMap<String, Todo>>
    where
        R: ScheduleRepository + ?Sized,
    {
        let mut todos = HashMap::new();
        for item in self.grid.items() {
            let ItemKind::Task { todo_id } = &item.kind else {
                continue;
            };
            if todos.contains_key(todo_id) {
                continue;
            }
            match repo.todo_by_id(todo_id).await? {
                Some(todo) => {
                    todos.insert(todo_id.clone(), todo);
                }
                None => log::debug!("task item {} points at missing todo {todo_id}", item.id),
            }
        }
        Ok(todos)
    }

    fn show_empty(&mut self, dates: WeekDates) {
        self.items.clear();
        self.rejected.clear();
        self.grid = WeekGrid::empty(dates);
    }

    fn reassemble(&mut self) {
        let assembly = assemble(*self.grid.dates(), self.items.iter().cloned());
        self.grid = assembly.grid;
        self.rejected = assembly.rejected;
    }
}
