//! Repository interfaces for scheduled items and todos.
//!
//! Loads and mutations are asynchronous and may fail; callers get the
//! failure back as a [`RepositoryError`] and decide what to do with it.
//! Implementations do not retry.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::RepoResult;
use crate::schedule::{ScheduledItem, Todo};

/// Storage for the items shown on the week grid.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Items starting on any day in `week_start..=week_end`.
    async fn scheduled_items(
        &self,
        week_start: NaiveDate,
        week_end: NaiveDate,
    ) -> RepoResult<Vec<ScheduledItem>>;

    /// Insert a new item. Fails with `Conflict` if the id is taken.
    async fn add_scheduled_item(&self, item: &ScheduledItem) -> RepoResult<()>;

    /// Replace an existing item. Fails with `NotFound` if it does not exist.
    async fn update_scheduled_item(&self, item: &ScheduledItem) -> RepoResult<()>;

    /// Remove an item. Fails with `NotFound` if it does not exist.
    async fn delete_scheduled_item(&self, item: &ScheduledItem) -> RepoResult<()>;

    /// Fresh unique id for a new item or todo.
    fn new_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Todo referenced by a task item, if it still exists.
    async fn todo_by_id(&self, id: &str) -> RepoResult<Option<Todo>>;
}

/// Storage for todos.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn add_todo(&self, todo: &Todo) -> RepoResult<()>;

    async fn update_todo(&self, todo: &Todo) -> RepoResult<()>;

    /// All todos, oldest first.
    async fn list_todos(&self) -> RepoResult<Vec<Todo>>;
}
