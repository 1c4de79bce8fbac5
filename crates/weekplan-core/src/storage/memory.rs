//! In-memory repository, for tests and embedding.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::repository::{ScheduleRepository, TodoRepository};
use crate::error::{RepoResult, RepositoryError};
use crate::schedule::{ScheduledItem, Todo};

/// Repository that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    items: RwLock<BTreeMap<String, ScheduledItem>>,
    todos: RwLock<BTreeMap<String, Todo>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `items`.
    ///
    /// Items are stored as given, without validation, the way a remote store
    /// may hand back rows that predate current rules.
    pub fn with_items(items: impl IntoIterator<Item = ScheduledItem>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        Self {
            items: RwLock::new(items),
            todos: RwLock::default(),
        }
    }
}

#[async_trait]
impl ScheduleRepository for MemoryRepository {
    async fn scheduled_items(
        &self,
        week_start: NaiveDate,
        week_end: NaiveDate,
    ) -> RepoResult<Vec<ScheduledItem>> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .filter(|item| (week_start..=week_end).contains(&item.day()))
            .cloned()
            .collect())
    }

    async fn add_scheduled_item(&self, item: &ScheduledItem) -> RepoResult<()> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(RepositoryError::Conflict {
                entity: "scheduled item",
                id: item.id.clone(),
            });
        }
        items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update_scheduled_item(&self, item: &ScheduledItem) -> RepoResult<()> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.id) {
            Some(slot) => {
                *slot = item.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: "scheduled item",
                id: item.id.clone(),
            }),
        }
    }

    async fn delete_scheduled_item(&self, item: &ScheduledItem) -> RepoResult<()> {
        self.items
            .write()
            .await
            .remove(&item.id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "scheduled item",
                id: item.id.clone(),
            })
    }

    async fn todo_by_id(&self, id: &str) -> RepoResult<Option<Todo>> {
        Ok(self.todos.read().await.get(id).cloned())
    }
}

#[async_trait]
impl TodoRepository for MemoryRepository {
    async fn add_todo(&self, todo: &Todo) -> RepoResult<()> {
        let mut todos = self.todos.write().await;
        if todos.contains_key(&todo.id) {
            return Err(RepositoryError::Conflict {
                entity: "todo",
                id: todo.id.clone(),
            });
        }
        todos.insert(todo.id.clone(), todo.clone());
        Ok(())
    }

    async fn update_todo(&self, todo: &Todo) -> RepoResult<()> {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&todo.id) {
            Some(slot) => {
                *slot = todo.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: "todo",
                id: todo.id.clone(),
            }),
        }
    }

    async fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        let mut todos: Vec<_> = self.todos.read().await.values().cloned().collect();
        todos.sort_by_key(|t| t.created_at);
        Ok(todos)
    }
}
