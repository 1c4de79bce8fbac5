//! SQLite-backed repository for scheduled items and todos.
//!
//! Stored at `~/.config/weekplan/weekplan.db` next to the config file.
//! Timestamps are local wall-clock times in `YYYY-MM-DDTHH:MM:SS` form so
//! that text order matches time order.

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::data_dir;
use super::migrations;
use super::repository::{ScheduleRepository, TodoRepository};
use crate::error::{RepoResult, RepositoryError};
use crate::schedule::{ItemKind, ScheduledItem, Todo};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(idx: usize, text: &str) -> Result<NaiveDateTime, rusqlite::Error> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_scheduled_item(row: &rusqlite::Row) -> Result<ScheduledItem, rusqlite::Error> {
    let kind: String = row.get(1)?;
    let payload: String = row.get(2)?;
    let start: String = row.get(3)?;
    let kind = ItemKind::from_parts(&kind, payload).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            Type::Text,
            format!("unknown item kind '{kind}'").into(),
        )
    })?;

    Ok(ScheduledItem {
        id: row.get(0)?,
        kind,
        start: parse_timestamp(3, &start)?,
        duration_millis: row.get(4)?,
        owner_id: row.get(5)?,
        display_name: row.get(6)?,
    })
}

fn row_to_todo(row: &rusqlite::Row) -> Result<Todo, rusqlite::Error> {
    let due: Option<String> = row.get(3)?;
    let created_at: String = row.get(6)?;
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due: due.map(|d| parse_timestamp(3, &d)).transpose()?,
        done: row.get(4)?,
        owner_id: row.get(5)?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
    })
}

/// SQLite implementation of [`ScheduleRepository`] and [`TodoRepository`].
#[derive(Debug)]
pub struct ScheduleDb {
    conn: Mutex<Connection>,
}

impl ScheduleDb {
    /// Open the schedule database at `~/.config/weekplan/weekplan.db`.
    ///
    /// Creates tables if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unusable or the database
    /// cannot be opened or migrated.
    pub fn open() -> RepoResult<Self> {
        let dir = data_dir().map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        Self::open_at(dir.join("weekplan.db"))
    }

    /// Open (or create) a database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| RepositoryError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if migrations fail.
    pub fn open_memory() -> RepoResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> RepoResult<Self> {
        migrations::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepositoryError::Unavailable("database mutex poisoned".to_string()))
    }

    /// Look up one item by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get_scheduled_item(&self, id: &str) -> RepoResult<Option<ScheduledItem>> {
        let conn = self.conn()?;
        let item = conn
            .query_row(
                "SELECT id, kind, payload, start_at, duration_millis, owner_id, display_name
                 FROM scheduled_items WHERE id = ?1",
                params![id],
                row_to_scheduled_item,
            )
            .optional()?;
        Ok(item)
    }

    fn list_between(&self, from: NaiveDateTime, until: Option<NaiveDateTime>) -> RepoResult<Vec<ScheduledItem>> {
        let conn = self.conn()?;
        let from = format_timestamp(from);
        let items = match until {
            Some(until) => {
                let mut stmt = conn.prepare(
                    "SELECT id, kind, payload, start_at, duration_millis, owner_id, display_name
                     FROM scheduled_items
                     WHERE start_at >= ?1 AND start_at < ?2
                     ORDER BY start_at, rowid",
                )?;
                let rows = stmt.query_map(params![from, format_timestamp(until)], row_to_scheduled_item)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, kind, payload, start_at, duration_millis, owner_id, display_name
                     FROM scheduled_items
                     WHERE start_at >= ?1
                     ORDER BY start_at, rowid",
                )?;
                let rows = stmt.query_map(params![from], row_to_scheduled_item)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(items)
    }

    fn require_changed(changed: usize, entity: &'static str, id: &str) -> RepoResult<()> {
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn map_insert_error(err: rusqlite::Error, entity: &'static str, id: &str) -> RepositoryError {
        match &err {
            rusqlite::Error::SqliteFailure(code, _)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                RepositoryError::Conflict {
                    entity,
                    id: id.to_string(),
                }
            }
            _ => err.into(),
        }
    }
}

#[async_trait]
impl ScheduleRepository for ScheduleDb {
    async fn scheduled_items(
        &self,
        week_start: NaiveDate,
        week_end: NaiveDate,
    ) -> RepoResult<Vec<ScheduledItem>> {
        let from = week_start.and_time(chrono::NaiveTime::MIN);
        // Exclusive bound: midnight after the last day.
        let until = week_end
            .checked_add_days(Days::new(1))
            .map(|d| d.and_time(chrono::NaiveTime::MIN));
        self.list_between(from, until)
    }

    async fn add_scheduled_item(&self, item: &ScheduledItem) -> RepoResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO scheduled_items
             (id, kind, payload, start_at, duration_millis, owner_id, display_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                item.id,
                item.kind.as_str(),
                item.kind.payload(),
                format_timestamp(item.start),
                item.duration_millis,
                item.owner_id,
                item.display_name,
            ],
        )
        .map_err(|e| Self::map_insert_error(e, "scheduled item", &item.id))?;
        Ok(())
    }

    async fn update_scheduled_item(&self, item: &ScheduledItem) -> RepoResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE scheduled_items
             SET kind = ?1, payload = ?2, start_at = ?3, duration_millis = ?4,
                 owner_id = ?5, display_name = ?6
             WHERE id = ?7",
            params![
                item.kind.as_str(),
                item.kind.payload(),
                format_timestamp(item.start),
                item.duration_millis,
                item.owner_id,
                item.display_name,
                item.id,
            ],
        )?;
        Self::require_changed(changed, "scheduled item", &item.id)
    }

    async fn delete_scheduled_item(&self, item: &ScheduledItem) -> RepoResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM scheduled_items WHERE id = ?1", params![item.id])?;
        Self::require_changed(changed, "scheduled item", &item.id)
    }

    async fn todo_by_id(&self, id: &str) -> RepoResult<Option<Todo>> {
        let conn = self.conn()?;
        let todo = conn
            .query_row(
                "SELECT id, title, description, due_at, done, owner_id, created_at
                 FROM todos WHERE id = ?1",
                params![id],
                row_to_todo,
            )
            .optional()?;
        Ok(todo)
    }
}

#[async_trait]
impl TodoRepository for ScheduleDb {
    async fn add_todo(&self, todo: &Todo) -> RepoResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO todos (id, title, description, due_at, done, owner_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                todo.id,
                todo.title,
                todo.description,
                todo.due.map(format_timestamp),
                todo.done,
                todo.owner_id,
                todo.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| Self::map_insert_error(e, "todo", &todo.id))?;
        Ok(())
    }

    async fn update_todo(&self, todo: &Todo) -> RepoResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE todos
             SET title = ?1, description = ?2, due_at = ?3, done = ?4, owner_id = ?5
             WHERE id = ?6",
            params![
                todo.title,
                todo.description,
                todo.due.map(format_timestamp),
                todo.done,
                todo.owner_id,
                todo.id,
            ],
        )?;
        Self::require_changed(changed, "todo", &todo.id)
    }

    async fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, due_at, done, owner_id, created_at
             FROM todos ORDER BY created_at, rowid",
        )?;
        let todos = stmt
            .query_map([], row_to_todo)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }
}
