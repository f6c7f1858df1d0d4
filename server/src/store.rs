//! SQLite-backed todo storage.
//!
//! # Design
//! One `rusqlite::Connection` is opened at start-up and shared behind
//! `Arc<Mutex<_>>`; cloning a `Store` clones the handle, not the connection.
//! Every call hops onto `spawn_blocking` so SQLite never blocks the async
//! workers. All statements bind their inputs as parameters.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use thiserror::Error;
use todo_core::{Category, Priority, Status, TodoItem, TodoQuery, ValidationError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todo (
    id INTEGER PRIMARY KEY,
    todo TEXT NOT NULL,
    priority TEXT NOT NULL,
    status TEXT NOT NULL,
    category TEXT NOT NULL,
    due_date TEXT NOT NULL
);
"#;

const SELECT_COLUMNS: &str = "SELECT id, todo, priority, status, category, due_date FROM todo";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("storage task join error: {0}")]
    Task(String),

    #[error("database connection lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone)]
pub struct Store {
    connection: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) the database file and ensure the `todo` table exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> StoreResult<Self> {
        connection.execute_batch(SCHEMA)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    async fn with_connection<T, F>(&self, func: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        tokio::task::spawn_blocking(move || {
            let guard = connection.lock().map_err(|_| StoreError::Poisoned)?;
            func(&guard)
        })
        .await
        .map_err(|error| StoreError::Task(error.to_string()))?
    }

    pub async fn list(&self, query: &TodoQuery) -> StoreResult<Vec<TodoItem>> {
        let predicates = query.filter.predicates();
        let clauses: String = predicates
            .iter()
            .enumerate()
            .map(|(index, (column, _))| format!(" AND {column} = ?{}", index + 2))
            .collect();
        let sql = format!("{SELECT_COLUMNS} WHERE todo LIKE '%' || ?1 || '%' ESCAPE '\\'{clauses}");
        let mut values = vec![escape_like(&query.search)];
        values.extend(predicates.iter().map(|(_, value)| value.to_string()));

        self.with_connection(move |connection| {
            let mut statement = connection.prepare(&sql)?;
            let rows = statement.query_map(params_from_iter(values.iter()), map_row)?;
            let todos = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(todos)
        })
        .await
    }

    pub async fn get(&self, id: i64) -> StoreResult<Option<TodoItem>> {
        self.with_connection(move |connection| {
            let item = connection
                .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], map_row)
                .optional()?;
            Ok(item)
        })
        .await
    }

    pub async fn agenda(&self, date: NaiveDate) -> StoreResult<Vec<TodoItem>> {
        self.with_connection(move |connection| {
            let mut statement = connection.prepare(&format!("{SELECT_COLUMNS} WHERE due_date = ?1"))?;
            let rows = statement.query_map(params![date], map_row)?;
            let todos = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(todos)
        })
        .await
    }

    /// Insert a new row. Fails with a constraint error if the id is taken.
    pub async fn insert(&self, item: &TodoItem) -> StoreResult<()> {
        let item = item.clone();
        self.with_connection(move |connection| {
            connection.execute(
                "INSERT INTO todo (id, todo, priority, status, category, due_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    item.id,
                    item.todo,
                    item.priority.to_string(),
                    item.status.to_string(),
                    item.category.to_string(),
                    item.due_date,
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Overwrite every mutable column of the row with `item.id`.
    pub async fn update(&self, item: &TodoItem) -> StoreResult<usize> {
        let item = item.clone();
        self.with_connection(move |connection| {
            let changed = connection.execute(
                "UPDATE todo
                 SET todo = ?1, priority = ?2, status = ?3, category = ?4, due_date = ?5
                 WHERE id = ?6",
                params![
                    item.todo,
                    item.priority.to_string(),
                    item.status.to_string(),
                    item.category.to_string(),
                    item.due_date,
                    item.id,
                ],
            )?;
            Ok(changed)
        })
        .await
    }

    /// Remove the row if present. Returns the number of rows deleted.
    pub async fn delete(&self, id: i64) -> StoreResult<usize> {
        self.with_connection(move |connection| {
            Ok(connection.execute("DELETE FROM todo WHERE id = ?1", params![id])?)
        })
        .await
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<TodoItem> {
    Ok(TodoItem {
        id: row.get(0)?,
        todo: row.get(1)?,
        priority: parse_column::<Priority>(row, 2)?,
        status: parse_column::<Status>(row, 3)?,
        category: parse_column::<Category>(row, 4)?,
        due_date: row.get(5)?,
    })
}

fn parse_column<T>(row: &Row<'_>, index: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = ValidationError>,
{
    let raw: String = row.get(index)?;
    raw.parse::<T>()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)))
}

/// Escape LIKE wildcards so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
