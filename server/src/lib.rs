//! HTTP surface for the todo service.
//!
//! # Design
//! Each handler validates its input with `todo_core::validate`, runs one
//! store call and maps the result back to JSON or a plain confirmation.
//! The `Store` is injected through router state, so tests build the app
//! over an in-memory database. Every route answers with and without a
//! trailing slash.

pub mod config;
pub mod error;
pub mod store;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer};
use tokio::net::TcpListener;
use todo_core::{validate, Candidate, TodoItem, TodoPatch, TodoQuery, ValidationError};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::store::Store;

/// The fields every route runs through the validator. The due date may
/// arrive as `dueDate` or `date`; `date` wins when both are present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedFields {
    #[serde(default, deserialize_with = "present_as_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present_as_text")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "present_as_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "present_as_text")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "present_as_text")]
    pub date: Option<String>,
}

impl CheckedFields {
    fn candidate(&self) -> Candidate<'_> {
        Candidate {
            status: self.status.as_deref(),
            priority: self.priority.as_deref(),
            category: self.category.as_deref(),
            date: self.date.as_deref().or(self.due_date.as_deref()),
        }
    }
}

/// Keep any present value as text so the validator, not the extractor,
/// rejects it. Non-string JSON (`5`, `null`, `true`, arrays, objects) keeps
/// its JSON rendering, which is never an allowed value or a date.
fn present_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    };
    Ok(Some(text))
}

/// Query string accepted by `GET /todos/`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(flatten)]
    pub fields: CheckedFields,
    pub search_q: Option<String>,
}

/// Query string accepted by `GET /agenda/`.
#[derive(Debug, Default, Deserialize)]
pub struct AgendaParams {
    #[serde(flatten)]
    pub fields: CheckedFields,
}

/// JSON body for create and update. Every field is optional at parse time so
/// validation messages take precedence over missing-field errors.
#[derive(Debug, Default, Deserialize)]
pub struct TodoBody {
    pub id: Option<i64>,
    pub todo: Option<String>,
    #[serde(flatten)]
    pub fields: CheckedFields,
}

pub fn app(store: Store) -> Router {
    let collection = get(list_todos).post(create_todo);
    let member = get(get_todo).put(update_todo).delete(delete_todo);
    let agenda = get(agenda_todos);
    Router::new()
        .route("/todos", collection.clone())
        .route("/todos/", collection)
        .route("/todos/{todo_id}", member.clone())
        .route("/todos/{todo_id}/", member)
        .route("/agenda", agenda.clone())
        .route("/agenda/", agenda)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

async fn list_todos(
    State(store): State<Store>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<TodoItem>>, AppError> {
    let checked = validate(&params.fields.candidate())?;
    let query = TodoQuery::new(params.search_q, &checked);
    tracing::debug!(?query, "listing todos");
    Ok(Json(store.list(&query).await?))
}

/// An unknown id answers 404 with an empty body: absent, not a server error.
async fn get_todo(
    State(store): State<Store>,
    Path(todo_id): Path<i64>,
) -> Result<Json<TodoItem>, AppError> {
    store.get(todo_id).await?.map(Json).ok_or(AppError::NotFound)
}

async fn agenda_todos(
    State(store): State<Store>,
    Query(params): Query<AgendaParams>,
) -> Result<Json<Vec<TodoItem>>, AppError> {
    let checked = validate(&params.fields.candidate())?;
    let date = checked.date.ok_or(ValidationError::InvalidDueDate)?;
    Ok(Json(store.agenda(date).await?))
}

async fn create_todo(
    State(store): State<Store>,
    Json(body): Json<TodoBody>,
) -> Result<&'static str, AppError> {
    let checked = validate(&body.fields.candidate())?;
    let item = TodoItem {
        id: body.id.ok_or(AppError::MissingField("id"))?,
        todo: body.todo.ok_or(AppError::MissingField("todo"))?,
        priority: checked.priority.ok_or(AppError::MissingField("priority"))?,
        status: checked.status.ok_or(AppError::MissingField("status"))?,
        category: checked.category.ok_or(AppError::MissingField("category"))?,
        due_date: checked.date.ok_or(AppError::MissingField("dueDate"))?,
    };
    store.insert(&item).await?;
    tracing::info!(id = item.id, "todo created");
    Ok("Todo Successfully Added")
}

async fn update_todo(
    State(store): State<Store>,
    Path(todo_id): Path<i64>,
    Json(body): Json<TodoBody>,
) -> Result<String, AppError> {
    let checked = validate(&body.fields.candidate())?;
    let existing = store.get(todo_id).await?.ok_or(AppError::NotFound)?;
    let patch = TodoPatch {
        todo: body.todo,
        priority: checked.priority,
        status: checked.status,
        category: checked.category,
        due_date: checked.date,
    };
    store.update(&patch.apply(&existing)).await?;
    tracing::info!(id = todo_id, field = ?patch.reported_field(), "todo updated");
    Ok(patch.confirmation())
}

async fn delete_todo(
    State(store): State<Store>,
    Path(todo_id): Path<i64>,
) -> Result<&'static str, AppError> {
    let removed = store.delete(todo_id).await?;
    tracing::info!(id = todo_id, removed, "todo deleted");
    Ok("Todo Deleted")
}
