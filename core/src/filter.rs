//! List filtering rules.
//!
//! # Design
//! At most two of priority/status/category are ever applied. When a request
//! supplies more, the first matching pairing wins in this order:
//! priority+status, category+priority, category+status, then each field
//! alone, then text search only. `ListFilter` makes that choice explicit;
//! the store turns it into equality predicates.

use crate::types::{Category, Enumerated, Priority, Status};
use crate::validate::Checked;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    PriorityAndStatus(Priority, Status),
    CategoryAndPriority(Category, Priority),
    CategoryAndStatus(Category, Status),
    Status(Status),
    Priority(Priority),
    Category(Category),
    SearchOnly,
}

impl ListFilter {
    pub fn select(
        priority: Option<Priority>,
        status: Option<Status>,
        category: Option<Category>,
    ) -> Self {
        match (priority, status, category) {
            (Some(priority), Some(status), _) => Self::PriorityAndStatus(priority, status),
            (Some(priority), None, Some(category)) => Self::CategoryAndPriority(category, priority),
            (None, Some(status), Some(category)) => Self::CategoryAndStatus(category, status),
            (None, Some(status), None) => Self::Status(status),
            (Some(priority), None, None) => Self::Priority(priority),
            (None, None, Some(category)) => Self::Category(category),
            (None, None, None) => Self::SearchOnly,
        }
    }

    /// `(column, value)` pairs that must all match exactly.
    pub fn predicates(&self) -> Vec<(&'static str, &'static str)> {
        match *self {
            Self::PriorityAndStatus(priority, status) => vec![
                ("priority", priority.as_str()),
                ("status", status.as_str()),
            ],
            Self::CategoryAndPriority(category, priority) => vec![
                ("category", category.as_str()),
                ("priority", priority.as_str()),
            ],
            Self::CategoryAndStatus(category, status) => vec![
                ("category", category.as_str()),
                ("status", status.as_str()),
            ],
            Self::Status(status) => vec![("status", status.as_str())],
            Self::Priority(priority) => vec![("priority", priority.as_str())],
            Self::Category(category) => vec![("category", category.as_str())],
            Self::SearchOnly => Vec::new(),
        }
    }
}

/// A list request: substring search plus the selected filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoQuery {
    /// Substring the todo text must contain. Empty matches everything.
    pub search: String,
    pub filter: ListFilter,
}

impl TodoQuery {
    pub fn new(search: Option<String>, checked: &Checked) -> Self {
        Self {
            search: search.unwrap_or_default(),
            filter: ListFilter::select(checked.priority, checked.status, checked.category),
        }
    }
}
