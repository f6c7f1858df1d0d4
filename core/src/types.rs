//! Domain types for the todo service.
//!
//! # Design
//! Priority, status and category are closed enums. All three share the
//! `Enumerated` trait so a single generic parser (`parse_enumerated`) checks
//! raw strings against each field's allowed set. The wire strings are the
//! upper-case values clients already send (`TO DO`, `IN PROGRESS`, ...).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A field restricted to a fixed set of wire strings.
pub trait Enumerated: Copy + Sized + 'static {
    /// Every allowed value, in declaration order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;
}

/// Match `raw` exactly against the allowed values of `T`.
pub fn parse_enumerated<T: Enumerated>(raw: &str) -> Option<T> {
    T::ALL.iter().copied().find(|value| value.as_str() == raw)
}

macro_rules! enumerated {
    ($(#[$meta:meta])* $name:ident, $error:expr, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl Enumerated for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_enumerated(s).ok_or($error)
            }
        }
    };
}

enumerated!(
    /// How urgent a todo is.
    Priority, ValidationError::InvalidPriority, {
        High => "HIGH",
        Medium => "MEDIUM",
        Low => "LOW",
    }
);

enumerated!(
    /// Progress of a todo.
    Status, ValidationError::InvalidStatus, {
        ToDo => "TO DO",
        InProgress => "IN PROGRESS",
        Done => "DONE",
    }
);

enumerated!(
    /// Area of life a todo belongs to.
    Category, ValidationError::InvalidCategory, {
        Work => "WORK",
        Home => "HOME",
        Learning => "LEARNING",
    }
);

/// A single todo item in its canonical (client-facing) shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub todo: String,
    pub priority: Priority,
    pub status: Status,
    pub category: Category,
    pub due_date: NaiveDate,
}

/// A validated partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub todo: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub category: Option<Category>,
    pub due_date: Option<NaiveDate>,
}

impl TodoPatch {
    /// Merge the patch over `existing`, producing the full row to write back.
    pub fn apply(&self, existing: &TodoItem) -> TodoItem {
        TodoItem {
            id: existing.id,
            todo: self.todo.clone().unwrap_or_else(|| existing.todo.clone()),
            priority: self.priority.unwrap_or(existing.priority),
            status: self.status.unwrap_or(existing.status),
            category: self.category.unwrap_or(existing.category),
            due_date: self.due_date.unwrap_or(existing.due_date),
        }
    }

    /// The one field named in the update confirmation.
    ///
    /// Checked in the order status, category, priority, todo, due date; only
    /// the first present field is reported even when several were supplied.
    pub fn reported_field(&self) -> Option<UpdatedField> {
        if self.status.is_some() {
            Some(UpdatedField::Status)
        } else if self.category.is_some() {
            Some(UpdatedField::Category)
        } else if self.priority.is_some() {
            Some(UpdatedField::Priority)
        } else if self.todo.is_some() {
            Some(UpdatedField::Todo)
        } else if self.due_date.is_some() {
            Some(UpdatedField::DueDate)
        } else {
            None
        }
    }

    /// Confirmation text for a completed update, e.g. `Status Updated`.
    pub fn confirmation(&self) -> String {
        match self.reported_field() {
            Some(field) => format!("{field} Updated"),
            None => "Todo Updated".to_string(),
        }
    }
}

/// Field named by an update confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatedField {
    Status,
    Category,
    Priority,
    Todo,
    DueDate,
}

impl fmt::Display for UpdatedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UpdatedField::Status => "Status",
            UpdatedField::Category => "Category",
            UpdatedField::Priority => "Priority",
            UpdatedField::Todo => "Todo",
            UpdatedField::DueDate => "Due Date",
        };
        f.write_str(label)
    }
}
