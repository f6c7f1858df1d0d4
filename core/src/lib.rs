//! Domain core for the todo service.
//!
//! # Overview
//! Typed todo fields, request validation, date normalization and the list
//! filter rules. Nothing here touches the network or the database; the
//! `todo-server` crate wires these pieces to axum and SQLite.
//!
//! # Design
//! - Priority, status and category are closed enums sharing one parser.
//! - Validation checks fields in a fixed order and reports only the first
//!   failure, returning typed values on success.
//! - Partial updates are a `TodoPatch` merged over the stored item.

pub mod date;
pub mod error;
pub mod filter;
pub mod types;
pub mod validate;

pub use date::{format_due_date, parse_due_date};
pub use error::ValidationError;
pub use filter::{ListFilter, TodoQuery};
pub use types::{Category, Enumerated, Priority, Status, TodoItem, TodoPatch, UpdatedField};
pub use validate::{validate, Candidate, Checked};
