//! Error types for todo field validation.
//!
//! # Design
//! Each variant's `Display` text is the exact client-facing message the
//! server returns with a 400. Only one variant is ever reported per request:
//! the validator stops at the first failing field.

use thiserror::Error;

/// A request field was outside its allowed set or not a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid Todo Status")]
    InvalidStatus,

    #[error("Invalid Todo Priority")]
    InvalidPriority,

    #[error("Invalid Todo Category")]
    InvalidCategory,

    #[error("Invalid Due Date")]
    InvalidDueDate,
}
