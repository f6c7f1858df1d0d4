//! Request field validation.
//!
//! # Design
//! A `Candidate` borrows the raw optional strings from whatever carried them
//! (query string or JSON body). `validate` checks them in a fixed order
//! (status, priority, category, date) and stops at the first failure, so a
//! request with several bad fields still gets exactly one message. On
//! success the typed values come back in `Checked`, so handlers never
//! re-parse.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::date::parse_due_date;
use crate::error::ValidationError;
use crate::types::{Category, Enumerated, Priority, Status};

/// Raw, unvalidated fields pulled from a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Candidate<'a> {
    pub status: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub category: Option<&'a str>,
    pub date: Option<&'a str>,
}

/// Typed fields that passed validation. Absent inputs stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checked {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

pub fn validate(candidate: &Candidate<'_>) -> Result<Checked, ValidationError> {
    let status = check_enumerated::<Status>(candidate.status)?;
    let priority = check_enumerated::<Priority>(candidate.priority)?;
    let category = check_enumerated::<Category>(candidate.category)?;
    let date = candidate
        .date
        .map(|raw| parse_due_date(raw).ok_or(ValidationError::InvalidDueDate))
        .transpose()?;

    Ok(Checked {
        status,
        priority,
        category,
        date,
    })
}

fn check_enumerated<T>(raw: Option<&str>) -> Result<Option<T>, ValidationError>
where
    T: Enumerated + FromStr<Err = ValidationError>,
{
    raw.map(str::parse::<T>).transpose()
}
