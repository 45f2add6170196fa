//! Payload validation for mood/life records.
//!
//! Pure functions: given a raw payload, a kind descriptor and today's date
//! they either hand back a normalized draft ready to persist or a map of
//! field name → messages with every violation collected. Category
//! normalization happens here, before any rule runs, so the storage layer
//! never sees non-canonical casing.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::record::{KindSpec, RecordPayload, Status};

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 255;

/// Field name → ordered list of human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Validated, normalized record fields. Only produced when every rule passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub category: String,
    pub status: Status,
    pub date: NaiveDate,
}

/// Rewrite a category into canonical casing: first letter upper, rest lower.
pub fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Validate a full create/replace payload against a kind's rule set.
///
/// Rules run per field and independently; all violations are collected.
/// `today` is passed in rather than read from the clock so the function is
/// deterministic.
pub fn validate(
    spec: &KindSpec,
    payload: &RecordPayload,
    today: NaiveDate,
) -> Result<Draft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let msgs = &spec.messages;

    let title = payload.title.as_deref().map(str::trim).unwrap_or("");
    if title.is_empty() {
        push(&mut errors, "title", msgs.title_required);
    } else {
        let len = title.chars().count();
        if len < TITLE_MIN {
            push(&mut errors, "title", msgs.title_min);
        }
        if len > TITLE_MAX {
            push(&mut errors, "title", msgs.title_max);
        }
    }

    let category = normalize_category(payload.category.as_deref().unwrap_or(""));
    if category.is_empty() {
        push(&mut errors, "category", msgs.category_required);
    } else if !spec.categories.contains(&category.as_str()) {
        push(&mut errors, "category", msgs.category_invalid);
    }

    let status = validate_status_field(spec, payload.status.as_deref(), &mut errors);

    let date = match payload.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        None => {
            push(&mut errors, "date", msgs.date_required);
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Err(_) => {
                push(&mut errors, "date", msgs.date_required);
                None
            }
            Ok(date) if date < spec.date_floor(today) => {
                push(&mut errors, "date", msgs.date_floor);
                None
            }
            Ok(date) => Some(date),
        },
    };

    if let (true, Some(status), Some(date)) = (errors.is_empty(), status, date) {
        Ok(Draft {
            title: title.to_string(),
            category,
            status,
            date,
        })
    } else {
        Err(errors)
    }
}

/// Validate the body of a status-only update: `status` must be present and
/// exactly one of the two allowed values.
pub fn validate_status(spec: &KindSpec, raw: Option<&str>) -> Result<Status, FieldErrors> {
    let mut errors = FieldErrors::new();
    match validate_status_field(spec, raw, &mut errors) {
        Some(status) => Ok(status),
        None => Err(errors),
    }
}

fn validate_status_field(
    spec: &KindSpec,
    raw: Option<&str>,
    errors: &mut FieldErrors,
) -> Option<Status> {
    match raw.map(str::trim) {
        None | Some("") => {
            push(errors, "status", spec.messages.status_required);
            None
        }
        Some(raw) => match Status::parse(raw) {
            Some(status) => Some(status),
            None => {
                push(errors, "status", spec.messages.status_invalid);
                None
            }
        },
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}
