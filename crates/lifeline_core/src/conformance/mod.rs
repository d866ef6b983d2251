//! Structural conformance checks for JSON life event documents.
//!
//! # Responsibility
//! - Tell callers whether JSON input matches the `LifeEvent` record surface.
//! - Collect every structural issue of a record instead of stopping at the
//!   first one, so import tooling can report them together.
//!
//! # Invariants
//! - `check_document` accepts an object record iff
//!   `serde_json::from_str::<LifeEvent>` accepts that record's text. Repeated
//!   keys are reported, not collapsed.
//! - `check_value` only sees an already-collapsed `Value` and agrees with
//!   `serde_json::from_value::<LifeEvent>` on objects.
//! - Records must be objects here even though serde also takes sequences.
//! - Only structure is checked. Dates are opaque strings and the same id
//!   on two different records is not detected.
//! - Log lines carry counts and issue codes, never record content.

mod report;
mod scan;

pub use report::{ConformanceIssue, DocumentReport, RecordReport};

use crate::model::life_event::{LifeEvent, Track};
use scan::Scanned;
use log::{error, info, warn};
use serde_json::{Map, Value};
use std::time::Instant;
use thiserror::Error;

/// Field names of the record surface, in declaration order.
pub const LIFE_EVENT_FIELDS: [&str; 5] = ["id", "track", "date", "title", "text"];

/// Failure to read a document at all. Structural problems are reported
/// through [`DocumentReport`] instead.
#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Checks one JSON value against the record surface.
///
/// Issue order: shape, then fields in declaration order, then unknown keys
/// sorted by name.
pub fn check_value(value: &Value) -> Result<LifeEvent, Vec<ConformanceIssue>> {
    let Some(object) = value.as_object() else {
        return Err(vec![ConformanceIssue::NotAnObject {
            found: json_kind(value),
        }]);
    };

    let mut issues = Vec::new();
    let id = string_field(object, "id", &mut issues);
    let track = string_field(object, "track", &mut issues).and_then(|label| {
        label
            .parse::<Track>()
            .map_err(|err| {
                issues.push(ConformanceIssue::InvalidTrack {
                    value: err.value().to_string(),
                })
            })
            .ok()
    });
    let date = string_field(object, "date", &mut issues);
    let title = string_field(object, "title", &mut issues);
    let text = string_field(object, "text", &mut issues);

    let mut unknown = object
        .keys()
        .filter(|key| !LIFE_EVENT_FIELDS.contains(&key.as_str()))
        .collect::<Vec<_>>();
    unknown.sort();
    issues.extend(
        unknown
            .into_iter()
            .map(|key| ConformanceIssue::UnknownField { field: key.clone() }),
    );

    match (id, track, date, title, text) {
        (Some(id), Some(track), Some(date), Some(title), Some(text)) if issues.is_empty() => {
            Ok(LifeEvent::new(id, track, date, title, text))
        }
        _ => Err(issues),
    }
}

/// Checks a JSON document holding one record (an object) or many (an array).
///
/// Any other top-level value is reported as a single non-object record.
/// Issues follow [`check_value`] order, then keys repeated within a record
/// in order of first repetition.
///
/// # Errors
/// - Returns [`ConformanceError::Json`] when `input` is not parseable JSON.
pub fn check_document(input: &str) -> Result<DocumentReport, ConformanceError> {
    let started_at = Instant::now();

    let document: Scanned = match serde_json::from_str(input) {
        Ok(document) => document,
        Err(err) => {
            error!(
                "event=conformance_check module=conformance status=error error_code=invalid_json line={} column={}",
                err.line(),
                err.column()
            );
            return Err(err.into());
        }
    };

    let records = match document {
        Scanned::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| check_scanned(index, item))
            .collect(),
        other => vec![check_scanned(0, other)],
    };
    let report = DocumentReport { records };

    for record in report.records.iter().filter(|r| !r.is_conforming()) {
        let codes = record
            .issues
            .iter()
            .map(ConformanceIssue::code)
            .collect::<Vec<_>>()
            .join(",");
        warn!(
            "event=record_rejected module=conformance index={} issues={}",
            record.index, codes
        );
    }
    info!(
        "event=conformance_check module=conformance status=ok records={} conforming={} non_conforming={} duration_ms={}",
        report.records.len(),
        report.conforming_count(),
        report.non_conforming_count(),
        started_at.elapsed().as_millis()
    );

    Ok(report)
}

fn check_scanned(index: usize, scanned: Scanned) -> RecordReport {
    let (entries, duplicate_keys) = match scanned {
        Scanned::Object {
            entries,
            duplicate_keys,
        } => (entries, duplicate_keys),
        other => return check_record(index, &other.into_value()),
    };

    let mut report = check_record(index, &Value::Object(entries));
    if !duplicate_keys.is_empty() {
        report.event = None;
        report.issues.extend(
            duplicate_keys
                .into_iter()
                .map(|field| ConformanceIssue::DuplicateField { field }),
        );
    }
    report
}

fn check_record(index: usize, value: &Value) -> RecordReport {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string);
    match check_value(value) {
        Ok(event) => RecordReport {
            index,
            id,
            event: Some(event),
            issues: Vec::new(),
        },
        Err(issues) => RecordReport {
            index,
            id,
            event: None,
            issues,
        },
    }
}

fn string_field<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<ConformanceIssue>,
) -> Option<&'a str> {
    match object.get(field) {
        None => {
            issues.push(ConformanceIssue::MissingField { field });
            None
        }
        Some(Value::String(value)) => Some(value.as_str()),
        Some(other) => {
            issues.push(ConformanceIssue::NotAString {
                field,
                found: json_kind(other),
            });
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
