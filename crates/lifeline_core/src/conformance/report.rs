//! Report types produced by conformance checks.

use crate::model::life_event::LifeEvent;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// One structural problem found in a candidate record.
///
/// Issues describe the record shape only; they never judge dates, ids or
/// text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConformanceIssue {
    /// The record is not a JSON object.
    NotAnObject { found: &'static str },
    /// A required field is absent.
    MissingField { field: &'static str },
    /// A required field is present but not a JSON string.
    NotAString {
        field: &'static str,
        found: &'static str,
    },
    /// `track` is a string outside `career|family|travel`.
    InvalidTrack { value: String },
    /// A key outside the five record fields.
    UnknownField { field: String },
    /// A key that appears more than once in the same record.
    DuplicateField { field: String },
}

impl ConformanceIssue {
    /// Stable machine-readable code, safe to put in logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAnObject { .. } => "not_an_object",
            Self::MissingField { .. } => "missing_field",
            Self::NotAString { .. } => "not_a_string",
            Self::InvalidTrack { .. } => "invalid_track",
            Self::UnknownField { .. } => "unknown_field",
            Self::DuplicateField { .. } => "duplicate_field",
        }
    }
}

impl Display for ConformanceIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject { found } => write!(f, "expected an object, found {found}"),
            Self::MissingField { field } => write!(f, "missing field `{field}`"),
            Self::NotAString { field, found } => {
                write!(f, "field `{field}` must be a string, found {found}")
            }
            Self::InvalidTrack { value } => {
                write!(f, "invalid track `{value}`; expected career|family|travel")
            }
            Self::UnknownField { field } => write!(f, "unknown field `{field}`"),
            Self::DuplicateField { field } => write!(f, "duplicate field `{field}`"),
        }
    }
}

/// Outcome for one record of a checked document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    /// Zero-based position in the document.
    pub index: usize,
    /// The record's `id` when it was a string, for diagnostics only.
    pub id: Option<String>,
    /// Parsed value; `Some` exactly when `issues` is empty.
    pub event: Option<LifeEvent>,
    pub issues: Vec<ConformanceIssue>,
}

impl RecordReport {
    pub fn is_conforming(&self) -> bool {
        self.event.is_some()
    }
}

/// Per-record outcomes for a whole document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub records: Vec<RecordReport>,
}

impl DocumentReport {
    /// True when every record conforms. An empty document conforms.
    pub fn is_conforming(&self) -> bool {
        self.records.iter().all(RecordReport::is_conforming)
    }

    pub fn conforming_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_conforming()).count()
    }

    pub fn non_conforming_count(&self) -> usize {
        self.records.len() - self.conforming_count()
    }

    /// Conforming events in document order.
    pub fn events(&self) -> impl Iterator<Item = &LifeEvent> {
        self.records.iter().filter_map(|record| record.event.as_ref())
    }
}
