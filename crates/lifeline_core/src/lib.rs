//! Core data shapes for Lifeline timelines.
//! This crate owns the `LifeEvent` record contract and its JSON conformance rules.

pub mod conformance;
pub mod logging;
pub mod model;

pub use conformance::{
    check_document, check_value, ConformanceError, ConformanceIssue, DocumentReport,
    RecordReport, LIFE_EVENT_FIELDS,
};
pub use logging::{
    default_log_level, init_logging, logging_status, normalize_log_level, LoggingError,
};
pub use model::life_event::{LifeEvent, Track, TrackParseError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
