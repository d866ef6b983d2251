//! Domain model for timeline records.
//!
//! # Responsibility
//! - Define the data shapes exchanged with storage, import and UI layers.
//!
//! # Invariants
//! - Shapes carry no behavior beyond construction and label conversion.
//! - Validation stronger than the type system lives with the callers.

pub mod life_event;
