//! Life event record shape.
//!
//! # Responsibility
//! - Define the canonical record for one dated note on a user's timeline.
//! - Define the closed set of life tracks a record can belong to.
//!
//! # Invariants
//! - `track` is always one of `career|family|travel`; serde rejects others.
//! - Every field is required on the wire and unknown fields are rejected.
//! - `id`, `date`, `title` and `text` are stored verbatim. Uniqueness of
//!   `id` and well-formedness of `date` belong to whoever creates records.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Life domain a [`LifeEvent`] is filed under.
///
/// Wire labels are lowercase and case-sensitive: `"Career"` is not a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    /// Work, study and professional milestones.
    Career,
    /// Family and home life.
    Family,
    /// Trips and places visited.
    Travel,
}

impl Track {
    /// Every track, in declaration order.
    pub const ALL: [Track; 3] = [Track::Career, Track::Family, Track::Travel];

    /// Returns the wire label for this track.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Family => "family",
            Self::Travel => "travel",
        }
    }
}

impl Display for Track {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the three track labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid track `{value}`; expected career|family|travel")]
pub struct TrackParseError {
    value: String,
}

impl TrackParseError {
    /// The rejected input, unmodified.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for Track {
    type Err = TrackParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "career" => Ok(Self::Career),
            "family" => Ok(Self::Family),
            "travel" => Ok(Self::Travel),
            other => Err(TrackParseError {
                value: other.to_string(),
            }),
        }
    }
}

/// One dated, titled note on a user's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LifeEvent {
    /// Opaque identifier, unique within whatever collection holds the event.
    pub id: String,
    pub track: Track,
    /// Calendar date by convention `YYYY-MM-DD`. Never parsed here.
    pub date: String,
    pub title: String,
    /// Free-form body.
    pub text: String,
}

impl LifeEvent {
    /// Builds an event from its five fields, stored as given.
    pub fn new(
        id: impl Into<String>,
        track: Track,
        date: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            track,
            date: date.into(),
            title: title.into(),
            text: text.into(),
        }
    }
}
