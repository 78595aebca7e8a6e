//! Handles for activity records.
//!
//! Descriptions repeat ("Undo: ...") and timestamps can collide within one
//! clock tick, so each [`ActivityRecord`](crate::ActivityRecord) carries an id
//! that names it on its own when the history is exported or compared.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Stable handle for one activity record.
///
/// Ids are UUID v7: their leading bits encode the creation time, so ordering
/// ids follows the order in which the history was written.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub Uuid);

impl ActivityId {
    /// Mint the id for a record written now.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ActivityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_id_uses_uuid_v7() {
        let id = ActivityId::new();
        assert_eq!(id.0.get_version_num(), 7);
    }

    #[test]
    fn activity_id_parses_display_output() {
        let id = ActivityId::new();
        let parsed: ActivityId = id.to_string().parse().expect("must parse activity id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn activity_id_serializes_as_a_plain_string() {
        let id = ActivityId::new();
        let json = serde_json::to_value(id).expect("serialize");
        assert_eq!(json, serde_json::Value::String(id.to_string()));
        let back: ActivityId = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, id);
    }
}