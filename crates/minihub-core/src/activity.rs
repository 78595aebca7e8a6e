//! Append-only activity history.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::id::ActivityId;

/// Actor (author of an activity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl Actor {
    /// Build an actor.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// One entry of the activity history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Unique record identifier.
    pub id: ActivityId,
    #[serde(with = "time::serde::rfc3339")]
    /// Record timestamp in UTC.
    pub ts: OffsetDateTime,
    /// Actor who performed the action.
    pub actor: Actor,
    /// Human-readable description.
    pub description: String,
}

/// Chronological, append-only sequence of [`ActivityRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct ActivityHistory {
    records: Vec<ActivityRecord>,
}

impl ActivityHistory {
    /// Empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Append a record stamped with the current time.
    pub fn append(&mut self, actor: &Actor, description: impl Into<String>) -> &ActivityRecord {
        self.append_at(actor, description, OffsetDateTime::now_utc())
    }

    /// Append a record with an explicit timestamp.
    pub fn append_at(
        &mut self,
        actor: &Actor,
        description: impl Into<String>,
        ts: OffsetDateTime,
    ) -> &ActivityRecord {
        let index = self.records.len();
        self.records.push(ActivityRecord {
            id: ActivityId::new(),
            ts,
            actor: actor.clone(),
            description: description.into(),
        });
        &self.records[index]
    }

    /// Records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    /// Iterate records, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, ActivityRecord> {
        self.records.iter()
    }

    /// Most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&ActivityRecord> {
        self.records.last()
    }

    /// Number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ActivityHistory {
    type Item = &'a ActivityRecord;
    type IntoIter = std::slice::Iter<'a, ActivityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
