//! Reversible descriptions of store mutations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Repository;

/// End of a task queue an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueEnd {
    /// Head of the queue (oldest task).
    Front,
    /// Tail of the queue (newest task).
    Back,
}

/// A single store mutation, applied by [`EntityStore::apply`](crate::EntityStore::apply).
///
/// Applying an operation yields the operation that reverses it; the undo and
/// redo stacks only ever hold values of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Operation {
    /// Insert a repository (with its contents) at a list position.
    CreateRepository {
        /// Repository snapshot, empty for a fresh create.
        repository: Repository,
        /// Index in the newest-first repository list.
        #[serde(default)]
        position: usize,
    },
    /// Remove a repository and everything it owns.
    DeleteRepository {
        /// Repository name.
        name: String,
    },
    /// Insert a file at a list position.
    CreateFile {
        /// Owning repository.
        repository: String,
        /// File name.
        name: String,
        /// File content.
        content: String,
        /// Index in the newest-first file list.
        #[serde(default)]
        position: usize,
    },
    /// Remove a file.
    DeleteFile {
        /// Owning repository.
        repository: String,
        /// File name.
        name: String,
    },
    /// Overwrite the content of a file.
    EditFile {
        /// Owning repository.
        repository: String,
        /// File name.
        name: String,
        /// Content to store.
        content: String,
    },
    /// Push a task onto one end of the queue.
    AddTask {
        /// Owning repository.
        repository: String,
        /// Task text.
        task: String,
        /// Queue end receiving the task.
        end: QueueEnd,
    },
    /// Pop a task from one end of the queue.
    RemoveTask {
        /// Owning repository.
        repository: String,
        /// Queue end losing the task.
        end: QueueEnd,
    },
}

impl Operation {
    /// Name of the repository the operation targets.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::CreateRepository { repository, .. } => repository.name(),
            Self::DeleteRepository { name } => name,
            Self::CreateFile { repository, .. }
            | Self::DeleteFile { repository, .. }
            | Self::EditFile { repository, .. }
            | Self::AddTask { repository, .. }
            | Self::RemoveTask { repository, .. } => repository,
        }
    }

    /// Short tag used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CreateRepository { .. } => "createRepository",
            Self::DeleteRepository { .. } => "deleteRepository",
            Self::CreateFile { .. } => "createFile",
            Self::DeleteFile { .. } => "deleteFile",
            Self::EditFile { .. } => "editFile",
            Self::AddTask { .. } => "addTask",
            Self::RemoveTask { .. } => "removeTask",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateRepository { repository, .. } => {
                write!(f, "create repository {}", repository.name())
            }
            Self::DeleteRepository { name } => write!(f, "delete repository {name}"),
            Self::CreateFile { repository, name, .. } => write!(f, "create file {repository}/{name}"),
            Self::DeleteFile { repository, name } => write!(f, "delete file {repository}/{name}"),
            Self::EditFile { repository, name, .. } => write!(f, "edit file {repository}/{name}"),
            Self::AddTask { repository, task, .. } => write!(f, "add task '{task}' to {repository}"),
            Self::RemoveTask {
                repository,
                end: QueueEnd::Front,
            } => write!(f, "remove first task of {repository}"),
            Self::RemoveTask {
                repository,
                end: QueueEnd::Back,
            } => write!(f, "remove last task of {repository}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let op = Operation::RemoveTask {
            repository: "proj".into(),
            end: QueueEnd::Back,
        };
        let json = serde_json::to_value(&op).expect("serialize operation");
        assert_eq!(json["type"], "removeTask");
        assert_eq!(json["end"], "back");
    }

    #[test]
    fn display_describes_the_action() {
        let op = Operation::EditFile {
            repository: "proj".into(),
            name: "a.txt".into(),
            content: "hi".into(),
        };
        assert_eq!(op.to_string(), "edit file proj/a.txt");
        assert_eq!(op.kind(), "editFile");
        assert_eq!(op.repository(), "proj");
    }
}
