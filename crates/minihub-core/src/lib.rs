//! Core of minihub: in-memory repositories, files and task queues with
//! undo/redo history and an activity log.

/// Activity history and actors.
pub mod activity;
/// Undo/redo stacks.
pub mod command_log;
/// Error types.
pub mod error;
/// Identifier types.
pub mod id;
/// Ordered key index.
pub mod index;
/// Repository and file entities.
pub mod model;
/// Reversible operations.
pub mod operation;
/// Entity storage.
pub mod store;
/// Logging facade used by front-ends.
pub mod workspace;

pub use activity::{ActivityHistory, ActivityRecord, Actor};
pub use command_log::CommandLog;
pub use error::{ErrorKind, Result, StoreError};
pub use id::ActivityId;
pub use index::SearchIndex;
pub use model::{File, Repository};
pub use operation::{Operation, QueueEnd};
pub use store::EntityStore;
pub use workspace::{Workspace, WorkspaceSnapshot};
