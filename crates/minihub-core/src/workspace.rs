//! Logging facade over the store: every user mutation records its inverse
//! and an activity entry.

use serde::Serialize;
use tracing::info;

use crate::activity::{ActivityHistory, ActivityRecord, Actor};
use crate::command_log::CommandLog;
use crate::error::{Result, StoreError};
use crate::model::Repository;
use crate::operation::{Operation, QueueEnd};
use crate::store::EntityStore;

/// Serializable view of a workspace.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceSnapshot<'a> {
    /// Repositories, most recently created first.
    pub repositories: &'a [Repository],
    /// Number of undoable operations.
    pub undo_depth: usize,
    /// Number of redoable operations.
    pub redo_depth: usize,
    /// Number of activity records.
    pub activity: usize,
}

/// Repositories plus undo/redo history and the activity log of one session.
#[derive(Debug, Clone)]
pub struct Workspace {
    store: EntityStore,
    log: CommandLog,
    history: ActivityHistory,
    actor: Actor,
}

impl Workspace {
    /// Empty workspace acting as `actor`.
    #[must_use]
    pub const fn new(actor: Actor) -> Self {
        Self {
            store: EntityStore::new(),
            log: CommandLog::new(),
            history: ActivityHistory::new(),
            actor,
        }
    }

    /// Actor recorded on new activity.
    #[must_use]
    pub const fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Switch the acting user for subsequent activity.
    pub fn set_actor(&mut self, actor: Actor) {
        self.actor = actor;
    }

    /// Read access to the store.
    #[must_use]
    pub const fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Read access to the undo/redo history.
    #[must_use]
    pub const fn command_log(&self) -> &CommandLog {
        &self.log
    }

    /// Activity records, oldest first.
    #[must_use]
    pub fn activity(&self) -> &[ActivityRecord] {
        self.history.records()
    }

    /// Serializable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> WorkspaceSnapshot<'_> {
        WorkspaceSnapshot {
            repositories: self.store.repositories(),
            undo_depth: self.log.undo_len(),
            redo_depth: self.log.redo_len(),
            activity: self.history.len(),
        }
    }

    /// Repository names, most recently created first.
    #[must_use]
    pub fn repository_names(&self) -> Vec<&str> {
        self.store.repository_names().collect()
    }

    /// File names of a repository, most recently created first.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] for an unknown repository.
    pub fn file_names(&self, repository: &str) -> Result<Vec<&str>> {
        self.store.file_names(repository)
    }

    /// Content of a file.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] or [`StoreError::FileNotFound`].
    pub fn read_file(&self, repository: &str, name: &str) -> Result<&str> {
        self.store.file_content(repository, name)
    }

    /// Queued tasks, oldest first.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] for an unknown repository.
    pub fn tasks(&self, repository: &str) -> Result<Vec<&str>> {
        Ok(self.store.tasks(repository)?.iter().map(String::as_str).collect())
    }

    /// Create an empty repository.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryExists`] when the name is live.
    pub fn create_repository(&mut self, name: &str) -> Result<()> {
        self.store.create_repository(name)?;
        self.commit(
            Operation::DeleteRepository { name: name.to_owned() },
            format!("Created Repository: {name}"),
        );
        Ok(())
    }

    /// Delete a repository with its files and tasks.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] when the name is not live.
    pub fn delete_repository(&mut self, name: &str) -> Result<()> {
        let (repository, position) = self.store.delete_repository(name)?;
        self.commit(
            Operation::CreateRepository { repository, position },
            format!("Deleted Repository: {name}"),
        );
        Ok(())
    }

    /// Create a file.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] or [`StoreError::FileExists`].
    pub fn create_file(&mut self, repository: &str, name: &str, content: impl Into<String>) -> Result<()> {
        self.store.create_file(repository, name, content)?;
        self.commit(
            Operation::DeleteFile {
                repository: repository.to_owned(),
                name: name.to_owned(),
            },
            format!("Created File: {name}"),
        );
        Ok(())
    }

    /// Replace the content of a file, returning the previous content.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] or [`StoreError::FileNotFound`].
    pub fn edit_file(&mut self, repository: &str, name: &str, content: impl Into<String>) -> Result<String> {
        let previous = self.store.edit_file(repository, name, content)?;
        self.commit(
            Operation::EditFile {
                repository: repository.to_owned(),
                name: name.to_owned(),
                content: previous.clone(),
            },
            format!("Edited File: {name}"),
        );
        Ok(previous)
    }

    /// Delete a file, returning its content.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] or [`StoreError::FileNotFound`].
    pub fn delete_file(&mut self, repository: &str, name: &str) -> Result<String> {
        let (content, position) = self.store.delete_file(repository, name)?;
        self.commit(
            Operation::CreateFile {
                repository: repository.to_owned(),
                name: name.to_owned(),
                content: content.clone(),
                position,
            },
            format!("Deleted File: {name}"),
        );
        Ok(content)
    }

    /// Enqueue a task.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] for an unknown repository.
    pub fn add_task(&mut self, repository: &str, task: impl Into<String>) -> Result<()> {
        let task = task.into();
        let description = format!("Added Task: {task}");
        self.store.add_task(repository, task)?;
        self.commit(
            Operation::RemoveTask {
                repository: repository.to_owned(),
                end: QueueEnd::Back,
            },
            description,
        );
        Ok(())
    }

    /// Dequeue the oldest task.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] or [`StoreError::EmptyQueue`].
    pub fn remove_task(&mut self, repository: &str) -> Result<String> {
        let task = self.store.remove_task(repository)?;
        self.commit(
            Operation::AddTask {
                repository: repository.to_owned(),
                task: task.clone(),
                end: QueueEnd::Front,
            },
            format!("Removed Task: {task}"),
        );
        Ok(task)
    }

    /// Reverse the most recent mutation, returning the operation applied.
    ///
    /// # Errors
    /// Returns [`StoreError::NothingToUndo`] on an empty history. A failing
    /// apply puts the entry back and leaves the store untouched.
    pub fn undo(&mut self) -> Result<Operation> {
        let op = self.log.pop_undo().ok_or(StoreError::NothingToUndo)?;
        match self.store.apply(op.clone()) {
            Ok(inverse) => {
                self.log.push_redo(inverse);
                self.history.append(&self.actor, format!("Undo: {op}"));
                info!(kind = op.kind(), repository = op.repository(), "Undo");
                Ok(op)
            }
            Err(err) => {
                self.log.push_undo(op);
                Err(err)
            }
        }
    }

    /// Re-apply the most recently undone mutation, returning the operation applied.
    ///
    /// # Errors
    /// Returns [`StoreError::NothingToRedo`] when nothing was undone since the
    /// last mutation. A failing apply puts the entry back and leaves the
    /// store untouched.
    pub fn redo(&mut self) -> Result<Operation> {
        let op = self.log.pop_redo().ok_or(StoreError::NothingToRedo)?;
        match self.store.apply(op.clone()) {
            Ok(inverse) => {
                self.log.push_undo(inverse);
                self.history.append(&self.actor, format!("Redo: {op}"));
                info!(kind = op.kind(), repository = op.repository(), "Redo");
                Ok(op)
            }
            Err(err) => {
                self.log.push_redo(op);
                Err(err)
            }
        }
    }

    fn commit(&mut self, inverse: Operation, description: String) {
        info!(actor = %self.actor.name, %description, "Recorded activity");
        self.log.record(inverse);
        self.history.append(&self.actor, description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn workspace() -> Workspace {
        Workspace::new(Actor::new("tester", "tester@example.invalid"))
    }

    #[test]
    fn duplicate_create_keeps_one_repository() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        let err = ws.create_repository("proj").expect_err("duplicate");
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(ws.repository_names(), vec!["proj"]);
        assert_eq!(ws.activity().len(), 1);
        assert_eq!(ws.command_log().undo_len(), 1);
    }

    #[test]
    fn undo_restores_edited_content() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create repo");
        ws.create_file("proj", "a.txt", "hi").expect("create file");
        ws.edit_file("proj", "a.txt", "bye").expect("edit");
        ws.undo().expect("undo");
        assert_eq!(ws.read_file("proj", "a.txt"), Ok("hi"));
    }

    #[test]
    fn task_queue_drains_in_order() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create repo");
        ws.add_task("proj", "t1").expect("add t1");
        ws.add_task("proj", "t2").expect("add t2");
        assert_eq!(ws.remove_task("proj"), Ok("t1".to_owned()));
        assert_eq!(ws.remove_task("proj"), Ok("t2".to_owned()));
        assert_eq!(
            ws.remove_task("proj").map_err(|e| e.kind()),
            Err(ErrorKind::Empty)
        );
    }

    #[test]
    fn recreate_after_delete() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        ws.delete_repository("proj").expect("delete");
        ws.create_repository("proj").expect("recreate");
        assert_eq!(ws.repository_names(), vec!["proj"]);
    }

    #[test]
    fn undo_on_empty_history_is_reported() {
        let mut ws = workspace();
        assert_eq!(ws.undo(), Err(StoreError::NothingToUndo));
        assert_eq!(ws.redo(), Err(StoreError::NothingToRedo));
        assert!(ws.activity().is_empty());
        assert!(ws.store().is_empty());
    }

    #[test]
    fn undo_of_delete_restores_contents_and_position() {
        let mut ws = workspace();
        for name in ["a", "proj", "b"] {
            ws.create_repository(name).expect("create");
        }
        ws.create_file("proj", "x", "1").expect("create x");
        ws.create_file("proj", "y", "2").expect("create y");
        ws.add_task("proj", "t1").expect("add");
        let before = ws.store().repositories().to_vec();

        ws.delete_repository("proj").expect("delete");
        ws.undo().expect("undo");
        assert_eq!(ws.store().repositories(), before.as_slice());
        assert_eq!(ws.repository_names(), vec!["b", "proj", "a"]);
    }

    #[test]
    fn undo_of_delete_restores_a_repository_with_list_shaped_files() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        for n in 0..10_000 {
            ws.create_file("proj", &format!("f{n:07}"), "").expect("create file");
        }
        ws.delete_repository("proj").expect("delete");
        ws.undo().expect("undo");
        assert_eq!(ws.file_names("proj").expect("files").len(), 10_000);
        ws.redo().expect("redo");
        assert!(ws.store().is_empty());
    }

    #[test]
    fn failed_undo_keeps_the_entry_and_the_state() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        ws.log.push_undo(Operation::RemoveTask {
            repository: "proj".into(),
            end: QueueEnd::Front,
        });
        let before = ws.store().repositories().to_vec();

        assert_eq!(ws.undo(), Err(StoreError::EmptyQueue("proj".into())));
        assert_eq!(ws.command_log().undo_len(), 2);
        assert_eq!(ws.command_log().redo_len(), 0);
        assert_eq!(ws.store().repositories(), before.as_slice());
        assert_eq!(ws.activity().len(), 1);
    }

    #[test]
    fn failed_redo_keeps_the_entry_and_the_state() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        ws.log.push_redo(Operation::DeleteRepository { name: "ghost".into() });
        let before = ws.store().repositories().to_vec();

        assert_eq!(ws.redo(), Err(StoreError::RepositoryNotFound("ghost".into())));
        assert_eq!(ws.command_log().undo_len(), 1);
        assert_eq!(ws.command_log().redo_len(), 1);
        assert_eq!(ws.store().repositories(), before.as_slice());
        assert_eq!(ws.activity().len(), 1);
    }

    #[test]
    fn undo_of_remove_task_puts_it_back_at_the_head() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        ws.add_task("proj", "t1").expect("add t1");
        ws.add_task("proj", "t2").expect("add t2");
        ws.remove_task("proj").expect("remove");
        ws.undo().expect("undo");
        assert_eq!(ws.tasks("proj"), Ok(vec!["t1", "t2"]));
    }

    #[test]
    fn undo_of_add_task_drops_the_tail() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        ws.add_task("proj", "t1").expect("add t1");
        ws.add_task("proj", "t2").expect("add t2");
        ws.undo().expect("undo");
        assert_eq!(ws.tasks("proj"), Ok(vec!["t1"]));
    }

    #[test]
    fn redo_reapplies_and_new_mutation_clears_redo() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        ws.create_file("proj", "a.txt", "hi").expect("create file");

        ws.undo().expect("undo");
        assert!(ws.file_names("proj").expect("files").is_empty());
        ws.redo().expect("redo");
        assert_eq!(ws.read_file("proj", "a.txt"), Ok("hi"));

        ws.undo().expect("undo again");
        ws.add_task("proj", "t").expect("add");
        assert!(!ws.command_log().can_redo());
        assert_eq!(ws.redo(), Err(StoreError::NothingToRedo));
    }

    #[test]
    fn undo_redo_never_grow_history() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        for _ in 0..5 {
            ws.undo().expect("undo");
            ws.redo().expect("redo");
        }
        assert_eq!(ws.command_log().undo_len(), 1);
        assert_eq!(ws.command_log().redo_len(), 0);
        assert_eq!(ws.repository_names(), vec!["proj"]);
    }

    #[test]
    fn activity_describes_each_mutation() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        ws.create_file("proj", "a.txt", "hi").expect("create file");
        ws.add_task("proj", "t1").expect("add");
        ws.undo().expect("undo");
        let descriptions: Vec<_> = ws.activity().iter().map(|r| r.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Created Repository: proj",
                "Created File: a.txt",
                "Added Task: t1",
                "Undo: remove last task of proj",
            ]
        );
    }

    #[test]
    fn failed_mutation_records_nothing() {
        let mut ws = workspace();
        assert!(ws.create_file("ghost", "a", "b").is_err());
        assert!(ws.delete_repository("ghost").is_err());
        assert!(ws.activity().is_empty());
        assert!(!ws.command_log().can_undo());
    }

    #[test]
    fn snapshot_serializes_repositories() {
        let mut ws = workspace();
        ws.create_repository("proj").expect("create");
        ws.add_task("proj", "t1").expect("add");
        let json = serde_json::to_value(ws.snapshot()).expect("serialize");
        assert_eq!(json["repositories"][0]["name"], "proj");
        assert_eq!(json["repositories"][0]["tasks"][0], "t1");
        assert_eq!(json["undo_depth"], 2);
    }
}
