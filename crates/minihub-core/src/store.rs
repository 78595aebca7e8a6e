//! Repository storage with raw, unlogged mutation primitives.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::index::SearchIndex;
use crate::model::{File, Repository};
use crate::operation::{Operation, QueueEnd};

/// Owner of every repository, file and task.
///
/// Mutators here neither record undo entries nor write activity; the
/// [`Workspace`](crate::Workspace) layers both on top. [`apply`](Self::apply)
/// is the single entry point used to replay undo/redo history.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// Newest first.
    repositories: Vec<Repository>,
    names: SearchIndex,
}

impl EntityStore {
    /// Empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            repositories: Vec::new(),
            names: SearchIndex::new(),
        }
    }

    /// Number of live repositories.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.repositories.len()
    }

    /// Whether the store holds no repositories.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Whether a live repository has the name.
    #[must_use]
    pub fn contains_repository(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Repositories, most recently created first.
    #[must_use]
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Repository names, most recently created first.
    pub fn repository_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.repositories.iter().map(Repository::name)
    }

    /// Look up a repository by name.
    #[must_use]
    pub fn repository(&self, name: &str) -> Option<&Repository> {
        self.position_of(name).map(|position| &self.repositories[position])
    }

    /// File names of a repository, most recently created first.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] for an unknown repository.
    pub fn file_names(&self, repository: &str) -> Result<Vec<&str>> {
        Ok(self.require(repository)?.file_names().collect())
    }

    /// Current content of a file.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] or [`StoreError::FileNotFound`].
    pub fn file_content(&self, repository: &str, name: &str) -> Result<&str> {
        self.require(repository)?
            .file(name)
            .map(|file| file.content.as_str())
            .ok_or_else(|| StoreError::file_not_found(repository, name))
    }

    /// Queued tasks of a repository, oldest first.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] for an unknown repository.
    pub fn tasks(&self, repository: &str) -> Result<&VecDeque<String>> {
        Ok(self.require(repository)?.tasks())
    }

    /// Task that the next [`remove_task`](Self::remove_task) would return.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] for an unknown repository.
    pub fn peek_task(&self, repository: &str) -> Result<Option<&str>> {
        Ok(self.require(repository)?.tasks().front().map(String::as_str))
    }

    /// Create an empty repository at the head of the list.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryExists`] when the name is live.
    pub fn create_repository(&mut self, name: &str) -> Result<()> {
        self.insert_repository(0, Repository::new(name))
    }

    /// Delete a repository with its files and tasks.
    ///
    /// Returns the removed repository and the list position it occupied.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] when the name is not live.
    pub fn delete_repository(&mut self, name: &str) -> Result<(Repository, usize)> {
        let position = self
            .position_of(name)
            .ok_or_else(|| StoreError::RepositoryNotFound(name.to_owned()))?;
        self.names.remove(name);
        Ok((self.repositories.remove(position), position))
    }

    /// Create a file at the head of the repository's file list.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] or [`StoreError::FileExists`].
    pub fn create_file(&mut self, repository: &str, name: &str, content: impl Into<String>) -> Result<()> {
        self.require_mut(repository)?
            .insert_file(0, File::new(name, content))
    }

    /// Delete a file, returning its content and former list position.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] or [`StoreError::FileNotFound`].
    pub fn delete_file(&mut self, repository: &str, name: &str) -> Result<(String, usize)> {
        let (file, position) = self.require_mut(repository)?.remove_file(name)?;
        Ok((file.content, position))
    }

    /// Replace the content of a file, returning the previous content.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] or [`StoreError::FileNotFound`].
    pub fn edit_file(&mut self, repository: &str, name: &str, content: impl Into<String>) -> Result<String> {
        self.require_mut(repository)?
            .replace_content(name, content.into())
    }

    /// Enqueue a task at the tail.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] for an unknown repository.
    pub fn add_task(&mut self, repository: &str, task: impl Into<String>) -> Result<()> {
        self.push_task(repository, task.into(), QueueEnd::Back)
    }

    /// Dequeue the oldest task.
    ///
    /// # Errors
    /// Returns [`StoreError::RepositoryNotFound`] or [`StoreError::EmptyQueue`].
    pub fn remove_task(&mut self, repository: &str) -> Result<String> {
        self.pop_task(repository, QueueEnd::Front)
    }

    /// Perform `op` and return the operation that reverses it.
    ///
    /// # Errors
    /// Propagates the failure of the underlying primitive; the store is left
    /// unchanged in that case.
    pub fn apply(&mut self, op: Operation) -> Result<Operation> {
        debug!(kind = op.kind(), repository = op.repository(), "Applying operation");
        match op {
            Operation::CreateRepository { repository, position } => {
                let name = repository.name().to_owned();
                self.insert_repository(position, repository)?;
                Ok(Operation::DeleteRepository { name })
            }
            Operation::DeleteRepository { name } => {
                let (repository, position) = self.delete_repository(&name)?;
                Ok(Operation::CreateRepository { repository, position })
            }
            Operation::CreateFile {
                repository,
                name,
                content,
                position,
            } => {
                self.require_mut(&repository)?
                    .insert_file(position, File::new(name.as_str(), content))?;
                Ok(Operation::DeleteFile { repository, name })
            }
            Operation::DeleteFile { repository, name } => {
                let (file, position) = self.require_mut(&repository)?.remove_file(&name)?;
                Ok(Operation::CreateFile {
                    repository,
                    name,
                    content: file.content,
                    position,
                })
            }
            Operation::EditFile {
                repository,
                name,
                content,
            } => {
                let previous = self.edit_file(&repository, &name, content)?;
                Ok(Operation::EditFile {
                    repository,
                    name,
                    content: previous,
                })
            }
            Operation::AddTask { repository, task, end } => {
                self.push_task(&repository, task, end)?;
                Ok(Operation::RemoveTask { repository, end })
            }
            Operation::RemoveTask { repository, end } => {
                let task = self.pop_task(&repository, end)?;
                Ok(Operation::AddTask { repository, task, end })
            }
        }
    }

    fn insert_repository(&mut self, position: usize, repository: Repository) -> Result<()> {
        if !self.names.insert(repository.name()) {
            return Err(StoreError::RepositoryExists(repository.name().to_owned()));
        }
        let position = position.min(self.repositories.len());
        self.repositories.insert(position, repository);
        Ok(())
    }

    fn push_task(&mut self, repository: &str, task: String, end: QueueEnd) -> Result<()> {
        let tasks = self.require_mut(repository)?.tasks_mut();
        match end {
            QueueEnd::Front => tasks.push_front(task),
            QueueEnd::Back => tasks.push_back(task),
        }
        Ok(())
    }

    fn pop_task(&mut self, repository: &str, end: QueueEnd) -> Result<String> {
        let tasks = self.require_mut(repository)?.tasks_mut();
        let task = match end {
            QueueEnd::Front => tasks.pop_front(),
            QueueEnd::Back => tasks.pop_back(),
        };
        task.ok_or_else(|| StoreError::EmptyQueue(repository.to_owned()))
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        if !self.names.contains(name) {
            return None;
        }
        self.repositories.iter().position(|repo| repo.name() == name)
    }

    fn require(&self, name: &str) -> Result<&Repository> {
        self.repository(name)
            .ok_or_else(|| StoreError::RepositoryNotFound(name.to_owned()))
    }

    fn require_mut(&mut self, name: &str) -> Result<&mut Repository> {
        let position = self
            .position_of(name)
            .ok_or_else(|| StoreError::RepositoryNotFound(name.to_owned()))?;
        Ok(&mut self.repositories[position])
    }
}
