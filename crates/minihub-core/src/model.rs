//! Entities owned by the store.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::index::SearchIndex;

/// Named content blob, unique within its repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// File name.
    pub name: String,
    /// Latest content.
    pub content: String,
}

impl File {
    /// Build a file.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Named container of files and a FIFO task queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RepositoryRepr")]
pub struct Repository {
    name: String,
    files: Vec<File>,
    tasks: VecDeque<String>,
    #[serde(skip)]
    file_index: SearchIndex,
}

#[derive(Deserialize)]
struct RepositoryRepr {
    name: String,
    #[serde(default)]
    files: Vec<File>,
    #[serde(default)]
    tasks: VecDeque<String>,
}

impl TryFrom<RepositoryRepr> for Repository {
    type Error = StoreError;

    fn try_from(repr: RepositoryRepr) -> Result<Self> {
        let mut file_index = SearchIndex::new();
        for file in &repr.files {
            if !file_index.insert(file.name.as_str()) {
                return Err(StoreError::file_exists(&repr.name, &file.name));
            }
        }
        Ok(Self {
            name: repr.name,
            files: repr.files,
            tasks: repr.tasks,
            file_index,
        })
    }
}

impl PartialEq for Repository {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.files == other.files && self.tasks == other.tasks
    }
}

impl Eq for Repository {}

impl Repository {
    /// Empty repository.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            tasks: VecDeque::new(),
            file_index: SearchIndex::new(),
        }
    }

    /// Repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Files, most recently created first.
    #[must_use]
    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// File names, most recently created first.
    pub fn file_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.files.iter().map(|file| file.name.as_str())
    }

    /// Whether a live file has the name.
    #[must_use]
    pub fn contains_file(&self, name: &str) -> bool {
        self.file_index.contains(name)
    }

    /// Look up a file by name.
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&File> {
        if !self.contains_file(name) {
            return None;
        }
        self.files.iter().find(|file| file.name == name)
    }

    /// Queued tasks, oldest first.
    #[must_use]
    pub const fn tasks(&self) -> &VecDeque<String> {
        &self.tasks
    }

    pub(crate) fn insert_file(&mut self, position: usize, file: File) -> Result<()> {
        if !self.file_index.insert(file.name.as_str()) {
            return Err(StoreError::file_exists(&self.name, &file.name));
        }
        let position = position.min(self.files.len());
        self.files.insert(position, file);
        Ok(())
    }

    pub(crate) fn remove_file(&mut self, name: &str) -> Result<(File, usize)> {
        let position = self
            .position_of(name)
            .ok_or_else(|| StoreError::file_not_found(&self.name, name))?;
        self.file_index.remove(name);
        Ok((self.files.remove(position), position))
    }

    pub(crate) fn replace_content(&mut self, name: &str, content: String) -> Result<String> {
        let position = self
            .position_of(name)
            .ok_or_else(|| StoreError::file_not_found(&self.name, name))?;
        Ok(std::mem::replace(&mut self.files[position].content, content))
    }

    pub(crate) const fn tasks_mut(&mut self) -> &mut VecDeque<String> {
        &mut self.tasks
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        if !self.file_index.contains(name) {
            return None;
        }
        self.files.iter().position(|file| file.name == name)
    }
}
