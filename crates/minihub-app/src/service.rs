//! Executes parsed shell commands against a [`Workspace`].

use std::fmt;

use minihub_core::{ActivityRecord, Actor, StoreError, Workspace};
use time::format_description::well_known::Rfc3339;
use tracing::{debug, warn};

use crate::command::{Command, HELP};

/// Outcome of one command, rendered with [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Repository created.
    RepositoryCreated(String),
    /// Repository deleted.
    RepositoryDeleted(String),
    /// Repository names, newest first.
    Repositories(Vec<String>),
    /// File created.
    FileCreated,
    /// File edited.
    FileEdited,
    /// File deleted.
    FileDeleted,
    /// File names of a repository, newest first.
    Files {
        /// Owning repository.
        repository: String,
        /// File names.
        names: Vec<String>,
    },
    /// Content of one file.
    FileContent(String),
    /// Task queued.
    TaskAdded,
    /// Task dequeued.
    TaskRemoved(String),
    /// Queued tasks, oldest first.
    Tasks {
        /// Owning repository.
        repository: String,
        /// Task texts.
        tasks: Vec<String>,
    },
    /// Undo applied the operation.
    Undone(String),
    /// Redo applied the operation.
    Redone(String),
    /// Activity history lines.
    History(Vec<String>),
    /// JSON rendering of the workspace.
    Snapshot(String),
    /// The workspace could not be rendered as JSON.
    SnapshotFailed(String),
    /// Help text.
    Help,
    /// The session should end.
    Exit,
    /// The workspace rejected the command.
    Failed(StoreError),
}

impl Reply {
    /// Whether the command failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::SnapshotFailed(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RepositoryCreated(name) => write!(f, "Repository '{name}' created."),
            Self::RepositoryDeleted(_) => f.write_str("Repository deleted."),
            Self::Repositories(names) if names.is_empty() => f.write_str("No repositories."),
            Self::Repositories(names) => {
                f.write_str("Repositories:")?;
                write_items(f, names)
            }
            Self::FileCreated => f.write_str("File created successfully."),
            Self::FileEdited => f.write_str("File edited successfully."),
            Self::FileDeleted => f.write_str("File deleted successfully."),
            Self::Files { names, .. } if names.is_empty() => f.write_str("No files."),
            Self::Files { repository, names } => {
                write!(f, "Files in {repository}:")?;
                write_items(f, names)
            }
            Self::FileContent(content) => f.write_str(content),
            Self::TaskAdded => f.write_str("Task added."),
            Self::TaskRemoved(task) => write!(f, "Task removed: {task}"),
            Self::Tasks { tasks, .. } if tasks.is_empty() => f.write_str("No tasks."),
            Self::Tasks { repository, tasks } => {
                write!(f, "Tasks in {repository}:")?;
                write_items(f, tasks)
            }
            Self::Undone(op) => write!(f, "Undo performed: {op}"),
            Self::Redone(op) => write!(f, "Redo performed: {op}"),
            Self::History(lines) if lines.is_empty() => f.write_str("No commits yet."),
            Self::History(lines) => {
                f.write_str("=== Commit History ===")?;
                for line in lines {
                    write!(f, "\n{line}")?;
                }
                Ok(())
            }
            Self::Snapshot(json) => f.write_str(json),
            Self::SnapshotFailed(reason) => write!(f, "Cannot render workspace: {reason}"),
            Self::Help => f.write_str(HELP),
            Self::Exit => f.write_str("Exiting..."),
            Self::Failed(err) => f.write_str(failure_message(err)),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[String]) -> fmt::Result {
    for item in items {
        write!(f, "\n- {item}")?;
    }
    Ok(())
}

const fn failure_message(err: &StoreError) -> &'static str {
    match err {
        StoreError::RepositoryExists(_) => "Repository already exists!",
        StoreError::RepositoryNotFound(_) => "Repository not found.",
        StoreError::FileExists { .. } => "File already exists!",
        StoreError::FileNotFound { .. } => "File not found.",
        StoreError::EmptyQueue(_) => "No tasks.",
        StoreError::NothingToUndo => "Nothing to undo.",
        StoreError::NothingToRedo => "Nothing to redo.",
    }
}

/// Shell session wrapping one [`Workspace`].
#[derive(Debug, Clone)]
pub struct ShellService {
    workspace: Workspace,
}

impl ShellService {
    /// Start a session with an empty workspace.
    #[must_use]
    pub const fn new(actor: Actor) -> Self {
        Self {
            workspace: Workspace::new(actor),
        }
    }

    /// Borrow the workspace.
    #[must_use]
    pub const fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Execute one command.
    pub fn execute(&mut self, command: Command) -> Reply {
        debug!(?command, "Executing command");
        let ws = &mut self.workspace;
        let outcome = match command {
            Command::CreateRepository { name } => ws
                .create_repository(&name)
                .map(|()| Reply::RepositoryCreated(name)),
            Command::DeleteRepository { name } => ws
                .delete_repository(&name)
                .map(|()| Reply::RepositoryDeleted(name)),
            Command::ListRepositories => Ok(Reply::Repositories(owned(ws.repository_names()))),
            Command::CreateFile {
                repository,
                name,
                content,
            } => ws
                .create_file(&repository, &name, content)
                .map(|()| Reply::FileCreated),
            Command::EditFile {
                repository,
                name,
                content,
            } => ws
                .edit_file(&repository, &name, content)
                .map(|_| Reply::FileEdited),
            Command::DeleteFile { repository, name } => ws
                .delete_file(&repository, &name)
                .map(|_| Reply::FileDeleted),
            Command::ListFiles { repository } => ws
                .file_names(&repository)
                .map(owned)
                .map(|names| Reply::Files { repository, names }),
            Command::ShowFile { repository, name } => ws
                .read_file(&repository, &name)
                .map(|content| Reply::FileContent(content.to_owned())),
            Command::AddTask { repository, task } => {
                ws.add_task(&repository, task).map(|()| Reply::TaskAdded)
            }
            Command::RemoveTask { repository } => ws.remove_task(&repository).map(Reply::TaskRemoved),
            Command::ListTasks { repository } => ws
                .tasks(&repository)
                .map(owned)
                .map(|tasks| Reply::Tasks { repository, tasks }),
            Command::Undo => ws.undo().map(|op| Reply::Undone(op.to_string())),
            Command::Redo => ws.redo().map(|op| Reply::Redone(op.to_string())),
            Command::History => Ok(Reply::History(ws.activity().iter().map(history_line).collect())),
            Command::Show => Ok(serde_json::to_string_pretty(&ws.snapshot()).map_or_else(
                |err| {
                    warn!(%err, "Snapshot serialization failed");
                    Reply::SnapshotFailed(err.to_string())
                },
                Reply::Snapshot,
            )),
            Command::Help => Ok(Reply::Help),
            Command::Exit => Ok(Reply::Exit),
        };
        outcome.unwrap_or_else(|err| {
            debug!(%err, "Command rejected");
            Reply::Failed(err)
        })
    }
}

fn owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_owned).collect()
}

fn history_line(record: &ActivityRecord) -> String {
    let ts = record
        .ts
        .format(&Rfc3339)
        .unwrap_or_else(|_| record.ts.unix_timestamp().to_string());
    format!("[{ts}] {} - {}", record.actor.name, record.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_line;

    fn run(service: &mut ShellService, line: &str) -> Reply {
        let command = parse_line(line)
            .expect("line should parse")
            .expect("line should hold a command");
        service.execute(command)
    }

    fn service() -> ShellService {
        ShellService::new(Actor::new("Shiwani", "shiwani@example.invalid"))
    }

    #[test]
    fn replies_use_menu_wording() {
        let mut svc = service();
        assert_eq!(run(&mut svc, "repo create proj").to_string(), "Repository 'proj' created.");
        assert_eq!(run(&mut svc, "repo create proj").to_string(), "Repository already exists!");
        assert_eq!(run(&mut svc, "task remove proj").to_string(), "No tasks.");
        assert_eq!(run(&mut svc, "file show proj a.txt").to_string(), "File not found.");
        assert_eq!(run(&mut svc, "repo list").to_string(), "Repositories:\n- proj");
    }

    #[test]
    fn file_and_task_round_trip_through_the_shell() {
        let mut svc = service();
        run(&mut svc, "repo create proj");
        assert_eq!(run(&mut svc, "file create proj a.txt hi there"), Reply::FileCreated);
        assert_eq!(run(&mut svc, "file edit proj a.txt bye"), Reply::FileEdited);
        assert_eq!(run(&mut svc, "undo"), Reply::Undone("edit file proj/a.txt".into()));
        assert_eq!(run(&mut svc, "file show proj a.txt"), Reply::FileContent("hi there".into()));

        run(&mut svc, "task add proj t1");
        run(&mut svc, "task add proj t2");
        assert_eq!(run(&mut svc, "task list proj").to_string(), "Tasks in proj:\n- t1\n- t2");
        assert_eq!(run(&mut svc, "task remove proj"), Reply::TaskRemoved("t1".into()));
    }

    #[test]
    fn empty_history_and_undo() {
        let mut svc = service();
        assert_eq!(run(&mut svc, "history").to_string(), "No commits yet.");
        let reply = run(&mut svc, "undo");
        assert!(reply.is_failure());
        assert_eq!(reply.to_string(), "Nothing to undo.");
        assert_eq!(run(&mut svc, "redo").to_string(), "Nothing to redo.");
    }

    #[test]
    fn history_lists_actor_and_description() {
        let mut svc = service();
        run(&mut svc, "repo create proj");
        let Reply::History(lines) = run(&mut svc, "history") else {
            panic!("expected history reply");
        };
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("] Shiwani - Created Repository: proj"));
    }

    #[test]
    fn show_prints_json_snapshot() {
        let mut svc = service();
        run(&mut svc, "repo create proj");
        let Reply::Snapshot(json) = run(&mut svc, "show") else {
            panic!("expected snapshot reply");
        };
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["repositories"][0]["name"], "proj");
    }

    #[test]
    fn snapshot_failure_counts_as_a_failed_command() {
        let reply = Reply::SnapshotFailed("key must be a string".into());
        assert!(reply.is_failure());
        assert!(!Reply::Snapshot("{}".into()).is_failure());
        assert_eq!(reply.to_string(), "Cannot render workspace: key must be a string");
    }

    #[test]
    fn listing_unknown_repository_fails() {
        let mut svc = service();
        assert_eq!(
            run(&mut svc, "file list ghost"),
            Reply::Failed(StoreError::RepositoryNotFound("ghost".into()))
        );
        assert_eq!(run(&mut svc, "repo list").to_string(), "No repositories.");
    }
}
