//! Line-oriented command grammar of the interactive shell.

use std::vec::IntoIter;

/// Help text listing every command.
pub const HELP: &str = "\
repo create <name>                   create a repository
repo delete <name>                   delete a repository
repo list                            list repositories (newest first)
file create <repo> <name> <content>  create a file
file edit <repo> <name> <content>    replace the content of a file
file delete <repo> <name>            delete a file
file list <repo>                     list files (newest first)
file show <repo> <name>              print the content of a file
task add <repo> <text>               enqueue a task
task remove <repo>                   dequeue the oldest task
task list <repo>                     list tasks (oldest first)
undo | redo                          walk the undo/redo history
history                              show the activity history
show                                 print the workspace as JSON
help | exit";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `repo create <name>`
    CreateRepository {
        /// Repository name.
        name: String,
    },
    /// `repo delete <name>`
    DeleteRepository {
        /// Repository name.
        name: String,
    },
    /// `repo list`
    ListRepositories,
    /// `file create <repo> <name> <content...>`
    CreateFile {
        /// Owning repository.
        repository: String,
        /// File name.
        name: String,
        /// Initial content.
        content: String,
    },
    /// `file edit <repo> <name> <content...>`
    EditFile {
        /// Owning repository.
        repository: String,
        /// File name.
        name: String,
        /// New content.
        content: String,
    },
    /// `file delete <repo> <name>`
    DeleteFile {
        /// Owning repository.
        repository: String,
        /// File name.
        name: String,
    },
    /// `file list <repo>`
    ListFiles {
        /// Owning repository.
        repository: String,
    },
    /// `file show <repo> <name>`
    ShowFile {
        /// Owning repository.
        repository: String,
        /// File name.
        name: String,
    },
    /// `task add <repo> <text...>`
    AddTask {
        /// Owning repository.
        repository: String,
        /// Task text.
        task: String,
    },
    /// `task remove <repo>`
    RemoveTask {
        /// Owning repository.
        repository: String,
    },
    /// `task list <repo>`
    ListTasks {
        /// Owning repository.
        repository: String,
    },
    /// `undo`
    Undo,
    /// `redo`
    Redo,
    /// `history`
    History,
    /// `show`
    Show,
    /// `help`
    Help,
    /// `exit` or `quit`
    Exit,
}

/// Errors raised while parsing a command line.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Quoting in the line is unbalanced.
    #[error("cannot split line: {0}")]
    Split(#[from] shell_words::ParseError),

    /// The command word is not known.
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("{command}: missing <{argument}>")]
    MissingArgument {
        /// Command being parsed.
        command: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// Extra words follow a complete command.
    #[error("{command}: unexpected argument '{word}'")]
    UnexpectedArgument {
        /// Command being parsed.
        command: &'static str,
        /// First surplus word.
        word: String,
    },
}

/// Parse one line. Blank lines and `#` comments yield `None`.
///
/// # Errors
/// Returns [`ParseError`] for malformed lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let words = shell_words::split(trimmed)?;
    let mut words = words.into_iter();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let sub = words.next();

    let command = match head.as_str() {
        "repo" => parse_repo(sub.as_deref(), words),
        "file" => parse_file(sub.as_deref(), words),
        "task" => parse_task(sub.as_deref(), words),
        word => parse_bare(word, sub.as_deref()),
    }?;
    Ok(Some(command))
}

fn unknown_subcommand(group: &str, sub: Option<&str>) -> ParseError {
    let command = sub.map_or_else(|| group.to_owned(), |sub| format!("{group} {sub}"));
    ParseError::UnknownCommand(command)
}

fn parse_repo(sub: Option<&str>, words: IntoIter<String>) -> Result<Command, ParseError> {
    let command = match sub {
        Some("create") => {
            let mut args = Args::new("repo create", words);
            let name = args.required("name")?;
            args.finish()?;
            Command::CreateRepository { name }
        }
        Some("delete") => {
            let mut args = Args::new("repo delete", words);
            let name = args.required("name")?;
            args.finish()?;
            Command::DeleteRepository { name }
        }
        Some("list") => {
            Args::new("repo list", words).finish()?;
            Command::ListRepositories
        }
        other => return Err(unknown_subcommand("repo", other)),
    };
    Ok(command)
}

fn parse_file(sub: Option<&str>, words: IntoIter<String>) -> Result<Command, ParseError> {
    let command = match sub {
        Some("create") => {
            let mut args = Args::new("file create", words);
            Command::CreateFile {
                repository: args.required("repo")?,
                name: args.required("name")?,
                content: args.rest("content")?,
            }
        }
        Some("edit") => {
            let mut args = Args::new("file edit", words);
            Command::EditFile {
                repository: args.required("repo")?,
                name: args.required("name")?,
                content: args.rest("content")?,
            }
        }
        Some("delete") => {
            let mut args = Args::new("file delete", words);
            let repository = args.required("repo")?;
            let name = args.required("name")?;
            args.finish()?;
            Command::DeleteFile { repository, name }
        }
        Some("list") => {
            let mut args = Args::new("file list", words);
            let repository = args.required("repo")?;
            args.finish()?;
            Command::ListFiles { repository }
        }
        Some("show") => {
            let mut args = Args::new("file show", words);
            let repository = args.required("repo")?;
            let name = args.required("name")?;
            args.finish()?;
            Command::ShowFile { repository, name }
        }
        other => return Err(unknown_subcommand("file", other)),
    };
    Ok(command)
}

fn parse_task(sub: Option<&str>, words: IntoIter<String>) -> Result<Command, ParseError> {
    let command = match sub {
        Some("add") => {
            let mut args = Args::new("task add", words);
            Command::AddTask {
                repository: args.required("repo")?,
                task: args.rest("text")?,
            }
        }
        Some("remove") => {
            let mut args = Args::new("task remove", words);
            let repository = args.required("repo")?;
            args.finish()?;
            Command::RemoveTask { repository }
        }
        Some("list") => {
            let mut args = Args::new("task list", words);
            let repository = args.required("repo")?;
            args.finish()?;
            Command::ListTasks { repository }
        }
        other => return Err(unknown_subcommand("task", other)),
    };
    Ok(command)
}

// Single-word commands take no arguments.
fn parse_bare(word: &str, extra: Option<&str>) -> Result<Command, ParseError> {
    let command = match word {
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "history" => Command::History,
        "show" => Command::Show,
        "help" => Command::Help,
        "exit" | "quit" => Command::Exit,
        _ => return Err(ParseError::UnknownCommand(word.to_owned())),
    };
    if let Some(word) = extra {
        return Err(ParseError::UnexpectedArgument {
            command: "shell",
            word: word.to_owned(),
        });
    }
    Ok(command)
}

struct Args {
    command: &'static str,
    words: IntoIter<String>,
}

impl Args {
    const fn new(command: &'static str, words: IntoIter<String>) -> Self {
        Self { command, words }
    }

    fn required(&mut self, argument: &'static str) -> Result<String, ParseError> {
        self.words.next().ok_or(ParseError::MissingArgument {
            command: self.command,
            argument,
        })
    }

    /// Remaining words joined by single spaces; at least one is required.
    fn rest(&mut self, argument: &'static str) -> Result<String, ParseError> {
        let words: Vec<String> = self.words.by_ref().collect();
        if words.is_empty() {
            return Err(ParseError::MissingArgument {
                command: self.command,
                argument,
            });
        }
        Ok(words.join(" "))
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.words.next() {
            Some(word) => Err(ParseError::UnexpectedArgument {
                command: self.command,
                word,
            }),
            None => Ok(()),
        }
    }
}
