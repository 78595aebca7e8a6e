//! Application layer for minihub.
//!
//! Actor resolution, project configuration, the shell command grammar and
//! the session loop shared by the interactive prompt and the script runner.

pub mod actor;
pub mod command;
pub mod config;
pub mod service;
pub mod session;

pub use actor::{actor_from_params_or_default, default_actor};
pub use command::{Command, ParseError, parse_line};
pub use config::{ActorConfig, ProjectConfig, ShellConfig};
pub use service::{Reply, ShellService};
pub use session::{SessionOptions, SessionSummary, run_session};
