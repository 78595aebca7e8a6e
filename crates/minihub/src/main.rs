//! CLI entry point for minihub.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use minihub_app::{ProjectConfig, SessionOptions, ShellService, actor_from_params_or_default, run_session};

/// In-memory repositories, files and task queues with undo/redo.
#[derive(Parser, Debug)]
#[command(
    name = "minihub",
    version,
    about = "minihub: simulate repositories, files and task queues with undo/redo"
)]
struct Cli {
    /// Configuration file (defaults to the nearest .minihub/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Actor name recorded in the activity history.
    #[arg(long)]
    actor_name: Option<String>,

    /// Actor email recorded in the activity history.
    #[arg(long)]
    actor_email: Option<String>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read commands interactively from stdin.
    Shell,

    /// Execute commands from a script file.
    Run {
        /// Script with one command per line.
        script: PathBuf,
        /// Stop at the first failed command.
        #[arg(long)]
        fail_fast: bool,
        /// Echo each command before its reply.
        #[arg(long)]
        echo: bool,
    },
}

fn main() -> Result<ExitCode> {
    let Cli {
        config,
        actor_name,
        actor_email,
        cmd,
    } = Cli::parse();
    install_tracing();

    let config = match config {
        Some(path) => ProjectConfig::from_file(&path)?,
        None => ProjectConfig::discover(std::env::current_dir()?)?,
    };
    let actor = actor_from_params_or_default(actor_name.as_deref(), actor_email.as_deref(), &config.actor);
    info!(actor = %actor.name, "Starting session");
    let mut service = ShellService::new(actor);

    execute_command(&mut service, &config, cmd.unwrap_or(Command::Shell))
}

fn execute_command(service: &mut ShellService, config: &ProjectConfig, command: Command) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    match command {
        Command::Shell => {
            let stdin = io::stdin();
            let options = SessionOptions {
                prompt: stdin.is_terminal().then(|| config.shell.prompt.clone()),
                echo: config.shell.echo,
                fail_fast: false,
            };
            run_session(service, stdin.lock(), &mut stdout, &options)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            script,
            fail_fast,
            echo,
        } => {
            let file = File::open(&script).with_context(|| format!("failed to open {}", script.display()))?;
            let options = SessionOptions {
                prompt: None,
                echo: echo || config.shell.echo,
                fail_fast,
            };
            let summary = run_session(service, BufReader::new(file), &mut stdout, &options)?;
            info!(
                executed = summary.executed,
                failed = summary.failed,
                "Script finished"
            );
            Ok(if summary.aborted {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

fn install_tracing() {
    // RUST_LOG overrides; replies go to stdout so logs stay on stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}
