//! Drives a [`ShellService`] from a line-oriented reader.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::warn;

use crate::command::parse_line;
use crate::service::{Reply, ShellService};

/// How a session reads and reports.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Printed before reading each line; `None` disables prompting.
    pub prompt: Option<String>,
    /// Echo each command before its reply.
    pub echo: bool,
    /// Stop at the first rejected or unparsable command.
    pub fail_fast: bool,
}

/// Counters collected over a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Commands executed (parsed successfully).
    pub executed: usize,
    /// Commands that failed to parse or were rejected by the workspace.
    pub failed: usize,
    /// Whether the session ended on a failure because of `fail_fast`.
    pub aborted: bool,
}

/// Feed every line of `input` to `service`, writing replies to `output`.
///
/// Ends at end of input or on `exit`.
///
/// # Errors
/// Returns an error when reading input or writing output fails.
pub fn run_session<R, W>(
    service: &mut ShellService,
    input: R,
    output: &mut W,
    options: &SessionOptions,
) -> Result<SessionSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();
    loop {
        if let Some(prompt) = &options.prompt {
            write!(output, "{prompt}")?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read command line")?;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!(%err, line = %line, "Unparsable command");
                writeln!(output, "error: {err}")?;
                summary.failed += 1;
                if options.fail_fast {
                    summary.aborted = true;
                    break;
                }
                continue;
            }
        };

        if options.echo {
            writeln!(output, "> {}", line.trim())?;
        }
        let reply = service.execute(command);
        summary.executed += 1;
        writeln!(output, "{reply}")?;

        if reply == Reply::Exit {
            break;
        }
        if reply.is_failure() {
            summary.failed += 1;
            if options.fail_fast {
                summary.aborted = true;
                break;
            }
        }
    }
    Ok(summary)
}
