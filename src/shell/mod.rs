/*!
 * Allocator Shell
 *
 * Line-oriented front end over a `MemoryManager`: declare processes,
 * dispatch the queue, free processes and inspect memory.
 */

mod command;

pub use command::{Command, HELP};

use crate::memory::{DispatchOutcome, MemoryError, MemoryManager};
use log::debug;
use miette::Diagnostic;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Shell errors
#[derive(Error, Debug, Diagnostic)]
pub enum ShellError {
    #[error("usage: {0}")]
    #[diagnostic(code(shell::usage))]
    Usage(&'static str),

    #[error("invalid number: '{0}'")]
    #[diagnostic(code(shell::invalid_number))]
    InvalidNumber(String),

    #[error("unknown command: '{0}' (try 'help')")]
    #[diagnostic(code(shell::unknown_command))]
    UnknownCommand(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(shell::io))]
    Io(#[from] io::Error),

    #[error("failed to encode statistics: {0}")]
    #[diagnostic(code(shell::encode))]
    Encode(#[from] serde_json::Error),
}

/// Whether the shell keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Shell session over one manager
pub struct Shell {
    manager: MemoryManager,
}

impl Shell {
    pub fn new(manager: MemoryManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &MemoryManager {
        &self.manager
    }

    /// Read commands until `exit` or end of input.
    ///
    /// Command errors are printed and the session continues; only I/O
    /// failures on `input` or `out` end it early.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> Result<(), ShellError> {
        for line in input.lines() {
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "error: {}", e)?;
                    continue;
                }
            };

            match self.execute(command, &mut out) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(ShellError::Io(e)) => return Err(ShellError::Io(e)),
                Err(e) => writeln!(out, "error: {}", e)?,
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Execute one command, writing its output to `out`
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow, ShellError> {
        debug!("Executing {:?}", command);
        match command {
            Command::Create {
                name,
                size,
                strategy,
            } => {
                let pid = self.manager.declare(&name, size, strategy)?;
                writeln!(
                    out,
                    "queued {} (PID {}, {} units, {})",
                    name, pid, size, strategy
                )?;
            }
            Command::Run => {
                let reports = self.manager.dispatch_all();
                if reports.is_empty() {
                    writeln!(out, "nothing to dispatch")?;
                }
                for report in &reports {
                    writeln!(out, "{}", report)?;
                }
                let placed = reports.iter().filter(|r| r.outcome.is_placed()).count();
                let deferred = reports
                    .iter()
                    .filter(|r| matches!(r.outcome, DispatchOutcome::Deferred { .. }))
                    .count();
                if !reports.is_empty() {
                    writeln!(
                        out,
                        "{} placed, {} rejected, {} deferred",
                        placed,
                        reports.len() - placed - deferred,
                        deferred
                    )?;
                }
                writeln!(out, "{}", self.manager.render_bar())?;
            }
            Command::Free { name } => {
                let record = self.manager.free(&name)?;
                writeln!(out, "freed {} ({} units)", record.name, record.size)?;
                writeln!(out, "{}", self.manager.render_bar())?;
            }
            Command::Cancel { name } => {
                let record = self.manager.cancel(&name)?;
                writeln!(out, "cancelled {}", record.name)?;
            }
            Command::Show => writeln!(out, "{}", self.manager.render())?,
            Command::Ps => {
                writeln!(out, "{:>4}  {:<16} {:>6}  {:<10} OFFSET", "PID", "NAME", "SIZE", "STRATEGY")?;
                for record in self.manager.processes() {
                    let offset = record
                        .offset
                        .map_or_else(|| "pending".to_string(), |o| o.to_string());
                    writeln!(
                        out,
                        "{:>4}  {:<16} {:>6}  {:<10} {}",
                        record.pid, record.name, record.size, record.strategy, offset
                    )?;
                }
            }
            Command::Stats => {
                let stats = self.manager.stats();
                writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }
}
