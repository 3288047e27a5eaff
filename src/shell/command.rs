/*!
 * Shell Commands
 * Line parsing for the allocator shell
 */

use super::ShellError;
use crate::core::types::Size;
use crate::memory::Strategy;

/// One shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Declare a process and queue it for placement
    Create {
        name: String,
        size: Size,
        strategy: Strategy,
    },
    /// Dispatch the request queue
    Run,
    /// Free a placed process
    Free { name: String },
    /// Withdraw a process that is still pending
    Cancel { name: String },
    /// Print the memory bar and legend
    Show,
    /// List registered processes
    Ps,
    /// Print statistics as JSON
    Stats,
    Help,
    Exit,
}

impl Command {
    /// Parse a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, ShellError> {
        let line = line.split('#').next().unwrap_or("").trim();
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "create" | "new" => {
                let [name, size, strategy] = args.as_slice() else {
                    return Err(ShellError::Usage("create <name> <size> <strategy>"));
                };
                let size = size
                    .parse::<Size>()
                    .map_err(|_| ShellError::InvalidNumber(size.to_string()))?;
                Command::Create {
                    name: name.to_string(),
                    size,
                    strategy: strategy.parse()?,
                }
            }
            "run" | "dispatch" => Self::no_args(&args, Command::Run, "run")?,
            "free" => Command::Free {
                name: Self::single_name(&args, "free <name>")?,
            },
            "cancel" => Command::Cancel {
                name: Self::single_name(&args, "cancel <name>")?,
            },
            "show" => Self::no_args(&args, Command::Show, "show")?,
            "ps" => Self::no_args(&args, Command::Ps, "ps")?,
            "stats" => Self::no_args(&args, Command::Stats, "stats")?,
            "help" | "?" => Command::Help,
            "exit" | "quit" => Command::Exit,
            _ => return Err(ShellError::UnknownCommand(verb.to_string())),
        };
        Ok(Some(command))
    }

    fn no_args(args: &[&str], command: Command, usage: &'static str) -> Result<Command, ShellError> {
        if args.is_empty() {
            Ok(command)
        } else {
            Err(ShellError::Usage(usage))
        }
    }

    fn single_name(args: &[&str], usage: &'static str) -> Result<String, ShellError> {
        match args {
            [name] => Ok(name.to_string()),
            _ => Err(ShellError::Usage(usage)),
        }
    }
}

pub const HELP: &str = "\
commands:
  create <name> <size> <strategy>   declare a process (first-fit, next-fit, best-fit, quick-fit, worst-fit or 1-5)
  run                               place every queued process
  free <name>                       release a placed process
  cancel <name>                     withdraw a process that is still queued
  show                              print the memory bar
  ps                                list registered processes
  stats                             print statistics as JSON
  exit                              leave the shell";
