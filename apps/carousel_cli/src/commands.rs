//! Line commands read from stdin.

use std::time::Duration;

use anyhow::{bail, Context, Result};

pub const HELP: &str = "commands: n|next, p|prev, g|goto <slide>, start [ms], stop, status, help, q|quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    /// 1-based position, as shown by the dot indicators.
    GoTo { position: usize },
    Start { interval: Option<Duration> },
    Stop,
    Status,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command; {HELP}");
        };
        let argument = words.next();
        if words.next().is_some() {
            bail!("too many arguments; {HELP}");
        }

        let command = match (verb.to_ascii_lowercase().as_str(), argument) {
            ("n" | "next", None) => Self::Next,
            ("p" | "prev" | "previous", None) => Self::Previous,
            ("g" | "goto", Some(position)) => Self::GoTo {
                position: position
                    .parse()
                    .with_context(|| format!("'{position}' is not a slide number"))?,
            },
            ("start", None) => Self::Start { interval: None },
            ("start", Some(ms)) => Self::Start {
                interval: Some(Duration::from_millis(
                    ms.parse()
                        .with_context(|| format!("'{ms}' is not a millisecond interval"))?,
                )),
            },
            ("stop", None) => Self::Stop,
            ("status", None) => Self::Status,
            ("h" | "help" | "?", None) => Self::Help,
            ("q" | "quit" | "exit", None) => Self::Quit,
            _ => bail!("unrecognized command '{}'; {HELP}", line.trim()),
        };
        Ok(command)
    }
}

/// Maps a 1-based dot position to a slide index. Position 0 has no slide.
/// Positions past the end are passed through; the controller ignores them.
pub fn index_for_position(position: usize) -> Option<usize> {
    position.checked_sub(1)
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
