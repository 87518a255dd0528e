// src/engine/matcher.rs

//! Invocation → command resolution.

use crate::config::{CommandConfig, Config, MatchMode};
use crate::errors::{Result, SimError};

/// Which rule selected a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The invocation equals the command's `args`.
    Exact,
    /// The command uses `match: contains` and its `args` occur in the
    /// invocation.
    Contains,
    /// Nothing matched; the `defaultCommand` was used.
    Default,
}

#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub command: &'a CommandConfig,
    pub kind: MatchKind,
}

/// Find the command for `invocation`, without falling back to the default.
///
/// An exact match on any command wins over every `contains` match.
/// Otherwise the first `contains` command, in config order, whose `args`
/// is a substring of the invocation is returned.
pub fn resolve<'a>(config: &'a Config, invocation: &str) -> Option<Match<'a>> {
    if let Some(command) = config.command_by_args(invocation) {
        return Some(Match {
            command,
            kind: MatchKind::Exact,
        });
    }

    config
        .commands()
        .iter()
        .find(|c| c.match_mode == MatchMode::Contains && invocation.contains(c.args.as_str()))
        .map(|command| Match {
            command,
            kind: MatchKind::Contains,
        })
}

/// Like [`resolve`], falling back to the default command.
///
/// Fails with [`SimError::NoMatchingCommand`] when there is neither a match
/// nor a default.
pub fn select<'a>(config: &'a Config, invocation: &str) -> Result<Match<'a>> {
    if let Some(m) = resolve(config, invocation) {
        return Ok(m);
    }

    config
        .default_command()
        .map(|command| Match {
            command,
            kind: MatchKind::Default,
        })
        .ok_or_else(|| SimError::NoMatchingCommand(invocation.to_string()))
}
