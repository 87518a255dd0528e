// src/cli.rs

//! CLI argument capture using `clap`.
//!
//! simcli stands in for another program, so every argument belongs to the
//! simulated invocation. No flags are defined here (not even `--help` or
//! `--version`); everything after the program name is collected verbatim.

use std::ffi::OsString;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "simcli",
    about = "Simulate a command-line program from a YAML description.",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// The simulated program's arguments.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl CliArgs {
    /// The invocation string matched against configured commands: all
    /// arguments joined with single spaces.
    pub fn invocation(&self) -> String {
        self.args.join(" ")
    }
}

/// Parse the process arguments.
pub fn parse() -> CliArgs {
    parse_from(std::env::args_os())
}

/// Parse an explicit argument vector (program name first).
///
/// clap swallows the first `--` it sees, so one is inserted after the
/// program name. Any `--` the caller passed is then kept as a value.
pub fn parse_from<I, T>(argv: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv = argv.into_iter().map(Into::into);
    let program = argv.next().unwrap_or_else(|| OsString::from("simcli"));
    let escaped = std::iter::once(program)
        .chain(std::iter::once(OsString::from("--")))
        .chain(argv);
    CliArgs::parse_from(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_flags_verbatim() {
        let args = parse_from(["simcli", "--version", "-v", "commit", "-m", "msg"]);
        assert_eq!(args.invocation(), "--version -v commit -m msg");
    }

    #[test]
    fn help_is_passed_through() {
        let args = parse_from(["simcli", "--help"]);
        assert_eq!(args.invocation(), "--help");
    }

    #[test]
    fn no_arguments_is_empty_invocation() {
        let args = parse_from(["simcli"]);
        assert_eq!(args.invocation(), "");
    }

    #[test]
    fn captures_leading_double_dash() {
        let args = parse_from(["simcli", "--", "foo"]);
        assert_eq!(args.invocation(), "-- foo");

        let args = parse_from(["simcli", "run", "--", "x"]);
        assert_eq!(args.invocation(), "run -- x");

        let args = parse_from(["simcli", "--"]);
        assert_eq!(args.invocation(), "--");
    }
}
