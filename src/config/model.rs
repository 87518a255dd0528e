// src/config/model.rs

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

/// Configuration exactly as read from disk, before validation.
///
/// ```yaml
/// tasks:
///   - name: hello
///     type: sysout
///     input: data/hello.txt
///     delay: 5
///
/// commands:
///   - args: --version
///     tasks: [hello]
///     rc: 0
///
/// defaultCommand:
///   tasks: [hello]
///   rc: 1
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub tasks: Vec<TaskConfig>,

    #[serde(default)]
    pub commands: Vec<CommandConfig>,

    /// Command used when nothing in `commands` matches the invocation.
    #[serde(default, rename = "defaultCommand")]
    pub default_command: Option<CommandConfig>,
}

/// One entry of `tasks:`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskConfig {
    pub name: String,

    /// Task type (`sysout`, `syserr`, `file`, `hang`).
    ///
    /// Kept as a plain string here; it is resolved to a
    /// [`TaskKind`](crate::exec::TaskKind) only when the task is dispatched.
    #[serde(rename = "type")]
    pub kind: String,

    /// Source file for stream and file tasks.
    ///
    /// Relative paths are resolved against the base path handed to the
    /// task backend.
    #[serde(default)]
    pub input: String,

    /// Destination for `file` tasks.
    #[serde(default, rename = "outPath")]
    pub out_path: Option<String>,

    /// Requested per-line delay in milliseconds for stream tasks.
    #[serde(default)]
    pub delay: u64,

    /// Delay in milliseconds before the task starts.
    #[serde(default, rename = "initdelay")]
    pub init_delay: u64,

    /// `None`/empty runs once, an integer runs that many times, `forever`
    /// never stops. Integers and strings are both accepted.
    #[serde(default, deserialize_with = "de_repeat")]
    pub repeat: Option<String>,

    /// Mode bits for the destination of `file` tasks; 0 means 0o644.
    #[serde(default, rename = "perms", deserialize_with = "de_mode")]
    pub permissions: u32,
}

/// How a command's `args` is compared against the invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Exact,
    Contains,
}

/// One entry of `commands:` (or the `defaultCommand`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandConfig {
    /// Match key compared against the joined invocation.
    #[serde(default)]
    pub args: String,

    #[serde(default, rename = "match")]
    pub match_mode: MatchMode,

    /// Task names, run in order.
    #[serde(default)]
    pub tasks: Vec<String>,

    /// Exit status once every task has completed.
    #[serde(default, rename = "rc")]
    pub exit_code: i32,
}

impl CommandConfig {
    /// Name used in logs and errors.
    pub fn label(&self) -> &str {
        if self.args.is_empty() {
            "<default>"
        } else {
            &self.args
        }
    }
}

impl fmt::Display for CommandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated, read-only configuration snapshot.
///
/// Built from a [`RawConfig`] through `TryFrom` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct Config {
    tasks: HashMap<String, TaskConfig>,
    commands: Vec<CommandConfig>,
    exact_index: HashMap<String, usize>,
    default_command: Option<CommandConfig>,
}

impl Config {
    pub(crate) fn new_unchecked(
        tasks: Vec<TaskConfig>,
        commands: Vec<CommandConfig>,
        default_command: Option<CommandConfig>,
    ) -> Self {
        let tasks = tasks.into_iter().map(|t| (t.name.clone(), t)).collect();
        let exact_index = commands
            .iter()
            .enumerate()
            .map(|(i, c)| (c.args.clone(), i))
            .collect();

        Self {
            tasks,
            commands,
            exact_index,
            default_command,
        }
    }

    pub fn task(&self, name: &str) -> Option<&TaskConfig> {
        self.tasks.get(name)
    }

    /// Commands in configuration order.
    pub fn commands(&self) -> &[CommandConfig] {
        &self.commands
    }

    /// O(1) lookup by exact match key.
    pub fn command_by_args(&self, args: &str) -> Option<&CommandConfig> {
        self.exact_index.get(args).map(|&i| &self.commands[i])
    }

    pub fn default_command(&self) -> Option<&CommandConfig> {
        self.default_command.as_ref()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Text(String),
}

fn de_repeat<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Scalar::Int(n) => n.to_string(),
        Scalar::Text(s) => s,
    }))
}

fn de_mode<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Scalar::Int(n)) => {
            u32::try_from(n).map_err(|_| D::Error::custom(format!("invalid perms: {n}")))
        }
        Some(Scalar::Text(s)) => parse_octal_mode(&s).map_err(D::Error::custom),
    }
}

/// Parse a permission string such as `"0755"`, `"755"` or `"0o755"`.
pub fn parse_octal_mode(s: &str) -> Result<u32, String> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Ok(0);
    }

    u32::from_str_radix(digits, 8)
        .map_err(|_| format!("invalid perms '{s}' (expected an octal mode such as \"0755\")"))
}
