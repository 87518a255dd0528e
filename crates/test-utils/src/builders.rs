#![allow(dead_code)]

use simcli::config::{CommandConfig, Config, MatchMode, RawConfig, TaskConfig};

/// Builder for `Config` to simplify test setup.
pub struct ConfigBuilder {
    config: RawConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfig::default(),
        }
    }

    pub fn with_task(mut self, task: TaskConfig) -> Self {
        self.config.tasks.push(task);
        self
    }

    pub fn with_command(mut self, command: CommandConfig) -> Self {
        self.config.commands.push(command);
        self
    }

    pub fn with_default_command(mut self, command: CommandConfig) -> Self {
        self.config.default_command = Some(command);
        self
    }

    pub fn build(self) -> Config {
        Config::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            task: TaskConfig {
                name: name.to_string(),
                kind: kind.to_string(),
                input: String::new(),
                out_path: None,
                delay: 0,
                init_delay: 0,
                repeat: None,
                permissions: 0,
            },
        }
    }

    pub fn input(mut self, input: &str) -> Self {
        self.task.input = input.to_string();
        self
    }

    pub fn out_path(mut self, path: &str) -> Self {
        self.task.out_path = Some(path.to_string());
        self
    }

    pub fn delay(mut self, ms: u64) -> Self {
        self.task.delay = ms;
        self
    }

    pub fn init_delay(mut self, ms: u64) -> Self {
        self.task.init_delay = ms;
        self
    }

    pub fn repeat(mut self, repeat: &str) -> Self {
        self.task.repeat = Some(repeat.to_string());
        self
    }

    pub fn permissions(mut self, mode: u32) -> Self {
        self.task.permissions = mode;
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

/// Builder for `CommandConfig`.
pub struct CommandConfigBuilder {
    command: CommandConfig,
}

impl CommandConfigBuilder {
    pub fn new(args: &str) -> Self {
        Self {
            command: CommandConfig {
                args: args.to_string(),
                match_mode: MatchMode::Exact,
                tasks: vec![],
                exit_code: 0,
            },
        }
    }

    pub fn contains(mut self) -> Self {
        self.command.match_mode = MatchMode::Contains;
        self
    }

    pub fn task(mut self, name: &str) -> Self {
        self.command.tasks.push(name.to_string());
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.command.exit_code = code;
        self
    }

    pub fn build(self) -> CommandConfig {
        self.command
    }
}
