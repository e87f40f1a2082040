use std::path::{Path, PathBuf};

use balance_config::{base_dir, Config, ConfigManager};
use balance_storage_json::JsonKeyValueStore;
use tracing::debug;

use crate::cli::commands;
use crate::cli::output::{self, ConsoleNotifier, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::errors::{CliError, CommandError};
use crate::session::{AppStore, SessionDefaults};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub app: AppStore,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub base_dir: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration and restores the last session from the base directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, base_dir())
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(&base)?;
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled,
        });

        let data_root = config.resolve_data_root(&base);
        debug!(data_root = %data_root.display(), "opening state store");
        let store = JsonKeyValueStore::new(data_root)?;
        let app = AppStore::open(
            Box::new(store),
            Box::new(ConsoleNotifier),
            SessionDefaults::from(&config),
        );

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            app,
            config,
            config_manager,
            base_dir: base,
            last_command: None,
            running: true,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Text of the current line after the command word, untokenised.
    pub fn raw_arguments(&self) -> Option<&str> {
        let line = self.last_command.as_deref()?.trim_start();
        let (_, rest) = line.split_once(char::is_whitespace)?;
        Some(rest.trim())
    }

    pub fn prompt(&self) -> String {
        format!("{} [{}]> ", self.app.user(), self.app.current_period())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{best}`?"));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}
