use std::io;

use balance_config::ConfigError;
use balance_core::CoreError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Failures that abort the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
}

/// Failures of a single command; reported and then the shell carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;
