//! Error types for command dispatch.

use command_shell_core::ParseError;
use thiserror::Error;

/// Errors surfaced by [`CommandRegistry`](crate::CommandRegistry) dispatch
/// and [`Command::invoke`](crate::Command::invoke).
///
/// None of these are fatal: a host loop prints the message and keeps
/// reading.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No command is registered under this name.
    #[error("unknown command '{0}', type \"help\" for help")]
    UnknownCommand(String),

    /// The command's options rejected the arguments.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A completion callback reported a failure.
    #[error("command failed: {0}")]
    Failed(String),
}

/// Convenience alias for results with [`DispatchError`].
pub type Result<T> = std::result::Result<T, DispatchError>;
