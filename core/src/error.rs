//! Error types for option parsing.

use thiserror::Error;

/// Errors that abort a parse.
///
/// Help output and handler short-circuits are not errors; they are reported
/// through [`ParseOutcome`](crate::ParseOutcome).
#[derive(Debug, Error)]
pub enum ParseError {
    /// Token looks like an option but matches no registered option.
    #[error("unrecognized option '{0}', use \"-h\" for help")]
    UnrecognizedOption(String),

    /// Long-option prefix matches more than one registered option.
    #[error("option '{0}' is ambiguous, use \"-h\" for help")]
    AmbiguousOption(String),

    /// Option requires an argument but none followed it.
    #[error("option '--{0}' requires an argument")]
    MissingArgument(String),

    /// Switch was given an inline `=value`.
    #[error("option '--{0}' doesn't allow an argument")]
    UnexpectedArgument(String),

    /// Mandatory option without a default was not supplied.
    #[error("option '--{0}' must be provided, use \"-h\" for help")]
    MissingRequired(String),

    /// Writing help or handler output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
