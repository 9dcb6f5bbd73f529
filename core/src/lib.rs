//! Declarative GNU-style option parsing.
//!
//! This crate turns a list of argument tokens into named values:
//!
//! - [`OptionSpec`] describes one option with its short/long names,
//!   [`ArgumentMode`], default, mandatory marker, description and an
//!   optional [`OptionHandler`].
//! - [`OptionSet`] is an ordered set of options with a built-in `-h/--help`
//!   option; [`OptionSet::parse`] yields a [`ParseOutcome`].
//! - [`ParseResult`] holds the values collected by a successful parse, keyed by
//!   long option name.
//!
//! Help output is a column-aligned table ([`write_help`]); the same layout
//! is used for command listings ([`write_listing`]).
//!
//! Declarations are checked on demand with [`validate_options`].
//!
//! # Example
//!
//! ```
//! use command_shell_core::*;
//!
//! let mut set = OptionSet::new();
//! set.register(
//!     OptionSpec::required(Some('p'), "port").with_description("listen port"),
//! );
//! set.register(OptionSpec::flag(Some('v'), "verbose").with_description("chatty output"));
//!
//! match set.parse(&["-v", "--port=9000"], &mut std::io::sink()).unwrap() {
//!     ParseOutcome::Parsed(result) => {
//!         assert_eq!(result.get("port"), Some("9000"));
//!         assert!(result.contains_key("verbose"));
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//!
//! // No tokens at all: the help table is written instead.
//! let mut out = Vec::new();
//! assert_eq!(set.parse::<&str>(&[], &mut out).unwrap(), ParseOutcome::HelpRequested);
//! assert!(String::from_utf8(out).unwrap().contains("--verbose"));
//! ```

mod error;
mod help;
mod option;
mod parser;
mod result;
mod validate;

pub use error::{ParseError, Result};
pub use help::{
    DEFAULT_PREFIX, MANDATORY_MARKER, NULL_MARKER, OPTIONAL_MARKER, write_help, write_listing,
};
pub use option::{ArgumentMode, OptionHandler, OptionSpec};
pub use parser::{HELP_OPTION, OptionSet, ParseOutcome};
pub use result::ParseResult;
pub use validate::{ValidationError, validate_options};
