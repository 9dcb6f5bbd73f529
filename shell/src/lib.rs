//! Command registry and dispatcher for interactive shells.
//!
//! A [`CommandRegistry`] maps names to [`Command`]s. Each command owns an
//! option set from [`command_shell_core`] and a completion callback that
//! runs once its arguments parse. Dispatch reports what the host should do
//! next as a [`Flow`]:
//!
//! - [`Flow::Continue`]: the command ran (or a handler stopped it early).
//! - [`Flow::HelpShown`]: help was printed instead.
//! - [`Flow::Terminate`]: the session should end (`exit`, `quit`).
//!
//! Failures are [`DispatchError`]s; none of them are fatal.
//!
//! # Example
//!
//! ```
//! use command_shell::{Command, CommandRegistry, Flow};
//! use command_shell_core::OptionSpec;
//!
//! let registry = CommandRegistry::with_builtins();
//! registry.register(
//!     "add",
//!     Command::new("add two numbers")
//!         .with_option(OptionSpec::required(Some('a'), "lhs").mandatory())
//!         .with_option(OptionSpec::required(Some('b'), "rhs").with_default("0"))
//!         .on_complete(|args, session| {
//!             let parse = |key| {
//!                 args.get(key)
//!                     .unwrap_or_default()
//!                     .parse::<i64>()
//!                     .map_err(|e| command_shell::DispatchError::Failed(e.to_string()))
//!             };
//!             writeln!(session.out, "{}", parse("lhs")? + parse("rhs")?)?;
//!             Ok(Flow::Continue)
//!         }),
//! );
//!
//! let mut out = Vec::new();
//! registry.dispatch_line("add -a 2 -b 3", &mut out).unwrap();
//! assert_eq!(out, b"5\n");
//!
//! assert!(registry.dispatch_line("add -b 3", &mut out).is_err());
//! assert!(registry.dispatch_line("quit", &mut out).unwrap().is_terminate());
//! ```

pub mod builtins;
mod command;
mod error;
mod host;
mod registry;
mod session;

pub use command::{Command, CompletionFn};
pub use error::{DispatchError, Result};
pub use host::{LoopExit, run_loop};
pub use registry::{CommandRegistry, LINE_DELIMITERS, tokenize};
pub use session::{Flow, Session};
