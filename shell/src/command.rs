//! Commands: an option set bound to a completion callback.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard};

use command_shell_core::{
    OptionSet, OptionSpec, ParseOutcome, ParseResult, ValidationError, validate_options,
};
use tracing::{debug, warn};

use crate::error::Result;
use crate::session::{Flow, Session};

/// Callback run after a successful parse.
pub type CompletionFn = dyn Fn(&ParseResult, &mut Session<'_>) -> Result<Flow> + Send + Sync;

/// A named unit of behavior in a [`CommandRegistry`](crate::CommandRegistry).
///
/// Each command owns an [`OptionSet`] (with the built-in `-h/--help`
/// option), an optional completion callback, and the result of its most
/// recent successful parse.
///
/// # Examples
///
/// ```
/// use command_shell::{Command, CommandRegistry, Flow, Session};
/// use command_shell_core::OptionSpec;
///
/// let greet = Command::new("print a greeting")
///     .with_option(OptionSpec::required(Some('n'), "name").with_default("world"))
///     .on_complete(|args, session| {
///         writeln!(session.out, "hello, {}", args.get("name").unwrap_or_default())?;
///         Ok(Flow::Continue)
///     });
///
/// let registry = CommandRegistry::new();
/// let mut out = Vec::new();
/// let flow = greet.invoke(&["-n", "shell"], &mut Session::new(&registry, &mut out)).unwrap();
///
/// assert_eq!(flow, Flow::Continue);
/// assert_eq!(out, b"hello, shell\n");
/// assert_eq!(greet.get("name").as_deref(), Some("shell"));
/// ```
pub struct Command {
    description: String,
    options: RwLock<OptionSet>,
    on_complete: Option<Box<CompletionFn>>,
    last_result: Mutex<ParseResult>,
}

impl Command {
    /// Creates a command with only the built-in help option.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            options: RwLock::new(OptionSet::new()),
            on_complete: None,
            last_result: Mutex::new(ParseResult::new()),
        }
    }

    /// Adds an option.
    ///
    /// Builder options are validated when the command is registered.
    pub fn with_option(self, spec: OptionSpec) -> Self {
        self.options
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(spec);
        self
    }

    /// Sets the callback run after a successful parse.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ParseResult, &mut Session<'_>) -> Result<Flow> + Send + Sync + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Text shown next to the command name in registry listings.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Registers another option and validates the resulting option set.
    ///
    /// Registration always succeeds; any declaration problem is logged at
    /// `warn` and returned.
    pub fn add_option(&self, spec: OptionSpec) -> Vec<ValidationError> {
        let mut options = self.options.write().unwrap_or_else(PoisonError::into_inner);
        let long = spec.long().to_string();
        options.register(spec);
        let problems = validate_options(&options);
        for problem in &problems {
            warn!(
                command = %self.description,
                option = %long,
                %problem,
                "questionable option declaration"
            );
        }
        problems
    }

    /// Removes the first option named `long`.
    pub fn remove_option(&self, long: &str) -> Option<OptionSpec> {
        self.options
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .unregister(long)
    }

    /// Runs `f` with read access to the option set.
    pub fn with_options<R>(&self, f: impl FnOnce(&OptionSet) -> R) -> R {
        f(&self.read_options())
    }

    /// Parses `tokens` (without the command name) and runs the completion.
    ///
    /// The previously stored result is cleared first. On a successful parse
    /// the new result is stored before the completion runs. Help output
    /// yields [`Flow::HelpShown`]; a handler that stops the parse yields
    /// [`Flow::Continue`] without running the completion.
    ///
    /// # Errors
    ///
    /// Propagates parse errors, I/O errors and errors returned by the
    /// completion callback.
    pub fn invoke<S: AsRef<str>>(&self, tokens: &[S], session: &mut Session<'_>) -> Result<Flow> {
        self.lock_result().clear();

        // Parse a snapshot so handlers may add or remove options on this command.
        let options = self.read_options().clone();
        let outcome = options.parse(tokens, &mut *session.out)?;
        let result = match outcome {
            ParseOutcome::Parsed(result) => result,
            ParseOutcome::HelpRequested => return Ok(Flow::HelpShown),
            ParseOutcome::Stopped => {
                debug!(command = %self.description, "parse stopped by option handler");
                return Ok(Flow::Continue);
            }
        };

        *self.lock_result() = result.clone();
        match &self.on_complete {
            Some(callback) => callback(&result, session),
            None => Ok(Flow::Continue),
        }
    }

    /// Returns `true` if the last parse stored `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.lock_result().contains_key(key)
    }

    /// Value stored for `key` by the last parse.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock_result().get(key).map(String::from)
    }

    /// Splits the stored value for `key` on any character of `delims`.
    ///
    /// See [`ParseResult::split_value`].
    pub fn split_value(&self, key: &str, delims: &str) -> Vec<String> {
        self.lock_result().split_value(key, delims)
    }

    /// Copy of the last stored result.
    pub fn last_result(&self) -> ParseResult {
        self.lock_result().clone()
    }

    fn read_options(&self) -> RwLockReadGuard<'_, OptionSet> {
        self.options.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_result(&self) -> MutexGuard<'_, ParseResult> {
        self.last_result
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("description", &self.description)
            .field("options", &*self.read_options())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
