//! Command registration, lookup and dispatch.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use command_shell_core::{validate_options, write_listing};
use tracing::{debug, warn};

use crate::builtins;
use crate::command::Command;
use crate::error::{DispatchError, Result};
use crate::session::{Flow, Session};

/// Characters that separate tokens in a command line.
pub const LINE_DELIMITERS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Splits a command line into tokens.
///
/// Spaces, tabs, carriage returns and newlines separate tokens; runs of
/// separators collapse. There is no quoting or escaping.
///
/// # Examples
///
/// ```
/// use command_shell::tokenize;
///
/// assert_eq!(tokenize("a   b\tc"), ["a", "b", "c"]);
/// assert!(tokenize("").is_empty());
/// assert!(tokenize(" \r\n").is_empty());
/// ```
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(LINE_DELIMITERS)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Maps command names to [`Command`]s.
///
/// The registry is an ordinary value: build one, register commands, and
/// pass it (or an `Arc` of it) to whatever dispatches. All methods take
/// `&self`. Lookups hand out an `Arc<Command>` and release the table lock
/// before the command runs, so a command may call back into the registry
/// that dispatched it.
///
/// # Examples
///
/// ```
/// use command_shell::{CommandRegistry, DispatchError, Flow};
///
/// let registry = CommandRegistry::with_builtins();
/// let mut out = Vec::new();
///
/// assert_eq!(registry.dispatch_line("help --cmd", &mut out).unwrap(), Flow::Continue);
/// assert!(String::from_utf8_lossy(&out).contains("exit"));
///
/// assert!(registry.dispatch_line("exit", &mut out).unwrap().is_terminate());
/// assert!(matches!(
///     registry.dispatch_line("bogus", &mut out),
///     Err(DispatchError::UnknownCommand(name)) if name == "bogus"
/// ));
/// ```
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: RwLock<BTreeMap<String, Arc<Command>>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `help`, `exit`, `quit` and `clear`.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtins::register_builtins(&registry);
        registry
    }

    /// Registers `command` under `name`.
    ///
    /// Returns `false` and leaves the registry unchanged if `name` is
    /// already taken.
    pub fn register(&self, name: impl Into<String>, command: impl Into<Arc<Command>>) -> bool {
        let name = name.into();
        let command = command.into();

        for problem in command.with_options(validate_options) {
            warn!(command = %name, %problem, "questionable option declaration");
        }

        let mut commands = self.write();
        if commands.contains_key(&name) {
            debug!(command = %name, "command already registered, keeping existing");
            return false;
        }
        debug!(command = %name, "registered command");
        commands.insert(name, command);
        true
    }

    /// Removes the command registered under `name`.
    pub fn unregister(&self, name: &str) -> Option<Arc<Command>> {
        self.write().remove(name)
    }

    /// Removes every command.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no command is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Looks up the command registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownCommand`] if `name` is not registered.
    pub fn resolve(&self, name: &str) -> Result<Arc<Command>> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))
    }

    /// Resolves `name` and invokes it with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownCommand`] for an unregistered name,
    /// otherwise whatever [`Command::invoke`] returns.
    pub fn dispatch<S: AsRef<str>>(
        &self,
        name: &str,
        args: &[S],
        out: &mut dyn Write,
    ) -> Result<Flow> {
        let command = self.resolve(name)?;
        debug!(command = name, args = args.len(), "dispatching command");
        command.invoke(args, &mut Session::new(self, out))
    }

    /// Tokenizes `line` and dispatches its first token with the rest as
    /// arguments. Blank lines do nothing.
    ///
    /// # Errors
    ///
    /// Same as [`dispatch`](Self::dispatch).
    pub fn dispatch_line(&self, line: &str, out: &mut dyn Write) -> Result<Flow> {
        match tokenize(line).split_first() {
            Some((name, args)) => self.dispatch(name, args, out),
            None => Ok(Flow::Continue),
        }
    }

    /// Writes one `  <name><pad>  <description>` row per command.
    pub fn write_help(&self, out: &mut dyn Write) -> io::Result<()> {
        let commands = self.read();
        let entries: Vec<(&str, &str)> = commands
            .iter()
            .map(|(name, command)| (name.as_str(), command.description()))
            .collect();
        write_listing(&entries, out)
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<Command>>> {
        self.commands.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Arc<Command>>> {
        self.commands.write().unwrap_or_else(PoisonError::into_inner)
    }
}
