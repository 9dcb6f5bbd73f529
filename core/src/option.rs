//! Option descriptors.
//!
//! An [`OptionSpec`] describes one flag: its short and long names, whether it
//! takes an argument, an optional default, whether it must be supplied, a
//! description for help output, and an optional [`OptionHandler`] that runs
//! whenever the flag is matched.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Whether an option takes an argument.
///
/// Mirrors the `no_argument` / `required_argument` / `optional_argument`
/// modes of GNU `getopt_long`.
///
/// # Examples
///
/// ```
/// use command_shell_core::ArgumentMode;
///
/// assert_eq!(ArgumentMode::default(), ArgumentMode::None);
/// assert!(ArgumentMode::Required.takes_argument());
/// assert!(!ArgumentMode::None.takes_argument());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentMode {
    /// Plain switch (`-v`, `--verbose`).
    #[default]
    None,
    /// Argument must follow (`-p 80`, `-p80`, `--port 80`, `--port=80`).
    Required,
    /// Argument may be attached (`-l3`, `--level=3`) but is never taken
    /// from the next token.
    Optional,
}

impl ArgumentMode {
    /// Returns `true` for [`Required`](Self::Required) and
    /// [`Optional`](Self::Optional).
    pub fn takes_argument(self) -> bool {
        !matches!(self, ArgumentMode::None)
    }

    /// Marker printed in the help table's argument column.
    pub fn marker(self) -> &'static str {
        match self {
            ArgumentMode::None => "无参",
            ArgumentMode::Required => "有参",
            ArgumentMode::Optional => "选参",
        }
    }
}

/// Callback run when an option is matched during parsing.
///
/// Receives the value stored for the option (empty when the option carries
/// no argument) and the output sink of the current parse. Returning `false`
/// stops parsing immediately; the parse then yields
/// [`ParseOutcome::Stopped`](crate::ParseOutcome::Stopped).
///
/// Any `Fn(&str, &mut dyn Write) -> bool` closure implements this trait.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use command_shell_core::{OptionSet, OptionSpec, ParseOutcome};
///
/// let mut set = OptionSet::new();
/// set.register(
///     OptionSpec::flag(Some('V'), "version").with_handler(|_: &str, out: &mut dyn Write| {
///         let _ = writeln!(out, "1.0.0");
///         false
///     }),
/// );
///
/// let mut out = Vec::new();
/// let outcome = set.parse(&["-V"], &mut out).unwrap();
/// assert!(matches!(outcome, ParseOutcome::Stopped));
/// assert_eq!(out, b"1.0.0\n");
/// ```
pub trait OptionHandler: Send + Sync {
    /// Handles one occurrence of the option; `false` stops the parse.
    fn on_match(&self, value: &str, out: &mut dyn Write) -> bool;
}

impl<F> OptionHandler for F
where
    F: Fn(&str, &mut dyn Write) -> bool + Send + Sync,
{
    fn on_match(&self, value: &str, out: &mut dyn Write) -> bool {
        self(value, out)
    }
}

/// Descriptor for a single option.
///
/// Build one with [`flag`](Self::flag), [`required`](Self::required) or
/// [`optional`](Self::optional) and chain the `with_*` builders.
///
/// A default value is only kept for options that take an argument, and the
/// mandatory marker only takes effect when the option takes an argument and
/// has no default: a default always satisfies a mandatory option.
///
/// # Examples
///
/// ```
/// use command_shell_core::{ArgumentMode, OptionSpec};
///
/// let port = OptionSpec::required(Some('p'), "port")
///     .with_default("8080")
///     .with_description("listen port");
/// assert_eq!(port.mode(), ArgumentMode::Required);
/// assert_eq!(port.default_value(), Some("8080"));
///
/// // The default wins over the mandatory marker.
/// let host = OptionSpec::required(None, "host").with_default("localhost").mandatory();
/// assert!(!host.is_mandatory());
///
/// // Switches never carry defaults.
/// let verbose = OptionSpec::flag(Some('v'), "verbose").with_default("yes");
/// assert_eq!(verbose.default_value(), None);
/// ```
#[derive(Clone)]
pub struct OptionSpec {
    short: Option<char>,
    long: String,
    mode: ArgumentMode,
    default_value: Option<String>,
    mandatory: bool,
    description: String,
    handler: Option<Arc<dyn OptionHandler>>,
    // Raw builder inputs, kept for validation lints.
    requested_default: bool,
    requested_mandatory: bool,
}

impl OptionSpec {
    /// Creates an option with an explicit argument mode.
    pub fn new(short: Option<char>, long: impl Into<String>, mode: ArgumentMode) -> Self {
        Self {
            short,
            long: long.into(),
            mode,
            default_value: None,
            mandatory: false,
            description: String::new(),
            handler: None,
            requested_default: false,
            requested_mandatory: false,
        }
    }

    /// Creates a switch that takes no argument.
    pub fn flag(short: Option<char>, long: impl Into<String>) -> Self {
        Self::new(short, long, ArgumentMode::None)
    }

    /// Creates an option whose argument is required.
    pub fn required(short: Option<char>, long: impl Into<String>) -> Self {
        Self::new(short, long, ArgumentMode::Required)
    }

    /// Creates an option whose argument is optional.
    pub fn optional(short: Option<char>, long: impl Into<String>) -> Self {
        Self::new(short, long, ArgumentMode::Optional)
    }

    /// Sets the value used when the option is absent from the input.
    ///
    /// Ignored for [`ArgumentMode::None`]. Clears the mandatory marker.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.requested_default = true;
        if self.mode.takes_argument() {
            self.default_value = Some(value.into());
            self.mandatory = false;
        }
        self
    }

    /// Marks the option as one that must be supplied.
    ///
    /// Ignored for [`ArgumentMode::None`] and for options with a default.
    pub fn mandatory(mut self) -> Self {
        self.requested_mandatory = true;
        self.mandatory = self.mode.takes_argument() && self.default_value.is_none();
        self
    }

    /// Sets the help description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attaches a handler run on every match.
    pub fn with_handler(mut self, handler: impl OptionHandler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Short name, if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// Long name (without the leading `--`).
    pub fn long(&self) -> &str {
        &self.long
    }

    /// Argument mode.
    pub fn mode(&self) -> ArgumentMode {
        self.mode
    }

    /// Effective default value.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Whether the option is enforced as mandatory.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Help description.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn requested_default(&self) -> bool {
        self.requested_default
    }

    pub(crate) fn requested_mandatory(&self) -> bool {
        self.requested_mandatory
    }

    /// Runs the handler; options without one always continue.
    pub(crate) fn dispatch(&self, value: &str, out: &mut dyn Write) -> bool {
        self.handler
            .as_ref()
            .is_none_or(|handler| handler.on_match(value, out))
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("mode", &self.mode)
            .field("default_value", &self.default_value)
            .field("mandatory", &self.mandatory)
            .field("description", &self.description)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}
