//! Option registration and GNU-style parsing.
//!
//! [`OptionSet::parse`] follows the `getopt_long` conventions: short options
//! may be clustered (`-vx`), required arguments may be attached or separate
//! (`-p80`, `-p 80`, `--port=80`, `--port 80`), optional arguments must be
//! attached (`-l3`, `--level=3`), long names may be abbreviated to any
//! unambiguous prefix, and `--` ends option scanning. Tokens that are not
//! options are collected as free arguments.
//!
//! Every parse walks its own [`Cursor`], so parses on different sets (or the
//! same set) never share position state.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::help;
use crate::option::{ArgumentMode, OptionSpec};
use crate::result::ParseResult;

/// Long name of the built-in help option.
pub const HELP_OPTION: &str = "help";

/// How a parse that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Tokens were consumed, defaults filled in and mandatory options checked.
    Parsed(ParseResult),
    /// Help was written to the output sink instead of producing a result.
    HelpRequested,
    /// An option handler returned `false`; the partial result is discarded.
    Stopped,
}

/// Ordered collection of [`OptionSpec`]s.
///
/// Options keep their registration order, which drives help output and the
/// order in which defaults and mandatory checks are applied. Each option gets
/// an internal index at registration; indices are never reused.
///
/// # Examples
///
/// ```
/// use command_shell_core::{OptionSet, OptionSpec, ParseOutcome};
///
/// let mut set = OptionSet::new();
/// set.register(OptionSpec::required(Some('p'), "port").with_default("8080"));
/// set.register(OptionSpec::flag(Some('v'), "verbose"));
///
/// let outcome = set.parse(&["-v"], &mut Vec::new()).unwrap();
/// let ParseOutcome::Parsed(result) = outcome else { panic!("expected a result") };
/// assert_eq!(result.get("port"), Some("8080"));
/// assert_eq!(result.get("verbose"), Some(""));
/// ```
#[derive(Debug, Clone)]
pub struct OptionSet {
    options: BTreeMap<usize, OptionSpec>,
    short_index: HashMap<char, usize>,
    next_index: usize,
    help_index: Option<usize>,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionSet {
    /// Creates a set holding only the built-in `-h/--help` option.
    pub fn new() -> Self {
        let mut set = Self::empty();
        let index = set.register(
            OptionSpec::flag(Some('h'), HELP_OPTION).with_description("打印此信息"),
        );
        set.help_index = Some(index);
        set
    }

    /// Creates a set without the built-in help option.
    pub fn empty() -> Self {
        Self {
            options: BTreeMap::new(),
            short_index: HashMap::new(),
            next_index: 0,
            help_index: None,
        }
    }

    /// Appends an option and returns its internal index.
    ///
    /// A short name already in use is re-pointed at the new option; the
    /// earlier option stays reachable through its long name.
    pub fn register(&mut self, spec: OptionSpec) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        if let Some(short) = spec.short() {
            if let Some(previous) = self.short_index.insert(short, index) {
                debug!(short = %short, previous, index, "short option re-registered");
            }
        }
        self.options.insert(index, spec);
        index
    }

    /// Removes the first option (in registration order) named `long`.
    pub fn unregister(&mut self, long: &str) -> Option<OptionSpec> {
        let index = self.find_exact(long)?;
        let spec = self.options.remove(&index)?;
        if let Some(short) = spec.short() {
            if self.short_index.get(&short) == Some(&index) {
                self.short_index.remove(&short);
            }
        }
        if self.help_index == Some(index) {
            self.help_index = None;
        }
        Some(spec)
    }

    /// Returns the first option named `long`.
    pub fn get(&self, long: &str) -> Option<&OptionSpec> {
        self.find_exact(long).and_then(|index| self.options.get(&index))
    }

    /// Iterates options in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.values()
    }

    /// Number of registered options, including the help option.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if no option is registered.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Writes the help table for this set.
    pub fn write_help(&self, out: &mut dyn Write) -> std::io::Result<()> {
        help::write_help(self, out)
    }

    /// Parses `tokens` (without a program name).
    ///
    /// Matched options are stored under their long name; handlers run as
    /// options are matched and may stop the parse. After scanning, defaults
    /// fill absent options and mandatory options are checked. If nothing at
    /// all was stored and the set holds more than one option, help is
    /// written instead.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed or unknown options, a missing
    /// mandatory option, or a failed write to `out`.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_shell_core::{OptionSet, OptionSpec, ParseError, ParseOutcome};
    ///
    /// let mut set = OptionSet::new();
    /// set.register(OptionSpec::required(None, "host").mandatory());
    ///
    /// let err = set.parse::<&str>(&[], &mut Vec::new()).unwrap_err();
    /// assert!(matches!(err, ParseError::MissingRequired(name) if name == "host"));
    ///
    /// let mut out = Vec::new();
    /// let outcome = set.parse(&["--help"], &mut out).unwrap();
    /// assert_eq!(outcome, ParseOutcome::HelpRequested);
    /// assert!(!out.is_empty());
    /// ```
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S], out: &mut dyn Write) -> Result<ParseOutcome> {
        let mut result = ParseResult::new();

        for item in Cursor::new(self, tokens) {
            match item? {
                Item::Free(token) => result.push_free_arg(token),
                Item::Option { index, value } => {
                    if self.help_index == Some(index) {
                        help::write_help(self, out)?;
                        return Ok(ParseOutcome::HelpRequested);
                    }
                    let Some(spec) = self.options.get(&index) else {
                        continue;
                    };
                    let stored = result.insert_if_absent(spec.long(), value.unwrap_or_default());
                    if !spec.dispatch(stored, out) {
                        debug!(option = spec.long(), "option handler stopped parsing");
                        return Ok(ParseOutcome::Stopped);
                    }
                }
            }
        }

        for spec in self.options.values() {
            if let Some(default) = spec.default_value() {
                result.insert_if_absent(spec.long(), default);
            }
        }

        if let Some(missing) = self
            .options
            .values()
            .find(|spec| spec.is_mandatory() && !result.contains_key(spec.long()))
        {
            return Err(ParseError::MissingRequired(missing.long().to_string()));
        }

        if result.is_empty() && self.options.len() > 1 {
            help::write_help(self, out)?;
            return Ok(ParseOutcome::HelpRequested);
        }

        Ok(ParseOutcome::Parsed(result))
    }

    fn spec(&self, index: usize) -> Option<&OptionSpec> {
        self.options.get(&index)
    }

    fn find_exact(&self, long: &str) -> Option<usize> {
        self.options
            .iter()
            .find(|(_, spec)| spec.long() == long)
            .map(|(index, _)| *index)
    }

    /// Resolves a long name or an unambiguous prefix of one.
    fn lookup_long(&self, name: &str) -> Result<usize> {
        if let Some(index) = self.find_exact(name) {
            return Ok(index);
        }
        let unknown = || ParseError::UnrecognizedOption(format!("--{name}"));
        if name.is_empty() {
            return Err(unknown());
        }
        let mut candidates = self
            .options
            .iter()
            .filter(|(_, spec)| spec.long().starts_with(name))
            .map(|(index, _)| *index);
        match (candidates.next(), candidates.next()) {
            (Some(index), None) => Ok(index),
            (Some(_), Some(_)) => Err(ParseError::AmbiguousOption(format!("--{name}"))),
            (None, _) => Err(unknown()),
        }
    }
}

/// One step of a parse.
enum Item<'a> {
    Option { index: usize, value: Option<&'a str> },
    Free(&'a str),
}

/// Position state of a single parse.
struct Cursor<'a, S> {
    set: &'a OptionSet,
    tokens: &'a [S],
    pos: usize,
    /// Token index and byte offset of the next short option in a cluster.
    cluster: Option<(usize, usize)>,
    options_done: bool,
}

impl<'a, S: AsRef<str>> Cursor<'a, S> {
    fn new(set: &'a OptionSet, tokens: &'a [S]) -> Self {
        Self {
            set,
            tokens,
            pos: 0,
            cluster: None,
            options_done: false,
        }
    }

    fn take_next_token(&mut self) -> Option<&'a str> {
        let tokens = self.tokens;
        let token = tokens.get(self.pos)?.as_ref();
        self.pos += 1;
        Some(token)
    }

    fn short_option(&mut self, token_idx: usize, offset: usize) -> Result<Item<'a>> {
        let tokens = self.tokens;
        let token = tokens[token_idx].as_ref();
        let rest = &token[offset..];
        let Some(short) = rest.chars().next() else {
            return Err(ParseError::UnrecognizedOption(token.to_string()));
        };
        let attached = &rest[short.len_utf8()..];

        let unknown = || ParseError::UnrecognizedOption(format!("-{short}"));
        let index = *self.set.short_index.get(&short).ok_or_else(unknown)?;
        let spec = self.set.spec(index).ok_or_else(unknown)?;

        let value = match spec.mode() {
            ArgumentMode::None => {
                if !attached.is_empty() {
                    self.cluster = Some((token_idx, offset + short.len_utf8()));
                }
                None
            }
            ArgumentMode::Required if attached.is_empty() => match self.take_next_token() {
                Some(next) => Some(next),
                None => return Err(ParseError::MissingArgument(spec.long().to_string())),
            },
            ArgumentMode::Required => Some(attached),
            ArgumentMode::Optional => (!attached.is_empty()).then_some(attached),
        };
        Ok(Item::Option { index, value })
    }

    fn long_option(&mut self, body: &'a str) -> Result<Item<'a>> {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let index = self.set.lookup_long(name)?;
        let Some(spec) = self.set.spec(index) else {
            return Err(ParseError::UnrecognizedOption(format!("--{name}")));
        };

        let value = match (spec.mode(), inline) {
            (ArgumentMode::None, Some(_)) => {
                return Err(ParseError::UnexpectedArgument(spec.long().to_string()));
            }
            (ArgumentMode::None, None) => None,
            (ArgumentMode::Required, None) => match self.take_next_token() {
                Some(next) => Some(next),
                None => return Err(ParseError::MissingArgument(spec.long().to_string())),
            },
            (_, inline) => inline,
        };
        Ok(Item::Option { index, value })
    }
}

impl<'a, S: AsRef<str>> Iterator for Cursor<'a, S> {
    type Item = Result<Item<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((token_idx, offset)) = self.cluster.take() {
            return Some(self.short_option(token_idx, offset));
        }

        loop {
            let token_idx = self.pos;
            let token = self.take_next_token()?;

            if self.options_done || token == "-" || !token.starts_with('-') {
                return Some(Ok(Item::Free(token)));
            }
            if token == "--" {
                self.options_done = true;
                continue;
            }
            return Some(match token.strip_prefix("--") {
                Some(body) => self.long_option(body),
                None => self.short_option(token_idx, 1),
            });
        }
    }
}
