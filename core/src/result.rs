use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

/// Values collected by a successful parse, keyed by long option name.
///
/// An option given without an argument maps to the empty string, which is
/// distinct from the option being absent. Tokens that are not options (and
/// everything after `--`) are kept in order as [`free_args`](Self::free_args).
///
/// Serializes as `{"values": {..}, "free_args": [..]}`; `free_args` is
/// omitted when empty.
///
/// # Examples
///
/// ```
/// use command_shell_core::{OptionSet, OptionSpec, ParseOutcome};
///
/// let mut set = OptionSet::new();
/// set.register(OptionSpec::flag(Some('v'), "verbose"));
/// set.register(OptionSpec::required(Some('o'), "output"));
///
/// let ParseOutcome::Parsed(result) = set.parse(&["-v", "-o", "a.txt", "input"], &mut Vec::new()).unwrap()
/// else { unreachable!() };
/// assert_eq!(result.get("verbose"), Some(""));
/// assert_eq!(result.get("output"), Some("a.txt"));
/// assert_eq!(result.free_args(), ["input"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    values: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    free_args: Vec<String>,
}

impl ParseResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` was matched or defaulted.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored options (free arguments are not counted).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no option was stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates stored options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates stored option names in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Non-option tokens in input order.
    pub fn free_args(&self) -> &[String] {
        &self.free_args
    }

    /// Removes every stored value and free argument.
    pub fn clear(&mut self) {
        self.values.clear();
        self.free_args.clear();
    }

    /// Stores `value` unless `key` is already present and returns the stored
    /// value, so repeated options keep their first occurrence.
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> &str {
        match self.values.entry(key.to_string()) {
            Entry::Occupied(entry) => entry.into_mut().as_str(),
            Entry::Vacant(entry) => entry.insert(value.to_string()).as_str(),
        }
    }

    pub(crate) fn push_free_arg(&mut self, token: &str) {
        self.free_args.push(token.to_string());
    }

    /// Splits the value stored for `key` on any character of `delims`.
    ///
    /// A missing key is treated as an empty value, and an empty value still
    /// yields a single empty element. Empty fields between, before or after
    /// delimiters are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_shell_core::ParseResult;
    ///
    /// let mut result = ParseResult::new();
    /// result.insert_if_absent("path", "/bin:/usr/bin");
    /// result.insert_if_absent("empty", "");
    ///
    /// assert_eq!(result.split_value("path", ":"), ["/bin", "/usr/bin"]);
    /// assert_eq!(result.split_value("empty", ":"), [""]);
    /// ```
    pub fn split_value(&self, key: &str, delims: &str) -> Vec<String> {
        self.get(key)
            .unwrap_or_default()
            .split(|c: char| delims.contains(c))
            .map(String::from)
            .collect()
    }
}
