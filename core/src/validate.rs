//! Option-set validation.
//!
//! Registration never fails, so conflicting names and contradictory
//! declarations go through silently. [`validate_options`] reports them
//! before they surprise a user at parse time.
//!
//! # Examples
//!
//! ```
//! use command_shell_core::*;
//!
//! let mut set = OptionSet::new();
//! set.register(OptionSpec::flag(Some('v'), "verbose"));
//! assert!(validate_options(&set).is_empty());
//!
//! // Invalid: long name written with its dashes
//! set.register(OptionSpec::flag(None, "--quiet"));
//! assert!(!validate_options(&set).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ArgumentMode, OptionSet, OptionSpec};

/// Option declaration problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Long name is empty.
    #[error("option long name cannot be empty")]
    EmptyLongName,
    /// Long name starts with `-` or contains `=` or whitespace.
    #[error("invalid long option name: {0}")]
    InvalidLongName(String),
    /// Short name is `-`, whitespace or a control character.
    #[error("invalid short option name: {0:?}")]
    InvalidShortName(char),
    /// Two options share a long name; only the first is reachable.
    #[error("duplicate long option: --{0}")]
    DuplicateLongName(String),
    /// Two options share a short name; only the last is reachable by it.
    #[error("duplicate short option: -{0}")]
    DuplicateShortName(char),
    /// A default was given to a switch, which never uses it.
    #[error("option --{0} takes no argument, its default is ignored")]
    DefaultOnFlag(String),
    /// Mandatory marker on a switch, which is never enforced.
    #[error("option --{0} takes no argument and cannot be mandatory")]
    MandatoryFlag(String),
    /// Mandatory marker alongside a default; the default wins.
    #[error("option --{0} is mandatory but has a default, it is never enforced")]
    MandatoryWithDefault(String),
}

/// Validates every option of `set`, stopping at the first problem.
///
/// # Examples
///
/// ```
/// use command_shell_core::*;
///
/// let mut set = OptionSet::new();
/// set.register(OptionSpec::required(None, "host").with_default("localhost").mandatory());
///
/// assert_eq!(
///     validate_options(&set),
///     vec![ValidationError::MandatoryWithDefault("host".to_string())]
/// );
/// ```
pub fn validate_options(set: &OptionSet) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_long: HashSet<&str> = HashSet::new();
    let mut seen_short: HashSet<char> = HashSet::new();

    for spec in set.iter() {
        if let Some(error) = validate_names(spec) {
            errors.push(error);
            return errors;
        }
        if !seen_long.insert(spec.long()) {
            errors.push(ValidationError::DuplicateLongName(spec.long().to_string()));
            return errors;
        }
        if let Some(short) = spec.short() {
            if !seen_short.insert(short) {
                errors.push(ValidationError::DuplicateShortName(short));
                return errors;
            }
        }
        if let Some(error) = validate_declaration(spec) {
            errors.push(error);
            return errors;
        }
    }

    errors
}

fn validate_names(spec: &OptionSpec) -> Option<ValidationError> {
    let long = spec.long();
    if long.is_empty() {
        return Some(ValidationError::EmptyLongName);
    }
    if long.starts_with('-') || long.contains('=') || long.chars().any(char::is_whitespace) {
        return Some(ValidationError::InvalidLongName(long.to_string()));
    }
    match spec.short() {
        Some(short) if short == '-' || short.is_whitespace() || short.is_control() => {
            Some(ValidationError::InvalidShortName(short))
        }
        _ => None,
    }
}

fn validate_declaration(spec: &OptionSpec) -> Option<ValidationError> {
    let long = spec.long().to_string();
    if spec.mode() == ArgumentMode::None {
        if spec.requested_default() {
            return Some(ValidationError::DefaultOnFlag(long));
        }
        if spec.requested_mandatory() {
            return Some(ValidationError::MandatoryFlag(long));
        }
        return None;
    }
    if spec.requested_mandatory() && spec.default_value().is_some() {
        return Some(ValidationError::MandatoryWithDefault(long));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_help_set_is_valid() {
        assert!(validate_options(&OptionSet::new()).is_empty());
    }

    #[test]
    fn test_rejects_duplicate_long_name() {
        let mut set = OptionSet::new();
        set.register(OptionSpec::flag(None, "verbose"));
        set.register(OptionSpec::flag(None, "verbose"));

        assert_eq!(
            validate_options(&set),
            vec![ValidationError::DuplicateLongName("verbose".to_string())]
        );
    }

    #[test]
    fn test_rejects_duplicate_short_name() {
        let mut set = OptionSet::new();
        set.register(OptionSpec::flag(Some('h'), "human"));

        assert_eq!(
            validate_options(&set),
            vec![ValidationError::DuplicateShortName('h')]
        );
    }

    #[test]
    fn test_rejects_bad_names() {
        let mut set = OptionSet::empty();
        set.register(OptionSpec::flag(None, ""));
        assert_eq!(validate_options(&set), vec![ValidationError::EmptyLongName]);

        let mut set = OptionSet::empty();
        set.register(OptionSpec::required(None, "a=b"));
        assert_eq!(
            validate_options(&set),
            vec![ValidationError::InvalidLongName("a=b".to_string())]
        );

        let mut set = OptionSet::empty();
        set.register(OptionSpec::flag(Some('-'), "dash"));
        assert_eq!(
            validate_options(&set),
            vec![ValidationError::InvalidShortName('-')]
        );
    }

    #[test]
    fn test_reports_ignored_declarations() {
        let mut set = OptionSet::empty();
        set.register(OptionSpec::flag(Some('v'), "verbose").with_default("1"));
        assert_eq!(
            validate_options(&set),
            vec![ValidationError::DefaultOnFlag("verbose".to_string())]
        );

        let mut set = OptionSet::empty();
        set.register(OptionSpec::flag(Some('f'), "force").mandatory());
        assert_eq!(
            validate_options(&set),
            vec![ValidationError::MandatoryFlag("force".to_string())]
        );
    }

    #[test]
    fn test_accepts_mandatory_without_default() {
        let mut set = OptionSet::new();
        set.register(OptionSpec::required(None, "host").mandatory());
        set.register(OptionSpec::required(Some('p'), "port").with_default("80"));
        assert!(validate_options(&set).is_empty());
    }
}
