//! Column-aligned help tables.
//!
//! Option rows look like
//!
//! ```text
//!   -h  --help     无参  默认:null  选填  打印此信息
//!   -p  --port     有参  默认:8080  选填  listen port
//!       --host     有参  默认:null  必填  remote host
//! ```
//!
//! and listing rows (used for command listings) like `  <name><pad>  <text>`.
//! Column widths are measured in characters.

use std::io::{self, Write};

use crate::parser::OptionSet;

/// Prefix of the default-value column.
pub const DEFAULT_PREFIX: &str = "默认:";
/// Shown in the default column when an option has no default.
pub const NULL_MARKER: &str = "null";
/// Marker for options that may be omitted.
pub const OPTIONAL_MARKER: &str = "选填";
/// Marker for options that must be supplied.
pub const MANDATORY_MARKER: &str = "必填";

/// Writes one row per option of `set`, in registration order.
pub fn write_help(set: &OptionSet, out: &mut dyn Write) -> io::Result<()> {
    let long_width = set
        .iter()
        .map(|spec| spec.long().chars().count())
        .max()
        .unwrap_or(0);
    let default_width = set
        .iter()
        .filter_map(|spec| spec.default_value())
        .map(|value| value.chars().count())
        .fold(NULL_MARKER.chars().count(), usize::max);

    for spec in set.iter() {
        match spec.short() {
            Some(short) => write!(out, "  -{short}  --")?,
            None => write!(out, "      --")?,
        }
        let required = if spec.is_mandatory() {
            MANDATORY_MARKER
        } else {
            OPTIONAL_MARKER
        };
        writeln!(
            out,
            "{long:<long_width$}  {mode}  {DEFAULT_PREFIX}{default:<default_width$}  {required}  {description}",
            long = spec.long(),
            mode = spec.mode().marker(),
            default = spec.default_value().unwrap_or(NULL_MARKER),
            description = spec.description(),
        )?;
    }
    Ok(())
}

/// Writes `  <name><pad>  <description>` rows, padding names to the longest.
pub fn write_listing(entries: &[(&str, &str)], out: &mut dyn Write) -> io::Result<()> {
    let width = entries
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    for (name, description) in entries {
        writeln!(out, "  {name:<width$}  {description}")?;
    }
    Ok(())
}
