//! Structured output parser: captured stdout → [`ParsedRecord`].
//!
//! Parsing is best-effort by contract. Lines that do not fit the format are
//! skipped, never reported, and no input makes [`parse`] fail. Whether a
//! call failed is decided from stderr and the exit status, not from here.

use std::collections::BTreeMap;

use crate::core::string::strip_outer_quotes;
use crate::tool::value_objects::{ListEntry, ParsedRecord};

/// Textual sub-format of a tool's stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// `"name" {identifier}` per line (`VBoxManage list vms`)
    QuotedNameListing,
    /// `key=value` per line (`VBoxManage showvminfo --machinereadable`)
    KeyValueBlock,
    /// Plugin section of `volatility --help`: `name  description` rows
    PluginHelp,
    /// Passed through untouched (e.g. Volatility's JSON renderer)
    Opaque,
}

impl OutputFormat {
    /// The record an unparseable or absent stdout maps to
    pub fn empty_record(&self) -> ParsedRecord {
        match self {
            OutputFormat::QuotedNameListing => ParsedRecord::List(Vec::new()),
            OutputFormat::KeyValueBlock | OutputFormat::PluginHelp => {
                ParsedRecord::Map(BTreeMap::new())
            }
            OutputFormat::Opaque => ParsedRecord::Opaque(String::new()),
        }
    }
}

/// Parse `raw` according to `format`. Pure and total.
pub fn parse(format: OutputFormat, raw: &str) -> ParsedRecord {
    match format {
        OutputFormat::QuotedNameListing => ParsedRecord::List(parse_quoted_listing(raw)),
        OutputFormat::KeyValueBlock => ParsedRecord::Map(parse_key_values(raw)),
        OutputFormat::PluginHelp => ParsedRecord::Map(parse_plugin_help(raw)),
        OutputFormat::Opaque => ParsedRecord::Opaque(raw.to_string()),
    }
}

/// Lines with fewer than two double quotes are skipped.
fn parse_quoted_listing(raw: &str) -> Vec<ListEntry> {
    raw.lines().filter_map(parse_listing_line).collect()
}

fn parse_listing_line(line: &str) -> Option<ListEntry> {
    let mut segments = line.split('"');
    segments.next()?;
    let name = segments.next()?;
    let rest = segments.next()?;
    Some(ListEntry::new(name, rest.trim()))
}

/// Lines without a top-level `=` (or with an empty key) are skipped.
/// Later duplicates overwrite earlier ones.
fn parse_key_values(raw: &str) -> BTreeMap<String, String> {
    raw.lines()
        .filter_map(|line| {
            let split = top_level_equals(line)?;
            let key = line[..split].trim();
            if key.is_empty() {
                return None;
            }
            let value = strip_outer_quotes(line[split + 1..].trim());
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Byte index of the first `=` outside double quotes
fn top_level_equals(line: &str) -> Option<usize> {
    let mut quoted = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            '=' if !quoted => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Rows shallower than this start a plugin; deeper rows continue its description.
const PLUGIN_DESCRIPTION_INDENT: usize = 8;

/// Plugin name → description, read from the section after the `Plugins:`
/// header. Wrapped descriptions are joined with single spaces; rows whose
/// first word is not a dotted plugin name are skipped.
fn parse_plugin_help(raw: &str) -> BTreeMap<String, String> {
    let mut plugins = BTreeMap::new();
    let mut current: Option<(String, String)> = None;
    let mut in_section = false;

    for line in raw.lines() {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let indent = line.len() - line.trim_start().len();

        if indent == 0 {
            if in_section {
                break;
            }
            in_section = text.to_ascii_lowercase().starts_with("plugins");
            continue;
        }
        if !in_section {
            continue;
        }

        if indent < PLUGIN_DESCRIPTION_INDENT {
            let (name, description) = match text.split_once(char::is_whitespace) {
                Some((name, rest)) => (name, rest.trim()),
                None => (text, ""),
            };
            if is_plugin_name(name) {
                if let Some((name, description)) = current.take() {
                    plugins.insert(name, description);
                }
                current = Some((name.to_string(), description.to_string()));
            }
        } else if let Some((_, description)) = current.as_mut() {
            if !description.is_empty() {
                description.push(' ');
            }
            description.push_str(text);
        }
    }

    if let Some((name, description)) = current {
        plugins.insert(name, description);
    }
    plugins
}

/// `windows.pslist.PsList` style: dotted, no leading dash
fn is_plugin_name(word: &str) -> bool {
    word.contains('.')
        && !word.starts_with(['-', '.'])
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_'))
}
