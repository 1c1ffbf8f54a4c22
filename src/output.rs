//! Output formatting for diffs and document trees.
//!
//! Diffs render as coloured terminal lines, plain text, or the JSON object
//! `{"added": .., "removed": .., "changed": {"key": {"old": .., "new": ..}}}`.
//! Trees serialize back to JSON, YAML or TOML.
//!
//! # Examples
//!
//! ```
//! use docpath::{compute_diff, format_diff, parse_json, OutputFormat, OutputOptions};
//!
//! let old = parse_json(r#"{"age": 42}"#).unwrap();
//! let new = parse_json(r#"{"age": 43}"#).unwrap();
//! let diff = compute_diff(&old, &new).unwrap();
//!
//! let output = format_diff(&diff, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.contains("age: 42 -> 43"));
//! ```

use crate::diff::{DiffStats, DocumentDiff};
use crate::error::OutputError;
use crate::parser::FormatHint;
use crate::tree::Node;
use colored::*;
use std::str::FromStr;

/// Diff output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON representation of the diff
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            "plain" => Ok(OutputFormat::Plain),
            _ => Err(OutputError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Serialization formats for whole trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Writes back in the detected input format; unknown formats become JSON.
    pub fn from_hint(hint: FormatHint) -> Self {
        match hint {
            FormatHint::Yaml => DocumentFormat::Yaml,
            FormatHint::Toml => DocumentFormat::Toml,
            FormatHint::Json | FormatHint::Auto => DocumentFormat::Json,
        }
    }
}

/// Options for controlling diff formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Show full values instead of previews for containers
    pub show_values: bool,
    /// Maximum length for displayed values (truncate if longer)
    pub max_value_length: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            show_values: false,
            max_value_length: 80,
        }
    }
}

/// Formats a diff according to the specified format and options.
pub fn format_diff(
    diff: &DocumentDiff,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_lines(diff, options, true)),
        OutputFormat::Json => format_json(diff),
        OutputFormat::Plain => Ok(format_lines(diff, options, false)),
    }
}

/// Serializes a tree, pretty-printed, in the given format.
pub fn serialize_node(node: &Node, format: DocumentFormat) -> Result<String, OutputError> {
    match format {
        DocumentFormat::Json => serde_json::to_string_pretty(node)
            .map_err(|e| OutputError::JsonSerializationError { source: e }),
        DocumentFormat::Yaml => {
            serde_yaml::to_string(node).map_err(|e| OutputError::YamlSerializationError { source: e })
        }
        DocumentFormat::Toml => toml::to_string_pretty(node)
            .map_err(|e| OutputError::TomlSerializationError { source: e }),
    }
}

fn format_json(diff: &DocumentDiff) -> Result<String, OutputError> {
    serde_json::to_string_pretty(diff)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

enum Line<'a> {
    Added(&'a Node),
    Removed(&'a Node),
    Changed(&'a Node, &'a Node),
}

/// Renders one line per entry, sorted by key, then a summary.
fn format_lines(diff: &DocumentDiff, options: &OutputOptions, color: bool) -> String {
    if diff.is_empty() {
        let message = "No changes detected.";
        return if color {
            message.dimmed().to_string()
        } else {
            message.to_string()
        };
    }

    let mut lines: Vec<(&str, Line<'_>)> = Vec::with_capacity(diff.len());
    lines.extend(diff.added.iter().map(|(k, v)| (k.as_str(), Line::Added(v))));
    lines.extend(diff.removed.iter().map(|(k, v)| (k.as_str(), Line::Removed(v))));
    lines.extend(
        diff.changed
            .iter()
            .map(|(k, v)| (k.as_str(), Line::Changed(&v.old, &v.new))),
    );
    lines.sort_by(|a, b| a.0.cmp(b.0));

    let mut output = String::new();
    for (key, line) in lines {
        let rendered = match line {
            Line::Added(value) => {
                let value = format_value(value, options);
                if color {
                    format!("{} {}: {}", "+".bright_green(), key.green(), value.green())
                } else {
                    format!("+ {}: {}", key, value)
                }
            }
            Line::Removed(value) => {
                let value = format_value(value, options);
                if color {
                    format!("{} {}: {}", "-".bright_red(), key.red(), value.red())
                } else {
                    format!("- {}: {}", key, value)
                }
            }
            Line::Changed(old, new) => {
                let old = format_value(old, options);
                let new = format_value(new, options);
                if color {
                    format!(
                        "{} {}: {} {} {}",
                        "~".bright_yellow(),
                        key.yellow(),
                        old.yellow(),
                        "->".bright_yellow(),
                        new.yellow()
                    )
                } else {
                    format!("~ {}: {} -> {}", key, old, new)
                }
            }
        };
        output.push_str(&rendered);
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(&diff.stats()));
    output
}

fn format_value(node: &Node, options: &OutputOptions) -> String {
    if options.show_values {
        node.render()
    } else {
        node.preview(options.max_value_length)
    }
}

fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.removed > 0 {
        parts.push(format!("{} removed", stats.removed));
    }
    if stats.changed > 0 {
        parts.push(format!("{} changed", stats.changed));
    }

    format!("Summary: {}", parts.join(", "))
}
