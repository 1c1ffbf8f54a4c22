//! Document parsing for JSON, YAML and TOML.
//!
//! This module turns document files into the [`Node`] tree the path engine
//! works on. The format is detected from the file extension; files with an
//! unknown extension are tried as JSON, then YAML, then TOML.
//!
//! # Examples
//!
//! ```no_run
//! use docpath::parser::parse_file;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = parse_file(Path::new("document.json"))?;
//! let settings = parse_file(Path::new("settings.toml"))?;
//! # Ok(())
//! # }
//! ```

use crate::error::ParseError;
use crate::tree::{Map, Node};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Which syntax a piece of content is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Json,
    Yaml,
    Toml,
    /// Try JSON, then YAML, then TOML
    Auto,
}

impl FormatHint {
    /// Picks a format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some("json") => FormatHint::Json,
            Some("yaml") | Some("yml") => FormatHint::Yaml,
            Some("toml") => FormatHint::Toml,
            _ => FormatHint::Auto,
        }
    }
}

/// Parses a file into a Node tree.
///
/// `-` reads standard input with format auto-detection.
///
/// # Errors
///
/// - `ParseError::FileNotFound` if the file does not exist
/// - `ParseError::ReadError` if it cannot be read
/// - `ParseError::JsonError` / `YamlError` / `TomlError` for invalid content
/// - `ParseError::UnknownFormat` if no format accepts the content
pub fn parse_file(path: &Path) -> Result<Node, ParseError> {
    if path.as_os_str() == "-" {
        return parse_stdin();
    }

    let display = path.to_string_lossy().to_string();
    if !path.exists() {
        return Err(ParseError::file_not_found(display));
    }

    let content =
        fs::read_to_string(path).map_err(|e| ParseError::read_error(display.clone(), e))?;

    parse_content(&content, FormatHint::from_path(path), &display)
}

/// Parses everything on standard input.
pub fn parse_stdin() -> Result<Node, ParseError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| ParseError::read_error("<stdin>", e))?;
    parse_content(&content, FormatHint::Auto, "<stdin>")
}

/// Parses `content` in the given format; `origin` names it in errors.
pub fn parse_content(content: &str, hint: FormatHint, origin: &str) -> Result<Node, ParseError> {
    match hint {
        FormatHint::Json => parse_json(content).map_err(|e| ParseError::json_error(origin, e)),
        FormatHint::Yaml => parse_yaml(content).map_err(|e| ParseError::yaml_error(origin, e)),
        FormatHint::Toml => parse_toml(content).map_err(|e| ParseError::toml_error(origin, e)),
        FormatHint::Auto => parse_json(content)
            .ok()
            .or_else(|| parse_yaml(content).ok())
            .or_else(|| parse_toml(content).ok())
            .ok_or_else(|| ParseError::unknown_format(origin)),
    }
}

/// Parses a JSON string into a Node.
///
/// ```
/// use docpath::parser::parse_json;
///
/// let node = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert!(node.is_object());
/// ```
pub fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(json_to_node(value))
}

/// Parses a YAML string into a Node.
pub fn parse_yaml(content: &str) -> Result<Node, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_node(value))
}

/// Parses a TOML document into a Node. The root is always an object.
pub fn parse_toml(content: &str) -> Result<Node, toml::de::Error> {
    let table: toml::Table = content.parse()?;
    Ok(toml_to_node(toml::Value::Table(table)))
}

/// Parses a value given on the command line.
///
/// Valid JSON is taken as-is (`42`, `true`, `{"a": 1}`); anything else is
/// treated as a plain string.
pub fn parse_value_arg(raw: &str) -> Node {
    parse_json(raw).unwrap_or_else(|_| Node::String(raw.to_string()))
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        json_to_node(value)
    }
}

fn json_to_node(value: serde_json::Value) -> Node {
    match value {
        serde_json::Value::Null => Node::Null,
        serde_json::Value::Bool(b) => Node::Bool(b),
        // as_f64 is always Some without the arbitrary_precision feature
        serde_json::Value::Number(n) => Node::Number(n.as_f64().unwrap_or_default()),
        serde_json::Value::String(s) => Node::String(s),
        serde_json::Value::Array(arr) => Node::Array(arr.into_iter().map(json_to_node).collect()),
        serde_json::Value::Object(obj) => {
            let map: Map = obj.into_iter().map(|(k, v)| (k, json_to_node(v))).collect();
            Node::Object(map)
        }
    }
}

/// Non-string YAML keys are converted to strings.
fn yaml_to_node(value: serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::Null,
        serde_yaml::Value::Bool(b) => Node::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                Node::Number(f)
            } else if let Some(i) = n.as_i64() {
                Node::Number(i as f64)
            } else if let Some(u) = n.as_u64() {
                Node::Number(u as f64)
            } else {
                Node::Number(0.0)
            }
        }
        serde_yaml::Value::String(s) => Node::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Node::Array(seq.into_iter().map(yaml_to_node).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let map: Map = mapping
                .into_iter()
                .map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        other => format!("{:?}", other),
                    };
                    (key, yaml_to_node(v))
                })
                .collect();
            Node::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_node(tagged.value),
    }
}

/// TOML datetimes become strings.
fn toml_to_node(value: toml::Value) -> Node {
    match value {
        toml::Value::String(s) => Node::String(s),
        toml::Value::Integer(i) => Node::Number(i as f64),
        toml::Value::Float(f) => Node::Number(f),
        toml::Value::Boolean(b) => Node::Bool(b),
        toml::Value::Datetime(dt) => Node::String(dt.to_string()),
        toml::Value::Array(arr) => Node::Array(arr.into_iter().map(toml_to_node).collect()),
        toml::Value::Table(table) => {
            let map: Map = table.into_iter().map(|(k, v)| (k, toml_to_node(v))).collect();
            Node::Object(map)
        }
    }
}
