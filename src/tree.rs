//! Tree representation for document content.

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

/// Ordered mapping used for keyed containers.
pub type Map = IndexMap<String, Node>;

/// A node in a document tree.
///
/// Objects keep their insertion order for round-tripping, but equality
/// between two objects ignores key order.
#[derive(Debug, Clone)]
pub enum Node {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(Map),
    Array(Vec<Node>),
}

impl Node {
    /// An empty keyed container.
    pub fn empty_object() -> Self {
        Node::Object(Map::new())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Object(_) => "object",
            Node::Array(_) => "array",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a direct child of an object node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Returns a short preview of the node's value, truncated to max_len.
    pub fn preview(&self, max_len: usize) -> String {
        let preview = match self {
            Node::Null => "null".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Number(n) => match as_integer(*n) {
                Some(i) => i.to_string(),
                None => n.to_string(),
            },
            Node::String(s) => format!("\"{}\"", s),
            Node::Object(map) => match map.len() {
                0 => "{}".to_string(),
                1 => "{ 1 key }".to_string(),
                count => format!("{{ {} keys }}", count),
            },
            Node::Array(arr) => match arr.len() {
                0 => "[]".to_string(),
                1 => "[ 1 item ]".to_string(),
                count => format!("[ {} items ]", count),
            },
        };

        if preview.chars().count() > max_len {
            let kept: String = preview.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            preview
        }
    }

    /// Renders scalars in full and containers as compact JSON.
    pub fn render(&self) -> String {
        match self {
            Node::Object(_) | Node::Array(_) => {
                serde_json::to_string(self).unwrap_or_else(|_| self.preview(usize::MAX))
            }
            _ => self.preview(usize::MAX),
        }
    }
}

/// Structural equality. NaN equals NaN so every tree equals itself.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Null, Node::Null) => true,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::Number(a), Node::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Object(a), Node::Object(b)) => a == b,
            (Node::Array(a), Node::Array(b)) => a == b,
            _ => false,
        }
    }
}

/// Integral, finite numbers that survive an i64 round trip are emitted
/// without a fractional part.
fn as_integer(n: f64) -> Option<i64> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT {
        Some(n as i64)
    } else {
        None
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => match as_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Node::String(s) => serializer.serialize_str(s),
            Node::Array(items) => serializer.collect_seq(items),
            Node::Object(map) => serializer.collect_map(map),
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Number(n)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(n as f64)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Node::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_equality_ignores_order() {
        let mut first = Map::new();
        first.insert("a".to_string(), Node::Number(1.0));
        first.insert("b".to_string(), Node::Number(2.0));

        let mut second = Map::new();
        second.insert("b".to_string(), Node::Number(2.0));
        second.insert("a".to_string(), Node::Number(1.0));

        assert_eq!(Node::Object(first), Node::Object(second));
    }

    #[test]
    fn test_serialize_keeps_insertion_order() {
        let mut map = Map::new();
        map.insert("zeta".to_string(), Node::Number(1.0));
        map.insert("alpha".to_string(), Node::Number(2.5));

        let json = serde_json::to_string(&Node::Object(map)).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2.5}"#);
    }

    #[test]
    fn test_nan_equals_itself() {
        assert_eq!(Node::Number(f64::NAN), Node::Number(f64::NAN));
        assert_ne!(Node::Number(f64::NAN), Node::Number(0.0));
        assert_eq!(Node::Number(0.0), Node::Number(-0.0));
        assert_ne!(Node::Null, Node::Bool(false));
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(as_integer(3.0), Some(3));
        assert_eq!(as_integer(-0.0), Some(0));
        assert_eq!(as_integer(3.5), None);
        assert_eq!(as_integer(f64::INFINITY), None);
        assert_eq!(as_integer(1e300), None);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let node = Node::String("ééééééééééééééé".to_string());
        let preview = node.preview(8);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 8);
    }
}
