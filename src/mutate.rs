//! Copy-on-write mutation of document trees.
//!
//! Every operation clones the input tree first and returns the modified
//! copy, so the caller's tree stays valid for comparison or rollback.
//!
//! # Examples
//!
//! ```
//! use docpath::{delete_path, parse_json, set_path, Node, PathExpr};
//!
//! let tree = parse_json(r#"{"a": 1}"#).unwrap();
//!
//! // The scalar at "a" is replaced by a container.
//! let updated = set_path(&tree, &PathExpr::parse("a/b"), Node::Number(5.0));
//! assert_eq!(updated, parse_json(r#"{"a": {"b": 5}}"#).unwrap());
//! assert_eq!(tree, parse_json(r#"{"a": 1}"#).unwrap());
//!
//! let removed = delete_path(&updated, &PathExpr::parse("a/b")).unwrap();
//! assert_eq!(removed, parse_json(r#"{"a": {}}"#).unwrap());
//! ```

use crate::error::DocError;
use crate::path::PathExpr;
use crate::tree::{Map, Node};

/// Sets `value` at `path` in a copy of `tree`.
///
/// Missing intermediate keys are created as empty objects, and
/// intermediate values that are not objects are overwritten by one. A
/// non-object root is treated the same way. This never fails.
pub fn set_path(tree: &Node, path: &PathExpr, value: Node) -> Node {
    let (parents, last) = path.split_last();
    let mut root = into_object(tree.clone());
    set_in(&mut root, parents, last, value);
    Node::Object(root)
}

fn set_in(map: &mut Map, parents: &[String], last: &str, value: Node) {
    match parents.split_first() {
        Some((key, rest)) => {
            let slot = map.entry(key.clone()).or_insert_with(Node::empty_object);
            let mut child = into_object(std::mem::replace(slot, Node::Null));
            set_in(&mut child, rest, last, value);
            *slot = Node::Object(child);
        }
        None => {
            map.insert(last.to_string(), value);
        }
    }
}

/// Removes the key at `path` from a copy of `tree`.
///
/// Unlike [`set_path`] nothing is created along the way: a missing key or
/// a non-object value at any step is [`DocError::NotFound`].
pub fn delete_path(tree: &Node, path: &PathExpr) -> Result<Node, DocError> {
    let mut root = tree.clone();
    let (parents, last) = path.split_last();

    let mut node = &mut root;
    for key in parents {
        node = match node {
            Node::Object(map) => map.get_mut(key).ok_or_else(|| path.not_found())?,
            _ => return Err(path.not_found()),
        };
    }

    match node {
        Node::Object(map) => {
            map.shift_remove(last).ok_or_else(|| path.not_found())?;
        }
        _ => return Err(path.not_found()),
    }

    Ok(root)
}

/// Shallow-merges `payload` into a copy of the root object.
///
/// Payload keys overwrite existing root keys; nested objects are replaced,
/// not merged.
pub fn merge_root(tree: &Node, payload: &Map) -> Node {
    let mut root = into_object(tree.clone());
    for (key, value) in payload {
        root.insert(key.clone(), value.clone());
    }
    Node::Object(root)
}

/// Unwraps an object's map; anything else becomes an empty map.
fn into_object(node: Node) -> Map {
    match node {
        Node::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_json;

    fn json(s: &str) -> Node {
        parse_json(s).unwrap()
    }

    #[test]
    fn test_set_adds_sibling() {
        let tree = json(r#"{"a": {"b": 1}}"#);
        let updated = set_path(&tree, &PathExpr::parse("a/c"), Node::Number(2.0));
        assert_eq!(updated, json(r#"{"a": {"b": 1, "c": 2}}"#));
    }

    #[test]
    fn test_set_creates_missing_chain() {
        let tree = json("{}");
        let updated = set_path(&tree, &PathExpr::parse("x/y/z"), Node::Bool(true));
        assert_eq!(updated, json(r#"{"x": {"y": {"z": true}}}"#));
    }

    #[test]
    fn test_set_overwrites_array_in_the_way() {
        let tree = json(r#"{"a": [1, 2]}"#);
        let updated = set_path(&tree, &PathExpr::parse("a/b"), Node::Null);
        assert_eq!(updated, json(r#"{"a": {"b": null}}"#));
    }

    #[test]
    fn test_set_replaces_terminal_container() {
        let tree = json(r#"{"a": {"b": {"c": 1}}}"#);
        let updated = set_path(&tree, &PathExpr::parse("a/b"), Node::from("flat"));
        assert_eq!(updated, json(r#"{"a": {"b": "flat"}}"#));
    }

    #[test]
    fn test_set_on_scalar_root() {
        let updated = set_path(&Node::Number(3.0), &PathExpr::parse("k"), Node::Null);
        assert_eq!(updated, json(r#"{"k": null}"#));
    }

    #[test]
    fn test_set_empty_path_targets_empty_key() {
        let tree = json(r#"{"a": 1}"#);
        let updated = set_path(&tree, &PathExpr::parse(""), Node::Number(9.0));
        assert_eq!(updated, json(r#"{"a": 1, "": 9}"#));
    }

    #[test]
    fn test_delete_preserves_order_of_remaining_keys() {
        let tree = json(r#"{"a": 1, "b": 2, "c": 3}"#);
        let updated = delete_path(&tree, &PathExpr::parse("b")).unwrap();
        let keys: Vec<&String> = updated.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn test_delete_missing_terminal() {
        let tree = json(r#"{"a": {}}"#);
        let err = delete_path(&tree, &PathExpr::parse("a/b")).unwrap_err();
        assert_eq!(err, DocError::not_found("a/b"));
    }

    #[test]
    fn test_delete_through_scalar() {
        let tree = json(r#"{"a": 1}"#);
        let err = delete_path(&tree, &PathExpr::parse("a/b")).unwrap_err();
        assert_eq!(err, DocError::not_found("a/b"));
    }

    #[test]
    fn test_delete_through_missing_intermediate() {
        let tree = json(r#"{"a": {}}"#);
        assert!(delete_path(&tree, &PathExpr::parse("a/x/y")).is_err());
    }

    #[test]
    fn test_set_keeps_key_position_of_replaced_intermediate() {
        let tree = json(r#"{"a": 1, "b": 2, "c": 3}"#);
        let updated = set_path(&tree, &PathExpr::parse("b/x"), Node::Null);
        let keys: Vec<&String> = updated.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(updated, json(r#"{"a": 1, "b": {"x": null}, "c": 3}"#));
    }

    #[test]
    fn test_merge_root_overwrites_top_level() {
        let tree = json(r#"{"a": {"keep": 1}, "b": 2}"#);
        let payload = json(r#"{"a": {"new": 1}, "c": 3}"#);
        let merged = merge_root(&tree, payload.as_object().unwrap());
        assert_eq!(merged, json(r#"{"a": {"new": 1}, "b": 2, "c": 3}"#));
        assert_eq!(tree, json(r#"{"a": {"keep": 1}, "b": 2}"#));
    }
}
