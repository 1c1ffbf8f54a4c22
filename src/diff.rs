//! Structural diff of two document trees.
//!
//! Both trees are walked key by key. Keys present on one side only are
//! reported as added or removed with their whole subtree; keys holding an
//! object on both sides are recursed into; any other pair of unequal
//! values is reported as changed. Results are keyed by the full
//! `/`-joined path of the key.
//!
//! # Examples
//!
//! ```
//! use docpath::{compute_diff, parse_json, Node};
//!
//! let old = parse_json(r#"{"x": 1, "y": {"z": 2}}"#).unwrap();
//! let new = parse_json(r#"{"x": 1, "y": {"z": 3}, "w": 4}"#).unwrap();
//!
//! let diff = compute_diff(&old, &new).unwrap();
//! assert_eq!(diff.added["w"], Node::Number(4.0));
//! assert!(diff.removed.is_empty());
//! assert_eq!(diff.changed["y/z"].old, Node::Number(2.0));
//! assert_eq!(diff.changed["y/z"].new, Node::Number(3.0));
//! ```

use crate::error::DocError;
use crate::path::join_key;
use crate::tree::{Map, Node};
use indexmap::IndexMap;
use serde::Serialize;

/// Old and new value of a changed key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffValue {
    pub old: Node,
    pub new: Node,
}

/// Summary counts for a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of added keys
    pub added: usize,
    /// Number of removed keys
    pub removed: usize,
    /// Number of changed keys
    pub changed: usize,
}

impl DiffStats {
    /// Returns the total number of differences.
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.changed
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// The complete diff result.
///
/// The three maps never share a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentDiff {
    /// Keys only in the second tree, with their value there
    pub added: IndexMap<String, Node>,
    /// Keys only in the first tree, with their value there
    pub removed: IndexMap<String, Node>,
    /// Keys in both trees with unequal values
    pub changed: IndexMap<String, DiffValue>,
}

impl DocumentDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the trees are equal.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats {
            added: self.added.len(),
            removed: self.removed.len(),
            changed: self.changed.len(),
        }
    }
}

/// Computes the structural diff between two document roots.
///
/// Both roots must be objects; anything else is
/// [`DocError::NotAContainer`].
pub fn compute_diff(old: &Node, new: &Node) -> Result<DocumentDiff, DocError> {
    let old_map = root_object(old, "first")?;
    let new_map = root_object(new, "second")?;

    let mut diff = DocumentDiff::new();
    diff_objects(old_map, new_map, "", &mut diff);
    Ok(diff)
}

fn root_object<'a>(node: &'a Node, side: &'static str) -> Result<&'a Map, DocError> {
    node.as_object().ok_or(DocError::NotAContainer {
        side,
        found: node.type_name(),
    })
}

/// Compares two objects under `prefix`, accumulating into `diff`.
///
/// Each recursive call owns a distinct prefix, so merged keys never
/// collide.
fn diff_objects(old_map: &Map, new_map: &Map, prefix: &str, diff: &mut DocumentDiff) {
    for (key, old_value) in old_map {
        let full_key = join_key(prefix, key);
        match new_map.get(key) {
            None => {
                diff.removed.insert(full_key, old_value.clone());
            }
            Some(new_value) => diff_values(old_value, new_value, full_key, diff),
        }
    }

    for (key, new_value) in new_map {
        if !old_map.contains_key(key) {
            diff.added.insert(join_key(prefix, key), new_value.clone());
        }
    }
}

fn diff_values(old: &Node, new: &Node, full_key: String, diff: &mut DocumentDiff) {
    match (old, new) {
        (Node::Object(old_map), Node::Object(new_map)) => {
            diff_objects(old_map, new_map, &full_key, diff);
        }
        _ if old == new => {}
        _ => {
            diff.changed.insert(
                full_key,
                DiffValue {
                    old: old.clone(),
                    new: new.clone(),
                },
            );
        }
    }
}
