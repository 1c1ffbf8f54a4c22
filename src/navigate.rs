//! Read-only path resolution.

use crate::error::DocError;
use crate::path::PathExpr;
use crate::tree::Node;

/// Resolves `path` against `tree`, returning the addressed node.
///
/// Every segment must name an existing key of an object node; anything
/// else (a missing key, or a scalar or array in the way) is
/// [`DocError::NotFound`] carrying the original path string.
///
/// # Examples
///
/// ```
/// use docpath::{parse_json, resolve, Node, PathExpr};
///
/// let tree = parse_json(r#"{"a": {"b": 1}}"#).unwrap();
/// let node = resolve(&tree, &PathExpr::parse("a/b")).unwrap();
/// assert_eq!(node, &Node::Number(1.0));
///
/// assert!(resolve(&tree, &PathExpr::parse("a/b/c")).is_err());
/// ```
pub fn resolve<'a>(tree: &'a Node, path: &PathExpr) -> Result<&'a Node, DocError> {
    let mut node = tree;
    for key in path.segments() {
        node = match node {
            Node::Object(map) => map.get(key).ok_or_else(|| path.not_found())?,
            _ => return Err(path.not_found()),
        };
    }
    Ok(node)
}

/// Parses `path` leniently and resolves it.
pub fn resolve_str<'a>(tree: &'a Node, path: &str) -> Result<&'a Node, DocError> {
    resolve(tree, &PathExpr::parse(path))
}
