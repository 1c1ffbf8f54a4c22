//! docpath - path addressing, patching and structural diffing for document trees.
//!
//! Documents are nested key-value trees ([`Node`]). A slash-delimited path
//! such as `settings/theme/color` addresses a node inside a tree; the engine
//! resolves paths, sets or deletes values at a path on a private copy of the
//! tree, and computes the structural diff between two trees.
//!
//! # Example
//!
//! ```
//! use docpath::{compute_diff, parse_json, resolve, set_path, Node, PathExpr};
//!
//! let doc = parse_json(r#"{"a": {"b": 1}}"#).unwrap();
//! let path = PathExpr::parse("a/c");
//!
//! let updated = set_path(&doc, &path, Node::Number(2.0));
//! assert_eq!(resolve(&updated, &path).unwrap(), &Node::Number(2.0));
//! assert!(resolve(&doc, &path).is_err());
//!
//! let diff = compute_diff(&doc, &updated).unwrap();
//! assert_eq!(diff.added["a/c"], Node::Number(2.0));
//! ```

pub mod diff;
pub mod error;
pub mod mutate;
pub mod navigate;
pub mod output;
pub mod parser;
pub mod path;
pub mod store;
pub mod tree;

// Re-export commonly used types for convenience
pub use diff::{compute_diff, DiffStats, DiffValue, DocumentDiff};
pub use error::{DocError, DocpathError, OutputError, ParseError, StoreError};
pub use mutate::{delete_path, merge_root, set_path};
pub use navigate::{resolve, resolve_str};
pub use output::{format_diff, serialize_node, DocumentFormat, OutputFormat, OutputOptions};
pub use parser::{
    parse_content, parse_file, parse_json, parse_stdin, parse_toml, parse_value_arg, parse_yaml,
    FormatHint,
};
pub use path::{join_key, PathExpr, PathPolicy};
pub use store::{DocType, Document, DocumentPage, DocumentPatch, DocumentStore, NewDocument};
pub use tree::{Map, Node};
