use docpath::{join_key, DocError, PathExpr, PathPolicy};

#[test]
fn test_segments() {
    assert_eq!(PathExpr::parse("a").segments(), ["a"]);
    assert_eq!(PathExpr::parse("a/b/c").segments(), ["a", "b", "c"]);
    assert_eq!(PathExpr::parse("/a/b").segments(), ["a", "b"]);
    assert_eq!(PathExpr::parse("a/b/").segments(), ["a", "b"]);
}

#[test]
fn test_only_one_slash_is_stripped() {
    assert_eq!(PathExpr::parse("a//").segments(), ["a", ""]);
    assert_eq!(PathExpr::parse("//a//").segments(), ["", "a", ""]);
}

#[test]
fn test_interior_empty_segment_kept() {
    assert_eq!(PathExpr::parse("a//b").segments(), ["a", "", "b"]);
}

#[test]
fn test_empty_path_has_one_empty_segment() {
    let path = PathExpr::parse("");
    assert_eq!(path.len(), 1);
    assert!(!path.is_empty());
    assert!(path.is_root());
    assert_eq!(path.split_last(), (&[][..], ""));
}

#[test]
fn test_all_slash_path_is_empty_path() {
    for raw in ["///", "////"] {
        let path = PathExpr::parse(raw);
        assert_eq!(path.segments(), [""], "raw = {:?}", raw);
        assert!(path.is_root());
        assert!(PathExpr::parse_with(raw, PathPolicy::Strict).is_err());
    }
}

#[test]
fn test_display_is_raw() {
    let path = PathExpr::parse("/a/b/");
    assert_eq!(path.to_string(), "/a/b/");
    assert_eq!(path.as_str(), "/a/b/");
}

#[test]
fn test_policies() {
    assert!(PathExpr::parse_with("", PathPolicy::default()).is_ok());
    assert_eq!(
        PathExpr::parse_with("", PathPolicy::Strict).unwrap_err(),
        DocError::InvalidPath {
            path: "".to_string(),
            reason: "path must name at least one key".to_string()
        }
    );
    assert!(PathExpr::parse_with("a//b", PathPolicy::Strict).is_ok());
}

#[test]
fn test_join_key() {
    assert_eq!(join_key("", "root"), "root");
    assert_eq!(join_key("a", "b"), "a/b");
}
