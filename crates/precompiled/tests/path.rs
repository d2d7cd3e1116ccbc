use once_cell::sync::Lazy;
use precompiled::PrecompiledError;
use precompiled::path::{is_path_valid, join_path, normalize, path_segments, split_parent_and_base};

static VALID: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "/",
        "/a",
        "/apps/demo-1/token_v2",
        "/a/b/c/d/e/f",
        "/A9/z_-",
        "/trailing/",
    ]
});

static INVALID: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "",
        "a",
        "a/b",
        "//",
        "/a//b",
        "/a/./b",
        "/a/../b",
        "/..",
        "/a b",
        "/a/b/c/d/e/f/g",
        "/ümlaut",
        "/a$",
    ]
});

#[test]
fn accepts_well_formed_paths() {
    println!("=== Testing Path: Accepted ===");
    for path in VALID.iter() {
        println!("  {}", path);
        assert!(is_path_valid(path), "{} should be valid", path);
    }
}

#[test]
fn rejects_malformed_paths() {
    println!("=== Testing Path: Rejected ===");
    for path in INVALID.iter() {
        println!("  {:?}", path);
        assert!(!is_path_valid(path), "{:?} should be invalid", path);
    }
}

#[test]
fn length_limit_is_on_the_whole_path() {
    let at_limit = format!("/{}", "a".repeat(55));
    assert_eq!(at_limit.len(), 56);
    assert!(is_path_valid(&at_limit));

    let over = format!("/{}", "a".repeat(56));
    assert!(!is_path_valid(&over));

    let spread = format!("/{}/{}", "a".repeat(30), "b".repeat(26));
    assert!(!is_path_valid(&spread));
}

#[test]
fn split_yields_strict_prefix_parent() {
    for path in VALID.iter().filter(|p| **p != "/") {
        let canonical = normalize(path).unwrap();
        let (parent, base) = split_parent_and_base(path).unwrap();
        println!("  {} -> ({}, {})", path, parent, base);
        assert!(canonical.starts_with(&parent));
        assert!(parent.len() < canonical.len());
        assert_eq!(join_path(&parent, &base), canonical);
        assert!(is_path_valid(&parent));
    }
}

#[test]
fn split_examples() {
    assert_eq!(
        split_parent_and_base("/usr/local/bin").unwrap(),
        ("/usr/local".to_string(), "bin".to_string())
    );
    assert_eq!(
        split_parent_and_base("/usr").unwrap(),
        ("/".to_string(), "usr".to_string())
    );
}

#[test]
fn root_cannot_be_split() {
    assert_eq!(
        split_parent_and_base("/"),
        Err(PrecompiledError::InvalidPath("/".to_string()))
    );
}

#[test]
fn segments_of_nested_path() {
    assert_eq!(path_segments("/a/b/c").unwrap(), vec!["a", "b", "c"]);
    assert!(matches!(
        path_segments("a/b"),
        Err(PrecompiledError::InvalidPath(p)) if p == "a/b"
    ));
}
