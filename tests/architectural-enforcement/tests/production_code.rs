//! Production-code rules for theme-core

use architectural_enforcement::{rust_sources, scan, theme_core_src};

fn assert_clean(patterns: &[&str], exclude: &[&str]) {
    let violations = scan(&theme_core_src(), exclude, patterns).unwrap();
    assert!(
        violations.is_empty(),
        "forbidden patterns {patterns:?} in production code:\n{}",
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
}

#[test]
fn test_sources_are_found() {
    let sources = rust_sources(&theme_core_src(), &[]);
    assert!(sources.iter().any(|p| p.ends_with("lib.rs")));
    assert!(sources.iter().any(|p| p.ends_with("context.rs")));
}

#[test]
fn test_no_unwrap_or_expect() {
    assert_clean(&[".unwrap()", ".expect("], &["bin"]);
}

#[test]
fn test_no_stdout_in_library() {
    assert_clean(&["println!", "eprintln!", "dbg!"], &["bin"]);
}

#[test]
fn test_no_panics_in_library() {
    assert_clean(&["panic!", "unreachable!", "todo!", "unimplemented!"], &["bin"]);
}
