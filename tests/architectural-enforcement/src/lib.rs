//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles
//! on the production sources of `theme-core`:
//! - No `unwrap()`/`expect()` outside tests (errors are propagated or logged)
//! - No `println!`/`eprintln!` in the library (logging goes through `tracing`)
//! - No `panic!` in the library
//!
//! Everything from the first `#[cfg(test)]` line of a file onward is treated as
//! test code.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// A forbidden pattern found in production code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File containing the pattern
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.text)
    }
}

/// Root of the `theme-core` sources
#[must_use]
pub fn theme_core_src() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("theme")
        .join("core")
        .join("src")
}

/// All `.rs` files under `root`, skipping any directory named in `exclude`
#[must_use]
pub fn rust_sources(root: &Path, exclude: &[&str]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && exclude
                    .iter()
                    .any(|name| entry.file_name().to_string_lossy() == *name))
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == "rs"))
        .collect()
}

/// Lines of production code in `content` containing any of `patterns`
///
/// Comment lines are ignored, and scanning stops at the first `#[cfg(test)]`.
#[must_use]
pub fn find_violations(path: &Path, content: &str, patterns: &[&str]) -> Vec<Violation> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .filter(|(_, line)| patterns.iter().any(|p| line.contains(p)))
        .map(|(i, line)| Violation {
            path: path.to_path_buf(),
            line: i + 1,
            text: line.trim().to_string(),
        })
        .collect()
}

/// Scan every production source under `root` for `patterns`
///
/// # Errors
///
/// Returns an IO error if a source file cannot be read.
pub fn scan(root: &Path, exclude: &[&str], patterns: &[&str]) -> std::io::Result<Vec<Violation>> {
    let mut violations = Vec::new();
    for path in rust_sources(root, exclude) {
        let content = std::fs::read_to_string(&path)?;
        violations.extend(find_violations(&path, &content, patterns));
    }
    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_violations_stops_at_test_module() {
        let source = "fn a() {\n    x.unwrap();\n}\n\n#[cfg(test)]\nmod tests {\n    y.unwrap();\n}\n";
        let found = find_violations(Path::new("a.rs"), source, &[".unwrap()"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 2);
    }

    #[test]
    fn test_find_violations_ignores_comments() {
        let source = "/// let x = y.unwrap();\n// println!(\"x\")\nlet z = w.unwrap_or(0);\n";
        let found = find_violations(Path::new("b.rs"), source, &[".unwrap()", "println!"]);
        assert!(found.is_empty());
    }
}
