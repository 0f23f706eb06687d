//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce structural rules of
//! the conductor crate:
//! - No blocking sleeps anywhere in production code
//! - Timers only in the turn coordinator
//! - The keyword classifier stays a pure function
//!
//! The helpers below are shared by the tests in `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// Source root of the conductor crate
#[must_use]
pub fn conductor_src() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../conductor/core/src")
}

/// All `.rs` files under `dir`, sorted
#[must_use]
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Production lines of a source file as `(line_number, code)` pairs
///
/// Stops at the first `#[cfg(test)]` and strips `//` comments.
#[must_use]
pub fn production_lines(content: &str) -> Vec<(usize, String)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .map(|(idx, line)| {
            let code = line.split("//").next().unwrap_or(line);
            (idx + 1, code.to_string())
        })
        .filter(|(_, code)| !code.trim().is_empty())
        .collect()
}

/// Read a file's production lines, or nothing if unreadable
#[must_use]
pub fn read_production_lines(path: &Path) -> Vec<(usize, String)> {
    fs::read_to_string(path)
        .map(|content| production_lines(&content))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let content = "fn a() {}\n// note\nfn b() {} // trailing\n#[cfg(test)]\nmod tests {}\n";
        let lines = production_lines(content);
        assert_eq!(lines, vec![(1, "fn a() {}".to_string()), (3, "fn b() {} ".to_string())]);
    }

    #[test]
    fn test_conductor_src_exists() {
        assert!(conductor_src().join("lib.rs").exists());
    }
}
