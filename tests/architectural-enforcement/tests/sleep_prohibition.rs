//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code in the Conductor MUST NOT block a thread to
//! wait. The thinking delay is the only timer, and it lives in the turn
//! coordinator as a `tokio::time::sleep` inside the spawned reply task.
//!
//! **Exceptions**: test code (`#[cfg(test)]` modules).

use std::path::Path;

use architectural_enforcement::{conductor_src, read_production_lines, rust_files};

/// The one file allowed to schedule a timer
const TURN_SCHEDULER: &str = "conductor.rs";

/// Test that production code never blocks a thread with a sleep
#[test]
fn test_no_thread_sleep_in_production_code() {
    let violations = find_violations(|_, code| code.contains("thread::sleep("));

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Blocking sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        panic!(
            "\nFound {} blocking sleep violation(s).\nUse the reply task's async timer instead.",
            violations.len()
        );
    }
}

/// Test that async sleeps only appear in the turn scheduler
#[test]
fn test_async_sleep_only_in_turn_scheduler() {
    let violations = find_violations(|path, code| {
        let is_sleep = code.contains("::sleep(") || code.contains(".sleep(");
        is_sleep && !path.ends_with(TURN_SCHEDULER)
    });

    if !violations.is_empty() {
        eprintln!("\n❌ Timers found outside {TURN_SCHEDULER}:\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        panic!("\nFound {} misplaced timer(s).", violations.len());
    }
}

/// Test that the turn scheduler actually contains the reply timer
#[test]
fn test_turn_scheduler_has_reply_timer() {
    let path = conductor_src().join(TURN_SCHEDULER);
    let has_timer = read_production_lines(&path)
        .iter()
        .any(|(_, code)| code.contains("tokio::time::sleep("));
    assert!(has_timer, "{} should schedule the reply with tokio::time::sleep", path.display());
}

fn find_violations<F>(is_violation: F) -> Vec<String>
where
    F: Fn(&Path, &str) -> bool,
{
    let mut violations = Vec::new();
    for path in rust_files(&conductor_src()) {
        for (line_number, code) in read_production_lines(&path) {
            if is_violation(&path, &code) {
                violations.push(format!(
                    "{}:{} - {}",
                    path.display(),
                    line_number,
                    code.trim()
                ));
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use architectural_enforcement::production_lines;

    #[test]
    fn test_sleep_violation_detection() {
        let test_code = "fn bad_function() {\n    std::thread::sleep(Duration::from_millis(10));\n}\n";
        let lines = production_lines(test_code);
        assert!(lines.iter().any(|(_, code)| code.contains("thread::sleep(")));
    }

    #[test]
    fn test_sleep_in_test_module_ignored() {
        let test_code = "fn ok() {}\n#[cfg(test)]\nmod tests {\n    fn t() { std::thread::sleep(D); }\n}\n";
        let lines = production_lines(test_code);
        assert!(!lines.iter().any(|(_, code)| code.contains("sleep(")));
    }

    #[test]
    fn test_commented_sleep_ignored() {
        let lines = production_lines("// tokio::time::sleep(d).await;\n");
        assert!(lines.is_empty());
    }
}
