//! Integration Test: Classifier Purity
//!
//! **Policy**: The keyword classifier is a pure function of its input text.
//! It must not reach for the async runtime, randomness, or session state.
//! Randomness belongs to the selection policy; time belongs to the turn
//! coordinator.

use architectural_enforcement::{conductor_src, read_production_lines};

const FORBIDDEN: &[&str] = &[
    "tokio",
    "rand::",
    "crate::session",
    "crate::conductor",
    "crate::timing",
    "std::time",
    "parking_lot",
];

#[test]
fn test_classifier_has_no_side_effect_imports() {
    let path = conductor_src().join("triage/classifier.rs");
    assert!(path.exists(), "missing {}", path.display());

    let violations: Vec<String> = read_production_lines(&path)
        .into_iter()
        .filter(|(_, code)| FORBIDDEN.iter().any(|f| code.contains(f)))
        .map(|(line_number, code)| format!("{}:{} - {}", path.display(), line_number, code.trim()))
        .collect();

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        panic!("\nThe classifier must stay a pure function ({} violation(s)).", violations.len());
    }
}

#[test]
fn test_randomness_confined_to_policy_and_timing() {
    let allowed = ["policy.rs", "timing.rs"];
    let mut violations = Vec::new();

    for path in architectural_enforcement::rust_files(&conductor_src()) {
        if allowed.iter().any(|a| path.ends_with(a)) {
            continue;
        }
        for (line_number, code) in read_production_lines(&path) {
            if code.contains("use rand") || code.contains("rand::") {
                violations.push(format!("{}:{} - {}", path.display(), line_number, code.trim()));
            }
        }
    }

    assert!(violations.is_empty(), "rand used outside policy/timing:\n{}", violations.join("\n"));
}
