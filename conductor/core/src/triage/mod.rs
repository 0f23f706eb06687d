//! Triage
//!
//! Turns free text into a canned reply:
//!
//! ```text
//! user text ──► classify() ──► Category ──► ResponseSelector::select() ──► reply text
//!                  │                              │
//!           KEYWORD_TABLE                 SelectionPolicy
//!        (ordered, first match)     (fallback pool only)
//! ```
//!
//! Classification is a pure function. The only randomness lives behind
//! [`SelectionPolicy`], so tests can swap in a deterministic policy.

pub mod classifier;
pub mod policy;
pub mod responses;

pub use classifier::{classify, matched_keyword, Category, KEYWORD_TABLE};
pub use policy::{FixedPolicy, RoundRobinPolicy, SelectionPolicy, UniformPolicy};
pub use responses::{ResponseSelector, FALLBACK_TEMPLATES};
