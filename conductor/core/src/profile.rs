//! Assistant Profile
//!
//! Static copy a surface shows around the conversation: header, disclaimer
//! banner, input placeholder and hint, and the greeting that seeds every
//! session.

use serde::{Deserialize, Serialize};

/// Default greeting seeded into every new session
pub const DEFAULT_GREETING: &str = "Hello! I'm Dr. AI Assistant, your virtual healthcare companion. I'm here to help answer basic health questions and provide general medical information while your doctor is unavailable. How can I assist you today?";

/// Copy describing the assistant to a surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantProfile {
    /// Display name (header title)
    pub name: String,
    /// Header subtitle
    pub tagline: String,
    /// First bot message of every session
    pub greeting: String,
    /// Banner shown above the conversation
    pub disclaimer: String,
    /// Placeholder for the empty input field
    pub input_placeholder: String,
    /// Hint under the input field
    pub input_hint: String,
}

impl Default for AssistantProfile {
    fn default() -> Self {
        Self {
            name: "Dr. AI Assistant".to_string(),
            tagline: "Virtual Healthcare Companion".to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            disclaimer: "Important: This AI assistant provides general health information only and cannot replace professional medical advice, diagnosis, or treatment. For medical emergencies, call 911 immediately.".to_string(),
            input_placeholder: "Describe your symptoms or ask a health question...".to_string(),
            input_hint: "Press Enter to send • Always consult healthcare professionals for medical decisions".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = AssistantProfile::default();
        assert_eq!(profile.name, "Dr. AI Assistant");
        assert_eq!(profile.greeting, DEFAULT_GREETING);
        assert!(profile.disclaimer.contains("911"));
    }
}
