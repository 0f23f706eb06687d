//! Response Selection
//!
//! One fixed, informational reply per category, plus a pool of general
//! templates for messages that match nothing. The replies are general
//! guidance only; none of them diagnoses.

use super::classifier::Category;
use super::policy::{SelectionPolicy, UniformPolicy};

const EMERGENCY: &str = "⚠️ This sounds like a medical emergency. Please call 911 immediately or go to your nearest emergency room. Do not delay seeking immediate medical attention.";

const HEADACHE: &str = "Headaches can have various causes including stress, dehydration, lack of sleep, or tension. For mild headaches, try rest, hydration, and over-the-counter pain relievers as directed. However, seek immediate medical attention for severe, sudden headaches, headaches with fever, vision changes, or neck stiffness.";

const FEVER: &str = "Fever is often a sign your body is fighting an infection. For adults, a fever over 103°F (39.4°C) or persistent fever for more than 3 days warrants medical attention. Stay hydrated, rest, and consider acetaminophen or ibuprofen as directed. Seek immediate care for high fever with severe symptoms.";

const COUGH: &str = "Coughs can be caused by various factors including viral infections, allergies, or irritants. For a persistent cough lasting more than 2 weeks, cough with blood, or accompanied by fever and difficulty breathing, please consult a healthcare provider. Stay hydrated and consider honey for throat soothing.";

const GASTRO: &str = "Stomach issues can range from minor digestive problems to more serious conditions. For mild nausea, try clear fluids, bland foods (BRAT diet), and rest. Seek medical attention for severe abdominal pain, persistent vomiting, signs of dehydration, or blood in vomit.";

const COLD_FLU: &str = "Cold and flu symptoms typically resolve on their own with rest, fluids, and supportive care. See a doctor if symptoms worsen after a week, you have a high fever, difficulty breathing, or if you're in a high-risk group (elderly, pregnant, chronic conditions).";

const MEDICATION: &str = "I cannot provide specific medication advice or dosing recommendations. Please consult your pharmacist or healthcare provider for medication questions. Always follow prescribed dosing instructions and inform healthcare providers about all medications you're taking.";

const APPOINTMENT: &str = "I cannot schedule appointments, but I recommend calling your healthcare provider's office directly. Many practices also offer online patient portals for appointment scheduling. For urgent concerns, consider urgent care centers or telehealth options.";

const NUTRITION: &str = "A balanced diet with fruits, vegetables, whole grains, lean proteins, and adequate hydration supports overall health. For specific dietary needs or restrictions, consult with a registered dietitian or your healthcare provider.";

const EXERCISE: &str = "Regular physical activity is important for health. Adults should aim for at least 150 minutes of moderate aerobic activity weekly. Start slowly and gradually increase intensity. Consult your doctor before beginning a new exercise program, especially if you have health conditions.";

const SLEEP: &str = "Good sleep hygiene includes 7-9 hours of sleep nightly, consistent sleep schedule, comfortable sleep environment, and avoiding screens before bedtime. Persistent sleep problems may warrant evaluation by a healthcare provider.";

const MENTAL_HEALTH: &str = "Mental health is as important as physical health. Stress management techniques include deep breathing, exercise, meditation, and social support. If you're experiencing persistent anxiety, depression, or thoughts of self-harm, please reach out to a mental health professional or crisis hotline immediately.";

/// Replies for messages that match no category
pub const FALLBACK_TEMPLATES: [&str; 4] = [
    "I understand your concern. While I can provide general health information, it's important to consult with a healthcare professional for personalized medical advice. Can you tell me more about your specific symptoms?",
    "Thank you for sharing that with me. For the most accurate diagnosis and treatment, I recommend discussing this with your healthcare provider. In the meantime, is there any general health information I can help you with?",
    "I'm here to help with general health questions, but please remember that I cannot replace professional medical evaluation. If your symptoms are concerning or persistent, please contact your healthcare provider.",
    "That's an important health question. While I can offer general guidance, your healthcare provider would be the best person to give you specific advice based on your medical history and current condition.",
];

/// Maps a category to reply text
pub struct ResponseSelector {
    policy: Box<dyn SelectionPolicy>,
}

impl ResponseSelector {
    /// Create a selector with uniform random fallback selection
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(UniformPolicy::new())
    }

    /// Create a selector with a specific fallback policy
    #[must_use]
    pub fn with_policy(policy: impl SelectionPolicy + 'static) -> Self {
        Self {
            policy: Box::new(policy),
        }
    }

    /// Reply text for a category
    ///
    /// Deterministic for every category except
    /// [`Category::Uncategorized`], which draws from
    /// [`FALLBACK_TEMPLATES`] through the selection policy.
    pub fn select(&mut self, category: Category) -> String {
        match fixed_response(category) {
            Some(text) => text.to_string(),
            None => {
                let idx = self.policy.pick(FALLBACK_TEMPLATES.len());
                // Out-of-range picks clamp to the last template
                let idx = idx.min(FALLBACK_TEMPLATES.len() - 1);
                tracing::trace!(template = idx, "Selected fallback template");
                FALLBACK_TEMPLATES[idx].to_string()
            }
        }
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResponseSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSelector").finish_non_exhaustive()
    }
}

/// The fixed reply for a category, or `None` for [`Category::Uncategorized`]
#[must_use]
pub fn fixed_response(category: Category) -> Option<&'static str> {
    let text = match category {
        Category::Emergency => EMERGENCY,
        Category::Headache => HEADACHE,
        Category::Fever => FEVER,
        Category::Cough => COUGH,
        Category::Gastro => GASTRO,
        Category::ColdFlu => COLD_FLU,
        Category::Medication => MEDICATION,
        Category::Appointment => APPOINTMENT,
        Category::Nutrition => NUTRITION,
        Category::Exercise => EXERCISE,
        Category::Sleep => SLEEP,
        Category::MentalHealth => MENTAL_HEALTH,
        Category::Uncategorized => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::triage::policy::{FixedPolicy, RoundRobinPolicy};

    #[test]
    fn test_fixed_categories_are_deterministic() {
        let mut selector = ResponseSelector::new();
        for category in Category::ALL {
            if category == Category::Uncategorized {
                continue;
            }
            let first = selector.select(category);
            let second = selector.select(category);
            assert_eq!(first, second, "{category}");
            assert!(!first.is_empty());
        }
    }

    #[test]
    fn test_fixed_responses_are_distinct() {
        let texts: HashSet<&str> = Category::ALL
            .iter()
            .filter_map(|c| fixed_response(*c))
            .collect();
        assert_eq!(texts.len(), 12);
    }

    #[test]
    fn test_emergency_directs_to_emergency_services() {
        let text = ResponseSelector::new().select(Category::Emergency);
        assert!(text.contains("911"));
        assert!(text.contains("emergency room"));
    }

    #[test]
    fn test_fallback_stays_in_pool_and_varies() {
        let mut selector = ResponseSelector::with_policy(UniformPolicy::with_seed(42));
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let text = selector.select(Category::Uncategorized);
            assert!(FALLBACK_TEMPLATES.contains(&text.as_str()));
            seen.insert(text);
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_fallback_with_deterministic_policies() {
        let mut fixed = ResponseSelector::with_policy(FixedPolicy(1));
        assert_eq!(fixed.select(Category::Uncategorized), FALLBACK_TEMPLATES[1]);
        assert_eq!(fixed.select(Category::Uncategorized), FALLBACK_TEMPLATES[1]);

        let mut cycling = ResponseSelector::with_policy(RoundRobinPolicy::new());
        let picks: Vec<String> = (0..4)
            .map(|_| cycling.select(Category::Uncategorized))
            .collect();
        assert_eq!(picks, FALLBACK_TEMPLATES.map(str::to_string).to_vec());
    }

    #[test]
    fn test_out_of_range_policy_is_clamped() {
        struct Broken;
        impl SelectionPolicy for Broken {
            fn pick(&mut self, len: usize) -> usize {
                len + 10
            }
        }

        let mut selector = ResponseSelector::with_policy(Broken);
        assert_eq!(selector.select(Category::Uncategorized), FALLBACK_TEMPLATES[3]);
    }
}
