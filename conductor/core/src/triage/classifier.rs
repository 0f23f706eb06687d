//! Keyword Classifier
//!
//! Maps user text to a [`Category`] by case-folded substring search against
//! [`KEYWORD_TABLE`]. The table is walked in priority order and the first
//! category with any matching keyword wins, so "chest pain and a headache"
//! is an emergency, not a headache.
//!
//! Matching is substring containment, not word matching: "urgently" fires
//! the emergency keyword "urgent" and "scold" fires "cold". That is a known
//! false-positive surface and is kept as-is.

use serde::{Deserialize, Serialize};

use crate::accessibility::Urgency;

/// Classification outcome selecting which canned reply applies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Life-threatening symptoms; always answered with emergency-services advice
    Emergency,
    /// Headache
    Headache,
    /// Fever
    Fever,
    /// Cough
    Cough,
    /// Stomach, nausea, vomiting
    Gastro,
    /// Common cold and influenza
    ColdFlu,
    /// Medication questions
    Medication,
    /// Appointments and scheduling
    Appointment,
    /// Diet and nutrition
    Nutrition,
    /// Exercise and workouts
    Exercise,
    /// Sleep
    Sleep,
    /// Stress, anxiety, depression
    MentalHealth,
    /// Nothing matched; answered from the fallback pool
    Uncategorized,
}

impl Category {
    /// Every category, highest priority first
    pub const ALL: [Category; 13] = [
        Category::Emergency,
        Category::Headache,
        Category::Fever,
        Category::Cough,
        Category::Gastro,
        Category::ColdFlu,
        Category::Medication,
        Category::Appointment,
        Category::Nutrition,
        Category::Exercise,
        Category::Sleep,
        Category::MentalHealth,
        Category::Uncategorized,
    ];

    /// Short label for logs and surfaces
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Headache => "headache",
            Self::Fever => "fever",
            Self::Cough => "cough",
            Self::Gastro => "gastro",
            Self::ColdFlu => "cold-flu",
            Self::Medication => "medication",
            Self::Appointment => "appointment",
            Self::Nutrition => "nutrition",
            Self::Exercise => "exercise",
            Self::Sleep => "sleep",
            Self::MentalHealth => "mental-health",
            Self::Uncategorized => "uncategorized",
        }
    }

    /// Whether this is the emergency category
    #[must_use]
    pub fn is_emergency(&self) -> bool {
        matches!(self, Self::Emergency)
    }

    /// How urgently a reply in this category should be presented
    #[must_use]
    pub fn urgency(&self) -> Urgency {
        if self.is_emergency() {
            Urgency::Immediate
        } else {
            Urgency::Normal
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Keyword sets in priority order (highest first)
///
/// Keywords are lowercase. [`Category::Uncategorized`] has no entry: it is
/// the result when nothing here matches.
pub const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Emergency,
        &[
            "emergency",
            "urgent",
            "chest pain",
            "heart attack",
            "stroke",
            "bleeding",
            "difficulty breathing",
        ],
    ),
    (Category::Headache, &["headache"]),
    (Category::Fever, &["fever"]),
    (Category::Cough, &["cough"]),
    (Category::Gastro, &["stomach", "nausea", "vomiting"]),
    (Category::ColdFlu, &["cold", "flu"]),
    (Category::Medication, &["medication", "medicine"]),
    (Category::Appointment, &["appointment", "schedule"]),
    (Category::Nutrition, &["diet", "nutrition"]),
    (Category::Exercise, &["exercise", "workout"]),
    (Category::Sleep, &["sleep"]),
    (Category::MentalHealth, &["stress", "anxiety", "depression"]),
];

/// Classify user text
#[must_use]
pub fn classify(text: &str) -> Category {
    matched_keyword(text).map_or(Category::Uncategorized, |(category, _)| category)
}

/// The winning category together with the keyword that selected it
///
/// Returns `None` when no keyword matches.
#[must_use]
pub fn matched_keyword(text: &str) -> Option<(Category, &'static str)> {
    let lower = text.to_lowercase();

    KEYWORD_TABLE.iter().find_map(|&(category, keywords)| {
        keywords
            .iter()
            .find(|keyword| lower.contains(*keyword))
            .map(|&keyword| (category, keyword))
    })
}
