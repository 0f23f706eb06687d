//! Accessibility Support
//!
//! Presentation hints for [`ConductorMessage`]s, so screen readers and other
//! assistive technology can announce the conversation meaningfully, and so
//! visual surfaces know when to escalate (emergency replies).
//!
//! # Example
//!
//! ```ignore
//! use careline_conductor::accessibility::{Accessible, Urgency};
//!
//! if msg.urgency() == Urgency::Immediate {
//!     // Render as an alert banner and interrupt any speech in progress
//! }
//! if let Some(announcement) = msg.screen_reader_announcement() {
//!     speak(announcement);
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::messages::{ConductorMessage, Sender, TurnState};

/// Accessibility trait for `ConductorMessage` types
pub trait Accessible {
    /// Text announcement suitable for screen readers
    ///
    /// Returns None if no announcement is needed.
    fn screen_reader_announcement(&self) -> Option<String>;

    /// ARIA role for the rendered element
    ///
    /// See: <https://www.w3.org/TR/wai-aria-1.2/#role_definitions>
    fn aria_role(&self) -> Option<&'static str>;

    /// Urgency level for interrupt behavior
    fn urgency(&self) -> Urgency;
}

/// Urgency levels for presentation and announcements
///
/// Maps to ARIA live region politeness levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    /// Interrupts current speech; render with visual urgency
    Immediate,
    /// Queued after current speech
    Normal,
    /// Announced when convenient
    Low,
    /// No announcement needed
    None,
}

impl Urgency {
    /// ARIA live region value
    #[must_use]
    pub fn aria_live(&self) -> &'static str {
        match self {
            Urgency::Immediate => "assertive",
            Urgency::Normal | Urgency::Low => "polite",
            Urgency::None => "off",
        }
    }
}

impl Accessible for ConductorMessage {
    fn screen_reader_announcement(&self) -> Option<String> {
        match self {
            ConductorMessage::Message { message, .. } => {
                let prefix = match message.sender() {
                    Sender::User => "You said",
                    Sender::Bot => "Assistant says",
                };
                Some(format!("{prefix}: {}", message.text()))
            }

            ConductorMessage::Composing { composing: true } => {
                Some("Assistant is typing".to_string())
            }

            ConductorMessage::State { state } => {
                Some(state.accessibility_description().to_string())
            }

            ConductorMessage::Quit { message } => {
                let msg = message.as_ref().map_or_else(
                    || "Session ended".to_string(),
                    |m| format!("Goodbye: {m}"),
                );
                Some(msg)
            }

            ConductorMessage::Composing { composing: false }
            | ConductorMessage::SessionInfo { .. } => None,
        }
    }

    fn aria_role(&self) -> Option<&'static str> {
        match self {
            ConductorMessage::Message { urgency, .. } if *urgency == Urgency::Immediate => {
                Some("alert")
            }
            ConductorMessage::Message { .. } => Some("article"),
            ConductorMessage::Composing { .. } | ConductorMessage::State { .. } => Some("status"),
            _ => None,
        }
    }

    fn urgency(&self) -> Urgency {
        match self {
            ConductorMessage::Message { urgency, .. } => *urgency,
            ConductorMessage::Composing { .. } | ConductorMessage::State { .. } => Urgency::Low,
            ConductorMessage::Quit { .. } => Urgency::Normal,
            ConductorMessage::SessionInfo { .. } => Urgency::None,
        }
    }
}

impl TurnState {
    /// Human-readable description for screen readers
    #[must_use]
    pub fn accessibility_description(&self) -> &'static str {
        match self {
            TurnState::Idle => "Assistant is ready for your question",
            TurnState::AwaitingReply => "Assistant is thinking about your question",
            TurnState::Ended => "The conversation has ended",
        }
    }
}
