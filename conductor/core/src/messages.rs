//! Conductor Messages
//!
//! The conversation data model and the messages the Conductor sends to an
//! attached rendering surface.
//!
//! # Design Philosophy
//!
//! The Conductor owns the conversation. Surfaces are pure renderers: they
//! receive [`ConductorMessage`]s (or read a [`SessionSnapshot`]) and paint
//! whatever they are told. A [`Message`] never changes after it is created,
//! so a surface can cache rendered bubbles by [`MessageId`].

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::accessibility::Urgency;
use crate::profile::AssistantProfile;
use crate::triage::Category;

/// Messages from Conductor to UI Surface
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ConductorMessage {
    /// A message was appended to the conversation
    Message {
        /// The appended message
        message: Message,
        /// Category of the reply (bot messages only)
        category: Option<Category>,
        /// How urgently the surface should present it
        urgency: Urgency,
    },

    /// The "assistant is composing" indicator changed
    Composing {
        /// Whether a reply is pending
        composing: bool,
    },

    /// Turn state change
    State {
        /// The new state
        state: TurnState,
    },

    /// Session information, sent when a surface connects
    SessionInfo {
        /// Session ID
        session_id: SessionId,
        /// Header, disclaimer and input copy for the surface
        profile: AssistantProfile,
    },

    /// Request surface to quit
    Quit {
        /// Optional goodbye message
        message: Option<String>,
    },
}

/// Message identifier
///
/// Drawn from a process-wide counter, so ordering two ids orders the
/// messages by creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Generate a new unique message ID
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg_{}", self.0)
    }
}

/// Session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new unique session ID
    pub fn new() -> Self {
        Self(format!("session_{}", uuid::Uuid::new_v4().simple()))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who sent a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    /// The person asking a question
    User,
    /// The assistant
    Bot,
}

/// One turn in the conversation
///
/// Immutable once created: fields are only readable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current time
    ///
    /// Callers are responsible for passing already-trimmed, non-empty text.
    pub(crate) fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Unique message ID
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Display text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Who sent this message
    #[must_use]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// When the message was created
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether the assistant authored this message
    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }

    /// Local wall-clock time as `HH:MM`, as shown under each bubble
    #[must_use]
    pub fn display_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

/// Read-only copy of a session for rendering
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session ID
    pub session_id: SessionId,
    /// Messages in conversation order
    pub messages: Vec<Message>,
    /// Whether a reply is pending
    pub composing: bool,
}

/// Turn-taking states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for the user to submit
    Idle,
    /// A reply is scheduled; new submissions are ignored
    AwaitingReply,
    /// The session is over
    Ended,
}

impl TurnState {
    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::AwaitingReply => "Thinking...",
            Self::Ended => "Session ended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id_unique_and_ordered() {
        let id1 = MessageId::new();
        let id2 = MessageId::new();
        assert_ne!(id1, id2);
        assert!(id1 < id2);
        assert!(id1.to_string().starts_with("msg_"));
    }

    #[test]
    fn test_session_id_unique() {
        let id1 = SessionId::new();
        let id2 = SessionId::new();
        assert_ne!(id1, id2);
        assert!(id1.0.starts_with("session_"));
    }

    #[test]
    fn test_message_fields() {
        let msg = Message::new(Sender::User, "I have a cough");
        assert_eq!(msg.text(), "I have a cough");
        assert_eq!(msg.sender(), Sender::User);
        assert!(!msg.is_bot());
    }

    #[test]
    fn test_display_time_format() {
        let msg = Message::new(Sender::Bot, "Hello");
        let time = msg.display_time();
        assert_eq!(time.len(), 5);
        assert_eq!(time.as_bytes()[2], b':');
    }

    #[test]
    fn test_turn_state_description() {
        assert_eq!(TurnState::Idle.description(), "Ready");
        assert_eq!(TurnState::AwaitingReply.description(), "Thinking...");
    }
}
