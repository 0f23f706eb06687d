//! Surface Events
//!
//! Events sent from a rendering surface to the Conductor.
//!
//! # Design Philosophy
//!
//! Surfaces don't interpret what the user typed; they report what happened
//! and the Conductor decides how to respond.

use serde::{Deserialize, Serialize};

/// Events from UI Surface to Conductor
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// Surface connected and wants the session info and current state
    Connected,

    /// The input field changed
    DraftChanged {
        /// Current input field contents
        text: String,
    },

    /// User pressed send (Enter without Shift, or the send button)
    SubmitDraft,

    /// User submitted a message directly, bypassing the draft buffer
    UserMessage {
        /// The message content
        content: String,
    },

    /// Surface disconnecting; the session ends with it
    Disconnected {
        /// Reason for disconnect (optional)
        reason: Option<String>,
    },

    /// User requested quit
    QuitRequested,
}

impl SurfaceEvent {
    /// Short name for logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::DraftChanged { .. } => "draft_changed",
            Self::SubmitDraft => "submit_draft",
            Self::UserMessage { .. } => "user_message",
            Self::Disconnected { .. } => "disconnected",
            Self::QuitRequested => "quit_requested",
        }
    }
}
