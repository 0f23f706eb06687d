//! Session Management
//!
//! A session is the live conversation: an append-only log of messages plus
//! the "assistant is composing" flag.
//!
//! # Design Philosophy
//!
//! Sessions are memory-resident and die with the Conductor that owns them.
//! Only the Conductor mutates a session, so every mutator here is
//! crate-private; surfaces get read accessors and snapshots.
//!
//! A turn is bracketed by [`Session::begin_turn`] and
//! [`Session::finish_turn`]. The turn number handed out by `begin_turn` must
//! be presented again to finish it, which lets a late reply from a superseded
//! or cancelled turn be dropped instead of applied.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::messages::{Message, MessageId, Sender, SessionId, SessionSnapshot};
use crate::triage::Category;

/// Session state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Session is live
    Active,
    /// Session has ended; no further mutation is applied
    Ended,
}

/// Session metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// When the session was created (Unix timestamp ms)
    pub created_at: u64,
    /// When the session was last active (Unix timestamp ms)
    pub last_active_at: u64,
    /// Total messages appended, greeting included
    pub message_count: u32,
}

impl SessionMetadata {
    fn new() -> Self {
        let now = now_ms();
        Self {
            created_at: now,
            last_active_at: now,
            message_count: 0,
        }
    }

    fn touch(&mut self) {
        self.last_active_at = now_ms();
    }

    fn add_message(&mut self) {
        self.message_count += 1;
        self.touch();
    }
}

/// Handle for an in-flight turn
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TurnTicket {
    /// Turn number within this session
    pub turn: u64,
    /// The user message that opened the turn
    pub user_message_id: MessageId,
    /// Trimmed user text, as stored
    pub user_text: String,
}

/// Why [`Session::begin_turn`] refused to open a turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TurnRejected {
    /// The session has ended
    Ended,
    /// The text was blank after trimming
    Empty,
    /// A reply is already pending
    Busy,
}

/// A conversation session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique session ID
    pub id: SessionId,
    /// Session state
    state: SessionState,
    /// Session metadata
    metadata: SessionMetadata,
    /// Conversation history, in creation order
    messages: Vec<Message>,
    /// Whether a bot reply is pending
    composing: bool,
    /// Category that produced each bot reply
    reply_categories: HashMap<MessageId, Category>,
    /// Turn number of the pending reply, if any
    #[serde(skip)]
    pending_turn: Option<u64>,
    /// Turns opened so far
    #[serde(skip)]
    turns_started: u64,
}

impl Session {
    /// Create a new session seeded with the assistant's greeting
    pub fn new(greeting: impl Into<String>) -> Self {
        let mut session = Self {
            id: SessionId::new(),
            state: SessionState::Active,
            metadata: SessionMetadata::new(),
            messages: Vec::new(),
            composing: false,
            reply_categories: HashMap::new(),
            pending_turn: None,
            turns_started: 0,
        };
        session.push(Message::new(Sender::Bot, greeting));
        session
    }

    /// Open a turn: append the user message and raise the composing flag
    ///
    /// Nothing changes if the session has ended, `text` is blank once
    /// trimmed, or a reply is already pending; the error says which.
    pub(crate) fn begin_turn(&mut self, text: &str) -> Result<TurnTicket, TurnRejected> {
        if !self.is_live() {
            return Err(TurnRejected::Ended);
        }
        let user_text = normalize_input(text).ok_or(TurnRejected::Empty)?.to_string();
        if self.composing {
            return Err(TurnRejected::Busy);
        }

        self.turns_started += 1;
        let turn = self.turns_started;
        let user_message_id = self.add_user_message(user_text.clone());
        self.pending_turn = Some(turn);
        self.composing = true;

        Ok(TurnTicket {
            turn,
            user_message_id,
            user_text,
        })
    }

    /// Close a turn by appending the bot reply and clearing the composing flag
    ///
    /// The reply is dropped if the session ended or `turn` is no longer the
    /// pending turn.
    pub(crate) fn finish_turn(
        &mut self,
        turn: u64,
        reply: String,
        category: Category,
    ) -> Option<&Message> {
        if !self.is_live() || self.pending_turn != Some(turn) {
            tracing::debug!(turn, "Dropping reply for a turn that is no longer pending");
            return None;
        }
        self.pending_turn = None;
        self.composing = false;
        let id = self.add_bot_message(reply);
        self.reply_categories.insert(id, category);
        self.messages.last()
    }

    fn add_user_message(&mut self, text: String) -> MessageId {
        let msg = Message::new(Sender::User, text);
        let id = msg.id();
        self.push(msg);
        id
    }

    fn add_bot_message(&mut self, text: String) -> MessageId {
        let msg = Message::new(Sender::Bot, text);
        let id = msg.id();
        self.push(msg);
        id
    }

    fn push(&mut self, msg: Message) {
        self.messages.push(msg);
        self.metadata.add_message();
    }

    /// End the session, abandoning any pending reply
    pub(crate) fn end(&mut self) {
        self.pending_turn = None;
        self.composing = false;
        self.state = SessionState::Ended;
    }

    /// Current session state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session can still be mutated
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Whether a bot reply is pending
    #[must_use]
    pub fn is_composing(&self) -> bool {
        self.composing
    }

    /// Session metadata
    #[must_use]
    pub fn metadata(&self) -> &SessionMetadata {
        &self.metadata
    }

    /// All messages, in conversation order
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get message by ID
    #[must_use]
    pub fn get_message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id() == id)
    }

    /// Category that produced a bot reply
    ///
    /// `None` for user messages and the greeting.
    #[must_use]
    pub fn category_of(&self, id: MessageId) -> Option<Category> {
        self.reply_categories.get(&id).copied()
    }

    /// Most recent message
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Get current message count
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Copy the renderable state
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            messages: self.messages.clone(),
            composing: self.composing,
        }
    }
}

/// Trim submitted text, rejecting blank input
///
/// This is the only input check the dialogue engine applies.
#[must_use]
pub fn normalize_input(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Get current timestamp in milliseconds
fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .try_into()
        .unwrap_or(u64::MAX)
}
