//! Conductor - The Turn Coordinator
//!
//! The Conductor owns one [`Session`] and runs the turn-taking protocol:
//!
//! ```text
//!            submit(text)                       reply task wakes up
//!   Idle ───────────────────► AwaitingReply ───────────────────────► Idle
//!    │   append user message                  classify + select
//!    │   composing = true                     append bot message
//!    │   schedule reply task                  composing = false
//!    │
//!    └── end() ─► Ended (pending reply task aborted)
//! ```
//!
//! # Design Philosophy
//!
//! The Conductor is UI-agnostic. A surface either reads state through the
//! accessors ([`Conductor::messages`], [`Conductor::is_composing`]) or
//! attaches an `mpsc` channel and renders the [`ConductorMessage`]s it
//! receives.
//!
//! The reply is a Tokio task owned by the Conductor. It holds only a weak
//! reference to the session plus the turn number it answers, so it can never
//! apply a reply to an ended session or to a turn that is no longer pending.
//! The `composing` flag is the single-flight gate: while it is set, `submit`
//! is a no-op.
//!
//! Every [`ConductorMessage`] is queued while the session lock is held, in
//! the same critical section as the mutation it reports. A single forwarder
//! task drains the queue into the surface channel, so the surface sees events
//! in exactly the order the session changed, however slowly it reads.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::accessibility::Urgency;
use crate::config::{apply_env_config, ConductorConfigFile};
use crate::events::SurfaceEvent;
use crate::messages::{
    ConductorMessage, Message, MessageId, SessionId, SessionSnapshot, TurnState,
};
use crate::profile::{AssistantProfile, DEFAULT_GREETING};
use crate::session::{normalize_input, Session, TurnRejected, TurnTicket};
use crate::timing::{JitteredDelay, ThinkingDelay, DEFAULT_BASE_DELAY, DEFAULT_JITTER};
use crate::triage::{matched_keyword, Category, ResponseSelector};

/// Conductor configuration
#[derive(Clone, Debug)]
pub struct ConductorConfig {
    /// Assistant copy, including the greeting that seeds the session
    pub profile: AssistantProfile,
    /// Base delay before a reply
    pub base_delay: Duration,
    /// Maximum random extra delay
    pub delay_jitter: Duration,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            profile: AssistantProfile::default(),
            base_delay: DEFAULT_BASE_DELAY,
            delay_jitter: DEFAULT_JITTER,
        }
    }
}

impl ConductorConfig {
    /// Create configuration from environment variables
    ///
    /// Invalid combinations fall back to the defaults with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let mut file = ConductorConfigFile::default();
        apply_env_config(&mut file, |key| std::env::var(key).ok());
        match file.validate() {
            Ok(()) => Self::from(&file),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring environment configuration");
                Self::default()
            }
        }
    }

    /// Create configuration from a loaded config file
    #[must_use]
    pub fn from_file(file: &ConductorConfigFile) -> Self {
        Self::from(file)
    }
}

impl From<&ConductorConfigFile> for ConductorConfig {
    fn from(file: &ConductorConfigFile) -> Self {
        Self {
            profile: file.profile.clone(),
            base_delay: file.base_delay,
            delay_jitter: file.delay_jitter,
        }
    }
}

/// What happened to a submission
///
/// Informational only: rejected submissions are silently ignored, never
/// errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user message was appended and a reply is scheduled
    Accepted(MessageId),
    /// The text was blank after trimming
    Empty,
    /// A reply is already pending
    Busy,
    /// The session has ended
    Ended,
}

impl SubmitOutcome {
    /// Whether the submission started a turn
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// The Conductor - headless turn coordinator
pub struct Conductor {
    /// Configuration
    config: ConductorConfig,
    /// The live conversation
    session: Arc<Mutex<Session>>,
    /// Category → reply text
    selector: Arc<Mutex<ResponseSelector>>,
    /// Thinking delay strategy
    delay: Box<dyn ThinkingDelay>,
    /// Pending-input buffer
    draft: String,
    /// Scheduled reply, if any
    pending: Option<JoinHandle<()>>,
    /// Ordered queue to the attached surface
    outbox: Outbox,
}

impl Conductor {
    /// Create a Conductor that reports to a surface over `tx`
    ///
    /// Must be called from within a Tokio runtime: it spawns the task that
    /// forwards messages to `tx`.
    pub fn new(config: ConductorConfig, tx: mpsc::Sender<ConductorMessage>) -> Self {
        let mut conductor = Self::headless(config);
        conductor.outbox = Outbox::attach(tx);
        conductor
    }

    /// Create a Conductor with no attached surface
    ///
    /// State is observed through the accessors only. A blank greeting is
    /// replaced by [`DEFAULT_GREETING`].
    pub fn headless(mut config: ConductorConfig) -> Self {
        if normalize_input(&config.profile.greeting).is_none() {
            tracing::warn!("Blank greeting configured, using the default");
            config.profile.greeting = DEFAULT_GREETING.to_string();
        }

        let session = Session::new(config.profile.greeting.clone());
        let delay = JitteredDelay::new(config.base_delay, config.delay_jitter);

        tracing::debug!(session = %session.id, "Created conductor");

        Self {
            config,
            session: Arc::new(Mutex::new(session)),
            selector: Arc::new(Mutex::new(ResponseSelector::new())),
            delay: Box::new(delay),
            draft: String::new(),
            pending: None,
            outbox: Outbox::detached(),
        }
    }

    /// Replace the response selector (e.g., with a seeded fallback policy)
    #[must_use]
    pub fn with_selector(mut self, selector: ResponseSelector) -> Self {
        self.selector = Arc::new(Mutex::new(selector));
        self
    }

    /// Replace the thinking delay strategy
    #[must_use]
    pub fn with_delay(mut self, delay: impl ThinkingDelay + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    /// Get the session ID
    pub fn session_id(&self) -> SessionId {
        self.session.lock().id.clone()
    }

    /// Assistant copy for the surface
    pub fn profile(&self) -> &AssistantProfile {
        &self.config.profile
    }

    /// Messages in conversation order
    pub fn messages(&self) -> Vec<Message> {
        self.session.lock().messages().to_vec()
    }

    /// Whether a bot reply is pending
    pub fn is_composing(&self) -> bool {
        self.session.lock().is_composing()
    }

    /// Category that produced a bot reply
    pub fn category_of(&self, id: MessageId) -> Option<Category> {
        self.session.lock().category_of(id)
    }

    /// Copy of the renderable state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().snapshot()
    }

    /// Current turn state
    pub fn state(&self) -> TurnState {
        turn_state(&self.session.lock())
    }

    /// Contents of the pending-input buffer
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the pending-input buffer
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether the send action should be enabled
    pub fn can_send(&self) -> bool {
        normalize_input(&self.draft).is_some() && self.state() == TurnState::Idle
    }

    /// Submit the pending-input buffer
    pub async fn submit_draft(&mut self) -> SubmitOutcome {
        let text = self.draft.clone();
        self.submit(&text).await
    }

    /// Submit a user message
    ///
    /// Appends the trimmed text as a user message, raises the composing flag
    /// and schedules the reply. Blank text, a pending reply, or an ended
    /// session make this a no-op.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        let ticket = {
            let mut session = self.session.lock();
            let ticket = match session.begin_turn(text) {
                Ok(ticket) => ticket,
                Err(TurnRejected::Ended) => return SubmitOutcome::Ended,
                Err(TurnRejected::Empty) => {
                    tracing::trace!("Ignoring blank submission");
                    return SubmitOutcome::Empty;
                }
                Err(TurnRejected::Busy) => {
                    tracing::debug!(
                        session = %session.id,
                        "Ignoring submission while a reply is pending"
                    );
                    return SubmitOutcome::Busy;
                }
            };

            if let Some(message) = session.get_message(ticket.user_message_id) {
                self.outbox.push(ConductorMessage::Message {
                    message: message.clone(),
                    category: None,
                    urgency: Urgency::Normal,
                });
            }
            self.outbox
                .push(ConductorMessage::Composing { composing: true });
            self.outbox.push(ConductorMessage::State {
                state: TurnState::AwaitingReply,
            });
            ticket
        };

        self.draft.clear();
        let outcome = SubmitOutcome::Accepted(ticket.user_message_id);

        let delay = self.delay.next_delay();
        tracing::debug!(
            turn = ticket.turn,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Scheduled reply"
        );

        let task = ReplyTask {
            session: Arc::downgrade(&self.session),
            selector: Arc::clone(&self.selector),
            outbox: self.outbox.clone(),
            ticket,
        };
        self.pending = Some(tokio::spawn(task.run(delay)));

        outcome
    }

    /// Wait until the pending reply (if any) has been applied or dropped and
    /// every queued message has been handed to the surface
    ///
    /// With an attached surface this only returns once the surface has made
    /// room in its channel for everything queued so far.
    pub async fn wait_idle(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "Reply task failed");
                }
            }
        }
        self.outbox.flush().await;
    }

    /// End the session
    ///
    /// Aborts any pending reply; afterwards every submission is ignored.
    pub async fn end(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        {
            let mut session = self.session.lock();
            if !session.is_live() {
                return;
            }
            session.end();
            self.outbox.push(ConductorMessage::State {
                state: TurnState::Ended,
            });
            self.outbox.push(ConductorMessage::Quit {
                message: Some("Take care!".to_string()),
            });
            tracing::info!(
                session = %session.id,
                messages = session.message_count(),
                "Session ended"
            );
        }
        self.draft.clear();
    }

    /// Handle an event from the UI surface
    pub async fn handle_event(&mut self, event: SurfaceEvent) {
        tracing::trace!(event = event.kind(), "Surface event");

        match event {
            SurfaceEvent::Connected => self.replay(),

            SurfaceEvent::DraftChanged { text } => self.set_draft(text),

            SurfaceEvent::SubmitDraft => {
                self.submit_draft().await;
            }

            SurfaceEvent::UserMessage { content } => {
                self.submit(&content).await;
            }

            SurfaceEvent::Disconnected { reason } => {
                if let Some(reason) = reason {
                    tracing::info!(reason = %reason, "Surface disconnected");
                }
                self.end().await;
            }

            SurfaceEvent::QuitRequested => self.end().await,
        }
    }

    /// Queue session info, the conversation so far, and the current state
    fn replay(&self) {
        let session = self.session.lock();

        self.outbox.push(ConductorMessage::SessionInfo {
            session_id: session.id.clone(),
            profile: self.config.profile.clone(),
        });

        for message in session.messages() {
            let category = session.category_of(message.id());
            self.outbox.push(ConductorMessage::Message {
                message: message.clone(),
                category,
                urgency: category.map_or(Urgency::Normal, |c| c.urgency()),
            });
        }

        self.outbox.push(ConductorMessage::Composing {
            composing: session.is_composing(),
        });
        self.outbox.push(ConductorMessage::State {
            state: turn_state(&session),
        });
    }
}

impl Drop for Conductor {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.session.lock().end();
    }
}

impl std::fmt::Debug for Conductor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conductor")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("draft", &self.draft)
            .field("attached", &self.outbox.is_attached())
            .finish_non_exhaustive()
    }
}

fn turn_state(session: &Session) -> TurnState {
    if !session.is_live() {
        TurnState::Ended
    } else if session.is_composing() {
        TurnState::AwaitingReply
    } else {
        TurnState::Idle
    }
}

/// The scheduled second half of a turn
struct ReplyTask {
    session: Weak<Mutex<Session>>,
    selector: Arc<Mutex<ResponseSelector>>,
    outbox: Outbox,
    ticket: TurnTicket,
}

impl ReplyTask {
    async fn run(self, delay: Duration) {
        tokio::time::sleep(delay).await;

        let Some(session) = self.session.upgrade() else {
            tracing::debug!(turn = self.ticket.turn, "Session gone before reply");
            return;
        };

        let (category, keyword) = match matched_keyword(&self.ticket.user_text) {
            Some((category, keyword)) => (category, Some(keyword)),
            None => (Category::Uncategorized, None),
        };
        let reply = self.selector.lock().select(category);

        {
            let mut session = session.lock();
            let Some(message) = session
                .finish_turn(self.ticket.turn, reply, category)
                .cloned()
            else {
                return;
            };
            self.outbox.push(ConductorMessage::Message {
                message,
                category: Some(category),
                urgency: category.urgency(),
            });
            self.outbox
                .push(ConductorMessage::Composing { composing: false });
            self.outbox.push(ConductorMessage::State {
                state: TurnState::Idle,
            });
        }

        if category.is_emergency() {
            tracing::warn!(
                turn = self.ticket.turn,
                keyword = keyword.unwrap_or_default(),
                "Emergency keyword detected"
            );
        } else {
            tracing::info!(
                turn = self.ticket.turn,
                category = %category,
                keyword = keyword.unwrap_or_default(),
                "Replied"
            );
        }
    }
}

/// Item on the surface queue
enum Outbound {
    Message(ConductorMessage),
    Flush(oneshot::Sender<()>),
}

/// Ordered, non-blocking queue in front of the surface channel
///
/// Pushing never waits, so it is safe under the session lock. A detached
/// outbox drops everything.
#[derive(Clone)]
struct Outbox {
    queue: Option<mpsc::UnboundedSender<Outbound>>,
}

impl Outbox {
    fn detached() -> Self {
        Self { queue: None }
    }

    fn attach(surface: mpsc::Sender<ConductorMessage>) -> Self {
        let (queue, rx) = mpsc::unbounded_channel();
        tokio::spawn(forward_to_surface(rx, surface));
        Self { queue: Some(queue) }
    }

    fn is_attached(&self) -> bool {
        self.queue.is_some()
    }

    fn push(&self, msg: ConductorMessage) {
        let Some(queue) = &self.queue else {
            return;
        };
        if queue.send(Outbound::Message(msg)).is_err() {
            tracing::warn!("Surface forwarder stopped, dropping message");
        }
    }

    /// Wait until everything pushed so far has been handed to the surface
    async fn flush(&self) {
        let Some(queue) = &self.queue else {
            return;
        };
        let (done, delivered) = oneshot::channel();
        if queue.send(Outbound::Flush(done)).is_ok() {
            let _ = delivered.await;
        }
    }
}

async fn forward_to_surface(
    mut rx: mpsc::UnboundedReceiver<Outbound>,
    surface: mpsc::Sender<ConductorMessage>,
) {
    while let Some(item) = rx.recv().await {
        match item {
            Outbound::Message(msg) => {
                if let Err(e) = surface.send(msg).await {
                    tracing::warn!("Failed to send message to surface: {}", e);
                }
            }
            Outbound::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
