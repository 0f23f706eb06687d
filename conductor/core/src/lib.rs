//! Careline Conductor - Headless Dialogue Engine for a Health Chat Assistant
//!
//! This crate provides the conversational core of the Careline assistant,
//! completely independent of any UI framework. A surface (web page, TUI,
//! test harness) feeds it user text and renders what comes back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                              │
//! │       ┌─────────┐      ┌─────────┐      ┌──────────────┐        │
//! │       │   Web   │      │   TUI   │      │   Headless   │        │
//! │       └────┬────┘      └────┬────┘      └──────┬───────┘        │
//! │            └────────────────┴──────────────────┘                │
//! │                           │                                     │
//! │                    SurfaceEvent (up)                            │
//! │                  ConductorMessage (down)                        │
//! └───────────────────────────┼─────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼─────────────────────────────────────┐
//! │                    CONDUCTOR CORE                               │
//! │  ┌────────────────────────┴───────────────────────────────────┐ │
//! │  │                      Conductor                             │ │
//! │  │  ┌──────────┐  ┌────────────┐  ┌───────────┐  ┌─────────┐  │ │
//! │  │  │ Session  │  │ Classifier │  │ Responses │  │ Timing  │  │ │
//! │  │  └──────────┘  └────────────┘  └───────────┘  └─────────┘  │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Conductor`]: Runs turns: accepts user text, schedules the reply
//! - [`Session`]: Ordered message log plus the composing flag
//! - [`Category`]: Topic assigned to user text by [`classify`]
//! - [`ResponseSelector`]: Picks reply text for a category
//! - [`ConductorMessage`]: Messages sent from Conductor to UI surfaces
//! - [`SurfaceEvent`]: Events sent from UI surfaces to Conductor
//!
//! # Quick Start
//!
//! ```ignore
//! use careline_conductor::{Conductor, ConductorConfig, SurfaceEvent};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::channel(100);
//!     let mut conductor = Conductor::new(ConductorConfig::from_env(), tx);
//!
//!     conductor.handle_event(SurfaceEvent::Connected).await;
//!     conductor.submit("I have a headache").await;
//!
//!     while let Some(msg) = rx.recv().await {
//!         // Render message to UI
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`triage`]: Keyword classifier and response selection
//! - [`session`]: Conversation session
//! - [`conductor`]: Turn coordinator
//! - [`timing`]: Thinking delay strategies
//! - [`messages`]: Messages from Conductor to UI surfaces
//! - [`events`]: Events from UI surfaces to Conductor
//! - [`profile`]: Assistant copy shown around the conversation
//! - [`config`]: TOML and environment configuration
//! - [`accessibility`]: Screen reader and urgency hints
//!
//! # Not Medical Advice
//!
//! Replies are canned general-information texts chosen by keyword. Nothing
//! here diagnoses anything.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod accessibility;
pub mod conductor;
pub mod config;
pub mod events;
pub mod messages;
pub mod profile;
pub mod session;
pub mod timing;
pub mod triage;

// Re-exports for convenience
pub use accessibility::{Accessible, Urgency};
pub use conductor::{Conductor, ConductorConfig, SubmitOutcome};
pub use config::{load_config, ConductorConfigFile, ConfigError, ConfigSource};
pub use events::SurfaceEvent;
pub use messages::{
    ConductorMessage, Message, MessageId, Sender, SessionId, SessionSnapshot, TurnState,
};
pub use profile::AssistantProfile;
pub use session::{Session, SessionState};
pub use timing::{FixedDelay, JitteredDelay, ThinkingDelay};
pub use triage::{
    classify, Category, FixedPolicy, ResponseSelector, RoundRobinPolicy, SelectionPolicy,
    UniformPolicy,
};
