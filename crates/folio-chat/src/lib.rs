//! Rule-based chat assistant for a portfolio site.
//!
//! A [`ResponseEngine`] scores free text against an authored [`KnowledgeBase`]
//! and keeps the last matched topic so follow-ups resolve. A
//! [`TurnController`] runs one turn at a time against either the local engine
//! or a remote completion proxy and maintains the session transcript.

pub mod chat;
pub mod config;
pub mod engine;
pub mod knowledge;
pub mod responder;
pub mod trigger;

// Re-export primary types for convenience
pub use chat::{
    EventEmitter, Message, NoopEmitter, Sender, SubmitOutcome, Transcript, TurnController,
};
pub use config::ChatConfig;
pub use engine::{Reply, ReplyKind, ResponseEngine, SessionContext};
pub use knowledge::{KnowledgeBase, KnowledgeError, Topic};
pub use responder::{LocalResponder, RemoteResponder, Responder};
pub use trigger::{ChatTrigger, TriggerSender};

// Re-export common types
pub use anyhow::{Error, Result};
