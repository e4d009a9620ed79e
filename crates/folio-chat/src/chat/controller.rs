//! Orchestrates one request/response turn for a chat session.

use anyhow::Result;
use parking_lot::RwLock;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use super::{EventEmitter, Message, Transcript, EVENT_COMPOSING, EVENT_MESSAGE};
use crate::config::{ChatConfig, TurnConfig};
use crate::engine::Reply;
use crate::knowledge::KnowledgeBase;
use crate::responder::{self, Responder};
use crate::trigger::TriggerReceiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Blank after trimming.
    Empty,
    /// A previous turn is still composing.
    Busy,
    Closed,
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Replied(Message),
    Ignored(IgnoreReason),
    /// The session closed while the reply was pending.
    Discarded,
}

pub struct TurnController {
    responder: Arc<dyn Responder>,
    transcript: RwLock<Transcript>,
    composing: AtomicBool,
    open: AtomicBool,
    idle: Notify,
    closed: Notify,
    emitter: Arc<dyn EventEmitter>,
    turn: TurnConfig,
    continuation_note: String,
}

impl TurnController {
    pub fn new(
        responder: Arc<dyn Responder>,
        turn: TurnConfig,
        continuation_note: impl Into<String>,
        emitter: Arc<dyn EventEmitter>,
    ) -> Self {
        let controller = Self {
            responder,
            transcript: RwLock::new(Transcript::new()),
            composing: AtomicBool::new(false),
            open: AtomicBool::new(true),
            idle: Notify::new(),
            closed: Notify::new(),
            emitter,
            turn,
            continuation_note: continuation_note.into(),
        };
        if let Some(greeting) = controller.turn.greeting.clone() {
            controller.append(Message::bot(greeting));
        }
        controller
    }

    pub fn from_config(
        config: &ChatConfig,
        knowledge: Arc<KnowledgeBase>,
        emitter: Arc<dyn EventEmitter>,
    ) -> Result<Self> {
        let responder = responder::from_config(config, knowledge)?;
        Ok(Self::new(
            responder,
            config.turn.clone(),
            config.continuation.note.clone(),
            emitter,
        ))
    }

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Transcript {
        self.transcript.read().clone()
    }

    pub fn is_composing(&self) -> bool {
        self.composing.load(Ordering::Acquire)
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Close the session. Pending replies are discarded and listeners stop.
    pub fn close(&self) {
        // Flipped under the transcript lock so no append can straddle it.
        let was_open = {
            let transcript = self.transcript.write();
            let was_open = self.open.swap(false, Ordering::AcqRel);
            if was_open {
                tracing::debug!(messages = transcript.len(), "Chat session closed");
            }
            was_open
        };
        if was_open {
            self.closed.notify_waiters();
        }
    }

    /// Run one turn. The text may come from the keyboard, a voice command or
    /// a trigger raised elsewhere on the page.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::Empty);
        }
        let closed = self.closed.notified();
        if !self.is_open() {
            return SubmitOutcome::Ignored(IgnoreReason::Closed);
        }
        let Some(_composing) = ComposingGuard::acquire(self) else {
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        };

        self.append(Message::user(text));
        tracing::debug!(responder = self.responder.name(), chars = text.len(), "Turn started");

        let timeout = self.turn.reply_timeout();
        let result = tokio::select! {
            _ = closed => {
                tracing::debug!("Session closed while composing, abandoning turn");
                return SubmitOutcome::Discarded;
            }
            result = tokio::time::timeout(timeout, self.responder.reply(text)) => result,
        };
        let reply_text = match result {
            Ok(Ok(reply)) => self.format_reply(&reply),
            Ok(Err(e)) => {
                tracing::warn!(responder = self.responder.name(), error = %e, "Reply failed");
                self.turn.failure_message.clone()
            }
            Err(_) => {
                tracing::warn!(
                    responder = self.responder.name(),
                    timeout_secs = timeout.as_secs(),
                    "Reply timed out"
                );
                self.turn.failure_message.clone()
            }
        };

        match self.append_if_open(Message::bot(reply_text)) {
            Some(message) => SubmitOutcome::Replied(message),
            None => {
                tracing::debug!("Session closed while composing, discarding reply");
                SubmitOutcome::Discarded
            }
        }
    }

    /// Answer triggers in the order they were sent. Returns when the session
    /// closes or every sender has been dropped.
    pub async fn listen(&self, mut receiver: TriggerReceiver) {
        loop {
            let closed = self.closed.notified();
            if !self.is_open() {
                return;
            }
            let trigger = tokio::select! {
                _ = closed => return,
                trigger = receiver.recv() => match trigger {
                    Some(trigger) => trigger,
                    None => return,
                },
            };

            loop {
                self.wait_idle().await;
                match self.submit(&trigger.message).await {
                    SubmitOutcome::Ignored(IgnoreReason::Busy) => continue,
                    SubmitOutcome::Ignored(IgnoreReason::Closed) | SubmitOutcome::Discarded => {
                        return
                    }
                    SubmitOutcome::Ignored(IgnoreReason::Empty) => {
                        tracing::debug!("Ignoring empty trigger");
                        break;
                    }
                    SubmitOutcome::Replied(_) => break,
                }
            }
        }
    }

    async fn wait_idle(&self) {
        loop {
            let idle = self.idle.notified();
            if !self.is_composing() || !self.is_open() {
                return;
            }
            idle.await;
        }
    }

    fn format_reply(&self, reply: &Reply) -> String {
        if reply.is_continuation() && !self.continuation_note.is_empty() {
            format!("{}\n{}", self.continuation_note, reply.text)
        } else {
            reply.text.clone()
        }
    }

    fn append(&self, message: Message) -> Message {
        let message = self.transcript.write().push(message).clone();
        self.emit_message(&message);
        message
    }

    /// Append unless the session is closed, checked under the transcript lock.
    fn append_if_open(&self, message: Message) -> Option<Message> {
        let message = {
            let mut transcript = self.transcript.write();
            if !self.is_open() {
                return None;
            }
            transcript.push(message).clone()
        };
        self.emit_message(&message);
        Some(message)
    }

    fn emit_message(&self, message: &Message) {
        self.emitter
            .emit(EVENT_MESSAGE, serde_json::to_value(message).unwrap_or_default());
    }
}

/// Holds the composing flag for one turn and clears it on drop, including
/// when the turn future is cancelled mid-await.
struct ComposingGuard<'a> {
    controller: &'a TurnController,
}

impl<'a> ComposingGuard<'a> {
    fn acquire(controller: &'a TurnController) -> Option<Self> {
        controller
            .composing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        controller
            .emitter
            .emit(EVENT_COMPOSING, json!({ "composing": true }));
        Some(Self { controller })
    }
}

impl Drop for ComposingGuard<'_> {
    fn drop(&mut self) {
        self.controller.composing.store(false, Ordering::Release);
        self.controller
            .emitter
            .emit(EVENT_COMPOSING, json!({ "composing": false }));
        self.controller.idle.notify_waiters();
    }
}
