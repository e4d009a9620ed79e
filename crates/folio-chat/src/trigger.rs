//! Publish/subscribe channel that lets other page elements ask the chat
//! session a question on the user's behalf.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::knowledge::PORTFOLIO_OWNER;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TriggerError {
    #[error("chat session is no longer listening")]
    Closed,
    #[error("trigger queue is full")]
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTrigger {
    pub message: String,
}

impl ChatTrigger {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Raised by a click on a tech-stack item.
    pub fn skill(label: &str) -> Self {
        Self::new(format!(
            "Tell me about {}'s experience with {}?",
            PORTFOLIO_OWNER, label
        ))
    }

    /// Raised by "Ask AI to analyze this role" on a timeline entry.
    pub fn role(company: &str) -> Self {
        Self::new(format!("What did {} achieve at {}?", PORTFOLIO_OWNER, company))
    }
}

#[derive(Debug, Clone)]
pub struct TriggerSender {
    tx: mpsc::Sender<ChatTrigger>,
}

impl TriggerSender {
    pub async fn ask(&self, trigger: ChatTrigger) -> Result<(), TriggerError> {
        self.tx.send(trigger).await.map_err(|_| TriggerError::Closed)
    }

    /// Non-blocking variant for synchronous callers such as UI click handlers.
    pub fn try_ask(&self, trigger: ChatTrigger) -> Result<(), TriggerError> {
        self.tx.try_send(trigger).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => TriggerError::Full,
            mpsc::error::TrySendError::Closed(_) => TriggerError::Closed,
        })
    }
}

#[derive(Debug)]
pub struct TriggerReceiver {
    rx: mpsc::Receiver<ChatTrigger>,
}

impl TriggerReceiver {
    pub async fn recv(&mut self) -> Option<ChatTrigger> {
        self.rx.recv().await
    }
}

pub fn channel(capacity: usize) -> (TriggerSender, TriggerReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (TriggerSender { tx }, TriggerReceiver { rx })
}
