//! Producers of one bot reply per turn: the local rule engine or the remote
//! completion proxy.

pub mod remote;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ChatConfig, ResponderMode};
use crate::engine::{Reply, ResponseEngine, SessionContext};
use crate::knowledge::KnowledgeBase;

pub use remote::{RemoteError, RemoteResponder};

#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, text: &str) -> Result<Reply>;

    fn name(&self) -> &'static str;
}

/// Build the responder selected by `config.responder`.
pub fn from_config(
    config: &ChatConfig,
    knowledge: Arc<KnowledgeBase>,
) -> Result<Arc<dyn Responder>> {
    let responder: Arc<dyn Responder> = match config.responder {
        ResponderMode::Local => Arc::new(LocalResponder::new(
            ResponseEngine::new(knowledge, config.scoring.clone(), &config.continuation),
            config.turn.thinking_delay(),
        )),
        ResponderMode::Remote => Arc::new(RemoteResponder::new(&config.remote)?),
    };
    tracing::info!(responder = responder.name(), "Responder ready");
    Ok(responder)
}

/// Rule engine plus the per-session context it reads and updates.
pub struct LocalResponder {
    engine: ResponseEngine,
    context: Mutex<SessionContext>,
    thinking_delay: Duration,
}

impl LocalResponder {
    pub fn new(engine: ResponseEngine, thinking_delay: Duration) -> Self {
        Self {
            engine,
            context: Mutex::new(SessionContext::new()),
            thinking_delay,
        }
    }

    pub fn last_topic_id(&self) -> Option<String> {
        self.context.lock().last_topic_id().map(str::to_owned)
    }
}

#[async_trait]
impl Responder for LocalResponder {
    async fn reply(&self, text: &str) -> Result<Reply> {
        // Lock is released before the simulated delay.
        let reply = {
            let mut context = self.context.lock();
            self.engine.respond(text, &mut context)
        };
        if !self.thinking_delay.is_zero() {
            tokio::time::sleep(self.thinking_delay).await;
        }
        Ok(reply)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
