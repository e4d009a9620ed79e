//! Client for the chat completion proxy.
//!
//! The proxy accepts `{ "message": string }` and answers `{ "reply": string }`
//! on success or `{ "error": string }` with a non-2xx status on failure.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::Responder;
use crate::config::RemoteConfig;
use crate::engine::Reply;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to completion proxy failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion proxy returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("completion proxy reported an error: {0}")]
    Service(String),
    #[error("malformed completion proxy response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
pub struct ProxyRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProxyResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub struct RemoteResponder {
    endpoint: String,
    client: Client,
}

impl RemoteResponder {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        tracing::info!(endpoint = %config.endpoint, "Creating RemoteResponder");

        Ok(Self {
            endpoint: config.endpoint.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One round trip to the proxy. Every failure mode maps to a `RemoteError`.
    pub async fn complete(&self, message: &str) -> Result<String, RemoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ProxyRequest { message })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed = parse_body(&body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|p| p.error)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = parsed?;
        if let Some(error) = parsed.error {
            return Err(RemoteError::Service(error));
        }
        match parsed.reply {
            Some(reply) if !reply.trim().is_empty() => Ok(reply),
            _ => Err(RemoteError::Malformed("missing reply".into())),
        }
    }
}

fn parse_body(body: &str) -> Result<ProxyResponse, RemoteError> {
    // Gateways sometimes answer with an HTML error page.
    let trimmed = body.trim_start();
    if trimmed.starts_with('<') {
        let preview: String = trimmed.chars().take(120).collect();
        return Err(RemoteError::Malformed(format!("HTML instead of JSON: {}", preview)));
    }
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(120).collect();
        RemoteError::Malformed(format!("{}: {}", e, preview))
    })
}

#[async_trait]
impl Responder for RemoteResponder {
    async fn reply(&self, text: &str) -> Result<Reply> {
        match self.complete(text).await {
            Ok(reply) => Ok(Reply::remote(reply)),
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "Remote completion failed");
                Err(e.into())
            }
        }
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
