//! Knowledge base of authored topics and the generic fallback pool.
//!
//! The base is validated once at construction and is immutable afterwards.

mod portfolio;

pub use portfolio::PORTFOLIO_OWNER;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("topic id must not be blank")]
    BlankId,
    #[error("duplicate topic id: {0}")]
    DuplicateId(String),
    #[error("topic '{0}' has no patterns")]
    NoPatterns(String),
    #[error("topic '{0}' has a blank pattern")]
    BlankPattern(String),
    #[error("topic '{0}' has no responses")]
    NoResponses(String),
    #[error("fallback pool is empty")]
    NoFallbacks,
    #[error("failed to read knowledge file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse knowledge file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A unit of canned knowledge: trigger patterns plus candidate replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub patterns: Vec<String>,
    pub responses: Vec<String>,
}

impl Topic {
    pub fn new<P, R>(id: impl Into<String>, patterns: P, responses: R) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            id: id.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

/// On-disk shape of an authored knowledge file.
#[derive(Debug, Deserialize)]
struct KnowledgeFile {
    topics: Vec<Topic>,
    fallbacks: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    topics: Vec<Topic>,
    fallbacks: Vec<String>,
}

impl KnowledgeBase {
    /// Build a knowledge base, lower-casing patterns and rejecting topics that
    /// could never produce a reply.
    pub fn new(topics: Vec<Topic>, fallbacks: Vec<String>) -> Result<Self, KnowledgeError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(topics.len());

        for mut topic in topics {
            if topic.id.trim().is_empty() {
                return Err(KnowledgeError::BlankId);
            }
            if !seen.insert(topic.id.clone()) {
                return Err(KnowledgeError::DuplicateId(topic.id));
            }
            if topic.patterns.is_empty() {
                return Err(KnowledgeError::NoPatterns(topic.id));
            }
            if topic.patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(KnowledgeError::BlankPattern(topic.id));
            }
            if topic.responses.is_empty() {
                return Err(KnowledgeError::NoResponses(topic.id));
            }
            topic.patterns = topic.patterns.iter().map(|p| p.to_lowercase()).collect();
            normalized.push(topic);
        }

        if fallbacks.is_empty() {
            return Err(KnowledgeError::NoFallbacks);
        }

        Ok(Self {
            topics: normalized,
            fallbacks,
        })
    }

    /// The built-in portfolio dataset.
    pub fn portfolio() -> Self {
        Self::new(portfolio::topics(), portfolio::fallbacks())
            .expect("built-in dataset is valid")
    }

    pub fn from_json(json: &str) -> Result<Self, KnowledgeError> {
        let file: KnowledgeFile = serde_json::from_str(json)?;
        Self::new(file.topics, file.fallbacks)
    }

    pub fn from_file(path: &Path) -> Result<Self, KnowledgeError> {
        let content = std::fs::read_to_string(path)?;
        let kb = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            topics = kb.topics.len(),
            fallbacks = kb.fallbacks.len(),
            "Loaded knowledge file"
        );
        Ok(kb)
    }

    /// Topics in authored order. Ties in scoring are broken by this order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn responses(&self, id: &str) -> Option<&[String]> {
        self.topic(id).map(|t| t.responses.as_slice())
    }

    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
