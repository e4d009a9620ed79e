use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub scoring: ScoringConfig,
    pub continuation: ContinuationConfig,
    pub turn: TurnConfig,
    pub responder: ResponderMode,
    pub remote: RemoteConfig,
    /// Authored knowledge file loaded at startup instead of the built-in dataset.
    pub knowledge_path: Option<PathBuf>,
}

/// Weights used by the topic scorer. The defaults are empirically chosen and tunable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Credit for a full pattern found in the input.
    pub phrase_weight: u32,
    /// Credit for each long pattern word found in the input.
    pub word_weight: u32,
    /// Pattern words must be strictly longer than this (in chars) to earn word credit.
    pub min_word_len: usize,
    /// Minimum score for a topic to count as a match.
    pub min_confidence: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuationConfig {
    pub cues: Vec<String>,
    /// Prefix shown above a reply that continues the previous topic.
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    pub thinking_delay_ms: u64,
    pub reply_timeout_secs: u64,
    pub greeting: Option<String>,
    pub failure_message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponderMode {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl ChatConfig {
    /// Validate config values, returning errors for clearly broken configurations.
    pub fn validate(&self) -> Result<(), String> {
        if self.scoring.phrase_weight == 0 {
            return Err("scoring.phrase_weight must be > 0".into());
        }
        if self.scoring.min_confidence == 0 {
            return Err("scoring.min_confidence must be > 0".into());
        }
        if self.continuation.cues.iter().all(|c| c.trim().is_empty()) {
            return Err("continuation.cues must contain at least one non-blank cue".into());
        }
        if self.turn.reply_timeout_secs == 0 {
            return Err("turn.reply_timeout_secs must be > 0".into());
        }
        if self.turn.failure_message.trim().is_empty() {
            return Err("turn.failure_message must not be blank".into());
        }
        if self.responder == ResponderMode::Remote && self.remote.endpoint.trim().is_empty() {
            return Err("remote.endpoint is required when responder = \"remote\"".into());
        }
        Ok(())
    }

    /// Load config from a JSON file, falling back to defaults for missing fields.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// `~/.config/folio-chat/config.json` when present.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("folio-chat").join("config.json"))
            .filter(|path| path.exists())
    }
}

impl TurnConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            continuation: ContinuationConfig::default(),
            turn: TurnConfig::default(),
            responder: ResponderMode::Local,
            remote: RemoteConfig::default(),
            knowledge_path: None,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            phrase_weight: 3,
            word_weight: 1,
            min_word_len: 3,
            min_confidence: 2,
        }
    }
}

impl Default for ContinuationConfig {
    fn default() -> Self {
        Self {
            cues: vec!["more".into(), "detail".into(), "it".into()],
            note: "(continuing previous topic...)".into(),
        }
    }
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 800,
            reply_timeout_secs: 30,
            greeting: Some(
                "Hi! I'm Aditya's AI Assistant. 🤖 Ask me about his **projects**, **skills** or **education**!"
                    .into(),
            ),
            failure_message: "⚠️ I'm having trouble connecting my brain...".into(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/chat".into(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}
