//! Response Engine
//!
//! Scores free-text input against every topic in the knowledge base with
//! naive substring matching, remembers the last matched topic per session so
//! follow-ups like "tell me more" resolve, and falls back to a generic reply
//! when nothing matches confidently.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{ContinuationConfig, ScoringConfig};
use crate::knowledge::{KnowledgeBase, Topic};

// ============================================================================
// Core Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplyKind {
    /// A confident match on a topic.
    Topic { topic_id: String, score: u32 },
    /// A low-confidence follow-up answered from the remembered topic.
    Continuation { topic_id: String },
    Fallback,
    /// Produced by the remote completion proxy.
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub kind: ReplyKind,
}

impl Reply {
    pub fn remote(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyKind::Remote,
        }
    }

    pub fn is_continuation(&self) -> bool {
        matches!(self.kind, ReplyKind::Continuation { .. })
    }
}

/// Per-session conversation state. Holds a lookup key, not the topic itself.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    last_topic_id: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_topic_id(&self) -> Option<&str> {
        self.last_topic_id.as_deref()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TopicMatch<'a> {
    pub topic: &'a Topic,
    pub score: u32,
}

// ============================================================================
// Engine
// ============================================================================

pub struct ResponseEngine {
    knowledge: Arc<KnowledgeBase>,
    scoring: ScoringConfig,
    cues: Vec<String>,
}

impl ResponseEngine {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        scoring: ScoringConfig,
        continuation: &ContinuationConfig,
    ) -> Self {
        let cues = continuation
            .cues
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();

        Self {
            knowledge,
            scoring,
            cues,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Score one topic against already lower-cased input.
    ///
    /// A full pattern hit earns `phrase_weight`; independently, each pattern
    /// word longer than `min_word_len` found anywhere in the input earns
    /// `word_weight`.
    pub fn score_topic(&self, topic: &Topic, normalized: &str) -> u32 {
        let mut score: u32 = 0;
        for pattern in &topic.patterns {
            if normalized.contains(pattern.as_str()) {
                score = score.saturating_add(self.scoring.phrase_weight);
            }
            for word in pattern.split_whitespace() {
                if word.chars().count() > self.scoring.min_word_len && normalized.contains(word) {
                    score = score.saturating_add(self.scoring.word_weight);
                }
            }
        }
        score
    }

    /// Highest-scoring topic for the input. The first topic wins ties and a
    /// topic scoring zero is never returned.
    pub fn best_match(&self, input: &str) -> Option<TopicMatch<'_>> {
        self.best_match_normalized(&input.to_lowercase())
    }

    fn best_match_normalized(&self, normalized: &str) -> Option<TopicMatch<'_>> {
        let mut best: Option<TopicMatch<'_>> = None;
        for topic in self.knowledge.topics() {
            let score = self.score_topic(topic, normalized);
            if score > best.map_or(0, |m| m.score) {
                best = Some(TopicMatch { topic, score });
            }
        }
        best
    }

    fn has_continuation_cue(&self, normalized: &str) -> bool {
        self.cues.iter().any(|cue| normalized.contains(cue.as_str()))
    }

    /// Produce a reply for one turn, updating the session context.
    pub fn respond(&self, input: &str, context: &mut SessionContext) -> Reply {
        self.respond_with(input, context, &mut rand::rng())
    }

    pub fn respond_with<R: Rng + ?Sized>(
        &self,
        input: &str,
        context: &mut SessionContext,
        rng: &mut R,
    ) -> Reply {
        let normalized = input.to_lowercase();

        match self.best_match_normalized(&normalized) {
            Some(m) if m.score >= self.scoring.min_confidence => {
                tracing::debug!(topic = %m.topic.id, score = m.score, "Topic matched");
                context.last_topic_id = Some(m.topic.id.clone());
                Reply {
                    text: pick(&m.topic.responses, rng).to_string(),
                    kind: ReplyKind::Topic {
                        topic_id: m.topic.id.clone(),
                        score: m.score,
                    },
                }
            }
            best => {
                let score = best.map_or(0, |m| m.score);
                if let Some(topic) = self.continuation_topic(&normalized, context) {
                    tracing::debug!(topic = %topic.id, score, "Continuing previous topic");
                    return Reply {
                        text: pick(&topic.responses, rng).to_string(),
                        kind: ReplyKind::Continuation {
                            topic_id: topic.id.clone(),
                        },
                    };
                }
                tracing::debug!(score, "No confident topic, using fallback");
                self.fallback_with(rng)
            }
        }
    }

    /// The remembered topic, if the input reads like a follow-up to it.
    fn continuation_topic(&self, normalized: &str, context: &SessionContext) -> Option<&Topic> {
        let topic = context
            .last_topic_id()
            .and_then(|id| self.knowledge.topic(id))?;
        self.has_continuation_cue(normalized).then_some(topic)
    }

    pub fn fallback_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Reply {
        Reply {
            text: pick(self.knowledge.fallbacks(), rng).to_string(),
            kind: ReplyKind::Fallback,
        }
    }
}

fn pick<'a, R: Rng + ?Sized>(choices: &'a [String], rng: &mut R) -> &'a str {
    // Knowledge base validation guarantees non-empty pools.
    choices.choose(rng).map(String::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine_with(topics: Vec<Topic>, fallbacks: &[&str]) -> ResponseEngine {
        let kb = KnowledgeBase::new(topics, fallbacks.iter().map(|f| f.to_string()).collect())
            .unwrap();
        ResponseEngine::new(
            Arc::new(kb),
            ScoringConfig::default(),
            &ContinuationConfig::default(),
        )
    }

    fn skills_engine() -> ResponseEngine {
        engine_with(vec![Topic::new("skills", ["skill", "stack"], ["R1"])], &["F1"])
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_single_topic_scenario() {
        let engine = skills_engine();
        let mut ctx = SessionContext::new();

        let reply = engine.respond_with("what are your skills?", &mut ctx, &mut rng());
        assert_eq!(reply.text, "R1");
        // phrase "skill" (3) plus the long word "skill" (1)
        assert_eq!(
            reply.kind,
            ReplyKind::Topic {
                topic_id: "skills".into(),
                score: 4
            }
        );
        assert_eq!(ctx.last_topic_id(), Some("skills"));

        let mut fresh = SessionContext::new();
        let reply = engine.respond_with("hello", &mut fresh, &mut rng());
        assert_eq!(reply.text, "F1");
        assert_eq!(reply.kind, ReplyKind::Fallback);
        assert_eq!(fresh.last_topic_id(), None);
    }

    #[test]
    fn test_follow_up_uses_remembered_topic() {
        let engine = skills_engine();
        let mut ctx = SessionContext::new();

        engine.respond_with("what are your skills?", &mut ctx, &mut rng());
        let reply = engine.respond_with("tell me more", &mut ctx, &mut rng());

        assert_eq!(reply.text, "R1");
        assert!(reply.is_continuation());
        assert_eq!(ctx.last_topic_id(), Some("skills"));
    }

    #[test]
    fn test_follow_up_without_context_falls_back() {
        let engine = skills_engine();
        let mut ctx = SessionContext::new();
        let reply = engine.respond_with("tell me more", &mut ctx, &mut rng());
        assert_eq!(reply.kind, ReplyKind::Fallback);
    }

    #[test]
    fn test_follow_up_to_unknown_topic_falls_back() {
        let engine = skills_engine();
        let mut ctx = SessionContext {
            last_topic_id: Some("retired".into()),
        };
        let reply = engine.respond_with("tell me more", &mut ctx, &mut rng());
        assert_eq!(reply.kind, ReplyKind::Fallback);
        assert_eq!(reply.text, "F1");
    }

    #[test]
    fn test_large_weights_saturate() {
        let scoring = ScoringConfig {
            phrase_weight: u32::MAX,
            word_weight: u32::MAX,
            ..ScoringConfig::default()
        };
        let config = crate::config::ChatConfig {
            scoring: scoring.clone(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let kb = KnowledgeBase::new(
            vec![Topic::new("skills", ["skill", "stack"], ["R1"])],
            vec!["F1".into()],
        )
        .unwrap();
        let engine = ResponseEngine::new(Arc::new(kb), scoring, &ContinuationConfig::default());
        let mut ctx = SessionContext::new();

        let reply = engine.respond_with("skill stack", &mut ctx, &mut rng());
        assert_eq!(
            reply.kind,
            ReplyKind::Topic {
                topic_id: "skills".into(),
                score: u32::MAX
            }
        );
    }

    #[test]
    fn test_low_score_without_cue_falls_back_and_keeps_context() {
        let engine = skills_engine();
        let mut ctx = SessionContext::new();

        engine.respond_with("skills", &mut ctx, &mut rng());
        let reply = engine.respond_with("nice weather", &mut ctx, &mut rng());

        assert_eq!(reply.kind, ReplyKind::Fallback);
        assert_eq!(ctx.last_topic_id(), Some("skills"));
    }

    #[test]
    fn test_highest_score_wins() {
        let engine = engine_with(
            vec![
                Topic::new("projects", ["project"], ["P"]),
                Topic::new("yoga", ["yoga", "posture"], ["Y"]),
            ],
            &["F"],
        );
        let mut ctx = SessionContext::new();
        let reply = engine.respond_with("the yoga posture project", &mut ctx, &mut rng());
        assert_eq!(reply.text, "Y");
        assert_eq!(ctx.last_topic_id(), Some("yoga"));
    }

    #[test]
    fn test_first_topic_wins_ties() {
        let engine = engine_with(
            vec![
                Topic::new("first", ["alpha"], ["A"]),
                Topic::new("second", ["beta"], ["B"]),
            ],
            &["F"],
        );
        let m = engine.best_match("alpha and beta").unwrap();
        assert_eq!(m.topic.id, "first");
        assert_eq!(m.score, 4);

        let m = engine.best_match("beta and alpha").unwrap();
        assert_eq!(m.topic.id, "first");
    }

    #[test]
    fn test_weak_word_credit_for_partial_phrase() {
        let engine = engine_with(
            vec![Topic::new("cv", ["computer vision"], ["CV"])],
            &["F"],
        );
        let topic = &engine.knowledge().topics()[0];

        assert_eq!(engine.score_topic(topic, "computer vision rocks"), 5);
        // Only the long words land: below the phrase weight but enough to count.
        assert_eq!(engine.score_topic(topic, "vision of a computer"), 2);
        assert_eq!(engine.score_topic(topic, "a vision"), 1);

        let mut ctx = SessionContext::new();
        let reply = engine.respond_with("a vision", &mut ctx, &mut rng());
        assert_eq!(reply.kind, ReplyKind::Fallback);
    }

    #[test]
    fn test_short_words_earn_no_credit() {
        let engine = engine_with(vec![Topic::new("ai", ["gen ai"], ["R"])], &["F"]);
        let topic = &engine.knowledge().topics()[0];
        assert_eq!(engine.score_topic(topic, "ai and gen"), 0);
        assert_eq!(engine.score_topic(topic, "gen ai"), 3);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let engine = skills_engine();
        let m = engine.best_match("YOUR TECH STACK").unwrap();
        assert_eq!(m.topic.id, "skills");
    }

    #[test]
    fn test_empty_input_falls_back() {
        let engine = skills_engine();
        let mut ctx = SessionContext::new();
        assert!(engine.best_match("").is_none());
        let reply = engine.respond_with("", &mut ctx, &mut rng());
        assert_eq!(reply.text, "F1");
    }

    #[test]
    fn test_scoring_weights_are_configurable() {
        let kb = KnowledgeBase::new(
            vec![Topic::new("skills", ["skill"], ["R1"])],
            vec!["F1".into()],
        )
        .unwrap();
        let scoring = ScoringConfig {
            phrase_weight: 1,
            word_weight: 0,
            min_word_len: 3,
            min_confidence: 2,
        };
        let engine = ResponseEngine::new(Arc::new(kb), scoring, &ContinuationConfig::default());
        let mut ctx = SessionContext::new();
        let reply = engine.respond_with("skills", &mut ctx, &mut rng());
        assert_eq!(reply.kind, ReplyKind::Fallback);
    }

    #[test]
    fn test_portfolio_replies_come_from_topic_set() {
        let kb = Arc::new(KnowledgeBase::portfolio());
        let engine = ResponseEngine::new(
            kb.clone(),
            ScoringConfig::default(),
            &ContinuationConfig::default(),
        );
        let mut ctx = SessionContext::new();
        let mut rng = rng();

        for _ in 0..20 {
            let reply = engine.respond_with("Tell me about the Yoga AI project", &mut ctx, &mut rng);
            assert_eq!(ctx.last_topic_id(), Some("yoga-ai"));
            assert!(kb.responses("yoga-ai").unwrap().contains(&reply.text));
        }

        let reply = engine.respond_with("zzz", &mut ctx, &mut rng);
        assert!(kb.fallbacks().contains(&reply.text));
    }

    proptest! {
        #[test]
        fn prop_full_pattern_matches_its_topic(
            pattern in "[a-z]{1,8}( [a-z]{1,8}){0,2}",
            prefix in "[0-9 ?!]{0,12}",
            suffix in "[0-9 ?!]{0,12}",
            seed in any::<u64>(),
        ) {
            let engine = engine_with(
                vec![Topic::new("t", [pattern.clone()], ["R1", "R2"])],
                &["F1"],
            );
            let input = format!("{}{}{}", prefix, pattern.to_uppercase(), suffix);
            let topic = &engine.knowledge().topics()[0];
            prop_assert!(engine.score_topic(topic, &input.to_lowercase()) >= 3);

            let mut ctx = SessionContext::new();
            let reply = engine.respond_with(&input, &mut ctx, &mut StdRng::seed_from_u64(seed));
            prop_assert!(reply.text == "R1" || reply.text == "R2");
            prop_assert_eq!(ctx.last_topic_id(), Some("t"));
        }

        #[test]
        fn prop_unrelated_input_without_context_falls_back(
            input in "[0-9 ?!.,]{0,30}",
            seed in any::<u64>(),
        ) {
            let engine = engine_with(
                vec![
                    Topic::new("skills", ["skill", "stack"], ["R1"]),
                    Topic::new("contact", ["email"], ["R2"]),
                ],
                &["F1", "F2"],
            );
            let mut ctx = SessionContext::new();
            let reply = engine.respond_with(&input, &mut ctx, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(reply.kind, ReplyKind::Fallback);
            prop_assert!(reply.text == "F1" || reply.text == "F2");
        }
    }
}
