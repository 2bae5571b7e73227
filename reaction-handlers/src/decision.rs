//! Per-message reaction decision.

use dbot_core::Message;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::ReactionConfig;

/// What to do with one incoming message. Derived once, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchDecision {
    pub should_react: bool,
    pub delay_secs: u64,
    /// None only when `should_react` is false.
    pub reaction: Option<String>,
}

impl DispatchDecision {
    /// The decision for a message we must not react to.
    pub fn skip() -> Self {
        Self {
            should_react: false,
            delay_secs: 0,
            reaction: None,
        }
    }

    /// Self-messages always skip. Otherwise draws a delay uniformly from
    /// `[min_delay_secs, max_delay_secs]` and one emoji uniformly from the candidates.
    /// `config` must be validated; an empty candidate set yields a skip.
    pub fn sample<R: Rng + ?Sized>(message: &Message, config: &ReactionConfig, rng: &mut R) -> Self {
        if message.sender_is_self {
            return Self::skip();
        }
        let Some(emoji) = config.emojis.choose(&mut *rng) else {
            return Self::skip();
        };
        Self {
            should_react: true,
            delay_secs: rng.gen_range(config.min_delay_secs..=config.max_delay_secs),
            reaction: Some(emoji.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dbot_core::{Chat, User};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn message(sender_is_self: bool) -> Message {
        Message {
            id: "1".to_string(),
            user: User::anonymous(),
            chat: Chat {
                id: -100,
                chat_type: "channel".to_string(),
                title: None,
            },
            sender_is_self,
            text: Some("hello".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_self_message_never_reacts() {
        let config = ReactionConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let decision = DispatchDecision::sample(&message(true), &config, &mut rng);
            assert_eq!(decision, DispatchDecision::skip());
        }
    }

    #[test]
    fn test_samples_stay_within_config() {
        let config = ReactionConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let decision = DispatchDecision::sample(&message(false), &config, &mut rng);
            assert!(decision.should_react);
            assert!((5..=15).contains(&decision.delay_secs));
            let emoji = decision.reaction.unwrap();
            assert!(config.emojis.contains(&emoji));
        }
    }

    #[test]
    fn test_samples_cover_both_bounds_and_all_emojis() {
        let config = ReactionConfig {
            min_delay_secs: 1,
            max_delay_secs: 3,
            ..ReactionConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut delays = std::collections::HashSet::new();
        let mut emojis = std::collections::HashSet::new();
        for _ in 0..1000 {
            let decision = DispatchDecision::sample(&message(false), &config, &mut rng);
            delays.insert(decision.delay_secs);
            emojis.insert(decision.reaction.unwrap());
        }
        assert_eq!(delays.len(), 3);
        assert_eq!(emojis.len(), config.emojis.len());
    }

    #[test]
    fn test_empty_candidates_skip() {
        let config = ReactionConfig {
            emojis: Vec::new(),
            ..ReactionConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert!(!DispatchDecision::sample(&message(false), &config, &mut rng).should_react);
    }
}
