//! Server-side enforcement of the guessing rules.
//!
//! The prompt already instructs the service to self-police, but the gate is
//! the authoritative trust-nothing check: a guess that arrives too early or
//! under-confident is downgraded to a question, never the other way around.

use super::decision::Decision;
use super::state::GameState;
use serde::{Deserialize, Serialize};

/// Question asked in place of a downgraded guess that carried no usable
/// confirmation prompt.
pub const FALLBACK_QUESTION: &str = "Please continue with a question.";

/// The two policy tunables. Server configuration, not per-session state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessPolicy {
    /// Minimum questions asked before any guess is eligible.
    pub min_questions: u32,
    /// Minimum confidence required to accept a guess.
    pub confidence_threshold: f64,
}

impl Default for GuessPolicy {
    fn default() -> Self {
        Self {
            min_questions: 20,
            confidence_threshold: 0.98,
        }
    }
}

pub fn enforce(decision: Decision, state: &GameState, policy: &GuessPolicy) -> Decision {
    match decision {
        Decision::Question { .. } => decision,
        Decision::Guess {
            confidence,
            ref confirmation_prompt,
            ..
        } => {
            if state.question_count >= policy.min_questions
                && confidence >= policy.confidence_threshold
            {
                return decision;
            }

            tracing::debug!(
                question_count = state.question_count,
                confidence,
                "downgrading premature or under-confident guess to a question"
            );
            let text = if confirmation_prompt.trim().is_empty() {
                FALLBACK_QUESTION.to_string()
            } else {
                confirmation_prompt.clone()
            };
            Decision::Question { text }
        }
    }
}
