//! Turn orchestration.
//!
//! Two states only: bootstrap (`question_count == 0`) short-circuits to a
//! fixed opening question with no external call; every later turn runs the
//! prompt → service → extract → enforce pipeline and merges the result into
//! a fresh copy of the state. Failures abort the turn before the merge, so
//! the caller can always retry with the same input state.

use super::decision::Decision;
use super::policy::{self, GuessPolicy};
use super::prompt;
use super::state::GameState;
use crate::error::Result;
use crate::llm::ReasoningService;
use std::sync::Arc;

/// Deterministic first move; avoids an external call before any signal exists.
pub const OPENING_QUESTION: &str = "Is your character a real person (as opposed to fictional)?";

/// The enforced decision for one turn plus the state it was merged into.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub decision: Decision,
    pub state: GameState,
}

pub struct TurnEngine {
    provider: Arc<dyn ReasoningService>,
    policy: GuessPolicy,
}

impl TurnEngine {
    pub fn new(provider: Arc<dyn ReasoningService>, policy: GuessPolicy) -> Self {
        Self { provider, policy }
    }

    pub async fn take_turn(&self, state: GameState) -> Result<TurnOutcome> {
        if state.question_count == 0 {
            return Ok(Self::bootstrap(state));
        }

        let prompt = prompt::build_prompt(&state, &self.policy);
        tracing::debug!(
            provider = self.provider.name(),
            question_count = state.question_count,
            "requesting next turn"
        );

        let raw = self.provider.generate(&prompt).await?;
        let candidate = super::extract::extract_decision(&raw)?;
        let decision = policy::enforce(candidate, &state, &self.policy);

        let state = Self::merge(state, &decision);
        tracing::info!(
            question_count = state.question_count,
            guessing = matches!(decision, Decision::Guess { .. }),
            "turn complete"
        );
        Ok(TurnOutcome { decision, state })
    }

    fn bootstrap(mut state: GameState) -> TurnOutcome {
        tracing::info!("bootstrapping new game with the fixed opening question");
        state.current_question = OPENING_QUESTION.to_string();
        state.question_count = 1;
        TurnOutcome {
            decision: Decision::Question {
                text: OPENING_QUESTION.to_string(),
            },
            state,
        }
    }

    /// Fold an enforced decision into the state. Only reached after a
    /// successful full round-trip, which is what makes retries safe.
    fn merge(mut state: GameState, decision: &Decision) -> GameState {
        state.question_count += 1;
        state.current_question = decision.display_text().to_string();
        if let Decision::Guess {
            character,
            confidence,
            ..
        } = decision
        {
            state.guessed_character = Some(character.clone());
            state.confidence = Some(*confidence);
        }
        state
    }
}
