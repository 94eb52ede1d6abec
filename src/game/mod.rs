//! The deduction-game engine: state model, prompt contract, reply
//! validation, guessing policy, and the turn orchestrator that composes them.

pub mod decision;
pub mod extract;
pub mod policy;
pub mod prompt;
pub mod state;
pub mod turn;

pub use decision::Decision;
pub use extract::extract_decision;
pub use policy::{FALLBACK_QUESTION, GuessPolicy, enforce};
pub use prompt::build_prompt;
pub use state::{Answer, GameState, QaPair};
pub use turn::{OPENING_QUESTION, TurnEngine, TurnOutcome};
