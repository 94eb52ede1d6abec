#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod config;
pub mod error;
pub mod game;
pub mod gateway;
pub mod llm;

pub use config::Config;
pub use error::{EngineError, Result};
pub use game::{Decision, GameState, GuessPolicy, TurnEngine, TurnOutcome};
