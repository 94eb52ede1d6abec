//! The per-session game record.
//!
//! `GameState` is owned by the client between turns and round-tripped through
//! the server whole; the server keeps no session memory. Wire names are
//! camelCase for compatibility with the browser front end.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One answered question in the transcript. Insertion order is significant:
/// the history is replayed verbatim into every prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: Answer,
}

/// The only three answers the presentation layer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    Unsure,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unsure => "unsure",
        };
        f.write_str(s)
    }
}

/// Authoritative record of one game session's progress.
///
/// `guessed_character` and `confidence` are either both present or both
/// absent; the orchestrator only sets them together. `game_over` is driven by
/// the client once the user confirms or rejects a final guess — the engine
/// never sets it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Question or guess-confirmation currently shown to the user; empty
    /// before the first turn.
    #[serde(default)]
    pub current_question: String,

    /// Number of questions asked so far; the opening question counts as 1.
    #[serde(default)]
    pub question_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guessed_character: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub game_over: bool,

    #[serde(default)]
    pub user_responses: Vec<QaPair>,
}
