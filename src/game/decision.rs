use serde::{Deserialize, Serialize};

/// The structured, validated output of a turn.
///
/// Constructed fresh each turn by the extractor, possibly rewritten by the
/// policy gate, then folded into [`GameState`](super::GameState) and
/// discarded. Serializes to the same tagged shape the reasoning service is
/// instructed to emit, so the presentation layer sees one format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Decision {
    Question {
        #[serde(rename = "question")]
        text: String,
    },
    Guess {
        character: String,
        confidence: f64,
        #[serde(rename = "question")]
        confirmation_prompt: String,
    },
}

impl Decision {
    /// The text shown to the user regardless of variant.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Question { text } => text,
            Self::Guess {
                confirmation_prompt,
                ..
            } => confirmation_prompt,
        }
    }
}
