//! Recovery of a structured [`Decision`] from the reasoning service's
//! free-form reply text.
//!
//! The service is instructed to answer with a strict JSON object, but is not
//! guaranteed to comply: replies arrive fenced, half-fenced, embedded
//! mid-sentence, or with bare / single-quoted object keys. Extraction is an
//! ordered chain of strategies — fenced block labeled `json`, any fenced
//! block, first brace-delimited span — followed by a normalization pass and
//! one strict parse. Failure at any point is a hard [`FormatError`]; it is
//! never silently downgraded to a default question, because masking it would
//! hide systematic prompt drift.

use super::decision::Decision;
use crate::error::FormatError;
use serde::Deserialize;

/// The two reply shapes the prompt contract allows.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawReply {
    Question {
        question: String,
    },
    Guess {
        character: String,
        confidence: f64,
        #[serde(default)]
        question: Option<String>,
    },
}

pub fn extract_decision(raw: &str) -> Result<Decision, FormatError> {
    let span = locate_json(raw).ok_or(FormatError::NoJson)?;
    let normalized = normalize(span);

    let reply: RawReply =
        serde_json::from_str(&normalized).map_err(|e| FormatError::Parse(e.to_string()))?;

    match reply {
        RawReply::Question { question } => Ok(Decision::Question { text: question }),
        RawReply::Guess {
            character,
            confidence,
            question,
        } => {
            if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
                return Err(FormatError::Confidence(confidence));
            }
            Ok(Decision::Guess {
                character,
                confidence,
                confirmation_prompt: question.unwrap_or_default(),
            })
        }
    }
}

// ─── Extraction strategies ──────────────────────────────────────────────────

fn locate_json(text: &str) -> Option<&str> {
    labeled_fenced_block(text)
        .or_else(|| any_fenced_block(text))
        .or_else(|| bare_object(text))
}

/// Interior of the first ```` ```json ```` fence.
fn labeled_fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```json")? + "```json".len();
    let body = &text[start..];
    let end = body.find("```")?;
    Some(&body[..end])
}

/// Interior of the first unlabeled fence (```` ``` ```` followed directly by
/// a newline, so a labeled opener is never half-matched).
fn any_fenced_block(text: &str) -> Option<&str> {
    let mut search_from = 0;
    loop {
        let open = search_from + text[search_from..].find("```")?;
        let body_start = open + "```".len();
        if !text[body_start..].starts_with('\n') {
            search_from = body_start;
            continue;
        }
        let body = &text[body_start..];
        return body.find("```").map(|end| &body[..end]);
    }
}

/// First `{...}` span, non-greedy: the first closing brace ends it. Decision
/// objects are flat, so nested objects are not a concern.
fn bare_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = start + text[start..].find('}')?;
    Some(&text[start..=end])
}

// ─── Normalization ──────────────────────────────────────────────────────────

fn normalize(span: &str) -> String {
    let stripped = span.replace("```json", "").replace("```", "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    quote_object_keys(&collapsed)
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Coerce bare (`key:`) and single-quoted (`'key':`) object keys to the
/// double-quoted form strict parsing requires. Double-quoted string literals
/// are copied verbatim so their contents are never rewritten.
fn quote_object_keys(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' {
            out.push(c);
            i += 1;
            while i < chars.len() {
                let sc = chars[i];
                out.push(sc);
                i += 1;
                if sc == '\\' {
                    if i < chars.len() {
                        out.push(chars[i]);
                        i += 1;
                    }
                } else if sc == '"' {
                    break;
                }
            }
            continue;
        }

        if c == '\'' || is_key_char(c) {
            let start = i;
            let quoted = c == '\'';
            let key_start = if quoted { i + 1 } else { i };
            let mut j = key_start;
            while j < chars.len() && is_key_char(chars[j]) {
                j += 1;
            }
            let key_end = j;

            if quoted {
                if j < chars.len() && chars[j] == '\'' {
                    j += 1;
                } else {
                    // Unterminated single quote: not a key form we rewrite.
                    out.push(c);
                    i += 1;
                    continue;
                }
            }

            if key_end > key_start && j < chars.len() && chars[j] == ':' {
                out.push('"');
                out.extend(&chars[key_start..key_end]);
                out.push('"');
            } else {
                out.extend(&chars[start..j.max(start + 1)]);
            }
            i = j.max(start + 1);
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}
