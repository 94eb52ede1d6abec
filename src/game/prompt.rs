//! Prompt rendering for the reasoning service.
//!
//! Total function of the game state and policy: the full transcript is
//! replayed every turn, and the guess output shape is only described once the
//! minimum question count is reached — the service is never offered the guess
//! format prematurely, independent of the server-side gate.

use super::policy::GuessPolicy;
use super::state::GameState;
use std::fmt::Write;

pub fn build_prompt(state: &GameState, policy: &GuessPolicy) -> String {
    let confidence_pct = format_percent(policy.confidence_threshold);

    let mut prompt = String::from("You are playing an Akinator-style guessing game.\n");
    prompt.push_str("Rules:\n");
    prompt.push_str("1. Ask strategic yes/no questions to narrow down the possibilities.\n");
    let _ = writeln!(
        prompt,
        "2. Do not guess until at least {} questions have been asked.",
        policy.min_questions
    );
    let _ = writeln!(
        prompt,
        "3. Only provide a guess if you are at least {confidence_pct}% confident."
    );

    prompt.push_str("User responses so far:\n");
    let transcript = state
        .user_responses
        .iter()
        .map(|r| format!("Q: \"{}\"\nA: \"{}\"", r.question, r.answer))
        .collect::<Vec<_>>()
        .join("\n\n");
    prompt.push_str(&transcript);
    prompt.push('\n');
    let _ = writeln!(prompt, "Questions asked: {}.", state.question_count);

    if !state.game_over {
        if state.question_count >= policy.min_questions {
            let _ = writeln!(
                prompt,
                "If you are at least {confidence_pct}% sure, return a guess in JSON format:"
            );
            prompt.push_str(
                "{\n  \"type\": \"guess\",\n  \"character\": \"Your guessed character\",\n  \
                 \"confidence\": 0.X,\n  \"question\": \"Am I right? Is it [character]?\"\n}\n",
            );
            prompt.push_str(
                "If you are not at that level of confidence, return a yes/no question in JSON format:\n",
            );
        } else {
            prompt.push_str("Return a yes/no question in JSON format:\n");
        }
        prompt.push_str(
            "{\n  \"type\": \"question\",\n  \"question\": \"Your yes/no question here\"\n}\n",
        );
    }

    prompt
}

fn format_percent(threshold: f64) -> String {
    let pct = threshold * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{:.0}", pct.round())
    } else {
        format!("{pct}")
    }
}
