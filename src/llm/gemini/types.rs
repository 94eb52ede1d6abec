use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequest {
    pub(super) contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub(super) generation_config: GenerationConfig,
    #[serde(rename = "safetySettings")]
    pub(super) safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
pub(super) struct Content {
    pub(super) parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(super) struct Part {
    pub(super) text: String,
}

#[derive(Debug, Serialize)]
pub(super) struct GenerationConfig {
    pub(super) temperature: f64,
    #[serde(rename = "topK")]
    pub(super) top_k: u32,
    #[serde(rename = "topP")]
    pub(super) top_p: f64,
    #[serde(rename = "maxOutputTokens")]
    pub(super) max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct SafetySetting {
    pub(super) category: &'static str,
    pub(super) threshold: &'static str,
}

/// Content-safety thresholds forwarded on every request. Pass-through
/// configuration, not business logic.
pub(super) fn default_safety_settings() -> Vec<SafetySetting> {
    const CATEGORIES: [&str; 4] = [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ];

    CATEGORIES
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: "BLOCK_MEDIUM_AND_ABOVE",
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponse {
    pub(super) candidates: Option<Vec<Candidate>>,
    pub(super) error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Candidate {
    pub(super) content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContent {
    pub(super) parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponsePart {
    pub(super) text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiError {
    #[serde(default)]
    pub(super) code: Option<u16>,
    pub(super) message: String,
}
