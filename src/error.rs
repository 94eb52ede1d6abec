use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `akin`.
///
/// Each subsystem defines its own error variant. The gateway maps these onto
/// HTTP statuses and a stable `kind` string so callers and telemetry can
/// distinguish "the model misbehaved" from "the network misbehaved" without
/// seeing internal detail.
#[derive(Debug, Error)]
pub enum EngineError {
    // ── Request ─────────────────────────────────────────────────────────
    #[error("missing game state in request")]
    MissingInput,

    // ── Config ──────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Reasoning service ───────────────────────────────────────────────
    #[error("reasoning service: {0}")]
    Llm(#[from] LlmError),

    // ── Reply validation ────────────────────────────────────────────────
    #[error("reply format: {0}")]
    Format(#[from] FormatError),
}

impl EngineError {
    /// Stable machine-readable failure class, surfaced on the wire.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput => "missing_input",
            Self::Config(_) | Self::Llm(LlmError::MissingApiKey) => "config",
            Self::Llm(LlmError::Upstream { .. }) => "upstream",
            Self::Llm(LlmError::EmptyReply) => "empty_reply",
            Self::Llm(LlmError::Transport(_)) => "transport",
            Self::Format(_) => "format",
        }
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Reasoning-service errors ────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("upstream reply carried no text")]
    EmptyReply,

    #[error("transport: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        // The API key rides in the request URL, so never pass the raw
        // error text through.
        Self::Transport(crate::llm::sanitize_api_error(&err.to_string()))
    }
}

// ─── Reply-format errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("no JSON object found in reply")]
    NoJson,

    #[error("reply JSON did not parse: {0}")]
    Parse(String),

    #[error("guess confidence {0} outside [0, 1]")]
    Confidence(f64),
}

// ─── Convenience re-exports ──────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
