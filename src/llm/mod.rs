// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod traits;

// ── Provider implementations ────────────────────────────────────────────────
pub mod gemini;

// ── Infrastructure re-exports ───────────────────────────────────────────────
pub use http_client::{build_provider_client, build_provider_client_with_timeout};
pub use scrub::sanitize_api_error;
pub use traits::ReasoningService;

// ── Provider re-exports ─────────────────────────────────────────────────────
pub use gemini::GeminiProvider;
