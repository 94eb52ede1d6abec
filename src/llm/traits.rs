use crate::error::LlmError;
use std::future::Future;
use std::pin::Pin;

/// The external reasoning service behind an active turn.
///
/// One prompt in, one textual candidate out. The orchestrator depends only on
/// this seam, so tests can substitute a canned implementation and never touch
/// the network.
pub trait ReasoningService: Send + Sync {
    /// Service identifier (e.g. "gemini"), used in logs.
    fn name(&self) -> &str;

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;
}
