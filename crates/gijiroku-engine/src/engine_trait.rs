use async_trait::async_trait;
use gijiroku_core::{EngineError, SummaryCore, TranscriptDocument};
use std::path::Path;

/// Remote speech-to-text capability with speaker attribution.
///
/// Implementations receive a local audio file (the extension is preserved,
/// since engines may dispatch on it) and a language hint.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Returns the engine's backend name (e.g. `"openai"`).
    fn name(&self) -> &str;

    /// Transcribe one audio file into a speaker-attributed document.
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<TranscriptDocument, EngineError>;
}

/// Remote summarization capability producing the fixed minutes schema.
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    /// Summarize a transcript into the structured minutes shape. A response
    /// that violates the schema is an [`EngineError::InvalidResponse`].
    async fn summarize(&self, transcript: &str) -> Result<SummaryCore, EngineError>;
}
