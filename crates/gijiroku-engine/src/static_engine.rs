//! Fixed-output engines for tests and offline runs: no network, no
//! credentials, always the same document.

use crate::engine_trait::{SpeechEngine, Summarizer};
use async_trait::async_trait;
use gijiroku_core::{EngineError, SummaryCore, TranscriptDocument};
use std::path::Path;

pub struct StaticSpeechEngine {
    document: TranscriptDocument,
}

impl StaticSpeechEngine {
    pub fn new(document: TranscriptDocument) -> Self {
        Self { document }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(TranscriptDocument::from_raw_text(text))
    }
}

impl Default for StaticSpeechEngine {
    fn default() -> Self {
        Self::with_text("[static transcript: no speech engine configured]")
    }
}

#[async_trait]
impl SpeechEngine for StaticSpeechEngine {
    fn name(&self) -> &str {
        "static"
    }

    async fn transcribe(
        &self,
        _audio_path: &Path,
        _language: &str,
    ) -> Result<TranscriptDocument, EngineError> {
        Ok(self.document.clone())
    }
}

pub struct StaticSummarizer {
    core: SummaryCore,
}

impl StaticSummarizer {
    pub fn new(core: SummaryCore) -> Self {
        Self { core }
    }
}

impl Default for StaticSummarizer {
    fn default() -> Self {
        Self::new(SummaryCore {
            summary: "[static summary: no summarizer configured]".to_string(),
            ..Default::default()
        })
    }
}

#[async_trait]
impl Summarizer for StaticSummarizer {
    fn name(&self) -> &str {
        "static"
    }

    async fn summarize(&self, _transcript: &str) -> Result<SummaryCore, EngineError> {
        Ok(self.core.clone())
    }
}
