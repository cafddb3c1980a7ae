//! Summarization stage: transcript object created → structured minutes
//! under the summary prefix, in one or two formats, plus an optional
//! best-effort completion notification.

use crate::digest;
use crate::notifier::Notifier;
use crate::response::StageResponse;
use crate::secrets::{self, SecretSource};
use gijiroku_core::{
    keys, render, EngineError, EventRecord, NotifyArtifact, ParsedTranscript, PipelineConfig,
    StageError, StorageEvent, SummaryDocument, SummaryMetadata,
};
use gijiroku_engine::Summarizer;
use gijiroku_store::ObjectStore;
use serde_json::json;
use std::sync::Arc;

/// Builds a summarizer for one invocation from the resolved API key.
pub type SummarizerFactory =
    Box<dyn Fn(String) -> Result<Box<dyn Summarizer>, EngineError> + Send + Sync>;

pub struct SummarizeStage {
    store: Arc<dyn ObjectStore>,
    secrets: Arc<dyn SecretSource>,
    summarizer_factory: SummarizerFactory,
    notifier: Option<Arc<dyn Notifier>>,
    config: PipelineConfig,
}

impl SummarizeStage {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        secrets: Arc<dyn SecretSource>,
        summarizer_factory: SummarizerFactory,
        notifier: Option<Arc<dyn Notifier>>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            secrets,
            summarizer_factory,
            notifier,
            config,
        }
    }

    /// Same invocation contract as the transcription stage: credentials
    /// first, sequential records, batch abort on first failure.
    pub async fn handle(&self, event: &StorageEvent) -> StageResponse {
        tracing::info!(records = event.records.len(), "summarization invocation");

        let api_key =
            match secrets::resolve_api_key(self.secrets.as_ref(), &self.config.secret_name).await {
                Ok(key) => key,
                Err(e) => {
                    tracing::error!(error = %e, "credential resolution failed");
                    return StageResponse::failure("Error generating summary", e);
                }
            };
        let summarizer = match (self.summarizer_factory)(api_key) {
            Ok(summarizer) => summarizer,
            Err(e) => {
                tracing::error!(error = %e, "summarizer construction failed");
                return StageResponse::failure("Error generating summary", e);
            }
        };

        let mut summary_key = None;
        for record in &event.records {
            match self.process_record(summarizer.as_ref(), record).await {
                Ok(key) => summary_key = Some(key),
                Err(e) => {
                    tracing::error!(error = %e, "record processing failed, aborting batch");
                    return StageResponse::failure("Error generating summary", e);
                }
            }
        }

        StageResponse::success(json!({
            "message": "Summary generated successfully",
            "summary_key": summary_key,
            "output_format": self.config.output_format.to_string(),
        }))
    }

    async fn process_record(
        &self,
        summarizer: &dyn Summarizer,
        record: &EventRecord,
    ) -> Result<String, StageError> {
        let object = record.object_ref();
        tracing::info!(bucket = %object.bucket, key = %object.key, "processing transcript object");

        let bytes = self.store.get(&object.bucket, &object.key).await?;
        let content = String::from_utf8_lossy(&bytes);

        let parsed = ParsedTranscript::parse(&content);
        match &parsed {
            ParsedTranscript::Structured(_) => {
                tracing::info!(
                    characters = parsed.text().chars().count(),
                    "transcript loaded as structured json"
                );
            }
            ParsedTranscript::Raw(_) => {
                tracing::info!(
                    characters = parsed.text().chars().count(),
                    "transcript is not json, treating content as plain text"
                );
            }
        }

        let core = summarizer.summarize(parsed.text()).await?;

        // metadata is pipeline-authoritative; anything like-named the
        // engine produced was already dropped at schema parse
        let document = SummaryDocument {
            core,
            metadata: SummaryMetadata {
                transcript_s3_key: object.key.clone(),
                generated_at: chrono::Utc::now(),
                transcript_length: parsed.text().chars().count(),
                transcript_duration: parsed.duration(),
            },
        };

        let base_key = keys::derive_output_key(
            &object.key,
            &self.config.transcript_prefix,
            &self.config.summary_prefix,
            "",
        );

        // independent puts: there is no multi-object transaction, so a
        // mid-failure can leave the set partially written
        let mut json_key = None;
        let mut markdown_key = None;
        if self.config.output_format.includes_json() {
            let key = format!("{base_key}.json");
            let body = serde_json::to_string_pretty(&document)?;
            self.store
                .put(&object.bucket, &key, body.as_bytes(), "application/json")
                .await?;
            tracing::info!(uri = %self.store.uri(&object.bucket, &key), "json summary saved");
            json_key = Some(key);
        }
        if self.config.output_format.includes_markdown() {
            let key = format!("{base_key}.md");
            let body = render::to_markdown(&document);
            self.store
                .put(&object.bucket, &key, body.as_bytes(), "text/markdown")
                .await?;
            tracing::info!(uri = %self.store.uri(&object.bucket, &key), "markdown summary saved");
            markdown_key = Some(key);
        }

        let primary_key = match self.config.notify_artifact {
            NotifyArtifact::Json => json_key.or(markdown_key),
            NotifyArtifact::Markdown => markdown_key.or(json_key),
        }
        .unwrap_or(base_key);

        if let Some(notifier) = &self.notifier {
            let uri = self.store.uri(&object.bucket, &primary_key);
            let message = digest::build_digest(&document, &uri);
            if let Err(e) = notifier.notify(digest::SUBJECT, &message).await {
                tracing::warn!(error = %e, "notification failed");
            }
        }

        Ok(primary_key)
    }
}
