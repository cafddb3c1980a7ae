//! Transcription stage: audio object created → speaker-attributed
//! transcript JSON under the transcript prefix.

use crate::response::StageResponse;
use crate::secrets::{self, SecretSource};
use gijiroku_core::{keys, EngineError, EventRecord, PipelineConfig, StageError, StorageEvent};
use gijiroku_engine::SpeechEngine;
use gijiroku_store::ObjectStore;
use serde_json::json;
use std::sync::Arc;

/// Builds a speech engine for one invocation from the resolved API key.
pub type SpeechEngineFactory =
    Box<dyn Fn(String) -> Result<Box<dyn SpeechEngine>, EngineError> + Send + Sync>;

pub struct TranscribeStage {
    store: Arc<dyn ObjectStore>,
    secrets: Arc<dyn SecretSource>,
    engine_factory: SpeechEngineFactory,
    config: PipelineConfig,
}

impl TranscribeStage {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        secrets: Arc<dyn SecretSource>,
        engine_factory: SpeechEngineFactory,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            secrets,
            engine_factory,
            config,
        }
    }

    /// Process one storage event. Credentials are resolved once per
    /// invocation before any record is touched; records are then handled
    /// sequentially in delivered order, and the first failure aborts the
    /// batch while keeping artifacts already written.
    pub async fn handle(&self, event: &StorageEvent) -> StageResponse {
        tracing::info!(records = event.records.len(), "transcription invocation");

        let api_key =
            match secrets::resolve_api_key(self.secrets.as_ref(), &self.config.secret_name).await {
                Ok(key) => key,
                Err(e) => {
                    tracing::error!(error = %e, "credential resolution failed");
                    return StageResponse::failure("Error during transcription", e);
                }
            };
        let engine = match (self.engine_factory)(api_key) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::error!(error = %e, "speech engine construction failed");
                return StageResponse::failure("Error during transcription", e);
            }
        };

        let mut output_key = None;
        for record in &event.records {
            match self.process_record(engine.as_ref(), record).await {
                Ok(key) => output_key = Some(key),
                Err(e) => {
                    tracing::error!(error = %e, "record processing failed, aborting batch");
                    return StageResponse::failure("Error during transcription", e);
                }
            }
        }

        StageResponse::success(json!({
            "message": "Transcription completed successfully",
            "output_key": output_key,
        }))
    }

    async fn process_record(
        &self,
        engine: &dyn SpeechEngine,
        record: &EventRecord,
    ) -> Result<String, StageError> {
        let object = record.object_ref();
        tracing::info!(bucket = %object.bucket, key = %object.key, "processing audio object");

        // scratch file keeps the original extension; engines may dispatch
        // on it. Removed on drop, success and failure alike.
        let scratch = tempfile::Builder::new()
            .prefix("gijiroku-audio-")
            .suffix(keys::extension(&object.key))
            .tempfile()?;

        let bytes = self
            .store
            .download_to(&object.bucket, &object.key, scratch.path())
            .await?;
        tracing::info!(bytes, "audio object downloaded");

        let document = engine
            .transcribe(scratch.path(), &self.config.language)
            .await?;

        let output_key = keys::derive_output_key(
            &object.key,
            &self.config.audio_prefix,
            &self.config.transcript_prefix,
            ".json",
        );
        let body = serde_json::to_string_pretty(&document)?;
        self.store
            .put(&object.bucket, &output_key, body.as_bytes(), "application/json")
            .await?;
        tracing::info!(
            uri = %self.store.uri(&object.bucket, &output_key),
            "transcript saved"
        );

        Ok(output_key)
    }
}
