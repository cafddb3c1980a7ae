//! OpenAI-backed engine implementations.
//!
//! Both clients are constructed per invocation with the credential the
//! pipeline resolved; nothing is cached across invocations.

use crate::engine_trait::{SpeechEngine, Summarizer};
use crate::prompt;
use async_trait::async_trait;
use gijiroku_core::{EngineConfig, EngineError, SummaryCore, TranscriptDocument};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const TRANSCRIBE_TIMEOUT_SECS: u64 = 300;
const SUMMARIZE_TIMEOUT_SECS: u64 = 120;

fn build_client(timeout_secs: u64) -> Result<reqwest::Client, EngineError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| EngineError::RequestFailed(e.to_string()))
}

fn audio_mime(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}

/// Speaker-attributed transcription via the OpenAI audio API.
pub struct OpenAiSpeechEngine {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiSpeechEngine {
    pub fn new(config: &EngineConfig, api_key: String) -> Result<Self, EngineError> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.transcribe_model.clone(),
            api_key,
            client: build_client(TRANSCRIBE_TIMEOUT_SECS)?,
        })
    }
}

#[async_trait]
impl SpeechEngine for OpenAiSpeechEngine {
    fn name(&self) -> &str {
        "openai"
    }

    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<TranscriptDocument, EngineError> {
        let bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(audio_mime(audio_path))
            .map_err(|e| EngineError::RequestFailed(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "diarized_json")
            .text("chunking_strategy", "auto")
            .text("language", language.to_string());

        let url = format!("{}/audio/transcriptions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| EngineError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::ApiError(format!("status {status}: {body}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EngineError::RequestFailed(e.to_string()))?;
        let document = parse_transcription_payload(&body);
        tracing::info!(
            characters = document.text.chars().count(),
            segments = document.segments.len(),
            "transcription completed"
        );
        Ok(document)
    }
}

/// Parse the engine payload into a transcript document. A non-JSON or
/// legacy-shaped payload degrades to `{ text: <raw content> }` with no
/// segments; this is a documented fallback, not an error path.
pub(crate) fn parse_transcription_payload(body: &str) -> TranscriptDocument {
    match serde_json::from_str::<TranscriptDocument>(body) {
        Ok(document) => document,
        Err(_) => {
            tracing::warn!("transcription payload is not the expected shape, keeping raw text");
            TranscriptDocument::from_raw_text(body)
        }
    }
}

// OpenAI-compatible chat completion request/response
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// Minutes generation via OpenAI chat completions in JSON mode.
///
/// Sampling stays near-deterministic so redelivered events produce stable
/// summaries rather than creative variation.
pub struct OpenAiSummarizer {
    base_url: String,
    model: String,
    temperature: f32,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiSummarizer {
    pub fn new(config: &EngineConfig, api_key: String) -> Result<Self, EngineError> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.summary_model.clone(),
            temperature: config.temperature,
            api_key,
            client: build_client(SUMMARIZE_TIMEOUT_SECS)?,
        })
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    fn name(&self) -> &str {
        "openai"
    }

    async fn summarize(&self, transcript: &str) -> Result<SummaryCore, EngineError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt::summary_prompt(transcript),
                },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::ApiError(format!("status {status}: {body}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| EngineError::InvalidResponse("response contained no choices".into()))?;

        let core = parse_summary_payload(&content)?;
        tracing::info!("summary generated");
        Ok(core)
    }
}

/// Parse the JSON-mode content into the minutes schema. Unlike transcripts
/// there is no raw fallback here: a schema violation means the remote
/// contract was broken and the record must fail.
pub(crate) fn parse_summary_payload(content: &str) -> Result<SummaryCore, EngineError> {
    serde_json::from_str::<SummaryCore>(content)
        .map_err(|e| EngineError::InvalidResponse(format!("summary violated schema: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcription_payload_structured() {
        let body = r#"{
            "text": "皆さんこんにちは",
            "duration": 4.2,
            "segments": [
                {"speaker": "A", "start": 0.0, "end": 4.2, "text": "皆さんこんにちは"}
            ]
        }"#;
        let doc = parse_transcription_payload(body);
        assert_eq!(doc.text, "皆さんこんにちは");
        assert_eq!(doc.duration, Some(4.2));
        assert_eq!(doc.segments.len(), 1);
        assert_eq!(doc.segments[0].speaker.as_deref(), Some("A"));
    }

    #[test]
    fn test_parse_transcription_payload_raw_fallback() {
        let doc = parse_transcription_payload("plain transcription text");
        assert_eq!(doc.text, "plain transcription text");
        assert!(doc.segments.is_empty());
        assert_eq!(doc.duration, None);
    }

    #[test]
    fn test_parse_summary_payload_valid() {
        let content = r#"{
            "summary": "進捗確認を行った。",
            "key_points": ["計画は順調"],
            "decisions": [],
            "action_items": [{"task": "共有", "assignee": null, "deadline": null}],
            "next_steps": []
        }"#;
        let core = parse_summary_payload(content).unwrap();
        assert_eq!(core.summary, "進捗確認を行った。");
        assert_eq!(core.action_items[0].assignee, None);
    }

    #[test]
    fn test_parse_summary_payload_schema_violation_is_error() {
        let result = parse_summary_payload("the model replied in prose");
        assert!(matches!(result, Err(EngineError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_summary_payload_drops_hallucinated_metadata() {
        let content = r#"{"summary": "s", "metadata": {"transcript_s3_key": "forged"}}"#;
        let core = parse_summary_payload(content).unwrap();
        let value = serde_json::to_value(&core).unwrap();
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_audio_mime_dispatches_on_extension() {
        assert_eq!(audio_mime(Path::new("/tmp/a.wav")), "audio/wav");
        assert_eq!(audio_mime(Path::new("/tmp/a.mp3")), "audio/mpeg");
        assert_eq!(audio_mime(Path::new("/tmp/a.xyz")), "application/octet-stream");
        assert_eq!(audio_mime(Path::new("/tmp/noext")), "application/octet-stream");
    }
}
