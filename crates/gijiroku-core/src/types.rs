//! Document schemas passed between the pipeline stages.

use serde::{Deserialize, Serialize};

/// Speaker-attributed span of transcribed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub speaker: Option<String>,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Output of the transcription stage, written once per audio object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptDocument {
    pub text: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

impl TranscriptDocument {
    /// Minimal document wrapping raw text, used when the engine returns a
    /// non-JSON or legacy payload.
    pub fn from_raw_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: None,
            segments: Vec::new(),
        }
    }
}

/// Transcript content as read back from storage: either the structured
/// document stage 1 wrote, or arbitrary plain text. The raw branch is a
/// documented fallback, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTranscript {
    Structured(TranscriptDocument),
    Raw(String),
}

impl ParsedTranscript {
    pub fn parse(content: &str) -> Self {
        match serde_json::from_str::<TranscriptDocument>(content) {
            Ok(doc) => Self::Structured(doc),
            Err(_) => Self::Raw(content.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Structured(doc) => &doc.text,
            Self::Raw(text) => text,
        }
    }

    pub fn duration(&self) -> Option<f64> {
        match self {
            Self::Structured(doc) => doc.duration,
            Self::Raw(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub task: String,
    pub assignee: Option<String>,
    pub deadline: Option<String>,
}

/// What the summarization engine may produce. Unknown keys in the engine
/// payload (including a hallucinated `metadata`) are dropped at parse
/// time; metadata is pipeline-authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryCore {
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

/// Processing metadata the pipeline appends to every summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub transcript_s3_key: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub transcript_length: usize,
    #[serde(default)]
    pub transcript_duration: Option<f64>,
}

/// The persisted summary: engine output plus pipeline metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    #[serde(flatten)]
    pub core: SummaryCore,
    pub metadata: SummaryMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_transcript_structured() {
        let content = r#"{"text": "こんにちは", "duration": 12.5, "segments": []}"#;
        let parsed = ParsedTranscript::parse(content);
        assert_eq!(parsed.text(), "こんにちは");
        assert_eq!(parsed.duration(), Some(12.5));
        assert!(matches!(parsed, ParsedTranscript::Structured(_)));
    }

    #[test]
    fn test_parsed_transcript_raw_fallback() {
        let parsed = ParsedTranscript::parse("hello world");
        assert_eq!(parsed.text(), "hello world");
        assert_eq!(parsed.duration(), None);
        assert!(matches!(parsed, ParsedTranscript::Raw(_)));
    }

    #[test]
    fn test_parsed_transcript_json_without_text_is_raw() {
        let parsed = ParsedTranscript::parse(r#"{"transcript": "wrong shape"}"#);
        assert!(matches!(parsed, ParsedTranscript::Raw(_)));
    }

    #[test]
    fn test_transcript_document_optional_fields_default() {
        let doc: TranscriptDocument = serde_json::from_str(r#"{"text": "abc"}"#).unwrap();
        assert_eq!(doc.duration, None);
        assert!(doc.segments.is_empty());
    }

    #[test]
    fn test_summary_core_ignores_engine_metadata() {
        let raw = r#"{
            "summary": "要約",
            "key_points": ["a"],
            "decisions": [],
            "action_items": [],
            "next_steps": [],
            "metadata": {"generated_at": "1999-01-01T00:00:00Z", "transcript_s3_key": "forged"}
        }"#;
        let core: SummaryCore = serde_json::from_str(raw).unwrap();
        assert_eq!(core.summary, "要約");
        // metadata is not part of the engine schema and must not survive
        let value = serde_json::to_value(&core).unwrap();
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_summary_core_missing_categories_default_empty() {
        let core: SummaryCore = serde_json::from_str(r#"{"summary": "s"}"#).unwrap();
        assert!(core.key_points.is_empty());
        assert!(core.decisions.is_empty());
        assert!(core.action_items.is_empty());
        assert!(core.next_steps.is_empty());
    }

    #[test]
    fn test_summary_document_serializes_core_and_metadata_flat() {
        let doc = SummaryDocument {
            core: SummaryCore {
                summary: "s".to_string(),
                ..Default::default()
            },
            metadata: SummaryMetadata {
                transcript_s3_key: "transcripts/a.json".to_string(),
                generated_at: chrono::Utc::now(),
                transcript_length: 1,
                transcript_duration: None,
            },
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["summary"], "s");
        assert_eq!(value["metadata"]["transcript_s3_key"], "transcripts/a.json");
        assert_eq!(value["metadata"]["transcript_duration"], serde_json::Value::Null);
    }
}
