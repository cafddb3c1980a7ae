pub mod config;
pub mod error;
pub mod event;
pub mod keys;
pub mod render;
pub mod types;

pub use config::{AppConfig, EngineConfig, NotifyArtifact, NotifyConfig, OutputFormat, PipelineConfig};
pub use error::{ConfigError, CredentialError, EngineError, NotifyError, StageError, StorageError};
pub use event::{EventRecord, StorageEvent, StorageObjectRef};
pub use types::{
    ActionItem, ParsedTranscript, SummaryCore, SummaryDocument, SummaryMetadata,
    TranscriptDocument, TranscriptSegment,
};
