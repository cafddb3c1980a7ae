pub mod digest;
pub mod notifier;
pub mod response;
pub mod secrets;
pub mod summarize;
pub mod transcribe;

pub use notifier::{LogNotifier, Notifier, WebhookNotifier};
pub use response::StageResponse;
pub use secrets::{EnvSecretSource, FileSecretSource, SecretSource, SecretValue};
pub use summarize::{SummarizeStage, SummarizerFactory};
pub use transcribe::{SpeechEngineFactory, TranscribeStage};
