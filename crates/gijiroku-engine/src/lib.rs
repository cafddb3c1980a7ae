pub mod engine_trait;
pub mod openai;
pub mod prompt;
pub mod static_engine;

pub use engine_trait::{SpeechEngine, Summarizer};
pub use openai::{OpenAiSpeechEngine, OpenAiSummarizer};
pub use static_engine::{StaticSpeechEngine, StaticSummarizer};
