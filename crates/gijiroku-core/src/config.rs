use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub notify: Option<NotifyConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: String,

    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            root: default_storage_root(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Identifier handed to the secret source; the credential lookup is
    /// invocation-wide and mandatory.
    pub secret_name: String,

    #[serde(default = "default_secret_source")]
    pub secret_source: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub output_format: OutputFormat,

    #[serde(default = "default_audio_prefix")]
    pub audio_prefix: String,

    #[serde(default = "default_transcript_prefix")]
    pub transcript_prefix: String,

    #[serde(default = "default_summary_prefix")]
    pub summary_prefix: String,

    /// Which artifact the notification digest should reference when the
    /// output mode produces more than one.
    #[serde(default)]
    pub notify_artifact: NotifyArtifact,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_engine_name")]
    pub name: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_transcribe_model")]
    pub transcribe_model: String,

    #[serde(default = "default_summary_model")]
    pub summary_model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_engine_name(),
            base_url: default_base_url(),
            transcribe_model: default_transcribe_model(),
            summary_model: default_summary_model(),
            temperature: default_temperature(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotifyConfig {
    pub sink: String,

    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
    Both,
}

impl OutputFormat {
    pub fn includes_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    pub fn includes_markdown(self) -> bool {
        matches!(self, Self::Markdown | Self::Both)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
            Self::Both => write!(f, "both"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotifyArtifact {
    #[default]
    Json,
    Markdown,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_storage_backend() -> String {
    "fs".to_string()
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./data")
}

fn default_secret_source() -> String {
    "env".to_string()
}

fn default_language() -> String {
    "ja".to_string()
}

fn default_audio_prefix() -> String {
    "raw-audio/".to_string()
}

fn default_transcript_prefix() -> String {
    "transcripts/".to_string()
}

fn default_summary_prefix() -> String {
    "summaries/".to_string()
}

fn default_engine_name() -> String {
    "openai".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_transcribe_model() -> String {
    "gpt-4o-transcribe-diarize".to_string()
}

fn default_summary_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }
}
