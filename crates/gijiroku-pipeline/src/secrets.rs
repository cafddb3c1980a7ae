//! Credential resolution.
//!
//! The secret value may arrive as a raw string or as a JSON object; the
//! two shapes are resolved by one named parse instead of implicit
//! exception-catching, so the fallback is a testable branch.

use async_trait::async_trait;
use gijiroku_core::CredentialError;
use serde_json::Value;

/// Source of credential strings, looked up by a configured identifier.
#[async_trait]
pub trait SecretSource: Send + Sync {
    fn name(&self) -> &str;

    async fn get_secret(&self, name: &str) -> Result<String, CredentialError>;
}

/// Reads the secret from an environment variable of the same name.
pub struct EnvSecretSource;

#[async_trait]
impl SecretSource for EnvSecretSource {
    fn name(&self) -> &str {
        "env"
    }

    async fn get_secret(&self, name: &str) -> Result<String, CredentialError> {
        std::env::var(name).map_err(|_| CredentialError::NotFound(name.to_string()))
    }
}

/// Reads the secret from a file; the identifier is the file path.
pub struct FileSecretSource;

#[async_trait]
impl SecretSource for FileSecretSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn get_secret(&self, name: &str) -> Result<String, CredentialError> {
        match tokio::fs::read_to_string(name).await {
            Ok(content) => Ok(content.trim_end().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CredentialError::NotFound(name.to_string()))
            }
            Err(e) => Err(CredentialError::RetrievalFailed(e.to_string())),
        }
    }
}

/// Parsed secret value: a JSON object, or everything else kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretValue {
    Structured(Value),
    Raw(String),
}

impl SecretValue {
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value @ Value::Object(_)) => Self::Structured(value),
            _ => Self::Raw(raw.to_string()),
        }
    }

    /// Extract the API key: a raw value is the key itself; an object is
    /// checked for `OPENAI_API_KEY`, then `api_key`. An object carrying
    /// neither is an unusable shape.
    pub fn api_key(&self) -> Result<String, CredentialError> {
        match self {
            Self::Raw(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Err(CredentialError::UnusableShape("secret value is empty".into()))
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Self::Structured(value) => ["OPENAI_API_KEY", "api_key"]
                .into_iter()
                .find_map(|field| value.get(field).and_then(Value::as_str))
                .map(str::to_string)
                .ok_or_else(|| {
                    CredentialError::UnusableShape(
                        "secret object has neither OPENAI_API_KEY nor api_key".into(),
                    )
                }),
        }
    }
}

/// Resolve the API key for one invocation. Any failure here is fatal for
/// the whole invocation and happens before any record is processed.
pub async fn resolve_api_key(
    source: &dyn SecretSource,
    name: &str,
) -> Result<String, CredentialError> {
    let raw = source.get_secret(name).await?;
    SecretValue::parse(&raw).api_key()
}
