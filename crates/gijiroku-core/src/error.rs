use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Secret retrieval failures abort the whole invocation before any record
/// is touched; credentials are invocation-wide, not per-record.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("failed to retrieve secret: {0}")]
    RetrievalFailed(String),

    #[error("secret has no usable api key: {0}")]
    UnusableShape(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("failed to read object: {0}")]
    ReadFailed(String),

    #[error("failed to write object: {0}")]
    WriteFailed(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read input file: {0}")]
    InputRead(#[from] std::io::Error),

    #[error("engine request failed: {0}")]
    RequestFailed(String),

    #[error("engine API error: {0}")]
    ApiError(String),

    #[error("engine returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Notification failures are recovered locally and logged as warnings;
/// they never escalate to the record or the invocation.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier initialization failed: {0}")]
    InitializationFailed(String),

    #[error("failed to publish notification: {0}")]
    PublishFailed(String),
}

/// Per-record failure during stage processing. The first record that fails
/// aborts the batch; artifacts written for earlier records remain.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("scratch file error: {0}")]
    Scratch(#[from] std::io::Error),
}
