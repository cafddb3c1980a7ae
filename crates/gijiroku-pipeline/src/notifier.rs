use async_trait::async_trait;
use gijiroku_core::{NotifyConfig, NotifyError};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Best-effort completion notification sink. Failures here are recovered
/// by the caller and never fail a record.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns the sink's plugin name (e.g. `"log"`, `"webhook"`).
    fn name(&self) -> &str;

    async fn notify(&self, subject: &str, message: &str) -> Result<(), NotifyError>;
}

/// Writes the digest to the log; useful when no external sink is wired.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        tracing::info!(%subject, "{message}");
        Ok(())
    }
}

/// Posts the digest as JSON to a configured HTTP endpoint.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
            .build()
            .map_err(|e| NotifyError::InitializationFailed(e.to_string()))?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn notify(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        let payload = json!({
            "subject": subject,
            "message": message,
        });
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::PublishFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::PublishFailed(format!(
                "webhook returned status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Build the configured notifier, or `None` when no sink is configured;
/// notification is then skipped entirely.
pub fn from_config(config: Option<&NotifyConfig>) -> Result<Option<Arc<dyn Notifier>>, NotifyError> {
    let Some(config) = config else {
        return Ok(None);
    };
    match config.sink.as_str() {
        "log" => Ok(Some(Arc::new(LogNotifier))),
        "webhook" => {
            let url = config.url.clone().ok_or_else(|| {
                NotifyError::InitializationFailed("webhook sink requires 'url'".into())
            })?;
            Ok(Some(Arc::new(WebhookNotifier::new(url)?)))
        }
        other => Err(NotifyError::InitializationFailed(format!(
            "unknown notify sink: {other}"
        ))),
    }
}
