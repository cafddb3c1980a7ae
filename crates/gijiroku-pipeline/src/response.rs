use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Invocation result of a stage handler. Acknowledgment is all-or-nothing:
/// a single failed record turns the whole invocation into a 500 so the
/// substrate can redeliver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Value,
}

impl StageResponse {
    pub fn success(body: Value) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }

    pub fn failure(message: &str, error: impl std::fmt::Display) -> Self {
        Self {
            status_code: 500,
            body: json!({
                "message": message,
                "error": error.to_string(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
