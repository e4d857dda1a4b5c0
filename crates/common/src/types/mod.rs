use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness payload returned by `/api/health`.
#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Health {
    pub fn running() -> Self {
        Self { success: true, message: "Server is running!".into(), timestamp: Utc::now() }
    }
}

/// Envelope shared by every JSON endpoint: `{ success, message?, data? }`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, message: None, data: Some(data) }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_empty_fields() {
        let body = serde_json::to_value(ApiResponse::ok(3)).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "data": 3}));

        let body = serde_json::to_value(ApiResponse::ok("x").with_message("done")).unwrap();
        assert_eq!(body["message"], "done");
    }
}
