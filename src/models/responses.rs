//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies and pushed
//! subscription events.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response body for the get operation (GET /items/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The composed item key
    pub key: String,
    /// The stored value
    pub value: String,
    /// Absolute expiry, if one was set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            expires_at,
        }
    }
}

/// Response body for the set operations (PUT /items, POST /assign)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The composed key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Item '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the client id operation (POST /client-id)
#[derive(Debug, Clone, Serialize)]
pub struct ClientIdResponse {
    /// The assigned id, unique for the process lifetime
    pub id: String,
}

impl ClientIdResponse {
    /// Creates a new ClientIdResponse
    pub fn new(id: u64) -> Self {
        Self { id: id.to_string() }
    }
}

/// Pushed subscription event (GET /subscribe/:key stream)
///
/// One event is sent per wake-up, carrying the entry's state at read time.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateEvent {
    /// The composed item key
    pub key: String,
    /// The value read after the wake-up
    pub value: String,
    /// Absolute expiry, if one was set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("o:svc:n", "stored", None);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("o:svc:n"));
        assert!(json.contains("stored"));
        assert!(!json.contains("expires_at"));
    }

    #[test]
    fn test_get_response_with_expiry() {
        let at = Utc::now() + Duration::seconds(60);
        let resp = GetResponse::new("o:svc:n", "stored", Some(at));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("expires_at"));
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("o:svc:n");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("o:svc:n"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_client_id_response_is_string() {
        let resp = ClientIdResponse::new(7);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""id":"7""#));
    }

    #[test]
    fn test_update_event_serialize() {
        let event = UpdateEvent {
            key: "o:svc:n".to_string(),
            value: "fresh".to_string(),
            expires_at: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("fresh"));
        assert!(!json.contains("expires_at"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
