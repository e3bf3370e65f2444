//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the set operation (PUT /items)
///
/// # Fields
/// - `owner`: owning client (may be empty)
/// - `service`: service namespace, must be non-empty
/// - `name`: item name, must be non-empty
/// - `value`: the value to store
/// - `ttl`: optional time-to-live in seconds; absent means never expires
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// Owning client id or name
    #[serde(default)]
    pub owner: String,
    /// Service namespace
    pub service: String,
    /// Item name
    pub name: String,
    /// The value to store
    pub value: String,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid. The
    /// owner may be empty; service and name may not.
    pub fn validate(&self) -> Option<String> {
        if self.service.is_empty() {
            return Some("Service cannot be empty".to_string());
        }
        if self.name.is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        None
    }
}

/// Request body for the textual assignment operation (POST /assign)
///
/// Carries one `owner:service:name=value[,ttlSeconds]` assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignRequest {
    /// The assignment text
    pub assignment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"owner": "o", "service": "svc", "name": "n", "value": "hello"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.owner, "o");
        assert_eq!(req.service, "svc");
        assert_eq!(req.name, "n");
        assert_eq!(req.value, "hello");
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_owner_defaults_empty() {
        let json = r#"{"service": "svc", "name": "n", "value": "hello", "ttl": 60}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.owner, "");
        assert_eq!(req.ttl, Some(60));
    }

    #[test]
    fn test_validate_empty_service() {
        let req = SetRequest {
            owner: "o".to_string(),
            service: "".to_string(),
            name: "n".to_string(),
            value: "v".to_string(),
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_empty_name() {
        let req = SetRequest {
            owner: "".to_string(),
            service: "svc".to_string(),
            name: "".to_string(),
            value: "v".to_string(),
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_empty_owner_is_allowed() {
        let req = SetRequest {
            owner: "".to_string(),
            service: "svc".to_string(),
            name: "n".to_string(),
            value: "v".to_string(),
            ttl: Some(5),
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_assign_request_deserialize() {
        let json = r#"{"assignment": "o:svc:n=val,10"}"#;
        let req: AssignRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.assignment, "o:svc:n=val,10");
    }
}
