//! # Usage API
//!
//! This module contains the admin endpoints for usage limits and counters.
//!
//! Both endpoints authenticate the operation with an admin password carried
//! in the request body; a 401 response here means "wrong password" and is
//! exempt from the client's session-expiry handling.

use crate::api::client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

// =============================================================================
// Request Types
// =============================================================================

/// Request to update the global upload and query limits
#[derive(Debug, Clone, Serialize)]
pub struct UpdateLimitsRequest {
    /// Admin password authorizing the change.
    pub admin_password: String,
    /// New daily upload limit.
    pub upload_limit: i64,
    /// New daily query limit.
    pub query_limit: i64,
}

/// Request to reset a user's usage counters for today
#[derive(Debug, Clone, Serialize)]
pub struct ResetUsageRequest {
    /// Admin password authorizing the reset.
    pub admin_password: String,
    /// User to reset. Omitted when unset, in which case the server resets
    /// the caller's own usage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

// =============================================================================
// Response Types
// =============================================================================

/// Response from updating usage limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateLimitsResponse {
    /// Daily upload limit now in effect.
    pub upload_limit: Option<i64>,
    /// Daily query limit now in effect.
    pub query_limit: Option<i64>,
    /// Human-readable confirmation.
    pub message: Option<String>,
}

/// Response from resetting usage counters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResetUsageResponse {
    /// User whose counters were reset.
    pub user_id: Option<i64>,
    /// Human-readable confirmation.
    pub message: Option<String>,
}

// =============================================================================
// API Client Methods
// =============================================================================

impl ApiClient {
    /// Update the global upload and query limits
    ///
    /// All three fields are always sent.
    ///
    /// # Arguments
    ///
    /// * `request` - Admin password and the new limits
    pub async fn update_usage_limits(
        &self,
        request: &UpdateLimitsRequest,
    ) -> Result<UpdateLimitsResponse, ApiError> {
        self.post("/api/usage/limits/update", request).await
    }

    /// Reset a user's usage counters for today
    ///
    /// # Arguments
    ///
    /// * `admin_password` - Admin password authorizing the reset
    /// * `user_id` - User to reset; `None` resets the caller's own usage
    pub async fn reset_user_usage(
        &self,
        admin_password: &str,
        user_id: Option<i64>,
    ) -> Result<ResetUsageResponse, ApiError> {
        let request = ResetUsageRequest {
            admin_password: admin_password.to_string(),
            user_id,
        };
        self.post("/api/usage/reset", &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_limits_sends_all_fields() {
        let request = UpdateLimitsRequest {
            admin_password: "hunter2".to_string(),
            upload_limit: 20,
            query_limit: 100,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "admin_password": "hunter2",
                "upload_limit": 20,
                "query_limit": 100
            })
        );
    }

    #[test]
    fn test_reset_usage_without_user_omits_the_key() {
        let request = ResetUsageRequest {
            admin_password: "hunter2".to_string(),
            user_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"admin_password": "hunter2"}));
    }

    #[test]
    fn test_reset_usage_with_user() {
        let request = ResetUsageRequest {
            admin_password: "hunter2".to_string(),
            user_id: Some(42),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"admin_password": "hunter2", "user_id": 42})
        );
    }

    #[test]
    fn test_reset_usage_response_deserialization() {
        let json = r#"{"user_id": 42, "message": "Usage reset"}"#;
        let response: ResetUsageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user_id, Some(42));
        assert_eq!(response.message.as_deref(), Some("Usage reset"));
    }
}
