//! # Usage Commands
//!
//! Admin operations on usage limits and counters. A 401 from these
//! endpoints means the admin password was rejected; the session stays
//! intact and the failure is reported inline.

use anyhow::Result;
use colored::Colorize;

use crate::api::usage::UpdateLimitsRequest;
use crate::api::ApiError;
use crate::commands::{api_error_exit, connect, guard_route, print_json};
use crate::errors::display_success;
use crate::exit_codes::*;
use crate::router;

/// Report a rejected admin password.
fn display_wrong_password() {
    eprintln!(
        "{} The admin password was not accepted. Check it and try again.",
        "✗".red().bold()
    );
}

/// Execute `usage set-limits`
///
/// # Arguments
///
/// * `upload` - New daily upload limit
/// * `query` - New daily query limit
/// * `admin_password` - Admin password authorizing the change
pub async fn set_limits(
    upload: i64,
    query: i64,
    admin_password: String,
    json: bool,
) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::HOME_PATH) {
        return Ok(code);
    }

    let request = UpdateLimitsRequest {
        admin_password,
        upload_limit: upload,
        query_limit: query,
    };

    match client.update_usage_limits(&request).await {
        Ok(response) => {
            if json {
                return print_json(&response);
            }
            display_success(&response.message.unwrap_or_else(|| {
                format!(
                    "Limits updated: {} uploads, {} queries per day",
                    request.upload_limit, request.query_limit
                )
            }));
            Ok(EXIT_SUCCESS)
        }
        Err(ApiError::Unauthorized { .. }) => {
            display_wrong_password();
            Ok(EXIT_AUTH_ERROR)
        }
        Err(e) => Ok(api_error_exit(&e)),
    }
}

/// Execute `usage reset`
///
/// # Arguments
///
/// * `admin_password` - Admin password authorizing the reset
/// * `user` - User to reset; unset resets the caller's own usage
pub async fn reset(admin_password: String, user: Option<i64>, json: bool) -> Result<i32> {
    let (client, store) = connect()?;
    if let Some(code) = guard_route(&store, router::HOME_PATH) {
        return Ok(code);
    }

    match client.reset_user_usage(&admin_password, user).await {
        Ok(response) => {
            if json {
                return print_json(&response);
            }
            display_success(&response.message.unwrap_or_else(|| match user {
                Some(id) => format!("Usage reset for user {}", id),
                None => "Usage reset".to_string(),
            }));
            Ok(EXIT_SUCCESS)
        }
        Err(ApiError::Unauthorized { .. }) => {
            display_wrong_password();
            Ok(EXIT_AUTH_ERROR)
        }
        Err(e) => Ok(api_error_exit(&e)),
    }
}
