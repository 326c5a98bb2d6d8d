//! # Login and Logout Commands
//!
//! The backend issues session tokens through its own login surface; the CLI
//! stores an issued token and attaches it to every request from then on.
//!
//! ## Usage
//!
//! ```bash
//! ragdoc login --token tok_abc123
//! ragdoc logout
//! ```

use anyhow::Result;

use crate::commands::guard_route;
use crate::config::{self, Config};
use crate::errors::{display_info, display_success};
use crate::exit_codes::*;
use crate::router;
use crate::session::SessionStore;

/// Execute the login command
///
/// Stores the session token (and optionally a base URL) in the
/// configuration file.
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Token stored, or already logged in
/// * `Err(_)` - Configuration could not be written
pub async fn execute(token: String, base_url: Option<String>) -> Result<i32> {
    let path = config::config_path()?;
    let store = SessionStore::with_path(path.clone());

    if let Some(code) = guard_route(&store, router::LOGIN_PATH) {
        return Ok(code);
    }

    let config = match base_url {
        Some(url) => Config::new_with_url(Some(token), url),
        None => {
            let mut config = Config::load_or_default(&path);
            config.token = Some(token);
            config
        }
    };
    config.save_to(&path)?;

    display_success("Logged in. Session token stored.");
    Ok(EXIT_SUCCESS)
}

/// Execute the logout command
///
/// Removes the stored session token.
pub async fn logout() -> Result<i32> {
    let store = SessionStore::open_default()?;

    if !store.is_authenticated() {
        display_info("Not logged in.");
        return Ok(EXIT_SUCCESS);
    }

    store.clear_token()?;
    display_success("Logged out. Session token removed.");
    Ok(EXIT_SUCCESS)
}
