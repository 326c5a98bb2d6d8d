//! # CLI Commands
//!
//! One module per command group. Every command follows the same shape:
//! evaluate the navigation guard for the command's route, build the API
//! client, issue one request, and map the outcome to an exit code.

pub mod ask;
pub mod cache;
pub mod collection;
pub mod document;
pub mod login;
pub mod model;
pub mod usage;

use anyhow::Result;
use colored::Colorize;

use crate::api::{ApiClient, ApiError};
use crate::config::{self, Config};
use crate::exit_codes::*;
use crate::router::{self, Guard};
use crate::session::SessionStore;

/// Build the API client and session store rooted at the default config path.
pub(crate) fn connect() -> Result<(ApiClient, SessionStore)> {
    let path = config::config_path()?;
    let store = SessionStore::with_path(path.clone());
    let config = Config::load_or_default(&path);
    let client = ApiClient::new(config.base_url(), store.clone());
    Ok((client, store))
}

/// Evaluate the navigation guard for a command's route.
///
/// Returns the exit code to report when the guard redirects instead of
/// proceeding.
pub(crate) fn guard_route(store: &SessionStore, target: &str) -> Option<i32> {
    match router::check_navigation(target, store.is_authenticated()) {
        Guard::Proceed => None,
        Guard::Redirect(router::LOGIN_PATH) => {
            eprintln!(
                "{} Not logged in. Run `ragdoc login --token <TOKEN>` first.",
                "Error:".red().bold()
            );
            Some(EXIT_AUTH_ERROR)
        }
        Guard::Redirect(_) => {
            println!(
                "{} Already logged in. Run `ragdoc logout` first to switch accounts.",
                "ℹ".blue().bold()
            );
            Some(EXIT_SUCCESS)
        }
    }
}

/// Map an API error to the exit code reported to the shell.
///
/// The error message itself has already been surfaced by the client's
/// notifier.
pub(crate) fn api_error_exit(error: &ApiError) -> i32 {
    if error.is_network_error() {
        return EXIT_NETWORK_ERROR;
    }
    if error.is_auth_error() {
        return EXIT_AUTH_ERROR;
    }
    if error.is_server_error() {
        return EXIT_SERVICE_UNAVAILABLE;
    }
    EXIT_ERROR
}

/// Pretty-print a response as JSON.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<i32> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(EXIT_SUCCESS)
}
