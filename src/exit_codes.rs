//! # Exit Codes
//!
//! Standard exit codes for the ragdoc CLI.
//!
//! These codes follow common Unix conventions and provide meaningful
//! feedback to scripts and CI/CD pipelines.

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// General error (unspecified)
pub const EXIT_ERROR: i32 = 1;

/// Configuration error (missing or invalid config)
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Authentication error (not logged in, invalid or expired token)
pub const EXIT_AUTH_ERROR: i32 = 3;

/// Network error (connection failed, timeout, etc.)
pub const EXIT_NETWORK_ERROR: i32 = 4;

/// Invalid input (bad arguments, unreadable files, etc.)
pub const EXIT_INVALID_INPUT: i32 = 5;

/// Service unavailable (API down, maintenance, etc.)
pub const EXIT_SERVICE_UNAVAILABLE: i32 = 6;
