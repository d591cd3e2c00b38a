// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the ppauth credential bridge.

use thiserror::Error;

/// The primary error type used across ppauth crates.
///
/// Login entry points never surface this type to the host. Every variant
/// raised while handling a login attempt is logged and folded into
/// [`LoginOutcome::Declined`](crate::types::LoginOutcome::Declined).
#[derive(Debug, Error)]
pub enum PpAuthError {
    /// Configuration errors (missing base URL or shared secret, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure talking to the remote login service.
    #[error("remote request failed: {message}")]
    Remote {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote service answered but refused the credentials.
    #[error("remote login rejected: {reason}")]
    Rejected { reason: String },

    /// The remote response could not be interpreted.
    #[error("malformed remote response: {message}")]
    MalformedResponse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The host user directory failed a lookup.
    #[error("user directory error: {message}")]
    Directory {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The host refused to register a new local account.
    #[error("could not register `{localpart}`: {message}")]
    Registration { localpart: String, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
