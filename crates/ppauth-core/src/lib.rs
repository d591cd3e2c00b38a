// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the ppauth credential bridge.
//!
//! This crate provides the error type, the login types that flow through a
//! single login attempt, and the traits at the seam between the host chat
//! server and its password auth providers.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PpAuthError;
pub use types::{
    Authenticated, HealthStatus, IdentitySelector, LocalUserId, LoginOutcome, LoginQuery,
    LoginResponse, PostLoginHook, ProviderConfig, RemoteIdentity,
};

pub use traits::{PasswordAuthProvider, PluginAdapter, UserDirectory};
