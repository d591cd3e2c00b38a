// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension-point traits shared between the host and auth providers.
//!
//! All async traits use `#[async_trait]` so they can be used as trait objects.

pub mod adapter;
pub mod auth;
pub mod directory;

pub use adapter::PluginAdapter;
pub use auth::PasswordAuthProvider;
pub use directory::UserDirectory;
