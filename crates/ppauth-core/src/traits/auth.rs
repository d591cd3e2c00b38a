// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password authentication provider trait registered with the host.

use async_trait::async_trait;

use crate::traits::adapter::PluginAdapter;
use crate::types::LoginOutcome;

/// A provider the host consults when a user logs in with a password.
///
/// Neither method can fail: a provider that cannot authenticate the attempt,
/// for whatever reason, returns [`LoginOutcome::Declined`].
#[async_trait]
pub trait PasswordAuthProvider: PluginAdapter {
    /// Checks a password login.
    ///
    /// `login_dict` is the raw login submission; providers read the fields
    /// they declared (here, `password`).
    async fn check_password(
        &self,
        username: &str,
        login_type: &str,
        login_dict: &serde_json::Value,
    ) -> LoginOutcome;

    /// Checks a login by third-party identifier (for example an email address).
    async fn check_3pid(&self, medium: &str, address: &str, password: &str) -> LoginOutcome;
}
