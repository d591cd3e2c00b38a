// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host user directory used to look up and provision local accounts.

use async_trait::async_trait;

use crate::error::PpAuthError;
use crate::types::LocalUserId;

/// The host's store of local accounts.
///
/// The directory is the source of truth for whether an account exists; the
/// bridge keeps no mapping table of its own.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// The local domain user ids are qualified with.
    fn server_name(&self) -> &str;

    /// Qualifies a localpart with this server's domain.
    fn qualified_user_id(&self, localpart: &str) -> LocalUserId {
        LocalUserId::new(localpart, self.server_name())
    }

    /// Returns whether an account with this id exists.
    async fn check_user_exists(&self, user_id: &LocalUserId) -> Result<bool, PpAuthError>;

    /// Registers a new account and returns the id the host assigned.
    ///
    /// Fails with [`PpAuthError::Registration`] if the localpart is invalid or
    /// already taken.
    async fn register_user(
        &self,
        localpart: &str,
        display_name: &str,
        emails: &[String],
    ) -> Result<LocalUserId, PpAuthError>;
}
