// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity resolver: maps a remote account onto a local one, provisioning
//! it on first login.

use std::sync::Arc;

use ppauth_core::{LocalUserId, PpAuthError, RemoteIdentity, UserDirectory};
use tracing::info;

/// Resolves remote identities against the host's user directory.
///
/// The local id is a pure function of the remote id (`@pp_<id>:<server>`),
/// so repeated logins by the same remote account land on the same local one.
#[derive(Clone)]
pub struct IdentityResolver {
    directory: Arc<dyn UserDirectory>,
}

impl IdentityResolver {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// The local id a remote identity maps to, whether or not it exists yet.
    pub fn local_user_id(&self, identity: &RemoteIdentity) -> LocalUserId {
        self.directory.qualified_user_id(&identity.localpart())
    }

    pub fn server_name(&self) -> &str {
        self.directory.server_name()
    }

    /// Returns the local account for `identity`, registering it if absent.
    ///
    /// Lookup and registration failures are returned as-is and never retried.
    /// Two logins racing to register the same account will see one of them
    /// fail here with a duplicate error.
    pub async fn resolve(&self, identity: &RemoteIdentity) -> Result<LocalUserId, PpAuthError> {
        let localpart = identity.localpart();
        let user_id = self.directory.qualified_user_id(&localpart);

        info!(%user_id, "checking whether user exists");
        if self.directory.check_user_exists(&user_id).await? {
            return Ok(user_id);
        }

        info!(%user_id, "user does not exist yet, registering new user");
        let emails = identity.registration_emails();
        self.directory
            .register_user(&localpart, &identity.remote_name, &emails)
            .await
    }
}
