// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password auth provider that delegates logins to a remote web service.
//!
//! A login attempt flows through three steps:
//! 1. [`query`] turns the username (or email) and password into a [`LoginQuery`].
//! 2. [`RemoteVerifier`] checks the credentials against `checklogin`.
//! 3. [`IdentityResolver`] maps the remote account onto a local one,
//!    registering it on first login.
//!
//! Any failure along the way declines the login. The cause is logged at
//! `warn` and never returned to the host.

pub mod chain;
pub mod query;
pub mod resolver;

pub use chain::ProviderChain;
pub use resolver::IdentityResolver;

use std::sync::Arc;

use async_trait::async_trait;
use ppauth_core::types::LOGIN_TYPE_PASSWORD;
use ppauth_core::{
    HealthStatus, LoginOutcome, LoginQuery, PasswordAuthProvider, PluginAdapter, PpAuthError,
    ProviderConfig, UserDirectory,
};
use ppauth_remote::RemoteVerifier;
use tracing::{debug, info, warn};

/// The auth bridge registered with the host as a [`PasswordAuthProvider`].
///
/// Holds only read-only state, so one instance serves concurrent logins.
pub struct AuthBridge {
    verifier: RemoteVerifier,
    resolver: IdentityResolver,
}

impl AuthBridge {
    /// Builds the bridge. Fails if the remote settings are unusable.
    pub fn new(
        config: &ProviderConfig,
        directory: Arc<dyn UserDirectory>,
    ) -> Result<Self, PpAuthError> {
        let verifier = RemoteVerifier::new(config)?;
        info!(endpoint = %verifier.endpoint(), "remote login bridge configured");
        Ok(Self {
            verifier,
            resolver: IdentityResolver::new(directory),
        })
    }

    pub fn verifier(&self) -> &RemoteVerifier {
        &self.verifier
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    async fn login(&self, query: LoginQuery) -> LoginOutcome {
        let Some(identity) = self.verifier.verify(&query).await else {
            return LoginOutcome::Declined;
        };

        info!(
            remote_id = %identity.remote_id,
            remote_name = %identity.remote_name,
            "logging in with remote credentials"
        );

        match self.resolver.resolve(&identity).await {
            Ok(user_id) => {
                info!(%user_id, remote_name = %identity.remote_name, "user logged in via remote service");
                LoginOutcome::accepted(user_id)
            }
            Err(e) => {
                let user_id = self.resolver.local_user_id(&identity);
                warn!(%user_id, error = %e, "could not resolve local account");
                LoginOutcome::Declined
            }
        }
    }
}

#[async_trait]
impl PluginAdapter for AuthBridge {
    fn name(&self) -> &str {
        "ppauth-bridge"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, PpAuthError> {
        // The endpoint was validated at construction; no login is sent here.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PpAuthError> {
        Ok(())
    }
}

#[async_trait]
impl PasswordAuthProvider for AuthBridge {
    async fn check_password(
        &self,
        username: &str,
        login_type: &str,
        login_dict: &serde_json::Value,
    ) -> LoginOutcome {
        if login_type != LOGIN_TYPE_PASSWORD {
            debug!(login_type, "unsupported login type");
            return LoginOutcome::Declined;
        }

        let Some(password) = login_dict.get("password").and_then(serde_json::Value::as_str) else {
            debug!("password login without a password field");
            return LoginOutcome::Declined;
        };

        let query = query::password_login(username, password, self.resolver.server_name());
        self.login(query).await
    }

    async fn check_3pid(&self, medium: &str, address: &str, password: &str) -> LoginOutcome {
        match query::third_party_login(medium, address, password) {
            Some(query) => self.login(query).await,
            None => {
                debug!(medium, "unsupported third-party medium");
                LoginOutcome::Declined
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppauth_test_utils::MemoryUserDirectory;
    use secrecy::SecretString;

    fn bridge(base_url: &str) -> AuthBridge {
        let config = ProviderConfig::new(base_url, SecretString::from("tok".to_string())).unwrap();
        AuthBridge::new(&config, Arc::new(MemoryUserDirectory::new("example.org"))).unwrap()
    }

    #[test]
    fn adapter_name_and_version() {
        let bridge = bridge("https://pp.example");
        assert_eq!(bridge.name(), "ppauth-bridge");
        assert_eq!(bridge.version(), semver::Version::new(0, 1, 0));
        assert_eq!(
            bridge.verifier().endpoint().as_str(),
            "https://pp.example/adminapi/checklogin"
        );
    }

    #[tokio::test]
    async fn health_check_healthy() {
        let bridge = bridge("https://pp.example");
        assert_eq!(bridge.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[test]
    fn invalid_base_url_fails_construction() {
        let config = ProviderConfig::new("::nope", SecretString::from("tok".to_string())).unwrap();
        let result = AuthBridge::new(&config, Arc::new(MemoryUserDirectory::new("example.org")));
        assert!(matches!(result, Err(PpAuthError::Config(_))));
    }

    #[tokio::test]
    async fn other_login_types_are_declined() {
        let bridge = bridge("http://127.0.0.1:9");
        let outcome = bridge
            .check_password("alice", "m.login.token", &serde_json::json!({"token": "x"}))
            .await;
        assert!(outcome.is_declined());
    }

    #[tokio::test]
    async fn missing_password_field_is_declined() {
        let bridge = bridge("http://127.0.0.1:9");
        let outcome = bridge
            .check_password("alice", LOGIN_TYPE_PASSWORD, &serde_json::json!({}))
            .await;
        assert!(outcome.is_declined());
    }
}
