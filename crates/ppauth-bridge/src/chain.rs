// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered chain of password auth providers.
//!
//! A declined login moves on to the next provider; the first acceptance wins.

use std::sync::Arc;

use async_trait::async_trait;
use ppauth_core::{HealthStatus, LoginOutcome, PasswordAuthProvider, PluginAdapter, PpAuthError};
use tracing::debug;

/// Providers consulted in registration order.
#[derive(Default, Clone)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn PasswordAuthProvider>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider to the end of the chain.
    pub fn register(&mut self, provider: Arc<dyn PasswordAuthProvider>) {
        debug!(provider = provider.name(), "registering password auth provider");
        self.providers.push(provider);
    }

    pub fn with_provider(mut self, provider: Arc<dyn PasswordAuthProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl PluginAdapter for ProviderChain {
    fn name(&self) -> &str {
        "provider-chain"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    /// Healthy if every provider is, unhealthy if none is, otherwise
    /// degraded. The status names the providers that are not healthy.
    async fn health_check(&self) -> Result<HealthStatus, PpAuthError> {
        let mut failing = Vec::new();
        for provider in &self.providers {
            match provider.health_check().await {
                Ok(HealthStatus::Healthy) => {}
                _ => failing.push(provider.name().to_string()),
            }
        }

        if failing.is_empty() {
            return Ok(HealthStatus::Healthy);
        }
        let detail = format!("unhealthy providers: {}", failing.join(", "));
        if failing.len() == self.providers.len() {
            Ok(HealthStatus::Unhealthy(detail))
        } else {
            Ok(HealthStatus::Degraded(detail))
        }
    }

    async fn shutdown(&self) -> Result<(), PpAuthError> {
        for provider in &self.providers {
            provider.shutdown().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PasswordAuthProvider for ProviderChain {
    async fn check_password(
        &self,
        username: &str,
        login_type: &str,
        login_dict: &serde_json::Value,
    ) -> LoginOutcome {
        for provider in &self.providers {
            let outcome = provider
                .check_password(username, login_type, login_dict)
                .await;
            if !outcome.is_declined() {
                return outcome;
            }
            debug!(provider = provider.name(), "provider declined password login");
        }
        LoginOutcome::Declined
    }

    async fn check_3pid(&self, medium: &str, address: &str, password: &str) -> LoginOutcome {
        for provider in &self.providers {
            let outcome = provider.check_3pid(medium, address, password).await;
            if !outcome.is_declined() {
                return outcome;
            }
            debug!(provider = provider.name(), "provider declined third-party login");
        }
        LoginOutcome::Declined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ppauth_core::LocalUserId;

    /// Accepts logins for one fixed username and counts calls.
    struct FixedProvider {
        name: &'static str,
        accepts: &'static str,
        healthy: bool,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn new(name: &'static str, accepts: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                accepts,
                healthy: true,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PluginAdapter for FixedProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 1)
        }

        async fn health_check(&self) -> Result<HealthStatus, PpAuthError> {
            if self.healthy {
                Ok(HealthStatus::Healthy)
            } else {
                Err(PpAuthError::Internal("down".into()))
            }
        }

        async fn shutdown(&self) -> Result<(), PpAuthError> {
            Ok(())
        }
    }

    #[async_trait]
    impl PasswordAuthProvider for FixedProvider {
        async fn check_password(
            &self,
            username: &str,
            _login_type: &str,
            _login_dict: &serde_json::Value,
        ) -> LoginOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if username == self.accepts {
                LoginOutcome::accepted(LocalUserId::new(username, "example.org"))
            } else {
                LoginOutcome::Declined
            }
        }

        async fn check_3pid(&self, _medium: &str, address: &str, _password: &str) -> LoginOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if address == self.accepts {
                LoginOutcome::accepted(LocalUserId::new("mail", "example.org"))
            } else {
                LoginOutcome::Declined
            }
        }
    }

    #[tokio::test]
    async fn first_acceptance_wins() {
        let first = FixedProvider::new("first", "alice");
        let second = FixedProvider::new("second", "bob");
        let chain = ProviderChain::new()
            .with_provider(first.clone())
            .with_provider(second.clone());

        let outcome = chain
            .check_password("bob", "m.login.password", &serde_json::json!({}))
            .await;
        assert_eq!(outcome.user_id().map(LocalUserId::as_str), Some("@bob:example.org"));
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);

        let outcome = chain
            .check_password("alice", "m.login.password", &serde_json::json!({}))
            .await;
        assert!(!outcome.is_declined());
        assert_eq!(second.calls.load(Ordering::SeqCst), 1, "second not consulted");
    }

    #[tokio::test]
    async fn all_declining_declines() {
        let chain = ProviderChain::new().with_provider(FixedProvider::new("only", "alice"));
        assert!(chain.check_3pid("email", "x@y.z", "pw").await.is_declined());
    }

    #[tokio::test]
    async fn empty_chain_declines() {
        let chain = ProviderChain::new();
        assert!(chain.is_empty());
        assert!(
            chain
                .check_password("alice", "m.login.password", &serde_json::json!({}))
                .await
                .is_declined()
        );
    }

    #[tokio::test]
    async fn health_reports_failing_providers() {
        let sick = Arc::new(FixedProvider {
            name: "sick",
            accepts: "",
            healthy: false,
            calls: AtomicUsize::new(0),
        });
        let chain = ProviderChain::new()
            .with_provider(FixedProvider::new("ok", "alice"))
            .with_provider(sick);
        assert_eq!(chain.len(), 2);
        assert_eq!(
            chain.health_check().await.unwrap(),
            HealthStatus::Degraded("unhealthy providers: sick".into())
        );
    }

    #[tokio::test]
    async fn health_is_unhealthy_when_every_provider_fails() {
        let sick = |name| {
            Arc::new(FixedProvider {
                name,
                accepts: "",
                healthy: false,
                calls: AtomicUsize::new(0),
            })
        };
        let chain = ProviderChain::new()
            .with_provider(sick("a"))
            .with_provider(sick("b"));
        assert_eq!(
            chain.health_check().await.unwrap(),
            HealthStatus::Unhealthy("unhealthy providers: a, b".into())
        );
        assert_eq!(
            ProviderChain::new().health_check().await.unwrap(),
            HealthStatus::Healthy
        );
    }
}
