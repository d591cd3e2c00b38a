// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the ppauth bridge.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use std::time::Duration;

use ppauth_core::{PpAuthError, ProviderConfig};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Top-level ppauth configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PpAuthConfig {
    /// Remote login service settings.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote login service configuration.
///
/// `base_url` and `shared_secret` have no defaults; validation rejects a
/// config that leaves either unset.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Base URL of the remote web service, e.g. `https://pixelplanet.fun`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Shared API secret sent as a bearer token. Never serialized.
    #[serde(default, skip_serializing)]
    pub shared_secret: Option<SecretString>,

    /// Transport timeout for a single login check.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            shared_secret: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    /// Converts the loaded settings into the bridge's immutable provider config.
    pub fn provider_config(&self) -> Result<ProviderConfig, PpAuthError> {
        let base_url = self
            .base_url
            .clone()
            .ok_or_else(|| PpAuthError::Config("remote.base_url is not set".to_string()))?;
        let secret = self
            .shared_secret
            .clone()
            .ok_or_else(|| PpAuthError::Config("remote.shared_secret is not set".to_string()))?;

        Ok(ProviderConfig::new(base_url, secret)?
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs)))
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
