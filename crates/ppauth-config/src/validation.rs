// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use secrecy::ExposeSecret;
use url::Url;

use crate::diagnostic::ConfigError;
use crate::model::PpAuthConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &PpAuthConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match config.remote.base_url.as_deref().map(str::trim) {
        None | Some("") => errors.push(ConfigError::MissingKey {
            key: "remote.base_url".to_string(),
        }),
        Some(raw) => match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            Ok(url) => errors.push(ConfigError::Validation {
                message: format!(
                    "remote.base_url `{raw}` must be an http or https URL, got scheme `{}`",
                    url.scheme()
                ),
            }),
            Err(e) => errors.push(ConfigError::Validation {
                message: format!("remote.base_url `{raw}` is not a valid URL: {e}"),
            }),
        },
    }

    if config
        .remote
        .shared_secret
        .as_ref()
        .is_none_or(|secret| secret.expose_secret().trim().is_empty())
    {
        errors.push(ConfigError::MissingKey {
            key: "remote.shared_secret".to_string(),
        });
    }

    if config.remote.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "remote.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
