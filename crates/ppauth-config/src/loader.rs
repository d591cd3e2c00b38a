// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Lookup order: `/etc/ppauth/ppauth.toml`, then `~/.config/ppauth/ppauth.toml`,
//! then `./ppauth.toml`, then `PPAUTH_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PpAuthConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/ppauth/ppauth.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "ppauth.toml";

/// The per-user config file under the XDG config directory.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ppauth").join(LOCAL_CONFIG_FILE))
        .unwrap_or_default()
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Later sources override earlier ones:
/// 1. Compiled defaults
/// 2. `/etc/ppauth/ppauth.toml`
/// 3. `~/.config/ppauth/ppauth.toml`
/// 4. `./ppauth.toml`
/// 5. `PPAUTH_*` environment variables
pub fn load_config() -> Result<PpAuthConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PpAuthConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PpAuthConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PpAuthConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PpAuthConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for the standard hierarchy, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PpAuthConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider mapping `PPAUTH_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `map()` rather than `split("_")` because keys such as
/// `shared_secret` contain underscores themselves. Variables outside the
/// known sections (such as `PPAUTH_PASSWORD`, read by the CLI) are ignored.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("PPAUTH_")
        .filter(|key| key.starts_with("remote_") || key.starts_with("logging_"))
        .map(|key| {
            let mapped = key
                .as_str()
                .to_ascii_lowercase()
                .replacen("remote_", "remote.", 1)
                .replacen("logging_", "logging.", 1);
            mapped.into()
        })
}
