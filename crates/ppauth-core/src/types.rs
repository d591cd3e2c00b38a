// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login types shared by the query builder, remote verifier, and identity resolver.

use std::fmt;
use std::time::Duration;

use futures::future::BoxFuture;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::error::PpAuthError;

/// Localpart prefix marking accounts provisioned from the remote service.
pub const LOCALPART_PREFIX: &str = "pp_";

/// The only login type the password checker handles.
pub const LOGIN_TYPE_PASSWORD: &str = "m.login.password";

/// The only third-party medium the 3pid checker handles.
pub const MEDIUM_EMAIL: &str = "email";

/// Default transport timeout for the remote login call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Immutable settings for talking to the remote login service.
///
/// Both the base URL and the shared secret must be non-empty.
#[derive(Debug)]
pub struct ProviderConfig {
    remote_base_url: String,
    shared_secret: SecretString,
    request_timeout: Duration,
}

impl ProviderConfig {
    /// Builds a provider config, failing if either setting is empty.
    pub fn new(
        remote_base_url: impl Into<String>,
        shared_secret: SecretString,
    ) -> Result<Self, PpAuthError> {
        let remote_base_url = remote_base_url.into();
        if remote_base_url.trim().is_empty() {
            return Err(PpAuthError::Config(
                "remote base URL not configured".to_string(),
            ));
        }
        if shared_secret.expose_secret().trim().is_empty() {
            return Err(PpAuthError::Config(
                "remote shared secret not configured".to_string(),
            ));
        }
        Ok(Self {
            remote_base_url,
            shared_secret,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Overrides the transport timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn remote_base_url(&self) -> &str {
        &self.remote_base_url
    }

    pub fn shared_secret(&self) -> &SecretString {
        &self.shared_secret
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Which remote account a login attempt targets.
///
/// Serialized as a single JSON key (`id`, `name`, or `email`) so that a
/// [`LoginQuery`] always carries exactly one selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IdentitySelector {
    /// Remote account id embedded in a `pp_<id>` localpart.
    #[serde(rename = "id")]
    ByRemoteId(String),
    /// Remote username.
    #[serde(rename = "name")]
    ByName(String),
    /// Remote account email (third-party login).
    #[serde(rename = "email")]
    ByEmail(String),
}

/// Payload sent to the remote `checklogin` endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginQuery {
    #[serde(flatten)]
    pub selector: IdentitySelector,
    pub password: String,
}

impl LoginQuery {
    pub fn new(selector: IdentitySelector, password: impl Into<String>) -> Self {
        Self {
            selector,
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginQuery")
            .field("selector", &self.selector)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Account data returned by a successful remote login check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIdentity {
    pub remote_id: String,
    pub remote_name: String,
    pub remote_email: Option<String>,
}

impl RemoteIdentity {
    /// The local localpart this remote account maps to (`pp_<remote_id>`).
    pub fn localpart(&self) -> String {
        format!("{LOCALPART_PREFIX}{}", self.remote_id)
    }

    /// Emails to attach on registration: the remote email if non-empty.
    pub fn registration_emails(&self) -> Vec<String> {
        self.remote_email
            .iter()
            .filter(|email| !email.is_empty())
            .cloned()
            .collect()
    }
}

/// Fully qualified local account id, `@localpart:server_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocalUserId(String);

impl LocalUserId {
    pub fn new(localpart: &str, server_name: &str) -> Self {
        Self(format!("@{localpart}:{server_name}"))
    }

    /// Wraps an id the host has already qualified.
    pub fn from_qualified(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The localpart, if the id has the `@localpart:server` shape.
    pub fn localpart(&self) -> Option<&str> {
        self.0
            .strip_prefix('@')
            .and_then(|rest| rest.split_once(':'))
            .map(|(localpart, _)| localpart)
    }
}

impl fmt::Display for LocalUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response handed to a post-login hook once the host has created a session.
#[derive(Debug)]
pub struct LoginResponse {
    pub user_id: LocalUserId,
    pub device_id: String,
    pub access_token: SecretString,
}

/// Callback the host runs after a successful login.
pub type PostLoginHook = Box<dyn FnOnce(LoginResponse) -> BoxFuture<'static, ()> + Send + Sync>;

/// A login the provider accepted.
pub struct Authenticated {
    pub user_id: LocalUserId,
    pub post_login: Option<PostLoginHook>,
}

impl fmt::Debug for Authenticated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticated")
            .field("user_id", &self.user_id)
            .field("post_login", &self.post_login.is_some())
            .finish()
    }
}

/// Result of asking a provider to authenticate a login attempt.
///
/// `Declined` carries no reason. The host should try the next provider or
/// report a generic authentication failure.
#[derive(Debug)]
pub enum LoginOutcome {
    Accepted(Authenticated),
    Declined,
}

impl LoginOutcome {
    pub fn accepted(user_id: LocalUserId) -> Self {
        Self::Accepted(Authenticated {
            user_id,
            post_login: None,
        })
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }

    pub fn user_id(&self) -> Option<&LocalUserId> {
        match self {
            Self::Accepted(auth) => Some(&auth.user_id),
            Self::Declined => None,
        }
    }

    pub fn into_authenticated(self) -> Option<Authenticated> {
        match self {
            Self::Accepted(auth) => Some(auth),
            Self::Declined => None,
        }
    }
}
