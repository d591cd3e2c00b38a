// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote verifier for the `checklogin` admin endpoint.
//!
//! [`RemoteVerifier`] posts a [`LoginQuery`] to `{base}/adminapi/checklogin`
//! with the shared secret as a bearer token and turns a successful answer
//! into a [`RemoteIdentity`]. There is no retry; the only timeout is the
//! transport's own.

pub mod redact;
pub mod types;

pub use redact::redact;

use ppauth_core::{IdentitySelector, LoginQuery, PpAuthError, ProviderConfig, RemoteIdentity};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use url::Url;

use crate::types::CheckLoginResponse;

/// Path of the credential check endpoint, relative to the remote base URL.
pub const CHECKLOGIN_PATH: &str = "/adminapi/checklogin";

/// HTTP client for the remote login service.
#[derive(Debug)]
pub struct RemoteVerifier {
    client: reqwest::Client,
    endpoint: Url,
    shared_secret: SecretString,
}

impl RemoteVerifier {
    /// Builds the verifier and its HTTP client from the provider config.
    pub fn new(config: &ProviderConfig) -> Result<Self, PpAuthError> {
        let endpoint = checklogin_url(config.remote_base_url())?;
        let secret = config.shared_secret().expose_secret();

        let mut auth = HeaderValue::from_str(&format!("Bearer {secret}")).map_err(|e| {
            PpAuthError::Config(format!("shared secret is not a valid header value: {e}"))
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PpAuthError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            shared_secret: SecretString::from(secret.to_owned()),
        })
    }

    /// The full `checklogin` URL this verifier posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Checks credentials, logging any failure and returning `None` for it.
    ///
    /// Transport errors, malformed bodies and rejected credentials all end up
    /// here as `None`; the cause only reaches the log.
    pub async fn verify(&self, query: &LoginQuery) -> Option<RemoteIdentity> {
        match self.check_credentials(query).await {
            Ok(identity) => Some(identity),
            Err(e) => {
                let cause = redact(&e.to_string(), &[self.shared_secret.expose_secret()]);
                warn!(selector = selector_kind(&query.selector), %cause, "could not log in via remote service");
                None
            }
        }
    }

    /// Posts the query and interprets the response.
    pub async fn check_credentials(
        &self,
        query: &LoginQuery,
    ) -> Result<RemoteIdentity, PpAuthError> {
        debug!(
            endpoint = %self.endpoint,
            selector = selector_kind(&query.selector),
            "checking credentials against remote service"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                PpAuthError::Remote {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| PpAuthError::Remote {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(status = %status, "checklogin response received");

        let parsed: CheckLoginResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => {
                return Err(PpAuthError::MalformedResponse {
                    message: format!("response is not valid checklogin JSON: {e}"),
                    source: Some(Box::new(e)),
                });
            }
            Err(_) => {
                return Err(PpAuthError::Remote {
                    message: format!("remote returned {status}"),
                    source: None,
                });
            }
        };

        // A non-2xx answer never authenticates, whatever its body claims.
        if !status.is_success() {
            let reason = parsed
                .errors
                .into_iter()
                .next()
                .unwrap_or_else(|| format!("remote returned {status}"));
            return Err(PpAuthError::Rejected { reason });
        }

        interpret(parsed)
    }
}

/// Turn a parsed response into an identity or a typed failure.
fn interpret(response: CheckLoginResponse) -> Result<RemoteIdentity, PpAuthError> {
    match response.success {
        Some(true) => {}
        Some(false) => {
            let reason = response
                .errors
                .into_iter()
                .next()
                .unwrap_or_else(|| "no reason given".to_string());
            return Err(PpAuthError::Rejected { reason });
        }
        None => {
            return Err(PpAuthError::MalformedResponse {
                message: "missing `success` flag".to_string(),
                source: None,
            });
        }
    }

    let userdata = response
        .userdata
        .ok_or_else(|| PpAuthError::MalformedResponse {
            message: "success without `userdata`".to_string(),
            source: None,
        })?;

    let remote_id = userdata.id.to_string();
    if remote_id.is_empty() {
        return Err(PpAuthError::MalformedResponse {
            message: "empty `userdata.id`".to_string(),
            source: None,
        });
    }

    Ok(RemoteIdentity {
        remote_id,
        remote_name: userdata.name,
        remote_email: userdata.email.filter(|email| !email.is_empty()),
    })
}

fn checklogin_url(base: &str) -> Result<Url, PpAuthError> {
    let joined = format!("{}{CHECKLOGIN_PATH}", base.trim_end_matches('/'));
    Url::parse(&joined)
        .map_err(|e| PpAuthError::Config(format!("invalid remote base URL `{base}`: {e}")))
}

fn selector_kind(selector: &IdentitySelector) -> &'static str {
    match selector {
        IdentitySelector::ByRemoteId(_) => "id",
        IdentitySelector::ByName(_) => "name",
        IdentitySelector::ByEmail(_) => "email",
    }
}
