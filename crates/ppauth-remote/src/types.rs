// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the `checklogin` response.

use std::fmt;

use serde::Deserialize;

/// Body returned by `POST /adminapi/checklogin`.
///
/// Every field is optional on the wire so that a missing `success` flag can
/// be reported as such instead of as a generic parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckLoginResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub userdata: Option<UserData>,
}

/// The remote account on a successful check.
#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    pub id: RemoteId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Remote account ids arrive as either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Number(n) => write!(f, "{n}"),
            RemoteId::Text(s) => f.write_str(s),
        }
    }
}
