// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query builder: turns a login identifier and password into a [`LoginQuery`].

use ppauth_core::types::{LOCALPART_PREFIX, MEDIUM_EMAIL};
use ppauth_core::{IdentitySelector, LoginQuery};

/// Picks the remote selector for a password-login username.
///
/// - `@pp_<id>:<server_name>` selects by remote id.
/// - `pp_<id>` (optionally followed by `:<anything>`) selects by remote id.
/// - Anything else, including ids for other servers, selects by name with
///   the identifier unchanged.
pub fn parse_username(username: &str, server_name: &str) -> IdentitySelector {
    if let Some(rest) = username.strip_prefix('@') {
        let embedded = rest
            .strip_prefix(LOCALPART_PREFIX)
            .and_then(|rest| rest.split_once(':'))
            .filter(|(id, domain)| !id.is_empty() && *domain == server_name);
        return match embedded {
            Some((id, _)) => IdentitySelector::ByRemoteId(id.to_string()),
            None => IdentitySelector::ByName(username.to_string()),
        };
    }

    match username.strip_prefix(LOCALPART_PREFIX) {
        Some(rest) => {
            let id = rest.split_once(':').map_or(rest, |(id, _)| id);
            if id.is_empty() {
                IdentitySelector::ByName(username.to_string())
            } else {
                IdentitySelector::ByRemoteId(id.to_string())
            }
        }
        None => IdentitySelector::ByName(username.to_string()),
    }
}

/// Builds the query for a password login. The password is forwarded as-is.
pub fn password_login(username: &str, password: &str, server_name: &str) -> LoginQuery {
    LoginQuery::new(parse_username(username, server_name), password)
}

/// Builds the query for a third-party-identifier login.
///
/// Only non-empty `email` addresses are handled; anything else returns
/// `None` and the login is declined without contacting the remote.
pub fn third_party_login(medium: &str, address: &str, password: &str) -> Option<LoginQuery> {
    if medium != MEDIUM_EMAIL || address.is_empty() {
        return None;
    }
    Some(LoginQuery::new(
        IdentitySelector::ByEmail(address.to_string()),
        password,
    ))
}
