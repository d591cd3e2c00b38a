// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiremock helpers standing in for the remote `checklogin` endpoint.

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// Path the bridge posts credential checks to.
pub const CHECKLOGIN_PATH: &str = "/adminapi/checklogin";

/// Shared secret the helpers expect in the `Authorization` header.
pub const TEST_SECRET: &str = "tok";

/// A `POST /adminapi/checklogin` matcher that requires the test bearer token.
pub fn checklogin() -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(CHECKLOGIN_PATH))
        .and(header("authorization", format!("Bearer {TEST_SECRET}").as_str()))
}

/// Body of a successful check.
pub fn success_body(id: Value, name: &str, email: Option<&str>) -> Value {
    json!({
        "success": true,
        "userdata": {"id": id, "name": name, "email": email}
    })
}

/// Body of a refused check.
pub fn failure_body(errors: &[&str]) -> Value {
    json!({"success": false, "errors": errors})
}

/// Mount a remote that accepts any credentials as the given account.
pub async fn mount_success(server: &MockServer, id: Value, name: &str, email: Option<&str>) {
    checklogin()
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(id, name, email)))
        .mount(server)
        .await;
}

/// Mount a remote that refuses every login.
pub async fn mount_failure(server: &MockServer, errors: &[&str]) {
    checklogin()
        .respond_with(ResponseTemplate::new(200).set_body_json(failure_body(errors)))
        .mount(server)
        .await;
}

/// Mount a remote that must never be called.
pub async fn mount_never_called(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
