// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end login tests: host callbacks through the bridge to a mocked
//! remote service and an in-memory user directory.

use std::sync::Arc;

use ppauth_bridge::{AuthBridge, ProviderChain};
use ppauth_core::types::LOGIN_TYPE_PASSWORD;
use ppauth_core::{LoginOutcome, PasswordAuthProvider, ProviderConfig};
use ppauth_test_utils::mock_remote::{self, TEST_SECRET};
use ppauth_test_utils::{MemoryUserDirectory, Registration};
use secrecy::SecretString;
use serde_json::json;
use tracing_test::traced_test;
use wiremock::matchers::body_json;
use wiremock::{MockServer, ResponseTemplate};

const SERVER_NAME: &str = "example.org";

struct Harness {
    server: MockServer,
    directory: Arc<MemoryUserDirectory>,
    bridge: AuthBridge,
}

impl Harness {
    async fn start() -> Self {
        let server = MockServer::start().await;
        let directory = Arc::new(MemoryUserDirectory::new(SERVER_NAME));
        let config =
            ProviderConfig::new(server.uri(), SecretString::from(TEST_SECRET.to_string()))
                .expect("valid provider config");
        let bridge = AuthBridge::new(&config, directory.clone()).expect("bridge builds");
        Self {
            server,
            directory,
            bridge,
        }
    }

    async fn password_login(&self, username: &str, password: &str) -> LoginOutcome {
        self.bridge
            .check_password(username, LOGIN_TYPE_PASSWORD, &json!({ "password": password }))
            .await
    }
}

// ---- Name login provisions a local account ----

#[tokio::test]
async fn name_login_registers_and_returns_qualified_id() {
    let h = Harness::start().await;

    mock_remote::checklogin()
        .and(body_json(json!({"name": "alice", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_remote::success_body(
            json!(42),
            "alice",
            Some("a@x.com"),
        )))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h.password_login("alice", "hunter2").await;
    let auth = outcome.into_authenticated().expect("login accepted");

    assert_eq!(auth.user_id.as_str(), "@pp_42:example.org");
    assert!(auth.post_login.is_none());
    assert_eq!(
        h.directory.registrations().await,
        vec![Registration {
            localpart: "pp_42".into(),
            display_name: "alice".into(),
            emails: vec!["a@x.com".into()],
        }]
    );
}

// ---- Repeated logins are idempotent ----

#[tokio::test]
async fn repeated_login_maps_to_same_account() {
    let h = Harness::start().await;
    mock_remote::mount_success(&h.server, json!(42), "alice", None).await;

    let first = h.password_login("alice", "hunter2").await;
    let second = h.password_login("pp_42", "hunter2").await;

    assert_eq!(first.user_id(), second.user_id());
    assert!(first.user_id().is_some());
    assert_eq!(h.directory.registrations().await.len(), 1);
    assert_eq!(h.directory.user_count().await, 1);
}

// ---- Id selectors ----

#[tokio::test]
async fn qualified_id_login_sends_id_selector() {
    let h = Harness::start().await;

    mock_remote::checklogin()
        .and(body_json(json!({"id": "123", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_remote::success_body(
            json!(123),
            "carol",
            None,
        )))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h.password_login("@pp_123:example.org", "pw").await;
    assert_eq!(
        outcome.user_id().map(|id| id.as_str()),
        Some("@pp_123:example.org")
    );
}

#[tokio::test]
async fn existing_account_logs_in_without_registration() {
    let h = Harness::start().await;
    h.directory.insert_user("pp_5", "dave").await;
    mock_remote::mount_success(&h.server, json!("5"), "dave", Some("d@x.com")).await;

    let outcome = h.password_login("pp_5", "pw").await;
    assert_eq!(outcome.user_id().map(|id| id.as_str()), Some("@pp_5:example.org"));
    assert!(h.directory.registrations().await.is_empty());
}

// ---- Remote refusals decline ----

#[tokio::test]
#[traced_test]
async fn remote_failure_declines_regardless_of_errors() {
    for errors in [vec![], vec!["Incorrect password!"], vec!["a", "b"]] {
        let h = Harness::start().await;
        mock_remote::mount_failure(&h.server, &errors).await;

        let outcome = h.password_login("alice", "wrong").await;
        assert!(outcome.is_declined());
        assert_eq!(h.directory.user_count().await, 0);
    }
    assert!(logs_contain("could not log in via remote service"));
}

#[tokio::test]
async fn malformed_remote_response_declines() {
    let h = Harness::start().await;
    mock_remote::checklogin()
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&h.server)
        .await;

    assert!(h.password_login("alice", "pw").await.is_declined());
}

#[tokio::test]
async fn error_status_declines_even_with_accepting_body() {
    let h = Harness::start().await;
    mock_remote::checklogin()
        .respond_with(ResponseTemplate::new(500).set_body_json(mock_remote::success_body(
            json!(42),
            "alice",
            Some("a@x.com"),
        )))
        .mount(&h.server)
        .await;

    assert!(h.password_login("alice", "hunter2").await.is_declined());
    assert!(h.directory.lookups().await.is_empty());
    assert!(h.directory.registrations().await.is_empty());
}

#[tokio::test]
async fn transport_error_declines_without_panicking() {
    let directory = Arc::new(MemoryUserDirectory::new(SERVER_NAME));
    let config = ProviderConfig::new(
        "http://127.0.0.1:9",
        SecretString::from(TEST_SECRET.to_string()),
    )
    .unwrap();
    let bridge = AuthBridge::new(&config, directory.clone()).unwrap();

    let outcome = bridge
        .check_password("alice", LOGIN_TYPE_PASSWORD, &json!({"password": "pw"}))
        .await;
    assert!(outcome.is_declined());
    assert!(directory.lookups().await.is_empty());
}

// ---- Local provisioning failures decline ----

#[tokio::test]
#[traced_test]
async fn registration_failure_declines_after_remote_success() {
    let h = Harness::start().await;
    mock_remote::mount_success(&h.server, json!(42), "alice", None).await;
    h.directory.fail_registrations(true);

    assert!(h.password_login("alice", "hunter2").await.is_declined());
    assert!(logs_contain("could not resolve local account"));
    assert!(logs_contain("@pp_42:example.org"));
}

#[tokio::test]
async fn registration_race_declines_loser_and_keeps_one_account() {
    let h = Harness::start().await;
    mock_remote::mount_success(&h.server, json!(42), "alice", None).await;
    h.directory.preempt_next_registration();

    assert!(h.password_login("alice", "hunter2").await.is_declined());
    assert_eq!(h.directory.user_count().await, 1);

    // The account the winner created is picked up on the next attempt.
    let retry = h.password_login("alice", "hunter2").await;
    assert_eq!(retry.user_id().map(|id| id.as_str()), Some("@pp_42:example.org"));
}

#[tokio::test]
async fn directory_lookup_failure_declines() {
    let h = Harness::start().await;
    mock_remote::mount_success(&h.server, json!(42), "alice", None).await;
    h.directory.fail_lookups(true);

    assert!(h.password_login("alice", "hunter2").await.is_declined());
    assert!(h.directory.registrations().await.is_empty());
}

// ---- Third-party logins ----

#[tokio::test]
async fn email_login_sends_email_selector() {
    let h = Harness::start().await;
    mock_remote::checklogin()
        .and(body_json(json!({"email": "a@x.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_remote::success_body(
            json!(42),
            "alice",
            Some("a@x.com"),
        )))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h.bridge.check_3pid("email", "a@x.com", "pw").await;
    assert_eq!(outcome.user_id().map(|id| id.as_str()), Some("@pp_42:example.org"));
}

#[tokio::test]
async fn non_email_medium_declines_without_remote_call() {
    let h = Harness::start().await;
    mock_remote::mount_never_called(&h.server).await;

    for medium in ["msisdn", "phone", ""] {
        assert!(h.bridge.check_3pid(medium, "15551234567", "pw").await.is_declined());
    }
    // MockServer verifies `expect(0)` on drop.
}

#[tokio::test]
async fn non_password_login_type_declines_without_remote_call() {
    let h = Harness::start().await;
    mock_remote::mount_never_called(&h.server).await;

    let outcome = h
        .bridge
        .check_password("alice", "m.login.token", &json!({"password": "pw"}))
        .await;
    assert!(outcome.is_declined());
}

// ---- Chained with other providers ----

#[tokio::test]
async fn chain_falls_through_declining_bridge() {
    let h = Harness::start().await;
    mock_remote::mount_failure(&h.server, &["nope"]).await;

    let bridge: Arc<dyn PasswordAuthProvider> = Arc::new(h.bridge);
    let chain = ProviderChain::new().with_provider(bridge);

    let outcome = chain
        .check_password("alice", LOGIN_TYPE_PASSWORD, &json!({"password": "pw"}))
        .await;
    assert!(outcome.is_declined());
}
