// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`UserDirectory`] for deterministic tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use ppauth_core::{LocalUserId, PpAuthError, UserDirectory};

/// A registration request the directory received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub localpart: String,
    pub display_name: String,
    pub emails: Vec<String>,
}

/// Host user directory backed by a map.
///
/// Registering an existing localpart fails the way a real host does on a
/// duplicate. Lookups and registrations can be forced to fail, and a
/// concurrent registration can be simulated with [`preempt_next_registration`].
///
/// [`preempt_next_registration`]: MemoryUserDirectory::preempt_next_registration
pub struct MemoryUserDirectory {
    server_name: String,
    users: Mutex<HashMap<LocalUserId, Registration>>,
    registrations: Mutex<Vec<Registration>>,
    lookup_checks: Mutex<Vec<LocalUserId>>,
    fail_lookups: AtomicBool,
    fail_registrations: AtomicBool,
    preempt_registration: AtomicBool,
}

impl MemoryUserDirectory {
    pub fn new(server_name: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            users: Mutex::new(HashMap::new()),
            registrations: Mutex::new(Vec::new()),
            lookup_checks: Mutex::new(Vec::new()),
            fail_lookups: AtomicBool::new(false),
            fail_registrations: AtomicBool::new(false),
            preempt_registration: AtomicBool::new(false),
        }
    }

    /// Seeds an existing account without recording a registration call.
    pub async fn insert_user(&self, localpart: &str, display_name: &str) -> LocalUserId {
        let user_id = self.qualified_user_id(localpart);
        self.users.lock().await.insert(
            user_id.clone(),
            Registration {
                localpart: localpart.to_string(),
                display_name: display_name.to_string(),
                emails: Vec::new(),
            },
        );
        user_id
    }

    /// Makes every `check_user_exists` call fail.
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Makes every `register_user` call fail.
    pub fn fail_registrations(&self, fail: bool) {
        self.fail_registrations.store(fail, Ordering::SeqCst);
    }

    /// The next registration finds its localpart taken by a concurrent login.
    pub fn preempt_next_registration(&self) {
        self.preempt_registration.store(true, Ordering::SeqCst);
    }

    /// Account data for an existing user.
    pub async fn user(&self, user_id: &LocalUserId) -> Option<Registration> {
        self.users.lock().await.get(user_id).cloned()
    }

    pub async fn user_count(&self) -> usize {
        self.users.lock().await.len()
    }

    /// Every registration attempt, successful or not, in call order.
    pub async fn registrations(&self) -> Vec<Registration> {
        self.registrations.lock().await.clone()
    }

    /// Every id passed to `check_user_exists`, in call order.
    pub async fn lookups(&self) -> Vec<LocalUserId> {
        self.lookup_checks.lock().await.clone()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    fn server_name(&self) -> &str {
        &self.server_name
    }

    async fn check_user_exists(&self, user_id: &LocalUserId) -> Result<bool, PpAuthError> {
        self.lookup_checks.lock().await.push(user_id.clone());
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(PpAuthError::Directory {
                message: "user store unavailable".to_string(),
                source: None,
            });
        }
        Ok(self.users.lock().await.contains_key(user_id))
    }

    async fn register_user(
        &self,
        localpart: &str,
        display_name: &str,
        emails: &[String],
    ) -> Result<LocalUserId, PpAuthError> {
        let registration = Registration {
            localpart: localpart.to_string(),
            display_name: display_name.to_string(),
            emails: emails.to_vec(),
        };
        self.registrations.lock().await.push(registration.clone());

        if self.fail_registrations.load(Ordering::SeqCst) {
            return Err(PpAuthError::Registration {
                localpart: localpart.to_string(),
                message: "registration disabled".to_string(),
            });
        }

        let user_id = self.qualified_user_id(localpart);
        let mut users = self.users.lock().await;

        if self.preempt_registration.swap(false, Ordering::SeqCst) {
            tracing::debug!(%user_id, "simulating concurrent registration");
            users.insert(user_id.clone(), registration.clone());
        }

        if users.contains_key(&user_id) {
            return Err(PpAuthError::Registration {
                localpart: localpart.to_string(),
                message: "user id already taken".to_string(),
            });
        }

        users.insert(user_id.clone(), registration);
        Ok(user_id)
    }
}
