// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for ppauth integration tests.
//!
//! - [`MemoryUserDirectory`] - in-memory host user directory with failure injection
//! - [`mock_remote`] - wiremock responders for the `checklogin` endpoint

pub mod memory_directory;
pub mod mock_remote;

pub use memory_directory::{MemoryUserDirectory, Registration};
