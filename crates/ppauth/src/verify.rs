// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ppauth verify`: dry-run a credential check against the remote service.
//!
//! Runs the query builder and remote verifier only. Nothing is registered.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::{ArgGroup, Args};
use ppauth_bridge::query;
use ppauth_config::PpAuthConfig;
use ppauth_core::types::MEDIUM_EMAIL;
use ppauth_core::{LocalUserId, LoginQuery, PpAuthError};
use ppauth_remote::{RemoteVerifier, redact};
use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the password for non-interactive use.
pub const PASSWORD_ENV_VAR: &str = "PPAUTH_PASSWORD";

/// Exit code when the remote declines the credentials.
const EXIT_DECLINED: u8 = 2;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("identifier").required(true).args(["username", "email"])))]
pub struct VerifyArgs {
    /// Username, `pp_<id>` localpart, or `@pp_<id>:<server>` user id.
    #[arg(long)]
    username: Option<String>,

    /// Email address of the remote account.
    #[arg(long)]
    email: Option<String>,

    /// Local server name, used to recognise qualified ids and print the local user id.
    #[arg(long)]
    server_name: Option<String>,
}

pub async fn run(config: &PpAuthConfig, args: VerifyArgs) -> ExitCode {
    let verifier = match config
        .remote
        .provider_config()
        .and_then(|provider| RemoteVerifier::new(&provider))
    {
        Ok(verifier) => verifier,
        Err(e) => {
            eprintln!("ppauth: {e}");
            return ExitCode::FAILURE;
        }
    };

    let password = match read_password() {
        Ok(password) => password,
        Err(e) => {
            eprintln!("ppauth: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(endpoint = %verifier.endpoint(), "running dry-run credential check");

    let Some(query) = build_query(&args, password.expose_secret()) else {
        println!("declined: identifier not handled by this provider");
        return ExitCode::from(EXIT_DECLINED);
    };

    match verifier.check_credentials(&query).await {
        Ok(identity) => {
            println!("remote id:   {}", identity.remote_id);
            println!("remote name: {}", identity.remote_name);
            if let Some(email) = &identity.remote_email {
                println!("email:       {email}");
            }
            match args.server_name.as_deref() {
                Some(server) => println!(
                    "local user:  {}",
                    LocalUserId::new(&identity.localpart(), server)
                ),
                None => println!("localpart:   {}", identity.localpart()),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let secret = config
                .remote
                .shared_secret
                .as_ref()
                .map(|secret| secret.expose_secret())
                .unwrap_or_default();
            println!("declined: {}", redact(&e.to_string(), &[secret]));
            ExitCode::from(EXIT_DECLINED)
        }
    }
}

fn build_query(args: &VerifyArgs, password: &str) -> Option<LoginQuery> {
    match (&args.username, &args.email) {
        (Some(username), _) => Some(query::password_login(
            username,
            password,
            args.server_name.as_deref().unwrap_or_default(),
        )),
        (None, Some(email)) => query::third_party_login(MEDIUM_EMAIL, email, password),
        (None, None) => None,
    }
}

/// Password from `PPAUTH_PASSWORD`, else an interactive prompt.
fn read_password() -> Result<SecretString, PpAuthError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR) {
        return Ok(SecretString::from(password));
    }

    if std::io::stdin().is_terminal() {
        let password = rpassword::prompt_password("Password: ")
            .map_err(|e| PpAuthError::Internal(format!("failed to read password: {e}")))?;
        return Ok(SecretString::from(password));
    }

    Err(PpAuthError::Config(format!(
        "no password provided; set {PASSWORD_ENV_VAR} or run interactively"
    )))
}
