// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ppauth - operator tooling for the remote login bridge.

mod verify;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ppauth_config::PpAuthConfig;
use ppauth_remote::RemoteVerifier;

/// ppauth - delegate chat server logins to a remote web service.
#[derive(Parser, Debug)]
#[command(name = "ppauth", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration and print the effective remote endpoint.
    Config,
    /// Check credentials against the remote service without provisioning.
    Verify(verify::VerifyArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => ppauth_config::load_and_validate_path(path),
        None => ppauth_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            ppauth_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging.level);

    match cli.command {
        Commands::Config => show_config(&config),
        Commands::Verify(args) => verify::run(&config, args).await,
    }
}

fn show_config(config: &PpAuthConfig) -> ExitCode {
    let verifier = config
        .remote
        .provider_config()
        .and_then(|provider| RemoteVerifier::new(&provider));

    match verifier {
        Ok(verifier) => {
            println!("endpoint: {}", verifier.endpoint());
            println!("timeout:  {}s", config.remote.request_timeout_secs);
            println!("secret:   [redacted]");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ppauth: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ppauth={log_level},ppauth_bridge={log_level},ppauth_remote={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
