mod commands;
mod config;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common_auth::{KeyManager, TokenService};
use common_identity::IdentityDocumentParser;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, CliConfig};

#[derive(Parser, Debug)]
#[command(about = "Issue and verify access tokens, evaluate permissions, check national IDs", long_about = None)]
struct Options {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load or generate the signing key pair and report where it lives
    Keys,
    /// Issue a signed token
    Issue {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        email: String,
        /// admin, homeowner or worker
        #[arg(long)]
        role: String,
        /// Lifetime in seconds (defaults to the configured access lifetime)
        #[arg(long, allow_negative_numbers = true)]
        ttl: Option<i64>,
        /// Issue a refresh token (30 day lifetime by default)
        #[arg(long, conflicts_with = "ttl")]
        refresh: bool,
    },
    /// Verify signature and expiry of a token
    Verify { token: String },
    /// Print a token's claims WITHOUT verifying it
    Decode { token: String },
    /// Evaluate a single (resource, action) permission for a role
    Check {
        role: String,
        resource: String,
        action: String,
    },
    /// Check whether a role may open a route
    Route { role: String, route: String },
    /// List a role's grants and routes
    Permissions {
        role: String,
        /// Also report the informational rank comparison against this role
        #[arg(long)]
        compare_to: Option<String>,
    },
    /// Validate and decompose a national ID number
    ParseId { id: String },
    /// Space-separate the fields of a national ID number
    FormatId { id: String },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let opts = Options::parse();
    let config = load_config()?;
    debug!(key_dir = %config.keys.key_dir.display(), persist = config.keys.persist, "configuration loaded");

    let (report, success) = run(opts.command, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run(command: Command, config: &CliConfig) -> Result<(Value, bool)> {
    let outcome = match command {
        Command::Keys => {
            let keys = init_keys(config)?;
            (commands::keys_report(&keys, &config.keys), true)
        }
        Command::Issue {
            user_id,
            email,
            role,
            ttl,
            refresh,
        } => {
            let subject = commands::token_subject(&user_id, &email, &role)?;
            let tokens = TokenService::with_config(Arc::new(init_keys(config)?), config.tokens);
            (commands::issue(&tokens, &subject, ttl, refresh)?, true)
        }
        Command::Verify { token } => {
            let tokens = TokenService::with_config(Arc::new(init_keys(config)?), config.tokens);
            commands::verify(&tokens, &token)
        }
        Command::Decode { token } => (commands::decode(&token), true),
        Command::Check {
            role,
            resource,
            action,
        } => {
            let report = commands::check(&role, &resource, &action);
            let allowed = report["allowed"].as_bool().unwrap_or(false);
            (report, allowed)
        }
        Command::Route { role, route } => {
            let report = commands::route(&role, &route);
            let allowed = report["allowed"].as_bool().unwrap_or(false);
            (report, allowed)
        }
        Command::Permissions { role, compare_to } => {
            (commands::permissions(&role, compare_to.as_deref()), true)
        }
        Command::ParseId { id } => commands::parse_id(&IdentityDocumentParser::new(), &id),
        Command::FormatId { id } => (commands::format_id(&id), true),
    };
    Ok(outcome)
}

fn init_keys(config: &CliConfig) -> Result<KeyManager> {
    KeyManager::initialize(&config.keys).context("Failed to initialize signing keys")
}
