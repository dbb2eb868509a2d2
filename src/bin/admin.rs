//! CLI administration tool for link-registrar.
//!
//! Registers and resolves short links directly against the configured store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL with a generated code
//! cargo run --bin admin -- shorten https://example.com/a/b
//!
//! # Shorten with a custom alias
//! cargo run --bin admin -- shorten https://example.com --alias promo!
//!
//! # Prompt for the alias, rejecting invalid input as it is typed
//! cargo run --bin admin -- shorten https://example.com --interactive
//!
//! # Look up a code
//! cargo run --bin admin -- resolve promo!
//!
//! # Check store connectivity
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`link_registrar::config`]. With the default
//! `memory` backend nothing outlives the command.

use link_registrar::application::services::{RegisterError, Registrar, ResolveError, Resolver};
use link_registrar::config::{self, StoreBackend};
use link_registrar::infrastructure::persistence;
use link_registrar::state::AppState;
use link_registrar::utils::alias_validator::{AliasInput, ensure_not_reserved};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing link-registrar.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Register a short link
    Shorten {
        /// Target URL (must start with http:// or https://)
        url: String,

        /// Custom alias (1-10 chars: letters, digits, !@#$%&*-_?)
        #[arg(short, long, conflicts_with = "interactive")]
        alias: Option<String>,

        /// Prompt for the alias
        #[arg(short, long)]
        interactive: bool,
    },

    /// Show the target URL of a short code
    Resolve {
        /// Short code or alias
        code: String,
    },

    /// Check store connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;
    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "⚠️  STORE_BACKEND=memory: nothing is persisted after this command".yellow()
        );
    }

    let store = persistence::connect(&config)
        .await
        .context("Failed to connect to store")?;
    let state = AppState::new(store, &config.short_url_base, &config.fallback_url);

    match cli.command {
        Commands::Shorten {
            url,
            alias,
            interactive,
        } => {
            let alias = if interactive { prompt_alias()? } else { alias };
            shorten(&state, &state.registrar, &url, alias.as_deref()).await?;
        }
        Commands::Resolve { code } => resolve(&state.resolver, &code).await?,
        Commands::Check => check(&state).await?,
    }

    Ok(())
}

/// Prompts for an alias until the user accepts it.
///
/// Each entry is applied to an [`AliasInput`]; an invalid entry is reported
/// and the previous valid value is offered again as the initial text.
fn prompt_alias() -> Result<Option<String>> {
    let mut input = AliasInput::new();

    loop {
        let entered: String = Input::new()
            .with_prompt("Custom alias (empty for a generated code)")
            .with_initial_text(input.value())
            .allow_empty(true)
            .interact_text()?;

        if let Err(e) = input.edit(entered.trim_end_matches(['\r', '\n'])) {
            println!("{} {}", "✗".red(), e.to_string().red());
            println!("  Keeping '{}'", input.value().cyan());
            continue;
        }

        if let Err(e) = ensure_not_reserved(input.value()) {
            println!("{} {}", "✗".red(), e.to_string().red());
            continue;
        }

        let label = if input.value().is_empty() {
            "a generated code".to_string()
        } else {
            format!("alias '{}'", input.value())
        };

        if Confirm::new()
            .with_prompt(format!("Use {}?", label))
            .default(true)
            .interact()?
        {
            return Ok(input.into_alias());
        }
    }
}

/// Registers `url` and prints the resulting short link.
async fn shorten(
    state: &AppState,
    registrar: &Arc<Registrar>,
    url: &str,
    alias: Option<&str>,
) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    match registrar.register(url, alias).await {
        Ok(mapping) => {
            println!("{}", "✅ Short link created".green().bold());
            println!("  Code:     {}", mapping.code.bright_yellow().bold());
            println!("  Short:    {}", state.short_url(&mapping.code).cyan());
            println!("  Target:   {}", mapping.target_url);
            println!(
                "  Created:  {}",
                mapping.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            Ok(())
        }
        Err(
            e @ (RegisterError::InvalidUrl
            | RegisterError::InvalidAlias(_)
            | RegisterError::AliasTaken),
        ) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            std::process::exit(2);
        }
        Err(e) => Err(anyhow::Error::new(e).context("Registration failed")),
    }
}

/// Prints the target URL for `code`.
async fn resolve(resolver: &Arc<Resolver>, code: &str) -> Result<()> {
    match resolver.resolve(code).await {
        Ok(target_url) => {
            println!("{} {} {}", code.bright_yellow(), "→".bright_black(), target_url);
            Ok(())
        }
        Err(ResolveError::NotFound) => {
            println!("{} '{}' is not registered", "❌".red(), code);
            std::process::exit(1);
        }
        Err(e) => Err(anyhow::Error::new(e).context("Lookup failed")),
    }
}

/// Reports whether the store answers.
async fn check(state: &AppState) -> Result<()> {
    println!("{}", "🔍 Checking store connection...".bright_blue());

    if state.store.health_check().await {
        println!("{}", "✅ Store is reachable".green().bold());
        Ok(())
    } else {
        anyhow::bail!("Store is unreachable")
    }
}
