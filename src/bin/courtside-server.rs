// ABOUTME: Courtside server binary
// ABOUTME: Runs the HTTP server or provisions an admin account from the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Courtside server entry point
//!
//! `courtside-server serve` runs the HTTP server (also the default when no
//! subcommand is given). `courtside-server create-admin` provisions the first
//! administrator account; sign-up only ever creates regular users.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use courtside::{
    config::ServerConfig,
    database::Database,
    models::{User, UserRole},
    server::{self, ServerResources},
};

#[derive(Parser)]
#[command(name = "courtside-server")]
#[command(about = "Courtside - a head coach roster with win-loss records")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Create or promote an administrator account
    CreateAdmin {
        /// Email for the admin account
        #[arg(long)]
        email: String,
        /// Password for the admin account
        #[arg(long)]
        password: String,
        /// Optional display name
        #[arg(long)]
        name: Option<String>,
        /// Overwrite credentials if the account already exists
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env().context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let database = Database::new(&config.database_url)
                .await
                .context("Failed to open database")?;
            let resources = Arc::new(ServerResources::new(database, config));
            server::serve(resources).await?;
        }
        Command::CreateAdmin {
            email,
            password,
            name,
            force,
        } => {
            let database = Database::new(&config.database_url)
                .await
                .context("Failed to open database")?;
            create_admin(&database, &email, &password, name, force).await?;
        }
    }

    Ok(())
}

async fn create_admin(
    database: &Database,
    email: &str,
    password: &str,
    name: Option<String>,
    force: bool,
) -> Result<()> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        bail!("Email must not be empty");
    }
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let password_hash =
        bcrypt::hash(password, bcrypt::DEFAULT_COST).context("Failed to hash password")?;

    if let Some(existing) = database.get_user_by_email(&email).await? {
        if !force {
            bail!("Account {email} already exists; pass --force to overwrite its credentials");
        }
        database
            .update_user_credentials(existing.id, &password_hash, UserRole::Admin)
            .await?;
        info!(user_id = %existing.id, "Existing account promoted to admin");
    } else {
        let mut user = User::new(email.clone(), password_hash, name);
        user.role = UserRole::Admin;
        let user_id = database.create_user(&user).await?;
        info!(%user_id, "Admin account created");
    }

    println!("Admin account ready: {email}");
    Ok(())
}
