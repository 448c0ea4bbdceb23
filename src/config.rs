// ABOUTME: Environment-only server configuration loaded once at startup
// ABOUTME: Supplies the HTTP port, database URL, and session-signing secret
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Server configuration
//!
//! Configuration is environment-only: `HTTP_PORT`, `DATABASE_URL`, and
//! `SESSION_SECRET`. The secret has no default; starting without one fails.

use std::env;

use crate::errors::{AppError, AppResult};

/// Default HTTP port when `HTTP_PORT` is unset
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Default `SQLite` database location when `DATABASE_URL` is unset
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/courtside.db";

/// Runtime configuration for the Courtside server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP listener binds to
    pub http_port: u16,
    /// `SQLite` connection string
    pub database_url: String,
    /// Secret keying the session cookie signature
    pub session_secret: String,
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `SESSION_SECRET` is missing or empty, or if
    /// `HTTP_PORT` is set to something that is not a port number.
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("Invalid HTTP_PORT '{raw}': {e}")))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| AppError::config("SESSION_SECRET must be set"))?;
        if session_secret.trim().is_empty() {
            return Err(AppError::config("SESSION_SECRET must not be empty"));
        }

        Ok(Self {
            http_port,
            database_url,
            session_secret,
        })
    }

    /// Build a configuration directly, bypassing the environment (tests)
    #[must_use]
    pub fn for_testing(database_url: &str, session_secret: &str) -> Self {
        Self {
            http_port: 0,
            database_url: database_url.to_owned(),
            session_secret: session_secret.to_owned(),
        }
    }
}
