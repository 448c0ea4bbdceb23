// ABOUTME: Core database management with schema migration for SQLite
// ABOUTME: Owns the connection pool shared by coaches, users, and sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Database layer
//!
//! A single [`Database`] wraps the `SQLite` pool and applies the schema at
//! startup. Coach operations live on [`coaches::CoachesManager`]; user and
//! session operations are implemented directly on `Database` in their
//! respective submodules.

/// Coach storage and sorted listing
pub mod coaches;
/// Session persistence backing the cookie-carried session store
pub mod sessions;
/// User account storage and lookup
pub mod users;

pub use coaches::{Coach, CoachesManager, SortField, SortOrder};
pub use sessions::Session;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::errors::{AppError, AppResult};

/// Database handle owning the `SQLite` connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and apply the schema
    ///
    /// The database file is created if missing; `sqlite::memory:` works for
    /// tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or the
    /// schema cannot be applied.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL '{database_url}': {e}")))?
            .create_if_missing(true);

        // A pooled in-memory database would open one database per connection,
        // and an idle timeout would drop it along with the schema
        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Access the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply the schema (idempotent)
    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'user',
                created_at TEXT NOT NULL,
                last_active TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create sessions table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS coaches (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 0,
                seasons INTEGER NOT NULL DEFAULT 0,
                regular_season_wins INTEGER NOT NULL DEFAULT 0,
                total_regular_season_games INTEGER NOT NULL DEFAULT 0,
                playoff_berths INTEGER NOT NULL DEFAULT 0,
                playoff_wins INTEGER NOT NULL DEFAULT 0,
                playoff_games INTEGER NOT NULL DEFAULT 0,
                regular_win_percent REAL,
                playoff_win_percent REAL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create coaches table: {e}")))?;

        Ok(())
    }
}
