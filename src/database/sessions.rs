// ABOUTME: Session persistence backing the cookie-carried session store
// ABOUTME: Sessions live in the database and survive process restarts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

use chrono::{DateTime, Duration, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use super::{coaches::parse_timestamp, Database};
use crate::errors::{AppError, AppResult};

/// Session lifetime: 30 days
pub const SESSION_TTL_DAYS: i64 = 30;

/// A persisted session row
#[derive(Debug, Clone)]
pub struct Session {
    /// Session identifier carried (signed) in the cookie
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Expiry; sessions past this resolve to anonymous
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether this session is still valid
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

impl Database {
    /// Create a session for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_session(&self, user_id: Uuid) -> AppResult<Session> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        };

        sqlx::query(
            r"
            INSERT INTO sessions (id, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(session.created_at.to_rfc3339())
        .bind(session.expires_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create session: {e}")))?;

        Ok(session)
    }

    /// Look up a session by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_session(&self, session_id: Uuid) -> AppResult<Option<Session>> {
        let row = sqlx::query(
            "SELECT id, user_id, created_at, expires_at FROM sessions WHERE id = $1",
        )
        .bind(session_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get session: {e}")))?;

        row.map(|r| row_to_session(&r)).transpose()
    }

    /// Delete a session (sign-out)
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete_session(&self, session_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to delete session: {e}")))?;

        Ok(())
    }
}

fn row_to_session(row: &SqliteRow) -> AppResult<Session> {
    let id_str: String = row
        .try_get("id")
        .map_err(|e| AppError::database(format!("Failed to read session id: {e}")))?;
    let user_id_str: String = row
        .try_get("user_id")
        .map_err(|e| AppError::database(format!("Failed to read session user: {e}")))?;

    Ok(Session {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::database(format!("Invalid session id '{id_str}': {e}")))?,
        user_id: Uuid::parse_str(&user_id_str)
            .map_err(|e| AppError::database(format!("Invalid session user '{user_id_str}': {e}")))?,
        created_at: parse_timestamp(row, "created_at")?,
        expires_at: parse_timestamp(row, "expires_at")?,
    })
}
