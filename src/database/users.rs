// ABOUTME: User account database operations
// ABOUTME: Handles user creation, lookup by id/email, and role updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use super::{coaches::parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserRole};

impl Database {
    /// Create a user
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the email is already registered, or a
    /// database error if the operation fails.
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(AppError::invalid_input("Email already in use"));
        }

        sqlx::query(
            r"
            INSERT INTO users (id, email, display_name, password_hash, role, created_at, last_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at.to_rfc3339())
        .bind(user.last_active.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        Ok(user.id)
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.get_user_by_field("id", &user_id.to_string()).await
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get_user_by_field("email", email).await
    }

    /// Overwrite a user's password hash and role (admin promotion)
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn update_user_credentials(
        &self,
        user_id: Uuid,
        password_hash: &str,
        role: UserRole,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            UPDATE users SET password_hash = $2, role = $3, last_active = $4
            WHERE id = $1
            ",
        )
        .bind(user_id.to_string())
        .bind(password_hash)
        .bind(role.as_str())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to update user: {e}")))?;

        Ok(())
    }

    async fn get_user_by_field(&self, field: &str, value: &str) -> AppResult<Option<User>> {
        // field is a compile-time constant from the two callers above
        let query = format!(
            "SELECT id, email, display_name, password_hash, role, created_at, last_active \
             FROM users WHERE {field} = $1"
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id_str: String = row
        .try_get("id")
        .map_err(|e| AppError::database(format!("Failed to read user id: {e}")))?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| AppError::database(format!("Invalid user id '{id_str}': {e}")))?;

    let role_str: String = row
        .try_get("role")
        .map_err(|e| AppError::database(format!("Failed to read user role: {e}")))?;

    Ok(User {
        id,
        email: row
            .try_get("email")
            .map_err(|e| AppError::database(format!("Failed to read user email: {e}")))?,
        display_name: row
            .try_get("display_name")
            .map_err(|e| AppError::database(format!("Failed to read display name: {e}")))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| AppError::database(format!("Failed to read password hash: {e}")))?,
        role: UserRole::parse(&role_str),
        created_at: parse_timestamp(row, "created_at")?,
        last_active: parse_timestamp(row, "last_active")?,
    })
}
