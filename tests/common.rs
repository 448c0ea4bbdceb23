// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, server resource, user, and session helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use courtside::{
    auth::build_session_cookie_value,
    config::ServerConfig,
    database::Database,
    models::{User, UserRole},
    security::cookies::SESSION_COOKIE,
    server::ServerResources,
    stats::CoachInput,
};

pub const TEST_SESSION_SECRET: &str = "test-session-secret";

/// Fresh in-memory database with the schema applied
pub async fn create_test_database() -> Result<Database> {
    Ok(Database::new("sqlite::memory:").await?)
}

/// Server resources backed by an in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let config = ServerConfig::for_testing("sqlite::memory:", TEST_SESSION_SECRET);
    Ok(Arc::new(ServerResources::new(database, config)))
}

/// Create a regular user; password is bcrypt("password")
pub async fn create_test_user(database: &Database) -> Result<(Uuid, User)> {
    create_test_user_with_email(database, &format!("user-{}@example.com", Uuid::new_v4())).await
}

/// Create a regular user with a specific email
pub async fn create_test_user_with_email(database: &Database, email: &str) -> Result<(Uuid, User)> {
    let password_hash = bcrypt::hash("password", 4)?;
    let user = User::new(email.to_owned(), password_hash, Some("Test User".to_owned()));
    let user_id = database.create_user(&user).await?;
    Ok((user_id, user))
}

/// Create an admin user
pub async fn create_admin_user(database: &Database) -> Result<(Uuid, User)> {
    let password_hash = bcrypt::hash("password", 4)?;
    let mut user = User::new(
        format!("admin-{}@example.com", Uuid::new_v4()),
        password_hash,
        Some("Test Admin".to_owned()),
    );
    user.role = UserRole::Admin;
    let user_id = database.create_user(&user).await?;
    Ok((user_id, user))
}

/// Start a session for a user and return the Cookie header value
pub async fn session_cookie_for(resources: &Arc<ServerResources>, user_id: Uuid) -> Result<String> {
    let session = resources.database.create_session(user_id).await?;
    let value = build_session_cookie_value(&resources.config.session_secret, session.id);
    Ok(format!("{SESSION_COOKIE}={value}"))
}

/// Insert a session that is already past its expiry and return the Cookie
/// header value; the cookie is validly signed, only the session row is stale
pub async fn expired_session_cookie_for(
    resources: &Arc<ServerResources>,
    user_id: Uuid,
) -> Result<String> {
    let session_id = Uuid::new_v4();
    let created_at = chrono::Utc::now() - chrono::Duration::days(40);
    let expires_at = chrono::Utc::now() - chrono::Duration::days(10);

    sqlx::query(
        "INSERT INTO sessions (id, user_id, created_at, expires_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(session_id.to_string())
    .bind(user_id.to_string())
    .bind(created_at.to_rfc3339())
    .bind(expires_at.to_rfc3339())
    .execute(resources.database.pool())
    .await?;

    let value = build_session_cookie_value(&resources.config.session_secret, session_id);
    Ok(format!("{SESSION_COOKIE}={value}"))
}

/// A fully specified coach input for repository tests
pub fn sample_coach_input(name: &str) -> CoachInput {
    CoachInput {
        name: name.to_owned(),
        is_active: false,
        seasons: 10,
        regular_season_wins: 410,
        total_regular_season_games: 820,
        playoff_berths: 6,
        playoff_wins: 30,
        playoff_games: 60,
        regular_win_percent: Some(50.0),
        playoff_win_percent: Some(50.0),
    }
}
