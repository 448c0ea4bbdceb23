// ABOUTME: Session resolution and the access control gate
// ABOUTME: Verifies the signed session cookie and enforces auth/admin requirements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Authentication and access control
//!
//! The session cookie carries `<session-id>.<signature>` where the signature
//! is a keyed SHA-256 over the session ID using the configured
//! `SESSION_SECRET`. A cookie that is absent, malformed, mis-signed, expired,
//! or orphaned resolves to anonymous; it never errors a public page.
//!
//! Gates:
//! - [`authenticate`]: auth-required. Denies with 401 when anonymous.
//! - [`authenticate_admin`]: admin-required. 401 when anonymous, 403 when the
//!   user lacks the admin role.
//!
//! Both are read-only; a denied request short-circuits before any repository
//! call in the handler.

use std::sync::Arc;

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::UserRole,
    security::cookies::{get_cookie_value, SESSION_COOKIE},
    server::ServerResources,
};

/// Authenticated user data resolved from the session cookie
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Session row backing this request
    pub session_id: Uuid,
    /// Signed-in user
    pub user_id: Uuid,
    /// User email
    pub email: String,
    /// Display name for the navigation bar
    pub display_name: Option<String>,
    /// Admin/regular role
    pub role: UserRole,
}

/// Sign a session ID with the session secret
fn sign_session_id(secret: &str, session_id: Uuid) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b":");
    hasher.update(session_id.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Build the cookie value for a session: `<id>.<signature>`
#[must_use]
pub fn build_session_cookie_value(secret: &str, session_id: Uuid) -> String {
    format!("{session_id}.{}", sign_session_id(secret, session_id))
}

/// Verify a cookie value and extract the session ID
///
/// Returns `None` for anything that does not verify: wrong shape, bad UUID,
/// or a signature that does not match.
#[must_use]
pub fn verify_session_cookie_value(secret: &str, value: &str) -> Option<Uuid> {
    let (id_part, sig_part) = value.split_once('.')?;
    let session_id = Uuid::parse_str(id_part).ok()?;
    if sign_session_id(secret, session_id) == sig_part {
        Some(session_id)
    } else {
        None
    }
}

/// Resolve the current user, if any
///
/// Lenient session resolution for public pages: every failure mode short of a
/// store error maps to `Ok(None)`.
///
/// # Errors
///
/// Returns an error only when the session or user lookup itself fails.
pub async fn current_user(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<Option<AuthResult>> {
    let Some(raw) = get_cookie_value(headers, SESSION_COOKIE) else {
        return Ok(None);
    };

    let Some(session_id) =
        verify_session_cookie_value(&resources.config.session_secret, &raw)
    else {
        tracing::debug!("Session cookie failed signature check");
        return Ok(None);
    };

    let Some(session) = resources.database.get_session(session_id).await? else {
        return Ok(None);
    };
    if session.is_expired() {
        return Ok(None);
    }

    let Some(user) = resources.database.get_user(session.user_id).await? else {
        tracing::warn!(session_id = %session_id, "Session references missing user");
        return Ok(None);
    };

    Ok(Some(AuthResult {
        session_id,
        user_id: user.id,
        email: user.email,
        display_name: user.display_name,
        role: user.role,
    }))
}

/// Auth-required gate: resolve the session or deny with 401
///
/// # Errors
///
/// `AuthRequired` when no valid session is present; store errors propagate.
pub async fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<AuthResult> {
    current_user(headers, resources)
        .await?
        .ok_or_else(|| AppError::auth_required("You must be signed in to do that"))
}

/// Admin-required gate: resolve the session and require the admin role
///
/// # Errors
///
/// `AuthRequired` (401) when anonymous, `PermissionDenied` (403) when the
/// signed-in user is not an admin.
pub async fn authenticate_admin(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<AuthResult> {
    let auth = authenticate(headers, resources).await?;
    if !auth.role.is_admin() {
        return Err(AppError::permission_denied(
            "Admin access is required for this action",
        ));
    }
    Ok(auth)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn cookie_value_round_trips() {
        let id = Uuid::new_v4();
        let value = build_session_cookie_value(SECRET, id);
        assert_eq!(verify_session_cookie_value(SECRET, &value), Some(id));
    }

    #[test]
    fn tampered_id_fails_verification() {
        let value = build_session_cookie_value(SECRET, Uuid::new_v4());
        let other = Uuid::new_v4();
        let sig = value.split_once('.').map(|(_, s)| s.to_owned()).unwrap_or_default();
        assert_eq!(
            verify_session_cookie_value(SECRET, &format!("{other}.{sig}")),
            None
        );
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let id = Uuid::new_v4();
        let value = build_session_cookie_value(SECRET, id);
        assert_eq!(verify_session_cookie_value("other-secret", &value), None);
    }

    #[test]
    fn garbage_values_fail_verification() {
        assert_eq!(verify_session_cookie_value(SECRET, ""), None);
        assert_eq!(verify_session_cookie_value(SECRET, "no-dot-here"), None);
        assert_eq!(verify_session_cookie_value(SECRET, "not-a-uuid.abcdef"), None);
    }
}
