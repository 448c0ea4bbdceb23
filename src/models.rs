// ABOUTME: Core account models shared across database, auth, and route layers
// ABOUTME: Defines User records and the admin/regular role distinction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! User account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role attached to a user account
///
/// The access gate only distinguishes admin from everyone else; there is no
/// finer-grained permission model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular signed-in user
    #[default]
    User,
    /// Administrator: may create, edit-form, and delete coaches
    Admin,
}

impl UserRole {
    /// Database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse from the database string representation
    ///
    /// Unknown values degrade to the regular role rather than failing; a
    /// mangled row must never grant admin.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }

    /// Whether this role passes the admin-required gate
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Sign-in email, unique
    pub email: String,
    /// Optional display name shown in the navigation bar
    pub display_name: Option<String>,
    /// bcrypt password hash
    pub password_hash: String,
    /// Admin/regular role
    pub role: UserRole,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Set at account creation and whenever credentials change
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new regular user with a fresh id
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            role: UserRole::User,
            created_at: now,
            last_active: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_defaults_to_user() {
        assert_eq!(UserRole::parse("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("user"), UserRole::User);
        assert_eq!(UserRole::parse("superuser"), UserRole::User);
        assert_eq!(UserRole::parse(""), UserRole::User);
    }

    #[test]
    fn new_user_is_not_admin() {
        let user = User::new("coach@example.com".to_owned(), "hash".to_owned(), None);
        assert!(!user.role.is_admin());
    }
}
