// ABOUTME: Sign-up, sign-in, and sign-out route handlers
// ABOUTME: bcrypt password verification and signed session cookie issuance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Account routes
//!
//! Sign-up creates a regular user; admins are provisioned from the CLI.
//! Both sign-up and sign-in end with a fresh session row and a signed
//! `Set-Cookie`, then redirect home.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::HeaderMap,
    response::{Html, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    auth::{self, build_session_cookie_value},
    database::sessions::SESSION_TTL_DAYS,
    errors::AppError,
    models::User,
    routes::redirect_found,
    security::cookies::{clear_session_cookie, set_session_cookie},
    server::ServerResources,
    views,
};

/// Sign-up form payload
#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    /// Sign-in email
    pub email: String,
    /// Optional display name
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    /// Plaintext password, hashed before storage
    pub password: String,
}

/// Sign-in form payload
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    /// Sign-in email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Account routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create the sign-up, sign-in, and sign-out routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/auth/sign-up",
                get(Self::handle_sign_up_form).post(Self::handle_sign_up),
            )
            .route(
                "/auth/sign-in",
                get(Self::handle_sign_in_form).post(Self::handle_sign_in),
            )
            .route("/auth/sign-out", get(Self::handle_sign_out))
            .with_state(resources)
    }

    /// Start a session for a user and attach the signed cookie
    async fn start_session(
        resources: &Arc<ServerResources>,
        user_id: uuid::Uuid,
        response: &mut Response,
    ) -> Result<(), AppError> {
        let session = resources.database.create_session(user_id).await?;
        let cookie_value =
            build_session_cookie_value(&resources.config.session_secret, session.id);
        set_session_cookie(
            response.headers_mut(),
            &cookie_value,
            SESSION_TTL_DAYS * 24 * 60 * 60,
        );
        Ok(())
    }

    /// Handle GET /auth/sign-up
    async fn handle_sign_up_form() -> Html<String> {
        Html(views::sign_up_page())
    }

    /// Handle POST /auth/sign-up - register and sign in
    async fn handle_sign_up(
        State(resources): State<Arc<ServerResources>>,
        Form(form): Form<SignUpForm>,
    ) -> Result<Response, AppError> {
        let email = form.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::invalid_input("Email is required"));
        }
        if form.password.is_empty() {
            return Err(AppError::invalid_input("Password is required"));
        }

        let password_hash = bcrypt::hash(&form.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
        let display_name = form
            .display_name
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());

        let user = User::new(email, password_hash, display_name);
        resources.database.create_user(&user).await?;
        info!(user_id = %user.id, "User registered");

        let mut response = redirect_found("/");
        Self::start_session(&resources, user.id, &mut response).await?;
        Ok(response)
    }

    /// Handle GET /auth/sign-in
    async fn handle_sign_in_form() -> Html<String> {
        Html(views::sign_in_page())
    }

    /// Handle POST /auth/sign-in - verify credentials and start a session
    async fn handle_sign_in(
        State(resources): State<Arc<ServerResources>>,
        Form(form): Form<SignInForm>,
    ) -> Result<Response, AppError> {
        let email = form.email.trim().to_lowercase();

        // Same denial for unknown email and wrong password
        let denied = || AppError::auth_invalid("Invalid email or password");

        let user = resources
            .database
            .get_user_by_email(&email)
            .await?
            .ok_or_else(denied)?;

        let verified = bcrypt::verify(&form.password, &user.password_hash)
            .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))?;
        if !verified {
            return Err(denied());
        }
        info!(user_id = %user.id, "User signed in");

        let mut response = redirect_found("/");
        Self::start_session(&resources, user.id, &mut response).await?;
        Ok(response)
    }

    /// Handle GET /auth/sign-out - drop the session and clear the cookie
    ///
    /// Signing out while already anonymous is a no-op redirect.
    async fn handle_sign_out(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        if let Some(user) = auth::current_user(&headers, &resources).await? {
            resources.database.delete_session(user.session_id).await?;
            info!(user_id = %user.user_id, "User signed out");
        }

        let mut response = redirect_found("/");
        clear_session_cookie(response.headers_mut());
        Ok(response)
    }
}
