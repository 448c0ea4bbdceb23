// ABOUTME: Integration tests for sign-up, sign-in, and sign-out
// ABOUTME: Covers session cookie issuance, credential checks, and session teardown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;

use common::{
    create_test_resources, create_test_user_with_email, expired_session_cookie_for,
    session_cookie_for,
};
use courtside::server::build_router;
use helpers::axum_test::AxumTestRequest;

fn credentials(email: &str, password: &str) -> Vec<(&'static str, String)> {
    vec![
        ("email", email.to_owned()),
        ("password", password.to_owned()),
    ]
}

#[tokio::test]
async fn sign_up_creates_user_session_and_redirects_home() {
    let resources = create_test_resources().await.unwrap();
    let router = build_router(resources.clone());

    let response = AxumTestRequest::post("/auth/sign-up")
        .form(&vec![
            ("email", "doc@example.com".to_owned()),
            ("displayName", "Doc Rivers".to_owned()),
            ("password", "hunter2".to_owned()),
        ])
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.location(), Some("/"));

    let cookie = response.set_cookie().unwrap();
    assert!(cookie.starts_with("coach_session="));
    assert!(cookie.contains("HttpOnly"));

    let user = resources
        .database
        .get_user_by_email("doc@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.display_name.as_deref(), Some("Doc Rivers"));
    assert!(!user.role.is_admin());
    // Password is stored hashed, never plaintext
    assert_ne!(user.password_hash, "hunter2");
}

#[tokio::test]
async fn sign_up_rejects_duplicate_email() {
    let resources = create_test_resources().await.unwrap();
    let router = build_router(resources.clone());
    create_test_user_with_email(&resources.database, "taken@example.com")
        .await
        .unwrap();

    let response = AxumTestRequest::post("/auth/sign-up")
        .form(&credentials("taken@example.com", "hunter2"))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("Email already in use"));
}

#[tokio::test]
async fn sign_in_with_valid_credentials_starts_session() {
    let resources = create_test_resources().await.unwrap();
    let router = build_router(resources.clone());
    create_test_user_with_email(&resources.database, "coach@example.com")
        .await
        .unwrap();

    let response = AxumTestRequest::post("/auth/sign-in")
        .form(&credentials("coach@example.com", "password"))
        .send(router.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    let set_cookie = response.set_cookie().unwrap().to_owned();
    let cookie_pair = set_cookie.split(';').next().unwrap().to_owned();

    // The issued cookie resolves to a signed-in navigation bar
    let response = AxumTestRequest::get("/")
        .cookie(&cookie_pair)
        .send(router)
        .await;
    assert!(response.text().contains("Sign out"));
}

#[tokio::test]
async fn sign_in_rejects_wrong_password_and_unknown_email() {
    let resources = create_test_resources().await.unwrap();
    let router = build_router(resources.clone());
    create_test_user_with_email(&resources.database, "coach@example.com")
        .await
        .unwrap();

    let response = AxumTestRequest::post("/auth/sign-in")
        .form(&credentials("coach@example.com", "wrong"))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = AxumTestRequest::post("/auth/sign-in")
        .form(&credentials("nobody@example.com", "password"))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    // Same message either way
    assert!(response.text().contains("Invalid email or password"));
}

#[tokio::test]
async fn sign_out_deletes_session_and_clears_cookie() {
    let resources = create_test_resources().await.unwrap();
    let router = build_router(resources.clone());
    let (user_id, _) = create_test_user_with_email(&resources.database, "out@example.com")
        .await
        .unwrap();
    let cookie = session_cookie_for(&resources, user_id).await.unwrap();

    let response = AxumTestRequest::get("/auth/sign-out")
        .cookie(&cookie)
        .send(router.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.location(), Some("/"));
    assert!(response.set_cookie().unwrap().contains("Max-Age=0"));

    // The old cookie no longer resolves to a user
    let response = AxumTestRequest::get("/").cookie(&cookie).send(router).await;
    assert!(response.text().contains("Sign in"));
}

#[tokio::test]
async fn sign_out_while_anonymous_is_a_noop_redirect() {
    let resources = create_test_resources().await.unwrap();
    let router = build_router(resources);

    let response = AxumTestRequest::get("/auth/sign-out").send(router).await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn tampered_session_cookie_resolves_to_anonymous() {
    let resources = create_test_resources().await.unwrap();
    let router = build_router(resources.clone());
    let (user_id, _) = create_test_user_with_email(&resources.database, "sig@example.com")
        .await
        .unwrap();
    let cookie = session_cookie_for(&resources, user_id).await.unwrap();

    // Flip the signature tail
    let tampered = format!("{}0000", &cookie[..cookie.len() - 4]);
    let response = AxumTestRequest::get("/").cookie(&tampered).send(router).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Sign in"));
}

#[tokio::test]
async fn expired_session_resolves_to_anonymous() {
    let resources = create_test_resources().await.unwrap();
    let router = build_router(resources.clone());
    let (user_id, _) = create_test_user_with_email(&resources.database, "stale@example.com")
        .await
        .unwrap();
    let cookie = expired_session_cookie_for(&resources, user_id).await.unwrap();

    // The signature is valid, but the session row is past its expiry:
    // public pages render the anonymous navigation
    let response = AxumTestRequest::get("/").cookie(&cookie).send(router.clone()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Sign in"));
    assert!(!response.text().contains("Sign out"));

    // and the signed-in gate denies
    let response = AxumTestRequest::delete(&format!("/coaches/{}", uuid::Uuid::new_v4()))
        .cookie(&cookie)
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_up_and_sign_in_forms_render() {
    let resources = create_test_resources().await.unwrap();
    let router = build_router(resources);

    let response = AxumTestRequest::get("/auth/sign-up").send(router.clone()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Sign up"));

    let response = AxumTestRequest::get("/auth/sign-in").send(router).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Sign in"));
}
