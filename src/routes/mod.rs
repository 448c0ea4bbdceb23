// ABOUTME: Route module organization for the Courtside HTTP surface
// ABOUTME: Shared redirect and method-override helpers live here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Route modules
//!
//! Each resource gets a route struct exposing `routes(Arc<ServerResources>)`.
//! Handlers are thin: gate check, input normalization, one repository call,
//! then render or redirect.

/// Sign-up, sign-in, and sign-out routes
pub mod auth;
/// Coach CRUD routes
pub mod coaches;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Build a 302 Found redirect
///
/// Plain-form navigation expects 302 after mutations; axum's `Redirect::to`
/// would emit 303.
#[must_use]
pub fn redirect_found(location: &str) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

/// Method-override middleware
///
/// HTML forms can only submit GET and POST. A POST whose query string carries
/// `_method=PUT` or `_method=DELETE` is rewritten before routing so the edit
/// and delete forms reach the real PUT/DELETE handlers.
pub async fn method_override(mut request: Request, next: Next) -> Response {
    if request.method() == Method::POST {
        if let Some(overridden) = requested_override(request.uri().query()) {
            *request.method_mut() = overridden;
        }
    }
    next.run(request).await
}

fn requested_override(query: Option<&str>) -> Option<Method> {
    let query = query?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != "_method" {
            return None;
        }
        match value.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_parses_put_and_delete() {
        assert_eq!(requested_override(Some("_method=PUT")), Some(Method::PUT));
        assert_eq!(
            requested_override(Some("_method=delete")),
            Some(Method::DELETE)
        );
        assert_eq!(
            requested_override(Some("a=1&_method=PUT&b=2")),
            Some(Method::PUT)
        );
    }

    #[test]
    fn override_ignores_other_values() {
        assert_eq!(requested_override(None), None);
        assert_eq!(requested_override(Some("")), None);
        assert_eq!(requested_override(Some("_method=PATCH")), None);
        assert_eq!(requested_override(Some("method=PUT")), None);
    }

    #[test]
    fn redirect_found_sets_location() {
        let response = redirect_found("/coaches");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION),
            Some(&HeaderValue::from_static("/coaches"))
        );
    }
}
