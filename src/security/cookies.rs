// ABOUTME: Secure HTTP cookie utilities for session management
// ABOUTME: Provides httpOnly, Secure, SameSite cookie helpers for the session cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Secure cookie utilities
//!
//! Helpers for building the `Set-Cookie` header carrying the signed session
//! ID, and for reading cookies back off a request.

use std::env;

use axum::http::{header, HeaderMap, HeaderValue};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "coach_session";

/// Cookie security configuration
pub struct SecureCookieConfig {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Max-Age in seconds
    pub max_age_secs: i64,
    /// `HttpOnly` flag (prevents JavaScript access)
    pub http_only: bool,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// `SameSite` policy
    pub same_site: SameSitePolicy,
    /// Cookie path
    pub path: String,
}

/// `SameSite` cookie policy
#[derive(Debug, Clone, Copy)]
pub enum SameSitePolicy {
    /// Cookie only sent in first-party context
    Strict,
    /// Cookie sent on top-level navigation
    Lax,
}

impl SecureCookieConfig {
    /// Create a cookie configuration with safe defaults
    ///
    /// The `Secure` flag is derived from the `BASE_URL` environment variable:
    /// `http://` URLs disable it for local development; anything else
    /// (including unset) keeps it on.
    #[must_use]
    pub fn new(name: String, value: String, max_age_secs: i64) -> Self {
        Self {
            name,
            value,
            max_age_secs,
            http_only: true,
            secure: infer_secure_flag(),
            same_site: SameSitePolicy::Lax,
            path: "/".to_owned(),
        }
    }

    /// Build the Set-Cookie header value
    #[must_use]
    pub fn build(&self) -> String {
        use std::fmt::Write;
        let mut cookie = format!("{}={}", self.name, self.value);

        let _ = write!(cookie, "; Max-Age={}", self.max_age_secs);
        let _ = write!(cookie, "; Path={}", self.path);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        match self.same_site {
            SameSitePolicy::Strict => cookie.push_str("; SameSite=Strict"),
            SameSitePolicy::Lax => cookie.push_str("; SameSite=Lax"),
        }

        cookie
    }
}

/// Set the session cookie
pub fn set_session_cookie(headers: &mut HeaderMap, value: &str, max_age_secs: i64) {
    let cookie = SecureCookieConfig::new(SESSION_COOKIE.to_owned(), value.to_owned(), max_age_secs);

    if let Ok(header_value) = HeaderValue::from_str(&cookie.build()) {
        headers.insert(header::SET_COOKIE, header_value);
    }
}

/// Clear the session cookie
pub fn clear_session_cookie(headers: &mut HeaderMap) {
    let mut cookie = format!("{SESSION_COOKIE}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax");
    if infer_secure_flag() {
        cookie.push_str("; Secure");
    }

    if let Ok(header_value) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, header_value);
    }
}

fn infer_secure_flag() -> bool {
    env::var("BASE_URL").map_or(true, |url| url.starts_with("https://"))
}

/// Extract a cookie value from request headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            let name = parts.next()?.trim();
            let value = parts.next()?.trim();

            if name == cookie_name {
                Some(value.to_owned())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_includes_flags() {
        let cookie = SecureCookieConfig::new("coach_session".to_owned(), "abc".to_owned(), 60);
        let built = cookie.build();
        assert!(built.starts_with("coach_session=abc"));
        assert!(built.contains("Max-Age=60"));
        assert!(built.contains("HttpOnly"));
        assert!(built.contains("SameSite=Lax"));
    }

    #[test]
    fn get_cookie_value_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("other=1; coach_session=xyz; third=2"),
        );
        assert_eq!(
            get_cookie_value(&headers, "coach_session"),
            Some("xyz".to_owned())
        );
        assert_eq!(get_cookie_value(&headers, "missing"), None);
    }
}
