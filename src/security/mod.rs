// ABOUTME: Security utilities for the web surface
// ABOUTME: Cookie construction and parsing with safe defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Security utilities

/// Secure cookie helpers for the session cookie
pub mod cookies;
