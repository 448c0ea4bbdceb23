// ABOUTME: Test helper module organization
// ABOUTME: Exposes the in-process axum request builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

pub mod axum_test;
