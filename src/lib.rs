// ABOUTME: Library crate for the Courtside coach roster application
// ABOUTME: Server-rendered CRUD over head coach records with session auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Courtside
//!
//! A small server-rendered web application tracking NBA head coaches and
//! their win-loss records. Anyone can browse and sort the roster; signed-in
//! users can edit and delete; admins can add coaches.
//!
//! Layering:
//! - [`routes`] owns the HTTP surface (route structs, one per resource)
//! - [`auth`] resolves the signed session cookie into a user and enforces
//!   the signed-in and admin gates
//! - [`stats`] normalizes form input and derives win percentages
//! - [`database`] is the `SQLite` persistence layer
//! - [`views`] renders escaped HTML

/// Session resolution and access control gates
pub mod auth;
/// Environment-driven server configuration
pub mod config;
/// `SQLite` persistence for coaches, users, and sessions
pub mod database;
/// Application error type and HTTP status mapping
pub mod errors;
/// Health check endpoint
pub mod health;
/// User account models
pub mod models;
/// HTTP route handlers
pub mod routes;
/// Cookie handling
pub mod security;
/// Router assembly and server lifecycle
pub mod server;
/// Form normalization and derived statistics
pub mod stats;
/// Server-rendered HTML views
pub mod views;
