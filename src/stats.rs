// ABOUTME: Derived-field calculator turning raw coach form input into a typed record
// ABOUTME: Computes regular-season and playoff win percentages at write time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Win-percentage computation
//!
//! Form submissions arrive with every field as text. [`compute_derived`] is
//! the single place raw text becomes typed data: it parses the counting
//! fields, maps the `is_active` checkbox, and computes both derived
//! percentages. Handlers persist the result as-is; the percentages are never
//! written without passing through here.

use serde::Deserialize;

use crate::errors::{AppError, AppResult};

/// Raw coach form body, exactly as submitted by the browser
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoachForm {
    /// Coach name
    #[serde(default)]
    pub name: String,
    /// Checkbox: present with value "on" when checked, absent otherwise
    #[serde(rename = "isActive")]
    pub is_active: Option<String>,
    /// Seasons coached
    #[serde(default)]
    pub seasons: String,
    /// Regular-season wins
    #[serde(rename = "regularSeasonWins", default)]
    pub regular_season_wins: String,
    /// Regular-season games coached
    #[serde(rename = "totalRegularSeasonGames", default)]
    pub total_regular_season_games: String,
    /// Playoff appearances
    #[serde(rename = "playoffBerths", default)]
    pub playoff_berths: String,
    /// Playoff wins
    #[serde(rename = "playoffWins", default)]
    pub playoff_wins: String,
    /// Playoff games coached
    #[serde(rename = "playoffGames", default)]
    pub playoff_games: String,
}

/// Fully typed coach data ready for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct CoachInput {
    /// Coach name
    pub name: String,
    /// Currently coaching
    pub is_active: bool,
    /// Seasons coached
    pub seasons: i64,
    /// Regular-season wins
    pub regular_season_wins: i64,
    /// Regular-season games coached
    pub total_regular_season_games: i64,
    /// Playoff appearances
    pub playoff_berths: i64,
    /// Playoff wins
    pub playoff_wins: i64,
    /// Playoff games coached
    pub playoff_games: i64,
    /// Derived: 100 * wins / games, rounded to 2 decimals; None when games = 0
    pub regular_win_percent: Option<f64>,
    /// Derived: forced 0 when `playoff_berths` was submitted as "0", otherwise
    /// 100 * playoff wins / playoff games rounded to 2 decimals; None when
    /// playoff games = 0
    pub playoff_win_percent: Option<f64>,
}

/// Round to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_count(field: &str, raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::invalid_input(format!("Field '{field}' must be a whole number")))
}

fn percent(wins: i64, games: i64) -> Option<f64> {
    if games == 0 {
        return None;
    }
    Some(round2(100.0 * wins as f64 / games as f64))
}

/// Normalize a raw form submission into a typed coach record
///
/// The `is_active` checkbox maps to `true` only for the exact value `"on"`.
/// The playoff-berths zero check runs on the raw string, before parsing, so a
/// submission of `"0"` forces the playoff percentage to zero no matter what
/// the playoff wins/games fields contain.
///
/// # Errors
///
/// Returns `InvalidInput` naming the first counting field that fails to parse
/// as a whole number.
pub fn compute_derived(form: &CoachForm) -> AppResult<CoachInput> {
    let is_active = form.is_active.as_deref() == Some("on");

    let seasons = parse_count("seasons", &form.seasons)?;
    let regular_season_wins = parse_count("regularSeasonWins", &form.regular_season_wins)?;
    let total_regular_season_games =
        parse_count("totalRegularSeasonGames", &form.total_regular_season_games)?;
    let playoff_wins = parse_count("playoffWins", &form.playoff_wins)?;
    let playoff_games = parse_count("playoffGames", &form.playoff_games)?;

    let berths_is_zero = form.playoff_berths.trim() == "0";
    let playoff_berths = parse_count("playoffBerths", &form.playoff_berths)?;

    let regular_win_percent = percent(regular_season_wins, total_regular_season_games);
    let playoff_win_percent = if berths_is_zero {
        Some(0.0)
    } else {
        percent(playoff_wins, playoff_games)
    };

    Ok(CoachInput {
        name: form.name.trim().to_owned(),
        is_active,
        seasons,
        regular_season_wins,
        total_regular_season_games,
        playoff_berths,
        playoff_wins,
        playoff_games,
        regular_win_percent,
        playoff_win_percent,
    })
}
