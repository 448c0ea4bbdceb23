// ABOUTME: Database operations for the coaches resource
// ABOUTME: Handles sorted listing, lookup, create, full-replace update, and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::stats::CoachInput;

/// Column the coach list is sorted by
///
/// A closed enum keeps raw query-string input out of the ORDER BY clause.
/// Unknown values fall back to the default (`seasons`). The query-string
/// codec is `parse`/`as_str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Coach name
    Name,
    /// Seasons coached (default)
    #[default]
    Seasons,
    /// Regular-season wins
    RegularSeasonWins,
    /// Regular-season games
    TotalRegularSeasonGames,
    /// Playoff appearances
    PlayoffBerths,
    /// Playoff wins
    PlayoffWins,
    /// Playoff games
    PlayoffGames,
    /// Derived regular-season win percentage
    RegularWinPercent,
    /// Derived playoff win percentage
    PlayoffWinPercent,
}

impl SortField {
    /// Parse the `sortField` query parameter; unknown values use the default
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "name" => Self::Name,
            "regularSeasonWins" => Self::RegularSeasonWins,
            "totalRegularSeasonGames" => Self::TotalRegularSeasonGames,
            "playoffBerths" => Self::PlayoffBerths,
            "playoffWins" => Self::PlayoffWins,
            "playoffGames" => Self::PlayoffGames,
            "regularWinPercent" => Self::RegularWinPercent,
            "playoffWinPercent" => Self::PlayoffWinPercent,
            _ => Self::Seasons,
        }
    }

    /// Query-string representation (round-trips through `parse`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Seasons => "seasons",
            Self::RegularSeasonWins => "regularSeasonWins",
            Self::TotalRegularSeasonGames => "totalRegularSeasonGames",
            Self::PlayoffBerths => "playoffBerths",
            Self::PlayoffWins => "playoffWins",
            Self::PlayoffGames => "playoffGames",
            Self::RegularWinPercent => "regularWinPercent",
            Self::PlayoffWinPercent => "playoffWinPercent",
        }
    }

    /// Column name for the ORDER BY clause
    const fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Seasons => "seasons",
            Self::RegularSeasonWins => "regular_season_wins",
            Self::TotalRegularSeasonGames => "total_regular_season_games",
            Self::PlayoffBerths => "playoff_berths",
            Self::PlayoffWins => "playoff_wins",
            Self::PlayoffGames => "playoff_games",
            Self::RegularWinPercent => "regular_win_percent",
            Self::PlayoffWinPercent => "playoff_win_percent",
        }
    }
}

/// Sort direction for the coach list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending, selected only by `sortOrder=asc`
    Ascending,
    /// Descending (default; any value other than `asc`)
    #[default]
    Descending,
}

impl SortOrder {
    /// Parse the `sortOrder` query parameter: `asc` ascends, anything else
    /// (including absent) descends
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s == "asc" {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    /// Query-string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    const fn sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// A persisted coach record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coach {
    /// Store-assigned identifier
    pub id: Uuid,
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
    /// Derived regular-season win percentage, absent when games = 0
    pub regular_win_percent: Option<f64>,
    /// Derived playoff win percentage, absent when playoff games = 0 and
    /// berths nonzero
    pub playoff_win_percent: Option<f64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Coach database operations manager
pub struct CoachesManager {
    pool: SqlitePool,
}

const COACH_COLUMNS: &str = "id, name, is_active, seasons, regular_season_wins, \
     total_regular_season_games, playoff_berths, playoff_wins, playoff_games, \
     regular_win_percent, playoff_win_percent, created_at, updated_at";

impl CoachesManager {
    /// Create a new coaches manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new coach from normalized form input
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, input: &CoachInput) -> AppResult<Coach> {
        let now = Utc::now();
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO coaches (
                id, name, is_active, seasons, regular_season_wins,
                total_regular_season_games, playoff_berths, playoff_wins,
                playoff_games, regular_win_percent, playoff_win_percent,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            ",
        )
        .bind(id.to_string())
        .bind(&input.name)
        .bind(input.is_active)
        .bind(input.seasons)
        .bind(input.regular_season_wins)
        .bind(input.total_regular_season_games)
        .bind(input.playoff_berths)
        .bind(input.playoff_wins)
        .bind(input.playoff_games)
        .bind(input.regular_win_percent)
        .bind(input.playoff_win_percent)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create coach: {e}")))?;

        Ok(Self::from_input(id, input, now, now))
    }

    /// Get a coach by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get(&self, coach_id: Uuid) -> AppResult<Option<Coach>> {
        let row = sqlx::query(&format!(
            "SELECT {COACH_COLUMNS} FROM coaches WHERE id = $1"
        ))
        .bind(coach_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get coach: {e}")))?;

        row.map(|r| row_to_coach(&r)).transpose()
    }

    /// List all coaches sorted by the requested field and direction
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list(&self, sort_field: SortField, sort_order: SortOrder) -> AppResult<Vec<Coach>> {
        // Column and direction come from closed enums, never raw input
        let query = format!(
            "SELECT {COACH_COLUMNS} FROM coaches ORDER BY {} {}",
            sort_field.column(),
            sort_order.sql()
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list coaches: {e}")))?;

        rows.iter().map(row_to_coach).collect()
    }

    /// Count all coaches
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn count(&self) -> AppResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM coaches")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count coaches: {e}")))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| AppError::database(format!("Failed to read coach count: {e}")))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Replace every field of an existing coach
    ///
    /// Returns the updated record, or `None` when no coach has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn update(&self, coach_id: Uuid, input: &CoachInput) -> AppResult<Option<Coach>> {
        let Some(existing) = self.get(coach_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        sqlx::query(
            r"
            UPDATE coaches SET
                name = $2,
                is_active = $3,
                seasons = $4,
                regular_season_wins = $5,
                total_regular_season_games = $6,
                playoff_berths = $7,
                playoff_wins = $8,
                playoff_games = $9,
                regular_win_percent = $10,
                playoff_win_percent = $11,
                updated_at = $12
            WHERE id = $1
            ",
        )
        .bind(coach_id.to_string())
        .bind(&input.name)
        .bind(input.is_active)
        .bind(input.seasons)
        .bind(input.regular_season_wins)
        .bind(input.total_regular_season_games)
        .bind(input.playoff_berths)
        .bind(input.playoff_wins)
        .bind(input.playoff_games)
        .bind(input.regular_win_percent)
        .bind(input.playoff_win_percent)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update coach: {e}")))?;

        Ok(Some(Self::from_input(
            coach_id,
            input,
            existing.created_at,
            now,
        )))
    }

    /// Delete a coach by ID
    ///
    /// Returns whether a row was actually removed. Deleting an unknown id is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete(&self, coach_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM coaches WHERE id = $1")
            .bind(coach_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete coach: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    fn from_input(
        id: Uuid,
        input: &CoachInput,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Coach {
        Coach {
            id,
            name: input.name.clone(),
            is_active: input.is_active,
            seasons: input.seasons,
            regular_season_wins: input.regular_season_wins,
            total_regular_season_games: input.total_regular_season_games,
            playoff_berths: input.playoff_berths,
            playoff_wins: input.playoff_wins,
            playoff_games: input.playoff_games,
            regular_win_percent: input.regular_win_percent,
            playoff_win_percent: input.playoff_win_percent,
            created_at,
            updated_at,
        }
    }
}

fn row_to_coach(row: &SqliteRow) -> AppResult<Coach> {
    let id_str: String = row
        .try_get("id")
        .map_err(|e| AppError::database(format!("Failed to read coach id: {e}")))?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| AppError::database(format!("Invalid coach id '{id_str}': {e}")))?;

    let created_at = parse_timestamp(row, "created_at")?;
    let updated_at = parse_timestamp(row, "updated_at")?;

    Ok(Coach {
        id,
        name: get_column(row, "name")?,
        is_active: get_column(row, "is_active")?,
        seasons: get_column(row, "seasons")?,
        regular_season_wins: get_column(row, "regular_season_wins")?,
        total_regular_season_games: get_column(row, "total_regular_season_games")?,
        playoff_berths: get_column(row, "playoff_berths")?,
        playoff_wins: get_column(row, "playoff_wins")?,
        playoff_games: get_column(row, "playoff_games")?,
        regular_win_percent: get_column(row, "regular_win_percent")?,
        playoff_win_percent: get_column(row, "playoff_win_percent")?,
        created_at,
        updated_at,
    })
}

fn get_column<'r, T>(row: &'r SqliteRow, column: &str) -> AppResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| AppError::database(format!("Failed to read column '{column}': {e}")))
}

pub(crate) fn parse_timestamp(row: &SqliteRow, column: &str) -> AppResult<DateTime<Utc>> {
    let raw: String = row
        .try_get(column)
        .map_err(|e| AppError::database(format!("Failed to read column '{column}': {e}")))?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in '{column}': {e}")))
}
