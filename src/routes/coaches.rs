// ABOUTME: Route handlers for the coaches resource
// ABOUTME: List, detail, forms, create, update, and delete with role-gated admin actions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Courtside Contributors

//! Coach CRUD routes
//!
//! Gate requirements per operation:
//! - list/show: public
//! - new form, create, edit form: admin
//! - update, delete: any signed-in user
//!
//! Every denied gate returns before the repository is touched.

use std::sync::Arc;

use axum::{
    extract::{Form, Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth,
    database::coaches::{Coach, CoachesManager, SortField, SortOrder},
    errors::AppError,
    routes::redirect_found,
    server::ServerResources,
    stats::{compute_derived, CoachForm},
    views,
};

/// Query parameters for the coach list
#[derive(Debug, Default, Deserialize)]
pub struct ListCoachesQuery {
    /// Column to sort by; unknown values fall back to `seasons`
    #[serde(rename = "sortField")]
    pub sort_field: Option<String>,
    /// `asc` ascends; anything else descends
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

/// Coaches routes handler
pub struct CoachRoutes;

impl CoachRoutes {
    /// Create all coach routes, plus the landing page
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_landing))
            .route(
                "/coaches",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/coaches/new", get(Self::handle_new_form))
            .route(
                "/coaches/:id",
                get(Self::handle_show)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route("/coaches/:id/edit", get(Self::handle_edit_form))
            .with_state(resources)
    }

    fn manager(resources: &Arc<ServerResources>) -> CoachesManager {
        CoachesManager::new(resources.database.pool().clone())
    }

    /// A malformed identifier is indistinguishable from an unknown one
    fn parse_coach_id(raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw).map_err(|_| AppError::not_found("Coach not found"))
    }

    async fn fetch_coach(resources: &Arc<ServerResources>, raw_id: &str) -> Result<Coach, AppError> {
        let coach_id = Self::parse_coach_id(raw_id)?;
        Self::manager(resources)
            .get(coach_id)
            .await?
            .ok_or_else(|| AppError::not_found("Coach not found"))
    }

    /// Handle GET / - landing page
    async fn handle_landing(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = auth::current_user(&headers, &resources).await?;
        Ok(Html(views::landing_page(user.as_ref())).into_response())
    }

    /// Handle GET /coaches - sorted list
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListCoachesQuery>,
    ) -> Result<Response, AppError> {
        let user = auth::current_user(&headers, &resources).await?;

        let sort_field = query
            .sort_field
            .as_deref()
            .map(SortField::parse)
            .unwrap_or_default();
        let sort_order = query
            .sort_order
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or_default();

        let coaches = Self::manager(&resources).list(sort_field, sort_order).await?;

        Ok(Html(views::coaches_index(
            &coaches,
            sort_field,
            sort_order,
            user.as_ref(),
        ))
        .into_response())
    }

    /// Handle GET /coaches/new - empty form (admin)
    async fn handle_new_form(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let admin = auth::authenticate_admin(&headers, &resources).await?;
        Ok(Html(views::coach_form_new(Some(&admin))).into_response())
    }

    /// Handle GET /coaches/:id - detail view
    async fn handle_show(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(raw_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = auth::current_user(&headers, &resources).await?;
        let coach = Self::fetch_coach(&resources, &raw_id).await?;
        Ok(Html(views::coach_show(&coach, user.as_ref())).into_response())
    }

    /// Handle POST /coaches - create (admin)
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Form(form): Form<CoachForm>,
    ) -> Result<Response, AppError> {
        let admin = auth::authenticate_admin(&headers, &resources).await?;

        let input = compute_derived(&form)?;
        let coach = Self::manager(&resources).create(&input).await?;
        info!(coach_id = %coach.id, admin = %admin.email, "Coach created");

        Ok(redirect_found("/coaches"))
    }

    /// Handle GET /coaches/:id/edit - pre-filled form (admin)
    async fn handle_edit_form(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(raw_id): Path<String>,
    ) -> Result<Response, AppError> {
        let admin = auth::authenticate_admin(&headers, &resources).await?;
        let coach = Self::fetch_coach(&resources, &raw_id).await?;
        Ok(Html(views::coach_form_edit(&coach, Some(&admin))).into_response())
    }

    /// Handle PUT /coaches/:id - full replace (signed-in users)
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(raw_id): Path<String>,
        Form(form): Form<CoachForm>,
    ) -> Result<Response, AppError> {
        let user = auth::authenticate(&headers, &resources).await?;

        let coach_id = Self::parse_coach_id(&raw_id)?;
        let input = compute_derived(&form)?;
        let updated = Self::manager(&resources).update(coach_id, &input).await?;
        if updated.is_none() {
            return Err(AppError::not_found("Coach not found"));
        }
        info!(coach_id = %coach_id, user = %user.email, "Coach updated");

        Ok(redirect_found(&format!("/coaches/{coach_id}")))
    }

    /// Handle DELETE /coaches/:id - remove (signed-in users)
    ///
    /// Deleting an unknown or malformed id still redirects; delete is
    /// idempotent from the browser's point of view.
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(raw_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = auth::authenticate(&headers, &resources).await?;

        if let Ok(coach_id) = Self::parse_coach_id(&raw_id) {
            let removed = Self::manager(&resources).delete(coach_id).await?;
            if removed {
                info!(coach_id = %coach_id, user = %user.email, "Coach deleted");
            }
        }

        Ok(redirect_found("/coaches"))
    }
}
