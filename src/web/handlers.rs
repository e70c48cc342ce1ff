//! HTTP request handlers

use super::error::ApiError;
use super::state::AppState;
use crate::catalog::{CatalogStatus, User};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search term
    pub q: Option<String>,
}

/// Response for a load request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub success: bool,
    pub message: String,
    pub previous_count: usize,
    pub current_count: usize,
    pub loaded_count: usize,
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    info!("Request received to get all users");
    let users = state.catalog.list_all().await?;
    info!("Returning {} users", users.len());
    Ok(Json(users))
}

/// Get one user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    info!("Request received to get user by id: {}", id);
    Ok(Json(state.catalog.get_by_id(id).await?))
}

/// Get one user by email
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>, ApiError> {
    info!("Request received to get user by email: {}", email);
    Ok(Json(state.catalog.get_by_email(&email).await?))
}

/// Search users by free-form term
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<User>>, ApiError> {
    info!("Request received to search users with term: {:?}", params.q);
    let users = state.catalog.search(params.q.as_deref()).await?;
    info!("Search returned {} users", users.len());
    Ok(Json(users))
}

/// Trigger ingestion from the external source
pub async fn load_data(State(state): State<AppState>) -> Result<Json<LoadResponse>, ApiError> {
    info!("Request received to load users from external source");

    let report = state.load().await.map_err(|e| {
        error!(error = %e.message_chain(), "Error loading users data");
        ApiError::from(e)
    })?;

    info!(
        previous = report.previous_count,
        current = report.current_count,
        "Load request finished"
    );
    Ok(Json(LoadResponse {
        success: true,
        message: "Users data loaded successfully".to_string(),
        previous_count: report.previous_count,
        current_count: report.current_count,
        loaded_count: report.loaded_count,
    }))
}

/// Current data load status
pub async fn data_status(State(state): State<AppState>) -> Result<Json<CatalogStatus>, ApiError> {
    Ok(Json(state.catalog.status().await?))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
