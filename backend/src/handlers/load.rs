//! Load scheduling HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::load::{
    CreateLoadInput, Load, LoadCapacityInfo, LoadService, UpdateLoadInput,
};
use crate::AppState;
use crate::models::LoadStatus;

#[derive(Deserialize)]
pub struct LoadListQuery {
    pub status: Option<LoadStatus>,
    pub date_from: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct AddJumperInput {
    pub jump_id: Uuid,
}

/// List loads with optional status and date filters
pub async fn list_loads(
    State(state): State<AppState>,
    Query(query): Query<LoadListQuery>,
) -> AppResult<Json<Vec<Load>>> {
    let service = LoadService::new(state.db.clone());
    let loads = service.get_loads(query.status, query.date_from).await?;
    Ok(Json(loads))
}

/// List loads in a given status
pub async fn list_loads_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Load>>> {
    let status: LoadStatus = status.parse().map_err(|_| AppError::Validation {
        field: "status".to_string(),
        message: "Unknown load status".to_string(),
    })?;

    let service = LoadService::new(state.db.clone());
    let loads = service.get_loads(Some(status), None).await?;
    Ok(Json(loads))
}

/// List loads scheduled today
pub async fn list_todays_loads(State(state): State<AppState>) -> AppResult<Json<Vec<Load>>> {
    let service = LoadService::new(state.db.clone());
    let loads = service.get_todays_loads().await?;
    Ok(Json(loads))
}

/// Get a specific load
pub async fn get_load(
    State(state): State<AppState>,
    Path(load_id): Path<Uuid>,
) -> AppResult<Json<Load>> {
    let service = LoadService::new(state.db.clone());
    let load = service.get_load(load_id).await?;
    Ok(Json(load))
}

/// Schedule a new load
pub async fn create_load(
    State(state): State<AppState>,
    Json(input): Json<CreateLoadInput>,
) -> AppResult<(StatusCode, Json<Load>)> {
    let service = LoadService::new(state.db.clone());
    let load = service.create_load(input).await?;
    Ok((StatusCode::CREATED, Json(load)))
}

/// Update a load
pub async fn update_load(
    State(state): State<AppState>,
    Path(load_id): Path<Uuid>,
    Json(input): Json<UpdateLoadInput>,
) -> AppResult<Json<Load>> {
    let service = LoadService::new(state.db.clone());
    let load = service.update_load(load_id, input).await?;
    Ok(Json(load))
}

/// Delete a load and its jumps
pub async fn delete_load(
    State(state): State<AppState>,
    Path(load_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = LoadService::new(state.db.clone());
    service.delete_load(load_id).await?;
    Ok(Json(serde_json::json!({ "message": "Load deleted" })))
}

/// Seat accounting for a load
pub async fn get_load_capacity(
    State(state): State<AppState>,
    Path(load_id): Path<Uuid>,
) -> AppResult<Json<LoadCapacityInfo>> {
    let service = LoadService::new(state.db.clone());
    let info = service.get_capacity_info(load_id).await?;
    Ok(Json(info))
}

/// Move an existing jump onto this load
pub async fn add_jumper(
    State(state): State<AppState>,
    Path(load_id): Path<Uuid>,
    Json(input): Json<AddJumperInput>,
) -> AppResult<Json<serde_json::Value>> {
    let service = LoadService::new(state.db.clone());
    service.add_jumper(load_id, input.jump_id).await?;
    Ok(Json(serde_json::json!({ "message": "Jumper added to load" })))
}

/// Remove a jump from this load
pub async fn remove_jumper(
    State(state): State<AppState>,
    Path((load_id, jump_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<serde_json::Value>> {
    let service = LoadService::new(state.db.clone());
    service.remove_jumper(load_id, jump_id).await?;
    Ok(Json(serde_json::json!({ "message": "Jumper removed from load" })))
}
