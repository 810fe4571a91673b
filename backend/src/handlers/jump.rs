//! Jump manifest HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::jump::{CreateJumpInput, Jump, JumpService, UpdateJumpInput};
use crate::AppState;
use crate::models::JumpType;

#[derive(Deserialize)]
pub struct JumpListQuery {
    pub load_id: Option<Uuid>,
    pub jump_type: Option<JumpType>,
}

#[derive(Deserialize)]
pub struct AssignInstructorInput {
    pub instructor_id: Uuid,
}

/// List jumps with optional load and type filters
pub async fn list_jumps(
    State(state): State<AppState>,
    Query(query): Query<JumpListQuery>,
) -> AppResult<Json<Vec<Jump>>> {
    let service = JumpService::new(state.db.clone());
    let jumps = service.get_jumps(query.load_id, query.jump_type).await?;
    Ok(Json(jumps))
}

/// List jumps of a given type
pub async fn list_jumps_by_type(
    State(state): State<AppState>,
    Path(jump_type): Path<String>,
) -> AppResult<Json<Vec<Jump>>> {
    let jump_type: JumpType = jump_type.parse().map_err(|_| AppError::Validation {
        field: "jump_type".to_string(),
        message: "Unknown jump type".to_string(),
    })?;

    let service = JumpService::new(state.db.clone());
    let jumps = service.get_jumps(None, Some(jump_type)).await?;
    Ok(Json(jumps))
}

/// List jumps manifested on a load
pub async fn list_jumps_by_load(
    State(state): State<AppState>,
    Path(load_id): Path<Uuid>,
) -> AppResult<Json<Vec<Jump>>> {
    let service = JumpService::new(state.db.clone());
    let jumps = service.get_jumps(Some(load_id), None).await?;
    Ok(Json(jumps))
}

/// List jumps assigned to an instructor
pub async fn list_jumps_by_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<Uuid>,
) -> AppResult<Json<Vec<Jump>>> {
    let service = JumpService::new(state.db.clone());
    let jumps = service.get_jumps_by_instructor(instructor_id).await?;
    Ok(Json(jumps))
}

/// List all tandem jumps
pub async fn list_tandem_jumps(State(state): State<AppState>) -> AppResult<Json<Vec<Jump>>> {
    let service = JumpService::new(state.db.clone());
    let jumps = service.get_jumps(None, Some(JumpType::Tandem)).await?;
    Ok(Json(jumps))
}

/// List all AFF jumps
pub async fn list_aff_jumps(State(state): State<AppState>) -> AppResult<Json<Vec<Jump>>> {
    let service = JumpService::new(state.db.clone());
    let jumps = service.get_jumps(None, Some(JumpType::Aff)).await?;
    Ok(Json(jumps))
}

/// Get a specific jump
pub async fn get_jump(
    State(state): State<AppState>,
    Path(jump_id): Path<Uuid>,
) -> AppResult<Json<Jump>> {
    let service = JumpService::new(state.db.clone());
    let jump = service.get_jump(jump_id).await?;
    Ok(Json(jump))
}

/// Manifest a new jump onto a load
pub async fn create_jump(
    State(state): State<AppState>,
    Json(input): Json<CreateJumpInput>,
) -> AppResult<(StatusCode, Json<Jump>)> {
    let service = JumpService::new(state.db.clone());
    let jump = service.create_jump(input).await?;
    Ok((StatusCode::CREATED, Json(jump)))
}

/// Update a jump
pub async fn update_jump(
    State(state): State<AppState>,
    Path(jump_id): Path<Uuid>,
    Json(input): Json<UpdateJumpInput>,
) -> AppResult<Json<Jump>> {
    let service = JumpService::new(state.db.clone());
    let jump = service.update_jump(jump_id, input).await?;
    Ok(Json(jump))
}

/// Assign an instructor to a jump
pub async fn assign_instructor(
    State(state): State<AppState>,
    Path(jump_id): Path<Uuid>,
    Json(input): Json<AssignInstructorInput>,
) -> AppResult<Json<Jump>> {
    let service = JumpService::new(state.db.clone());
    let jump = service.assign_instructor(jump_id, input.instructor_id).await?;
    Ok(Json(jump))
}

/// Delete a jump
pub async fn delete_jump(
    State(state): State<AppState>,
    Path(jump_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = JumpService::new(state.db.clone());
    service.delete_jump(jump_id).await?;
    Ok(Json(serde_json::json!({ "message": "Jump deleted" })))
}
