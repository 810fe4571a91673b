//! Instructor roster HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::instructor::{
    CreateInstructorInput, Instructor, InstructorService, UpdateInstructorInput,
};
use crate::AppState;

/// List all active instructors
pub async fn list_instructors(State(state): State<AppState>) -> AppResult<Json<Vec<Instructor>>> {
    let service = InstructorService::new(state.db.clone());
    let instructors = service.get_instructors().await?;
    Ok(Json(instructors))
}

/// List active tandem-certified instructors
pub async fn list_tandem_instructors(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Instructor>>> {
    let service = InstructorService::new(state.db.clone());
    let instructors = service.get_tandem_instructors().await?;
    Ok(Json(instructors))
}

/// List active AFF-certified instructors
pub async fn list_aff_instructors(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Instructor>>> {
    let service = InstructorService::new(state.db.clone());
    let instructors = service.get_aff_instructors().await?;
    Ok(Json(instructors))
}

/// Get a specific instructor
pub async fn get_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<Uuid>,
) -> AppResult<Json<Instructor>> {
    let service = InstructorService::new(state.db.clone());
    let instructor = service.get_instructor(instructor_id).await?;
    Ok(Json(instructor))
}

/// Add an instructor to the roster
pub async fn create_instructor(
    State(state): State<AppState>,
    Json(input): Json<CreateInstructorInput>,
) -> AppResult<(StatusCode, Json<Instructor>)> {
    let service = InstructorService::new(state.db.clone());
    let instructor = service.create_instructor(input).await?;
    Ok((StatusCode::CREATED, Json(instructor)))
}

/// Update an instructor
pub async fn update_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<Uuid>,
    Json(input): Json<UpdateInstructorInput>,
) -> AppResult<Json<Instructor>> {
    let service = InstructorService::new(state.db.clone());
    let instructor = service.update_instructor(instructor_id, input).await?;
    Ok(Json(instructor))
}

/// Remove an instructor from the roster
pub async fn delete_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = InstructorService::new(state.db.clone());
    service.delete_instructor(instructor_id).await?;
    Ok(Json(serde_json::json!({ "message": "Instructor deleted" })))
}
