//! Aircraft fleet HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::aircraft::{Aircraft, AircraftService, CreateAircraftInput, UpdateAircraftInput};
use crate::AppState;

/// List all active aircraft
pub async fn list_aircraft(State(state): State<AppState>) -> AppResult<Json<Vec<Aircraft>>> {
    let service = AircraftService::new(state.db.clone());
    let aircraft = service.get_aircraft_list().await?;
    Ok(Json(aircraft))
}

/// Get a specific aircraft
pub async fn get_aircraft(
    State(state): State<AppState>,
    Path(aircraft_id): Path<Uuid>,
) -> AppResult<Json<Aircraft>> {
    let service = AircraftService::new(state.db.clone());
    let aircraft = service.get_aircraft(aircraft_id).await?;
    Ok(Json(aircraft))
}

/// Register a new aircraft
pub async fn create_aircraft(
    State(state): State<AppState>,
    Json(input): Json<CreateAircraftInput>,
) -> AppResult<(StatusCode, Json<Aircraft>)> {
    let service = AircraftService::new(state.db.clone());
    let aircraft = service.create_aircraft(input).await?;
    Ok((StatusCode::CREATED, Json(aircraft)))
}

/// Update an aircraft
pub async fn update_aircraft(
    State(state): State<AppState>,
    Path(aircraft_id): Path<Uuid>,
    Json(input): Json<UpdateAircraftInput>,
) -> AppResult<Json<Aircraft>> {
    let service = AircraftService::new(state.db.clone());
    let aircraft = service.update_aircraft(aircraft_id, input).await?;
    Ok(Json(aircraft))
}

/// Delete an aircraft
pub async fn delete_aircraft(
    State(state): State<AppState>,
    Path(aircraft_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = AircraftService::new(state.db.clone());
    service.delete_aircraft(aircraft_id).await?;
    Ok(Json(serde_json::json!({ "message": "Aircraft deleted" })))
}
