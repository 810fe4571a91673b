//! Weather report HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::weather::{
    CreateWeatherReportInput, UpdateWeatherReportInput, WeatherReport, WeatherService,
};
use crate::AppState;

#[derive(Deserialize)]
pub struct WeatherListQuery {
    pub start_date: Option<DateTime<Utc>>,
}

/// List weather reports, newest first
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<WeatherListQuery>,
) -> AppResult<Json<Vec<WeatherReport>>> {
    let service = WeatherService::new(state.db.clone());
    let reports = service.get_reports(query.start_date).await?;
    Ok(Json(reports))
}

/// Get the most recent weather report
pub async fn get_current(State(state): State<AppState>) -> AppResult<Json<WeatherReport>> {
    let service = WeatherService::new(state.db.clone());
    let report = service.get_current().await?;
    Ok(Json(report))
}

/// List reports recorded today
pub async fn list_todays_reports(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WeatherReport>>> {
    let service = WeatherService::new(state.db.clone());
    let reports = service.get_todays_reports().await?;
    Ok(Json(reports))
}

/// Reports suitable for every discipline
pub async fn list_suitable_for_jumping(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WeatherReport>>> {
    let service = WeatherService::new(state.db.clone());
    let reports = service.get_suitable_for_jumping().await?;
    Ok(Json(reports))
}

/// Reports suitable for tandems
pub async fn list_tandem_suitable(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WeatherReport>>> {
    let service = WeatherService::new(state.db.clone());
    let reports = service.get_tandem_suitable().await?;
    Ok(Json(reports))
}

/// Reports suitable for students
pub async fn list_student_suitable(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WeatherReport>>> {
    let service = WeatherService::new(state.db.clone());
    let reports = service.get_student_suitable().await?;
    Ok(Json(reports))
}

/// Get a specific weather report
pub async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> AppResult<Json<WeatherReport>> {
    let service = WeatherService::new(state.db.clone());
    let report = service.get_report(report_id).await?;
    Ok(Json(report))
}

/// Record a new weather report
pub async fn create_report(
    State(state): State<AppState>,
    Json(input): Json<CreateWeatherReportInput>,
) -> AppResult<(StatusCode, Json<WeatherReport>)> {
    let service = WeatherService::new(state.db.clone());
    let report = service.create_report(input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Update a weather report
pub async fn update_report(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
    Json(input): Json<UpdateWeatherReportInput>,
) -> AppResult<Json<WeatherReport>> {
    let service = WeatherService::new(state.db.clone());
    let report = service.update_report(report_id, input).await?;
    Ok(Json(report))
}

/// Delete a weather report
pub async fn delete_report(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = WeatherService::new(state.db.clone());
    service.delete_report(report_id).await?;
    Ok(Json(serde_json::json!({ "message": "Weather report deleted" })))
}
