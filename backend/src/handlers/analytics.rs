//! Analytics and reporting HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::analytics::{
    AnalyticsService, InstructorWorkload, JumpTypeDistribution, LoadStatistics,
    WeatherImpactReport,
};
use crate::AppState;

#[derive(Deserialize)]
pub struct WorkloadQuery {
    pub instructor_id: Option<Uuid>,
    pub since: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct DistributionQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct DailyCapacityQuery {
    pub format: Option<String>, // "json" or "csv"
}

#[derive(Deserialize)]
pub struct WeatherImpactQuery {
    pub days: Option<i64>,
}

fn service(state: &AppState) -> AnalyticsService {
    AnalyticsService::new(state.db.clone(), state.config.rates.clone())
}

/// Statistics for a single load
pub async fn get_load_statistics(
    State(state): State<AppState>,
    Path(load_id): Path<Uuid>,
) -> AppResult<Json<LoadStatistics>> {
    let stats = service(&state).get_load_statistics(load_id).await?;
    Ok(Json(stats))
}

/// Instructor workload, for one instructor or the whole roster
pub async fn get_instructor_workload(
    State(state): State<AppState>,
    Query(query): Query<WorkloadQuery>,
) -> AppResult<Json<Vec<InstructorWorkload>>> {
    let workloads = service(&state)
        .get_instructor_workload(query.instructor_id, query.since)
        .await?;
    Ok(Json(workloads))
}

/// Capacity report for one calendar date, as JSON or CSV
pub async fn get_daily_capacity(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Query(query): Query<DailyCapacityQuery>,
) -> AppResult<impl IntoResponse> {
    let report = service(&state).get_daily_capacity(date).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = AnalyticsService::export_to_csv(&report.loads)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"daily_capacity.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(report).into_response())
    }
}

/// Jump type distribution over an optional date window
pub async fn get_jump_type_distribution(
    State(state): State<AppState>,
    Query(query): Query<DistributionQuery>,
) -> AppResult<Json<JumpTypeDistribution>> {
    let distribution = service(&state)
        .get_jump_type_distribution(query.start_date, query.end_date)
        .await?;
    Ok(Json(distribution))
}

/// Weather suitability rollup over a trailing window (default 7 days)
pub async fn get_weather_impact(
    State(state): State<AppState>,
    Query(query): Query<WeatherImpactQuery>,
) -> AppResult<Json<WeatherImpactReport>> {
    let report = service(&state)
        .get_weather_impact(query.days.unwrap_or(7))
        .await?;
    Ok(Json(report))
}
