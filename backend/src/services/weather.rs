//! Weather report service
//!
//! Reports are operator-entered observations. Suitability flags are recorded
//! per report; the analytics side OR-accumulates them by calendar date.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::WeatherCondition;
use shared::validation::{
    validate_cloud_ceiling, validate_visibility, validate_wind_direction, validate_wind_speed,
};

/// Weather service for managing reports and suitability queries
#[derive(Clone)]
pub struct WeatherService {
    db: PgPool,
}

/// A recorded weather observation
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WeatherReport {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub wind_speed: i32,
    pub wind_direction: i32,
    pub visibility: Decimal,
    pub cloud_ceiling: Option<i32>,
    #[sqlx(try_from = "String")]
    pub condition: WeatherCondition,
    pub suitable_for_tandems: bool,
    pub suitable_for_students: bool,
    pub suitable_for_fun_jumpers: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a weather report
#[derive(Debug, Deserialize)]
pub struct CreateWeatherReportInput {
    pub date: DateTime<Utc>,
    pub wind_speed: i32,
    pub wind_direction: i32,
    pub visibility: Decimal,
    pub cloud_ceiling: Option<i32>,
    pub condition: WeatherCondition,
    pub suitable_for_tandems: Option<bool>,
    pub suitable_for_students: Option<bool>,
    pub suitable_for_fun_jumpers: Option<bool>,
}

/// Sparse patch for an existing weather report. `cloud_ceiling` is nullable
/// in storage, so it uses a double Option: an absent field keeps the stored
/// value, an explicit JSON null clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateWeatherReportInput {
    pub date: Option<DateTime<Utc>>,
    pub wind_speed: Option<i32>,
    pub wind_direction: Option<i32>,
    pub visibility: Option<Decimal>,
    #[serde(default, deserialize_with = "crate::services::double_option")]
    pub cloud_ceiling: Option<Option<i32>>,
    pub condition: Option<WeatherCondition>,
    pub suitable_for_tandems: Option<bool>,
    pub suitable_for_students: Option<bool>,
    pub suitable_for_fun_jumpers: Option<bool>,
}

const WEATHER_COLUMNS: &str = "id, date, wind_speed, wind_direction, visibility, cloud_ceiling, \
                               condition, suitable_for_tandems, suitable_for_students, \
                               suitable_for_fun_jumpers, created_at";

fn validate_ranges(
    wind_speed: i32,
    wind_direction: i32,
    visibility: Decimal,
    cloud_ceiling: Option<i32>,
) -> AppResult<()> {
    validate_wind_speed(wind_speed).map_err(|msg| AppError::Validation {
        field: "wind_speed".to_string(),
        message: msg.to_string(),
    })?;
    validate_wind_direction(wind_direction).map_err(|msg| AppError::Validation {
        field: "wind_direction".to_string(),
        message: msg.to_string(),
    })?;
    validate_visibility(visibility).map_err(|msg| AppError::Validation {
        field: "visibility".to_string(),
        message: msg.to_string(),
    })?;
    if let Some(ceiling) = cloud_ceiling {
        validate_cloud_ceiling(ceiling).map_err(|msg| AppError::Validation {
            field: "cloud_ceiling".to_string(),
            message: msg.to_string(),
        })?;
    }
    Ok(())
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get weather reports, newest first, optionally bounded by a start date
    pub async fn get_reports(
        &self,
        start_date: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<WeatherReport>> {
        let reports = sqlx::query_as::<_, WeatherReport>(&format!(
            r#"
            SELECT {WEATHER_COLUMNS}
            FROM weather_reports
            WHERE ($1::timestamptz IS NULL OR date >= $1)
            ORDER BY date DESC
            "#
        ))
        .bind(start_date)
        .fetch_all(&self.db)
        .await?;

        Ok(reports)
    }

    /// Get a weather report by ID
    pub async fn get_report(&self, report_id: Uuid) -> AppResult<WeatherReport> {
        let report = sqlx::query_as::<_, WeatherReport>(&format!(
            "SELECT {WEATHER_COLUMNS} FROM weather_reports WHERE id = $1"
        ))
        .bind(report_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Weather report".to_string()))?;

        Ok(report)
    }

    /// Get the most recent report
    pub async fn get_current(&self) -> AppResult<WeatherReport> {
        let report = sqlx::query_as::<_, WeatherReport>(&format!(
            "SELECT {WEATHER_COLUMNS} FROM weather_reports ORDER BY date DESC LIMIT 1"
        ))
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No weather reports found".to_string()))?;

        Ok(report)
    }

    /// Get all reports recorded today (UTC calendar date)
    pub async fn get_todays_reports(&self) -> AppResult<Vec<WeatherReport>> {
        let reports = sqlx::query_as::<_, WeatherReport>(&format!(
            r#"
            SELECT {WEATHER_COLUMNS}
            FROM weather_reports
            WHERE date::date = CURRENT_DATE
            ORDER BY date DESC
            "#
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(reports)
    }

    /// Reports marked suitable for every discipline, newest first
    pub async fn get_suitable_for_jumping(&self) -> AppResult<Vec<WeatherReport>> {
        self.get_by_suitability(
            "suitable_for_tandems = true AND suitable_for_students = true \
             AND suitable_for_fun_jumpers = true",
        )
        .await
    }

    /// Reports marked suitable for tandems, newest first
    pub async fn get_tandem_suitable(&self) -> AppResult<Vec<WeatherReport>> {
        self.get_by_suitability("suitable_for_tandems = true").await
    }

    /// Reports marked suitable for students, newest first
    pub async fn get_student_suitable(&self) -> AppResult<Vec<WeatherReport>> {
        self.get_by_suitability("suitable_for_students = true").await
    }

    /// Record a new weather report
    pub async fn create_report(&self, input: CreateWeatherReportInput) -> AppResult<WeatherReport> {
        validate_ranges(
            input.wind_speed,
            input.wind_direction,
            input.visibility,
            input.cloud_ceiling,
        )?;

        let report = sqlx::query_as::<_, WeatherReport>(&format!(
            r#"
            INSERT INTO weather_reports (date, wind_speed, wind_direction, visibility,
                                         cloud_ceiling, condition, suitable_for_tandems,
                                         suitable_for_students, suitable_for_fun_jumpers)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {WEATHER_COLUMNS}
            "#
        ))
        .bind(input.date)
        .bind(input.wind_speed)
        .bind(input.wind_direction)
        .bind(input.visibility)
        .bind(input.cloud_ceiling)
        .bind(input.condition.as_str())
        .bind(input.suitable_for_tandems.unwrap_or(true))
        .bind(input.suitable_for_students.unwrap_or(true))
        .bind(input.suitable_for_fun_jumpers.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(report)
    }

    /// Update a weather report, applying only the supplied fields
    pub async fn update_report(
        &self,
        report_id: Uuid,
        input: UpdateWeatherReportInput,
    ) -> AppResult<WeatherReport> {
        let existing = self.get_report(report_id).await?;

        let date = input.date.unwrap_or(existing.date);
        let wind_speed = input.wind_speed.unwrap_or(existing.wind_speed);
        let wind_direction = input.wind_direction.unwrap_or(existing.wind_direction);
        let visibility = input.visibility.unwrap_or(existing.visibility);
        let cloud_ceiling = input.cloud_ceiling.unwrap_or(existing.cloud_ceiling);
        let condition = input.condition.unwrap_or(existing.condition);
        let suitable_for_tandems = input
            .suitable_for_tandems
            .unwrap_or(existing.suitable_for_tandems);
        let suitable_for_students = input
            .suitable_for_students
            .unwrap_or(existing.suitable_for_students);
        let suitable_for_fun_jumpers = input
            .suitable_for_fun_jumpers
            .unwrap_or(existing.suitable_for_fun_jumpers);

        validate_ranges(wind_speed, wind_direction, visibility, cloud_ceiling)?;

        let report = sqlx::query_as::<_, WeatherReport>(&format!(
            r#"
            UPDATE weather_reports
            SET date = $1, wind_speed = $2, wind_direction = $3, visibility = $4,
                cloud_ceiling = $5, condition = $6, suitable_for_tandems = $7,
                suitable_for_students = $8, suitable_for_fun_jumpers = $9
            WHERE id = $10
            RETURNING {WEATHER_COLUMNS}
            "#
        ))
        .bind(date)
        .bind(wind_speed)
        .bind(wind_direction)
        .bind(visibility)
        .bind(cloud_ceiling)
        .bind(condition.as_str())
        .bind(suitable_for_tandems)
        .bind(suitable_for_students)
        .bind(suitable_for_fun_jumpers)
        .bind(report_id)
        .fetch_one(&self.db)
        .await?;

        Ok(report)
    }

    /// Delete a weather report
    pub async fn delete_report(&self, report_id: Uuid) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM weather_reports WHERE id = $1")
            .bind(report_id)
            .execute(&self.db)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Weather report".to_string()));
        }
        Ok(())
    }

    async fn get_by_suitability(&self, filter: &str) -> AppResult<Vec<WeatherReport>> {
        let reports = sqlx::query_as::<_, WeatherReport>(&format!(
            "SELECT {WEATHER_COLUMNS} FROM weather_reports WHERE {filter} ORDER BY date DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(reports)
    }
}
