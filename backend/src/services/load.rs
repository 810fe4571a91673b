//! Load scheduling service
//!
//! A load is one scheduled aircraft flight. Jumps reference their load by
//! foreign key; deleting a load cascade-deletes its jumps.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::jump::JumpService;
use crate::models::LoadStatus;
use shared::validation::{
    capacity_utilization, remaining_capacity, validate_altitude, validate_notes,
};

/// Load service for scheduling aircraft flights
#[derive(Clone)]
pub struct LoadService {
    db: PgPool,
}

/// A scheduled aircraft flight
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Load {
    pub id: Uuid,
    pub aircraft_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    pub altitude: i32,
    #[sqlx(try_from = "String")]
    pub status: LoadStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Seat accounting for a single load
#[derive(Debug, Clone, Serialize)]
pub struct LoadCapacityInfo {
    pub load_id: Uuid,
    pub aircraft_registration: String,
    pub capacity: i32,
    pub current_jumpers: i64,
    pub remaining_capacity: i32,
    pub utilization_percentage: Decimal,
}

/// Input for scheduling a load
#[derive(Debug, Deserialize)]
pub struct CreateLoadInput {
    pub aircraft_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    pub altitude: Option<i32>,
    pub status: Option<LoadStatus>,
    pub notes: Option<String>,
}

/// Sparse patch for an existing load. `notes` is nullable in storage, so it
/// uses a double Option: an absent field keeps the stored value, an explicit
/// JSON null clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateLoadInput {
    pub aircraft_id: Option<Uuid>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub altitude: Option<i32>,
    pub status: Option<LoadStatus>,
    #[serde(default, deserialize_with = "crate::services::double_option")]
    pub notes: Option<Option<String>>,
}

const LOAD_COLUMNS: &str = "id, aircraft_id, scheduled_time, altitude, status, notes, created_at";

impl LoadService {
    /// Create a new LoadService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get loads, optionally filtered by status and a scheduled-time lower
    /// bound, ordered by scheduled time
    pub async fn get_loads(
        &self,
        status: Option<LoadStatus>,
        date_from: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<Load>> {
        let loads = sqlx::query_as::<_, Load>(&format!(
            r#"
            SELECT {LOAD_COLUMNS}
            FROM loads
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::timestamptz IS NULL OR scheduled_time >= $2)
            ORDER BY scheduled_time
            "#
        ))
        .bind(status.map(|s| s.as_str()))
        .bind(date_from)
        .fetch_all(&self.db)
        .await?;

        Ok(loads)
    }

    /// Get loads scheduled today (UTC calendar date)
    pub async fn get_todays_loads(&self) -> AppResult<Vec<Load>> {
        let loads = sqlx::query_as::<_, Load>(&format!(
            r#"
            SELECT {LOAD_COLUMNS}
            FROM loads
            WHERE scheduled_time::date = CURRENT_DATE
            ORDER BY scheduled_time
            "#
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(loads)
    }

    /// Get a load by ID
    pub async fn get_load(&self, load_id: Uuid) -> AppResult<Load> {
        let load = sqlx::query_as::<_, Load>(&format!(
            "SELECT {LOAD_COLUMNS} FROM loads WHERE id = $1"
        ))
        .bind(load_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Load".to_string()))?;

        Ok(load)
    }

    /// Schedule a new load
    pub async fn create_load(&self, input: CreateLoadInput) -> AppResult<Load> {
        let altitude = input.altitude.unwrap_or(10_000);
        validate_altitude(altitude).map_err(|msg| AppError::Validation {
            field: "altitude".to_string(),
            message: msg.to_string(),
        })?;
        if let Some(notes) = &input.notes {
            validate_notes(notes).map_err(|msg| AppError::Validation {
                field: "notes".to_string(),
                message: msg.to_string(),
            })?;
        }

        self.ensure_aircraft_exists(input.aircraft_id).await?;

        let load = sqlx::query_as::<_, Load>(&format!(
            r#"
            INSERT INTO loads (aircraft_id, scheduled_time, altitude, status, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LOAD_COLUMNS}
            "#
        ))
        .bind(input.aircraft_id)
        .bind(input.scheduled_time)
        .bind(altitude)
        .bind(input.status.unwrap_or(LoadStatus::Planning).as_str())
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(load)
    }

    /// Update a load, applying only the supplied fields. Status transitions
    /// are free-form; there is no transition graph.
    pub async fn update_load(&self, load_id: Uuid, input: UpdateLoadInput) -> AppResult<Load> {
        let existing = self.get_load(load_id).await?;

        if let Some(altitude) = input.altitude {
            validate_altitude(altitude).map_err(|msg| AppError::Validation {
                field: "altitude".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(Some(notes)) = &input.notes {
            validate_notes(notes).map_err(|msg| AppError::Validation {
                field: "notes".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(aircraft_id) = input.aircraft_id {
            if aircraft_id != existing.aircraft_id {
                self.ensure_aircraft_exists(aircraft_id).await?;
            }
        }

        let aircraft_id = input.aircraft_id.unwrap_or(existing.aircraft_id);
        let scheduled_time = input.scheduled_time.unwrap_or(existing.scheduled_time);
        let altitude = input.altitude.unwrap_or(existing.altitude);
        let status = input.status.unwrap_or(existing.status);
        let notes = input.notes.unwrap_or(existing.notes);

        let load = sqlx::query_as::<_, Load>(&format!(
            r#"
            UPDATE loads
            SET aircraft_id = $1, scheduled_time = $2, altitude = $3, status = $4, notes = $5
            WHERE id = $6
            RETURNING {LOAD_COLUMNS}
            "#
        ))
        .bind(aircraft_id)
        .bind(scheduled_time)
        .bind(altitude)
        .bind(status.as_str())
        .bind(&notes)
        .bind(load_id)
        .fetch_one(&self.db)
        .await?;

        Ok(load)
    }

    /// Delete a load; its jumps go with it (cascade)
    pub async fn delete_load(&self, load_id: Uuid) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM loads WHERE id = $1")
            .bind(load_id)
            .execute(&self.db)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Load".to_string()));
        }
        Ok(())
    }

    /// Seat accounting for a load: capacity, manifested jumpers, remaining
    /// seats and utilization percentage
    pub async fn get_capacity_info(&self, load_id: Uuid) -> AppResult<LoadCapacityInfo> {
        let (registration, capacity): (String, i32) = sqlx::query_as(
            r#"
            SELECT a.registration, a.capacity
            FROM loads l
            JOIN aircraft a ON a.id = l.aircraft_id
            WHERE l.id = $1
            "#,
        )
        .bind(load_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Load".to_string()))?;

        let current_jumpers: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM jumps WHERE load_id = $1")
                .bind(load_id)
                .fetch_one(&self.db)
                .await?;

        Ok(LoadCapacityInfo {
            load_id,
            aircraft_registration: registration,
            capacity,
            current_jumpers,
            remaining_capacity: remaining_capacity(capacity, current_jumpers),
            utilization_percentage: capacity_utilization(capacity, current_jumpers),
        })
    }

    /// Move an existing jump onto this load. The target load must have a free
    /// seat and the jump's instructor assignment must satisfy the
    /// certification rules before the reassignment is written.
    pub async fn add_jumper(&self, load_id: Uuid, jump_id: Uuid) -> AppResult<()> {
        let jump_service = JumpService::new(self.db.clone());
        let jump = jump_service.get_jump(jump_id).await?;

        jump_service
            .check_admission(load_id, jump.jump_type, jump.instructor_id)
            .await?;

        sqlx::query("UPDATE jumps SET load_id = $1 WHERE id = $2")
            .bind(load_id)
            .bind(jump_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Remove a jump from this load. The jump must belong to the load.
    pub async fn remove_jumper(&self, load_id: Uuid, jump_id: Uuid) -> AppResult<()> {
        self.get_load(load_id).await?;

        let deleted = sqlx::query("DELETE FROM jumps WHERE id = $1 AND load_id = $2")
            .bind(jump_id)
            .bind(load_id)
            .execute(&self.db)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Jump".to_string()));
        }
        Ok(())
    }

    async fn ensure_aircraft_exists(&self, aircraft_id: Uuid) -> AppResult<()> {
        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM aircraft WHERE id = $1")
            .bind(aircraft_id)
            .fetch_one(&self.db)
            .await?;

        if exists == 0 {
            return Err(AppError::NotFound("Aircraft".to_string()));
        }
        Ok(())
    }
}
