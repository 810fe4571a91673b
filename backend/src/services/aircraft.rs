//! Aircraft fleet management service

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validation::validate_aircraft_capacity;

/// Aircraft service for managing the jump fleet
#[derive(Clone)]
pub struct AircraftService {
    db: PgPool,
}

/// Aircraft information
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Aircraft {
    pub id: Uuid,
    pub registration: String,
    pub model: String,
    pub capacity: i32,
    pub is_active: bool,
}

/// Input for registering an aircraft
#[derive(Debug, Deserialize)]
pub struct CreateAircraftInput {
    pub registration: String,
    pub model: String,
    pub capacity: i32,
    pub is_active: Option<bool>,
}

/// Input for updating an aircraft
#[derive(Debug, Deserialize)]
pub struct UpdateAircraftInput {
    pub registration: Option<String>,
    pub model: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

impl AircraftService {
    /// Create a new AircraftService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all active aircraft
    pub async fn get_aircraft_list(&self) -> AppResult<Vec<Aircraft>> {
        let aircraft = sqlx::query_as::<_, Aircraft>(
            r#"
            SELECT id, registration, model, capacity, is_active
            FROM aircraft
            WHERE is_active = true
            ORDER BY registration
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(aircraft)
    }

    /// Get an aircraft by ID
    pub async fn get_aircraft(&self, aircraft_id: Uuid) -> AppResult<Aircraft> {
        let aircraft = sqlx::query_as::<_, Aircraft>(
            "SELECT id, registration, model, capacity, is_active FROM aircraft WHERE id = $1",
        )
        .bind(aircraft_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Aircraft".to_string()))?;

        Ok(aircraft)
    }

    /// Register a new aircraft
    pub async fn create_aircraft(&self, input: CreateAircraftInput) -> AppResult<Aircraft> {
        validate_aircraft_capacity(input.capacity).map_err(|msg| AppError::Validation {
            field: "capacity".to_string(),
            message: msg.to_string(),
        })?;

        self.ensure_unique_registration(&input.registration, None)
            .await?;

        let aircraft = sqlx::query_as::<_, Aircraft>(
            r#"
            INSERT INTO aircraft (registration, model, capacity, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, registration, model, capacity, is_active
            "#,
        )
        .bind(&input.registration)
        .bind(&input.model)
        .bind(input.capacity)
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(aircraft)
    }

    /// Update an aircraft, applying only the supplied fields
    pub async fn update_aircraft(
        &self,
        aircraft_id: Uuid,
        input: UpdateAircraftInput,
    ) -> AppResult<Aircraft> {
        let existing = self.get_aircraft(aircraft_id).await?;

        if let Some(capacity) = input.capacity {
            validate_aircraft_capacity(capacity).map_err(|msg| AppError::Validation {
                field: "capacity".to_string(),
                message: msg.to_string(),
            })?;
        }

        if let Some(registration) = &input.registration {
            if *registration != existing.registration {
                self.ensure_unique_registration(registration, Some(aircraft_id))
                    .await?;
            }
        }

        let registration = input.registration.unwrap_or(existing.registration);
        let model = input.model.unwrap_or(existing.model);
        let capacity = input.capacity.unwrap_or(existing.capacity);
        let is_active = input.is_active.unwrap_or(existing.is_active);

        let aircraft = sqlx::query_as::<_, Aircraft>(
            r#"
            UPDATE aircraft
            SET registration = $1, model = $2, capacity = $3, is_active = $4
            WHERE id = $5
            RETURNING id, registration, model, capacity, is_active
            "#,
        )
        .bind(&registration)
        .bind(&model)
        .bind(capacity)
        .bind(is_active)
        .bind(aircraft_id)
        .fetch_one(&self.db)
        .await?;

        Ok(aircraft)
    }

    /// Delete an aircraft. Refused while any load still references it.
    pub async fn delete_aircraft(&self, aircraft_id: Uuid) -> AppResult<()> {
        self.get_aircraft(aircraft_id).await?;

        let load_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM loads WHERE aircraft_id = $1")
                .bind(aircraft_id)
                .fetch_one(&self.db)
                .await?;

        if load_count > 0 {
            return Err(AppError::Conflict {
                resource: "aircraft".to_string(),
                message: "Cannot delete aircraft with existing loads".to_string(),
            });
        }

        sqlx::query("DELETE FROM aircraft WHERE id = $1")
            .bind(aircraft_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Reject registration collisions, optionally ignoring one aircraft row
    async fn ensure_unique_registration(
        &self,
        registration: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<()> {
        let existing: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM aircraft
            WHERE registration = $1 AND ($2::uuid IS NULL OR id != $2)
            "#,
        )
        .bind(registration)
        .bind(exclude_id)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("registration".to_string()));
        }
        Ok(())
    }
}
