//! Jump manifest service: admission validation and jump mutations
//!
//! Admission onto a load checks remaining seat capacity and jump-type
//! instructor certification before anything is written. The capacity check is
//! advisory: it is not serialized against concurrent admissions to the same
//! load, so two simultaneous creates can both observe a free seat (last write
//! wins, accepted risk).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{AffLevel, JumpType};
use crate::services::instructor::InstructorService;
use shared::validation::{
    validate_capacity, validate_email, validate_exit_order, validate_instructor_assignment,
    validate_notes, AdmissionError,
};

/// Jump service for manifesting jumpers onto loads
#[derive(Clone)]
pub struct JumpService {
    db: PgPool,
}

/// Database row for a jump; enum columns are stored as text
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct JumpRow {
    pub id: Uuid,
    pub load_id: Uuid,
    pub jumper_name: String,
    pub jump_type: String,
    pub exit_order: i32,
    pub instructor_id: Option<Uuid>,
    pub aff_level: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A jumper's slot on a load
#[derive(Debug, Clone, Serialize)]
pub struct Jump {
    pub id: Uuid,
    pub load_id: Uuid,
    pub jumper_name: String,
    pub jump_type: JumpType,
    pub exit_order: i32,
    pub instructor_id: Option<Uuid>,
    pub aff_level: Option<AffLevel>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<JumpRow> for Jump {
    type Error = AppError;

    fn try_from(row: JumpRow) -> Result<Self, Self::Error> {
        let jump_type = row
            .jump_type
            .parse::<JumpType>()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let aff_level = row
            .aff_level
            .map(|s| s.parse::<AffLevel>())
            .transpose()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Jump {
            id: row.id,
            load_id: row.load_id,
            jumper_name: row.jumper_name,
            jump_type,
            exit_order: row.exit_order,
            instructor_id: row.instructor_id,
            aff_level,
            customer_email: row.customer_email,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

pub(crate) fn jumps_from_rows(rows: Vec<JumpRow>) -> AppResult<Vec<Jump>> {
    rows.into_iter().map(Jump::try_from).collect()
}

/// Input for manifesting a jump onto a load
#[derive(Debug, Deserialize)]
pub struct CreateJumpInput {
    pub load_id: Uuid,
    pub jumper_name: String,
    pub jump_type: JumpType,
    pub exit_order: i32,
    pub instructor_id: Option<Uuid>,
    pub aff_level: Option<AffLevel>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
}

/// Sparse patch for an existing jump; only supplied fields are applied.
///
/// Nullable columns use a double Option: an absent field leaves the stored
/// value alone, an explicit JSON null clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateJumpInput {
    pub load_id: Option<Uuid>,
    pub jumper_name: Option<String>,
    pub jump_type: Option<JumpType>,
    pub exit_order: Option<i32>,
    #[serde(default, deserialize_with = "crate::services::double_option")]
    pub instructor_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "crate::services::double_option")]
    pub aff_level: Option<Option<AffLevel>>,
    #[serde(default, deserialize_with = "crate::services::double_option")]
    pub customer_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::services::double_option")]
    pub notes: Option<Option<String>>,
}

const JUMP_COLUMNS: &str = "id, load_id, jumper_name, jump_type, exit_order, instructor_id, \
                            aff_level, customer_email, notes, created_at";

impl JumpService {
    /// Create a new JumpService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get jumps, optionally filtered by load and/or type, in exit order
    pub async fn get_jumps(
        &self,
        load_id: Option<Uuid>,
        jump_type: Option<JumpType>,
    ) -> AppResult<Vec<Jump>> {
        let rows = sqlx::query_as::<_, JumpRow>(&format!(
            r#"
            SELECT {JUMP_COLUMNS}
            FROM jumps
            WHERE ($1::uuid IS NULL OR load_id = $1)
              AND ($2::text IS NULL OR jump_type = $2)
            ORDER BY exit_order
            "#
        ))
        .bind(load_id)
        .bind(jump_type.map(|t| t.as_str()))
        .fetch_all(&self.db)
        .await?;

        jumps_from_rows(rows)
    }

    /// Get all jumps assigned to an instructor
    pub async fn get_jumps_by_instructor(&self, instructor_id: Uuid) -> AppResult<Vec<Jump>> {
        let rows = sqlx::query_as::<_, JumpRow>(&format!(
            "SELECT {JUMP_COLUMNS} FROM jumps WHERE instructor_id = $1 ORDER BY exit_order"
        ))
        .bind(instructor_id)
        .fetch_all(&self.db)
        .await?;

        jumps_from_rows(rows)
    }

    /// Get a jump by ID
    pub async fn get_jump(&self, jump_id: Uuid) -> AppResult<Jump> {
        let row = sqlx::query_as::<_, JumpRow>(&format!(
            "SELECT {JUMP_COLUMNS} FROM jumps WHERE id = $1"
        ))
        .bind(jump_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Jump".to_string()))?;

        row.try_into()
    }

    /// Manifest a new jump onto a load.
    ///
    /// Admission order: load must exist, a seat must remain, then the
    /// instructor requirement and certification for the jump type. The first
    /// failure wins and nothing is persisted.
    pub async fn create_jump(&self, input: CreateJumpInput) -> AppResult<Jump> {
        validate_exit_order(input.exit_order).map_err(|msg| AppError::Validation {
            field: "exit_order".to_string(),
            message: msg.to_string(),
        })?;
        if let Some(email) = &input.customer_email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "customer_email".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(notes) = &input.notes {
            validate_notes(notes).map_err(|msg| AppError::Validation {
                field: "notes".to_string(),
                message: msg.to_string(),
            })?;
        }

        self.check_admission(input.load_id, input.jump_type, input.instructor_id)
            .await?;

        let row = sqlx::query_as::<_, JumpRow>(&format!(
            r#"
            INSERT INTO jumps (load_id, jumper_name, jump_type, exit_order, instructor_id,
                               aff_level, customer_email, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {JUMP_COLUMNS}
            "#
        ))
        .bind(input.load_id)
        .bind(&input.jumper_name)
        .bind(input.jump_type.as_str())
        .bind(input.exit_order)
        .bind(input.instructor_id)
        .bind(input.aff_level.map(|l| l.as_str()))
        .bind(&input.customer_email)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    /// Update a jump, applying only the supplied fields.
    ///
    /// Certification re-runs only when the patch touches `jump_type` or
    /// `instructor_id`; capacity is exempt because the jumper already holds a
    /// seat.
    pub async fn update_jump(&self, jump_id: Uuid, input: UpdateJumpInput) -> AppResult<Jump> {
        let existing = self.get_jump(jump_id).await?;

        if let Some(exit_order) = input.exit_order {
            validate_exit_order(exit_order).map_err(|msg| AppError::Validation {
                field: "exit_order".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(Some(email)) = &input.customer_email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "customer_email".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(Some(notes)) = &input.notes {
            validate_notes(notes).map_err(|msg| AppError::Validation {
                field: "notes".to_string(),
                message: msg.to_string(),
            })?;
        }

        let jump_type = input.jump_type.unwrap_or(existing.jump_type);
        let instructor_id = input.instructor_id.unwrap_or(existing.instructor_id);

        if input.jump_type.is_some() || input.instructor_id.is_some() {
            self.check_certification(jump_type, instructor_id).await?;
        }

        let load_id = input.load_id.unwrap_or(existing.load_id);
        let jumper_name = input.jumper_name.unwrap_or(existing.jumper_name);
        let exit_order = input.exit_order.unwrap_or(existing.exit_order);
        let aff_level = input.aff_level.unwrap_or(existing.aff_level);
        let customer_email = input.customer_email.unwrap_or(existing.customer_email);
        let notes = input.notes.unwrap_or(existing.notes);

        let row = sqlx::query_as::<_, JumpRow>(&format!(
            r#"
            UPDATE jumps
            SET load_id = $1, jumper_name = $2, jump_type = $3, exit_order = $4,
                instructor_id = $5, aff_level = $6, customer_email = $7, notes = $8
            WHERE id = $9
            RETURNING {JUMP_COLUMNS}
            "#
        ))
        .bind(load_id)
        .bind(&jumper_name)
        .bind(jump_type.as_str())
        .bind(exit_order)
        .bind(instructor_id)
        .bind(aff_level.map(|l| l.as_str()))
        .bind(&customer_email)
        .bind(&notes)
        .bind(jump_id)
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    /// Assign an instructor to a jump, checking certification against the
    /// jump's current type.
    pub async fn assign_instructor(&self, jump_id: Uuid, instructor_id: Uuid) -> AppResult<Jump> {
        let existing = self.get_jump(jump_id).await?;

        self.check_certification(existing.jump_type, Some(instructor_id))
            .await?;

        let row = sqlx::query_as::<_, JumpRow>(&format!(
            "UPDATE jumps SET instructor_id = $1 WHERE id = $2 RETURNING {JUMP_COLUMNS}"
        ))
        .bind(instructor_id)
        .bind(jump_id)
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    /// Delete a jump
    pub async fn delete_jump(&self, jump_id: Uuid) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM jumps WHERE id = $1")
            .bind(jump_id)
            .execute(&self.db)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Jump".to_string()));
        }
        Ok(())
    }

    /// Full admission check for placing a jump of `jump_type` onto `load_id`.
    pub(crate) async fn check_admission(
        &self,
        load_id: Uuid,
        jump_type: JumpType,
        instructor_id: Option<Uuid>,
    ) -> AppResult<()> {
        let capacity: i32 = sqlx::query_scalar(
            r#"
            SELECT a.capacity
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

        validate_capacity(capacity, current_jumpers)?;

        self.check_certification(jump_type, instructor_id).await
    }

    /// Certification half of the admission rules: instructor presence,
    /// resolution, and rating for the jump type.
    pub(crate) async fn check_certification(
        &self,
        jump_type: JumpType,
        instructor_id: Option<Uuid>,
    ) -> AppResult<()> {
        if !jump_type.requires_instructor() {
            return Ok(());
        }

        let instructor_id = instructor_id
            .ok_or(AdmissionError::InstructorRequired(jump_type))
            .map_err(AppError::from)?;

        let instructor = InstructorService::new(self.db.clone())
            .get_instructor(instructor_id)
            .await?;

        validate_instructor_assignment(jump_type, Some(&instructor.certs()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_null_clears_instructor() {
        let patch: UpdateJumpInput =
            serde_json::from_str(r#"{"jump_type": "fun_jumper", "instructor_id": null}"#).unwrap();

        assert_eq!(patch.jump_type, Some(JumpType::FunJumper));
        // Explicit null means "clear the assignment"
        assert_eq!(patch.instructor_id, Some(None));

        let existing = Some(Uuid::new_v4());
        assert_eq!(patch.instructor_id.unwrap_or(existing), None);
    }

    #[test]
    fn test_patch_absent_field_keeps_stored_value() {
        let patch: UpdateJumpInput = serde_json::from_str(r#"{"jumper_name": "Sam"}"#).unwrap();

        assert!(patch.instructor_id.is_none());
        assert!(patch.notes.is_none());

        let existing = Some(Uuid::new_v4());
        assert_eq!(patch.instructor_id.unwrap_or(existing), existing);
    }

    #[test]
    fn test_patch_replaces_nullable_values() {
        let patch: UpdateJumpInput = serde_json::from_str(
            r#"{"aff_level": "level_3", "notes": null}"#,
        )
        .unwrap();

        assert_eq!(patch.aff_level, Some(Some(AffLevel::Level3)));
        assert_eq!(patch.notes, Some(None));
    }
}
