//! Instructor roster management service

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::InstructorCerts;
use shared::validation::validate_email;

/// Instructor service for managing the instructor roster
#[derive(Clone)]
pub struct InstructorService {
    db: PgPool,
}

/// Instructor information
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Instructor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub tandem_certified: bool,
    pub aff_certified: bool,
    pub is_active: bool,
}

impl Instructor {
    pub fn certs(&self) -> InstructorCerts {
        InstructorCerts {
            tandem_certified: self.tandem_certified,
            aff_certified: self.aff_certified,
        }
    }
}

/// Input for adding an instructor
#[derive(Debug, Deserialize)]
pub struct CreateInstructorInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub tandem_certified: bool,
    #[serde(default)]
    pub aff_certified: bool,
    pub is_active: Option<bool>,
}

/// Input for updating an instructor
#[derive(Debug, Deserialize)]
pub struct UpdateInstructorInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tandem_certified: Option<bool>,
    pub aff_certified: Option<bool>,
    pub is_active: Option<bool>,
}

impl InstructorService {
    /// Create a new InstructorService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all active instructors
    pub async fn get_instructors(&self) -> AppResult<Vec<Instructor>> {
        let instructors = sqlx::query_as::<_, Instructor>(
            r#"
            SELECT id, name, email, tandem_certified, aff_certified, is_active
            FROM instructors
            WHERE is_active = true
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(instructors)
    }

    /// Get active instructors holding the tandem rating
    pub async fn get_tandem_instructors(&self) -> AppResult<Vec<Instructor>> {
        let instructors = sqlx::query_as::<_, Instructor>(
            r#"
            SELECT id, name, email, tandem_certified, aff_certified, is_active
            FROM instructors
            WHERE is_active = true AND tandem_certified = true
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(instructors)
    }

    /// Get active instructors holding the AFF rating
    pub async fn get_aff_instructors(&self) -> AppResult<Vec<Instructor>> {
        let instructors = sqlx::query_as::<_, Instructor>(
            r#"
            SELECT id, name, email, tandem_certified, aff_certified, is_active
            FROM instructors
            WHERE is_active = true AND aff_certified = true
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(instructors)
    }

    /// Get an instructor by ID
    pub async fn get_instructor(&self, instructor_id: Uuid) -> AppResult<Instructor> {
        let instructor = sqlx::query_as::<_, Instructor>(
            r#"
            SELECT id, name, email, tandem_certified, aff_certified, is_active
            FROM instructors
            WHERE id = $1
            "#,
        )
        .bind(instructor_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Instructor".to_string()))?;

        Ok(instructor)
    }

    /// Add a new instructor to the roster
    pub async fn create_instructor(&self, input: CreateInstructorInput) -> AppResult<Instructor> {
        validate_email(&input.email).map_err(|msg| AppError::Validation {
            field: "email".to_string(),
            message: msg.to_string(),
        })?;

        let instructor = sqlx::query_as::<_, Instructor>(
            r#"
            INSERT INTO instructors (name, email, tandem_certified, aff_certified, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, tandem_certified, aff_certified, is_active
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.tandem_certified)
        .bind(input.aff_certified)
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        Ok(instructor)
    }

    /// Update an instructor, applying only the supplied fields
    pub async fn update_instructor(
        &self,
        instructor_id: Uuid,
        input: UpdateInstructorInput,
    ) -> AppResult<Instructor> {
        let existing = self.get_instructor(instructor_id).await?;

        if let Some(email) = &input.email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
            })?;
        }

        let name = input.name.unwrap_or(existing.name);
        let email = input.email.unwrap_or(existing.email);
        let tandem_certified = input.tandem_certified.unwrap_or(existing.tandem_certified);
        let aff_certified = input.aff_certified.unwrap_or(existing.aff_certified);
        let is_active = input.is_active.unwrap_or(existing.is_active);

        let instructor = sqlx::query_as::<_, Instructor>(
            r#"
            UPDATE instructors
            SET name = $1, email = $2, tandem_certified = $3, aff_certified = $4, is_active = $5
            WHERE id = $6
            RETURNING id, name, email, tandem_certified, aff_certified, is_active
            "#,
        )
        .bind(&name)
        .bind(&email)
        .bind(tandem_certified)
        .bind(aff_certified)
        .bind(is_active)
        .bind(instructor_id)
        .fetch_one(&self.db)
        .await?;

        Ok(instructor)
    }

    /// Remove an instructor from the roster
    pub async fn delete_instructor(&self, instructor_id: Uuid) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM instructors WHERE id = $1")
            .bind(instructor_id)
            .execute(&self.db)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Instructor".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::validation::{validate_instructor_assignment, AdmissionError};
    use crate::models::JumpType;

    fn instructor(tandem: bool, aff: bool) -> Instructor {
        Instructor {
            id: Uuid::new_v4(),
            name: "Alex Rivers".to_string(),
            email: "alex@dropzone.example".to_string(),
            tandem_certified: tandem,
            aff_certified: aff,
            is_active: true,
        }
    }

    #[test]
    fn test_certs_carry_both_ratings() {
        let certs = instructor(true, false).certs();
        assert!(certs.tandem_certified);
        assert!(!certs.aff_certified);
    }

    #[test]
    fn test_certs_feed_the_admission_rules() {
        let aff_only = instructor(false, true);
        assert!(validate_instructor_assignment(JumpType::Aff, Some(&aff_only.certs())).is_ok());
        assert_eq!(
            validate_instructor_assignment(JumpType::Tandem, Some(&aff_only.certs())),
            Err(AdmissionError::NotTandemCertified)
        );
    }
}
