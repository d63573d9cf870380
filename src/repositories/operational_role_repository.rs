use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::operational_role::OperationalRole;
use crate::utils::errors::AppError;

pub struct OperationalRoleRepository {
    pool: PgPool,
}

impl OperationalRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        profile_id: Uuid,
        role: String,
        license_number: Option<String>,
        license_category: Option<String>,
        license_expiry: Option<NaiveDate>,
        start_date: NaiveDate,
        created_by: Uuid,
    ) -> Result<OperationalRole, AppError> {
        let operational_role = sqlx::query_as::<_, OperationalRole>(
            r#"
            INSERT INTO operational_roles (
                id, profile_id, role, license_number, license_category,
                license_expiry, active, start_date, created_at, updated_at, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, $8, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(role)
        .bind(license_number)
        .bind(license_category)
        .bind(license_expiry)
        .bind(start_date)
        .bind(Utc::now())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(operational_role)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OperationalRole>, AppError> {
        let role = sqlx::query_as::<_, OperationalRole>(
            "SELECT * FROM operational_roles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(role)
    }

    pub async fn list_by_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<OperationalRole>, AppError> {
        let roles = sqlx::query_as::<_, OperationalRole>(
            r#"
            SELECT * FROM operational_roles
            WHERE profile_id = $1
            ORDER BY start_date DESC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(roles)
    }

    /// Verificar si el perfil ya tiene el rol activo
    pub async fn active_role_exists(
        &self,
        profile_id: Uuid,
        role: &str,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM operational_roles
                WHERE profile_id = $1 AND role = $2 AND active = TRUE
            )
            "#,
        )
        .bind(profile_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn deactivate(
        &self,
        id: Uuid,
        reason: String,
        updated_by: Uuid,
    ) -> Result<OperationalRole, AppError> {
        let role = sqlx::query_as::<_, OperationalRole>(
            r#"
            UPDATE operational_roles SET
                active = FALSE,
                end_date = $2,
                deactivation_reason = $3,
                updated_at = $4,
                updated_by = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Utc::now().date_naive())
        .bind(reason)
        .bind(Utc::now())
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Rol operativo no encontrado".to_string()))?;

        Ok(role)
    }
}
