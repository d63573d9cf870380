use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::Profile;
use crate::utils::errors::AppError;

pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        email: String,
        full_name: String,
        password_hash: String,
        role: String,
    ) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, email, full_name, role, active, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, TRUE, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(full_name)
        .bind(role)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(profile)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(profile)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(profile)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM profiles WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn list(
        &self,
        role: Option<String>,
        active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Profile>, AppError> {
        let profiles = sqlx::query_as::<_, Profile>(
            r#"
            SELECT * FROM profiles
            WHERE ($1::text IS NULL OR role = $1)
            AND ($2::boolean IS NULL OR active = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(role)
        .bind(active)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(profiles)
    }

    pub async fn count(
        &self,
        role: Option<String>,
        active: Option<bool>,
    ) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM profiles
            WHERE ($1::text IS NULL OR role = $1)
            AND ($2::boolean IS NULL OR active = $2)
            "#,
        )
        .bind(role)
        .bind(active)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn update_role(&self, id: Uuid, role: String) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET role = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Perfil no encontrado".to_string()))?;

        Ok(profile)
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET active = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Perfil no encontrado".to_string()))?;

        Ok(profile)
    }
}
