use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use crate::utils::validation::field_error;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        plate: String,
        brand: Option<String>,
        model: Option<String>,
        vehicle_type: String,
        year: Option<i32>,
        color: Option<String>,
        vin: Option<String>,
        current_mileage: Option<f64>,
        observations: Option<String>,
        created_by: Uuid,
    ) -> Result<Vehicle, AppError> {
        let mileage = match current_mileage {
            Some(value) => Some(
                Decimal::from_f64_retain(value)
                    .ok_or_else(|| field_error("current_mileage", "Kilometraje inválido"))?,
            ),
            None => None,
        };

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, plate, brand, model, vehicle_type, year, color, vin,
                active, operational_status, current_mileage, observations,
                created_at, updated_at, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, 'operational', $9, $10, $11, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(plate)
        .bind(brand)
        .bind(model)
        .bind(vehicle_type)
        .bind(year)
        .bind(color)
        .bind(vin)
        .bind(mileage)
        .bind(observations)
        .bind(Utc::now())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(vehicle)
    }

    /// Verificar que el vehículo existe sin traer la fila completa
    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn plate_exists(&self, plate: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1)")
                .bind(plate)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn list(
        &self,
        operational_status: Option<String>,
        vehicle_type: Option<String>,
        active: Option<bool>,
        search: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Vehicle>, AppError> {
        let pattern = search.map(|s| format!("%{}%", s));

        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::text IS NULL OR operational_status = $1)
            AND ($2::text IS NULL OR vehicle_type = $2)
            AND ($3::boolean IS NULL OR active = $3)
            AND ($4::text IS NULL OR plate ILIKE $4 OR brand ILIKE $4 OR model ILIKE $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(operational_status)
        .bind(vehicle_type)
        .bind(active)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(vehicles)
    }

    pub async fn count(
        &self,
        operational_status: Option<String>,
        vehicle_type: Option<String>,
        active: Option<bool>,
        search: Option<String>,
    ) -> Result<i64, AppError> {
        let pattern = search.map(|s| format!("%{}%", s));

        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM vehicles
            WHERE ($1::text IS NULL OR operational_status = $1)
            AND ($2::text IS NULL OR vehicle_type = $2)
            AND ($3::boolean IS NULL OR active = $3)
            AND ($4::text IS NULL OR plate ILIKE $4 OR brand ILIKE $4 OR model ILIKE $4)
            "#,
        )
        .bind(operational_status)
        .bind(vehicle_type)
        .bind(active)
        .bind(pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.0)
    }

    /// Vehículos activos y operativos, para los formularios de eventos
    pub async fn list_available(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE active = TRUE AND operational_status = 'operational'
            ORDER BY plate ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(vehicles)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        plate: Option<String>,
        brand: Option<String>,
        model: Option<String>,
        vehicle_type: Option<String>,
        year: Option<i32>,
        color: Option<String>,
        vin: Option<String>,
        active: Option<bool>,
        operational_status: Option<String>,
        current_mileage: Option<f64>,
        observations: Option<String>,
        updated_by: Uuid,
    ) -> Result<Vehicle, AppError> {
        let mileage = match current_mileage {
            Some(value) => Some(
                Decimal::from_f64_retain(value)
                    .ok_or_else(|| field_error("current_mileage", "Kilometraje inválido"))?,
            ),
            None => None,
        };

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles SET
                plate = COALESCE($2, plate),
                brand = COALESCE($3, brand),
                model = COALESCE($4, model),
                vehicle_type = COALESCE($5, vehicle_type),
                year = COALESCE($6, year),
                color = COALESCE($7, color),
                vin = COALESCE($8, vin),
                active = COALESCE($9, active),
                operational_status = COALESCE($10, operational_status),
                current_mileage = COALESCE($11, current_mileage),
                observations = COALESCE($12, observations),
                updated_at = $13,
                updated_by = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plate)
        .bind(brand)
        .bind(model)
        .bind(vehicle_type)
        .bind(year)
        .bind(color)
        .bind(vin)
        .bind(active)
        .bind(operational_status)
        .bind(mileage)
        .bind(observations)
        .bind(Utc::now())
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        Ok(())
    }
}
