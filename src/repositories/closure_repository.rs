use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::closure::Closure;
use crate::utils::errors::AppError;

pub struct ClosureRepository {
    pool: PgPool,
}

impl ClosureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear un cierre reclamando sus eventos de forma atómica.
    ///
    /// La transacción bloquea la fila del vehículo, por lo que dos cierres
    /// concurrentes del mismo vehículo se serializan y un evento no puede
    /// quedar consumido por dos cierres. Si algún evento ya pertenece a un
    /// cierre existente la operación falla con `Conflict`.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_with_claim(
        &self,
        vehicle_id: Uuid,
        operator_profile_id: Option<Uuid>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        shift: Option<String>,
        operating_hours: f64,
        incident_hours: f64,
        effective_hours: f64,
        odometer_start: Option<f64>,
        odometer_end: Option<f64>,
        fuel_consumed: Option<f64>,
        event_ids: Vec<Uuid>,
        observations: Option<String>,
        closed_by: Uuid,
    ) -> Result<Closure, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let vehicle: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(vehicle_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::Database)?;

        if vehicle.is_none() {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        let rows: Vec<(Vec<Uuid>,)> =
            sqlx::query_as("SELECT event_ids FROM logbook_closures WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .fetch_all(&mut *tx)
                .await
                .map_err(AppError::Database)?;

        let consumed: HashSet<Uuid> = rows.into_iter().flat_map(|(ids,)| ids).collect();
        let already_claimed: Vec<Uuid> = event_ids
            .iter()
            .filter(|id| consumed.contains(id))
            .copied()
            .collect();

        if !already_claimed.is_empty() {
            return Err(AppError::Conflict(format!(
                "Los eventos {:?} ya pertenecen a otro cierre",
                already_claimed
            )));
        }

        let closure = sqlx::query_as::<_, Closure>(
            r#"
            INSERT INTO logbook_closures (
                id, vehicle_id, operator_profile_id, start_date, end_date,
                start_time, end_time, shift, operating_hours, incident_hours,
                effective_hours, odometer_start, odometer_end, fuel_consumed,
                event_ids, observations, closed_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(operator_profile_id)
        .bind(start_date)
        .bind(end_date)
        .bind(start_time)
        .bind(end_time)
        .bind(shift)
        .bind(operating_hours)
        .bind(incident_hours)
        .bind(effective_hours)
        .bind(odometer_start)
        .bind(odometer_end)
        .bind(fuel_consumed)
        .bind(event_ids)
        .bind(observations)
        .bind(closed_by)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok(closure)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Closure>, AppError> {
        let closure = sqlx::query_as::<_, Closure>("SELECT * FROM logbook_closures WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(closure)
    }

    pub async fn list(
        &self,
        vehicle_id: Option<Uuid>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Closure>, AppError> {
        let closures = sqlx::query_as::<_, Closure>(
            r#"
            SELECT * FROM logbook_closures
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
            AND ($2::date IS NULL OR start_date >= $2)
            AND ($3::date IS NULL OR end_date <= $3)
            ORDER BY start_date DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(vehicle_id)
        .bind(date_from)
        .bind(date_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(closures)
    }

    pub async fn count(
        &self,
        vehicle_id: Option<Uuid>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM logbook_closures
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
            AND ($2::date IS NULL OR start_date >= $2)
            AND ($3::date IS NULL OR end_date <= $3)
            "#,
        )
        .bind(vehicle_id)
        .bind(date_from)
        .bind(date_to)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.0)
    }

    /// Ids de eventos ya consumidos por algún cierre del vehículo.
    ///
    /// La elegibilidad de un evento se deriva siempre por diferencia de
    /// conjuntos contra este resultado: al eliminar un cierre sus eventos
    /// vuelven a ser elegibles sin ningún paso extra.
    pub async fn consumed_event_ids(&self, vehicle_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let rows: Vec<(Vec<Uuid>,)> =
            sqlx::query_as("SELECT event_ids FROM logbook_closures WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(rows.into_iter().flat_map(|(ids,)| ids).collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM logbook_closures WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cierre no encontrado".to_string()));
        }

        Ok(())
    }
}
