use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::event::Event;
use crate::utils::errors::AppError;

pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        vehicle_id: Uuid,
        operator_profile_id: Option<Uuid>,
        assistant_profile_id: Option<Uuid>,
        event_date: NaiveDate,
        start_time: NaiveTime,
        event_type: String,
        shift: Option<String>,
        description: String,
        observations: Option<String>,
        odometer_start: Option<f64>,
        fuel_start: Option<f64>,
        location_start: Option<String>,
        created_by: Uuid,
    ) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO logbook_events (
                id, vehicle_id, operator_profile_id, assistant_profile_id,
                event_date, start_time, event_type, shift, description,
                observations, odometer_start, fuel_start, location_start,
                status, created_at, updated_at, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 'active', $14, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(operator_profile_id)
        .bind(assistant_profile_id)
        .bind(event_date)
        .bind(start_time)
        .bind(event_type)
        .bind(shift)
        .bind(description)
        .bind(observations)
        .bind(odometer_start)
        .bind(fuel_start)
        .bind(location_start)
        .bind(Utc::now())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(event)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM logbook_events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(event)
    }

    /// Traer un conjunto de eventos por id, en orden cronológico
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Event>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM logbook_events
            WHERE id = ANY($1)
            ORDER BY event_date ASC, start_time ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(events)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn list(
        &self,
        vehicle_id: Option<Uuid>,
        status: Option<String>,
        event_type: Option<String>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM logbook_events
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
            AND ($2::text IS NULL OR status = $2)
            AND ($3::text IS NULL OR event_type = $3)
            AND ($4::date IS NULL OR event_date >= $4)
            AND ($5::date IS NULL OR event_date <= $5)
            ORDER BY event_date DESC, start_time DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(vehicle_id)
        .bind(status)
        .bind(event_type)
        .bind(date_from)
        .bind(date_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(events)
    }

    pub async fn count(
        &self,
        vehicle_id: Option<Uuid>,
        status: Option<String>,
        event_type: Option<String>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM logbook_events
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
            AND ($2::text IS NULL OR status = $2)
            AND ($3::text IS NULL OR event_type = $3)
            AND ($4::date IS NULL OR event_date >= $4)
            AND ($5::date IS NULL OR event_date <= $5)
            "#,
        )
        .bind(vehicle_id)
        .bind(status)
        .bind(event_type)
        .bind(date_from)
        .bind(date_to)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.0)
    }

    /// Eventos cerrados de un vehículo dentro de un rango de fechas
    pub async fn closed_in_range(
        &self,
        vehicle_id: Uuid,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM logbook_events
            WHERE vehicle_id = $1
            AND status = 'closed'
            AND ($2::date IS NULL OR event_date >= $2)
            AND ($3::date IS NULL OR event_date <= $3)
            ORDER BY event_date DESC, start_time DESC
            "#,
        )
        .bind(vehicle_id)
        .bind(date_from)
        .bind(date_to)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(events)
    }

    /// Verificar si existe algún evento que referencie al vehículo
    pub async fn exists_for_vehicle(&self, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM logbook_events WHERE vehicle_id = $1)")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        operator_profile_id: Option<Uuid>,
        assistant_profile_id: Option<Uuid>,
        shift: Option<String>,
        description: Option<String>,
        observations: Option<String>,
        odometer_start: Option<f64>,
        fuel_start: Option<f64>,
        location_start: Option<String>,
        updated_by: Uuid,
    ) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE logbook_events SET
                operator_profile_id = COALESCE($2, operator_profile_id),
                assistant_profile_id = COALESCE($3, assistant_profile_id),
                shift = COALESCE($4, shift),
                description = COALESCE($5, description),
                observations = COALESCE($6, observations),
                odometer_start = COALESCE($7, odometer_start),
                fuel_start = COALESCE($8, fuel_start),
                location_start = COALESCE($9, location_start),
                updated_at = $10,
                updated_by = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(operator_profile_id)
        .bind(assistant_profile_id)
        .bind(shift)
        .bind(description)
        .bind(observations)
        .bind(odometer_start)
        .bind(fuel_start)
        .bind(location_start)
        .bind(Utc::now())
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        Ok(event)
    }

    /// Cerrar un evento: registra hora de fin, métricas de cierre y duración.
    ///
    /// Las métricas de fin se persisten tal como llegan (null cuando se
    /// omiten); las observaciones solo se sobreescriben si vienen en el
    /// request.
    #[allow(clippy::too_many_arguments)]
    pub async fn close(
        &self,
        id: Uuid,
        end_time: NaiveTime,
        operating_hours: Option<f64>,
        odometer_end: Option<f64>,
        fuel_end: Option<f64>,
        location_end: Option<String>,
        observations: Option<String>,
        updated_by: Uuid,
    ) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE logbook_events SET
                end_time = $2,
                operating_hours = $3,
                odometer_end = $4,
                fuel_end = $5,
                location_end = $6,
                observations = COALESCE($7, observations),
                status = 'closed',
                updated_at = $8,
                updated_by = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(end_time)
        .bind(operating_hours)
        .bind(odometer_end)
        .bind(fuel_end)
        .bind(location_end)
        .bind(observations)
        .bind(Utc::now())
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        Ok(event)
    }

    /// Cancelar un evento: las observaciones quedan con el motivo
    pub async fn cancel(
        &self,
        id: Uuid,
        reason: String,
        updated_by: Uuid,
    ) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE logbook_events SET
                status = 'cancelled',
                observations = $2,
                updated_at = $3,
                updated_by = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reason)
        .bind(Utc::now())
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        Ok(event)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM logbook_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Evento no encontrado".to_string()));
        }

        Ok(())
    }
}
