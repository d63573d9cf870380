//! Controlador del ciclo de vida de eventos de bitácora
//!
//! Estados: `active` -> `closed` | `cancelled`. Ningún estado terminal
//! admite transiciones de salida; cancelar un evento ya cancelado se trata
//! como no-op idempotente.

use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::event_dto::{
    CancelEventRequest, CloseEventRequest, CreateEventRequest, EventFilters, EventListResponse,
    EventResponse, UpdateEventRequest, VehicleStatsFilters, VehicleStatsResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::event::{Event, EventStatus, EventType, Shift};
use crate::repositories::event_repository::EventRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::time::event_duration_hours;
use crate::utils::validation::{field_error, validate_not_empty, validate_time};
use validator::Validate;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

/// Verificar que el evento admite una transición de salida
fn ensure_active(status: EventStatus) -> Result<(), AppError> {
    match status {
        EventStatus::Active => Ok(()),
        EventStatus::Closed | EventStatus::Cancelled => Err(AppError::InvalidState(
            "El evento ya está cerrado o cancelado".to_string(),
        )),
    }
}

pub(crate) fn parse_shift(value: &Option<String>) -> Result<Option<String>, AppError> {
    match value {
        Some(raw) => {
            let shift =
                Shift::parse(raw).ok_or_else(|| field_error("shift", "Turno inválido"))?;
            Ok(Some(shift.as_str().to_string()))
        }
        None => Ok(None),
    }
}

pub struct EventController {
    events: EventRepository,
    vehicles: VehicleRepository,
}

impl EventController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateEventRequest,
    ) -> Result<ApiResponse<EventResponse>, AppError> {
        request.validate()?;
        validate_not_empty("description", &request.description)?;

        let event_type = EventType::parse(&request.event_type)
            .ok_or_else(|| field_error("event_type", "Tipo de evento inválido"))?;
        let shift = parse_shift(&request.shift)?;
        let start_time = validate_time(&request.start_time)?;

        // Validar que el vehículo existe
        if !self.vehicles.exists(request.vehicle_id).await? {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        let event = self
            .events
            .create(
                request.vehicle_id,
                request.operator_profile_id,
                request.assistant_profile_id,
                request.event_date,
                start_time,
                event_type.as_str().to_string(),
                shift,
                request.description,
                request.observations,
                request.odometer_start,
                request.fuel_start,
                request.location_start,
                user.profile_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            EventResponse::from(event),
            "Evento creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<EventResponse, AppError> {
        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        Ok(EventResponse::from(event))
    }

    pub async fn list(&self, filters: EventFilters) -> Result<EventListResponse, AppError> {
        let limit = filters.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = filters.offset.unwrap_or(0).max(0);

        let events = self
            .events
            .list(
                filters.vehicle_id,
                filters.status.clone(),
                filters.event_type.clone(),
                filters.date_from,
                filters.date_to,
                limit,
                offset,
            )
            .await?;

        let total = self
            .events
            .count(
                filters.vehicle_id,
                filters.status,
                filters.event_type,
                filters.date_from,
                filters.date_to,
            )
            .await?;

        Ok(EventListResponse {
            events: events.into_iter().map(EventResponse::from).collect(),
            total,
            limit,
            offset,
        })
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<ApiResponse<EventResponse>, AppError> {
        request.validate()?;
        let shift = parse_shift(&request.shift)?;

        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        // Solo los eventos activos admiten edición
        ensure_active(event.status_kind())?;

        let updated = self
            .events
            .update(
                id,
                request.operator_profile_id,
                request.assistant_profile_id,
                shift,
                request.description,
                request.observations,
                request.odometer_start,
                request.fuel_start,
                request.location_start,
                user.profile_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            EventResponse::from(updated),
            "Evento actualizado exitosamente".to_string(),
        ))
    }

    /// Cerrar un evento activo calculando sus horas de operación.
    ///
    /// Una duración nula o negativa (hora de fin anterior a la de inicio)
    /// se registra como null, nunca como valor negativo.
    pub async fn close(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: CloseEventRequest,
    ) -> Result<ApiResponse<EventResponse>, AppError> {
        request.validate()?;
        let end_time = validate_time(&request.end_time)?;

        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        ensure_active(event.status_kind())?;

        // El odómetro no puede retroceder dentro del mismo evento
        if let (Some(start), Some(end)) = (event.odometer_start, request.odometer_end) {
            if end < start {
                return Err(field_error(
                    "odometer_end",
                    "El odómetro final no puede ser menor al inicial",
                ));
            }
        }

        let operating_hours = event_duration_hours(event.event_date, event.start_time, end_time);

        let closed = self
            .events
            .close(
                id,
                end_time,
                operating_hours,
                request.odometer_end,
                request.fuel_end,
                request.location_end,
                request.observations,
                user.profile_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            EventResponse::from(closed),
            "Evento cerrado exitosamente".to_string(),
        ))
    }

    pub async fn cancel(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: CancelEventRequest,
    ) -> Result<ApiResponse<EventResponse>, AppError> {
        request.validate()?;
        validate_not_empty("reason", &request.reason)?;

        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        // Re-cancelar es un no-op idempotente
        if event.status_kind() == EventStatus::Cancelled {
            return Ok(ApiResponse::success_with_message(
                EventResponse::from(event),
                "El evento ya estaba cancelado".to_string(),
            ));
        }

        ensure_active(event.status_kind())?;

        let cancelled = self
            .events
            .cancel(id, request.reason, user.profile_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            EventResponse::from(cancelled),
            "Evento cancelado exitosamente".to_string(),
        ))
    }

    /// Eliminar un evento (solo administradores)
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        user.require_admin()?;
        self.events.delete(id).await?;
        Ok(())
    }

    /// Estadísticas de eventos cerrados de un vehículo en un rango de fechas
    pub async fn vehicle_stats(
        &self,
        vehicle_id: Uuid,
        filters: VehicleStatsFilters,
    ) -> Result<VehicleStatsResponse, AppError> {
        let events = self
            .events
            .closed_in_range(vehicle_id, filters.date_from, filters.date_to)
            .await?;

        Ok(build_vehicle_stats(&events))
    }
}

fn build_vehicle_stats(events: &[Event]) -> VehicleStatsResponse {
    let mut events_by_type: HashMap<String, i64> = HashMap::new();
    let mut total_hours = 0.0;
    let mut total_distance = 0.0;

    for event in events {
        total_hours += event.operating_hours.unwrap_or(0.0);
        total_distance += event.distance().unwrap_or(0.0);
        *events_by_type.entry(event.event_type.clone()).or_insert(0) += 1;
    }

    VehicleStatsResponse {
        total_events: events.len() as i64,
        total_hours,
        total_distance,
        events_by_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn closed_event(event_type: &str, hours: Option<f64>, odometers: Option<(f64, f64)>) -> Event {
        Event {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            operator_profile_id: None,
            assistant_profile_id: None,
            event_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: Some(NaiveTime::from_hms_opt(16, 0, 0).unwrap()),
            event_type: event_type.to_string(),
            shift: None,
            description: "Ruta A".to_string(),
            observations: None,
            operating_hours: hours,
            odometer_start: odometers.map(|(s, _)| s),
            odometer_end: odometers.map(|(_, e)| e),
            fuel_start: None,
            fuel_end: None,
            location_start: None,
            location_end: None,
            status: "closed".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: Uuid::new_v4(),
            updated_by: None,
        }
    }

    #[test]
    fn test_ensure_active_permite_solo_activos() {
        assert!(ensure_active(EventStatus::Active).is_ok());
        assert!(matches!(
            ensure_active(EventStatus::Closed),
            Err(AppError::InvalidState(_))
        ));
        assert!(matches!(
            ensure_active(EventStatus::Cancelled),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn test_parse_shift() {
        assert_eq!(parse_shift(&None).unwrap(), None);
        assert_eq!(
            parse_shift(&Some("night".to_string())).unwrap(),
            Some("night".to_string())
        );
        assert!(parse_shift(&Some("afternoon".to_string())).is_err());
    }

    #[test]
    fn test_estadisticas_por_vehiculo() {
        let events = vec![
            closed_event("operation", Some(4.0), Some((0.0, 100.0))),
            closed_event("operation", Some(3.0), Some((100.0, 150.0))),
            closed_event("maintenance", None, None),
        ];

        let stats = build_vehicle_stats(&events);
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.total_hours, 7.0);
        assert_eq!(stats.total_distance, 150.0);
        assert_eq!(stats.events_by_type.get("operation"), Some(&2));
        assert_eq!(stats.events_by_type.get("maintenance"), Some(&1));
    }

    #[test]
    fn test_estadisticas_conjunto_vacio() {
        let stats = build_vehicle_stats(&[]);
        assert_eq!(stats.total_events, 0);
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.total_distance, 0.0);
        assert!(stats.events_by_type.is_empty());
    }
}
