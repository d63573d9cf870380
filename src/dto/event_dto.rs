//! DTOs de eventos de bitácora

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::models::event::Event;

// Request para crear un evento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    pub vehicle_id: Uuid,
    pub operator_profile_id: Option<Uuid>,
    pub assistant_profile_id: Option<Uuid>,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub event_type: String,
    pub shift: Option<String>,

    #[validate(length(max = 500))]
    pub description: String,

    #[validate(length(max = 1000))]
    pub observations: Option<String>,

    pub odometer_start: Option<f64>,
    pub fuel_start: Option<f64>,
    pub location_start: Option<String>,
}

// Request para actualizar un evento activo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    pub operator_profile_id: Option<Uuid>,
    pub assistant_profile_id: Option<Uuid>,
    pub shift: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,

    #[validate(length(max = 1000))]
    pub observations: Option<String>,

    pub odometer_start: Option<f64>,
    pub fuel_start: Option<f64>,
    pub location_start: Option<String>,
}

// Request para cerrar un evento activo
#[derive(Debug, Deserialize, Validate)]
pub struct CloseEventRequest {
    pub end_time: String,
    pub odometer_end: Option<f64>,
    pub fuel_end: Option<f64>,
    pub location_end: Option<String>,

    #[validate(length(max = 1000))]
    pub observations: Option<String>,
}

// Request para cancelar un evento
#[derive(Debug, Deserialize, Validate)]
pub struct CancelEventRequest {
    #[validate(length(max = 1000))]
    pub reason: String,
}

// Filtros para búsqueda de eventos
#[derive(Debug, Deserialize)]
pub struct EventFilters {
    pub vehicle_id: Option<Uuid>,
    pub status: Option<String>,
    pub event_type: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Filtros para estadísticas por vehículo
#[derive(Debug, Deserialize)]
pub struct VehicleStatsFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

// Response de evento
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub operator_profile_id: Option<Uuid>,
    pub assistant_profile_id: Option<Uuid>,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub event_type: String,
    pub shift: Option<String>,
    pub description: String,
    pub observations: Option<String>,
    pub operating_hours: Option<f64>,
    pub odometer_start: Option<f64>,
    pub odometer_end: Option<f64>,
    pub fuel_start: Option<f64>,
    pub fuel_end: Option<f64>,
    pub location_start: Option<String>,
    pub location_end: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
}

// Response de eventos para listados paginados
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

// Response de estadísticas de un vehículo
#[derive(Debug, Serialize)]
pub struct VehicleStatsResponse {
    pub total_events: i64,
    pub total_hours: f64,
    pub total_distance: f64,
    pub events_by_type: HashMap<String, i64>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            vehicle_id: event.vehicle_id,
            operator_profile_id: event.operator_profile_id,
            assistant_profile_id: event.assistant_profile_id,
            event_date: event.event_date,
            start_time: event.start_time,
            end_time: event.end_time,
            event_type: event.event_type,
            shift: event.shift,
            description: event.description,
            observations: event.observations,
            operating_hours: event.operating_hours,
            odometer_start: event.odometer_start,
            odometer_end: event.odometer_end,
            fuel_start: event.fuel_start,
            fuel_end: event.fuel_end,
            location_start: event.location_start,
            location_end: event.location_end,
            status: event.status,
            created_at: event.created_at,
            updated_at: event.updated_at,
            created_by: event.created_by,
            updated_by: event.updated_by,
        }
    }
}
