//! DTOs de cierres de período

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::event_dto::EventResponse;
use crate::models::closure::Closure;

// Request para crear un cierre de período
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClosureRequest {
    pub vehicle_id: Uuid,
    pub operator_profile_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub shift: Option<String>,
    pub event_ids: Vec<Uuid>,
    pub odometer_start: Option<f64>,
    pub odometer_end: Option<f64>,
    pub fuel_consumed: Option<f64>,
    pub incident_hours: Option<f64>,

    #[validate(length(max = 1000))]
    pub observations: Option<String>,
}

// Filtros para búsqueda de cierres
#[derive(Debug, Deserialize)]
pub struct ClosureFilters {
    pub vehicle_id: Option<Uuid>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Query de eventos elegibles para un cierre
#[derive(Debug, Deserialize)]
pub struct EligibleEventsQuery {
    pub vehicle_id: Uuid,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

// Request para calcular métricas de un conjunto de eventos
#[derive(Debug, Deserialize)]
pub struct ComputeMetricsRequest {
    pub event_ids: Vec<Uuid>,
}

// Response de cierre
#[derive(Debug, Serialize)]
pub struct ClosureResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub operator_profile_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub shift: Option<String>,
    pub operating_hours: f64,
    pub incident_hours: f64,
    pub effective_hours: f64,
    pub odometer_start: Option<f64>,
    pub odometer_end: Option<f64>,
    pub fuel_consumed: Option<f64>,
    pub event_ids: Vec<Uuid>,
    pub observations: Option<String>,
    pub closed_by: Uuid,
    pub created_at: DateTime<Utc>,
}

// Response de cierre con sus eventos consumidos
#[derive(Debug, Serialize)]
pub struct ClosureDetailResponse {
    #[serde(flatten)]
    pub closure: ClosureResponse,
    pub events: Vec<EventResponse>,
}

// Response de cierres para listados paginados
#[derive(Debug, Serialize)]
pub struct ClosureListResponse {
    pub closures: Vec<ClosureResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl From<Closure> for ClosureResponse {
    fn from(closure: Closure) -> Self {
        Self {
            id: closure.id,
            vehicle_id: closure.vehicle_id,
            operator_profile_id: closure.operator_profile_id,
            start_date: closure.start_date,
            end_date: closure.end_date,
            start_time: closure.start_time,
            end_time: closure.end_time,
            shift: closure.shift,
            operating_hours: closure.operating_hours,
            incident_hours: closure.incident_hours,
            effective_hours: closure.effective_hours,
            odometer_start: closure.odometer_start,
            odometer_end: closure.odometer_end,
            fuel_consumed: closure.fuel_consumed,
            event_ids: closure.event_ids,
            observations: closure.observations,
            closed_by: closure.closed_by,
            created_at: closure.created_at,
        }
    }
}
