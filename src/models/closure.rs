//! Modelo de Closure (cierre de período)
//!
//! Un cierre es el registro de conciliación de un período operativo de un
//! vehículo: consume un conjunto de eventos cerrados y congela sus totales.
//! Una vez creado es inmutable; solo un administrador puede eliminarlo.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Closure principal - mapea exactamente a la tabla logbook_closures
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Closure {
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
