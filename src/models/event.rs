//! Modelo de Event (bitácora)
//!
//! Un evento de bitácora registra una ocurrencia operativa de un vehículo:
//! operación, mantenimiento, falla, inactividad o traslado. El ciclo de vida
//! es `active` -> `closed` (cierre normal) o `active` -> `cancelled`
//! (terminación anormal); ambos estados finales son terminales.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del ciclo de vida de un evento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Closed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Active => "active",
            EventStatus::Closed => "closed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<EventStatus> {
        match value {
            "active" => Some(EventStatus::Active),
            "closed" => Some(EventStatus::Closed),
            "cancelled" => Some(EventStatus::Cancelled),
            _ => None,
        }
    }
}

/// Tipo de evento de bitácora
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Operation,
    Maintenance,
    Failure,
    Inactive,
    Transfer,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Operation => "operation",
            EventType::Maintenance => "maintenance",
            EventType::Failure => "failure",
            EventType::Inactive => "inactive",
            EventType::Transfer => "transfer",
        }
    }

    pub fn parse(value: &str) -> Option<EventType> {
        match value {
            "operation" => Some(EventType::Operation),
            "maintenance" => Some(EventType::Maintenance),
            "failure" => Some(EventType::Failure),
            "inactive" => Some(EventType::Inactive),
            "transfer" => Some(EventType::Transfer),
            _ => None,
        }
    }
}

/// Turno del evento o cierre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Day,
    Night,
    Full,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Day => "day",
            Shift::Night => "night",
            Shift::Full => "full",
        }
    }

    pub fn parse(value: &str) -> Option<Shift> {
        match value {
            "day" => Some(Shift::Day),
            "night" => Some(Shift::Night),
            "full" => Some(Shift::Full),
            _ => None,
        }
    }
}

/// Event principal - mapea exactamente a la tabla logbook_events
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
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

impl Event {
    /// Estado tipado del evento; estados desconocidos degradan a `Cancelled`
    pub fn status_kind(&self) -> EventStatus {
        EventStatus::parse(&self.status).unwrap_or(EventStatus::Cancelled)
    }

    /// Kilómetros recorridos, solo cuando ambos odómetros fueron registrados
    pub fn distance(&self) -> Option<f64> {
        match (self.odometer_start, self.odometer_end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Combustible consumido, solo cuando ambos niveles fueron registrados.
    /// Un reabastecimiento a mitad del evento produce un valor negativo que
    /// se acepta tal cual.
    pub fn fuel_consumed(&self) -> Option<f64> {
        match (self.fuel_start, self.fuel_end) {
            (Some(start), Some(end)) => Some(start - end),
            _ => None,
        }
    }
}

/// Métricas agregadas sobre un conjunto de eventos
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventMetrics {
    pub count: i64,
    pub total_hours: f64,
    pub total_distance: f64,
    pub total_fuel_consumed: f64,
}

impl EventMetrics {
    pub fn zero() -> Self {
        Self {
            count: 0,
            total_hours: 0.0,
            total_distance: 0.0,
            total_fuel_consumed: 0.0,
        }
    }

    /// Sumar las métricas de un conjunto de eventos.
    ///
    /// Los valores ausentes aportan cero a la suma; no excluyen el evento
    /// del conteo.
    pub fn from_events(events: &[Event]) -> Self {
        let mut metrics = Self::zero();
        for event in events {
            metrics.count += 1;
            metrics.total_hours += event.operating_hours.unwrap_or(0.0);
            metrics.total_distance += event.distance().unwrap_or(0.0);
            metrics.total_fuel_consumed += event.fuel_consumed().unwrap_or(0.0);
        }
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(hours: Option<f64>, odometers: Option<(f64, f64)>, fuel: Option<(f64, f64)>) -> Event {
        Event {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            operator_profile_id: None,
            assistant_profile_id: None,
            event_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: Some(NaiveTime::from_hms_opt(16, 0, 0).unwrap()),
            event_type: "operation".to_string(),
            shift: None,
            description: "Ruta A".to_string(),
            observations: None,
            operating_hours: hours,
            odometer_start: odometers.map(|(s, _)| s),
            odometer_end: odometers.map(|(_, e)| e),
            fuel_start: fuel.map(|(s, _)| s),
            fuel_end: fuel.map(|(_, e)| e),
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
    fn test_enums_roundtrip() {
        for status in [EventStatus::Active, EventStatus::Closed, EventStatus::Cancelled] {
            assert_eq!(EventStatus::parse(status.as_str()), Some(status));
        }
        for kind in [
            EventType::Operation,
            EventType::Maintenance,
            EventType::Failure,
            EventType::Inactive,
            EventType::Transfer,
        ] {
            assert_eq!(EventType::parse(kind.as_str()), Some(kind));
        }
        for shift in [Shift::Day, Shift::Night, Shift::Full] {
            assert_eq!(Shift::parse(shift.as_str()), Some(shift));
        }
        assert_eq!(EventType::parse("vacation"), None);
    }

    #[test]
    fn test_distance_requiere_ambos_odometros() {
        let event = sample_event(None, Some((100.0, 250.0)), None);
        assert_eq!(event.distance(), Some(150.0));

        let mut partial = sample_event(None, None, None);
        partial.odometer_start = Some(100.0);
        assert_eq!(partial.distance(), None);
    }

    #[test]
    fn test_combustible_acepta_valores_negativos() {
        // Repostaje a mitad del evento: nivel final mayor al inicial
        let event = sample_event(None, None, Some((20.0, 35.0)));
        assert_eq!(event.fuel_consumed(), Some(-15.0));
    }

    #[test]
    fn test_metricas_conjunto_vacio() {
        let metrics = EventMetrics::from_events(&[]);
        assert_eq!(metrics, EventMetrics::zero());
    }

    #[test]
    fn test_metricas_suman_por_evento() {
        let e1 = sample_event(Some(4.0), Some((0.0, 100.0)), Some((40.0, 30.0)));
        let e2 = sample_event(Some(3.0), Some((100.0, 150.0)), None);
        let metrics = EventMetrics::from_events(&[e1, e2]);

        assert_eq!(metrics.count, 2);
        assert_eq!(metrics.total_hours, 7.0);
        assert_eq!(metrics.total_distance, 150.0);
        assert_eq!(metrics.total_fuel_consumed, 10.0);
    }

    #[test]
    fn test_metricas_valores_ausentes_aportan_cero() {
        let e1 = sample_event(Some(2.0), None, None);
        let e2 = sample_event(None, Some((10.0, 20.0)), None);
        let metrics = EventMetrics::from_events(&[e1, e2]);

        assert_eq!(metrics.count, 2);
        assert_eq!(metrics.total_hours, 2.0);
        assert_eq!(metrics.total_distance, 10.0);
        assert_eq!(metrics.total_fuel_consumed, 0.0);
    }

    #[test]
    fn test_metricas_son_sumables_por_particion() {
        let a = vec![
            sample_event(Some(4.0), Some((0.0, 100.0)), Some((40.0, 30.0))),
            sample_event(Some(1.5), None, None),
        ];
        let b = vec![sample_event(Some(3.0), Some((100.0, 150.0)), Some((30.0, 22.0)))];

        let union: Vec<Event> = a.iter().chain(b.iter()).cloned().collect();
        let merged = EventMetrics::from_events(&union);
        let partial_a = EventMetrics::from_events(&a);
        let partial_b = EventMetrics::from_events(&b);

        assert_eq!(merged.count, partial_a.count + partial_b.count);
        assert_eq!(merged.total_hours, partial_a.total_hours + partial_b.total_hours);
        assert_eq!(merged.total_distance, partial_a.total_distance + partial_b.total_distance);
        assert_eq!(
            merged.total_fuel_consumed,
            partial_a.total_fuel_consumed + partial_b.total_fuel_consumed
        );
    }
}
