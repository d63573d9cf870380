//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado operativo del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalStatus {
    Operational,
    Maintenance,
    Repair,
    Inactive,
}

impl OperationalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationalStatus::Operational => "operational",
            OperationalStatus::Maintenance => "maintenance",
            OperationalStatus::Repair => "repair",
            OperationalStatus::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<OperationalStatus> {
        match value {
            "operational" => Some(OperationalStatus::Operational),
            "maintenance" => Some(OperationalStatus::Maintenance),
            "repair" => Some(OperationalStatus::Repair),
            "inactive" => Some(OperationalStatus::Inactive),
            _ => None,
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: String,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub vin: Option<String>,
    pub active: bool,
    pub operational_status: String,
    pub current_mileage: Option<Decimal>,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operational_status_roundtrip() {
        for status in [
            OperationalStatus::Operational,
            OperationalStatus::Maintenance,
            OperationalStatus::Repair,
            OperationalStatus::Inactive,
        ] {
            assert_eq!(OperationalStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OperationalStatus::parse("scrapped"), None);
    }
}
