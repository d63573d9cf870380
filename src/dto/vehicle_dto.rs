//! DTOs de vehículos

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 3, max = 20))]
    pub plate: String,

    #[validate(length(max = 100))]
    pub brand: Option<String>,

    #[validate(length(max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub vehicle_type: String,

    #[validate(range(min = 1950, max = 2035))]
    pub year: Option<i32>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    pub vin: Option<String>,
    pub current_mileage: Option<f64>,
    pub observations: Option<String>,
}

// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 3, max = 20))]
    pub plate: Option<String>,

    #[validate(length(max = 100))]
    pub brand: Option<String>,

    #[validate(length(max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub vehicle_type: Option<String>,

    #[validate(range(min = 1950, max = 2035))]
    pub year: Option<i32>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    pub vin: Option<String>,
    pub active: Option<bool>,
    pub operational_status: Option<String>,
    pub current_mileage: Option<f64>,
    pub observations: Option<String>,
}

// Filtros para búsqueda de vehículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub operational_status: Option<String>,
    pub vehicle_type: Option<String>,
    pub active: Option<bool>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
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
}

// Response de vehículos para listados paginados
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub vehicles: Vec<VehicleResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            plate: vehicle.plate,
            brand: vehicle.brand,
            model: vehicle.model,
            vehicle_type: vehicle.vehicle_type,
            year: vehicle.year,
            color: vehicle.color,
            vin: vehicle.vin,
            active: vehicle.active,
            operational_status: vehicle.operational_status,
            current_mileage: vehicle.current_mileage,
            observations: vehicle.observations,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
