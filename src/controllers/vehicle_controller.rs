//! Controlador de vehículos
//!
//! CRUD de la flota. Todas las mutaciones requieren rol de administrador;
//! un vehículo con eventos de bitácora registrados no puede eliminarse.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters, VehicleListResponse,
    VehicleResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::OperationalStatus;
use crate::repositories::event_repository::EventRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::validation::{field_error, validate_not_empty};
use validator::Validate;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

pub struct VehicleController {
    vehicles: VehicleRepository,
    events: EventRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            events: EventRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        user.require_admin()?;
        request.validate()?;
        validate_not_empty("plate", &request.plate)?;

        if self.vehicles.plate_exists(&request.plate).await? {
            return Err(conflict_error("Vehículo", "placa", &request.plate));
        }

        let vehicle = self
            .vehicles
            .create(
                request.plate,
                request.brand,
                request.model,
                request.vehicle_type,
                request.year,
                request.color,
                request.vin,
                request.current_mileage,
                request.observations,
                user.profile_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<VehicleListResponse, AppError> {
        let limit = filters.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = filters.offset.unwrap_or(0).max(0);

        let vehicles = self
            .vehicles
            .list(
                filters.operational_status.clone(),
                filters.vehicle_type.clone(),
                filters.active,
                filters.search.clone(),
                limit,
                offset,
            )
            .await?;

        let total = self
            .vehicles
            .count(
                filters.operational_status,
                filters.vehicle_type,
                filters.active,
                filters.search,
            )
            .await?;

        Ok(VehicleListResponse {
            vehicles: vehicles.into_iter().map(VehicleResponse::from).collect(),
            total,
            limit,
            offset,
        })
    }

    /// Vehículos disponibles para registrar eventos
    pub async fn list_available(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.vehicles.list_available().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        user.require_admin()?;
        request.validate()?;

        if let Some(status) = &request.operational_status {
            if OperationalStatus::parse(status).is_none() {
                return Err(field_error("operational_status", "Estado operativo inválido"));
            }
        }

        let vehicle = self
            .vehicles
            .update(
                id,
                request.plate,
                request.brand,
                request.model,
                request.vehicle_type,
                request.year,
                request.color,
                request.vin,
                request.active,
                request.operational_status,
                request.current_mileage,
                request.observations,
                user.profile_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    /// Eliminar un vehículo sin eventos registrados (solo administradores)
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        user.require_admin()?;

        if self.vehicles.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        if self.events.exists_for_vehicle(id).await? {
            return Err(AppError::Conflict(
                "No se puede eliminar un vehículo con eventos registrados".to_string(),
            ));
        }

        self.vehicles.delete(id).await?;
        Ok(())
    }
}
