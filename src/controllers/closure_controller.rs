//! Controlador de cierres de período
//!
//! Un cierre consume un conjunto de eventos cerrados de un vehículo y
//! congela sus totales. Cada evento pertenece a lo sumo a un cierre; la
//! elegibilidad se deriva por diferencia de conjuntos contra los cierres
//! existentes, de modo que eliminar un cierre libera sus eventos.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::closure_dto::{
    ClosureDetailResponse, ClosureFilters, ClosureListResponse, ClosureResponse,
    ComputeMetricsRequest, CreateClosureRequest, EligibleEventsQuery,
};
use crate::dto::common::ApiResponse;
use crate::dto::event_dto::EventResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::event::EventMetrics;
use crate::repositories::closure_repository::ClosureRepository;
use crate::repositories::event_repository::EventRepository;
use crate::utils::errors::AppError;
use crate::utils::time::{effective_hours, period_operating_hours};
use crate::utils::validation::{field_error, validate_time};
use validator::Validate;

use super::event_controller::parse_shift;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

pub struct ClosureController {
    closures: ClosureRepository,
    events: EventRepository,
}

impl ClosureController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            closures: ClosureRepository::new(pool.clone()),
            events: EventRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: ClosureFilters) -> Result<ClosureListResponse, AppError> {
        let limit = filters.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = filters.offset.unwrap_or(0).max(0);

        let closures = self
            .closures
            .list(filters.vehicle_id, filters.date_from, filters.date_to, limit, offset)
            .await?;

        let total = self
            .closures
            .count(filters.vehicle_id, filters.date_from, filters.date_to)
            .await?;

        Ok(ClosureListResponse {
            closures: closures.into_iter().map(ClosureResponse::from).collect(),
            total,
            limit,
            offset,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ClosureDetailResponse, AppError> {
        let closure = self
            .closures
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cierre no encontrado".to_string()))?;

        let events = self.events.find_by_ids(&closure.event_ids).await?;

        Ok(ClosureDetailResponse {
            closure: ClosureResponse::from(closure),
            events: events.into_iter().map(EventResponse::from).collect(),
        })
    }

    /// Eventos cerrados del vehículo que aún no pertenecen a ningún cierre
    pub async fn eligible_events(
        &self,
        query: EligibleEventsQuery,
    ) -> Result<Vec<EventResponse>, AppError> {
        let events = self
            .events
            .closed_in_range(query.vehicle_id, query.date_from, query.date_to)
            .await?;

        if events.is_empty() {
            return Ok(Vec::new());
        }

        let consumed = self.closures.consumed_event_ids(query.vehicle_id).await?;

        Ok(events
            .into_iter()
            .filter(|event| !consumed.contains(&event.id))
            .map(EventResponse::from)
            .collect())
    }

    /// Métricas agregadas de un conjunto de eventos, para previsualizar
    /// un cierre antes de crearlo
    pub async fn compute_metrics(
        &self,
        request: ComputeMetricsRequest,
    ) -> Result<EventMetrics, AppError> {
        if request.event_ids.is_empty() {
            return Ok(EventMetrics::zero());
        }

        let events = self.events.find_by_ids(&request.event_ids).await?;
        Ok(EventMetrics::from_events(&events))
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateClosureRequest,
    ) -> Result<ApiResponse<ClosureResponse>, AppError> {
        request.validate()?;

        let start_time = validate_time(&request.start_time)?;
        let end_time = validate_time(&request.end_time)?;
        let shift = parse_shift(&request.shift)?;

        let incident_hours = request.incident_hours.unwrap_or(0.0);
        if incident_hours < 0.0 {
            return Err(field_error(
                "incident_hours",
                "Las horas de novedades no pueden ser negativas",
            ));
        }

        let operating_hours = period_operating_hours(
            request.start_date,
            start_time,
            request.end_date,
            end_time,
        );
        let effective = effective_hours(operating_hours, incident_hours);

        let closure = self
            .closures
            .create_with_claim(
                request.vehicle_id,
                request.operator_profile_id,
                request.start_date,
                request.end_date,
                start_time,
                end_time,
                shift,
                operating_hours,
                incident_hours,
                effective,
                request.odometer_start,
                request.odometer_end,
                request.fuel_consumed,
                request.event_ids,
                request.observations,
                user.profile_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            ClosureResponse::from(closure),
            "Cierre creado exitosamente".to_string(),
        ))
    }

    /// Eliminar un cierre (solo administradores). Los eventos consumidos
    /// vuelven a ser elegibles de forma implícita.
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        user.require_admin()?;
        self.closures.delete(id).await?;
        Ok(())
    }
}
