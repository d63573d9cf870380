use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::event_controller::EventController;
use crate::dto::common::ApiResponse;
use crate::dto::event_dto::{
    CancelEventRequest, CloseEventRequest, CreateEventRequest, EventFilters, EventListResponse,
    EventResponse, UpdateEventRequest, VehicleStatsFilters, VehicleStatsResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_event_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event))
        .route("/", get(list_events))
        .route("/:id", get(get_event))
        .route("/:id", put(update_event))
        .route("/:id", delete(delete_event))
        .route("/:id/close", post(close_event))
        .route("/:id/cancel", post(cancel_event))
        .route("/vehicle/:vehicle_id/stats", get(vehicle_stats))
}

async fn create_event(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<ApiResponse<EventResponse>>, AppError> {
    let controller = EventController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_events(
    State(state): State<AppState>,
    Query(filters): Query<EventFilters>,
) -> Result<Json<EventListResponse>, AppError> {
    let controller = EventController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    let controller = EventController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_event(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<ApiResponse<EventResponse>>, AppError> {
    let controller = EventController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn close_event(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CloseEventRequest>,
) -> Result<Json<ApiResponse<EventResponse>>, AppError> {
    let controller = EventController::new(state.pool.clone());
    let response = controller.close(&user, id, request).await?;
    Ok(Json(response))
}

async fn cancel_event(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelEventRequest>,
) -> Result<Json<ApiResponse<EventResponse>>, AppError> {
    let controller = EventController::new(state.pool.clone());
    let response = controller.cancel(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_event(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = EventController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Evento eliminado exitosamente"
    })))
}

async fn vehicle_stats(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Query(filters): Query<VehicleStatsFilters>,
) -> Result<Json<VehicleStatsResponse>, AppError> {
    let controller = EventController::new(state.pool.clone());
    let response = controller.vehicle_stats(vehicle_id, filters).await?;
    Ok(Json(response))
}
