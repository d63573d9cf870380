use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::closure_controller::ClosureController;
use crate::dto::closure_dto::{
    ClosureDetailResponse, ClosureFilters, ClosureListResponse, ClosureResponse,
    ComputeMetricsRequest, CreateClosureRequest, EligibleEventsQuery,
};
use crate::dto::common::ApiResponse;
use crate::dto::event_dto::EventResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::event::EventMetrics;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_closure_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_closure))
        .route("/", get(list_closures))
        .route("/eligible-events", get(eligible_events))
        .route("/metrics", post(compute_metrics))
        .route("/:id", get(get_closure))
        .route("/:id", delete(delete_closure))
}

async fn create_closure(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<CreateClosureRequest>,
) -> Result<Json<ApiResponse<ClosureResponse>>, AppError> {
    let controller = ClosureController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_closures(
    State(state): State<AppState>,
    Query(filters): Query<ClosureFilters>,
) -> Result<Json<ClosureListResponse>, AppError> {
    let controller = ClosureController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_closure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClosureDetailResponse>, AppError> {
    let controller = ClosureController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn eligible_events(
    State(state): State<AppState>,
    Query(query): Query<EligibleEventsQuery>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let controller = ClosureController::new(state.pool.clone());
    let response = controller.eligible_events(query).await?;
    Ok(Json(response))
}

async fn compute_metrics(
    State(state): State<AppState>,
    Json(request): Json<ComputeMetricsRequest>,
) -> Result<Json<EventMetrics>, AppError> {
    let controller = ClosureController::new(state.pool.clone());
    let response = controller.compute_metrics(request).await?;
    Ok(Json(response))
}

async fn delete_closure(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ClosureController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cierre eliminado exitosamente"
    })))
}
