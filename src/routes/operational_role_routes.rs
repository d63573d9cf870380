use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::operational_role_controller::OperationalRoleController;
use crate::dto::common::ApiResponse;
use crate::dto::operational_role_dto::{
    AssignRoleRequest, DeactivateRoleRequest, OperationalRoleResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_operational_role_router() -> Router<AppState> {
    Router::new()
        .route("/", post(assign_role))
        .route("/profile/:profile_id", get(list_by_profile))
        .route("/:id/deactivate", post(deactivate_role))
}

async fn assign_role(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<AssignRoleRequest>,
) -> Result<Json<ApiResponse<OperationalRoleResponse>>, AppError> {
    let controller = OperationalRoleController::new(state.pool.clone());
    let response = controller.assign(&user, request).await?;
    Ok(Json(response))
}

async fn list_by_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<Vec<OperationalRoleResponse>>, AppError> {
    let controller = OperationalRoleController::new(state.pool.clone());
    let response = controller.list_by_profile(profile_id).await?;
    Ok(Json(response))
}

async fn deactivate_role(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DeactivateRoleRequest>,
) -> Result<Json<ApiResponse<OperationalRoleResponse>>, AppError> {
    let controller = OperationalRoleController::new(state.pool.clone());
    let response = controller.deactivate(&user, id, request).await?;
    Ok(Json(response))
}
