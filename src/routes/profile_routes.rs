use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::profile_controller::ProfileController;
use crate::dto::common::ApiResponse;
use crate::dto::profile_dto::{
    CreateProfileRequest, ProfileFilters, ProfileListResponse, ProfileResponse,
    UpdateActiveRequest, UpdateRoleRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_profile_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_profile))
        .route("/", get(list_profiles))
        .route("/me", get(me))
        .route("/:id/role", put(update_role))
        .route("/:id/active", put(update_active))
}

async fn me(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.me(&user).await?;
    Ok(Json(response))
}

async fn list_profiles(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(filters): Query<ProfileFilters>,
) -> Result<Json<ProfileListResponse>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.list(&user, filters).await?;
    Ok(Json(response))
}

async fn create_profile(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn update_role(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.update_role(&user, id, request).await?;
    Ok(Json(response))
}

async fn update_active(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateActiveRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.update_active(&user, id, request).await?;
    Ok(Json(response))
}
