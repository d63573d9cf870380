use axum::{extract::State, routing::post, Json, Router};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    request.validate().map_err(AppError::Validation)?;

    let service = AuthService::new(state.pool.clone(), state.config.clone());
    let response = service.login(request).await?;
    Ok(Json(response))
}
