//! Controlador de perfiles de usuario
//!
//! La creación de perfiles y los cambios de rol o estado son operaciones
//! administrativas.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::profile_dto::{
    CreateProfileRequest, ProfileFilters, ProfileListResponse, ProfileResponse,
    UpdateActiveRequest, UpdateRoleRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::profile::Role;
use crate::repositories::profile_repository::ProfileRepository;
use crate::services::auth_service::hash_password;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::validation::field_error;
use validator::Validate;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

pub struct ProfileController {
    profiles: ProfileRepository,
}

impl ProfileController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            profiles: ProfileRepository::new(pool),
        }
    }

    /// Perfil del usuario autenticado
    pub async fn me(&self, user: &AuthenticatedUser) -> Result<ProfileResponse, AppError> {
        let profile = self
            .profiles
            .find_by_id(user.profile_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Perfil no encontrado".to_string()))?;

        Ok(ProfileResponse::from(profile))
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        filters: ProfileFilters,
    ) -> Result<ProfileListResponse, AppError> {
        user.require_admin()?;

        let limit = filters.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = filters.offset.unwrap_or(0).max(0);

        let profiles = self
            .profiles
            .list(filters.role.clone(), filters.active, limit, offset)
            .await?;

        let total = self.profiles.count(filters.role, filters.active).await?;

        Ok(ProfileListResponse {
            profiles: profiles.into_iter().map(ProfileResponse::from).collect(),
            total,
            limit,
            offset,
        })
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateProfileRequest,
    ) -> Result<ApiResponse<ProfileResponse>, AppError> {
        user.require_admin()?;
        request.validate()?;

        let role = match &request.role {
            Some(raw) => Role::parse(raw).ok_or_else(|| field_error("role", "Rol inválido"))?,
            None => Role::User,
        };

        if self.profiles.email_exists(&request.email).await? {
            return Err(conflict_error("Perfil", "correo", &request.email));
        }

        let password_hash = hash_password(&request.password)?;

        let profile = self
            .profiles
            .create(
                request.email,
                request.full_name,
                password_hash,
                role.as_str().to_string(),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            ProfileResponse::from(profile),
            "Perfil creado exitosamente".to_string(),
        ))
    }

    pub async fn update_role(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateRoleRequest,
    ) -> Result<ApiResponse<ProfileResponse>, AppError> {
        user.require_admin()?;

        let role =
            Role::parse(&request.role).ok_or_else(|| field_error("role", "Rol inválido"))?;

        let profile = self
            .profiles
            .update_role(id, role.as_str().to_string())
            .await?;

        Ok(ApiResponse::success_with_message(
            ProfileResponse::from(profile),
            "Rol actualizado exitosamente".to_string(),
        ))
    }

    pub async fn update_active(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateActiveRequest,
    ) -> Result<ApiResponse<ProfileResponse>, AppError> {
        user.require_admin()?;

        let profile = self.profiles.set_active(id, request.active).await?;

        Ok(ApiResponse::success_with_message(
            ProfileResponse::from(profile),
            "Perfil actualizado exitosamente".to_string(),
        ))
    }
}
