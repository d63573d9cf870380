//! Controlador de roles operativos

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::operational_role_dto::{
    AssignRoleRequest, DeactivateRoleRequest, OperationalRoleResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::operational_role::OperationalRoleKind;
use crate::repositories::operational_role_repository::OperationalRoleRepository;
use crate::repositories::profile_repository::ProfileRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::field_error;
use validator::Validate;

pub struct OperationalRoleController {
    roles: OperationalRoleRepository,
    profiles: ProfileRepository,
}

impl OperationalRoleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            roles: OperationalRoleRepository::new(pool.clone()),
            profiles: ProfileRepository::new(pool),
        }
    }

    pub async fn list_by_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<OperationalRoleResponse>, AppError> {
        let roles = self.roles.list_by_profile(profile_id).await?;
        Ok(roles.into_iter().map(OperationalRoleResponse::from).collect())
    }

    pub async fn assign(
        &self,
        user: &AuthenticatedUser,
        request: AssignRoleRequest,
    ) -> Result<ApiResponse<OperationalRoleResponse>, AppError> {
        user.require_admin()?;
        request.validate()?;

        let kind = OperationalRoleKind::parse(&request.role)
            .ok_or_else(|| field_error("role", "Rol operativo inválido"))?;

        if self.profiles.find_by_id(request.profile_id).await?.is_none() {
            return Err(AppError::NotFound("Perfil no encontrado".to_string()));
        }

        if self
            .roles
            .active_role_exists(request.profile_id, kind.as_str())
            .await?
        {
            return Err(AppError::Conflict(
                "El perfil ya tiene este rol operativo activo".to_string(),
            ));
        }

        let role = self
            .roles
            .create(
                request.profile_id,
                kind.as_str().to_string(),
                request.license_number,
                request.license_category,
                request.license_expiry,
                request.start_date.unwrap_or_else(|| Utc::now().date_naive()),
                user.profile_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            OperationalRoleResponse::from(role),
            "Rol operativo asignado exitosamente".to_string(),
        ))
    }

    pub async fn deactivate(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: DeactivateRoleRequest,
    ) -> Result<ApiResponse<OperationalRoleResponse>, AppError> {
        user.require_admin()?;
        request.validate()?;

        let role = self
            .roles
            .deactivate(id, request.reason, user.profile_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            OperationalRoleResponse::from(role),
            "Rol operativo desactivado".to_string(),
        ))
    }
}
