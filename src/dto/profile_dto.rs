//! DTOs de perfiles de usuario

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::profile::Profile;

// Request para crear un perfil
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 2, max = 100))]
    pub full_name: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    pub role: Option<String>,
}

// Request para cambiar el rol de un perfil
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

// Request para activar/desactivar un perfil
#[derive(Debug, Deserialize)]
pub struct UpdateActiveRequest {
    pub active: bool,
}

// Filtros para búsqueda de perfiles
#[derive(Debug, Deserialize)]
pub struct ProfileFilters {
    pub role: Option<String>,
    pub active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Response de perfil (sin password_hash)
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

// Response de perfiles para listados paginados
#[derive(Debug, Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<ProfileResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role: profile.role,
            active: profile.active,
            created_at: profile.created_at,
        }
    }
}
