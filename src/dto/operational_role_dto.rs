//! DTOs de roles operativos

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::operational_role::OperationalRole;

// Request para asignar un rol operativo a un perfil
#[derive(Debug, Deserialize, Validate)]
pub struct AssignRoleRequest {
    pub profile_id: Uuid,
    pub role: String,

    #[validate(length(max = 50))]
    pub license_number: Option<String>,

    #[validate(length(max = 5))]
    pub license_category: Option<String>,

    pub license_expiry: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
}

// Request para desactivar un rol operativo
#[derive(Debug, Deserialize, Validate)]
pub struct DeactivateRoleRequest {
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

// Response de rol operativo
#[derive(Debug, Serialize)]
pub struct OperationalRoleResponse {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub role: String,
    pub license_number: Option<String>,
    pub license_category: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub active: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub deactivation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OperationalRole> for OperationalRoleResponse {
    fn from(role: OperationalRole) -> Self {
        Self {
            id: role.id,
            profile_id: role.profile_id,
            role: role.role,
            license_number: role.license_number,
            license_category: role.license_category,
            license_expiry: role.license_expiry,
            active: role.active,
            start_date: role.start_date,
            end_date: role.end_date,
            deactivation_reason: role.deactivation_reason,
            created_at: role.created_at,
        }
    }
}
