//! Modelo de OperationalRole
//!
//! Roles operativos asignados a un perfil (operario, auxiliar, inspector),
//! con los datos de licencia de conducción cuando aplican.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipo de rol operativo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalRoleKind {
    Operator,
    Assistant,
    Inspector,
}

impl OperationalRoleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationalRoleKind::Operator => "operator",
            OperationalRoleKind::Assistant => "assistant",
            OperationalRoleKind::Inspector => "inspector",
        }
    }

    pub fn parse(value: &str) -> Option<OperationalRoleKind> {
        match value {
            "operator" => Some(OperationalRoleKind::Operator),
            "assistant" => Some(OperationalRoleKind::Assistant),
            "inspector" => Some(OperationalRoleKind::Inspector),
            _ => None,
        }
    }
}

/// OperationalRole - mapea exactamente a la tabla operational_roles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OperationalRole {
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
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}
