//! Modelo de Profile
//!
//! Perfiles de usuario del sistema. El rol controla el acceso a las
//! operaciones administrativas (vehículos, usuarios, eliminaciones).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rol de usuario del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Inspector,
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Inspector => "inspector",
            Role::Administrator => "administrator",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "user" => Some(Role::User),
            "inspector" => Some(Role::Inspector),
            "administrator" => Some(Role::Administrator),
            _ => None,
        }
    }
}

/// Profile - mapea exactamente a la tabla profiles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub active: bool,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Rol tipado del perfil; perfiles con rol desconocido degradan a `User`
    pub fn role_kind(&self) -> Role {
        Role::parse(&self.role).unwrap_or(Role::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::Inspector, Role::Administrator] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_desconocido() {
        assert_eq!(Role::parse("superuser"), None);
    }
}
