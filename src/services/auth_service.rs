//! Servicio de autenticación
//!
//! Login contra la tabla de perfiles con verificación bcrypt y emisión
//! de JWT. El hash de contraseñas también vive aquí para que la creación
//! de perfiles use el mismo costo.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::profile_dto::ProfileResponse;
use crate::middleware::auth::generate_jwt_token;
use crate::repositories::profile_repository::ProfileRepository;
use crate::utils::errors::AppError;

pub struct AuthService {
    repository: ProfileRepository,
    config: EnvironmentConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            repository: ProfileRepository::new(pool),
            config,
        }
    }

    /// Autenticar un usuario por email y contraseña
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let profile = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        if !profile.active {
            return Err(AppError::Unauthorized("Usuario inactivo".to_string()));
        }

        let valid = verify_password(&request.password, &profile.password_hash)?;
        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let (token, expires_at) =
            generate_jwt_token(profile.id, profile.role_kind(), &self.config)?;

        Ok(LoginResponse {
            token,
            expires_at,
            profile: ProfileResponse::from(profile),
        })
    }
}

/// Hashear una contraseña con el costo por defecto
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))
}

/// Verificar una contraseña contra su hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash).map_err(|e| AppError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_y_verificacion() {
        let hashed = hash_password("clave-segura").unwrap();
        assert_ne!(hashed, "clave-segura");
        assert!(verify_password("clave-segura", &hashed).unwrap());
        assert!(!verify_password("clave-incorrecta", &hashed).unwrap());
    }
}
