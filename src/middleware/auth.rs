//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados. La identidad y el rol se
//! inyectan en cada request como `AuthenticatedUser`; toda operación
//! restringida pasa por `require_admin`.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::environment::EnvironmentConfig,
    models::profile::Role,
    repositories::profile_repository::ProfileRepository,
    state::AppState,
    utils::errors::AppError,
};

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // profile_id
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub profile_id: Uuid,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Chequeo único de capacidad administrativa; lo consumen todas las
    /// operaciones restringidas a administradores.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role != Role::Administrator {
            return Err(AppError::Forbidden(
                "Se requieren permisos de administrador".to_string(),
            ));
        }
        Ok(())
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    // Decodificar y validar JWT
    let token_data = decode::<Claims>(
        auth_header,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let claims = token_data.claims;

    let profile_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // Verificar que el perfil existe y sigue activo; el rol vigente
    // se toma de la base de datos, no del token
    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_id(profile_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    if !profile.active {
        return Err(AppError::Unauthorized("Usuario inactivo".to_string()));
    }

    let authenticated_user = AuthenticatedUser {
        profile_id: profile.id,
        role: profile.role_kind(),
    };

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Función para generar JWT token
pub fn generate_jwt_token(
    profile_id: Uuid,
    role: Role,
    config: &EnvironmentConfig,
) -> Result<(String, DateTime<Utc>), AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = Claims {
        sub: profile_id.to_string(),
        role: role.as_str().to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    let token = encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Error generando JWT: {}", e)))?;

    Ok((token, expires_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            jwt_secret: "secreto-de-prueba".to_string(),
            jwt_expiration: 3600,
            cors_origins: vec![],
        }
    }

    #[test]
    fn test_jwt_roundtrip() {
        let config = test_config();
        let profile_id = Uuid::new_v4();

        let (token, expires_at) =
            generate_jwt_token(profile_id, Role::Inspector, &config).unwrap();
        assert!(expires_at > Utc::now());

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, profile_id.to_string());
        assert_eq!(decoded.claims.role, "inspector");
    }

    #[test]
    fn test_jwt_firma_invalida() {
        let config = test_config();
        let (token, _) = generate_jwt_token(Uuid::new_v4(), Role::User, &config).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("otro-secreto".as_ref()),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthenticatedUser {
            profile_id: Uuid::new_v4(),
            role: Role::Administrator,
        };
        assert!(admin.require_admin().is_ok());

        for role in [Role::User, Role::Inspector] {
            let user = AuthenticatedUser {
                profile_id: Uuid::new_v4(),
                role,
            };
            assert!(matches!(user.require_admin(), Err(AppError::Forbidden(_))));
        }
    }
}
