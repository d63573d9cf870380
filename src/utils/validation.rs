//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::NaiveTime;
use validator::{ValidationError, ValidationErrors};

use crate::utils::errors::AppError;

/// Validar y convertir string a hora del día.
///
/// Acepta `HH:MM` (formularios) y `HH:MM:SS` (valores almacenados).
pub fn validate_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| field_error("hora", "Formato de hora inválido, se espera HH:MM"))
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(field_error(field, "El campo es requerido"));
    }
    Ok(())
}

/// Construir un `AppError::Validation` para un solo campo
pub fn field_error(field: &'static str, message: &'static str) -> AppError {
    let mut error = ValidationError::new("invalid");
    error.message = Some(message.into());

    let mut errors = ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_time_acepta_hhmm() {
        let t = validate_time("08:30").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn test_validate_time_acepta_hhmmss() {
        let t = validate_time("16:45:30").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(16, 45, 30).unwrap());
    }

    #[test]
    fn test_validate_time_rechaza_formato_invalido() {
        assert!(validate_time("25:00").is_err());
        assert!(validate_time("no-es-hora").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("descripcion", "Ruta A").is_ok());
        assert!(validate_not_empty("descripcion", "").is_err());
        assert!(validate_not_empty("descripcion", "   ").is_err());
    }
}
