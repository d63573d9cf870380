//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod closure;
pub mod event;
pub mod operational_role;
pub mod profile;
pub mod vehicle;
