//! Capa de acceso a datos
//!
//! Un repositorio por tabla, sobre `sqlx::PgPool` con queries en runtime.

pub mod closure_repository;
pub mod event_repository;
pub mod operational_role_repository;
pub mod profile_repository;
pub mod vehicle_repository;
