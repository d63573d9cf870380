//! Routers de la API
//!
//! Un router por recurso; los handlers son delgados y delegan en los
//! controladores.

pub mod auth_routes;
pub mod closure_routes;
pub mod event_routes;
pub mod operational_role_routes;
pub mod profile_routes;
pub mod vehicle_routes;
