//! Servicios del sistema

pub mod auth_service;
