//! Application layer: orchestration services.

pub mod services;
