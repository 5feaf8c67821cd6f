//! Domain services used by the HTTP routes and the seed command.
//!
//! ARCHITECTURE
//! ============
//! Service modules own SQL and business rules so route handlers can stay
//! focused on extraction, auth and status mapping.

pub mod activity;
pub mod map;
pub mod seed;
