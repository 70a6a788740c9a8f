//! Administrative item catalog service for the game server.
//!
//! The crate is layered the same way throughout:
//!
//! - [`domain`]: records mirrored from the game database and their validation rules.
//! - [`application`]: repository seams, the catalog view builder, and the item service.
//! - [`cache`]: the process-wide snapshot cache that fronts the item catalog.
//! - [`infra`]: Postgres repositories, telemetry, and the axum HTTP surface.
//! - [`config`]: layered settings (file → environment → CLI).

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
