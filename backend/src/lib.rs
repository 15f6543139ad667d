//! Camp Signup Backend Library
//!
//! This library exposes modules for testing and external use.
//! The server binary is in `src/main.rs`, the seeding tool in `src/bin/seed.rs`.

pub mod api;
/// Campers, activities and signups: models, validation and storage
pub mod camp;
pub mod config;
pub mod error;

pub use api::router;
