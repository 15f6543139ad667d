//! Camp module
//!
//! Campers, activities and signups, stored in a SQLite database.

pub mod db;
pub mod models;
pub mod validation;

pub use db::CampDb;
pub use models::{
    Activity, Camper, CamperChanges, CamperDetail, NewActivity, NewCamper, NewSignup,
    SignupDetail,
};
pub use validation::ValidationError;
