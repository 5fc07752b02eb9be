//! Database entities module

pub mod activity_log;
pub mod domain;

pub use activity_log::Entity as ActivityLog;
pub use domain::Entity as Domain;
