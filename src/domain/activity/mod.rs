//! Activity log aggregate
//!
//! The platform-wide, append-only audit trail.

pub mod model;
pub mod repository;

pub use model::ActivityEntry;
pub use repository::ActivityLogger;
