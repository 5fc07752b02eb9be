//! Domain record aggregate
//!
//! Contains the DomainRecord entity, query/update value objects, and the
//! store interface.

pub mod model;
pub mod repository;

pub use model::{DomainQuery, DomainRecord, DomainStatus, DomainUpdate};
pub use repository::DomainRecordStore;
