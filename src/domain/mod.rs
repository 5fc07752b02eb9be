pub mod activity;
pub mod domain_record;
pub mod notifications;
pub mod registrar_api;
pub mod repositories;

// Re-export commonly used types
pub use activity::{ActivityEntry, ActivityLogger};
pub use domain_record::{DomainQuery, DomainRecord, DomainRecordStore, DomainStatus, DomainUpdate};
pub use notifications::{AdminNotification, AdminNotifier};
pub use registrar_api::{ApiResult, DomainApiClient};
pub use repositories::{DomainResult, RepositoryProvider};

// Re-export errors from support for convenience
pub use crate::support::errors::{ApiError, DomainError};
