//! Infrastructure layer - external concerns

pub mod database;
pub mod notifications;
pub mod registrar_api;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use notifications::ActivityLogNotifier;
pub use registrar_api::PlatformApiClient;
pub use storage::{InMemoryActivityLog, InMemoryDomainStore, InMemoryRepositoryProvider};
