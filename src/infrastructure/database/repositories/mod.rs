//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod activity_log_repository;
pub mod domain_repository;
pub mod repository_provider;

pub use repository_provider::SeaOrmRepositoryProvider;
