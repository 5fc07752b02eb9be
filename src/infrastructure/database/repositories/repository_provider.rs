//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::activity::ActivityLogger;
use crate::domain::domain_record::DomainRecordStore;
use crate::domain::repositories::RepositoryProvider;

use super::activity_log_repository::SeaOrmActivityLogRepository;
use super::domain_repository::SeaOrmDomainRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let record = repos.domains().find_by_id(42).await?;
/// repos.activity().append("Domain inspected").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    domains: SeaOrmDomainRepository,
    activity: SeaOrmActivityLogRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            domains: SeaOrmDomainRepository::new(db.clone()),
            activity: SeaOrmActivityLogRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn domains(&self) -> &dyn DomainRecordStore {
        &self.domains
    }

    fn activity(&self) -> &dyn ActivityLogger {
        &self.activity
    }
}
