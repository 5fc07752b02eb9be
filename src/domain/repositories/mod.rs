//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to the domain record store and the activity log
//! - `DomainResult`: standard result type for domain operations

use super::activity::ActivityLogger;
use super::domain_record::DomainRecordStore;
use crate::support::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let record = repos.domains().find_by_id(42).await?;
///     repos.activity().append("Domain inspected").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn domains(&self) -> &dyn DomainRecordStore;
    fn activity(&self) -> &dyn ActivityLogger;
}
