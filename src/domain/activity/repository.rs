//! Activity log interface

use async_trait::async_trait;

use super::model::ActivityEntry;
use crate::domain::DomainResult;

#[async_trait]
pub trait ActivityLogger: Send + Sync {
    async fn append(&self, message: &str) -> DomainResult<()>;
    /// Most recent entries first
    async fn recent(&self, limit: u64) -> DomainResult<Vec<ActivityEntry>>;
}
