//! Domain record repository interface

use async_trait::async_trait;

use super::model::{DomainQuery, DomainRecord, DomainUpdate};
use crate::domain::DomainResult;

#[async_trait]
pub trait DomainRecordStore: Send + Sync {
    /// Insert a new record and return its id. A record id of 0 asks the
    /// store to assign one.
    async fn insert(&self, record: DomainRecord) -> DomainResult<i32>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<DomainRecord>>;
    async fn query(&self, query: &DomainQuery) -> DomainResult<Vec<DomainRecord>>;
    async fn update(&self, id: i32, update: DomainUpdate) -> DomainResult<()>;
    /// Append one line to the record's notes. Existing notes are kept.
    async fn append_note(&self, id: i32, note: &str) -> DomainResult<()>;
}
