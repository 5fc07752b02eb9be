//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use crate::domain::{
    ActivityEntry, ActivityLogger, DomainError, DomainQuery, DomainRecord, DomainRecordStore,
    DomainResult, DomainUpdate, RepositoryProvider,
};

/// In-memory domain store for development and testing
pub struct InMemoryDomainStore {
    domains: DashMap<i32, DomainRecord>,
    id_counter: AtomicI32,
}

impl InMemoryDomainStore {
    pub fn new() -> Self {
        Self {
            domains: DashMap::new(),
            id_counter: AtomicI32::new(1),
        }
    }

    /// Current copy of a record, if present
    pub fn get(&self, id: i32) -> Option<DomainRecord> {
        self.domains.get(&id).map(|r| r.clone())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    fn not_found(id: i32) -> DomainError {
        DomainError::NotFound {
            entity: "Domain",
            field: "id",
            value: id.to_string(),
        }
    }
}

impl Default for InMemoryDomainStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainRecordStore for InMemoryDomainStore {
    async fn insert(&self, mut record: DomainRecord) -> DomainResult<i32> {
        if record.id == 0 {
            record.id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        } else {
            self.id_counter.fetch_max(record.id + 1, Ordering::SeqCst);
        }
        if self.domains.contains_key(&record.id) {
            return Err(DomainError::Validation(format!(
                "domain id {} already exists",
                record.id
            )));
        }

        let id = record.id;
        self.domains.insert(id, record);
        Ok(id)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<DomainRecord>> {
        Ok(self.get(id))
    }

    async fn query(&self, query: &DomainQuery) -> DomainResult<Vec<DomainRecord>> {
        let mut found: Vec<DomainRecord> = self
            .domains
            .iter()
            .filter(|e| query.matches(e.value()))
            .map(|e| e.value().clone())
            .collect();
        found.sort_by_key(|r| (r.next_due_date, r.id));
        Ok(found)
    }

    async fn update(&self, id: i32, update: DomainUpdate) -> DomainResult<()> {
        debug!("Updating domain {}: {:?}", id, update);
        let mut record = self.domains.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        record.apply(&update);
        Ok(())
    }

    async fn append_note(&self, id: i32, note: &str) -> DomainResult<()> {
        let mut record = self.domains.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        record.push_note(note);
        Ok(())
    }
}

/// In-memory activity log
pub struct InMemoryActivityLog {
    entries: DashMap<i32, ActivityEntry>,
    id_counter: AtomicI32,
}

impl InMemoryActivityLog {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            id_counter: AtomicI32::new(1),
        }
    }

    /// All messages in the order they were appended
    pub fn messages(&self) -> Vec<String> {
        let mut entries: Vec<ActivityEntry> =
            self.entries.iter().map(|e| e.value().clone()).collect();
        entries.sort_by_key(|e| e.id);
        entries.into_iter().map(|e| e.message).collect()
    }
}

impl Default for InMemoryActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityLogger for InMemoryActivityLog {
    async fn append(&self, message: &str) -> DomainResult<()> {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        self.entries.insert(id, ActivityEntry::new(id, message));
        Ok(())
    }

    async fn recent(&self, limit: u64) -> DomainResult<Vec<ActivityEntry>> {
        let mut entries: Vec<ActivityEntry> =
            self.entries.iter().map(|e| e.value().clone()).collect();
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(entries)
    }
}

/// In-memory repository provider
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    pub domains: InMemoryDomainStore,
    pub activity: InMemoryActivityLog,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn domains(&self) -> &dyn DomainRecordStore {
        &self.domains
    }

    fn activity(&self) -> &dyn ActivityLogger {
        &self.activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainStatus;

    #[tokio::test]
    async fn insert_assigns_ids() {
        let store = InMemoryDomainStore::new();
        let a = store
            .insert(DomainRecord::new(0, "a.com", "cnic", DomainStatus::Active))
            .await
            .unwrap();
        let b = store
            .insert(DomainRecord::new(10, "b.com", "cnic", DomainStatus::Active))
            .await
            .unwrap();
        let c = store
            .insert(DomainRecord::new(0, "c.com", "cnic", DomainStatus::Active))
            .await
            .unwrap();
        assert_eq!((a, b, c), (1, 10, 11));
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let store = InMemoryDomainStore::new();
        let r = DomainRecord::new(5, "a.com", "cnic", DomainStatus::Active);
        store.insert(r.clone()).await.unwrap();
        assert!(store.insert(r).await.is_err());
    }

    #[tokio::test]
    async fn update_missing_domain_is_not_found() {
        let store = InMemoryDomainStore::new();
        let err = store.update(99, DomainUpdate::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn recent_returns_newest_first() {
        let log = InMemoryActivityLog::new();
        for m in ["one", "two", "three"] {
            log.append(m).await.unwrap();
        }
        let recent = log.recent(2).await.unwrap();
        let messages: Vec<&str> = recent.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["three", "two"]);
        assert_eq!(log.messages(), vec!["one", "two", "three"]);
    }
}
