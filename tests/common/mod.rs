//! Shared fakes for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use registrar_migrator::domain::{
    ActivityEntry, ActivityLogger, AdminNotification, AdminNotifier, ApiError, ApiResult,
    DomainApiClient, DomainError, DomainQuery, DomainRecord, DomainRecordStore, DomainResult,
    DomainStatus, DomainUpdate, RepositoryProvider,
};
use registrar_migrator::infrastructure::InMemoryRepositoryProvider;

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// One call made against the fake API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    SetLock(i32, bool),
    SetIdProtection(i32, bool),
    RequestTransferCode(i32),
    SetRegistrarAndStatus(i32, String, DomainStatus),
    SubmitTransfer(i32, String),
}

/// Scripted replies for the fake API
#[derive(Debug, Clone, Default)]
pub struct ApiScript {
    pub fail_lock: Option<String>,
    pub fail_id_protection: Option<String>,
    pub fail_transfer_code: Option<String>,
    pub transfer_code: Option<String>,
    pub fail_registrar_switch: Option<String>,
    pub fail_transfer: Option<String>,
}

/// Fake billing platform API. Registrar switches are applied to the shared
/// in-memory store the way the real platform would apply them.
pub struct FakeDomainApi {
    repos: Arc<InMemoryRepositoryProvider>,
    script: ApiScript,
    calls: Mutex<Vec<ApiCall>>,
}

impl FakeDomainApi {
    pub fn new(repos: Arc<InMemoryRepositoryProvider>, script: ApiScript) -> Self {
        Self {
            repos,
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn reply(action: &'static str, failure: &Option<String>) -> ApiResult<()> {
        match failure {
            Some(message) => Err(ApiError::Rejected {
                action,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DomainApiClient for FakeDomainApi {
    async fn set_lock(&self, domain_id: i32, locked: bool) -> ApiResult<()> {
        self.record(ApiCall::SetLock(domain_id, locked));
        Self::reply("DomainUpdateLockingStatus", &self.script.fail_lock)
    }

    async fn set_id_protection(&self, domain_id: i32, enabled: bool) -> ApiResult<()> {
        self.record(ApiCall::SetIdProtection(domain_id, enabled));
        Self::reply("DomainToggleIdProtect", &self.script.fail_id_protection)
    }

    async fn request_transfer_code(&self, domain_id: i32) -> ApiResult<Option<String>> {
        self.record(ApiCall::RequestTransferCode(domain_id));
        Self::reply("DomainRequestEPP", &self.script.fail_transfer_code)?;
        Ok(self.script.transfer_code.clone())
    }

    async fn set_registrar_and_status(
        &self,
        domain_id: i32,
        registrar: &str,
        status: DomainStatus,
    ) -> ApiResult<()> {
        self.record(ApiCall::SetRegistrarAndStatus(
            domain_id,
            registrar.to_string(),
            status,
        ));
        Self::reply("UpdateClientDomain", &self.script.fail_registrar_switch)?;
        self.repos
            .domains()
            .update(domain_id, DomainUpdate::registrar_and_status(registrar, status))
            .await
            .map_err(|e| ApiError::Rejected {
                action: "UpdateClientDomain",
                message: e.to_string(),
            })
    }

    async fn submit_transfer(&self, domain_id: i32, transfer_code: &str) -> ApiResult<()> {
        self.record(ApiCall::SubmitTransfer(domain_id, transfer_code.to_string()));
        Self::reply("DomainTransfer", &self.script.fail_transfer)
    }
}

/// Notifier that remembers what it was asked to send
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<AdminNotification>>,
}

#[async_trait]
impl AdminNotifier for RecordingNotifier {
    async fn notify(&self, notification: AdminNotification) -> DomainResult<()> {
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

/// Store wrapper whose writes fail for one domain id
pub struct FailingStore {
    inner: Arc<InMemoryRepositoryProvider>,
    fail_id: i32,
}

#[async_trait]
impl DomainRecordStore for FailingStore {
    async fn insert(&self, record: DomainRecord) -> DomainResult<i32> {
        self.inner.domains().insert(record).await
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<DomainRecord>> {
        self.inner.domains().find_by_id(id).await
    }

    async fn query(&self, query: &DomainQuery) -> DomainResult<Vec<DomainRecord>> {
        self.inner.domains().query(query).await
    }

    async fn update(&self, id: i32, update: DomainUpdate) -> DomainResult<()> {
        if id == self.fail_id {
            return Err(DomainError::Storage("disk full".into()));
        }
        self.inner.domains().update(id, update).await
    }

    async fn append_note(&self, id: i32, note: &str) -> DomainResult<()> {
        if id == self.fail_id {
            return Err(DomainError::Storage("disk full".into()));
        }
        self.inner.domains().append_note(id, note).await
    }
}

/// Provider combining the failing store with the in-memory activity log
pub struct FailingRepos {
    store: FailingStore,
    inner: Arc<InMemoryRepositoryProvider>,
    offline_log: Option<FailingActivityLog>,
}

impl FailingRepos {
    pub fn new(inner: Arc<InMemoryRepositoryProvider>, fail_id: i32) -> Self {
        Self {
            store: FailingStore {
                inner: inner.clone(),
                fail_id,
            },
            inner,
            offline_log: None,
        }
    }

    /// Make the activity log reject writes as well
    pub fn with_activity_offline(mut self) -> Self {
        self.offline_log = Some(FailingActivityLog);
        self
    }
}

impl RepositoryProvider for FailingRepos {
    fn domains(&self) -> &dyn DomainRecordStore {
        &self.store
    }

    fn activity(&self) -> &dyn ActivityLogger {
        match &self.offline_log {
            Some(log) => log,
            None => self.inner.activity(),
        }
    }
}

/// Activity log that rejects every write
pub struct FailingActivityLog;

#[async_trait]
impl ActivityLogger for FailingActivityLog {
    async fn append(&self, _message: &str) -> DomainResult<()> {
        Err(DomainError::Storage("activity log offline".into()))
    }

    async fn recent(&self, _limit: u64) -> DomainResult<Vec<ActivityEntry>> {
        Ok(Vec::new())
    }
}

/// Provider with a working store and a failing activity log
pub struct AuditlessRepos {
    inner: Arc<InMemoryRepositoryProvider>,
    activity: FailingActivityLog,
}

impl AuditlessRepos {
    pub fn new(inner: Arc<InMemoryRepositoryProvider>) -> Self {
        Self {
            inner,
            activity: FailingActivityLog,
        }
    }
}

impl RepositoryProvider for AuditlessRepos {
    fn domains(&self) -> &dyn DomainRecordStore {
        self.inner.domains()
    }

    fn activity(&self) -> &dyn ActivityLogger {
        &self.activity
    }
}
