//! Domain management API port
//!
//! The narrow set of remote operations the migration workflow needs from the
//! billing platform. Every call is all-or-nothing: it either succeeds or
//! returns an [`ApiError`] describing why the platform refused it.

use async_trait::async_trait;

use crate::domain::domain_record::DomainStatus;
use crate::support::errors::ApiError;

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait DomainApiClient: Send + Sync {
    /// Set or clear the registrar lock.
    async fn set_lock(&self, domain_id: i32, locked: bool) -> ApiResult<()>;

    /// Enable or disable ID protection.
    async fn set_id_protection(&self, domain_id: i32, enabled: bool) -> ApiResult<()>;

    /// Ask the current registrar for the transfer (EPP) code.
    ///
    /// Returns the code exactly as the platform sent it, still HTML-encoded.
    /// `None` means the request was accepted but no code came back (the
    /// registrar usually emails it to the registrant instead).
    async fn request_transfer_code(&self, domain_id: i32) -> ApiResult<Option<String>>;

    /// Point the domain at another registrar module and change its status.
    async fn set_registrar_and_status(
        &self,
        domain_id: i32,
        registrar: &str,
        status: DomainStatus,
    ) -> ApiResult<()>;

    /// Submit an inbound transfer using the given transfer code.
    async fn submit_transfer(&self, domain_id: i32, transfer_code: &str) -> ApiResult<()>;
}
