//! Administrator notification port

use async_trait::async_trait;

use crate::domain::DomainResult;

/// A short message for the platform administrators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminNotification {
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait AdminNotifier: Send + Sync {
    async fn notify(&self, notification: AdminNotification) -> DomainResult<()>;
}
