//! Administrator notification adapters
//!
//! Mail delivery belongs to the billing platform, so the notifier here only
//! records the notification: an audit entry the admins already watch, plus a
//! structured log line tagged with the configured recipient.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{AdminNotification, AdminNotifier, DomainResult, RepositoryProvider};

pub struct ActivityLogNotifier {
    repos: Arc<dyn RepositoryProvider>,
    recipient: Option<String>,
}

impl ActivityLogNotifier {
    pub fn new(repos: Arc<dyn RepositoryProvider>, recipient: Option<String>) -> Self {
        Self { repos, recipient }
    }
}

#[async_trait]
impl AdminNotifier for ActivityLogNotifier {
    async fn notify(&self, notification: AdminNotification) -> DomainResult<()> {
        let recipient = self.recipient.as_deref().unwrap_or("(no admin email configured)");
        info!(
            recipient,
            subject = %notification.subject,
            "📧 Admin notification"
        );

        self.repos
            .activity()
            .append(&format!(
                "Admin notification to {}: {} - {}",
                recipient,
                notification.subject,
                notification.body.replace('\n', " ")
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    #[tokio::test]
    async fn notification_lands_in_activity_log() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let notifier = ActivityLogNotifier::new(repos.clone(), Some("ops@example.com".into()));

        notifier
            .notify(AdminNotification {
                subject: "Domain Due Dates Adjusted".into(),
                body: "Updated 2 domain(s)\nAdjustment: -7 days".into(),
            })
            .await
            .unwrap();

        let messages = repos.activity.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0],
            "Admin notification to ops@example.com: Domain Due Dates Adjusted - Updated 2 domain(s) Adjustment: -7 days"
        );
    }
}
