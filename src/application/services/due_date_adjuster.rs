//! Due-date batch adjuster
//!
//! Moves the next due date (and next invoice date) of selected active
//! domains earlier by a fixed number of days, giving transfers time to
//! complete before the renewal would fall due. Preview mode reports what
//! would change without touching anything.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::DueDateAdjustConfig;
use crate::domain::{
    AdminNotification, AdminNotifier, DomainError, DomainQuery, DomainRecord, DomainResult,
    DomainStatus, DomainUpdate, RepositoryProvider,
};
use crate::support::time::{days_until, shift_earlier, shift_later};

const RULE_WIDTH: usize = 90;

/// One selected domain with its before/after dates
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentRow {
    pub domain_id: i32,
    pub domain: String,
    pub current_due: NaiveDate,
    pub new_due: NaiveDate,
    pub current_invoice: Option<NaiveDate>,
    pub new_invoice: Option<NaiveDate>,
    /// Days from the run date until the current due date
    pub days_until_due: i64,
}

impl AdjustmentRow {
    fn plan(record: &DomainRecord, offset_days: u32, today: NaiveDate) -> DomainResult<Self> {
        let current_due = record.next_due_date.ok_or_else(|| {
            DomainError::Validation(format!("domain {} has no due date", record.id))
        })?;
        let new_due = shift_earlier(current_due, offset_days)?;
        let new_invoice = record
            .next_invoice_date
            .map(|invoice| shift_earlier(invoice, offset_days))
            .transpose()?;

        Ok(Self {
            domain_id: record.id,
            domain: record.domain.clone(),
            current_due,
            new_due,
            current_invoice: record.next_invoice_date,
            new_invoice,
            days_until_due: days_until(current_due, today),
        })
    }
}

/// Outcome of one adjuster run
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentReport {
    pub dry_run: bool,
    pub registrar: String,
    pub offset_days: u32,
    pub run_date: NaiveDate,
    pub rows: Vec<AdjustmentRow>,
    /// Domains actually written (always 0 in dry-run)
    pub updated: usize,
}

impl AdjustmentReport {
    pub fn selected(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Banner printed before the table
    pub fn header(config: &DueDateAdjustConfig) -> String {
        let rule = "=".repeat(80);
        let mode = if config.dry_run {
            "DRY RUN (no changes will be made)"
        } else {
            "LIVE MODE (will update database)"
        };
        format!(
            "{rule}\nDomain Due Date Adjuster\n{rule}\nMode: {mode}\nRegistrar: {}\nAdjustment: -{} days\n{rule}\n",
            config.registrar, config.offset_days
        )
    }
}

impl fmt::Display for AdjustmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No domains found matching criteria.");
        }

        writeln!(f, "Found {} domain(s) to adjust:\n", self.rows.len())?;
        writeln!(
            f,
            "{:<6}{:<35}{:<15}{:<15}Days Until",
            "ID", "Domain", "Current Due", "New Due"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<6}{:<35}{:<15}{:<15}{}",
                row.domain_id,
                row.domain,
                row.current_due.to_string(),
                row.new_due.to_string(),
                row.days_until_due
            )?;
        }
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

        if self.dry_run {
            writeln!(f, "\nDRY RUN: No changes were made to the database.")?;
            writeln!(
                f,
                "Run again in execute mode to update these {} domain(s).",
                self.rows.len()
            )
        } else {
            writeln!(f, "\nSUCCESS: Updated {} domain(s).", self.updated)?;
            writeln!(f, "All changes have been logged to the activity log.")
        }
    }
}

/// Selects domains and shifts their due dates
pub struct DueDateBatchAdjuster {
    repos: Arc<dyn RepositoryProvider>,
    notifier: Arc<dyn AdminNotifier>,
    config: DueDateAdjustConfig,
}

impl DueDateBatchAdjuster {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        notifier: Arc<dyn AdminNotifier>,
        config: DueDateAdjustConfig,
    ) -> Self {
        Self {
            repos,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &DueDateAdjustConfig {
        &self.config
    }

    /// Selection criteria as of `today`
    pub fn query(&self, today: NaiveDate) -> DomainResult<DomainQuery> {
        let due_on_or_before = self
            .config
            .within_days
            .map(|days| shift_later(today, days))
            .transpose()?;

        Ok(DomainQuery {
            status: DomainStatus::Active,
            registrar: self.config.registrar.clone(),
            due_after: today,
            due_on_or_before,
            allow_list: self.config.allow_list.clone(),
            deny_list: self.config.deny_list.clone(),
        })
    }

    /// Select, report and (outside dry-run) persist the shifted dates.
    ///
    /// Stops at the first failed write; domains already processed keep
    /// their new dates.
    pub async fn run(&self, today: NaiveDate) -> DomainResult<AdjustmentReport> {
        self.config
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        let query = self.query(today)?;
        let candidates = self.repos.domains().query(&query).await?;

        info!(
            registrar = %self.config.registrar,
            offset_days = self.config.offset_days,
            dry_run = self.config.dry_run,
            count = candidates.len(),
            "Due-date adjustment candidates selected"
        );

        let rows = candidates
            .iter()
            .map(|record| AdjustmentRow::plan(record, self.config.offset_days, today))
            .collect::<DomainResult<Vec<_>>>()?;

        let mut report = AdjustmentReport {
            dry_run: self.config.dry_run,
            registrar: self.config.registrar.clone(),
            offset_days: self.config.offset_days,
            run_date: today,
            rows,
            updated: 0,
        };

        if self.config.dry_run || report.is_empty() {
            return Ok(report);
        }

        for row in &report.rows {
            self.apply(row).await?;
            report.updated += 1;
        }

        info!(updated = report.updated, "Due dates adjusted");

        if self.config.notify_admin && report.updated > 0 {
            self.notify(&report).await;
        }

        Ok(report)
    }

    async fn apply(&self, row: &AdjustmentRow) -> DomainResult<()> {
        self.repos
            .domains()
            .update(row.domain_id, DomainUpdate::due_dates(row.new_due, row.new_invoice))
            .await
            .map_err(|e| {
                warn!(domain_id = row.domain_id, error = %e, "Failed to adjust due date");
                e
            })?;

        self.repos
            .activity()
            .append(&format!(
                "Domain Due Date Adjusted: {} (ID {}) - Due date changed from {} to {}",
                row.domain, row.domain_id, row.current_due, row.new_due
            ))
            .await
    }

    async fn notify(&self, report: &AdjustmentReport) {
        let notification = AdminNotification {
            subject: "Domain Due Dates Adjusted".to_string(),
            body: format!(
                "Domain Due Date Adjustment Complete\n\nUpdated {} domain(s)\nAdjustment: -{} days\n\nCheck the activity log for full details.",
                report.updated, report.offset_days
            ),
        };

        if let Err(e) = self.notifier.notify(notification).await {
            warn!(error = %e, "Failed to send admin notification");
        }
    }
}
