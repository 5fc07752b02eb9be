//! Registrar migration workflow
//!
//! Runs when the platform is about to renew a domain that still sits at the
//! old registrar. Instead of renewing there, it prepares the domain for
//! transfer (unlock, drop ID protection, fetch the EPP code) and, outside
//! dry-run, points the domain at the new registrar and submits the transfer.
//!
//! The sequence is linear with no retries. Unlock, ID protection and the
//! EPP request are best-effort: a failure is logged and the next step runs.
//! Anything else that fails after gating is caught once at the top and
//! turned into an abort, so a domain that entered the migration path is
//! never renewed at the old registrar.
//!
//! Every step is written to two places: the activity log (never contains
//! the transfer code) and the domain's admin notes (does contain it, since
//! the notes are the admins' working record for the transfer).

use std::fmt;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::hooks::{RenewalDecision, RenewalEvent};
use crate::config::MigrationConfig;
use crate::domain::domain_record::model::{contains_name, normalize};
use crate::domain::{DomainApiClient, DomainError, DomainResult, DomainStatus, RepositoryProvider};
use crate::support::errors::AppError;
use crate::support::html::decode_entities;
use crate::support::time::note_timestamp;

pub const DRY_RUN_ABORT_MESSAGE: &str = "DRY RUN: Renewal aborted for testing. Check Activity Log and domain admin notes. No transfer initiated.";

/// Result of one best-effort step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StepOutcome {
    #[default]
    NotAttempted,
    Success,
    Failed(String),
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAttempted => write!(f, "not attempted"),
            Self::Success => write!(f, "success"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Result of the transfer code request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransferCodeOutcome {
    #[default]
    NotAttempted,
    /// Decoded, trimmed, non-empty code
    Obtained(String),
    /// Accepted, but the code went out by other means (usually email)
    NotReturned,
    Failed(String),
}

/// Outcomes of the preparation steps, written to notes once they are done
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MigrationSummary {
    pub unlock: StepOutcome,
    pub id_protection: StepOutcome,
    pub transfer_code: TransferCodeOutcome,
}

impl MigrationSummary {
    pub fn transfer_code(&self) -> Option<&str> {
        match &self.transfer_code {
            TransferCodeOutcome::Obtained(code) => Some(code),
            _ => None,
        }
    }
}

impl fmt::Display for MigrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Migration summary - Unlock: {}, ID Protect: {}, EPP: {}",
            self.unlock,
            self.id_protection,
            if self.transfer_code().is_some() {
                "obtained"
            } else {
                "not obtained"
            }
        )
    }
}

/// Everything one workflow invocation needs to know about its domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationContext {
    pub domain_id: i32,
    /// Lower-cased, trimmed domain name from the event
    pub domain: String,
    /// Lower-cased registrar the domain is on right now
    pub current_registrar: String,
    pub source_registrar: String,
    pub target_registrar: String,
    pub dry_run: bool,
}

impl MigrationContext {
    pub fn mode(&self) -> &'static str {
        if self.dry_run {
            "DRY RUN"
        } else {
            "LIVE"
        }
    }

    /// `SOURCE→TARGET`, upper-cased; `*` stands for "any registrar"
    pub fn prefix(&self) -> String {
        let source = if self.source_registrar.is_empty() {
            "*".to_string()
        } else {
            self.source_registrar.to_uppercase()
        };
        format!("{}→{}", source, self.target_registrar.to_uppercase())
    }
}

pub struct RegistrarMigrationWorkflow {
    repos: Arc<dyn RepositoryProvider>,
    api: Arc<dyn DomainApiClient>,
    config: MigrationConfig,
}

impl RegistrarMigrationWorkflow {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        api: Arc<dyn DomainApiClient>,
        config: MigrationConfig,
    ) -> Self {
        Self { repos, api, config }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Handle one pre-renewal event.
    ///
    /// `Continue` when the domain does not qualify; `Abort` once it does,
    /// whatever happens afterwards. `Err` only when the domain lookup itself
    /// fails, before anything has been touched.
    pub async fn run(&self, event: &RenewalEvent) -> DomainResult<RenewalDecision> {
        let Some(ctx) = self.gate(event).await? else {
            return Ok(RenewalDecision::Continue);
        };

        info!(
            domain_id = ctx.domain_id,
            domain = %ctx.domain,
            mode = ctx.mode(),
            "🔀 Registrar migration triggered"
        );

        match self.migrate(&ctx).await {
            Ok(message) => Ok(RenewalDecision::Abort(message)),
            Err(e) => {
                self.record_failure(&ctx, &e).await;
                Ok(RenewalDecision::Abort(format!(
                    "{} migration failed: {}",
                    ctx.prefix(),
                    e
                )))
            }
        }
    }

    /// Decide whether the event concerns a domain this workflow should move.
    /// Skips are silent.
    pub async fn gate(&self, event: &RenewalEvent) -> DomainResult<Option<MigrationContext>> {
        let domain = normalize(&event.domain_name);
        if event.domain_id == 0 || domain.is_empty() {
            return Ok(None);
        }

        let Some(record) = self.repos.domains().find_by_id(event.domain_id).await? else {
            return Ok(None);
        };

        if !self.config.allow_list.is_empty() && !contains_name(&self.config.allow_list, &domain)
        {
            return Ok(None);
        }
        if contains_name(&self.config.deny_list, &domain) {
            return Ok(None);
        }

        let current_registrar = record.registrar_key();
        let source_registrar = normalize(&self.config.trigger_registrar);
        let target_registrar = self.config.target_registrar.trim().to_string();

        if !source_registrar.is_empty() && current_registrar != source_registrar {
            return Ok(None);
        }
        if current_registrar == normalize(&target_registrar) {
            return Ok(None);
        }

        Ok(Some(MigrationContext {
            domain_id: event.domain_id,
            domain,
            current_registrar,
            source_registrar,
            target_registrar,
            dry_run: self.config.dry_run,
        }))
    }

    async fn migrate(&self, ctx: &MigrationContext) -> Result<String, AppError> {
        let mode = ctx.mode();
        self.audit(ctx, &format!("Triggered ({} mode)", mode)).await?;
        self.note(ctx, &format!("Migration triggered ({} mode)", mode))
            .await;

        let summary = self.prepare(ctx).await?;
        self.note(ctx, &summary.to_string()).await;

        if ctx.dry_run {
            self.audit(ctx, "DRY RUN: Skipping registrar change and transfer submission")
                .await?;
            self.note(
                ctx,
                &format!(
                    "DRY RUN: Would change registrar to {} and submit transfer",
                    ctx.target_registrar
                ),
            )
            .await;
            return Ok(DRY_RUN_ABORT_MESSAGE.to_string());
        }

        self.switch_registrar(ctx, summary.transfer_code()).await
    }

    /// Unlock, ID protection and EPP request. Failures here are recorded in
    /// the summary, not returned.
    async fn prepare(&self, ctx: &MigrationContext) -> DomainResult<MigrationSummary> {
        let mut summary = MigrationSummary::default();

        if self.config.unlock_domain {
            summary.unlock = match self.api.set_lock(ctx.domain_id, false).await {
                Ok(()) => {
                    self.audit(ctx, "Domain unlocked successfully").await?;
                    self.note(ctx, "Domain unlocked").await;
                    StepOutcome::Success
                }
                Err(e) => {
                    self.audit(ctx, &format!("Unlock failed: {}", e)).await?;
                    self.note(ctx, &format!("Unlock failed: {}", e)).await;
                    StepOutcome::Failed(e.to_string())
                }
            };
        }

        if self.config.disable_id_protection {
            summary.id_protection = match self.api.set_id_protection(ctx.domain_id, false).await {
                Ok(()) => {
                    self.audit(ctx, "ID Protection disabled successfully").await?;
                    self.note(ctx, "ID Protection disabled").await;
                    StepOutcome::Success
                }
                Err(e) => {
                    self.audit(ctx, &format!("Disable ID Protection failed: {}", e))
                        .await?;
                    self.note(ctx, &format!("ID Protection disable failed: {}", e))
                        .await;
                    StepOutcome::Failed(e.to_string())
                }
            };
        }

        summary.transfer_code = match self.api.request_transfer_code(ctx.domain_id).await {
            Ok(raw) => {
                let code = raw
                    .map(|c| decode_entities(&c).trim().to_string())
                    .unwrap_or_default();

                if code.is_empty() {
                    self.audit(
                        ctx,
                        "EPP requested but not returned (likely emailed to registrant)",
                    )
                    .await?;
                    self.note(ctx, "EPP code requested (not returned via API - check email)")
                        .await;
                    TransferCodeOutcome::NotReturned
                } else {
                    self.audit(
                        ctx,
                        &format!("EPP code obtained successfully (length={})", code.len()),
                    )
                    .await?;
                    self.note(ctx, &format!("EPP code obtained: {}", code)).await;
                    TransferCodeOutcome::Obtained(code)
                }
            }
            Err(e) => {
                self.audit(ctx, &format!("EPP request failed: {}", e)).await?;
                self.note(ctx, &format!("EPP request failed: {}", e)).await;
                TransferCodeOutcome::Failed(e.to_string())
            }
        };

        Ok(summary)
    }

    async fn switch_registrar(
        &self,
        ctx: &MigrationContext,
        transfer_code: Option<&str>,
    ) -> Result<String, AppError> {
        let target = &ctx.target_registrar;

        self.api
            .set_registrar_and_status(ctx.domain_id, target, DomainStatus::PendingTransfer)
            .await?;
        self.audit(
            ctx,
            &format!("Updated registrar={}, status=Pending Transfer", target),
        )
        .await?;
        self.note(
            ctx,
            &format!(
                "Registrar changed to {}, status set to Pending Transfer",
                target
            ),
        )
        .await;

        let Some(code) = transfer_code else {
            return Ok(format!(
                "Renewal replaced by transfer to {}. EPP requested but not returned (check email). Domain set to Pending Transfer.",
                capitalize(target)
            ));
        };

        self.api.submit_transfer(ctx.domain_id, code).await?;
        self.audit(ctx, &format!("Transfer submitted to {}", target))
            .await?;
        self.note(ctx, &format!("Transfer submitted to {}", target))
            .await;

        info!(domain_id = ctx.domain_id, target = %target, "Transfer submitted");

        Ok(format!(
            "Renewal replaced by {} transfer (submitted). Domain set to Pending Transfer; dates will update via Domain Sync.",
            capitalize(target)
        ))
    }

    async fn record_failure(&self, ctx: &MigrationContext, e: &AppError) {
        error!(domain_id = ctx.domain_id, error = %e, "Registrar migration failed");

        if let Err(log_err) = self.audit(ctx, &format!("FAILED: {}", e)).await {
            warn!(error = %log_err, "Could not record migration failure in activity log");
        }
        self.note(ctx, &format!("Migration FAILED: {}", e)).await;
    }

    async fn audit(&self, ctx: &MigrationContext, message: &str) -> DomainResult<()> {
        info!(domain_id = ctx.domain_id, "{}", message);
        self.repos
            .activity()
            .append(&format!(
                "[{}] {} (ID {}, registrar={}) - {}",
                ctx.prefix(),
                ctx.domain,
                ctx.domain_id,
                ctx.current_registrar,
                message
            ))
            .await
    }

    /// Append to the domain's admin notes. Never fails the workflow.
    async fn note(&self, ctx: &MigrationContext, note: &str) {
        let line = format!("[{}] [{}] {}", note_timestamp(), ctx.prefix(), note);
        if let Err(e) = self.repos.domains().append_note(ctx.domain_id, &line).await {
            self.note_failed(ctx, &e).await;
        }
    }

    async fn note_failed(&self, ctx: &MigrationContext, e: &DomainError) {
        warn!(domain_id = ctx.domain_id, error = %e, "Failed to add admin note");
        if let Err(log_err) = self
            .repos
            .activity()
            .append(&format!("[{}] Failed to add admin note: {}", ctx.prefix(), e))
            .await
        {
            warn!(error = %log_err, "Could not record note failure in activity log");
        }
    }
}

/// Upper-case the first character: `openprovider` → `Openprovider`
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(source: &str) -> MigrationContext {
        MigrationContext {
            domain_id: 1,
            domain: "example.com".into(),
            current_registrar: "cnic".into(),
            source_registrar: source.into(),
            target_registrar: "openprovider".into(),
            dry_run: true,
        }
    }

    #[test]
    fn prefix_is_upper_cased_pair() {
        assert_eq!(ctx("cnic").prefix(), "CNIC→OPENPROVIDER");
        assert_eq!(ctx("").prefix(), "*→OPENPROVIDER");
    }

    #[test]
    fn summary_text() {
        let summary = MigrationSummary {
            unlock: StepOutcome::Success,
            id_protection: StepOutcome::Failed("DomainToggleIdProtect failed: nope".into()),
            transfer_code: TransferCodeOutcome::Obtained("abc".into()),
        };
        assert_eq!(
            summary.to_string(),
            "Migration summary - Unlock: success, ID Protect: failed: DomainToggleIdProtect failed: nope, EPP: obtained"
        );
        assert_eq!(
            MigrationSummary::default().to_string(),
            "Migration summary - Unlock: not attempted, ID Protect: not attempted, EPP: not obtained"
        );
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("openprovider"), "Openprovider");
        assert_eq!(capitalize(""), "");
    }
}
