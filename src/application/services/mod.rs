//! Application services

mod due_date_adjuster;
mod registrar_migration;

pub use due_date_adjuster::{AdjustmentReport, AdjustmentRow, DueDateBatchAdjuster};
pub use registrar_migration::{
    MigrationContext, MigrationSummary, RegistrarMigrationWorkflow, StepOutcome,
    TransferCodeOutcome, DRY_RUN_ABORT_MESSAGE,
};
