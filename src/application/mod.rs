pub mod hooks;
pub mod services;

// Re-export key types for convenience
pub use hooks::{HookResponse, RenewalDecision, RenewalEvent};
pub use services::{
    AdjustmentReport, AdjustmentRow, DueDateBatchAdjuster, MigrationSummary,
    RegistrarMigrationWorkflow, StepOutcome, TransferCodeOutcome,
};
