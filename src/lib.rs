//! # Registrar Migrator
//!
//! Administrative tooling for a domain billing platform:
//!
//! - **Due-date adjustment**: move the next due date of selected active
//!   domains earlier by a fixed offset, so transfers have time to complete.
//! - **Registrar migration**: on a pre-renewal event, unlock the domain,
//!   drop ID protection, fetch the transfer code and (outside dry-run) switch
//!   it to the new registrar and submit the transfer, replacing the renewal.
//!
//! ## Architecture
//!
//! - **domain**: entities, value objects and the collaborator traits
//!   (`DomainRecordStore`, `ActivityLogger`, `DomainApiClient`, `AdminNotifier`)
//! - **application**: the two services and the host hook contract
//! - **infrastructure**: SeaORM storage, in-memory storage, the platform API
//!   client and the admin notifier
//! - **runtime**: wiring shared by the CLI

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod support;

pub use config::{default_config_path, AppConfig, LoadedConfig, CONFIG_ENV_VAR};

// Re-export the services and the hook contract
pub use application::{
    AdjustmentReport, DueDateBatchAdjuster, HookResponse, RegistrarMigrationWorkflow,
    RenewalDecision, RenewalEvent,
};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use runtime::{init_tracing, Runtime, RuntimeOptions};
