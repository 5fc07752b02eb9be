//! Runtime wiring shared by every entry point.
//!
//! Provides [`Runtime`] which connects to the database, applies migrations,
//! builds the billing platform API client and hands out the two services
//! configured from one [`AppConfig`].

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use crate::application::services::{DueDateBatchAdjuster, RegistrarMigrationWorkflow};
use crate::config::AppConfig;
use crate::domain::{AdminNotifier, DomainApiClient, RepositoryProvider};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{
    init_database, ActivityLogNotifier, DatabaseConfig, PlatformApiClient,
    SeaOrmRepositoryProvider,
};
use crate::support::errors::{AppError, InfraError};

// ── Options ────────────────────────────────────────────────────────

/// Options for building the runtime.
pub struct RuntimeOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── Runtime ────────────────────────────────────────────────────────

/// Connected collaborators for one process.
///
/// # Examples
///
/// ```rust,no_run
/// use registrar_migrator::runtime::{Runtime, RuntimeOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let runtime = Runtime::connect(RuntimeOptions::default()).await?;
///     let report = runtime
///         .due_date_adjuster()
///         .run(registrar_migrator::support::time::today())
///         .await?;
///     println!("{}", report);
///     runtime.close().await;
///     Ok(())
/// }
/// ```
pub struct Runtime {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// Billing platform API.
    pub api: Arc<dyn DomainApiClient>,
    /// Administrator notifications.
    pub notifier: Arc<dyn AdminNotifier>,
    /// The configuration the runtime was built with.
    pub config: AppConfig,

    db: DatabaseConnection,
}

impl Runtime {
    /// Connect to the database and the billing platform API.
    ///
    /// This will:
    /// 1. Connect to the database
    /// 2. Run migrations (if enabled)
    /// 3. Build the API client and admin notifier
    pub async fn connect(opts: RuntimeOptions) -> Result<Self, AppError> {
        let app_cfg = opts.config;

        let db_config = DatabaseConfig {
            url: app_cfg.database.connection_url(),
            ..DatabaseConfig::default()
        };
        let db = init_database(&db_config).await.map_err(InfraError::from)?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await.map_err(InfraError::from)?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        let api: Arc<dyn DomainApiClient> = Arc::new(PlatformApiClient::new(&app_cfg.api)?);
        info!("Billing platform API: {}", app_cfg.api.url);

        if app_cfg.admin.email.is_none() {
            warn!("No admin.email configured; notifications go to the activity log only");
        }
        let notifier: Arc<dyn AdminNotifier> = Arc::new(ActivityLogNotifier::new(
            repos.clone(),
            app_cfg.admin.email.clone(),
        ));

        Ok(Self {
            repos,
            api,
            notifier,
            config: app_cfg,
            db,
        })
    }

    /// Batch adjuster configured from `[due_dates]`.
    pub fn due_date_adjuster(&self) -> DueDateBatchAdjuster {
        DueDateBatchAdjuster::new(
            self.repos.clone(),
            self.notifier.clone(),
            self.config.due_dates.clone(),
        )
    }

    /// Migration workflow configured from `[migration]`.
    pub fn migration_workflow(&self) -> RegistrarMigrationWorkflow {
        RegistrarMigrationWorkflow::new(
            self.repos.clone(),
            self.api.clone(),
            self.config.migration.clone(),
        )
    }

    /// Close the database connection.
    pub async fn close(self) {
        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`Runtime::connect`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    // Logs go to stderr so stdout stays clean for reports and hook responses.
    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
