//! Registrar Migrator: command line front-end
//!
//! Runs the due-date adjuster as a one-off batch job and the registrar
//! migration workflow as a pre-renewal hook handler.
//!
//! ```sh
//! # Preview which domains would move (default config: ~/.config/registrar-migrator/config.toml)
//! registrar-migrator adjust-due-dates --registrar cnic --days 7
//!
//! # Apply it
//! registrar-migrator adjust-due-dates --registrar cnic --days 7 --execute
//!
//! # Handle a pre-renewal event forwarded by the platform
//! registrar-migrator renew-hook --event '{"domainId": 42, "domainName": "example.com"}'
//!
//! # Validate config without touching anything
//! registrar-migrator check
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use registrar_migrator::config::AppConfig;
use registrar_migrator::runtime::{init_tracing, Runtime, RuntimeOptions};
use registrar_migrator::support::time::today;
use registrar_migrator::{AdjustmentReport, HookResponse, RenewalEvent};

/// Due-date adjustment and registrar migration for a domain billing platform.
#[derive(Parser, Debug)]
#[command(
    name = "registrar-migrator",
    version,
    about = "Due-date adjustment and registrar migration tooling",
    long_about = "Shifts domain due dates ahead of a registrar move and replaces \
                  renewals at the old registrar with transfers to the new one.\n\n\
                  Default config: ~/.config/registrar-migrator/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "REGISTRAR_MIGRATOR_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Skip database migrations on startup.
    #[arg(long, global = true)]
    no_migrate: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration file and print the effective settings.
    Check,
    /// Move due dates of matching active domains earlier.
    AdjustDueDates(AdjustArgs),
    /// Handle a pre-renewal event and print the hook response as JSON.
    RenewHook(HookArgs),
    /// Show the most recent activity log entries.
    Activity {
        /// Number of entries to show.
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
}

#[derive(Args, Debug)]
struct AdjustArgs {
    /// Write the new dates (default is a dry run).
    #[arg(long, conflicts_with = "dry_run")]
    execute: bool,

    /// Force a dry run even if the config says otherwise.
    #[arg(long)]
    dry_run: bool,

    /// Registrar whose domains are adjusted.
    #[arg(long)]
    registrar: Option<String>,

    /// Days to move the due date earlier.
    #[arg(long)]
    days: Option<u32>,

    /// Only domains due within this many days.
    #[arg(long)]
    within_days: Option<u32>,

    /// Only these domains (repeatable).
    #[arg(long = "allow")]
    allow: Vec<String>,

    /// Never these domains (repeatable).
    #[arg(long = "deny")]
    deny: Vec<String>,
}

#[derive(Args, Debug)]
struct HookArgs {
    /// Event payload as JSON: {"domainId": 42, "domainName": "example.com"}.
    #[arg(long, conflicts_with_all = ["domain_id", "domain"])]
    event: Option<String>,

    /// Domain id (alternative to --event).
    #[arg(long, requires = "domain")]
    domain_id: Option<i32>,

    /// Domain name (alternative to --event).
    #[arg(long, requires = "domain_id")]
    domain: Option<String>,

    /// Switch registrar and submit the transfer (default is a dry run).
    #[arg(long, conflicts_with = "dry_run")]
    live: bool,

    /// Force a dry run even if the config says otherwise.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let loaded = match AppConfig::resolve(cli.config.clone()) {
        Ok(loaded) => loaded,
        Err(e) => {
            if let Some(ref path) = cli.config {
                eprintln!("Failed to load config from {}: {}", path.display(), e);
            }
            return Err(e.into());
        }
    };
    if let Some(ref e) = loaded.fallback {
        eprintln!(
            "Failed to load config from {}: {}. Using defaults.",
            loaded.path.display(),
            e
        );
    }
    let config_path = loaded.path;
    let mut config = loaded.config;

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    info!("Configuration: {}", config_path.display());

    match cli.command {
        Command::Check => check(&config, &config_path),
        Command::AdjustDueDates(args) => {
            apply_adjust_overrides(&mut config, args);
            config.due_dates.validate()?;
            adjust_due_dates(config, !cli.no_migrate).await
        }
        Command::RenewHook(args) => {
            let event = hook_event(&args)?;
            if args.live {
                config.migration.dry_run = false;
            } else if args.dry_run {
                config.migration.dry_run = true;
            }
            config.migration.validate()?;
            renew_hook(config, !cli.no_migrate, event).await
        }
        Command::Activity { limit } => activity(config, !cli.no_migrate, limit).await,
    }
}

fn check(config: &AppConfig, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    println!("✅ Configuration is valid");
    println!("   Config file : {}", path.display());
    println!("   Database    : {}", config.database.connection_url());
    println!("   API         : {}", config.api.url);
    println!("   Log level   : {}", config.logging.level);
    println!(
        "   Due dates   : registrar={} offset=-{}d dry_run={}",
        config.due_dates.registrar, config.due_dates.offset_days, config.due_dates.dry_run
    );
    println!(
        "   Migration   : {} -> {} dry_run={}",
        config.migration.trigger_registrar,
        config.migration.target_registrar,
        config.migration.dry_run
    );
    Ok(())
}

fn apply_adjust_overrides(config: &mut AppConfig, args: AdjustArgs) {
    let due = &mut config.due_dates;
    if args.execute {
        due.dry_run = false;
    } else if args.dry_run {
        due.dry_run = true;
    }
    if let Some(registrar) = args.registrar {
        due.registrar = registrar;
    }
    if let Some(days) = args.days {
        due.offset_days = days;
    }
    if args.within_days.is_some() {
        due.within_days = args.within_days;
    }
    if !args.allow.is_empty() {
        due.allow_list = args.allow;
    }
    if !args.deny.is_empty() {
        due.deny_list = args.deny;
    }
}

fn hook_event(args: &HookArgs) -> Result<RenewalEvent, Box<dyn std::error::Error>> {
    if let Some(ref raw) = args.event {
        return Ok(RenewalEvent::from_json(raw)?);
    }
    match (args.domain_id, args.domain.as_ref()) {
        (Some(id), Some(name)) => Ok(RenewalEvent::new(id, name.clone())),
        _ => Err("either --event or --domain-id with --domain is required".into()),
    }
}

async fn adjust_due_dates(
    config: AppConfig,
    auto_migrate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", AdjustmentReport::header(&config.due_dates));
    println!();

    let runtime = Runtime::connect(RuntimeOptions {
        config,
        auto_migrate,
    })
    .await?;

    let result = runtime.due_date_adjuster().run(today()).await;
    runtime.close().await;

    match result {
        Ok(report) => {
            print!("{}", report);
            println!("\n{}", "=".repeat(80));
            Ok(())
        }
        Err(e) => {
            error!("Due-date adjustment failed: {}", e);
            println!("\nERROR: {}", e);
            Err(e.into())
        }
    }
}

async fn renew_hook(
    config: AppConfig,
    auto_migrate: bool,
    event: RenewalEvent,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = Runtime::connect(RuntimeOptions {
        config,
        auto_migrate,
    })
    .await?;

    let result = runtime.migration_workflow().run(&event).await;
    runtime.close().await;

    let decision = result?;
    println!("{}", serde_json::to_string(&HookResponse::from(&decision))?);
    Ok(())
}

async fn activity(
    config: AppConfig,
    auto_migrate: bool,
    limit: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = Runtime::connect(RuntimeOptions {
        config,
        auto_migrate,
    })
    .await?;

    let entries = runtime.repos.activity().recent(limit).await;
    runtime.close().await;

    for entry in entries?.iter().rev() {
        println!(
            "{}  {}",
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.message
        );
    }
    Ok(())
}
