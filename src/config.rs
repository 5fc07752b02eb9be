//! Configuration module
//!
//! Settings are read from a TOML file (default
//! `~/.config/registrar-migrator/config.toml`). Every field has a default, so
//! a partial file only needs the sections it changes. Both flows default to
//! dry-run.
//!
//! ```toml
//! [database]
//! url = "sqlite:///var/lib/registrar-migrator/domains.db?mode=rwc"
//!
//! [api]
//! url = "https://billing.example.com/includes/api.php"
//! identifier = "..."
//! secret = "..."
//!
//! [due_dates]
//! registrar = "cnic"
//! offset_days = 7
//!
//! [migration]
//! trigger_registrar = "cnic"
//! target_registrar = "openprovider"
//! allow_list = ["test-domain.com"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::domain_record::model::normalize;
use crate::support::errors::ConfigError;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "REGISTRAR_MIGRATOR_CONFIG";

/// Default config file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("registrar-migrator")
        .join("config.toml")
}

/// Configuration together with the file it was read from
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: PathBuf,
    /// Why the default file was not used, when built-in defaults were substituted
    pub fallback: Option<ConfigError>,
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub api: ApiSection,
    pub admin: AdminSection,
    pub due_dates: DueDateAdjustConfig,
    pub migration: MigrationConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file. Each flow validates its own
    /// section before running, see [`AppConfig::validate`] for the full check.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Resolve the configuration for one run.
    ///
    /// A path given on the command line or through [`CONFIG_ENV_VAR`] must
    /// load. Only the default location falls back to built-in defaults.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
        match explicit {
            Some(path) => {
                let config = Self::load(&path)?;
                Ok(LoadedConfig {
                    config,
                    path,
                    fallback: None,
                })
            }
            None => Ok(Self::load_or_default(default_config_path())),
        }
    }

    fn load_or_default(path: PathBuf) -> LoadedConfig {
        match Self::load(&path) {
            Ok(config) => LoadedConfig {
                config,
                path,
                fallback: None,
            },
            Err(e) => LoadedConfig {
                config: Self::default(),
                path,
                fallback: Some(e),
            },
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Reject combinations that would make either flow meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.due_dates.validate()?;
        self.migration.validate()?;
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Database URL (e.g., "sqlite://./domains.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./domains.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        self.url.clone()
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// trace, debug, info, warn, error (or a full EnvFilter directive)
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Billing platform API credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Full URL of the platform's API endpoint
    pub url: String,
    pub identifier: String,
    pub secret: String,
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            url: "http://localhost/includes/api.php".to_string(),
            identifier: String::new(),
            secret: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Administrator contact settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSection {
    /// Recipient for batch-run notifications
    pub email: Option<String>,
}

/// Settings for the due-date batch adjuster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DueDateAdjustConfig {
    pub dry_run: bool,
    /// Days to move the due date earlier
    pub offset_days: u32,
    /// Registrar whose domains are adjusted
    pub registrar: String,
    /// Only domains due within this many days; `None` adjusts all future ones
    pub within_days: Option<u32>,
    /// When non-empty, only these domains
    pub allow_list: Vec<String>,
    pub deny_list: Vec<String>,
    /// Notify administrators after a live run
    pub notify_admin: bool,
}

impl Default for DueDateAdjustConfig {
    fn default() -> Self {
        Self {
            dry_run: true,
            offset_days: 7,
            registrar: String::new(),
            within_days: None,
            allow_list: Vec::new(),
            deny_list: Vec::new(),
            notify_admin: true,
        }
    }
}

impl DueDateAdjustConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if normalize(&self.registrar).is_empty() {
            return Err(ConfigError::Invalid(
                "due_dates.registrar must name the registrar to adjust".into(),
            ));
        }
        Ok(())
    }
}

/// Settings for the registrar migration hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Unlock, disable ID protection and fetch the EPP code, but leave the
    /// registrar and status alone and submit nothing
    pub dry_run: bool,
    /// Only act on domains currently at this registrar; empty means any
    pub trigger_registrar: String,
    /// Registrar module slug to move domains to
    pub target_registrar: String,
    /// When non-empty, only these domains
    pub allow_list: Vec<String>,
    pub deny_list: Vec<String>,
    pub unlock_domain: bool,
    pub disable_id_protection: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            dry_run: true,
            trigger_registrar: String::new(),
            target_registrar: String::new(),
            allow_list: Vec::new(),
            deny_list: Vec::new(),
            unlock_domain: true,
            disable_id_protection: true,
        }
    }
}

impl MigrationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let target = normalize(&self.target_registrar);
        if target.is_empty() {
            return Err(ConfigError::Invalid(
                "migration.target_registrar must name the new registrar".into(),
            ));
        }
        if normalize(&self.trigger_registrar) == target {
            return Err(ConfigError::Invalid(
                "migration.trigger_registrar and migration.target_registrar are the same".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [database]
        url = "sqlite::memory:"

        [logging]
        level = "debug"
        format = "json"

        [due_dates]
        registrar = "cnic"
        offset_days = 10
        within_days = 30
        deny_list = ["skip.me"]

        [migration]
        dry_run = false
        trigger_registrar = "cnic"
        target_registrar = "openprovider"
        allow_list = ["test.com"]
    "#;

    #[test]
    fn parses_full_file() {
        let cfg = AppConfig::from_toml(SAMPLE).unwrap();
        cfg.validate().unwrap();

        assert_eq!(cfg.database.connection_url(), "sqlite::memory:");
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.due_dates.offset_days, 10);
        assert_eq!(cfg.due_dates.within_days, Some(30));
        assert!(cfg.due_dates.dry_run);
        assert!(!cfg.migration.dry_run);
        assert_eq!(cfg.migration.allow_list, vec!["test.com".to_string()]);
        assert!(cfg.migration.unlock_domain);
        assert_eq!(cfg.api.timeout_secs, 30);
    }

    #[test]
    fn defaults_are_dry_run() {
        let cfg = AppConfig::default();
        assert!(cfg.due_dates.dry_run);
        assert!(cfg.migration.dry_run);
        assert_eq!(cfg.due_dates.offset_days, 7);
    }

    #[test]
    fn empty_registrar_is_rejected() {
        let cfg = AppConfig::default();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn identical_registrars_are_rejected() {
        let mig = MigrationConfig {
            trigger_registrar: "CNIC".into(),
            target_registrar: "cnic".into(),
            ..MigrationConfig::default()
        };
        assert!(mig.validate().is_err());
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "registrar-migrator-{}-{}.toml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn explicit_path_must_load() {
        let missing = std::env::temp_dir().join("registrar-migrator-does-not-exist.toml");
        assert!(matches!(
            AppConfig::resolve(Some(missing)),
            Err(ConfigError::Io(_))
        ));

        let broken = scratch_file("broken", "[migration\ndry_run = false");
        let result = AppConfig::resolve(Some(broken.clone()));
        std::fs::remove_file(&broken).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn explicit_path_is_used() {
        let path = scratch_file("good", SAMPLE);
        let loaded = AppConfig::resolve(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.path, path);
        assert!(loaded.fallback.is_none());
        assert_eq!(loaded.config.due_dates.offset_days, 10);
    }

    #[test]
    fn missing_default_file_falls_back() {
        let loaded = AppConfig::load_or_default(
            std::env::temp_dir().join("registrar-migrator-no-default.toml"),
        );
        assert!(matches!(loaded.fallback, Some(ConfigError::Io(_))));
        assert!(loaded.config.migration.dry_run);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[due_dates\nregistrar=").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
