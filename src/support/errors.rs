use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage: {0}")]
    Storage(String),
}

/// Failure of a single remote operation against the billing platform API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{action} failed: {message}")]
    Rejected {
        action: &'static str,
        message: String,
    },

    #[error("{action} failed: transport error: {message}")]
    Transport {
        action: &'static str,
        message: String,
    },

    #[error("{action} failed: unexpected response: {message}")]
    Decode {
        action: &'static str,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
