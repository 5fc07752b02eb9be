//! Host hook contract
//!
//! The billing platform fires a pre-renewal hook before asking the registrar
//! to renew a domain. Its only interception point is "abort with a message",
//! so the migration workflow answers every event with a [`RenewalDecision`]:
//! either let the renewal continue untouched, or stop it and show a message
//! explaining what happened instead.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Payload of a pre-renewal event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalEvent {
    #[serde(default)]
    pub domain_id: i32,
    #[serde(default)]
    pub domain_name: String,
}

impl RenewalEvent {
    pub fn new(domain_id: i32, domain_name: impl Into<String>) -> Self {
        Self {
            domain_id,
            domain_name: domain_name.into(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::Validation(format!("invalid renewal event: {}", e)))
    }
}

/// What the host should do with the renewal that triggered the hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenewalDecision {
    /// Not ours: renew as usual
    Continue,
    /// Stop the renewal and show this message
    Abort(String),
}

impl RenewalDecision {
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Abort(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Continue => None,
            Self::Abort(message) => Some(message),
        }
    }
}

/// Wire form handed back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookResponse {
    pub abort: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&RenewalDecision> for HookResponse {
    fn from(decision: &RenewalDecision) -> Self {
        Self {
            abort: decision.is_abort(),
            message: decision.message().map(str::to_string),
        }
    }
}
