//! HTTP client for the billing platform's JSON API
//!
//! Every operation is a form-encoded POST carrying the action name, the API
//! credentials and `responseformat=json`. The platform answers with a JSON
//! object whose `result` field is `"success"` or `"error"`; on error the
//! `message` field explains why.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiSection;
use crate::domain::{ApiError, ApiResult, DomainApiClient, DomainStatus};
use crate::support::errors::InfraError;

pub const ACTION_UPDATE_LOCKING_STATUS: &str = "DomainUpdateLockingStatus";
pub const ACTION_TOGGLE_ID_PROTECT: &str = "DomainToggleIdProtect";
pub const ACTION_REQUEST_EPP: &str = "DomainRequestEPP";
pub const ACTION_UPDATE_CLIENT_DOMAIN: &str = "UpdateClientDomain";
pub const ACTION_DOMAIN_TRANSFER: &str = "DomainTransfer";

type Form = Vec<(&'static str, String)>;

pub struct PlatformApiClient {
    http: reqwest::Client,
    url: String,
    identifier: String,
    secret: String,
}

impl PlatformApiClient {
    pub fn new(config: &ApiSection) -> Result<Self, InfraError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url.clone(),
            identifier: config.identifier.clone(),
            secret: config.secret.clone(),
        })
    }

    fn form(&self, action: &'static str, params: Form) -> Form {
        let mut form: Form = vec![
            ("action", action.to_string()),
            ("identifier", self.identifier.clone()),
            ("secret", self.secret.clone()),
            ("responseformat", "json".to_string()),
        ];
        form.extend(params);
        form
    }

    async fn call(&self, action: &'static str, params: Form) -> ApiResult<Value> {
        debug!(action, "Calling billing platform API");

        let response = self
            .http
            .post(&self.url)
            .form(&self.form(action, params))
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                action,
                message: e.to_string(),
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| ApiError::Decode {
            action,
            message: format!("HTTP {}: {}", status, e),
        })?;

        parse_response(action, body)
    }
}

/// Turn a decoded response body into success or a rejection
pub fn parse_response(action: &'static str, body: Value) -> ApiResult<Value> {
    if !body.is_object() {
        return Err(ApiError::Decode {
            action,
            message: "response is not a JSON object".into(),
        });
    }

    if body.get("result").and_then(Value::as_str) == Some("success") {
        return Ok(body);
    }

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or("Unknown error")
        .to_string();
    Err(ApiError::Rejected { action, message })
}

/// Pull the transfer code out of a successful `DomainRequestEPP` response
pub fn extract_transfer_code(body: &Value) -> Option<String> {
    let code = match body.get("eppcode")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if code.trim().is_empty() {
        None
    } else {
        Some(code)
    }
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

#[async_trait]
impl DomainApiClient for PlatformApiClient {
    async fn set_lock(&self, domain_id: i32, locked: bool) -> ApiResult<()> {
        self.call(
            ACTION_UPDATE_LOCKING_STATUS,
            vec![("domainid", domain_id.to_string()), ("lockstatus", flag(locked))],
        )
        .await?;
        Ok(())
    }

    async fn set_id_protection(&self, domain_id: i32, enabled: bool) -> ApiResult<()> {
        self.call(
            ACTION_TOGGLE_ID_PROTECT,
            vec![("domainid", domain_id.to_string()), ("idprotect", flag(enabled))],
        )
        .await?;
        Ok(())
    }

    async fn request_transfer_code(&self, domain_id: i32) -> ApiResult<Option<String>> {
        let body = self
            .call(ACTION_REQUEST_EPP, vec![("domainid", domain_id.to_string())])
            .await?;
        Ok(extract_transfer_code(&body))
    }

    async fn set_registrar_and_status(
        &self,
        domain_id: i32,
        registrar: &str,
        status: DomainStatus,
    ) -> ApiResult<()> {
        self.call(
            ACTION_UPDATE_CLIENT_DOMAIN,
            vec![
                ("domainid", domain_id.to_string()),
                ("registrar", registrar.to_string()),
                ("status", status.as_str().to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    async fn submit_transfer(&self, domain_id: i32, transfer_code: &str) -> ApiResult<()> {
        self.call(
            ACTION_DOMAIN_TRANSFER,
            vec![
                ("domainid", domain_id.to_string()),
                ("eppcode", transfer_code.to_string()),
            ],
        )
        .await?;
        Ok(())
    }
}
