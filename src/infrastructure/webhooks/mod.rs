// ============================================================
// WEBHOOK GATEWAY
// ============================================================
// The three automation-backend endpoints behind one async trait.
// Transport failures (network, non-2xx) and protocol failures
// (empty body, invalid JSON, explicit success:false) are distinct
// error kinds so callers can message them differently.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::error::{AppError, Result};
use crate::domain::record::Record;
use crate::infrastructure::config::WebhookSettings;

/// A contact the backend skipped as a duplicate during upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateContact {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
}

/// Backend response to a contact upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub added: u64,
    #[serde(default)]
    pub duplicates: u64,
    #[serde(default)]
    pub duplicate_contacts: Vec<DuplicateContact>,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct WireLeadsResponse {
    #[serde(default)]
    leads: Vec<Record>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireUpdateRequest<'a> {
    phone_number: &'a str,
    updates: &'a Record,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireUploadRequest<'a> {
    contacts: &'a [Record],
    call_status: &'a str,
}

#[async_trait]
pub trait LeadGateway {
    /// Fetch the full lead list. A missing or empty array is zero leads.
    async fn fetch_leads(&self) -> Result<Vec<Record>>;

    /// Apply field updates to the lead addressed by phone number.
    async fn update_lead(&self, phone_number: &str, updates: &Record) -> Result<()>;

    /// Send transformed contacts for import.
    async fn upload_contacts(&self, contacts: &[Record], call_status: &str)
        -> Result<UploadReceipt>;
}

/// reqwest-backed gateway against the configured webhook endpoints.
pub struct WebhookGateway {
    client: reqwest::Client,
    settings: WebhookSettings,
}

impl WebhookGateway {
    pub fn new(settings: WebhookSettings) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(settings.request_timeout_secs))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            settings,
        }
    }
}

#[async_trait]
impl LeadGateway for WebhookGateway {
    async fn fetch_leads(&self) -> Result<Vec<Record>> {
        let response = self
            .client
            .get(&self.settings.fetch_leads_url)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::TransportError(format!(
                "Failed to fetch leads ({})",
                response.status().as_u16()
            )));
        }

        let body: WireLeadsResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProtocolError(format!("Failed to parse JSON: {}", e)))?;

        debug!(count = body.leads.len(), "Fetched leads");
        Ok(body.leads)
    }

    async fn update_lead(&self, phone_number: &str, updates: &Record) -> Result<()> {
        let body = WireUpdateRequest {
            phone_number,
            updates,
        };

        let response = self
            .client
            .post(&self.settings.update_lead_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::TransportError(format!(
                "Update failed ({})",
                response.status().as_u16()
            )));
        }

        debug!(fields = updates.len(), "Lead updated");
        Ok(())
    }

    async fn upload_contacts(
        &self,
        contacts: &[Record],
        call_status: &str,
    ) -> Result<UploadReceipt> {
        let body = WireUploadRequest {
            contacts,
            call_status,
        };

        let response = self
            .client
            .post(&self.settings.upload_contacts_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AppError::TransportError(format!(
                "Server responded with {}: {}",
                status.as_u16(),
                text
            )));
        }

        let receipt = interpret_upload_body(&text)?;
        info!(
            added = receipt.added,
            duplicates = receipt.duplicates,
            errors = receipt.errors,
            "Upload accepted"
        );
        Ok(receipt)
    }
}

/// Interpret a 2xx upload response body. Empty bodies and non-JSON
/// bodies are protocol failures; so is an explicit success:false.
pub(crate) fn interpret_upload_body(body: &str) -> Result<UploadReceipt> {
    if body.trim().is_empty() {
        return Err(AppError::ProtocolError(
            "Server returned empty response".to_string(),
        ));
    }

    let receipt: UploadReceipt = serde_json::from_str(body).map_err(|_| {
        AppError::ProtocolError(format!(
            "Server returned invalid JSON: {}",
            body.chars().take(100).collect::<String>()
        ))
    })?;

    if !receipt.success {
        let reason = receipt
            .error
            .clone()
            .unwrap_or_else(|| "Unknown error occurred".to_string());
        return Err(AppError::ProtocolError(reason));
    }

    Ok(receipt)
}
