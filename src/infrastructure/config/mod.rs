// ============================================================
// WEBHOOK SETTINGS
// ============================================================
// The three backend endpoints are deployment configuration, not
// compiled-in constants. Settings come from leadbridge.toml and
// LEADBRIDGE_-prefixed environment variables, env winning.

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "leadbridge.toml";
pub const ENV_PREFIX: &str = "LEADBRIDGE_";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Load variables from a local .env file, if present.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookSettings {
    /// GET endpoint returning the full lead list.
    pub fetch_leads_url: String,
    /// POST endpoint applying field updates to one lead.
    pub update_lead_url: String,
    /// POST endpoint receiving transformed contact uploads.
    pub upload_contacts_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl WebhookSettings {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub(crate) fn from_figment(figment: Figment) -> Result<Self> {
        let settings: WebhookSettings = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load webhook settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let endpoints = [
            ("fetch_leads_url", &self.fetch_leads_url),
            ("update_lead_url", &self.update_lead_url),
            ("upload_contacts_url", &self.upload_contacts_url),
        ];
        for (name, value) in endpoints {
            Url::parse(value)
                .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", name, e)))?;
        }
        Ok(())
    }
}
