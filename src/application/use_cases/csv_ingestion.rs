// ============================================================
// CSV INGESTION USE CASE
// ============================================================
// Orchestrate parsing, required-column validation, canonical
// transformation and the upload call

use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::domain::lead::{
    CALL_STATUS, CAMPAIGN_DATE, DATE_CREATED, EMAIL, FIRST_NAME, LAST_NAME, PHONE_NUMBER,
    STATUS_IMMEDIATE, STATUS_SCHEDULED, TIME_CREATED,
};
use crate::domain::record::Record;
use crate::infrastructure::csv::{
    find_column_name, missing_required_columns, parse_records, EMAIL_ALIASES, FIRST_NAME_ALIASES,
    LAST_NAME_ALIASES, NAME_ALIASES, PHONE_ALIASES,
};
use crate::infrastructure::webhooks::{LeadGateway, UploadReceipt};

/// Downloadable template showing the preferred format (US phone numbers).
pub const CSV_TEMPLATE: &str = "First Name,Last Name,Phone Number,Email
John,Smith,2125551234,john@example.com
Jane,Doe,3105559876,jane@example.com";

pub const TEMPLATE_FILE_NAME: &str = "leadbridge-template.csv";

/// Write the CSV template to the given path.
pub fn save_template(path: &Path) -> Result<()> {
    std::fs::write(path, CSV_TEMPLATE)?;
    Ok(())
}

fn format_webhook_date(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Transform parsed contacts into canonical leads, stamped with the
/// current local date and time.
pub fn transform_contacts(
    contacts: &[Record],
    campaign_date: &str,
    is_immediate: bool,
) -> Vec<Record> {
    transform_contacts_at(contacts, campaign_date, is_immediate, Local::now())
}

fn transform_contacts_at(
    contacts: &[Record],
    campaign_date: &str,
    is_immediate: bool,
    now: DateTime<Local>,
) -> Vec<Record> {
    if contacts.is_empty() {
        return Vec::new();
    }

    let date_created = format_webhook_date(now);
    let time_created = now.format("%I:%M %p").to_string();

    // Resolve column roles once from the first record's headers
    let headers: Vec<String> = contacts[0].headers().map(str::to_string).collect();
    let first_name_col = find_column_name(&headers, &FIRST_NAME_ALIASES);
    let last_name_col = find_column_name(&headers, &LAST_NAME_ALIASES);
    let name_col = find_column_name(&headers, &NAME_ALIASES);
    let phone_col = find_column_name(&headers, &PHONE_ALIASES);
    let email_col = find_column_name(&headers, &EMAIL_ALIASES);

    // Columns mapped to canonical fields must not also pass through
    let mapped_cols: HashSet<String> = [first_name_col, last_name_col, name_col, phone_col, email_col]
        .iter()
        .flatten()
        .map(|col| col.to_lowercase())
        .collect();

    contacts
        .iter()
        .map(|contact| {
            let (first_name, last_name) = if let Some(col) = first_name_col {
                (
                    contact.value(col).to_string(),
                    last_name_col
                        .map(|col| contact.value(col).to_string())
                        .unwrap_or_default(),
                )
            } else if let Some(col) = name_col {
                split_full_name(contact.value(col))
            } else {
                (String::new(), String::new())
            };

            let phone = phone_col.map(|col| contact.value(col)).unwrap_or("");
            let email = email_col.map(|col| contact.value(col)).unwrap_or("");

            let mut lead = Record::new();
            lead.set(FIRST_NAME, first_name);
            lead.set(LAST_NAME, last_name);
            lead.set(PHONE_NUMBER, phone);
            lead.set(EMAIL, email);
            lead.set(DATE_CREATED, date_created.clone());
            lead.set(TIME_CREATED, time_created.clone());
            lead.set(CAMPAIGN_DATE, campaign_date);
            lead.set(
                CALL_STATUS,
                if is_immediate {
                    STATUS_IMMEDIATE
                } else {
                    STATUS_SCHEDULED
                },
            );

            // Pass through any additional columns from the CSV
            for (key, value) in contact.iter() {
                if mapped_cols.contains(&key.to_lowercase()) || lead.contains_key(key) {
                    continue;
                }
                lead.set(key, value);
            }

            lead
        })
        .collect()
}

// "Jane Doe Smith" -> ("Jane", "Doe Smith"). Splits on single spaces;
// runs of spaces leave empty tokens in the last name.
fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.trim().split(' ');
    let first = parts.next().unwrap_or("").to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Contact upload use case: CSV text in, backend receipt out.
pub struct ContactIngestion {
    gateway: Arc<dyn LeadGateway + Send + Sync>,
}

impl ContactIngestion {
    pub fn new(gateway: Arc<dyn LeadGateway + Send + Sync>) -> Self {
        Self { gateway }
    }

    /// Parse, validate and upload a CSV file's text.
    ///
    /// When `call_immediately` is set the campaign date sent to the
    /// backend is today's date; otherwise `campaign_date` is required.
    pub async fn upload_csv(
        &self,
        text: &str,
        campaign_date: &str,
        call_immediately: bool,
    ) -> Result<UploadReceipt> {
        if !call_immediately && campaign_date.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Please select a Campaign Date or enable \"Call Immediately\".".to_string(),
            ));
        }

        let contacts = parse_records(text);
        if contacts.is_empty() {
            return Err(AppError::ParseError(
                "No valid data rows found in CSV file".to_string(),
            ));
        }

        let headers: Vec<String> = contacts[0].headers().map(str::to_string).collect();
        let missing = missing_required_columns(&headers);
        if !missing.is_empty() {
            return Err(AppError::ValidationError(format!(
                "CSV is missing required columns: {}. Download the template for the recommended format.",
                missing.join(", ")
            )));
        }

        let effective_date = if call_immediately {
            format_webhook_date(Local::now())
        } else {
            campaign_date.to_string()
        };

        let leads = transform_contacts(&contacts, &effective_date, call_immediately);
        let call_status = if call_immediately {
            STATUS_IMMEDIATE
        } else {
            STATUS_SCHEDULED
        };

        info!(count = leads.len(), call_status, "Uploading contacts");
        self.gateway.upload_contacts(&leads, call_status).await
    }
}
