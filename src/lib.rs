//! Thin client core for a webhook-driven lead console: CSV contact
//! ingestion, lead classification and filtering, and the three
//! automation-backend endpoints. Page rendering, routing and
//! authentication live outside this crate.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::csv_ingestion::{
    save_template, transform_contacts, ContactIngestion, CSV_TEMPLATE, TEMPLATE_FILE_NAME,
};
pub use application::use_cases::lead_roster::{
    count_leads, filter_leads, parse_date_value, FilterTab, RosterCounts, RosterQuery,
    SortDirection,
};
pub use application::use_cases::lead_session::LeadSession;
pub use domain::error::{AppError, Result};
pub use domain::lead::{calls_used, display_name, is_hot_lead, is_lead_active};
pub use domain::record::Record;
pub use infrastructure::config::{load_dotenv, WebhookSettings};
pub use infrastructure::webhooks::{DuplicateContact, LeadGateway, UploadReceipt, WebhookGateway};

/// Install the default tracing subscriber. Safe to call more than once.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}
