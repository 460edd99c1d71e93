pub mod use_cases;

pub use use_cases::csv_ingestion::ContactIngestion;
pub use use_cases::lead_roster::{FilterTab, RosterCounts, RosterQuery, SortDirection};
pub use use_cases::lead_session::LeadSession;
