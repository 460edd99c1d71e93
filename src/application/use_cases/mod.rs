pub mod csv_ingestion;
pub mod lead_roster;
pub mod lead_session;
