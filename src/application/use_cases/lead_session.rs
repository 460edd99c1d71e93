// ============================================================
// LEAD SESSION USE CASE
// ============================================================
// In-memory lead list owned by the active view. Writes go to the
// backend first; local state is patched only after a confirmed
// success, so a failed write leaves the roster untouched.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::use_cases::lead_roster::{count_leads, filter_leads, RosterCounts, RosterQuery};
use crate::domain::error::{AppError, Result};
use crate::domain::lead::{is_lead_active, CALL_STATUS, PHONE_NUMBER, STATUS_COMPLETE, STATUS_SCHEDULED};
use crate::domain::record::Record;
use crate::infrastructure::webhooks::LeadGateway;

pub struct LeadSession {
    gateway: Arc<dyn LeadGateway + Send + Sync>,
    leads: Vec<Record>,
    // Advisory per-lead write markers, not a cross-process lock
    in_flight: HashSet<String>,
}

impl LeadSession {
    pub fn new(gateway: Arc<dyn LeadGateway + Send + Sync>) -> Self {
        Self {
            gateway,
            leads: Vec::new(),
            in_flight: HashSet::new(),
        }
    }

    /// Replace the whole list with a fresh fetch.
    pub async fn refresh(&mut self) -> Result<usize> {
        let leads = self.gateway.fetch_leads().await?;
        info!(count = leads.len(), "Lead list refreshed");
        self.leads = leads;
        Ok(self.leads.len())
    }

    pub fn leads(&self) -> &[Record] {
        &self.leads
    }

    pub fn counts(&self) -> RosterCounts {
        count_leads(&self.leads)
    }

    /// The filtered, sorted roster for the given view selection.
    pub fn view(&self, query: &RosterQuery) -> Vec<Record> {
        filter_leads(&self.leads, query)
    }

    /// Whether a write for this lead is currently in flight.
    pub fn is_updating(&self, phone_number: &str) -> bool {
        self.in_flight.contains(phone_number)
    }

    /// Flip a lead between active and inactive by rewriting its call
    /// status: active leads are completed, inactive ones rescheduled.
    /// Returns the status that was written.
    pub async fn toggle_status(&mut self, phone_number: &str) -> Result<&'static str> {
        let active = {
            let lead = self.find_lead(phone_number)?;
            is_lead_active(lead)
        };
        let new_status = if active {
            STATUS_COMPLETE
        } else {
            STATUS_SCHEDULED
        };

        let mut updates = Record::new();
        updates.set(CALL_STATUS, new_status);
        self.write_lead(phone_number, updates).await?;
        Ok(new_status)
    }

    /// Patch an arbitrary set of fields on one lead.
    pub async fn save_edit(&mut self, phone_number: &str, updates: Record) -> Result<()> {
        self.find_lead(phone_number)?;
        self.write_lead(phone_number, updates).await
    }

    fn find_lead(&self, phone_number: &str) -> Result<&Record> {
        self.leads
            .iter()
            .find(|lead| lead.value(PHONE_NUMBER) == phone_number)
            .ok_or_else(|| {
                AppError::ValidationError(format!("No lead with phone number {}", phone_number))
            })
    }

    async fn write_lead(&mut self, phone_number: &str, updates: Record) -> Result<()> {
        if !self.in_flight.insert(phone_number.to_string()) {
            warn!(phone_number, "Rejected concurrent write for lead");
            return Err(AppError::ValidationError(format!(
                "An update for {} is already in progress",
                phone_number
            )));
        }

        let outcome = self.gateway.update_lead(phone_number, &updates).await;
        self.in_flight.remove(phone_number);
        outcome?;

        // Optimistic patch only after the backend confirmed the write
        for lead in self.leads.iter_mut() {
            if lead.value(PHONE_NUMBER) == phone_number {
                lead.merge(&updates);
            }
        }
        info!(phone_number, fields = updates.len(), "Lead patched locally");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::webhooks::UploadReceipt;
    use std::sync::Mutex;

    // Scriptable gateway double: serves a fixed lead list and either
    // accepts or rejects updates.
    struct FakeGateway {
        leads: Vec<Record>,
        fail_updates: bool,
        updates_seen: Mutex<Vec<(String, Record)>>,
    }

    impl FakeGateway {
        fn with_leads(leads: Vec<Record>) -> Self {
            Self {
                leads,
                fail_updates: false,
                updates_seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(leads: Vec<Record>) -> Self {
            Self {
                fail_updates: true,
                ..Self::with_leads(leads)
            }
        }
    }

    #[async_trait::async_trait]
    impl LeadGateway for FakeGateway {
        async fn fetch_leads(&self) -> Result<Vec<Record>> {
            Ok(self.leads.clone())
        }

        async fn update_lead(&self, phone_number: &str, updates: &Record) -> Result<()> {
            if self.fail_updates {
                return Err(AppError::TransportError("Update failed (500)".to_string()));
            }
            self.updates_seen
                .lock()
                .unwrap()
                .push((phone_number.to_string(), updates.clone()));
            Ok(())
        }

        async fn upload_contacts(
            &self,
            _contacts: &[Record],
            _call_status: &str,
        ) -> Result<UploadReceipt> {
            unimplemented!("not exercised by session tests")
        }
    }

    fn scheduled_lead(phone: &str) -> Record {
        Record::from_pairs([
            ("Phone Number", phone),
            ("First Name", "Jane"),
            ("Call Status", "Scheduled"),
        ])
    }

    fn complete_lead(phone: &str) -> Record {
        Record::from_pairs([("Phone Number", phone), ("Call Status", "Complete")])
    }

    #[tokio::test]
    async fn test_refresh_replaces_list() {
        let gateway = Arc::new(FakeGateway::with_leads(vec![
            scheduled_lead("310"),
            complete_lead("212"),
        ]));
        let mut session = LeadSession::new(gateway);

        assert!(session.leads().is_empty());
        let count = session.refresh().await.expect("refresh should succeed");

        assert_eq!(count, 2);
        assert_eq!(session.counts().total, 2);
        assert_eq!(session.counts().active, 1);
    }

    #[tokio::test]
    async fn test_toggle_completes_active_lead() {
        let gateway = Arc::new(FakeGateway::with_leads(vec![scheduled_lead("310")]));
        let mut session = LeadSession::new(gateway.clone());
        session.refresh().await.unwrap();

        let written = session.toggle_status("310").await.expect("toggle should succeed");

        assert_eq!(written, "Complete");
        assert_eq!(session.leads()[0].value("Call Status"), "Complete");
        let seen = gateway.updates_seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "310");
        assert_eq!(seen[0].1.value("Call Status"), "Complete");
    }

    #[tokio::test]
    async fn test_toggle_reschedules_inactive_lead() {
        let gateway = Arc::new(FakeGateway::with_leads(vec![complete_lead("212")]));
        let mut session = LeadSession::new(gateway);
        session.refresh().await.unwrap();

        let written = session.toggle_status("212").await.unwrap();

        assert_eq!(written, "Scheduled");
        assert_eq!(session.leads()[0].value("Call Status"), "Scheduled");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_local_state_unmodified() {
        let gateway = Arc::new(FakeGateway::failing(vec![scheduled_lead("310")]));
        let mut session = LeadSession::new(gateway);
        session.refresh().await.unwrap();

        let err = session.toggle_status("310").await.unwrap_err();

        assert!(matches!(err, AppError::TransportError(_)));
        assert_eq!(session.leads()[0].value("Call Status"), "Scheduled");
        // The advisory marker is released even on failure
        assert!(!session.is_updating("310"));
    }

    #[tokio::test]
    async fn test_unknown_phone_rejected() {
        let gateway = Arc::new(FakeGateway::with_leads(vec![scheduled_lead("310")]));
        let mut session = LeadSession::new(gateway);
        session.refresh().await.unwrap();

        let err = session.toggle_status("999").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_save_edit_patches_fields() {
        let gateway = Arc::new(FakeGateway::with_leads(vec![scheduled_lead("310")]));
        let mut session = LeadSession::new(gateway);
        session.refresh().await.unwrap();

        let updates = Record::from_pairs([
            ("First Name", "Joan"),
            ("Email", "joan@example.com"),
            ("Campaign Date", "2025-04-01"),
        ]);
        session.save_edit("310", updates).await.expect("edit should succeed");

        let lead = &session.leads()[0];
        assert_eq!(lead.value("First Name"), "Joan");
        assert_eq!(lead.value("Email"), "joan@example.com");
        assert_eq!(lead.value("Campaign Date"), "2025-04-01");
        // Untouched fields survive the patch
        assert_eq!(lead.value("Call Status"), "Scheduled");
    }

    #[tokio::test]
    async fn test_view_filters_session_leads() {
        let gateway = Arc::new(FakeGateway::with_leads(vec![
            scheduled_lead("310"),
            complete_lead("212"),
        ]));
        let mut session = LeadSession::new(gateway);
        session.refresh().await.unwrap();

        let query = RosterQuery {
            tab: crate::application::use_cases::lead_roster::FilterTab::Active,
            ..Default::default()
        };
        let view = session.view(&query);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].value("Phone Number"), "310");
    }
}
