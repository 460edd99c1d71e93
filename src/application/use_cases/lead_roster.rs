// ============================================================
// LEAD ROSTER FILTERING
// ============================================================
// Tab / search / date filtering, campaign-date sorting and the
// tab counts shown in the console header

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::lead::{
    is_hot_lead, is_lead_active, CAMPAIGN_DATE, EMAIL, FIRST_NAME, LAST_NAME, PHONE_NUMBER,
};
use crate::domain::record::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterTab {
    #[default]
    All,
    Active,
    Inactive,
    Hot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// The roster view selection: filter tab, free-text search,
/// single-day campaign-date filter, and sort direction.
#[derive(Debug, Clone, Default)]
pub struct RosterQuery {
    pub tab: FilterTab,
    pub search: String,
    pub date_filter: String,
    pub sort: SortDirection,
}

/// Counts over the unfiltered lead list, for the tab labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterCounts {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub hot: usize,
}

// The shapes the backend sheet and the console's date inputs produce.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a value into a calendar date, ignoring time-of-day.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(stamped) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamped.date_naive());
    }
    if let Ok(stamped) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(stamped.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Campaign dates as sortable timestamps. Blank and unparseable values
/// map to 0, so leads without a usable date sort as oldest.
pub fn parse_date_value(value: &str) -> i64 {
    parse_calendar_date(value)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|stamped| stamped.and_utc().timestamp_millis())
        .unwrap_or(0)
}

fn matches_query(lead: &Record, query: &RosterQuery) -> bool {
    // The hot tab short-circuits: search and date filters do not apply
    // to it (see DESIGN.md).
    if query.tab == FilterTab::Hot {
        return is_hot_lead(lead);
    }

    let active = is_lead_active(lead);
    if query.tab == FilterTab::Active && !active {
        return false;
    }
    if query.tab == FilterTab::Inactive && active {
        return false;
    }

    if !query.date_filter.is_empty() {
        let lead_date = lead.value(CAMPAIGN_DATE).trim();
        if lead_date.is_empty() {
            return false;
        }
        match (
            parse_calendar_date(lead_date),
            parse_calendar_date(&query.date_filter),
        ) {
            (Some(lead_day), Some(filter_day)) if lead_day == filter_day => {}
            _ => return false,
        }
    }

    if !query.search.is_empty() {
        let needle = query.search.to_lowercase();
        let name = format!("{} {}", lead.value(FIRST_NAME), lead.value(LAST_NAME)).to_lowercase();
        let phone = lead.value(PHONE_NUMBER).to_lowercase();
        let email = lead.value(EMAIL).to_lowercase();
        return name.contains(&needle) || phone.contains(&needle) || email.contains(&needle);
    }

    true
}

/// Filter and sort a lead list for display. The sort is stable, so
/// equal campaign dates keep their original order.
pub fn filter_leads(leads: &[Record], query: &RosterQuery) -> Vec<Record> {
    let mut result: Vec<Record> = leads
        .iter()
        .filter(|lead| matches_query(lead, query))
        .cloned()
        .collect();

    result.sort_by(|a, b| {
        let date_a = parse_date_value(a.value(CAMPAIGN_DATE));
        let date_b = parse_date_value(b.value(CAMPAIGN_DATE));
        match query.sort {
            SortDirection::Desc => date_b.cmp(&date_a),
            SortDirection::Asc => date_a.cmp(&date_b),
        }
    });

    result
}

/// Tab counts, always computed over the unfiltered list.
pub fn count_leads(leads: &[Record]) -> RosterCounts {
    let total = leads.len();
    let active = leads.iter().filter(|lead| is_lead_active(lead)).count();
    let hot = leads.iter().filter(|lead| is_hot_lead(lead)).count();
    RosterCounts {
        total,
        active,
        inactive: total - active,
        hot,
    }
}
