// ============================================================
// LEAD DOMAIN RULES
// ============================================================
// Canonical field names and the derived-status predicates.
// No I/O, no async, no external dependencies.

use crate::domain::record::Record;

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const PHONE_NUMBER: &str = "Phone Number";
pub const EMAIL: &str = "Email";
pub const DATE_CREATED: &str = "Date Created";
pub const TIME_CREATED: &str = "Time Created";
pub const CAMPAIGN_DATE: &str = "Campaign Date";
pub const CALL_STATUS: &str = "Call Status";
pub const RECORDINGS_LINK: &str = "Recordings link";
pub const CALL_EVALUATION: &str = "Call Evaluation";

/// The nine call-slot fields maintained by the calling backend.
pub const CALL_SLOTS: [&str; 9] = [
    "Call #1", "Call #2", "Call #3", "Call #4", "Call #5", "Call #6", "Call #7", "Call #8",
    "Call #9",
];

/// Call status vocabulary offered by the console's edit form.
pub const CALL_STATUS_OPTIONS: [&str; 4] =
    ["Scheduled", "Immediate call", "In Progress", "Complete"];

pub const STATUS_SCHEDULED: &str = "Scheduled";
pub const STATUS_IMMEDIATE: &str = "Immediate call";
pub const STATUS_COMPLETE: &str = "Complete";

/// A lead stays active until its call status is "complete" or every
/// call slot has been used.
pub fn is_lead_active(lead: &Record) -> bool {
    let call_status = lead.value(CALL_STATUS).trim().to_lowercase();
    let is_complete = call_status == "complete";
    let all_calls_filled = CALL_SLOTS
        .iter()
        .all(|slot| !lead.value(slot).trim().is_empty());
    !is_complete && !all_calls_filled
}

/// Hot = completed call with a recording and a TRUE evaluation.
/// All three conditions are required, so a hot lead is always inactive.
pub fn is_hot_lead(lead: &Record) -> bool {
    let call_status = lead.value(CALL_STATUS).trim().to_lowercase();
    let is_complete = call_status == "complete";
    let has_recording = !lead.value(RECORDINGS_LINK).trim().is_empty();
    let eval_is_true = lead.value(CALL_EVALUATION).trim().to_uppercase() == "TRUE";
    is_complete && has_recording && eval_is_true
}

/// Number of non-blank call slots, out of nine.
pub fn calls_used(lead: &Record) -> usize {
    CALL_SLOTS
        .iter()
        .filter(|slot| !lead.value(slot).trim().is_empty())
        .count()
}

/// "First Last" for roster rows, "-" when both parts are blank.
pub fn display_name(lead: &Record) -> String {
    let name = format!("{} {}", lead.value(FIRST_NAME), lead.value(LAST_NAME));
    let name = name.trim();
    if name.is_empty() {
        "-".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead_with(pairs: &[(&str, &str)]) -> Record {
        Record::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_lead_active_by_default() {
        let lead = lead_with(&[("Call Status", "Scheduled")]);
        assert!(is_lead_active(&lead));
    }

    #[test]
    fn test_complete_status_deactivates() {
        // Case and surrounding whitespace must not matter
        let lead = lead_with(&[("Call Status", "  Complete ")]);
        assert!(!is_lead_active(&lead));
    }

    #[test]
    fn test_slot_exhaustion_overrides_status() {
        let mut lead = lead_with(&[("Call Status", "Scheduled")]);
        for slot in CALL_SLOTS {
            lead.set(slot, "2025-01-01 answered");
        }
        assert!(!is_lead_active(&lead));
    }

    #[test]
    fn test_eight_slots_still_active() {
        let mut lead = lead_with(&[("Call Status", "Scheduled")]);
        for slot in &CALL_SLOTS[..8] {
            lead.set(*slot, "x");
        }
        lead.set("Call #9", "   ");
        assert!(is_lead_active(&lead));
        assert_eq!(calls_used(&lead), 8);
    }

    #[test]
    fn test_hot_lead_requires_all_three() {
        let hot = lead_with(&[
            ("Call Status", "Complete"),
            ("Recordings link", "https://example.com/rec/1"),
            ("Call Evaluation", "true"),
        ]);
        assert!(is_hot_lead(&hot));
        assert!(!is_lead_active(&hot));

        let no_recording = lead_with(&[
            ("Call Status", "Complete"),
            ("Call Evaluation", "TRUE"),
        ]);
        assert!(!is_hot_lead(&no_recording));

        let not_complete = lead_with(&[
            ("Call Status", "In Progress"),
            ("Recordings link", "https://example.com/rec/1"),
            ("Call Evaluation", "TRUE"),
        ]);
        assert!(!is_hot_lead(&not_complete));

        let eval_false = lead_with(&[
            ("Call Status", "Complete"),
            ("Recordings link", "https://example.com/rec/1"),
            ("Call Evaluation", "FALSE"),
        ]);
        assert!(!is_hot_lead(&eval_false));
    }

    #[test]
    fn test_display_name_fallback() {
        let lead = lead_with(&[("First Name", ""), ("Last Name", "")]);
        assert_eq!(display_name(&lead), "-");

        let lead = lead_with(&[("First Name", "Jane")]);
        assert_eq!(display_name(&lead), "Jane");

        let lead = lead_with(&[("First Name", "Jane"), ("Last Name", "Doe")]);
        assert_eq!(display_name(&lead), "Jane Doe");
    }
}
