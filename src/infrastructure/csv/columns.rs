// ============================================================
// COLUMN ALIAS MATCHING
// ============================================================
// Flexible header detection: exported contact lists name the same
// column many ways, so each canonical role carries an alias set
// matched case-insensitively against trimmed headers.

use once_cell::sync::Lazy;
use std::collections::HashSet;

pub static FIRST_NAME_ALIASES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["first name", "firstname", "first_name", "given name"].into());

pub static LAST_NAME_ALIASES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["last name", "lastname", "last_name", "surname", "family name"].into()
});

pub static NAME_ALIASES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["name", "full name", "fullname", "contact name"].into());

pub static PHONE_ALIASES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "phone number",
        "phone",
        "mobile phone",
        "mobile",
        "tel",
        "telephone",
        "cell",
        "cell phone",
        "mobile number",
    ]
    .into()
});

pub static EMAIL_ALIASES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["email", "proxy email", "e-mail", "email address", "e mail"].into()
});

/// First header (in column order) whose lowercased, trimmed form is in
/// the alias set. Returns the header with its original spelling.
pub fn find_column_name<'a>(headers: &'a [String], aliases: &HashSet<&str>) -> Option<&'a str> {
    headers
        .iter()
        .find(|header| aliases.contains(header.trim().to_lowercase().as_str()))
        .map(|header| header.as_str())
}

/// Human labels for the required column groups a header set is missing.
/// Empty when the file can be transformed.
pub fn missing_required_columns(headers: &[String]) -> Vec<&'static str> {
    let has_first_name = find_column_name(headers, &FIRST_NAME_ALIASES).is_some();
    let has_full_name = find_column_name(headers, &NAME_ALIASES).is_some();
    let has_phone = find_column_name(headers, &PHONE_ALIASES).is_some();
    let has_email = find_column_name(headers, &EMAIL_ALIASES).is_some();

    let mut missing = Vec::new();
    if !has_first_name && !has_full_name {
        missing.push(r#""First Name" (or "Name")"#);
    }
    if !has_phone {
        missing.push(r#""Phone Number" (or "Phone", "Mobile Phone")"#);
    }
    if !has_email {
        missing.push(r#""Email" (or "Proxy Email", "E-mail")"#);
    }
    missing
}
