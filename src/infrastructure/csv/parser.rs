// ============================================================
// CSV PARSER
// ============================================================
// Line-oriented CSV/TSV parsing for pasted or uploaded contact
// lists. Quoting follows RFC4180 except that embedded newlines
// inside quoted fields are not supported: input is split into
// lines first, so a quoted field never spans lines. That matches
// the files the console accepts and is a documented limitation.

use tracing::warn;

use crate::domain::record::Record;

/// Pick the delimiter from the header line: tab wins if present,
/// otherwise comma. Applied once per file.
pub fn detect_delimiter(first_line: &str) -> char {
    if first_line.contains('\t') {
        '\t'
    } else {
        ','
    }
}

/// Split a single line into fields, honouring double quotes.
///
/// Outside quotes the delimiter ends the field and the value is
/// trimmed; a `"` enters quoted mode. Inside quotes `""` emits one
/// literal quote, a lone `"` exits, and anything else (delimiter
/// included) is kept as-is.
pub fn parse_line(line: &str, delimiter: char) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == delimiter {
            result.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    result.push(current.trim().to_string());
    result
}

/// Parse CSV/TSV text into one record per data line, keyed by the
/// header row. Blank lines are skipped; fewer than two non-blank
/// lines yields an empty list. Rows are zipped against the header
/// positionally: missing trailing values become empty strings and
/// extra values are dropped.
pub fn parse_records(text: &str) -> Vec<Record> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let delimiter = detect_delimiter(lines[0]);
    let headers = parse_line(lines[0], delimiter);

    let mut rows = Vec::with_capacity(lines.len() - 1);
    let mut ragged_rows = 0usize;
    for line in &lines[1..] {
        let values = parse_line(line, delimiter);
        if values.len() != headers.len() {
            ragged_rows += 1;
        }
        let mut record = Record::new();
        for (index, header) in headers.iter().enumerate() {
            record.set(header.clone(), values.get(index).cloned().unwrap_or_default());
        }
        rows.push(record);
    }

    if ragged_rows > 0 {
        warn!(
            rows = ragged_rows,
            "rows did not match header width; zipped positionally"
        );
    }

    rows
}
