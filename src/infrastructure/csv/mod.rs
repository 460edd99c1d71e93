// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Line-oriented parsing and header alias detection

mod columns;
mod parser;

pub use columns::{
    find_column_name, missing_required_columns, EMAIL_ALIASES, FIRST_NAME_ALIASES,
    LAST_NAME_ALIASES, NAME_ALIASES, PHONE_ALIASES,
};
pub use parser::{detect_delimiter, parse_line, parse_records};
