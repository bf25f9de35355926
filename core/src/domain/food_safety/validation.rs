use crate::domain::common::entities::app_errors::CoreError;

pub const MIN_QUERY_LENGTH: usize = 2;
pub const MAX_QUERY_LENGTH: usize = 100;

pub const INVALID_LENGTH_REASON: &str = "Query must be between 2 and 100 characters";
pub const INVALID_CHARACTERS_REASON: &str = "Query contains invalid characters";

/// Checks a raw query and returns it trimmed.
///
/// Length is counted in characters after trimming. Letters and digits are
/// ASCII only; whitespace, `-`, `.` and `,` are also allowed.
pub fn validate_query(raw: &str) -> Result<String, CoreError> {
    let query = raw.trim();
    let length = query.chars().count();

    if !(MIN_QUERY_LENGTH..=MAX_QUERY_LENGTH).contains(&length) {
        return Err(CoreError::Validation(INVALID_LENGTH_REASON.to_string()));
    }

    if !query.chars().all(is_allowed_char) {
        return Err(CoreError::Validation(INVALID_CHARACTERS_REASON.to_string()));
    }

    Ok(query.to_string())
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '.' | ',')
}

/// Cache key for a query: "Salmon" and "salmon " share an entry.
pub fn cache_key(query: &str) -> String {
    format!("food:{}", query.trim().to_lowercase())
}
