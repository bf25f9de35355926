use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    common::entities::app_errors::CoreError, food_safety::entities::FoodSafetyRecord,
};

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z]*[ \t]*\r?\n?(.*?)```").expect("fenced block pattern is valid")
});

/// Parses a model completion into a [`FoodSafetyRecord`].
///
/// Candidates are tried in order: the whole text, the body of the first
/// fenced code block, then the outermost `{ ... }` slice. The first one that
/// deserializes and passes [`check_record`] wins.
pub fn parse_record(content: &str) -> Result<FoodSafetyRecord, CoreError> {
    let mut last_error = None;

    for candidate in candidates(content) {
        match serde_json::from_str::<FoodSafetyRecord>(candidate) {
            Ok(record) => return check_record(record),
            Err(e) => last_error = Some(e),
        }
    }

    Err(CoreError::ParseError(match last_error {
        Some(e) => format!("response is not in valid JSON format: {}", e),
        None => "response is empty".to_string(),
    }))
}

fn candidates(content: &str) -> Vec<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut candidates = vec![trimmed];

    if let Some(body) = FENCED_BLOCK
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
    {
        candidates.push(body.as_str().trim());
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}'))
        && start < end
    {
        candidates.push(&trimmed[start..=end]);
    }

    candidates
}

fn check_record(record: FoodSafetyRecord) -> Result<FoodSafetyRecord, CoreError> {
    if !record.confidence.is_finite() || !(0.0..=1.0).contains(&record.confidence) {
        return Err(CoreError::ParseError(format!(
            "confidence {} is outside 0.0..=1.0",
            record.confidence
        )));
    }

    Ok(record)
}
