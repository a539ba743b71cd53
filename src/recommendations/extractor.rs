// ABOUTME: Recovers a structured recommendation from free-form completion text
// ABOUTME: Brace-depth scanning that respects JSON string literals, then shape validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Completion Extractor
//!
//! Models are told to answer with a bare JSON object but regularly wrap it in
//! prose or Markdown fences. The extractor walks every `{` in order, finds
//! its matching `}` by tracking nesting depth (ignoring braces inside string
//! literals), and takes the first balanced span that parses as a JSON object.
//! That object must then carry the required non-empty lists; there is no
//! partial recovery.

use nutriplan_core::errors::ExtractionError;
use nutriplan_core::models::RecommendationRecord;
use serde_json::{Map, Value};
use tracing::debug;

/// Extract a recommendation record from raw completion text
///
/// # Errors
///
/// - `ExtractionError::NoPayload` if no balanced span parses as a JSON object
/// - `ExtractionError::MissingField` / `EmptyList` / `InvalidField` if the
///   object lacks a required list, has an empty list, or has a non-list field
/// - `ExtractionError::Malformed` if list entries cannot be decoded as items
pub fn extract(raw_text: &str) -> Result<RecommendationRecord, ExtractionError> {
    let mut payload = find_payload(raw_text).ok_or(ExtractionError::NoPayload)?;
    check_shape(&payload)?;

    // An explicit null optional list decodes as empty
    for field in RecommendationRecord::OPTIONAL_FIELDS {
        if payload.get(field).is_some_and(Value::is_null) {
            payload.remove(field);
        }
    }
    Ok(serde_json::from_value(Value::Object(payload))?)
}

/// First brace-balanced span that decodes as a JSON object
fn find_payload(text: &str) -> Option<Map<String, Value>> {
    text.match_indices('{').find_map(|(start, _)| {
        let span = balanced_span(text, start)?;
        match serde_json::from_str::<Value>(span) {
            Ok(Value::Object(object)) => Some(object),
            Ok(_) => None,
            Err(e) => {
                debug!(offset = start, error = %e, "Skipping unparseable brace span");
                None
            }
        }
    })
}

/// Span from the `{` at `start` through its matching `}`
fn balanced_span(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn check_shape(payload: &Map<String, Value>) -> Result<(), ExtractionError> {
    for field in RecommendationRecord::REQUIRED_FIELDS {
        match payload.get(field) {
            None | Some(Value::Null) => return Err(ExtractionError::MissingField(field)),
            Some(value) => check_list(field, value)?,
        }
    }
    for field in RecommendationRecord::OPTIONAL_FIELDS {
        if let Some(value) = payload.get(field).filter(|value| !value.is_null()) {
            check_list(field, value)?;
        }
    }
    Ok(())
}

fn check_list(field: &'static str, value: &Value) -> Result<(), ExtractionError> {
    match value {
        Value::Array(items) if items.is_empty() => Err(ExtractionError::EmptyList(field)),
        Value::Array(_) => Ok(()),
        _ => Err(ExtractionError::InvalidField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_span_ignores_braces_in_strings() {
        let text = r#"x {"a": "}{", "b": {"c": "\"}"}} y"#;
        assert_eq!(
            balanced_span(text, 2),
            Some(r#"{"a": "}{", "b": {"c": "\"}"}}"#)
        );
    }

    #[test]
    fn test_unbalanced_text_has_no_span() {
        assert_eq!(balanced_span("{ never closed", 0), None);
    }

    #[test]
    fn test_span_offsets_are_byte_based() {
        let text = "Réponse: {\"k\": \"é\"}";
        let start = text.find('{').unwrap();
        assert_eq!(balanced_span(text, start), Some("{\"k\": \"é\"}"));
    }
}
