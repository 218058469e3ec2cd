//! Turns a free-form completion into a validated [`AnalysisResult`].
//!
//! The object is located with a bracket heuristic: everything from the first `{` to the last `}`.
//! A stray `}` after the real object (for instance inside trailing prose) widens the span and the
//! parse fails; that is reported as [`ExtractionError::Parse`], never coerced.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{AnalysisResult, Verdict};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no JSON object found in AI response")]
    NoJsonObject { raw: String },
    #[error("AI response contained invalid JSON: {message}")]
    Parse { message: String, raw: String },
    #[error("AI response failed validation on field(s): {}", .fields.join(", "))]
    Schema { fields: Vec<String>, raw: String },
}

impl ExtractionError {
    /// The provider text exactly as received.
    pub fn raw(&self) -> &str {
        match self {
            ExtractionError::NoJsonObject { raw }
            | ExtractionError::Parse { raw, .. }
            | ExtractionError::Schema { raw, .. } => raw,
        }
    }
}

/// Substring from the first `{` to the last `}`, inclusive.
pub fn locate_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

pub fn extract_analysis(text: &str) -> Result<AnalysisResult, ExtractionError> {
    let span = locate_json_object(text).ok_or_else(|| ExtractionError::NoJsonObject {
        raw: text.to_string(),
    })?;

    let value: Value = serde_json::from_str(span).map_err(|e| ExtractionError::Parse {
        message: e.to_string(),
        raw: text.to_string(),
    })?;

    validate(&value).map_err(|fields| ExtractionError::Schema {
        fields,
        raw: text.to_string(),
    })
}

/// Checks the parsed value against the result shape, collecting every offending field name.
fn validate(value: &Value) -> Result<AnalysisResult, Vec<String>> {
    let Some(obj) = value.as_object() else {
        return Err(vec!["<root>".to_string()]);
    };

    let mut bad = Vec::new();

    let product_name = required_text(obj, "product_name", &mut bad);
    let inferred_intent = required_text(obj, "inferred_intent", &mut bad);

    let verdict = obj
        .get("verdict")
        .and_then(Value::as_str)
        .and_then(Verdict::from_label);
    if verdict.is_none() {
        bad.push("verdict".to_string());
    }

    let reasoning = required_text(obj, "reasoning", &mut bad);

    let key_insights = obj.get("key_insights").and_then(Value::as_array).and_then(|items| {
        items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
    });
    if key_insights.is_none() {
        bad.push("key_insights".to_string());
    }

    match (product_name, inferred_intent, verdict, reasoning, key_insights) {
        (Some(product_name), Some(inferred_intent), Some(verdict), Some(reasoning), Some(key_insights)) => {
            if key_insights.is_empty() {
                log::warn!("⚠️ AI response for '{}' has no key insights", product_name);
            }
            Ok(AnalysisResult {
                product_name,
                inferred_intent,
                verdict,
                reasoning,
                key_insights,
            })
        }
        _ => Err(bad),
    }
}

fn required_text(obj: &Map<String, Value>, field: &str, bad: &mut Vec<String>) -> Option<String> {
    match obj.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        _ => {
            bad.push(field.to_string());
            None
        }
    }
}
