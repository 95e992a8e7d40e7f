//! Parse model output into rental terms

use crate::error::ExtractorError;
use crate::prompt::{OUTPUT_TAG, SCRATCHPAD_TAG};
use crate::tag::extract_tag;
use leasehold_domain::{RentalTerms, TermField};
use serde_json::{Map, Value};

/// A model response split into reasoning and extracted terms
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// Content of the `<scratchpad>` section (may be empty)
    pub reasoning: String,
    /// The ten extracted fields
    pub terms: RentalTerms,
}

/// Parse a raw model response
///
/// The `<output>` section must be a JSON object carrying all ten fields. A
/// missing section yields the empty string, which fails JSON parsing.
pub fn parse_model_response(response: &str) -> Result<ParsedResponse, ExtractorError> {
    let reasoning = extract_tag(response, SCRATCHPAD_TAG);
    let output = extract_tag(response, OUTPUT_TAG);

    let json: Value = serde_json::from_str(output)?;
    let object = json.as_object().ok_or_else(|| {
        ExtractorError::InvalidFormat(format!(
            "Expected JSON object in <{}>, found {}",
            OUTPUT_TAG,
            value_kind(&json)
        ))
    })?;

    Ok(ParsedResponse {
        reasoning: reasoning.to_string(),
        terms: parse_terms(object)?,
    })
}

fn parse_terms(object: &Map<String, Value>) -> Result<RentalTerms, ExtractorError> {
    let mut terms = RentalTerms::default();
    let mut missing = Vec::new();

    for field in TermField::ALL {
        match object.get(field.json_key()) {
            Some(Value::String(s)) => terms.set(field, s.clone()),
            None | Some(Value::Null) => missing.push(field.json_key().to_string()),
            // Numbers and nested values are kept as compact JSON
            Some(other) => terms.set(field, other.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(ExtractorError::MissingFields(missing));
    }
    Ok(terms)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
