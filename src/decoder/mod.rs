//! Scanned content decoding
//!
//! Any scanned text decodes to a [`DecodedResult`]:
//! - `product_trace` envelopes yield their code, name, timestamp and version
//! - everything else (other JSON, malformed JSON, legacy bare codes) is taken
//!   literally as a trimmed traceability code

use crate::models::envelope::{DecodedResult, ENVELOPE_TYPE};
use rayon::prelude::*;
use serde_json::{Map, Value};

/// Shortest content accepted by [`is_valid_qr_text`], in UTF-16 units
pub const MIN_CONTENT_LEN: usize = 3;
/// Longest content accepted by [`is_valid_qr_text`], in UTF-16 units
pub const MAX_CONTENT_LEN: usize = 1000;

/// Outcome of reading scanned text as JSON
#[derive(Debug)]
pub enum ParsedContent {
    /// JSON object tagged `"type": "product_trace"`
    Envelope(Map<String, Value>),
    /// Valid JSON of any other shape
    NotEnvelope,
    /// Not JSON at all
    Malformed(serde_json::Error),
}

impl ParsedContent {
    /// Classify `raw`
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map))
                if map.get("type").and_then(Value::as_str) == Some(ENVELOPE_TYPE) =>
            {
                ParsedContent::Envelope(map)
            }
            Ok(_) => ParsedContent::NotEnvelope,
            Err(err) => ParsedContent::Malformed(err),
        }
    }
}

/// Text of a scalar field; numbers and booleans use their JSON form
fn scalar_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// An envelope is always valid here; an empty code is left to validation.
fn from_envelope(map: &Map<String, Value>) -> DecodedResult {
    DecodedResult {
        is_valid: true,
        traceability_code: scalar_field(map, "code")
            .map(|code| code.trim().to_string())
            .unwrap_or_default(),
        product_name: scalar_field(map, "name").unwrap_or_default(),
        timestamp: scalar_field(map, "timestamp"),
        version: scalar_field(map, "version"),
    }
}

/// Decode scanned text; never fails
///
/// Text that is not a `product_trace` envelope becomes the code itself,
/// whole and trimmed. An envelope-shaped JSON of another type is not
/// inspected further.
pub fn decode_content(raw: &str) -> DecodedResult {
    match ParsedContent::parse(raw) {
        ParsedContent::Envelope(map) => from_envelope(&map),
        ParsedContent::NotEnvelope => {
            tracing::debug!(len = raw.len(), "scanned JSON is not an envelope, using bare code");
            DecodedResult::bare(raw)
        }
        ParsedContent::Malformed(err) => {
            tracing::debug!(len = raw.len(), error = %err, "scanned text is not JSON, using bare code");
            DecodedResult::bare(raw)
        }
    }
}

/// Check scanned text: length bounds, then a non-empty decoded code
pub fn is_valid_qr_text(raw: &str) -> bool {
    decode_valid(raw).is_some()
}

/// Decode `raw` once, keeping the result only when it passes [`is_valid_qr_text`]
pub fn decode_valid(raw: &str) -> Option<DecodedResult> {
    let len = raw.encode_utf16().count();
    if !(MIN_CONTENT_LEN..=MAX_CONTENT_LEN).contains(&len) {
        return None;
    }
    let decoded = decode_content(raw);
    (decoded.is_valid && !decoded.traceability_code.trim().is_empty()).then_some(decoded)
}

/// [`is_valid_qr_text`] over an arbitrary value; anything but a string is rejected
pub fn is_valid_qr_content(value: &Value) -> bool {
    match value {
        Value::String(raw) => is_valid_qr_text(raw),
        _ => false,
    }
}

/// Decode many scans in parallel, keeping input order
pub fn decode_batch<S>(scans: &[S]) -> Vec<DecodedResult>
where
    S: AsRef<str> + Sync,
{
    scans.par_iter().map(|s| decode_content(s.as_ref())).collect()
}

/// Validate many scans in parallel, keeping input order
pub fn validate_batch<S>(scans: &[S]) -> Vec<bool>
where
    S: AsRef<str> + Sync,
{
    scans.par_iter().map(|s| is_valid_qr_text(s.as_ref())).collect()
}
