use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Type tag identifying a traceability envelope among arbitrary QR content
pub const ENVELOPE_TYPE: &str = "product_trace";

/// Current envelope schema version
pub const ENVELOPE_VERSION: &str = "1.0";

/// Structured payload embedded in a product traceability QR code
///
/// Serializes to a JSON object with keys in the order
/// `type, code, name, timestamp, version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Always [`ENVELOPE_TYPE`] for envelopes built by this crate
    #[serde(rename = "type")]
    pub kind: String,
    /// Traceability code
    pub code: String,
    /// Product display name, empty when unknown
    pub name: String,
    /// ISO-8601 UTC creation time
    pub timestamp: String,
    /// Schema version
    pub version: String,
}

impl Envelope {
    /// Build an envelope stamped with the given instant
    pub fn new(code: &str, info: Option<&ProductInfo>, at: DateTime<Utc>) -> Self {
        Self {
            kind: ENVELOPE_TYPE.to_string(),
            code: code.to_string(),
            name: info.map(ProductInfo::display_name).unwrap_or_default().to_string(),
            timestamp: format_timestamp(at),
            version: ENVELOPE_VERSION.to_string(),
        }
    }

    /// Serialize to the compact JSON text placed inside the QR symbol
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Product metadata accepted when building an envelope
///
/// Unknown keys are ignored so callers can pass a wider product record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Product display name
    #[serde(default)]
    pub name: Option<String>,
}

impl ProductInfo {
    /// Product info carrying only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Name to embed, empty when absent
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Normalized result of interpreting scanned QR text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedResult {
    /// Whether a usable traceability code was extracted
    pub is_valid: bool,
    /// Traceability code, trimmed
    pub traceability_code: String,
    /// Product name, empty when unknown
    pub product_name: String,
    /// Creation time, only for structured envelopes
    pub timestamp: Option<String>,
    /// Schema version, only for structured envelopes
    pub version: Option<String>,
}

impl DecodedResult {
    /// Result for text that is taken literally as a code
    pub fn bare(raw: &str) -> Self {
        Self {
            is_valid: true,
            traceability_code: raw.trim().to_string(),
            product_name: String::new(),
            timestamp: None,
            version: None,
        }
    }

    /// True when timestamp or version came from a structured envelope
    pub fn is_structured(&self) -> bool {
        self.timestamp.is_some() || self.version.is_some()
    }
}

/// Format an instant the way envelopes carry it: `2026-10-18T08:30:00.000Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_envelope_fields() {
        let info = ProductInfo::named("Green Tea");
        let envelope = Envelope::new("TR-2026-0001", Some(&info), fixed_instant());
        assert_eq!(envelope.kind, "product_trace");
        assert_eq!(envelope.code, "TR-2026-0001");
        assert_eq!(envelope.name, "Green Tea");
        assert_eq!(envelope.timestamp, "2026-10-18T08:30:00.000Z");
        assert_eq!(envelope.version, "1.0");
    }

    #[test]
    fn test_envelope_without_info_has_empty_name() {
        let envelope = Envelope::new("TR-1", None, fixed_instant());
        assert_eq!(envelope.name, "");

        let unnamed = ProductInfo::default();
        let envelope = Envelope::new("TR-1", Some(&unnamed), fixed_instant());
        assert_eq!(envelope.name, "");
    }

    #[test]
    fn test_envelope_json_key_order() {
        let envelope = Envelope::new("C1", Some(&ProductInfo::named("Rice")), fixed_instant());
        assert_eq!(
            envelope.to_json().unwrap(),
            r#"{"type":"product_trace","code":"C1","name":"Rice","timestamp":"2026-10-18T08:30:00.000Z","version":"1.0"}"#
        );
    }

    #[test]
    fn test_product_info_ignores_unknown_keys() {
        let info: ProductInfo =
            serde_json::from_str(r#"{"name":"Honey","batch":"B-7","weight":500}"#).unwrap();
        assert_eq!(info.display_name(), "Honey");
    }

    #[test]
    fn test_decoded_result_serializes_camel_case_with_nulls() {
        let json = serde_json::to_string(&DecodedResult::bare("  plain-code-123 ")).unwrap();
        assert_eq!(
            json,
            r#"{"isValid":true,"traceabilityCode":"plain-code-123","productName":"","timestamp":null,"version":null}"#
        );
    }
}
