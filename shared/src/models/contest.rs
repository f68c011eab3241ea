use crate::{Result, SharedError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use validator::Validate;

/// Shown in place of a start time when a record has none.
pub const START_TIME_PLACEHOLDER: &str = "N/A";

/// Lifecycle phase of a contest as stored in the `contests` collection.
///
/// Unknown strings are kept verbatim so a record can round-trip through the
/// API without losing information, even though the classifier ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContestPhase {
    /// Not yet started.
    Before,
    /// Running.
    Coding,
    /// Finished coding, waiting for verification.
    PendingSystemTest,
    /// Verification in progress.
    SystemTest,
    Finished,
    Unrecognized(String),
}

impl ContestPhase {
    pub fn parse(value: &str) -> Self {
        match value {
            "BEFORE" => ContestPhase::Before,
            "CODING" => ContestPhase::Coding,
            "PENDING_SYSTEM_TEST" => ContestPhase::PendingSystemTest,
            "SYSTEM_TEST" => ContestPhase::SystemTest,
            "FINISHED" => ContestPhase::Finished,
            other => ContestPhase::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContestPhase::Before => "BEFORE",
            ContestPhase::Coding => "CODING",
            ContestPhase::PendingSystemTest => "PENDING_SYSTEM_TEST",
            ContestPhase::SystemTest => "SYSTEM_TEST",
            ContestPhase::Finished => "FINISHED",
            ContestPhase::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ContestPhase::Unrecognized(_))
    }
}

impl From<String> for ContestPhase {
    fn from(value: String) -> Self {
        ContestPhase::parse(&value)
    }
}

impl From<ContestPhase> for String {
    fn from(phase: ContestPhase) -> Self {
        phase.as_str().to_string()
    }
}

impl fmt::Display for ContestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single programming contest as listed on the calendar page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContestRecord {
    /// Contest identifier (numeric ids from the store are kept as strings)
    #[validate(length(min = 1, message = "Contest id cannot be empty"))]
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Category label, e.g. "CF" or "ICPC"
    #[serde(rename = "type", default)]
    pub contest_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<ContestPhase>,

    /// Start time in seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time_seconds: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
}

impl ContestRecord {
    /// Coerces a raw store document into a record.
    ///
    /// Missing or malformed optional fields become empty/absent; only a
    /// non-object document or one without any usable id is rejected.
    pub fn from_document(document: &Value) -> Result<Self> {
        let fields = document.as_object().ok_or_else(|| {
            SharedError::Conversion(format!(
                "contest document must be an object, got {}",
                json_kind(document)
            ))
        })?;

        let id = fields
            .get("id")
            .and_then(coerce_id)
            .or_else(|| fields.get("_key").and_then(coerce_id))
            .ok_or_else(|| SharedError::MissingField("id".to_string()))?;

        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if name.is_empty() {
            log::debug!("Contest {} has no usable name", id);
        }

        let record = Self {
            id,
            name,
            contest_type: fields
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            phase: fields
                .get("phase")
                .and_then(Value::as_str)
                .map(ContestPhase::parse),
            start_time_seconds: fields.get("startTimeSeconds").and_then(coerce_seconds),
            duration_seconds: fields.get("durationSeconds").and_then(coerce_seconds),
        };

        record.validate()?;
        Ok(record)
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time_seconds
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => n
            .as_i64()
            .map(|v| v.to_string())
            .or_else(|| n.as_u64().map(|v| v.to_string()))
            .or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite() && v.fract() == 0.0)
                    .map(|v| (v as i64).to_string())
            }),
        _ => None,
    }
}

// A zero timestamp counts as missing. The check runs before truncation, so a
// fractional value such as 0.5 is present and becomes 0.
fn coerce_seconds(value: &Value) -> Option<i64> {
    let raw = match value {
        Value::Number(n) => n.as_i64().map(|v| v as f64).or_else(|| n.as_f64()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if !raw.is_finite() || raw == 0.0 {
        return None;
    }

    match value {
        Value::Number(n) => n.as_i64().or(Some(raw.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok().or(Some(raw.trunc() as i64)),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn create_test_record() -> ContestRecord {
        ContestRecord {
            id: "1900".to_string(),
            name: "Codeforces Round 912 (Div. 2)".to_string(),
            contest_type: "CF".to_string(),
            phase: Some(ContestPhase::Before),
            start_time_seconds: Some(1_717_000_000),
            duration_seconds: Some(7200),
        }
    }

    #[test_case("BEFORE", ContestPhase::Before)]
    #[test_case("CODING", ContestPhase::Coding)]
    #[test_case("PENDING_SYSTEM_TEST", ContestPhase::PendingSystemTest)]
    #[test_case("SYSTEM_TEST", ContestPhase::SystemTest)]
    #[test_case("FINISHED", ContestPhase::Finished)]
    fn test_phase_parse_known(raw: &str, expected: ContestPhase) {
        let phase = ContestPhase::parse(raw);
        assert_eq!(phase, expected);
        assert!(phase.is_recognized());
        assert_eq!(phase.as_str(), raw);
    }

    #[test]
    fn test_phase_parse_unknown_is_kept_verbatim() {
        let phase = ContestPhase::parse("before");
        assert_eq!(phase, ContestPhase::Unrecognized("before".to_string()));
        assert!(!phase.is_recognized());
        assert_eq!(phase.to_string(), "before");
    }

    #[test]
    fn test_record_serializes_with_store_field_names() {
        let record = create_test_record();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "1900");
        assert_eq!(value["type"], "CF");
        assert_eq!(value["phase"], "BEFORE");
        assert_eq!(value["startTimeSeconds"], 1_717_000_000);
        assert_eq!(value["durationSeconds"], 7200);
    }

    #[test]
    fn test_record_omits_absent_optionals() {
        let mut record = create_test_record();
        record.phase = None;
        record.start_time_seconds = None;
        record.duration_seconds = None;
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("phase").is_none());
        assert!(value.get("startTimeSeconds").is_none());
    }

    #[test]
    fn test_from_document_full() {
        let doc = json!({
            "_key": "ignored",
            "id": 1900,
            "name": "Codeforces Round 912 (Div. 2)",
            "type": "CF",
            "phase": "BEFORE",
            "startTimeSeconds": 1_717_000_000,
            "durationSeconds": 7200
        });
        let record = ContestRecord::from_document(&doc).unwrap();
        assert_eq!(record, create_test_record());
    }

    #[test]
    fn test_from_document_falls_back_to_key() {
        let doc = json!({ "_key": "abc123", "name": "Weekly" });
        let record = ContestRecord::from_document(&doc).unwrap();
        assert_eq!(record.id, "abc123");
        assert_eq!(record.phase, None);
        assert_eq!(record.contest_type, "");
    }

    #[test]
    fn test_from_document_without_id_is_rejected() {
        let doc = json!({ "name": "Nameless" });
        let err = ContestRecord::from_document(&doc).unwrap_err();
        assert_eq!(err, SharedError::MissingField("id".to_string()));
    }

    #[test]
    fn test_from_document_blank_id_falls_back_to_key() {
        let doc = json!({ "id": "   ", "_key": "k1" });
        let record = ContestRecord::from_document(&doc).unwrap();
        assert_eq!(record.id, "k1");
    }

    #[test_case(json!([1, 2]) ; "array")]
    #[test_case(json!("contest") ; "string")]
    #[test_case(json!(null) ; "null")]
    fn test_from_document_rejects_non_objects(doc: Value) {
        let err = ContestRecord::from_document(&doc).unwrap_err();
        assert!(matches!(err, SharedError::Conversion(_)));
    }

    #[test_case(json!(1_700_000_000), Some(1_700_000_000) ; "integer")]
    #[test_case(json!(1_700_000_000.9), Some(1_700_000_000) ; "float truncated")]
    #[test_case(json!("1700000000"), Some(1_700_000_000) ; "numeric string")]
    #[test_case(json!(0), None ; "zero is absent")]
    #[test_case(json!(0.0), None ; "float zero is absent")]
    #[test_case(json!("0"), None ; "string zero is absent")]
    #[test_case(json!(0.5), Some(0) ; "fraction below one is present")]
    #[test_case(json!("soon"), None ; "garbage string")]
    #[test_case(json!(true), None ; "boolean")]
    fn test_start_time_coercion(raw: Value, expected: Option<i64>) {
        let doc = json!({ "id": 1, "startTimeSeconds": raw });
        let record = ContestRecord::from_document(&doc).unwrap();
        assert_eq!(record.start_time_seconds, expected);
    }

    #[test]
    fn test_fractional_start_before_one_second_is_past() {
        let doc = json!({ "id": 1, "startTimeSeconds": 0.5 });
        let record = ContestRecord::from_document(&doc).unwrap();
        assert_eq!(
            crate::calendar::classify(&record, 1_700_000_000),
            Some(crate::calendar::Bucket::Past)
        );
    }

    #[test]
    fn test_non_string_phase_is_absent() {
        let doc = json!({ "id": 7, "phase": 3 });
        let record = ContestRecord::from_document(&doc).unwrap();
        assert_eq!(record.phase, None);
    }

    #[test]
    fn test_start_time_conversion() {
        let record = create_test_record();
        let start = record.start_time().unwrap();
        assert_eq!(start.timestamp(), 1_717_000_000);

        let mut missing = record;
        missing.start_time_seconds = None;
        assert!(missing.start_time().is_none());
    }

    #[test]
    fn test_validation_rejects_empty_id() {
        let mut record = create_test_record();
        record.id = String::new();
        let errors = record.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("id"));
    }
}
