//! Raw run validation
//!
//! Malformed records are an expected part of the feed. Validation therefore
//! returns a [`SkipReason`] instead of an error, so callers can count and
//! log skips without aborting a page.

use serde_json::Value;
use tracing::warn;

/// Top-level keys every usable run carries
pub const REQUIRED_FIELDS: [&str; 7] = [
    "id", "category", "date", "times", "players", "status", "system",
];

/// Why a raw record was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The record is not a JSON object
    NotAnObject,
    /// One or more required top-level keys are absent
    MissingFields(Vec<&'static str>),
    /// `times.primary_t` is absent, null, zero or otherwise falsy
    MissingPrimaryTime,
    /// A field is present but has the wrong shape
    Malformed { field: &'static str },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "record is not an object"),
            SkipReason::MissingFields(fields) => {
                write!(f, "missing fields: {}", fields.join(", "))
            },
            SkipReason::MissingPrimaryTime => write!(f, "missing primary time"),
            SkipReason::Malformed { field } => write!(f, "malformed field '{}'", field),
        }
    }
}

/// Check that `run` has every required key and a usable primary time
///
/// Returns the record unchanged when valid.
pub fn validate_run(run: &Value) -> Result<&Value, SkipReason> {
    let result = check(run);
    if let Err(ref reason) = result {
        let run_id = run.get("id").and_then(Value::as_str).unwrap_or("?");
        warn!(run_id, %reason, "Discarding invalid run");
    }
    result.map(|_| run)
}

fn check(run: &Value) -> Result<(), SkipReason> {
    let object = run.as_object().ok_or(SkipReason::NotAnObject)?;

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Err(SkipReason::MissingFields(missing));
    }

    let primary = object
        .get("times")
        .and_then(Value::as_object)
        .and_then(|times| times.get("primary_t"));

    match primary {
        Some(value) if is_truthy(value) => Ok(()),
        _ => Err(SkipReason::MissingPrimaryTime),
    }
}

/// JSON truthiness: null, false, zero, empty strings and empty containers are false
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_run() -> Value {
        json!({
            "id": "y8dwozoj",
            "category": "wkpoo02r",
            "date": "2021-06-14",
            "times": {"primary_t": 5834.0},
            "players": [{"rel": "user", "id": "x7qz6qq8"}],
            "status": {"status": "verified"},
            "system": {"platform": "w89rwelk", "emulated": false}
        })
    }

    #[test]
    fn test_valid_run_is_returned_unchanged() {
        let run = valid_run();
        let validated = validate_run(&run).unwrap();
        assert_eq!(validated, &run);
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        for field in REQUIRED_FIELDS {
            let mut run = valid_run();
            run.as_object_mut().unwrap().remove(field);
            assert_eq!(
                validate_run(&run),
                Err(SkipReason::MissingFields(vec![field])),
                "field {}",
                field
            );
        }
    }

    #[test]
    fn test_reports_all_missing_fields() {
        let run = json!({"id": "x", "date": "2020-01-01"});
        assert_eq!(
            validate_run(&run),
            Err(SkipReason::MissingFields(vec![
                "category", "times", "players", "status", "system"
            ]))
        );
    }

    #[test]
    fn test_falsy_primary_time_is_rejected() {
        for primary in [json!(null), json!(0), json!(0.0), json!(""), json!(false)] {
            let mut run = valid_run();
            run["times"]["primary_t"] = primary;
            assert_eq!(validate_run(&run), Err(SkipReason::MissingPrimaryTime));
        }

        let mut run = valid_run();
        run["times"] = json!({});
        assert_eq!(validate_run(&run), Err(SkipReason::MissingPrimaryTime));

        run["times"] = json!("fast");
        assert_eq!(validate_run(&run), Err(SkipReason::MissingPrimaryTime));
    }

    #[test]
    fn test_non_object_record() {
        assert_eq!(validate_run(&json!([1, 2])), Err(SkipReason::NotAnObject));
        assert_eq!(validate_run(&json!(null)), Err(SkipReason::NotAnObject));
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::MissingFields(vec!["times", "system"]);
        assert_eq!(reason.to_string(), "missing fields: times, system");
        assert_eq!(
            SkipReason::Malformed { field: "date" }.to_string(),
            "malformed field 'date'"
        );
    }
}
