//! API response types
//!
//! Run records are kept as raw JSON: the source guarantees nothing about
//! their shape, and the validator decides what is usable.

use serde::{Deserialize, Serialize};

/// Standard `{ "data": ... }` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// A leaderboard category of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// `per-game` or `per-level`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// One page of runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunPage {
    /// Raw run records, unvalidated
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_envelope() {
        let json = r#"{"data":[{"id":"wkpoo02r","name":"120 Star","type":"per-game","weblink":"x"}]}"#;
        let parsed: DataEnvelope<Vec<Category>> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].name, "120 Star");
        assert_eq!(parsed.data[0].kind.as_deref(), Some("per-game"));
    }

    #[test]
    fn test_run_page_tolerates_missing_fields() {
        let page: RunPage = serde_json::from_str("{}").unwrap();
        assert!(page.data.is_empty());

        let page: RunPage = serde_json::from_str(
            r#"{"data":[{"id":"r1"},42],"pagination":{"offset":0,"max":200,"size":2,"links":[]}}"#,
        )
        .unwrap();
        assert_eq!(page.data.len(), 2);
    }
}
