//! Wire types exchanged with the `/generate` endpoint.

use serde::{Deserialize, Serialize};

/// One word in each language. Field names are fixed by the service (`L1`, `L2`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
}

impl WordPair {
    pub fn new(l1: impl Into<String>, l2: impl Into<String>) -> Self {
        Self { l1: l1.into(), l2: l2.into() }
    }
}

/// Successful response body: `{ "pairs": [ {L1, L2}, ... ] }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairList {
    pub pairs: Vec<WordPair>,
}

/// Requested pair count. The form field is free text, so a value that is not
/// an unsigned integer is forwarded verbatim and left to the service to reject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PairCount {
    Number(u32),
    Raw(String),
}

impl PairCount {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(n) => PairCount::Number(n),
            Err(_) => PairCount::Raw(raw.to_string()),
        }
    }
}

impl std::fmt::Display for PairCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairCount::Number(n) => write!(f, "{n}"),
            PairCount::Raw(s) => f.write_str(s),
        }
    }
}

/// Request body for `/generate`. No client-side validation is done here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRequest {
    #[serde(rename = "L1_language")]
    pub l1_language: String,
    #[serde(rename = "L2_language")]
    pub l2_language: String,
    pub n: PairCount,
    pub reading_level: String,
}

impl PairRequest {
    pub fn new(
        l1_language: impl Into<String>,
        l2_language: impl Into<String>,
        n: &str,
        reading_level: impl Into<String>,
    ) -> Self {
        Self {
            l1_language: l1_language.into(),
            l2_language: l2_language.into(),
            n: PairCount::parse(n),
            reading_level: reading_level.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_service_field_names() {
        let req = PairRequest::new("English", "Spanish", "3", "beginner");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "L1_language": "English",
                "L2_language": "Spanish",
                "n": 3,
                "reading_level": "beginner"
            })
        );
    }

    #[test]
    fn test_non_numeric_count_is_forwarded_as_string() {
        let req = PairRequest::new("English", "Spanish", "lots", "beginner");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["n"], serde_json::json!("lots"));
    }

    #[test]
    fn test_response_parses_pairs() {
        let body = r#"{"pairs":[{"L1":"cat","L2":"gato"},{"L1":"dog","L2":"perro"}]}"#;
        let list: PairList = serde_json::from_str(body).unwrap();
        assert_eq!(list.pairs, vec![WordPair::new("cat", "gato"), WordPair::new("dog", "perro")]);
    }

    #[test]
    fn test_response_without_pairs_is_rejected() {
        assert!(serde_json::from_str::<PairList>(r#"{"error":"bad level"}"#).is_err());
    }
}
