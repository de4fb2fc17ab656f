//! Wire types for the sentiment classification endpoint.

use serde::{Deserialize, Serialize};

/// Request body for the classify endpoint.
#[derive(Debug, Serialize)]
pub struct ClassifyRequest<'a> {
    /// Text to classify, already truncated by the caller.
    pub text: &'a str,
    /// Maximum number of characters the model should consider.
    pub max_length: usize,
}

/// Response body from the classify endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyResponse {
    /// Polarity label, `"POSITIVE"` or `"NEGATIVE"`.
    pub label: String,
    /// Model confidence in `[0, 1]`.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_classify_response() {
        let json = r#"{"label": "NEGATIVE", "score": 0.92}"#;
        let response: ClassifyResponse = serde_json::from_str(json).expect("should deserialise");
        assert_eq!(response.label, "NEGATIVE");
        assert_eq!(response.score, 0.92);
    }

    #[test]
    fn serialise_classify_request() {
        let request = ClassifyRequest {
            text: "lovely stay",
            max_length: 512,
        };
        let json = serde_json::to_value(&request).expect("should serialise");
        assert_eq!(json["text"], "lovely stay");
        assert_eq!(json["max_length"], 512);
    }
}
