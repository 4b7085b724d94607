//! Structured outputs and prompts for each chain step.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::llm::ResponseFormat;

pub(super) const EXTRACTION_PROMPT: &str = "You are a job recruiter tasked with hiring at your organization. \
Analyze if the text is a request related to a task performed by a job recruiter seeking to hire \
qualified candidates for an open position.";

pub(super) const RESPONSE_PROMPT: &str = "You are a professional job recruiter tasked with hiring at your \
organization. With the details provided, formulate a quality response to their request.";

pub(super) const CONFIRMATION_PROMPT: &str = "Generate a natural language response as a professional job \
recruiter. This response will be used by a human at your organization to send to qualified candidates. \
Part of your response should be fulfilling the task of the user, and part of your response should be \
addressed to the user at your organization who will use your response to send to candidates. Ask the \
user if they would like any modifications to this response to qualified candidates. Format the response \
as markdown.";

/// Model output that follows a fixed JSON schema.
pub trait StructuredOutput: DeserializeOwned {
    /// Schema name reported to the provider.
    const NAME: &'static str;

    /// Strict JSON schema for the output object.
    fn schema() -> serde_json::Value;

    /// Response format for an [`LlmRequest`](crate::llm::LlmRequest).
    fn response_format() -> ResponseFormat {
        ResponseFormat {
            name: Self::NAME,
            schema: Self::schema(),
        }
    }
}

/// First step: is this a recruiter request at all?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventExtraction {
    /// Raw description of the request.
    pub description: String,
    /// Whether the text describes a request relevant to a job recruiter.
    pub is_recruiter_request: bool,
    /// Confidence score between 0 and 1.
    pub confidence_score: f64,
}

impl StructuredOutput for EventExtraction {
    const NAME: &'static str = "event_extraction";

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "description": {
                    "type": "string",
                    "description": "Raw description of the request"
                },
                "is_recruiter_request": {
                    "type": "boolean",
                    "description": "Whether this text describes a request relevant to a job recruiter."
                },
                "confidence_score": {
                    "type": "number",
                    "description": "Confidence score between 0 and 1"
                }
            },
            "required": ["description", "is_recruiter_request", "confidence_score"],
            "additionalProperties": false
        })
    }
}

/// Second step: the role and the experience it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruiterResponse {
    /// Name of the role.
    pub name: String,
    /// Experience needed from a candidate to fill the position.
    pub description: String,
}

impl StructuredOutput for RecruiterResponse {
    const NAME: &'static str = "recruiter_response";

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the role"
                },
                "description": {
                    "type": "string",
                    "description": "Type of experience needed from candidate to fill an open position."
                }
            },
            "required": ["name", "description"],
            "additionalProperties": false
        })
    }
}

/// Third step: the message handed back to the recruiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfirmation {
    /// Natural language confirmation message, in markdown.
    pub confirmation_message: String,
}

impl StructuredOutput for EventConfirmation {
    const NAME: &'static str = "event_confirmation";

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "confirmation_message": {
                    "type": "string",
                    "description": "Natural language confirmation message"
                }
            },
            "required": ["confirmation_message"],
            "additionalProperties": false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_required_matches_properties(schema: &serde_json::Value) {
        let properties = schema["properties"].as_object().unwrap();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect();

        assert_eq!(properties.len(), required.len());
        for key in properties.keys() {
            assert!(required.contains(&key.as_str()), "{key} is not required");
        }
        assert_eq!(schema["additionalProperties"], false);
    }

    #[test]
    fn test_schemas_are_strict() {
        assert_required_matches_properties(&EventExtraction::schema());
        assert_required_matches_properties(&RecruiterResponse::schema());
        assert_required_matches_properties(&EventConfirmation::schema());
    }

    #[test]
    fn test_extraction_parses() {
        let parsed: EventExtraction = serde_json::from_str(
            r#"{"description":"Hire a data engineer","is_recruiter_request":true,"confidence_score":0.92}"#,
        )
        .unwrap();

        assert!(parsed.is_recruiter_request);
        assert!((parsed.confidence_score - 0.92).abs() < f64::EPSILON);
    }
}
