//! Response classification
//!
//! Maps an HTTP status plus a GraphQL envelope onto either the `data`
//! mapping or a typed error. Status codes are checked before the body.

use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::error::{OrionxError, Result};

/// The `data` object of a GraphQL envelope
pub type GraphQLData = Map<String, Value>;

/// One entry of the envelope's `errors` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQLError {
    pub message: String,
}

impl GraphQLError {
    fn from_value(value: &Value) -> Self {
        let message = match value.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Self { message }
    }
}

/// Shape of a parsed 200 response
#[derive(Debug, Clone, PartialEq)]
pub enum GraphQLResult {
    /// No errors reported
    Success(GraphQLData),
    /// Errors reported, but fewer than the number of top-level data fields
    PartialSuccess {
        data: GraphQLData,
        errors: Vec<GraphQLError>,
    },
    /// Errors reported and no usable data
    Failure(Vec<GraphQLError>),
}

impl GraphQLResult {
    /// Classify a parsed envelope
    pub fn from_envelope(envelope: &Value) -> Result<Self> {
        let object = envelope.as_object().ok_or_else(|| {
            OrionxError::api("Invalid JSON response: expected a JSON object")
        })?;

        let errors: Vec<GraphQLError> = match object.get("errors") {
            Some(Value::Array(items)) => items.iter().map(GraphQLError::from_value).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(Value::String(s)) if s.is_empty() => Vec::new(),
            Some(Value::Object(map)) if map.is_empty() => Vec::new(),
            Some(other) => vec![GraphQLError::from_value(other)],
        };

        let data = object.get("data").filter(|d| !d.is_null());

        if errors.is_empty() {
            return match data {
                None => Ok(GraphQLResult::Success(Map::new())),
                Some(Value::Object(map)) => Ok(GraphQLResult::Success(map.clone())),
                Some(_) => Err(OrionxError::api(
                    "Invalid JSON response: data is not an object",
                )),
            };
        }

        match data {
            Some(Value::Object(map)) if errors.len() < map.len() => {
                Ok(GraphQLResult::PartialSuccess {
                    data: map.clone(),
                    errors,
                })
            }
            _ => Ok(GraphQLResult::Failure(errors)),
        }
    }

    /// Collapse into the data mapping, suppressing partial errors
    pub fn into_data(self) -> Result<GraphQLData> {
        match self {
            GraphQLResult::Success(data) => Ok(data),
            GraphQLResult::PartialSuccess { data, errors } => {
                for err in &errors {
                    warn!("GraphQL error (partial data returned): {}", err.message);
                }
                Ok(data)
            }
            GraphQLResult::Failure(errors) => {
                let message = errors
                    .first()
                    .map(|e| e.message.as_str())
                    .unwrap_or_default();
                error!("GraphQL error: {}", message);
                Err(OrionxError::api(format!("GraphQL error: {}", message)))
            }
        }
    }
}

/// Classify a raw HTTP response into data or a typed error
pub fn classify(status: u16, body: impl AsRef<[u8]>) -> Result<GraphQLData> {
    let body = body.as_ref();
    match status {
        200 => classify_success_body(body),
        401 => {
            error!("Authentication failed");
            Err(OrionxError::Authentication(
                "Authentication failed: Invalid API credentials".to_string(),
            ))
        }
        429 => {
            error!("Rate limit exceeded");
            Err(OrionxError::RateLimit("Rate limit exceeded".to_string()))
        }
        500 => {
            error!("Internal server error");
            Err(OrionxError::http(500, "Internal server error"))
        }
        other => {
            error!("Unexpected response status: {}", other);
            Err(OrionxError::http(
                other,
                format!("HTTP {}: {}", other, String::from_utf8_lossy(body)),
            ))
        }
    }
}

fn classify_success_body(body: &[u8]) -> Result<GraphQLData> {
    if body.is_empty() {
        return Ok(Map::new());
    }

    let envelope: Value = serde_json::from_slice(body).map_err(|e| {
        error!("Failed to parse response JSON: {}", e);
        OrionxError::api(format!("Invalid JSON response: {}", e))
    })?;

    GraphQLResult::from_envelope(&envelope)?.into_data()
}
