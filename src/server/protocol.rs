//! The request and response envelopes

use super::*;
use serde::Serialize;
use std::fmt;

pub const API_VERSION: &str = "1.0";
/// Requests without the versioned envelope are answered with this request_id
pub const LEGACY_REQUEST_ID: &str = "legacy";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Not JSON, or not a JSON object
    BadMessage(String),
    /// Well formed but unusable, such as a missing field
    BadRequest(String),
    UnknownAction(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::BadMessage(msg) => write!(f, "Invalid JSON: {}", msg),
            Self::BadRequest(msg) => write!(f, "{}", msg),
            Self::UnknownAction(action) => write!(f, "Unknown action '{}'", action),
        }
    }
}

impl Error for ApiError {}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub request_id: String,
    pub action: String,
    pub payload: Map<String, Value>,
    pub legacy: bool,
}

impl ApiRequest {
    /// Decodes one line from a client
    pub fn decode(line: &[u8]) -> Result<Self, ApiError> {
        let value: Value =
            serde_json::from_slice(line).map_err(|e| ApiError::BadMessage(e.to_string()))?;
        Self::from_value(value)
    }

    /// Accepts both {api_version, request_id, action, payload} and the legacy flat form where the action (or type)
    /// sits next to the other fields
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        let mut raw = match value {
            Value::Object(raw) => raw,
            _ => {
                return Err(ApiError::BadMessage(
                    "top-level JSON must be an object".to_string(),
                ))
            }
        };
        if raw.contains_key("api_version") && raw.contains_key("request_id") {
            let version = raw.get("api_version").and_then(Value::as_str);
            if version != Some(API_VERSION) {
                return Err(ApiError::BadRequest(format!(
                    "Unsupported api_version {}",
                    raw["api_version"]
                )));
            }
            let request_id = match &raw["request_id"] {
                Value::String(id) => id.clone(),
                other => other.to_string(),
            };
            let action = match raw.get("action").and_then(Value::as_str) {
                Some(action) if !action.is_empty() => action.to_string(),
                _ => return Err(ApiError::BadRequest("Missing or invalid 'action'".to_string())),
            };
            let payload = match raw.remove("payload") {
                None | Some(Value::Null) => Map::new(),
                Some(Value::Object(payload)) => payload,
                Some(_) => return Err(ApiError::BadRequest("'payload' must be an object".to_string())),
            };
            Ok(Self {
                request_id,
                action,
                payload,
                legacy: false,
            })
        } else {
            let action = match raw.remove("action") {
                Some(Value::String(action)) if !action.is_empty() => action,
                _ => match raw.remove("type") {
                    Some(Value::String(action)) if !action.is_empty() => action,
                    _ => {
                        return Err(ApiError::BadRequest(
                            "Legacy request missing 'action'".to_string(),
                        ))
                    }
                },
            };
            Ok(Self {
                request_id: LEGACY_REQUEST_ID.to_string(),
                action,
                payload: raw,
                legacy: true,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub api_version: &'static str,
    pub request_id: String,
    pub action: String,
    pub status: ResponseStatus,
    pub payload: Value,
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(request: &ApiRequest, payload: Value) -> Self {
        Self {
            api_version: API_VERSION,
            request_id: request.request_id.clone(),
            action: request.action.clone(),
            status: ResponseStatus::Ok,
            payload,
            error: None,
        }
    }

    /// With no request (it could not be decoded) the request_id and action are "unknown"
    pub fn error(request: Option<&ApiRequest>, payload: Value, error: String) -> Self {
        let (request_id, action) = match request {
            Some(request) => (request.request_id.clone(), request.action.clone()),
            None => ("unknown".to_string(), "unknown".to_string()),
        };
        Self {
            api_version: API_VERSION,
            request_id,
            action,
            status: ResponseStatus::Error,
            payload,
            error: Some(error),
        }
    }

    /// One line of JSON, newline included
    pub fn encode(&self) -> Result<Vec<u8>, Box<dyn Error>> {
        let mut data = serde_json::to_vec(self)?;
        data.push(b'\n');
        Ok(data)
    }
}
