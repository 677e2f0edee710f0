//! Common utilities shared across remote sources.

use crate::error::{Result, SourceError};
use numinfo_core::{HttpConfig, SourceData, SourceId};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Build a blocking HTTP client from the shared HTTP settings.
///
/// Without `timeout_secs` the client's own default timeout applies.
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(http: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(http.user_agent.as_str());
    if let Some(secs) = http.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| SourceError::Client(format!("failed to create HTTP client: {e}")))
}

/// Send a prepared GET request and decode a 200 JSON response.
///
/// Any status other than 200 is an error. Network errors have their URL
/// stripped because API keys travel in the query string.
pub fn get_json(source_id: &SourceId, request: reqwest::blocking::RequestBuilder) -> Result<Value> {
    let response = request.send().map_err(|e| SourceError::Network {
        source_id: source_id.to_string(),
        source: e.without_url(),
    })?;

    read_json(source_id, response)
}

fn read_json(source_id: &SourceId, response: Response) -> Result<Value> {
    let status = response.status();
    if status != StatusCode::OK {
        let message = response
            .text()
            .ok()
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        return Err(SourceError::ApiError {
            source_id: source_id.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    response.json::<Value>().map_err(|e| SourceError::Decode {
        source_id: source_id.to_string(),
        message: format!("Failed to parse response: {}", e.without_url()),
    })
}

/// Copy the named fields out of a JSON object; missing fields become `null`.
pub fn pick_fields(source_id: &SourceId, body: &Value, fields: &[&str]) -> Result<SourceData> {
    let object = body.as_object().ok_or_else(|| SourceError::Decode {
        source_id: source_id.to_string(),
        message: "expected a JSON object".to_string(),
    })?;

    Ok(fields
        .iter()
        .map(|field| {
            let value = object.get(*field).cloned().unwrap_or(Value::Null);
            ((*field).to_string(), value)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_http_client() {
        let http = HttpConfig {
            timeout_secs: Some(5),
            ..HttpConfig::default()
        };
        assert!(build_http_client(&http).is_ok());
    }

    #[test]
    fn test_build_http_client_default() {
        assert!(build_http_client(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn test_pick_fields() {
        let id = SourceId::from_static("numverify");
        let body = json!({"carrier": "AT&T", "line_type": "mobile", "valid": true});

        let data = pick_fields(&id, &body, &["carrier", "line_type", "ported"]).expect("pick");
        assert_eq!(data.len(), 3);
        assert_eq!(data["carrier"], json!("AT&T"));
        assert_eq!(data["ported"], Value::Null);
        assert!(!data.contains_key("valid"));
    }

    #[test]
    fn test_pick_fields_requires_object() {
        let id = SourceId::from_static("numverify");
        let result = pick_fields(&id, &json!(["carrier"]), &["carrier"]);
        assert!(matches!(result, Err(SourceError::Decode { .. })));
    }
}
