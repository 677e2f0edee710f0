//! `AbstractAPI` phone validation, used for geolocation.

use super::common::{build_http_client, get_json, pick_fields};
use crate::error::{Result, SourceError};
use crate::source::DataSource;
use numinfo_core::{HttpConfig, PhoneNumberRecord, SectionKind, SourceData, SourceId};
use reqwest::blocking::Client;
use serde_json::Value;

const FIELDS: &[&str] = &["country", "country_code", "location"];

/// `AbstractAPI` source, enabled by an API key.
pub struct AbstractApiSource {
    id: SourceId,
    api_key: String,
    endpoint: String,
    client: Client,
}

impl AbstractApiSource {
    /// Create a source for the given endpoint and key.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        http: &HttpConfig,
    ) -> Result<Self> {
        Ok(Self {
            id: SourceId::from_static("abstractapi"),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            client: build_http_client(http)?,
        })
    }
}

impl DataSource for AbstractApiSource {
    fn source_id(&self) -> &SourceId {
        &self.id
    }

    fn section(&self) -> SectionKind {
        SectionKind::Geolocation
    }

    fn is_remote(&self) -> bool {
        true
    }

    fn fetch(&self, record: &PhoneNumberRecord) -> Result<SourceData> {
        let request = self.client.get(&self.endpoint).query(&[
            ("api_key", self.api_key.as_str()),
            ("phone", record.formatted_e164()),
        ]);
        let body = get_json(&self.id, request)?;

        if let Some(message) = body.pointer("/error/message").and_then(Value::as_str) {
            return Err(SourceError::Rejected {
                source_id: self.id.to_string(),
                message: message.to_string(),
            });
        }

        pick_fields(&self.id, &body, FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_creation() {
        let source = AbstractApiSource::new(
            "test-key",
            "https://phonevalidation.abstractapi.com/v1/",
            &HttpConfig::default(),
        )
        .expect("create source");
        assert_eq!(source.source_id().as_str(), "abstractapi");
        assert_eq!(source.section(), SectionKind::Geolocation);
        assert!(source.is_remote());
    }
}
