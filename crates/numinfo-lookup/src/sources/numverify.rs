//! `NumVerify` carrier and line type validation API.

use super::common::{build_http_client, get_json, pick_fields};
use crate::error::{Result, SourceError};
use crate::source::DataSource;
use numinfo_core::{HttpConfig, PhoneNumberRecord, SectionKind, SourceData, SourceId};
use reqwest::blocking::Client;
use serde_json::Value;

/// Fields copied from a successful response.
const FIELDS: &[&str] = &["carrier", "line_type", "ported"];

/// `NumVerify` source, enabled by an access key.
pub struct NumverifySource {
    id: SourceId,
    access_key: String,
    endpoint: String,
    client: Client,
}

impl NumverifySource {
    /// Create a source for the given endpoint and key.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        access_key: impl Into<String>,
        endpoint: impl Into<String>,
        http: &HttpConfig,
    ) -> Result<Self> {
        Ok(Self {
            id: SourceId::from_static("numverify"),
            access_key: access_key.into(),
            endpoint: endpoint.into(),
            client: build_http_client(http)?,
        })
    }
}

impl DataSource for NumverifySource {
    fn source_id(&self) -> &SourceId {
        &self.id
    }

    fn section(&self) -> SectionKind {
        SectionKind::CarrierInfo
    }

    fn is_remote(&self) -> bool {
        true
    }

    fn fetch(&self, record: &PhoneNumberRecord) -> Result<SourceData> {
        let request = self.client.get(&self.endpoint).query(&[
            ("access_key", self.access_key.as_str()),
            ("number", record.formatted_e164()),
        ]);
        let body = get_json(&self.id, request)?;

        // Errors such as a bad key come back as 200 with `success: false`
        if body.get("success") == Some(&Value::Bool(false)) {
            let message = body
                .pointer("/error/info")
                .or_else(|| body.pointer("/error/type"))
                .and_then(Value::as_str)
                .unwrap_or("unspecified error")
                .to_string();
            return Err(SourceError::Rejected {
                source_id: self.id.to_string(),
                message,
            });
        }

        pick_fields(&self.id, &body, FIELDS)
    }
}
