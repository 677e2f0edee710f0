//! Sources backed by the bundled metadata.
//!
//! All three report under [`LOCAL_LIBRARY`]; they never touch the network.

use crate::error::Result;
use crate::metadata::Metadata;
use crate::source::{DataSource, LOCAL_LIBRARY};
use numinfo_core::{PhoneNumberRecord, SectionKind, SourceData, SourceId};
use serde_json::Value;
use std::sync::Arc;

/// Locale used for carrier names and descriptions.
pub const DEFAULT_LOCALE: &str = "en";

/// Carrier name for the number's range.
pub struct LocalCarrierSource {
    id: SourceId,
    metadata: Arc<Metadata>,
}

impl LocalCarrierSource {
    /// Create a carrier source over the given metadata.
    #[must_use]
    pub fn new(metadata: Arc<Metadata>) -> Self {
        Self {
            id: SourceId::from_static(LOCAL_LIBRARY),
            metadata,
        }
    }
}

impl DataSource for LocalCarrierSource {
    fn source_id(&self) -> &SourceId {
        &self.id
    }

    fn section(&self) -> SectionKind {
        SectionKind::CarrierInfo
    }

    fn fetch(&self, record: &PhoneNumberRecord) -> Result<SourceData> {
        let carrier = self.metadata.carrier_name(record, DEFAULT_LOCALE);
        Ok(SourceData::from([("carrier".to_string(), Value::from(carrier))]))
    }
}

/// Area or country description for the number.
pub struct LocalGeocoderSource {
    id: SourceId,
    metadata: Arc<Metadata>,
}

impl LocalGeocoderSource {
    /// Create a geocoding source over the given metadata.
    #[must_use]
    pub fn new(metadata: Arc<Metadata>) -> Self {
        Self {
            id: SourceId::from_static(LOCAL_LIBRARY),
            metadata,
        }
    }
}

impl DataSource for LocalGeocoderSource {
    fn source_id(&self) -> &SourceId {
        &self.id
    }

    fn section(&self) -> SectionKind {
        SectionKind::Geolocation
    }

    fn fetch(&self, record: &PhoneNumberRecord) -> Result<SourceData> {
        let region = self.metadata.description(record, DEFAULT_LOCALE);
        Ok(SourceData::from([("region".to_string(), Value::from(region))]))
    }
}

/// IANA time zones for the number.
pub struct LocalTimezoneSource {
    id: SourceId,
    metadata: Arc<Metadata>,
}

impl LocalTimezoneSource {
    /// Create a time zone source over the given metadata.
    #[must_use]
    pub fn new(metadata: Arc<Metadata>) -> Self {
        Self {
            id: SourceId::from_static(LOCAL_LIBRARY),
            metadata,
        }
    }
}

impl DataSource for LocalTimezoneSource {
    fn source_id(&self) -> &SourceId {
        &self.id
    }

    fn section(&self) -> SectionKind {
        SectionKind::TimezoneInfo
    }

    fn fetch(&self, record: &PhoneNumberRecord) -> Result<SourceData> {
        let zones = self.metadata.time_zones(record);
        Ok(SourceData::from([("time_zones".to_string(), Value::from(zones))]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sf_record() -> PhoneNumberRecord {
        PhoneNumberRecord::new(
            "+14155552671",
            "+14155552671",
            1,
            4_155_552_671,
            true,
            Some("US".to_string()),
        )
    }

    #[test]
    fn test_local_sources_share_id() {
        let metadata = Metadata::bundled();
        let carrier = LocalCarrierSource::new(Arc::clone(&metadata));
        let geo = LocalGeocoderSource::new(Arc::clone(&metadata));
        let tz = LocalTimezoneSource::new(metadata);

        for source in [&carrier as &dyn DataSource, &geo, &tz] {
            assert_eq!(source.source_id().as_str(), LOCAL_LIBRARY);
            assert!(!source.is_remote());
        }
        assert_eq!(carrier.section(), SectionKind::CarrierInfo);
        assert_eq!(geo.section(), SectionKind::Geolocation);
        assert_eq!(tz.section(), SectionKind::TimezoneInfo);
    }

    #[test]
    fn test_bundled_lookups_for_san_francisco() {
        let metadata = Metadata::bundled();
        let record = sf_record();

        let carrier = LocalCarrierSource::new(Arc::clone(&metadata))
            .fetch(&record)
            .expect("carrier lookup");
        assert_eq!(carrier["carrier"], json!(""));

        let geo = LocalGeocoderSource::new(Arc::clone(&metadata))
            .fetch(&record)
            .expect("geocoder lookup");
        assert_eq!(geo["region"], json!("San Francisco, CA"));

        let tz = LocalTimezoneSource::new(metadata)
            .fetch(&record)
            .expect("timezone lookup");
        assert_eq!(tz["time_zones"], json!(["America/Los_Angeles"]));
    }

    #[test]
    fn test_bundled_carrier_for_german_mobile() {
        let record = PhoneNumberRecord::new(
            "+4915123456789",
            "+4915123456789",
            49,
            15_123_456_789,
            true,
            Some("DE".to_string()),
        );
        let data = LocalCarrierSource::new(Metadata::bundled())
            .fetch(&record)
            .expect("carrier lookup");
        assert_eq!(data["carrier"], json!("Telekom"));
    }
}
