//! Shared types for the enrichment pipeline.
//!
//! A [`PhoneNumberRecord`] is produced once by the parser and never changes.
//! Each enrichment step contributes one [`Section`] of the
//! [`EnrichmentResult`], keyed by the [`SourceId`] that produced the data.

use crate::error::NumInfoError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Field name to value mapping produced by a single source.
pub type SourceData = BTreeMap<String, Value>;

/// Source name to source data mapping for one section of the result.
pub type Section = BTreeMap<String, SourceData>;

/// Newtype for data source identifiers with validation.
///
/// Source IDs are the keys of every section in the report, so they must be
/// lowercase snake case, 2-48 characters, starting with a letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(String);

impl SourceId {
    /// Create a new `SourceId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, NumInfoError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Create a `SourceId` from a compile-time constant.
    ///
    /// Built-in sources use this; the format is checked in debug builds.
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        debug_assert!(Self::validate(id).is_ok(), "invalid built-in source id: {id}");
        Self(id.to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), NumInfoError> {
        static SOURCE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex =
            SOURCE_REGEX.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]{1,47}$").expect("valid regex"));

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(NumInfoError::Validation(format!(
                "invalid source ID: must be lowercase snake case, 2-48 characters, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five sections of an enrichment result, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Parse output: formatted number, codes, validity
    BasicInfo,
    /// Carrier and line type
    CarrierInfo,
    /// Coarse region of the number
    Geolocation,
    /// IANA time zones for the number
    TimezoneInfo,
    /// Extension point for reputation and other data
    AdditionalData,
}

impl SectionKind {
    /// All sections in the order they are produced and reported.
    pub const ALL: [SectionKind; 5] = [
        Self::BasicInfo,
        Self::CarrierInfo,
        Self::Geolocation,
        Self::TimezoneInfo,
        Self::AdditionalData,
    ];

    /// Key used for this section in the JSON report.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::BasicInfo => "basic_info",
            Self::CarrierInfo => "carrier_info",
            Self::Geolocation => "geolocation",
            Self::TimezoneInfo => "timezone_info",
            Self::AdditionalData => "additional_data",
        }
    }

    /// Heading used for this section in the text report.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::CarrierInfo => "Carrier Information",
            Self::Geolocation => "Geolocation Information",
            Self::TimezoneInfo => "Timezone Information",
            Self::AdditionalData => "Additional Data",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A parsed phone number.
///
/// Created once at parse time and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumberRecord {
    raw_input: String,
    formatted_e164: String,
    country_code: u16,
    national_number: u64,
    is_valid: bool,
    region: Option<String>,
}

impl PhoneNumberRecord {
    /// Keys of [`basic_info`](Self::basic_info), in the order they are reported.
    pub const BASIC_INFO_FIELDS: [&'static str; 5] = [
        "raw_input",
        "formatted_e164",
        "country_code",
        "national_number",
        "is_valid",
    ];

    /// Create a record from parser output.
    #[must_use]
    pub fn new(
        raw_input: impl Into<String>,
        formatted_e164: impl Into<String>,
        country_code: u16,
        national_number: u64,
        is_valid: bool,
        region: Option<String>,
    ) -> Self {
        Self {
            raw_input: raw_input.into(),
            formatted_e164: formatted_e164.into(),
            country_code,
            national_number,
            is_valid,
            region,
        }
    }

    /// The string the user supplied.
    #[must_use]
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// The number in E.164 format, e.g. `+14155552671`.
    #[must_use]
    pub fn formatted_e164(&self) -> &str {
        &self.formatted_e164
    }

    /// E.164 digits without the leading `+`, used for prefix lookups.
    #[must_use]
    pub fn e164_digits(&self) -> &str {
        self.formatted_e164.trim_start_matches('+')
    }

    /// Country calling code, e.g. `1` or `44`.
    #[must_use]
    pub fn country_code(&self) -> u16 {
        self.country_code
    }

    /// National significant number.
    #[must_use]
    pub fn national_number(&self) -> u64 {
        self.national_number
    }

    /// Whether the number matches a known pattern for its region.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// ISO 3166-1 alpha-2 region inferred from the number, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Fields reported in the `basic_info` section.
    #[must_use]
    pub fn basic_info(&self) -> SourceData {
        let mut data = SourceData::new();
        data.insert("raw_input".to_string(), Value::from(self.raw_input.as_str()));
        data.insert(
            "formatted_e164".to_string(),
            Value::from(self.formatted_e164.as_str()),
        );
        data.insert("country_code".to_string(), Value::from(self.country_code));
        data.insert(
            "national_number".to_string(),
            Value::from(self.national_number),
        );
        data.insert("is_valid".to_string(), Value::from(self.is_valid));
        data
    }
}

/// Aggregated result of one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrichmentResult {
    /// Parse output
    pub basic_info: Section,
    /// Carrier lookups
    pub carrier_info: Section,
    /// Region lookups
    pub geolocation: Section,
    /// Time zone lookups
    pub timezone_info: Section,
    /// Placeholder reputation data
    pub additional_data: Section,
}

impl EnrichmentResult {
    /// Borrow a section by kind.
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> &Section {
        match kind {
            SectionKind::BasicInfo => &self.basic_info,
            SectionKind::CarrierInfo => &self.carrier_info,
            SectionKind::Geolocation => &self.geolocation,
            SectionKind::TimezoneInfo => &self.timezone_info,
            SectionKind::AdditionalData => &self.additional_data,
        }
    }

    /// Replace a section with the output of its enrichment step.
    pub fn set_section(&mut self, kind: SectionKind, section: Section) {
        let slot = match kind {
            SectionKind::BasicInfo => &mut self.basic_info,
            SectionKind::CarrierInfo => &mut self.carrier_info,
            SectionKind::Geolocation => &mut self.geolocation,
            SectionKind::TimezoneInfo => &mut self.timezone_info,
            SectionKind::AdditionalData => &mut self.additional_data,
        };
        *slot = section;
    }

    /// Validity flag as recorded in `basic_info`.
    ///
    /// Returns false when no parse output was recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.basic_info
            .values()
            .filter_map(|data| data.get("is_valid"))
            .any(|value| value.as_bool() == Some(true))
    }

    /// Whether every section after `basic_info` is empty.
    #[must_use]
    pub fn is_unenriched(&self) -> bool {
        SectionKind::ALL
            .iter()
            .filter(|kind| **kind != SectionKind::BasicInfo)
            .all(|kind| self.section(*kind).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(is_valid: bool) -> PhoneNumberRecord {
        PhoneNumberRecord::new(
            "+1 415 555 2671",
            "+14155552671",
            1,
            4_155_552_671,
            is_valid,
            Some("US".to_string()),
        )
    }

    #[test]
    fn test_source_id_valid() {
        let id = SourceId::new("local_library").expect("valid id");
        assert_eq!(id.as_str(), "local_library");
        assert_eq!(id.to_string(), "local_library");
        assert!(SourceId::new("numverify").is_ok());
        assert!(SourceId::new("remote_api_2").is_ok());
    }

    #[test]
    fn test_source_id_invalid() {
        assert!(SourceId::new("").is_err());
        assert!(SourceId::new("a").is_err());
        assert!(SourceId::new("Local").is_err());
        assert!(SourceId::new("abstract-api").is_err());
        assert!(SourceId::new("9lives").is_err());
        assert!(SourceId::new("a".repeat(49)).is_err());
    }

    #[test]
    fn test_section_kind_keys() {
        let keys: Vec<&str> = SectionKind::ALL.iter().map(SectionKind::key).collect();
        assert_eq!(
            keys,
            vec![
                "basic_info",
                "carrier_info",
                "geolocation",
                "timezone_info",
                "additional_data"
            ]
        );

        let json = serde_json::to_string(&SectionKind::TimezoneInfo).expect("serialize kind");
        assert_eq!(json, "\"timezone_info\"");
    }

    #[test]
    fn test_record_accessors() {
        let record = sample_record(true);
        assert_eq!(record.raw_input(), "+1 415 555 2671");
        assert_eq!(record.e164_digits(), "14155552671");
        assert_eq!(record.country_code(), 1);
        assert_eq!(record.national_number(), 4_155_552_671);
        assert_eq!(record.region(), Some("US"));
    }

    #[test]
    fn test_basic_info_fields() {
        let info = sample_record(true).basic_info();
        let keys: Vec<&str> = info.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "country_code",
                "formatted_e164",
                "is_valid",
                "national_number",
                "raw_input"
            ]
        );
        let mut expected = PhoneNumberRecord::BASIC_INFO_FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(info["country_code"], Value::from(1));
        assert_eq!(info["is_valid"], Value::Bool(true));
    }

    #[test]
    fn test_result_serializes_five_sections() {
        let mut result = EnrichmentResult::default();
        let mut basic = Section::new();
        basic.insert("local_library".to_string(), sample_record(false).basic_info());
        result.set_section(SectionKind::BasicInfo, basic);

        let json = serde_json::to_value(&result).expect("serialize result");
        let object = json.as_object().expect("top-level object");
        assert_eq!(object.len(), 5);
        for kind in SectionKind::ALL {
            assert!(object.contains_key(kind.key()), "missing {kind}");
        }

        assert!(!result.is_valid());
        assert!(result.is_unenriched());
    }

    #[test]
    fn test_result_validity_from_basic_info() {
        let mut result = EnrichmentResult::default();
        assert!(!result.is_valid());

        let mut basic = Section::new();
        basic.insert("local_library".to_string(), sample_record(true).basic_info());
        result.set_section(SectionKind::BasicInfo, basic);
        assert!(result.is_valid());
    }

    #[test]
    fn test_result_rejects_unknown_sections() {
        let json = r#"{
            "basic_info": {}, "carrier_info": {}, "geolocation": {},
            "timezone_info": {}, "additional_data": {}, "extra": {}
        }"#;
        assert!(serde_json::from_str::<EnrichmentResult>(json).is_err());
    }
}
