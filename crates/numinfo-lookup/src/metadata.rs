//! Offline geocoding, carrier and time zone metadata.
//!
//! The data ships inside the binary as TOML (`data/metadata.toml`) and is
//! parsed once on first use. All lookups are keyed on E.164 digits and use
//! the longest matching prefix.

use crate::error::MetadataError;
use numinfo_core::PhoneNumberRecord;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Zone reported when nothing is known about the number.
pub const UNKNOWN_TIME_ZONE: &str = "Etc/Unknown";

const BUNDLED_TOML: &str = include_str!("../data/metadata.toml");

static BUNDLED: Lazy<Arc<Metadata>> = Lazy::new(|| {
    Arc::new(Metadata::from_toml(BUNDLED_TOML).expect("bundled metadata is checked in and valid"))
});

#[derive(Debug, Deserialize)]
struct MetadataFile {
    locale: String,
    #[serde(default)]
    regions: Vec<RegionEntry>,
    #[serde(default)]
    areas: Vec<AreaEntry>,
    #[serde(default)]
    carriers: Vec<CarrierEntry>,
}

#[derive(Debug, Deserialize)]
struct RegionEntry {
    code: String,
    name: String,
    time_zones: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AreaEntry {
    prefix: String,
    description: String,
    #[serde(default)]
    time_zones: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CarrierEntry {
    prefix: String,
    name: String,
}

/// Country-level data for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Display name in the metadata locale
    pub name: String,
    /// IANA zones observed in the region
    pub time_zones: Vec<String>,
}

#[derive(Debug, Clone)]
struct Area {
    description: String,
    time_zones: Vec<String>,
}

/// Prefix-keyed table with longest-match lookup.
#[derive(Debug)]
struct PrefixTable<T> {
    name: &'static str,
    entries: HashMap<String, T>,
    longest: usize,
}

impl<T> PrefixTable<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            longest: 0,
        }
    }

    fn insert(&mut self, prefix: String, value: T) -> Result<(), MetadataError> {
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MetadataError::InvalidPrefix {
                table: self.name,
                prefix,
            });
        }
        if self.entries.contains_key(&prefix) {
            return Err(MetadataError::DuplicatePrefix {
                table: self.name,
                prefix,
            });
        }

        self.longest = self.longest.max(prefix.len());
        self.entries.insert(prefix, value);
        Ok(())
    }

    fn longest_match_by<P>(&self, digits: &str, accept: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        let max = self.longest.min(digits.len());
        (1..=max)
            .rev()
            .filter_map(|len| digits.get(..len))
            .filter_map(|prefix| self.entries.get(prefix))
            .find(|&value| accept(value))
    }

    fn longest_match(&self, digits: &str) -> Option<&T> {
        self.longest_match_by(digits, |_| true)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Parsed lookup metadata.
#[derive(Debug)]
pub struct Metadata {
    locale: String,
    regions: HashMap<String, Region>,
    areas: PrefixTable<Area>,
    carriers: PrefixTable<String>,
}

impl Metadata {
    /// Shared instance built from the metadata compiled into the crate.
    #[must_use]
    pub fn bundled() -> Arc<Metadata> {
        Arc::clone(&BUNDLED)
    }

    /// Parse metadata from a TOML document.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed, a prefix is not all digits or
    /// repeated, or a region entry is invalid.
    pub fn from_toml(contents: &str) -> Result<Self, MetadataError> {
        let file: MetadataFile = toml::from_str(contents)?;

        let mut regions = HashMap::new();
        for entry in file.regions {
            if entry.code.len() != 2 || !entry.code.bytes().all(|b| b.is_ascii_uppercase()) {
                return Err(MetadataError::InvalidRegion {
                    code: entry.code,
                    reason: "expected an ISO 3166-1 alpha-2 code".to_string(),
                });
            }
            if entry.time_zones.is_empty() {
                return Err(MetadataError::InvalidRegion {
                    code: entry.code,
                    reason: "no time zones listed".to_string(),
                });
            }
            if regions.contains_key(&entry.code) {
                return Err(MetadataError::InvalidRegion {
                    code: entry.code,
                    reason: "listed more than once".to_string(),
                });
            }
            regions.insert(
                entry.code,
                Region {
                    name: entry.name,
                    time_zones: entry.time_zones,
                },
            );
        }

        let mut areas = PrefixTable::new("areas");
        for entry in file.areas {
            areas.insert(
                entry.prefix,
                Area {
                    description: entry.description,
                    time_zones: entry.time_zones,
                },
            )?;
        }

        let mut carriers = PrefixTable::new("carriers");
        for entry in file.carriers {
            carriers.insert(entry.prefix, entry.name)?;
        }

        tracing::debug!(
            locale = %file.locale,
            regions = regions.len(),
            areas = areas.len(),
            carriers = carriers.len(),
            "loaded lookup metadata"
        );

        Ok(Self {
            locale: file.locale,
            regions,
            areas,
            carriers,
        })
    }

    /// Locale of the names and descriptions in this metadata.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Country-level data for a region code.
    #[must_use]
    pub fn region(&self, code: &str) -> Option<&Region> {
        self.regions.get(code)
    }

    /// Carrier name for the number's range.
    ///
    /// Empty when the number is invalid, the range is unknown or the locale
    /// is not covered.
    #[must_use]
    pub fn carrier_name(&self, record: &PhoneNumberRecord, locale: &str) -> String {
        if !record.is_valid() || locale != self.locale {
            return String::new();
        }

        self.carriers
            .longest_match(record.e164_digits())
            .cloned()
            .unwrap_or_default()
    }

    /// Geographic description: area name when known, else the country name.
    #[must_use]
    pub fn description(&self, record: &PhoneNumberRecord, locale: &str) -> String {
        if !record.is_valid() || locale != self.locale {
            return String::new();
        }

        if let Some(area) = self.areas.longest_match(record.e164_digits()) {
            return area.description.clone();
        }

        record
            .region()
            .and_then(|code| self.region(code))
            .map(|region| region.name.clone())
            .unwrap_or_default()
    }

    /// IANA zones for the number: area zones, else region zones, else unknown.
    #[must_use]
    pub fn time_zones(&self, record: &PhoneNumberRecord) -> Vec<String> {
        if !record.is_valid() {
            return vec![UNKNOWN_TIME_ZONE.to_string()];
        }

        if let Some(area) = self
            .areas
            .longest_match_by(record.e164_digits(), |area| !area.time_zones.is_empty())
        {
            return area.time_zones.clone();
        }

        record
            .region()
            .and_then(|code| self.region(code))
            .map_or_else(
                || vec![UNKNOWN_TIME_ZONE.to_string()],
                |region| region.time_zones.clone(),
            )
    }
}
