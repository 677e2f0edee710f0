//! The enrichment pipeline.
//!
//! `NumberEnricher` parses the input, then runs every registered source for
//! each section in a fixed order. Only a parse failure stops the run; a
//! failing source is logged and left out of its section.

use crate::error::ParseError;
use crate::metadata::Metadata;
use crate::parser::parse_number;
use crate::source::{DataSource, SourceInfo, LOCAL_LIBRARY};
use crate::sources::{
    AbstractApiSource, LocalCarrierSource, LocalGeocoderSource, LocalTimezoneSource,
    NumverifySource, ReputationCheck,
};
use numinfo_core::{AppConfig, EnrichmentResult, PhoneNumberRecord, Section, SectionKind};
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs the parse and enrichment steps for one phone number at a time.
pub struct NumberEnricher {
    sources: Vec<Box<dyn DataSource>>,
}

impl Default for NumberEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberEnricher {
    /// Create an enricher with no sources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Create an enricher with the built-in sources.
    ///
    /// Local sources are always registered. A remote source is registered
    /// only when its API key is configured; one whose client cannot be built
    /// is logged and skipped.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_metadata(config, Metadata::bundled())
    }

    /// Create an enricher with the built-in sources over custom metadata.
    #[must_use]
    pub fn with_metadata(config: &AppConfig, metadata: Arc<Metadata>) -> Self {
        let mut enricher = Self::new();

        enricher.add_source(Box::new(LocalCarrierSource::new(Arc::clone(&metadata))));
        match &config.numverify.api_key {
            Some(key) => match NumverifySource::new(key, &config.numverify.endpoint, &config.http)
            {
                Ok(source) => enricher.add_source(Box::new(source)),
                Err(e) => warn!(error = %e, "NumVerify source unavailable"),
            },
            None => debug!("NumVerify API key not set, source disabled"),
        }

        enricher.add_source(Box::new(LocalGeocoderSource::new(Arc::clone(&metadata))));
        match &config.abstract_api.api_key {
            Some(key) => {
                match AbstractApiSource::new(key, &config.abstract_api.endpoint, &config.http) {
                    Ok(source) => enricher.add_source(Box::new(source)),
                    Err(e) => warn!(error = %e, "AbstractAPI source unavailable"),
                }
            }
            None => debug!("AbstractAPI key not set, source disabled"),
        }

        enricher.add_source(Box::new(LocalTimezoneSource::new(metadata)));
        enricher.add_source(Box::new(ReputationCheck::new()));

        enricher
    }

    /// Register a source. Sources run in registration order within a section.
    ///
    /// A source whose id is already registered for the same section is ignored.
    pub fn add_source(&mut self, source: Box<dyn DataSource>) {
        let duplicate = self.sources.iter().any(|existing| {
            existing.section() == source.section() && existing.source_id() == source.source_id()
        });
        if duplicate {
            warn!(
                source = %source.source_id(),
                section = %source.section(),
                "source already registered for section, ignoring"
            );
            return;
        }

        self.sources.push(source);
    }

    /// Describe the registered sources in registration order.
    #[must_use]
    pub fn sources(&self) -> Vec<SourceInfo> {
        self.sources
            .iter()
            .map(|source| SourceInfo::of(source.as_ref()))
            .collect()
    }

    /// Parse and validate a raw phone number.
    ///
    /// # Errors
    /// Returns error if the input cannot be read as a phone number.
    pub fn validate_and_parse(&self, raw: &str) -> Result<PhoneNumberRecord, ParseError> {
        parse_number(raw)
    }

    /// Carrier lookups. Empty for invalid numbers.
    #[must_use]
    pub fn carrier_info(&self, record: &PhoneNumberRecord) -> Section {
        self.probe(SectionKind::CarrierInfo, record)
    }

    /// Geolocation lookups. Empty for invalid numbers.
    #[must_use]
    pub fn geolocation(&self, record: &PhoneNumberRecord) -> Section {
        self.probe(SectionKind::Geolocation, record)
    }

    /// Time zone lookups. Empty for invalid numbers.
    #[must_use]
    pub fn timezone(&self, record: &PhoneNumberRecord) -> Section {
        self.probe(SectionKind::TimezoneInfo, record)
    }

    /// Reputation placeholder and other extension data. Empty for invalid numbers.
    #[must_use]
    pub fn additional_data(&self, record: &PhoneNumberRecord) -> Section {
        self.probe(SectionKind::AdditionalData, record)
    }

    /// Parse the input and run every enrichment step.
    ///
    /// # Errors
    /// Returns error only if the input cannot be parsed.
    pub fn gather_all(&self, raw: &str) -> Result<EnrichmentResult, ParseError> {
        let record = self.validate_and_parse(raw)?;
        Ok(self.enrich(&record))
    }

    /// Run every enrichment step for an already parsed number.
    #[must_use]
    pub fn enrich(&self, record: &PhoneNumberRecord) -> EnrichmentResult {
        let mut result = EnrichmentResult::default();

        let mut basic = Section::new();
        basic.insert(LOCAL_LIBRARY.to_string(), record.basic_info());
        result.set_section(SectionKind::BasicInfo, basic);

        result.set_section(SectionKind::CarrierInfo, self.carrier_info(record));
        result.set_section(SectionKind::Geolocation, self.geolocation(record));
        result.set_section(SectionKind::TimezoneInfo, self.timezone(record));
        result.set_section(SectionKind::AdditionalData, self.additional_data(record));

        result
    }

    fn probe(&self, kind: SectionKind, record: &PhoneNumberRecord) -> Section {
        let mut section = Section::new();
        if !record.is_valid() {
            debug!(section = %kind, "number is invalid, skipping");
            return section;
        }

        for source in self.sources.iter().filter(|source| source.section() == kind) {
            match source.fetch(record) {
                Ok(data) => {
                    debug!(section = %kind, source = %source.source_id(), "source succeeded");
                    section.insert(source.source_id().to_string(), data);
                }
                Err(e) => {
                    warn!(
                        section = %kind,
                        source = %source.source_id(),
                        remote = source.is_remote(),
                        error = %e,
                        "source failed, omitting from result"
                    );
                }
            }
        }

        section
    }
}
