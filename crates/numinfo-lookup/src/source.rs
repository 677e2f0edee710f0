//! Data source trait and listing types.

use crate::error::Result;
use numinfo_core::{PhoneNumberRecord, SectionKind, SourceData, SourceId};
use serde::Serialize;

/// Source name shared by every probe backed by the local library and metadata.
pub const LOCAL_LIBRARY: &str = "local_library";

/// A named probe that contributes one entry to one section of the result.
///
/// Sources are independent: a failing source is logged by the enricher and
/// its entry omitted, without affecting any other source.
pub trait DataSource {
    /// Name the source's entry is stored under.
    fn source_id(&self) -> &SourceId;

    /// Section this source contributes to.
    fn section(&self) -> SectionKind;

    /// Whether fetching involves a network call.
    fn is_remote(&self) -> bool {
        false
    }

    /// Produce this source's fields for a valid number.
    ///
    /// # Errors
    /// Returns error if the lookup fails for any reason; the caller treats
    /// every error as recoverable.
    fn fetch(&self, record: &PhoneNumberRecord) -> Result<SourceData>;
}

/// Summary of a registered source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    /// Source name
    pub id: SourceId,
    /// Section the source contributes to
    pub section: SectionKind,
    /// Whether the source calls a remote API
    pub is_remote: bool,
}

impl SourceInfo {
    /// Describe a source.
    #[must_use]
    pub fn of(source: &dyn DataSource) -> Self {
        Self {
            id: source.source_id().clone(),
            section: source.section(),
            is_remote: source.is_remote(),
        }
    }
}
