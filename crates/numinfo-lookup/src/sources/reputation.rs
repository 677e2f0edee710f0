//! Placeholder reputation check.
//!
//! Reports fixed "not flagged" values until a reputation API is wired in.
//! Kept as a source so a real implementation only has to replace `fetch`.

use crate::error::Result;
use crate::source::DataSource;
use numinfo_core::{PhoneNumberRecord, SectionKind, SourceData, SourceId};
use serde_json::Value;

/// Note attached to every placeholder result.
pub const PLACEHOLDER_NOTE: &str = "This would require integration with a reputation API";

/// Static spam/scam check.
pub struct ReputationCheck {
    id: SourceId,
}

impl ReputationCheck {
    /// Create the placeholder check.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SourceId::from_static("reputation_check"),
        }
    }
}

impl Default for ReputationCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for ReputationCheck {
    fn source_id(&self) -> &SourceId {
        &self.id
    }

    fn section(&self) -> SectionKind {
        SectionKind::AdditionalData
    }

    fn fetch(&self, _record: &PhoneNumberRecord) -> Result<SourceData> {
        Ok(SourceData::from([
            ("reported_as_spam".to_string(), Value::Bool(false)),
            ("reported_as_scam".to_string(), Value::Bool(false)),
            ("notes".to_string(), Value::from(PLACEHOLDER_NOTE)),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_shape() {
        let record = PhoneNumberRecord::new("+14155552671", "+14155552671", 1, 0, true, None);
        let data = ReputationCheck::new().fetch(&record).expect("placeholder");

        assert_eq!(data.len(), 3);
        assert_eq!(data["reported_as_spam"], Value::Bool(false));
        assert_eq!(data["reported_as_scam"], Value::Bool(false));
        assert_eq!(data["notes"], Value::from(PLACEHOLDER_NOTE));
    }
}
