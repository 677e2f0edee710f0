//! Phone number parsing and validation.
//!
//! Numbers are parsed without a default region, so the input must carry its
//! country calling code (`+44 20 ...`, `+1 415 ...`).

use crate::error::ParseError;
use numinfo_core::PhoneNumberRecord;
use phonenumber::Mode;
use tracing::debug;

/// Parse and validate a raw phone number string.
///
/// Validity comes from the library's pattern check for the inferred region;
/// it says nothing about whether the number is reachable.
///
/// # Errors
/// Returns [`ParseError`] when the input is empty or cannot be read as a
/// phone number (missing or unknown country code, non-numeric content).
pub fn parse_number(raw: &str) -> Result<PhoneNumberRecord, ParseError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let parsed = phonenumber::parse(None, input).map_err(|e| ParseError::InvalidNumber {
        input: raw.to_string(),
        reason: e.to_string(),
    })?;

    let is_valid = phonenumber::is_valid(&parsed);
    let formatted = parsed.format().mode(Mode::E164).to_string();
    let region = parsed.country().id().map(|id| format!("{id:?}"));

    debug!(
        e164 = %formatted,
        region = region.as_deref().unwrap_or("unknown"),
        is_valid,
        "parsed phone number"
    );

    Ok(PhoneNumberRecord::new(
        raw,
        formatted,
        parsed.code().value(),
        parsed.national().value(),
        is_valid,
        region,
    ))
}
