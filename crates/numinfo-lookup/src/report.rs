//! Text rendering and JSON persistence of enrichment results.

use crate::error::ReportError;
use numinfo_core::{EnrichmentResult, PhoneNumberRecord, SectionKind, SourceData};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Indentation used by [`persist`].
pub const DEFAULT_INDENT: usize = 4;

/// Message printed instead of a report for numbers that fail validation.
pub const INVALID_NUMBER_MESSAGE: &str = "Invalid phone number. Could not gather information.";

/// Render a result as a sectioned, human-readable report.
#[must_use]
pub fn render(result: &EnrichmentResult) -> String {
    if !result.is_valid() {
        return format!("{INVALID_NUMBER_MESSAGE}\n");
    }

    let mut lines = vec!["=== Phone Number Information ===".to_string()];

    for kind in SectionKind::ALL {
        lines.push(String::new());
        lines.push(format!("[{}]", kind.heading()));

        for (source, data) in result.section(kind) {
            match kind {
                SectionKind::BasicInfo => {
                    push_fields_in_order(&mut lines, data, &PhoneNumberRecord::BASIC_INFO_FIELDS);
                }
                SectionKind::CarrierInfo | SectionKind::Geolocation => {
                    lines.push(String::new());
                    lines.push(format!("Source: {source}"));
                    push_fields(&mut lines, data);
                }
                SectionKind::TimezoneInfo => push_fields(&mut lines, data),
                SectionKind::AdditionalData => {
                    lines.push(String::new());
                    lines.push(format!("Category: {}", title_case(source)));
                    push_fields(&mut lines, data);
                }
            }
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_fields(lines: &mut Vec<String>, data: &SourceData) {
    for (key, value) in data {
        lines.push(format!("{}: {}", title_case(key), display_value(value)));
    }
}

/// Listed fields first, in the given order, then any others.
fn push_fields_in_order(lines: &mut Vec<String>, data: &SourceData, order: &[&str]) {
    for key in order {
        if let Some(value) = data.get(*key) {
            lines.push(format!("{}: {}", title_case(key), display_value(value)));
        }
    }
    for (key, value) in data.iter().filter(|(key, _)| !order.contains(&key.as_str())) {
        lines.push(format!("{}: {}", title_case(key), display_value(value)));
    }
}

/// `formatted_e164` -> `Formatted E164`
fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Write a result as JSON with the default indentation.
///
/// # Errors
/// Returns error if the file cannot be created or written.
pub fn persist(result: &EnrichmentResult, path: &Path) -> Result<(), ReportError> {
    persist_with_indent(result, path, DEFAULT_INDENT)
}

/// Write a result as JSON indented by `indent` spaces, with a trailing newline.
///
/// # Errors
/// Returns error if the file cannot be created or written.
pub fn persist_with_indent(
    result: &EnrichmentResult,
    path: &Path,
    indent: usize,
) -> Result<(), ReportError> {
    let io_error = |source: std::io::Error| ReportError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut writer, formatter);
    result.serialize(&mut serializer).map_err(|e| {
        if e.is_io() {
            io_error(e.into())
        } else {
            ReportError::Serialization(e)
        }
    })?;

    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)?;

    info!(path = %path.display(), "results saved");
    Ok(())
}
