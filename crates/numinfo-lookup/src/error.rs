//! Error types for parsing, enrichment sources and report output.

use thiserror::Error;

/// The input could not be interpreted as a phone number.
///
/// This is the only error that stops an enrichment run.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input was empty or whitespace
    #[error("no phone number supplied")]
    Empty,

    /// The parsing library rejected the input
    #[error("could not parse '{input}' as a phone number: {reason}")]
    InvalidNumber {
        /// The raw input
        input: String,
        /// Reason reported by the parser
        reason: String,
    },
}

/// A single data source failed.
///
/// These are logged and the source's entry is left out of the result; they
/// never abort the pipeline.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Remote API answered with a status other than 200
    #[error("API error ({source_id}): status {status}, {message}")]
    ApiError {
        /// Source name
        source_id: String,
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Remote API answered 200 but reported a failure in the body
    #[error("request rejected by {source_id}: {message}")]
    Rejected {
        /// Source name
        source_id: String,
        /// Error detail from the response body
        message: String,
    },

    /// Request could not be sent or the response could not be read
    #[error("network error ({source_id}): {source}")]
    Network {
        /// Source name
        source_id: String,
        /// Underlying client error, with the URL (and its API key) stripped
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the expected JSON
    #[error("failed to parse response from {source_id}: {message}")]
    Decode {
        /// Source name
        source_id: String,
        /// Error message
        message: String,
    },

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Writing the JSON report failed.
#[derive(Error, Debug)]
pub enum ReportError {
    /// File could not be created or written
    #[error("failed to write report to {path}")]
    Io {
        /// Target path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Result could not be encoded as JSON
    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The bundled lookup metadata is malformed.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// TOML could not be parsed
    #[error("failed to parse metadata TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Prefix contains something other than digits
    #[error("invalid prefix '{prefix}' in {table} table")]
    InvalidPrefix {
        /// Table name
        table: &'static str,
        /// Offending prefix
        prefix: String,
    },

    /// Same prefix listed twice in one table
    #[error("duplicate prefix '{prefix}' in {table} table")]
    DuplicatePrefix {
        /// Table name
        table: &'static str,
        /// Offending prefix
        prefix: String,
    },

    /// Region entry is malformed
    #[error("invalid region '{code}': {reason}")]
    InvalidRegion {
        /// Region code
        code: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
