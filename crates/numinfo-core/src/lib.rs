//! NumInfo Core - Foundation crate for the numinfo phone number enricher.
//!
//! This crate provides the shared data model, error handling and configuration
//! management that the lookup pipeline and the command-line shell depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Phone number record, enrichment result and source identifiers
//!
//! # Example
//!
//! ```rust
//! use numinfo_core::{AppConfig, EnrichmentResult, SectionKind};
//!
//! let config = AppConfig::default();
//! assert!(config.numverify.api_key.is_none());
//!
//! let result = EnrichmentResult::default();
//! assert!(result.section(SectionKind::CarrierInfo).is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, HttpConfig, OutputConfig, RemoteApiConfig};
pub use error::{ConfigError, ConfigResult, NumInfoError};
pub use types::{EnrichmentResult, PhoneNumberRecord, Section, SectionKind, SourceData, SourceId};
