//! NumInfo Lookup - Phone number parsing and enrichment.
//!
//! This crate turns a raw phone number string into an [`EnrichmentResult`]:
//! the number is parsed and validated, then every registered data source is
//! probed for its section. Local sources read bundled prefix metadata; remote
//! sources call the `NumVerify` and `AbstractAPI` HTTP APIs when keys are set.
//!
//! A source that fails is logged and left out of the result. Only an
//! unparseable input is reported to the caller as an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use numinfo_core::AppConfig;
//! use numinfo_lookup::{render, NumberEnricher};
//!
//! let config = AppConfig::load_with_env(None)?;
//! let enricher = NumberEnricher::from_config(&config);
//!
//! let result = enricher.gather_all("+14155552671")?;
//! print!("{}", render(&result));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`EnrichmentResult`]: numinfo_core::EnrichmentResult

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod enricher;
pub mod error;
pub mod metadata;
pub mod parser;
pub mod report;
pub mod source;
pub mod sources;

pub use enricher::NumberEnricher;
pub use error::{MetadataError, ParseError, ReportError, Result, SourceError};
pub use metadata::Metadata;
pub use parser::parse_number;
pub use report::{persist, persist_with_indent, render};
pub use source::{DataSource, SourceInfo, LOCAL_LIBRARY};
