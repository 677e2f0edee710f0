//! Data source implementations.

pub mod abstractapi;
pub mod common;
pub mod local;
pub mod numverify;
pub mod reputation;

pub use abstractapi::AbstractApiSource;
pub use local::{LocalCarrierSource, LocalGeocoderSource, LocalTimezoneSource};
pub use numverify::NumverifySource;
pub use reputation::ReputationCheck;
