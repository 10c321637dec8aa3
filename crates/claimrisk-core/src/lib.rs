//! claimrisk-core: shared foundation for the claims risk-scoring engine.
//!
//! Record table types, canonical column names, the header alias map,
//! configuration, error enums, and tracing setup.

pub mod config;
pub mod constants;
pub mod errors;
pub mod schema;
pub mod tracing;
pub mod types;

pub use types::{Table, Value};
