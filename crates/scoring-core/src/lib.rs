//! Shared building blocks for the financial scoring engines.
//!
//! Everything here is stateless: numeric helpers over plain slices, the
//! lenient numeric coercion used at the deserialization boundary, and the
//! small amount of environment configuration the engines accept.

pub mod coerce;
pub mod config;
pub mod error;
pub mod stats;
pub mod types;

pub use config::EngineConfig;
pub use error::*;
pub use types::*;
