//! Domain layer for Drycast
//!
//! Contains the forecast records, provider identifiers, coordinates and the
//! drying estimate. This layer performs no I/O and defines the shared
//! vocabulary used by the adapters, the merger and the estimator.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
