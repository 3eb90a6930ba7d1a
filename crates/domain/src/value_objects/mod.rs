//! Value Objects - Immutable, identity-less domain primitives

mod drying_estimate;
mod geo_location;
mod provider_id;

pub use drying_estimate::DryingEstimate;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use provider_id::ProviderId;
