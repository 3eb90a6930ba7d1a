//! Drying estimate value object
//!
//! The outcome of a drying-day estimation: either the 1-based day index at
//! which the cumulative drying score crosses the threshold, or the marker
//! that the threshold is not reached within the forecast horizon.
//!
//! # Examples
//!
//! ```
//! use domain::DryingEstimate;
//!
//! let reached = DryingEstimate::reached_on(3).expect("non-zero day");
//! assert_eq!(reached.day_index(), Some(3));
//! assert_eq!(reached.to_string(), "day 3");
//!
//! assert_eq!(DryingEstimate::NotReached.day_index(), None);
//! assert!(DryingEstimate::reached_on(0).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// First day on which conditions are expected to be dry enough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "day", rename_all = "snake_case")]
pub enum DryingEstimate {
    /// Threshold crossed on this 1-based day of the merged sequence
    Reached(NonZeroU32),
    /// Cumulative score never met the threshold
    NotReached,
}

impl DryingEstimate {
    /// Build a `Reached` estimate from a 1-based day index
    ///
    /// Returns `None` for index 0.
    #[must_use]
    pub fn reached_on(day_index: u32) -> Option<Self> {
        NonZeroU32::new(day_index).map(Self::Reached)
    }

    /// The 1-based day index, if the threshold was reached
    #[must_use]
    pub const fn day_index(&self) -> Option<u32> {
        match self {
            Self::Reached(day) => Some(day.get()),
            Self::NotReached => None,
        }
    }

    #[must_use]
    pub const fn is_reached(&self) -> bool {
        matches!(self, Self::Reached(_))
    }
}

impl fmt::Display for DryingEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reached(day) => write!(f, "day {day}"),
            Self::NotReached => write!(f, "not reached"),
        }
    }
}
