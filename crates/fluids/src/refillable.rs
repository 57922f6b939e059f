//! Refillable vessels: capped containers with no pickup limit of their own.
//!
//! Transfer sizing always comes from the absorbing tool's pickup amount; the
//! vessel only contributes its free volume.

use bevy::prelude::*;

use crate::solution::{FixedVolume, Solution};

/// Default bucket capacity, in units.
pub const DEFAULT_VESSEL_CAPACITY: FixedVolume = FixedVolume::from_units(100);

/// A capped container a tool can be wrung out into or recharged from.
#[derive(Component, Debug, Clone)]
pub struct RefillableVessel {
    pub solution: Solution,
}

impl RefillableVessel {
    /// An empty vessel bounded by `capacity`.
    pub fn with_capacity(capacity: FixedVolume) -> Self {
        RefillableVessel {
            solution: Solution::with_capacity(capacity),
        }
    }

    pub fn new(solution: Solution) -> Self {
        debug_assert!(
            solution.capacity().is_some(),
            "vessels hold capped solutions"
        );
        RefillableVessel { solution }
    }
}

impl Default for RefillableVessel {
    fn default() -> Self {
        RefillableVessel::with_capacity(DEFAULT_VESSEL_CAPACITY)
    }
}
