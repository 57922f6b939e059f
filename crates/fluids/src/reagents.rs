//! Reagent identifiers, display colors, and the evaporative class.
//!
//! The class split is a static lookup: a reagent either belongs to the fixed
//! mop-friendly set or it is a contaminant. Nothing else about a reagent
//! matters to the transfer engine.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// Reagent identifiers
// =============================================================================

/// A reagent kind that can appear in a [`Solution`](crate::solution::Solution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReagentId {
    Water,
    HolyWater,
    Cleaner,
    Blood,
    Oil,
    Sludge,
}

impl ReagentId {
    /// Display name for UI text.
    pub fn name(self) -> &'static str {
        match self {
            ReagentId::Water => "Water",
            ReagentId::HolyWater => "Holy Water",
            ReagentId::Cleaner => "Cleaner",
            ReagentId::Blood => "Blood",
            ReagentId::Oil => "Oil",
            ReagentId::Sludge => "Sludge",
        }
    }

    /// Display color used when blending mixture and fill-display colors.
    pub fn color(self) -> Color {
        match self {
            ReagentId::Water => Color::srgb(0.27, 0.52, 0.96),
            ReagentId::HolyWater => Color::srgb(0.45, 0.75, 0.98),
            ReagentId::Cleaner => Color::srgb(0.62, 0.90, 0.88),
            ReagentId::Blood => Color::srgb(0.62, 0.10, 0.10),
            ReagentId::Oil => Color::srgb(0.20, 0.16, 0.12),
            ReagentId::Sludge => Color::srgb(0.35, 0.40, 0.18),
        }
    }

    /// Whether this reagent belongs to the fixed mop-friendly class.
    pub fn is_evaporative(self) -> bool {
        EVAPORATIVE_REAGENTS.contains(&self)
    }
}

// =============================================================================
// Classes
// =============================================================================

/// The fixed, closed set of reagents an absorbing tool can release onto a
/// spill. Everything outside this set is a contaminant and only ever moves
/// *into* a tool or vessel.
pub const EVAPORATIVE_REAGENTS: &[ReagentId] = &[ReagentId::Water, ReagentId::HolyWater];

/// Color of empty container capacity in fill displays.
pub const FREE_CAPACITY_COLOR: Color = Color::srgb(0.25, 0.25, 0.25);
