use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::solution::{FixedVolume, ProgressBucket, Solution};

// =============================================================================
// Constants
// =============================================================================

/// Default tool capacity, in units.
pub const DEFAULT_TOOL_CAPACITY: FixedVolume = FixedVolume::from_units(50);

/// Default maximum volume a tool moves per swing, in units.
pub const DEFAULT_PICKUP_AMOUNT: FixedVolume = FixedVolume::from_units(10);

// =============================================================================
// Components
// =============================================================================

/// Hand-held container that trades its evaporative charge for contaminants.
#[derive(Component, Debug, Clone)]
pub struct AbsorbentTool {
    /// Bounded mixture the tool currently carries.
    pub solution: Solution,
    /// Maximum volume moved per swing.
    pub pickup_amount: FixedVolume,
}

impl AbsorbentTool {
    /// An empty tool with the given capacity and per-swing limit.
    pub fn new(capacity: FixedVolume, pickup_amount: FixedVolume) -> Self {
        AbsorbentTool {
            solution: Solution::with_capacity(capacity),
            pickup_amount,
        }
    }
}

impl Default for AbsorbentTool {
    fn default() -> Self {
        AbsorbentTool::new(DEFAULT_TOOL_CAPACITY, DEFAULT_PICKUP_AMOUNT)
    }
}

/// Last published fill view of an absorbing tool. Rewritten only when the
/// underlying solution's snapshot actually differs, so UI systems can hang
/// off change detection without seeing spurious updates.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AbsorbentDisplay {
    pub buckets: Vec<ProgressBucket>,
}

// =============================================================================
// Events
// =============================================================================

/// Request from the interaction layer: `user` swings `tool` at `target`.
#[derive(Event, Debug, Clone, Copy)]
pub struct MopAction {
    pub user: Entity,
    pub tool: Entity,
    pub target: Entity,
}

// =============================================================================
// Outcomes
// =============================================================================

/// Why a swing moved nothing. Refusals are expected outcomes, not errors;
/// the interaction layer surfaces them as messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Refusal {
    /// The tool's swing cooldown has not elapsed.
    NotReady,
    /// The tool is empty; there is nothing to push into an empty vessel.
    SourceEmpty,
    /// The destination has no free volume.
    DestinationFull,
    /// The tool has no evaporative reagent to trade against a puddle.
    NoEligibleMaterial,
    /// The tool is clean and full; nothing to give, no room to take.
    NoSpaceToAbsorb,
    /// The vessel holds no evaporative reagent to hand back.
    DestinationHasNoReturnable,
    /// The puddle is already fully evaporative and will clear on its own.
    AlreadyClearing,
}

/// Result of one mop swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MopOutcome {
    /// At least one transfer leg moved volume; side effects fired.
    Transferred,
    /// Both legs evaluated but nothing moved; no side effects.
    NoOp,
    /// The swing was refused before any volume moved.
    Refused(Refusal),
}

// =============================================================================
// Telemetry
// =============================================================================

/// Running tally of swing outcomes, for telemetry and tests.
#[derive(Resource, Debug, Clone, Default)]
pub struct MopLog {
    pub transferred: u32,
    pub noops: u32,
    pub refused: u32,
    pub last: Option<MopOutcome>,
}

impl MopLog {
    pub fn record(&mut self, outcome: MopOutcome) {
        match outcome {
            MopOutcome::Transferred => self.transferred += 1,
            MopOutcome::NoOp => self.noops += 1,
            MopOutcome::Refused(_) => self.refused += 1,
        }
        self.last = Some(outcome);
    }
}
