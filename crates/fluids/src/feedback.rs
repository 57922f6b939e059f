//! User-facing feedback: message keys and audio cues emitted by swings.
//!
//! Translation and playback live outside this crate. Systems here only carry
//! stable keys downstream, the way notification text and SFX ids flow out to
//! the UI layer.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// Message keys
// =============================================================================

/// Localization key for one user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKey {
    /// The puddle holds only evaporative reagent and will clear on its own.
    PuddleEvaporating,
    /// The tool has no evaporative reagent left to trade.
    ToolOutOfSolvent,
    /// The tool is empty; there is nothing to pour into the vessel.
    ToolEmpty,
    /// The destination vessel has no free volume.
    VesselFull,
    /// The tool is clean and full; the swing cannot move anything.
    ToolNoSpace,
    /// The vessel holds no evaporative reagent to hand back.
    VesselNoSolvent,
}

impl FeedbackKey {
    /// Stable localization id resolved by the UI layer.
    pub fn message_id(self) -> &'static str {
        match self {
            FeedbackKey::PuddleEvaporating => "fluids-puddle-evaporating",
            FeedbackKey::ToolOutOfSolvent => "fluids-tool-out-of-solvent",
            FeedbackKey::ToolEmpty => "fluids-tool-empty",
            FeedbackKey::VesselFull => "fluids-vessel-full",
            FeedbackKey::ToolNoSpace => "fluids-tool-no-space",
            FeedbackKey::VesselNoSolvent => "fluids-vessel-no-solvent",
        }
    }
}

// =============================================================================
// Audio cues
// =============================================================================

/// Sound cue played after a committed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueKey {
    /// A tool pulled contaminants out of a puddle.
    PuddleSlurp,
    /// A tool exchanged solution with a vessel.
    VesselTransfer,
}

impl CueKey {
    /// Stable asset id resolved by the audio layer.
    pub fn sound_id(self) -> &'static str {
        match self {
            CueKey::PuddleSlurp => "fluids/mop-slurp",
            CueKey::VesselTransfer => "fluids/vessel-transfer",
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Event: show the message behind `key` to `user`.
#[derive(Event, Debug, Clone, Copy)]
pub struct FeedbackEvent {
    pub user: Entity,
    pub key: FeedbackKey,
}

/// Event: play a cue, optionally located at a tile.
#[derive(Event, Debug, Clone, Copy)]
pub struct CueEvent {
    pub cue: CueKey,
    pub tile: Option<IVec2>,
}

// =============================================================================
// Plugin
// =============================================================================

pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FeedbackEvent>().add_event::<CueEvent>();
    }
}
