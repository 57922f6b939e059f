//! Ground spills: uncapped solutions anchored to a floor tile.
//!
//! Spills are created by outside world events (broken pipes, dropped beakers);
//! this module owns only their container shape and their removal once drained.
//! What reagents do to the tile itself is the tile-reaction subsystem's
//! business, announced through [`TileReactionEvent`].

use bevy::prelude::*;

use crate::solution::Solution;
use crate::FluidsSet;

// =============================================================================
// Components
// =============================================================================

/// A spilled solution lying on a floor tile.
#[derive(Component, Debug, Clone)]
pub struct Puddle {
    /// Unbounded mixture on the floor.
    pub solution: Solution,
    /// Grid tile the spill is anchored to.
    pub tile: IVec2,
}

impl Puddle {
    pub fn new(solution: Solution, tile: IVec2) -> Self {
        debug_assert!(
            solution.capacity().is_none(),
            "puddles hold uncapped solutions"
        );
        Puddle { solution, tile }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Announcement that a solution is landing on a floor tile. Consumed by the
/// external tile-reaction subsystem.
#[derive(Event, Debug, Clone)]
pub struct TileReactionEvent {
    pub tile: IVec2,
    pub solution: Solution,
}

// =============================================================================
// Systems
// =============================================================================

/// System: remove puddle entities whose solution has fully drained.
pub fn despawn_drained_puddles(
    mut commands: Commands,
    puddles: Query<(Entity, &Puddle), Changed<Puddle>>,
) {
    for (entity, puddle) in &puddles {
        if puddle.solution.volume().is_zero() {
            commands.entity(entity).despawn();
        }
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct PuddlePlugin;

impl Plugin for PuddlePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TileReactionEvent>()
            .add_systems(FixedUpdate, despawn_drained_puddles.in_set(FluidsSet::React));
    }
}
