use bevy::prelude::*;

pub mod absorbent;
pub mod cooldown;
pub mod feedback;
pub mod puddle;
pub mod reagents;
pub mod refillable;
pub mod solution;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

// ---------------------------------------------------------------------------
// System ordering
// ---------------------------------------------------------------------------

/// Phases of one `FixedUpdate` tick for the fluid systems.
///
/// Cooldowns count down before transfers are evaluated, and derived state
/// (fill displays, drained-puddle cleanup) reacts after transfers commit.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FluidsSet {
    /// Swing cooldowns tick down.
    Timers,
    /// Queued mop actions resolve into solution transfers.
    Transfer,
    /// Derived views refresh and drained containers are removed.
    React,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct FluidsPlugin;

impl Plugin for FluidsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (FluidsSet::Timers, FluidsSet::Transfer, FluidsSet::React).chain(),
        );

        app.add_plugins((
            cooldown::CooldownPlugin,
            feedback::FeedbackPlugin,
            puddle::PuddlePlugin,
            absorbent::AbsorbentPlugin,
        ));
    }
}
