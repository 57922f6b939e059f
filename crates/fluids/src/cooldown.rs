//! Swing throttling for absorbing tools.
//!
//! The transfer engine only ever asks "is this tool ready?" and "start the
//! cooldown again"; the tick bookkeeping lives here.

use bevy::prelude::*;

use crate::FluidsSet;

// =============================================================================
// Constants
// =============================================================================

/// Default number of `FixedUpdate` ticks between swings (~1.5s at 10Hz).
pub const DEFAULT_SWING_INTERVAL_TICKS: u32 = 15;

// =============================================================================
// Component
// =============================================================================

/// Per-tool swing throttle. A tool without this component is always ready.
#[derive(Component, Debug, Clone)]
pub struct SwingCooldown {
    /// Ticks left until the next swing is allowed. Zero means ready.
    pub remaining_ticks: u32,
    /// Value `remaining_ticks` restarts from after a committed swing.
    pub interval_ticks: u32,
}

impl SwingCooldown {
    /// A cooldown that starts ready.
    pub fn new(interval_ticks: u32) -> Self {
        SwingCooldown {
            remaining_ticks: 0,
            interval_ticks,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining_ticks == 0
    }

    pub fn reset(&mut self) {
        self.remaining_ticks = self.interval_ticks;
    }
}

impl Default for SwingCooldown {
    fn default() -> Self {
        SwingCooldown::new(DEFAULT_SWING_INTERVAL_TICKS)
    }
}

// =============================================================================
// Systems
// =============================================================================

/// System: count every swing cooldown down by one tick.
pub fn tick_cooldowns(mut cooldowns: Query<&mut SwingCooldown>) {
    for mut cooldown in &mut cooldowns {
        if cooldown.remaining_ticks > 0 {
            cooldown.remaining_ticks -= 1;
        }
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct CooldownPlugin;

impl Plugin for CooldownPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, tick_cooldowns.in_set(FluidsSet::Timers));
    }
}
