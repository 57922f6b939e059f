//! Headless integration test rig wrapping `bevy::app::App` + `FluidsPlugin`.
//!
//! Spawns containers, queues mop actions, advances `FixedUpdate` manually,
//! and exposes the resulting state for assertions. No window, no renderer.

use bevy::prelude::*;

use crate::absorbent::{AbsorbentDisplay, AbsorbentTool, MopAction, MopLog};
use crate::cooldown::SwingCooldown;
use crate::feedback::{CueEvent, FeedbackEvent};
use crate::puddle::{Puddle, TileReactionEvent};
use crate::refillable::RefillableVessel;
use crate::solution::{FixedVolume, Solution};
use crate::FluidsPlugin;

/// A headless Bevy App with the fluid systems installed.
pub struct TestRig {
    app: App,
}

impl TestRig {
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(FluidsPlugin);
        TestRig { app }
    }

    // -----------------------------------------------------------------------
    // Simulation control
    // -----------------------------------------------------------------------

    /// Advance the simulation by `n` fixed ticks.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Queue a mop action; it resolves on the next tick.
    pub fn queue_mop(&mut self, user: Entity, tool: Entity, target: Entity) {
        self.app
            .world_mut()
            .send_event(MopAction { user, tool, target });
    }

    /// Queue a mop action and advance one tick.
    pub fn mop(&mut self, user: Entity, tool: Entity, target: Entity) {
        self.queue_mop(user, tool, target);
        self.tick(1);
    }

    // -----------------------------------------------------------------------
    // Spawning
    // -----------------------------------------------------------------------

    pub fn spawn_user(&mut self) -> Entity {
        self.app.world_mut().spawn_empty().id()
    }

    /// Spawn a tool with the given solution, pickup amount, and a cooldown.
    pub fn spawn_tool(&mut self, solution: Solution, pickup_amount: FixedVolume) -> Entity {
        self.app
            .world_mut()
            .spawn((
                AbsorbentTool {
                    solution,
                    pickup_amount,
                },
                AbsorbentDisplay::default(),
                SwingCooldown::default(),
            ))
            .id()
    }

    pub fn spawn_puddle(&mut self, solution: Solution, tile: IVec2) -> Entity {
        self.app
            .world_mut()
            .spawn(Puddle::new(solution, tile))
            .id()
    }

    pub fn spawn_vessel(&mut self, solution: Solution) -> Entity {
        self.app
            .world_mut()
            .spawn(RefillableVessel::new(solution))
            .id()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn log(&self) -> &MopLog {
        self.app.world().resource::<MopLog>()
    }

    pub fn tool_solution(&self, tool: Entity) -> Solution {
        self.app
            .world()
            .get::<AbsorbentTool>(tool)
            .expect("tool despawned")
            .solution
            .clone()
    }

    pub fn tool_display(&self, tool: Entity) -> AbsorbentDisplay {
        self.app
            .world()
            .get::<AbsorbentDisplay>(tool)
            .expect("tool despawned")
            .clone()
    }

    pub fn puddle_solution(&self, puddle: Entity) -> Option<Solution> {
        self.app
            .world()
            .get::<Puddle>(puddle)
            .map(|p| p.solution.clone())
    }

    pub fn vessel_solution(&self, vessel: Entity) -> Solution {
        self.app
            .world()
            .get::<RefillableVessel>(vessel)
            .expect("vessel despawned")
            .solution
            .clone()
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.app.world().get_entity(entity).is_ok()
    }

    // -----------------------------------------------------------------------
    // Event drains
    // -----------------------------------------------------------------------

    pub fn drain_cues(&mut self) -> Vec<CueEvent> {
        self.app
            .world_mut()
            .resource_mut::<Events<CueEvent>>()
            .drain()
            .collect()
    }

    pub fn drain_feedback(&mut self) -> Vec<FeedbackEvent> {
        self.app
            .world_mut()
            .resource_mut::<Events<FeedbackEvent>>()
            .drain()
            .collect()
    }

    pub fn drain_tile_reactions(&mut self) -> Vec<TileReactionEvent> {
        self.app
            .world_mut()
            .resource_mut::<Events<TileReactionEvent>>()
            .drain()
            .collect()
    }
}

impl Default for TestRig {
    fn default() -> Self {
        TestRig::new()
    }
}
