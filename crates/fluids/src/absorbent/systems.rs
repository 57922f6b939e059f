use bevy::prelude::*;

use crate::cooldown::SwingCooldown;
use crate::feedback::{CueEvent, CueKey, FeedbackEvent, FeedbackKey};
use crate::puddle::{Puddle, TileReactionEvent};
use crate::reagents::EVAPORATIVE_REAGENTS;
use crate::refillable::RefillableVessel;
use crate::solution::Solution;
use crate::FluidsSet;

use super::engine::{self, CooldownGate, Feedback, MopHooks, MopTarget, TileReactions};
use super::types::{AbsorbentDisplay, AbsorbentTool, MopAction, MopLog};

// =============================================================================
// Collaborator adapters
// =============================================================================
// Bridge ECS storage and event writers into the engine's collaborator traits.

/// Cooldown gate over an optional `SwingCooldown` component. Tools without
/// one are always ready.
struct ComponentCooldown<'a> {
    cooldown: Option<&'a mut SwingCooldown>,
}

impl CooldownGate for ComponentCooldown<'_> {
    fn is_ready(&self) -> bool {
        self.cooldown.as_ref().map(|c| c.is_ready()).unwrap_or(true)
    }

    fn reset(&mut self) {
        if let Some(cooldown) = self.cooldown.as_mut() {
            cooldown.reset();
        }
    }
}

/// Tile-reaction hook that announces the landing solution to the external
/// reaction subsystem and leaves it for the puddle to absorb.
struct EventTileReactions<'a, 'w> {
    events: &'a mut EventWriter<'w, TileReactionEvent>,
}

impl TileReactions for EventTileReactions<'_, '_> {
    fn apply(&mut self, tile: IVec2, solution: &mut Solution) {
        self.events.send(TileReactionEvent {
            tile,
            solution: solution.clone(),
        });
    }
}

/// Feedback sink forwarding into the message and cue event streams.
struct EventFeedback<'a, 'w1, 'w2> {
    notifications: &'a mut EventWriter<'w1, FeedbackEvent>,
    cues: &'a mut EventWriter<'w2, CueEvent>,
}

impl Feedback for EventFeedback<'_, '_, '_> {
    fn notify(&mut self, user: Entity, key: FeedbackKey) {
        self.notifications.send(FeedbackEvent { user, key });
    }

    fn cue(&mut self, cue: CueKey, tile: Option<IVec2>) {
        self.cues.send(CueEvent { cue, tile });
    }
}

// =============================================================================
// Systems
// =============================================================================

/// System: resolve queued `MopAction`s into solution transfers.
///
/// Puddles take precedence over vessels when dispatching the target, matching
/// the interaction order of swinging at the floor before the container under
/// it. Actions whose tool or target despawned since emission are dropped.
#[allow(clippy::too_many_arguments)]
pub fn handle_mop_actions(
    mut actions: EventReader<MopAction>,
    mut tools: Query<(&mut AbsorbentTool, Option<&mut SwingCooldown>)>,
    mut puddles: Query<&mut Puddle>,
    mut vessels: Query<&mut RefillableVessel>,
    mut log: ResMut<MopLog>,
    mut reactions: EventWriter<TileReactionEvent>,
    mut notifications: EventWriter<FeedbackEvent>,
    mut cues: EventWriter<CueEvent>,
) {
    for action in actions.read() {
        let Ok((mut tool, mut cooldown)) = tools.get_mut(action.tool) else {
            continue;
        };

        let mut cooldown_gate = ComponentCooldown {
            cooldown: cooldown.as_deref_mut(),
        };
        let mut tile_reactions = EventTileReactions {
            events: &mut reactions,
        };
        let mut feedback = EventFeedback {
            notifications: &mut notifications,
            cues: &mut cues,
        };
        let mut hooks = MopHooks {
            reactions: &mut tile_reactions,
            cooldown: &mut cooldown_gate,
            feedback: &mut feedback,
        };

        let outcome = if let Ok(mut puddle) = puddles.get_mut(action.target) {
            let tile = puddle.tile;
            engine::mop(
                action.user,
                &mut tool,
                MopTarget::Puddle {
                    solution: &mut puddle.solution,
                    tile,
                },
                &mut hooks,
            )
        } else if let Ok(mut vessel) = vessels.get_mut(action.target) {
            engine::mop(
                action.user,
                &mut tool,
                MopTarget::Vessel {
                    solution: &mut vessel.solution,
                },
                &mut hooks,
            )
        } else {
            continue;
        };

        log.record(outcome);
    }
}

/// System: refresh the fill display of tools whose solution changed.
///
/// The component is rewritten only when the recomputed snapshot differs, so
/// downstream change detection fires only on real updates.
pub fn update_absorbent_displays(
    mut tools: Query<(&AbsorbentTool, &mut AbsorbentDisplay), Changed<AbsorbentTool>>,
) {
    for (tool, mut display) in &mut tools {
        let buckets = tool.solution.progress(EVAPORATIVE_REAGENTS);
        if display.buckets != buckets {
            display.buckets = buckets;
        }
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct AbsorbentPlugin;

impl Plugin for AbsorbentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MopLog>()
            .add_event::<MopAction>()
            .add_systems(
                FixedUpdate,
                (
                    handle_mop_actions.in_set(FluidsSet::Transfer),
                    update_absorbent_displays.in_set(FluidsSet::React),
                ),
            );
    }
}
