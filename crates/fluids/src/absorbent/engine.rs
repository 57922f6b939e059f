//! Transfer engine: resolves one mop swing against a puddle or a refillable
//! vessel, committing the exchange or refusing it with a reason.
//!
//! Every call runs to completion on the current tick; a swing either commits
//! all of its legs or leaves every solution untouched. Collaborators (tile
//! reactions, cooldown, feedback) are injected as narrow traits so tests can
//! substitute recording fakes.

use bevy::prelude::*;

use crate::feedback::{CueKey, FeedbackKey};
use crate::reagents::EVAPORATIVE_REAGENTS;
use crate::solution::Solution;

use super::types::{AbsorbentTool, MopOutcome, Refusal};

// =============================================================================
// Collaborator interfaces
// =============================================================================

/// Opaque hook reacting reagents with the floor tile they land on. May
/// consume part or all of `solution` before the puddle absorbs it.
pub trait TileReactions {
    fn apply(&mut self, tile: IVec2, solution: &mut Solution);
}

/// Externally owned swing throttle for the tool being swung.
pub trait CooldownGate {
    fn is_ready(&self) -> bool;
    fn reset(&mut self);
}

/// User-facing message and audio sink.
pub trait Feedback {
    fn notify(&mut self, user: Entity, key: FeedbackKey);
    fn cue(&mut self, cue: CueKey, tile: Option<IVec2>);
}

/// What a swing is aimed at.
pub enum MopTarget<'a> {
    Puddle {
        solution: &'a mut Solution,
        tile: IVec2,
    },
    Vessel {
        solution: &'a mut Solution,
    },
}

/// Collaborators one swing needs, supplied by the caller.
pub struct MopHooks<'a> {
    pub reactions: &'a mut dyn TileReactions,
    pub cooldown: &'a mut dyn CooldownGate,
    pub feedback: &'a mut dyn Feedback,
}

// =============================================================================
// Entry point
// =============================================================================

/// Resolve one swing of `tool` by `user` against `target`.
pub fn mop(
    user: Entity,
    tool: &mut AbsorbentTool,
    target: MopTarget<'_>,
    hooks: &mut MopHooks<'_>,
) -> MopOutcome {
    if !hooks.cooldown.is_ready() {
        return MopOutcome::Refused(Refusal::NotReady);
    }

    match target {
        MopTarget::Puddle { solution, tile } => mop_puddle(user, tool, solution, tile, hooks),
        MopTarget::Vessel { solution } => {
            if solution.volume().is_zero() {
                fill_empty_vessel(user, tool, solution, hooks)
            } else {
                exchange_with_vessel(user, tool, solution, hooks)
            }
        }
    }
}

// =============================================================================
// Puddle path
// =============================================================================

/// Trade the tool's evaporative charge for an equal volume of contaminants
/// pulled out of the puddle. The tool's net volume does not change.
fn mop_puddle(
    user: Entity,
    tool: &mut AbsorbentTool,
    puddle: &mut Solution,
    tile: IVec2,
    hooks: &mut MopHooks<'_>,
) -> MopOutcome {
    if puddle.volume().is_zero() {
        // Transient: drained puddles are despawned by the puddle module.
        return MopOutcome::NoOp;
    }

    if puddle.contains_only(EVAPORATIVE_REAGENTS) {
        hooks.feedback.notify(user, FeedbackKey::PuddleEvaporating);
        return MopOutcome::Refused(Refusal::AlreadyClearing);
    }

    let available = tool.solution.total_of(EVAPORATIVE_REAGENTS);
    if available.is_zero() {
        hooks.feedback.notify(user, FeedbackKey::ToolOutOfSolvent);
        return MopOutcome::Refused(Refusal::NoEligibleMaterial);
    }

    let transfer = tool.pickup_amount.min(available);
    let contaminants_out = puddle.split_without(transfer, EVAPORATIVE_REAGENTS);
    // Sized to what the puddle actually gave up, not the requested amount.
    let mut evaporative_out = tool
        .solution
        .split_with_only(contaminants_out.volume(), EVAPORATIVE_REAGENTS);

    // The tile reaction may drain part of the outgoing solvent before the
    // puddle absorbs the rest.
    hooks.reactions.apply(tile, &mut evaporative_out);

    puddle.add(evaporative_out);
    tool.solution.add(contaminants_out);

    hooks.cooldown.reset();
    hooks.feedback.cue(CueKey::PuddleSlurp, Some(tile));
    MopOutcome::Transferred
}

// =============================================================================
// Vessel paths
// =============================================================================

/// One-way push into an empty vessel. Contaminants go first: they cannot
/// clear out of the tool on their own.
fn fill_empty_vessel(
    user: Entity,
    tool: &mut AbsorbentTool,
    vessel: &mut Solution,
    hooks: &mut MopHooks<'_>,
) -> MopOutcome {
    if tool.solution.volume().is_zero() {
        hooks.feedback.notify(user, FeedbackKey::ToolEmpty);
        return MopOutcome::Refused(Refusal::SourceEmpty);
    }

    let transfer = tool.pickup_amount.min(vessel.available_volume());
    if !transfer.is_positive() {
        hooks.feedback.notify(user, FeedbackKey::VesselFull);
        return MopOutcome::Refused(Refusal::DestinationFull);
    }

    let contaminants = tool.solution.split_without(transfer, EVAPORATIVE_REAGENTS);
    if contaminants.volume().is_positive() {
        vessel.add(contaminants);
    } else {
        // Tool held only evaporative reagent; pour that instead.
        let payload = tool.solution.split(transfer);
        vessel.add(payload);
    }

    hooks.cooldown.reset();
    hooks.feedback.cue(CueKey::VesselTransfer, None);
    MopOutcome::Transferred
}

/// Two-way exchange with a non-empty vessel: contaminants out of the tool,
/// evaporative reagent back in. One logical transaction; whatever does not
/// fit the vessel returns to the tool, and every refusal path restores what
/// was already extracted.
fn exchange_with_vessel(
    user: Entity,
    tool: &mut AbsorbentTool,
    vessel: &mut Solution,
    hooks: &mut MopHooks<'_>,
) -> MopOutcome {
    let mut contaminants_from_tool = tool
        .solution
        .split_without(tool.pickup_amount, EVAPORATIVE_REAGENTS);

    if contaminants_from_tool.volume().is_zero() && tool.solution.available_volume().is_zero() {
        // Nothing extracted and no room to absorb a return leg. The split is
        // restored unconditionally so this path can never drop volume.
        tool.solution.add(contaminants_from_tool);
        hooks.feedback.notify(user, FeedbackKey::ToolNoSpace);
        return MopOutcome::Refused(Refusal::NoSpaceToAbsorb);
    }

    let solvent_pulled = tool.pickup_amount.min(tool.solution.available_volume());
    let solvent_from_vessel = vessel.split_with_only(solvent_pulled, EVAPORATIVE_REAGENTS);

    if solvent_from_vessel.volume().is_zero() && contaminants_from_tool.volume().is_zero() {
        // Nothing to move in either direction; both splits removed nothing,
        // so restoring the tool's extraction is a formality.
        tool.solution.add(contaminants_from_tool);
        hooks.feedback.notify(user, FeedbackKey::VesselNoSolvent);
        return MopOutcome::Refused(Refusal::DestinationHasNoReturnable);
    }

    let mut any_moved = false;

    if solvent_from_vessel.volume().is_positive() {
        tool.solution.add(solvent_from_vessel);
        any_moved = true;
    }

    if contaminants_from_tool.volume().is_positive() {
        if vessel.available_volume().is_positive() {
            let fits = contaminants_from_tool.volume().min(vessel.available_volume());
            vessel.add(contaminants_from_tool.split(fits));
            any_moved = true;
        } else {
            // Informational: the solvent return leg may still have landed.
            hooks.feedback.notify(user, FeedbackKey::VesselFull);
        }
        // Whatever did not fit goes back into the tool, never on the floor.
        tool.solution.add(contaminants_from_tool);
    }

    if !any_moved {
        return MopOutcome::NoOp;
    }

    hooks.cooldown.reset();
    hooks.feedback.cue(CueKey::VesselTransfer, None);
    MopOutcome::Transferred
}
