//! Integration tests driving the fluid systems through a headless Bevy App.
//!
//! These exercise the full path: `MopAction` event -> dispatch -> transfer
//! engine -> component state, cooldown gating, display refresh, and puddle
//! cleanup, with all plugins installed.

use bevy::prelude::*;

use crate::absorbent::{AbsorbentTool, MopOutcome, Refusal};
use crate::cooldown::DEFAULT_SWING_INTERVAL_TICKS;
use crate::feedback::{CueKey, FeedbackKey};
use crate::puddle::Puddle;
use crate::reagents::ReagentId;
use crate::solution::{FixedVolume, Solution};
use crate::test_harness::TestRig;

fn units(n: i32) -> FixedVolume {
    FixedVolume::from_units(n)
}

fn water_tool_solution(amount: i32) -> Solution {
    let mut solution = Solution::with_capacity(units(50));
    solution.add_reagent(ReagentId::Water, units(amount));
    solution
}

fn oily_spill(water: i32, oil: i32) -> Solution {
    let mut solution = Solution::uncapped();
    solution.add_reagent(ReagentId::Water, units(water));
    solution.add_reagent(ReagentId::Oil, units(oil));
    solution
}

// ===========================================================================
// Puddle interactions end to end
// ===========================================================================

#[test]
fn mop_action_swaps_solvent_for_spill_contaminants() {
    let mut rig = TestRig::new();
    let user = rig.spawn_user();
    let tool = rig.spawn_tool(water_tool_solution(5), units(3));
    let puddle = rig.spawn_puddle(oily_spill(4, 6), IVec2::new(2, 7));

    rig.mop(user, tool, puddle);

    let tool_solution = rig.tool_solution(tool);
    let puddle_solution = rig.puddle_solution(puddle).expect("puddle still has volume");
    assert_eq!(tool_solution.quantity_of(ReagentId::Water), units(2));
    assert_eq!(tool_solution.quantity_of(ReagentId::Oil), units(3));
    assert_eq!(puddle_solution.quantity_of(ReagentId::Water), units(4));
    assert_eq!(puddle_solution.quantity_of(ReagentId::Oil), units(3));
    assert_eq!(rig.log().transferred, 1);
    assert_eq!(rig.log().last, Some(MopOutcome::Transferred));
}

#[test]
fn mop_emits_cue_and_tile_reaction_on_commit() {
    let mut rig = TestRig::new();
    let user = rig.spawn_user();
    let tool = rig.spawn_tool(water_tool_solution(5), units(3));
    let tile = IVec2::new(-1, 4);
    let puddle = rig.spawn_puddle(oily_spill(0, 6), tile);

    rig.mop(user, tool, puddle);

    let cues = rig.drain_cues();
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].cue, CueKey::PuddleSlurp);
    assert_eq!(cues[0].tile, Some(tile));

    let reactions = rig.drain_tile_reactions();
    assert_eq!(reactions.len(), 1);
    assert_eq!(reactions[0].tile, tile);
    assert_eq!(reactions[0].solution.volume(), units(3));
}

#[test]
fn evaporating_spill_reports_feedback_without_mutation() {
    let mut rig = TestRig::new();
    let user = rig.spawn_user();
    let tool = rig.spawn_tool(water_tool_solution(5), units(3));
    let puddle = rig.spawn_puddle(oily_spill(10, 0), IVec2::ZERO);

    rig.mop(user, tool, puddle);

    assert_eq!(
        rig.log().last,
        Some(MopOutcome::Refused(Refusal::AlreadyClearing))
    );
    let feedback = rig.drain_feedback();
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].key, FeedbackKey::PuddleEvaporating);
    assert_eq!(feedback[0].user, user);
    assert_eq!(
        rig.puddle_solution(puddle)
            .expect("puddle untouched")
            .quantity_of(ReagentId::Water),
        units(10)
    );
    assert!(rig.drain_cues().is_empty());
}

// ===========================================================================
// Cooldown gating across ticks
// ===========================================================================

#[test]
fn second_swing_within_cooldown_is_refused() {
    let mut rig = TestRig::new();
    let user = rig.spawn_user();
    let tool = rig.spawn_tool(water_tool_solution(10), units(2));
    let puddle = rig.spawn_puddle(oily_spill(0, 20), IVec2::ZERO);

    rig.mop(user, tool, puddle);
    assert_eq!(rig.log().transferred, 1);

    rig.mop(user, tool, puddle);
    assert_eq!(rig.log().last, Some(MopOutcome::Refused(Refusal::NotReady)));
    assert_eq!(rig.log().transferred, 1);
}

#[test]
fn swing_works_again_after_cooldown_elapses() {
    let mut rig = TestRig::new();
    let user = rig.spawn_user();
    let tool = rig.spawn_tool(water_tool_solution(10), units(2));
    let puddle = rig.spawn_puddle(oily_spill(0, 20), IVec2::ZERO);

    rig.mop(user, tool, puddle);
    rig.tick(DEFAULT_SWING_INTERVAL_TICKS);
    rig.mop(user, tool, puddle);

    assert_eq!(rig.log().transferred, 2);
}

// ===========================================================================
// Vessel interactions end to end
// ===========================================================================

#[test]
fn tool_recharges_from_vessel_and_dumps_contaminants() {
    let mut rig = TestRig::new();
    let user = rig.spawn_user();
    let mut tool_solution = Solution::with_capacity(units(50));
    tool_solution.add_reagent(ReagentId::Oil, units(5));
    let tool = rig.spawn_tool(tool_solution, units(5));

    let mut vessel_solution = Solution::with_capacity(units(10));
    vessel_solution.add_reagent(ReagentId::Water, units(4));
    let vessel = rig.spawn_vessel(vessel_solution);

    rig.mop(user, tool, vessel);

    let tool_after = rig.tool_solution(tool);
    let vessel_after = rig.vessel_solution(vessel);
    assert_eq!(tool_after.quantity_of(ReagentId::Water), units(4));
    assert_eq!(tool_after.quantity_of(ReagentId::Oil), FixedVolume::ZERO);
    assert_eq!(vessel_after.quantity_of(ReagentId::Oil), units(5));
    assert_eq!(rig.log().transferred, 1);

    let cues = rig.drain_cues();
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].cue, CueKey::VesselTransfer);
}

#[test]
fn empty_tool_against_empty_vessel_is_refused() {
    let mut rig = TestRig::new();
    let user = rig.spawn_user();
    let tool = rig.spawn_tool(Solution::with_capacity(units(50)), units(3));
    let vessel = rig.spawn_vessel(Solution::with_capacity(units(10)));

    rig.mop(user, tool, vessel);

    assert_eq!(
        rig.log().last,
        Some(MopOutcome::Refused(Refusal::SourceEmpty))
    );
    assert!(rig.vessel_solution(vessel).is_empty());
}

// ===========================================================================
// Derived state
// ===========================================================================

#[test]
fn display_refreshes_after_transfer_and_stays_stable() {
    let mut rig = TestRig::new();
    let user = rig.spawn_user();
    let tool = rig.spawn_tool(water_tool_solution(5), units(3));
    let puddle = rig.spawn_puddle(oily_spill(0, 6), IVec2::ZERO);

    rig.mop(user, tool, puddle);
    let display = rig.tool_display(tool);
    // Water, contaminant, and free capacity all present after the swap.
    assert_eq!(display.buckets.len(), 3);

    // Nothing changes on an idle tick; the snapshot stays identical.
    rig.tick(1);
    assert_eq!(rig.tool_display(tool), display);
}

#[test]
fn drained_puddles_despawn() {
    let mut rig = TestRig::new();
    let puddle = rig.spawn_puddle(oily_spill(0, 2), IVec2::ZERO);

    // Drain it directly, as evaporation would.
    {
        let mut entity = rig.world_mut().entity_mut(puddle);
        let mut component = entity.get_mut::<Puddle>().expect("puddle exists");
        component.solution.split(units(2));
        assert!(component.solution.volume().is_zero());
    }
    rig.tick(1);

    assert!(!rig.is_alive(puddle));
}

#[test]
fn committed_transfer_keeps_tool_within_capacity() {
    let mut rig = TestRig::new();
    let user = rig.spawn_user();
    let mut tool_solution = Solution::with_capacity(units(10));
    tool_solution.add_reagent(ReagentId::Water, units(10));
    let tool = rig.spawn_tool(tool_solution, units(10));
    let puddle = rig.spawn_puddle(oily_spill(0, 30), IVec2::ZERO);

    rig.mop(user, tool, puddle);

    let tool_after = rig.tool_solution(tool);
    let capacity = tool_after.capacity().expect("tool is capped");
    assert!(tool_after.volume() <= capacity);
    assert_eq!(tool_after.volume(), units(10));
    let tool_component = rig
        .world_mut()
        .get::<AbsorbentTool>(tool)
        .expect("tool exists");
    assert_eq!(tool_component.pickup_amount, units(10));
}
