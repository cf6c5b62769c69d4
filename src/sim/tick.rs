//! Fixed timestep simulation tick
//!
//! One tick: detect collisions on a snapshot, let every pair react, step
//! every live entity, then do the frame bookkeeping (frame counter, room
//! countdown). Drawing sits between stepping and bookkeeping and is left to
//! the caller.

use super::collision::{self, CollisionIndex};
use super::entity::{EntityId, StepContext};
use super::state::{GamePhase, GameState};
use crate::input::Buttons;
use crate::renderer::Surface;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, buttons: Buttons) {
    simulate(state, buttons);
    finish_frame(state);
}

/// Collision pass followed by the step pass
pub fn simulate(state: &mut GameState, buttons: Buttons) {
    // Don't tick once the game is over
    if state.is_over() {
        return;
    }

    state.collisions = CollisionIndex::build(&state.entities);
    let commands = collision::resolve(&state.entities, &state.collisions);
    state.apply(commands);

    step_all(state, buttons);
}

/// Step every live entity once, including ones spawned during this pass.
///
/// Ids only grow and the live list stays sorted by id, so a cursor on the
/// last stepped id survives removals anywhere in the list and picks up
/// appended entities.
fn step_all(state: &mut GameState, buttons: Buttons) {
    let mut cursor: Option<EntityId> = None;
    let mut commands = Vec::new();

    loop {
        let next = match cursor {
            None => 0,
            Some(last) => state.entities.partition_point(|e| e.id <= last),
        };
        if next >= state.entities.len() {
            break;
        }
        cursor = Some(state.entities[next].id);

        let ctx = StepContext {
            frames: state.frames,
            buttons,
            player: state.player_target(),
            collisions: &state.collisions,
        };
        state.entities[next].step(&ctx, &mut commands);
        state.apply(commands.drain(..));
    }
}

/// Frame counter and room countdown
pub fn finish_frame(state: &mut GameState) {
    if state.is_over() {
        return;
    }
    state.frames += 1;
    if state.frames % 1000 == 1 {
        log::trace!("frame {}", state.frames);
    }

    if let GamePhase::Clearing { remaining } = &mut state.phase {
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            state.next_room();
        }
    }
}

/// Clear the surface and draw every live entity
pub fn draw(state: &GameState, surface: &mut dyn Surface) {
    surface.clear();
    for entity in &state.entities {
        entity.draw(surface);
    }
}
