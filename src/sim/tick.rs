//! Fixed timestep simulation tick
//!
//! Core game loop that advances a run deterministically. The step order is
//! fixed: player commands, gravity, player integration and platform
//! collision, enemies, arrows, combat, death sweep, camera, difficulty, walk
//! score, level generation, culling, fall damage, termination.

use super::combat::{resolve_combat, sweep_dead};
use super::level_gen::generate_chunk;
use super::player::DamageOutcome;
use super::projectile::Arrow;
use super::state::{GameEvent, RunOutcome, RunPhase, RunState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// -1 left, 0 stop, +1 right
    pub horizontal: i8,
    pub jump: bool,
    pub attack: bool,
    pub start_block: bool,
    pub stop_block: bool,
}

fn damage_event(outcome: DamageOutcome) -> Option<GameEvent> {
    match outcome {
        DamageOutcome::Ignored => None,
        DamageOutcome::Blocked { charges_left } => Some(GameEvent::Blocked { charges_left }),
        DamageOutcome::BlockBroken => {
            log::debug!("Block broken");
            Some(GameEvent::BlockBroken)
        }
        DamageOutcome::Hurt { amount } => Some(GameEvent::PlayerHurt { amount }),
    }
}

/// Advance the run by one tick
///
/// Returns the outcome on the tick the player dies. Ticks after that are
/// no-ops.
pub fn tick(state: &mut RunState, input: &TickInput) -> Option<RunOutcome> {
    if state.phase == RunPhase::GameOver {
        return None;
    }
    state.events.clear();
    state.time_ticks += 1;

    // Player commands
    let player = &mut state.player;
    if input.stop_block {
        player.stop_block();
    }
    if input.start_block {
        player.start_block();
    }
    player.set_horizontal_intent(input.horizontal);
    if input.jump && player.jump() {
        state.events.push(GameEvent::Jumped);
    }
    if input.attack && player.attack() {
        state.events.push(GameEvent::Attacked);
    }

    // Player physics
    player.apply_gravity();
    if player.update() {
        state.events.push(GameEvent::BlockReady);
    }
    player.handle_platforms(&state.platforms);

    // Enemies see the player's post-movement box
    let target = state.player.rect();
    let spawns: Vec<_> = state
        .enemies
        .iter_mut()
        .filter_map(|enemy| enemy.update(&target))
        .collect();
    for spawn in spawns {
        let id = state.next_entity_id();
        state.arrows.push(Arrow::new(id, spawn.origin, spawn.direction));
        state.events.push(GameEvent::ArrowFired { id });
    }

    for arrow in &mut state.arrows {
        arrow.update();
    }

    // Combat
    let report = resolve_combat(&mut state.player, &mut state.enemies, &mut state.arrows);
    state
        .events
        .extend(report.enemies_hit.iter().map(|&id| GameEvent::EnemyHit { id }));
    state
        .events
        .extend(report.player_damage.into_iter().filter_map(damage_event));

    // Death sweep
    let killed = sweep_dead(&mut state.enemies);
    if !killed.is_empty() {
        let kills = killed.len() as u32;
        state.player.heal(kills.saturating_mul(state.tuning.kill_heal));
        state.score += u64::from(kills) * state.tuning.kill_reward;
        state
            .events
            .extend(killed.into_iter().map(|id| GameEvent::EnemyKilled { id }));
    }

    // Camera keeps the player a third of the way in
    let player_x = state.player.body.pos.x;
    state.camera_x = player_x - SCREEN_WIDTH / 3.0;

    // Difficulty
    let level = u32::try_from(state.score / state.tuning.score_per_difficulty)
        .unwrap_or(u32::MAX)
        .saturating_add(1);
    if level != state.difficulty {
        log::info!("Difficulty {} -> {} at score {}", state.difficulty, level, state.score);
        state.difficulty = level;
        state.events.push(GameEvent::DifficultyUp { level });
    }

    // Walk score: one point per newly entered distance bin
    let bin = state.tuning.walk_bin_width;
    let bins = (player_x / bin).floor() as i64 - (state.last_walk_x / bin).floor() as i64;
    if bins > 0 {
        state.score += bins as u64;
    }
    state.last_walk_x = player_x;

    // Level generation, at most one chunk per tick
    if player_x > state.level_tail.x - SCREEN_WIDTH {
        let chunk = generate_chunk(
            state.level_tail.x,
            state.level_tail.y,
            state.difficulty,
            &state.tuning,
            &mut state.rng,
        );
        let platform_id = state.adopt_chunk(chunk);
        log::debug!(
            "Generated platform {} ending at {:.0}",
            platform_id,
            state.level_tail.x
        );
        state.events.push(GameEvent::ChunkGenerated { platform_id });
    }

    // Culling
    let camera_x = state.camera_x;
    state.platforms.retain(|p| p.right() > camera_x);
    state.enemies.retain(|e| e.rect().right() > camera_x);
    state.arrows.retain(|a| a.in_window(camera_x, SCREEN_WIDTH));

    // Falling off the bottom goes through the normal damage rules
    if state.player.body.pos.y > SCREEN_HEIGHT + state.player.body.height() {
        state.events.push(GameEvent::FellOut);
        let outcome = state.player.take_damage(state.tuning.fall_damage);
        state.events.extend(damage_event(outcome));
    }

    state.player.refresh_anim();

    if state.player.is_dead() {
        state.phase = RunPhase::GameOver;
        let outcome = state.outcome();
        state.events.push(GameEvent::RunEnded {
            score: outcome.score,
        });
        log::info!(
            "Run ended: score={} ticks={} difficulty={}",
            outcome.score,
            outcome.ticks,
            outcome.difficulty
        );
        return Some(outcome);
    }

    None
}
