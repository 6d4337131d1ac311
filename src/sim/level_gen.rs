//! Procedural level generation
//!
//! Stateless: the next chunk depends only on the tail of the level, the
//! difficulty level and the draws taken from the supplied RNG. Entity ids are
//! left at 0; [`super::state::RunState`] assigns them when it adopts a chunk.

use rand::Rng;

use super::enemy::Enemy;
use super::platform::Platform;
use crate::consts::{PLATFORM_START_Y, SCREEN_HEIGHT};
use crate::tuning::{GeneratorTuning, Tuning};

/// One generated platform and the enemy standing on it, if any
#[derive(Debug, Clone)]
pub struct Chunk {
    pub platform: Platform,
    pub enemy: Option<Enemy>,
}

/// Chance that a fresh platform hosts an enemy at `level`
pub fn spawn_chance(level: u32, g: &GeneratorTuning) -> f32 {
    let bonus = level.saturating_sub(1) as f32 * g.spawn_chance_per_level;
    (g.spawn_chance_base + bonus).min(g.spawn_chance_cap)
}

#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Produce the platform after one ending at (`last_x`, `last_y`)
///
/// Draw order: gap, vertical offset, width, spawn roll, then (on spawn) the
/// melee/archer coin and any archer jitter.
pub fn generate_chunk<R: Rng + ?Sized>(
    last_x: f32,
    last_y: f32,
    difficulty: u32,
    tuning: &Tuning,
    rng: &mut R,
) -> Chunk {
    let g = &tuning.generator;

    let x = last_x + uniform(rng, g.gap_min, g.gap_max);
    let y = (last_y + uniform(rng, g.y_var_min, g.y_var_max))
        .min(SCREEN_HEIGHT - g.band_bottom_margin)
        .max(g.band_top);
    let width = uniform(rng, g.width_min, g.width_max);
    let platform = Platform::new(0, x, y, width);

    let roll = rng.random::<f32>();
    let enemy = if roll < spawn_chance(difficulty, g) && width > g.min_host_width {
        if rng.random::<f32>() < 0.5 {
            Some(Enemy::melee(0, &platform, difficulty, tuning.melee_attack_cooldown))
        } else {
            Some(Enemy::ranged(0, &platform, difficulty, rng))
        }
    } else {
        None
    };

    Chunk { platform, enemy }
}

/// The hand-built opening stretch every run starts on
pub fn initial_level<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Vec<Chunk> {
    let start = Platform::new(0, 50.0, PLATFORM_START_Y, 300.0);
    let guarded = Platform::new(0, 500.0, PLATFORM_START_Y - 20.0, 250.0);
    let perch = Platform::new(0, 850.0, PLATFORM_START_Y - 40.0, 200.0);

    let melee = Enemy::melee(0, &guarded, 1, tuning.melee_attack_cooldown);
    let archer = Enemy::ranged(0, &perch, 1, rng);

    vec![
        Chunk {
            platform: start,
            enemy: None,
        },
        Chunk {
            platform: guarded,
            enemy: Some(melee),
        },
        Chunk {
            platform: perch,
            enemy: Some(archer),
        },
    ]
}
