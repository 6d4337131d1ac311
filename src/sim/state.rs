//! Run state and core simulation types
//!
//! Everything a run needs lives in [`RunState`], including the RNG, so a
//! serialized snapshot resumes bit-for-bit.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::level_gen::{Chunk, initial_level};
use super::platform::Platform;
use super::player::{Player, PlayerStats};
use super::projectile::Arrow;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Running,
    /// Player died; further ticks are no-ops
    GameOver,
}

/// Things that happened during the last tick, for audio/render hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Attacked,
    PlayerHurt { amount: u32 },
    Blocked { charges_left: u32 },
    BlockBroken,
    BlockReady,
    EnemyHit { id: u32 },
    EnemyKilled { id: u32 },
    ArrowFired { id: u32 },
    ChunkGenerated { platform_id: u32 },
    DifficultyUp { level: u32 },
    FellOut,
    RunEnded { score: u64 },
}

/// Final report handed to the application when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Souls earned this run
    pub score: u64,
    pub ticks: u64,
    pub difficulty: u32,
}

/// Complete run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub player: Player,
    /// Creation order; collision checks walk this order
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub arrows: Vec<Arrow>,
    /// World x of the left screen edge
    pub camera_x: f32,
    pub score: u64,
    /// Difficulty level, starts at 1
    pub difficulty: u32,
    /// Player x at the end of the previous tick, for walk scoring
    pub last_walk_x: f32,
    /// Trailing edge (right x, top y) of the last generated platform
    pub level_tail: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: RunPhase,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl RunState {
    /// Start a run with default balance
    pub fn new(seed: u64, stats: PlayerStats) -> Self {
        Self::with_tuning(seed, stats, Tuning::default())
    }

    pub fn with_tuning(seed: u64, stats: PlayerStats, tuning: Tuning) -> Self {
        let player = Player::new(stats);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            last_walk_x: player.body.pos.x,
            player,
            platforms: Vec::new(),
            enemies: Vec::new(),
            arrows: Vec::new(),
            camera_x: 0.0,
            score: 0,
            difficulty: 1,
            level_tail: Vec2::ZERO,
            time_ticks: 0,
            phase: RunPhase::Running,
            events: Vec::new(),
            next_id: 1,
        };

        let opening = initial_level(&state.tuning, &mut state.rng);
        for chunk in opening {
            state.adopt_chunk(chunk);
        }

        log::info!(
            "Run started: seed={} max_health={} damage={}",
            seed,
            stats.max_health,
            stats.damage
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Give a generated chunk real ids and append it to the level
    ///
    /// Returns the new platform's id.
    pub fn adopt_chunk(&mut self, chunk: Chunk) -> u32 {
        let Chunk {
            mut platform,
            enemy,
        } = chunk;
        platform.id = self.next_entity_id();
        self.level_tail = Vec2::new(platform.right(), platform.top());
        let platform_id = platform.id;
        self.platforms.push(platform);

        if let Some(mut enemy) = enemy {
            enemy.id = self.next_entity_id();
            self.enemies.push(enemy);
        }
        platform_id
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    pub fn outcome(&self) -> RunOutcome {
        RunOutcome {
            score: self.score,
            ticks: self.time_ticks,
            difficulty: self.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyKind;

    #[test]
    fn test_new_run_layout() {
        let state = RunState::new(1, PlayerStats::default());
        assert_eq!(state.platforms.len(), 3);
        assert_eq!(state.enemies.len(), 2);
        assert!(matches!(state.enemies[0].kind, EnemyKind::Melee(_)));
        assert!(matches!(state.enemies[1].kind, EnemyKind::Ranged(_)));
        assert_eq!(state.level_tail, Vec2::new(1050.0, 510.0));
        assert_eq!(state.difficulty, 1);
        assert_eq!(state.phase, RunPhase::Running);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = RunState::new(5, PlayerStats::default());
        let mut ids: Vec<u32> = state.platforms.iter().map(|p| p.id).collect();
        ids.extend(state.enemies.iter().map(|e| e.id));
        ids.push(state.next_entity_id());
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), len);
        assert!(!ids.contains(&0));
    }

    #[test]
    fn test_snapshot_round_trip_keeps_rng() {
        use rand::Rng;

        let mut state = RunState::new(77, PlayerStats::default());
        let json = serde_json::to_string(&state).expect("serializes");
        let mut restored: RunState = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(state.rng.random::<u64>(), restored.rng.random::<u64>());
        assert_eq!(restored.next_entity_id(), state.next_entity_id());
    }
}
