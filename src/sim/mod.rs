//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (timers count ticks, never wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (entities kept in creation order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod level_gen;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{Contact, resolve_platform, resolve_platforms};
pub use combat::{CombatReport, resolve_combat, sweep_dead};
pub use enemy::{ArrowSpawn, Enemy, EnemyAnim, EnemyKind, MeleeState, RangedState};
pub use level_gen::{Chunk, generate_chunk, initial_level, spawn_chance};
pub use platform::Platform;
pub use player::{DamageOutcome, Player, PlayerAnim, PlayerStats};
pub use projectile::Arrow;
pub use rect::Rect;
pub use state::{GameEvent, RunOutcome, RunPhase, RunState};
pub use tick::{TickInput, tick};
