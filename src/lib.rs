//! Souls Runner - an endless side-scrolling skeleton-slaying platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, combat, level generation)
//! - `tuning`: Data-driven game balance
//! - `upgrades`: Shop rules that turn purchased upgrades into a player stat block
//!
//! The crate never draws or plays sound. A host calls [`sim::tick`] once per
//! frame and reads positions, logical states and [`sim::GameEvent`]s back out.

pub mod sim;
pub mod tuning;
pub mod upgrades;

pub use tuning::{GeneratorTuning, Tuning, TuningError};
pub use upgrades::{PurchaseError, SoulBank, UpgradeKind, UpgradeLevels, UpgradeTable};

/// Game configuration constants
pub mod consts {
    /// Logical screen size (world units == pixels)
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const JUMP_FORCE: f32 = 15.0;
    /// Added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.7;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT - 200.0;

    /// Ticks of damage immunity after taking a hit
    pub const INVINCIBILITY_TICKS: u32 = 90;
    /// Cosmetic pulse after the shield recharges
    pub const BLOCK_READY_PULSE_TICKS: u32 = 30;
    /// The swing is live for this many ticks of the attack cooldown; the rest is recovery
    pub const ATTACK_ACTIVE_TICKS: u32 = 10;
    pub const ATTACK_BOX_WIDTH: f32 = 50.0;
    pub const ATTACK_BOX_HEIGHT: f32 = 50.0;

    /// Platforms
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const PLATFORM_START_Y: f32 = SCREEN_HEIGHT - 50.0;

    /// Shared enemy envelope
    pub const ENEMY_WIDTH: f32 = 35.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    /// Post-hit invulnerability so one swing lands once
    pub const ENEMY_HIT_COOLDOWN: u32 = 30;

    /// Melee skeleton
    pub const MELEE_ATTACK_RANGE: f32 = 60.0;
    pub const MELEE_ATTACK_BOX_WIDTH: f32 = 50.0;
    pub const MELEE_ATTACK_TICKS: u32 = 1;
    pub const MELEE_PATROL_MARGIN: f32 = 10.0;
    pub const MELEE_BASE_SPEED: f32 = 0.5;
    pub const MELEE_SPEED_PER_LEVEL: f32 = 0.07;

    /// Skeleton archer
    pub const ARCHER_RANGE: f32 = SCREEN_WIDTH / 1.5;
    pub const ARCHER_BASE_COOLDOWN: u32 = 180;
    pub const ARCHER_COOLDOWN_STEP: u32 = 10;
    pub const ARCHER_MAX_COOLDOWN_REDUCTION: u32 = 100;
    /// Random extra ticks on the first shot so archers don't fire in unison
    pub const ARCHER_INITIAL_JITTER: u32 = 50;
    /// Ticks the shooting pose is held after a shot
    pub const ARCHER_SHOOT_POSE_TICKS: u32 = 20;

    /// Arrows
    pub const ARROW_SPEED: f32 = 6.0;
    pub const ARROW_WIDTH: f32 = 15.0;
    pub const ARROW_HEIGHT: f32 = 3.0;
    pub const ARROW_SPAWN_OFFSET_Y: f32 = 15.0;
    pub const ARROW_DAMAGE: u32 = 1;
}

/// Sign of `v` as -1, 0 or +1 (unlike `f32::signum`, zero maps to zero)
#[inline]
pub fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
