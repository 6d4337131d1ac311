//! Skeleton enemies
//!
//! One shared envelope (body, health, hit flash) plus a per-variant state
//! block. Behavior dispatches on [`EnemyKind`]; there is no trait object.
//! Stats are fixed at spawn from the difficulty level of that moment.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::platform::Platform;
use super::rect::Rect;
use crate::consts::*;

/// Melee skeleton: patrols its ledge, swings when the player gets close
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeState {
    pub patrol_start: f32,
    pub patrol_end: f32,
    pub speed: f32,
    pub direction: i8,
    pub damage: u32,
    pub attack_range: f32,
    pub attack_box: Rect,
    pub is_attacking: bool,
    /// Ticks into the current swing
    pub attack_ticks: u32,
    pub attack_cooldown: u32,
    /// Cooldown applied after each swing
    pub attack_cooldown_time: u32,
}

/// Skeleton archer: stands still, fires arrows at the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangedState {
    pub shoot_cooldown_time: u32,
    pub shoot_cooldown: u32,
    pub facing: i8,
    /// Cosmetic: ticks left in the shooting pose
    pub shoot_pose: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EnemyKind {
    Melee(MeleeState),
    Ranged(RangedState),
    /// Generic bruiser that hurts on touch
    Brute { damage: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyAnim {
    Hurt,
    Attacking,
    Shooting,
    Walking,
    Idle,
}

/// An arrow an archer wants to loose this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowSpawn {
    pub origin: Vec2,
    pub direction: i8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    /// May dip below zero between the hit tests and the death sweep
    pub health: i32,
    pub max_health: i32,
    /// Post-hit invulnerability / flash
    pub hit_cooldown: u32,
    /// Difficulty level at spawn
    pub level: u32,
    pub kind: EnemyKind,
    pub anim: EnemyAnim,
    pub anim_ticks: u32,
}

/// Melee health: 2, +1 every 3 difficulty levels
pub fn melee_health(level: u32) -> i32 {
    2 + (level / 3) as i32
}

/// Archers are about half as tough as melee skeletons, never below 1
pub fn ranged_health(level: u32) -> i32 {
    ((melee_health(level) + 1) / 2).max(1)
}

pub fn melee_speed(level: u32) -> f32 {
    MELEE_BASE_SPEED + level.saturating_sub(1) as f32 * MELEE_SPEED_PER_LEVEL
}

pub fn melee_damage(level: u32) -> u32 {
    level.max(1)
}

/// Ticks between arrows; shrinks with difficulty down to a floor
pub fn archer_cooldown(level: u32) -> u32 {
    let reduction = level
        .saturating_sub(1)
        .saturating_mul(ARCHER_COOLDOWN_STEP)
        .min(ARCHER_MAX_COOLDOWN_REDUCTION);
    ARCHER_BASE_COOLDOWN - reduction
}

/// Top-left spot that centers an enemy on a platform
fn spawn_pos(platform: &Platform) -> Vec2 {
    Vec2::new(
        platform.left() + platform.width() / 2.0 - ENEMY_WIDTH / 2.0,
        platform.top() - ENEMY_HEIGHT,
    )
}

impl Enemy {
    fn with_kind(id: u32, pos: Vec2, health: i32, level: u32, kind: EnemyKind) -> Self {
        let anim = match kind {
            EnemyKind::Melee(_) => EnemyAnim::Walking,
            _ => EnemyAnim::Idle,
        };
        Self {
            id,
            body: Body::new(pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT)),
            health,
            max_health: health,
            hit_cooldown: 0,
            level,
            kind,
            anim,
            anim_ticks: 0,
        }
    }

    /// Melee skeleton centered on `platform`, patrolling its span
    pub fn melee(id: u32, platform: &Platform, level: u32, attack_cooldown_time: u32) -> Self {
        let state = MeleeState {
            patrol_start: platform.left() + MELEE_PATROL_MARGIN,
            patrol_end: platform.right() - ENEMY_WIDTH - MELEE_PATROL_MARGIN,
            speed: melee_speed(level),
            direction: -1,
            damage: melee_damage(level),
            attack_range: MELEE_ATTACK_RANGE,
            attack_box: Rect::new(0.0, 0.0, MELEE_ATTACK_BOX_WIDTH, ENEMY_HEIGHT),
            is_attacking: false,
            attack_ticks: 0,
            attack_cooldown: 0,
            attack_cooldown_time,
        };
        let mut enemy = Self::with_kind(
            id,
            spawn_pos(platform),
            melee_health(level),
            level,
            EnemyKind::Melee(state),
        );
        enemy.place_attack_box();
        enemy
    }

    /// Archer centered on `platform`; the first shot is jittered by `rng`
    pub fn ranged<R: Rng + ?Sized>(id: u32, platform: &Platform, level: u32, rng: &mut R) -> Self {
        let shoot_cooldown_time = archer_cooldown(level);
        let state = RangedState {
            shoot_cooldown_time,
            shoot_cooldown: shoot_cooldown_time + rng.random_range(0..ARCHER_INITIAL_JITTER),
            facing: -1,
            shoot_pose: 0,
        };
        Self::with_kind(
            id,
            spawn_pos(platform),
            ranged_health(level),
            level,
            EnemyKind::Ranged(state),
        )
    }

    pub fn brute(id: u32, pos: Vec2, health: i32, damage: u32) -> Self {
        Self::with_kind(id, pos, health, 1, EnemyKind::Brute { damage })
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// For health bars
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health.max(0) as f32 / self.max_health as f32
    }

    /// Advance one tick against the player's current box
    ///
    /// Returns an arrow to spawn when an archer fires.
    pub fn update(&mut self, player: &Rect) -> Option<ArrowSpawn> {
        self.hit_cooldown = self.hit_cooldown.saturating_sub(1);

        let spawn = match &mut self.kind {
            EnemyKind::Melee(melee) => {
                update_melee(melee, &mut self.body, player);
                None
            }
            EnemyKind::Ranged(ranged) => update_ranged(ranged, &self.body, player),
            EnemyKind::Brute { .. } => None,
        };

        self.place_attack_box();
        self.refresh_anim();
        spawn
    }

    fn place_attack_box(&mut self) {
        if let EnemyKind::Melee(melee) = &mut self.kind {
            melee.attack_box.x = if melee.direction > 0 {
                self.body.pos.x + self.body.width()
            } else {
                self.body.pos.x - melee.attack_box.width
            };
            melee.attack_box.y = self.body.pos.y;
        }
    }

    pub fn classify_anim(&self) -> EnemyAnim {
        if self.hit_cooldown > 0 {
            return EnemyAnim::Hurt;
        }
        match &self.kind {
            EnemyKind::Melee(melee) if melee.is_attacking => EnemyAnim::Attacking,
            EnemyKind::Melee(_) if self.body.vel.x != 0.0 => EnemyAnim::Walking,
            EnemyKind::Ranged(ranged) if ranged.shoot_pose > 0 => EnemyAnim::Shooting,
            _ => EnemyAnim::Idle,
        }
    }

    fn refresh_anim(&mut self) {
        let next = self.classify_anim();
        if next == self.anim {
            self.anim_ticks += 1;
        } else {
            self.anim = next;
            self.anim_ticks = 0;
        }
    }
}

fn update_melee(melee: &mut MeleeState, body: &mut Body, player: &Rect) {
    melee.attack_cooldown = melee.attack_cooldown.saturating_sub(1);
    body.vel.x = 0.0;

    let delta = player.center() - body.center();
    let dx = delta.x;
    let dy = delta.y.abs();

    if melee.is_attacking {
        melee.attack_ticks += 1;
        if melee.attack_ticks >= MELEE_ATTACK_TICKS {
            melee.is_attacking = false;
            melee.attack_ticks = 0;
            melee.attack_cooldown = melee.attack_cooldown_time;
        }
    } else if dx.abs() < melee.attack_range && dy < body.height() {
        let toward = crate::sign(dx);
        if toward != 0 {
            melee.direction = toward;
        }
        if melee.attack_cooldown == 0 {
            melee.is_attacking = true;
            melee.attack_ticks = 0;
        }
    } else {
        body.vel.x = melee.speed * f32::from(melee.direction);
        body.integrate();

        if body.pos.x <= melee.patrol_start && melee.direction < 0 {
            body.pos.x = melee.patrol_start;
            melee.direction = 1;
        } else if body.pos.x >= melee.patrol_end && melee.direction > 0 {
            body.pos.x = melee.patrol_end;
            melee.direction = -1;
        }
    }
}

fn update_ranged(ranged: &mut RangedState, body: &Body, player: &Rect) -> Option<ArrowSpawn> {
    ranged.shoot_cooldown = ranged.shoot_cooldown.saturating_sub(1);
    ranged.shoot_pose = ranged.shoot_pose.saturating_sub(1);

    let dx = player.left() - body.pos.x;
    let toward = crate::sign(dx);
    if toward != 0 {
        ranged.facing = toward;
    }

    if ranged.shoot_cooldown == 0 && dx.abs() < ARCHER_RANGE {
        ranged.shoot_cooldown = ranged.shoot_cooldown_time;
        ranged.shoot_pose = ARCHER_SHOOT_POSE_TICKS;
        return Some(ArrowSpawn {
            origin: Vec2::new(body.pos.x, body.pos.y + ARROW_SPAWN_OFFSET_Y),
            direction: ranged.facing,
        });
    }
    None
}
