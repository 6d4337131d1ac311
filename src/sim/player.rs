//! The player character
//!
//! Commands (`jump`, `attack`, `start_block`, ...) are applied before the
//! physics step and never fail: a command that isn't allowed right now is
//! simply ignored. Timers are tick countdowns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::resolve_platforms;
use super::platform::Platform;
use super::rect::Rect;
use crate::consts::*;

/// Per-run stat block, derived from purchased upgrades before the run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub max_health: u32,
    pub damage: u32,
    /// Ticks between swings
    pub attack_cooldown: u32,
    /// Hits the shield absorbs before breaking
    pub block_charges: u32,
    /// Ticks for a broken shield to recharge
    pub block_cooldown: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            max_health: 3,
            damage: 1,
            attack_cooldown: 30,
            block_charges: 1,
            block_cooldown: 180,
        }
    }
}

/// Logical animation state, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAnim {
    Dead,
    Attacking,
    /// Invincibility window after a hit
    Hurt,
    Airborne,
    Running,
    Idle,
}

/// What a damage event did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible, nothing happened
    Ignored,
    /// Shield absorbed it
    Blocked { charges_left: u32 },
    /// Shield absorbed it and broke
    BlockBroken,
    /// Health was lost
    Hurt { amount: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub stats: PlayerStats,
    pub health: u32,
    /// Facing: -1 left, +1 right
    pub direction: i8,
    pub on_ground: bool,
    pub is_jumping: bool,
    pub is_attacking: bool,
    pub is_blocking: bool,
    pub can_block: bool,
    pub block_charges: u32,
    pub block_cooldown: u32,
    pub block_ready_pulse: u32,
    pub attack_cooldown: u32,
    pub invincibility: u32,
    /// Sword hitbox in front of the player, rebuilt every update
    pub attack_box: Rect,
    pub anim: PlayerAnim,
    /// Ticks spent in the current `anim`
    pub anim_ticks: u32,
}

impl Player {
    pub fn new(stats: PlayerStats) -> Self {
        let body = Body::new(
            Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        );
        let mut player = Self {
            body,
            stats,
            health: stats.max_health,
            direction: 1,
            on_ground: false,
            is_jumping: false,
            is_attacking: false,
            is_blocking: false,
            can_block: true,
            block_charges: stats.block_charges,
            block_cooldown: 0,
            block_ready_pulse: 0,
            attack_cooldown: 0,
            invincibility: 0,
            attack_box: Rect::new(0.0, 0.0, ATTACK_BOX_WIDTH, ATTACK_BOX_HEIGHT),
            anim: PlayerAnim::Airborne,
            anim_ticks: 0,
        };
        player.place_attack_box();
        player.anim = player.classify_anim();
        player
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Set horizontal velocity from input (-1, 0, +1); forced to 0 while blocking
    pub fn set_horizontal_intent(&mut self, dir: i8) {
        self.body.vel.x = if self.is_blocking {
            0.0
        } else {
            f32::from(dir.signum()) * PLAYER_SPEED
        };
    }

    /// Start a jump. Returns true if the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping || !self.on_ground || self.is_blocking {
            return false;
        }
        self.body.vel.y = -JUMP_FORCE;
        self.is_jumping = true;
        true
    }

    /// Start a swing. Returns true if the swing happened.
    pub fn attack(&mut self) -> bool {
        if self.attack_cooldown > 0 || self.is_blocking {
            return false;
        }
        self.is_attacking = true;
        self.attack_cooldown = self.stats.attack_cooldown;
        true
    }

    /// Raise the shield. Returns true if the player is now blocking.
    pub fn start_block(&mut self) -> bool {
        if self.can_block {
            self.is_blocking = true;
        }
        self.is_blocking
    }

    pub fn stop_block(&mut self) {
        self.is_blocking = false;
    }

    pub fn set_blocking(&mut self, blocking: bool) {
        if blocking {
            self.start_block();
        } else {
            self.stop_block();
        }
    }

    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.invincibility > 0 {
            return DamageOutcome::Ignored;
        }

        if self.is_blocking {
            self.block_charges = self.block_charges.saturating_sub(1);
            if self.block_charges == 0 {
                self.block_cooldown = self.stats.block_cooldown;
                self.can_block = false;
                self.is_blocking = false;
                return DamageOutcome::BlockBroken;
            }
            return DamageOutcome::Blocked {
                charges_left: self.block_charges,
            };
        }

        self.health = self.health.saturating_sub(amount);
        self.invincibility = INVINCIBILITY_TICKS;
        DamageOutcome::Hurt { amount }
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.stats.max_health);
    }

    /// Gravity is applied at the start of every tick; landing sets `on_ground` again
    pub fn apply_gravity(&mut self) {
        self.body.vel.y += GRAVITY;
        self.on_ground = false;
    }

    /// Integrate and count down timers. Returns true on the tick the shield recharges.
    pub fn update(&mut self) -> bool {
        if self.is_blocking {
            self.body.integrate_vertical();
        } else {
            self.body.integrate();
        }

        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        self.invincibility = self.invincibility.saturating_sub(1);

        let mut block_ready = false;
        if self.block_cooldown > 0 {
            self.block_cooldown -= 1;
            if self.block_cooldown == 0 {
                self.can_block = true;
                self.block_charges = self.stats.block_charges;
                self.block_ready_pulse = BLOCK_READY_PULSE_TICKS;
                block_ready = true;
            }
        } else {
            self.block_ready_pulse = self.block_ready_pulse.saturating_sub(1);
        }

        if !self.is_blocking && self.body.vel.x != 0.0 {
            self.direction = crate::sign(self.body.vel.x);
        }

        self.place_attack_box();

        // The swing is only live for the first few ticks of the cooldown
        let live_until = self
            .stats
            .attack_cooldown
            .saturating_sub(ATTACK_ACTIVE_TICKS);
        if self.attack_cooldown == 0 || self.attack_cooldown < live_until {
            self.is_attacking = false;
        }

        block_ready
    }

    /// Resolve against all platforms; landing clears the jump
    ///
    /// The attack box is rebuilt afterwards so it tracks the corrected body.
    pub fn handle_platforms(&mut self, platforms: &[Platform]) {
        if resolve_platforms(&mut self.body, platforms) {
            self.is_jumping = false;
            self.on_ground = true;
        }
        self.place_attack_box();
    }

    fn place_attack_box(&mut self) {
        self.attack_box.x = if self.direction > 0 {
            self.body.pos.x + self.body.width()
        } else {
            self.body.pos.x - self.attack_box.width
        };
        self.attack_box.y = self.body.pos.y;
    }

    pub fn classify_anim(&self) -> PlayerAnim {
        if self.is_dead() {
            PlayerAnim::Dead
        } else if self.is_attacking {
            PlayerAnim::Attacking
        } else if self.invincibility > 0 {
            PlayerAnim::Hurt
        } else if !self.on_ground {
            PlayerAnim::Airborne
        } else if self.body.vel.x != 0.0 && !self.is_blocking {
            PlayerAnim::Running
        } else {
            PlayerAnim::Idle
        }
    }

    /// Re-evaluate the animation state; the frame counter restarts on change
    pub fn refresh_anim(&mut self) {
        let next = self.classify_anim();
        if next == self.anim {
            self.anim_ticks += 1;
        } else {
            self.anim = next;
            self.anim_ticks = 0;
        }
    }

    /// Fill ratio of the shield recharge indicator (1.0 when ready)
    pub fn block_cooldown_fraction(&self) -> f32 {
        if self.block_cooldown == 0 || self.stats.block_cooldown == 0 {
            return 1.0;
        }
        let remaining = self.block_cooldown.min(self.stats.block_cooldown);
        let elapsed = self.stats.block_cooldown - remaining;
        elapsed as f32 / self.stats.block_cooldown as f32
    }
}
