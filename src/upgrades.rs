//! Upgrade shop
//!
//! Souls earned in runs buy permanent upgrades. Before each run the host
//! turns the purchased levels into a [`PlayerStats`] block; the simulation
//! never sees the shop. Storage is the host's job, so everything here is
//! plain serde data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::PlayerStats;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("need {needed} souls, have {available}")]
    InsufficientSouls { needed: u64, available: u64 },

    #[error("upgrade is already at its limit")]
    MaxedOut,
}

/// The five things the shop sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Health,
    Damage,
    AttackSpeed,
    BlockCharges,
    BlockCooldown,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::Health,
        UpgradeKind::Damage,
        UpgradeKind::AttackSpeed,
        UpgradeKind::BlockCharges,
        UpgradeKind::BlockCooldown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UpgradeKind::Health => "Max health",
            UpgradeKind::Damage => "Sword damage",
            UpgradeKind::AttackSpeed => "Attack speed",
            UpgradeKind::BlockCharges => "Block charges",
            UpgradeKind::BlockCooldown => "Block recharge",
        }
    }
}

/// How a stat moves with its upgrade level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Growth {
    /// base + level
    Additive,
    /// max(min, base - level * step)
    Decreasing { step: u32, min: u32 },
}

/// Price and effect of one upgrade line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRule {
    pub base: u32,
    /// Price of the first level
    pub cost: u64,
    /// Price multiplier per level already owned
    pub cost_increase: f64,
    pub growth: Growth,
}

impl UpgradeRule {
    const fn additive(base: u32, cost: u64, cost_increase: f64) -> Self {
        Self {
            base,
            cost,
            cost_increase,
            growth: Growth::Additive,
        }
    }

    const fn decreasing(base: u32, cost: u64, cost_increase: f64, step: u32, min: u32) -> Self {
        Self {
            base,
            cost,
            cost_increase,
            growth: Growth::Decreasing { step, min },
        }
    }

    /// Stat value at `level`
    pub fn value(&self, level: u32) -> u32 {
        match self.growth {
            Growth::Additive => self.base.saturating_add(level),
            Growth::Decreasing { step, min } => self
                .base
                .saturating_sub(level.saturating_mul(step))
                .max(min),
        }
    }

    /// Price of going from `level` to `level + 1`
    pub fn cost(&self, level: u32) -> u64 {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        (self.cost as f64 * self.cost_increase.powi(level)).floor() as u64
    }

    /// Another level would not change the stat
    pub fn is_maxed(&self, level: u32) -> bool {
        match self.growth {
            Growth::Additive => false,
            Growth::Decreasing { min, .. } => self.value(level) <= min,
        }
    }
}

/// Shop price list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTable {
    pub health: UpgradeRule,
    pub damage: UpgradeRule,
    pub attack_speed: UpgradeRule,
    pub block_charges: UpgradeRule,
    pub block_cooldown: UpgradeRule,
}

impl Default for UpgradeTable {
    fn default() -> Self {
        Self {
            health: UpgradeRule::additive(3, 2500, 2.2),
            damage: UpgradeRule::additive(1, 5000, 2.5),
            attack_speed: UpgradeRule::decreasing(30, 4000, 2.6, 2, 10),
            block_charges: UpgradeRule::additive(1, 2000, 2.8),
            block_cooldown: UpgradeRule::decreasing(180, 2000, 2.3, 15, 60),
        }
    }
}

impl UpgradeTable {
    pub fn rule(&self, kind: UpgradeKind) -> &UpgradeRule {
        match kind {
            UpgradeKind::Health => &self.health,
            UpgradeKind::Damage => &self.damage,
            UpgradeKind::AttackSpeed => &self.attack_speed,
            UpgradeKind::BlockCharges => &self.block_charges,
            UpgradeKind::BlockCooldown => &self.block_cooldown,
        }
    }

    /// Stat block for a run with the given purchases
    pub fn stats(&self, levels: &UpgradeLevels) -> PlayerStats {
        PlayerStats {
            max_health: self.health.value(levels.health),
            damage: self.damage.value(levels.damage),
            attack_cooldown: self.attack_speed.value(levels.attack_speed),
            block_charges: self.block_charges.value(levels.block_charges),
            block_cooldown: self.block_cooldown.value(levels.block_cooldown),
        }
    }
}

/// Purchased level of every upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeLevels {
    pub health: u32,
    pub damage: u32,
    pub attack_speed: u32,
    pub block_charges: u32,
    pub block_cooldown: u32,
}

impl UpgradeLevels {
    pub fn get(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Health => self.health,
            UpgradeKind::Damage => self.damage,
            UpgradeKind::AttackSpeed => self.attack_speed,
            UpgradeKind::BlockCharges => self.block_charges,
            UpgradeKind::BlockCooldown => self.block_cooldown,
        }
    }

    fn get_mut(&mut self, kind: UpgradeKind) -> &mut u32 {
        match kind {
            UpgradeKind::Health => &mut self.health,
            UpgradeKind::Damage => &mut self.damage,
            UpgradeKind::AttackSpeed => &mut self.attack_speed,
            UpgradeKind::BlockCharges => &mut self.block_charges,
            UpgradeKind::BlockCooldown => &mut self.block_cooldown,
        }
    }
}

/// Persistent currency and purchases across runs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SoulBank {
    pub souls: u64,
    pub levels: UpgradeLevels,
}

impl SoulBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank a finished run's score
    pub fn deposit(&mut self, score: u64) {
        self.souls = self.souls.saturating_add(score);
        log::info!("Banked {} souls ({} total)", score, self.souls);
    }

    /// Price of the next level of `kind`
    pub fn next_cost(&self, kind: UpgradeKind, table: &UpgradeTable) -> u64 {
        table.rule(kind).cost(self.levels.get(kind))
    }

    /// Buy one level of `kind`. Returns the souls left over.
    pub fn purchase(
        &mut self,
        kind: UpgradeKind,
        table: &UpgradeTable,
    ) -> Result<u64, PurchaseError> {
        let rule = table.rule(kind);
        let level = self.levels.get(kind);
        if rule.is_maxed(level) {
            return Err(PurchaseError::MaxedOut);
        }
        let needed = rule.cost(level);
        if self.souls < needed {
            return Err(PurchaseError::InsufficientSouls {
                needed,
                available: self.souls,
            });
        }

        self.souls -= needed;
        *self.levels.get_mut(kind) += 1;
        log::info!(
            "Bought {} level {} for {} souls",
            kind.label(),
            level + 1,
            needed
        );
        Ok(self.souls)
    }

    pub fn stats(&self, table: &UpgradeTable) -> PlayerStats {
        table.stats(&self.levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_stats_match_player_defaults() {
        let stats = UpgradeTable::default().stats(&UpgradeLevels::default());
        assert_eq!(stats, PlayerStats::default());
    }

    #[test]
    fn test_cost_curve() {
        let table = UpgradeTable::default();
        assert_eq!(table.health.cost(0), 2500);
        assert_eq!(table.health.cost(1), 5500);
        assert_eq!(table.health.cost(2), 12100);
        assert_eq!(table.damage.cost(1), 12500);
        assert_eq!(table.damage.cost(2), 31250);
    }

    #[test]
    fn test_decreasing_stats_floor() {
        let table = UpgradeTable::default();
        assert_eq!(table.attack_speed.value(5), 20);
        assert_eq!(table.attack_speed.value(10), 10);
        assert_eq!(table.attack_speed.value(50), 10);
        assert!(table.attack_speed.is_maxed(10));
        assert!(!table.attack_speed.is_maxed(9));
        assert_eq!(table.block_cooldown.value(8), 60);
        assert!(!table.health.is_maxed(1000));
    }

    #[test]
    fn test_purchase_spends_and_levels() {
        let table = UpgradeTable::default();
        let mut bank = SoulBank::new();
        bank.deposit(3000);
        assert_eq!(bank.purchase(UpgradeKind::Health, &table), Ok(500));
        assert_eq!(bank.levels.health, 1);
        assert_eq!(bank.stats(&table).max_health, 4);
        assert_eq!(bank.next_cost(UpgradeKind::Health, &table), 5500);
    }

    #[test]
    fn test_purchase_insufficient() {
        let table = UpgradeTable::default();
        let mut bank = SoulBank {
            souls: 100,
            ..Default::default()
        };
        assert_eq!(
            bank.purchase(UpgradeKind::Damage, &table),
            Err(PurchaseError::InsufficientSouls {
                needed: 5000,
                available: 100
            })
        );
        assert_eq!(bank.souls, 100);
        assert_eq!(bank.levels.damage, 0);
    }

    #[test]
    fn test_purchase_maxed() {
        let table = UpgradeTable::default();
        let mut bank = SoulBank {
            souls: u64::MAX,
            levels: UpgradeLevels {
                block_cooldown: 8,
                ..Default::default()
            },
        };
        assert_eq!(
            bank.purchase(UpgradeKind::BlockCooldown, &table),
            Err(PurchaseError::MaxedOut)
        );
        assert_eq!(bank.souls, u64::MAX);
    }

    #[test]
    fn test_bank_serde_round_trip() {
        let bank = SoulBank {
            souls: 1234,
            levels: UpgradeLevels {
                damage: 2,
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&bank).expect("serializes");
        let back: SoulBank = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, bank);
    }
}
