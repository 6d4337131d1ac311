//! Combat resolution
//!
//! Runs once per tick after everything has moved. All hit tests are strict
//! AABB overlaps. Enemy health may go negative here; [`sweep_dead`] removes
//! the dead afterwards so kills in the same tick are counted together.

use super::enemy::{Enemy, EnemyKind};
use super::player::{DamageOutcome, Player};
use super::projectile::Arrow;
use crate::consts::{ARROW_DAMAGE, ENEMY_HIT_COOLDOWN};

/// What happened during one combat pass
#[derive(Debug, Clone, Default)]
pub struct CombatReport {
    /// Enemies struck by the player's swing
    pub enemies_hit: Vec<u32>,
    /// Damage events that reached the player (ignored hits are left out)
    pub player_damage: Vec<DamageOutcome>,
    /// Arrows that struck the player and were consumed
    pub arrows_spent: Vec<u32>,
}

/// Damage an enemy deals to the player this tick, if its hitbox connects
fn enemy_strike(enemy: &Enemy, player: &Player) -> Option<u32> {
    let target = player.rect();
    match &enemy.kind {
        EnemyKind::Melee(melee) => {
            (melee.is_attacking && melee.attack_box.overlaps(&target)).then_some(melee.damage)
        }
        EnemyKind::Ranged(_) => None,
        EnemyKind::Brute { damage } => enemy.rect().overlaps(&target).then_some(*damage),
    }
}

/// Run every hit test for this tick
pub fn resolve_combat(
    player: &mut Player,
    enemies: &mut [Enemy],
    arrows: &mut Vec<Arrow>,
) -> CombatReport {
    let mut report = CombatReport::default();

    // Player swing -> enemies; one swing may hit any number of them
    if player.is_attacking {
        let damage = i32::try_from(player.stats.damage).unwrap_or(i32::MAX);
        for enemy in enemies.iter_mut() {
            if enemy.hit_cooldown == 0 && player.attack_box.overlaps(&enemy.rect()) {
                enemy.health = enemy.health.saturating_sub(damage);
                enemy.hit_cooldown = ENEMY_HIT_COOLDOWN;
                report.enemies_hit.push(enemy.id);
            }
        }
    }

    // Enemies -> player
    for enemy in enemies.iter() {
        if let Some(amount) = enemy_strike(enemy, player) {
            let outcome = player.take_damage(amount);
            if outcome != DamageOutcome::Ignored {
                report.player_damage.push(outcome);
            }
        }
    }

    // Arrows -> player; a hit consumes the arrow even if the damage is ignored
    let target = player.rect();
    arrows.retain(|arrow| {
        if !arrow.rect().overlaps(&target) {
            return true;
        }
        let outcome = player.take_damage(ARROW_DAMAGE);
        if outcome != DamageOutcome::Ignored {
            report.player_damage.push(outcome);
        }
        report.arrows_spent.push(arrow.id);
        false
    });

    report
}

/// Remove enemies with health <= 0, returning their ids in creation order
pub fn sweep_dead(enemies: &mut Vec<Enemy>) -> Vec<u32> {
    let killed: Vec<u32> = enemies.iter().filter(|e| e.is_dead()).map(|e| e.id).collect();
    if !killed.is_empty() {
        enemies.retain(|e| !e.is_dead());
    }
    killed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::platform::Platform;
    use crate::sim::player::PlayerStats;
    use glam::Vec2;

    /// Player standing on flat ground at x=200, facing right
    fn player() -> Player {
        let mut player = Player::new(PlayerStats::default());
        player.body.pos = Vec2::new(200.0, 452.0);
        player.on_ground = true;
        player.update();
        player
    }

    fn brute_in_swing(player: &Player, id: u32, health: i32) -> Enemy {
        let pos = Vec2::new(player.attack_box.x + 5.0, player.attack_box.y + 5.0);
        Enemy::brute(id, pos, health, 1)
    }

    #[test]
    fn test_swing_hits_every_enemy_in_box_once() {
        let mut player = player();
        let mut enemies = vec![brute_in_swing(&player, 1, 3), brute_in_swing(&player, 2, 3)];
        let mut arrows = Vec::new();
        player.attack();

        let report = resolve_combat(&mut player, &mut enemies, &mut arrows);
        assert_eq!(report.enemies_hit, vec![1, 2]);
        assert!(enemies.iter().all(|e| e.health == 2));
        assert!(enemies.iter().all(|e| e.hit_cooldown == ENEMY_HIT_COOLDOWN));

        // Same swing, next tick: hit cooldown protects them
        let report = resolve_combat(&mut player, &mut enemies, &mut arrows);
        assert!(report.enemies_hit.is_empty());
        assert!(enemies.iter().all(|e| e.health == 2));
    }

    #[test]
    fn test_huge_damage_clamps_instead_of_wrapping() {
        let mut player = Player::new(PlayerStats {
            damage: u32::MAX,
            ..Default::default()
        });
        player.body.pos = Vec2::new(200.0, 452.0);
        player.update();
        let mut enemies = vec![brute_in_swing(&player, 1, 3), brute_in_swing(&player, 2, -4)];
        player.attack();

        let report = resolve_combat(&mut player, &mut enemies, &mut Vec::new());
        assert_eq!(report.enemies_hit, vec![1, 2]);
        assert_eq!(enemies[0].health, 3 - i32::MAX);
        assert_eq!(enemies[1].health, i32::MIN);
        assert_eq!(sweep_dead(&mut enemies), vec![1, 2]);
    }

    #[test]
    fn test_no_swing_no_hit() {
        let mut player = player();
        let mut enemies = vec![brute_in_swing(&player, 1, 3)];
        let report = resolve_combat(&mut player, &mut enemies, &mut Vec::new());
        assert!(report.enemies_hit.is_empty());
        assert_eq!(enemies[0].health, 3);
    }

    #[test]
    fn test_melee_only_hurts_while_attacking() {
        let mut player = player();
        let ledge = Platform::new(1, 150.0, 500.0, 250.0);
        let mut enemies = vec![Enemy::melee(9, &ledge, 2, 60)];
        if let EnemyKind::Melee(m) = &mut enemies[0].kind {
            m.attack_box = player.rect();
        }

        let report = resolve_combat(&mut player, &mut enemies, &mut Vec::new());
        assert!(report.player_damage.is_empty());

        if let EnemyKind::Melee(m) = &mut enemies[0].kind {
            m.is_attacking = true;
        }
        let report = resolve_combat(&mut player, &mut enemies, &mut Vec::new());
        assert_eq!(report.player_damage, vec![DamageOutcome::Hurt { amount: 2 }]);
        assert_eq!(player.health, 1);
    }

    #[test]
    fn test_archer_body_is_harmless() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
        let mut player = player();
        let ledge = Platform::new(1, 150.0, 500.0, 250.0);
        let mut archer = Enemy::ranged(4, &ledge, 1, &mut rng);
        archer.body.pos = player.body.pos;
        let mut enemies = vec![archer];
        let report = resolve_combat(&mut player, &mut enemies, &mut Vec::new());
        assert!(report.player_damage.is_empty());
        assert_eq!(player.health, 3);
    }

    #[test]
    fn test_brute_contact_damage() {
        let mut player = player();
        let mut enemies = vec![Enemy::brute(1, player.body.pos, 5, 2)];
        resolve_combat(&mut player, &mut enemies, &mut Vec::new());
        assert_eq!(player.health, 1);
    }

    #[test]
    fn test_arrow_consumed_even_when_invincible() {
        let mut player = player();
        player.invincibility = 10;
        let mut arrows = vec![
            Arrow::new(5, player.body.pos + Vec2::new(4.0, 10.0), -1),
            Arrow::new(6, Vec2::new(900.0, 0.0), -1),
        ];
        let report = resolve_combat(&mut player, &mut [], &mut arrows);
        assert_eq!(report.arrows_spent, vec![5]);
        assert!(report.player_damage.is_empty());
        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].id, 6);
        assert_eq!(player.health, 3);
    }

    #[test]
    fn test_arrow_spends_block_charge() {
        let mut player = player();
        player.start_block();
        let mut arrows = vec![Arrow::new(5, player.body.pos + Vec2::new(4.0, 10.0), -1)];
        let report = resolve_combat(&mut player, &mut [], &mut arrows);
        assert_eq!(report.player_damage, vec![DamageOutcome::BlockBroken]);
        assert_eq!(player.health, 3);
        assert!(arrows.is_empty());
    }

    #[test]
    fn test_sweep_removes_all_dead_at_once() {
        let mut enemies = vec![
            Enemy::brute(1, Vec2::ZERO, 0, 1),
            Enemy::brute(2, Vec2::ZERO, 2, 1),
            Enemy::brute(3, Vec2::ZERO, -1, 1),
        ];
        let killed = sweep_dead(&mut enemies);
        assert_eq!(killed, vec![1, 3]);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].id, 2);
        assert!(sweep_dead(&mut enemies).is_empty());
    }
}
