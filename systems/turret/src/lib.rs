#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Support turret deployment, targeting, and fire.
//!
//! Turrets keep their own projectile lists. Their kills pay the enemy's
//! points straight into the score without touching the combo.

use galactic_defender_core::{
    circles_overlap, direction_to, AbilityFlag, DeployError, EnemyId, Event, ParticleRequest,
    TurretId,
};
use galactic_defender_world::{Enemy, Projectile, WorldParts, TURRET_COLOR};
use glam::Vec2;

const PROJECTILE_SIZE: f32 = 4.0;
const KILL_PARTICLES: u32 = 10;

/// Turret system.
#[derive(Debug, Default)]
pub struct Turrets {
    fallen: Vec<usize>,
}

impl Turrets {
    /// Creates the system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys a turret at the player's position.
    ///
    /// The build must own the auto-turret ability, the bay must have room,
    /// and the deployment cooldown must have elapsed. A refused request
    /// leaves the world untouched and is reported through an
    /// [`Event::TurretDeploymentRejected`].
    pub fn deploy(
        &mut self,
        parts: &mut WorldParts<'_>,
        out: &mut Vec<Event>,
    ) -> Result<TurretId, DeployError> {
        let config = &parts.config.turret;
        let verdict = if !parts.stats.has(AbilityFlag::AutoTurret) {
            Err(DeployError::AbilityMissing)
        } else if parts.turrets.len() >= config.max_turrets {
            Err(DeployError::CapacityReached {
                limit: config.max_turrets,
            })
        } else if parts.turrets.deploy_cooldown() > 0 {
            Err(DeployError::CoolingDown {
                ticks: parts.turrets.deploy_cooldown(),
            })
        } else {
            Ok(())
        };

        if let Err(reason) = verdict {
            reject(reason, out);
            return Err(reason);
        }

        let position = parts.player.position();
        let turret = parts.turrets.deploy(position, config);
        tracing::debug!(turret = turret.get(), x = position.x, y = position.y, "turret deployed");
        out.push(Event::TurretDeployed { turret, position });
        Ok(turret)
    }

    /// Moves turret projectiles, resolves their hits, fires, and removes wrecks.
    pub fn handle(&mut self, parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
        parts.turrets.tick_cooldown();
        if parts.turrets.is_empty() {
            return;
        }

        let config = parts.config;
        let width = config.world.width;
        let height = config.world.height;
        let damage = config.turret.projectile_damage * parts.stats.damage_multiplier();

        for turret in parts.turrets.turrets_mut() {
            let enemies = &mut *parts.enemies;
            turret.projectiles_mut().retain_mut(|projectile| {
                projectile.update(&[]);
                if !projectile.is_alive() || !projectile.is_in_bounds(width, height) {
                    return false;
                }
                let struck = enemies.iter_mut().find(|enemy| {
                    !enemy.is_dead()
                        && circles_overlap(
                            projectile.position(),
                            projectile.size(),
                            enemy.position(),
                            enemy.size(),
                        )
                });
                match struck {
                    Some(enemy) => {
                        let _ = enemy.take_damage(projectile.damage());
                        false
                    }
                    None => true,
                }
            });

            if !turret.tick_reload() {
                continue;
            }
            let Some(target) = nearest_target(turret.position(), config.turret.range, enemies)
            else {
                continue;
            };
            let Some(bearing) = direction_to(turret.position(), target) else {
                continue;
            };
            let origin = turret.position();
            turret.projectiles_mut().push(Projectile::new(
                origin,
                bearing * config.turret.projectile_speed,
                PROJECTILE_SIZE,
                TURRET_COLOR,
                damage,
                config.combat.projectile_life,
            ));
            turret.reload(config.turret.fire_interval);
        }

        self.credit_kills(parts, out);

        for turret in parts.turrets.remove_destroyed() {
            tracing::info!(turret = turret.get(), "turret destroyed");
            out.push(Event::TurretDestroyed { turret });
        }
    }

    fn credit_kills(&mut self, parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
        self.fallen.clear();
        self.fallen.extend(
            parts
                .enemies
                .iter()
                .enumerate()
                .filter(|(_, enemy)| enemy.is_dead())
                .map(|(index, _)| index),
        );
        if self.fallen.is_empty() {
            return;
        }

        for &index in &self.fallen {
            let enemy = &parts.enemies[index];
            let score = u64::from(enemy.points());
            let experience = enemy.points() / 2;
            parts.score.score = parts.score.score.saturating_add(score);
            parts.levels.experience = parts.levels.experience.saturating_add(experience);
            parts.waves.record_removal();

            out.push(Event::EnemyKilled {
                enemy: enemy.id(),
                kind: enemy.kind(),
                position: enemy.position(),
                score,
                experience,
            });
            out.push(Event::ParticleBurst(ParticleRequest::burst(
                enemy.position(),
                enemy.color(),
                KILL_PARTICLES,
                4.0,
            )));
        }

        parts.enemies.retain(|enemy| !enemy.is_dead());
    }
}

/// Reports a refused deployment.
pub fn reject(reason: DeployError, out: &mut Vec<Event>) {
    tracing::warn!(%reason, "turret deployment refused");
    out.push(Event::TurretDeploymentRejected { reason });
}

/// Position of the live enemy closest to `origin` within `range`.
///
/// Ties go to the lower enemy identifier.
fn nearest_target(origin: Vec2, range: f32, enemies: &[Enemy]) -> Option<Vec2> {
    let mut best: Option<Candidate> = None;
    for enemy in enemies {
        if enemy.is_dead() {
            continue;
        }
        let distance_sq = enemy.position().distance_squared(origin);
        if distance_sq > range * range {
            continue;
        }

        let current = Candidate {
            distance_sq,
            enemy: enemy.id(),
            position: enemy.position(),
        };
        match &mut best {
            Some(existing) => {
                if current.precedes(existing) {
                    *existing = current;
                }
            }
            None => best = Some(current),
        }
    }
    best.map(|candidate| candidate.position)
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    distance_sq: f32,
    enemy: EnemyId,
    position: Vec2,
}

impl Candidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance_sq != other.distance_sq {
            return self.distance_sq < other.distance_sq;
        }

        self.enemy < other.enemy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galactic_defender_core::{EnemyKind, PlayerClass, UpgradeEffect};
    use galactic_defender_world::{query, SimulationConfig, World};

    fn engineer() -> World {
        World::new(SimulationConfig::default(), PlayerClass::Engineer, 5)
    }

    fn place_enemy(world: &mut World, kind: EnemyKind, position: Vec2) -> EnemyId {
        let mut parts = world.parts();
        let id = parts.enemy_ids.allocate();
        let wave = parts.waves.wave;
        parts.enemies.push(Enemy::spawn(
            id,
            kind,
            position,
            wave,
            &parts.config.difficulty,
        ));
        id
    }

    #[test]
    fn deployment_requires_the_ability() {
        let mut world = World::new(SimulationConfig::default(), PlayerClass::Tank, 5);
        let mut turrets = Turrets::new();
        let mut out = Vec::new();

        let refused = turrets.deploy(&mut world.parts(), &mut out);

        assert_eq!(refused, Err(DeployError::AbilityMissing));
        assert!(query::turrets(&world).is_empty());
        assert_eq!(
            out,
            vec![Event::TurretDeploymentRejected {
                reason: DeployError::AbilityMissing
            }]
        );
    }

    #[test]
    fn engineer_deploys_at_the_player_position() {
        let mut world = engineer();
        let mut turrets = Turrets::new();
        let mut out = Vec::new();

        let deployed = turrets.deploy(&mut world.parts(), &mut out);

        let position = query::player(&world).position();
        assert_eq!(deployed, Ok(TurretId::new(0)));
        assert_eq!(query::turrets(&world).turrets()[0].position(), position);
        assert_eq!(
            out,
            vec![Event::TurretDeployed {
                turret: TurretId::new(0),
                position
            }]
        );
    }

    #[test]
    fn cooldown_and_capacity_limit_deployments() {
        let mut world = engineer();
        let mut turrets = Turrets::new();
        let mut out = Vec::new();
        let cooldown = query::config(&world).turret.deploy_cooldown;

        assert!(turrets.deploy(&mut world.parts(), &mut out).is_ok());
        assert_eq!(
            turrets.deploy(&mut world.parts(), &mut out),
            Err(DeployError::CoolingDown { ticks: cooldown })
        );

        for _ in 0..cooldown {
            world.parts().turrets.tick_cooldown();
        }
        assert!(turrets.deploy(&mut world.parts(), &mut out).is_ok());
        for _ in 0..cooldown {
            world.parts().turrets.tick_cooldown();
        }
        assert_eq!(
            turrets.deploy(&mut world.parts(), &mut out),
            Err(DeployError::CapacityReached { limit: 2 })
        );
    }

    #[test]
    fn nearest_target_breaks_ties_by_identifier() {
        let mut world = engineer();
        let origin = Vec2::new(1000.0, 1000.0);
        let _ = place_enemy(&mut world, EnemyKind::Drone, origin + Vec2::new(0.0, 100.0));
        let _ = place_enemy(&mut world, EnemyKind::Drone, origin + Vec2::new(100.0, 0.0));
        let _ = place_enemy(&mut world, EnemyKind::Drone, origin + Vec2::new(50.0, 0.0));
        let _ = place_enemy(&mut world, EnemyKind::Drone, origin + Vec2::new(400.0, 0.0));

        let enemies = query::enemies(&world);
        assert_eq!(
            nearest_target(origin, 300.0, enemies),
            Some(origin + Vec2::new(50.0, 0.0))
        );
        assert_eq!(
            nearest_target(origin, 120.0, &enemies[..2]),
            Some(origin + Vec2::new(0.0, 100.0))
        );
        assert_eq!(nearest_target(origin, 300.0, &enemies[3..]), None);
    }

    #[test]
    fn turret_fires_at_enemies_in_range_and_reloads() {
        let mut world = engineer();
        let mut turrets = Turrets::new();
        let mut out = Vec::new();
        let _ = turrets.deploy(&mut world.parts(), &mut out);
        let turret = query::turrets(&world).turrets()[0].position();
        let _ = place_enemy(&mut world, EnemyKind::Drone, turret + Vec2::new(200.0, 0.0));

        turrets.handle(&mut world.parts(), &mut out);

        let bay = query::turrets(&world);
        let fired = bay.turrets()[0].projectiles();
        assert_eq!(fired.len(), 1);
        assert!(fired[0].velocity().x > 0.0);
        assert!((fired[0].velocity().length() - 10.0).abs() < 1e-4);
        assert_eq!(bay.turrets()[0].fire_timer(), 30);
    }

    #[test]
    fn turret_kills_pay_points_without_the_combo() {
        let mut world = engineer();
        let mut turrets = Turrets::new();
        let mut out = Vec::new();
        let _ = turrets.deploy(&mut world.parts(), &mut out);
        let turret = query::turrets(&world).turrets()[0].position();
        let id = place_enemy(&mut world, EnemyKind::Drone, turret + Vec2::new(60.0, 0.0));
        world.parts().score.combo = 5;
        {
            let mut parts = world.parts();
            parts.stats.apply(UpgradeEffect::Damage(20.0), parts.player);
            parts.waves.enemies_in_wave = 1;
        }
        let points = query::enemies(&world)[0].points();

        for _ in 0..10 {
            turrets.handle(&mut world.parts(), &mut out);
        }

        assert!(query::enemies(&world).is_empty());
        assert_eq!(query::score(&world).score, u64::from(points));
        assert_eq!(query::score(&world).combo, 5);
        assert_eq!(query::levels(&world).experience, points / 2);
        assert_eq!(query::waves(&world).killed_in_wave, 1);
        assert!(out.iter().any(|event| matches!(
            event,
            Event::EnemyKilled { enemy, .. } if *enemy == id
        )));
    }

    #[test]
    fn wrecked_turrets_are_removed() {
        let mut world = engineer();
        let mut turrets = Turrets::new();
        let mut out = Vec::new();
        let _ = turrets.deploy(&mut world.parts(), &mut out);
        let health = query::config(&world).turret.health;
        let _ = world.parts().turrets.turrets_mut()[0].take_damage(health);
        out.clear();

        turrets.handle(&mut world.parts(), &mut out);

        assert!(query::turrets(&world).is_empty());
        assert_eq!(
            out,
            vec![Event::TurretDestroyed {
                turret: TurretId::new(0)
            }]
        );
    }
}
