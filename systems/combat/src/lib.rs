#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision detection and damage application for a single tick.
//!
//! The resolver runs after the enemy behaviors. It advances the player's
//! projectiles, resolves projectile hits with their modifiers, applies dash
//! damage, and settles contacts between enemies and the player or its
//! turrets. Enemies and projectiles are only marked during the visiting
//! passes; removal happens in one sweep at the end, so every live entity is
//! visited exactly once per tick.

use galactic_defender_core::{circles_overlap, AbilityFlag, Color, Event, ParticleRequest};
use galactic_defender_world::{Enemy, WorldParts};
use glam::Vec2;
use rand::Rng;

const EXPLOSION_COLOR: Color = Color::from_rgb(255, 136, 0);
const HIT_PARTICLES: u32 = 4;
const KILL_PARTICLES: u32 = 15;
const EXPLOSION_PARTICLES: u32 = 20;
const EXPLOSION_SHAKE: f32 = 5.0;
const CONTACT_SHAKE: f32 = 8.0;

/// Why an enemy left the field this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Removal {
    /// Destroyed by the player; awards score and experience.
    Credited,
    /// Destroyed on contact without credit.
    Rammed,
}

/// Resolves every collision of a tick.
#[derive(Debug, Default)]
pub struct CombatResolver {
    targets: Vec<Vec2>,
    spent: Vec<bool>,
    removals: Vec<Option<Removal>>,
}

impl CombatResolver {
    /// Creates the resolver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the collision passes and applies their consequences.
    pub fn handle(&mut self, parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
        self.removals.clear();
        self.removals.resize(parts.enemies.len(), None);

        self.advance_projectiles(parts);
        self.resolve_projectile_hits(parts, out);
        resolve_dash_damage(parts, out);
        self.credit_depleted(parts);
        self.resolve_player_contacts(parts, out);
        self.resolve_turret_contacts(parts, out);
        self.sweep(parts, out);
    }

    fn advance_projectiles(&mut self, parts: &mut WorldParts<'_>) {
        self.targets.clear();
        self.targets.extend(parts.enemies.iter().map(Enemy::position));

        let world = &parts.config.world;
        self.spent.clear();
        for projectile in parts.projectiles.iter_mut() {
            projectile.update(&self.targets);
            let gone = !projectile.is_alive() || !projectile.is_in_bounds(world.width, world.height);
            self.spent.push(gone);
        }
    }

    fn resolve_projectile_hits(&mut self, parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
        let combat = &parts.config.combat;
        let rage_active = parts.stats.has(AbilityFlag::RageMode)
            && parts.player.health_fraction() < combat.rage_health_fraction;

        for (index, projectile) in parts.projectiles.iter_mut().enumerate() {
            if self.spent[index] {
                continue;
            }

            for target in 0..parts.enemies.len() {
                let enemy = &parts.enemies[target];
                if enemy.is_dead()
                    || projectile.has_struck(enemy.id())
                    || !circles_overlap(
                        projectile.position(),
                        projectile.size(),
                        enemy.position(),
                        enemy.size(),
                    )
                {
                    continue;
                }

                let mut damage = projectile.damage();
                if roll(parts.rng, parts.stats.critical_chance()) {
                    damage *= combat.critical_multiplier;
                }
                if projectile.travelled() > combat.ranged_bonus_distance {
                    damage *= combat.ranged_bonus_multiplier;
                }
                if rage_active {
                    damage *= 1.0 + parts.stats.rage_damage();
                }

                let enemy = &mut parts.enemies[target];
                let executable = enemy.health_fraction() <= combat.headshot_health_fraction;
                if executable && roll(parts.rng, parts.stats.headshot_chance()) {
                    enemy.destroy();
                } else {
                    let _ = enemy.take_damage(damage);
                }
                projectile.record_strike(enemy.id());
                out.push(Event::ParticleBurst(ParticleRequest::burst(
                    projectile.position(),
                    enemy.color(),
                    HIT_PARTICLES,
                    2.0,
                )));

                if projectile.is_explosive() {
                    explode(
                        parts.enemies,
                        target,
                        projectile.position(),
                        combat.explosion_radius,
                        damage * combat.explosion_damage_fraction,
                        out,
                    );
                }

                if !projectile.is_piercing() {
                    self.spent[index] = true;
                    break;
                }
            }
        }
    }

    fn credit_depleted(&mut self, parts: &mut WorldParts<'_>) {
        for (index, enemy) in parts.enemies.iter().enumerate() {
            if enemy.is_dead() && self.removals[index].is_none() {
                self.removals[index] = Some(Removal::Credited);
            }
        }
    }

    fn resolve_player_contacts(&mut self, parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
        let config = parts.config;
        for (index, enemy) in parts.enemies.iter_mut().enumerate() {
            if self.removals[index].is_some()
                || !circles_overlap(
                    parts.player.position(),
                    parts.player.size(),
                    enemy.position(),
                    enemy.size(),
                )
            {
                continue;
            }

            enemy.destroy();
            let thorns = parts.stats.has(AbilityFlag::Thorns);
            self.removals[index] = Some(if thorns {
                Removal::Credited
            } else {
                Removal::Rammed
            });

            if parts.player.stealth_timer() > 0 {
                continue;
            }

            let mut damage = enemy.damage() * (1.0 - parts.stats.damage_reduction());
            if parts.stats.has(AbilityFlag::FortressMode) && !parts.player.moved_this_tick() {
                damage *= config.combat.fortress_stationary_factor;
            }
            if parts.player.take_damage(damage, &config.player) {
                out.push(Event::PlayerDamaged {
                    amount: damage,
                    health: parts.player.health(),
                    shield: parts.player.shield(),
                });
                out.push(Event::ScreenShake {
                    intensity: CONTACT_SHAKE,
                });
            }
        }
    }

    fn resolve_turret_contacts(&mut self, parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
        for turret in parts.turrets.turrets_mut() {
            for (index, enemy) in parts.enemies.iter_mut().enumerate() {
                if self.removals[index].is_some()
                    || !circles_overlap(
                        turret.position(),
                        turret.size(),
                        enemy.position(),
                        enemy.size(),
                    )
                {
                    continue;
                }
                let _ = turret.take_damage(enemy.damage());
                enemy.destroy();
                self.removals[index] = Some(Removal::Rammed);
                out.push(Event::ParticleBurst(ParticleRequest::burst(
                    enemy.position(),
                    enemy.color(),
                    KILL_PARTICLES,
                    4.0,
                )));
            }
        }
    }

    fn sweep(&mut self, parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
        let combat = &parts.config.combat;
        for (index, enemy) in parts.enemies.iter().enumerate() {
            let Some(removal) = self.removals[index] else {
                continue;
            };
            parts.waves.record_removal();

            match removal {
                Removal::Rammed => out.push(Event::EnemyRammed {
                    enemy: enemy.id(),
                    kind: enemy.kind(),
                }),
                Removal::Credited => {
                    let awarded =
                        u64::from(enemy.points()) * u64::from(parts.score.combo.max(1));
                    let experience = u32::try_from(awarded / 2).unwrap_or(u32::MAX);

                    parts.score.score = parts.score.score.saturating_add(awarded);
                    parts.levels.experience = parts.levels.experience.saturating_add(experience);
                    parts
                        .score
                        .register_kill(combat.combo_max, combat.combo_window);

                    if parts.stats.has(AbilityFlag::Vampiric) {
                        parts.player.heal(combat.vampiric_heal);
                    }
                    if parts.stats.has(AbilityFlag::Bloodlust) {
                        parts.score.bloodlust_timer = combat.bloodlust_duration;
                    }
                    if parts.stats.has(AbilityFlag::Rampage) {
                        parts
                            .player
                            .shorten_dash_cooldown(combat.rampage_cooldown_cut);
                    }

                    out.push(Event::EnemyKilled {
                        enemy: enemy.id(),
                        kind: enemy.kind(),
                        position: enemy.position(),
                        score: awarded,
                        experience,
                    });
                    out.push(Event::ParticleBurst(ParticleRequest::burst(
                        enemy.position(),
                        enemy.color(),
                        KILL_PARTICLES,
                        4.0,
                    )));
                }
            }
        }

        let mut index = 0;
        let removals = &self.removals;
        parts.enemies.retain(|_| {
            let keep = removals[index].is_none();
            index += 1;
            keep
        });

        let mut index = 0;
        let spent = &self.spent;
        parts.projectiles.retain(|_| {
            let keep = !spent[index];
            index += 1;
            keep
        });
    }
}

fn resolve_dash_damage(parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
    if !parts.player.dashing_this_frame() || !parts.stats.has(AbilityFlag::DashDamage) {
        return;
    }

    let combat = &parts.config.combat;
    let damage = if parts.stats.has(AbilityFlag::ShadowStrike) {
        combat.shadow_strike_damage
    } else {
        combat.dash_damage
    };
    let origin = parts.player.position();
    let reach = parts.player.size() + combat.dash_hitbox_padding;

    for enemy in parts.enemies.iter_mut() {
        if enemy.is_dead() || enemy.position().distance(origin) > enemy.size() + reach {
            continue;
        }
        let _ = enemy.take_damage(damage);
        out.push(Event::ParticleBurst(ParticleRequest::burst(
            enemy.position(),
            parts.player.color(),
            HIT_PARTICLES,
            3.0,
        )));
    }
}

fn explode(
    enemies: &mut [Enemy],
    struck: usize,
    center: Vec2,
    radius: f32,
    damage: f32,
    out: &mut Vec<Event>,
) {
    for (index, enemy) in enemies.iter_mut().enumerate() {
        if index == struck || enemy.is_dead() || enemy.position().distance(center) > radius {
            continue;
        }
        let _ = enemy.take_damage(damage);
    }
    out.push(Event::ParticleBurst(ParticleRequest::burst(
        center,
        EXPLOSION_COLOR,
        EXPLOSION_PARTICLES,
        6.0,
    )));
    out.push(Event::ScreenShake {
        intensity: EXPLOSION_SHAKE,
    });
}

fn roll<R: Rng>(rng: &mut R, chance: f32) -> bool {
    chance > 0.0 && rng.gen::<f32>() < chance
}
