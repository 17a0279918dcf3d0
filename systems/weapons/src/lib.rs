#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player weapon discharge.
//!
//! A volley is released whenever fire is held, the reload timer has run out,
//! and the equipped magazine still holds a round. Every volley spawns the
//! weapon's pellets around the aim plus the extra multishot projectiles, each
//! carrying the build's projectile flags. While a barrage is active,
//! single-barrel weapons fire a full ring instead.

use std::f32::consts::TAU;

use galactic_defender_core::{
    direction_to, AbilityFlag, ActiveAbility, Event, HeldKeys, InputSnapshot, Key,
    ParticleRequest, WeaponKind, WeaponProfile,
};
use galactic_defender_world::{config::CombatConfig, Homing, Projectile, WorldParts};
use glam::Vec2;

const MUZZLE_PARTICLES: u32 = 3;
const MUZZLE_SPREAD: f32 = 1.0;

/// Weapon system that turns held fire into projectiles.
#[derive(Debug, Default)]
pub struct Weapons {
    volley: Vec<Shot>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Shot {
    offset: f32,
    damage_factor: f32,
}

impl Weapons {
    /// Creates the system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Equips the lowest held weapon key and reloads on a fresh reload press.
    pub fn manage_arsenal(
        &mut self,
        held: HeldKeys,
        previous: HeldKeys,
        parts: &mut WorldParts<'_>,
        out: &mut Vec<Event>,
    ) {
        let requested = WeaponKind::ALL
            .into_iter()
            .find(|weapon| held.contains(Key::Weapon(*weapon)));
        if let Some(weapon) = requested {
            if parts.player.arsenal_mut().equip(weapon) {
                out.push(Event::WeaponSwitched { weapon });
            }
        }

        if held.pressed_since(previous, Key::Reload) {
            let weapon = parts.player.weapon();
            if let Some(rounds) = parts.player.arsenal_mut().reload() {
                out.push(Event::WeaponReloaded { weapon, rounds });
            }
        }
    }

    /// Fires a volley when the trigger is held and the weapon is ready.
    pub fn handle(
        &mut self,
        input: &InputSnapshot,
        parts: &mut WorldParts<'_>,
        out: &mut Vec<Event>,
    ) {
        if !input.fire || parts.player.fire_timer() > 0 || !parts.player.arsenal().is_loaded() {
            return;
        }

        let origin = parts.player.position();
        let aim = direction_to(origin, input.pointer).unwrap_or(parts.player.heading());
        let base_angle = aim.y.atan2(aim.x);
        let weapon = parts.player.weapon();
        let profile = weapon.profile();
        let combat = &parts.config.combat;

        let ring = (parts.abilities.is_active(ActiveAbility::Barrage) && profile.pellets <= 1)
            .then_some(parts.config.abilities.barrage_projectiles);
        self.plan_volley(&profile, ring, parts.stats.multi_shot_count(), combat);

        let damage = profile.damage * parts.stats.damage_multiplier();
        let speed = profile.speed * parts.stats.projectile_speed_multiplier();
        let homing = parts.stats.has(AbilityFlag::HomingShots).then_some(Homing {
            radius: combat.homing_radius,
            turn_rate: combat.homing_turn_rate,
        });
        let piercing = parts.stats.has(AbilityFlag::PiercingShots);
        let explosive = parts.stats.has(AbilityFlag::ExplosiveShots);

        for shot in &self.volley {
            let angle = base_angle + shot.offset;
            let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
            parts.projectiles.push(
                Projectile::new(
                    origin,
                    velocity,
                    profile.size,
                    profile.color,
                    damage * shot.damage_factor,
                    combat.projectile_life,
                )
                .with_piercing(piercing)
                .with_explosive(explosive)
                .with_homing(homing),
            );
        }

        let bloodlust_active =
            parts.stats.has(AbilityFlag::Bloodlust) && parts.score.bloodlust_timer > 0;
        let bloodlust = if bloodlust_active {
            combat.bloodlust_fire_rate
        } else {
            1.0
        };
        parts.player.reload(reload_ticks(
            profile.fire_rate,
            parts.stats.fire_rate_multiplier() * bloodlust,
        ));
        let rounds = parts.player.arsenal_mut().spend_round();

        out.push(Event::ShotFired {
            weapon,
            projectiles: self.volley.len() as u32,
        });
        out.push(Event::ParticleBurst(ParticleRequest::burst(
            origin + aim * parts.player.size(),
            profile.color,
            MUZZLE_PARTICLES,
            MUZZLE_SPREAD,
        )));
        if rounds == Some(0) {
            out.push(Event::MagazineEmpty { weapon });
        }
    }

    fn plan_volley(
        &mut self,
        profile: &WeaponProfile,
        ring: Option<u32>,
        multi_shot: u32,
        combat: &CombatConfig,
    ) {
        self.volley.clear();

        if let Some(count) = ring {
            let count = count.max(1);
            self.volley.extend((0..count).map(|index| Shot {
                offset: TAU * index as f32 / count as f32,
                damage_factor: 1.0,
            }));
        } else {
            let pellets = profile.pellets.max(1);
            let centre = (pellets - 1) as f32 / 2.0;
            self.volley.extend((0..pellets).map(|index| Shot {
                offset: (index as f32 - centre) * profile.spread,
                damage_factor: 1.0,
            }));
        }

        self.volley.extend((1..=multi_shot).map(|index| {
            let step = ((index + 1) / 2) as f32 * combat.multishot_spread;
            let offset = if index % 2 == 1 { step } else { -step };
            Shot {
                offset,
                damage_factor: combat.multishot_damage,
            }
        }));
    }
}

/// Ticks between volleys: `max(1, floor(fire_rate / multiplier))`.
#[must_use]
pub fn reload_ticks(fire_rate: u32, multiplier: f32) -> u32 {
    if multiplier <= 0.0 {
        return fire_rate.max(1);
    }
    ((fire_rate as f32 / multiplier).floor() as u32).max(1)
}
