#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Powerup drops, magnetism, pickup, and expiry.
//!
//! Every credited kill of a tick rolls for a drop at the wreck's position.
//! Pickups drift toward the ship while magnetism or the magnetic field is
//! active and apply their effect when the ship touches them.

use galactic_defender_core::{
    AbilityFlag, ActiveAbility, Event, ParticleRequest, PowerupKind, UpgradeEffect,
};
use galactic_defender_world::{config::PowerupConfig, Powerup, WorldParts};
use glam::Vec2;
use rand::Rng;

const PICKUP_PARTICLES: u32 = 10;

/// Powerup system.
#[derive(Debug, Default)]
pub struct Powerups {
    wrecks: Vec<Vec2>,
    collected: Vec<(PowerupKind, Vec2)>,
    faded: Vec<(PowerupKind, Vec2)>,
}

impl Powerups {
    /// Creates the system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a drop roll for every kill reported in `events`.
    pub fn note_kills(&mut self, events: &[Event]) {
        self.wrecks
            .extend(events.iter().filter_map(|event| match event {
                Event::EnemyKilled { position, .. } => Some(*position),
                _ => None,
            }));
    }

    /// Rolls queued drops, then pulls, collects, and ages the pickups.
    pub fn handle(&mut self, parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
        let config = parts.config;
        let tuning = &config.powerups;
        let playfield = config.world.playfield();

        for wreck in self.wrecks.drain(..) {
            if parts.rng.gen::<f32>() >= tuning.drop_chance {
                continue;
            }
            let kind = PowerupKind::ALL[parts.rng.gen_range(0..PowerupKind::ALL.len())];
            let position = playfield.clamp(wreck, tuning.size);
            parts.powerups.push(Powerup::new(kind, position, tuning));
            out.push(Event::PowerupDropped { kind, position });
        }

        if parts.powerups.is_empty() {
            return;
        }

        let magnetised = parts.abilities.is_active(ActiveAbility::Magnetism)
            || parts.stats.has(AbilityFlag::MagneticField);
        let ship = parts.player.position();
        let reach = parts.player.size();
        let collected = &mut self.collected;
        let faded = &mut self.faded;
        parts.powerups.retain_mut(|powerup| {
            if magnetised {
                powerup.attract(ship, tuning.magnet_radius, tuning.magnet_pull);
            }
            if powerup.touches(ship, reach) {
                collected.push((powerup.kind(), powerup.position()));
                return false;
            }
            if !powerup.age() {
                faded.push((powerup.kind(), powerup.position()));
                return false;
            }
            true
        });

        for (kind, position) in self.collected.drain(..) {
            collect(kind, parts, tuning);
            tracing::debug!(kind = ?kind, "powerup collected");
            out.push(Event::PowerupCollected { kind, position });
            out.push(Event::ParticleBurst(ParticleRequest::burst(
                position,
                kind.color(),
                PICKUP_PARTICLES,
                2.0,
            )));
        }
        for (kind, position) in self.faded.drain(..) {
            out.push(Event::PowerupExpired { kind, position });
        }
    }
}

fn collect(kind: PowerupKind, parts: &mut WorldParts<'_>, tuning: &PowerupConfig) {
    match kind {
        PowerupKind::Repair => parts.player.heal(tuning.repair),
        PowerupKind::Recharge => parts.player.recharge_shield(),
        PowerupKind::Damage => parts
            .stats
            .apply(UpgradeEffect::Damage(tuning.damage_bonus), parts.player),
        PowerupKind::Speed => parts
            .stats
            .apply(UpgradeEffect::Speed(tuning.speed_bonus), parts.player),
        PowerupKind::Ammunition => parts.player.arsenal_mut().top_up(tuning.ammunition),
    }
}
