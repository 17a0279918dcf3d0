#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Active abilities: cooldowns, activation, and their immediate effects.
//!
//! Each ability answers the rising edge of its key. Time freeze, barrier,
//! magnetism, and barrage open a timed window that other systems consult. The
//! nuke strikes at once and leaves the enemies it depleted for the combat pass
//! to credit.

use galactic_defender_core::{AbilityError, ActiveAbility, Event, HeldKeys, Key, ParticleRequest};
use galactic_defender_world::WorldParts;
use rand::Rng;

const NUKE_SHAKE: f32 = 30.0;
const FREEZE_SHAKE: f32 = 15.0;

/// Ability system.
#[derive(Debug, Default)]
pub struct Abilities {
    expired: Vec<ActiveAbility>,
}

impl Abilities {
    /// Creates the system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ages every ability timer and triggers abilities whose key was just pressed.
    pub fn handle(
        &mut self,
        held: HeldKeys,
        previous: HeldKeys,
        parts: &mut WorldParts<'_>,
        out: &mut Vec<Event>,
    ) {
        self.expired.clear();
        parts.abilities.tick(&mut self.expired);
        for ability in self.expired.drain(..) {
            tracing::debug!(ability = ?ability, "ability expired");
            out.push(Event::AbilityExpired { ability });
        }

        for ability in ActiveAbility::ALL {
            if held.pressed_since(previous, Key::Ability(ability)) {
                let _refused = self.activate(ability, parts, out);
            }
        }
    }

    /// Triggers `ability` when it is off cooldown and has charges left.
    ///
    /// A refused request changes nothing and is reported through an
    /// [`Event::AbilityRejected`].
    pub fn activate(
        &mut self,
        ability: ActiveAbility,
        parts: &mut WorldParts<'_>,
        out: &mut Vec<Event>,
    ) -> Result<(), AbilityError> {
        if let Err(reason) = parts.abilities.activate(ability) {
            tracing::debug!(ability = ?ability, %reason, "ability refused");
            out.push(Event::AbilityRejected { ability, reason });
            return Err(reason);
        }

        let profile = ability.profile();
        match ability {
            ActiveAbility::Barrier => parts.player.grant_invulnerability(profile.duration),
            ActiveAbility::Nuke => detonate(parts, out),
            ActiveAbility::TimeFreeze => out.push(Event::ScreenShake {
                intensity: FREEZE_SHAKE,
            }),
            ActiveAbility::Magnetism | ActiveAbility::Barrage => {}
        }

        tracing::info!(ability = ?ability, tick = parts.tick, "ability activated");
        out.push(Event::AbilityActivated { ability });
        out.push(Event::ParticleBurst(ParticleRequest::burst(
            parts.player.position(),
            profile.color,
            burst_size(ability),
            5.0,
        )));
        Ok(())
    }
}

/// Whether enemies get to move this tick.
///
/// While time is frozen they only move on a `freeze_move_chance` roll drawn
/// from the run generator.
pub fn enemies_move(parts: &mut WorldParts<'_>) -> bool {
    if !parts.abilities.is_active(ActiveAbility::TimeFreeze) {
        return true;
    }
    parts.rng.gen::<f32>() < parts.config.abilities.freeze_move_chance
}

fn detonate(parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
    let config = &parts.config.abilities;
    let origin = parts.player.position();
    for enemy in parts.enemies.iter_mut() {
        if enemy.is_dead() || enemy.position().distance(origin) > config.nuke_radius {
            continue;
        }
        let _ = enemy.take_damage(config.nuke_damage);
    }
    out.push(Event::ScreenShake {
        intensity: NUKE_SHAKE,
    });
}

const fn burst_size(ability: ActiveAbility) -> u32 {
    match ability {
        ActiveAbility::TimeFreeze => 50,
        ActiveAbility::Barrier => 30,
        ActiveAbility::Nuke => 100,
        ActiveAbility::Magnetism => 40,
        ActiveAbility::Barrage => 25,
    }
}
