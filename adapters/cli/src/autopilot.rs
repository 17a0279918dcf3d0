//! Scripted pilot used for headless runs.

use galactic_defender_core::{ActiveAbility, HeldKeys, InputSnapshot, Key};
use galactic_defender_world::{query, World};
use glam::Vec2;

/// Enemies closer than this make the pilot back away.
const COMFORT_RADIUS: f32 = 220.0;

/// Enemies closer than this trigger an escape dash.
const PANIC_RADIUS: f32 = 90.0;

/// Crowd size inside the comfort radius that is worth a nuke.
const NUKE_CROWD: usize = 5;

/// Hull fraction below which the pilot raises the barrier.
const BARRIER_HEALTH: f32 = 0.3;

/// Deterministic pilot that keeps its distance and shoots the closest enemy.
#[derive(Debug, Default)]
pub(crate) struct Autopilot {
    tapping: bool,
}

impl Autopilot {
    /// Builds the input for the next tick.
    pub(crate) fn input(&mut self, world: &World) -> InputSnapshot {
        let player = query::player(world).position();
        let closest = query::enemies(world)
            .iter()
            .map(|enemy| enemy.position())
            .min_by(|a, b| {
                a.distance_squared(player)
                    .total_cmp(&b.distance_squared(player))
            });
        let crowd = query::enemies(world)
            .iter()
            .filter(|enemy| enemy.position().distance(player) < COMFORT_RADIUS)
            .count();

        let mut held = HeldKeys::empty();
        if let Some(target) = closest {
            let distance = target.distance(player);
            if distance < COMFORT_RADIUS {
                press_toward(&mut held, player - target);
            }
            if distance < PANIC_RADIUS {
                held.insert(Key::Dash);
            }
        } else {
            press_toward(&mut held, query::playfield(world).center() - player);
        }

        // Edge-triggered keys only act on a fresh press, so they are tapped on alternate ticks.
        self.tapping = !self.tapping;
        if self.tapping {
            held.insert(Key::DeployTurret);
            if query::player(world).arsenal().rounds() == Some(0) {
                held.insert(Key::Reload);
            }
            if crowd >= NUKE_CROWD {
                held.insert(Key::Ability(ActiveAbility::Nuke));
            }
            if query::hud(world).health_fraction < BARRIER_HEALTH {
                held.insert(Key::Ability(ActiveAbility::Barrier));
            }
        }

        InputSnapshot {
            held,
            fire: closest.is_some(),
            pointer: closest.unwrap_or(player),
        }
    }
}

/// Holds the movement keys that steer the ship along `direction`.
fn press_toward(held: &mut HeldKeys, direction: Vec2) {
    if direction.x > 1.0 {
        held.insert(Key::Right);
    } else if direction.x < -1.0 {
        held.insert(Key::Left);
    }
    if direction.y > 1.0 {
        held.insert(Key::Down);
    } else if direction.y < -1.0 {
        held.insert(Key::Up);
    }
}
