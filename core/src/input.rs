use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{ActiveAbility, WeaponKind};

/// Keys the simulation reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Thrust toward the top of the world.
    Up,
    /// Thrust toward the bottom of the world.
    Down,
    /// Thrust toward the left edge of the world.
    Left,
    /// Thrust toward the right edge of the world.
    Right,
    /// Dash along the current heading.
    Dash,
    /// Deploy a support turret when the build allows it.
    DeployTurret,
    /// Refill the equipped weapon's magazine.
    Reload,
    /// Equip a weapon.
    Weapon(WeaponKind),
    /// Trigger an active ability.
    Ability(ActiveAbility),
}

impl Key {
    const fn mask(self) -> u32 {
        match self {
            Self::Up => 1,
            Self::Down => 1 << 1,
            Self::Left => 1 << 2,
            Self::Right => 1 << 3,
            Self::Dash => 1 << 4,
            Self::DeployTurret => 1 << 5,
            Self::Reload => 1 << 6,
            Self::Weapon(weapon) => 1 << (7 + weapon.index() as u32),
            Self::Ability(ability) => 1 << (11 + ability.index() as u32),
        }
    }
}

/// Set of keys held during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeldKeys(u32);

impl HeldKeys {
    /// Creates an empty key set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns a copy of the set that also holds `key`.
    #[must_use]
    pub const fn with(self, key: Key) -> Self {
        Self(self.0 | key.mask())
    }

    /// Marks `key` as held.
    pub fn insert(&mut self, key: Key) {
        self.0 |= key.mask();
    }

    /// Whether `key` is held.
    #[must_use]
    pub const fn contains(self, key: Key) -> bool {
        self.0 & key.mask() != 0
    }

    /// Whether no key is held.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `key` is held now but was not in `previous`.
    #[must_use]
    pub const fn pressed_since(self, previous: Self, key: Key) -> bool {
        self.contains(key) && !previous.contains(key)
    }
}

/// Per-tick snapshot of player intent supplied by the input adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Movement and action keys held this tick.
    pub held: HeldKeys,
    /// Whether the primary fire action is held.
    pub fire: bool,
    /// Pointer position in world space, already adjusted for the camera.
    pub pointer: Vec2,
}

impl InputSnapshot {
    /// Raw movement axis with each component in `{-1, 0, 1}`.
    ///
    /// Opposing keys cancel out.
    #[must_use]
    pub fn movement_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.held.contains(Key::Left) {
            axis.x -= 1.0;
        }
        if self.held.contains(Key::Right) {
            axis.x += 1.0;
        }
        if self.held.contains(Key::Up) {
            axis.y -= 1.0;
        }
        if self.held.contains(Key::Down) {
            axis.y += 1.0;
        }
        axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_cancel() {
        let input = InputSnapshot {
            held: HeldKeys::empty()
                .with(Key::Left)
                .with(Key::Right)
                .with(Key::Down),
            ..InputSnapshot::default()
        };

        assert_eq!(input.movement_axis(), Vec2::new(0.0, 1.0));
        assert!(!input.held.contains(Key::Dash));
    }

    #[test]
    fn every_key_owns_a_distinct_bit() {
        let mut keys = vec![
            Key::Up,
            Key::Down,
            Key::Left,
            Key::Right,
            Key::Dash,
            Key::DeployTurret,
            Key::Reload,
        ];
        keys.extend(WeaponKind::ALL.map(Key::Weapon));
        keys.extend(ActiveAbility::ALL.map(Key::Ability));

        let mut seen = HeldKeys::empty();
        for key in keys {
            assert!(!seen.contains(key), "{key:?} shares a bit");
            seen.insert(key);
        }
        assert!(seen.contains(Key::Ability(ActiveAbility::Barrage)));
        assert!(!HeldKeys::empty()
            .with(Key::Weapon(WeaponKind::Beam))
            .contains(Key::Weapon(WeaponKind::Plasma)));
    }

    #[test]
    fn presses_are_detected_on_the_rising_edge() {
        let nuke = Key::Ability(ActiveAbility::Nuke);
        let held = HeldKeys::empty().with(nuke);

        assert!(held.pressed_since(HeldKeys::empty(), nuke));
        assert!(!held.pressed_since(held, nuke));
        assert!(!HeldKeys::empty().pressed_since(held, nuke));
    }
}
