use serde::{Deserialize, Serialize};

use crate::{AbilityFlag, Color};

/// Ship classes a pilot may choose at the start of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    /// Heavy hull that shrugs off hits while holding position.
    Tank,
    /// Balanced ship whose scatter shots seek their targets.
    Hunter,
    /// Fragile, fast ship that vanishes while dashing.
    Assassin,
    /// Support ship that deploys autonomous turrets.
    Engineer,
    /// Glass cannon that hits harder as its hull fails.
    Berserker,
    /// Slow-firing marksman with a chance to execute weakened targets.
    Sniper,
}

impl PlayerClass {
    /// Every selectable class in menu order.
    pub const ALL: [Self; 6] = [
        Self::Tank,
        Self::Hunter,
        Self::Assassin,
        Self::Engineer,
        Self::Berserker,
        Self::Sniper,
    ];

    /// Static modifiers applied when the class is selected.
    #[must_use]
    pub const fn profile(self) -> ClassProfile {
        match self {
            Self::Tank => ClassProfile {
                health: 1.5,
                shield: 1.5,
                speed: 0.8,
                damage: 1.0,
                fire_rate: 0.9,
                dash: 0.8,
                weapon: WeaponKind::Photon,
                ability: Some(AbilityFlag::FortressMode),
                headshot_chance: 0.0,
            },
            Self::Hunter => ClassProfile {
                health: 1.0,
                shield: 1.0,
                speed: 1.0,
                damage: 1.1,
                fire_rate: 1.1,
                dash: 1.0,
                weapon: WeaponKind::Scatter,
                ability: Some(AbilityFlag::HomingShots),
                headshot_chance: 0.0,
            },
            Self::Assassin => ClassProfile {
                health: 0.7,
                shield: 0.8,
                speed: 1.3,
                damage: 1.2,
                fire_rate: 1.0,
                dash: 1.5,
                weapon: WeaponKind::Beam,
                ability: Some(AbilityFlag::StealthDash),
                headshot_chance: 0.0,
            },
            Self::Engineer => ClassProfile {
                health: 1.0,
                shield: 1.2,
                speed: 0.9,
                damage: 0.9,
                fire_rate: 1.0,
                dash: 1.0,
                weapon: WeaponKind::Photon,
                ability: Some(AbilityFlag::AutoTurret),
                headshot_chance: 0.0,
            },
            Self::Berserker => ClassProfile {
                health: 1.2,
                shield: 0.6,
                speed: 1.1,
                damage: 1.3,
                fire_rate: 1.2,
                dash: 1.0,
                weapon: WeaponKind::Plasma,
                ability: Some(AbilityFlag::RageMode),
                headshot_chance: 0.0,
            },
            Self::Sniper => ClassProfile {
                health: 0.8,
                shield: 1.0,
                speed: 0.9,
                damage: 1.5,
                fire_rate: 0.7,
                dash: 1.0,
                weapon: WeaponKind::Beam,
                ability: None,
                headshot_chance: 0.1,
            },
        }
    }
}

/// Multipliers and starting kit granted by a [`PlayerClass`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassProfile {
    /// Maximum hull multiplier.
    pub health: f32,
    /// Maximum shield multiplier.
    pub shield: f32,
    /// Movement speed multiplier.
    pub speed: f32,
    /// Projectile damage multiplier.
    pub damage: f32,
    /// Fire rate multiplier.
    pub fire_rate: f32,
    /// Dash distance multiplier.
    pub dash: f32,
    /// Weapon equipped at the start of the run.
    pub weapon: WeaponKind,
    /// Ability unlocked from the start, if any.
    pub ability: Option<AbilityFlag>,
    /// Starting headshot chance in `[0, 1]`.
    pub headshot_chance: f32,
}

/// Weapons mounted on the player ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Rapid general-purpose bolt.
    Photon,
    /// Three-pellet fan.
    Scatter,
    /// Fast, high-damage lance.
    Beam,
    /// Slow, heavy orb.
    Plasma,
}

impl WeaponKind {
    /// Every weapon in key order.
    pub const ALL: [Self; 4] = [Self::Photon, Self::Scatter, Self::Beam, Self::Plasma];

    /// Position of the weapon within [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Photon => 0,
            Self::Scatter => 1,
            Self::Beam => 2,
            Self::Plasma => 3,
        }
    }

    /// Ballistic properties of the weapon.
    #[must_use]
    pub const fn profile(self) -> WeaponProfile {
        match self {
            Self::Photon => WeaponProfile {
                damage: 15.0,
                speed: 12.0,
                size: 3.0,
                fire_rate: 8,
                pellets: 1,
                spread: 0.0,
                color: Color::from_rgb(0, 255, 255),
                magazine: None,
            },
            Self::Scatter => WeaponProfile {
                damage: 10.0,
                speed: 10.0,
                size: 2.0,
                fire_rate: 12,
                pellets: 3,
                spread: 0.3,
                color: Color::from_rgb(255, 102, 0),
                magazine: None,
            },
            Self::Beam => WeaponProfile {
                damage: 25.0,
                speed: 18.0,
                size: 2.0,
                fire_rate: 4,
                pellets: 1,
                spread: 0.0,
                color: Color::from_rgb(255, 0, 0),
                magazine: Some(50),
            },
            Self::Plasma => WeaponProfile {
                damage: 30.0,
                speed: 8.0,
                size: 5.0,
                fire_rate: 6,
                pellets: 1,
                spread: 0.0,
                color: Color::from_rgb(255, 0, 255),
                magazine: Some(30),
            },
        }
    }
}

/// Ballistic properties of a [`WeaponKind`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    /// Damage carried by each projectile before multipliers.
    pub damage: f32,
    /// Projectile speed in world units per tick.
    pub speed: f32,
    /// Projectile radius.
    pub size: f32,
    /// Ticks between volleys before fire rate multipliers.
    pub fire_rate: u32,
    /// Projectiles released per volley before multishot.
    pub pellets: u32,
    /// Angle in radians between neighbouring pellets.
    pub spread: f32,
    /// Projectile tint.
    pub color: Color,
    /// Rounds in a full magazine, or `None` for unlimited ammunition.
    pub magazine: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_sniper_starts_with_headshots() {
        for class in PlayerClass::ALL {
            let profile = class.profile();
            if class == PlayerClass::Sniper {
                assert!(profile.headshot_chance > 0.0);
                assert!(profile.ability.is_none());
            } else {
                assert_eq!(profile.headshot_chance, 0.0);
                assert!(profile.ability.is_some());
            }
        }
    }

    #[test]
    fn only_the_heavy_weapons_use_magazines() {
        assert_eq!(WeaponKind::Photon.profile().magazine, None);
        assert_eq!(WeaponKind::Scatter.profile().magazine, None);
        assert_eq!(WeaponKind::Beam.profile().magazine, Some(50));
        assert_eq!(WeaponKind::Plasma.profile().magazine, Some(30));
        for (position, weapon) in WeaponKind::ALL.into_iter().enumerate() {
            assert_eq!(weapon.index(), position);
        }
    }
}
