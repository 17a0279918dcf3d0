use serde::{Deserialize, Serialize};

use crate::Color;

/// Abilities the pilot triggers on demand, each behind its own cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActiveAbility {
    /// Slows every enemy to a crawl.
    TimeFreeze,
    /// Makes the ship immune to damage.
    Barrier,
    /// Detonates around the ship, damaging every enemy in range.
    Nuke,
    /// Pulls nearby powerups toward the ship.
    Magnetism,
    /// Turns every volley into a ring of projectiles.
    Barrage,
}

impl ActiveAbility {
    /// Every ability in key order.
    pub const ALL: [Self; 5] = [
        Self::TimeFreeze,
        Self::Barrier,
        Self::Nuke,
        Self::Magnetism,
        Self::Barrage,
    ];

    /// Position of the ability within [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::TimeFreeze => 0,
            Self::Barrier => 1,
            Self::Nuke => 2,
            Self::Magnetism => 3,
            Self::Barrage => 4,
        }
    }

    /// Cooldown, duration, and charges of the ability.
    #[must_use]
    pub const fn profile(self) -> AbilityProfile {
        match self {
            Self::TimeFreeze => AbilityProfile {
                cooldown: 600,
                duration: 180,
                charges: None,
                color: Color::from_rgb(0, 255, 255),
            },
            Self::Barrier => AbilityProfile {
                cooldown: 480,
                duration: 300,
                charges: None,
                color: Color::from_rgb(0, 255, 255),
            },
            Self::Nuke => AbilityProfile {
                cooldown: 900,
                duration: 0,
                charges: Some(3),
                color: Color::from_rgb(255, 0, 255),
            },
            Self::Magnetism => AbilityProfile {
                cooldown: 360,
                duration: 240,
                charges: None,
                color: Color::from_rgb(255, 255, 0),
            },
            Self::Barrage => AbilityProfile {
                cooldown: 420,
                duration: 360,
                charges: None,
                color: Color::from_rgb(255, 102, 0),
            },
        }
    }
}

/// Timing of an [`ActiveAbility`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityProfile {
    /// Ticks before the ability may be triggered again.
    pub cooldown: u32,
    /// Ticks the ability stays active; zero for instant effects.
    pub duration: u32,
    /// Uses per run, or `None` when only the cooldown limits it.
    pub charges: Option<u32>,
    /// Tint of the activation burst.
    pub color: Color,
}

/// Pickups dropped by destroyed enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Restores hull.
    Repair,
    /// Refills the shield.
    Recharge,
    /// Permanently raises the damage multiplier.
    Damage,
    /// Permanently raises the speed multiplier.
    Speed,
    /// Adds rounds to the equipped weapon's magazine.
    Ammunition,
}

impl PowerupKind {
    /// Every kind, each equally likely to drop.
    pub const ALL: [Self; 5] = [
        Self::Repair,
        Self::Recharge,
        Self::Damage,
        Self::Speed,
        Self::Ammunition,
    ];

    /// Tint of the pickup.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Repair => Color::from_rgb(0, 255, 0),
            Self::Recharge => Color::from_rgb(0, 255, 255),
            Self::Damage => Color::from_rgb(255, 0, 0),
            Self::Speed => Color::from_rgb(255, 255, 0),
            Self::Ammunition => Color::from_rgb(255, 0, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_key_order() {
        for (position, ability) in ActiveAbility::ALL.into_iter().enumerate() {
            assert_eq!(ability.index(), position);
        }
    }

    #[test]
    fn only_the_nuke_is_instant_and_limited() {
        for ability in ActiveAbility::ALL {
            let profile = ability.profile();
            assert!(profile.cooldown > 0);
            if ability == ActiveAbility::Nuke {
                assert_eq!(profile.duration, 0);
                assert_eq!(profile.charges, Some(3));
            } else {
                assert!(profile.duration > 0);
                assert!(profile.charges.is_none());
            }
        }
    }
}
