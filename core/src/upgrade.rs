use serde::{Deserialize, Serialize};

use crate::PlayerClass;

/// Rarity tier of an upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    /// Frequently offered incremental improvements.
    Common,
    /// Less frequent, stronger improvements.
    Uncommon,
    /// Build-defining abilities.
    Rare,
}

impl Rarity {
    /// Every tier in roll order.
    pub const ALL: [Self; 3] = [Self::Common, Self::Uncommon, Self::Rare];

    /// Relative weight of the tier in the rarity roll.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Common => 60,
            Self::Uncommon => 30,
            Self::Rare => 10,
        }
    }

    /// Sum of all tier weights.
    #[must_use]
    pub const fn total_weight() -> u32 {
        Self::Common.weight() + Self::Uncommon.weight() + Self::Rare.weight()
    }
}

/// Boolean abilities a build may unlock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityFlag {
    /// Projectiles continue through enemies they hit.
    PiercingShots,
    /// Projectiles splash half their damage around the impact.
    ExplosiveShots,
    /// Projectiles steer toward nearby enemies.
    HomingShots,
    /// Kills restore hull.
    Vampiric,
    /// Enemies that ram the player count as kills.
    Thorns,
    /// Dashing damages enemies along the way.
    DashDamage,
    /// Incoming contact damage is halved while stationary.
    FortressMode,
    /// Dashing cloaks the ship against contact damage.
    StealthDash,
    /// Doubles dash damage.
    ShadowStrike,
    /// Kills briefly raise the fire rate.
    Bloodlust,
    /// Kills shorten the dash cooldown.
    Rampage,
    /// Support turrets may be deployed.
    AutoTurret,
    /// Hull slowly repairs itself.
    AutoRepair,
    /// Projectiles hit harder while the hull is below half.
    RageMode,
    /// Nearby powerups drift toward the ship.
    MagneticField,
    /// Shields regenerate twice as fast.
    ShieldRegen,
}

/// Additive stats with an upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CappedStat {
    /// Extra projectiles per volley.
    MultiShot,
    /// Chance for a projectile to deal double damage.
    CriticalChance,
    /// Chance to execute a weakened enemy.
    HeadshotChance,
    /// Fraction of contact damage ignored.
    DamageReduction,
}

/// Predicate deciding whether an upgrade may be offered to the current build.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Eligibility {
    /// May always be offered.
    Always,
    /// May be offered while `stat` is below `cap`.
    Below {
        /// Stat compared against the cap.
        stat: CappedStat,
        /// Exclusive upper bound.
        cap: f32,
    },
    /// May be offered until the ability is owned.
    Lacks(AbilityFlag),
    /// May be offered once a prerequisite is owned and until the ability is owned.
    Requires {
        /// Prerequisite ability.
        owned: AbilityFlag,
        /// Ability granted by the upgrade.
        lacks: AbilityFlag,
    },
}

/// Single atomic mutation applied to the build when an upgrade is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum UpgradeEffect {
    /// Adds to the damage multiplier.
    Damage(f32),
    /// Adds to the fire rate multiplier.
    FireRate(f32),
    /// Adds to the movement speed multiplier.
    Speed(f32),
    /// Adds to the dash distance multiplier.
    Dash(f32),
    /// Adds to the projectile speed multiplier.
    ProjectileSpeed(f32),
    /// Raises maximum hull and heals by the same amount.
    MaxHealth(f32),
    /// Raises maximum shield and recharges by the same amount.
    MaxShield(f32),
    /// Raises the extra projectile count to at least the given value.
    MultiShot(u32),
    /// Adds to the critical hit chance.
    CriticalChance(f32),
    /// Adds to the headshot chance.
    HeadshotChance(f32),
    /// Adds to the contact damage reduction.
    DamageReduction(f32),
    /// Unlocks an ability.
    Ability(AbilityFlag),
}

/// Classes an upgrade is offered to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassFilter {
    /// Offered to every class.
    All,
    /// Offered only to the listed classes.
    Only(&'static [PlayerClass]),
}

impl ClassFilter {
    /// Whether the filter admits `class`.
    #[must_use]
    pub fn admits(self, class: PlayerClass) -> bool {
        match self {
            Self::All => true,
            Self::Only(classes) => classes.contains(&class),
        }
    }
}

/// Catalog entry describing an upgrade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Upgrade {
    /// Unique identifier.
    pub id: UpgradeId,
    /// Display name.
    pub name: &'static str,
    /// Display description.
    pub description: &'static str,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Classes the upgrade is offered to.
    pub classes: ClassFilter,
    /// Predicate deciding whether the upgrade may be offered.
    pub eligibility: Eligibility,
    /// Mutation applied when the upgrade is chosen.
    pub effect: UpgradeEffect,
}

/// Identifiers of every upgrade in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeId {
    /// +25% damage.
    Damage1,
    /// +40% damage.
    Damage2,
    /// +30% fire rate.
    FireRate1,
    /// +50% fire rate.
    FireRate2,
    /// +25% movement speed.
    Speed1,
    /// +40% movement speed.
    Speed2,
    /// +30 maximum hull.
    Health1,
    /// +50 maximum hull.
    Health2,
    /// +25 maximum shield.
    Shield1,
    /// +40 maximum shield.
    Shield2,
    /// One extra projectile per volley.
    MultiShot1,
    /// Two extra projectiles per volley.
    MultiShot2,
    /// Piercing projectiles.
    Piercing,
    /// Damaging dash.
    DashDamage,
    /// Explosive projectiles.
    Explosive,
    /// Powerups are pulled in from a distance.
    Magnetic,
    /// Faster shield regeneration.
    ShieldRegen,
    /// Hull restored on kill.
    Vampiric,
    /// +10% critical chance.
    Critical,
    /// +10% contact damage reduction.
    Armor,
    /// +25% dash distance.
    DashMastery,
    /// +25% projectile speed.
    ProjectileSpeed,
    /// +5% headshot chance.
    Headshot,
    /// Ramming enemies count as kills.
    Thorns,
    /// Stationary damage reduction.
    Fortress,
    /// Homing projectiles.
    Homing,
    /// Cloaking dash.
    Stealth,
    /// Doubled dash damage.
    ShadowStrike,
    /// Fire rate burst on kill.
    Bloodlust,
    /// Dash cooldown cut on kill.
    Rampage,
    /// Deployable turrets.
    AutoTurret,
    /// Hull regeneration.
    AutoRepair,
    /// Damage bonus at low hull.
    Rage,
}

impl UpgradeId {
    /// Catalog entry for the identifier.
    #[must_use]
    pub fn upgrade(self) -> &'static Upgrade {
        &CATALOG[self as usize]
    }
}

/// Every upgrade, ordered by identifier.
#[must_use]
pub fn catalog() -> &'static [Upgrade] {
    &CATALOG
}

const ALL_CLASSES: ClassFilter = ClassFilter::All;

const fn always(
    id: UpgradeId,
    name: &'static str,
    description: &'static str,
    rarity: Rarity,
    effect: UpgradeEffect,
) -> Upgrade {
    Upgrade {
        id,
        name,
        description,
        rarity,
        classes: ALL_CLASSES,
        eligibility: Eligibility::Always,
        effect,
    }
}

const fn ability(
    id: UpgradeId,
    name: &'static str,
    description: &'static str,
    rarity: Rarity,
    classes: ClassFilter,
    flag: AbilityFlag,
) -> Upgrade {
    Upgrade {
        id,
        name,
        description,
        rarity,
        classes,
        eligibility: Eligibility::Lacks(flag),
        effect: UpgradeEffect::Ability(flag),
    }
}

static CATALOG: [Upgrade; 33] = [
    always(
        UpgradeId::Damage1,
        "Power Core",
        "+25% damage",
        Rarity::Common,
        UpgradeEffect::Damage(0.25),
    ),
    always(
        UpgradeId::Damage2,
        "Overcharged Core",
        "+40% damage",
        Rarity::Uncommon,
        UpgradeEffect::Damage(0.4),
    ),
    always(
        UpgradeId::FireRate1,
        "Rapid Loader",
        "+30% fire rate",
        Rarity::Common,
        UpgradeEffect::FireRate(0.3),
    ),
    always(
        UpgradeId::FireRate2,
        "Autoloader",
        "+50% fire rate",
        Rarity::Uncommon,
        UpgradeEffect::FireRate(0.5),
    ),
    always(
        UpgradeId::Speed1,
        "Thrusters",
        "+25% movement speed",
        Rarity::Common,
        UpgradeEffect::Speed(0.25),
    ),
    always(
        UpgradeId::Speed2,
        "Afterburners",
        "+40% movement speed",
        Rarity::Uncommon,
        UpgradeEffect::Speed(0.4),
    ),
    always(
        UpgradeId::Health1,
        "Hull Plating",
        "+30 maximum hull",
        Rarity::Common,
        UpgradeEffect::MaxHealth(30.0),
    ),
    always(
        UpgradeId::Health2,
        "Reinforced Hull",
        "+50 maximum hull",
        Rarity::Uncommon,
        UpgradeEffect::MaxHealth(50.0),
    ),
    always(
        UpgradeId::Shield1,
        "Shield Capacitor",
        "+25 maximum shield",
        Rarity::Common,
        UpgradeEffect::MaxShield(25.0),
    ),
    always(
        UpgradeId::Shield2,
        "Shield Matrix",
        "+40 maximum shield",
        Rarity::Uncommon,
        UpgradeEffect::MaxShield(40.0),
    ),
    Upgrade {
        id: UpgradeId::MultiShot1,
        name: "Twin Barrels",
        description: "Fire one extra projectile",
        rarity: Rarity::Uncommon,
        classes: ALL_CLASSES,
        eligibility: Eligibility::Below {
            stat: CappedStat::MultiShot,
            cap: 1.0,
        },
        effect: UpgradeEffect::MultiShot(1),
    },
    Upgrade {
        id: UpgradeId::MultiShot2,
        name: "Triple Barrels",
        description: "Fire two extra projectiles",
        rarity: Rarity::Rare,
        classes: ALL_CLASSES,
        eligibility: Eligibility::Below {
            stat: CappedStat::MultiShot,
            cap: 2.0,
        },
        effect: UpgradeEffect::MultiShot(2),
    },
    ability(
        UpgradeId::Piercing,
        "Phase Rounds",
        "Projectiles pass through enemies",
        Rarity::Rare,
        ALL_CLASSES,
        AbilityFlag::PiercingShots,
    ),
    ability(
        UpgradeId::DashDamage,
        "Ram Plating",
        "Dashing damages enemies in your path",
        Rarity::Rare,
        ALL_CLASSES,
        AbilityFlag::DashDamage,
    ),
    ability(
        UpgradeId::Explosive,
        "Fusion Warheads",
        "Projectiles explode on impact",
        Rarity::Rare,
        ALL_CLASSES,
        AbilityFlag::ExplosiveShots,
    ),
    ability(
        UpgradeId::Magnetic,
        "Magnetic Field",
        "Attract powerups from a distance",
        Rarity::Uncommon,
        ALL_CLASSES,
        AbilityFlag::MagneticField,
    ),
    ability(
        UpgradeId::ShieldRegen,
        "Shield Booster",
        "Shields regenerate twice as fast",
        Rarity::Uncommon,
        ALL_CLASSES,
        AbilityFlag::ShieldRegen,
    ),
    ability(
        UpgradeId::Vampiric,
        "Leech Core",
        "Kills restore 5 hull",
        Rarity::Rare,
        ALL_CLASSES,
        AbilityFlag::Vampiric,
    ),
    Upgrade {
        id: UpgradeId::Critical,
        name: "Targeting Computer",
        description: "+10% critical hit chance",
        rarity: Rarity::Common,
        classes: ALL_CLASSES,
        eligibility: Eligibility::Below {
            stat: CappedStat::CriticalChance,
            cap: 0.5,
        },
        effect: UpgradeEffect::CriticalChance(0.1),
    },
    Upgrade {
        id: UpgradeId::Armor,
        name: "Ablative Armor",
        description: "-10% contact damage taken",
        rarity: Rarity::Uncommon,
        classes: ALL_CLASSES,
        eligibility: Eligibility::Below {
            stat: CappedStat::DamageReduction,
            cap: 0.5,
        },
        effect: UpgradeEffect::DamageReduction(0.1),
    },
    always(
        UpgradeId::DashMastery,
        "Dash Capacitors",
        "+25% dash distance",
        Rarity::Common,
        UpgradeEffect::Dash(0.25),
    ),
    Upgrade {
        id: UpgradeId::ProjectileSpeed,
        name: "Magnetic Rails",
        description: "+25% projectile speed",
        rarity: Rarity::Common,
        classes: ClassFilter::Only(&[PlayerClass::Hunter, PlayerClass::Sniper]),
        eligibility: Eligibility::Always,
        effect: UpgradeEffect::ProjectileSpeed(0.25),
    },
    Upgrade {
        id: UpgradeId::Headshot,
        name: "Precision Optics",
        description: "+5% chance to execute weakened enemies",
        rarity: Rarity::Uncommon,
        classes: ClassFilter::Only(&[PlayerClass::Sniper]),
        eligibility: Eligibility::Below {
            stat: CappedStat::HeadshotChance,
            cap: 0.3,
        },
        effect: UpgradeEffect::HeadshotChance(0.05),
    },
    ability(
        UpgradeId::Thorns,
        "Spiked Hull",
        "Enemies that ram you count as kills",
        Rarity::Uncommon,
        ClassFilter::Only(&[PlayerClass::Tank, PlayerClass::Berserker]),
        AbilityFlag::Thorns,
    ),
    ability(
        UpgradeId::Fortress,
        "Fortress Protocol",
        "Halve contact damage while stationary",
        Rarity::Rare,
        ClassFilter::Only(&[PlayerClass::Tank, PlayerClass::Engineer]),
        AbilityFlag::FortressMode,
    ),
    ability(
        UpgradeId::Homing,
        "Seeker Warheads",
        "Projectiles home in on nearby enemies",
        Rarity::Rare,
        ClassFilter::Only(&[PlayerClass::Hunter, PlayerClass::Sniper]),
        AbilityFlag::HomingShots,
    ),
    ability(
        UpgradeId::Stealth,
        "Cloaking Field",
        "Dashing cloaks you from collisions",
        Rarity::Uncommon,
        ClassFilter::Only(&[PlayerClass::Assassin]),
        AbilityFlag::StealthDash,
    ),
    Upgrade {
        id: UpgradeId::ShadowStrike,
        name: "Shadow Strike",
        description: "Dash damage is doubled",
        rarity: Rarity::Rare,
        classes: ClassFilter::Only(&[PlayerClass::Assassin]),
        eligibility: Eligibility::Requires {
            owned: AbilityFlag::DashDamage,
            lacks: AbilityFlag::ShadowStrike,
        },
        effect: UpgradeEffect::Ability(AbilityFlag::ShadowStrike),
    },
    ability(
        UpgradeId::Bloodlust,
        "Bloodlust",
        "Kills briefly raise your fire rate",
        Rarity::Uncommon,
        ClassFilter::Only(&[PlayerClass::Berserker, PlayerClass::Assassin]),
        AbilityFlag::Bloodlust,
    ),
    ability(
        UpgradeId::Rampage,
        "Rampage",
        "Kills shorten the dash cooldown",
        Rarity::Rare,
        ClassFilter::Only(&[PlayerClass::Berserker]),
        AbilityFlag::Rampage,
    ),
    ability(
        UpgradeId::AutoTurret,
        "Field Turrets",
        "Deploy autonomous turrets",
        Rarity::Rare,
        ClassFilter::Only(&[PlayerClass::Engineer, PlayerClass::Tank]),
        AbilityFlag::AutoTurret,
    ),
    ability(
        UpgradeId::AutoRepair,
        "Nanite Repair",
        "Hull slowly repairs itself",
        Rarity::Uncommon,
        ClassFilter::Only(&[PlayerClass::Engineer, PlayerClass::Tank]),
        AbilityFlag::AutoRepair,
    ),
    ability(
        UpgradeId::Rage,
        "Blood Rage",
        "Deal more damage while badly hurt",
        Rarity::Rare,
        ClassFilter::Only(&[PlayerClass::Berserker, PlayerClass::Assassin]),
        AbilityFlag::RageMode,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_identifier() {
        for (index, upgrade) in catalog().iter().enumerate() {
            assert_eq!(upgrade.id as usize, index);
            assert_eq!(upgrade.id.upgrade(), upgrade);
        }
    }

    #[test]
    fn rarity_weights_sum_to_one_hundred() {
        assert_eq!(Rarity::total_weight(), 100);
    }

    #[test]
    fn class_filters_gate_specialist_upgrades() {
        let shadow = UpgradeId::ShadowStrike.upgrade();

        assert!(shadow.classes.admits(PlayerClass::Assassin));
        assert!(!shadow.classes.admits(PlayerClass::Tank));
        assert!(UpgradeId::Damage1
            .upgrade()
            .classes
            .admits(PlayerClass::Sniper));
    }
}
