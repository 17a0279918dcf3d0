//! Build modifiers accumulated through upgrades.

use galactic_defender_core::{
    AbilityFlag, CappedStat, Eligibility, PlayerClass, Upgrade, UpgradeEffect,
};

use crate::player::Player;

const RAGE_DAMAGE: f32 = 0.5;

/// Flat record of the build: multipliers, additive bonuses, and abilities.
///
/// Values only move in the buffing direction. The record is rebuilt from the
/// class profile at the start of every run and mutated afterwards exclusively
/// through [`PlayerStats::apply`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStats {
    damage_multiplier: f32,
    fire_rate_multiplier: f32,
    speed_multiplier: f32,
    dash_multiplier: f32,
    projectile_speed_multiplier: f32,
    max_health_bonus: f32,
    max_shield_bonus: f32,
    multi_shot_count: u32,
    critical_chance: f32,
    headshot_chance: f32,
    damage_reduction: f32,
    rage_damage: f32,
    abilities: Vec<AbilityFlag>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            fire_rate_multiplier: 1.0,
            speed_multiplier: 1.0,
            dash_multiplier: 1.0,
            projectile_speed_multiplier: 1.0,
            max_health_bonus: 0.0,
            max_shield_bonus: 0.0,
            multi_shot_count: 0,
            critical_chance: 0.0,
            headshot_chance: 0.0,
            damage_reduction: 0.0,
            rage_damage: 0.0,
            abilities: Vec::new(),
        }
    }
}

impl PlayerStats {
    /// Baseline build for a freshly selected class.
    #[must_use]
    pub fn for_class(class: PlayerClass) -> Self {
        let profile = class.profile();
        let mut stats = Self {
            damage_multiplier: profile.damage,
            fire_rate_multiplier: profile.fire_rate,
            speed_multiplier: profile.speed,
            dash_multiplier: profile.dash,
            headshot_chance: profile.headshot_chance,
            ..Self::default()
        };
        if let Some(flag) = profile.ability {
            stats.unlock(flag);
        }
        stats
    }

    /// Whether `upgrade` may be offered to a `class` pilot with this build.
    #[must_use]
    pub fn is_eligible(&self, class: PlayerClass, upgrade: &Upgrade) -> bool {
        if !upgrade.classes.admits(class) {
            return false;
        }

        match upgrade.eligibility {
            Eligibility::Always => true,
            Eligibility::Below { stat, cap } => self.capped(stat) < cap,
            Eligibility::Lacks(flag) => !self.has(flag),
            Eligibility::Requires { owned, lacks } => self.has(owned) && !self.has(lacks),
        }
    }

    /// Applies a single upgrade effect to the build and the ship.
    ///
    /// Hull and shield upgrades raise the maximum and refill by the same
    /// amount so the ship benefits immediately.
    pub fn apply(&mut self, effect: UpgradeEffect, player: &mut Player) {
        match effect {
            UpgradeEffect::Damage(amount) => self.damage_multiplier += amount.max(0.0),
            UpgradeEffect::FireRate(amount) => self.fire_rate_multiplier += amount.max(0.0),
            UpgradeEffect::Speed(amount) => self.speed_multiplier += amount.max(0.0),
            UpgradeEffect::Dash(amount) => self.dash_multiplier += amount.max(0.0),
            UpgradeEffect::ProjectileSpeed(amount) => {
                self.projectile_speed_multiplier += amount.max(0.0);
            }
            UpgradeEffect::MaxHealth(amount) => {
                let amount = amount.max(0.0);
                self.max_health_bonus += amount;
                player.raise_max_health(amount);
            }
            UpgradeEffect::MaxShield(amount) => {
                let amount = amount.max(0.0);
                self.max_shield_bonus += amount;
                player.raise_max_shield(amount);
            }
            UpgradeEffect::MultiShot(count) => {
                self.multi_shot_count = self.multi_shot_count.max(count);
            }
            UpgradeEffect::CriticalChance(amount) => {
                self.critical_chance = (self.critical_chance + amount.max(0.0)).min(1.0);
            }
            UpgradeEffect::HeadshotChance(amount) => {
                self.headshot_chance = (self.headshot_chance + amount.max(0.0)).min(1.0);
            }
            UpgradeEffect::DamageReduction(amount) => {
                self.damage_reduction = (self.damage_reduction + amount.max(0.0)).min(0.9);
            }
            UpgradeEffect::Ability(flag) => self.unlock(flag),
        }
    }

    /// Whether the build owns `flag`.
    #[must_use]
    pub fn has(&self, flag: AbilityFlag) -> bool {
        self.abilities.contains(&flag)
    }

    /// Abilities in the order they were unlocked.
    #[must_use]
    pub fn abilities(&self) -> &[AbilityFlag] {
        &self.abilities
    }

    /// Projectile damage multiplier.
    #[must_use]
    pub const fn damage_multiplier(&self) -> f32 {
        self.damage_multiplier
    }

    /// Fire rate multiplier.
    #[must_use]
    pub const fn fire_rate_multiplier(&self) -> f32 {
        self.fire_rate_multiplier
    }

    /// Movement speed multiplier.
    #[must_use]
    pub const fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Dash distance multiplier.
    #[must_use]
    pub const fn dash_multiplier(&self) -> f32 {
        self.dash_multiplier
    }

    /// Projectile speed multiplier.
    #[must_use]
    pub const fn projectile_speed_multiplier(&self) -> f32 {
        self.projectile_speed_multiplier
    }

    /// Maximum hull granted by upgrades.
    #[must_use]
    pub const fn max_health_bonus(&self) -> f32 {
        self.max_health_bonus
    }

    /// Maximum shield granted by upgrades.
    #[must_use]
    pub const fn max_shield_bonus(&self) -> f32 {
        self.max_shield_bonus
    }

    /// Extra projectiles per volley.
    #[must_use]
    pub const fn multi_shot_count(&self) -> u32 {
        self.multi_shot_count
    }

    /// Chance for a projectile hit to be critical.
    #[must_use]
    pub const fn critical_chance(&self) -> f32 {
        self.critical_chance
    }

    /// Chance to execute a weakened enemy.
    #[must_use]
    pub const fn headshot_chance(&self) -> f32 {
        self.headshot_chance
    }

    /// Fraction of contact damage ignored.
    #[must_use]
    pub const fn damage_reduction(&self) -> f32 {
        self.damage_reduction
    }

    /// Bonus damage fraction while rage mode is engaged.
    #[must_use]
    pub const fn rage_damage(&self) -> f32 {
        self.rage_damage
    }

    fn unlock(&mut self, flag: AbilityFlag) {
        if self.has(flag) {
            return;
        }
        if flag == AbilityFlag::RageMode {
            self.rage_damage = self.rage_damage.max(RAGE_DAMAGE);
        }
        self.abilities.push(flag);
    }

    fn capped(&self, stat: CappedStat) -> f32 {
        match stat {
            CappedStat::MultiShot => self.multi_shot_count as f32,
            CappedStat::CriticalChance => self.critical_chance,
            CappedStat::HeadshotChance => self.headshot_chance,
            CappedStat::DamageReduction => self.damage_reduction,
        }
    }
}
