//! Tunable constants of the simulation and their TOML representation.
//!
//! Every section uses `#[serde(default)]`, so a configuration file only needs
//! to mention the values it overrides.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use galactic_defender_core::Playfield;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read simulation config from {}", path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The TOML document could not be parsed into a configuration.
    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is outside the range the simulation supports.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Constraint that was violated.
        reason: &'static str,
    },
}

/// Complete set of tunables consumed by the simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// World dimensions.
    pub world: WorldConfig,
    /// Player ship tuning.
    pub player: PlayerConfig,
    /// Damage, projectile, and on-kill tuning.
    pub combat: CombatConfig,
    /// Wave size and pacing.
    pub waves: WaveConfig,
    /// Enemy scaling across waves.
    pub difficulty: DifficultyConfig,
    /// Experience curve and menu size.
    pub progression: ProgressionConfig,
    /// Support turret tuning.
    pub turret: TurretConfig,
    /// Active ability tuning.
    pub abilities: AbilityConfig,
    /// Powerup drops and effects.
    pub powerups: PowerupConfig,
    /// Fixed-step scheduling.
    pub timing: TimingConfig,
}

impl SimulationConfig {
    /// Reads, parses, and validates the TOML file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses a TOML document and validates the result.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value lies in the range the simulation supports.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        ensure(world.width > 0.0, "world.width", "must be positive")?;
        ensure(world.height > 0.0, "world.height", "must be positive")?;
        ensure(
            world.hud_offset >= 0.0 && world.hud_offset < world.height,
            "world.hud_offset",
            "must be non-negative and smaller than the world height",
        )?;

        let player = &self.player;
        ensure(player.size > 0.0, "player.size", "must be positive")?;
        ensure(player.speed > 0.0, "player.speed", "must be positive")?;
        ensure(player.max_health > 0.0, "player.max_health", "must be positive")?;
        ensure(player.max_shield >= 0.0, "player.max_shield", "must not be negative")?;
        ensure(
            (0.0..=1.0).contains(&player.diagonal_factor),
            "player.diagonal_factor",
            "must lie in [0, 1]",
        )?;

        let combat = &self.combat;
        ensure(combat.projectile_life > 0, "combat.projectile_life", "must be positive")?;
        ensure(
            (0.0..=1.0).contains(&combat.homing_turn_rate),
            "combat.homing_turn_rate",
            "must lie in [0, 1]",
        )?;
        ensure(
            (0.0..=1.0).contains(&combat.headshot_health_fraction),
            "combat.headshot_health_fraction",
            "must lie in [0, 1]",
        )?;
        ensure(
            (0.0..=1.0).contains(&combat.explosion_damage_fraction),
            "combat.explosion_damage_fraction",
            "must lie in [0, 1]",
        )?;
        ensure(combat.combo_max >= 1, "combat.combo_max", "must be at least 1")?;

        ensure(
            self.waves.base_enemies >= 1,
            "waves.base_enemies",
            "must be at least 1",
        )?;

        let progression = &self.progression;
        ensure(
            progression.first_threshold > 0,
            "progression.first_threshold",
            "must be positive",
        )?;
        ensure(
            progression.threshold_growth > 1.0,
            "progression.threshold_growth",
            "must be greater than 1",
        )?;
        ensure(
            progression.options_per_level >= 1,
            "progression.options_per_level",
            "must be at least 1",
        )?;

        ensure(
            self.turret.fire_interval >= 1,
            "turret.fire_interval",
            "must be at least 1",
        )?;

        let abilities = &self.abilities;
        ensure(
            abilities.nuke_radius >= 0.0,
            "abilities.nuke_radius",
            "must not be negative",
        )?;
        ensure(
            (0.0..=1.0).contains(&abilities.freeze_move_chance),
            "abilities.freeze_move_chance",
            "must lie in [0, 1]",
        )?;

        let powerups = &self.powerups;
        ensure(
            (0.0..=1.0).contains(&powerups.drop_chance),
            "powerups.drop_chance",
            "must lie in [0, 1]",
        )?;
        ensure(powerups.size > 0.0, "powerups.size", "must be positive")?;
        ensure(powerups.lifetime >= 1, "powerups.lifetime", "must be at least 1")?;
        ensure(
            self.timing.max_catch_up_ticks >= 1,
            "timing.max_catch_up_ticks",
            "must be at least 1",
        )
    }
}

fn ensure(condition: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason })
    }
}

/// World dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Horizontal extent in world units.
    pub width: f32,
    /// Vertical extent in world units.
    pub height: f32,
    /// Strip along the top edge reserved for an on-canvas HUD.
    pub hud_offset: f32,
}

impl WorldConfig {
    /// Playfield described by the section.
    #[must_use]
    pub const fn playfield(&self) -> Playfield {
        Playfield::new(self.width, self.height, self.hud_offset)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 4000.0,
            height: 3000.0,
            hud_offset: 0.0,
        }
    }
}

/// Player ship tuning before class and upgrade modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Collision radius.
    pub size: f32,
    /// Movement speed in world units per tick.
    pub speed: f32,
    /// Maximum hull.
    pub max_health: f32,
    /// Maximum shield.
    pub max_shield: f32,
    /// Dash displacement in world units.
    pub dash_distance: f32,
    /// Ticks between dashes.
    pub dash_cooldown: u32,
    /// Invulnerability granted by a dash, in ticks.
    pub dash_invulnerability: u32,
    /// Invulnerability granted by taking damage, in ticks.
    pub invulnerable_time: u32,
    /// Ticks after a hit before shields regenerate.
    pub shield_regen_delay: u32,
    /// Shield regenerated per tick.
    pub shield_regen_rate: f32,
    /// Shield regenerated per tick with the shield regeneration ability.
    pub boosted_shield_regen_rate: f32,
    /// Duration of the hit flash in ticks.
    pub damage_flash: u32,
    /// Per-axis scale applied while moving diagonally.
    pub diagonal_factor: f32,
    /// Cloak duration after a stealth dash, in ticks.
    pub stealth_duration: u32,
    /// Hull repaired per tick with the auto-repair ability.
    pub auto_repair_rate: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: 12.0,
            speed: 8.0,
            max_health: 100.0,
            max_shield: 50.0,
            dash_distance: 100.0,
            dash_cooldown: 60,
            dash_invulnerability: 30,
            invulnerable_time: 120,
            shield_regen_delay: 300,
            shield_regen_rate: 0.15,
            boosted_shield_regen_rate: 0.3,
            damage_flash: 30,
            diagonal_factor: 0.707,
            stealth_duration: 90,
            auto_repair_rate: 0.05,
        }
    }
}

/// Damage, projectile, and on-kill tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CombatConfig {
    /// Projectile lifetime in ticks.
    pub projectile_life: u32,
    /// Radius in which homing projectiles acquire targets.
    pub homing_radius: f32,
    /// Fraction of the course correction applied per tick.
    pub homing_turn_rate: f32,
    /// Damage multiplier of a critical hit.
    pub critical_multiplier: f32,
    /// Travel distance beyond which the ranged bonus applies.
    pub ranged_bonus_distance: f32,
    /// Damage multiplier for long-range hits.
    pub ranged_bonus_multiplier: f32,
    /// Health fraction at or below which headshots may execute.
    pub headshot_health_fraction: f32,
    /// Splash radius of explosive projectiles.
    pub explosion_radius: f32,
    /// Fraction of the hit damage dealt as splash.
    pub explosion_damage_fraction: f32,
    /// Damage dealt by a damaging dash.
    pub dash_damage: f32,
    /// Damage dealt by a damaging dash with shadow strike.
    pub shadow_strike_damage: f32,
    /// Extra reach of the dash hitbox beyond both hulls.
    pub dash_hitbox_padding: f32,
    /// Highest combo multiplier.
    pub combo_max: u32,
    /// Ticks a combo survives without a kill before resetting to 1.
    pub combo_window: u32,
    /// Hull restored per kill with the vampiric ability.
    pub vampiric_heal: f32,
    /// Duration of the bloodlust fire rate burst, in ticks.
    pub bloodlust_duration: u32,
    /// Fire rate multiplier while bloodlust is active.
    pub bloodlust_fire_rate: f32,
    /// Dash cooldown ticks removed per kill with rampage.
    pub rampage_cooldown_cut: u32,
    /// Contact damage multiplier in fortress mode while stationary.
    pub fortress_stationary_factor: f32,
    /// Hull fraction below which rage mode engages.
    pub rage_health_fraction: f32,
    /// Angle in radians between multishot projectiles.
    pub multishot_spread: f32,
    /// Damage fraction carried by multishot projectiles.
    pub multishot_damage: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            projectile_life: 120,
            homing_radius: 200.0,
            homing_turn_rate: 0.1,
            critical_multiplier: 2.0,
            ranged_bonus_distance: 200.0,
            ranged_bonus_multiplier: 1.25,
            headshot_health_fraction: 0.3,
            explosion_radius: 60.0,
            explosion_damage_fraction: 0.5,
            dash_damage: 50.0,
            shadow_strike_damage: 100.0,
            dash_hitbox_padding: 20.0,
            combo_max: 10,
            combo_window: 180,
            vampiric_heal: 5.0,
            bloodlust_duration: 180,
            bloodlust_fire_rate: 1.5,
            rampage_cooldown_cut: 15,
            fortress_stationary_factor: 0.5,
            rage_health_fraction: 0.5,
            multishot_spread: 0.3,
            multishot_damage: 0.8,
        }
    }
}

/// Wave size and pacing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveConfig {
    /// Enemies in the first wave.
    pub base_enemies: u32,
    /// Additional enemies per subsequent wave.
    pub enemies_per_wave: u32,
    /// Breather between waves, in ticks.
    pub transition_ticks: u32,
    /// Minimum spawn distance from the player.
    pub safe_distance: f32,
    /// Score bonus per wave number when a wave is cleared.
    pub completion_bonus_per_wave: u64,
    /// Distance kept between spawns and the world edge.
    pub spawn_margin: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_enemies: 5,
            enemies_per_wave: 3,
            transition_ticks: 180,
            safe_distance: 250.0,
            completion_bonus_per_wave: 100,
            spawn_margin: 50.0,
        }
    }
}

/// Enemy scaling across waves.
///
/// Enemy health is `(base_health + health_per_wave × wave) × health_factor`.
/// Contact damage is `contact_damage × (1 + contact_damage_scale × (wave − 1))`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DifficultyConfig {
    /// Health pool before wave scaling.
    pub base_health: f32,
    /// Health pool gained per wave.
    pub health_per_wave: f32,
    /// Fractional contact damage growth per wave after the first.
    pub contact_damage_scale: f32,
    /// Fraction of the angle error enemies correct per tick.
    pub turn_rate: f32,
}

impl DifficultyConfig {
    /// Health pool shared by every enemy type in `wave`.
    #[must_use]
    pub fn health_pool(&self, wave: u32) -> f32 {
        self.base_health + self.health_per_wave * wave as f32
    }

    /// Multiplier applied to per-type contact damage in `wave`.
    #[must_use]
    pub fn contact_damage_factor(&self, wave: u32) -> f32 {
        1.0 + self.contact_damage_scale * wave.saturating_sub(1) as f32
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            base_health: 25.0,
            health_per_wave: 8.0,
            contact_damage_scale: 0.05,
            turn_rate: 0.15,
        }
    }
}

/// Experience curve and menu size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressionConfig {
    /// Experience required for the first level-up.
    pub first_threshold: u32,
    /// Multiplier applied to the threshold after each level-up.
    pub threshold_growth: f32,
    /// Upgrades offered per level-up.
    pub options_per_level: usize,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            first_threshold: 200,
            threshold_growth: 1.8,
            options_per_level: 3,
        }
    }
}

/// Support turret tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TurretConfig {
    /// Maximum simultaneous turrets.
    pub max_turrets: usize,
    /// Ticks between deployments.
    pub deploy_cooldown: u32,
    /// Turret hull.
    pub health: f32,
    /// Targeting range.
    pub range: f32,
    /// Ticks between shots.
    pub fire_interval: u32,
    /// Projectile speed.
    pub projectile_speed: f32,
    /// Projectile damage before the damage multiplier.
    pub projectile_damage: f32,
    /// Collision radius.
    pub size: f32,
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            max_turrets: 2,
            deploy_cooldown: 600,
            health: 150.0,
            range: 300.0,
            fire_interval: 30,
            projectile_speed: 10.0,
            projectile_damage: 12.0,
            size: 14.0,
        }
    }
}

/// Active ability tuning; cooldowns and durations live in the ability table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AbilityConfig {
    /// Blast radius of the nuke around the ship.
    pub nuke_radius: f32,
    /// Damage dealt to every enemy inside the blast.
    pub nuke_damage: f32,
    /// Chance per tick that frozen enemies still move.
    pub freeze_move_chance: f32,
    /// Projectiles in each barrage ring.
    pub barrage_projectiles: u32,
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            nuke_radius: 300.0,
            nuke_damage: 999.0,
            freeze_move_chance: 0.1,
            barrage_projectiles: 8,
        }
    }
}

/// Powerup drops and effects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PowerupConfig {
    /// Chance that a credited kill drops a powerup.
    pub drop_chance: f32,
    /// Pickup radius of a powerup.
    pub size: f32,
    /// Ticks an uncollected powerup stays on the field.
    pub lifetime: u32,
    /// Distance within which magnetism pulls powerups.
    pub magnet_radius: f32,
    /// Distance a pulled powerup moves per tick.
    pub magnet_pull: f32,
    /// Hull restored by a repair pickup.
    pub repair: f32,
    /// Damage multiplier gained from a damage pickup.
    pub damage_bonus: f32,
    /// Speed multiplier gained from a speed pickup.
    pub speed_bonus: f32,
    /// Rounds added by an ammunition pickup, capped at the magazine size.
    pub ammunition: u32,
}

impl Default for PowerupConfig {
    fn default() -> Self {
        Self {
            drop_chance: 0.1,
            size: 30.0,
            lifetime: 600,
            magnet_radius: 200.0,
            magnet_pull: 3.0,
            repair: 30.0,
            damage_bonus: 0.2,
            speed_bonus: 0.1,
            ammunition: 20,
        }
    }
}

/// Fixed-step scheduling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Most ticks run by a single `advance` call; surplus time is dropped.
    pub max_catch_up_ticks: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_catch_up_ticks: 5,
        }
    }
}
