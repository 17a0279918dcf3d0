#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Galactic Defender engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the per-tick systems. Adapters submit
//! [`InputSnapshot`] values every tick and discrete [`Command`] values for menu
//! style interactions. The simulation answers with [`Event`] values that
//! renderers, audio back-ends, and analytics consume without the core depending
//! on how they are presented. Static balance tables (enemy types, player
//! classes, weapons, active abilities, powerups, and the upgrade catalog) also
//! live here so every crate reads the same definitions.

mod ability;
mod class;
mod enemy;
mod geometry;
mod input;
mod upgrade;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ability::{AbilityProfile, ActiveAbility, PowerupKind};
pub use class::{ClassProfile, PlayerClass, WeaponKind, WeaponProfile};
pub use enemy::{
    Behavior, EnemyKind, EnemyTypeDefinition, FortressPhase, ENRAGED_COLOR, WEAK_POINT_COLOR,
};
pub use geometry::{
    angle_to, blend_angle, circles_overlap, direction_to, distance, heading, normalize_angle,
    Playfield,
};
pub use input::{HeldKeys, InputSnapshot, Key};
pub use upgrade::{
    catalog, AbilityFlag, CappedStat, ClassFilter, Eligibility, Rarity, Upgrade, UpgradeEffect,
    UpgradeId,
};

/// Number of simulation ticks that elapse per simulated second.
pub const TICKS_PER_SECOND: u32 = 60;

/// Discrete requests that adapters submit outside the per-tick input stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Chooses the ship class for the run and starts it.
    SelectClass {
        /// Class the pilot flies for the remainder of the run.
        class: PlayerClass,
    },
    /// Picks one of the upgrade options currently offered by the level-up menu.
    SelectUpgrade {
        /// Zero-based position of the option within the offered list.
        index: usize,
    },
    /// Closes the level-up menu without taking any option.
    DeferUpgrade,
    /// Requests that a support turret be deployed at the player's position.
    DeployTurret,
    /// Reinitialises every piece of run state while keeping the chosen class.
    Restart,
}

/// Events broadcast by the simulation while processing ticks and commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Requests that the renderer spawn a burst of particles.
    ParticleBurst(ParticleRequest),
    /// Requests a camera shake of the given intensity.
    ScreenShake {
        /// Shake amplitude in world units.
        intensity: f32,
    },
    /// Latest heads-up display values, emitted once per advanced frame.
    Hud(HudSnapshot),
    /// Announces that a class was chosen and the run began.
    ClassSelected {
        /// Class flown by the pilot.
        class: PlayerClass,
    },
    /// Reports that damage reached the player through the invulnerability window.
    PlayerDamaged {
        /// Damage requested before shield absorption.
        amount: f32,
        /// Hull points remaining after the hit.
        health: f32,
        /// Shield points remaining after the hit.
        shield: f32,
    },
    /// Confirms that the player dashed.
    PlayerDashed {
        /// Position before the dash.
        from: Vec2,
        /// Position after the dash and clamping.
        to: Vec2,
    },
    /// Confirms that the player's weapon discharged.
    ShotFired {
        /// Weapon that fired.
        weapon: WeaponKind,
        /// Number of projectiles released by the volley.
        projectiles: u32,
    },
    /// Confirms that the pilot equipped another weapon.
    WeaponSwitched {
        /// Weapon now equipped.
        weapon: WeaponKind,
    },
    /// Confirms that the equipped weapon's magazine was refilled.
    WeaponReloaded {
        /// Weapon that was reloaded.
        weapon: WeaponKind,
        /// Rounds in the magazine after reloading.
        rounds: u32,
    },
    /// Reports that the equipped weapon fired its last round.
    MagazineEmpty {
        /// Weapon whose magazine ran dry.
        weapon: WeaponKind,
    },
    /// Confirms that an active ability was triggered.
    AbilityActivated {
        /// Ability that was triggered.
        ability: ActiveAbility,
    },
    /// Reports that an ability request was ignored.
    AbilityRejected {
        /// Ability that was requested.
        ability: ActiveAbility,
        /// Specific reason the request was ignored.
        reason: AbilityError,
    },
    /// Reports that a timed ability wore off.
    AbilityExpired {
        /// Ability that ended.
        ability: ActiveAbility,
    },
    /// Confirms that a destroyed enemy left a powerup behind.
    PowerupDropped {
        /// Kind of the pickup.
        kind: PowerupKind,
        /// Position of the pickup.
        position: Vec2,
    },
    /// Confirms that the player picked up a powerup.
    PowerupCollected {
        /// Kind of the pickup.
        kind: PowerupKind,
        /// Position where it was collected.
        position: Vec2,
    },
    /// Reports that an uncollected powerup faded away.
    PowerupExpired {
        /// Kind of the pickup.
        kind: PowerupKind,
        /// Position where it faded.
        position: Vec2,
    },
    /// Confirms that an enemy entered the playfield.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Type of the spawned enemy.
        kind: EnemyKind,
        /// Spawn position.
        position: Vec2,
    },
    /// Reports that an enemy was destroyed by the player or a turret.
    EnemyKilled {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Type of the destroyed enemy.
        kind: EnemyKind,
        /// Position where the enemy died.
        position: Vec2,
        /// Score awarded for the kill.
        score: u64,
        /// Experience awarded for the kill.
        experience: u32,
    },
    /// Reports that an enemy rammed the player and was destroyed on contact.
    EnemyRammed {
        /// Identifier of the enemy that collided with the player.
        enemy: EnemyId,
        /// Type of the colliding enemy.
        kind: EnemyKind,
    },
    /// Announces that a new wave started spawning.
    WaveStarted {
        /// One-based wave number.
        wave: u32,
        /// Number of enemies that make up the wave.
        enemies: u32,
    },
    /// Announces that every enemy of a wave has been removed.
    WaveCompleted {
        /// Wave number that just finished.
        wave: u32,
        /// Flat score bonus awarded for clearing the wave.
        bonus: u64,
    },
    /// Reports that the pilot gained a level and a choice of upgrades.
    LevelUp {
        /// New pilot level.
        level: u32,
        /// Upgrades offered in the menu, in display order.
        options: Vec<UpgradeId>,
    },
    /// Confirms that an upgrade was applied to the build.
    UpgradeApplied {
        /// Upgrade that was applied.
        upgrade: UpgradeId,
    },
    /// Reports that an upgrade selection request was ignored.
    UpgradeSelectionRejected {
        /// Index supplied by the request.
        index: usize,
        /// Specific reason the request was ignored.
        reason: SelectionError,
    },
    /// Confirms that the level-up menu was closed without a selection.
    UpgradeDeferred,
    /// Confirms that a support turret was deployed.
    TurretDeployed {
        /// Identifier assigned to the turret.
        turret: TurretId,
        /// Position the turret occupies.
        position: Vec2,
    },
    /// Reports that a turret deployment request was ignored.
    TurretDeploymentRejected {
        /// Specific reason the request was ignored.
        reason: DeployError,
    },
    /// Reports that a turret's hull was depleted and the turret removed.
    TurretDestroyed {
        /// Identifier of the destroyed turret.
        turret: TurretId,
    },
    /// Announces that the player ship was destroyed.
    GameOver {
        /// Final score of the run.
        score: u64,
        /// Wave reached.
        wave: u32,
        /// Pilot level reached.
        level: u32,
    },
    /// Confirms that the run state was fully reinitialised.
    RunReset,
}

/// Request for the renderer to spawn `count` particles around a position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleRequest {
    /// Centre of the burst in world space.
    pub position: Vec2,
    /// Base velocity shared by every particle.
    pub velocity: Vec2,
    /// Maximum random speed added to each particle by the renderer.
    pub spread: f32,
    /// Particle tint.
    pub color: Color,
    /// Particle radius in world units.
    pub size: f32,
    /// Lifetime in ticks.
    pub lifetime: u32,
    /// Number of particles in the burst.
    pub count: u32,
}

impl ParticleRequest {
    /// Creates a stationary burst that the renderer scatters by `spread`.
    #[must_use]
    pub const fn burst(position: Vec2, color: Color, count: u32, spread: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            spread,
            color,
            size: 2.0,
            lifetime: 30,
            count,
        }
    }
}

/// Values presented on the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Hull as a fraction of maximum health in `[0, 1]`.
    pub health_fraction: f32,
    /// Shield as a fraction of maximum shield in `[0, 1]`.
    pub shield_fraction: f32,
    /// Current score.
    pub score: u64,
    /// Current wave number.
    pub wave: u32,
    /// Current combo multiplier.
    pub combo: u32,
    /// Current pilot level.
    pub level: u32,
    /// Progress toward the next level in `[0, 1]`.
    pub experience_fraction: f32,
    /// Equipped weapon.
    pub weapon: WeaponKind,
    /// Rounds left in the magazine, or `None` for unlimited ammunition.
    pub rounds: Option<u32>,
}

/// RGB tint applied to ships, projectiles, and particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a new colour from its red, green, and blue channels.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        self.red
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        self.green
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.blue
    }
}

/// Unique identifier assigned to an enemy ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a deployed turret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurretId(u32);

impl TurretId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Reasons an upgrade selection request may be ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SelectionError {
    /// No level-up menu is open.
    #[error("no upgrade menu is open")]
    MenuClosed,
    /// The index does not address one of the offered options.
    #[error("option {index} is outside the {offered} offered upgrades")]
    OutOfRange {
        /// Index supplied by the request.
        index: usize,
        /// Number of options currently offered.
        offered: usize,
    },
}

/// Reasons a turret deployment request may be ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum DeployError {
    /// The build does not include the auto-turret ability.
    #[error("the auto-turret ability is not owned")]
    AbilityMissing,
    /// The maximum number of turrets is already deployed.
    #[error("{limit} turrets are already deployed")]
    CapacityReached {
        /// Maximum number of simultaneous turrets.
        limit: usize,
    },
    /// The deployment cooldown has not elapsed yet.
    #[error("deployment is ready in {ticks} ticks")]
    CoolingDown {
        /// Ticks until another turret may be deployed.
        ticks: u32,
    },
    /// The run is paused, over, or not started.
    #[error("the simulation is not running")]
    NotRunning,
}

/// Reasons an active ability request may be ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum AbilityError {
    /// The ability was used too recently.
    #[error("the ability is ready in {ticks} ticks")]
    CoolingDown {
        /// Ticks until the ability may be used again.
        ticks: u32,
    },
    /// Every charge of the ability has been spent this run.
    #[error("no charges are left")]
    Depleted,
}
