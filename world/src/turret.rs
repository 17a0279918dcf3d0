//! Deployable support turrets.

use galactic_defender_core::{Color, TurretId};
use glam::Vec2;

use crate::{config::TurretConfig, projectile::Projectile};

/// Hull tint of a deployed turret.
pub const TURRET_COLOR: Color = Color::from_rgb(0, 200, 255);

/// Stationary gun emplacement that fights alongside the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Turret {
    id: TurretId,
    position: Vec2,
    health: f32,
    max_health: f32,
    size: f32,
    fire_timer: u32,
    projectiles: Vec<Projectile>,
}

impl Turret {
    /// Builds a fully repaired turret at `position`.
    #[must_use]
    pub fn new(id: TurretId, position: Vec2, config: &TurretConfig) -> Self {
        Self {
            id,
            position,
            health: config.health,
            max_health: config.health,
            size: config.size,
            fire_timer: 0,
            projectiles: Vec::new(),
        }
    }

    /// Applies damage and reports whether the turret was destroyed.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount.max(0.0)).max(0.0);
        self.is_destroyed()
    }

    /// Whether the hull is depleted.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    /// Counts down the reload timer and reports whether the gun is ready.
    pub fn tick_reload(&mut self) -> bool {
        self.fire_timer = self.fire_timer.saturating_sub(1);
        self.fire_timer == 0
    }

    /// Starts a reload of `ticks` ticks.
    pub fn reload(&mut self, ticks: u32) {
        self.fire_timer = ticks;
    }

    /// Projectiles fired by this turret that are still in flight.
    #[must_use]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Mutable access to the turret's projectiles.
    pub fn projectiles_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.projectiles
    }

    /// Identifier assigned at deployment.
    #[must_use]
    pub const fn id(&self) -> TurretId {
        self.id
    }

    /// Emplacement centre.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Remaining hull.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Hull as a fraction of maximum.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.health / self.max_health
        }
    }

    /// Collision radius.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Ticks until the gun may fire again.
    #[must_use]
    pub const fn fire_timer(&self) -> u32 {
        self.fire_timer
    }
}

/// Active turrets plus the shared deployment cooldown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurretBay {
    turrets: Vec<Turret>,
    deploy_cooldown: u32,
    next_id: u32,
}

impl TurretBay {
    /// Places a turret and starts the deployment cooldown.
    ///
    /// Callers validate capacity and cooldown beforehand.
    pub fn deploy(&mut self, position: Vec2, config: &TurretConfig) -> TurretId {
        let id = TurretId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.turrets.push(Turret::new(id, position, config));
        self.deploy_cooldown = config.deploy_cooldown;
        id
    }

    /// Counts the deployment cooldown down by one tick.
    pub fn tick_cooldown(&mut self) {
        self.deploy_cooldown = self.deploy_cooldown.saturating_sub(1);
    }

    /// Removes destroyed turrets, returning their identifiers in bay order.
    pub fn remove_destroyed(&mut self) -> Vec<TurretId> {
        let removed = self
            .turrets
            .iter()
            .filter(|turret| turret.is_destroyed())
            .map(Turret::id)
            .collect();
        self.turrets.retain(|turret| !turret.is_destroyed());
        removed
    }

    /// Removes every turret and clears the cooldown.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Deployed turrets in deployment order.
    #[must_use]
    pub fn turrets(&self) -> &[Turret] {
        &self.turrets
    }

    /// Mutable access to the deployed turrets.
    pub fn turrets_mut(&mut self) -> &mut [Turret] {
        &mut self.turrets
    }

    /// Number of deployed turrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turrets.len()
    }

    /// Whether no turret is deployed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turrets.is_empty()
    }

    /// Ticks until another turret may be deployed.
    #[must_use]
    pub const fn deploy_cooldown(&self) -> u32 {
        self.deploy_cooldown
    }
}
