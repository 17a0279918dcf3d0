//! Pickups left behind by destroyed enemies.

use galactic_defender_core::{Color, PowerupKind};
use glam::Vec2;

use crate::config::PowerupConfig;

/// Collectable lying on the playfield.
#[derive(Clone, Debug, PartialEq)]
pub struct Powerup {
    kind: PowerupKind,
    position: Vec2,
    size: f32,
    lifetime: u32,
}

impl Powerup {
    /// Drops a pickup of `kind` at `position`.
    #[must_use]
    pub fn new(kind: PowerupKind, position: Vec2, config: &PowerupConfig) -> Self {
        Self {
            kind,
            position,
            size: config.size,
            lifetime: config.lifetime,
        }
    }

    /// Ages the pickup by one tick and reports whether it is still on the field.
    pub fn age(&mut self) -> bool {
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
    }

    /// Moves the pickup `pull` units toward `target` when within `radius`.
    pub fn attract(&mut self, target: Vec2, radius: f32, pull: f32) {
        let offset = target - self.position;
        let distance = offset.length();
        if distance >= radius {
            return;
        }
        if let Some(direction) = offset.try_normalize() {
            self.position += direction * pull.min(distance);
        }
    }

    /// Whether a ship of radius `size` at `position` touches the pickup.
    #[must_use]
    pub fn touches(&self, position: Vec2, size: f32) -> bool {
        self.position.distance(position) < self.size + size
    }

    /// Kind of the pickup.
    #[must_use]
    pub const fn kind(&self) -> PowerupKind {
        self.kind
    }

    /// Pickup centre.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Pickup radius.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Ticks left before the pickup fades.
    #[must_use]
    pub const fn lifetime(&self) -> u32 {
        self.lifetime
    }

    /// Pickup tint.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.kind.color()
    }
}
