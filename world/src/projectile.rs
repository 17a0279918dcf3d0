//! Straight and homing projectiles with a time-to-live.

use galactic_defender_core::{direction_to, Color, EnemyId};
use glam::Vec2;

/// Distance beyond the world rectangle at which projectiles are culled.
pub const BOUNDS_PADDING: f32 = 50.0;

/// Steering parameters of a homing projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homing {
    /// Radius in which targets are acquired.
    pub radius: f32,
    /// Fraction of the course correction applied per tick.
    pub turn_rate: f32,
}

/// Kinematic projectile.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    position: Vec2,
    origin: Vec2,
    velocity: Vec2,
    size: f32,
    color: Color,
    damage: f32,
    life: u32,
    piercing: bool,
    explosive: bool,
    homing: Option<Homing>,
    struck: Vec<EnemyId>,
}

impl Projectile {
    /// Creates a straight, non-piercing projectile.
    #[must_use]
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        size: f32,
        color: Color,
        damage: f32,
        life: u32,
    ) -> Self {
        Self {
            position,
            origin: position,
            velocity,
            size,
            color,
            damage,
            life,
            piercing: false,
            explosive: false,
            homing: None,
            struck: Vec::new(),
        }
    }

    /// Lets the projectile pass through the enemies it hits.
    #[must_use]
    pub fn with_piercing(mut self, piercing: bool) -> Self {
        self.piercing = piercing;
        self
    }

    /// Makes the projectile splash damage on impact.
    #[must_use]
    pub fn with_explosive(mut self, explosive: bool) -> Self {
        self.explosive = explosive;
        self
    }

    /// Makes the projectile steer toward nearby targets.
    #[must_use]
    pub fn with_homing(mut self, homing: Option<Homing>) -> Self {
        self.homing = homing;
        self
    }

    /// Steers toward the nearest target in range, advances, and ages one tick.
    ///
    /// Steering blends the velocity toward a same-speed velocity aimed at the
    /// target and renormalises, so speed never changes. Degenerate geometry
    /// leaves the course untouched.
    pub fn update(&mut self, targets: &[Vec2]) {
        if let Some(homing) = self.homing {
            self.steer(homing, targets);
        }
        self.position += self.velocity;
        self.life = self.life.saturating_sub(1);
    }

    fn steer(&mut self, homing: Homing, targets: &[Vec2]) {
        let speed = self.velocity.length();
        let radius_sq = homing.radius * homing.radius;
        let nearest = targets
            .iter()
            .map(|target| (*target, target.distance_squared(self.position)))
            .filter(|(_, distance_sq)| *distance_sq <= radius_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let Some((target, _)) = nearest else {
            return;
        };
        let Some(bearing) = direction_to(self.position, target) else {
            return;
        };

        let blended = self.velocity.lerp(bearing * speed, homing.turn_rate);
        if let Some(direction) = blended.try_normalize() {
            self.velocity = direction * speed;
        }
    }

    /// Whether the projectile still has life left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Whether the projectile lies within the padded world rectangle.
    #[must_use]
    pub fn is_in_bounds(&self, width: f32, height: f32) -> bool {
        self.position.x >= -BOUNDS_PADDING
            && self.position.x <= width + BOUNDS_PADDING
            && self.position.y >= -BOUNDS_PADDING
            && self.position.y <= height + BOUNDS_PADDING
    }

    /// Whether the projectile already damaged `enemy`.
    #[must_use]
    pub fn has_struck(&self, enemy: EnemyId) -> bool {
        self.struck.contains(&enemy)
    }

    /// Remembers that the projectile damaged `enemy`.
    pub fn record_strike(&mut self, enemy: EnemyId) {
        self.struck.push(enemy);
    }

    /// Distance between the firing point and the current position.
    #[must_use]
    pub fn travelled(&self) -> f32 {
        self.origin.distance(self.position)
    }

    /// Current centre.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Velocity in world units per tick.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Collision radius.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Tint.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Damage before hit modifiers.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        self.damage
    }

    /// Remaining ticks.
    #[must_use]
    pub const fn life(&self) -> u32 {
        self.life
    }

    /// Whether the projectile passes through enemies.
    #[must_use]
    pub const fn is_piercing(&self) -> bool {
        self.piercing
    }

    /// Whether the projectile splashes on impact.
    #[must_use]
    pub const fn is_explosive(&self) -> bool {
        self.explosive
    }

    /// Whether the projectile steers toward targets.
    #[must_use]
    pub const fn is_homing(&self) -> bool {
        self.homing.is_some()
    }
}
