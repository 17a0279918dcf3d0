//! Enemy ships and their per-behavior transient state.

use galactic_defender_core::{
    angle_to, blend_angle, direction_to, heading, Behavior, Color, EnemyId, EnemyKind, FortressPhase,
    Playfield,
};
use glam::Vec2;

use crate::config::DifficultyConfig;

const RECENTER_WEIGHT: f32 = 0.5;
const RECENTER_NUDGE: f32 = 2.0;

/// Transient state used by the behavior policies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BehaviorState {
    /// Ticks since spawn.
    pub timer: u32,
    /// Remaining ticks of an artillery charge windup.
    pub charging_phase: u32,
    /// Whether a commander's weak point is exposed.
    pub weak_point_phase: bool,
    /// Current fortress phase.
    pub fortress_phase: FortressPhase,
    /// Ticks spent in the current fortress phase.
    pub phase_timer: u32,
    /// Whether a berserker has enraged.
    pub enraged: bool,
    /// Whether a guardian is shielding allies.
    pub protecting: bool,
    /// Distance to the player at the last stuck check.
    pub last_checked_distance: f32,
}

impl Default for BehaviorState {
    fn default() -> Self {
        Self {
            timer: 0,
            charging_phase: 0,
            weak_point_phase: false,
            fortress_phase: FortressPhase::default(),
            phase_timer: 0,
            enraged: false,
            protecting: false,
            last_checked_distance: f32::INFINITY,
        }
    }
}

/// Hostile ship.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    position: Vec2,
    size: f32,
    speed: f32,
    health: f32,
    max_health: f32,
    color: Color,
    points: u32,
    damage: f32,
    angle: f32,
    state: BehaviorState,
}

impl Enemy {
    /// Creates an enemy of `kind` with stats scaled for `wave`.
    #[must_use]
    pub fn spawn(
        id: EnemyId,
        kind: EnemyKind,
        position: Vec2,
        wave: u32,
        difficulty: &DifficultyConfig,
    ) -> Self {
        let definition = kind.definition();
        let max_health = (difficulty.health_pool(wave) * definition.health_factor).max(1.0);
        Self {
            id,
            kind,
            position,
            size: definition.size,
            speed: definition.base_speed + definition.speed_per_wave * wave as f32,
            health: max_health,
            max_health,
            color: definition.color,
            points: definition.points,
            damage: definition.contact_damage * difficulty.contact_damage_factor(wave),
            angle: 0.0,
            state: BehaviorState::default(),
        }
    }

    /// Applies damage after weak-point and guardian modifiers.
    ///
    /// Returns whether the hull is depleted.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let mut amount = amount.max(0.0);
        if self.kind.definition().weak_point && self.is_vulnerable() {
            amount *= 2.0;
        }
        if let Behavior::Guardian {
            damage_reduction, ..
        } = self.behavior()
        {
            if self.state.protecting {
                amount *= 1.0 - damage_reduction.clamp(0.0, 1.0);
            }
        }
        self.health = (self.health - amount).max(0.0);
        self.is_dead()
    }

    /// Depletes the hull regardless of modifiers.
    pub fn destroy(&mut self) {
        self.health = 0.0;
    }

    /// Moves along `angle` at `speed`, clamping to the playfield.
    ///
    /// An enemy that strikes an edge turns halfway toward the world centre and
    /// is nudged inward so it cannot stay pinned against the wall.
    pub fn apply_movement(&mut self, angle: f32, speed: f32, playfield: Playfield) {
        self.angle = angle;
        let target = self.position + heading(angle) * speed.max(0.0);
        let clamped = playfield.clamp(target, self.size);
        if clamped == target {
            self.position = target;
            return;
        }

        let center = playfield.center();
        self.angle = blend_angle(self.angle, angle_to(clamped, center), RECENTER_WEIGHT);
        self.position = playfield.clamp(
            clamped + heading(angle_to(clamped, center)) * RECENTER_NUDGE,
            self.size,
        );
    }

    /// Flies straight toward `point` without clamping.
    ///
    /// Used to bring stray enemies back inside the playfield.
    pub fn return_to(&mut self, point: Vec2, speed: f32) {
        if let Some(direction) = direction_to(self.position, point) {
            self.angle = angle_to(self.position, point);
            let step = speed.max(0.0).min(self.position.distance(point));
            self.position += direction * step;
        }
    }

    /// Whether a vulnerable sub-state is active.
    #[must_use]
    pub fn is_vulnerable(&self) -> bool {
        self.state.charging_phase > 0
            || self.state.weak_point_phase
            || self.state.fortress_phase == FortressPhase::Vulnerable
    }

    /// Whether the hull is depleted.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Movement policy of the enemy's type.
    #[must_use]
    pub fn behavior(&self) -> Behavior {
        self.kind.definition().behavior
    }

    /// Mutable access to the behavior state.
    pub fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    /// Behavior state.
    #[must_use]
    pub const fn state(&self) -> &BehaviorState {
        &self.state
    }

    /// Replaces the hull tint.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Replaces the facing angle.
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Enemy type.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Ship centre.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Collision radius.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Wave-scaled cruising speed.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Current hull.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Maximum hull.
    #[must_use]
    pub const fn max_health(&self) -> f32 {
        self.max_health
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

    /// Current hull tint.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Score awarded for a kill before the combo multiplier.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Wave-scaled contact damage.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        self.damage
    }

    /// Facing angle in radians.
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }
}
