//! Player ship: movement, dash, and damage absorption.

use galactic_defender_core::{
    direction_to, AbilityFlag, Color, InputSnapshot, Key, PlayerClass, Playfield, WeaponKind,
};
use glam::Vec2;

use crate::{arsenal::Arsenal, config::PlayerConfig, stats::PlayerStats};

const PLAYER_COLOR: Color = Color::from_rgb(0, 255, 255);

/// Displacement performed by a dash.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dash {
    /// Position before the dash.
    pub from: Vec2,
    /// Position after the dash and clamping.
    pub to: Vec2,
}

/// The pilot's ship.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    position: Vec2,
    size: f32,
    base_speed: f32,
    speed: f32,
    health: f32,
    max_health: f32,
    shield: f32,
    max_shield: f32,
    baseline_health: f32,
    baseline_shield: f32,
    color: Color,
    heading: Vec2,
    dash_cooldown: u32,
    invulnerable: u32,
    shield_regen_delay: u32,
    damage_flash: u32,
    stealth_timer: u32,
    dashing_this_frame: bool,
    moved_this_tick: bool,
    loadout: WeaponKind,
    arsenal: Arsenal,
    fire_timer: u32,
}

impl Player {
    /// Creates a ship for `class` at `position` with full hull and shield.
    #[must_use]
    pub fn spawn(config: &PlayerConfig, class: PlayerClass, position: Vec2) -> Self {
        let profile = class.profile();
        let max_health = config.max_health * profile.health;
        let max_shield = config.max_shield * profile.shield;
        Self {
            position,
            size: config.size,
            base_speed: config.speed,
            speed: config.speed * profile.speed,
            health: max_health,
            max_health,
            shield: max_shield,
            max_shield,
            baseline_health: max_health,
            baseline_shield: max_shield,
            color: PLAYER_COLOR,
            heading: Vec2::X,
            dash_cooldown: 0,
            invulnerable: 0,
            shield_regen_delay: 0,
            damage_flash: 0,
            stealth_timer: 0,
            dashing_this_frame: false,
            moved_this_tick: false,
            loadout: profile.weapon,
            arsenal: Arsenal::new(profile.weapon),
            fire_timer: 0,
        }
    }

    /// Restores class baseline hull, shield, and weapons, clears timers, and
    /// moves to `position`.
    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
        self.max_health = self.baseline_health;
        self.max_shield = self.baseline_shield;
        self.health = self.max_health;
        self.shield = self.max_shield;
        self.heading = Vec2::X;
        self.dash_cooldown = 0;
        self.invulnerable = 0;
        self.shield_regen_delay = 0;
        self.damage_flash = 0;
        self.stealth_timer = 0;
        self.dashing_this_frame = false;
        self.moved_this_tick = false;
        self.arsenal = Arsenal::new(self.loadout);
        self.fire_timer = 0;
    }

    /// Advances timers, moves the ship from held keys, and dashes when asked.
    ///
    /// Timers tick before movement so a cooldown set this tick is observed at
    /// its full length on the next one.
    pub fn update(
        &mut self,
        input: &InputSnapshot,
        stats: &PlayerStats,
        config: &PlayerConfig,
        playfield: Playfield,
    ) -> Option<Dash> {
        self.dashing_this_frame = false;
        self.tick_timers(stats, config);
        self.speed = self.base_speed * stats.speed_multiplier();

        let axis = input.movement_axis();
        let step = if axis.x != 0.0 && axis.y != 0.0 {
            axis * config.diagonal_factor
        } else {
            axis
        };
        self.moved_this_tick = axis != Vec2::ZERO;
        if let Some(heading) = axis.try_normalize() {
            self.heading = heading;
        }
        self.position = playfield.clamp(self.position + step * self.speed, self.size);

        if !input.held.contains(Key::Dash) || self.dash_cooldown > 0 {
            return None;
        }

        let direction = axis
            .try_normalize()
            .or_else(|| direction_to(self.position, input.pointer))?;
        self.dash(direction, stats, config, playfield)
    }

    /// Displaces the ship along `direction` by the dash distance.
    ///
    /// Returns `None` without consuming the cooldown when the dash is not
    /// ready or the direction has no length.
    pub fn dash(
        &mut self,
        direction: Vec2,
        stats: &PlayerStats,
        config: &PlayerConfig,
        playfield: Playfield,
    ) -> Option<Dash> {
        if self.dash_cooldown > 0 {
            return None;
        }
        let direction = direction.try_normalize()?;

        let from = self.position;
        let distance = config.dash_distance * stats.dash_multiplier();
        let to = playfield.clamp(from + direction * distance, self.size);

        self.position = to;
        self.dash_cooldown = config.dash_cooldown;
        self.invulnerable = self.invulnerable.max(config.dash_invulnerability);
        self.dashing_this_frame = true;
        if stats.has(AbilityFlag::StealthDash) {
            self.stealth_timer = config.stealth_duration;
        }
        Some(Dash { from, to })
    }

    /// Applies incoming damage, shield first.
    ///
    /// Returns `false` and changes nothing while invulnerable.
    pub fn take_damage(&mut self, amount: f32, config: &PlayerConfig) -> bool {
        if self.invulnerable > 0 {
            return false;
        }

        let amount = amount.max(0.0);
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        self.health = (self.health - (amount - absorbed)).max(0.0);

        self.invulnerable = config.invulnerable_time;
        self.shield_regen_delay = config.shield_regen_delay;
        self.damage_flash = config.damage_flash;
        true
    }

    /// Restores hull up to the maximum.
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount.max(0.0)).min(self.max_health);
    }

    /// Refills the shield to its maximum.
    pub fn recharge_shield(&mut self) {
        self.shield = self.max_shield;
    }

    /// Keeps the ship invulnerable for at least `ticks` more ticks.
    pub fn grant_invulnerability(&mut self, ticks: u32) {
        self.invulnerable = self.invulnerable.max(ticks);
    }

    /// Raises maximum hull and heals by the same amount.
    pub fn raise_max_health(&mut self, amount: f32) {
        self.max_health += amount;
        self.heal(amount);
    }

    /// Raises maximum shield and recharges by the same amount.
    pub fn raise_max_shield(&mut self, amount: f32) {
        self.max_shield += amount;
        self.shield = (self.shield + amount).min(self.max_shield);
    }

    /// Shortens the remaining dash cooldown.
    pub fn shorten_dash_cooldown(&mut self, ticks: u32) {
        self.dash_cooldown = self.dash_cooldown.saturating_sub(ticks);
    }

    /// Sets the ticks until the weapon may fire again.
    pub fn reload(&mut self, ticks: u32) {
        self.fire_timer = ticks;
    }

    /// Whether the hull is depleted.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
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

    /// Current movement speed after modifiers.
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

    /// Current shield.
    #[must_use]
    pub const fn shield(&self) -> f32 {
        self.shield
    }

    /// Maximum shield.
    #[must_use]
    pub const fn max_shield(&self) -> f32 {
        self.max_shield
    }

    /// Hull as a fraction of maximum.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        fraction(self.health, self.max_health)
    }

    /// Shield as a fraction of maximum.
    #[must_use]
    pub fn shield_fraction(&self) -> f32 {
        fraction(self.shield, self.max_shield)
    }

    /// Hull tint.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Last non-zero movement direction.
    #[must_use]
    pub const fn heading(&self) -> Vec2 {
        self.heading
    }

    /// Ticks until the next dash.
    #[must_use]
    pub const fn dash_cooldown(&self) -> u32 {
        self.dash_cooldown
    }

    /// Remaining invulnerability ticks.
    #[must_use]
    pub const fn invulnerable(&self) -> u32 {
        self.invulnerable
    }

    /// Ticks until shields start regenerating.
    #[must_use]
    pub const fn shield_regen_delay(&self) -> u32 {
        self.shield_regen_delay
    }

    /// Remaining hit-flash ticks.
    #[must_use]
    pub const fn damage_flash(&self) -> u32 {
        self.damage_flash
    }

    /// Remaining cloak ticks.
    #[must_use]
    pub const fn stealth_timer(&self) -> u32 {
        self.stealth_timer
    }

    /// Whether the ship dashed during the current tick.
    #[must_use]
    pub const fn dashing_this_frame(&self) -> bool {
        self.dashing_this_frame
    }

    /// Whether the ship moved during the current tick.
    #[must_use]
    pub const fn moved_this_tick(&self) -> bool {
        self.moved_this_tick
    }

    /// Equipped weapon.
    #[must_use]
    pub const fn weapon(&self) -> WeaponKind {
        self.arsenal.equipped()
    }

    /// Carried weapons and their magazines.
    #[must_use]
    pub const fn arsenal(&self) -> &Arsenal {
        &self.arsenal
    }

    /// Mutable access to the carried weapons.
    pub fn arsenal_mut(&mut self) -> &mut Arsenal {
        &mut self.arsenal
    }

    /// Ticks until the weapon may fire again.
    #[must_use]
    pub const fn fire_timer(&self) -> u32 {
        self.fire_timer
    }

    fn tick_timers(&mut self, stats: &PlayerStats, config: &PlayerConfig) {
        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
        self.invulnerable = self.invulnerable.saturating_sub(1);
        self.damage_flash = self.damage_flash.saturating_sub(1);
        self.stealth_timer = self.stealth_timer.saturating_sub(1);
        self.fire_timer = self.fire_timer.saturating_sub(1);

        if self.shield_regen_delay > 0 {
            self.shield_regen_delay -= 1;
        } else if self.shield < self.max_shield {
            let rate = if stats.has(AbilityFlag::ShieldRegen) {
                config.boosted_shield_regen_rate
            } else {
                config.shield_regen_rate
            };
            self.shield = (self.shield + rate).min(self.max_shield);
        }

        if stats.has(AbilityFlag::AutoRepair) && !self.is_dead() {
            self.heal(config.auto_repair_rate);
        }
    }
}

fn fraction(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max).clamp(0.0, 1.0)
    }
}
