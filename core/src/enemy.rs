use serde::{Deserialize, Serialize};

use crate::Color;

/// Tint applied to berserkers once they enrage.
pub const ENRAGED_COLOR: Color = Color::from_rgb(255, 0, 80);

/// Tint applied to commanders while their weak point is exposed.
pub const WEAK_POINT_COLOR: Color = Color::from_rgb(255, 255, 255);

/// Enemy ship types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Tiny swarming craft that attack once their pack is assembled.
    Drone,
    /// Quick scout that circles around to strike from the side.
    Scout,
    /// Fighter that alternates strafing runs with retreats.
    Fighter,
    /// Interceptor that flies straight at the player.
    Interceptor,
    /// Bomber that keeps its distance and winds up stationary charges.
    Bomber,
    /// Escort that shields nearby allies with its hull.
    Guardian,
    /// Brawler that speeds up when badly damaged.
    Berserker,
    /// Flagship with a periodically exposed weak point.
    Commander,
    /// Heavy platform that cycles between charging, firing, and vulnerable.
    Fortress,
}

impl EnemyKind {
    /// Every enemy type in table order.
    pub const ALL: [Self; 9] = [
        Self::Drone,
        Self::Scout,
        Self::Fighter,
        Self::Interceptor,
        Self::Bomber,
        Self::Guardian,
        Self::Berserker,
        Self::Commander,
        Self::Fortress,
    ];

    /// Static definition backing the enemy type.
    #[must_use]
    pub const fn definition(self) -> &'static EnemyTypeDefinition {
        match self {
            Self::Drone => &DRONE,
            Self::Scout => &SCOUT,
            Self::Fighter => &FIGHTER,
            Self::Interceptor => &INTERCEPTOR,
            Self::Bomber => &BOMBER,
            Self::Guardian => &GUARDIAN,
            Self::Berserker => &BERSERKER,
            Self::Commander => &COMMANDER,
            Self::Fortress => &FORTRESS,
        }
    }
}

/// Static stats and spawn rules of an enemy type.
///
/// Health and speed are scaled by the wave at spawn time: health is the wave
/// health pool multiplied by `health_factor`, speed is `base_speed` plus
/// `speed_per_wave` for every wave.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyTypeDefinition {
    /// Collision radius.
    pub size: f32,
    /// Speed before wave scaling.
    pub base_speed: f32,
    /// Speed gained per wave.
    pub speed_per_wave: f32,
    /// Multiplier applied to the wave health pool.
    pub health_factor: f32,
    /// Hull tint.
    pub color: Color,
    /// Score awarded for a kill before the combo multiplier.
    pub points: u32,
    /// Contact damage dealt to the player before wave scaling.
    pub contact_damage: f32,
    /// First wave the type may appear in.
    pub min_wave: u32,
    /// Last wave the type may appear in, or `None` when unbounded.
    pub max_wave: Option<u32>,
    /// Relative weight in the spawn roulette.
    pub spawn_weight: u32,
    /// Movement policy.
    pub behavior: Behavior,
    /// Whether vulnerable sub-states double incoming damage.
    pub weak_point: bool,
}

impl EnemyTypeDefinition {
    /// Whether the type is allowed to spawn in `wave`.
    #[must_use]
    pub const fn spawns_in(&self, wave: u32) -> bool {
        if wave < self.min_wave {
            return false;
        }
        match self.max_wave {
            Some(max_wave) => wave <= max_wave,
            None => true,
        }
    }
}

/// Movement policy of an enemy type, carrying only the tuning it needs.
///
/// [`Behavior::Direct`] is the default policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Weaves while regrouping and charges once enough packmates are close.
    Swarm {
        /// Pack size needed before charging, counting the enemy itself.
        formation_size: u32,
        /// Radius in which packmates count toward the formation.
        aggression_radius: f32,
    },
    /// Closes in, arcs around the player at range, then strikes.
    Flanking {
        /// Preferred orbit distance.
        flank_distance: f32,
    },
    /// Charges for half of each cycle and retreats or strafes for the rest.
    HitAndRun {
        /// Length of one charge-and-retreat cycle in ticks.
        attack_cooldown: u32,
    },
    /// Holds a preferred range and periodically winds up a stationary charge.
    Artillery {
        /// Preferred distance from the player.
        keep_distance: f32,
        /// Ticks between charge windups.
        charge_time: u32,
    },
    /// Positions itself between allies and the player.
    Guardian {
        /// Radius in which allies count as protected.
        shield_radius: f32,
        /// Fraction of incoming damage ignored while protecting.
        damage_reduction: f32,
    },
    /// Accelerates once its hull drops below a threshold.
    Berserker {
        /// Health fraction below which the enemy enrages.
        enrage_threshold: f32,
        /// Speed multiplier while enraged.
        enrage_speed_bonus: f32,
    },
    /// Slowly cycles through an exposed weak-point window.
    Commander,
    /// Cycles through charging, firing, and vulnerable phases.
    Fortress {
        /// Ticks spent in each phase.
        phase_time: u32,
        /// Speed multiplier during the vulnerable phase.
        vulnerable_speed: f32,
    },
    /// Flies straight at the player.
    #[default]
    Direct,
}

/// Phases cycled by fortress-class enemies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FortressPhase {
    /// Stationary while powering weapons.
    #[default]
    Charging,
    /// Stationary while discharging.
    Firing,
    /// Drifting with exposed systems.
    Vulnerable,
}

impl FortressPhase {
    /// Phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Charging => Self::Firing,
            Self::Firing => Self::Vulnerable,
            Self::Vulnerable => Self::Charging,
        }
    }

    /// Hull tint displayed during the phase.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Charging => Color::from_rgb(255, 170, 0),
            Self::Firing => Color::from_rgb(255, 40, 40),
            Self::Vulnerable => Color::from_rgb(80, 160, 255),
        }
    }
}

const DRONE: EnemyTypeDefinition = EnemyTypeDefinition {
    size: 5.0,
    base_speed: 1.5,
    speed_per_wave: 0.08,
    health_factor: 0.4,
    color: Color::from_rgb(102, 102, 102),
    points: 10,
    contact_damage: 10.0,
    min_wave: 1,
    max_wave: Some(12),
    spawn_weight: 30,
    behavior: Behavior::Swarm {
        formation_size: 4,
        aggression_radius: 150.0,
    },
    weak_point: false,
};

const SCOUT: EnemyTypeDefinition = EnemyTypeDefinition {
    size: 6.0,
    base_speed: 2.0,
    speed_per_wave: 0.1,
    health_factor: 0.6,
    color: Color::from_rgb(255, 68, 68),
    points: 15,
    contact_damage: 12.0,
    min_wave: 1,
    max_wave: None,
    spawn_weight: 25,
    behavior: Behavior::Flanking {
        flank_distance: 250.0,
    },
    weak_point: false,
};

const FIGHTER: EnemyTypeDefinition = EnemyTypeDefinition {
    size: 8.0,
    base_speed: 1.8,
    speed_per_wave: 0.08,
    health_factor: 1.0,
    color: Color::from_rgb(255, 170, 0),
    points: 20,
    contact_damage: 15.0,
    min_wave: 1,
    max_wave: None,
    spawn_weight: 20,
    behavior: Behavior::HitAndRun {
        attack_cooldown: 180,
    },
    weak_point: false,
};

const INTERCEPTOR: EnemyTypeDefinition = EnemyTypeDefinition {
    size: 7.0,
    base_speed: 2.5,
    speed_per_wave: 0.12,
    health_factor: 0.8,
    color: Color::from_rgb(255, 255, 0),
    points: 25,
    contact_damage: 15.0,
    min_wave: 2,
    max_wave: None,
    spawn_weight: 15,
    behavior: Behavior::Direct,
    weak_point: false,
};

const BOMBER: EnemyTypeDefinition = EnemyTypeDefinition {
    size: 10.0,
    base_speed: 1.2,
    speed_per_wave: 0.05,
    health_factor: 1.5,
    color: Color::from_rgb(255, 102, 0),
    points: 30,
    contact_damage: 25.0,
    min_wave: 3,
    max_wave: None,
    spawn_weight: 12,
    behavior: Behavior::Artillery {
        keep_distance: 350.0,
        charge_time: 240,
    },
    weak_point: true,
};

const GUARDIAN: EnemyTypeDefinition = EnemyTypeDefinition {
    size: 14.0,
    base_speed: 1.0,
    speed_per_wave: 0.04,
    health_factor: 2.5,
    color: Color::from_rgb(68, 136, 255),
    points: 50,
    contact_damage: 30.0,
    min_wave: 4,
    max_wave: None,
    spawn_weight: 8,
    behavior: Behavior::Guardian {
        shield_radius: 150.0,
        damage_reduction: 0.5,
    },
    weak_point: false,
};

const BERSERKER: EnemyTypeDefinition = EnemyTypeDefinition {
    size: 11.0,
    base_speed: 1.8,
    speed_per_wave: 0.07,
    health_factor: 1.6,
    color: Color::from_rgb(136, 0, 255),
    points: 45,
    contact_damage: 30.0,
    min_wave: 5,
    max_wave: None,
    spawn_weight: 8,
    behavior: Behavior::Berserker {
        enrage_threshold: 0.4,
        enrage_speed_bonus: 1.5,
    },
    weak_point: false,
};

const COMMANDER: EnemyTypeDefinition = EnemyTypeDefinition {
    size: 16.0,
    base_speed: 0.9,
    speed_per_wave: 0.03,
    health_factor: 3.0,
    color: Color::from_rgb(170, 0, 0),
    points: 80,
    contact_damage: 35.0,
    min_wave: 6,
    max_wave: None,
    spawn_weight: 4,
    behavior: Behavior::Commander,
    weak_point: true,
};

const FORTRESS: EnemyTypeDefinition = EnemyTypeDefinition {
    size: 20.0,
    base_speed: 0.8,
    speed_per_wave: 0.03,
    health_factor: 4.0,
    color: FortressPhase::Charging.color(),
    points: 100,
    contact_damage: 50.0,
    min_wave: 8,
    max_wave: None,
    spawn_weight: 3,
    behavior: Behavior::Fortress {
        phase_time: 120,
        vulnerable_speed: 0.3,
    },
    weak_point: true,
};
