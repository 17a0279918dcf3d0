#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick steering of every live enemy.
//!
//! Each behavior turns the bearing toward the player into a desired heading
//! and a speed multiplier. The system then eases the facing angle toward that
//! heading and moves the enemy through [`Enemy::apply_movement`]. Enemies that
//! drift outside the playfield bypass their behavior and fly home, and enemies
//! that stop closing in on a distant player are pointed straight at it.

use std::f32::consts::{FRAC_PI_2, PI};

use galactic_defender_core::{
    angle_to, blend_angle, distance, Behavior, EnemyId, EnemyKind, Event, FortressPhase,
    ParticleRequest, Playfield, ENRAGED_COLOR, WEAK_POINT_COLOR,
};
use galactic_defender_world::{config::DifficultyConfig, Enemy};
use glam::Vec2;

/// Ticks between two stuck checks.
pub const STUCK_CHECK_INTERVAL: u32 = 60;
/// Distance beyond which a non-closing enemy is considered stuck.
pub const STUCK_DISTANCE: f32 = 300.0;

const SWARM_CHARGE: f32 = 1.3;
const SWARM_REGROUP: f32 = 0.9;
const SWARM_WEAVE_FREQUENCY: f32 = 0.05;
const SWARM_WEAVE_AMPLITUDE: f32 = 0.5;

const FLANK_APPROACH: f32 = 1.1;
const FLANK_STRIKE: f32 = 1.3;
const FLANK_OFFSET: f32 = 1.25;
const FLANK_SIDE_PERIOD: u32 = 180;

const RAID_CHARGE: f32 = 1.5;
const RAID_FLEE: f32 = 1.2;
const RAID_STRAFE: f32 = 0.9;
const RAID_FLEE_RADIUS: f32 = 120.0;
const RAID_JITTER_FREQUENCY: f32 = 0.3;
const RAID_JITTER_AMPLITUDE: f32 = 0.3;

const ARTILLERY_BAND: f32 = 0.3;
const ARTILLERY_WINDUP: u32 = 60;
const ARTILLERY_DRIFT: f32 = 0.6;

const GUARDIAN_BLEND: f32 = 0.4;
const GUARDIAN_SPEED: f32 = 0.8;

const COMMANDER_CYCLE: u32 = 300;
const COMMANDER_WEAK_WINDOW: u32 = 60;
const COMMANDER_WEAK_SPEED: f32 = 0.4;
const COMMANDER_SPEED: f32 = 0.8;

const RETURN_SPEED: f32 = 2.0;

/// Enemy steering system.
#[derive(Debug, Default)]
pub struct EnemyAi {
    allies: Vec<AllySnapshot>,
}

#[derive(Clone, Copy, Debug)]
struct AllySnapshot {
    id: EnemyId,
    kind: EnemyKind,
    position: Vec2,
}

/// Heading and speed multiplier chosen by a behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Steering {
    angle: f32,
    speed: f32,
}

impl Steering {
    const fn new(angle: f32, speed: f32) -> Self {
        Self { angle, speed }
    }
}

impl EnemyAi {
    /// Creates the system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the behavior of every enemy by one tick.
    pub fn handle(
        &mut self,
        enemies: &mut [Enemy],
        player: Vec2,
        playfield: Playfield,
        difficulty: &DifficultyConfig,
        out: &mut Vec<Event>,
    ) {
        self.allies.clear();
        self.allies.extend(enemies.iter().map(|enemy| AllySnapshot {
            id: enemy.id(),
            kind: enemy.kind(),
            position: enemy.position(),
        }));

        for enemy in enemies.iter_mut() {
            self.steer(enemy, player, playfield, difficulty.turn_rate, out);
        }
    }

    fn steer(
        &self,
        enemy: &mut Enemy,
        player: Vec2,
        playfield: Playfield,
        turn_rate: f32,
        out: &mut Vec<Event>,
    ) {
        let state = enemy.state_mut();
        state.timer = state.timer.wrapping_add(1);

        if !playfield.contains(enemy.position(), enemy.size()) {
            enemy.return_to(playfield.center(), enemy.speed() * RETURN_SPEED);
            return;
        }

        let gap = distance(enemy.position(), player);
        let bearing = if gap > 0.0 {
            angle_to(enemy.position(), player)
        } else {
            enemy.angle()
        };

        let steering = self.behave(enemy, bearing, gap, out);
        let mut angle = blend_angle(enemy.angle(), steering.angle, turn_rate);

        let state = enemy.state_mut();
        if state.timer % STUCK_CHECK_INTERVAL == 0 {
            if gap >= state.last_checked_distance && gap > STUCK_DISTANCE {
                angle = bearing;
            }
            state.last_checked_distance = gap;
        }

        enemy.apply_movement(angle, enemy.speed() * steering.speed, playfield);
    }

    fn behave(&self, enemy: &mut Enemy, bearing: f32, gap: f32, out: &mut Vec<Event>) -> Steering {
        let timer = enemy.state().timer;
        match enemy.behavior() {
            Behavior::Swarm {
                formation_size,
                aggression_radius,
            } => {
                let packmates = self
                    .allies_within(enemy, aggression_radius)
                    .filter(|ally| ally.kind == enemy.kind())
                    .count();
                if packmates + 1 >= formation_size as usize {
                    Steering::new(bearing, SWARM_CHARGE)
                } else {
                    let weave = (timer as f32 * SWARM_WEAVE_FREQUENCY).sin() * SWARM_WEAVE_AMPLITUDE;
                    Steering::new(bearing + weave, SWARM_REGROUP)
                }
            }
            Behavior::Flanking { flank_distance } => {
                if gap > flank_distance * 1.2 {
                    Steering::new(bearing, FLANK_APPROACH)
                } else if gap >= flank_distance * 0.8 {
                    let side = if (timer / FLANK_SIDE_PERIOD) % 2 == 0 {
                        1.0
                    } else {
                        -1.0
                    };
                    Steering::new(bearing + side * FLANK_OFFSET, 1.0)
                } else {
                    Steering::new(bearing, FLANK_STRIKE)
                }
            }
            Behavior::HitAndRun { attack_cooldown } => {
                let cycle = attack_cooldown.max(2);
                if timer % cycle < cycle / 2 {
                    Steering::new(bearing, RAID_CHARGE)
                } else if gap < RAID_FLEE_RADIUS {
                    let jitter = (timer as f32 * RAID_JITTER_FREQUENCY).sin() * RAID_JITTER_AMPLITUDE;
                    Steering::new(bearing + PI + jitter, RAID_FLEE)
                } else {
                    Steering::new(bearing + FRAC_PI_2, RAID_STRAFE)
                }
            }
            Behavior::Artillery {
                keep_distance,
                charge_time,
            } => {
                let state = enemy.state_mut();
                if state.charging_phase > 0 {
                    state.charging_phase -= 1;
                    return Steering::new(bearing, 0.0);
                }
                if gap > keep_distance * (1.0 + ARTILLERY_BAND) {
                    Steering::new(bearing, 1.0)
                } else if gap < keep_distance * (1.0 - ARTILLERY_BAND) {
                    Steering::new(bearing + PI, 1.0)
                } else if charge_time > 0 && timer % charge_time == 0 {
                    state.charging_phase = ARTILLERY_WINDUP - 1;
                    Steering::new(bearing, 0.0)
                } else {
                    Steering::new(bearing + FRAC_PI_2, ARTILLERY_DRIFT)
                }
            }
            Behavior::Guardian { shield_radius, .. } => {
                let (sum, count) = self
                    .allies_within(enemy, shield_radius)
                    .fold((Vec2::ZERO, 0_u32), |(sum, count), ally| {
                        (sum + ally.position, count + 1)
                    });
                enemy.state_mut().protecting = count > 0;
                if count == 0 {
                    return Steering::new(bearing, 1.0);
                }
                let centroid = sum / count as f32;
                let escort = angle_to(enemy.position(), centroid);
                Steering::new(blend_angle(bearing, escort, GUARDIAN_BLEND), GUARDIAN_SPEED)
            }
            Behavior::Berserker {
                enrage_threshold,
                enrage_speed_bonus,
            } => {
                if !enemy.state().enraged && enemy.health_fraction() < enrage_threshold {
                    enemy.state_mut().enraged = true;
                    enemy.set_color(ENRAGED_COLOR);
                    out.push(Event::ParticleBurst(ParticleRequest::burst(
                        enemy.position(),
                        ENRAGED_COLOR,
                        12,
                        3.0,
                    )));
                }
                let speed = if enemy.state().enraged {
                    enrage_speed_bonus
                } else {
                    1.0
                };
                Steering::new(bearing, speed)
            }
            Behavior::Commander => {
                let exposed = timer % COMMANDER_CYCLE < COMMANDER_WEAK_WINDOW;
                enemy.state_mut().weak_point_phase = exposed;
                if exposed {
                    enemy.set_color(WEAK_POINT_COLOR);
                    Steering::new(bearing, COMMANDER_WEAK_SPEED)
                } else {
                    enemy.set_color(enemy.kind().definition().color);
                    Steering::new(bearing, COMMANDER_SPEED)
                }
            }
            Behavior::Fortress {
                phase_time,
                vulnerable_speed,
            } => {
                let state = enemy.state_mut();
                state.phase_timer += 1;
                if state.phase_timer >= phase_time {
                    state.phase_timer = 0;
                    state.fortress_phase = state.fortress_phase.next();
                }
                let phase = state.fortress_phase;
                enemy.set_color(phase.color());
                match phase {
                    FortressPhase::Charging | FortressPhase::Firing => Steering::new(bearing, 0.0),
                    FortressPhase::Vulnerable => Steering::new(bearing, vulnerable_speed),
                }
            }
            Behavior::Direct => Steering::new(bearing, 1.0),
        }
    }

    fn allies_within<'a>(
        &'a self,
        enemy: &'a Enemy,
        radius: f32,
    ) -> impl Iterator<Item = &'a AllySnapshot> + 'a {
        let origin = enemy.position();
        let radius_sq = radius * radius;
        self.allies.iter().filter(move |ally| {
            ally.id != enemy.id() && ally.position.distance_squared(origin) <= radius_sq
        })
    }
}
