#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawn placement and enemy type selection for a wave.
//!
//! Placement follows one of five patterns cycled by wave number. Every
//! position keeps a safe distance from the player: spawns that land too close
//! are pushed outward along their bearing and then clamped back inside the
//! playfield. Types are drawn with a cumulative-weight roulette over the kinds
//! allowed in the wave.

use std::f32::consts::TAU;

use galactic_defender_core::{direction_to, EnemyKind, Playfield};
use glam::Vec2;
use rand::Rng;

const CORNER_JITTER: f32 = 100.0;
const CIRCLE_BAND: f32 = 200.0;
const CIRCLE_JITTER: f32 = 0.2;

/// Strategies for distributing a wave around the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpawnPattern {
    /// Clusters in the four corners, assigned round robin.
    Corners,
    /// Random points along the four edges, assigned round robin.
    Edges,
    /// Uniform scatter across the whole interior.
    Scatter,
    /// Evenly spaced ring around the player.
    Circle,
    /// Random points in the quadrant opposite the player.
    OppositeQuadrant,
}

impl SpawnPattern {
    /// Every pattern in cycling order.
    pub const ALL: [Self; 5] = [
        Self::Corners,
        Self::Edges,
        Self::Scatter,
        Self::Circle,
        Self::OppositeQuadrant,
    ];

    /// Pattern used by the one-based `wave`.
    #[must_use]
    pub const fn for_wave(wave: u32) -> Self {
        let index = (wave.saturating_sub(1) as usize) % Self::ALL.len();
        Self::ALL[index]
    }
}

/// Placement parameters shared by every pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Rectangle enemies spawn within.
    pub playfield: Playfield,
    /// Player position the spawns keep away from.
    pub player: Vec2,
    /// Minimum distance between a spawn and the player.
    pub safe_distance: f32,
    /// Inset from the playfield border.
    pub margin: f32,
}

/// Spawn placement system.
#[derive(Debug, Default)]
pub struct Spawning {
    roster: Vec<(EnemyKind, u32)>,
}

impl Spawning {
    /// Creates the system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` spawn positions following `pattern` to `out`.
    pub fn place<R: Rng>(
        &mut self,
        pattern: SpawnPattern,
        count: u32,
        placement: &Placement,
        rng: &mut R,
        out: &mut Vec<Vec2>,
    ) {
        out.reserve(count as usize);
        for index in 0..count {
            let raw = raw_position(pattern, index, count, placement, rng);
            out.push(keep_safe(raw, placement, rng));
        }
    }

    /// Draws an enemy type allowed in `wave` by cumulative spawn weight.
    ///
    /// Returns `None` when no type may spawn in the wave.
    pub fn choose_kind<R: Rng>(&mut self, wave: u32, rng: &mut R) -> Option<EnemyKind> {
        self.roster.clear();
        self.roster.extend(
            EnemyKind::ALL
                .iter()
                .map(|kind| (*kind, kind.definition()))
                .filter(|(_, definition)| definition.spawns_in(wave) && definition.spawn_weight > 0)
                .map(|(kind, definition)| (kind, definition.spawn_weight)),
        );

        let total: u32 = self.roster.iter().map(|(_, weight)| weight).sum();
        if total == 0 {
            return None;
        }

        let mut ticket = rng.gen_range(0..total);
        for (kind, weight) in &self.roster {
            if ticket < *weight {
                return Some(*kind);
            }
            ticket -= weight;
        }
        self.roster.last().map(|(kind, _)| *kind)
    }
}

fn raw_position<R: Rng>(
    pattern: SpawnPattern,
    index: u32,
    count: u32,
    placement: &Placement,
    rng: &mut R,
) -> Vec2 {
    let field = placement.playfield;
    let margin = placement.margin;
    let left = margin;
    let top = margin + field.hud_offset();
    let right = field.width() - margin;
    let bottom = field.height() - margin;

    match pattern {
        SpawnPattern::Corners => {
            let dx = sample(rng, 0.0, CORNER_JITTER);
            let dy = sample(rng, 0.0, CORNER_JITTER);
            match index % 4 {
                0 => Vec2::new(left + dx, top + dy),
                1 => Vec2::new(right - dx, top + dy),
                2 => Vec2::new(left + dx, bottom - dy),
                _ => Vec2::new(right - dx, bottom - dy),
            }
        }
        SpawnPattern::Edges => match index % 4 {
            0 => Vec2::new(sample(rng, left, right), top),
            1 => Vec2::new(right, sample(rng, top, bottom)),
            2 => Vec2::new(sample(rng, left, right), bottom),
            _ => Vec2::new(left, sample(rng, top, bottom)),
        },
        SpawnPattern::Scatter => Vec2::new(sample(rng, left, right), sample(rng, top, bottom)),
        SpawnPattern::Circle => {
            let angle = index as f32 / count.max(1) as f32 * TAU
                + sample(rng, -CIRCLE_JITTER, CIRCLE_JITTER);
            let radius = placement.safe_distance + sample(rng, 0.0, CIRCLE_BAND);
            placement.player + Vec2::new(angle.cos(), angle.sin()) * radius
        }
        SpawnPattern::OppositeQuadrant => {
            let center = field.center();
            let (x_lo, x_hi) = if placement.player.x < center.x {
                (center.x, right)
            } else {
                (left, center.x)
            };
            let (y_lo, y_hi) = if placement.player.y < center.y {
                (center.y, bottom)
            } else {
                (top, center.y)
            };
            Vec2::new(sample(rng, x_lo, x_hi), sample(rng, y_lo, y_hi))
        }
    }
}

fn keep_safe<R: Rng>(position: Vec2, placement: &Placement, rng: &mut R) -> Vec2 {
    let player = placement.player;
    let pushed = if position.distance(player) < placement.safe_distance {
        let bearing = direction_to(player, position).unwrap_or_else(|| {
            let angle = sample(rng, 0.0, TAU);
            Vec2::new(angle.cos(), angle.sin())
        });
        player + bearing * placement.safe_distance
    } else {
        position
    };
    placement.playfield.clamp(pushed, placement.margin)
}

fn sample<R: Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
