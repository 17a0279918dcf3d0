use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use galactic_defender_core::{EnemyId, EnemyKind, Event, Playfield};
use galactic_defender_system_enemy_ai::EnemyAi;
use galactic_defender_world::{config::DifficultyConfig, Enemy};
use glam::Vec2;

#[test]
fn every_behavior_replays_identically() {
    let first = replay();
    let second = replay();

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn every_enemy_stays_inside_the_playfield() {
    let playfield = Playfield::new(1200.0, 900.0, 0.0);
    let difficulty = DifficultyConfig::default();
    let mut enemies = roster();
    let mut ai = EnemyAi::new();
    let mut events = Vec::new();

    for tick in 0..900_u32 {
        let player = orbit(tick);
        ai.handle(&mut enemies, player, playfield, &difficulty, &mut events);
        for enemy in &enemies {
            assert!(
                playfield.contains(enemy.position(), enemy.size()),
                "{:?} escaped to {:?} on tick {tick}",
                enemy.kind(),
                enemy.position()
            );
        }
    }
}

fn replay() -> ReplayOutcome {
    let playfield = Playfield::new(1200.0, 900.0, 0.0);
    let difficulty = DifficultyConfig::default();
    let mut enemies = roster();
    let mut ai = EnemyAi::new();
    let mut events = Vec::new();

    for tick in 0..600 {
        ai.handle(&mut enemies, orbit(tick), playfield, &difficulty, &mut events);
    }

    ReplayOutcome {
        enemies: enemies.iter().map(EnemyState::from).collect(),
        bursts: events
            .iter()
            .filter(|event| matches!(event, Event::ParticleBurst(_)))
            .count(),
    }
}

fn roster() -> Vec<Enemy> {
    let difficulty = DifficultyConfig::default();
    EnemyKind::ALL
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            let position = Vec2::new(100.0 + index as f32 * 110.0, 120.0 + index as f32 * 60.0);
            let mut enemy = Enemy::spawn(EnemyId::new(index as u32), *kind, position, 8, &difficulty);
            if *kind == EnemyKind::Berserker {
                let _ = enemy.take_damage(enemy.max_health() * 0.75);
            }
            enemy
        })
        .collect()
}

fn orbit(tick: u32) -> Vec2 {
    let phase = tick as f32 * 0.01;
    Vec2::new(600.0 + phase.cos() * 200.0, 450.0 + phase.sin() * 150.0)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    enemies: Vec<EnemyState>,
    bursts: usize,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct EnemyState {
    id: EnemyId,
    position: (u32, u32),
    angle: u32,
    vulnerable: bool,
}

impl From<&Enemy> for EnemyState {
    fn from(enemy: &Enemy) -> Self {
        Self {
            id: enemy.id(),
            position: (enemy.position().x.to_bits(), enemy.position().y.to_bits()),
            angle: enemy.angle().to_bits(),
            vulnerable: enemy.is_vulnerable(),
        }
    }
}
