use galactic_defender_core::{Event, PlayerClass};
use galactic_defender_system_wave_director::WaveDirector;
use galactic_defender_world::{query, SimulationConfig, World};

fn world() -> World {
    World::new(SimulationConfig::default(), PlayerClass::Tank, 0x00c0_ffee)
}

fn clear_field(world: &mut World) {
    let mut parts = world.parts();
    for _ in 0..parts.enemies.len() {
        parts.waves.record_removal();
    }
    parts.enemies.clear();
}

#[test]
fn first_tick_spawns_the_opening_wave() {
    let mut world = world();
    let mut director = WaveDirector::new();
    let mut out = Vec::new();

    director.handle(&mut world.parts(), &mut out);

    let waves = query::waves(&world);
    assert!(waves.in_progress);
    assert_eq!(waves.wave, 1);
    assert_eq!(waves.enemies_in_wave, 5);
    assert_eq!(query::enemies(&world).len(), 5);
    assert_eq!(
        out.last(),
        Some(&Event::WaveStarted {
            wave: 1,
            enemies: 5
        })
    );
    let spawned = out
        .iter()
        .filter(|event| matches!(event, Event::EnemySpawned { .. }))
        .count();
    assert_eq!(spawned, 5);
}

#[test]
fn spawns_keep_the_safe_distance() {
    let mut world = world();
    let mut director = WaveDirector::new();
    let mut out = Vec::new();

    director.handle(&mut world.parts(), &mut out);

    let player = query::player(&world).position();
    let safe = query::config(&world).waves.safe_distance;
    for enemy in query::enemies(&world) {
        assert!(enemy.position().distance(player) >= safe - 1e-3);
    }
}

#[test]
fn cleared_wave_completes_exactly_once_and_pays_the_bonus() {
    let mut world = world();
    let mut director = WaveDirector::new();
    let mut out = Vec::new();

    director.handle(&mut world.parts(), &mut out);
    clear_field(&mut world);
    out.clear();

    for _ in 0..10 {
        director.handle(&mut world.parts(), &mut out);
    }

    let completions: Vec<_> = out
        .iter()
        .filter(|event| matches!(event, Event::WaveCompleted { .. }))
        .collect();
    assert_eq!(
        completions,
        vec![&Event::WaveCompleted {
            wave: 1,
            bonus: 100
        }]
    );
    assert_eq!(query::score(&world).score, 100);
    assert_eq!(query::waves(&world).wave, 2);
    assert!(!query::waves(&world).in_progress);
}

#[test]
fn next_wave_starts_after_the_breather() {
    let mut world = world();
    let mut director = WaveDirector::new();
    let mut out = Vec::new();

    director.handle(&mut world.parts(), &mut out);
    clear_field(&mut world);
    director.handle(&mut world.parts(), &mut out);
    out.clear();

    for _ in 0..179 {
        director.handle(&mut world.parts(), &mut out);
    }
    assert!(out.is_empty());

    director.handle(&mut world.parts(), &mut out);
    assert_eq!(
        out.last(),
        Some(&Event::WaveStarted {
            wave: 2,
            enemies: 8
        })
    );
    assert_eq!(query::enemies(&world).len(), 8);
}

#[test]
fn next_wave_waits_for_stragglers_after_the_breather() {
    let mut world = world();
    let mut director = WaveDirector::new();
    let mut out = Vec::new();

    director.handle(&mut world.parts(), &mut out);
    {
        let mut parts = world.parts();
        for _ in 0..parts.enemies.len() {
            parts.waves.record_removal();
        }
        parts.enemies.truncate(1);
    }
    director.handle(&mut world.parts(), &mut out);
    assert_eq!(query::waves(&world).wave, 2);
    out.clear();

    for _ in 0..400 {
        director.handle(&mut world.parts(), &mut out);
    }
    assert!(out.is_empty());
    assert_eq!(query::waves(&world).transition_timer, 0);
    assert!(!query::waves(&world).in_progress);
    assert_eq!(query::enemies(&world).len(), 1);

    world.parts().enemies.clear();
    director.handle(&mut world.parts(), &mut out);

    assert_eq!(
        out.last(),
        Some(&Event::WaveStarted {
            wave: 2,
            enemies: 8
        })
    );
    assert_eq!(query::enemies(&world).len(), 8);
}

#[test]
fn identical_seeds_spawn_identical_waves() {
    let spawn = |seed: u64| {
        let mut world = World::new(SimulationConfig::default(), PlayerClass::Hunter, seed);
        let mut out = Vec::new();
        WaveDirector::new().handle(&mut world.parts(), &mut out);
        out
    };

    assert_eq!(spawn(11), spawn(11));
    assert_ne!(spawn(11), spawn(12));
}
