use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use galactic_defender_core::{
    ActiveAbility, Command, Event, HeldKeys, InputSnapshot, Key, PlayerClass, SelectionError,
    WeaponKind,
};
use galactic_defender_simulation::{CommandError, Phase, Simulation, TICK};
use galactic_defender_world::{query, SimulationConfig, World};
use glam::Vec2;

fn arena() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.width = 1200.0;
    config.world.height = 900.0;
    config
}

/// Holds still and fires at the closest enemy.
fn gunner(world: &World) -> InputSnapshot {
    let player = query::player(world).position();
    let target = query::enemies(world)
        .iter()
        .map(|enemy| enemy.position())
        .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)));

    InputSnapshot {
        held: HeldKeys::empty(),
        fire: target.is_some(),
        pointer: target.unwrap_or(player),
    }
}

/// Circles the arena, dashing now and then, and fires at the closest enemy.
fn pilot(world: &World, tick: u32) -> InputSnapshot {
    let mut input = gunner(world);
    let key = match (tick / 90) % 4 {
        0 => Key::Right,
        1 => Key::Down,
        2 => Key::Left,
        _ => Key::Up,
    };
    input.held.insert(key);
    if tick % 150 == 0 {
        input.held.insert(Key::Dash);
    }
    input
}

fn run(simulation: &mut Simulation, ticks: u32, log: &mut Vec<Event>) {
    for tick in 0..ticks {
        if query::levels(simulation.world()).menu_open {
            let _ = simulation.apply(Command::SelectUpgrade { index: 0 }, log);
        }
        let input = pilot(simulation.world(), tick);
        simulation.tick(&input, log);
    }
}

#[test]
fn deterministic_replay_produces_identical_runs() {
    let replay = |seed: u64| {
        let mut simulation = Simulation::with_class(arena(), PlayerClass::Hunter, seed);
        let mut log = Vec::new();
        run(&mut simulation, 1_800, &mut log);
        (log, Snapshot::of(simulation.world()))
    };

    let (first_log, first) = replay(0x5eed);
    let (second_log, second) = replay(0x5eed);

    assert!(!first_log.is_empty());
    assert_eq!(first_log, second_log, "event logs diverged");
    assert_eq!(first, second, "world diverged");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn each_wave_completes_exactly_once() {
    let mut config = arena();
    config.waves.base_enemies = 1;
    config.waves.enemies_per_wave = 0;
    let mut simulation = Simulation::with_class(config, PlayerClass::Tank, 3);
    let mut log = Vec::new();

    for _ in 0..4_000 {
        if query::levels(simulation.world()).menu_open {
            let _ = simulation.apply(Command::DeferUpgrade, &mut log);
        }
        let input = gunner(simulation.world());
        simulation.tick(&input, &mut log);
        if query::waves(simulation.world()).wave >= 3 {
            break;
        }
    }

    let completed: Vec<u32> = log
        .iter()
        .filter_map(|event| match event {
            Event::WaveCompleted { wave, .. } => Some(*wave),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![1, 2]);
    let started: Vec<u32> = log
        .iter()
        .filter_map(|event| match event {
            Event::WaveStarted { wave, .. } => Some(*wave),
            _ => None,
        })
        .collect();
    assert_eq!(&started[..2], &[1, 2]);
}

#[test]
fn restart_restores_a_fresh_run() {
    let mut played = Simulation::with_class(arena(), PlayerClass::Berserker, 99);
    let mut log = Vec::new();
    run(&mut played, 600, &mut log);
    assert!(query::tick_index(played.world()) > 0);

    log.clear();
    assert_eq!(played.apply(Command::Restart, &mut log), Ok(()));
    assert_eq!(log, vec![Event::RunReset]);

    let fresh = Simulation::with_class(arena(), PlayerClass::Berserker, 99);
    assert_eq!(Snapshot::of(played.world()), Snapshot::of(fresh.world()));
    assert_eq!(query::hud(played.world()), query::hud(fresh.world()));
    assert_eq!(query::class(played.world()), PlayerClass::Berserker);
}

#[test]
fn a_restarted_run_replays_like_a_fresh_one() {
    let mut restarted = Simulation::with_class(arena(), PlayerClass::Sniper, 7);
    let mut scratch = Vec::new();
    run(&mut restarted, 400, &mut scratch);
    let _ = restarted.apply(Command::Restart, &mut scratch);
    let mut fresh = Simulation::with_class(arena(), PlayerClass::Sniper, 7);

    let mut restarted_log = Vec::new();
    let mut fresh_log = Vec::new();
    run(&mut restarted, 600, &mut restarted_log);
    run(&mut fresh, 600, &mut fresh_log);

    assert_eq!(restarted_log, fresh_log);
    assert_eq!(Snapshot::of(restarted.world()), Snapshot::of(fresh.world()));
}

#[test]
fn open_menu_pauses_the_simulation() {
    let mut config = arena();
    config.progression.first_threshold = 1;
    config.progression.threshold_growth = 1_000.0;
    let mut simulation = Simulation::with_class(config, PlayerClass::Hunter, 21);
    let mut log = Vec::new();

    for _ in 0..4_000 {
        if simulation.is_paused() {
            break;
        }
        let input = gunner(simulation.world());
        simulation.tick(&input, &mut log);
    }
    assert!(query::levels(simulation.world()).menu_open, "no level-up happened");
    assert!(log.iter().any(|event| matches!(event, Event::LevelUp { level: 2, .. })));

    let frozen_tick = query::tick_index(simulation.world());
    let frozen = Snapshot::of(simulation.world());
    let mut paused = Vec::new();
    let input = gunner(simulation.world());
    let ran = simulation.advance(Duration::from_secs(1), &input, &mut paused);

    assert_eq!(ran, 0);
    assert_eq!(query::tick_index(simulation.world()), frozen_tick);
    assert_eq!(Snapshot::of(simulation.world()), frozen);
    assert!(matches!(paused.as_slice(), [Event::Hud(_)]));

    let offered = query::levels(simulation.world()).options.len();
    assert_eq!(
        simulation.apply(Command::SelectUpgrade { index: offered }, &mut paused),
        Err(CommandError::Selection(SelectionError::OutOfRange {
            index: offered,
            offered,
        }))
    );
    assert!(simulation.is_paused());

    assert_eq!(
        simulation.apply(Command::SelectUpgrade { index: 0 }, &mut paused),
        Ok(())
    );
    assert!(!simulation.is_paused());
    let ran = simulation.advance(TICK * 2, &gunner(simulation.world()), &mut paused);
    assert_eq!(ran, 2);
    assert_eq!(query::tick_index(simulation.world()), frozen_tick + 2);
}

#[test]
fn losing_the_ship_ends_the_run_until_restart() {
    let mut config = arena();
    config.player.max_health = 1.0;
    config.player.max_shield = 0.0;
    let mut simulation = Simulation::with_class(config, PlayerClass::Assassin, 5);
    let mut log = Vec::new();
    let idle = InputSnapshot::default();

    for _ in 0..6_000 {
        if simulation.phase() == Phase::GameOver {
            break;
        }
        if query::levels(simulation.world()).menu_open {
            let _ = simulation.apply(Command::DeferUpgrade, &mut log);
        }
        simulation.tick(&idle, &mut log);
    }

    assert_eq!(simulation.phase(), Phase::GameOver);
    let over = log
        .iter()
        .filter(|event| matches!(event, Event::GameOver { .. }))
        .count();
    assert_eq!(over, 1);

    let tick = query::tick_index(simulation.world());
    simulation.tick(&idle, &mut log);
    assert_eq!(query::tick_index(simulation.world()), tick);

    let _ = simulation.apply(Command::Restart, &mut log);
    assert_eq!(simulation.phase(), Phase::Running);
    assert!(query::player(simulation.world()).health() > 0.0);
}

#[test]
fn class_selection_starts_the_run() {
    let mut simulation = Simulation::new(arena(), 11);
    let mut log = Vec::new();

    assert_eq!(
        simulation.apply(
            Command::SelectClass {
                class: PlayerClass::Engineer
            },
            &mut log
        ),
        Ok(())
    );
    assert_eq!(
        log,
        vec![Event::ClassSelected {
            class: PlayerClass::Engineer
        }]
    );
    assert_eq!(simulation.phase(), Phase::Running);

    let ran = simulation.advance(TICK, &InputSnapshot::default(), &mut log);
    assert_eq!(ran, 1);
    assert!(!query::enemies(simulation.world()).is_empty());
}

#[test]
fn engineers_deploy_turrets_on_key_press() {
    let mut simulation = Simulation::with_class(arena(), PlayerClass::Engineer, 4);
    let mut log = Vec::new();
    let deploy = InputSnapshot {
        held: HeldKeys::empty().with(Key::DeployTurret),
        ..InputSnapshot::default()
    };

    simulation.tick(&deploy, &mut log);
    simulation.tick(&deploy, &mut log);

    assert_eq!(query::turrets(simulation.world()).len(), 1);
    let deployed = log
        .iter()
        .filter(|event| matches!(event, Event::TurretDeployed { .. }))
        .count();
    assert_eq!(deployed, 1);
    assert!(!log
        .iter()
        .any(|event| matches!(event, Event::TurretDeploymentRejected { .. })));
}

#[test]
fn certain_drops_follow_credited_kills() {
    let replay = || {
        let mut config = arena();
        config.powerups.drop_chance = 1.0;
        let mut simulation = Simulation::with_class(config, PlayerClass::Tank, 17);
        let mut log = Vec::new();
        run(&mut simulation, 900, &mut log);
        log
    };

    let log = replay();
    let kills = log
        .iter()
        .filter(|event| matches!(event, Event::EnemyKilled { .. }))
        .count();
    let drops = log
        .iter()
        .filter(|event| matches!(event, Event::PowerupDropped { .. }))
        .count();
    assert!(kills > 0, "nothing was killed");
    assert_eq!(drops, kills);
    assert_eq!(log, replay());
}

#[test]
fn time_freeze_holds_the_swarm_in_place() {
    let mut config = arena();
    config.abilities.freeze_move_chance = 0.0;
    let mut simulation = Simulation::with_class(config, PlayerClass::Sniper, 8);
    let mut log = Vec::new();
    let idle = InputSnapshot::default();
    let freeze = InputSnapshot {
        held: HeldKeys::empty().with(Key::Ability(ActiveAbility::TimeFreeze)),
        ..InputSnapshot::default()
    };
    let positions = |simulation: &Simulation| -> Vec<(u32, Vec2)> {
        query::enemies(simulation.world())
            .iter()
            .map(|enemy| (enemy.id().get(), enemy.position()))
            .collect()
    };

    simulation.tick(&idle, &mut log);
    simulation.tick(&freeze, &mut log);
    let frozen = positions(&simulation);
    assert!(!frozen.is_empty());
    for _ in 0..100 {
        simulation.tick(&idle, &mut log);
    }

    let later = positions(&simulation);
    for (id, position) in &frozen {
        assert!(later.contains(&(*id, *position)), "enemy {id} moved");
    }
    assert!(log.contains(&Event::AbilityActivated {
        ability: ActiveAbility::TimeFreeze
    }));
    assert!(!log.contains(&Event::AbilityExpired {
        ability: ActiveAbility::TimeFreeze
    }));
}

#[test]
fn nuke_kills_are_credited_like_any_other() {
    let mut simulation = Simulation::with_class(arena(), PlayerClass::Sniper, 13);
    let mut log = Vec::new();
    let idle = InputSnapshot::default();

    let mut close = false;
    for _ in 0..2_000 {
        simulation.tick(&idle, &mut log);
        let player = query::player(simulation.world()).position();
        close = query::enemies(simulation.world())
            .iter()
            .any(|enemy| enemy.position().distance(player) < 250.0);
        if close {
            break;
        }
    }
    assert!(close, "no enemy came near the ship");
    let before = query::score(simulation.world()).score;

    log.clear();
    let nuke = InputSnapshot {
        held: HeldKeys::empty().with(Key::Ability(ActiveAbility::Nuke)),
        ..InputSnapshot::default()
    };
    simulation.tick(&nuke, &mut log);

    assert!(log
        .iter()
        .any(|event| matches!(event, Event::EnemyKilled { .. })));
    assert!(query::score(simulation.world()).score > before);
    assert_eq!(
        query::abilities(simulation.world()).charges(ActiveAbility::Nuke),
        Some(2)
    );
}

#[test]
fn weapon_keys_swap_the_equipped_weapon() {
    let mut simulation = Simulation::with_class(arena(), PlayerClass::Tank, 6);
    let mut log = Vec::new();
    let beam = InputSnapshot {
        held: HeldKeys::empty().with(Key::Weapon(WeaponKind::Beam)),
        ..InputSnapshot::default()
    };

    simulation.tick(&beam, &mut log);
    simulation.tick(&beam, &mut log);

    let switched = log
        .iter()
        .filter(|event| matches!(event, Event::WeaponSwitched { .. }))
        .count();
    assert_eq!(switched, 1);
    let hud = query::hud(simulation.world());
    assert_eq!(hud.weapon, WeaponKind::Beam);
    assert_eq!(hud.rounds, Some(50));
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Snapshot {
    tick: u64,
    player: (u32, u32, u32, u32),
    enemies: Vec<(u32, u32, u32, u32)>,
    projectiles: usize,
    turrets: usize,
    score: u64,
    combo: u32,
    wave: u32,
    in_progress: bool,
    level: u32,
    experience: u32,
}

impl Snapshot {
    fn of(world: &World) -> Self {
        let player = query::player(world);
        let waves = query::waves(world);
        let levels = query::levels(world);
        Self {
            tick: query::tick_index(world),
            player: (
                player.position().x.to_bits(),
                player.position().y.to_bits(),
                player.health().to_bits(),
                player.shield().to_bits(),
            ),
            enemies: query::enemies(world)
                .iter()
                .map(|enemy| {
                    (
                        enemy.id().get(),
                        enemy.position().x.to_bits(),
                        enemy.position().y.to_bits(),
                        enemy.health().to_bits(),
                    )
                })
                .collect(),
            projectiles: query::projectiles(world).len(),
            turrets: query::turrets(world).len(),
            score: query::score(world).score,
            combo: query::score(world).combo,
            wave: waves.wave,
            in_progress: waves.in_progress,
            level: levels.level,
            experience: levels.experience,
        }
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
