use galactic_defender_core::{
    AbilityError, ActiveAbility, EnemyKind, Event, HeldKeys, Key, PlayerClass,
};
use galactic_defender_system_abilities::{enemies_move, Abilities};
use galactic_defender_world::{config::AbilityConfig, query, Enemy, SimulationConfig, World};
use glam::Vec2;

fn world() -> World {
    World::new(SimulationConfig::default(), PlayerClass::Tank, 5)
}

fn place_enemy(world: &mut World, offset: Vec2) {
    let mut parts = world.parts();
    let id = parts.enemy_ids.allocate();
    let position = parts.player.position() + offset;
    parts.enemies.push(Enemy::spawn(
        id,
        EnemyKind::Drone,
        position,
        1,
        &parts.config.difficulty,
    ));
}

fn pressing(ability: ActiveAbility) -> HeldKeys {
    HeldKeys::empty().with(Key::Ability(ability))
}

#[test]
fn nuke_depletes_enemies_inside_the_blast() {
    let mut world = world();
    place_enemy(&mut world, Vec2::new(100.0, 0.0));
    place_enemy(&mut world, Vec2::new(0.0, 500.0));
    let mut abilities = Abilities::new();
    let mut out = Vec::new();

    abilities.handle(
        pressing(ActiveAbility::Nuke),
        HeldKeys::empty(),
        &mut world.parts(),
        &mut out,
    );

    let enemies = query::enemies(&world);
    assert!(enemies[0].is_dead());
    assert!(!enemies[1].is_dead());
    assert_eq!(
        query::abilities(&world).charges(ActiveAbility::Nuke),
        Some(2)
    );
    assert!(out.contains(&Event::AbilityActivated {
        ability: ActiveAbility::Nuke
    }));
    assert!(out
        .iter()
        .any(|event| matches!(event, Event::ScreenShake { .. })));
}

#[test]
fn a_fresh_press_during_the_cooldown_is_rejected() {
    let mut world = world();
    let mut abilities = Abilities::new();
    let mut out = Vec::new();
    let nuke = pressing(ActiveAbility::Nuke);

    abilities.handle(nuke, HeldKeys::empty(), &mut world.parts(), &mut out);
    out.clear();
    abilities.handle(nuke, HeldKeys::empty(), &mut world.parts(), &mut out);

    assert_eq!(
        out,
        vec![Event::AbilityRejected {
            ability: ActiveAbility::Nuke,
            reason: AbilityError::CoolingDown { ticks: 899 },
        }]
    );
    assert_eq!(
        query::abilities(&world).charges(ActiveAbility::Nuke),
        Some(2)
    );
}

#[test]
fn holding_the_key_does_not_retrigger() {
    let mut world = world();
    let mut abilities = Abilities::new();
    let mut out = Vec::new();
    let freeze = pressing(ActiveAbility::TimeFreeze);

    abilities.handle(freeze, freeze, &mut world.parts(), &mut out);

    assert!(out.is_empty());
    assert!(!query::abilities(&world).is_active(ActiveAbility::TimeFreeze));
}

#[test]
fn barrier_keeps_the_ship_invulnerable() {
    let mut world = world();
    let mut abilities = Abilities::new();
    let mut out = Vec::new();

    abilities.handle(
        pressing(ActiveAbility::Barrier),
        HeldKeys::empty(),
        &mut world.parts(),
        &mut out,
    );

    assert_eq!(query::player(&world).invulnerable(), 300);
    let mut parts = world.parts();
    let config = parts.config;
    assert!(!parts.player.take_damage(80.0, &config.player));
}

#[test]
fn timed_abilities_report_their_expiry_once() {
    let mut world = world();
    let mut abilities = Abilities::new();
    let mut out = Vec::new();

    abilities.handle(
        pressing(ActiveAbility::Magnetism),
        HeldKeys::empty(),
        &mut world.parts(),
        &mut out,
    );
    out.clear();
    for _ in 0..300 {
        abilities.handle(
            HeldKeys::empty(),
            HeldKeys::empty(),
            &mut world.parts(),
            &mut out,
        );
    }

    assert_eq!(
        out,
        vec![Event::AbilityExpired {
            ability: ActiveAbility::Magnetism
        }]
    );
}

#[test]
fn frozen_enemies_only_move_on_a_roll() {
    let config = SimulationConfig {
        abilities: AbilityConfig {
            freeze_move_chance: 0.0,
            ..Default::default()
        },
        ..SimulationConfig::default()
    };
    let mut world = World::new(config, PlayerClass::Sniper, 5);
    assert!(enemies_move(&mut world.parts()));

    let mut out = Vec::new();
    Abilities::new()
        .activate(ActiveAbility::TimeFreeze, &mut world.parts(), &mut out)
        .expect("freeze ready");

    for _ in 0..50 {
        assert!(!enemies_move(&mut world.parts()));
    }
}
