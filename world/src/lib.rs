#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for Galactic Defender.
//!
//! The [`World`] owns every entity and counter of a run. Systems never hold on
//! to it; each tick they borrow the disjoint pieces they need through
//! [`World::parts`], while adapters and tests observe it through the read-only
//! functions in [`query`].

mod abilities;
mod arsenal;
pub mod config;
mod enemy;
mod player;
mod powerup;
mod progress;
mod projectile;
mod stats;
mod turret;

use galactic_defender_core::{EnemyId, PlayerClass};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use abilities::AbilityTimers;
pub use arsenal::Arsenal;
pub use config::{ConfigError, SimulationConfig};
pub use enemy::{BehaviorState, Enemy};
pub use player::{Dash, Player};
pub use powerup::Powerup;
pub use progress::{LevelState, ScoreState, WaveState};
pub use projectile::{Homing, Projectile, BOUNDS_PADDING};
pub use stats::PlayerStats;
pub use turret::{Turret, TurretBay, TURRET_COLOR};

/// Hands out monotonically increasing enemy identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnemyIds {
    next: u32,
}

impl EnemyIds {
    /// Reserves the next identifier.
    pub fn allocate(&mut self) -> EnemyId {
        let id = EnemyId::new(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Represents the authoritative state of a single run.
#[derive(Debug)]
pub struct World {
    config: SimulationConfig,
    class: PlayerClass,
    seed: u64,
    rng: ChaCha8Rng,
    player: Player,
    stats: PlayerStats,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    turrets: TurretBay,
    powerups: Vec<Powerup>,
    abilities: AbilityTimers,
    waves: WaveState,
    levels: LevelState,
    score: ScoreState,
    enemy_ids: EnemyIds,
    tick_index: u64,
}

impl World {
    /// Creates a fresh run for `class` whose random draws derive from `seed`.
    #[must_use]
    pub fn new(config: SimulationConfig, class: PlayerClass, seed: u64) -> Self {
        let center = config.world.playfield().center();
        let player = Player::spawn(&config.player, class, center);
        let levels = LevelState::new(&config.progression);
        Self {
            class,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            player,
            stats: PlayerStats::for_class(class),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            turrets: TurretBay::default(),
            powerups: Vec::new(),
            abilities: AbilityTimers::new(),
            waves: WaveState::new(),
            levels,
            score: ScoreState::new(),
            enemy_ids: EnemyIds::default(),
            tick_index: 0,
            config,
        }
    }

    /// Reinitialises every piece of run state, keeping the class and seed.
    ///
    /// A reset world replays exactly like a newly created one.
    pub fn reset(&mut self) {
        let center = self.config.world.playfield().center();
        self.player.reset(center);
        self.stats = PlayerStats::for_class(self.class);
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.enemies.clear();
        self.projectiles.clear();
        self.turrets.clear();
        self.powerups.clear();
        self.abilities = AbilityTimers::new();
        self.waves = WaveState::new();
        self.levels = LevelState::new(&self.config.progression);
        self.score = ScoreState::new();
        self.enemy_ids = EnemyIds::default();
        self.tick_index = 0;
    }

    /// Switches the pilot class and starts over.
    pub fn select_class(&mut self, class: PlayerClass) {
        self.class = class;
        let center = self.config.world.playfield().center();
        self.player = Player::spawn(&self.config.player, class, center);
        self.reset();
    }

    /// Advances the tick counter.
    pub fn advance_tick(&mut self) {
        self.tick_index = self.tick_index.saturating_add(1);
    }

    /// Splits the world into independently borrowable pieces.
    pub fn parts(&mut self) -> WorldParts<'_> {
        WorldParts {
            config: &self.config,
            class: self.class,
            seed: self.seed,
            tick: self.tick_index,
            rng: &mut self.rng,
            player: &mut self.player,
            stats: &mut self.stats,
            enemies: &mut self.enemies,
            projectiles: &mut self.projectiles,
            turrets: &mut self.turrets,
            powerups: &mut self.powerups,
            abilities: &mut self.abilities,
            waves: &mut self.waves,
            levels: &mut self.levels,
            score: &mut self.score,
            enemy_ids: &mut self.enemy_ids,
        }
    }
}

/// Disjoint mutable view over the world handed to systems for one tick.
#[derive(Debug)]
pub struct WorldParts<'a> {
    /// Tunables of the run.
    pub config: &'a SimulationConfig,
    /// Pilot class.
    pub class: PlayerClass,
    /// Run seed.
    pub seed: u64,
    /// Ticks simulated so far.
    pub tick: u64,
    /// Run-wide random source.
    pub rng: &'a mut ChaCha8Rng,
    /// The player ship.
    pub player: &'a mut Player,
    /// Accumulated build.
    pub stats: &'a mut PlayerStats,
    /// Live enemies in spawn order.
    pub enemies: &'a mut Vec<Enemy>,
    /// Player projectiles in flight.
    pub projectiles: &'a mut Vec<Projectile>,
    /// Deployed turrets.
    pub turrets: &'a mut TurretBay,
    /// Pickups lying on the field.
    pub powerups: &'a mut Vec<Powerup>,
    /// Active ability timers.
    pub abilities: &'a mut AbilityTimers,
    /// Wave bookkeeping.
    pub waves: &'a mut WaveState,
    /// Level bookkeeping.
    pub levels: &'a mut LevelState,
    /// Score bookkeeping.
    pub score: &'a mut ScoreState,
    /// Enemy identifier source.
    pub enemy_ids: &'a mut EnemyIds,
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use galactic_defender_core::{HudSnapshot, PlayerClass, Playfield};

    use super::{
        AbilityTimers, Enemy, LevelState, Player, PlayerStats, Powerup, Projectile, ScoreState,
        SimulationConfig, TurretBay, WaveState, World,
    };

    /// Tunables the world was built with.
    #[must_use]
    pub fn config(world: &World) -> &SimulationConfig {
        &world.config
    }

    /// Rectangle the ships move within.
    #[must_use]
    pub fn playfield(world: &World) -> Playfield {
        world.config.world.playfield()
    }

    /// Pilot class of the run.
    #[must_use]
    pub fn class(world: &World) -> PlayerClass {
        world.class
    }

    /// Seed every random draw of the run derives from.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Ticks simulated since the run started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// The player ship.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// The accumulated build.
    #[must_use]
    pub fn stats(world: &World) -> &PlayerStats {
        &world.stats
    }

    /// Live enemies in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        &world.enemies
    }

    /// Player projectiles in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> &[Projectile] {
        &world.projectiles
    }

    /// Deployed turrets.
    #[must_use]
    pub fn turrets(world: &World) -> &TurretBay {
        &world.turrets
    }

    /// Pickups lying on the field.
    #[must_use]
    pub fn powerups(world: &World) -> &[Powerup] {
        &world.powerups
    }

    /// Active ability timers.
    #[must_use]
    pub fn abilities(world: &World) -> &AbilityTimers {
        &world.abilities
    }

    /// Wave bookkeeping.
    #[must_use]
    pub fn waves(world: &World) -> &WaveState {
        &world.waves
    }

    /// Level bookkeeping, including the open menu.
    #[must_use]
    pub fn levels(world: &World) -> &LevelState {
        &world.levels
    }

    /// Score and combo.
    #[must_use]
    pub fn score(world: &World) -> &ScoreState {
        &world.score
    }

    /// Values shown on the heads-up display.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        HudSnapshot {
            health_fraction: world.player.health_fraction(),
            shield_fraction: world.player.shield_fraction(),
            score: world.score.score,
            wave: world.waves.wave,
            combo: world.score.combo,
            level: world.levels.level,
            experience_fraction: world.levels.progress(),
            weapon: world.player.weapon(),
            rounds: world.player.arsenal().rounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galactic_defender_core::{ActiveAbility, EnemyKind, PowerupKind, WeaponKind};
    use glam::Vec2;

    #[test]
    fn new_world_centres_the_player() {
        let world = World::new(SimulationConfig::default(), PlayerClass::Hunter, 7);

        assert_eq!(query::player(&world).position(), Vec2::new(2000.0, 1500.0));
        assert_eq!(query::waves(&world).wave, 1);
        assert_eq!(query::score(&world).combo, 1);
        assert!(query::enemies(&world).is_empty());
    }

    #[test]
    fn reset_discards_every_entity_and_counter() {
        let mut world = World::new(SimulationConfig::default(), PlayerClass::Engineer, 7);
        {
            let mut parts = world.parts();
            let id = parts.enemy_ids.allocate();
            parts.enemies.push(Enemy::spawn(
                id,
                EnemyKind::Drone,
                Vec2::new(10.0, 10.0),
                1,
                &parts.config.difficulty,
            ));
            parts.score.score = 900;
            parts.waves.wave = 4;
            parts.levels.level = 3;
            let _ = parts
                .turrets
                .deploy(Vec2::new(50.0, 50.0), &parts.config.turret);
            parts.powerups.push(Powerup::new(
                PowerupKind::Speed,
                Vec2::new(70.0, 70.0),
                &parts.config.powerups,
            ));
            parts
                .abilities
                .activate(ActiveAbility::Nuke)
                .expect("nuke ready");
        }
        world.advance_tick();

        world.reset();

        assert!(query::enemies(&world).is_empty());
        assert!(query::turrets(&world).is_empty());
        assert!(query::powerups(&world).is_empty());
        assert_eq!(query::abilities(&world).charges(ActiveAbility::Nuke), Some(3));
        assert_eq!(query::abilities(&world).cooldown(ActiveAbility::Nuke), 0);
        assert_eq!(query::score(&world).score, 0);
        assert_eq!(query::waves(&world).wave, 1);
        assert_eq!(query::levels(&world).level, 1);
        assert_eq!(query::tick_index(&world), 0);
        assert_eq!(query::class(&world), PlayerClass::Engineer);
        assert_eq!(world.parts().enemy_ids.allocate(), EnemyId::new(0));
    }

    #[test]
    fn hud_reflects_the_run_counters() {
        let mut world = World::new(SimulationConfig::default(), PlayerClass::Tank, 1);
        {
            let mut parts = world.parts();
            parts.score.score = 120;
            parts.score.combo = 3;
            parts.levels.experience = 100;
        }

        let hud = query::hud(&world);

        assert_eq!(hud.score, 120);
        assert_eq!(hud.combo, 3);
        assert_eq!(hud.health_fraction, 1.0);
        assert!((hud.experience_fraction - 0.5).abs() < 1e-6);
        assert_eq!(hud.weapon, WeaponKind::Photon);
        assert_eq!(hud.rounds, None);
    }
}
