#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep orchestration of a Galactic Defender run.
//!
//! [`Simulation`] owns the [`World`] and every system. Adapters feed it wall
//! time and input through [`Simulation::advance`] and menu style requests
//! through [`Simulation::apply`]; it answers with [`Event`] values. Wall time
//! is accumulated and converted into whole ticks of 1/60 s. Within a tick the
//! systems always run in the same order:
//!
//! 1. player movement and dash
//! 2. weapon selection and reloading
//! 3. active abilities
//! 4. turret deployment
//! 5. weapons
//! 6. enemy behaviors, held back while time is frozen
//! 7. collisions and damage
//! 8. combo and bloodlust timers
//! 9. wave bookkeeping
//! 10. level-ups
//! 11. turrets
//! 12. powerup drops and pickups
//!
//! Weapon selection is level triggered; the reload, ability, and turret keys
//! act on the tick they are first pressed.
//!
//! While the level-up menu is open, before a class is chosen, and after the
//! player is destroyed the tick body is skipped. The HUD snapshot is still
//! emitted once per [`Simulation::advance`] call so the presentation stays live.

use std::time::Duration;

use galactic_defender_core::{
    Command, DeployError, Event, HeldKeys, InputSnapshot, Key, PlayerClass, SelectionError,
    TICKS_PER_SECOND,
};
use galactic_defender_system_abilities::{enemies_move, Abilities};
use galactic_defender_system_combat::CombatResolver;
use galactic_defender_system_enemy_ai::EnemyAi;
use galactic_defender_system_powerups::Powerups;
use galactic_defender_system_progression::Progression;
use galactic_defender_system_turret::{reject, Turrets};
use galactic_defender_system_wave_director::WaveDirector;
use galactic_defender_system_weapons::Weapons;
use galactic_defender_world::{query, SimulationConfig, World};
use thiserror::Error;

/// Simulated time covered by one tick.
pub const TICK: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// Lifecycle of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No class has been chosen yet.
    AwaitingClass,
    /// The run is live.
    Running,
    /// The player ship was destroyed.
    GameOver,
}

/// Reasons a [`Command`] was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// An upgrade menu request was refused.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// A turret deployment was refused.
    #[error(transparent)]
    Deploy(#[from] DeployError),
}

/// Authoritative game loop.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    phase: Phase,
    accumulator: Duration,
    previous_keys: HeldKeys,
    weapons: Weapons,
    abilities: Abilities,
    enemy_ai: EnemyAi,
    combat: CombatResolver,
    waves: WaveDirector,
    progression: Progression,
    turrets: Turrets,
    powerups: Powerups,
}

impl Simulation {
    /// Creates a simulation that waits for a class selection.
    #[must_use]
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        Self::build(World::new(config, PlayerClass::Tank, seed), Phase::AwaitingClass)
    }

    /// Creates a simulation already running with `class`.
    #[must_use]
    pub fn with_class(config: SimulationConfig, class: PlayerClass, seed: u64) -> Self {
        Self::build(World::new(config, class, seed), Phase::Running)
    }

    fn build(world: World, phase: Phase) -> Self {
        Self {
            world,
            phase,
            accumulator: Duration::ZERO,
            previous_keys: HeldKeys::empty(),
            weapons: Weapons::new(),
            abilities: Abilities::new(),
            enemy_ai: EnemyAi::new(),
            combat: CombatResolver::new(),
            waves: WaveDirector::new(),
            progression: Progression::new(),
            turrets: Turrets::new(),
            powerups: Powerups::new(),
        }
    }

    /// Read-only access to the world for presentation and tests.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether ticks are currently skipped.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase != Phase::Running || query::levels(&self.world).menu_open
    }

    /// Accumulates `elapsed` wall time and runs the whole ticks it covers.
    ///
    /// At most `timing.max_catch_up_ticks` ticks run per call and any time
    /// beyond that is dropped. Time that passes while paused is discarded.
    /// Returns the number of ticks run.
    pub fn advance(
        &mut self,
        elapsed: Duration,
        input: &InputSnapshot,
        out: &mut Vec<Event>,
    ) -> u32 {
        let limit = query::config(&self.world).timing.max_catch_up_ticks;
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let mut ticks = 0;
        while self.accumulator >= TICK && ticks < limit {
            if self.is_paused() {
                break;
            }
            self.accumulator -= TICK;
            self.step(input, out);
            ticks += 1;
        }

        if self.is_paused() || self.accumulator >= TICK {
            self.accumulator = Duration::ZERO;
        }

        out.push(Event::Hud(query::hud(&self.world)));
        ticks
    }

    /// Runs exactly one tick, ignoring the accumulator.
    ///
    /// Does nothing while paused.
    pub fn tick(&mut self, input: &InputSnapshot, out: &mut Vec<Event>) {
        if !self.is_paused() {
            self.step(input, out);
        }
    }

    /// Applies a discrete command.
    ///
    /// Refused requests leave the run untouched; they are reported through a
    /// rejection event as well as the returned error.
    pub fn apply(&mut self, command: Command, out: &mut Vec<Event>) -> Result<(), CommandError> {
        match command {
            Command::SelectClass { class } => {
                self.world.select_class(class);
                self.restart_clock();
                self.phase = Phase::Running;
                tracing::info!(class = ?class, "class selected");
                out.push(Event::ClassSelected { class });
            }
            Command::SelectUpgrade { index } => {
                let _upgrade =
                    self.progression
                        .select_upgrade(index, &mut self.world.parts(), out)?;
            }
            Command::DeferUpgrade => {
                self.progression.defer(&mut self.world.parts(), out)?;
            }
            Command::DeployTurret => {
                if self.is_paused() {
                    reject(DeployError::NotRunning, out);
                    return Err(DeployError::NotRunning.into());
                }
                let _turret = self.turrets.deploy(&mut self.world.parts(), out)?;
            }
            Command::Restart => {
                self.world.reset();
                self.restart_clock();
                if self.phase == Phase::GameOver {
                    self.phase = Phase::Running;
                }
                tracing::info!(seed = query::seed(&self.world), "run reset");
                out.push(Event::RunReset);
            }
        }
        Ok(())
    }

    fn restart_clock(&mut self) {
        self.accumulator = Duration::ZERO;
        self.previous_keys = HeldKeys::empty();
    }

    fn step(&mut self, input: &InputSnapshot, out: &mut Vec<Event>) {
        let first_event = out.len();
        let held = input.held;
        let previous = self.previous_keys;
        self.previous_keys = held;
        self.world.advance_tick();
        let mut parts = self.world.parts();
        let config = parts.config;
        let playfield = config.world.playfield();

        if let Some(dash) = parts
            .player
            .update(input, parts.stats, &config.player, playfield)
        {
            out.push(Event::PlayerDashed {
                from: dash.from,
                to: dash.to,
            });
        }

        self.weapons.manage_arsenal(held, previous, &mut parts, out);
        self.abilities.handle(held, previous, &mut parts, out);

        if held.pressed_since(previous, Key::DeployTurret) {
            let _refused = self.turrets.deploy(&mut parts, out);
        }

        self.weapons.handle(input, &mut parts, out);

        if enemies_move(&mut parts) {
            let player = parts.player.position();
            self.enemy_ai.handle(
                parts.enemies.as_mut_slice(),
                player,
                playfield,
                &config.difficulty,
                out,
            );
        }

        self.combat.handle(&mut parts, out);

        parts.score.decay();
        parts.score.bloodlust_timer = parts.score.bloodlust_timer.saturating_sub(1);

        self.waves.handle(&mut parts, out);
        self.progression.handle(&mut parts, out);
        self.turrets.handle(&mut parts, out);

        self.powerups.note_kills(&out[first_event..]);
        self.powerups.handle(&mut parts, out);

        if parts.player.is_dead() {
            let score = parts.score.score;
            let wave = parts.waves.wave;
            let level = parts.levels.level;
            parts.levels.close_menu();
            self.phase = Phase::GameOver;

            tracing::info!(score, wave, level, tick = parts.tick, "game over");
            out.push(Event::GameOver { score, wave, level });
        }
    }
}
