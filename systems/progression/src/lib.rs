#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Experience, level-ups, and the upgrade menu.
//!
//! A level-up offers a handful of distinct upgrades drawn from the catalog
//! entries the current class and build are eligible for. Each draw first rolls
//! a rarity tier by weight and then picks uniformly within that tier, widening
//! to the whole eligible pool when the tier has nothing left. While the menu
//! is open the simulation is paused; choosing or deferring resumes it.

use galactic_defender_core::{catalog, Event, PlayerClass, Rarity, SelectionError, UpgradeId};
use galactic_defender_world::{PlayerStats, WorldParts};
use rand::Rng;

/// Level-up bookkeeping and upgrade selection.
#[derive(Debug, Default)]
pub struct Progression {
    pool: Vec<UpgradeId>,
    tier: Vec<usize>,
}

impl Progression {
    /// Creates the system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Levels the pilot up once when the banked experience reaches the threshold.
    ///
    /// Surplus experience stays banked, so a large gain levels up again on a
    /// later tick once the menu has been dealt with.
    pub fn handle(&mut self, parts: &mut WorldParts<'_>, out: &mut Vec<Event>) {
        let levels = &mut *parts.levels;
        if levels.menu_open || levels.experience < levels.experience_to_next {
            return;
        }

        let progression = &parts.config.progression;
        levels.experience -= levels.experience_to_next;
        levels.level = levels.level.saturating_add(1);
        levels.experience_to_next =
            next_threshold(levels.experience_to_next, progression.threshold_growth);

        let mut options = Vec::with_capacity(progression.options_per_level);
        self.generate_options(
            parts.class,
            parts.stats,
            progression.options_per_level,
            &mut *parts.rng,
            &mut options,
        );

        levels.menu_open = !options.is_empty();
        levels.options.clone_from(&options);

        tracing::info!(
            level = levels.level,
            offered = options.len(),
            next = levels.experience_to_next,
            "level up"
        );
        out.push(Event::LevelUp {
            level: levels.level,
            options,
        });
    }

    /// Draws up to `count` distinct upgrades `class` may take with `stats` into `out`.
    ///
    /// Fewer options are produced only when the eligible pool runs dry.
    pub fn generate_options<R: Rng>(
        &mut self,
        class: PlayerClass,
        stats: &PlayerStats,
        count: usize,
        rng: &mut R,
        out: &mut Vec<UpgradeId>,
    ) {
        out.clear();
        self.pool.clear();
        self.pool.extend(
            catalog()
                .iter()
                .filter(|upgrade| stats.is_eligible(class, upgrade))
                .map(|upgrade| upgrade.id),
        );

        while out.len() < count && !self.pool.is_empty() {
            let rarity = roll_rarity(rng);
            self.tier.clear();
            self.tier.extend(
                self.pool
                    .iter()
                    .enumerate()
                    .filter(|(_, id)| id.upgrade().rarity == rarity)
                    .map(|(index, _)| index),
            );

            let index = if self.tier.is_empty() {
                rng.gen_range(0..self.pool.len())
            } else {
                self.tier[rng.gen_range(0..self.tier.len())]
            };
            out.push(self.pool.remove(index));
        }
    }

    /// Applies the offered upgrade at `index` and closes the menu.
    ///
    /// Requests made while the menu is closed or with an index outside the
    /// offer change nothing and are reported through an
    /// [`Event::UpgradeSelectionRejected`].
    pub fn select_upgrade(
        &mut self,
        index: usize,
        parts: &mut WorldParts<'_>,
        out: &mut Vec<Event>,
    ) -> Result<UpgradeId, SelectionError> {
        let levels = &mut *parts.levels;
        let chosen = if levels.menu_open {
            levels
                .options
                .get(index)
                .copied()
                .ok_or(SelectionError::OutOfRange {
                    index,
                    offered: levels.options.len(),
                })
        } else {
            Err(SelectionError::MenuClosed)
        };

        let upgrade = match chosen {
            Ok(upgrade) => upgrade,
            Err(reason) => {
                tracing::warn!(index, %reason, "upgrade selection ignored");
                out.push(Event::UpgradeSelectionRejected { index, reason });
                return Err(reason);
            }
        };

        parts.stats.apply(upgrade.upgrade().effect, parts.player);
        levels.close_menu();

        tracing::info!(upgrade = ?upgrade, level = levels.level, "upgrade applied");
        out.push(Event::UpgradeApplied { upgrade });
        Ok(upgrade)
    }

    /// Closes the menu without applying anything.
    pub fn defer(
        &mut self,
        parts: &mut WorldParts<'_>,
        out: &mut Vec<Event>,
    ) -> Result<(), SelectionError> {
        if !parts.levels.menu_open {
            tracing::warn!("no upgrade menu to defer");
            return Err(SelectionError::MenuClosed);
        }

        parts.levels.close_menu();
        tracing::debug!(level = parts.levels.level, "upgrade deferred");
        out.push(Event::UpgradeDeferred);
        Ok(())
    }
}

/// Rolls a rarity tier with the 60:30:10 tier weights.
pub fn roll_rarity<R: Rng>(rng: &mut R) -> Rarity {
    let mut ticket = rng.gen_range(0..Rarity::total_weight());
    for rarity in Rarity::ALL {
        if ticket < rarity.weight() {
            return rarity;
        }
        ticket -= rarity.weight();
    }
    Rarity::Rare
}

/// Threshold following `current` after a level-up, always strictly larger.
#[must_use]
pub fn next_threshold(current: u32, growth: f32) -> u32 {
    let grown = (current as f32 * growth).floor() as u32;
    grown.max(current.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use galactic_defender_core::{AbilityFlag, UpgradeEffect};
    use galactic_defender_world::{query, SimulationConfig, World};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world(class: PlayerClass) -> World {
        World::new(SimulationConfig::default(), class, 42)
    }

    fn bank(world: &mut World, experience: u32) {
        world.parts().levels.experience = experience;
    }

    #[test]
    fn thresholds_grow_by_the_configured_factor() {
        assert_eq!(next_threshold(200, 1.8), 360);
        assert_eq!(next_threshold(360, 1.8), 648);
        assert_eq!(next_threshold(1, 1.01), 2);
    }

    #[test]
    fn rarity_rolls_follow_the_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let draws: u32 = 100_000;
        let mut counts = [0_u32; 3];

        for _ in 0..draws {
            counts[roll_rarity(&mut rng) as usize] += 1;
        }

        let share = |count: u32| f64::from(count) / f64::from(draws);
        assert!((share(counts[0]) - 0.6).abs() < 0.01, "{counts:?}");
        assert!((share(counts[1]) - 0.3).abs() < 0.01, "{counts:?}");
        assert!((share(counts[2]) - 0.1).abs() < 0.01, "{counts:?}");
    }

    #[test]
    fn level_up_opens_the_menu_with_distinct_options() {
        let mut world = world(PlayerClass::Tank);
        let mut progression = Progression::new();
        let mut out = Vec::new();
        bank(&mut world, 250);

        progression.handle(&mut world.parts(), &mut out);

        let levels = query::levels(&world);
        assert_eq!(levels.level, 2);
        assert_eq!(levels.experience, 50);
        assert_eq!(levels.experience_to_next, 360);
        assert!(levels.menu_open);
        assert_eq!(levels.options.len(), 3);
        let mut unique = levels.options.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);
        assert!(matches!(out.as_slice(), [Event::LevelUp { level: 2, .. }]));
    }

    #[test]
    fn options_respect_class_filters() {
        let stats = PlayerStats::for_class(PlayerClass::Sniper);
        let mut progression = Progression::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut options = Vec::new();

        for _ in 0..200 {
            progression.generate_options(PlayerClass::Sniper, &stats, 3, &mut rng, &mut options);
            for id in &options {
                assert!(id.upgrade().classes.admits(PlayerClass::Sniper), "{id:?}");
            }
        }
    }

    #[test]
    fn owned_abilities_are_never_offered_again() {
        let mut world = world(PlayerClass::Hunter);
        {
            let mut parts = world.parts();
            parts.stats.apply(
                UpgradeEffect::Ability(AbilityFlag::PiercingShots),
                parts.player,
            );
        }
        let stats = query::stats(&world).clone();
        let mut progression = Progression::new();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut options = Vec::new();

        for _ in 0..500 {
            progression.generate_options(PlayerClass::Hunter, &stats, 3, &mut rng, &mut options);
            assert!(!options.contains(&UpgradeId::Piercing));
            assert!(!options.contains(&UpgradeId::Homing));
        }
    }

    #[test]
    fn exhausted_pool_offers_what_remains() {
        let stats = PlayerStats::for_class(PlayerClass::Tank);
        let mut progression = Progression::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut options = Vec::new();

        progression.generate_options(PlayerClass::Tank, &stats, 500, &mut rng, &mut options);

        let eligible = catalog()
            .iter()
            .filter(|upgrade| stats.is_eligible(PlayerClass::Tank, upgrade))
            .count();
        assert_eq!(options.len(), eligible);
    }

    #[test]
    fn selecting_applies_the_effect_and_resumes() {
        let mut world = world(PlayerClass::Tank);
        let mut progression = Progression::new();
        let mut out = Vec::new();
        bank(&mut world, 200);
        progression.handle(&mut world.parts(), &mut out);
        let offered = query::levels(&world).options[1];

        let chosen = progression.select_upgrade(1, &mut world.parts(), &mut out);

        assert_eq!(chosen, Ok(offered));
        assert!(!query::levels(&world).menu_open);
        assert!(query::levels(&world).options.is_empty());
        assert_eq!(out.last(), Some(&Event::UpgradeApplied { upgrade: offered }));
    }

    #[test]
    fn out_of_range_selection_changes_nothing() {
        let mut world = world(PlayerClass::Tank);
        let mut progression = Progression::new();
        let mut out = Vec::new();
        bank(&mut world, 200);
        progression.handle(&mut world.parts(), &mut out);
        let before = query::levels(&world).clone();
        let stats = query::stats(&world).clone();

        let rejected = progression.select_upgrade(7, &mut world.parts(), &mut out);

        let reason = SelectionError::OutOfRange {
            index: 7,
            offered: 3,
        };
        assert_eq!(rejected, Err(reason));
        assert_eq!(query::levels(&world), &before);
        assert_eq!(query::stats(&world), &stats);
        assert_eq!(
            out.last(),
            Some(&Event::UpgradeSelectionRejected { index: 7, reason })
        );
    }

    #[test]
    fn selection_without_a_menu_is_rejected() {
        let mut world = world(PlayerClass::Tank);
        let mut progression = Progression::new();
        let mut out = Vec::new();

        let rejected = progression.select_upgrade(0, &mut world.parts(), &mut out);

        assert_eq!(rejected, Err(SelectionError::MenuClosed));
        assert_eq!(
            progression.defer(&mut world.parts(), &mut out),
            Err(SelectionError::MenuClosed)
        );
    }

    #[test]
    fn deferring_keeps_the_build_and_levels_again_later() {
        let mut world = world(PlayerClass::Tank);
        let mut progression = Progression::new();
        let mut out = Vec::new();
        bank(&mut world, 600);
        progression.handle(&mut world.parts(), &mut out);
        let stats = query::stats(&world).clone();

        assert_eq!(progression.defer(&mut world.parts(), &mut out), Ok(()));
        assert_eq!(query::stats(&world), &stats);
        assert!(!query::levels(&world).menu_open);

        progression.handle(&mut world.parts(), &mut out);
        let levels = query::levels(&world);
        assert_eq!(levels.level, 3);
        assert_eq!(levels.experience, 40);
        assert!(levels.menu_open);
    }
}
