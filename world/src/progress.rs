//! Run progress counters: waves, pilot levels, and scoring.

use galactic_defender_core::UpgradeId;

use crate::config::{ProgressionConfig, WaveConfig};

/// Wave bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveState {
    /// Current wave number, starting at 1.
    pub wave: u32,
    /// Whether the current wave is being fought.
    pub in_progress: bool,
    /// Enemies spawned for the current wave.
    pub enemies_in_wave: u32,
    /// Enemies removed during the current wave, never above `enemies_in_wave`.
    pub killed_in_wave: u32,
    /// Ticks left before the next wave spawns.
    pub transition_timer: u32,
}

impl WaveState {
    /// State of a fresh run: wave 1 pending, spawning on the first tick.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wave: 1,
            in_progress: false,
            enemies_in_wave: 0,
            killed_in_wave: 0,
            transition_timer: 0,
        }
    }

    /// Counts one enemy removal toward the current wave.
    pub fn record_removal(&mut self) {
        if self.killed_in_wave < self.enemies_in_wave {
            self.killed_in_wave += 1;
        }
    }

    /// Number of enemies a wave spawns: `base + (wave - 1) * per_wave`.
    #[must_use]
    pub fn enemy_count(wave: u32, config: &WaveConfig) -> u32 {
        config
            .base_enemies
            .saturating_add(wave.saturating_sub(1).saturating_mul(config.enemies_per_wave))
    }
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pilot level and the level-up menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelState {
    /// Pilot level, starting at 1.
    pub level: u32,
    /// Experience banked toward the next level.
    pub experience: u32,
    /// Experience required for the next level.
    pub experience_to_next: u32,
    /// Upgrades currently on offer.
    pub options: Vec<UpgradeId>,
    /// Whether the level-up menu is open and the simulation paused.
    pub menu_open: bool,
}

impl LevelState {
    /// Level 1 with an empty bank.
    #[must_use]
    pub fn new(config: &ProgressionConfig) -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: config.first_threshold.max(1),
            options: Vec::new(),
            menu_open: false,
        }
    }

    /// Closes the menu and discards the offer.
    pub fn close_menu(&mut self) {
        self.menu_open = false;
        self.options.clear();
    }

    /// Fraction of the way to the next level.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.experience_to_next == 0 {
            return 0.0;
        }
        (self.experience as f32 / self.experience_to_next as f32).clamp(0.0, 1.0)
    }
}

/// Score, combo, and kill-triggered timers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreState {
    /// Accumulated score.
    pub score: u64,
    /// Current combo multiplier, at least 1.
    pub combo: u32,
    /// Ticks left before the combo falls back to 1.
    pub combo_timer: u32,
    /// Remaining ticks of the bloodlust fire rate boost.
    pub bloodlust_timer: u32,
}

impl ScoreState {
    /// Empty score with the base multiplier.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            combo: 1,
            combo_timer: 0,
            bloodlust_timer: 0,
        }
    }

    /// Extends the combo after a kill, capped at `max`.
    pub fn register_kill(&mut self, max: u32, window: u32) {
        self.combo = (self.combo + 1).min(max.max(1));
        self.combo_timer = window;
    }

    /// Ages the combo by one tick.
    ///
    /// The multiplier falls back to 1 on the tick the window runs out, and the
    /// timer stays at 0 until the next kill.
    pub fn decay(&mut self) {
        if self.combo_timer > 0 {
            self.combo_timer -= 1;
            if self.combo_timer == 0 {
                self.combo = 1;
            }
        }
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removals_never_exceed_the_wave_size() {
        let mut waves = WaveState {
            enemies_in_wave: 2,
            ..WaveState::new()
        };

        waves.record_removal();
        waves.record_removal();
        waves.record_removal();

        assert_eq!(waves.killed_in_wave, 2);
    }

    #[test]
    fn wave_size_grows_linearly() {
        let config = WaveConfig::default();

        assert_eq!(WaveState::enemy_count(1, &config), 5);
        assert_eq!(WaveState::enemy_count(2, &config), 8);
        assert_eq!(WaveState::enemy_count(10, &config), 32);
    }

    #[test]
    fn combo_caps_at_the_maximum() {
        let mut score = ScoreState::new();
        for _ in 0..15 {
            score.register_kill(10, 3);
        }

        assert_eq!(score.combo, 10);
        assert_eq!(score.combo_timer, 3);
    }

    #[test]
    fn expired_window_resets_the_combo_to_one() {
        let mut score = ScoreState::new();
        for _ in 0..8 {
            score.register_kill(10, 180);
        }
        assert_eq!(score.combo, 9);

        for _ in 0..179 {
            score.decay();
        }
        assert_eq!(score.combo, 9);

        for _ in 0..2 {
            score.decay();
        }
        assert_eq!(score.combo, 1);
        assert_eq!(score.combo_timer, 0);
    }

    #[test]
    fn kill_inside_the_window_keeps_the_combo() {
        let mut score = ScoreState::new();
        score.register_kill(10, 180);
        for _ in 0..100 {
            score.decay();
        }

        score.register_kill(10, 180);

        assert_eq!(score.combo, 3);
        assert_eq!(score.combo_timer, 180);
    }

    #[test]
    fn level_progress_is_a_fraction() {
        let mut levels = LevelState::new(&ProgressionConfig::default());
        levels.experience = 50;

        assert!((levels.progress() - 0.25).abs() < 1e-6);
    }
}
