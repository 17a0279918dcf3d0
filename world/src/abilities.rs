//! Cooldowns, active windows, and charges of the pilot's active abilities.

use galactic_defender_core::{AbilityError, ActiveAbility};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    cooldown: u32,
    remaining: u32,
    charges: Option<u32>,
}

impl Slot {
    const fn fresh(ability: ActiveAbility) -> Self {
        Self {
            cooldown: 0,
            remaining: 0,
            charges: ability.profile().charges,
        }
    }
}

/// Timer bank with one slot per [`ActiveAbility`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityTimers {
    slots: [Slot; 5],
}

impl AbilityTimers {
    /// Every ability ready, with full charges.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: ActiveAbility::ALL.map(Slot::fresh),
        }
    }

    /// Counts every cooldown and active window down by one tick.
    ///
    /// Abilities whose window closed on this tick are appended to `expired`.
    pub fn tick(&mut self, expired: &mut Vec<ActiveAbility>) {
        for (ability, slot) in ActiveAbility::ALL.into_iter().zip(&mut self.slots) {
            slot.cooldown = slot.cooldown.saturating_sub(1);
            if slot.remaining > 0 {
                slot.remaining -= 1;
                if slot.remaining == 0 {
                    expired.push(ability);
                }
            }
        }
    }

    /// Starts the cooldown and active window of `ability`, spending a charge.
    pub fn activate(&mut self, ability: ActiveAbility) -> Result<(), AbilityError> {
        let profile = ability.profile();
        let slot = &mut self.slots[ability.index()];
        if slot.cooldown > 0 {
            return Err(AbilityError::CoolingDown {
                ticks: slot.cooldown,
            });
        }
        if let Some(charges) = slot.charges.as_mut() {
            if *charges == 0 {
                return Err(AbilityError::Depleted);
            }
            *charges -= 1;
        }
        slot.cooldown = profile.cooldown;
        slot.remaining = profile.duration;
        Ok(())
    }

    /// Whether the active window of `ability` is open.
    #[must_use]
    pub fn is_active(&self, ability: ActiveAbility) -> bool {
        self.slots[ability.index()].remaining > 0
    }

    /// Ticks until `ability` may be used again.
    #[must_use]
    pub fn cooldown(&self, ability: ActiveAbility) -> u32 {
        self.slots[ability.index()].cooldown
    }

    /// Ticks left in the active window of `ability`.
    #[must_use]
    pub fn remaining(&self, ability: ActiveAbility) -> u32 {
        self.slots[ability.index()].remaining
    }

    /// Charges left, or `None` when only the cooldown limits the ability.
    #[must_use]
    pub fn charges(&self, ability: ActiveAbility) -> Option<u32> {
        self.slots[ability.index()].charges
    }
}

impl Default for AbilityTimers {
    fn default() -> Self {
        Self::new()
    }
}
