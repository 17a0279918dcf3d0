//! Weapons carried by the ship and the rounds left in each magazine.

use galactic_defender_core::WeaponKind;

/// Equipped weapon plus per-weapon ammunition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arsenal {
    equipped: WeaponKind,
    rounds: [Option<u32>; 4],
}

impl Arsenal {
    /// Full magazines with `weapon` equipped.
    #[must_use]
    pub fn new(weapon: WeaponKind) -> Self {
        Self {
            equipped: weapon,
            rounds: WeaponKind::ALL.map(|kind| kind.profile().magazine),
        }
    }

    /// Equips `weapon`, returning whether the selection changed.
    pub fn equip(&mut self, weapon: WeaponKind) -> bool {
        let changed = self.equipped != weapon;
        self.equipped = weapon;
        changed
    }

    /// Whether the equipped weapon has a round to fire.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.rounds() != Some(0)
    }

    /// Spends one round of the equipped weapon.
    ///
    /// Returns the rounds left, or `None` for unlimited weapons.
    pub fn spend_round(&mut self) -> Option<u32> {
        let slot = &mut self.rounds[self.equipped.index()];
        if let Some(rounds) = slot {
            *rounds = rounds.saturating_sub(1);
        }
        *slot
    }

    /// Refills the equipped magazine.
    ///
    /// Returns the new round count when the magazine was not already full.
    pub fn reload(&mut self) -> Option<u32> {
        let capacity = self.equipped.profile().magazine?;
        let slot = &mut self.rounds[self.equipped.index()];
        if *slot == Some(capacity) {
            return None;
        }
        *slot = Some(capacity);
        Some(capacity)
    }

    /// Adds up to `amount` rounds to the equipped magazine without overfilling it.
    pub fn top_up(&mut self, amount: u32) {
        let Some(capacity) = self.equipped.profile().magazine else {
            return;
        };
        let slot = &mut self.rounds[self.equipped.index()];
        *slot = slot.map(|rounds| rounds.saturating_add(amount).min(capacity));
    }

    /// Equipped weapon.
    #[must_use]
    pub const fn equipped(&self) -> WeaponKind {
        self.equipped
    }

    /// Rounds left in the equipped magazine, `None` for unlimited weapons.
    #[must_use]
    pub fn rounds(&self) -> Option<u32> {
        self.rounds_of(self.equipped)
    }

    /// Rounds left in the magazine of `weapon`.
    #[must_use]
    pub fn rounds_of(&self, weapon: WeaponKind) -> Option<u32> {
        self.rounds[weapon.index()]
    }
}
