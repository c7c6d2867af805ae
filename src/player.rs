//! Seated players.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::hand::Hand;

/// A seated player: identity, chip balance, and the hands of the current round.
#[derive(Debug, Clone)]
pub struct Player {
    id: u8,
    name: String,
    chips: usize,
    pub(crate) hands: Vec<Hand>,
}

impl Player {
    /// Creates a player with no hands.
    #[must_use]
    pub const fn new(id: u8, name: String, chips: usize) -> Self {
        Self {
            id,
            name,
            chips,
            hands: Vec::new(),
        }
    }

    /// Returns the player ID.
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the chip balance.
    #[must_use]
    pub const fn chips(&self) -> usize {
        self.chips
    }

    /// Returns the player's hands (several after a split).
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the hand at `index`.
    #[must_use]
    pub fn hand(&self, index: usize) -> Option<&Hand> {
        self.hands.get(index)
    }

    /// Returns whether any hand still holds a wager.
    #[must_use]
    pub fn has_live_bet(&self) -> bool {
        self.hands.iter().any(|hand| hand.bet() > 0)
    }

    pub(crate) const fn credit(&mut self, amount: usize) {
        self.chips += amount;
    }

    /// Removes `amount` chips, refusing to go negative.
    pub(crate) const fn debit(&mut self, amount: usize) -> bool {
        if self.chips < amount {
            return false;
        }
        self.chips -= amount;
        true
    }
}
