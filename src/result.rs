//! Round result types for settlement.

extern crate alloc;

use alloc::vec::Vec;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Player wins even money.
    Win,
    /// Player loses the bet.
    Lose,
    /// Push (tie); the bet is returned.
    Push,
    /// Player's natural pays 3:2.
    Blackjack,
}

/// The settlement rule that decided a hand, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Player went over 21.
    PlayerBust,
    /// Both player and dealer hold naturals.
    BothNatural,
    /// Player holds a natural, the dealer does not.
    PlayerNatural,
    /// Dealer went over 21.
    DealerBust,
    /// Dealer holds a natural, the player does not.
    DealerNatural,
    /// Player outscored the dealer.
    HigherScore,
    /// Dealer outscored the player.
    LowerScore,
    /// Equal scores.
    EqualScore,
}

impl Resolution {
    /// Returns the outcome this rule produces.
    #[must_use]
    pub const fn outcome(self) -> HandOutcome {
        match self {
            Self::PlayerBust | Self::DealerNatural | Self::LowerScore => HandOutcome::Lose,
            Self::BothNatural | Self::EqualScore => HandOutcome::Push,
            Self::PlayerNatural => HandOutcome::Blackjack,
            Self::DealerBust | Self::HigherScore => HandOutcome::Win,
        }
    }
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    /// The player who held the hand.
    pub player_id: u8,
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The rule that decided the outcome.
    pub resolution: Resolution,
    /// The bet amount for this hand.
    pub bet: usize,
    /// Chips returned to the player (stake plus winnings; 0 on a loss).
    pub payout: usize,
    /// The player's hand value.
    pub player_value: u8,
    /// The dealer's hand value.
    pub dealer_value: u8,
}

/// Result for a single player after settlement.
#[derive(Debug, Clone)]
pub struct PlayerResult {
    /// The player ID.
    pub player_id: u8,
    /// Results for each hand (multiple if split).
    pub hands: Vec<HandResult>,
    /// Total payout for all hands.
    pub total_payout: usize,
    /// Chip change over the whole round, bets included.
    pub net: isize,
    /// Chip balance after settlement.
    pub chips: usize,
}

/// Result of the entire round after settlement.
#[derive(Debug, Clone)]
pub struct RoundResult {
    /// Results for each player, in turn order.
    pub players: Vec<PlayerResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had a natural.
    pub dealer_natural: bool,
}

impl RoundResult {
    /// Returns the result for `player_id`.
    #[must_use]
    pub fn player(&self, player_id: u8) -> Option<&PlayerResult> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}
