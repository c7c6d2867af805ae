//! Structured table events for display consumers.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ActionError;
use crate::game::Action;
use crate::result::HandResult;

/// Something that happened at the table.
///
/// Events carry facts only; formatting is up to the [`DisplaySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The shoe was rebuilt from fresh decks and shuffled.
    ShoeRebuilt {
        /// Decks in the new shoe.
        decks: u8,
    },
    /// The empty shoe was refilled from the discard pile and shuffled.
    DiscardsReshuffled {
        /// Cards moved from the discard pile.
        cards: usize,
    },
    /// A card went to a player's hand.
    CardDealt {
        /// Receiving player.
        player_id: u8,
        /// Receiving hand.
        hand_index: usize,
        /// The card.
        card: Card,
    },
    /// A card went to the dealer.
    DealerCardDealt {
        /// The card.
        card: Card,
        /// Whether the card is dealt face up (false for the hole card).
        face_up: bool,
    },
    /// The dealer holds a natural; the action phase is skipped.
    DealerNatural,
    /// A hand went over 21.
    HandBusted {
        /// Owner.
        player_id: u8,
        /// Hand.
        hand_index: usize,
        /// Final score.
        score: u8,
    },
    /// A hand reached 21 and stands automatically.
    HandTwentyOne {
        /// Owner.
        player_id: u8,
        /// Hand.
        hand_index: usize,
    },
    /// The player stood.
    HandStood {
        /// Owner.
        player_id: u8,
        /// Hand.
        hand_index: usize,
        /// Score at the stand.
        score: u8,
    },
    /// The player doubled down.
    HandDoubled {
        /// Owner.
        player_id: u8,
        /// Hand.
        hand_index: usize,
        /// Bet after doubling.
        bet: usize,
        /// The single card received.
        card: Card,
    },
    /// The player split a pair; the new hand sits at `hand_index + 1`.
    HandSplit {
        /// Owner.
        player_id: u8,
        /// Original hand.
        hand_index: usize,
        /// Additional bet placed on the new hand.
        bet: usize,
    },
    /// A hand from a split of aces stands on its single card.
    SplitAcesStand {
        /// Owner.
        player_id: u8,
        /// Hand.
        hand_index: usize,
    },
    /// A requested action was not allowed; nothing changed.
    ActionRejected {
        /// Owner.
        player_id: u8,
        /// Hand.
        hand_index: usize,
        /// The requested action.
        action: Action,
        /// Why it was rejected.
        error: ActionError,
    },
    /// The dealer turned over the hole card.
    HoleCardRevealed {
        /// The hole card, if dealt.
        card: Option<Card>,
        /// Dealer score with both cards.
        score: u8,
    },
    /// The dealer drew a card.
    DealerHit {
        /// The card.
        card: Card,
        /// Dealer score after drawing.
        score: u8,
    },
    /// The dealer stopped drawing.
    DealerStood {
        /// Final dealer score.
        score: u8,
    },
    /// A hand was settled against the dealer.
    HandSettled(HandResult),
    /// Chip balances after the round, in seat order.
    RoundSummary {
        /// `(player_id, chips)` pairs.
        chips: Vec<(u8, usize)>,
    },
}

/// A write-only consumer of [`GameEvent`]s.
pub trait DisplaySink {
    /// Receives one event.
    fn notify(&mut self, event: &GameEvent);
}

impl DisplaySink for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

impl DisplaySink for () {
    fn notify(&mut self, _event: &GameEvent) {}
}
