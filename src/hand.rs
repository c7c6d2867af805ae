//! Player and dealer hand representations, and the hand scorer.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// Score at which a hand busts when exceeded, and at which it stands automatically.
pub const TWENTY_ONE: u8 = 21;

fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value = value.saturating_add(card.value());
    }

    while value > TWENTY_ONE && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= TWENTY_ONE;
    (value, is_soft)
}

/// Returns the best blackjack score for a set of cards.
///
/// Every ace starts at 11 and is downgraded to 1, one at a time, while the
/// total exceeds 21. An empty slice scores 0. The result still exceeds 21 when
/// downgrading every ace is not enough.
///
/// ```
/// use shoebj::{Card, Suit, hand::score};
///
/// let cards = [Card::new(Suit::Spades, 1), Card::new(Suit::Hearts, 1), Card::new(Suit::Clubs, 9)];
/// assert_eq!(score(&cards), 21);
/// ```
#[must_use]
pub fn score(cards: &[Card]) -> u8 {
    evaluate_cards(cards).0
}

/// Returns whether a set of cards is a natural: exactly two cards totalling 21
/// that did not come out of a split.
#[must_use]
pub fn is_natural(cards: &[Card], from_split: bool) -> bool {
    !from_split && cards.len() == 2 && score(cards) == TWENTY_ONE
}

/// Hand status in the per-hand action state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    /// Hand is awaiting an action (or has not been reached yet).
    Active,
    /// Player has stood, or the hand reached 21.
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Hand was doubled and received its single card.
    Doubled,
    /// Hand came out of a split of aces and stands on its single dealt card.
    AutoStand,
}

impl HandStatus {
    /// Returns whether the hand accepts no further actions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// A player's hand.
#[derive(Debug, Clone)]
pub struct Hand {
    /// Cards in the hand, in deal order.
    cards: Vec<Card>,
    /// Current status of the hand.
    status: HandStatus,
    /// Bet amount for this hand.
    bet: usize,
    /// Whether this hand is the sibling produced by a split.
    split_result: bool,
    /// Whether this hand has given up its second card to a split.
    was_split: bool,
    /// Whether this hand has been doubled.
    doubled: bool,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Active,
            bet,
            split_result: false,
            was_split: false,
            doubled: false,
        }
    }

    /// Creates a new hand from a split with a single card.
    #[must_use]
    pub fn from_split(card: Card, bet: usize) -> Self {
        Self {
            cards: alloc::vec![card],
            status: HandStatus::Active,
            bet,
            split_result: true,
            was_split: false,
            doubled: false,
        }
    }

    /// Adds a card to the hand.
    ///
    /// The status is left alone; call [`Hand::check_entry`] to resolve busts
    /// and automatic stands.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Applies the entry check to an active hand: over 21 busts, exactly 21
    /// stands. Returns the resulting status.
    pub fn check_entry(&mut self) -> HandStatus {
        if self.status == HandStatus::Active {
            let value = self.score();
            if value > TWENTY_ONE {
                self.status = HandStatus::Bust;
            } else if value == TWENTY_ONE {
                self.status = HandStatus::Stand;
            }
        }
        self.status
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Doubles the bet amount and marks the hand as doubled.
    pub const fn double_bet(&mut self) {
        self.bet *= 2;
        self.doubled = true;
    }

    /// Returns whether this hand is the sibling produced by a split.
    #[must_use]
    pub const fn is_split_result(&self) -> bool {
        self.split_result
    }

    /// Returns whether this hand has already been split.
    #[must_use]
    pub const fn was_split(&self) -> bool {
        self.was_split
    }

    /// Returns whether this hand has been doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Calculates the score of the hand.
    ///
    /// Aces are counted as 11 if possible without busting, otherwise as 1.
    #[must_use]
    pub fn score(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Returns whether the hand is a natural.
    ///
    /// The sibling created by a split never is; its 21 is paid at even money.
    /// The original hand keeps its claim, so a split K that draws an ace is a
    /// natural.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards, self.split_result)
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score() > TWENTY_ONE
    }

    /// Returns whether the hand holds exactly two cards of equal rank.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Returns whether the hand is a pair of aces.
    #[must_use]
    pub fn is_pair_of_aces(&self) -> bool {
        self.is_pair() && self.cards[0].is_ace()
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.was_split = true;
            self.cards.pop()
        } else {
            None
        }
    }

    /// Empties the hand and zeroes its bet, returning the cards.
    pub fn take_cards(&mut self) -> Vec<Card> {
        self.bet = 0;
        core::mem::take(&mut self.cards)
    }
}

/// The dealer's hand.
#[derive(Debug, Clone)]
pub struct DealerHand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Whether the hole card is revealed.
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns the hole card (second card).
    #[must_use]
    pub fn hole_card(&self) -> Option<&Card> {
        self.cards.get(1)
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Calculates the visible value (only up card if hole not revealed).
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        if self.hole_revealed {
            self.score()
        } else {
            self.cards.first().map_or(0, Card::value)
        }
    }

    /// Calculates the full score of the hand.
    #[must_use]
    pub fn score(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Returns whether the hand is a natural.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards, false)
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score() > TWENTY_ONE
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Empties the hand for a new round, returning the cards.
    pub fn take_cards(&mut self) -> Vec<Card> {
        self.hole_revealed = false;
        core::mem::take(&mut self.cards)
    }
}

impl Default for DealerHand {
    fn default() -> Self {
        Self::new()
    }
}
