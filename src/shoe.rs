//! The card shoe and its discard pile.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, RANKS, Suit};
use crate::error::DealError;
use crate::hand::Hand;
use crate::options::ShuffleMethod;

/// The live stack of cards plus the discard pile it is refilled from.
///
/// The front of the shoe is the next card dealt. Spent cards go to a LIFO
/// discard pile, and an empty shoe is refilled from that pile (and shuffled)
/// the moment another card is needed.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: VecDeque<Card>,
    discard: Vec<Card>,
    method: ShuffleMethod,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates an empty shoe with a seeded random number generator.
    #[must_use]
    pub fn new(method: ShuffleMethod, seed: u64) -> Self {
        Self {
            cards: VecDeque::new(),
            discard: Vec::new(),
            method,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Clears the shoe and discard pile, then fills the shoe with
    /// `num_decks` ordered 52-card decks. Does not shuffle.
    pub fn build(&mut self, num_decks: u8) {
        self.cards.clear();
        self.discard.clear();
        self.cards.reserve(num_decks as usize * DECK_SIZE);

        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in 1..=RANKS {
                    self.cards.push_back(Card::new(suit, rank));
                }
            }
        }
    }

    /// Shuffles the shoe in place with the configured [`ShuffleMethod`].
    pub fn shuffle(&mut self) {
        match self.method {
            ShuffleMethod::Relocate => self.relocate_shuffle(),
            ShuffleMethod::FisherYates => self.cards.make_contiguous().shuffle(&mut self.rng),
        }
    }

    /// Moves a random card to a random position, `2 * n` times.
    ///
    /// Each pass removes the card at a uniform position, then reinserts it at
    /// a uniform position of the remaining `n - 1` cards (either end included).
    /// The resulting permutation is not uniformly distributed.
    fn relocate_shuffle(&mut self) {
        let n = self.cards.len();
        if n == 0 {
            return;
        }

        for _ in 0..n * 2 {
            let from = self.rng.random_range(0..n);
            if let Some(card) = self.cards.remove(from) {
                let to = self.rng.random_range(0..n);
                self.cards.insert(to, card);
            }
        }
    }

    /// Builds `num_decks` fresh decks and shuffles them, discarding whatever
    /// the shoe and discard pile held.
    pub fn rebuild(&mut self, num_decks: u8) {
        self.build(num_decks);
        self.shuffle();
        tracing::info!(decks = num_decks, cards = self.cards.len(), "shoe rebuilt");
    }

    /// Deals the front card.
    ///
    /// An empty shoe is first refilled from the whole discard pile and
    /// shuffled.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::OutOfCards`] when both the shoe and the discard
    /// pile are empty.
    pub fn deal(&mut self) -> Result<Card, DealError> {
        if self.cards.is_empty() {
            self.recycle_discards();
        }

        self.cards.pop_front().ok_or(DealError::OutOfCards)
    }

    /// Drains the discard pile into the shoe and shuffles it.
    fn recycle_discards(&mut self) {
        let recycled = self.discard.len();
        while let Some(card) = self.discard.pop() {
            self.cards.push_back(card);
        }
        self.shuffle();
        tracing::debug!(cards = recycled, "discard pile reshuffled into shoe");
    }

    /// Moves every card of `hand` to the discard pile, in hand order, and
    /// zeroes its bet.
    pub fn discard(&mut self, hand: &mut Hand) {
        self.discard.extend(hand.take_cards());
    }

    /// Moves loose cards to the discard pile.
    pub fn discard_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard.extend(cards);
    }

    /// Replaces the shoe with `cards` (front first) and empties the discard
    /// pile. Useful to replay a recorded shoe.
    pub fn stack(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards = cards.into_iter().collect();
        self.discard.clear();
    }

    /// Returns the number of cards left in the shoe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the shoe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the number of cards in the discard pile.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Returns the number of cards that can still be dealt, counting the
    /// discard pile.
    #[must_use]
    pub fn available(&self) -> usize {
        self.cards.len() + self.discard.len()
    }

    /// Returns the next card without dealing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.front()
    }

    /// Iterates over the shoe front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Returns the discard pile, oldest first.
    #[must_use]
    pub fn discards(&self) -> &[Card] {
        &self.discard
    }
}
