//! Game engine and state management.

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::Card;
use crate::error::{DealError, JoinError, ReshuffleError};
use crate::event::GameEvent;
use crate::hand::{DealerHand, HandStatus};
use crate::options::GameOptions;
use crate::player::Player;
use crate::shoe::Shoe;

mod actions;
mod bet;
mod dealer;
mod round;
pub mod state;

pub use dealer::{payout, resolve_hand};
pub use round::{ActionInput, BetInput, HandView};
pub use state::{Action, AvailableActions, GameState, TurnPosition};

/// A blackjack table session: shoe, seated players, dealer, and round flow.
///
/// The game owns every piece of mutable table state; nothing is global. Drive
/// a round step by step ([`Game::start_betting`], [`Game::bet`],
/// [`Game::deal`], the player actions, [`Game::dealer_play`],
/// [`Game::settle`]) or hand the decisions to collaborators with
/// [`Game::play_round`].
pub struct Game {
    /// Game options.
    pub options: GameOptions,
    /// The shoe and discard pile.
    shoe: Shoe,
    /// Current game state.
    state: GameState,
    /// Next player ID to assign.
    next_id: u8,
    /// Seated players, in seat order.
    players: Vec<Player>,
    /// Dealer's hand.
    dealer_hand: DealerHand,
    /// Players who bet this round, in turn order.
    round_players: Vec<u8>,
    /// Players still waiting for their turn.
    turn_order: VecDeque<u8>,
    /// Current turn position.
    current_turn: Option<TurnPosition>,
    /// Chip balances when betting opened (`player_id` -> chips).
    round_start_chips: HashMap<u8, usize>,
    /// Events not yet handed to a sink.
    events: Vec<GameEvent>,
}

impl Game {
    /// Creates a new game with a freshly built and shuffled shoe.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebj::{Game, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default(), 42);
    /// assert_eq!(game.shoe().len(), 4 * 52);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let mut shoe = Shoe::new(options.shuffle, seed);
        shoe.rebuild(options.decks);

        Self {
            options,
            shoe,
            state: GameState::WaitingForPlayers,
            next_id: 0,
            players: Vec::new(),
            dealer_hand: DealerHand::new(),
            round_players: Vec::new(),
            turn_order: VecDeque::new(),
            current_turn: None,
            round_start_chips: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Replaces the shoe and discard pile with freshly built, shuffled decks.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress (not in `WaitingForPlayers`
    /// or `Betting` state).
    pub fn reshuffle(&mut self) -> Result<(), ReshuffleError> {
        if self.state != GameState::WaitingForPlayers && self.state != GameState::Betting {
            return Err(ReshuffleError::InvalidState);
        }

        self.shoe.rebuild(self.options.decks);
        self.events.push(GameEvent::ShoeRebuilt {
            decks: self.options.decks,
        });

        Ok(())
    }

    /// Returns whether the shoe has dropped below the reshuffle threshold.
    pub fn needs_reshuffle(&self) -> bool {
        self.options.reshuffle_threshold > 0 && self.shoe.len() < self.options.reshuffle_threshold
    }

    /// Checks the threshold and rebuilds the shoe if needed.
    ///
    /// The rebuild replaces the shoe and discard pile outright; it does not
    /// top up the remaining cards. Call this before betting opens.
    /// Returns `true` if a reshuffle was performed.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress.
    pub fn check_and_reshuffle(&mut self) -> Result<bool, ReshuffleError> {
        if self.needs_reshuffle() {
            tracing::info!(
                remaining = self.shoe.len(),
                threshold = self.options.reshuffle_threshold,
                "shoe below threshold, rebuilding"
            );
            self.reshuffle()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Deals a card from the shoe, recycling the discard pile when empty.
    fn draw(&mut self) -> Result<Card, DealError> {
        if self.shoe.is_empty() && self.shoe.discard_len() > 0 {
            self.events.push(GameEvent::DiscardsReshuffled {
                cards: self.shoe.discard_len(),
            });
        }
        self.shoe.deal()
    }

    /// Deals one card into a player's hand.
    fn deal_to_hand(&mut self, player_id: u8, hand_index: usize) -> Result<Card, DealError> {
        let card = self.draw()?;
        if let Some(hand) = self
            .player_mut(player_id)
            .and_then(|player| player.hands.get_mut(hand_index))
        {
            hand.add_card(card);
        }
        self.events.push(GameEvent::CardDealt {
            player_id,
            hand_index,
            card,
        });
        Ok(card)
    }

    /// Deals one card to the dealer.
    fn deal_to_dealer(&mut self, face_up: bool) -> Result<Card, DealError> {
        let card = self.draw()?;
        self.dealer_hand.add_card(card);
        self.events.push(GameEvent::DealerCardDealt { card, face_up });
        Ok(card)
    }

    /// Applies the entry check to a hand, reporting any automatic resolution.
    fn resolve_entry(&mut self, player_id: u8, hand_index: usize) -> HandStatus {
        let Some(hand) = self
            .player_mut(player_id)
            .and_then(|player| player.hands.get_mut(hand_index))
        else {
            return HandStatus::Stand;
        };

        let before = hand.status();
        let after = hand.check_entry();
        let score = hand.score();
        if before == HandStatus::Active {
            match after {
                HandStatus::Bust => self.events.push(GameEvent::HandBusted {
                    player_id,
                    hand_index,
                    score,
                }),
                HandStatus::Stand => self.events.push(GameEvent::HandTwentyOne {
                    player_id,
                    hand_index,
                }),
                _ => {}
            }
        }
        after
    }

    /// Moves the turn to the next hand that needs a decision.
    ///
    /// Hands are visited in order, so a hand inserted by a split is reached
    /// right after the one it came from. Players are taken from the turn
    /// queue once their last hand is done. When the queue runs dry the game
    /// moves to the dealer's turn.
    fn advance_turn(&mut self) {
        loop {
            let next = match self.current_turn {
                Some(turn) => TurnPosition {
                    player_id: turn.player_id,
                    hand_index: turn.hand_index + 1,
                },
                None => {
                    let Some(player_id) = self.turn_order.pop_front() else {
                        self.state = GameState::DealerTurn;
                        return;
                    };
                    TurnPosition {
                        player_id,
                        hand_index: 0,
                    }
                }
            };

            let exists = self
                .player(next.player_id)
                .is_some_and(|player| next.hand_index < player.hands.len());
            if !exists {
                self.current_turn = None;
                continue;
            }

            self.current_turn = Some(next);
            if self.resolve_entry(next.player_id, next.hand_index) == HandStatus::Active {
                return;
            }
        }
    }

    /// Seats a player with the given name and chips.
    ///
    /// Returns the assigned player ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is full or a round is in progress.
    pub fn join(&mut self, name: impl Into<String>, chips: usize) -> Result<u8, JoinError> {
        if self.state != GameState::WaitingForPlayers {
            return Err(JoinError::InvalidState);
        }
        if self.players.len() >= self.options.max_players {
            return Err(JoinError::TableFull);
        }

        // Ids wrap around; skip any still seated.
        let id = (0..=u8::MAX)
            .map(|offset| self.next_id.wrapping_add(offset))
            .find(|&id| self.player(id).is_none())
            .ok_or(JoinError::TableFull)?;
        self.next_id = id.wrapping_add(1);
        self.players.push(Player::new(id, name.into(), chips));
        Ok(id)
    }

    /// Seats a player with [`GameOptions::starting_chips`].
    ///
    /// # Errors
    ///
    /// Returns an error if the table is full or a round is in progress.
    pub fn seat(&mut self, name: impl Into<String>) -> Result<u8, JoinError> {
        let chips = self.options.starting_chips;
        self.join(name, chips)
    }

    /// Removes a player from the table.
    ///
    /// A bet placed during betting is refunded. Returns `None` if the player
    /// is not seated or cards are already on the table.
    pub fn leave(&mut self, player_id: u8) -> Option<Player> {
        if self.state != GameState::WaitingForPlayers && self.state != GameState::Betting {
            return None;
        }

        let index = self.players.iter().position(|p| p.id() == player_id)?;
        let mut player = self.players.remove(index);
        for mut hand in core::mem::take(&mut player.hands) {
            player.credit(hand.bet());
            self.shoe.discard(&mut hand);
        }
        self.round_start_chips.remove(&player_id);
        Some(player)
    }

    /// Removes every player who has no chips left, returning them.
    pub fn remove_broke_players(&mut self) -> Vec<Player> {
        if self.state != GameState::WaitingForPlayers {
            return Vec::new();
        }

        let (broke, seated): (Vec<Player>, Vec<Player>) = core::mem::take(&mut self.players)
            .into_iter()
            .partition(|player| player.chips() == 0);
        self.players = seated;
        broke
    }

    /// Returns the seated players, in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the number of seated players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns the player with the given ID.
    pub fn player(&self, player_id: u8) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    fn player_mut(&mut self, player_id: u8) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == player_id)
    }

    /// Returns the current chips for the specified player.
    pub fn get_chips(&self, player_id: u8) -> Option<usize> {
        self.player(player_id).map(Player::chips)
    }

    /// Returns the shoe.
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the shoe for direct manipulation, such as stacking a recorded
    /// card order.
    pub const fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    /// Returns the number of cards remaining in the shoe.
    pub fn cards_remaining(&self) -> usize {
        self.shoe.len()
    }

    /// Counts every card the table owns: shoe, discard pile, and all live
    /// hands. This stays constant between shoe rebuilds.
    pub fn cards_in_play(&self) -> usize {
        let in_hands: usize = self
            .players
            .iter()
            .flat_map(|player| player.hands.iter())
            .map(crate::hand::Hand::len)
            .sum();
        self.shoe.available() + in_hands + self.dealer_hand.len()
    }

    /// Starts the betting phase.
    ///
    /// Only has an effect between rounds.
    pub fn start_betting(&mut self) {
        if self.state != GameState::WaitingForPlayers {
            return;
        }

        self.round_start_chips = self
            .players
            .iter()
            .map(|player| (player.id(), player.chips()))
            .collect();
        self.state = GameState::Betting;
    }

    /// Returns the current game state.
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns the current turn position, if a hand is awaiting a decision.
    pub const fn current_turn(&self) -> Option<TurnPosition> {
        self.current_turn
    }

    /// Returns the player ID whose turn it is.
    pub fn current_player(&self) -> Option<u8> {
        self.current_turn.map(|turn| turn.player_id)
    }

    /// Returns the dealer's hand.
    pub const fn dealer_hand(&self) -> &DealerHand {
        &self.dealer_hand
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    /// Abandons the current round.
    ///
    /// Every live bet is refunded and every card on the table goes to the
    /// discard pile, so chips and cards are both conserved. The game returns
    /// to `WaitingForPlayers`.
    pub fn abort_round(&mut self) {
        if self.state == GameState::WaitingForPlayers {
            return;
        }
        tracing::warn!(state = ?self.state, "round aborted");

        for player in &mut self.players {
            for mut hand in core::mem::take(&mut player.hands) {
                player.credit(hand.bet());
                self.shoe.discard(&mut hand);
            }
        }
        let dealer_cards = self.dealer_hand.take_cards();
        self.shoe.discard_cards(dealer_cards);
        self.reset_round();
    }

    fn reset_round(&mut self) {
        self.round_players.clear();
        self.turn_order.clear();
        self.current_turn = None;
        self.round_start_chips.clear();
        self.state = GameState::WaitingForPlayers;
    }
}
