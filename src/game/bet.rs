use alloc::vec::Vec;

use crate::error::{BetError, DealError};
use crate::event::GameEvent;
use crate::hand::Hand;

use super::{Game, GameState};

impl Game {
    /// Places a bet for the specified player, opening their first hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state, the player cannot
    /// be found, the bet is zero, the player already bet, or the player lacks
    /// funds.
    pub fn bet(&mut self, player_id: u8, amount: usize) -> Result<(), BetError> {
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }

        if self.state != GameState::Betting {
            return Err(BetError::InvalidState);
        }

        let player = self.player_mut(player_id).ok_or(BetError::PlayerNotFound)?;

        if player.has_live_bet() {
            return Err(BetError::AlreadyBet);
        }

        if !player.debit(amount) {
            return Err(BetError::InsufficientFunds);
        }

        player.hands.clear();
        player.hands.push(Hand::new(amount));

        Ok(())
    }

    /// Deals two cards to every betting player and the dealer.
    ///
    /// Cards go out one at a time in turn order, dealer last: first round
    /// face up, then the second round with the dealer's hole card face down.
    /// If the dealer holds a natural the player action phase is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state, no bets have been
    /// placed, or the table has too few cards left to deal the round. Nothing
    /// is dealt on error.
    pub fn deal(&mut self) -> Result<(), DealError> {
        if self.state != GameState::Betting {
            return Err(DealError::InvalidState);
        }

        let betting_players: Vec<u8> = self
            .players
            .iter()
            .filter(|player| player.has_live_bet())
            .map(crate::player::Player::id)
            .collect();

        if betting_players.is_empty() {
            return Err(DealError::NoBets);
        }

        let cards_needed = (betting_players.len() + 1) * 2;
        if self.shoe.available() < cards_needed {
            return Err(DealError::OutOfCards);
        }

        // Stray dealer cards from an interrupted round go to the discard pile.
        let stray = self.dealer_hand.take_cards();
        self.shoe.discard_cards(stray);

        self.turn_order = betting_players.iter().copied().collect();
        self.round_players = betting_players;
        self.current_turn = None;

        tracing::debug!(players = self.round_players.len(), "dealing round");

        for face_up in [true, false] {
            for index in 0..self.round_players.len() {
                let player_id = self.round_players[index];
                self.deal_to_hand(player_id, 0)?;
            }
            self.deal_to_dealer(face_up)?;
        }

        if self.dealer_hand.is_natural() {
            tracing::debug!("dealer natural, skipping player actions");
            self.events.push(GameEvent::DealerNatural);
            self.turn_order.clear();
            self.state = GameState::DealerTurn;
        } else {
            self.state = GameState::PlayerTurn;
            self.advance_turn();
        }

        Ok(())
    }
}
