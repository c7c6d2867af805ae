use crate::card::Card;
use crate::error::ActionError;
use crate::event::GameEvent;
use crate::hand::{Hand, HandStatus};

use super::{Action, AvailableActions, Game, GameState};

impl Game {
    fn ensure_player_turn(&self, player_id: u8, hand_index: usize) -> Result<(), ActionError> {
        if self.state != GameState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        if !self.is_player_turn(player_id, hand_index) {
            return Err(ActionError::NotYourTurn);
        }

        Ok(())
    }

    /// Returns the hand on turn, checked to be awaiting a decision.
    fn active_hand(&self, player_id: u8, hand_index: usize) -> Result<&Hand, ActionError> {
        self.ensure_player_turn(player_id, hand_index)?;

        let hand = self
            .player(player_id)
            .ok_or(ActionError::PlayerNotFound)?
            .hand(hand_index)
            .ok_or(ActionError::HandNotFound)?;

        if hand.status() != HandStatus::Active {
            return Err(ActionError::HandNotActive);
        }

        Ok(hand)
    }

    fn set_hand_status(&mut self, player_id: u8, hand_index: usize, status: HandStatus) {
        if let Some(hand) = self
            .player_mut(player_id)
            .and_then(|player| player.hands.get_mut(hand_index))
        {
            hand.set_status(status);
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// A hand that goes over 21 busts and one that reaches exactly 21 stands;
    /// either way the turn moves on.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, it is not the
    /// player's turn, the player or hand cannot be found, the hand is not
    /// active, or no cards are left anywhere.
    pub fn hit(&mut self, player_id: u8, hand_index: usize) -> Result<Card, ActionError> {
        self.active_hand(player_id, hand_index)?;

        let card = self.deal_to_hand(player_id, hand_index)?;

        if self.resolve_entry(player_id, hand_index).is_terminal() {
            self.advance_turn();
        }

        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, it is not the
    /// player's turn, the player or hand cannot be found, or the hand is not
    /// active.
    pub fn stand(&mut self, player_id: u8, hand_index: usize) -> Result<(), ActionError> {
        let score = self.active_hand(player_id, hand_index)?.score();

        self.set_hand_status(player_id, hand_index, HandStatus::Stand);
        self.events.push(GameEvent::HandStood {
            player_id,
            hand_index,
            score,
        });

        self.advance_turn();

        Ok(())
    }

    /// Player action: Double down (double bet, receive exactly one card).
    ///
    /// The hand is finished afterwards whatever the card.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, it is not the
    /// player's turn, the player or hand cannot be found, the hand does not
    /// hold exactly two cards, the player lacks funds, or no cards are left
    /// anywhere. Nothing changes on error.
    pub fn double_down(&mut self, player_id: u8, hand_index: usize) -> Result<Card, ActionError> {
        let hand = self.active_hand(player_id, hand_index)?;

        // Can only double on first two cards
        if hand.len() != 2 {
            return Err(ActionError::CannotDouble);
        }

        let bet = hand.bet();

        if self.shoe.available() == 0 {
            return Err(ActionError::OutOfCards);
        }

        let player = self
            .player_mut(player_id)
            .ok_or(ActionError::PlayerNotFound)?;
        if !player.debit(bet) {
            return Err(ActionError::InsufficientFunds);
        }
        if let Some(hand) = player.hands.get_mut(hand_index) {
            hand.double_bet();
        }

        let card = self.deal_to_hand(player_id, hand_index)?;
        self.set_hand_status(player_id, hand_index, HandStatus::Doubled);

        tracing::debug!(player_id, hand_index, bet = bet * 2, "hand doubled");
        self.events.push(GameEvent::HandDoubled {
            player_id,
            hand_index,
            bet: bet * 2,
            card,
        });

        self.advance_turn();

        Ok(card)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// The second card moves to a new hand placed right after this one, with
    /// an equal bet. Each hand then receives one card, this one first. A split
    /// pair of aces gets nothing more: both hands stand on their single card.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, it is not the
    /// player's turn, the player or hand cannot be found, the hand is not a
    /// pair, the hand already took part in a split, the player lacks funds, or
    /// fewer than two cards are left anywhere. Nothing changes on error.
    pub fn split(&mut self, player_id: u8, hand_index: usize) -> Result<(), ActionError> {
        let hand = self.active_hand(player_id, hand_index)?;

        if !hand.is_pair() {
            return Err(ActionError::CannotSplit);
        }

        if hand.is_split_result() || hand.was_split() {
            return Err(ActionError::AlreadySplit);
        }

        let bet = hand.bet();
        let aces = hand.is_pair_of_aces();

        if self.shoe.available() < 2 {
            return Err(ActionError::OutOfCards);
        }

        let player = self
            .player_mut(player_id)
            .ok_or(ActionError::PlayerNotFound)?;
        if !player.debit(bet) {
            return Err(ActionError::InsufficientFunds);
        }

        let split_card = player
            .hands
            .get_mut(hand_index)
            .and_then(Hand::take_split_card)
            .ok_or(ActionError::CannotSplit)?;
        player
            .hands
            .insert(hand_index + 1, Hand::from_split(split_card, bet));

        tracing::debug!(player_id, hand_index, bet, aces, "hand split");
        self.events.push(GameEvent::HandSplit {
            player_id,
            hand_index,
            bet,
        });

        self.deal_to_hand(player_id, hand_index)?;
        self.deal_to_hand(player_id, hand_index + 1)?;

        if aces {
            for index in [hand_index, hand_index + 1] {
                self.set_hand_status(player_id, index, HandStatus::AutoStand);
                self.events.push(GameEvent::SplitAcesStand {
                    player_id,
                    hand_index: index,
                });
            }
            self.advance_turn();
        } else if self.resolve_entry(player_id, hand_index).is_terminal() {
            self.advance_turn();
        }

        Ok(())
    }

    /// Performs `action` on the given hand.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying action.
    pub fn act(
        &mut self,
        player_id: u8,
        hand_index: usize,
        action: Action,
    ) -> Result<(), ActionError> {
        match action {
            Action::Hit => self.hit(player_id, hand_index).map(|_| ()),
            Action::Stand => self.stand(player_id, hand_index),
            Action::Double => self.double_down(player_id, hand_index).map(|_| ()),
            Action::Split => self.split(player_id, hand_index),
        }
    }

    /// Returns the actions offered for the hand on turn.
    ///
    /// Hit and stand are always offered to an active hand. Double needs
    /// exactly two cards and chips to match the bet. Split additionally needs
    /// a pair and a hand that has not taken part in a split.
    pub fn available_actions(&self) -> AvailableActions {
        let Some(turn) = self.current_turn else {
            return AvailableActions::NONE;
        };
        let Ok(hand) = self.active_hand(turn.player_id, turn.hand_index) else {
            return AvailableActions::NONE;
        };

        let chips = self.get_chips(turn.player_id).unwrap_or(0);
        let has_funds = chips >= hand.bet();

        AvailableActions {
            hit: true,
            stand: true,
            double: hand.len() == 2 && has_funds,
            split: hand.is_pair() && !hand.is_split_result() && !hand.was_split() && has_funds,
        }
    }

    /// Checks if it's the specified player's turn on the specified hand.
    fn is_player_turn(&self, player_id: u8, hand_index: usize) -> bool {
        self.current_turn
            .is_some_and(|turn| turn.player_id == player_id && turn.hand_index == hand_index)
    }
}
