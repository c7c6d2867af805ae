use alloc::vec::Vec;

use crate::card::Card;
use crate::error::RoundError;
use crate::event::{DisplaySink, GameEvent};
use crate::hand::Hand;
use crate::result::RoundResult;

use super::{Action, AvailableActions, Game, GameState, TurnPosition};

/// Supplies bets for a round.
pub trait BetInput {
    /// Returns the bet for `player_name`.
    ///
    /// Must return a value in `1..=chips`; the game deducts it as given.
    fn bet(&mut self, player_name: &str, chips: usize) -> usize;
}

impl<F> BetInput for F
where
    F: FnMut(&str, usize) -> usize,
{
    fn bet(&mut self, player_name: &str, chips: usize) -> usize {
        self(player_name, chips)
    }
}

/// Supplies player decisions.
pub trait ActionInput {
    /// Chooses an action for the hand in `view`.
    ///
    /// Should pick one of `available`; anything else is rejected and this is
    /// asked again.
    fn choose(&mut self, view: &HandView<'_>, available: AvailableActions) -> Action;
}

impl<F> ActionInput for F
where
    F: FnMut(&HandView<'_>, AvailableActions) -> Action,
{
    fn choose(&mut self, view: &HandView<'_>, available: AvailableActions) -> Action {
        self(view, available)
    }
}

/// What a player sees when asked for a decision.
#[derive(Debug, Clone, Copy)]
pub struct HandView<'a> {
    /// The player on turn.
    pub player_id: u8,
    /// Their display name.
    pub player_name: &'a str,
    /// Their chips outside the bets.
    pub chips: usize,
    /// Index of the hand on turn.
    pub hand_index: usize,
    /// The hand on turn.
    pub hand: &'a Hand,
    /// The dealer's face-up card.
    pub dealer_up_card: Option<Card>,
    /// What the dealer shows: the up card's value while the hole card is down.
    pub dealer_showing: u8,
}

impl Game {
    fn hand_view(&self, turn: TurnPosition) -> Option<HandView<'_>> {
        let player = self.player(turn.player_id)?;
        Some(HandView {
            player_id: turn.player_id,
            player_name: player.name(),
            chips: player.chips(),
            hand_index: turn.hand_index,
            hand: player.hand(turn.hand_index)?,
            dealer_up_card: self.dealer_hand.up_card().copied(),
            dealer_showing: self.dealer_hand.visible_value(),
        })
    }

    fn flush_events<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) {
        for event in self.events.drain(..) {
            sink.notify(&event);
        }
    }

    /// Plays one full round, asking collaborators for every decision.
    ///
    /// The round rebuilds the shoe if it ran low, collects a bet from every
    /// seated player with chips, deals, asks for actions until every hand is
    /// finished, plays the dealer, and settles. Events go to `sink` as they
    /// happen. An action the hand does not allow is reported with
    /// [`GameEvent::ActionRejected`] and asked for again.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::OutOfCards`] if no cards exist anywhere when one
    /// is needed, [`RoundError::InvalidBet`] if `bets` returned an amount
    /// outside `1..=chips`, [`RoundError::NoPlayers`] if nobody can bet, and
    /// [`RoundError::InvalidState`] if a round was already in progress. A
    /// round that fails after betting is aborted with [`Game::abort_round`].
    pub fn play_round<B, A, S>(
        &mut self,
        bets: &mut B,
        actions: &mut A,
        sink: &mut S,
    ) -> Result<RoundResult, RoundError>
    where
        B: BetInput + ?Sized,
        A: ActionInput + ?Sized,
        S: DisplaySink + ?Sized,
    {
        if self.state != GameState::WaitingForPlayers {
            return Err(RoundError::InvalidState);
        }

        self.check_and_reshuffle()
            .map_err(|_| RoundError::InvalidState)?;
        self.flush_events(sink);

        let bettors: Vec<u8> = self
            .players
            .iter()
            .filter(|player| player.chips() > 0)
            .map(crate::player::Player::id)
            .collect();
        if bettors.is_empty() {
            return Err(RoundError::NoPlayers);
        }

        self.start_betting();
        for player_id in bettors {
            let Some(player) = self.player(player_id) else {
                continue;
            };
            let chips = player.chips();
            let amount = bets.bet(player.name(), chips);
            if let Err(err) = self.bet(player_id, amount) {
                self.abort_round();
                return Err(RoundError::InvalidBet(err));
            }
        }

        if let Err(err) = self.deal() {
            self.flush_events(sink);
            self.abort_round();
            return Err(err.into());
        }
        self.flush_events(sink);

        while self.state == GameState::PlayerTurn {
            let Some(turn) = self.current_turn else {
                break;
            };
            let available = self.available_actions();
            let Some(action) = self
                .hand_view(turn)
                .map(|view| actions.choose(&view, available))
            else {
                break;
            };

            match self.act(turn.player_id, turn.hand_index, action) {
                Ok(()) => {}
                Err(err) if err.is_fatal() => {
                    self.flush_events(sink);
                    self.abort_round();
                    return Err(RoundError::OutOfCards);
                }
                Err(error) => {
                    tracing::debug!(?action, %error, "action rejected");
                    self.events.push(GameEvent::ActionRejected {
                        player_id: turn.player_id,
                        hand_index: turn.hand_index,
                        action,
                        error,
                    });
                }
            }
            self.flush_events(sink);
        }

        if let Err(err) = self.dealer_play() {
            self.flush_events(sink);
            self.abort_round();
            return Err(err.into());
        }
        self.flush_events(sink);

        let result = self.settle()?;
        self.flush_events(sink);

        Ok(result)
    }
}
