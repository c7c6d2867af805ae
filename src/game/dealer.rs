use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ShowdownError;
use crate::event::GameEvent;
use crate::hand::{DealerHand, Hand, TWENTY_ONE};
use crate::result::{HandResult, PlayerResult, Resolution, RoundResult};

use super::{Game, GameState};

/// The dealer draws while below this score, soft totals included.
pub const DEALER_STANDS_ON: u8 = 17;

/// Decides a player hand against the final dealer hand.
///
/// Rules are checked in order and the first match wins: player bust, both
/// natural, player natural, dealer bust, dealer natural, then the score
/// comparison.
#[must_use]
pub fn resolve_hand(hand: &Hand, dealer: &DealerHand) -> Resolution {
    let player_value = hand.score();
    let dealer_value = dealer.score();

    if player_value > TWENTY_ONE {
        Resolution::PlayerBust
    } else if hand.is_natural() && dealer.is_natural() {
        Resolution::BothNatural
    } else if hand.is_natural() {
        Resolution::PlayerNatural
    } else if dealer_value > TWENTY_ONE {
        Resolution::DealerBust
    } else if dealer.is_natural() {
        Resolution::DealerNatural
    } else if player_value > dealer_value {
        Resolution::HigherScore
    } else if player_value < dealer_value {
        Resolution::LowerScore
    } else {
        Resolution::EqualScore
    }
}

/// Chips returned to the player for a settled bet, stake included.
///
/// A natural wins one and a half times the bet, truncated.
///
/// ```
/// use shoebj::{payout, Resolution};
///
/// assert_eq!(payout(Resolution::PlayerNatural, 5), 5 + 7);
/// assert_eq!(payout(Resolution::DealerBust, 5), 10);
/// assert_eq!(payout(Resolution::PlayerBust, 5), 0);
/// ```
#[must_use]
pub const fn payout(resolution: Resolution, bet: usize) -> usize {
    match resolution {
        Resolution::PlayerBust | Resolution::DealerNatural | Resolution::LowerScore => 0,
        Resolution::BothNatural | Resolution::EqualScore => bet,
        Resolution::PlayerNatural => bet + bet * 3 / 2,
        Resolution::DealerBust | Resolution::HigherScore => bet * 2,
    }
}

impl Game {
    /// Dealer plays their hand.
    ///
    /// The dealer reveals the hole card. A natural stands as is; otherwise the
    /// dealer hits while the score is below 17 and stands on any 17,
    /// soft 17 included.
    ///
    /// Returns the cards drawn by the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in dealer turn state or no cards
    /// are left anywhere while the dealer must draw.
    pub fn dealer_play(&mut self) -> Result<Vec<Card>, ShowdownError> {
        if self.state != GameState::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }

        self.dealer_hand.reveal_hole();
        self.events.push(GameEvent::HoleCardRevealed {
            card: self.dealer_hand.hole_card().copied(),
            score: self.dealer_hand.score(),
        });

        let mut drawn_cards = Vec::new();

        if !self.dealer_hand.is_natural() {
            while self.dealer_hand.score() < DEALER_STANDS_ON {
                let card = self.draw()?;
                self.dealer_hand.add_card(card);
                drawn_cards.push(card);
                self.events.push(GameEvent::DealerHit {
                    card,
                    score: self.dealer_hand.score(),
                });
            }
        }

        let score = self.dealer_hand.score();
        tracing::debug!(score, drawn = drawn_cards.len(), "dealer stands");
        self.events.push(GameEvent::DealerStood { score });
        self.state = GameState::RoundOver;

        Ok(drawn_cards)
    }

    /// Settles every hand against the dealer and pays out.
    ///
    /// Each hand holding a bet is resolved with [`resolve_hand`] and its
    /// [`payout`] is credited; bets were taken when placed, so a loss credits
    /// nothing. Every hand, and then the dealer's hand, goes to the discard
    /// pile. The game returns to `WaitingForPlayers`.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in round-over state.
    pub fn settle(&mut self) -> Result<RoundResult, ShowdownError> {
        if self.state != GameState::RoundOver {
            return Err(ShowdownError::InvalidState);
        }

        let dealer_value = self.dealer_hand.score();
        let dealer_bust = self.dealer_hand.is_bust();
        let dealer_natural = self.dealer_hand.is_natural();

        let mut player_results = Vec::new();

        for order_index in 0..self.round_players.len() {
            let player_id = self.round_players[order_index];
            let Some(seat) = self.players.iter().position(|p| p.id() == player_id) else {
                continue;
            };

            let hands = core::mem::take(&mut self.players[seat].hands);
            let mut hand_results = Vec::new();
            let mut total_payout: usize = 0;

            for (hand_index, mut hand) in hands.into_iter().enumerate() {
                let bet = hand.bet();
                if bet == 0 {
                    self.shoe.discard(&mut hand);
                    continue;
                }

                let resolution = resolve_hand(&hand, &self.dealer_hand);
                let paid = payout(resolution, bet);
                self.players[seat].credit(paid);
                total_payout += paid;

                let result = HandResult {
                    player_id,
                    hand_index,
                    outcome: resolution.outcome(),
                    resolution,
                    bet,
                    payout: paid,
                    player_value: hand.score(),
                    dealer_value,
                };
                tracing::debug!(
                    player_id,
                    hand_index,
                    outcome = ?result.outcome,
                    bet,
                    payout = paid,
                    "hand settled"
                );
                self.events.push(GameEvent::HandSettled(result));
                hand_results.push(result);

                self.shoe.discard(&mut hand);
            }

            let chips = self.players[seat].chips();
            let start = self
                .round_start_chips
                .get(&player_id)
                .copied()
                .unwrap_or(chips);
            #[expect(clippy::cast_possible_wrap, reason = "chip counts fit in isize")]
            let net = chips as isize - start as isize;

            player_results.push(PlayerResult {
                player_id,
                hands: hand_results,
                total_payout,
                net,
                chips,
            });
        }

        let dealer_cards = self.dealer_hand.take_cards();
        self.shoe.discard_cards(dealer_cards);

        self.events.push(GameEvent::RoundSummary {
            chips: self
                .players
                .iter()
                .map(|player| (player.id(), player.chips()))
                .collect(),
        });
        tracing::info!(
            dealer_value,
            dealer_bust,
            dealer_natural,
            players = player_results.len(),
            "round settled"
        );

        self.reset_round();

        Ok(RoundResult {
            players: player_results,
            dealer_value,
            dealer_bust,
            dealer_natural,
        })
    }
}
