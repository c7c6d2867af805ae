//! Game integration tests.

use shoebj::{
    Action, ActionError, ActionInput, AvailableActions, BetError, Card, DECK_SIZE, DealError,
    DealerHand, Game, GameEvent, GameOptions, GameState, Hand, HandOutcome, HandStatus, HandView,
    JoinError, Resolution, RoundError, ShowdownError, Shoe, ShuffleMethod, Suit, payout,
    resolve_hand,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

fn hand_of(cards: &[Card]) -> Hand {
    let mut hand = Hand::new(10);
    for &c in cards {
        hand.add_card(c);
    }
    hand
}

fn dealer_of(cards: &[Card]) -> DealerHand {
    let mut dealer = DealerHand::new();
    for &c in cards {
        dealer.add_card(c);
    }
    dealer
}

/// Seats one player with `chips`, takes a 10 chip bet, stacks the shoe with
/// `draws` (first card dealt first), and deals.
fn dealt_game(chips: usize, draws: &[Card]) -> (Game, u8) {
    let mut game = Game::new(GameOptions::default(), 1);
    let player = game.join("Alice", chips).unwrap();
    game.start_betting();
    game.bet(player, 10).unwrap();
    game.shoe_mut().stack(draws.iter().copied());
    game.deal().unwrap();
    (game, player)
}

/// Plays a scripted list of actions, then stands forever.
struct Scripted(Vec<Action>);

impl ActionInput for Scripted {
    fn choose(&mut self, _view: &HandView<'_>, _available: AvailableActions) -> Action {
        if self.0.is_empty() {
            Action::Stand
        } else {
            self.0.remove(0)
        }
    }
}

/// Splits and doubles whenever offered, otherwise hits below 17.
struct Aggressive;

impl ActionInput for Aggressive {
    fn choose(&mut self, view: &HandView<'_>, available: AvailableActions) -> Action {
        let score = view.hand.score();
        if available.split {
            Action::Split
        } else if available.double && (10..=11).contains(&score) {
            Action::Double
        } else if score < 17 {
            Action::Hit
        } else {
            Action::Stand
        }
    }
}

#[test]
fn score_without_aces_is_card_sum() {
    let hand = hand_of(&[
        card(Suit::Hearts, 2),
        card(Suit::Clubs, 9),
        card(Suit::Spades, 13),
    ]);
    assert_eq!(hand.score(), 21);
    assert!(!hand.is_soft());

    assert_eq!(Hand::new(0).score(), 0);
}

#[test]
fn aces_downgrade_one_at_a_time() {
    let soft_17 = hand_of(&[card(Suit::Hearts, 1), card(Suit::Clubs, 6)]);
    assert_eq!(soft_17.score(), 17);
    assert!(soft_17.is_soft());

    let two_aces_nine = hand_of(&[
        card(Suit::Hearts, 1),
        card(Suit::Clubs, 1),
        card(Suit::Spades, 9),
    ]);
    assert_eq!(two_aces_nine.score(), 21);

    let four_aces = hand_of(&[
        card(Suit::Hearts, 1),
        card(Suit::Clubs, 1),
        card(Suit::Spades, 1),
        card(Suit::Diamonds, 1),
    ]);
    assert_eq!(four_aces.score(), 14);

    let hard = hand_of(&[
        card(Suit::Hearts, 1),
        card(Suit::Clubs, 10),
        card(Suit::Spades, 12),
    ]);
    assert_eq!(hard.score(), 21);
    assert!(!hard.is_soft());
}

#[test]
fn score_can_exceed_21_when_no_aces_remain() {
    let hand = hand_of(&[
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 10),
        card(Suit::Spades, 10),
    ]);
    assert_eq!(hand.score(), 30);
    assert!(hand.is_bust());

    let hand = hand_of(&[
        card(Suit::Hearts, 1),
        card(Suit::Clubs, 10),
        card(Suit::Spades, 10),
        card(Suit::Diamonds, 5),
    ]);
    assert_eq!(hand.score(), 26);
}

#[test]
fn natural_requires_two_cards_and_no_split() {
    let natural = hand_of(&[card(Suit::Hearts, 1), card(Suit::Spades, 13)]);
    assert!(natural.is_natural());

    let three_card_21 = hand_of(&[
        card(Suit::Hearts, 7),
        card(Suit::Spades, 7),
        card(Suit::Clubs, 7),
    ]);
    assert_eq!(three_card_21.score(), 21);
    assert!(!three_card_21.is_natural());

    let mut split_hand = Hand::from_split(card(Suit::Hearts, 1), 10);
    split_hand.add_card(card(Suit::Clubs, 13));
    assert_eq!(split_hand.score(), 21);
    assert!(split_hand.is_split_result());
    assert!(!split_hand.is_natural());
}

#[test]
fn shoe_deal_recycles_discard_pile() {
    let mut shoe = Shoe::new(ShuffleMethod::Relocate, 5);
    assert!(shoe.is_empty());
    shoe.discard_cards([
        card(Suit::Hearts, 2),
        card(Suit::Hearts, 3),
        card(Suit::Hearts, 4),
        card(Suit::Hearts, 5),
        card(Suit::Hearts, 6),
    ]);

    let dealt = shoe.deal().unwrap();
    assert!((2..=6).contains(&dealt.rank));
    assert_eq!(shoe.len(), 4);
    assert_eq!(shoe.discard_len(), 0);
}

#[test]
fn shoe_deal_fails_when_no_cards_exist() {
    let mut shoe = Shoe::new(ShuffleMethod::Relocate, 5);
    assert_eq!(shoe.deal().unwrap_err(), DealError::OutOfCards);
}

#[test]
fn shoe_build_and_discard() {
    let mut shoe = Shoe::new(ShuffleMethod::FisherYates, 5);
    shoe.build(3);
    assert_eq!(shoe.len(), 3 * DECK_SIZE);

    let mut hand = Hand::new(25);
    hand.add_card(shoe.deal().unwrap());
    hand.add_card(shoe.deal().unwrap());
    let held: Vec<Card> = hand.cards().to_vec();

    shoe.discard(&mut hand);
    assert!(hand.is_empty());
    assert_eq!(hand.bet(), 0);
    assert_eq!(shoe.discards(), held.as_slice());
    assert_eq!(shoe.available(), 3 * DECK_SIZE);
}

#[test]
fn threshold_reshuffle_replaces_shoe_and_discards() {
    let mut game = Game::new(GameOptions::default(), 3);
    game.shoe_mut().stack(vec![card(Suit::Hearts, 2); 10]);
    game.shoe_mut().discard_cards([card(Suit::Clubs, 9)]);

    assert!(game.needs_reshuffle());
    assert!(game.check_and_reshuffle().unwrap());
    assert_eq!(game.cards_remaining(), 4 * DECK_SIZE);
    assert_eq!(game.shoe().discard_len(), 0);
    assert_eq!(
        game.drain_events(),
        vec![GameEvent::ShoeRebuilt { decks: 4 }]
    );

    assert!(!game.check_and_reshuffle().unwrap());
}

#[test]
fn join_and_seating_rules() {
    let mut game = Game::new(GameOptions::default(), 1);
    let a = game.join("A", 0).unwrap();
    let b = game.seat("B").unwrap();
    game.join("C", 5).unwrap();
    assert_eq!(game.join("D", 5).unwrap_err(), JoinError::TableFull);
    assert_eq!(game.get_chips(b), Some(1000));

    let broke = game.remove_broke_players();
    assert_eq!(broke.len(), 1);
    assert_eq!(broke[0].id(), a);
    assert_eq!(game.player_count(), 2);

    game.start_betting();
    game.bet(b, 100).unwrap();
    assert_eq!(game.join("E", 5).unwrap_err(), JoinError::InvalidState);

    let left = game.leave(b).unwrap();
    assert_eq!(left.chips(), 1000);
}

#[test]
fn player_ids_stay_unique_when_the_counter_wraps() {
    let mut game = Game::new(GameOptions::default(), 1);
    let regular = game.join("Regular", 100).unwrap();

    for _ in 0..600 {
        let guest = game.join("Guest", 5).unwrap();
        assert_ne!(guest, regular);
        assert_eq!(game.player(guest).unwrap().name(), "Guest");
        game.leave(guest).unwrap();
    }
    assert_eq!(game.player(regular).unwrap().name(), "Regular");
    assert_eq!(game.player_count(), 1);
}

#[test]
fn leaving_during_betting_refunds_the_bet() {
    let mut game = Game::new(GameOptions::default(), 1);
    let alice = game.join("Alice", 100).unwrap();
    let bob = game.join("Bob", 50).unwrap();
    game.start_betting();
    game.bet(alice, 30).unwrap();
    game.bet(bob, 20).unwrap();
    assert_eq!(game.get_chips(alice), Some(70));

    let left = game.leave(alice).unwrap();
    assert_eq!(left.chips(), 100);
    assert!(left.hands().is_empty());
    assert!(game.player(alice).is_none());
    assert_eq!(game.cards_in_play(), 4 * DECK_SIZE);

    // The remaining bettor plays on alone.
    game.deal().unwrap();
    assert_eq!(game.cards_in_play(), 4 * DECK_SIZE);
    assert!(game.drain_events().iter().all(|event| !matches!(
        event,
        GameEvent::CardDealt { player_id, .. } if *player_id == alice
    )));

    // Once cards are out nobody can leave.
    assert!(game.leave(bob).is_none());
}

#[test]
fn bet_errors() {
    let mut game = Game::new(GameOptions::default(), 1);
    let player = game.join("Alice", 10).unwrap();

    assert_eq!(game.bet(player, 5).unwrap_err(), BetError::InvalidState);

    game.start_betting();
    assert_eq!(game.bet(player, 0).unwrap_err(), BetError::ZeroBet);
    assert_eq!(
        game.bet(player, 20).unwrap_err(),
        BetError::InsufficientFunds
    );
    assert_eq!(
        game.bet(player + 1, 1).unwrap_err(),
        BetError::PlayerNotFound
    );

    game.bet(player, 4).unwrap();
    assert_eq!(game.bet(player, 4).unwrap_err(), BetError::AlreadyBet);
    assert_eq!(game.get_chips(player), Some(6));
}

#[test]
fn deal_errors() {
    let mut game = Game::new(GameOptions::default(), 1);
    assert_eq!(game.deal().unwrap_err(), DealError::InvalidState);

    let player = game.join("Alice", 10).unwrap();
    game.start_betting();
    assert_eq!(game.deal().unwrap_err(), DealError::NoBets);

    game.bet(player, 5).unwrap();
    game.shoe_mut().stack([
        card(Suit::Hearts, 9),
        card(Suit::Clubs, 5),
        card(Suit::Diamonds, 7),
    ]);

    assert_eq!(game.deal().unwrap_err(), DealError::OutOfCards);
    assert_eq!(game.shoe().len(), 3);
    assert_eq!(game.state(), GameState::Betting);
}

#[test]
fn basic_round_flow() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 8),   // player
            card(Suit::Clubs, 6),    // dealer up
            card(Suit::Diamonds, 7), // player
            card(Suit::Spades, 10),  // dealer hole
            card(Suit::Hearts, 4),   // player hit
            card(Suit::Clubs, 5),    // dealer draw
        ],
    );
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.current_player(), Some(player));

    let hit_card = game.hit(player, 0).unwrap();
    assert_eq!(hit_card.rank, 4);
    assert_eq!(game.state(), GameState::PlayerTurn);

    game.stand(player, 0).unwrap();
    assert_eq!(game.state(), GameState::DealerTurn);

    let drawn = game.dealer_play().unwrap();
    assert_eq!(drawn.len(), 1);
    assert_eq!(game.state(), GameState::RoundOver);

    let result = game.settle().unwrap();
    assert_eq!(result.players.len(), 1);
    assert_eq!(result.dealer_value, 21);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Lose);
    assert_eq!(result.players[0].net, -10);
    assert_eq!(game.get_chips(player), Some(90));
    assert_eq!(game.state(), GameState::WaitingForPlayers);
    assert_eq!(game.shoe().discard_len(), 6);
    assert!(game.player(player).unwrap().hands().is_empty());
}

#[test]
fn twenty_beats_dealer_eighteen() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 13),
            card(Suit::Clubs, 10),
            card(Suit::Diamonds, 12),
            card(Suit::Spades, 8),
        ],
    );
    game.stand(player, 0).unwrap();
    assert!(game.dealer_play().unwrap().is_empty());

    let before = game.get_chips(player).unwrap();
    let result = game.settle().unwrap();
    assert_eq!(game.get_chips(player), Some(before + 20));
    assert_eq!(
        result.players[0].hands[0].resolution,
        Resolution::HigherScore
    );
}

#[test]
fn natural_pays_three_to_two() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 1),   // player
            card(Suit::Clubs, 9),    // dealer up
            card(Suit::Spades, 13),  // player
            card(Suit::Diamonds, 7), // dealer hole
            card(Suit::Clubs, 2),    // dealer draw
        ],
    );
    // A natural stands on entry, so the action phase is already over.
    assert_eq!(game.state(), GameState::DealerTurn);
    assert_eq!(
        game.player(player).unwrap().hands()[0].status(),
        HandStatus::Stand
    );

    game.dealer_play().unwrap();
    let result = game.settle().unwrap();
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.players[0].hands[0].payout, 25);
    assert_eq!(game.get_chips(player), Some(115));
}

#[test]
fn bust_loses_at_settlement_without_chip_change() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 10),
            card(Suit::Diamonds, 6),
            card(Suit::Spades, 8),
            card(Suit::Hearts, 13), // player hit
        ],
    );
    game.hit(player, 0).unwrap();
    assert_eq!(game.state(), GameState::DealerTurn);
    assert!(game.drain_events().contains(&GameEvent::HandBusted {
        player_id: player,
        hand_index: 0,
        score: 26,
    }));

    game.dealer_play().unwrap();
    let result = game.settle().unwrap();
    assert_eq!(
        result.players[0].hands[0].resolution,
        Resolution::PlayerBust
    );
    assert_eq!(game.get_chips(player), Some(90));
    assert_eq!(game.shoe().discard_len(), 5);
}

#[test]
fn double_down_takes_one_card_and_ends_hand() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 5),   // player
            card(Suit::Clubs, 2),    // dealer up
            card(Suit::Diamonds, 6), // player
            card(Suit::Spades, 3),   // dealer hole
            card(Suit::Hearts, 10),  // double draw
            card(Suit::Clubs, 10),   // dealer draw
            card(Suit::Clubs, 3),    // dealer draw
        ],
    );
    assert!(game.available_actions().double);

    let drawn = game.double_down(player, 0).unwrap();
    assert_eq!(drawn.rank, 10);
    assert_eq!(game.state(), GameState::DealerTurn);
    assert_eq!(game.available_actions(), AvailableActions::NONE);

    let hand = &game.player(player).unwrap().hands()[0];
    assert_eq!(hand.len(), 3);
    assert_eq!(hand.bet(), 20);
    assert!(hand.is_doubled());
    assert_eq!(hand.status(), HandStatus::Doubled);
    assert_eq!(game.get_chips(player), Some(80));

    assert_eq!(game.dealer_play().unwrap().len(), 2);
    game.settle().unwrap();
    assert_eq!(game.get_chips(player), Some(120));
}

#[test]
fn double_down_rejected_after_hit() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 5),
            card(Suit::Clubs, 2),
            card(Suit::Diamonds, 4),
            card(Suit::Spades, 3),
            card(Suit::Hearts, 2), // player hit
        ],
    );
    game.hit(player, 0).unwrap();
    assert!(!game.available_actions().double);

    assert_eq!(
        game.double_down(player, 0).unwrap_err(),
        ActionError::CannotDouble
    );
    assert_eq!(game.get_chips(player), Some(90));
    assert_eq!(game.player(player).unwrap().hands()[0].bet(), 10);
    assert_eq!(game.player(player).unwrap().hands()[0].len(), 3);
}

#[test]
fn double_down_rejected_without_funds() {
    let (mut game, player) = dealt_game(
        15,
        &[
            card(Suit::Hearts, 5),
            card(Suit::Clubs, 2),
            card(Suit::Diamonds, 4),
            card(Suit::Spades, 3),
            card(Suit::Hearts, 9),
        ],
    );
    let available = game.available_actions();
    assert!(available.hit && available.stand && !available.double);

    assert_eq!(
        game.double_down(player, 0).unwrap_err(),
        ActionError::InsufficientFunds
    );
    assert_eq!(game.get_chips(player), Some(5));
    assert_eq!(game.shoe().len(), 1);
}

#[test]
fn split_creates_sibling_played_next() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 8),   // player
            card(Suit::Clubs, 5),    // dealer up
            card(Suit::Diamonds, 8), // player
            card(Suit::Spades, 9),   // dealer hole
            card(Suit::Hearts, 2),   // original hand draw
            card(Suit::Clubs, 3),    // sibling draw
        ],
    );
    assert!(game.available_actions().split);
    game.split(player, 0).unwrap();

    let hands = game.player(player).unwrap().hands();
    assert_eq!(hands.len(), 2);
    assert_eq!(
        hands[0].cards(),
        &[card(Suit::Hearts, 8), card(Suit::Hearts, 2)]
    );
    assert_eq!(
        hands[1].cards(),
        &[card(Suit::Diamonds, 8), card(Suit::Clubs, 3)]
    );
    assert!(!hands[0].is_split_result());
    assert!(hands[1].is_split_result());
    assert_eq!(hands[1].bet(), 10);
    assert_eq!(game.get_chips(player), Some(80));

    assert_eq!(game.current_turn().unwrap().hand_index, 0);
    game.stand(player, 0).unwrap();
    assert_eq!(game.current_turn().unwrap().hand_index, 1);
    assert_eq!(game.state(), GameState::PlayerTurn);
}

#[test]
fn original_hand_of_split_can_be_natural() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 13),  // player
            card(Suit::Clubs, 10),   // dealer up
            card(Suit::Spades, 13),  // player
            card(Suit::Spades, 8),   // dealer hole
            card(Suit::Hearts, 1),   // original hand draw
            card(Suit::Clubs, 9),    // sibling draw
        ],
    );
    game.split(player, 0).unwrap();

    let hands = game.player(player).unwrap().hands();
    assert!(!hands[0].is_split_result());
    assert!(hands[0].was_split());
    assert_eq!(hands[0].score(), 21);
    assert!(hands[0].is_natural());
    assert_eq!(hands[0].status(), HandStatus::Stand);
    assert!(!hands[1].is_natural());

    // The natural stands on its own, so the sibling is on turn.
    assert_eq!(game.current_turn().unwrap().hand_index, 1);
    game.stand(player, 1).unwrap();
    game.dealer_play().unwrap();

    let result = game.settle().unwrap();
    let hands = &result.players[0].hands;
    assert_eq!(hands[0].resolution, Resolution::PlayerNatural);
    assert_eq!(hands[0].payout, 25);
    assert_eq!(hands[1].resolution, Resolution::HigherScore);
    assert_eq!(hands[1].payout, 20);
    assert_eq!(game.get_chips(player), Some(125));
}

#[test]
fn sibling_of_split_is_never_natural() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 1),   // player
            card(Suit::Clubs, 10),   // dealer up
            card(Suit::Spades, 1),   // player
            card(Suit::Spades, 8),   // dealer hole
            card(Suit::Hearts, 5),   // original hand draw
            card(Suit::Clubs, 13),   // sibling draw
        ],
    );
    game.split(player, 0).unwrap();
    game.dealer_play().unwrap();

    let result = game.settle().unwrap();
    let hands = &result.players[0].hands;
    assert_eq!(hands[0].resolution, Resolution::LowerScore);
    assert_eq!(hands[1].player_value, 21);
    assert_eq!(hands[1].resolution, Resolution::HigherScore);
    assert_eq!(hands[1].payout, 20);
    assert_eq!(game.get_chips(player), Some(100));
}

#[test]
fn split_is_not_recursive() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 8),
            card(Suit::Clubs, 5),
            card(Suit::Diamonds, 8),
            card(Suit::Spades, 9),
            card(Suit::Clubs, 8), // original hand pairs again
            card(Suit::Spades, 8), // sibling pairs too
        ],
    );
    game.split(player, 0).unwrap();
    assert!(!game.available_actions().split);
    assert_eq!(
        game.split(player, 0).unwrap_err(),
        ActionError::AlreadySplit
    );

    game.stand(player, 0).unwrap();
    assert_eq!(
        game.split(player, 1).unwrap_err(),
        ActionError::AlreadySplit
    );
    assert_eq!(game.player(player).unwrap().hands().len(), 2);
    assert_eq!(game.get_chips(player), Some(80));
}

#[test]
fn split_rejected_for_unequal_ranks_and_three_cards() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 13),
            card(Suit::Clubs, 5),
            card(Suit::Diamonds, 10),
            card(Suit::Spades, 9),
        ],
    );
    assert!(!game.available_actions().split);
    assert_eq!(
        game.split(player, 0).unwrap_err(),
        ActionError::CannotSplit
    );
    assert_eq!(game.player(player).unwrap().hands().len(), 1);
    assert_eq!(game.get_chips(player), Some(90));

    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 2),
            card(Suit::Clubs, 5),
            card(Suit::Diamonds, 2),
            card(Suit::Spades, 9),
            card(Suit::Clubs, 2), // player hit
        ],
    );
    game.hit(player, 0).unwrap();
    assert_eq!(
        game.split(player, 0).unwrap_err(),
        ActionError::CannotSplit
    );
    assert_eq!(game.player(player).unwrap().hands()[0].len(), 3);
    assert_eq!(game.get_chips(player), Some(90));
}

#[test]
fn split_aces_stand_on_one_card_each() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 1),   // player
            card(Suit::Clubs, 5),    // dealer up
            card(Suit::Diamonds, 1), // player
            card(Suit::Spades, 9),   // dealer hole
            card(Suit::Hearts, 13),  // original hand draw
            card(Suit::Clubs, 4),    // sibling draw
            card(Suit::Clubs, 4),    // dealer draw
        ],
    );
    game.split(player, 0).unwrap();

    let hands = game.player(player).unwrap().hands();
    assert_eq!(hands.len(), 2);
    assert!(hands.iter().all(|h| h.len() == 2));
    assert!(hands.iter().all(|h| h.status() == HandStatus::AutoStand));
    assert_eq!(game.state(), GameState::DealerTurn);
    assert_eq!(game.available_actions(), AvailableActions::NONE);

    let events = game.drain_events();
    let auto_stands = events
        .iter()
        .filter(|e| matches!(e, GameEvent::SplitAcesStand { .. }))
        .count();
    assert_eq!(auto_stands, 2);

    game.dealer_play().unwrap();
    let result = game.settle().unwrap();
    let hands = &result.players[0].hands;
    // The original hand keeps its natural claim after a split.
    assert_eq!(hands[0].resolution, Resolution::PlayerNatural);
    assert_eq!(hands[0].payout, 25);
    assert_eq!(hands[1].resolution, Resolution::LowerScore);
    assert_eq!(game.get_chips(player), Some(105));
}

#[test]
fn dealer_natural_skips_player_actions() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 1),
            card(Suit::Diamonds, 9),
            card(Suit::Spades, 13),
        ],
    );
    assert_eq!(game.state(), GameState::DealerTurn);
    assert_eq!(game.current_player(), None);
    assert_eq!(game.hit(player, 0).unwrap_err(), ActionError::InvalidState);
    assert!(game.drain_events().contains(&GameEvent::DealerNatural));

    assert!(game.dealer_play().unwrap().is_empty());
    let result = game.settle().unwrap();
    assert!(result.dealer_natural);
    assert_eq!(
        result.players[0].hands[0].resolution,
        Resolution::DealerNatural
    );
    assert_eq!(game.get_chips(player), Some(90));
}

#[test]
fn both_naturals_push() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 1),
            card(Suit::Clubs, 1),
            card(Suit::Diamonds, 12),
            card(Suit::Spades, 13),
        ],
    );
    game.dealer_play().unwrap();
    let result = game.settle().unwrap();
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Push);
    assert_eq!(game.get_chips(player), Some(100));
}

#[test]
fn hole_card_stays_hidden_until_dealer_plays() {
    let draws = [
        card(Suit::Hearts, 10),  // player
        card(Suit::Clubs, 9),    // dealer up
        card(Suit::Diamonds, 7), // player
        card(Suit::Spades, 8),   // dealer hole
    ];
    let (mut game, player) = dealt_game(100, &draws);
    assert!(!game.dealer_hand().is_hole_revealed());
    assert_eq!(game.dealer_hand().visible_value(), 9);

    game.stand(player, 0).unwrap();
    game.dealer_play().unwrap();
    assert!(game.dealer_hand().is_hole_revealed());
    assert_eq!(game.dealer_hand().visible_value(), 17);

    let mut game = Game::new(GameOptions::default().with_reshuffle_threshold(0), 1);
    game.join("Alice", 100).unwrap();
    game.shoe_mut().stack(draws);
    let mut showing = Vec::new();
    let mut actions = |view: &HandView<'_>, _: AvailableActions| {
        showing.push(view.dealer_showing);
        Action::Stand
    };
    let mut bets = |_: &str, _: usize| 10_usize;
    game.play_round(&mut bets, &mut actions, &mut ()).unwrap();
    assert_eq!(showing, vec![9]);
}

#[test]
fn dealer_stands_on_soft_17_and_hits_16() {
    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 1),
            card(Suit::Diamonds, 9),
            card(Suit::Spades, 6),
        ],
    );
    game.stand(player, 0).unwrap();
    assert!(game.dealer_play().unwrap().is_empty());
    assert!(game.dealer_hand().is_soft());
    game.settle().unwrap();
    assert_eq!(game.get_chips(player), Some(110));

    let (mut game, player) = dealt_game(
        100,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 10),
            card(Suit::Diamonds, 9),
            card(Suit::Spades, 6),
            card(Suit::Hearts, 5),
        ],
    );
    game.stand(player, 0).unwrap();
    assert_eq!(game.dealer_play().unwrap(), vec![card(Suit::Hearts, 5)]);
    assert_eq!(game.dealer_hand().score(), 21);
}

#[test]
fn settlement_precedence() {
    let bust = [
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 10),
        card(Suit::Spades, 5),
    ];
    let natural = [card(Suit::Hearts, 1), card(Suit::Clubs, 13)];
    let eighteen = [card(Suit::Hearts, 10), card(Suit::Clubs, 8)];
    let three_card_21 = [
        card(Suit::Hearts, 7),
        card(Suit::Clubs, 7),
        card(Suit::Spades, 7),
    ];

    // A player bust loses even when the dealer busts too.
    assert_eq!(
        resolve_hand(&hand_of(&bust), &dealer_of(&bust)),
        Resolution::PlayerBust
    );
    assert_eq!(
        resolve_hand(&hand_of(&natural), &dealer_of(&natural)),
        Resolution::BothNatural
    );
    assert_eq!(
        resolve_hand(&hand_of(&natural), &dealer_of(&three_card_21)),
        Resolution::PlayerNatural
    );
    assert_eq!(
        resolve_hand(&hand_of(&eighteen), &dealer_of(&bust)),
        Resolution::DealerBust
    );
    assert_eq!(
        resolve_hand(&hand_of(&three_card_21), &dealer_of(&natural)),
        Resolution::DealerNatural
    );
    assert_eq!(
        resolve_hand(&hand_of(&three_card_21), &dealer_of(&eighteen)),
        Resolution::HigherScore
    );
    assert_eq!(
        resolve_hand(&hand_of(&eighteen), &dealer_of(&three_card_21)),
        Resolution::LowerScore
    );
    assert_eq!(
        resolve_hand(&hand_of(&eighteen), &dealer_of(&eighteen)),
        Resolution::EqualScore
    );
}

#[test]
fn payouts_truncate_natural_winnings() {
    assert_eq!(payout(Resolution::PlayerNatural, 10), 25);
    assert_eq!(payout(Resolution::PlayerNatural, 5), 12);
    assert_eq!(payout(Resolution::BothNatural, 5), 5);
    assert_eq!(payout(Resolution::HigherScore, 7), 14);
    assert_eq!(payout(Resolution::DealerNatural, 7), 0);
}

#[test]
fn turn_passes_between_players_in_seat_order() {
    let mut game = Game::new(GameOptions::default(), 1);
    let alice = game.join("Alice", 100).unwrap();
    let bob = game.join("Bob", 100).unwrap();
    game.start_betting();
    game.bet(alice, 10).unwrap();
    game.bet(bob, 20).unwrap();
    game.shoe_mut().stack([
        card(Suit::Hearts, 9),   // alice
        card(Suit::Clubs, 7),    // bob
        card(Suit::Diamonds, 5), // dealer up
        card(Suit::Spades, 9),   // alice
        card(Suit::Hearts, 8),   // bob
        card(Suit::Clubs, 10),   // dealer hole
        card(Suit::Hearts, 2),   // dealer draw
    ]);
    game.deal().unwrap();

    assert_eq!(game.current_player(), Some(alice));
    assert_eq!(game.stand(bob, 0).unwrap_err(), ActionError::NotYourTurn);
    game.stand(alice, 0).unwrap();
    assert_eq!(game.current_player(), Some(bob));
    game.stand(bob, 0).unwrap();
    assert_eq!(game.state(), GameState::DealerTurn);

    game.dealer_play().unwrap();
    let result = game.settle().unwrap();
    assert_eq!(result.players[0].player_id, alice);
    assert_eq!(result.player(alice).unwrap().net, 10);
    assert_eq!(result.player(bob).unwrap().net, -20);
}

#[test]
fn cards_are_conserved_within_a_round() {
    let mut game = Game::new(GameOptions::default(), 11);
    let player = game.join("Alice", 100).unwrap();
    let total = 4 * DECK_SIZE;
    assert_eq!(game.cards_in_play(), total);

    game.start_betting();
    game.bet(player, 10).unwrap();
    game.deal().unwrap();
    assert_eq!(game.cards_in_play(), total);

    while game.state() == GameState::PlayerTurn {
        game.hit(player, game.current_turn().unwrap().hand_index)
            .unwrap();
        assert_eq!(game.cards_in_play(), total);
    }
    game.dealer_play().unwrap();
    assert_eq!(game.cards_in_play(), total);
    game.settle().unwrap();
    assert_eq!(game.cards_in_play(), total);
    assert_eq!(game.shoe().available(), total);
}

#[test]
fn showdown_rejects_wrong_state() {
    let mut game = Game::new(GameOptions::default(), 1);
    assert_eq!(game.settle().unwrap_err(), ShowdownError::InvalidState);
    assert_eq!(
        game.dealer_play().unwrap_err(),
        ShowdownError::InvalidState
    );
}

#[test]
fn play_round_conserves_cards_and_chips_over_many_rounds() {
    let mut game = Game::new(GameOptions::default(), 2024);
    for name in ["Alice", "Bob", "Carol"] {
        game.join(name, 1000).unwrap();
    }
    let mut bets = |_: &str, chips: usize| chips.min(25);
    let mut events: Vec<GameEvent> = Vec::new();

    for _ in 0..40 {
        let result = game
            .play_round(&mut bets, &mut Aggressive, &mut events)
            .unwrap();
        assert_eq!(game.cards_in_play(), 4 * DECK_SIZE);
        assert_eq!(game.state(), GameState::WaitingForPlayers);
        for player in &result.players {
            assert_eq!(game.get_chips(player.player_id), Some(player.chips));
        }
    }

    assert!(events.iter().any(|e| matches!(e, GameEvent::ShoeRebuilt { .. })));
    assert!(events.iter().any(|e| matches!(e, GameEvent::HandSettled(_))));
}

#[test]
fn play_round_reprompts_after_rejected_action() {
    let mut game = Game::new(GameOptions::default().with_reshuffle_threshold(0), 1);
    let player = game.join("Alice", 100).unwrap();
    game.shoe_mut().stack([
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 9),
        card(Suit::Diamonds, 6),
        card(Suit::Spades, 8),
    ]);

    let mut bets = |_: &str, _: usize| 10_usize;
    let mut actions = Scripted(vec![Action::Split, Action::Stand]);
    let mut events: Vec<GameEvent> = Vec::new();
    game.play_round(&mut bets, &mut actions, &mut events)
        .unwrap();

    assert!(events.contains(&GameEvent::ActionRejected {
        player_id: player,
        hand_index: 0,
        action: Action::Split,
        error: ActionError::CannotSplit,
    }));
    assert!(events.contains(&GameEvent::HandStood {
        player_id: player,
        hand_index: 0,
        score: 16,
    }));
    assert!(matches!(
        events.last(),
        Some(GameEvent::RoundSummary { chips }) if chips == &vec![(player, 90)]
    ));
}

#[test]
fn play_round_aborts_when_out_of_cards() {
    let mut game = Game::new(GameOptions::default().with_reshuffle_threshold(0), 1);
    let player = game.join("Alice", 100).unwrap();
    game.shoe_mut().stack([
        card(Suit::Hearts, 5),
        card(Suit::Clubs, 9),
        card(Suit::Diamonds, 6),
        card(Suit::Spades, 7),
    ]);

    let mut bets = |_: &str, _: usize| 10_usize;
    let mut actions = Scripted(vec![Action::Hit]);
    let err = game
        .play_round(&mut bets, &mut actions, &mut ())
        .unwrap_err();

    assert_eq!(err, RoundError::OutOfCards);
    assert_eq!(game.get_chips(player), Some(100));
    assert_eq!(game.state(), GameState::WaitingForPlayers);
    assert_eq!(game.cards_in_play(), 4);
    assert_eq!(game.shoe().discard_len(), 4);
}

#[test]
fn play_round_rejects_broken_bet_contract() {
    let mut game = Game::new(GameOptions::default(), 1);
    let player = game.join("Alice", 100).unwrap();

    let mut too_much = |_: &str, chips: usize| chips + 1;
    let err = game
        .play_round(&mut too_much, &mut Scripted(Vec::new()), &mut ())
        .unwrap_err();
    assert_eq!(err, RoundError::InvalidBet(BetError::InsufficientFunds));
    assert_eq!(game.get_chips(player), Some(100));
    assert_eq!(game.state(), GameState::WaitingForPlayers);

    let mut nothing = |_: &str, _: usize| 0_usize;
    let err = game
        .play_round(&mut nothing, &mut Scripted(Vec::new()), &mut ())
        .unwrap_err();
    assert_eq!(err, RoundError::InvalidBet(BetError::ZeroBet));
}

#[test]
fn play_round_needs_players_with_chips() {
    let mut game = Game::new(GameOptions::default(), 1);
    game.join("Broke", 0).unwrap();
    let mut bets = |_: &str, _: usize| 1_usize;
    let err = game
        .play_round(&mut bets, &mut Scripted(Vec::new()), &mut ())
        .unwrap_err();
    assert_eq!(err, RoundError::NoPlayers);
}
