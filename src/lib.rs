//! A multi-player blackjack table engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] session that owns a multi-deck [`Shoe`], the
//! seated players and the dealer, and runs the round flow: betting, dealing,
//! player actions (hit, stand, double down, split), dealer play, and
//! settlement. Decisions come either from direct calls or from
//! [`BetInput`]/[`ActionInput`] collaborators, and every table event is
//! reported as a [`GameEvent`].
//!
//! # Example
//!
//! ```
//! use shoebj::{Action, AvailableActions, Game, GameEvent, GameOptions, HandView};
//!
//! let mut game = Game::new(GameOptions::default(), 42);
//! let alice = game.join("Alice", 100).unwrap();
//!
//! let mut bets = |_: &str, _: usize| 10_usize;
//! let mut actions = |_: &HandView<'_>, _: AvailableActions| Action::Stand;
//! let mut events: Vec<GameEvent> = Vec::new();
//! let result = game.play_round(&mut bets, &mut actions, &mut events).unwrap();
//!
//! assert_eq!(result.player(alice).unwrap().chips, game.get_chips(alice).unwrap());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod options;
pub mod player;
pub mod result;
pub mod shoe;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use error::{
    ActionError, BetError, DealError, JoinError, ReshuffleError, RoundError, ShowdownError,
};
pub use event::{DisplaySink, GameEvent};
pub use game::{
    Action, ActionInput, AvailableActions, BetInput, Game, GameState, HandView, TurnPosition,
    payout, resolve_hand,
};
pub use hand::{DealerHand, Hand, HandStatus};
pub use options::{GameOptions, ShuffleMethod};
pub use player::Player;
pub use result::{HandOutcome, HandResult, PlayerResult, Resolution, RoundResult};
pub use shoe::Shoe;
