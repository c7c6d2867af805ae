//! Error types for game operations.

use thiserror::Error;

/// Errors that can occur when seating a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JoinError {
    /// Every seat is taken.
    #[error("the table is full")]
    TableFull,
    /// Players cannot join while a round is in progress.
    #[error("invalid game state for joining")]
    InvalidState,
}

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Insufficient funds.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// Player already placed a bet this round.
    #[error("player already placed a bet")]
    AlreadyBet,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game state for dealing.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// No players have placed bets.
    #[error("no players have placed bets")]
    NoBets,
    /// Neither the shoe nor the discard pile holds a card.
    #[error("no cards left to deal or shuffle")]
    OutOfCards,
}

/// Errors that can occur during player actions.
///
/// Every variant except [`ActionError::OutOfCards`] is a rejection: nothing
/// changed and the player may choose again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Not this player's turn.
    #[error("not this player's turn")]
    NotYourTurn,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// Hand is not active.
    #[error("hand is not active")]
    HandNotActive,
    /// Cannot double down on this hand.
    #[error("double down only allowed on the initial two cards")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("only two cards of the same rank can be split")]
    CannotSplit,
    /// The hand already took part in a split.
    #[error("hand has already been split")]
    AlreadySplit,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// No cards left anywhere.
    #[error("no cards left to deal or shuffle")]
    OutOfCards,
}

impl ActionError {
    /// Returns whether the error ends the session rather than rejecting a
    /// single choice.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::OutOfCards)
    }
}

impl From<DealError> for ActionError {
    fn from(_: DealError) -> Self {
        Self::OutOfCards
    }
}

/// Errors that can occur during dealer play and settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// Invalid game state for showdown.
    #[error("invalid game state for showdown")]
    InvalidState,
    /// No cards left anywhere.
    #[error("no cards left to deal or shuffle")]
    OutOfCards,
}

impl From<DealError> for ShowdownError {
    fn from(_: DealError) -> Self {
        Self::OutOfCards
    }
}

/// Errors that end a collaborator-driven round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// No seated player has chips to bet.
    #[error("no players with chips at the table")]
    NoPlayers,
    /// The bet collaborator returned an amount outside `1..=chips`.
    #[error("bet input broke its contract: {0}")]
    InvalidBet(BetError),
    /// The round could not continue because no cards exist anywhere.
    #[error("no cards left to deal or shuffle")]
    OutOfCards,
    /// The game was not ready to start a round.
    #[error("invalid game state for a new round")]
    InvalidState,
}

impl From<DealError> for RoundError {
    fn from(err: DealError) -> Self {
        match err {
            DealError::OutOfCards => Self::OutOfCards,
            DealError::NoBets => Self::NoPlayers,
            DealError::InvalidState => Self::InvalidState,
        }
    }
}

impl From<ShowdownError> for RoundError {
    fn from(err: ShowdownError) -> Self {
        match err {
            ShowdownError::OutOfCards => Self::OutOfCards,
            ShowdownError::InvalidState => Self::InvalidState,
        }
    }
}

/// Errors that can occur during reshuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReshuffleError {
    /// Invalid game state for reshuffling.
    #[error("invalid game state for reshuffling")]
    InvalidState,
}
