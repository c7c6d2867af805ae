//! Game state types.

/// Game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Between rounds; players may join or leave.
    WaitingForPlayers,
    /// Accepting bets for the next round.
    Betting,
    /// Waiting for player actions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Dealer is done and the round can be settled.
    RoundOver,
}

/// Represents the current turn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPosition {
    /// The player on turn.
    pub player_id: u8,
    /// Index into the player's hands (for splits).
    pub hand_index: usize,
}

/// A player decision on the hand in turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Take one more card.
    Hit,
    /// Keep the hand as it is.
    Stand,
    /// Double the bet and take exactly one card.
    Double,
    /// Split a pair into two hands.
    Split,
}

impl Action {
    /// All actions, in prompt order.
    pub const ALL: [Self; 4] = [Self::Hit, Self::Stand, Self::Double, Self::Split];
}

/// The actions currently offered for the hand in turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvailableActions {
    /// Hit is offered.
    pub hit: bool,
    /// Stand is offered.
    pub stand: bool,
    /// Double down is offered.
    pub double: bool,
    /// Split is offered.
    pub split: bool,
}

impl AvailableActions {
    /// Nothing is offered.
    pub const NONE: Self = Self {
        hit: false,
        stand: false,
        double: false,
        split: false,
    };

    /// Returns whether `action` is offered.
    #[must_use]
    pub const fn allows(self, action: Action) -> bool {
        match action {
            Action::Hit => self.hit,
            Action::Stand => self.stand,
            Action::Double => self.double,
            Action::Split => self.split,
        }
    }

    /// Returns whether no action is offered.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.hit || self.stand || self.double || self.split)
    }

    /// Iterates over the offered actions.
    pub fn iter(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |&action| self.allows(action))
    }
}
