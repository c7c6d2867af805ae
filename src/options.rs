//! Table configuration options.

/// Algorithm used to shuffle the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShuffleMethod {
    /// Relocate a random card to a random position, twice per card.
    ///
    /// This is the classic table behavior. It does not produce a uniformly
    /// distributed permutation.
    #[default]
    Relocate,
    /// Unbiased Fisher-Yates shuffle.
    FisherYates,
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use shoebj::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(6)
///     .with_reshuffle_threshold(80)
///     .with_max_players(2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Number of decks in a freshly built shoe.
    pub decks: u8,
    /// A new round rebuilds the whole shoe when fewer cards than this remain.
    /// 0 disables the check.
    pub reshuffle_threshold: usize,
    /// Chips handed to a player who joins without specifying an amount.
    pub starting_chips: usize,
    /// Maximum number of seated players.
    pub max_players: usize,
    /// Shuffle algorithm.
    pub shuffle: ShuffleMethod,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 4,
            reshuffle_threshold: 60,
            starting_chips: 1000,
            max_players: 3,
            shuffle: ShuffleMethod::Relocate,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebj::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the shoe size below which a new round rebuilds the shoe.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebj::GameOptions;
    ///
    /// let options = GameOptions::default().with_reshuffle_threshold(0);
    /// assert_eq!(options.reshuffle_threshold, 0);
    /// ```
    #[must_use]
    pub const fn with_reshuffle_threshold(mut self, threshold: usize) -> Self {
        self.reshuffle_threshold = threshold;
        self
    }

    /// Sets the default chip count for new players.
    #[must_use]
    pub const fn with_starting_chips(mut self, chips: usize) -> Self {
        self.starting_chips = chips;
        self
    }

    /// Sets the maximum number of seated players.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebj::GameOptions;
    ///
    /// let options = GameOptions::default().with_max_players(1);
    /// assert_eq!(options.max_players, 1);
    /// ```
    #[must_use]
    pub const fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }

    /// Sets the shuffle algorithm.
    ///
    /// # Example
    ///
    /// ```
    /// use shoebj::{GameOptions, ShuffleMethod};
    ///
    /// let options = GameOptions::default().with_shuffle(ShuffleMethod::FisherYates);
    /// assert_eq!(options.shuffle, ShuffleMethod::FisherYates);
    /// ```
    #[must_use]
    pub const fn with_shuffle(mut self, shuffle: ShuffleMethod) -> Self {
        self.shuffle = shuffle;
        self
    }
}
