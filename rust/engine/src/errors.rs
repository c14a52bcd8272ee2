use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Insufficient chips: need {needed}, have {available}")]
    InsufficientChips { needed: u32, available: u32 },
    #[error("Cannot check facing a bet of {to_call}")]
    CheckFacingBet { to_call: u32 },
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already in progress")]
    HandInProgress,
    #[error("Waiting for the opponent to respond")]
    AwaitingOpponent,
    #[error("Opponent has nothing to respond to")]
    NothingToRespondTo,
    #[error("No opponent to play against")]
    NoEncounter,
    #[error("Encounter still undecided: both sides have chips")]
    EncounterUndecided,
    #[error("Encounter already decided")]
    EncounterDecided,
    #[error("Player has no chips left")]
    PlayerBusted,
    #[error("Run already complete at level {level}")]
    RunComplete { level: u32 },
    #[error("Hand evaluation needs 5 to 7 cards, got {count}")]
    InvalidHandSize { count: usize },
    #[error("Deck exhausted: needed {needed}, {remaining} remaining")]
    DeckExhausted { needed: usize, remaining: usize },
    #[error("Item {index} is missing or already used")]
    ItemUnavailable { index: usize },
}

impl GameError {
    /// Errors caused by a bad player action. The state is unchanged and the
    /// action can simply be asked for again.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GameError::InvalidBetAmount { .. }
                | GameError::InsufficientChips { .. }
                | GameError::CheckFacingBet { .. }
                | GameError::ItemUnavailable { .. }
        )
    }
}
