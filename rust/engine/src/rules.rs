use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// Ante each side posts per level before hole cards are dealt.
pub const ANTE_PER_LEVEL: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Pays the given amount to match the opponent
    Call(u32),
    /// Opens the betting by the given amount
    Bet(u32),
    /// Matches the opponent and raises by the given amount
    Raise(u32),
    UseItem(usize),
}

impl ValidatedAction {
    /// Chips this action moves from the player's stack into the pot.
    pub fn cost(&self, to_call: u32) -> u32 {
        match self {
            ValidatedAction::Fold | ValidatedAction::Check | ValidatedAction::UseItem(_) => 0,
            ValidatedAction::Call(paid) => *paid,
            ValidatedAction::Bet(n) | ValidatedAction::Raise(n) => to_call + n,
        }
    }
}

impl From<&ValidatedAction> for A {
    fn from(v: &ValidatedAction) -> Self {
        match v {
            ValidatedAction::Fold => A::Fold,
            ValidatedAction::Check => A::Check,
            ValidatedAction::Call(_) => A::Call,
            ValidatedAction::Bet(n) => A::Bet(*n),
            ValidatedAction::Raise(n) => A::Raise(*n),
            ValidatedAction::UseItem(i) => A::UseItem(*i),
        }
    }
}

/// Ante for `level`, before capping by stacks.
pub fn ante_for_level(level: u32) -> u32 {
    ANTE_PER_LEVEL * level.max(1)
}

/// Validates a player action against the chips on hand.
///
/// A call with nothing to call is a check. Bets and raises both pay
/// `to_call + amount`, so a bet made while facing a bet is read as a raise.
///
/// # Errors
///
/// - [`GameError::CheckFacingBet`] - check while `to_call > 0`
/// - [`GameError::InvalidBetAmount`] - bet or raise of zero
/// - [`GameError::InsufficientChips`] - the action costs more than `chips`
///
/// # Examples
///
/// ```
/// use roguepoker_engine::rules::{validate_action, ValidatedAction};
/// use roguepoker_engine::player::PlayerAction;
/// use roguepoker_engine::errors::GameError;
///
/// assert_eq!(validate_action(100, 0, PlayerAction::Call), Ok(ValidatedAction::Check));
/// assert_eq!(validate_action(100, 20, PlayerAction::Raise(30)), Ok(ValidatedAction::Raise(30)));
/// assert!(matches!(
///     validate_action(40, 20, PlayerAction::Raise(30)),
///     Err(GameError::InsufficientChips { needed: 50, available: 40 })
/// ));
/// ```
pub fn validate_action(chips: u32, to_call: u32, action: A) -> Result<ValidatedAction, GameError> {
    let afford = |needed: u32| {
        if needed > chips {
            Err(GameError::InsufficientChips {
                needed,
                available: chips,
            })
        } else {
            Ok(())
        }
    };
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CheckFacingBet { to_call })
            }
        }
        A::Call => {
            if to_call == 0 {
                return Ok(ValidatedAction::Check);
            }
            afford(to_call)?;
            Ok(ValidatedAction::Call(to_call))
        }
        A::Bet(amount) | A::Raise(amount) => {
            if amount == 0 {
                return Err(GameError::InvalidBetAmount { amount, minimum: 1 });
            }
            afford(to_call.saturating_add(amount))?;
            if to_call == 0 && matches!(action, A::Bet(_)) {
                Ok(ValidatedAction::Bet(amount))
            } else {
                Ok(ValidatedAction::Raise(amount))
            }
        }
        A::UseItem(index) => Ok(ValidatedAction::UseItem(index)),
    }
}
