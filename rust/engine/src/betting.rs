//! One street of betting between the player and the opponent.
//!
//! The player always acts first. The opponent only answers bets and raises;
//! a player check or call closes the street. An opponent re-raise hands
//! control back to the player, so the caller loops until the round completes.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::MatchState;
use crate::player::{PlayerAction, Seat};
use crate::policy::Decision;
use crate::rules::{validate_action, ValidatedAction};

/// How a completed round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundEnd {
    /// Contributions matched; the hand goes on
    Settled,
    PlayerFolded,
    OpponentFolded,
    /// Contributions matched with a stack at zero; the board runs out
    AllIn,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    AwaitingPlayerAction,
    AwaitingOpponentResponse,
    Complete(RoundEnd),
}

/// Mutable borrows of both chip stacks for the duration of one action.
#[derive(Debug)]
pub struct Stacks<'a> {
    pub player: &'a mut u32,
    pub opponent: &'a mut u32,
}

impl Stacks<'_> {
    fn pay(&mut self, seat: Seat, amount: u32, state: &mut MatchState) {
        let stack = match seat {
            Seat::Player => &mut *self.player,
            Seat::Opponent => &mut *self.opponent,
        };
        debug_assert!(*stack >= amount);
        *stack -= amount;
        state.commit(seat, amount);
    }

    fn settled(&self) -> RoundEnd {
        if *self.player == 0 || *self.opponent == 0 {
            RoundEnd::AllIn
        } else {
            RoundEnd::Settled
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingRound {
    phase: RoundPhase,
    /// Size of the most recent bet or raise, which a re-raise matches
    last_raise: u32,
}

impl Default for BettingRound {
    fn default() -> Self {
        Self::new()
    }
}

impl BettingRound {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::AwaitingPlayerAction,
            last_raise: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<RoundEnd> {
        match self.phase {
            RoundPhase::Complete(end) => Some(end),
            _ => None,
        }
    }

    /// Applies the player's action. A rejected action leaves the round,
    /// the stacks and the match state untouched.
    ///
    /// `UseItem` is validated and returned but does not move the round; the
    /// caller applies the item and asks for another action.
    pub fn player_action(
        &mut self,
        state: &mut MatchState,
        mut stacks: Stacks<'_>,
        action: PlayerAction,
    ) -> Result<ValidatedAction, GameError> {
        match self.phase {
            RoundPhase::AwaitingPlayerAction => {}
            RoundPhase::AwaitingOpponentResponse => return Err(GameError::AwaitingOpponent),
            RoundPhase::Complete(_) => return Err(GameError::NoHandInProgress),
        }
        let to_call = state.to_call(Seat::Player);
        let validated = validate_action(*stacks.player, to_call, action)?;
        match &validated {
            ValidatedAction::Fold => {
                self.phase = RoundPhase::Complete(RoundEnd::PlayerFolded);
            }
            ValidatedAction::Check => {
                self.phase = RoundPhase::Complete(RoundEnd::Settled);
            }
            ValidatedAction::Call(paid) => {
                stacks.pay(Seat::Player, *paid, state);
                self.phase = RoundPhase::Complete(stacks.settled());
            }
            ValidatedAction::Bet(n) | ValidatedAction::Raise(n) => {
                stacks.pay(Seat::Player, to_call + n, state);
                self.last_raise = *n;
                self.phase = RoundPhase::AwaitingOpponentResponse;
            }
            ValidatedAction::UseItem(_) => {}
        }
        Ok(validated)
    }

    /// Applies the opponent's decision to the player's outstanding bet and
    /// returns the action actually taken.
    ///
    /// An opponent that cannot cover the call folds whatever it decided.
    pub fn opponent_response(
        &mut self,
        state: &mut MatchState,
        stacks: Stacks<'_>,
        decision: Decision,
    ) -> Result<PlayerAction, GameError> {
        let size = self.last_raise;
        self.respond(state, stacks, decision, size)
    }

    /// Calls and re-raises everything the player can still match.
    pub fn opponent_shove(
        &mut self,
        state: &mut MatchState,
        stacks: Stacks<'_>,
    ) -> Result<PlayerAction, GameError> {
        self.respond(state, stacks, Decision::Raise, u32::MAX)
    }

    fn respond(
        &mut self,
        state: &mut MatchState,
        mut stacks: Stacks<'_>,
        decision: Decision,
        raise_size: u32,
    ) -> Result<PlayerAction, GameError> {
        if self.phase != RoundPhase::AwaitingOpponentResponse {
            return Err(GameError::NothingToRespondTo);
        }
        let to_call = state.to_call(Seat::Opponent);
        if *stacks.opponent < to_call || decision == Decision::Fold {
            self.phase = RoundPhase::Complete(RoundEnd::OpponentFolded);
            return Ok(PlayerAction::Fold);
        }
        stacks.pay(Seat::Opponent, to_call, state);
        let reraise = if decision == Decision::Raise {
            raise_size.min(*stacks.opponent).min(*stacks.player)
        } else {
            0
        };
        if reraise == 0 {
            self.phase = RoundPhase::Complete(stacks.settled());
            return Ok(PlayerAction::Call);
        }
        stacks.pay(Seat::Opponent, reraise, state);
        self.last_raise = reraise;
        self.phase = RoundPhase::AwaitingPlayerAction;
        Ok(PlayerAction::Raise(reraise))
    }
}
