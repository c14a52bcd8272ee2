//! The seam between the engine and opponent decision making.
//!
//! The engine builds a [`DecisionContext`] whenever the opponent must answer a
//! player bet and hands it to an [`OpponentPolicy`]. Implementations live in
//! the `roguepoker-ai` crate.

use serde::{Deserialize, Serialize};

/// What the opponent knows when it has to act.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    /// Estimated strength of the opponent's hand in `[0, 1]`
    pub hand_strength: f32,
    /// Chips in the pot, including the player's bet being answered
    pub pot: u32,
    /// Chips the opponent must add to continue
    pub to_call: u32,
    /// Opponent's remaining stack
    pub chips: u32,
    pub level: u32,
    pub aggression: f32,
    pub bluff_rate: f32,
}

impl DecisionContext {
    /// Fraction of the opponent's stack a call would cost. 1.0 when broke.
    pub fn call_ratio(&self) -> f32 {
        if self.chips == 0 {
            1.0
        } else {
            self.to_call as f32 / self.chips as f32
        }
    }

    /// Share of the final pot the opponent would be paying for a call.
    pub fn pot_odds(&self) -> f32 {
        let total = self.pot + self.to_call;
        if total == 0 {
            0.0
        } else {
            self.to_call as f32 / total as f32
        }
    }

    /// Aggression scaled up with the level, used for bluff frequency.
    pub fn aggression_modifier(&self) -> f32 {
        self.aggression * (1.0 + 0.05 * self.level as f32)
    }
}

/// The opponent's answer. Raise sizing is decided by the betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Fold,
    Check,
    Call,
    Raise,
}

/// A source of opponent decisions.
///
/// # Example
///
/// ```rust
/// use roguepoker_engine::policy::{Decision, DecisionContext, OpponentPolicy};
///
/// struct AlwaysCall;
///
/// impl OpponentPolicy for AlwaysCall {
///     fn decide(&mut self, _ctx: &DecisionContext) -> Decision {
///         Decision::Call
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysCall"
///     }
/// }
/// ```
pub trait OpponentPolicy: Send {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pot: u32, to_call: u32, chips: u32) -> DecisionContext {
        DecisionContext {
            hand_strength: 0.5,
            pot,
            to_call,
            chips,
            level: 2,
            aggression: 0.5,
            bluff_rate: 0.2,
        }
    }

    #[test]
    fn ratios() {
        let c = ctx(30, 10, 100);
        assert!((c.call_ratio() - 0.1).abs() < 1e-6);
        assert!((c.pot_odds() - 0.25).abs() < 1e-6);
        assert!((c.aggression_modifier() - 0.55).abs() < 1e-6);
        assert_eq!(ctx(0, 0, 0).call_ratio(), 1.0);
        assert_eq!(ctx(0, 0, 10).pot_odds(), 0.0);
    }
}
