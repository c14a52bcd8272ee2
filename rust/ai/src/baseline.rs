//! Baseline policy for reproducible play.
//!
//! Uses the same strength bands as the adaptive policy but never rolls dice:
//! no bluffs, no slow-plays. Useful as a benchmark opponent and as the
//! autopilot that drives the player's seat in simulations.

use roguepoker_engine::policy::{Decision, DecisionContext, OpponentPolicy};

use crate::Band;

/// Aggression needed before a good hand raises instead of calling.
pub const GOOD_RAISE_AGGRESSION: f32 = 0.5;

/// Deterministic rule-based policy.
///
/// # Strategy
///
/// - Strong hands (above 0.8): always raise
/// - Good hands (above 0.6): call when cheap or priced in, raise when the
///   personality is aggressive enough, otherwise call
/// - Marginal hands (above 0.3): check when free, call only small bets with
///   favourable pot odds, otherwise fold
/// - Weak hands: check when free, otherwise fold
///
/// # Example
///
/// ```rust
/// use roguepoker_ai::baseline::BaselinePolicy;
/// use roguepoker_engine::policy::{Decision, DecisionContext, OpponentPolicy};
///
/// let mut policy = BaselinePolicy::new();
/// let facing_bet = DecisionContext {
///     hand_strength: 0.2,
///     pot: 30,
///     to_call: 20,
///     chips: 100,
///     level: 1,
///     aggression: 0.9,
///     bluff_rate: 0.9,
/// };
/// assert_eq!(policy.decide(&facing_bet), Decision::Fold);
/// assert_eq!(policy.name(), "baseline");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselinePolicy;

impl BaselinePolicy {
    pub fn new() -> Self {
        Self
    }

    fn call_or_check(ctx: &DecisionContext) -> Decision {
        if ctx.to_call > 0 {
            Decision::Call
        } else {
            Decision::Check
        }
    }

    fn good(ctx: &DecisionContext) -> Decision {
        if ctx.call_ratio() < 0.2 || ctx.pot_odds() > ctx.hand_strength {
            Self::call_or_check(ctx)
        } else if ctx.aggression_modifier() >= GOOD_RAISE_AGGRESSION {
            Decision::Raise
        } else {
            Self::call_or_check(ctx)
        }
    }

    fn marginal(ctx: &DecisionContext) -> Decision {
        if ctx.to_call == 0 {
            Decision::Check
        } else if ctx.pot_odds() > ctx.hand_strength && ctx.call_ratio() < 0.1 {
            Decision::Call
        } else {
            Decision::Fold
        }
    }
}

impl OpponentPolicy for BaselinePolicy {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision {
        match Band::of(ctx.hand_strength) {
            Band::Strong => Decision::Raise,
            Band::Good => Self::good(ctx),
            Band::Marginal => Self::marginal(ctx),
            Band::Weak => {
                if ctx.to_call == 0 {
                    Decision::Check
                } else {
                    Decision::Fold
                }
            }
        }
    }

    fn name(&self) -> &str {
        "baseline"
    }
}
