//! Stochastic opponent policy.
//!
//! Four bands on hand strength, each with a rational default and a random
//! element: strong hands sometimes just call to disguise themselves, weak
//! hands sometimes bluff. Raise frequency never drops as strength rises.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use roguepoker_engine::policy::{Decision, DecisionContext, OpponentPolicy};

use crate::Band;

/// Minimum chance a strong hand raises.
pub const STRONG_RAISE: f32 = 0.7;
/// Share of marginal bluffs that raise rather than call.
pub const MARGINAL_BLUFF_RAISE: f32 = 0.4;
/// Share of weak bluffs that raise rather than call.
pub const WEAK_BLUFF_RAISE: f32 = 0.3;

/// Seeded, so a run replays the same decisions.
///
/// # Example
///
/// ```rust
/// use roguepoker_ai::adaptive::AdaptivePolicy;
/// use roguepoker_engine::policy::{Decision, DecisionContext, OpponentPolicy};
///
/// let mut policy = AdaptivePolicy::new(3);
/// let free = DecisionContext {
///     hand_strength: 0.5,
///     pot: 20,
///     to_call: 0,
///     chips: 100,
///     level: 1,
///     aggression: 0.4,
///     bluff_rate: 0.15,
/// };
/// assert_eq!(policy.decide(&free), Decision::Check);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptivePolicy {
    rng: ChaCha20Rng,
}

impl AdaptivePolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    fn chance(&mut self, p: f32) -> bool {
        self.rng.random::<f32>() < p
    }

    fn call_or_check(ctx: &DecisionContext) -> Decision {
        if ctx.to_call > 0 {
            Decision::Call
        } else {
            Decision::Check
        }
    }
}

impl OpponentPolicy for AdaptivePolicy {
    fn decide(&mut self, ctx: &DecisionContext) -> Decision {
        let chip_ratio = ctx.call_ratio();
        let pot_odds = ctx.pot_odds();
        let aggression = ctx.aggression_modifier();

        match Band::of(ctx.hand_strength) {
            Band::Strong => {
                // never raise less often than a good hand would
                if self.chance(STRONG_RAISE.max(aggression)) {
                    Decision::Raise
                } else {
                    Self::call_or_check(ctx)
                }
            }
            Band::Good => {
                if chip_ratio < 0.2 || pot_odds > ctx.hand_strength {
                    Self::call_or_check(ctx)
                } else if self.chance(aggression) {
                    Decision::Raise
                } else {
                    Self::call_or_check(ctx)
                }
            }
            Band::Marginal => {
                if ctx.to_call == 0 {
                    Decision::Check
                } else if pot_odds > ctx.hand_strength && chip_ratio < 0.1 {
                    Decision::Call
                } else if self.chance(ctx.bluff_rate) {
                    if self.chance(MARGINAL_BLUFF_RAISE) {
                        Decision::Raise
                    } else {
                        Decision::Call
                    }
                } else {
                    Decision::Fold
                }
            }
            Band::Weak => {
                if self.chance(ctx.bluff_rate * aggression) {
                    if self.chance(WEAK_BLUFF_RAISE) {
                        Decision::Raise
                    } else {
                        Decision::Call
                    }
                } else if ctx.to_call == 0 {
                    Decision::Check
                } else {
                    Decision::Fold
                }
            }
        }
    }

    fn name(&self) -> &str {
        "adaptive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(hand_strength: f32) -> DecisionContext {
        DecisionContext {
            hand_strength,
            pot: 60,
            to_call: 30,
            chips: 100,
            level: 3,
            aggression: 0.6,
            bluff_rate: 0.25,
        }
    }

    fn raise_rate(policy: &mut AdaptivePolicy, strength: f32, trials: u32) -> f32 {
        let c = ctx(strength);
        let raises = (0..trials)
            .filter(|_| policy.decide(&c) == Decision::Raise)
            .count();
        raises as f32 / trials as f32
    }

    #[test]
    fn raise_frequency_does_not_drop_with_strength() {
        let mut policy = AdaptivePolicy::new(2024);
        let strengths = [0.1, 0.25, 0.45, 0.55, 0.7, 0.75, 0.85, 0.95];
        let rates: Vec<f32> = strengths
            .iter()
            .map(|&s| raise_rate(&mut policy, s, 4000))
            .collect();
        for w in rates.windows(2) {
            // allow sampling noise
            assert!(w[1] + 0.05 >= w[0], "rates {:?}", rates);
        }
        assert!(rates[rates.len() - 1] >= 0.65);
        assert!(rates[0] < 0.1);
    }

    #[test]
    fn strong_hands_sometimes_just_call() {
        let mut policy = AdaptivePolicy::new(5);
        let c = DecisionContext {
            aggression: 0.3,
            level: 1,
            ..ctx(0.9)
        };
        let decisions: Vec<Decision> = (0..500).map(|_| policy.decide(&c)).collect();
        assert!(decisions.contains(&Decision::Raise));
        assert!(decisions.contains(&Decision::Call));
        assert!(!decisions.contains(&Decision::Fold));
    }

    #[test]
    fn good_hand_calls_when_cheap() {
        let mut policy = AdaptivePolicy::new(1);
        let cheap = DecisionContext {
            to_call: 10,
            ..ctx(0.7)
        };
        for _ in 0..100 {
            assert_eq!(policy.decide(&cheap), Decision::Call);
        }
    }

    #[test]
    fn weak_hand_without_bluffing_folds_or_checks() {
        let mut policy = AdaptivePolicy::new(9);
        let honest = DecisionContext {
            bluff_rate: 0.0,
            ..ctx(0.2)
        };
        for _ in 0..100 {
            assert_eq!(policy.decide(&honest), Decision::Fold);
        }
        let free = DecisionContext {
            to_call: 0,
            ..honest
        };
        assert_eq!(policy.decide(&free), Decision::Check);
    }

    #[test]
    fn same_seed_same_decisions() {
        let mut a = AdaptivePolicy::new(77);
        let mut b = AdaptivePolicy::new(77);
        for s in [0.1, 0.4, 0.7, 0.9, 0.5] {
            assert_eq!(a.decide(&ctx(s)), b.decide(&ctx(s)));
        }
    }
}
