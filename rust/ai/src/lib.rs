//! # roguepoker-ai: Opponent Decision Policies
//!
//! Implementations of the engine's [`OpponentPolicy`] seam. Every policy sees
//! only a [`DecisionContext`](roguepoker_engine::policy::DecisionContext):
//! its own hand-strength estimate, the pot, the price of a call and its
//! personality (aggression, bluff rate, level).
//!
//! ## Core Components
//!
//! - [`adaptive`] - Stochastic policy with bluffs and disguised strength (default)
//! - [`baseline`] - Deterministic policy for reproducible simulations
//! - [`create_policy`] - Factory by name
//!
//! ## Quick Start
//!
//! ```rust
//! use roguepoker_ai::create_policy;
//! use roguepoker_engine::policy::{Decision, DecisionContext};
//!
//! let mut policy = create_policy("baseline", 42).expect("known policy");
//! let ctx = DecisionContext {
//!     hand_strength: 0.9,
//!     pot: 40,
//!     to_call: 10,
//!     chips: 100,
//!     level: 1,
//!     aggression: 0.4,
//!     bluff_rate: 0.15,
//! };
//! assert_eq!(policy.decide(&ctx), Decision::Raise);
//! ```

use roguepoker_engine::policy::OpponentPolicy;

pub mod adaptive;
pub mod baseline;

/// Names accepted by [`create_policy`].
pub const POLICY_KINDS: [&str; 2] = ["adaptive", "baseline"];

/// Hand-strength bands shared by the policies.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Band {
    Strong,
    Good,
    Marginal,
    Weak,
}

impl Band {
    pub(crate) fn of(hand_strength: f32) -> Band {
        if hand_strength > 0.8 {
            Band::Strong
        } else if hand_strength > 0.6 {
            Band::Good
        } else if hand_strength > 0.3 {
            Band::Marginal
        } else {
            Band::Weak
        }
    }
}

/// Builds a policy by name. `seed` drives the stochastic policies.
///
/// Returns `None` for unknown names.
///
/// ```rust
/// use roguepoker_ai::create_policy;
///
/// assert_eq!(create_policy("adaptive", 1).unwrap().name(), "adaptive");
/// assert!(create_policy("oracle", 1).is_none());
/// ```
pub fn create_policy(kind: &str, seed: u64) -> Option<Box<dyn OpponentPolicy>> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "adaptive" => Some(Box::new(adaptive::AdaptivePolicy::new(seed))),
        "baseline" => Some(Box::new(baseline::BaselinePolicy::new())),
        _ => None,
    }
}
