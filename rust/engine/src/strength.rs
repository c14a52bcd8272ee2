//! Hand-strength estimates on a 0.0..=1.0 scale.
//!
//! Before the flop there is no five-card hand to evaluate, so pre-flop
//! strength comes from a hole-card heuristic. Once the board has cards the
//! estimate is derived from the evaluator's category and top tie-break values.

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{evaluate_best, Category};

/// Ceiling for estimates before any luck bonus.
pub const STRENGTH_CAP: f32 = 0.95;
/// Added by an active luck boost.
pub const LUCK_BONUS: f32 = 0.15;
/// Ceiling with a luck boost applied.
pub const LUCKY_CAP: f32 = 0.98;

/// Hole-card heuristic: pairs by height, then two high or two middling cards,
/// then everything else.
pub fn preflop_strength(hole: [Card; 2]) -> f32 {
    let a = hole[0].rank.high_value() as f32;
    let b = hole[1].rank.high_value() as f32;
    let (high, low) = if a >= b { (a, b) } else { (b, a) };

    if high == low {
        (0.5 + high / 28.0).min(STRENGTH_CAP)
    } else if high >= 10.0 || low >= 7.0 {
        0.4 + (high + low) / 56.0
    } else {
        0.1 + (high + low) / 84.0
    }
}

/// Strength from the best hand among hole cards and 3..=5 board cards.
pub fn postflop_strength(hole: [Card; 2], board: &[Card]) -> Result<f32, GameError> {
    let mut cards = Vec::with_capacity(7);
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(board);
    let best = evaluate_best(&cards)?;

    let base = best.category.ordinal() as f32 / 10.0;
    let strength = match best.category {
        Category::HighCard | Category::Pair => {
            let kicker = (best.tie_break[0] as f32 + best.tie_break[1] as f32) / 56.0;
            base + kicker
        }
        _ => base,
    };
    Ok(strength.min(STRENGTH_CAP))
}

/// Picks the heuristic for the current board size.
pub fn hand_strength(hole: [Card; 2], board: &[Card], luck_boost: bool) -> Result<f32, GameError> {
    let raw = if board.is_empty() {
        preflop_strength(hole)
    } else {
        postflop_strength(hole, board)?
    };
    Ok(if luck_boost {
        (raw + LUCK_BONUS).min(LUCKY_CAP)
    } else {
        raw
    })
}
