//! Evaluate command: the best five-card hand among 5 to 7 given cards.

use crate::error::CliError;
use crate::formatters::{format_board, format_category};
use crate::validation::parse_cards;
use roguepoker_engine::hand::evaluate_best;
use std::io::Write;

/// Parses `cards` and prints the category and the five cards that make it.
pub fn handle_eval_command(cards: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(cards).map_err(CliError::InvalidInput)?;
    let best = evaluate_best(&cards)?;
    writeln!(out, "Cards: {}", format_board(&cards))?;
    writeln!(out, "Hand: {}", format_category(best.category))?;
    writeln!(out, "Best five: {}", format_board(&best.cards))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(cards: &str) -> Result<String, CliError> {
        let mut out = Vec::new();
        handle_eval_command(cards, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_eval_royal_flush() {
        let text = eval("As Ks Qs Js Ts").unwrap();
        assert!(text.contains("Hand: Royal Flush"), "{}", text);
    }

    #[test]
    fn test_eval_best_of_seven() {
        let text = eval("Kh 9s 9c 2s 3d Ks Kd").unwrap();
        assert!(text.contains("Hand: Full House"), "{}", text);
    }

    #[test]
    fn test_eval_rejects_bad_input() {
        assert!(matches!(eval("As Ks"), Err(CliError::InvalidInput(_))));
        assert!(matches!(eval("As Ks Qs Js Zz"), Err(CliError::InvalidInput(_))));
    }
}
