//! Deal command handler for single hand dealing and display.
//!
//! Deals both hole hands and a full board from a seeded deck, burning before
//! each street the way a live hand does, and names the winner.

use crate::error::CliError;
use crate::formatters::{format_board, format_category};
use roguepoker_engine::cards::Card;
use roguepoker_engine::deck::Deck;
use roguepoker_engine::errors::GameError;
use roguepoker_engine::hand::{compare_hands, evaluate_best};
use std::cmp::Ordering;
use std::io::Write;

pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();

    let player = take(&mut deck, 2)?;
    let opponent = take(&mut deck, 2)?;
    let mut board = Vec::with_capacity(5);
    for street in [3, 1, 1] {
        take(&mut deck, 1)?;
        board.extend(take(&mut deck, street)?);
    }

    let best = |hole: &[Card]| {
        let mut all = hole.to_vec();
        all.extend_from_slice(&board);
        evaluate_best(&all)
    };
    let player_best = best(&player)?;
    let opponent_best = best(&opponent)?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Your hand:  {}", format_board(&player))?;
    writeln!(out, "Enemy hand: {}", format_board(&opponent))?;
    writeln!(out, "Board:      {}", format_board(&board))?;
    writeln!(
        out,
        "You: {} {}",
        format_category(player_best.category),
        format_board(&player_best.cards)
    )?;
    writeln!(
        out,
        "Enemy: {} {}",
        format_category(opponent_best.category),
        format_board(&opponent_best.cards)
    )?;
    let verdict = match compare_hands(&player_best, &opponent_best) {
        Ordering::Greater => "You win",
        Ordering::Less => "Enemy wins",
        Ordering::Equal => "Split pot",
    };
    writeln!(out, "{}", verdict)?;
    Ok(())
}

fn take(deck: &mut Deck, n: usize) -> Result<Vec<Card>, GameError> {
    let cards = deck.draw(n);
    if cards.len() < n {
        return Err(GameError::DeckExhausted {
            needed: n,
            remaining: cards.len(),
        });
    }
    Ok(cards)
}
