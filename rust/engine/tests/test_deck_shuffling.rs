use std::collections::HashSet;

use roguepoker_engine::cards::{full_deck, Card};
use roguepoker_engine::deck::Deck;

#[test]
fn fresh_deck_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.reset();
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.deal_card().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(deck.deal_card().is_none());
    assert!(deck.burn_card().is_none());
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    assert_eq!(d1.draw(10), d2.draw(10), "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    assert_ne!(d1.draw(10), d2.draw(10));
}

#[test]
fn every_card_reaches_the_top() {
    let mut seen = HashSet::new();
    let mut deck = Deck::new_with_seed(9);
    for _ in 0..2000 {
        deck.reset();
        seen.insert(deck.deal_card().expect("full deck"));
    }
    assert_eq!(seen.len(), 52);
}

#[test]
fn draw_returns_what_is_left_when_short() {
    let mut deck = Deck::new_with_seed(3);
    deck.shuffle();
    assert_eq!(deck.draw(50).len(), 50);
    assert_eq!(deck.draw(5).len(), 2);
    assert!(deck.draw(1).is_empty());
    assert_eq!(deck.remaining(), 0);
}

#[test]
fn holdem_deal_plus_remaining_reconstitutes_deck() {
    let mut deck = Deck::new_with_seed(77);
    deck.reset();
    let mut dealt: Vec<Card> = deck.draw(4);
    for n in [3, 1, 1] {
        dealt.push(deck.burn_card().expect("burn"));
        dealt.extend(deck.draw(n));
    }
    assert_eq!(dealt.len(), 12);
    assert_eq!(deck.remaining(), 40);

    let mut all: Vec<Card> = dealt;
    all.extend_from_slice(deck.cards());
    all.sort();
    let mut expected = full_deck();
    expected.sort();
    assert_eq!(all, expected);
}
