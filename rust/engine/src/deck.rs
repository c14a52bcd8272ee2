use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// The single active draw source for a hand.
///
/// The top of the deck is the end of `cards`; drawn cards are removed, so the
/// remaining cards plus everything dealt always reconstitute the full 52.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes up to `n` cards from the top. Returns fewer when the deck runs short.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        let take = n.min(self.cards.len());
        let split = self.cards.len() - take;
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        drawn
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn burn_card(&mut self) -> Option<Card> {
        self.deal_card()
    }

    /// Rebuilds the full 52 and shuffles them.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.shuffle();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_returns_what_is_left_when_short() {
        let mut deck = Deck::new_with_seed(3);
        let first = deck.draw(50);
        assert_eq!(first.len(), 50);
        let rest = deck.draw(5);
        assert_eq!(rest.len(), 2);
        assert!(deck.draw(1).is_empty());
        assert_eq!(deck.deal_card(), None);
    }

    #[test]
    fn draw_takes_from_the_top_in_order() {
        let mut a = Deck::new_with_seed(9);
        let mut b = Deck::new_with_seed(9);
        a.shuffle();
        b.shuffle();
        let drawn = a.draw(3);
        let dealt: Vec<Card> = (0..3).filter_map(|_| b.deal_card()).collect();
        assert_eq!(drawn, dealt);
    }

    #[test]
    fn reset_restores_full_deck() {
        let mut deck = Deck::new_with_seed(1);
        deck.draw(20);
        deck.reset();
        assert_eq!(deck.remaining(), 52);
    }
}
