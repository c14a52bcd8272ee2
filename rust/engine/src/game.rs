use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::logger::Street;
use crate::player::Seat;

pub const MAX_COMMUNITY: usize = 5;

/// State of the hand in progress. Owned by the engine for one hand and
/// reset at the start of the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Chips committed to the hand so far
    pub pot: u32,
    /// Player's contribution on the current street
    pub player_bet: u32,
    /// Opponent's contribution on the current street
    pub opponent_bet: u32,
    /// Everything the player has put into this hand, antes included
    #[serde(default)]
    pub player_committed: u32,
    pub player_hole: Option<[Card; 2]>,
    pub opponent_hole: Option<[Card; 2]>,
    /// Board cards, at most five
    pub community: Vec<Card>,
    /// Cards burned before the flop, turn and river
    pub burned: Vec<Card>,
    pub phase: Street,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            pot: 0,
            player_bet: 0,
            opponent_bet: 0,
            player_committed: 0,
            player_hole: None,
            opponent_hole: None,
            community: Vec::with_capacity(MAX_COMMUNITY),
            burned: Vec::with_capacity(3),
            phase: Street::Preflop,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn hole(&self, seat: Seat) -> Option<[Card; 2]> {
        match seat {
            Seat::Player => self.player_hole,
            Seat::Opponent => self.opponent_hole,
        }
    }

    pub fn bet(&self, seat: Seat) -> u32 {
        match seat {
            Seat::Player => self.player_bet,
            Seat::Opponent => self.opponent_bet,
        }
    }

    /// Amount `seat` must add to match the other side on this street.
    pub fn to_call(&self, seat: Seat) -> u32 {
        match seat {
            Seat::Player => self.opponent_bet.saturating_sub(self.player_bet),
            Seat::Opponent => self.player_bet.saturating_sub(self.opponent_bet),
        }
    }

    /// Records `amount` from `seat` into the pot and the street contribution.
    /// The caller has already taken the chips from the seat's stack.
    pub(crate) fn commit(&mut self, seat: Seat, amount: u32) {
        self.pot += amount;
        match seat {
            Seat::Player => {
                self.player_bet += amount;
                self.player_committed += amount;
            }
            Seat::Opponent => self.opponent_bet += amount,
        }
    }

    /// Dead money posted before the deal by each side; not part of any
    /// street bet.
    pub(crate) fn post_ante(&mut self, ante: u32) {
        self.pot += 2 * ante;
        self.player_committed += ante;
    }

    /// Moves to the next street and clears street contributions.
    pub fn begin_street(&mut self, street: Street) {
        self.phase = street;
        self.player_bet = 0;
        self.opponent_bet = 0;
    }

    pub fn add_community(&mut self, cards: &[Card]) -> Result<(), GameError> {
        if self.community.len() + cards.len() > MAX_COMMUNITY {
            return Err(GameError::DeckExhausted {
                needed: cards.len(),
                remaining: MAX_COMMUNITY - self.community.len(),
            });
        }
        self.community.extend_from_slice(cards);
        Ok(())
    }

    /// Hole plus board for `seat`, the input to showdown evaluation.
    pub fn cards_for(&self, seat: Seat) -> Vec<Card> {
        let mut cards = Vec::with_capacity(7);
        if let Some(hole) = self.hole(seat) {
            cards.extend_from_slice(&hole);
        }
        cards.extend_from_slice(&self.community);
        cards
    }

    /// Every card taken from the deck this hand.
    pub fn dealt_cards(&self) -> Vec<Card> {
        let mut cards = self.cards_for(Seat::Player);
        if let Some(hole) = self.opponent_hole {
            cards.extend_from_slice(&hole);
        }
        cards.extend_from_slice(&self.burned);
        cards
    }
}
