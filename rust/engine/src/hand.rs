use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Hand categories, lowest first. The discriminant is the 1-based ordinal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

/// Best five-card hand found by [`evaluate_best`].
///
/// Equality and ordering look only at `category` and `tie_break`; two hands
/// made of different cards with the same values are a split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatedHand {
    pub category: Category,
    // values ordered by (count desc, value desc); wheel ace is 0
    pub tie_break: [u8; 5],
    pub cards: [Card; 5],
}

impl PartialEq for EvaluatedHand {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.tie_break == other.tie_break
    }
}

impl Eq for EvaluatedHand {}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

pub fn compare_hands(a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tie_break.cmp(&b.tie_break),
        ord => ord,
    }
}

/// Best hand obtainable from 5, 6 or 7 cards, by brute force over every
/// five-card subset (at most 21).
///
/// # Errors
///
/// [`GameError::InvalidHandSize`] for any other card count.
///
/// # Examples
///
/// ```
/// use roguepoker_engine::cards::{Card, Rank, Suit};
/// use roguepoker_engine::hand::{evaluate_best, Category};
///
/// let cards = [
///     Card::new(Rank::Ace, Suit::Hearts),
///     Card::new(Rank::Two, Suit::Clubs),
///     Card::new(Rank::Three, Suit::Spades),
///     Card::new(Rank::Four, Suit::Hearts),
///     Card::new(Rank::Five, Suit::Diamonds),
///     Card::new(Rank::King, Suit::Diamonds),
/// ];
/// let best = evaluate_best(&cards).unwrap();
/// assert_eq!(best.category, Category::Straight);
/// assert_eq!(best.tie_break, [5, 4, 3, 2, 0]);
/// ```
pub fn evaluate_best(cards: &[Card]) -> Result<EvaluatedHand, GameError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(GameError::InvalidHandSize { count: n });
    }
    let mut best: Option<EvaluatedHand> = None;
    for idx in five_card_subsets(n) {
        let hand = evaluate_five(&idx.map(|i| cards[i]));
        match &best {
            Some(b) if compare_hands(&hand, b).is_le() => {}
            _ => best = Some(hand),
        }
    }
    best.ok_or(GameError::InvalidHandSize { count: n })
}

pub fn evaluate_five(cards: &[Card; 5]) -> EvaluatedHand {
    let mut values = cards.map(|c| c.rank.high_value());
    values.sort_unstable_by(|a, b| b.cmp(a));

    let mut counts = [0u8; 15];
    for &v in &values {
        counts[v as usize] += 1;
    }

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_values(&values);

    let mut pattern: Vec<u8> = counts.iter().copied().filter(|&c| c > 0).collect();
    pattern.sort_unstable_by(|a, b| b.cmp(a));

    let mut tie_break = values;
    tie_break.sort_unstable_by(|a, b| {
        counts[*b as usize]
            .cmp(&counts[*a as usize])
            .then_with(|| b.cmp(a))
    });

    let category = match (straight, is_flush) {
        (Some(s), true) if s[0] == 14 => Category::RoyalFlush,
        (Some(_), true) => Category::StraightFlush,
        _ => match pattern.as_slice() {
            [4, 1] => Category::FourOfAKind,
            [3, 2] => Category::FullHouse,
            _ if is_flush => Category::Flush,
            _ if straight.is_some() => Category::Straight,
            [3, 1, 1] => Category::ThreeOfAKind,
            [2, 2, 1] => Category::TwoPair,
            [2, 1, 1, 1] => Category::Pair,
            _ => Category::HighCard,
        },
    };

    if let (Some(s), Category::Straight | Category::StraightFlush | Category::RoyalFlush) =
        (straight, category)
    {
        tie_break = s;
    }

    EvaluatedHand {
        category,
        tie_break,
        cards: *cards,
    }
}

// Descending values of a straight; the wheel comes back as [5, 4, 3, 2, 0].
fn straight_values(desc: &[u8; 5]) -> Option<[u8; 5]> {
    let distinct = desc.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }
    if desc[0] - desc[4] == 4 {
        return Some(*desc);
    }
    if *desc == [14, 5, 4, 3, 2] {
        return Some([5, 4, 3, 2, 0]);
    }
    None
}

fn five_card_subsets(n: usize) -> Vec<[usize; 5]> {
    let mut out = Vec::with_capacity(21);
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        out.push([a, b, c, d, e]);
                    }
                }
            }
        }
    }
    out
}
