use serde::{Deserialize, Serialize};

use crate::hand::Category;
use crate::items::{Item, ItemEffect};

/// Which side of the table an action or outcome belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Opponent,
}

/// An action taken during a betting round.
/// The opponent's responses are recorded with the same variants.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid with nothing to call)
    Check,
    /// Call the current bet
    Call,
    /// Bet the given amount with nothing to call
    Bet(u32),
    /// Call and raise by the given amount
    Raise(u32),
    /// Use the inventory item at this (0-based) index
    UseItem(usize),
}

/// Per-session counters shown on the stats screens and saved with the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub hands_played: u32,
    pub hands_won: u32,
    pub enemies_defeated: u32,
    pub highest_level: u32,
    pub total_chips_won: u64,
    pub best_hand: Option<Category>,
    pub lucky_escapes: u32,
    pub perfect_games: u32,
}

impl GameStats {
    /// Percentage of hands won, 0 when nothing has been played.
    pub fn win_rate(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            self.hands_won as f64 / self.hands_played as f64 * 100.0
        }
    }

    pub fn record_best_hand(&mut self, category: Category) {
        if self.best_hand.is_none_or(|best| category > best) {
            self.best_hand = Some(category);
        }
    }
}

/// The player's persistent state across hands and encounters of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub chips: u32,
    pub level: u32,
    pub victories: u32,
    pub inventory: Vec<Item>,
    pub stats: GameStats,
    /// Set by a luck item, cleared when the hand ends.
    #[serde(default)]
    pub luck_boost: bool,
}

impl PlayerProgress {
    pub fn new(chips: u32) -> Self {
        Self {
            chips,
            level: 1,
            victories: 0,
            inventory: Vec::new(),
            stats: GameStats {
                highest_level: 1,
                ..GameStats::default()
            },
            luck_boost: false,
        }
    }

    pub fn is_busted(&self) -> bool {
        self.chips == 0
    }

    pub fn usable_items(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.inventory.iter().enumerate().filter(|(_, item)| !item.used)
    }

    /// Consumes the item at `index`; `None` if it is missing or spent.
    pub fn use_item(&mut self, index: usize) -> Option<ItemEffect> {
        let item = self.inventory.get_mut(index).filter(|item| !item.used)?;
        let effect = item.consume(&mut self.chips);
        if effect == ItemEffect::LuckBoost {
            self.luck_boost = true;
        }
        Some(effect)
    }
}
