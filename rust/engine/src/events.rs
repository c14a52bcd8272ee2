//! What the engine reports to whoever is displaying the game.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::EvaluatedHand;
use crate::items::{Item, ItemEffect};
use crate::logger::Street;
use crate::opponent::{Opponent, SpecialAbility};
use crate::player::{PlayerAction, Seat};

/// How a hand was decided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HandOutcome {
    /// The player folded; the opponent takes `pot`
    PlayerFolded { pot: u32 },
    /// The opponent folded or could not cover a call; the player takes `pot`
    OpponentFolded { pot: u32 },
    Showdown {
        /// `None` on a split
        winner: Option<Seat>,
        player_hand: EvaluatedHand,
        opponent_hand: EvaluatedHand,
        player_share: u32,
        opponent_share: u32,
        /// A luck boost turned a tie or loss into a win
        lucky_escape: bool,
    },
}

impl HandOutcome {
    pub fn winner(&self) -> Option<Seat> {
        match self {
            HandOutcome::PlayerFolded { .. } => Some(Seat::Opponent),
            HandOutcome::OpponentFolded { .. } => Some(Seat::Player),
            HandOutcome::Showdown { winner, .. } => *winner,
        }
    }

    /// Chips the player collected from the pot.
    pub fn player_share(&self) -> u32 {
        match self {
            HandOutcome::PlayerFolded { .. } => 0,
            HandOutcome::OpponentFolded { pot } => *pot,
            HandOutcome::Showdown { player_share, .. } => *player_share,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            HandOutcome::PlayerFolded { pot } => format!("player folds, opponent wins {}", pot),
            HandOutcome::OpponentFolded { pot } => format!("opponent folds, player wins {}", pot),
            HandOutcome::Showdown {
                winner,
                player_share,
                opponent_share,
                lucky_escape,
                ..
            } => match (winner, lucky_escape) {
                (Some(Seat::Player), true) => format!("lucky escape, player wins {}", player_share),
                (Some(Seat::Player), false) => format!("player wins {}", player_share),
                (Some(Seat::Opponent), _) => format!("opponent wins {}", opponent_share),
                (None, _) => format!("split {}/{}", player_share, opponent_share),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EncounterStarted { opponent: Opponent },
    HandStarted { hand_number: u32, ante: u32 },
    StreetDealt { street: Street, cards: Vec<Card> },
    Acted { seat: Seat, street: Street, action: PlayerAction },
    AbilityUsed { ability: SpecialAbility },
    ItemUsed { index: usize, name: String, effect: ItemEffect },
    ItemFound { item: Item },
    HandEnded(HandOutcome),
    LevelUp {
        level: u32,
        bonus: u32,
        recovery: u32,
        perfect_bonus: u32,
    },
    GameOver { level: u32 },
    Victory { bonus: u32 },
}

/// Snapshot of the table from the player's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub level: u32,
    pub street: Street,
    pub pot: u32,
    pub to_call: u32,
    pub player_chips: u32,
    pub player_hole: Option<[Card; 2]>,
    pub community: Vec<Card>,
    pub opponent_name: String,
    pub opponent_chips: u32,
    /// The player's own strength estimate, when hole cards are dealt
    pub hand_strength: Option<f32>,
    pub luck_boost: bool,
    /// Unused inventory entries with their indices
    pub items: Vec<(usize, String)>,
}
