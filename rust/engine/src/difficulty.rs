use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Run difficulty. Every tunable it controls lives in one static table.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Nightmare,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DifficultyProfile {
    pub starting_chips: u32,
    /// Scales enemy chips and aggression.
    pub enemy_multiplier: f32,
    /// Scales level-up chip bonuses.
    pub reward_multiplier: f32,
    pub victory_bonus: u32,
}

const PROFILES: [(Difficulty, DifficultyProfile); 4] = [
    (
        Difficulty::Easy,
        DifficultyProfile {
            starting_chips: 150,
            enemy_multiplier: 0.8,
            reward_multiplier: 1.0,
            victory_bonus: 500,
        },
    ),
    (
        Difficulty::Normal,
        DifficultyProfile {
            starting_chips: 100,
            enemy_multiplier: 1.0,
            reward_multiplier: 1.2,
            victory_bonus: 1000,
        },
    ),
    (
        Difficulty::Hard,
        DifficultyProfile {
            starting_chips: 75,
            enemy_multiplier: 1.3,
            reward_multiplier: 1.5,
            victory_bonus: 1500,
        },
    ),
    (
        Difficulty::Nightmare,
        DifficultyProfile {
            starting_chips: 50,
            enemy_multiplier: 1.6,
            reward_multiplier: 2.0,
            victory_bonus: 2500,
        },
    ),
];

impl Difficulty {
    pub fn all() -> [Difficulty; 4] {
        PROFILES.map(|(d, _)| d)
    }

    pub fn profile(self) -> DifficultyProfile {
        PROFILES[self as usize].1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Nightmare => "nightmare",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "normal" | "2" => Ok(Difficulty::Normal),
            "hard" | "3" => Ok(Difficulty::Hard),
            "nightmare" | "4" => Ok(Difficulty::Nightmare),
            other => Err(format!("Unknown difficulty '{}'", other)),
        }
    }
}
