//! Enemies met along the run: their kinds, stats and one-shot abilities.

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

pub const MIN_AGGRESSION: f32 = 0.3;
pub const MAX_AGGRESSION: f32 = 0.8;
pub const MIN_BLUFF_RATE: f32 = 0.1;
pub const MAX_BLUFF_RATE: f32 = 0.4;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Bandit,
    Rogue,
    Mercenary,
    Assassin,
    Warlord,
    Shadow,
    Vampire,
    Demon,
    Dragon,
    Lich,
}

/// Enemy kinds with the first level they appear at.
static ENEMY_LADDER: [(EnemyKind, u32); 10] = [
    (EnemyKind::Bandit, 1),
    (EnemyKind::Rogue, 2),
    (EnemyKind::Mercenary, 3),
    (EnemyKind::Assassin, 4),
    (EnemyKind::Warlord, 5),
    (EnemyKind::Shadow, 6),
    (EnemyKind::Vampire, 7),
    (EnemyKind::Demon, 8),
    (EnemyKind::Dragon, 9),
    (EnemyKind::Lich, 10),
];

impl EnemyKind {
    /// Strongest kind unlocked at `level`.
    pub fn for_level(level: u32) -> EnemyKind {
        ENEMY_LADDER
            .iter()
            .take_while(|(_, min_level)| *min_level <= level)
            .last()
            .map_or(EnemyKind::Bandit, |(kind, _)| *kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnemyKind::Bandit => "Bandit",
            EnemyKind::Rogue => "Rogue",
            EnemyKind::Mercenary => "Mercenary",
            EnemyKind::Assassin => "Assassin",
            EnemyKind::Warlord => "Warlord",
            EnemyKind::Shadow => "Shadow",
            EnemyKind::Vampire => "Vampire",
            EnemyKind::Demon => "Demon",
            EnemyKind::Dragon => "Dragon",
            EnemyKind::Lich => "Lich",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SpecialAbility {
    LuckyDraw,
    Intimidation,
    CardCounting,
    BluffMaster,
    ShadowStep,
    BloodDrain,
    Hellfire,
    DragonRage,
    DeathMagic,
}

/// Modifier an ability applies to the single decision it is used on.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum AbilityEffect {
    StrengthBoost(f32),
    ForceRaise,
    BluffMultiplier(f32),
    AggressionBoost(f32),
    PassiveCall,
    ForceAllIn,
}

static ABILITIES: [(u32, SpecialAbility, AbilityEffect, &str); 9] = [
    (
        2,
        SpecialAbility::LuckyDraw,
        AbilityEffect::StrengthBoost(0.15),
        "Redraws a weak card",
    ),
    (
        3,
        SpecialAbility::Intimidation,
        AbilityEffect::ForceRaise,
        "Forces a re-raise",
    ),
    (
        4,
        SpecialAbility::CardCounting,
        AbilityEffect::StrengthBoost(0.1),
        "Reads the deck for a sharper decision",
    ),
    (
        5,
        SpecialAbility::BluffMaster,
        AbilityEffect::BluffMultiplier(2.0),
        "Doubles the bluff rate",
    ),
    (
        6,
        SpecialAbility::ShadowStep,
        AbilityEffect::PassiveCall,
        "Slips through a betting round by calling",
    ),
    (
        7,
        SpecialAbility::BloodDrain,
        AbilityEffect::AggressionBoost(0.2),
        "Plays hungrier for chips",
    ),
    (
        8,
        SpecialAbility::Hellfire,
        AbilityEffect::AggressionBoost(0.3),
        "Burns through caution",
    ),
    (
        9,
        SpecialAbility::DragonRage,
        AbilityEffect::ForceAllIn,
        "Shoves everything in",
    ),
    (
        10,
        SpecialAbility::DeathMagic,
        AbilityEffect::BluffMultiplier(1.5),
        "Bluffs from beyond the grave",
    ),
];

impl SpecialAbility {
    pub fn for_level(level: u32) -> Option<SpecialAbility> {
        ABILITIES
            .iter()
            .find(|(l, ..)| *l == level)
            .map(|(_, ability, ..)| *ability)
    }

    pub fn effect(self) -> AbilityEffect {
        ABILITIES[self as usize].2
    }

    pub fn description(self) -> &'static str {
        ABILITIES[self as usize].3
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialAbility::LuckyDraw => "Lucky Draw",
            SpecialAbility::Intimidation => "Intimidation",
            SpecialAbility::CardCounting => "Card Counting",
            SpecialAbility::BluffMaster => "Bluff Master",
            SpecialAbility::ShadowStep => "Shadow Step",
            SpecialAbility::BloodDrain => "Blood Drain",
            SpecialAbility::Hellfire => "Hellfire",
            SpecialAbility::DragonRage => "Dragon Rage",
            SpecialAbility::DeathMagic => "Death Magic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub name: String,
    pub kind: EnemyKind,
    pub level: u32,
    pub chips: u32,
    pub aggression: f32,
    pub bluff_rate: f32,
    pub special_ability: Option<SpecialAbility>,
    pub ability_used: bool,
}

impl Opponent {
    /// Base enemy for `level`, before difficulty scaling.
    pub fn new(level: u32) -> Self {
        let level = level.max(1);
        let kind = EnemyKind::for_level(level);
        Self {
            name: format!("{} Lv.{}", kind.as_str(), level),
            kind,
            level,
            chips: 50 + level * 25,
            aggression: (MIN_AGGRESSION + level as f32 * 0.1).min(MAX_AGGRESSION),
            bluff_rate: (MIN_BLUFF_RATE + level as f32 * 0.05).min(MAX_BLUFF_RATE),
            special_ability: SpecialAbility::for_level(level),
            ability_used: false,
        }
    }

    /// Enemy for `level` scaled by the run's difficulty.
    pub fn generate(level: u32, difficulty: Difficulty) -> Self {
        let mut enemy = Self::new(level);
        let m = difficulty.profile().enemy_multiplier;
        enemy.chips = (enemy.chips as f32 * m).round() as u32;
        enemy.aggression = (enemy.aggression * m).clamp(MIN_AGGRESSION, MAX_AGGRESSION);
        enemy
    }

    /// Takes the ability for one use. Returns `None` once spent or if there is none.
    pub fn consume_ability(&mut self) -> Option<SpecialAbility> {
        if self.ability_used {
            return None;
        }
        let ability = self.special_ability?;
        self.ability_used = true;
        Some(ability)
    }

    pub fn ability_ready(&self) -> bool {
        self.special_ability.is_some() && !self.ability_used
    }
}
