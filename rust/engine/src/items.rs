//! Consumable items found after winning hands.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chip ceiling that healing items restore toward.
pub const HEAL_CEILING: u32 = 200;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Boosts hand strength for the current hand and arms the lucky-escape roll.
    Luck,
    /// Grants chips outright.
    ChipBonus,
    /// Restores chips up to [`HEAL_CEILING`].
    Heal,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub name: String,
    pub description: String,
    pub value: u32,
    pub used: bool,
}

/// What applying an item did to the player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum ItemEffect {
    LuckBoost,
    Chips(u32),
    Healed(u32),
}

struct Template {
    kind: ItemKind,
    name: &'static str,
    description: &'static str,
    value: u32,
}

static CATALOGUE: [Template; 6] = [
    Template {
        kind: ItemKind::Luck,
        name: "Lucky Charm",
        description: "Slightly improves hand strength",
        value: 1,
    },
    Template {
        kind: ItemKind::ChipBonus,
        name: "Coin Pouch",
        description: "Grants 25 chips",
        value: 25,
    },
    Template {
        kind: ItemKind::Heal,
        name: "Magic Elixir",
        description: "Restores health",
        value: 50,
    },
    Template {
        kind: ItemKind::Luck,
        name: "Rabbit's Foot",
        description: "Major luck boost",
        value: 2,
    },
    Template {
        kind: ItemKind::ChipBonus,
        name: "Golden Coin",
        description: "Grants 50 chips",
        value: 50,
    },
    Template {
        kind: ItemKind::Heal,
        name: "Phoenix Feather",
        description: "Full health restoration",
        value: 100,
    },
];

impl Item {
    /// Number of entries in the item catalogue.
    pub fn catalogue_len() -> usize {
        CATALOGUE.len()
    }

    /// Fresh copy of catalogue entry `index`, or `None` past the end.
    pub fn from_catalogue(index: usize) -> Option<Item> {
        CATALOGUE.get(index).map(instantiate)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Item {
        instantiate(&CATALOGUE[rng.random_range(0..CATALOGUE.len())])
    }

    /// Marks the item used and applies it to `chips`.
    pub fn consume(&mut self, chips: &mut u32) -> ItemEffect {
        self.used = true;
        match self.kind {
            ItemKind::Luck => ItemEffect::LuckBoost,
            ItemKind::ChipBonus => {
                *chips = chips.saturating_add(self.value);
                ItemEffect::Chips(self.value)
            }
            ItemKind::Heal => {
                let healed = self.value.min(HEAL_CEILING.saturating_sub(*chips));
                *chips += healed;
                ItemEffect::Healed(healed)
            }
        }
    }
}

fn instantiate(t: &Template) -> Item {
    Item {
        kind: t.kind,
        name: t.name.to_string(),
        description: t.description.to_string(),
        value: t.value,
        used: false,
    }
}
