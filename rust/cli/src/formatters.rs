//! Card, table and event formatters for terminal display.
//!
//! Pure functions from engine values to strings. Suits render as Unicode
//! symbols where the terminal is known to handle them, letters otherwise.
//!
//! ## Example
//!
//! ```rust
//! use roguepoker_engine::cards::{Card, Rank, Suit};
//! use roguepoker_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use roguepoker_engine::cards::{Card, Rank, Suit};
use roguepoker_engine::events::{GameEvent, HandOutcome, MatchView};
use roguepoker_engine::hand::Category;
use roguepoker_engine::items::ItemEffect;
use roguepoker_engine::opponent::{EnemyKind, Opponent};
use roguepoker_engine::player::{PlayerAction, Seat};

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, looks for Windows Terminal, a modern `TERM_PROGRAM` or VS Code.
/// Elsewhere Unicode is assumed.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Format a Rank as a string (A, 2-10, J, Q, K).
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Ace => "A".to_string(),
        Rank::Jack => "J".to_string(),
        Rank::Queen => "Q".to_string(),
        Rank::King => "K".to_string(),
        other => other.value().to_string(),
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Format a board (list of cards) in bracket notation, `[]` when empty.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Format an action the way the player would type it.
///
/// ```rust
/// use roguepoker_engine::player::PlayerAction;
/// # use roguepoker_cli::formatters::format_action;
///
/// assert_eq!(format_action(&PlayerAction::Raise(20)), "raise 20");
/// assert_eq!(format_action(&PlayerAction::UseItem(0)), "item 1");
/// ```
pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Bet(amount) => format!("bet {}", amount),
        PlayerAction::Raise(amount) => format!("raise {}", amount),
        PlayerAction::UseItem(index) => format!("item {}", index + 1),
    }
}

pub fn format_category(category: Category) -> String {
    category.name().to_string()
}

pub fn format_seat(seat: Seat) -> &'static str {
    match seat {
        Seat::Player => "You",
        Seat::Opponent => "Enemy",
    }
}

/// Ten-cell bar for a strength in `0.0..=1.0`, with the percentage.
///
/// ```rust
/// # use roguepoker_cli::formatters::strength_bar;
/// assert_eq!(strength_bar(0.42), "████░░░░░░ 42%");
/// ```
pub fn strength_bar(strength: f32) -> String {
    let s = strength.clamp(0.0, 1.0);
    let filled = (s * 10.0) as usize;
    format!(
        "{}{} {:.0}%",
        "█".repeat(filled),
        "░".repeat(10 - filled),
        s * 100.0
    )
}

static ENEMY_ART: [(EnemyKind, [&str; 4]); 10] = [
    (EnemyKind::Bandit, ["   $  /", "  \\ >:( /", "   \\   /", "    \\ /"]),
    (EnemyKind::Rogue, ["  -> /", "  \\ ;) /", "   \\   /", "    \\ /"]),
    (EnemyKind::Mercenary, ["  X [#]", "  \\ >:| /", "   \\   /", "    \\ /"]),
    (EnemyKind::Assassin, ["   / (", "  \\ >:) /", "   \\   /", "    \\ /"]),
    (EnemyKind::Warlord, ["  ^^^ X", "  \\ >:( /", "   \\   /", "    \\ /"]),
    (EnemyKind::Shadow, ["  ~~~ (", "  \\ :| /", "   \\   /", "    \\ /"]),
    (EnemyKind::Vampire, ["  ^v^ .", "  \\ :E /", "   \\   /", "    \\ /"]),
    (EnemyKind::Demon, ["  ** >:)", "  \\ }:> /", "   \\   /", "    \\ /"]),
    (EnemyKind::Dragon, [" ** <=> **", "   \\   /", "    \\ /", "     V"]),
    (EnemyKind::Lich, ["  (x) ~", "  \\ 8| /", "   \\   /", "    \\ /"]),
];

/// Portrait lines for an enemy kind.
pub fn enemy_art(kind: EnemyKind) -> &'static [&'static str; 4] {
    ENEMY_ART
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(&ENEMY_ART[0].1, |(_, art)| art)
}

/// Multi-line introduction for a new encounter.
pub fn format_opponent(opponent: &Opponent) -> String {
    let mut lines = vec![format!(
        "⚔  {}  ({} chips)",
        opponent.name, opponent.chips
    )];
    if let Some(ability) = opponent.special_ability {
        lines.push(format!("   Special: {} - {}", ability.name(), ability.description()));
    }
    lines.extend(enemy_art(opponent.kind).iter().map(|l| format!("    {}", l)));
    lines.join("\n")
}

/// The table as the player sees it before acting.
pub fn format_view(view: &MatchView) -> String {
    let mut lines = vec![
        format!(
            "Level {} | {} | Pot: {} | To call: {}",
            view.level,
            view.street.as_str(),
            view.pot,
            view.to_call
        ),
        format!(
            "Your chips: {} | {} chips: {}",
            view.player_chips, view.opponent_name, view.opponent_chips
        ),
        format!("Board: {}", format_board(&view.community)),
    ];
    if let Some(hole) = view.player_hole {
        lines.push(format!("Your hand: {}", format_board(&hole)));
    }
    if let Some(s) = view.hand_strength {
        let luck = if view.luck_boost { " (lucky)" } else { "" };
        lines.push(format!("Hand strength: {}{}", strength_bar(s), luck));
    }
    if view.items.is_empty() {
        lines.push("Inventory: empty".to_string());
    } else {
        let items: Vec<String> = view
            .items
            .iter()
            .map(|(i, name)| format!("{}. {}", i + 1, name))
            .collect();
        lines.push(format!("Inventory: {}", items.join(", ")));
    }
    lines.join("\n")
}

pub fn format_outcome(outcome: &HandOutcome) -> String {
    match outcome {
        HandOutcome::Showdown {
            player_hand,
            opponent_hand,
            ..
        } => format!(
            "Showdown: your {} {} vs enemy {} {}. {}",
            format_category(player_hand.category),
            format_board(&player_hand.cards),
            format_category(opponent_hand.category),
            format_board(&opponent_hand.cards),
            capitalize(&outcome.summary())
        ),
        other => capitalize(&other.summary()),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display text for an event.
pub fn format_event(event: &GameEvent) -> String {
    match event {
        GameEvent::EncounterStarted { opponent } => format_opponent(opponent),
        GameEvent::HandStarted { hand_number, ante } => {
            format!("Hand {} (ante {})", hand_number, ante)
        }
        GameEvent::StreetDealt { street, cards } => {
            format!("{}: {}", street.as_str(), format_board(cards))
        }
        GameEvent::Acted { seat, action, .. } => {
            format!("{}: {}", format_seat(*seat), format_action(action))
        }
        GameEvent::AbilityUsed { ability } => {
            format!("Enemy uses {}! {}", ability.name(), ability.description())
        }
        GameEvent::ItemUsed { name, effect, .. } => match effect {
            ItemEffect::LuckBoost => format!("Used {}: luck is on your side this hand", name),
            ItemEffect::Chips(n) => format!("Used {}: +{} chips", name, n),
            ItemEffect::Healed(n) => format!("Used {}: restored {} chips", name, n),
        },
        GameEvent::ItemFound { item } => {
            format!("Found {}: {}", item.name, item.description)
        }
        GameEvent::HandEnded(outcome) => format_outcome(outcome),
        GameEvent::LevelUp {
            level,
            bonus,
            recovery,
            perfect_bonus,
        } => {
            let mut line = format!("LEVEL UP! Now level {} (+{} chips)", level, bonus);
            if *recovery > 0 {
                line.push_str(&format!(", recovery +{}", recovery));
            }
            if *perfect_bonus > 0 {
                line.push_str(&format!(", perfect game +{}", perfect_bonus));
            }
            line
        }
        GameEvent::GameOver { level } => format!("GAME OVER at level {}", level),
        GameEvent::Victory { bonus } => {
            format!("VICTORY! You conquered the realm (+{} chips)", bonus)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roguepoker_engine::logger::Street;

    #[test]
    fn test_format_rank() {
        assert_eq!(format_rank(&Rank::Two), "2");
        assert_eq!(format_rank(&Rank::Ten), "10");
        assert_eq!(format_rank(&Rank::Jack), "J");
        assert_eq!(format_rank(&Rank::Ace), "A");
    }

    #[test]
    fn test_format_suit_unicode_or_ascii() {
        let hearts = format_suit(&Suit::Hearts);
        assert!(hearts == "♥" || hearts == "h");
        let spades = format_suit(&Suit::Spades);
        assert!(spades == "♠" || spades == "s");
    }

    #[test]
    fn test_format_board_empty() {
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn test_strength_bar_clamps() {
        assert_eq!(strength_bar(1.5), "██████████ 100%");
        assert_eq!(strength_bar(-0.2), "░░░░░░░░░░ 0%");
    }

    #[test]
    fn test_every_enemy_has_art() {
        for level in 1..=10 {
            let kind = EnemyKind::for_level(level);
            assert!(ENEMY_ART.iter().any(|(k, _)| *k == kind), "{:?}", kind);
        }
        assert_eq!(enemy_art(EnemyKind::Dragon)[3], "     V");
    }

    #[test]
    fn test_opponent_intro_mentions_ability() {
        let text = format_opponent(&Opponent::new(3));
        assert!(text.contains("Mercenary Lv.3"));
        assert!(text.contains("Special:"));
        assert!(!format_opponent(&Opponent::new(1)).contains("Special:"));
    }

    #[test]
    fn test_format_event_lines() {
        let acted = GameEvent::Acted {
            seat: Seat::Opponent,
            street: Street::Flop,
            action: PlayerAction::Raise(10),
        };
        assert_eq!(format_event(&acted), "Enemy: raise 10");
        let ended = GameEvent::HandEnded(HandOutcome::OpponentFolded { pot: 30 });
        assert_eq!(
            format_event(&ended),
            "Opponent folds, player wins 30"
        );
    }
}
