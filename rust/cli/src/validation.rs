//! Input parsing and validation for interactive commands.
//!
//! Parsing never panics: anything malformed comes back as
//! [`ParseResult::Invalid`] or an `Err` with a message for the user.

use roguepoker_engine::cards::{Card, Rank, Suit};
use roguepoker_engine::player::PlayerAction;

/// Result type for parsing user input into player actions.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

pub const ACTION_HELP: &str =
    "fold|f, check|c, call, bet <n>, raise <n>, item <k>, q";

/// Parse user input string into a PlayerAction or special commands.
///
/// Accepted (case-insensitive):
/// - "f" or "fold" → Fold
/// - "c" or "check" → Check
/// - "call" → Call
/// - "bet X" → Bet with amount X
/// - "raise X" → Raise by amount X
/// - "item K" → use the K-th inventory slot (1-based)
/// - "q" or "quit" → Quit command
///
/// # Example
///
/// ```rust
/// # use roguepoker_cli::validation::{parse_player_action, ParseResult};
/// use roguepoker_engine::player::PlayerAction;
///
/// assert_eq!(parse_player_action("bet 10"), ParseResult::Action(PlayerAction::Bet(10)));
/// assert_eq!(parse_player_action("item 1"), ParseResult::Action(PlayerAction::UseItem(0)));
/// assert_eq!(parse_player_action("Q"), ParseResult::Quit);
/// assert!(matches!(parse_player_action("raise lots"), ParseResult::Invalid(_)));
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };
    if parts.len() > 2 {
        return ParseResult::Invalid(format!("Too many words in '{}'", input));
    }
    let arg = parts.get(1).copied();

    match (verb, arg) {
        ("q" | "quit", None) => ParseResult::Quit,
        ("fold" | "f", None) => ParseResult::Action(PlayerAction::Fold),
        ("check" | "c", None) => ParseResult::Action(PlayerAction::Check),
        ("call", None) => ParseResult::Action(PlayerAction::Call),
        ("bet", _) => parse_amount("Bet", arg).map_or_else(ParseResult::Invalid, |n| {
            ParseResult::Action(PlayerAction::Bet(n))
        }),
        ("raise", _) => parse_amount("Raise", arg).map_or_else(ParseResult::Invalid, |n| {
            ParseResult::Action(PlayerAction::Raise(n))
        }),
        ("item" | "i", _) => parse_item_slot(arg).map_or_else(ParseResult::Invalid, |i| {
            ParseResult::Action(PlayerAction::UseItem(i))
        }),
        ("q" | "quit" | "fold" | "f" | "check" | "c" | "call", Some(extra)) => {
            ParseResult::Invalid(format!("'{}' takes no argument (got '{}')", verb, extra))
        }
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: {}",
            verb, ACTION_HELP
        )),
    }
}

fn parse_amount(what: &str, arg: Option<&str>) -> Result<u32, String> {
    let Some(raw) = arg else {
        return Err(format!(
            "{} requires an amount (e.g., '{} 20')",
            what,
            what.to_lowercase()
        ));
    };
    match raw.parse::<u32>() {
        Ok(0) => Err(format!("{} amount must be positive", what)),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid {} amount '{}'", what.to_lowercase(), raw)),
    }
}

fn parse_item_slot(arg: Option<&str>) -> Result<usize, String> {
    let raw = arg.ok_or_else(|| "Item requires a slot number (e.g., 'item 1')".to_string())?;
    match raw.parse::<usize>() {
        Ok(0) => Err("Item slots start at 1".to_string()),
        Ok(k) => Ok(k - 1),
        Err(_) => Err(format!("Invalid item slot '{}'", raw)),
    }
}

/// Parses one card such as `As`, `10h`, `Td` or `Q♣`.
pub fn parse_card(token: &str) -> Result<Card, String> {
    let token = token.trim();
    let mut chars: Vec<char> = token.chars().collect();
    let suit_char = chars
        .pop()
        .ok_or_else(|| "Empty card".to_string())?;
    let suit = match suit_char.to_ascii_lowercase() {
        's' | '♠' => Suit::Spades,
        'h' | '♥' => Suit::Hearts,
        'd' | '♦' => Suit::Diamonds,
        'c' | '♣' => Suit::Clubs,
        _ => return Err(format!("Unknown suit in '{}'", token)),
    };
    let rank_str: String = chars.into_iter().collect();
    let rank = match rank_str.to_ascii_uppercase().as_str() {
        "A" => Rank::Ace,
        "K" => Rank::King,
        "Q" => Rank::Queen,
        "J" => Rank::Jack,
        "T" | "10" => Rank::Ten,
        digit => digit
            .parse::<u8>()
            .ok()
            .filter(|v| (2..=9).contains(v))
            .and_then(Rank::from_value)
            .ok_or_else(|| format!("Unknown rank in '{}'", token))?,
    };
    Ok(Card::new(rank, suit))
}

/// Parses 5 to 7 distinct cards separated by spaces or commas.
///
/// ```rust
/// # use roguepoker_cli::validation::parse_cards;
/// assert_eq!(parse_cards("As Ks Qs Js Ts").unwrap().len(), 5);
/// assert!(parse_cards("As As Ks Qs Js").is_err());
/// assert!(parse_cards("As Ks").is_err());
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, String> {
    let cards = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(parse_card)
        .collect::<Result<Vec<Card>, String>>()?;
    if !(5..=7).contains(&cards.len()) {
        return Err(format!("Expected 5 to 7 cards, got {}", cards.len()));
    }
    for (i, card) in cards.iter().enumerate() {
        if cards[..i].contains(card) {
            return Err(format!("Duplicate card {:?} of {:?}", card.rank, card.suit));
        }
    }
    Ok(cards)
}

/// `y`/`yes` continue; anything else stops.
pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_actions() {
        assert_eq!(parse_player_action("fold"), ParseResult::Action(PlayerAction::Fold));
        assert_eq!(parse_player_action("F"), ParseResult::Action(PlayerAction::Fold));
        assert_eq!(parse_player_action("c"), ParseResult::Action(PlayerAction::Check));
        assert_eq!(parse_player_action(" Call "), ParseResult::Action(PlayerAction::Call));
        assert_eq!(parse_player_action("quit"), ParseResult::Quit);
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!(
            parse_player_action("raise 15"),
            ParseResult::Action(PlayerAction::Raise(15))
        );
        for bad in ["bet", "bet 0", "bet -5", "bet ten", "raise 99999999999"] {
            assert!(
                matches!(parse_player_action(bad), ParseResult::Invalid(_)),
                "{} should be invalid",
                bad
            );
        }
    }

    #[test]
    fn test_parse_item_is_one_based() {
        assert_eq!(
            parse_player_action("item 3"),
            ParseResult::Action(PlayerAction::UseItem(2))
        );
        assert!(matches!(parse_player_action("item 0"), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action("item"), ParseResult::Invalid(_)));
    }

    #[test]
    fn test_unknown_and_malformed_input() {
        assert!(matches!(parse_player_action(""), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action("allin"), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action("fold now"), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action("bet 5 6"), ParseResult::Invalid(_)));
    }

    #[test]
    fn test_parse_card_forms() {
        assert_eq!(parse_card("As").unwrap(), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(parse_card("10h").unwrap(), Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!(parse_card("td").unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!(parse_card("7♣").unwrap(), Card::new(Rank::Seven, Suit::Clubs));
        assert!(parse_card("1s").is_err());
        assert!(parse_card("Ax").is_err());
        assert!(parse_card("").is_err());
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("Y"));
        assert!(is_yes(" yes "));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }
}
