use std::collections::HashSet;

use roguepoker_engine::betting::RoundPhase;
use roguepoker_engine::cards::{Card, Rank, Suit};
use roguepoker_engine::difficulty::Difficulty;
use roguepoker_engine::engine::{settle_showdown, Engine, PlayerInput};
use roguepoker_engine::errors::GameError;
use roguepoker_engine::events::{GameEvent, HandOutcome, MatchView};
use roguepoker_engine::hand::evaluate_best;
use roguepoker_engine::opponent::Opponent;
use roguepoker_engine::persistence::SaveData;
use roguepoker_engine::player::{PlayerAction, Seat};
use roguepoker_engine::policy::{Decision, DecisionContext, OpponentPolicy};

struct Fixed(Decision);

impl OpponentPolicy for Fixed {
    fn decide(&mut self, _ctx: &DecisionContext) -> Decision {
        self.0
    }
    fn name(&self) -> &str {
        "fixed"
    }
}

/// Plays a fixed script, then checks or calls forever.
struct Script {
    actions: Vec<PlayerAction>,
    rejections: Vec<GameError>,
    events: Vec<GameEvent>,
    abort_after: Option<usize>,
    asked: usize,
}

impl Script {
    fn new(actions: Vec<PlayerAction>) -> Self {
        Self {
            actions,
            rejections: Vec::new(),
            events: Vec::new(),
            abort_after: None,
            asked: 0,
        }
    }
}

impl PlayerInput for Script {
    fn choose(&mut self, view: &MatchView) -> Option<PlayerAction> {
        if self.abort_after == Some(self.asked) {
            return None;
        }
        self.asked += 1;
        if !self.actions.is_empty() {
            return Some(self.actions.remove(0));
        }
        Some(if view.to_call > 0 {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        })
    }

    fn observe(&mut self, events: &[GameEvent]) {
        self.events.extend_from_slice(events);
    }

    fn rejected(&mut self, error: &GameError) {
        self.rejections.push(error.clone());
    }
}

fn table_total(e: &Engine) -> u32 {
    e.progress().chips + e.opponent().map_or(0, |o| o.chips) + e.state().pot
}

#[test]
fn chips_are_conserved_across_many_hands() {
    for seed in 0..20u64 {
        let decision = [Decision::Call, Decision::Raise, Decision::Fold][seed as usize % 3];
        let mut e = Engine::new(seed, Difficulty::Normal, Box::new(Fixed(decision)));
        e.start_encounter().unwrap();
        let total = table_total(&e);
        for _ in 0..10 {
            if e.encounter_decided() {
                break;
            }
            let mut input = Script::new(vec![PlayerAction::Bet(5)]);
            e.drive_hand(&mut input).unwrap().expect("hand finishes");
            assert_eq!(table_total(&e), total, "seed {}", seed);
            assert_eq!(e.state().pot, 0);
        }
    }
}

#[test]
fn showdown_shares_always_sum_to_the_pot() {
    let mut showdowns = 0;
    for seed in 0..40u64 {
        let mut e = Engine::new(seed, Difficulty::Easy, Box::new(Fixed(Decision::Call)));
        e.start_encounter().unwrap();
        e.start_hand().unwrap();
        let pot_before_betting = e.state().pot;
        let mut input = Script::new(vec![PlayerAction::Bet(10)]);
        let outcome = e.drive_hand(&mut input).unwrap().unwrap();
        if let HandOutcome::Showdown {
            winner,
            player_share,
            opponent_share,
            ..
        } = outcome
        {
            showdowns += 1;
            assert_eq!(player_share + opponent_share, pot_before_betting + 20);
            if winner.is_none() {
                assert!(player_share >= opponent_share);
                assert!(player_share - opponent_share <= 1);
            }
        }
    }
    assert_eq!(showdowns, 40);
}

#[test]
fn broke_opponent_auto_folds_without_showdown() {
    let mut e = Engine::new(5, Difficulty::Normal, Box::new(Fixed(Decision::Call)));
    let mut opponent = Opponent::new(1);
    opponent.chips = 5;
    e.start_encounter_with(opponent).unwrap();
    e.start_hand().unwrap();
    assert_eq!(e.opponent().unwrap().chips, 0);

    let events = e.apply_player_action(PlayerAction::Bet(10)).unwrap();
    let outcome = events.iter().find_map(|ev| match ev {
        GameEvent::HandEnded(o) => Some(o.clone()),
        _ => None,
    });
    assert_eq!(outcome, Some(HandOutcome::OpponentFolded { pot: 20 }));
    assert!(events.iter().any(|ev| matches!(
        ev,
        GameEvent::Acted {
            seat: Seat::Opponent,
            action: PlayerAction::Fold,
            ..
        }
    )));
    assert!(e.state().community.is_empty());
    assert!(e.encounter_decided());
}

#[test]
fn oversized_raise_is_rejected_and_reprompted() {
    let mut e = Engine::new(8, Difficulty::Normal, Box::new(Fixed(Decision::Fold)));
    e.start_encounter().unwrap();
    e.start_hand().unwrap();
    assert_eq!(
        e.apply_player_action(PlayerAction::Raise(1_000)),
        Err(GameError::InsufficientChips {
            needed: 1_000,
            available: 95
        })
    );
    assert_eq!(e.round_phase(), RoundPhase::AwaitingPlayerAction);
    assert!(e.hand_in_progress());

    let mut input = Script::new(vec![PlayerAction::Raise(1_000), PlayerAction::Bet(10)]);
    let outcome = e.drive_hand(&mut input).unwrap().unwrap();
    assert_eq!(input.rejections.len(), 1);
    assert!(input
        .events
        .iter()
        .any(|ev| matches!(ev, GameEvent::HandEnded(_))));
    assert_eq!(outcome, HandOutcome::OpponentFolded { pot: 20 });
}

#[test]
fn aborting_mid_hand_records_nothing() {
    let mut e = Engine::new(2, Difficulty::Normal, Box::new(Fixed(Decision::Call)));
    e.start_encounter().unwrap();
    let mut input = Script::new(vec![]);
    input.abort_after = Some(1);
    assert_eq!(e.drive_hand(&mut input).unwrap(), None);
    assert_eq!(e.progress().stats.hands_played, 0);
    assert!(e.hand_in_progress());
}

#[test]
fn reraise_loops_back_to_player() {
    let mut e = Engine::new(4, Difficulty::Normal, Box::new(Fixed(Decision::Raise)));
    e.start_encounter().unwrap();
    e.start_hand().unwrap();
    let events = e.apply_player_action(PlayerAction::Bet(10)).unwrap();
    assert!(events.iter().any(|ev| matches!(
        ev,
        GameEvent::Acted {
            seat: Seat::Opponent,
            action: PlayerAction::Raise(10),
            ..
        }
    )));
    assert_eq!(e.round_phase(), RoundPhase::AwaitingPlayerAction);
    assert_eq!(e.view().to_call, 10);
    assert!(matches!(
        e.apply_player_action(PlayerAction::Check),
        Err(GameError::CheckFacingBet { to_call: 10 })
    ));
    e.apply_player_action(PlayerAction::Call).unwrap();
    assert_eq!(e.state().community.len(), 3);
}

#[test]
fn same_seed_replays_the_same_hand() {
    let play = |seed| {
        let mut e = Engine::new(seed, Difficulty::Hard, Box::new(Fixed(Decision::Call)));
        e.start_encounter().unwrap();
        let mut input = Script::new(vec![]);
        e.drive_hand(&mut input).unwrap();
        (e.state().clone(), e.progress().chips)
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn hands_deal_distinct_cards() {
    let mut e = Engine::new(21, Difficulty::Normal, Box::new(Fixed(Decision::Call)));
    e.start_encounter().unwrap();
    let mut input = Script::new(vec![]);
    e.drive_hand(&mut input).unwrap();
    let dealt = e.state().dealt_cards();
    assert_eq!(dealt.len(), 12);
    let mut all: HashSet<_> = dealt.into_iter().collect();
    all.extend(e.deck_cards().iter().copied());
    assert_eq!(all.len(), 52);
}

#[test]
fn run_ends_in_game_over_and_checkpoints() {
    let mut e = Engine::new(13, Difficulty::Nightmare, Box::new(Fixed(Decision::Raise)));
    e.start_encounter().unwrap();
    let mut hands = 0;
    while !e.encounter_decided() && hands < 500 {
        // all in every hand
        let chips = e.progress().chips;
        let mut input = Script::new(vec![PlayerAction::Bet(chips.saturating_sub(5).max(1))]);
        if e.drive_hand(&mut input).is_err() {
            break;
        }
        hands += 1;
    }
    assert!(e.encounter_decided());
    let events = e.finish_encounter().unwrap();
    assert!(matches!(
        events[0],
        GameEvent::GameOver { .. } | GameEvent::LevelUp { .. }
    ));

    let mut save = SaveData::default();
    e.checkpoint(&mut save);
    assert_eq!(save.high_score, e.progress().level);
    assert!(save.best_run_stats.is_some());
}

fn showdown_of(events: &[GameEvent]) -> Option<HandOutcome> {
    events.iter().find_map(|ev| match ev {
        GameEvent::HandEnded(o @ HandOutcome::Showdown { .. }) => Some(o.clone()),
        _ => None,
    })
}

/// Checks a fresh hand down to the river and returns every event.
fn check_down(e: &mut Engine, luck: bool) -> Vec<GameEvent> {
    let mut events = e.start_hand().unwrap();
    e.progress_mut().luck_boost = luck;
    while e.hand_in_progress() {
        events.extend(e.apply_player_action(PlayerAction::Check).unwrap());
    }
    events
}

#[test]
fn short_player_antes_are_matched() {
    let mut e = Engine::new(6, Difficulty::Normal, Box::new(Fixed(Decision::Call)));
    e.start_encounter().unwrap();
    e.progress_mut().chips = 3;
    let total = table_total(&e);

    let events = e.start_hand().unwrap();
    assert!(matches!(events[0], GameEvent::HandStarted { ante: 3, .. }));
    let Some(HandOutcome::Showdown {
        winner,
        player_share,
        opponent_share,
        ..
    }) = showdown_of(&events)
    else {
        panic!("a busted player's hand runs out to showdown");
    };
    assert_eq!(player_share + opponent_share, 6);
    let expected = match winner {
        Some(Seat::Player) => 6,
        Some(Seat::Opponent) => 0,
        None => 3,
    };
    assert_eq!(e.progress().chips, expected);
    assert_eq!(table_total(&e), total);
}

#[test]
fn short_opponent_antes_are_matched() {
    let mut e = Engine::new(6, Difficulty::Normal, Box::new(Fixed(Decision::Call)));
    let mut opponent = Opponent::new(1);
    opponent.chips = 2;
    e.start_encounter_with(opponent).unwrap();
    e.start_hand().unwrap();
    assert_eq!(e.state().pot, 4);
    assert_eq!(e.progress().chips, 98);

    let mut input = Script::new(vec![]);
    let outcome = e.drive_hand(&mut input).unwrap().unwrap();
    let HandOutcome::Showdown {
        player_share,
        opponent_share,
        ..
    } = outcome
    else {
        panic!("an all-in opponent is shown down");
    };
    assert_eq!(player_share + opponent_share, 4);
    assert_eq!(e.progress().chips + e.opponent().unwrap().chips, 100);
}

#[test]
fn board_playing_tie_gives_the_odd_chip_to_the_player() {
    let board = [
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::King, Suit::Spades),
        Card::new(Rank::Queen, Suit::Spades),
        Card::new(Rank::Jack, Suit::Spades),
        Card::new(Rank::Ten, Suit::Spades),
    ];
    let with = |a: Card, b: Card| {
        let mut cards = vec![a, b];
        cards.extend_from_slice(&board);
        evaluate_best(&cards).unwrap()
    };
    let player = with(
        Card::new(Rank::Two, Suit::Clubs),
        Card::new(Rank::Three, Suit::Diamonds),
    );
    let opponent = with(
        Card::new(Rank::Four, Suit::Hearts),
        Card::new(Rank::Five, Suit::Clubs),
    );
    assert_eq!(player, opponent);

    assert_eq!(settle_showdown(&player, &opponent, 11, false), (None, 6, 5));
    assert_eq!(settle_showdown(&player, &opponent, 10, false), (None, 5, 5));
    assert_eq!(
        settle_showdown(&player, &opponent, 11, true),
        (Some(Seat::Player), 11, 0)
    );
}

#[test]
fn lucky_escape_only_rescues_a_tied_or_beaten_player() {
    let mut escapes = 0;
    for seed in 0..200u64 {
        let mut e = Engine::new(seed, Difficulty::Easy, Box::new(Fixed(Decision::Call)));
        e.start_encounter().unwrap();
        let events = check_down(&mut e, true);
        let Some(HandOutcome::Showdown {
            winner,
            player_hand,
            opponent_hand,
            player_share,
            lucky_escape,
            ..
        }) = showdown_of(&events)
        else {
            panic!("checking down always reaches showdown");
        };
        if lucky_escape {
            escapes += 1;
            assert!(player_hand <= opponent_hand, "seed {}", seed);
            assert_eq!(winner, Some(Seat::Player));
            assert_eq!(player_share, 10);
            assert_eq!(e.progress().stats.lucky_escapes, 1);
        } else {
            assert_eq!(e.progress().stats.lucky_escapes, 0);
        }
        assert!(!e.progress().luck_boost, "the buff lasts one hand");
    }
    assert!(escapes > 0);
}

#[test]
fn without_luck_there_is_no_escape() {
    for seed in 0..50u64 {
        let mut e = Engine::new(seed, Difficulty::Easy, Box::new(Fixed(Decision::Call)));
        e.start_encounter().unwrap();
        let events = check_down(&mut e, false);
        if let Some(HandOutcome::Showdown {
            winner,
            player_hand,
            opponent_hand,
            lucky_escape,
            ..
        }) = showdown_of(&events)
        {
            assert!(!lucky_escape);
            if player_hand < opponent_hand {
                assert_eq!(winner, Some(Seat::Opponent));
            }
        }
    }
}

#[test]
fn items_drop_only_after_a_won_showdown() {
    let mut drops = 0;
    for seed in 0..200u64 {
        let mut e = Engine::new(seed, Difficulty::Easy, Box::new(Fixed(Decision::Call)));
        e.start_encounter().unwrap();
        let events = check_down(&mut e, false);
        let found = events
            .iter()
            .filter(|ev| matches!(ev, GameEvent::ItemFound { .. }))
            .count();
        let won = matches!(
            showdown_of(&events),
            Some(HandOutcome::Showdown {
                winner: Some(Seat::Player),
                ..
            })
        );
        if !won {
            assert_eq!(found, 0, "seed {}", seed);
        }
        assert!(found <= 1);
        assert_eq!(e.progress().inventory.len(), found);
        drops += found;
    }
    assert!(drops > 0);
}

#[test]
fn checkpoint_mid_hand_counts_committed_chips() {
    let mut e = Engine::new(3, Difficulty::Normal, Box::new(Fixed(Decision::Call)));
    e.start_encounter().unwrap();
    e.start_hand().unwrap();
    e.apply_player_action(PlayerAction::Bet(10)).unwrap();
    assert!(e.hand_in_progress());
    assert_eq!(e.progress().chips, 85);

    let mut save = SaveData::default();
    e.checkpoint(&mut save);
    assert_eq!(save.best_run_stats.unwrap().chips, 100);
    assert_eq!(e.progress().chips, 85);
}
