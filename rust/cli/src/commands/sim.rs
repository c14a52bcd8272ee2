//! Simulation command handler for unattended runs.
//!
//! The player's seat is driven by the baseline policy so that a whole run can
//! be played without a terminal, for balancing and reproducible traces. The
//! save file is never touched.
//!
//! # Examples
//!
//! ```no_run
//! use roguepoker_cli::commands::sim::handle_sim_command;
//! use roguepoker_cli::config::Overrides;
//! use std::io;
//!
//! let overrides = Overrides { seed: Some(42), ..Overrides::default() };
//! handle_sim_command(overrides, Some(200), None, &mut io::stdout()).unwrap();
//! ```

use crate::config::{self, Overrides};
use crate::error::CliError;
use crate::formatters::format_event;
use roguepoker_ai::baseline::BaselinePolicy;
use roguepoker_engine::engine::{Engine, PlayerInput, RunEnd};
use roguepoker_engine::errors::GameError;
use roguepoker_engine::events::{GameEvent, MatchView};
use roguepoker_engine::player::PlayerAction;
use roguepoker_engine::policy::{Decision, DecisionContext, OpponentPolicy};
use roguepoker_engine::logger::Street;
use roguepoker_engine::rules::ante_for_level;
use std::io::Write;

use super::new_engine;

const AUTOPILOT_AGGRESSION: f32 = 0.5;

/// Plays the player's seat with [`BaselinePolicy`].
struct Autopilot<'a> {
    policy: BaselinePolicy,
    out: &'a mut dyn Write,
    verbose: bool,
    retry: bool,
    io_error: Option<std::io::Error>,
}

impl<'a> Autopilot<'a> {
    fn new(out: &'a mut dyn Write, verbose: bool) -> Self {
        Self {
            policy: BaselinePolicy::new(),
            out,
            verbose,
            retry: false,
            io_error: None,
        }
    }

    fn decide(&mut self, view: &MatchView) -> PlayerAction {
        if view.street == Street::Preflop
            && let Some((index, _)) = view.items.first()
        {
            return PlayerAction::UseItem(*index);
        }
        let ctx = DecisionContext {
            hand_strength: view.hand_strength.unwrap_or(0.0),
            pot: view.pot,
            to_call: view.to_call,
            chips: view.player_chips,
            level: view.level,
            aggression: AUTOPILOT_AGGRESSION,
            bluff_rate: 0.0,
        };
        let free = view.to_call == 0;
        match self.policy.decide(&ctx) {
            Decision::Fold if free => PlayerAction::Check,
            Decision::Fold => PlayerAction::Fold,
            Decision::Check => PlayerAction::Check,
            Decision::Call => PlayerAction::Call,
            Decision::Raise => {
                let behind = view.player_chips.saturating_sub(view.to_call);
                let amount = ante_for_level(view.level).max(view.pot / 2).min(behind);
                match amount {
                    0 => PlayerAction::Call,
                    n if free => PlayerAction::Bet(n),
                    n => PlayerAction::Raise(n),
                }
            }
        }
    }
}

impl PlayerInput for Autopilot<'_> {
    fn choose(&mut self, view: &MatchView) -> Option<PlayerAction> {
        if std::mem::take(&mut self.retry) {
            return Some(if view.to_call == 0 {
                PlayerAction::Check
            } else {
                PlayerAction::Fold
            });
        }
        Some(self.decide(view))
    }

    fn observe(&mut self, events: &[GameEvent]) {
        if !self.verbose || self.io_error.is_some() {
            return;
        }
        for event in events {
            if let Err(e) = writeln!(self.out, "{}", format_event(event)) {
                self.io_error = Some(e);
                return;
            }
        }
    }

    fn rejected(&mut self, error: &GameError) {
        tracing::debug!(%error, "autopilot action rejected");
        self.retry = true;
    }
}

/// Handle the sim command: play a run on autopilot and print a summary.
///
/// # Arguments
///
/// * `overrides` - Seed, difficulty and opponent AI from the command line
/// * `hands` - Stop after this many hands even if the run goes on
/// * `log` - Optional JSONL hand log path
/// * `out` - Output stream for the trace and the summary
pub fn handle_sim_command(
    overrides: Overrides,
    hands: Option<u64>,
    log: Option<String>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::resolve(&overrides)?.config;
    let mut engine = new_engine(&cfg, log.as_deref())?;
    writeln!(
        out,
        "Simulating: difficulty={} seed={} ai={}",
        engine.difficulty(),
        engine.seed(),
        engine.policy_name()
    )?;

    {
        let mut pilot = Autopilot::new(out, hands.is_some_and(|n| n <= 50));
        run_autopilot(&mut engine, &mut pilot, hands)?;
        if let Some(e) = pilot.io_error.take() {
            return Err(e.into());
        }
    }
    write_summary(&engine, out)?;
    Ok(())
}

/// Returns `true` when the hand limit cut the run short.
fn run_autopilot(
    engine: &mut Engine,
    pilot: &mut Autopilot<'_>,
    limit: Option<u64>,
) -> Result<bool, GameError> {
    let mut played = 0u64;
    while engine.run_end().is_none() {
        let events = engine.start_encounter()?;
        pilot.observe(&events);
        while !engine.encounter_decided() {
            if limit.is_some_and(|n| played >= n) {
                tracing::info!(hands = played, "hand limit reached");
                return Ok(true);
            }
            if engine.drive_hand(pilot)?.is_none() {
                return Ok(true);
            }
            played += 1;
        }
        let events = engine.finish_encounter()?;
        pilot.observe(&events);
    }
    Ok(false)
}

fn write_summary(engine: &Engine, out: &mut dyn Write) -> std::io::Result<()> {
    let p = engine.progress();
    let ending = match engine.run_end() {
        Some(RunEnd::Victory) => "Victory",
        Some(RunEnd::GameOver) => "Game over",
        None => "Stopped",
    };
    writeln!(out, "Result: {}", ending)?;
    writeln!(out, "Level reached: {}", p.level)?;
    writeln!(out, "Chips: {}", p.chips)?;
    writeln!(out, "Hands played: {}", p.stats.hands_played)?;
    writeln!(out, "Hands won: {}", p.stats.hands_won)?;
    writeln!(out, "Win rate: {:.1}%", p.stats.win_rate())?;
    writeln!(out, "Enemies defeated: {}", p.stats.enemies_defeated)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roguepoker_engine::difficulty::Difficulty;
    use serial_test::serial;

    fn view(to_call: u32, strength: f32) -> MatchView {
        MatchView {
            level: 1,
            street: Street::Flop,
            pot: 40,
            to_call,
            player_chips: 100,
            player_hole: None,
            community: Vec::new(),
            opponent_name: "Rookie".into(),
            opponent_chips: 100,
            hand_strength: Some(strength),
            luck_boost: false,
            items: Vec::new(),
        }
    }

    fn sim(seed: u64, hands: Option<u64>) -> String {
        let mut out = Vec::new();
        let overrides = Overrides {
            seed: Some(seed),
            difficulty: Some("easy".into()),
            ai: Some("baseline".into()),
            ..Overrides::default()
        };
        handle_sim_command(overrides, hands, None, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_autopilot_never_folds_for_free() {
        let mut sink = Vec::new();
        let mut pilot = Autopilot::new(&mut sink, false);
        assert_eq!(pilot.decide(&view(0, 0.05)), PlayerAction::Check);
        assert_eq!(pilot.decide(&view(30, 0.05)), PlayerAction::Fold);
    }

    #[test]
    fn test_autopilot_sizes_bets_from_pot() {
        let mut sink = Vec::new();
        let mut pilot = Autopilot::new(&mut sink, false);
        assert_eq!(pilot.decide(&view(0, 0.95)), PlayerAction::Bet(20));
    }

    #[test]
    fn test_autopilot_uses_item_preflop() {
        let mut sink = Vec::new();
        let mut pilot = Autopilot::new(&mut sink, false);
        let mut v = view(0, 0.5);
        v.street = Street::Preflop;
        v.items = vec![(2, "Lucky Coin".into())];
        assert_eq!(pilot.decide(&v), PlayerAction::UseItem(2));
    }

    #[test]
    fn test_autopilot_retreats_after_rejection() {
        let mut sink = Vec::new();
        let mut pilot = Autopilot::new(&mut sink, false);
        pilot.rejected(&GameError::NoHandInProgress);
        assert_eq!(pilot.choose(&view(10, 0.95)), Some(PlayerAction::Fold));
        assert_eq!(pilot.choose(&view(0, 0.95)), Some(PlayerAction::Bet(20)));
    }

    /// Fails every write whose text contains `fail_on`.
    struct Flaky {
        fail_on: &'static str,
    }

    impl Write for Flaky {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if String::from_utf8_lossy(buf).contains(self.fail_on) {
                return Err(std::io::Error::other("closed"));
            }
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_trace_write_failure_is_kept() {
        let mut sink = Flaky { fail_on: "" };
        let mut pilot = Autopilot::new(&mut sink, true);
        pilot.observe(&[GameEvent::HandStarted {
            hand_number: 1,
            ante: 5,
        }]);
        assert!(pilot.io_error.is_some());
    }

    #[test]
    #[serial]
    fn test_sim_reports_trace_write_failure() {
        let mut out = Flaky {
            fail_on: "Hand 1 (ante",
        };
        let overrides = Overrides {
            seed: Some(1),
            ai: Some("baseline".into()),
            ..Overrides::default()
        };
        let result = handle_sim_command(overrides, Some(3), None, &mut out);
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_run_autopilot_reaches_an_ending() {
        let mut engine = Engine::new(
            5,
            Difficulty::Easy,
            Box::new(BaselinePolicy::new()),
        );
        let mut sink = Vec::new();
        let mut pilot = Autopilot::new(&mut sink, false);
        let stopped = run_autopilot(&mut engine, &mut pilot, None).unwrap();
        assert!(!stopped);
        assert!(engine.run_end().is_some());
        assert!(engine.progress().stats.hands_played > 0);
    }

    #[test]
    #[serial]
    fn test_sim_is_reproducible() {
        let a = sim(9, Some(20));
        let b = sim(9, Some(20));
        assert_eq!(a, b);
        assert!(a.starts_with("Simulating: difficulty=easy seed=9 ai=baseline\n"));
        assert!(a.contains("Hand 1 (ante 5)"));
    }

    #[test]
    #[serial]
    fn test_sim_respects_hand_limit() {
        let text = sim(3, Some(1));
        assert!(text.contains("Hands played: 1\n") || text.contains("Hands played: 0\n"));
        assert!(!text.contains("Hand 2 (ante"));
    }
}
