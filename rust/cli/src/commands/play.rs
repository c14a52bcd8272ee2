//! # Play Command
//!
//! Interactive run against the opponent ladder.
//!
//! The player types one action per prompt; invalid input and rejected actions
//! are re-prompted. After each defeated opponent the player chooses whether to
//! go on. The high-score record is written at every checkpoint: game over,
//! victory, or quitting.

use crate::config::{self, Overrides};
use crate::error::CliError;
use crate::formatters::{format_event, format_view};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ACTION_HELP, ParseResult, is_yes, parse_player_action};
use roguepoker_engine::engine::{Engine, PlayerInput};
use roguepoker_engine::errors::GameError;
use roguepoker_engine::events::{GameEvent, MatchView};
use roguepoker_engine::persistence::{JsonFileStore, SaveData, SaveStore};
use roguepoker_engine::player::PlayerAction;
use std::io::{self, BufRead, Write};

use super::new_engine;
use super::stats::load_or_default;

/// Why the player stopped answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Quit,
    InputClosed,
}

/// Reads actions from a terminal and echoes events back to it.
struct TerminalInput<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    stdin: &'a mut dyn BufRead,
    stop: Option<Stop>,
    io_error: Option<io::Error>,
}

impl<'a> TerminalInput<'a> {
    fn new(out: &'a mut dyn Write, err: &'a mut dyn Write, stdin: &'a mut dyn BufRead) -> Self {
        Self {
            out,
            err,
            stdin,
            stop: None,
            io_error: None,
        }
    }

    fn ask(&mut self, view: &MatchView) -> io::Result<Option<PlayerAction>> {
        writeln!(self.out, "\n{}", format_view(view))?;
        loop {
            ui::prompt(self.out, &format!("Action ({}): ", ACTION_HELP))?;
            let Some(line) = read_stdin_line(self.stdin) else {
                self.stop = Some(Stop::InputClosed);
                return Ok(None);
            };
            match parse_player_action(&line) {
                ParseResult::Action(action) => return Ok(Some(action)),
                ParseResult::Quit => {
                    self.stop = Some(Stop::Quit);
                    return Ok(None);
                }
                ParseResult::Invalid(msg) => ui::write_error(self.err, &msg)?,
            }
        }
    }

    fn show(&mut self, events: &[GameEvent]) -> io::Result<()> {
        for event in events {
            writeln!(self.out, "{}", format_event(event))?;
        }
        Ok(())
    }

    /// Asks a yes/no question; EOF counts as no.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        ui::prompt(self.out, question)?;
        Ok(read_stdin_line(self.stdin).is_some_and(|l| is_yes(&l)))
    }

    fn keep(&mut self, result: io::Result<()>) {
        if let Err(e) = result
            && self.io_error.is_none()
        {
            self.io_error = Some(e);
        }
    }
}

impl PlayerInput for TerminalInput<'_> {
    fn choose(&mut self, view: &MatchView) -> Option<PlayerAction> {
        match self.ask(view) {
            Ok(action) => action,
            Err(e) => {
                self.io_error = Some(e);
                None
            }
        }
    }

    fn observe(&mut self, events: &[GameEvent]) {
        let shown = self.show(events);
        self.keep(shown);
    }

    fn rejected(&mut self, error: &GameError) {
        let written = ui::write_error(self.err, &error.to_string());
        self.keep(written);
    }
}

/// Handle the play command: an interactive run from level 1.
///
/// # Returns
///
/// * `Ok(())` when the run ends or the player quits
/// * `Err(CliError::Interrupted)` when input closes mid-run
/// * `Err(CliError)` for configuration, log file or I/O failures
pub fn handle_play_command(
    overrides: Overrides,
    log: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::resolve(&overrides)?.config;
    let store = JsonFileStore::new(&cfg.save_path);
    let mut save = load_or_default(&store, err)?;
    let mut engine = new_engine(&cfg, log.as_deref())?;

    writeln!(out, "=== ROGUELIKE POKER ===")?;
    writeln!(
        out,
        "Difficulty: {} | Seed: {} | Opponent AI: {}",
        engine.difficulty(),
        engine.seed(),
        engine.policy_name()
    )?;
    if save.high_score > 0 {
        writeln!(out, "High score: Level {}", save.high_score)?;
    }

    let mut term = TerminalInput::new(out, err, stdin);
    let stop = play_run(&mut engine, &mut term)?;

    let new_high = checkpoint(&engine, &mut save, &store, term.err)?;
    write_final_stats(&engine, new_high, term.out)?;

    match stop {
        Some(Stop::InputClosed) => Err(CliError::Interrupted("input closed".into())),
        _ => Ok(()),
    }
}

/// Plays encounters until the run ends or the player stops.
fn play_run(engine: &mut Engine, term: &mut TerminalInput<'_>) -> Result<Option<Stop>, CliError> {
    loop {
        let events = engine.start_encounter()?;
        term.show(&events)?;

        while !engine.encounter_decided() {
            ui::separator(term.out)?;
            let finished = engine.drive_hand(term)?;
            if let Some(e) = term.io_error.take() {
                return Err(e.into());
            }
            if finished.is_none() {
                return Ok(term.stop);
            }
        }

        let events = engine.finish_encounter()?;
        term.show(&events)?;
        if engine.run_end().is_some() {
            return Ok(None);
        }
        let question = format!(
            "Continue to level {} with {} chips? (y/n): ",
            engine.progress().level,
            engine.progress().chips
        );
        if !term.confirm(&question)? {
            return Ok(Some(Stop::Quit));
        }
    }
}

/// Folds the run into the record and writes it. A failed write is reported,
/// not fatal.
fn checkpoint(
    engine: &Engine,
    save: &mut SaveData,
    store: &JsonFileStore,
    err: &mut dyn Write,
) -> Result<bool, CliError> {
    let new_high = engine.checkpoint(save);
    if let Err(e) = store.save(save) {
        tracing::warn!(path = %store.path().display(), error = %e, "could not write save file");
        ui::display_warning(
            err,
            &format!("could not write {}: {}", store.path().display(), e),
        )?;
    }
    Ok(new_high)
}

fn write_final_stats(engine: &Engine, new_high: bool, out: &mut dyn Write) -> io::Result<()> {
    let p = engine.progress();
    let s = &p.stats;
    if new_high {
        writeln!(out, "NEW HIGH SCORE!")?;
    }
    writeln!(out, "=== FINAL STATISTICS ===")?;
    writeln!(out, "Level reached: {}", p.level)?;
    writeln!(out, "Chips: {}", p.chips)?;
    writeln!(out, "Hands played: {}", s.hands_played)?;
    writeln!(out, "Hands won: {}", s.hands_won)?;
    writeln!(out, "Win rate: {:.1}%", s.win_rate())?;
    writeln!(out, "Enemies defeated: {}", s.enemies_defeated)?;
    writeln!(out, "Total chips won: {}", s.total_chips_won)?;
    if let Some(best) = s.best_hand {
        writeln!(out, "Best hand: {}", best.name())?;
    }
    writeln!(out, "Lucky escapes: {}", s.lucky_escapes)?;
    writeln!(out, "Perfect games: {}", s.perfect_games)?;
    Ok(())
}
