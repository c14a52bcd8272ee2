//! # RoguePoker CLI Library
//!
//! Command-line front end for the roguelike poker engine: an interactive run
//! against a ladder of ten opponents, an autopilot simulator and a few
//! inspection tools.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["roguepoker", "play", "--difficulty", "hard"];
//! let code = roguepoker_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play a run interactively
//! - `sim`: Play a run on autopilot and print a summary
//! - `stats`: Show the saved high score
//! - `deal`: Deal a single hand for inspection
//! - `eval`: Evaluate the best hand among 5 to 7 cards
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, RoguePokerCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_sim_command, handle_stats_command,
};
use config::Overrides;

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "stats", "deal", "eval", "cfg"];

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when input closes mid-run
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["roguepoker", "deal", "--seed", "42"];
/// let code = roguepoker_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match RoguePokerCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "RoguePoker CLI");
            write_or_exit!(err, "Usage: roguepoker <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: roguepoker --help");
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Play {
            difficulty,
            seed,
            save,
            log,
            ai,
        } => {
            let overrides = Overrides {
                seed,
                difficulty,
                save_path: save,
                ai,
            };
            // Real stdin supports both a TTY and piped input
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(overrides, log, out, err, &mut stdin_lock)
        }
        Commands::Sim {
            difficulty,
            seed,
            hands,
            ai,
            log,
        } => {
            let overrides = Overrides {
                seed,
                difficulty,
                ai,
                ..Overrides::default()
            };
            handle_sim_command(overrides, hands.map(u64::from), log, out)
        }
        Commands::Stats { save } => handle_stats_command(save, out, err),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            write_or_exit!(err, "Error: {}", e);
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let (code, out, err) = run_args(&["roguepoker", "--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("Usage"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let (code, out, err) = run_args(&["roguepoker", "shuffle"]);
        assert_eq!(code, 2);
        assert!(out.is_empty());
        for c in COMMANDS {
            assert!(err.contains(&format!("  {}\n", c)), "missing {}", c);
        }
    }

    #[test]
    fn test_deal_dispatch() {
        let (code, out, _) = run_args(&["roguepoker", "deal", "--seed", "7"]);
        assert_eq!(code, 0);
        assert!(out.starts_with("Seed: 7"));
    }

    #[test]
    fn test_eval_error_exit_code() {
        let (code, _, err) = run_args(&["roguepoker", "eval", "--cards", "As As Ks Qs Js"]);
        assert_eq!(code, 2);
        assert!(err.starts_with("Error: Invalid input:"), "{}", err);
    }
}
