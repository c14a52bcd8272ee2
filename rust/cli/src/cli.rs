//! Command-line surface of the `roguepoker` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "roguepoker",
    version,
    about = "Roguelike heads-up poker: beat ten opponents with one stack"
)]
pub struct RoguePokerCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a run interactively against the opponent ladder
    Play {
        /// easy, normal, hard or nightmare
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// High-score file
        #[arg(long)]
        save: Option<String>,
        /// Append a JSONL record of every hand to this file
        #[arg(long)]
        log: Option<String>,
        /// Opponent policy (adaptive or baseline)
        #[arg(long)]
        ai: Option<String>,
    },
    /// Play a run on autopilot and print a summary
    Sim {
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many hands even if the run is not over
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        hands: Option<u32>,
        #[arg(long)]
        ai: Option<String>,
        #[arg(long)]
        log: Option<String>,
    },
    /// Show the saved high score
    Stats {
        #[arg(long)]
        save: Option<String>,
    },
    /// Deal one hand and show both best hands
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate 5 to 7 cards, e.g. --cards "As Ks Qs Js Ts"
    Eval {
        #[arg(long)]
        cards: String,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}
