//! Command handler modules for the roguepoker CLI.
//!
//! Each command lives in its own file with the same shape:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) and input (`&mut dyn BufRead`) passed in
//! - Errors propagated as `CliError`

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod play;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;

use roguepoker_ai::create_policy;
use roguepoker_engine::engine::Engine;
use roguepoker_engine::logger::HandLogger;

use crate::config::Config;
use crate::error::CliError;

/// Keeps the policy's random stream apart from the deck's.
const POLICY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Builds an engine for a resolved config, attaching a hand log when asked.
/// A missing seed is drawn at random.
pub(crate) fn new_engine(cfg: &Config, log: Option<&str>) -> Result<Engine, CliError> {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let policy = create_policy(&cfg.ai, seed ^ POLICY_SEED_SALT)
        .ok_or_else(|| CliError::Config(format!("unknown ai '{}'", cfg.ai)))?;
    let mut engine = Engine::new(seed, cfg.difficulty, policy);
    if let Some(path) = log {
        let logger = HandLogger::create(path)
            .map_err(|e| CliError::InvalidInput(format!("cannot open log {}: {}", path, e)))?;
        engine.set_logger(logger);
    }
    tracing::debug!(seed, difficulty = %cfg.difficulty, ai = %cfg.ai, "engine ready");
    Ok(engine)
}
