//! Layered session configuration.
//!
//! Values resolve in order: built-in defaults, the TOML file named by
//! `ROGUEPOKER_CONFIG`, `ROGUEPOKER_*` environment variables, then
//! command-line flags. Each value remembers where it came from.

use roguepoker_ai::POLICY_KINDS;
use roguepoker_engine::difficulty::Difficulty;
use serde::{Deserialize, Serialize};

use crate::io_utils::read_text;

pub const CONFIG_ENV: &str = "ROGUEPOKER_CONFIG";
pub const SEED_ENV: &str = "ROGUEPOKER_SEED";
pub const DIFFICULTY_ENV: &str = "ROGUEPOKER_DIFFICULTY";
pub const SAVE_ENV: &str = "ROGUEPOKER_SAVE";
pub const AI_ENV: &str = "ROGUEPOKER_AI";

pub const DEFAULT_SAVE_PATH: &str = "poker_save.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub difficulty: Difficulty,
    pub save_path: String,
    pub ai: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub difficulty: ValueSource,
    pub save_path: ValueSource,
    pub ai: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            difficulty: ValueSource::Default,
            save_path: ValueSource::Default,
            ai: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            difficulty: Difficulty::Normal,
            save_path: DEFAULT_SAVE_PATH.into(),
            ai: "adaptive".into(),
        }
    }
}

/// Values given as command-line flags. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub difficulty: Option<String>,
    pub save_path: Option<String>,
    pub ai: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "cannot read config file: {}", msg),
            ConfigError::Parse(e) => write!(f, "malformed config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(&Overrides::default())
}

/// Resolves every layer, with `overrides` on top.
pub fn resolve(overrides: &Overrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = read_text(&path).map_err(ConfigError::Io)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.difficulty {
            cfg.difficulty = parse_difficulty(&v)?;
            sources.difficulty = ValueSource::File;
        }
        if let Some(v) = f.save_path {
            cfg.save_path = v;
            sources.save_path = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(difficulty) = std::env::var(DIFFICULTY_ENV)
        && !difficulty.is_empty()
    {
        cfg.difficulty = parse_difficulty(&difficulty)?;
        sources.difficulty = ValueSource::Env;
    }
    if let Ok(save) = std::env::var(SAVE_ENV)
        && !save.is_empty()
    {
        cfg.save_path = save;
        sources.save_path = ValueSource::Env;
    }
    if let Ok(ai) = std::env::var(AI_ENV)
        && !ai.is_empty()
    {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }

    if let Some(seed) = overrides.seed {
        cfg.seed = Some(seed);
        sources.seed = ValueSource::Cli;
    }
    if let Some(d) = &overrides.difficulty {
        cfg.difficulty = parse_difficulty(d)?;
        sources.difficulty = ValueSource::Cli;
    }
    if let Some(path) = &overrides.save_path {
        cfg.save_path = path.clone();
        sources.save_path = ValueSource::Cli;
    }
    if let Some(ai) = &overrides.ai {
        cfg.ai = ai.clone();
        sources.ai = ValueSource::Cli;
    }

    cfg.ai = cfg.ai.trim().to_ascii_lowercase();
    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    save_path: Option<String>,
    #[serde(default)]
    ai: Option<String>,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, ConfigError> {
    s.parse::<Difficulty>().map_err(ConfigError::Invalid)
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !POLICY_KINDS.contains(&cfg.ai.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown ai '{}' (expected one of: {})",
            cfg.ai,
            POLICY_KINDS.join(", ")
        )));
    }
    if cfg.save_path.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: save_path must not be empty".into(),
        ));
    }
    Ok(())
}
