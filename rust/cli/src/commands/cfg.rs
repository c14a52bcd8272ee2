//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value:
//!
//! ```json
//! {
//!   "seed": { "value": null, "source": "default" },
//!   "difficulty": { "value": "normal", "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "difficulty": {
            "value": config.difficulty,
            "source": sources.difficulty,
        },
        "save_path": {
            "value": config.save_path,
            "source": sources.save_path,
        },
        "ai": {
            "value": config.ai,
            "source": sources.ai,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cfg_displays_values_and_sources() {
        unsafe {
            std::env::remove_var(config::CONFIG_ENV);
            std::env::remove_var(config::SEED_ENV);
            std::env::remove_var(config::AI_ENV);
            std::env::remove_var(config::SAVE_ENV);
            std::env::set_var(config::DIFFICULTY_ENV, "hard");
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_cfg_command(&mut out, &mut err);
        unsafe {
            std::env::remove_var(config::DIFFICULTY_ENV);
        }
        assert!(result.is_ok());
        assert!(err.is_empty(), "should not write to stderr on success");

        let json: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
        assert_eq!(json["difficulty"]["value"], "hard");
        assert_eq!(json["difficulty"]["source"], "env");
        assert_eq!(json["seed"]["value"], serde_json::Value::Null);
        assert_eq!(json["ai"]["value"], "adaptive");
        assert_eq!(json["save_path"]["source"], "default");
    }

    #[test]
    #[serial]
    fn test_cfg_reports_invalid_config() {
        unsafe {
            std::env::set_var(config::AI_ENV, "oracle");
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_cfg_command(&mut out, &mut err);
        unsafe {
            std::env::remove_var(config::AI_ENV);
        }
        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(String::from_utf8(err).unwrap().contains("oracle"));
        assert!(out.is_empty());
    }
}
