//! Stats command: shows the persisted high-score record.

use crate::config::{self, Overrides};
use crate::error::CliError;
use crate::ui;
use roguepoker_engine::persistence::{JsonFileStore, SaveData, SaveStore};
use std::io::Write;

/// Prints the high score and the best run. An unreadable save file is
/// reported as a warning and shown as an empty record.
pub fn handle_stats_command(
    save: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::resolve(&Overrides {
        save_path: save,
        ..Overrides::default()
    })?;
    let store = JsonFileStore::new(&resolved.config.save_path);
    let data = load_or_default(&store, err)?;
    write_record(&data, out)?;
    Ok(())
}

/// Loads the record, degrading to defaults with a warning when unreadable.
pub(crate) fn load_or_default(
    store: &JsonFileStore,
    err: &mut dyn Write,
) -> Result<SaveData, CliError> {
    match store.load() {
        Ok(data) => Ok(data),
        Err(e) => {
            tracing::warn!(path = %store.path().display(), error = %e, "save file unreadable");
            ui::display_warning(
                err,
                &format!("ignoring save file {}: {}", store.path().display(), e),
            )?;
            Ok(SaveData::default())
        }
    }
}

pub(crate) fn write_record(data: &SaveData, out: &mut dyn Write) -> std::io::Result<()> {
    if data.high_score == 0 {
        return writeln!(out, "No runs recorded yet.");
    }
    writeln!(out, "High score: Level {}", data.high_score)?;
    if let Some(best) = &data.best_run_stats {
        writeln!(out, "Best run:")?;
        writeln!(out, "  Level reached: {}", best.level)?;
        writeln!(out, "  Chips: {}", best.chips)?;
        writeln!(out, "  Hands won: {}", best.hands_won)?;
        writeln!(out, "  Win rate: {:.1}%", best.win_rate)?;
        writeln!(out, "  Recorded: {}", best.timestamp)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roguepoker_engine::persistence::RunStats;
    use serial_test::serial;

    fn run(path: &std::path::Path) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_stats_command(Some(path.to_string_lossy().into_owned()), &mut out, &mut err)
            .unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    #[serial]
    fn test_stats_missing_file_is_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        let (out, err) = run(&dir.path().join("none.json"));
        assert_eq!(out, "No runs recorded yet.\n");
        assert!(err.is_empty());
    }

    #[test]
    #[serial]
    fn test_stats_shows_best_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        let data = SaveData {
            high_score: 6,
            best_run_stats: Some(RunStats {
                level: 6,
                chips: 240,
                hands_won: 31,
                win_rate: 55.357,
                timestamp: "2025-01-01T00:00:00Z".into(),
            }),
        };
        JsonFileStore::new(&path).save(&data).unwrap();
        let (out, _) = run(&path);
        assert!(out.contains("High score: Level 6"));
        assert!(out.contains("Win rate: 55.4%"));
    }

    #[test]
    #[serial]
    fn test_stats_corrupt_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        std::fs::write(&path, "{ not json").unwrap();
        let (out, err) = run(&path);
        assert_eq!(out, "No runs recorded yet.\n");
        assert!(err.starts_with("WARNING: ignoring save file"));
    }
}
