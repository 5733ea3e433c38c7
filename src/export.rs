use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const PLAYERS_FILE: &str = "players.csv";
pub const IMPACT_FILE: &str = "my_games_with_impact.csv";
pub const FEATURES_FILE: &str = "early_features_10min.csv";
pub const PROBABILITIES_FILE: &str = "expected_win_probs.csv";
pub const SCORED_FILE: &str = "my_games_scored.csv";

/// Writes `rows` as CSV, one column per struct field, replacing any existing file.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), AppError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::IoError(format!("Failed to create {}: {}", dir.display(), e))
        })?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::CsvError(format!("Failed to open {}: {}", path.display(), e))
    })?;

    for row in rows {
        writer.serialize(row).map_err(|e| {
            AppError::CsvError(format!("Failed to write {}: {}", path.display(), e))
        })?;
    }

    writer.flush().map_err(|e| {
        AppError::IoError(format!("Failed to flush {}: {}", path.display(), e))
    })?;

    log::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Reads a table written by an earlier stage. A missing or unreadable file is
/// a missing upstream input.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    if !path.exists() {
        return Err(AppError::MissingUpstreamFile(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::MissingUpstreamFile(format!("{}: {}", path.display(), e)))?;

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| AppError::MissingUpstreamFile(format!("{} is malformed: {}", path.display(), e)))
}
