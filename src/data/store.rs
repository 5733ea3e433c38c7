use crate::data::models::{MatchDto, TimelineDto};
use crate::error::AppError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the pipeline gets its raw records from.
///
/// Implementations either return a complete record or
/// `AppError::MissingUpstreamFile`; a record that fails to parse counts as
/// missing.
pub trait RecordSource {
    fn match_ids(&self) -> Result<Vec<String>, AppError>;
    fn match_record(&self, match_id: &str) -> Result<MatchDto, AppError>;
    fn timeline(&self, match_id: &str) -> Result<TimelineDto, AppError>;
}

/// Raw records on disk: `<root>/raw/<id>.json` and `<root>/timeline_raw/<id>.json`.
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataStore { root: root.into() }
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    pub fn timeline_dir(&self) -> PathBuf {
        self.root.join("timeline_raw")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("processed")
    }

    pub fn processed_path(&self, file: &str) -> PathBuf {
        self.processed_dir().join(file)
    }

    fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
        let content = fs::read_to_string(path)
            .map_err(|_| AppError::MissingUpstreamFile(path.display().to_string()))?;

        serde_json::from_str(&content).map_err(|e| {
            log::debug!("Failed to parse {}: {}", path.display(), e);
            AppError::MissingUpstreamFile(format!("{} (unreadable record)", path.display()))
        })
    }
}

impl RecordSource for DataStore {
    fn match_ids(&self) -> Result<Vec<String>, AppError> {
        let dir = self.raw_dir();
        let entries = fs::read_dir(&dir)
            .map_err(|_| AppError::MissingUpstreamFile(dir.display().to_string()))?;

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();

        ids.sort();
        Ok(ids)
    }

    fn match_record(&self, match_id: &str) -> Result<MatchDto, AppError> {
        Self::load_json(&self.raw_dir().join(format!("{}.json", match_id)))
    }

    fn timeline(&self, match_id: &str) -> Result<TimelineDto, AppError> {
        Self::load_json(&self.timeline_dir().join(format!("{}.json", match_id)))
    }
}

/// In-memory records, keyed by match id.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub matches: HashMap<String, MatchDto>,
    pub timelines: HashMap<String, TimelineDto>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_match(&mut self, record: MatchDto) {
        self.matches.insert(record.metadata.match_id.clone(), record);
    }

    pub fn insert_timeline(&mut self, match_id: &str, timeline: TimelineDto) {
        self.timelines.insert(match_id.to_string(), timeline);
    }
}

impl RecordSource for MemoryStore {
    fn match_ids(&self) -> Result<Vec<String>, AppError> {
        let mut ids: Vec<String> = self.matches.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn match_record(&self, match_id: &str) -> Result<MatchDto, AppError> {
        self.matches
            .get(match_id)
            .cloned()
            .ok_or_else(|| AppError::MissingUpstreamFile(format!("match {}", match_id)))
    }

    fn timeline(&self, match_id: &str) -> Result<TimelineDto, AppError> {
        self.timelines
            .get(match_id)
            .cloned()
            .ok_or_else(|| AppError::MissingUpstreamFile(format!("timeline {}", match_id)))
    }
}
