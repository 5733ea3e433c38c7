use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing upstream input: {0}")]
    MissingUpstreamFile(String),

    #[error("Player {puuid} not found in match {match_id}")]
    MissingParticipant { match_id: String, puuid: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV error: {0}")]
    CsvError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl AppError {
    /// True for errors that drop one row instead of aborting the batch.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            AppError::MissingUpstreamFile(_) | AppError::MissingParticipant { .. }
        )
    }
}
