use crate::analysis::bucket::BucketClassifier;
use crate::analysis::expectation::{Expectation, ExpectationModel};
use crate::analysis::features::{FeatureRow, FeatureRowBuilder};
use crate::analysis::impact::{ImpactRow, ImpactScorer};
use crate::analysis::player_table::{build_player_table, PlayerGame};
use crate::analysis::scoring::{score_games, ScoredRow};
use crate::config::AnalysisConfig;
use crate::data::models::MatchDto;
use crate::data::store::RecordSource;
use crate::error::AppError;

/// Every table one run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub players: Vec<PlayerGame>,
    pub impact: Vec<ImpactRow>,
    pub features: Vec<FeatureRow>,
    pub expectation: Expectation,
    pub scored: Vec<ScoredRow>,
}

pub struct Pipeline<'a, S: RecordSource> {
    source: &'a S,
    config: &'a AnalysisConfig,
}

impl<'a, S: RecordSource> Pipeline<'a, S> {
    pub fn new(source: &'a S, config: &'a AnalysisConfig) -> Self {
        Pipeline { source, config }
    }

    /// All readable match records, paired with the id they are stored under.
    /// An absent match directory is fatal; a single unreadable record is skipped.
    pub fn load_matches(&self) -> Result<Vec<(String, MatchDto)>, AppError> {
        let ids = self.source.match_ids()?;
        let mut matches = Vec::with_capacity(ids.len());

        for id in &ids {
            match self.source.match_record(id) {
                Ok(record) => {
                    if record.metadata.match_id != *id {
                        log::debug!(
                            "Match {} records its id as {}; using {}",
                            id,
                            record.metadata.match_id,
                            id
                        );
                    }
                    matches.push((id.clone(), record));
                }
                Err(e) if e.is_skippable() => log::warn!("Skipping match {}: {}", id, e),
                Err(e) => return Err(e),
            }
        }

        log::info!("Loaded {} of {} match records", matches.len(), ids.len());
        Ok(matches)
    }

    pub fn players(&self) -> Result<Vec<PlayerGame>, AppError> {
        Ok(build_player_table(&self.load_matches()?))
    }

    /// Impact rows for `puuid`. Standardization and ranking use every player
    /// in the table, not just the target.
    pub fn impact(&self, players: &[PlayerGame], puuid: &str) -> Vec<ImpactRow> {
        ImpactScorer::new(self.config.weights)
            .score(players)
            .into_iter()
            .filter(|row| row.puuid == puuid)
            .collect()
    }

    /// Feature rows for every match the target played in. `progress` is called
    /// once per match id.
    pub fn features<F>(&self, puuid: &str, mut progress: F) -> Result<Vec<FeatureRow>, AppError>
    where
        F: FnMut(&str),
    {
        let ids = self.source.match_ids()?;
        let builder = FeatureRowBuilder::new(self.source, self.config.cutoff_minute);

        let rows = builder.build_all(ids.iter().inspect(|id| progress(id.as_str())), puuid);

        log::info!("Built {} feature rows from {} matches", rows.len(), ids.len());
        Ok(rows)
    }

    pub fn expectation(&self, features: &[FeatureRow]) -> Expectation {
        ExpectationModel::new(self.config.model).estimate(features)
    }

    pub fn score(&self, impact: &[ImpactRow], expectation: &Expectation) -> Vec<ScoredRow> {
        score_games(
            impact,
            &expectation.rows,
            &BucketClassifier::new(self.config.thresholds),
        )
    }

    pub fn run(&self, puuid: &str) -> Result<PipelineOutput, AppError> {
        let players = self.players()?;
        let impact = self.impact(&players, puuid);
        let features = self.features(puuid, |_| {})?;
        let expectation = self.expectation(&features);
        let scored = self.score(&impact, &expectation);

        Ok(PipelineOutput {
            players,
            impact,
            features,
            expectation,
            scored,
        })
    }
}
