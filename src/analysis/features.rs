use crate::analysis::events::kills_diff;
use crate::analysis::snapshot::team_snapshots;
use crate::analysis::team;
use crate::data::store::RecordSource;
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Early-game differentials for one match, target player's team minus the
/// opponent, plus the actual result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub match_id: String,
    pub win: bool,
    pub gold_diff_10: i64,
    pub xp_diff_10: i64,
    pub cs_diff_10: i64,
    pub kills_diff_10: i64,
}

impl FeatureRow {
    pub fn predictors(&self) -> [f64; 4] {
        [
            self.gold_diff_10 as f64,
            self.xp_diff_10 as f64,
            self.cs_diff_10 as f64,
            self.kills_diff_10 as f64,
        ]
    }
}

pub struct FeatureRowBuilder<'a, S: RecordSource> {
    source: &'a S,
    cutoff_minute: u32,
}

impl<'a, S: RecordSource> FeatureRowBuilder<'a, S> {
    pub fn new(source: &'a S, cutoff_minute: u32) -> Self {
        FeatureRowBuilder {
            source,
            cutoff_minute,
        }
    }

    fn cutoff_ms(&self) -> i64 {
        i64::from(self.cutoff_minute) * 60 * 1000
    }

    /// Builds the row for one match, or explains why it cannot be built.
    pub fn try_build(&self, match_id: &str, puuid: &str) -> Result<FeatureRow, AppError> {
        let record = self.source.match_record(match_id)?;
        let timeline = self.source.timeline(match_id)?;

        let (teams, my_side) = team::resolve(&record, puuid)?;
        let win = record
            .info
            .participants
            .iter()
            .find(|p| p.puuid == puuid)
            .map(|p| p.win)
            .ok_or_else(|| AppError::MissingParticipant {
                match_id: match_id.to_string(),
                puuid: puuid.to_string(),
            })?;

        let snapshots = team_snapshots(&timeline, self.cutoff_minute, &teams, my_side)
            .ok_or_else(|| {
                AppError::MissingUpstreamFile(format!("timeline {} has no frames", match_id))
            })?;

        Ok(FeatureRow {
            match_id: match_id.to_string(),
            win,
            gold_diff_10: snapshots.gold_diff(),
            xp_diff_10: snapshots.xp_diff(),
            cs_diff_10: snapshots.cs_diff(),
            kills_diff_10: kills_diff(timeline.events(), self.cutoff_ms(), &teams, my_side),
        })
    }

    /// `None` when the match has to be skipped; the reason is logged.
    pub fn build(&self, match_id: &str, puuid: &str) -> Option<FeatureRow> {
        match self.try_build(match_id, puuid) {
            Ok(row) => Some(row),
            Err(e) => {
                log::warn!("Skipping match {}: {}", match_id, e);
                None
            }
        }
    }

    /// One row per match that has both records and contains the player, in
    /// `match_ids` order.
    pub fn build_all<I, T>(&self, match_ids: I, puuid: &str) -> Vec<FeatureRow>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        match_ids
            .into_iter()
            .filter_map(|id| self.build(id.as_ref(), puuid))
            .collect()
    }
}
