use crate::analysis::bucket::{Bucket, BucketClassifier};
use crate::analysis::expectation::ExpectedRow;
use crate::analysis::impact::ImpactRow;
use crate::analysis::player_table::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Impact row joined with the match's expected win probability and bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow {
    pub match_id: String,
    pub queue_id: i64,
    pub game_duration_sec: i64,
    pub game_minutes: f64,
    pub puuid: String,
    pub summoner_name: String,
    pub participant_id: u32,
    pub team_id: u32,
    pub win: bool,
    pub champion_name: String,
    pub role: Role,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub cs: u32,
    pub gold_earned: u32,
    pub damage_to_champions: u32,
    pub vision_score: u32,
    pub kda: f64,
    pub cs_per_min: f64,
    pub kill_participation: f64,
    pub damage_share: f64,
    pub gold_share: f64,
    pub vision_per_min: f64,
    pub z_damage_share: f64,
    pub z_kill_participation: f64,
    pub z_cs_per_min: f64,
    pub z_vision_per_min: f64,
    pub impact_score: f64,
    pub impact_rank_on_team: u32,
    pub damage_share_rank_on_team: u32,
    pub kp_rank_on_team: u32,
    pub gold_share_rank_on_team: u32,
    pub p_win_10min: f64,
    pub bucket: Bucket,
}

impl ScoredRow {
    pub fn new(row: &ImpactRow, p_win: f64, bucket: Bucket) -> Self {
        ScoredRow {
            match_id: row.match_id.clone(),
            queue_id: row.queue_id,
            game_duration_sec: row.game_duration_sec,
            game_minutes: row.game_minutes,
            puuid: row.puuid.clone(),
            summoner_name: row.summoner_name.clone(),
            participant_id: row.participant_id,
            team_id: row.team_id,
            win: row.win,
            champion_name: row.champion_name.clone(),
            role: row.role,
            kills: row.kills,
            deaths: row.deaths,
            assists: row.assists,
            cs: row.cs,
            gold_earned: row.gold_earned,
            damage_to_champions: row.damage_to_champions,
            vision_score: row.vision_score,
            kda: row.kda,
            cs_per_min: row.cs_per_min,
            kill_participation: row.kill_participation,
            damage_share: row.damage_share,
            gold_share: row.gold_share,
            vision_per_min: row.vision_per_min,
            z_damage_share: row.z_damage_share,
            z_kill_participation: row.z_kill_participation,
            z_cs_per_min: row.z_cs_per_min,
            z_vision_per_min: row.z_vision_per_min,
            impact_score: row.impact_score,
            impact_rank_on_team: row.impact_rank_on_team,
            damage_share_rank_on_team: row.damage_share_rank_on_team,
            kp_rank_on_team: row.kp_rank_on_team,
            gold_share_rank_on_team: row.gold_share_rank_on_team,
            p_win_10min: p_win,
            bucket,
        }
    }
}

/// Inner join on match id, in `impact` order. Games without a probability
/// are dropped.
pub fn score_games(
    impact: &[ImpactRow],
    expected: &[ExpectedRow],
    classifier: &BucketClassifier,
) -> Vec<ScoredRow> {
    let p_by_match: HashMap<&str, f64> = expected
        .iter()
        .map(|e| (e.match_id.as_str(), e.p_win_10min))
        .collect();

    impact
        .iter()
        .filter_map(|row| {
            let p_win = *p_by_match.get(row.match_id.as_str())?;
            let bucket = classifier.bucket(p_win, row.win, row.impact_score);
            Some(ScoredRow::new(row, p_win, bucket))
        })
        .collect()
}

/// Optional constraints on a set of scored games; `None` matches anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
    pub role: Option<Role>,
    pub champion: Option<String>,
    pub bucket: Option<Bucket>,
    pub win: Option<bool>,
}

impl GameFilter {
    pub fn is_empty(&self) -> bool {
        *self == GameFilter::default()
    }

    pub fn matches(&self, row: &ScoredRow) -> bool {
        self.role.map_or(true, |role| row.role == role)
            && self
                .champion
                .as_deref()
                .map_or(true, |c| row.champion_name.eq_ignore_ascii_case(c))
            && self.bucket.map_or(true, |b| row.bucket == b)
            && self.win.map_or(true, |w| row.win == w)
    }

    pub fn apply<'a>(&self, rows: &'a [ScoredRow]) -> Vec<&'a ScoredRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}
