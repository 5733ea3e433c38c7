use crate::analysis::player_table::{PlayerGame, Role};
use crate::analysis::rank::min_rank_desc;
use crate::config::ImpactWeights;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Below this a group's spread counts as zero.
const STD_EPSILON: f64 = 1e-12;

/// Mean and population standard deviation of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStats {
    pub mean: f64,
    pub std: f64,
}

impl GroupStats {
    pub fn from_values(values: &[f64]) -> GroupStats {
        if values.is_empty() {
            return GroupStats { mean: 0.0, std: 0.0 };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        GroupStats {
            mean,
            std: variance.sqrt(),
        }
    }

    /// Standard score of `x`; exactly 0 for a group with no spread
    /// (single member or identical values).
    pub fn z(&self, x: f64) -> f64 {
        if self.std < STD_EPSILON {
            0.0
        } else {
            (x - self.mean) / self.std
        }
    }
}

/// Standardizes each value against the other values of its group.
pub fn zscores_by_group<K>(keys: &[K], values: &[f64]) -> Vec<f64>
where
    K: Eq + Hash,
{
    debug_assert_eq!(keys.len(), values.len());

    let mut members: HashMap<&K, Vec<f64>> = HashMap::new();
    for (key, &value) in keys.iter().zip(values) {
        members.entry(key).or_default().push(value);
    }
    let stats: HashMap<&K, GroupStats> = members
        .iter()
        .map(|(key, vals)| (*key, GroupStats::from_values(vals)))
        .collect();

    keys.iter()
        .zip(values)
        .map(|(key, &value)| stats[key].z(value))
        .collect()
}

/// Impact table row: every player-table column, the role-standardized
/// metrics, the composite score and within-team ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRow {
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
}

impl ImpactRow {
    /// The player's columns with zero standard scores and every rank at 1.
    pub fn unscored(p: &PlayerGame) -> ImpactRow {
        ImpactRow {
            match_id: p.match_id.clone(),
            queue_id: p.queue_id,
            game_duration_sec: p.game_duration_sec,
            game_minutes: p.game_minutes,
            puuid: p.puuid.clone(),
            summoner_name: p.summoner_name.clone(),
            participant_id: p.participant_id,
            team_id: p.team_id,
            win: p.win,
            champion_name: p.champion_name.clone(),
            role: p.role,
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
            cs: p.cs,
            gold_earned: p.gold_earned,
            damage_to_champions: p.damage_to_champions,
            vision_score: p.vision_score,
            kda: p.kda,
            cs_per_min: p.cs_per_min,
            kill_participation: p.kill_participation,
            damage_share: p.damage_share,
            gold_share: p.gold_share,
            vision_per_min: p.vision_per_min,
            z_damage_share: 0.0,
            z_kill_participation: 0.0,
            z_cs_per_min: 0.0,
            z_vision_per_min: 0.0,
            impact_score: 0.0,
            impact_rank_on_team: 1,
            damage_share_rank_on_team: 1,
            kp_rank_on_team: 1,
            gold_share_rank_on_team: 1,
        }
    }
}

fn column(players: &[PlayerGame], metric: fn(&PlayerGame) -> f64) -> Vec<f64> {
    players.iter().map(metric).collect()
}

pub struct ImpactScorer {
    weights: ImpactWeights,
}

impl ImpactScorer {
    pub fn new(weights: ImpactWeights) -> Self {
        ImpactScorer { weights }
    }

    pub fn composite(&self, z_damage: f64, z_kp: f64, z_cs: f64, z_vision: f64) -> f64 {
        let w = &self.weights;
        w.damage_share * z_damage
            + w.kill_participation * z_kp
            + w.cs_per_min * z_cs
            + w.vision_per_min * z_vision
    }

    /// Scores every player-game. Metrics are standardized within role across
    /// the whole table; ranks are within (match, team).
    pub fn score(&self, players: &[PlayerGame]) -> Vec<ImpactRow> {
        let roles: Vec<Role> = players.iter().map(|p| p.role).collect();
        let damage = column(players, |p| p.damage_share);
        let kp = column(players, |p| p.kill_participation);
        let z_damage = zscores_by_group(&roles, &damage);
        let z_kp = zscores_by_group(&roles, &kp);
        let z_cs = zscores_by_group(&roles, &column(players, |p| p.cs_per_min));
        let z_vision = zscores_by_group(&roles, &column(players, |p| p.vision_per_min));

        let impact: Vec<f64> = (0..players.len())
            .map(|i| self.composite(z_damage[i], z_kp[i], z_cs[i], z_vision[i]))
            .collect();

        let teams: Vec<(&str, u32)> = players
            .iter()
            .map(|p| (p.match_id.as_str(), p.team_id))
            .collect();
        let impact_rank = min_rank_desc(&teams, &impact);
        let damage_rank = min_rank_desc(&teams, &damage);
        let kp_rank = min_rank_desc(&teams, &kp);
        let gold_rank = min_rank_desc(&teams, &column(players, |p| p.gold_share));

        players
            .iter()
            .enumerate()
            .map(|(i, p)| ImpactRow {
                z_damage_share: z_damage[i],
                z_kill_participation: z_kp[i],
                z_cs_per_min: z_cs[i],
                z_vision_per_min: z_vision[i],
                impact_score: impact[i],
                impact_rank_on_team: impact_rank[i],
                damage_share_rank_on_team: damage_rank[i],
                kp_rank_on_team: kp_rank[i],
                gold_share_rank_on_team: gold_rank[i],
                ..ImpactRow::unscored(p)
            })
            .collect()
    }
}
