use crate::data::models::MatchDto;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Top,
    Jungle,
    Middle,
    Bottom,
    Support,
    Unknown,
}

impl Role {
    /// Riot's `teamPosition`. Support is reported as UTILITY; remakes and
    /// some queues leave it empty.
    pub fn from_position(position: &str) -> Role {
        match position.trim().to_ascii_uppercase().as_str() {
            "TOP" => Role::Top,
            "JUNGLE" => Role::Jungle,
            "MIDDLE" | "MID" => Role::Middle,
            "BOTTOM" | "ADC" => Role::Bottom,
            "UTILITY" | "SUPPORT" => Role::Support,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Middle => "MIDDLE",
            Role::Bottom => "BOTTOM",
            Role::Support => "SUPPORT",
            Role::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Role::from_position(s) {
            Role::Unknown if !s.eq_ignore_ascii_case("UNKNOWN") => {
                Err(format!("unknown role '{}' (TOP/JUNGLE/MIDDLE/BOTTOM/SUPPORT)", s))
            }
            role => Ok(role),
        }
    }
}

/// One player in one match, with ratio metrics that are comparable across
/// games of different length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGame {
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
}

#[derive(Debug, Default, Clone, Copy)]
struct TeamTotals {
    kills: u64,
    gold: u64,
    damage: u64,
    vision: u64,
}

fn per_minute(value: f64, minutes: f64) -> f64 {
    if minutes > 0.0 {
        value / minutes
    } else {
        0.0
    }
}

/// Share of a team total; an empty total counts as 1 so the share stays finite.
fn share(value: f64, total: u64) -> f64 {
    value / total.max(1) as f64
}

/// Ten rows per match, in match then participant order. Each record is paired
/// with the id it is stored under, which every row carries as `match_id`.
pub fn build_player_table(matches: &[(String, MatchDto)]) -> Vec<PlayerGame> {
    let mut rows = Vec::with_capacity(matches.len() * 10);

    for (match_id, record) in matches {
        let mut totals: HashMap<u32, TeamTotals> = HashMap::new();
        for p in &record.info.participants {
            let t = totals.entry(p.team_id).or_default();
            t.kills += u64::from(p.kills);
            t.gold += u64::from(p.gold_earned);
            t.damage += u64::from(p.total_damage_dealt_to_champions);
            t.vision += u64::from(p.vision_score);
        }

        let game_minutes = record.info.game_duration as f64 / 60.0;

        for p in &record.info.participants {
            let team = totals.get(&p.team_id).copied().unwrap_or_default();
            let cs = p.total_minions_killed + p.neutral_minions_killed;

            rows.push(PlayerGame {
                match_id: match_id.clone(),
                queue_id: record.info.queue_id,
                game_duration_sec: record.info.game_duration,
                game_minutes,
                puuid: p.puuid.clone(),
                summoner_name: p.summoner_name.clone(),
                participant_id: p.participant_id,
                team_id: p.team_id,
                win: p.win,
                champion_name: p.champion_name.clone(),
                role: Role::from_position(&p.team_position),
                kills: p.kills,
                deaths: p.deaths,
                assists: p.assists,
                cs,
                gold_earned: p.gold_earned,
                damage_to_champions: p.total_damage_dealt_to_champions,
                vision_score: p.vision_score,
                kda: f64::from(p.kills + p.assists) / f64::from(p.deaths.max(1)),
                cs_per_min: per_minute(f64::from(cs), game_minutes),
                kill_participation: share(f64::from(p.kills + p.assists), team.kills),
                damage_share: share(f64::from(p.total_damage_dealt_to_champions), team.damage),
                gold_share: share(f64::from(p.gold_earned), team.gold),
                vision_per_min: per_minute(f64::from(p.vision_score), game_minutes),
            });
        }
    }

    rows
}
