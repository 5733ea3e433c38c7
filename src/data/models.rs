use serde::Deserialize;
use std::collections::HashMap;

// Match V5 record
#[derive(Debug, Deserialize, Clone)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub game_duration: i64,
    #[serde(default)]
    pub queue_id: i64,
    #[serde(default)]
    pub game_creation: i64,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub participant_id: u32,
    pub puuid: String,
    #[serde(default)]
    pub summoner_name: String,
    #[serde(default)]
    pub champion_name: String,
    pub team_id: u32,
    pub win: bool,
    #[serde(default)]
    pub team_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub total_minions_killed: u32,
    #[serde(default)]
    pub neutral_minions_killed: u32,
    #[serde(default)]
    pub gold_earned: u32,
    #[serde(default)]
    pub total_damage_dealt_to_champions: u32,
    #[serde(default)]
    pub vision_score: u32,
}

// Match V5 timeline record
#[derive(Debug, Deserialize, Clone)]
pub struct TimelineDto {
    pub info: TimelineInfo,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInfo {
    #[serde(default)]
    pub frame_interval: i64,
    pub frames: Vec<FrameDto>,
}

/// One per elapsed minute. Participant values are cumulative.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FrameDto {
    #[serde(default)]
    pub timestamp: i64,
    /// Keyed by participant id as a string ("1".."10").
    #[serde(default)]
    pub participant_frames: HashMap<String, ParticipantFrameDto>,
    #[serde(default)]
    pub events: Vec<EventDto>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantFrameDto {
    #[serde(default)]
    pub total_gold: i64,
    #[serde(default)]
    pub xp: i64,
    #[serde(default)]
    pub minions_killed: i64,
    #[serde(default)]
    pub jungle_minions_killed: i64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: i64,
    #[serde(default)]
    pub killer_id: Option<u32>,
    #[serde(default)]
    pub victim_id: Option<u32>,
}

pub const CHAMPION_KILL: &str = "CHAMPION_KILL";

impl TimelineDto {
    /// Events across all frames, in timeline order.
    pub fn events(&self) -> impl Iterator<Item = &EventDto> {
        self.info.frames.iter().flat_map(|f| f.events.iter())
    }
}

impl ParticipantFrameDto {
    pub fn cs(&self) -> i64 {
        self.minions_killed + self.jungle_minions_killed
    }
}
