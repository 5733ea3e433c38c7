//! Synthetic records shared by the analysis unit tests.

use crate::analysis::player_table::{build_player_table, PlayerGame};
use crate::data::models::{
    EventDto, FrameDto, MatchDto, MatchInfo, MatchMetadata, ParticipantDto, ParticipantFrameDto,
    TimelineDto, TimelineInfo, CHAMPION_KILL,
};

pub const ROLES: [&str; 5] = ["TOP", "JUNGLE", "MIDDLE", "BOTTOM", "UTILITY"];

/// Participants 1-5 on team 100 (the winners), 6-10 on team 200; puuids "p1".."p10".
pub fn participant(id: u32) -> ParticipantDto {
    ParticipantDto {
        participant_id: id,
        puuid: format!("p{}", id),
        summoner_name: format!("Summoner{}", id),
        champion_name: format!("Champ{}", id),
        team_id: if id <= 5 { 100 } else { 200 },
        win: id <= 5,
        team_position: ROLES[((id - 1) % 5) as usize].to_string(),
        kills: 0,
        deaths: 0,
        assists: 0,
        total_minions_killed: 0,
        neutral_minions_killed: 0,
        gold_earned: 0,
        total_damage_dealt_to_champions: 0,
        vision_score: 0,
    }
}

pub fn match_record(match_id: &str) -> MatchDto {
    MatchDto {
        metadata: MatchMetadata {
            match_id: match_id.to_string(),
            participants: (1..=10).map(|i| format!("p{}", i)).collect(),
        },
        info: MatchInfo {
            game_duration: 1800,
            queue_id: 420,
            game_creation: 0,
            participants: (1..=10).map(participant).collect(),
        },
    }
}

/// A match record paired with the id it is stored under.
pub fn stored(match_id: &str) -> (String, MatchDto) {
    (match_id.to_string(), match_record(match_id))
}

/// Participant 1's player-table row for a fresh match.
pub fn player_game(match_id: &str) -> PlayerGame {
    build_player_table(&[stored(match_id)]).remove(0)
}

/// Minute `m`: participant `p` has gold 100*m + p, xp 50*m, m lane and p jungle minions.
pub fn frame(minute: i64) -> FrameDto {
    let participant_frames = (1..=10i64)
        .map(|p| {
            (
                p.to_string(),
                ParticipantFrameDto {
                    total_gold: 100 * minute + p,
                    xp: 50 * minute,
                    minions_killed: minute,
                    jungle_minions_killed: p,
                },
            )
        })
        .collect();

    FrameDto {
        timestamp: minute * 60_000,
        participant_frames,
        events: Vec::new(),
    }
}

pub fn timeline(frame_count: usize) -> TimelineDto {
    TimelineDto {
        info: TimelineInfo {
            frame_interval: 60_000,
            frames: (0..frame_count as i64).map(frame).collect(),
        },
    }
}

pub fn kill(timestamp: i64, killer: Option<u32>, victim: u32) -> EventDto {
    EventDto {
        kind: CHAMPION_KILL.to_string(),
        timestamp,
        killer_id: killer,
        victim_id: Some(victim),
    }
}
