use crate::data::models::MatchDto;
use crate::error::AppError;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamSide {
    Blue,
    Red,
}

impl TeamSide {
    pub fn from_team_id(team_id: u32) -> Option<TeamSide> {
        match team_id {
            100 => Some(TeamSide::Blue),
            200 => Some(TeamSide::Red),
            _ => None,
        }
    }
}

/// participant id -> side, for one match.
#[derive(Debug, Clone, Default)]
pub struct TeamAssignment {
    sides: HashMap<u32, TeamSide>,
}

impl TeamAssignment {
    pub fn from_match(record: &MatchDto) -> Self {
        let sides = record
            .info
            .participants
            .iter()
            .filter_map(|p| TeamSide::from_team_id(p.team_id).map(|side| (p.participant_id, side)))
            .collect();

        TeamAssignment { sides }
    }

    pub fn side_of(&self, participant_id: u32) -> Option<TeamSide> {
        self.sides.get(&participant_id).copied()
    }

    pub fn len(&self) -> usize {
        self.sides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }
}

/// Builds the team mapping and locates `puuid`'s side.
pub fn resolve(record: &MatchDto, puuid: &str) -> Result<(TeamAssignment, TeamSide), AppError> {
    let missing = || AppError::MissingParticipant {
        match_id: record.metadata.match_id.clone(),
        puuid: puuid.to_string(),
    };

    let me = record
        .info
        .participants
        .iter()
        .find(|p| p.puuid == puuid)
        .ok_or_else(missing)?;
    let side = TeamSide::from_team_id(me.team_id).ok_or_else(missing)?;

    Ok((TeamAssignment::from_match(record), side))
}
