use crate::analysis::team::{TeamAssignment, TeamSide};
use crate::data::models::{FrameDto, TimelineDto};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamSnapshot {
    pub gold: i64,
    pub xp: i64,
    pub cs: i64,
}

/// Both teams at one elapsed minute, from the target player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotPair {
    pub frame_index: usize,
    pub mine: TeamSnapshot,
    pub theirs: TeamSnapshot,
}

impl SnapshotPair {
    pub fn gold_diff(&self) -> i64 {
        self.mine.gold - self.theirs.gold
    }

    pub fn xp_diff(&self) -> i64 {
        self.mine.xp - self.theirs.xp
    }

    pub fn cs_diff(&self) -> i64 {
        self.mine.cs - self.theirs.cs
    }
}

/// Frame for `minute`, or the last frame when the game ended earlier.
/// `None` only for a timeline with no frames.
pub fn frame_at_minute(timeline: &TimelineDto, minute: u32) -> Option<(usize, &FrameDto)> {
    let frames = &timeline.info.frames;
    let last = frames.len().checked_sub(1)?;
    let index = (minute as usize).min(last);
    if index < minute as usize {
        log::debug!(
            "Timeline has {} frames, using frame {} for minute {}",
            frames.len(),
            index,
            minute
        );
    }
    Some((index, &frames[index]))
}

pub fn team_snapshots(
    timeline: &TimelineDto,
    minute: u32,
    teams: &TeamAssignment,
    my_side: TeamSide,
) -> Option<SnapshotPair> {
    let (frame_index, frame) = frame_at_minute(timeline, minute)?;

    let mut mine = TeamSnapshot::default();
    let mut theirs = TeamSnapshot::default();

    for (pid, pf) in &frame.participant_frames {
        let side = match pid.parse::<u32>().ok().and_then(|pid| teams.side_of(pid)) {
            Some(side) => side,
            None => continue,
        };

        let totals = if side == my_side { &mut mine } else { &mut theirs };
        totals.gold += pf.total_gold;
        totals.xp += pf.xp;
        totals.cs += pf.cs();
    }

    Some(SnapshotPair {
        frame_index,
        mine,
        theirs,
    })
}
