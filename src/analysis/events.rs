use crate::analysis::team::{TeamAssignment, TeamSide};
use crate::data::models::{EventDto, CHAMPION_KILL};

/// `my_side` champion kills minus opponent champion kills, for events at or
/// before `cutoff_ms`.
///
/// Kills with no attributable killer (killer id absent or 0, e.g. tower or
/// minion executes) or whose killer has no side count for neither team.
pub fn kills_diff<'a, I>(events: I, cutoff_ms: i64, teams: &TeamAssignment, my_side: TeamSide) -> i64
where
    I: IntoIterator<Item = &'a EventDto>,
{
    let mut my_kills = 0i64;
    let mut enemy_kills = 0i64;

    for event in events {
        if event.kind != CHAMPION_KILL || event.timestamp > cutoff_ms {
            continue;
        }

        let side = match event.killer_id.filter(|&id| id != 0).and_then(|id| teams.side_of(id)) {
            Some(side) => side,
            None => continue,
        };

        if side == my_side {
            my_kills += 1;
        } else {
            enemy_kills += 1;
        }
    }

    my_kills - enemy_kills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;

    fn teams() -> TeamAssignment {
        TeamAssignment::from_match(&fixtures::match_record("NA1_1"))
    }

    #[test]
    fn counts_kills_inside_the_window() {
        let events = vec![
            fixtures::kill(120_000, Some(1), 6),
            fixtures::kill(300_000, Some(2), 7),
            fixtures::kill(450_000, Some(8), 3),
            fixtures::kill(600_000, Some(3), 9),  // exactly at cutoff counts
            fixtures::kill(600_001, Some(4), 10), // after cutoff
        ];

        assert_eq!(kills_diff(&events, 600_000, &teams(), TeamSide::Blue), 2);
        assert_eq!(kills_diff(&events, 600_000, &teams(), TeamSide::Red), -2);
    }

    #[test]
    fn unattributed_kills_are_excluded() {
        let events = vec![
            fixtures::kill(100_000, None, 1),
            fixtures::kill(200_000, Some(0), 2),
            fixtures::kill(250_000, Some(42), 3),
            fixtures::kill(300_000, Some(6), 4),
        ];
        assert_eq!(kills_diff(&events, 600_000, &teams(), TeamSide::Blue), -1);
    }

    #[test]
    fn ignores_other_event_kinds() {
        let mut ward = fixtures::kill(100_000, Some(1), 6);
        ward.kind = "WARD_PLACED".to_string();
        assert_eq!(kills_diff(&[ward], 600_000, &teams(), TeamSide::Blue), 0);
    }
}
