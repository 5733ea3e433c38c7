use crate::config::Thresholds;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuckLabel {
    ClearlyLucky,
    ClearlyUnlucky,
    KindaLucky,
    KindaUnlucky,
    AsExpected,
}

impl LuckLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            LuckLabel::ClearlyLucky => "clearly lucky",
            LuckLabel::ClearlyUnlucky => "clearly unlucky",
            LuckLabel::KindaLucky => "kinda lucky",
            LuckLabel::KindaUnlucky => "kinda unlucky",
            LuckLabel::AsExpected => "about as expected",
        }
    }
}

impl fmt::Display for LuckLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actual against expected wins over a set of games.
///
/// The label cut points are absolute win counts, so the same gap means more
/// over ten games than over two hundred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuckSummary {
    pub games: usize,
    pub actual_wins: usize,
    pub expected_wins: f64,
    pub luck_diff: f64,
}

impl LuckSummary {
    /// `games` yields `(win, p_win)` per game.
    pub fn from_games<I>(games: I) -> LuckSummary
    where
        I: IntoIterator<Item = (bool, f64)>,
    {
        let mut summary = LuckSummary {
            games: 0,
            actual_wins: 0,
            expected_wins: 0.0,
            luck_diff: 0.0,
        };

        for (win, p_win) in games {
            summary.games += 1;
            if win {
                summary.actual_wins += 1;
            }
            summary.expected_wins += p_win;
        }
        summary.luck_diff = summary.actual_wins as f64 - summary.expected_wins;
        summary
    }

    pub fn label(&self, thresholds: &Thresholds) -> LuckLabel {
        let d = self.luck_diff;
        if d >= thresholds.clear_luck {
            LuckLabel::ClearlyLucky
        } else if d <= -thresholds.clear_luck {
            LuckLabel::ClearlyUnlucky
        } else if d >= thresholds.mild_luck {
            LuckLabel::KindaLucky
        } else if d <= -thresholds.mild_luck {
            LuckLabel::KindaUnlucky
        } else {
            LuckLabel::AsExpected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with_diff(luck_diff: f64) -> LuckSummary {
        LuckSummary {
            games: 20,
            actual_wins: 10,
            expected_wins: 10.0 - luck_diff,
            luck_diff,
        }
    }

    #[test]
    fn coin_flips_with_three_wins() {
        let summary = LuckSummary::from_games([(true, 0.5), (true, 0.5), (false, 0.5), (true, 0.5)]);
        assert_eq!(summary.games, 4);
        assert_eq!(summary.actual_wins, 3);
        assert_eq!(summary.expected_wins, 2.0);
        assert_eq!(summary.luck_diff, 1.0);
        assert_eq!(summary.label(&Thresholds::default()), LuckLabel::AsExpected);
        assert_eq!(LuckLabel::AsExpected.to_string(), "about as expected");
    }

    #[test]
    fn labels_follow_the_cut_points() {
        let t = Thresholds::default();
        assert_eq!(summary_with_diff(5.0).label(&t), LuckLabel::ClearlyLucky);
        assert_eq!(summary_with_diff(-5.0).label(&t), LuckLabel::ClearlyUnlucky);
        assert_eq!(summary_with_diff(2.5).label(&t), LuckLabel::KindaLucky);
        assert_eq!(summary_with_diff(-4.9).label(&t), LuckLabel::KindaUnlucky);
        assert_eq!(summary_with_diff(-2.4).label(&t), LuckLabel::AsExpected);
    }

    #[test]
    fn empty_set_is_as_expected() {
        let summary = LuckSummary::from_games(std::iter::empty());
        assert_eq!(summary.games, 0);
        assert_eq!(summary.luck_diff, 0.0);
        assert_eq!(summary.label(&Thresholds::default()), LuckLabel::AsExpected);
    }
}
