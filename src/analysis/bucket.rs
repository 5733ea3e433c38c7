use crate::config::Thresholds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "THROW")]
    Throw,
    #[serde(rename = "UNLUCKY LOSS")]
    UnluckyLoss,
    #[serde(rename = "UPSET LOSS")]
    UpsetLoss,
    #[serde(rename = "CLUTCH WIN")]
    ClutchWin,
    #[serde(rename = "LUCKY WIN")]
    LuckyWin,
    #[serde(rename = "UPSET WIN")]
    UpsetWin,
    #[serde(rename = "EXPECTED WIN")]
    ExpectedWin,
    #[serde(rename = "EXPECTED LOSS")]
    ExpectedLoss,
    #[serde(rename = "TOSS-UP WIN")]
    TossUpWin,
    #[serde(rename = "TOSS-UP LOSS")]
    TossUpLoss,
}

impl Bucket {
    pub const ALL: [Bucket; 10] = [
        Bucket::Throw,
        Bucket::UnluckyLoss,
        Bucket::UpsetLoss,
        Bucket::ClutchWin,
        Bucket::LuckyWin,
        Bucket::UpsetWin,
        Bucket::ExpectedWin,
        Bucket::ExpectedLoss,
        Bucket::TossUpWin,
        Bucket::TossUpLoss,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Throw => "THROW",
            Bucket::UnluckyLoss => "UNLUCKY LOSS",
            Bucket::UpsetLoss => "UPSET LOSS",
            Bucket::ClutchWin => "CLUTCH WIN",
            Bucket::LuckyWin => "LUCKY WIN",
            Bucket::UpsetWin => "UPSET WIN",
            Bucket::ExpectedWin => "EXPECTED WIN",
            Bucket::ExpectedLoss => "EXPECTED LOSS",
            Bucket::TossUpWin => "TOSS-UP WIN",
            Bucket::TossUpLoss => "TOSS-UP LOSS",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], " ").to_ascii_uppercase();
        Bucket::ALL
            .into_iter()
            .find(|b| b.label().replace('-', " ") == wanted)
            .ok_or_else(|| format!("unknown bucket '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    High,
    Low,
}

/// One row of the decision table. `impact: None` matches any impact.
struct Rule {
    outcome: Outcome,
    expectation: Level,
    impact: Option<Level>,
    bucket: Bucket,
}

const fn rule(outcome: Outcome, expectation: Level, impact: Option<Level>, bucket: Bucket) -> Rule {
    Rule {
        outcome,
        expectation,
        impact,
        bucket,
    }
}

/// Evaluated top to bottom; the first match wins.
const RULES: [Rule; 8] = [
    rule(Outcome::Loss, Level::High, Some(Level::Low), Bucket::Throw),
    rule(Outcome::Loss, Level::High, Some(Level::High), Bucket::UnluckyLoss),
    rule(Outcome::Loss, Level::High, None, Bucket::UpsetLoss),
    rule(Outcome::Win, Level::Low, Some(Level::High), Bucket::ClutchWin),
    rule(Outcome::Win, Level::Low, Some(Level::Low), Bucket::LuckyWin),
    rule(Outcome::Win, Level::Low, None, Bucket::UpsetWin),
    rule(Outcome::Win, Level::High, None, Bucket::ExpectedWin),
    rule(Outcome::Loss, Level::Low, None, Bucket::ExpectedLoss),
];

pub struct BucketClassifier {
    thresholds: Thresholds,
}

impl BucketClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        BucketClassifier { thresholds }
    }

    fn expectation_is(&self, level: Level, p_win: f64) -> bool {
        match level {
            Level::High => p_win >= self.thresholds.high_exp,
            Level::Low => p_win <= self.thresholds.low_exp,
        }
    }

    fn impact_is(&self, level: Level, impact: f64) -> bool {
        match level {
            Level::High => impact >= self.thresholds.high_imp,
            Level::Low => impact <= self.thresholds.low_imp,
        }
    }

    /// Pure function of its inputs: no state carries between games.
    pub fn bucket(&self, p_win: f64, win: bool, impact: f64) -> Bucket {
        let outcome = if win { Outcome::Win } else { Outcome::Loss };

        RULES
            .iter()
            .find(|r| {
                r.outcome == outcome
                    && self.expectation_is(r.expectation, p_win)
                    && r.impact.map_or(true, |level| self.impact_is(level, impact))
            })
            .map(|r| r.bucket)
            .unwrap_or(if win { Bucket::TossUpWin } else { Bucket::TossUpLoss })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> BucketClassifier {
        BucketClassifier::new(Thresholds::default())
    }

    #[test]
    fn documented_examples() {
        let c = classifier();
        assert_eq!(c.bucket(0.80, false, 0.6), Bucket::UnluckyLoss);
        assert_eq!(c.bucket(0.80, false, -0.6), Bucket::Throw);
        assert_eq!(c.bucket(0.20, true, 0.6), Bucket::ClutchWin);
        assert_eq!(c.bucket(0.50, true, 0.0), Bucket::TossUpWin);
        assert_eq!(Bucket::UnluckyLoss.to_string(), "UNLUCKY LOSS");
    }

    #[test]
    fn every_rule_is_reachable() {
        let c = classifier();
        assert_eq!(c.bucket(0.70, false, 0.0), Bucket::UpsetLoss);
        assert_eq!(c.bucket(0.30, true, -0.9), Bucket::LuckyWin);
        assert_eq!(c.bucket(0.30, true, 0.1), Bucket::UpsetWin);
        assert_eq!(c.bucket(0.90, true, -2.0), Bucket::ExpectedWin);
        assert_eq!(c.bucket(0.10, false, 3.0), Bucket::ExpectedLoss);
        assert_eq!(c.bucket(0.55, false, 3.0), Bucket::TossUpLoss);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let c = classifier();
        assert_eq!(c.bucket(0.65, false, -0.5), Bucket::Throw);
        assert_eq!(c.bucket(0.65, false, 0.5), Bucket::UnluckyLoss);
        assert_eq!(c.bucket(0.40, true, 0.5), Bucket::ClutchWin);
        assert_eq!(c.bucket(0.41, true, 0.5), Bucket::TossUpWin);
        assert_eq!(c.bucket(0.64, true, 0.0), Bucket::TossUpWin);
    }

    #[test]
    fn custom_thresholds_change_the_table() {
        let c = BucketClassifier::new(Thresholds {
            low_exp: 0.35,
            ..Thresholds::default()
        });
        assert_eq!(c.bucket(0.38, true, 0.0), Bucket::TossUpWin);
    }

    #[test]
    fn labels_parse_back() {
        for bucket in Bucket::ALL {
            assert_eq!(bucket.label().parse::<Bucket>(), Ok(bucket));
        }
        assert_eq!("toss_up_loss".parse::<Bucket>(), Ok(Bucket::TossUpLoss));
        assert!("CARRIED".parse::<Bucket>().is_err());
    }
}
