use crate::analysis::bucket::Bucket;
use crate::analysis::scoring::ScoredRow;
use std::cmp::Ordering;
use std::collections::HashMap;

fn mean(rows: &[&ScoredRow], metric: fn(&ScoredRow) -> f64) -> f64 {
    rows.iter().map(|r| metric(r)).sum::<f64>() / rows.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricMeans {
    pub games: usize,
    pub kda: f64,
    pub cs_per_min: f64,
    pub kill_participation: f64,
    pub damage_share: f64,
    pub vision_per_min: f64,
    pub impact_score: f64,
}

impl MetricMeans {
    pub fn of(rows: &[&ScoredRow]) -> Option<MetricMeans> {
        if rows.is_empty() {
            return None;
        }
        Some(MetricMeans {
            games: rows.len(),
            kda: mean(rows, |r| r.kda),
            cs_per_min: mean(rows, |r| r.cs_per_min),
            kill_participation: mean(rows, |r| r.kill_participation),
            damage_share: mean(rows, |r| r.damage_share),
            vision_per_min: mean(rows, |r| r.vision_per_min),
            impact_score: mean(rows, |r| r.impact_score),
        })
    }
}

/// Average metrics in wins against losses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinLossComparison {
    pub wins: Option<MetricMeans>,
    pub losses: Option<MetricMeans>,
}

pub fn compare_wins_losses(rows: &[&ScoredRow]) -> WinLossComparison {
    let (wins, losses): (Vec<&ScoredRow>, Vec<&ScoredRow>) = rows.iter().copied().partition(|r| r.win);
    WinLossComparison {
        wins: MetricMeans::of(&wins),
        losses: MetricMeans::of(&losses),
    }
}

/// How often a loss came while the player was among the top two of their
/// team, by impact and by damage share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnluckyIndex {
    pub loss_games: usize,
    pub top2_impact_losses: usize,
    pub top2_impact_loss_rate: Option<f64>,
    pub top2_damage_losses: usize,
    pub top2_damage_loss_rate: Option<f64>,
}

pub fn unlucky_index(rows: &[&ScoredRow]) -> UnluckyIndex {
    let losses: Vec<&ScoredRow> = rows.iter().copied().filter(|r| !r.win).collect();
    let top2_impact = losses.iter().filter(|r| r.impact_rank_on_team <= 2).count();
    let top2_damage = losses.iter().filter(|r| r.damage_share_rank_on_team <= 2).count();
    let rate = |count: usize| {
        if losses.is_empty() {
            None
        } else {
            Some(count as f64 / losses.len() as f64)
        }
    };

    UnluckyIndex {
        loss_games: losses.len(),
        top2_impact_losses: top2_impact,
        top2_impact_loss_rate: rate(top2_impact),
        top2_damage_losses: top2_damage,
        top2_damage_loss_rate: rate(top2_damage),
    }
}

fn top_by<'a, P, K>(rows: &[&'a ScoredRow], keep: P, key: K, descending: bool, n: usize) -> Vec<&'a ScoredRow>
where
    P: Fn(&ScoredRow) -> bool,
    K: Fn(&ScoredRow) -> f64,
{
    let mut picked: Vec<&ScoredRow> = rows.iter().copied().filter(|r| keep(*r)).collect();
    picked.sort_by(|a, b| {
        let order = key(*a).partial_cmp(&key(*b)).unwrap_or(Ordering::Equal);
        if descending {
            order.reverse()
        } else {
            order
        }
    });
    picked.truncate(n);
    picked
}

/// Losses with the highest expected win probability.
pub fn most_unlucky_losses<'a>(rows: &[&'a ScoredRow], n: usize) -> Vec<&'a ScoredRow> {
    top_by(rows, |r| !r.win, |r| r.p_win_10min, true, n)
}

/// Wins with the lowest expected win probability.
pub fn most_clutch_wins<'a>(rows: &[&'a ScoredRow], n: usize) -> Vec<&'a ScoredRow> {
    top_by(rows, |r| r.win, |r| r.p_win_10min, false, n)
}

pub fn highest_impact_losses<'a>(rows: &[&'a ScoredRow], n: usize) -> Vec<&'a ScoredRow> {
    top_by(rows, |r| !r.win, |r| r.impact_score, true, n)
}

pub fn lowest_impact_losses<'a>(rows: &[&'a ScoredRow], n: usize) -> Vec<&'a ScoredRow> {
    top_by(rows, |r| !r.win, |r| r.impact_score, false, n)
}

/// Games per bucket, most common first; ties by label.
pub fn bucket_counts(rows: &[&ScoredRow]) -> Vec<(Bucket, usize)> {
    let mut counts: HashMap<Bucket, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.bucket).or_insert(0) += 1;
    }

    let mut counts: Vec<(Bucket, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.label().cmp(b.0.label())));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;
    use crate::analysis::impact::ImpactRow;
    use crate::analysis::player_table::Role;

    fn row(match_id: &str, win: bool, p: f64, impact: f64, rank: u32, bucket: Bucket) -> ScoredRow {
        let mut player = fixtures::player_game(match_id);
        player.win = win;
        player.role = Role::Middle;
        player.kda = if win { 4.0 } else { 2.0 };
        let impact_row = ImpactRow {
            impact_score: impact,
            impact_rank_on_team: rank,
            damage_share_rank_on_team: 6 - rank,
            kp_rank_on_team: rank,
            ..ImpactRow::unscored(&player)
        };
        ScoredRow::new(&impact_row, p, bucket)
    }

    fn games() -> Vec<ScoredRow> {
        vec![
            row("A", false, 0.80, 0.9, 1, Bucket::UnluckyLoss),
            row("B", false, 0.30, -0.8, 5, Bucket::ExpectedLoss),
            row("C", true, 0.20, 0.7, 1, Bucket::ClutchWin),
            row("D", true, 0.90, 0.1, 3, Bucket::ExpectedWin),
            row("E", false, 0.70, 0.2, 2, Bucket::UpsetLoss),
            row("F", true, 0.85, -0.2, 4, Bucket::ExpectedWin),
        ]
    }

    #[test]
    fn compares_wins_and_losses() {
        let games = games();
        let refs: Vec<&ScoredRow> = games.iter().collect();
        let cmp = compare_wins_losses(&refs);

        let wins = cmp.wins.unwrap();
        let losses = cmp.losses.unwrap();
        assert_eq!(wins.games, 3);
        assert_eq!(wins.kda, 4.0);
        assert_eq!(losses.kda, 2.0);
        assert!((losses.impact_score - 0.1).abs() < 1e-12);

        assert_eq!(compare_wins_losses(&[]).wins, None);
    }

    #[test]
    fn unlucky_index_counts_top_two_losses() {
        let games = games();
        let refs: Vec<&ScoredRow> = games.iter().collect();
        let index = unlucky_index(&refs);

        assert_eq!(index.loss_games, 3);
        assert_eq!(index.top2_impact_losses, 2);
        assert_eq!(index.top2_damage_losses, 1);
        assert!((index.top2_impact_loss_rate.unwrap() - 2.0 / 3.0).abs() < 1e-12);

        let wins_only: Vec<&ScoredRow> = refs.iter().copied().filter(|r| r.win).collect();
        assert_eq!(unlucky_index(&wins_only).top2_impact_loss_rate, None);
    }

    #[test]
    fn notable_games_are_sorted() {
        let games = games();
        let refs: Vec<&ScoredRow> = games.iter().collect();

        let unlucky: Vec<&str> = most_unlucky_losses(&refs, 2).into_iter().map(|r| r.match_id.as_str()).collect();
        assert_eq!(unlucky, vec!["A", "E"]);

        let clutch: Vec<&str> = most_clutch_wins(&refs, 10).into_iter().map(|r| r.match_id.as_str()).collect();
        assert_eq!(clutch, vec!["C", "F", "D"]);

        assert_eq!(highest_impact_losses(&refs, 1)[0].match_id, "A");
        assert_eq!(lowest_impact_losses(&refs, 1)[0].match_id, "B");
    }

    #[test]
    fn bucket_counts_most_common_first() {
        let games = games();
        let refs: Vec<&ScoredRow> = games.iter().collect();
        let counts = bucket_counts(&refs);

        assert_eq!(counts[0], (Bucket::ExpectedWin, 2));
        assert_eq!(counts.len(), 5);
        let singles: Vec<Bucket> = counts[1..].iter().map(|(b, _)| *b).collect();
        assert_eq!(
            singles,
            vec![
                Bucket::ClutchWin,
                Bucket::ExpectedLoss,
                Bucket::UnluckyLoss,
                Bucket::UpsetLoss
            ]
        );
    }
}
