use crate::analysis::bucket::Bucket;
use crate::analysis::luck::{LuckLabel, LuckSummary};
use crate::analysis::report::{MetricMeans, UnluckyIndex, WinLossComparison};
use crate::analysis::scoring::ScoredRow;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct GameRow {
    #[tabled(rename = "match")]
    match_id: String,
    champion: String,
    role: String,
    result: String,
    p_win: String,
    impact: String,
    #[tabled(rename = "rank")]
    impact_rank: String,
    bucket: String,
}

#[derive(Tabled)]
struct BucketRow {
    bucket: String,
    games: String,
}

#[derive(Tabled)]
struct MetricRow {
    result: String,
    games: String,
    kda: String,
    cs_per_min: String,
    kp: String,
    damage_share: String,
    vision_per_min: String,
    impact: String,
}

fn heading(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
}

fn result_text(win: bool) -> String {
    if win {
        "WIN".green().to_string()
    } else {
        "LOSS".red().to_string()
    }
}

fn colored_label(label: LuckLabel) -> ColoredString {
    match label {
        LuckLabel::ClearlyLucky | LuckLabel::KindaLucky => label.as_str().green().bold(),
        LuckLabel::ClearlyUnlucky | LuckLabel::KindaUnlucky => label.as_str().red().bold(),
        LuckLabel::AsExpected => label.as_str().yellow().bold(),
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message.yellow());
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_luck(title: &str, summary: &LuckSummary, label: LuckLabel) {
    heading(title);

    if summary.games == 0 {
        println!("{}", "No games in this selection".yellow());
        return;
    }

    println!(
        "{} {:+.2}  ({})",
        "🎲 Luck diff:".bold(),
        summary.luck_diff,
        colored_label(label)
    );
    println!(
        "   Actual wins {} vs expected {:.2} over {} games",
        summary.actual_wins.to_string().bold(),
        summary.expected_wins,
        summary.games
    );
    println!(
        "{}",
        "   Luck diff = actual wins - sum of p_win at the cutoff. Cut points are absolute counts, so small samples rarely leave \"about as expected\".".dimmed()
    );
}

fn metric_row(result: &str, means: Option<MetricMeans>) -> MetricRow {
    match means {
        Some(m) => MetricRow {
            result: result.to_string(),
            games: m.games.to_string(),
            kda: format!("{:.2}", m.kda),
            cs_per_min: format!("{:.2}", m.cs_per_min),
            kp: format!("{:.1}%", m.kill_participation * 100.0),
            damage_share: format!("{:.1}%", m.damage_share * 100.0),
            vision_per_min: format!("{:.2}", m.vision_per_min),
            impact: format!("{:+.3}", m.impact_score),
        },
        None => MetricRow {
            result: result.to_string(),
            games: "0".to_string(),
            kda: "-".to_string(),
            cs_per_min: "-".to_string(),
            kp: "-".to_string(),
            damage_share: "-".to_string(),
            vision_per_min: "-".to_string(),
            impact: "-".to_string(),
        },
    }
}

pub fn display_win_loss(comparison: &WinLossComparison) {
    heading("📊 WINS vs LOSSES");

    let rows = vec![
        metric_row("WIN", comparison.wins),
        metric_row("LOSS", comparison.losses),
    ];
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_unlucky_index(index: &UnluckyIndex) {
    heading("🍀 UNLUCKY INDEX");

    let rate = |r: Option<f64>| {
        r.map(|r| format!("{:.1}%", r * 100.0))
            .unwrap_or_else(|| "n/a".to_string())
    };
    println!("• Loss games: {}", index.loss_games);
    println!(
        "• Losses while top-2 impact on team: {} ({})",
        index.top2_impact_losses,
        rate(index.top2_impact_loss_rate)
    );
    println!(
        "• Losses while top-2 damage share on team: {} ({})",
        index.top2_damage_losses,
        rate(index.top2_damage_loss_rate)
    );
}

pub fn display_bucket_counts(counts: &[(Bucket, usize)]) {
    heading("🗂  BUCKET COUNTS");

    if counts.is_empty() {
        println!("{}", "No scored games".yellow());
        return;
    }

    let rows: Vec<BucketRow> = counts
        .iter()
        .map(|(bucket, games)| BucketRow {
            bucket: bucket.to_string(),
            games: games.to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_games(title: &str, games: &[&ScoredRow]) {
    heading(title);

    if games.is_empty() {
        println!("{}", "None".yellow());
        return;
    }

    let rows: Vec<GameRow> = games
        .iter()
        .map(|g| GameRow {
            match_id: g.match_id.clone(),
            champion: g.champion_name.clone(),
            role: g.role.to_string(),
            result: result_text(g.win),
            p_win: format!("{:.1}%", g.p_win_10min * 100.0),
            impact: format!("{:+.2}", g.impact_score),
            impact_rank: format!("#{}", g.impact_rank_on_team),
            bucket: g.bucket.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
