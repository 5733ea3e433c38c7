use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use indicatif::ProgressBar;
use log::LevelFilter;
use std::path::PathBuf;

use luck_detect::analysis::bucket::Bucket;
use luck_detect::analysis::expectation::{Expectation, ExpectedRow};
use luck_detect::analysis::impact::ImpactRow;
use luck_detect::analysis::luck::LuckSummary;
use luck_detect::analysis::player_table::{PlayerGame, Role};
use luck_detect::analysis::report;
use luck_detect::analysis::scoring::{GameFilter, ScoredRow};
use luck_detect::config::Config;
use luck_detect::data::store::{DataStore, RecordSource};
use luck_detect::display::output::{
    display_bucket_counts, display_error, display_games, display_info, display_luck,
    display_success, display_unlucky_index, display_warning, display_win_loss,
};
use luck_detect::export::{
    read_table, write_table, FEATURES_FILE, IMPACT_FILE, PLAYERS_FILE, PROBABILITIES_FILE,
    SCORED_FILE,
};
use luck_detect::pipeline::Pipeline;

#[derive(Parser, Debug)]
#[command(name = "Luck Detect")]
#[command(
    about = "Were your ranked games decided early? Expected wins, impact and luck buckets",
    long_about = None
)]
struct Args {
    /// Target player PUUID (overrides RIOT_PUUID)
    #[arg(long, global = true)]
    puuid: Option<String>,

    /// Data directory holding raw/, timeline_raw/ and processed/ (default: data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Minute of the early-game snapshot (default: 10)
    #[arg(long, global = true)]
    cutoff_minute: Option<u32>,

    /// Seed for the cross-validation shuffle (default: 42)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the per-player table from raw match records
    Players,
    /// Score role-normalized impact for the target player
    Impact,
    /// Build early-game features and out-of-fold win probabilities
    Expected,
    /// Join impact with win probabilities and assign buckets
    Score,
    /// Print the luck report from the scored table
    Report(ReportArgs),
    /// Run every stage in order, then print the report
    All(ReportArgs),
}

#[derive(ClapArgs, Debug, Clone)]
struct ReportArgs {
    /// Only games played in this role (TOP, JUNGLE, MIDDLE, BOTTOM, SUPPORT)
    #[arg(long)]
    role: Option<Role>,

    /// Only games on this champion (case-insensitive)
    #[arg(long)]
    champion: Option<String>,

    /// Only games in this bucket, e.g. "unlucky loss" or UNLUCKY_LOSS
    #[arg(long)]
    bucket: Option<Bucket>,

    /// Only wins or only losses
    #[arg(long, value_parser = ["win", "loss"])]
    result: Option<String>,

    /// Rows per notable-games table
    #[arg(short, long, default_value = "5")]
    top: usize,
}

impl ReportArgs {
    fn filter(&self) -> GameFilter {
        GameFilter {
            role: self.role,
            champion: self.champion.clone(),
            bucket: self.bucket,
            win: self.result.as_deref().map(|r| r == "win"),
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(puuid) = args.puuid {
        config.puuid = Some(puuid);
    }
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(minute) = args.cutoff_minute {
        config.analysis.cutoff_minute = minute;
    }
    if let Some(seed) = args.seed {
        config.analysis.model.seed = seed;
    }

    logger(env_logger::Env::new().filter_or("LUCK_LOG", "info"), args.verbose).init();

    let store = DataStore::new(config.data_dir.clone());
    let pipeline = Pipeline::new(&store, &config.analysis);

    match args.command {
        Command::Players => stage_players(&store, &pipeline),
        Command::Impact => stage_impact(&store, &pipeline, &config),
        Command::Expected => stage_expected(&store, &pipeline, &config),
        Command::Score => stage_score(&store, &pipeline),
        Command::Report(filters) => stage_report(&store, &config, &filters),
        Command::All(filters) => {
            stage_players(&store, &pipeline)?;
            stage_impact(&store, &pipeline, &config)?;
            stage_expected(&store, &pipeline, &config)?;
            stage_score(&store, &pipeline)?;
            stage_report(&store, &config, &filters)
        }
    }
}

/// `LUCK_LOG` takes `env_logger` filter syntax; `--verbose` forces debug.
fn logger(env: env_logger::Env, verbose: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None);
    builder
}

fn stage_players(store: &DataStore, pipeline: &Pipeline<DataStore>) -> Result<()> {
    display_info(&format!(
        "Step 1: Reading match records from {}",
        store.raw_dir().display()
    ));
    let players = pipeline.players()?;

    let path = store.processed_path(PLAYERS_FILE);
    write_table(&path, &players).with_context(|| format!("writing {}", path.display()))?;
    display_success(&format!("{} player rows -> {}", players.len(), path.display()));
    Ok(())
}

fn stage_impact(store: &DataStore, pipeline: &Pipeline<DataStore>, config: &Config) -> Result<()> {
    let puuid = config.require_puuid()?;
    display_info("Step 2: Scoring role-normalized impact...");

    let players: Vec<PlayerGame> = read_table(&store.processed_path(PLAYERS_FILE))
        .context("run `players` first")?;
    let impact = pipeline.impact(&players, puuid);
    if impact.is_empty() {
        display_warning("Target player does not appear in any match");
    }

    let path = store.processed_path(IMPACT_FILE);
    write_table(&path, &impact).with_context(|| format!("writing {}", path.display()))?;
    display_success(&format!("{} games -> {}", impact.len(), path.display()));
    Ok(())
}

fn stage_expected(store: &DataStore, pipeline: &Pipeline<DataStore>, config: &Config) -> Result<()> {
    let puuid = config.require_puuid()?;
    display_info(&format!(
        "Step 3: Building minute-{} features...",
        config.analysis.cutoff_minute
    ));

    let total = store.match_ids()?.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_message("Reading timelines");
    let features = pipeline.features(puuid, |_| pb.inc(1))?;
    pb.finish_with_message("✓ Timelines read");

    let path = store.processed_path(FEATURES_FILE);
    write_table(&path, &features).with_context(|| format!("writing {}", path.display()))?;
    display_success(&format!("{} feature rows -> {}", features.len(), path.display()));

    display_info("Step 4: Estimating out-of-fold win probabilities...");
    let expectation = pipeline.expectation(&features);
    for warning in &expectation.warnings {
        display_warning(&warning.to_string());
    }

    let path = store.processed_path(PROBABILITIES_FILE);
    write_table(&path, &expectation.rows)
        .with_context(|| format!("writing {}", path.display()))?;
    display_success(&format!(
        "{} probabilities -> {}",
        expectation.rows.len(),
        path.display()
    ));
    Ok(())
}

fn stage_score(store: &DataStore, pipeline: &Pipeline<DataStore>) -> Result<()> {
    display_info("Step 5: Bucketing games...");

    let impact: Vec<ImpactRow> =
        read_table(&store.processed_path(IMPACT_FILE)).context("run `impact` first")?;
    let rows: Vec<ExpectedRow> = read_table(&store.processed_path(PROBABILITIES_FILE))
        .context("run `expected` first")?;
    let expectation = Expectation {
        rows,
        warnings: Vec::new(),
    };

    let scored = pipeline.score(&impact, &expectation);
    let path = store.processed_path(SCORED_FILE);
    write_table(&path, &scored).with_context(|| format!("writing {}", path.display()))?;
    display_success(&format!("{} scored games -> {}", scored.len(), path.display()));
    Ok(())
}

fn stage_report(store: &DataStore, config: &Config, filters: &ReportArgs) -> Result<()> {
    let scored: Vec<ScoredRow> =
        read_table(&store.processed_path(SCORED_FILE)).context("run `score` first")?;
    let probabilities: Vec<ExpectedRow> =
        read_table(&store.processed_path(PROBABILITIES_FILE)).context("run `expected` first")?;
    let thresholds = &config.analysis.thresholds;

    println!(
        "\n{}",
        chrono::Local::now().format("Report generated %Y-%m-%d %H:%M")
    );

    let all = LuckSummary::from_games(probabilities.iter().map(|r| (r.win, r.p_win_10min)));
    display_luck("🎯 LUCK (all games with a snapshot)", &all, all.label(thresholds));

    let filter = filters.filter();
    let selected = filter.apply(&scored);
    if !filter.is_empty() {
        let subset = LuckSummary::from_games(selected.iter().map(|r| (r.win, r.p_win_10min)));
        display_luck("🎯 LUCK (filtered)", &subset, subset.label(thresholds));
    }

    if selected.is_empty() {
        display_warning("No scored games match the filters");
        return Ok(());
    }

    display_win_loss(&report::compare_wins_losses(&selected));
    display_unlucky_index(&report::unlucky_index(&selected));
    display_bucket_counts(&report::bucket_counts(&selected));

    let n = filters.top;
    display_games(
        "😤 MOST UNLUCKY LOSSES (highest p_win)",
        &report::most_unlucky_losses(&selected, n),
    );
    display_games(
        "🧊 MOST CLUTCH WINS (lowest p_win)",
        &report::most_clutch_wins(&selected, n),
    );
    display_games(
        "💪 HIGHEST-IMPACT LOSSES",
        &report::highest_impact_losses(&selected, n),
    );
    display_games(
        "🪫 LOWEST-IMPACT LOSSES",
        &report::lowest_impact_losses(&selected, n),
    );

    Ok(())
}
