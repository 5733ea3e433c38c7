use crate::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Probability and impact cut points shared by the bucket classifier and
/// the luck aggregator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub high_exp: f64,
    pub low_exp: f64,
    pub high_imp: f64,
    pub low_imp: f64,
    /// |luck_diff| at or above this reads as "clearly" lucky/unlucky.
    pub clear_luck: f64,
    /// |luck_diff| at or above this reads as "kinda" lucky/unlucky.
    pub mild_luck: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            high_exp: 0.65,
            low_exp: 0.40,
            high_imp: 0.5,
            low_imp: -0.5,
            clear_luck: 5.0,
            mild_luck: 2.5,
        }
    }
}

/// Weights of the standardized metrics in the impact score. They sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactWeights {
    pub damage_share: f64,
    pub kill_participation: f64,
    pub cs_per_min: f64,
    pub vision_per_min: f64,
}

impl Default for ImpactWeights {
    fn default() -> Self {
        ImpactWeights {
            damage_share: 0.35,
            kill_participation: 0.30,
            cs_per_min: 0.25,
            vision_per_min: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    pub folds: usize,
    pub seed: u64,
    /// Below this many rows the probabilities are flagged as high-variance.
    pub min_rows: usize,
    pub l2: f64,
    pub max_iter: usize,
    pub tol: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            folds: 5,
            seed: 42,
            min_rows: 30,
            l2: 1.0,
            max_iter: 100,
            tol: 1e-8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub cutoff_minute: u32,
    pub thresholds: Thresholds,
    pub weights: ImpactWeights,
    pub model: ModelConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            cutoff_minute: 10,
            thresholds: Thresholds::default(),
            weights: ImpactWeights::default(),
            model: ModelConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn cutoff_ms(&self) -> i64 {
        i64::from(self.cutoff_minute) * 60 * 1000
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub puuid: Option<String>,
    pub data_dir: PathBuf,
    pub analysis: AnalysisConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let puuid = env::var("RIOT_PUUID").ok().filter(|p| !p.trim().is_empty());
        let data_dir = env::var("LUCK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let mut analysis = AnalysisConfig::default();
        if let Some(minute) = parse_var::<u32>("LUCK_CUTOFF_MINUTE")? {
            analysis.cutoff_minute = minute;
        }
        if let Some(folds) = parse_var::<usize>("LUCK_CV_FOLDS")? {
            if folds < 2 {
                return Err(AppError::ConfigError(
                    "LUCK_CV_FOLDS must be at least 2".to_string(),
                ));
            }
            analysis.model.folds = folds;
        }
        if let Some(seed) = parse_var::<u64>("LUCK_CV_SEED")? {
            analysis.model.seed = seed;
        }

        Ok(Config {
            puuid,
            data_dir,
            analysis,
        })
    }

    pub fn require_puuid(&self) -> Result<&str, AppError> {
        self.puuid.as_deref().ok_or_else(|| {
            AppError::ConfigError("RIOT_PUUID not set (use .env or --puuid)".to_string())
        })
    }
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::ConfigError(format!("{} is not a valid number: {}", key, raw))),
        Err(_) => Ok(None),
    }
}
