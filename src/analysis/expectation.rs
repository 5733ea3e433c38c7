use crate::analysis::features::FeatureRow;
use crate::analysis::logistic::{FitOptions, LogisticModel};
use crate::config::ModelConfig;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelWarning {
    /// Fewer training rows than `ModelConfig::min_rows`; probabilities are
    /// usable but high-variance.
    SmallSampleSize { rows: usize, min_rows: usize },
}

impl fmt::Display for ModelWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelWarning::SmallSampleSize { rows, min_rows } => write!(
                f,
                "Very small dataset for modeling ({} games, want {}+). Results may be noisy.",
                rows, min_rows
            ),
        }
    }
}

/// Feature row plus its out-of-fold win probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedRow {
    pub match_id: String,
    pub win: bool,
    pub gold_diff_10: i64,
    pub xp_diff_10: i64,
    pub cs_diff_10: i64,
    pub kills_diff_10: i64,
    pub p_win_10min: f64,
}

#[derive(Debug, Clone)]
pub struct Expectation {
    pub rows: Vec<ExpectedRow>,
    pub warnings: Vec<ModelWarning>,
}

/// Assigns each row to one of `k` folds, keeping the win/loss mix of every
/// fold close to the whole set. Deterministic for a given seed.
pub fn stratified_folds(labels: &[bool], k: usize, seed: u64) -> Vec<usize> {
    let mut folds = vec![0; labels.len()];
    if k == 0 {
        return folds;
    }

    let mut rng = Pcg64::seed_from_u64(seed);
    let mut offset = 0;
    for class in [false, true] {
        let mut members: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] == class).collect();
        members.shuffle(&mut rng);
        for (position, &row) in members.iter().enumerate() {
            folds[row] = (offset + position) % k;
        }
        // Continue the round robin so small classes don't pile into fold 0.
        offset += members.len();
    }
    folds
}

/// Smoothed base rate, used when a training set cannot support a fit.
fn base_rate(labels: &[bool]) -> f64 {
    let wins = labels.iter().filter(|&&w| w).count();
    (wins as f64 + 1.0) / (labels.len() as f64 + 2.0)
}

pub struct ExpectationModel {
    config: ModelConfig,
}

impl ExpectationModel {
    pub fn new(config: ModelConfig) -> Self {
        ExpectationModel { config }
    }

    fn fit_options(&self) -> FitOptions {
        FitOptions {
            l2: self.config.l2,
            max_iter: self.config.max_iter,
            tol: self.config.tol,
        }
    }

    /// Fits on `(x, y)` and returns a predictor. Single-class or empty training
    /// sets fall back to the smoothed base rate.
    fn train(&self, x: &[[f64; 4]], y: &[bool]) -> Box<dyn Fn(&[f64; 4]) -> f64> {
        let has_both = y.iter().any(|&w| w) && y.iter().any(|&w| !w);
        if !has_both {
            let p = base_rate(y);
            log::debug!("Training set has one class ({} rows), predicting {:.3}", y.len(), p);
            return Box::new(move |_: &[f64; 4]| p);
        }

        let (model, report) = LogisticModel::fit(x, y, &self.fit_options());
        log::debug!(
            "Fitted on {} rows in {} iterations: intercept {:.4}, coefficients {:?}",
            y.len(),
            report.iterations,
            model.intercept,
            model.coefficients
        );
        Box::new(move |row: &[f64; 4]| model.predict_proba(row))
    }

    /// Out-of-fold probabilities in input order: each row is predicted by a
    /// model that never saw it.
    pub fn cross_validated(&self, x: &[[f64; 4]], y: &[bool]) -> Vec<f64> {
        let n = y.len();
        let k = self.config.folds.min(n);
        let folds = stratified_folds(y, k, self.config.seed);
        let mut probabilities = vec![0.0; n];

        for fold in 0..k {
            let (train_x, train_y): (Vec<[f64; 4]>, Vec<bool>) = (0..n)
                .filter(|&i| folds[i] != fold)
                .map(|i| (x[i], y[i]))
                .unzip();
            let predict = self.train(&train_x, &train_y);

            for i in (0..n).filter(|&i| folds[i] == fold) {
                probabilities[i] = predict(&x[i]).clamp(0.0, 1.0);
            }
        }

        probabilities
    }

    /// Fit and predict on the same rows. Kept for comparison with the
    /// cross-validated estimate; it is optimistic about the training games.
    pub fn in_sample(&self, x: &[[f64; 4]], y: &[bool]) -> Vec<f64> {
        let predict = self.train(x, y);
        x.iter().map(|row| predict(row).clamp(0.0, 1.0)).collect()
    }

    pub fn estimate(&self, features: &[FeatureRow]) -> Expectation {
        let mut warnings = Vec::new();
        if features.len() < self.config.min_rows {
            let warning = ModelWarning::SmallSampleSize {
                rows: features.len(),
                min_rows: self.config.min_rows,
            };
            log::warn!("{}", warning);
            warnings.push(warning);
        }

        let x: Vec<[f64; 4]> = features.iter().map(FeatureRow::predictors).collect();
        let y: Vec<bool> = features.iter().map(|f| f.win).collect();
        let probabilities = self.cross_validated(&x, &y);

        let rows = features
            .iter()
            .zip(probabilities)
            .map(|(f, p)| ExpectedRow {
                match_id: f.match_id.clone(),
                win: f.win,
                gold_diff_10: f.gold_diff_10,
                xp_diff_10: f.xp_diff_10,
                cs_diff_10: f.cs_diff_10,
                kills_diff_10: f.kills_diff_10,
                p_win_10min: p,
            })
            .collect();

        Expectation { rows, warnings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Gold lead drives the result, with a few upsets mixed in.
    fn dataset(n: usize) -> Vec<FeatureRow> {
        (0..n)
            .map(|i| {
                let lead = (i as i64 * 37 % 61) - 30;
                let upset = i % 7 == 3;
                FeatureRow {
                    match_id: format!("NA1_{}", i),
                    win: (lead > 0) ^ upset,
                    gold_diff_10: lead * 100,
                    xp_diff_10: lead * 60 + (i as i64 % 5) * 10,
                    cs_diff_10: lead / 3,
                    kills_diff_10: lead / 10,
                }
            })
            .collect()
    }

    #[test]
    fn folds_preserve_class_balance() {
        let labels: Vec<bool> = (0..50).map(|i| i % 5 < 2).collect(); // 20 wins, 30 losses
        let folds = stratified_folds(&labels, 5, 42);

        for fold in 0..5 {
            let wins = (0..50).filter(|&i| folds[i] == fold && labels[i]).count();
            let losses = (0..50).filter(|&i| folds[i] == fold && !labels[i]).count();
            assert_eq!(wins, 4);
            assert_eq!(losses, 6);
        }
    }

    #[test]
    fn folds_are_reproducible_for_a_seed() {
        let labels: Vec<bool> = (0..40).map(|i| i % 3 == 0).collect();
        assert_eq!(stratified_folds(&labels, 5, 7), stratified_folds(&labels, 5, 7));
        assert_ne!(stratified_folds(&labels, 5, 7), stratified_folds(&labels, 5, 8));
    }

    #[test]
    fn one_probability_per_row_in_range() {
        let features = dataset(60);
        let model = ExpectationModel::new(ModelConfig::default());
        let expectation = model.estimate(&features);

        assert_eq!(expectation.rows.len(), 60);
        assert!(expectation.warnings.is_empty());
        assert!(expectation
            .rows
            .iter()
            .all(|r| (0.0..=1.0).contains(&r.p_win_10min)));
        for (row, feature) in expectation.rows.iter().zip(&features) {
            assert_eq!(row.match_id, feature.match_id);
        }

        let ahead: f64 = expectation.rows.iter().filter(|r| r.gold_diff_10 > 1500).map(|r| r.p_win_10min).sum();
        let behind: f64 = expectation.rows.iter().filter(|r| r.gold_diff_10 < -1500).map(|r| r.p_win_10min).sum();
        assert!(ahead > behind);
    }

    #[test]
    fn out_of_fold_differs_from_in_sample() {
        let features = dataset(60);
        let x: Vec<[f64; 4]> = features.iter().map(FeatureRow::predictors).collect();
        let y: Vec<bool> = features.iter().map(|f| f.win).collect();
        let model = ExpectationModel::new(ModelConfig::default());

        let cv = model.cross_validated(&x, &y);
        let full = model.in_sample(&x, &y);
        assert_eq!(cv.len(), full.len());
        assert!(cv.iter().zip(&full).any(|(a, b)| (a - b).abs() > 1e-6));
    }

    #[test]
    fn same_seed_same_probabilities() {
        let features = dataset(45);
        let model = ExpectationModel::new(ModelConfig::default());
        let first = model.estimate(&features);
        let second = model.estimate(&features);
        assert_eq!(first.rows, second.rows);
    }

    #[test]
    fn small_samples_warn_but_proceed() {
        let features = dataset(12);
        let expectation = ExpectationModel::new(ModelConfig::default()).estimate(&features);
        assert_eq!(expectation.rows.len(), 12);
        assert_eq!(
            expectation.warnings,
            vec![ModelWarning::SmallSampleSize { rows: 12, min_rows: 30 }]
        );
    }

    #[test]
    fn degenerate_inputs_fall_back_to_base_rate() {
        let model = ExpectationModel::new(ModelConfig::default());
        assert!(model.cross_validated(&[], &[]).is_empty());

        let one = model.cross_validated(&[[100.0, 0.0, 0.0, 0.0]], &[true]);
        assert_eq!(one, vec![0.5]);

        let x = vec![[1.0, 2.0, 3.0, 4.0]; 6];
        let all_wins = model.cross_validated(&x, &[true; 6]);
        // Each training set holds 4 or 5 wins: (wins + 1) / (n + 2).
        assert!(all_wins.iter().all(|&p| p > 0.8 && p < 1.0));
    }
}
