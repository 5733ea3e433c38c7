//! L2-regularized logistic regression fitted with Newton's method.
//!
//! Minimizes `sum(log_loss) + l2/2 * |w|^2` with the intercept left
//! unpenalized, which is the usual default for a small tabular classifier.

/// Predictors per row, plus one for the intercept.
const DIM: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticModel {
    pub intercept: f64,
    pub coefficients: [f64; DIM - 1],
}

#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    pub l2: f64,
    pub max_iter: usize,
    pub tol: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct FitReport {
    pub iterations: usize,
    pub converged: bool,
}

pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + e^z)` without overflow.
fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

fn augmented(x: &[f64; DIM - 1]) -> [f64; DIM] {
    [1.0, x[0], x[1], x[2], x[3]]
}

fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl LogisticModel {
    fn params(&self) -> [f64; DIM] {
        let c = &self.coefficients;
        [self.intercept, c[0], c[1], c[2], c[3]]
    }

    fn from_params(p: [f64; DIM]) -> Self {
        LogisticModel {
            intercept: p[0],
            coefficients: [p[1], p[2], p[3], p[4]],
        }
    }

    pub fn predict_proba(&self, x: &[f64; DIM - 1]) -> f64 {
        sigmoid(dot(&self.params(), &augmented(x)))
    }

    /// Fits on rows `x` with labels `y`. The caller guarantees both classes
    /// are present; with a single class the intercept has no finite optimum.
    pub fn fit(x: &[[f64; DIM - 1]], y: &[bool], options: &FitOptions) -> (Self, FitReport) {
        debug_assert_eq!(x.len(), y.len());

        let rows: Vec<[f64; DIM]> = x.iter().map(augmented).collect();
        let targets: Vec<f64> = y.iter().map(|&win| if win { 1.0 } else { 0.0 }).collect();

        let objective = |w: &[f64; DIM]| -> f64 {
            let loss: f64 = rows
                .iter()
                .zip(&targets)
                .map(|(r, t)| {
                    let z = dot(w, r);
                    softplus(z) - t * z
                })
                .sum();
            let penalty: f64 = w[1..].iter().map(|v| v * v).sum();
            loss + 0.5 * options.l2 * penalty
        };

        let mut w = [0.0; DIM];
        let mut current = objective(&w);
        let mut report = FitReport {
            iterations: 0,
            converged: false,
        };

        for iteration in 1..=options.max_iter {
            report.iterations = iteration;

            let mut grad = [0.0; DIM];
            let mut hess = [[0.0; DIM]; DIM];
            for (r, t) in rows.iter().zip(&targets) {
                let p = sigmoid(dot(&w, r));
                let weight = p * (1.0 - p);
                for i in 0..DIM {
                    grad[i] += (p - t) * r[i];
                    for j in 0..DIM {
                        hess[i][j] += weight * r[i] * r[j];
                    }
                }
            }
            for i in 1..DIM {
                grad[i] += options.l2 * w[i];
                hess[i][i] += options.l2;
            }

            let step = match solve(hess, grad) {
                Some(step) => step,
                None => {
                    log::debug!("Singular Hessian at iteration {}", iteration);
                    break;
                }
            };

            // Backtracking keeps every accepted step a descent step.
            let mut scale = 1.0;
            let mut candidate = w;
            let mut accepted = false;
            for _ in 0..30 {
                for i in 0..DIM {
                    candidate[i] = w[i] - scale * step[i];
                }
                let value = objective(&candidate);
                if value <= current {
                    current = value;
                    accepted = true;
                    break;
                }
                scale *= 0.5;
            }
            if !accepted {
                report.converged = true;
                break;
            }

            let moved = step.iter().map(|s| (s * scale).abs()).fold(0.0, f64::max);
            w = candidate;
            if moved < options.tol {
                report.converged = true;
                break;
            }
        }

        if !report.converged {
            log::warn!(
                "Logistic fit did not converge after {} iterations",
                report.iterations
            );
        }

        (Self::from_params(w), report)
    }
}

/// Solves `a * x = b` by Gaussian elimination with partial pivoting.
fn solve(mut a: [[f64; DIM]; DIM], mut b: [f64; DIM]) -> Option<[f64; DIM]> {
    for col in 0..DIM {
        let pivot = (col..DIM).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < 1e-300 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..DIM {
            let factor = a[row][col] / a[col][col];
            for k in col..DIM {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; DIM];
    for row in (0..DIM).rev() {
        let tail: f64 = (row + 1..DIM).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> FitOptions {
        FitOptions {
            l2: 1.0,
            max_iter: 100,
            tol: 1e-10,
        }
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-15);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert!(softplus(1000.0).is_finite());
    }

    #[test]
    fn solves_small_system() {
        let mut a = [[0.0; DIM]; DIM];
        for (i, row) in a.iter_mut().enumerate() {
            row[i] = (i + 1) as f64;
        }
        a[0][1] = 1.0;
        let x = solve(a, [3.0, 4.0, 3.0, 8.0, 10.0]).unwrap();
        assert!((x[1] - 2.0).abs() < 1e-12);
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[4] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn learns_direction_of_the_signal() {
        let x: Vec<[f64; 4]> = (-10..=10)
            .map(|i| [f64::from(i) * 100.0, 0.0, 0.0, 0.0])
            .collect();
        // Mostly wins when ahead, with some noise so the data is not separable.
        let y: Vec<bool> = (-10..=10).map(|i| (i > 0) ^ (i == 3 || i == -4)).collect();

        let (model, report) = LogisticModel::fit(&x, &y, &options());
        assert!(report.converged);
        assert!(model.coefficients[0] > 0.0);
        assert!(model.predict_proba(&[1000.0, 0.0, 0.0, 0.0]) > 0.5);
        assert!(model.predict_proba(&[-1000.0, 0.0, 0.0, 0.0]) < 0.5);
    }

    #[test]
    fn separable_data_stays_finite() {
        let x = vec![[-2.0, 0.0, 0.0, 0.0], [-1.0, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0], [2.0, 0.0, 0.0, 0.0]];
        let y = vec![false, false, true, true];
        let (model, _) = LogisticModel::fit(&x, &y, &options());
        assert!(model.coefficients.iter().all(|c| c.is_finite()));
        let p = model.predict_proba(&[1.5, 0.0, 0.0, 0.0]);
        assert!(p > 0.5 && p < 1.0);
    }
}
