//! Gaussian naive Bayes for binary classification.
//!
//! Estimates a class prior and per-feature Gaussian parameters (mean and
//! population standard deviation) for each of the two classes, then scores
//! examples by accumulating base-2 log-densities under the feature
//! independence assumption.
//!
//! # Examples
//!
//! ```rust
//! use spambayes::GaussianNb;
//! use ndarray::array;
//!
//! let x = array![[-1.0, -1.0], [1.0, 1.0], [9.0, 9.0], [11.0, 11.0]];
//! let y = array![0.0, 0.0, 1.0, 1.0];
//!
//! let mut model = GaussianNb::new();
//! model.fit(&x, &y).unwrap();
//! let predictions = model.predict(&array![[0.5, 0.5], [10.5, 9.5]]).unwrap();
//! assert_eq!(predictions, array![0.0, 1.0]);
//! ```

use crate::error::{Result, SpambayesError};
use crate::{Matrix, Vector};
use ndarray::{Axis, array};

/// Floor applied to a per-feature standard deviation of zero, keeping the
/// Gaussian density well-defined.
pub const MIN_STD: f64 = 1e-4;

/// Substituted for a density that evaluates to exactly zero, so its
/// logarithm stays finite.
pub const DENSITY_FLOOR: f64 = 1e-7;

#[derive(Clone, Debug)]
pub struct GaussianNb {
    /// Class prior probabilities, `[P(class 0), P(class 1)]`.
    pub priors: Option<Vector>,
    /// Per-feature means; column `c` holds class `c`.
    pub means: Option<Matrix>,
    /// Per-feature standard deviations; column `c` holds class `c`.
    pub stds: Option<Matrix>,
    min_std: f64,
    density_floor: f64,
}

impl GaussianNb {
    pub fn new() -> Self {
        Self {
            priors: None,
            means: None,
            stds: None,
            min_std: MIN_STD,
            density_floor: DENSITY_FLOOR,
        }
    }

    pub fn min_std(mut self, min_std: f64) -> Self {
        self.min_std = min_std;
        self
    }

    pub fn density_floor(mut self, density_floor: f64) -> Self {
        self.density_floor = density_floor;
        self
    }

    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        if x.nrows() == 0 {
            return Err(SpambayesError::InvalidDataset(
                "training set is empty".to_string(),
            ));
        }
        if x.nrows() != y.len() {
            return Err(SpambayesError::InvalidDataset(
                "numbers of samples in features and labels must match".to_string(),
            ));
        }
        Self::validate_labels(y)?;

        let class_rows = |class: f64| -> Vec<usize> {
            y.iter()
                .enumerate()
                .filter(|&(_, &label)| label == class)
                .map(|(i, _)| i)
                .collect()
        };
        let rows0 = class_rows(0.0);
        let rows1 = class_rows(1.0);
        if rows0.is_empty() || rows1.is_empty() {
            return Err(SpambayesError::InvalidDataset(
                "training set must contain rows of both classes".to_string(),
            ));
        }

        let prior1 = y.sum() / y.len() as f64;
        let prior0 = 1.0 - prior1;

        let mut means = Matrix::zeros((x.ncols(), 2));
        let mut stds = Matrix::zeros((x.ncols(), 2));
        for (class, rows) in [(0, &rows0), (1, &rows1)] {
            let class_x = x.select(Axis(0), rows);
            let mean = class_x.mean_axis(Axis(0)).ok_or_else(|| {
                SpambayesError::InvalidDataset("failed to compute feature means".to_string())
            })?;
            means.column_mut(class).assign(&mean);
            stds.column_mut(class)
                .assign(&class_x.std_axis(Axis(0), 0.0));
        }

        let min_std = self.min_std;
        stds.mapv_inplace(|std| if std == 0.0 { min_std } else { std });

        self.priors = Some(array![prior0, prior1]);
        self.means = Some(means);
        self.stds = Some(stds);
        Ok(())
    }

    /// Accumulated base-2 log-probability of each example under each class:
    /// row `j` holds `log2(prior[c]) + Σ_i log2(density(x[j,i]))` for
    /// `c = 0, 1`, features summed in ascending index order.
    pub fn joint_log_likelihood(&self, x: &Matrix) -> Result<Matrix> {
        let priors = self.priors.as_ref().ok_or(SpambayesError::NotFitted)?;
        let means = self.means.as_ref().ok_or(SpambayesError::NotFitted)?;
        let stds = self.stds.as_ref().ok_or(SpambayesError::NotFitted)?;

        if x.ncols() != means.nrows() {
            return Err(SpambayesError::InvalidDataset(format!(
                "number of features in X ({}) doesn't match training data ({})",
                x.ncols(),
                means.nrows()
            )));
        }

        let mut scores = Matrix::zeros((x.nrows(), 2));
        for (j, row) in x.rows().into_iter().enumerate() {
            for class in 0..2 {
                let mut score = priors[class].log2();
                for (i, &value) in row.iter().enumerate() {
                    let mut density =
                        gaussian_density(value, means[(i, class)], stds[(i, class)]);
                    if density == 0.0 {
                        density = self.density_floor;
                    }
                    score += density.log2();
                }
                scores[(j, class)] = score;
            }
        }

        Ok(scores)
    }

    /// Classify each example by the argmax of its class scores; a tie goes
    /// to class 1.
    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let scores = self.joint_log_likelihood(x)?;
        Ok(scores
            .rows()
            .into_iter()
            .map(|row| if row[0] > row[1] { 0.0 } else { 1.0 })
            .collect())
    }

    fn validate_labels(y: &Vector) -> Result<()> {
        for &label in y.iter() {
            if label != 0.0 && label != 1.0 {
                return Err(SpambayesError::InvalidDataset(format!(
                    "label {} is not 0 or 1",
                    label
                )));
            }
        }
        Ok(())
    }
}

impl Default for GaussianNb {
    fn default() -> Self {
        Self::new()
    }
}

/// Normal probability density of `x` under `(mean, std)`.
fn gaussian_density(x: f64, mean: f64, std: f64) -> f64 {
    let coefficient = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * std);
    coefficient * (-(x - mean).powi(2) / (2.0 * std * std)).exp()
}
