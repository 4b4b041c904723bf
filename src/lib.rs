//! Gaussian naive Bayes classification for the UCI Spambase dataset:
//! dataset loading and splitting, per-class Gaussian parameter estimation,
//! log-likelihood scoring, and confusion-matrix evaluation.

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod dataset;
pub mod error;
pub mod metrics;
pub mod naive_bayes;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

pub use dataset::{DataSchema, Dataset};
pub use error::{Result, SpambayesError};
pub use naive_bayes::GaussianNb;
