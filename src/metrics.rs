use crate::error::{Result, SpambayesError};
use crate::{Matrix, Vector};
use std::path::Path;

/// Build the 2x2 confusion matrix indexed `[true label][predicted label]`:
/// row 0 is `[TN, FP]`, row 1 is `[FN, TP]`.
pub fn confusion_matrix(y_true: &Vector, y_pred: &Vector) -> Result<Matrix> {
    validate_pair(y_true, y_pred)?;

    let mut matrix = Matrix::zeros((2, 2));
    for (&actual, &predicted) in y_true.iter().zip(y_pred.iter()) {
        matrix[(label_index(actual)?, label_index(predicted)?)] += 1.0;
    }
    Ok(matrix)
}

pub fn accuracy(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    let matrix = confusion_matrix(y_true, y_pred)?;
    Ok((matrix[(0, 0)] + matrix[(1, 1)]) / matrix.sum())
}

/// `TP / (TP + FP)`; [`UndefinedMetric`](SpambayesError::UndefinedMetric)
/// when nothing was predicted positive.
pub fn precision_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    let matrix = confusion_matrix(y_true, y_pred)?;
    let tp = matrix[(1, 1)];
    let fp = matrix[(0, 1)];
    if tp + fp == 0.0 {
        return Err(SpambayesError::UndefinedMetric("precision"));
    }
    Ok(tp / (tp + fp))
}

/// `TP / (TP + FN)`; [`UndefinedMetric`](SpambayesError::UndefinedMetric)
/// when there are no positive examples.
pub fn recall_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    let matrix = confusion_matrix(y_true, y_pred)?;
    let tp = matrix[(1, 1)];
    let fne = matrix[(1, 0)];
    if tp + fne == 0.0 {
        return Err(SpambayesError::UndefinedMetric("recall"));
    }
    Ok(tp / (tp + fne))
}

/// Harmonic mean of precision and recall; 0.0 when both are zero.
pub fn f1_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    let precision = precision_score(y_true, y_pred)?;
    let recall = recall_score(y_true, y_pred)?;
    if precision + recall == 0.0 {
        return Ok(0.0);
    }
    Ok(2.0 * precision * recall / (precision + recall))
}

/// Write a confusion matrix as comma-delimited rows, one line per row.
pub fn save_confusion_matrix<P: AsRef<Path>>(path: P, matrix: &Matrix) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in matrix.rows() {
        writer.write_record(row.iter().map(|value| value.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read back a 2x2 confusion matrix written by [`save_confusion_matrix`].
pub fn load_confusion_matrix<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut matrix = Matrix::zeros((2, 2));
    let mut n_rows = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if row >= 2 || record.len() != 2 {
            return Err(SpambayesError::InvalidDataset(
                "confusion matrix file must hold two rows of two values".to_string(),
            ));
        }
        for (column, field) in record.iter().enumerate() {
            matrix[(row, column)] = field.trim().parse().map_err(|_| {
                SpambayesError::InvalidDataset(format!(
                    "row {} column {}: '{}' is not a number",
                    row + 1,
                    column + 1,
                    field
                ))
            })?;
        }
        n_rows += 1;
    }

    if n_rows != 2 {
        return Err(SpambayesError::InvalidDataset(
            "confusion matrix file must hold two rows of two values".to_string(),
        ));
    }
    Ok(matrix)
}

fn validate_pair(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.is_empty() {
        return Err(SpambayesError::InvalidDataset(
            "label vectors are empty".to_string(),
        ));
    }
    if y_true.len() != y_pred.len() {
        return Err(SpambayesError::InvalidDataset(format!(
            "y_true length {} != y_pred length {}",
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(())
}

fn label_index(label: f64) -> Result<usize> {
    if label == 0.0 {
        Ok(0)
    } else if label == 1.0 {
        Ok(1)
    } else {
        Err(SpambayesError::InvalidDataset(format!(
            "label {} is not 0 or 1",
            label
        )))
    }
}
