use crate::error::{Result, SpambayesError};
use crate::{Matrix, Vector};
use ndarray::Axis;
use std::path::Path;

/// Column layout of a delimited dataset file: how many feature columns it
/// has and which column holds the binary label.
#[derive(Clone, Copy, Debug)]
pub struct DataSchema {
    pub n_features: usize,
    pub label_column: usize,
}

impl DataSchema {
    /// Schema with `n_features` feature columns and the label in the
    /// trailing column.
    pub fn new(n_features: usize) -> Self {
        Self {
            n_features,
            label_column: n_features,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Vector,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Vector) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(SpambayesError::InvalidDataset(
                "numbers of samples in features and labels must match".to_string(),
            ));
        }

        Ok(Self { features, labels })
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Load a headerless comma-separated file laid out according to
    /// `schema`: every line must have `n_features + 1` numeric fields, with
    /// the label (0 or 1) in `schema.label_column`.
    pub fn from_csv<P: AsRef<Path>>(path: P, schema: &DataSchema) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut features = Vec::new();
        let mut labels = Vec::new();
        let mut n_rows = 0;
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() != schema.n_features + 1 {
                return Err(SpambayesError::InvalidDataset(format!(
                    "row {} has {} fields, expected {}",
                    row + 1,
                    record.len(),
                    schema.n_features + 1
                )));
            }

            for (column, field) in record.iter().enumerate() {
                let value: f64 = field.trim().parse().map_err(|_| {
                    SpambayesError::InvalidDataset(format!(
                        "row {} column {}: '{}' is not a number",
                        row + 1,
                        column + 1,
                        field
                    ))
                })?;

                if column == schema.label_column {
                    if value != 0.0 && value != 1.0 {
                        return Err(SpambayesError::InvalidDataset(format!(
                            "row {} has label {}, expected 0 or 1",
                            row + 1,
                            value
                        )));
                    }
                    labels.push(value);
                } else {
                    features.push(value);
                }
            }
            n_rows += 1;
        }

        if n_rows == 0 {
            return Err(SpambayesError::InvalidDataset(
                "input file contains no rows".to_string(),
            ));
        }

        let features = Matrix::from_shape_vec((n_rows, schema.n_features), features)
            .map_err(|e| SpambayesError::InvalidDataset(e.to_string()))?;
        Dataset::new(features, Vector::from(labels))
    }

    /// Index of the first row whose label differs from the first row's,
    /// i.e. the boundary between the two contiguous class blocks.
    pub fn find_class_boundary(&self) -> Result<usize> {
        if self.labels.is_empty() {
            return Err(SpambayesError::InvalidDataset(
                "dataset is empty".to_string(),
            ));
        }

        let first = self.labels[0];
        let boundary = self
            .labels
            .iter()
            .position(|&label| label != first)
            .ok_or_else(|| {
                SpambayesError::InvalidDataset(
                    "dataset contains a single class, cannot split".to_string(),
                )
            })?;

        if self.labels.iter().skip(boundary).any(|&label| label == first) {
            return Err(SpambayesError::InvalidDataset(
                "rows are not grouped into contiguous class blocks".to_string(),
            ));
        }

        Ok(boundary)
    }

    /// Split into train and test sets by class block, detecting the block
    /// boundary from the labels.
    ///
    /// Rows must be grouped into two contiguous class blocks. The first
    /// block contributes its first `n/2 + 1` rows to the train set, the
    /// second its first `n/2`; the test set is the remainder of each block,
    /// in the same class order. Positional and deterministic, no shuffling.
    pub fn class_block_split(&self) -> Result<(Self, Self)> {
        let boundary = self.find_class_boundary()?;
        self.class_block_split_at(boundary)
    }

    /// Same as [`class_block_split`](Self::class_block_split), with the
    /// block boundary supplied by the caller.
    pub fn class_block_split_at(&self, boundary: usize) -> Result<(Self, Self)> {
        let n = self.n_samples();
        if boundary == 0 || boundary >= n {
            return Err(SpambayesError::InvalidDataset(format!(
                "class boundary {} is outside 1..{}",
                boundary, n
            )));
        }

        let cut1 = boundary / 2 + 1;
        let cut2 = (n - boundary) / 2;

        let train_idx: Vec<usize> = (0..cut1).chain(boundary..boundary + cut2).collect();
        let test_idx: Vec<usize> = (cut1..boundary).chain(boundary + cut2..n).collect();

        let train = Dataset::new(
            self.features.select(Axis(0), &train_idx),
            self.labels.select(Axis(0), &train_idx),
        )?;
        let test = Dataset::new(
            self.features.select(Axis(0), &test_idx),
            self.labels.select(Axis(0), &test_idx),
        )?;

        Ok((train, test))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::Write;

    fn spam_first_dataset() -> Dataset {
        // 3 spam rows then 3 non-spam rows
        let features = array![
            [1.0, 2.0],
            [3.0, 4.0],
            [5.0, 6.0],
            [7.0, 8.0],
            [9.0, 10.0],
            [11.0, 12.0]
        ];
        let labels = array![1.0, 1.0, 1.0, 0.0, 0.0, 0.0];
        Dataset::new(features, labels).unwrap()
    }

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_dataset_creation() {
        let features = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let labels = array![1.0, 0.0, 1.0];

        let dataset = Dataset::new(features, labels).unwrap();
        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 2);
    }

    #[test]
    fn test_dataset_length_mismatch() {
        let features = array![[1.0, 2.0], [3.0, 4.0]];
        let labels = array![1.0, 0.0, 1.0];
        assert!(Dataset::new(features, labels).is_err());
    }

    #[test]
    fn test_find_class_boundary() {
        let dataset = spam_first_dataset();
        assert_eq!(dataset.find_class_boundary().unwrap(), 3);
    }

    #[test]
    fn test_boundary_single_class() {
        let features = Matrix::zeros((4, 2));
        let labels = array![1.0, 1.0, 1.0, 1.0];
        let dataset = Dataset::new(features, labels).unwrap();
        assert!(dataset.find_class_boundary().is_err());
    }

    #[test]
    fn test_boundary_interleaved_classes() {
        let features = Matrix::zeros((4, 2));
        let labels = array![1.0, 0.0, 1.0, 0.0];
        let dataset = Dataset::new(features, labels).unwrap();
        assert!(dataset.find_class_boundary().is_err());
    }

    #[test]
    fn test_class_block_split_sizes() {
        let dataset = spam_first_dataset();
        let (train, test) = dataset.class_block_split().unwrap();

        // first block: 3/2 + 1 = 2 rows to train; second block: 3/2 = 1
        assert_eq!(train.n_samples(), 3);
        assert_eq!(test.n_samples(), 3);
        assert_eq!(train.labels, array![1.0, 1.0, 0.0]);
        assert_eq!(test.labels, array![1.0, 0.0, 0.0]);

        // rows keep their feature values
        assert_eq!(train.features.row(2), array![7.0, 8.0]);
        assert_eq!(test.features.row(0), array![5.0, 6.0]);
    }

    #[test]
    fn test_class_block_split_conserves_classes() {
        // 5 positive rows, 4 negative rows
        let features = Matrix::zeros((9, 3));
        let labels = array![1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let dataset = Dataset::new(features, labels).unwrap();

        let (train, test) = dataset.class_block_split().unwrap();
        let count = |v: &Vector, class: f64| v.iter().filter(|&&l| l == class).count();

        assert_eq!(count(&train.labels, 1.0) + count(&test.labels, 1.0), 5);
        assert_eq!(count(&train.labels, 0.0) + count(&test.labels, 0.0), 4);
        assert_eq!(train.n_samples() + test.n_samples(), 9);

        // extra row of the first block goes to train: 5/2 + 1 = 3
        assert_eq!(count(&train.labels, 1.0), 3);
        assert_eq!(count(&train.labels, 0.0), 2);
    }

    #[test]
    fn test_split_at_bad_boundary() {
        let dataset = spam_first_dataset();
        assert!(dataset.class_block_split_at(0).is_err());
        assert!(dataset.class_block_split_at(6).is_err());
    }

    #[test]
    fn test_from_csv() {
        let path = write_temp_csv(
            "spambayes_test_from_csv.csv",
            "0.1,0.2,1\n0.3,0.4,1\n0.5,0.6,0\n",
        );
        let dataset = Dataset::from_csv(&path, &DataSchema::new(2)).unwrap();
        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 2);
        assert_eq!(dataset.labels, array![1.0, 1.0, 0.0]);
        assert_eq!(dataset.features.row(1), array![0.3, 0.4]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_csv_wrong_field_count() {
        let path = write_temp_csv("spambayes_test_short_row.csv", "0.1,0.2,1\n0.3,1\n");
        assert!(Dataset::from_csv(&path, &DataSchema::new(2)).is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_csv_bad_label() {
        let path = write_temp_csv("spambayes_test_bad_label.csv", "0.1,0.2,2\n");
        assert!(Dataset::from_csv(&path, &DataSchema::new(2)).is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_csv_non_numeric_field() {
        let path = write_temp_csv("spambayes_test_non_numeric.csv", "0.1,spam,1\n");
        assert!(Dataset::from_csv(&path, &DataSchema::new(2)).is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_csv_missing_file() {
        let path = std::env::temp_dir().join("spambayes_test_does_not_exist.csv");
        assert!(Dataset::from_csv(&path, &DataSchema::new(2)).is_err());
    }
}
