use anyhow::{Context, Result};
use spambayes::{DataSchema, Dataset, GaussianNb, SpambayesError, metrics};
use std::path::PathBuf;

/// Fixed pipeline configuration: input dataset, confusion-matrix output,
/// and the dataset's column layout.
struct Config {
    input: PathBuf,
    output: PathBuf,
    schema: DataSchema,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("spambase_data.csv"),
            output: PathBuf::from("confmat.csv"),
            schema: DataSchema::new(57),
        }
    }
}

fn main() -> Result<()> {
    let config = Config::default();

    println!("Loading dataset from {}...", config.input.display());
    let data = Dataset::from_csv(&config.input, &config.schema)
        .with_context(|| format!("failed to load dataset from {}", config.input.display()))?;
    println!("{} rows, {} features", data.n_samples(), data.n_features());

    println!("Splitting into train and test sets...");
    let (train, test) = data
        .class_block_split()
        .context("failed to split dataset into class blocks")?;
    println!(
        "{} training rows, {} test rows",
        train.n_samples(),
        test.n_samples()
    );

    println!("Fitting Gaussian naive Bayes model on training data...");
    let mut model = GaussianNb::new();
    model
        .fit(&train.features, &train.labels)
        .context("failed to fit model on training data")?;

    println!("Classifying test set...\n");
    let predictions = model
        .predict(&test.features)
        .context("failed to classify test set")?;

    let confmat = metrics::confusion_matrix(&test.labels, &predictions)
        .context("failed to build confusion matrix")?;
    metrics::save_confusion_matrix(&config.output, &confmat)
        .with_context(|| format!("failed to write {}", config.output.display()))?;

    report_metric("accuracy", metrics::accuracy(&test.labels, &predictions))?;
    report_metric(
        "precision",
        metrics::precision_score(&test.labels, &predictions),
    )?;
    report_metric("recall", metrics::recall_score(&test.labels, &predictions))?;

    Ok(())
}

fn report_metric(name: &str, value: spambayes::Result<f64>) -> Result<()> {
    match value {
        Ok(value) => println!("{} = {}", name, value),
        Err(SpambayesError::UndefinedMetric(_)) => println!("{} = undefined", name),
        Err(err) => return Err(err).with_context(|| format!("failed to compute {}", name)),
    }
    Ok(())
}
