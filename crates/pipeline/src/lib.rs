//! Bounce-Train Pipeline
//!
//! Orchestrates the full offline run: assemble the feature table from
//! recorded sessions, split it, balance the train subset, grid-search and
//! fit the regressor, evaluate on the untouched test subset, and persist
//! the model artifact.

use anyhow::Context;
use balancer::{oversample, SmoteConfig};
use dataset_builder::{assemble_dataset, split_table, SplitConfig};
use feature_engine::{ExtractorConfig, WindowExtractor};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use trainer::{fit_with_grid_search, ConfusionMatrix, GridSearchConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Everything one pipeline run needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root directory of the recorded sessions
    pub dataset_root: PathBuf,
    /// Output path for the persisted model artifact
    pub model_out: PathBuf,
    /// Window feature extraction settings
    pub extractor: ExtractorConfig,
    /// Train/test split settings
    pub split: SplitConfig,
    /// Oversampling settings
    pub smote: SmoteConfig,
    /// Hyper-parameter search settings
    pub search: GridSearchConfig,
    /// Score above which a prediction counts as a bounce
    pub decision_threshold: f64,
}

impl PipelineConfig {
    /// Defaults for everything but the two required paths
    pub fn new(dataset_root: PathBuf, model_out: PathBuf) -> Self {
        Self {
            dataset_root,
            model_out,
            extractor: ExtractorConfig::default(),
            split: SplitConfig::default(),
            smote: SmoteConfig::default(),
            search: GridSearchConfig::default(),
            decision_threshold: 0.45,
        }
    }
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("failed to set tracing subscriber");
}

/// Run the full pipeline. Any fatal error aborts the run with a
/// descriptive message; there is no partial or resume mode.
pub fn run(config: &PipelineConfig) -> anyhow::Result<()> {
    let extractor = WindowExtractor::new(config.extractor.clone())
        .context("invalid extractor configuration")?;

    let table = assemble_dataset(&config.dataset_root, &extractor)
        .context("dataset assembly failed")?;
    let sets = split_table(&table, &config.split).context("train/test split failed")?;

    let (x_train, y_train) = oversample(&sets.x_train, &sets.y_train, &config.smote)
        .context("train-set balancing failed")?;
    info!("balanced train set: {} rows", x_train.len());

    let model = fit_with_grid_search(&x_train, &y_train, &config.search)
        .context("model training failed")?;

    let scores = model.predict(&sets.x_test);
    let matrix = ConfusionMatrix::from_scores(&sets.y_test, &scores, config.decision_threshold);
    print_report(&sets.y_test, &matrix);

    model
        .save(&config.model_out)
        .context("failed to persist model artifact")?;
    info!("model saved to {}", config.model_out.display());
    Ok(())
}

/// Human-readable evaluation summary. Informational only; nothing parses
/// this downstream.
fn print_report(y_test: &[u8], matrix: &ConfusionMatrix) {
    println!("Number of rows in X_test: {}", y_test.len());
    println!("Number of rows in y_test: {}", y_test.len());
    println!(
        "tn = {}, fp = {}, fn = {}, tp = {}",
        matrix.true_negatives, matrix.false_positives, matrix.false_negatives, matrix.true_positives
    );
    println!("accuracy = {}", matrix.accuracy());
    println!("recall = {}", matrix.recall());
    println!("f1 score = {}", matrix.f1());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use trainer::HyperGrid;

    fn write_clip(root: &Path, session: &str, clip: &str, n: usize, bounce_at: usize) {
        let dir = root.join(session).join(clip);
        fs::create_dir_all(&dir).unwrap();
        let mut file = fs::File::create(dir.join(dataset_builder::LABEL_FILE)).unwrap();
        writeln!(file, "file name,visibility,x-coordinate,y-coordinate,status,time stamp").unwrap();
        for i in 0..n {
            let status = if i == bounce_at { 2 } else { 0 };
            // Vertical parabola around the bounce frame.
            let y = 100.0 + 20.0 * (i as f64 - bounce_at as f64).abs();
            writeln!(
                file,
                "{i:04}.jpg,1,{},{y},{status},{}",
                50.0 + 8.0 * i as f64,
                0.033 * i as f64
            )
            .unwrap();
        }
    }

    #[test]
    fn test_end_to_end_run() {
        let root = tempfile::tempdir().unwrap();
        for session in 0..4 {
            for clip in 0..5 {
                write_clip(
                    root.path(),
                    &format!("game{session}"),
                    &format!("clip{clip}"),
                    9,
                    4,
                );
            }
        }

        let out = tempfile::tempdir().unwrap();
        let model_out = out.path().join("bounce.cbm");
        let mut config = PipelineConfig::new(root.path().to_path_buf(), model_out.clone());
        config.search.grid = HyperGrid {
            iterations: vec![20],
            learning_rates: vec![0.1],
            depths: vec![3],
            min_leaf_sizes: vec![1],
        };

        run(&config).unwrap();
        assert!(model_out.exists());
    }

    #[test]
    fn test_missing_dataset_root_fails() {
        let out = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(
            PathBuf::from("/nonexistent/dataset"),
            out.path().join("bounce.cbm"),
        );
        assert!(run(&config).is_err());
    }

    #[test]
    fn test_bad_radius_fails_before_processing() {
        let mut config = PipelineConfig::new(
            PathBuf::from("/nonexistent/dataset"),
            PathBuf::from("/tmp/never-written.cbm"),
        );
        config.extractor.radius = 1;
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("extractor configuration"));
    }
}
