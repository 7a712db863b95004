//! Bounce-Train Entry Point

use anyhow::{anyhow, Result};
use pico_args::Arguments;
use pipeline::{init_logging, run, PipelineConfig};
use std::path::PathBuf;
use tracing::info;

const USAGE: &str = "\
bounce-train — train the bounce-detection model from recorded traces

USAGE:
  bounce-train --dataset <dir> --model-out <file> [options]

OPTIONS:
  --dataset <dir>     Root directory of the recorded sessions
  --model-out <file>  Output path for the model artifact (.cbm)
  --radius <n>        Window radius (default 3)
  --threshold <t>     Bounce decision threshold (default 0.45)
  --seed <n>          Train/test split seed (default 7)
  -h, --help          Show this help
";

fn main() -> Result<()> {
    init_logging();

    info!("=== bounce-train v{} ===", env!("CARGO_PKG_VERSION"));
    let config = parse_args()?;
    run(&config)
}

/// Configuration errors are reported here, before any processing begins.
fn parse_args() -> Result<PipelineConfig> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{USAGE}");
        std::process::exit(0);
    }

    let dataset_root: PathBuf = pargs
        .value_from_str("--dataset")
        .map_err(|_| anyhow!("missing required --dataset <dir>\n\n{USAGE}"))?;
    let model_out: PathBuf = pargs
        .value_from_str("--model-out")
        .map_err(|_| anyhow!("missing required --model-out <file>\n\n{USAGE}"))?;

    let mut config = PipelineConfig::new(dataset_root, model_out);
    if let Some(radius) = pargs.opt_value_from_str("--radius")? {
        config.extractor.radius = radius;
    }
    if let Some(threshold) = pargs.opt_value_from_str("--threshold")? {
        config.decision_threshold = threshold;
    }
    if let Some(seed) = pargs.opt_value_from_str("--seed")? {
        config.split.seed = seed;
    }

    let rest = pargs.finish();
    if !rest.is_empty() {
        return Err(anyhow!("unexpected arguments: {rest:?}\n\n{USAGE}"));
    }
    Ok(config)
}
