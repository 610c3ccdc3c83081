//! Inception Eval command-line entry point.
//!
//! Scores every image listed in a manifest and prints one line per image to
//! stdout. Logs go to stderr and are controlled by `RUST_LOG`.
//!
//! Paths default to the conventional layout (`images/tags.tsv`, `images/`,
//! `models/...`). A JSON config file can replace the defaults, and the flags
//! below override both.

use clap::Parser;
use inception_eval::core::config::{EvalConfig, FailurePolicy};
use inception_eval::runner;
use inception_eval::utils::init_tracing;
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments for the evaluator
#[derive(Parser)]
#[command(name = "inception-eval")]
#[command(about = "Scores labelled images against a pretrained Inception graph")]
struct Args {
    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tab-separated manifest of `<image path>\t<expected label>` lines
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Directory the manifest's image paths are relative to
    #[arg(short, long)]
    images_dir: Option<PathBuf>,

    /// ONNX export of the Inception graph
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Label file, one class name per line
    #[arg(short, long)]
    labels: Option<PathBuf>,

    /// Log and skip images that fail instead of stopping
    #[arg(long)]
    skip_failures: bool,
}

impl Args {
    fn into_config(self) -> Result<EvalConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => EvalConfig::from_json_file(path)?,
            None => EvalConfig::new(),
        };

        if let Some(path) = self.manifest {
            config = config.manifest_path(path);
        }
        if let Some(path) = self.images_dir {
            config = config.images_dir(path);
        }
        if let Some(path) = self.graph {
            config = config.graph_path(path);
        }
        if let Some(path) = self.labels {
            config = config.labels_path(path);
        }
        if self.skip_failures {
            config = config.failure_policy(FailurePolicy::Skip);
        }

        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_tracing();

    let args = Args::parse();
    let config = args.into_config()?;

    info!(
        manifest = %config.manifest_path.display(),
        graph = %config.graph_path.display(),
        "starting evaluation"
    );

    let mut stdout = std::io::stdout().lock();
    match runner::run(config, &mut stdout) {
        Ok(summary) => {
            info!(
                "finished: {} scored, {} wrong, {} failed",
                summary.processed, summary.wrong, summary.failed
            );
            Ok(())
        }
        Err(e) => {
            error!("evaluation failed: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inception_eval::core::constants::{DEFAULT_IMAGES_DIR, DEFAULT_MANIFEST_PATH};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn parse(args: &[&str]) -> EvalConfig {
        let mut argv = vec!["inception-eval"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap().into_config().unwrap()
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = config_file(
            r#"{"graph_path": "file/graph.onnx", "labels_path": "file/labels.txt"}"#,
        );
        let path = file.path().to_str().unwrap();

        let config = parse(&["--config", path, "--graph", "flag/graph.onnx", "--skip-failures"]);

        assert_eq!(config.graph_path, PathBuf::from("flag/graph.onnx"));
        assert_eq!(config.labels_path, PathBuf::from("file/labels.txt"));
        assert_eq!(config.manifest_path, PathBuf::from(DEFAULT_MANIFEST_PATH));
        assert_eq!(config.failure_policy, FailurePolicy::Skip);
    }

    #[test]
    fn test_config_file_policy_kept_without_flag() {
        let file = config_file(r#"{"failure_policy": "Skip", "images_dir": "file/images"}"#);
        let path = file.path().to_str().unwrap();

        let config = parse(&["--config", path, "--manifest", "flag/tags.tsv"]);

        assert_eq!(config.failure_policy, FailurePolicy::Skip);
        assert_eq!(config.images_dir, PathBuf::from("file/images"));
        assert_eq!(config.manifest_path, PathBuf::from("flag/tags.tsv"));
    }

    #[test]
    fn test_no_arguments_uses_defaults() {
        let config = parse(&[]);
        assert_eq!(config, EvalConfig::new());
        assert_eq!(config.images_dir, PathBuf::from(DEFAULT_IMAGES_DIR));
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_skip_failures_flag_alone() {
        let config = parse(&["--skip-failures", "--labels", "l.txt", "-i", "imgs"]);
        assert_eq!(config.failure_policy, FailurePolicy::Skip);
        assert_eq!(config.labels_path, PathBuf::from("l.txt"));
        assert_eq!(config.images_dir, PathBuf::from("imgs"));
    }
}
