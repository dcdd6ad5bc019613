//! Batch driver: convert every raw instance in a directory.
//!
//! Per-file failures are reported and recorded but never abort the rest
//! of the batch; each file's conversion is an independent, re-runnable
//! unit of work.

use crate::convert::{self, ConvertOptions};
use crate::error::Result;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Batch run configuration.
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Where `.psa` files go; `None` writes them beside their inputs.
    pub output_dir: Option<PathBuf>,
    pub options: ConvertOptions,
}

/// What happened to one file of the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub file: String,
    pub status: OutcomeStatus,
    pub dialect: Option<String>,
    pub num_nodes: Option<usize>,
    pub num_tasks: Option<usize>,
    pub capacity: Option<i64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Converted,
    Failed,
}

/// Results of a whole batch run.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub started_at: String,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn num_converted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Converted)
            .count()
    }

    pub fn num_failed(&self) -> usize {
        self.outcomes.len() - self.num_converted()
    }

    /// Export one row per file.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for outcome in &self.outcomes {
            writer.serialize(outcome).map_err(|e| {
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Human-readable summary block.
    pub fn report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("        PSA Conversion Report\n");
        report.push_str("========================================\n");
        report.push_str(&format!("Started: {}\n", self.started_at));
        report.push_str(&format!(
            "Files: {} converted, {} failed\n",
            self.num_converted(),
            self.num_failed()
        ));

        for outcome in &self.outcomes {
            match outcome.status {
                OutcomeStatus::Converted => {
                    report.push_str(&format!(
                        "  {} [{}]: {} nodes, {} tasks, capacity {}\n",
                        outcome.file,
                        outcome.dialect.as_deref().unwrap_or("?"),
                        outcome.num_nodes.unwrap_or(0),
                        outcome.num_tasks.unwrap_or(0),
                        outcome.capacity.unwrap_or(0)
                    ));
                }
                OutcomeStatus::Failed => {
                    report.push_str(&format!(
                        "  {} FAILED: {}\n",
                        outcome.file,
                        outcome.error.as_deref().unwrap_or("unknown error")
                    ));
                }
            }
        }

        report
    }
}

/// Raw instance files of a directory, name-sorted so runs over the same
/// directory always process in the same order. Already-converted `.psa`
/// files are not inputs.
fn list_instance_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().map(|e| e == "psa").unwrap_or(false) {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Convert every raw instance file in `dir`.
pub fn run_batch(dir: &Path, config: &BatchConfig) -> Result<BatchSummary> {
    let files = list_instance_files(dir)?;
    log::info!("found {} instance files in {}", files.len(), dir.display());

    if let Some(out_dir) = &config.output_dir {
        std::fs::create_dir_all(out_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    let mut outcomes = Vec::with_capacity(files.len());

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let output = match &config.output_dir {
            Some(out_dir) => out_dir.join(format!("{}.psa", file_name)),
            None => convert::default_output_path(path),
        };

        let outcome = match convert::convert_file(path, &output, &config.options) {
            Ok(conversion) => FileOutcome {
                file: file_name,
                status: OutcomeStatus::Converted,
                dialect: Some(conversion.dialect.to_string()),
                num_nodes: Some(conversion.instance.num_nodes()),
                num_tasks: Some(conversion.instance.num_tasks()),
                capacity: Some(conversion.instance.capacity),
                error: None,
            },
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                FileOutcome {
                    file: file_name,
                    status: OutcomeStatus::Failed,
                    dialect: None,
                    num_nodes: None,
                    num_tasks: None,
                    capacity: None,
                    error: Some(e.to_string()),
                }
            }
        };

        outcomes.push(outcome);
        progress.inc(1);
    }

    progress.finish_and_clear();

    Ok(BatchSummary {
        started_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("psa-batch-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    const GOOD: &str = "\
10 1
0 0 0 0 0 100000
1 3 0 2 0 100
2 3 4 0 0 100
";

    #[test]
    fn test_failures_do_not_abort_batch() {
        let dir = scratch_dir("mixed");
        std::fs::write(dir.join("a_good"), GOOD).unwrap();
        std::fs::write(dir.join("b_broken"), "not an instance\n").unwrap();
        std::fs::write(dir.join("c_good"), GOOD).unwrap();

        let summary = run_batch(&dir, &BatchConfig::default()).unwrap();

        assert_eq!(summary.outcomes.len(), 3);
        assert_eq!(summary.num_converted(), 2);
        assert_eq!(summary.num_failed(), 1);
        // Name-sorted processing order.
        assert_eq!(summary.outcomes[1].file, "b_broken");
        assert_eq!(summary.outcomes[1].status, OutcomeStatus::Failed);

        assert!(dir.join("a_good.psa").exists());
        assert!(!dir.join("b_broken.psa").exists());
        assert!(dir.join("c_good.psa").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_psa_files_are_not_inputs() {
        let dir = scratch_dir("skip");
        std::fs::write(dir.join("inst"), GOOD).unwrap();
        std::fs::write(dir.join("old.psa"), "3 10 0\n").unwrap();

        let summary = run_batch(&dir, &BatchConfig::default()).unwrap();
        assert_eq!(summary.outcomes.len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_output_dir_and_csv_export() {
        let dir = scratch_dir("outdir");
        let out = dir.join("converted");
        std::fs::write(dir.join("inst"), GOOD).unwrap();

        let config = BatchConfig {
            output_dir: Some(out.clone()),
            ..Default::default()
        };
        let summary = run_batch(&dir, &config).unwrap();
        assert!(out.join("inst.psa").exists());

        let csv_path = dir.join("summary.csv");
        summary.export_csv(&csv_path).unwrap();
        let csv_text = std::fs::read_to_string(&csv_path).unwrap();
        assert!(csv_text.starts_with("file,status,"));
        assert!(csv_text.contains("inst,converted"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_report_mentions_failures() {
        let summary = BatchSummary {
            started_at: "2026-01-01 00:00:00".to_string(),
            outcomes: vec![FileOutcome {
                file: "broken".to_string(),
                status: OutcomeStatus::Failed,
                dialect: None,
                num_nodes: None,
                num_tasks: None,
                capacity: None,
                error: Some("malformed instance (line 1): bad header".to_string()),
            }],
        };

        let report = summary.report();
        assert!(report.contains("0 converted, 1 failed"));
        assert!(report.contains("broken FAILED"));
    }
}
