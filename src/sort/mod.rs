//! Pipeline A: sort files into folders by extension
//!
//! The walk runs to completion first, then every destination is planned, then
//! the copies run concurrently under a fixed bound.

pub mod classify;
pub mod copier;
pub mod plan;
pub mod walker;

pub use classify::{category_key, destination_for};
pub use copier::{copy_all, copy_file, CopyFailure, CopyResults};
pub use plan::{plan_copies, ConflictPolicy, CopyJob, CopyPlan, SkipReason, SkippedFile};
pub use walker::FileWalker;

use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Options for one `sort` run
#[derive(Debug, Clone)]
pub struct SortOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    pub max_parallel: usize,
    pub on_conflict: ConflictPolicy,
    pub show_progress: bool,
}

impl SortOptions {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            max_parallel: 64,
            on_conflict: ConflictPolicy::default(),
            show_progress: false,
        }
    }
}

/// Outcome of a `sort` run
#[derive(Debug, Clone, Serialize)]
pub struct SortReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub discovered: usize,
    pub copied: usize,
    pub bytes_copied: u64,
    pub skipped: Vec<SkippedFile>,
    pub failed: Vec<CopyFailure>,
    pub traversal_errors: usize,
}

impl SortReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.traversal_errors == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Sorted {} of {} files into {} ({} skipped, {} failed, {} traversal errors)",
            self.copied,
            self.discovered,
            self.output.display(),
            self.skipped.len(),
            self.failed.len(),
            self.traversal_errors
        )
    }
}

/// Walk `options.source` and copy every file into `options.output/<category>/`
pub async fn run(options: &SortOptions) -> Result<SortReport> {
    let source = options.source.clone();
    let output = options.output.clone();
    let walker = FileWalker::with_excluded(&source, Some(output.as_path()))?;

    let (files, traversal_errors) = tokio::task::spawn_blocking(move || {
        let mut walker = walker;
        let files: Vec<PathBuf> = walker.by_ref().collect();
        (files, walker.error_count())
    })
    .await?;

    let discovered = files.len();
    info!(
        "Found {} files under {} ({} traversal errors)",
        discovered,
        options.source.display(),
        traversal_errors
    );

    let plan = plan_copies(files, &options.output, options.on_conflict);
    for skipped in &plan.skipped {
        info!("Skipping file {}: {}", skipped.path.display(), skipped.reason);
    }

    let progress = options
        .show_progress
        .then(|| copier::create_progress_bar(plan.jobs.len()));
    let results = copy_all(plan.jobs, options.max_parallel, progress).await;

    let report = SortReport {
        source: options.source.clone(),
        output: options.output.clone(),
        discovered,
        copied: results.copied.len(),
        bytes_copied: results.bytes_copied,
        skipped: plan.skipped,
        failed: results.failures,
        traversal_errors,
    };
    info!("{}", report.summary());
    Ok(report)
}
