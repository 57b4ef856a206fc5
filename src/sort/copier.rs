//! Concurrent file copying
//!
//! Copies run concurrently with at most `max_parallel` in flight. Each copy
//! stands alone: a failure is logged and recorded, and the other copies carry
//! on untouched.

use super::plan::CopyJob;
use crate::error::{Error, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

/// A copy that was abandoned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyFailure {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct CopyResults {
    pub copied: Vec<CopyJob>,
    pub bytes_copied: u64,
    pub failures: Vec<CopyFailure>,
}

/// Copy one file, creating its category folder first
///
/// Returns the number of bytes written.
pub async fn copy_file(job: &CopyJob) -> Result<u64> {
    let copy_error = |source: std::io::Error| Error::Copy {
        source_path: job.source.clone(),
        destination: job.destination.clone(),
        source,
    };

    if let Some(parent) = job.destination.parent() {
        fs::create_dir_all(parent).await.map_err(copy_error)?;
    }

    let bytes = fs::copy(&job.source, &job.destination)
        .await
        .map_err(copy_error)?;

    info!("File copied successfully: {}", job.source.display());
    debug!("{} -> {} ({} bytes)", job.source.display(), job.destination.display(), bytes);
    Ok(bytes)
}

/// Copy every job, bounded to `max_parallel` concurrent copies
pub async fn copy_all(
    jobs: Vec<CopyJob>,
    max_parallel: usize,
    progress: Option<ProgressBar>,
) -> CopyResults {
    let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));

    let futures = jobs.into_iter().map(|job| {
        let semaphore = semaphore.clone();
        let progress = progress.clone();

        async move {
            let _permit = semaphore.acquire().await.ok();
            let result = copy_file(&job).await;
            if let Some(progress) = &progress {
                progress.inc(1);
            }
            (job, result)
        }
    });

    let mut results = CopyResults::default();
    for (job, result) in join_all(futures).await {
        match result {
            Ok(bytes) => {
                results.bytes_copied += bytes;
                results.copied.push(job);
            }
            Err(e) => {
                error!("{}", e);
                results.failures.push(CopyFailure {
                    source: job.source,
                    destination: job.destination,
                    error: e.to_string(),
                });
            }
        }
    }

    if let Some(progress) = progress {
        progress.finish_with_message(format!(
            "Completed: {} copied, {} failed",
            results.copied.len(),
            results.failures.len()
        ));
    }

    results
}

pub fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        .map(|style| style.progress_chars("█▓▒░ "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message("Copying files");
    pb
}
