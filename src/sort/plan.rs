//! Copy planning
//!
//! Every destination is resolved before any file is written, so that each
//! copy in a run owns a distinct destination path and concurrent copies never
//! write to the same file. The category folders a run creates count as taken
//! too, so an extensionless file named like a category never lands on one.

use super::classify::{category_dir, category_key, destination_for};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What to do when a destination path is already taken
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Replace the existing file; within one run the last file found wins
    #[default]
    Overwrite,
    /// Keep the existing file and leave the new one uncopied
    Skip,
    /// Copy under the first free name `stem (N).ext`
    Rename,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConflictPolicy::Overwrite => "overwrite",
            ConflictPolicy::Skip => "skip",
            ConflictPolicy::Rename => "rename",
        };
        f.write_str(name)
    }
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(ConflictPolicy::Overwrite),
            "skip" => Ok(ConflictPolicy::Skip),
            "rename" => Ok(ConflictPolicy::Rename),
            other => Err(format!("unknown conflict policy: {other}")),
        }
    }
}

/// One file to copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyJob {
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Destination already exists and the policy is `skip`
    Exists { destination: PathBuf },
    /// A later file in the same run claimed the destination
    Superseded { by: PathBuf },
    /// The destination is a category folder this run copies into
    CategoryFolder { folder: PathBuf },
    NoFileName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Exists { destination } => {
                write!(f, "destination exists: {}", destination.display())
            }
            SkipReason::Superseded { by } => write!(f, "superseded by {}", by.display()),
            SkipReason::CategoryFolder { folder } => {
                write!(f, "category folder {} has the same name", folder.display())
            }
            SkipReason::NoFileName => f.write_str("path has no file name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyPlan {
    pub jobs: Vec<CopyJob>,
    pub skipped: Vec<SkippedFile>,
}

/// Plan copies against the real filesystem
pub fn plan_copies(files: Vec<PathBuf>, output_root: &Path, policy: ConflictPolicy) -> CopyPlan {
    plan_copies_with(files, output_root, policy, |path| path.exists())
}

/// Plan copies, asking `exists` whether a destination is already on disk
pub fn plan_copies_with<F>(
    files: Vec<PathBuf>,
    output_root: &Path,
    policy: ConflictPolicy,
    exists: F,
) -> CopyPlan
where
    F: Fn(&Path) -> bool,
{
    let mut plan = CopyPlan::default();
    // destination -> index into plan.jobs
    let mut claimed: HashMap<PathBuf, usize> = HashMap::new();
    let folders: HashSet<PathBuf> = files
        .iter()
        .filter(|path| path.file_name().is_some() && !category_key(path).is_empty())
        .map(|path| category_dir(path, output_root))
        .collect();

    for source in files {
        let Some(destination) = destination_for(&source, output_root) else {
            plan.skipped.push(SkippedFile {
                path: source,
                reason: SkipReason::NoFileName,
            });
            continue;
        };

        match policy {
            ConflictPolicy::Overwrite if folders.contains(&destination) => {
                plan.skipped.push(SkippedFile {
                    path: source,
                    reason: SkipReason::CategoryFolder {
                        folder: destination,
                    },
                });
            }
            ConflictPolicy::Overwrite => {
                if let Some(&index) = claimed.get(&destination) {
                    let previous = std::mem::replace(&mut plan.jobs[index].source, source.clone());
                    plan.skipped.push(SkippedFile {
                        path: previous,
                        reason: SkipReason::Superseded { by: source },
                    });
                } else {
                    claimed.insert(destination.clone(), plan.jobs.len());
                    plan.jobs.push(CopyJob {
                        source,
                        destination,
                    });
                }
            }
            ConflictPolicy::Skip => {
                if claimed.contains_key(&destination)
                    || folders.contains(&destination)
                    || exists(&destination)
                {
                    plan.skipped.push(SkippedFile {
                        path: source,
                        reason: SkipReason::Exists { destination },
                    });
                } else {
                    claimed.insert(destination.clone(), plan.jobs.len());
                    plan.jobs.push(CopyJob {
                        source,
                        destination,
                    });
                }
            }
            ConflictPolicy::Rename => {
                let mut candidate = destination.clone();
                let mut n = 1;
                while claimed.contains_key(&candidate)
                    || folders.contains(&candidate)
                    || exists(&candidate)
                {
                    candidate = numbered_name(&destination, n);
                    n += 1;
                }
                claimed.insert(candidate.clone(), plan.jobs.len());
                plan.jobs.push(CopyJob {
                    source,
                    destination: candidate,
                });
            }
        }
    }

    plan
}

/// `dir/stem (n).ext`, or `dir/stem (n)` without an extension
pub fn numbered_name(destination: &Path, n: usize) -> PathBuf {
    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match destination.extension() {
        Some(ext) => format!("{stem} ({n}).{}", ext.to_string_lossy()),
        None => format!("{stem} ({n})"),
    };
    destination.with_file_name(name)
}
