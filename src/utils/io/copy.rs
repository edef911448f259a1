//! Copying routed signal files into their bucket directories
//!
//! Files keep their names. Existing destination files are never
//! overwritten: the collision policy decides between aborting and
//! skipping. Under `Fail` the whole plan is checked first, so a rejected
//! run writes nothing. Copies of distinct files share no state and run in
//! parallel.

use indicatif::ParallelProgressIterator;
use log::{info, warn};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::util::{ensure_directory, safe_open_file};
use crate::error::{CohortError, Result};
use crate::models::{Bucket, FileRoutingDecision};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

/// What to do when a destination file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Abort the copy step
    #[default]
    Fail,
    /// Leave the existing file and continue
    Skip,
}

/// Result of the copy step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopySummary {
    /// Files copied
    pub copied: usize,
    /// Files left alone because the destination existed
    pub skipped: usize,
}

/// Destination directories for the two buckets
#[derive(Debug, Clone)]
pub struct BucketDirs {
    /// Directory for healthy subjects
    pub healthy: PathBuf,
    /// Directory for subjects with neuropathy
    pub neuropathy: PathBuf,
}

impl BucketDirs {
    /// Directory for a bucket
    #[must_use]
    pub fn dir(&self, bucket: Bucket) -> &Path {
        match bucket {
            Bucket::Healthy => &self.healthy,
            Bucket::Neuropathy => &self.neuropathy,
        }
    }

    /// Destination path of a routed file
    pub fn destination(&self, decision: &FileRoutingDecision) -> Result<PathBuf> {
        let name = decision.source.file_name().ok_or_else(|| {
            CohortError::Config(format!(
                "Routed path has no file name: {}",
                decision.source.display()
            ))
        })?;
        Ok(self.dir(decision.bucket).join(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyOutcome {
    Copied,
    Skipped,
}

/// Check a copy plan before anything is written
///
/// Rejects two sources that land on the same destination. Under
/// `CollisionPolicy::Fail` a destination that already exists is rejected
/// here as well.
pub fn check_plan(
    decisions: &[FileRoutingDecision],
    dirs: &BucketDirs,
    policy: CollisionPolicy,
) -> Result<()> {
    let mut seen = FxHashSet::default();
    for decision in decisions {
        let destination = dirs.destination(decision)?;
        let exists = policy == CollisionPolicy::Fail && destination.exists();
        if exists || !seen.insert(destination.clone()) {
            return Err(CohortError::DestinationExists { path: destination });
        }
    }
    Ok(())
}

/// Copy every routed file into its bucket directory
///
/// # Arguments
/// * `decisions` - Files and their buckets
/// * `dirs` - Bucket destination directories
/// * `policy` - Behavior when a destination already exists
/// * `threads` - Size of the copy thread pool
pub fn copy_routed_files(
    decisions: &[FileRoutingDecision],
    dirs: &BucketDirs,
    policy: CollisionPolicy,
    threads: usize,
) -> Result<CopySummary> {
    check_plan(decisions, dirs, policy)?;
    ensure_directory(&dirs.healthy)?;
    ensure_directory(&dirs.neuropathy)?;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let pb = create_main_progress_bar(decisions.len() as u64, Some("Copying signal files"));

    let outcomes = pool.install(|| {
        decisions
            .par_iter()
            .progress_with(pb.clone())
            .map(|decision| copy_one(decision, dirs, policy))
            .collect::<Result<Vec<_>>>()
    });
    finish_progress_bar(&pb, Some("Copy finished"));
    let outcomes = outcomes?;

    let summary = CopySummary {
        copied: outcomes.iter().filter(|o| **o == CopyOutcome::Copied).count(),
        skipped: outcomes.iter().filter(|o| **o == CopyOutcome::Skipped).count(),
    };
    info!(
        "Copied {} signal files ({} skipped as already present)",
        summary.copied, summary.skipped
    );
    Ok(summary)
}

fn copy_one(
    decision: &FileRoutingDecision,
    dirs: &BucketDirs,
    policy: CollisionPolicy,
) -> Result<CopyOutcome> {
    let destination = dirs.destination(decision)?;
    let mut input = safe_open_file(&decision.source, "signal file")?;

    // `create_new` makes the existence check and the creation one step.
    let output = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&destination)
    {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return match policy {
                CollisionPolicy::Fail => Err(CohortError::DestinationExists { path: destination }),
                CollisionPolicy::Skip => {
                    warn!("{} already exists; skipping", destination.display());
                    Ok(CopyOutcome::Skipped)
                }
            };
        }
        Err(e) => return Err(CohortError::io(&destination, e)),
    };

    write_contents(&mut input, output, &destination)?;

    if let Ok(metadata) = fs::metadata(&decision.source) {
        // Permissions are copied best-effort.
        let _ = fs::set_permissions(&destination, metadata.permissions());
    }
    Ok(CopyOutcome::Copied)
}

/// Fill a freshly created destination; on failure the partial file is removed
fn write_contents<R: Read>(input: &mut R, mut output: fs::File, destination: &Path) -> Result<()> {
    let written = io::copy(input, &mut output).and_then(|_| output.sync_all());
    if let Err(e) = written {
        drop(output);
        let _ = fs::remove_file(destination);
        return Err(CohortError::io(destination, e));
    }
    Ok(())
}
