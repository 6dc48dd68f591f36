//! Writes uploaded chapter files to disk for the duration of one initialize
//! call. The backend only receives file names, so the files must exist under
//! exactly those names in the upload directory while the call is in flight.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ragdesk_common::{ChapterFile, RagdeskError, Result};
use tracing::{debug, warn};

/// Files written by [`StagedFiles::write`]. Removal is explicit so the caller
/// decides, per cleanup policy, whether a failed call keeps them.
#[derive(Debug)]
pub struct StagedFiles {
    paths: Vec<PathBuf>,
    names: Vec<String>,
}

impl StagedFiles {
    /// Write every file under its original name in `dir`. If any write fails
    /// the files already written are removed before the error is returned.
    pub async fn write(dir: &Path, files: &[ChapterFile]) -> Result<Self> {
        let mut seen = HashSet::new();
        for file in files {
            if !seen.insert(file.name()) {
                return Err(RagdeskError::Upload(format!(
                    "duplicate file name: {}",
                    file.name()
                )));
            }
        }

        let mut staged = Self { paths: Vec::with_capacity(files.len()), names: Vec::new() };
        for file in files {
            let path = dir.join(file.name());
            if let Err(e) = tokio::fs::write(&path, file.bytes()).await {
                warn!("Failed to stage {}: {}", path.display(), e);
                staged.remove().await;
                return Err(e.into());
            }
            debug!("Staged {} ({} bytes)", path.display(), file.bytes().len());
            staged.paths.push(path);
            staged.names.push(file.name().to_string());
        }
        Ok(staged)
    }

    /// Names sent to the backend, in upload order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn count(&self) -> usize {
        self.paths.len()
    }

    /// Remove every staged file, returning how many were removed. Failures are
    /// logged, not returned: a leftover file must not mask the backend outcome.
    pub async fn remove(self) -> usize {
        let mut removed = 0;
        for path in &self.paths {
            match tokio::fs::remove_file(path).await {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove staged file {}: {}", path.display(), e),
            }
        }
        removed
    }

    /// Leave the files on disk.
    pub fn keep(self) -> Vec<PathBuf> {
        debug!("Keeping {} staged file(s)", self.paths.len());
        self.paths
    }
}
