//! Import service: walks dataset directories and publishes every match.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::models::{CandidateFile, PublishRequest, Visibility};
use crate::publish::{PublishOutcome, Publisher};
use crate::scan::{scan_directory, ExtensionFilter};
use crate::stats::ImportStats;
use crate::traits::CkanApi;

/// Sequential import of files into one CKAN organization.
///
/// Files are processed one at a time; a failed file never stops the run.
pub struct ImportService<C> {
    publisher: Publisher<C>,
    filter: ExtensionFilter,
    visibility: Visibility,
    owner_org: String,
}

impl<C: CkanApi> ImportService<C> {
    pub fn new(
        api: C,
        filter: ExtensionFilter,
        visibility: Visibility,
        owner_org: impl Into<String>,
    ) -> Self {
        Self {
            publisher: Publisher::new(api),
            filter,
            visibility,
            owner_org: owner_org.into(),
        }
    }

    pub fn publisher(&self) -> &Publisher<C> {
        &self.publisher
    }

    /// Imports every directory in order and returns the combined counters.
    pub async fn run(&self, dirs: &[PathBuf]) -> ImportStats {
        let mut stats = ImportStats::new();
        for dir in dirs {
            stats.merge(self.import_directory(dir).await);
        }
        info!(
            "Import complete: {} imported, {} failed out of {} total ({} directories)",
            stats.succeeded, stats.failed, stats.total, stats.directories
        );
        stats
    }

    /// Imports one directory tree.
    ///
    /// A directory that cannot be traversed is logged and counted as
    /// processed with no files.
    pub async fn import_directory(&self, dir: &Path) -> ImportStats {
        let mut stats = ImportStats::new();
        info!("Processing dataset directory: {}", dir.display());

        match scan_directory(dir, &self.filter) {
            Ok(files) => {
                for file in &files {
                    let outcome = self.import_file(file).await;
                    stats.record(&outcome);
                }
            }
            Err(e) => error!("Cannot scan {}: {}", dir.display(), e),
        }

        stats.record_directory();
        stats
    }

    /// Derives the dataset identity for `file` and publishes it.
    pub async fn import_file(&self, file: &CandidateFile) -> PublishOutcome {
        let request = PublishRequest::for_candidate(file, self.visibility, &self.owner_org);
        let outcome = self.publisher.publish(&request).await;

        match &outcome {
            PublishOutcome::Success => {
                info!("SUCCESS: imported dataset \"{}\"", request.title)
            }
            PublishOutcome::Failure { reason } => error!(
                "FAILED: cannot import dataset \"{}\" (got error message \"{}\")",
                request.title,
                reason.as_deref().unwrap_or("none")
            ),
        }

        outcome
    }
}
