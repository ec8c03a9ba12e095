//! Two-phase dataset publishing: create the dataset, then attach the file.
//!
//! ```text
//! Start → Creating → CreateFailed
//!                  → Created → Uploading → UploadFailed
//!                                        → UploadSucceeded
//! ```
//!
//! There are no retries and no backward transitions. A dataset whose upload
//! failed stays on the portal without its resource.

use std::fmt;

use tracing::{debug, warn};

use crate::models::PublishRequest;
use crate::response::{
    extract_reason, ActionResponse, ReasonExtractor, CREATE_REASON_EXTRACTORS,
    UPLOAD_REASON_EXTRACTORS,
};
use crate::traits::CkanApi;
use crate::AppError;

/// Result of publishing a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Success,
    Failure {
        /// Reason reported by the portal, if one could be extracted.
        reason: Option<String>,
    },
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The failure reason, or `None` for a success or an unexplained failure.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { reason } => reason.as_deref(),
        }
    }
}

/// States of a single publish run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Creating,
    CreateFailed,
    Created,
    Uploading,
    UploadFailed,
    UploadSucceeded,
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Creating => "creating",
            Self::CreateFailed => "create failed",
            Self::Created => "created",
            Self::Uploading => "uploading",
            Self::UploadFailed => "upload failed",
            Self::UploadSucceeded => "upload succeeded",
        };
        f.write_str(s)
    }
}

/// Publishes files as datasets through a [`CkanApi`].
///
/// # Examples
///
/// ```no_run
/// use ckan_import_core::{CandidateFile, CkanApi, PublishRequest, Publisher, Visibility};
///
/// # async fn example<C: CkanApi>(api: C) {
/// let publisher = Publisher::new(api);
/// let file = CandidateFile::from_path("/data/Budget 2024.xlsx").unwrap();
/// let request = PublishRequest::for_candidate(&file, Visibility::Private, "finance");
///
/// let outcome = publisher.publish(&request).await;
/// println!("{:?}", outcome);
/// # }
/// ```
pub struct Publisher<C> {
    api: C,
}

impl<C: CkanApi> Publisher<C> {
    pub fn new(api: C) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    /// Creates the dataset and uploads its resource.
    ///
    /// Never fails: API rejections and transport errors alike become
    /// [`PublishOutcome::Failure`]. The upload is only attempted after the
    /// dataset was created.
    pub async fn publish(&self, request: &PublishRequest) -> PublishOutcome {
        debug!(dataset = %request.name, stage = %PublishStage::Creating, "package_create");
        let created = self.api.package_create(&request.package()).await;
        if let Some(reason) = failure_reason(created, CREATE_REASON_EXTRACTORS) {
            debug!(dataset = %request.name, stage = %PublishStage::CreateFailed, ?reason);
            return PublishOutcome::Failure { reason };
        }
        debug!(dataset = %request.name, stage = %PublishStage::Created);

        debug!(
            dataset = %request.name,
            stage = %PublishStage::Uploading,
            file = %request.resource_path.display(),
            "resource_create"
        );
        let uploaded = self.api.resource_create(&request.resource()).await;
        if let Some(reason) = failure_reason(uploaded, UPLOAD_REASON_EXTRACTORS) {
            warn!(
                dataset = %request.name,
                stage = %PublishStage::UploadFailed,
                "Dataset was created but its resource upload failed"
            );
            return PublishOutcome::Failure { reason };
        }
        debug!(dataset = %request.name, stage = %PublishStage::UploadSucceeded);

        PublishOutcome::Success
    }
}

/// `None` when the call succeeded, otherwise `Some(reason)`.
fn failure_reason(
    response: Result<ActionResponse, AppError>,
    extractors: &[ReasonExtractor],
) -> Option<Option<String>> {
    match response {
        Ok(ActionResponse::Success { .. }) => None,
        Ok(ActionResponse::Failure { status, error }) => {
            debug!(?status, ?error, "CKAN rejected the request");
            Some(extract_reason(&error, extractors))
        }
        Err(e) => Some(Some(e.to_string())),
    }
}
