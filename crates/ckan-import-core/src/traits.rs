//! Trait definitions for external dependencies.
//!
//! The publishing workflow talks to CKAN only through [`CkanApi`], so it can
//! be exercised against an in-memory mock in tests.

use std::future::Future;

use crate::models::{NewPackage, NewResource};
use crate::response::ActionResponse;
use crate::AppError;

/// Write access to the CKAN action API.
///
/// Implementations return `Ok` with an [`ActionResponse`] whenever the portal
/// answered at all, including API-level rejections. `Err` is reserved for
/// transport failures (connection refused, timeout) and local I/O errors.
pub trait CkanApi: Send + Sync {
    /// Calls `package_create`.
    fn package_create(
        &self,
        package: &NewPackage,
    ) -> impl Future<Output = Result<ActionResponse, AppError>> + Send;

    /// Calls `resource_create`, uploading the file at `resource.path`.
    ///
    /// The file must be opened only for the duration of the call and
    /// released on every exit path.
    fn resource_create(
        &self,
        resource: &NewResource,
    ) -> impl Future<Output = Result<ActionResponse, AppError>> + Send;
}
