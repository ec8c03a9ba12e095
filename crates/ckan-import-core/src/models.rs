//! Domain models for the import workflow.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::naming::derive_name;

/// A local file selected for import.
///
/// Produced by directory traversal and consumed exactly once by the
/// publishing workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Full path to the file on disk.
    pub path: PathBuf,
    /// File name including its extension.
    pub file_name: String,
}

impl CandidateFile {
    /// Builds a candidate from a path, or `None` if the path has no
    /// UTF-8 file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_str()?.to_string();
        Some(Self { path, file_name })
    }

    /// The dataset title: the file name cut at its first `.`.
    ///
    /// ```
    /// use ckan_import_core::CandidateFile;
    ///
    /// let file = CandidateFile::from_path("/data/Annual Report.2024.pdf").unwrap();
    /// assert_eq!(file.title(), "Annual Report");
    /// ```
    pub fn title(&self) -> &str {
        match self.file_name.split_once('.') {
            Some((title, _)) => title,
            None => &self.file_name,
        }
    }
}

/// Dataset visibility on the portal.
///
/// CKAN receives the flag as one of two literal strings: `"True"` for a
/// private dataset and `"False"` for a public one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    #[serde(rename = "True")]
    Private,
    #[serde(rename = "False")]
    Public,
}

impl Visibility {
    /// The literal sent to CKAN in the `private` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "True",
            Self::Public => "False",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = AppError;

    /// Accepts exactly `"True"` or `"False"`, case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "True" => Ok(Self::Private),
            "False" => Ok(Self::Public),
            other => Err(AppError::InvalidVisibility(other.to_string())),
        }
    }
}

/// Everything needed to publish one file as one dataset.
///
/// Built fresh for each [`CandidateFile`] and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub name: String,
    pub title: String,
    pub visibility: Visibility,
    pub owner_org: String,
    pub resource_path: PathBuf,
    pub resource_name: String,
}

impl PublishRequest {
    /// Derives the dataset identity from the candidate's file name and
    /// attaches the run-wide visibility and organization.
    pub fn for_candidate(file: &CandidateFile, visibility: Visibility, owner_org: &str) -> Self {
        let title = file.title().to_string();
        Self {
            name: derive_name(&title),
            title,
            visibility,
            owner_org: owner_org.to_string(),
            resource_path: file.path.clone(),
            resource_name: file.file_name.clone(),
        }
    }

    /// Payload for the `package_create` call.
    pub fn package(&self) -> NewPackage {
        NewPackage {
            name: self.name.clone(),
            title: self.title.clone(),
            private: self.visibility,
            owner_org: self.owner_org.clone(),
        }
    }

    /// Payload for the `resource_create` call.
    pub fn resource(&self) -> NewResource {
        NewResource {
            package_id: self.name.clone(),
            name: self.resource_name.clone(),
            path: self.resource_path.clone(),
        }
    }
}

/// Form fields sent to `package_create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPackage {
    pub name: String,
    pub title: String,
    pub private: Visibility,
    pub owner_org: String,
}

/// Fields sent to `resource_create`, plus the local file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    pub package_id: String,
    pub name: String,
    pub path: PathBuf,
}

impl NewResource {
    pub fn path(&self) -> &Path {
        &self.path
    }
}
