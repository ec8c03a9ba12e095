//! ckan-import Core - Domain types, publishing workflow, error handling, and configuration.
//!
//! Each local file becomes one CKAN dataset: its name is derived from the
//! file name ([`derive_name`]), the dataset is created, and the file is then
//! uploaded as the dataset's resource ([`Publisher`]). [`ImportService`]
//! drives this over whole directory trees.

pub mod config;
pub mod error;
pub mod models;
pub mod naming;
pub mod publish;
pub mod response;
pub mod scan;
pub mod service;
pub mod stats;
pub mod traits;

pub use config::{
    default_config_path, load_import_defaults, normalize_base_url, HttpConfig, ImportDefaults,
};
pub use error::AppError;
pub use models::{CandidateFile, NewPackage, NewResource, PublishRequest, Visibility};
pub use naming::{derive_name, MAX_NAME_LEN};
pub use publish::{PublishOutcome, PublishStage, Publisher};
pub use response::{
    extract_reason, ActionError, ActionResponse, ReasonExtractor, CREATE_REASON_EXTRACTORS,
    UPLOAD_REASON_EXTRACTORS,
};
pub use scan::{scan_directory, validate_directories, ExtensionFilter, DEFAULT_EXTENSIONS};
pub use service::ImportService;
pub use stats::ImportStats;
pub use traits::CkanApi;
