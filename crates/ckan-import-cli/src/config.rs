use clap::Parser;
use std::path::PathBuf;

use ckan_import_core::{
    normalize_base_url, AppError, ExtensionFilter, ImportDefaults, Visibility, DEFAULT_EXTENSIONS,
};

/// CLI configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "ckan-import")]
#[command(author, version, about = "Import dataset files to CKAN")]
#[command(after_help = "Examples:
  ckan-import -c http://myckan.site/ -a $CKAN_API_KEY -o my-org -d ./datasets
  ckan-import -c http://myckan.site/ -o my-org -d ./a ./b -e .pdf .csv -p False

Defaults for --ckan-base-url, --owner-org, --private and --exts-upload can be
set in ~/.config/ckan-import/config.toml.")]
pub struct Config {
    /// The URL of the CKAN site (example: http://myckan.site/)
    #[arg(short = 'c', long, env = "CKAN_BASE_URL")]
    pub ckan_base_url: Option<String>,

    /// The CKAN API key (must have the permission to create datasets)
    #[arg(short = 'a', long, env = "CKAN_API_KEY", hide_env_values = true)]
    pub ckan_api_key: String,

    /// Directory path(s) containing dataset files to import
    #[arg(short = 'd', long, num_args = 1.., required = true)]
    pub dirs: Vec<PathBuf>,

    /// File extensions to upload
    /// (defaults to: .docx .xlsx .pptx .doc .xls .ppt .odt .ods .odp .pdf .csv .zip)
    #[arg(short = 'e', long, num_args = 1..)]
    pub exts_upload: Option<Vec<String>>,

    /// Set the visibility of the datasets to private (True or False, defaults to: True)
    #[arg(short = 'p', long)]
    pub private: Option<Visibility>,

    /// The owner organization of the datasets
    #[arg(short = 'o', long, env = "CKAN_OWNER_ORG")]
    pub owner_org: Option<String>,

    /// Custom path to a config.toml with default values
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Fully resolved settings for one import run.
#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub base_url: String,
    pub api_key: String,
    pub dirs: Vec<PathBuf>,
    pub filter: ExtensionFilter,
    pub visibility: Visibility,
    pub owner_org: String,
}

impl Config {
    /// Merges command-line values over file defaults.
    pub fn resolve(self, defaults: Option<ImportDefaults>) -> Result<ImportSettings, AppError> {
        let defaults = defaults.unwrap_or_default();

        let base_url = self
            .ckan_base_url
            .or(defaults.ckan_base_url)
            .ok_or_else(|| AppError::ConfigError("missing --ckan-base-url".to_string()))?;

        let owner_org = self
            .owner_org
            .or(defaults.owner_org)
            .ok_or_else(|| AppError::ConfigError("missing --owner-org".to_string()))?;

        let filter = match self.exts_upload.or(defaults.exts_upload) {
            Some(exts) => ExtensionFilter::new(exts),
            None => ExtensionFilter::new(DEFAULT_EXTENSIONS),
        };

        Ok(ImportSettings {
            base_url: normalize_base_url(&base_url),
            api_key: self.ckan_api_key,
            dirs: self.dirs,
            filter,
            visibility: self.private.or(defaults.private).unwrap_or_default(),
            owner_org,
        })
    }
}
