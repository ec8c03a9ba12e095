//! ckan-import CLI - Command-line interface for importing files into CKAN
//!
//! This crate provides the CLI application that ties together all ckan-import components.

pub mod config;

pub use config::{Config, ImportSettings};
