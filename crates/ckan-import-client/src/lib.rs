//! ckan-import Client - HTTP client for the CKAN action API
//!
//! This crate provides [`CkanClient`], the network implementation of
//! [`ckan_import_core::CkanApi`]. It handles authentication, form and
//! multipart request building, and turns raw HTTP responses into
//! [`ckan_import_core::ActionResponse`] values.

pub mod ckan;

pub use ckan::CkanClient;
