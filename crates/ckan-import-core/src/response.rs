//! CKAN action API responses and failure-reason extraction.
//!
//! CKAN answers every action call with
//!
//! ```json
//! { "success": true, "result": { ... } }
//! ```
//!
//! or, on failure,
//!
//! ```json
//! {
//!     "success": false,
//!     "error": { "__type": "Validation Error", "name": ["That URL is already in use."] }
//! }
//! ```
//!
//! The shape of `error` depends on what went wrong. Every slot is optional
//! here and a slot that is missing (or has an unexpected type) simply counts
//! as not applicable.

use serde::Deserialize;
use serde_json::Value;

/// Decoded outcome of a single CKAN action call.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResponse {
    Success {
        result: Value,
    },
    Failure {
        /// HTTP status, when the response came from the network.
        status: Option<u16>,
        error: ActionError,
    },
}

/// Error slots CKAN may put in a failed response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionError {
    pub message: Option<String>,
    pub owner_org: Option<Vec<String>>,
    pub name: Option<Vec<String>>,
    pub error_type: Option<String>,
}

/// Raw envelope, decoded leniently.
#[derive(Deserialize, Debug, Default)]
struct RawEnvelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

impl ActionResponse {
    /// Classifies an HTTP response from a CKAN action endpoint.
    ///
    /// Only a 2xx status together with `"success": true` is a success. A body
    /// that is not JSON, or lacks the expected fields, yields a
    /// [`ActionResponse::Failure`] with empty error slots.
    ///
    /// ```
    /// use ckan_import_core::ActionResponse;
    ///
    /// let body = br#"{"success": false, "error": {"name": ["That URL is already in use."]}}"#;
    /// let resp = ActionResponse::from_http(409, body);
    /// assert!(!resp.is_success());
    /// ```
    pub fn from_http(status: u16, body: &[u8]) -> Self {
        let envelope: RawEnvelope = serde_json::from_slice(body).unwrap_or_default();

        if (200..300).contains(&status) && envelope.success == Some(true) {
            return Self::Success {
                result: envelope.result.unwrap_or(Value::Null),
            };
        }

        Self::Failure {
            status: Some(status),
            error: envelope
                .error
                .as_ref()
                .map(ActionError::from_value)
                .unwrap_or_default(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl ActionError {
    /// Reads the known slots out of an arbitrary `error` value.
    pub fn from_value(value: &Value) -> Self {
        Self {
            message: string_slot(value, "message"),
            owner_org: list_slot(value, "owner_org"),
            name: list_slot(value, "name"),
            error_type: string_slot(value, "__type"),
        }
    }
}

fn string_slot(value: &Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(str::to_string)
}

fn list_slot(value: &Value, key: &str) -> Option<Vec<String>> {
    let items = value.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}

/// Pulls one human-readable reason out of an [`ActionError`].
pub type ReasonExtractor = fn(&ActionError) -> Option<String>;

/// General message, e.g. an unauthorized API key.
pub fn message_reason(error: &ActionError) -> Option<String> {
    error.message.clone()
}

/// Owner organization problems, e.g. the organization does not exist.
pub fn owner_org_reason(error: &ActionError) -> Option<String> {
    error.owner_org.as_ref()?.first().cloned()
}

/// Conflicts on the identifier field, e.g. a duplicate dataset name.
pub fn name_reason(error: &ActionError) -> Option<String> {
    error.name.as_ref()?.first().cloned()
}

/// Extractors for a failed `package_create`, in priority order.
pub const CREATE_REASON_EXTRACTORS: &[ReasonExtractor] =
    &[message_reason, owner_org_reason, name_reason];

/// Extractors for a failed `resource_create`.
pub const UPLOAD_REASON_EXTRACTORS: &[ReasonExtractor] = &[name_reason];

/// Returns the first reason produced by `extractors`, in order.
pub fn extract_reason(error: &ActionError, extractors: &[ReasonExtractor]) -> Option<String> {
    extractors.iter().find_map(|extract| extract(error))
}
