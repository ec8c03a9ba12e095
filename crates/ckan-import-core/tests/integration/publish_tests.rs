//! Publisher workflow tests.

use ckan_import_core::{CandidateFile, PublishOutcome, PublishRequest, Publisher, Visibility};
use serde_json::json;

use super::common::{write_file, MockCkanApi, MockReply};

fn request_for(path: &std::path::Path) -> PublishRequest {
    let file = CandidateFile::from_path(path).unwrap();
    PublishRequest::for_candidate(&file, Visibility::Private, "geo-org")
}

#[tokio::test]
async fn test_publish_success_creates_then_uploads() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "My Report.pdf", "pdf-bytes");

    let api = MockCkanApi::new();
    let publisher = Publisher::new(api.clone());

    let outcome = publisher.publish(&request_for(&path)).await;

    assert_eq!(outcome, PublishOutcome::Success);

    let packages = api.packages();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].name, "my-report");
    assert_eq!(packages[0].title, "My Report");
    assert_eq!(packages[0].owner_org, "geo-org");
    assert_eq!(packages[0].private, Visibility::Private);

    let resources = api.resources();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].package_id, "my-report");
    assert_eq!(resources[0].name, "My Report.pdf");
    assert_eq!(api.uploaded_bytes(), vec![b"pdf-bytes".to_vec()]);
    assert_eq!(api.open_handles(), 0);
}

#[tokio::test]
async fn test_duplicate_name_stops_before_upload() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "dup.csv", "a,b");

    let api = MockCkanApi::new().on_create(MockReply::Reject(
        409,
        json!({"__type": "Validation Error", "name": ["That URL is already in use."]}),
    ));
    let publisher = Publisher::new(api.clone());

    let outcome = publisher.publish(&request_for(&path)).await;

    assert_eq!(
        outcome,
        PublishOutcome::Failure {
            reason: Some("That URL is already in use.".to_string())
        }
    );
    assert_eq!(api.create_calls(), 1);
    assert_eq!(api.upload_calls(), 0);
    assert_eq!(api.open_handles(), 0);
}

#[tokio::test]
async fn test_create_failure_prefers_message() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "x.csv", "");

    let api = MockCkanApi::new().on_create(MockReply::Reject(
        403,
        json!({
            "message": "Access denied: User not authorized to create packages",
            "owner_org": ["Organization does not exist"],
            "name": ["That URL is already in use."]
        }),
    ));
    let outcome = Publisher::new(api.clone()).publish(&request_for(&path)).await;

    assert_eq!(
        outcome.reason(),
        Some("Access denied: User not authorized to create packages")
    );
    assert_eq!(api.upload_calls(), 0);
}

#[tokio::test]
async fn test_create_failure_missing_organization() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "x.csv", "");

    let api = MockCkanApi::new().on_create(MockReply::Reject(
        409,
        json!({"__type": "Validation Error", "owner_org": ["Organization does not exist"]}),
    ));
    let outcome = Publisher::new(api.clone()).publish(&request_for(&path)).await;

    assert_eq!(outcome.reason(), Some("Organization does not exist"));
}

#[tokio::test]
async fn test_create_failure_without_known_fields_has_no_reason() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "x.csv", "");

    let api = MockCkanApi::new().on_create(MockReply::Reject(
        500,
        json!({"__type": "Internal Server Error"}),
    ));
    let outcome = Publisher::new(api.clone()).publish(&request_for(&path)).await;

    assert_eq!(outcome, PublishOutcome::Failure { reason: None });
    assert_eq!(api.upload_calls(), 0);
}

#[tokio::test]
async fn test_upload_failure_leaves_dataset_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "Big File.zip", "zip");

    let api = MockCkanApi::new().on_upload(MockReply::Reject(
        409,
        json!({"name": ["Upload rejected by storage backend"]}),
    ));
    let outcome = Publisher::new(api.clone()).publish(&request_for(&path)).await;

    assert_eq!(
        outcome,
        PublishOutcome::Failure {
            reason: Some("Upload rejected by storage backend".to_string())
        }
    );
    // The dataset was created and nothing tried to remove it.
    assert_eq!(api.create_calls(), 1);
    assert_eq!(api.upload_calls(), 1);
    assert_eq!(api.open_handles(), 0);
}

#[tokio::test]
async fn test_upload_failure_ignores_message_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "x.csv", "");

    let api = MockCkanApi::new().on_upload(MockReply::Reject(
        403,
        json!({"message": "Access denied"}),
    ));
    let outcome = Publisher::new(api).publish(&request_for(&path)).await;

    assert_eq!(outcome, PublishOutcome::Failure { reason: None });
}

#[tokio::test]
async fn test_transport_error_on_create_becomes_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "x.csv", "");

    let api = MockCkanApi::new().on_create(MockReply::Transport("Connection refused".to_string()));
    let outcome = Publisher::new(api.clone()).publish(&request_for(&path)).await;

    assert_eq!(
        outcome.reason(),
        Some("Network error: Connection refused")
    );
    assert_eq!(api.upload_calls(), 0);
}

#[tokio::test]
async fn test_missing_resource_file_becomes_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vanished.pdf");

    let api = MockCkanApi::new();
    let outcome = Publisher::new(api.clone()).publish(&request_for(&path)).await;

    assert!(!outcome.is_success());
    assert!(outcome.reason().unwrap().starts_with("I/O error"));
    assert_eq!(api.create_calls(), 1);
    assert_eq!(api.open_handles(), 0);
}
