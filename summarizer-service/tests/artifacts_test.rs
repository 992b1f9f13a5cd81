mod common;

use common::{test_config, TestApp};
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use summarizer_service::services::providers::mock::MockSummaryProvider;

async fn files_with_prefix(dir: &str, prefix: &str) -> Vec<String> {
    let mut names = Vec::new();
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return names;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(prefix) {
            names.push(name);
        }
    }
    names.sort();
    names
}

fn suffix(name: &str) -> &str {
    &name[4..]
}

#[tokio::test]
async fn success_writes_request_and_response_with_shared_stamp() {
    let mut config = test_config();
    config.artifacts.enabled = true;
    let app = TestApp::spawn(config, MockSummaryProvider::replying("Short.")).await;

    let response = app
        .post_summarize(json!({ "inputText": "Quarterly revenue rose 12%." }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let requests = files_with_prefix(&app.artifact_dir, "req_").await;
    let responses = files_with_prefix(&app.artifact_dir, "res_").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(responses.len(), 1);
    assert_eq!(suffix(&requests[0]), suffix(&responses[0]));

    let raw = tokio::fs::read(Path::new(&app.artifact_dir).join(&requests[0]))
        .await
        .unwrap();
    let record: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(record["kind"], "req");
    assert_eq!(record["payload"]["model"], "gpt-4o-mini");
    assert_eq!(record["payload"]["inputLength"], 27);
    assert_eq!(record["payload"]["messages"][0]["role"], "system");
    assert_eq!(record["payload"]["messages"][1]["role"], "user");

    app.cleanup().await;
}

#[tokio::test]
async fn failure_writes_error_artifact_with_request_payload() {
    let mut config = test_config();
    config.artifacts.enabled = true;
    let app = TestApp::spawn(config, MockSummaryProvider::failing("boom")).await;

    let response = app.post_summarize(json!({ "inputText": "Some text" })).await;
    assert_eq!(response.status().as_u16(), 500);

    let requests = files_with_prefix(&app.artifact_dir, "req_").await;
    let errors = files_with_prefix(&app.artifact_dir, "err_").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(suffix(&requests[0]), suffix(&errors[0]));

    let raw = tokio::fs::read(Path::new(&app.artifact_dir).join(&errors[0]))
        .await
        .unwrap();
    let record: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(record["kind"], "err");
    assert_eq!(record["payload"]["request"]["inputLength"], 9);
    assert!(record["payload"]["error"].as_str().unwrap().contains("boom"));

    app.cleanup().await;
}

#[tokio::test]
async fn empty_input_writes_only_an_error_artifact() {
    let mut config = test_config();
    config.artifacts.enabled = true;
    let app = TestApp::spawn(config, MockSummaryProvider::replying("unused")).await;

    let response = app.post_summarize(json!({ "inputText": "   " })).await;
    assert_eq!(response.status().as_u16(), 400);

    let errors = files_with_prefix(&app.artifact_dir, "err_").await;
    assert_eq!(errors.len(), 1);
    assert!(files_with_prefix(&app.artifact_dir, "req_").await.is_empty());
    assert!(files_with_prefix(&app.artifact_dir, "res_").await.is_empty());

    let raw = tokio::fs::read(Path::new(&app.artifact_dir).join(&errors[0]))
        .await
        .unwrap();
    let record: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(record["kind"], "err");
    assert_eq!(record["payload"]["request"]["inputText"], "   ");
    assert_eq!(record["payload"]["error"], "inputText must not be empty");
    assert_eq!(app.provider.calls(), 0);

    app.cleanup().await;
}

#[tokio::test]
async fn requests_in_different_seconds_get_distinct_files() {
    let mut config = test_config();
    config.artifacts.enabled = true;
    let app = TestApp::spawn(config, MockSummaryProvider::replying("Short.")).await;

    app.post_summarize(json!({ "inputText": "first" })).await;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    app.post_summarize(json!({ "inputText": "second" })).await;

    let requests = files_with_prefix(&app.artifact_dir, "req_").await;
    assert_eq!(requests.len(), 2);
    assert_ne!(requests[0], requests[1]);

    app.cleanup().await;
}

#[tokio::test]
async fn unwritable_artifact_directory_does_not_change_outcome() {
    let mut config = test_config();
    config.artifacts.enabled = true;
    // A regular file where the directory should be.
    tokio::fs::create_dir_all("target").await.unwrap();
    tokio::fs::write(&config.artifacts.directory, b"occupied")
        .await
        .unwrap();
    let app = TestApp::spawn(config, MockSummaryProvider::replying("Still fine.")).await;

    let response = app.post_summarize(json!({ "inputText": "text" })).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["summary"], "Still fine.");

    let _ = tokio::fs::remove_file(&app.artifact_dir).await;
}
