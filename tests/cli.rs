use std::path::Path;
use std::process::{Command, Output};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BIN: &str = env!("CARGO_BIN_EXE_docsite_artifacts");

fn run_search_index(input: &Path, output: &Path) -> Output {
    Command::new(BIN)
        .arg("search-index")
        .arg("--index-input")
        .arg(input)
        .arg("--index-output")
        .arg(output)
        .arg("--base-url")
        .arg("https://site/guide")
        .env("RUST_LOG", "warn")
        .output()
        .expect("run CLI")
}

#[test]
fn search_index_writes_normalized_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("algolia.json");
    let output = dir.path().join("out/convertedData.json");
    std::fs::write(
        &input,
        r##"[
            {"url": "/intro#setup", "lvl0": "Guide", "lvl1": "Setup"},
            {"url": "#foo", "lvl0": "Guide", "lvl1": "Foo"},
            {"url": "/plain", "lvl0": "API", "lvl1": "Plain"}
        ]"##,
    )
    .unwrap();

    let result = run_search_index(&input, &output);
    assert!(
        result.status.success(),
        "cli exited with {}: {}",
        result.status,
        String::from_utf8_lossy(&result.stderr)
    );

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let urls: Vec<_> = written
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["url"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://site/guide/intro/setup",
            "https://site/guide/foo",
            "https://site/guide/plain",
        ]
    );
    assert_eq!(written[0]["type"], "lvl1");
    assert_eq!(
        written[0]["_highlightResult"]["hierarchy_camel"][0],
        written[0]["_highlightResult"]["hierarchy"]
    );
}

#[test]
fn search_index_empty_input_writes_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("algolia.json");
    let output = dir.path().join("convertedData.json");
    std::fs::write(&input, "[]").unwrap();

    let result = run_search_index(&input, &output);
    assert!(result.status.success());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "[]");
}

#[test]
fn search_index_schema_error_exits_non_zero_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("algolia.json");
    let output = dir.path().join("convertedData.json");
    std::fs::write(&input, r#"[{"url": "/a", "lvl0": "Guide", "lvl1": ""}]"#).unwrap();

    let result = run_search_index(&input, &output);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert_eq!(stderr.matches("schema error").count(), 1, "stderr: {stderr}");
    assert!(!output.exists());
}

#[tokio::test]
async fn changelog_renders_releases_from_api() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[
                {"tag_name": "v1.1.0", "name": "v1.1.0", "body": "Second", "published_at": "2024-01-15T10:30:00Z"},
                {"tag_name": "v1.0.0", "name": "v1.0.0", "body": "First", "published_at": "2023-12-02T10:30:00Z"}
            ]"#,
        ))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("changelog.md");

    let result = tokio::process::Command::new(BIN)
        .arg("changelog")
        .arg("--releases-url")
        .arg(format!("{}/repos/owner/repo/releases", mock_server.uri()))
        .arg("--changelog-output")
        .arg(&output)
        .env("RUST_LOG", "warn")
        .output()
        .await
        .expect("run CLI");

    assert!(
        result.status.success(),
        "cli exited with {}: {}",
        result.status,
        String::from_utf8_lossy(&result.stderr)
    );
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "# Changelog\n\n## v1.1.0 - 1/15/2024\nSecond\n\n## v1.0.0 - 12/2/2023\nFirst\n\n"
    );
}

#[tokio::test]
async fn changelog_api_failure_exits_non_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("changelog.md");

    let result = tokio::process::Command::new(BIN)
        .arg("changelog")
        .arg("--releases-url")
        .arg(format!("{}/releases", mock_server.uri()))
        .arg("--changelog-output")
        .arg(&output)
        .output()
        .await
        .expect("run CLI");

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("network error"));
    assert!(!output.exists());
}
