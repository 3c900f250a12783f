#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_lists_resources() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("theoneapi");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("movie"))
        .stdout(predicate::str::contains("quote"));
}

#[test]
fn test_quote_help_lists_list_for_movie() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("theoneapi");
    cmd.args(["quote", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list-for-movie"));
}

#[test]
fn test_movie_find_requires_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("theoneapi");
    cmd.args(["movie", "find"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_missing_api_key_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("theoneapi");
    cmd.env_remove("THE_ONE_API_KEY")
        .arg("--dir")
        .arg(dir.path())
        .args(["movie", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("THE_ONE_API_KEY"));
}

#[test]
fn test_config_set_key_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let mut set = cargo_bin_cmd!("theoneapi");
    set.arg("--dir")
        .arg(dir.path())
        .args(["config", "set-key", "stored-secret"])
        .assert()
        .success();

    // Assert
    let content = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(content.contains("stored-secret"));

    let mut show = cargo_bin_cmd!("theoneapi");
    show.arg("--dir")
        .arg(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API key: set"))
        .stdout(predicate::str::contains("stored-secret").not());
}

#[tokio::test]
async fn test_movie_list_against_mock_server() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    let json_body = include_str!("../../../fixtures/theoneapi/list_movies.json");

    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/v2/movie"))
        .and(wiremock::matchers::header("Authorization", "Bearer cli-key"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("theoneapi");
    cmd.env_remove("THE_ONE_API_KEY")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .arg("--dir")
        .arg(dir.path())
        .args(["--api-key", "cli-key"])
        .args(["--base-url", &format!("{}/v2/", mock_server.uri())])
        .args(["movie", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Hobbit Series"))
        .stdout(predicate::str::contains("Total: 4 movies"));
}

#[tokio::test]
async fn test_quote_find_unknown_id_reports_http_error() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    let error_body = include_str!("../../../fixtures/theoneapi/error_something_went_wrong.json");

    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/v2/quote/id_doesnt_exist"))
        .respond_with(wiremock::ResponseTemplate::new(500).set_body_string(error_body))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("theoneapi");
    cmd.env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .arg("--dir")
        .arg(dir.path())
        .args(["--api-key", "cli-key"])
        .args(["--base-url", &format!("{}/v2/", mock_server.uri())])
        .args(["quote", "find", "--id", "id_doesnt_exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Something went wrong."));
}
