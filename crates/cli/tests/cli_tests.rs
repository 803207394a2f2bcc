use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chartboard() -> Command {
    let mut cmd = Command::cargo_bin("chartboard").unwrap();
    for var in ["CHARTBOARD_API_URL", "CHARTBOARD_SESSION", "CHARTBOARD_AVATAR_URL", "CHARTBOARD_PAGE_SIZE", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_help() {
    chartboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Browse your chart-generation jobs"));
}

#[test]
fn test_cli_list_help() {
    chartboard().arg("list").arg("--help").assert().success().stdout(predicate::str::contains("page-size"));
}

#[test]
fn test_cli_list_rejects_zero_page() {
    chartboard()
        .args(["list", "--page", "0", "--api-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page"));
}

#[test]
fn test_cli_list_unreachable_service() {
    chartboard()
        .args(["list", "--api-url", "http://127.0.0.1:9", "--max-retries", "0", "--timeout-secs", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load my charts"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_list_prints_board() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chart/my/list/page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "data": {
                "records": [
                    {
                        "id": 11,
                        "name": "Weekly users",
                        "goal": "user growth",
                        "chartType": "line",
                        "status": 2,
                        "genChart": "{\"title\":{\"text\":\"Hidden title\"},\"xAxis\":{\"data\":[\"Mon\",\"Tue\"]},\"series\":[{\"type\":\"line\",\"data\":[3,5]}]}"
                    },
                    {"id": 12, "name": "Revenue", "status": 0},
                    {"id": 13, "name": "Churn", "status": 3, "execMsg": "AI service error"}
                ],
                "total": 7
            },
            "message": "ok"
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        chartboard().args(["list", "--api-url", &uri, "--avatar-url", "http://img/me.png"]).output().unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Weekly users"));
    assert!(stdout.contains("Analysis goal: user growth"));
    assert!(stdout.contains("x: Mon, Tue"));
    assert!(!stdout.contains("Hidden title"));
    assert!(stdout.contains("Waiting to generate"));
    assert!(stdout.contains("AI service error"));
    assert!(stdout.contains("<http://img/me.png>"));
    assert!(stdout.contains("Total: 7"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("loaded my charts"), "info logs are on by default: {stderr}");
}
