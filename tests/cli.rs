// Command line tests: run the `thoth` binary against a fake Thoth API
// served by wiremock.

use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::TestEnv;

mod common;

#[tokio::test(flavor = "multi_thread")]
async fn sends_key_from_config_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/posts/p1"))
        .and(header("X-API-Key", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": "p1", "status": "draft"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::with_key("abc123");
    env.cmd(&server.uri())
        .args(["get-post", "p1"])
        .assert()
        .success()
        .stdout("Post ID: p1\n\nStatus: draft\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn api_key_flag_overrides_config_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/brand-styles"))
        .and(header("X-API-Key", "from-flag"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::with_key("from-file");
    env.cmd(&server.uri())
        .args(["--api-key", "from-flag", "get-brand-styles"])
        .assert()
        .success()
        .stdout("Brand Styles (0):\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_post_sends_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/posts"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "content": "hello",
            "platforms": ["twitter", "linkedin"],
            "createImage": false,
            "length": "medium",
            "createHashtags": false,
            "postToSocialNetworks": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"postId": "new-1", "status": "draft"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::with_key("abc123");
    env.cmd(&server.uri())
        .args(["create-post", "hello", "--platforms", "twitter", "linkedin"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Post ID: new-1\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_post_with_every_option() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/posts"))
        .and(body_json(json!({
            "content": "launch day",
            "platforms": ["instagram"],
            "createImage": true,
            "length": "long",
            "createHashtags": true,
            "postToSocialNetworks": true,
            "scheduleTime": "2026-11-01T09:00:00Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"postId": "new-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::with_key("abc123");
    env.cmd(&server.uri())
        .args([
            "create-post",
            "launch day",
            "--platforms",
            "instagram",
            "--schedule",
            "2026-11-01T09:00:00Z",
            "--image",
            "--length",
            "long",
            "--hashtags",
            "--post-now",
        ])
        .assert()
        .success()
        .stdout("Post ID: new-2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn json_flag_prints_raw_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/posts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": "p1"}
        })))
        .mount(&server)
        .await;

    let env = TestEnv::with_key("abc123");
    let out = env
        .cmd(&server.uri())
        .args(["--json", "get-post", "p1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("{\n  \"success\": true,"));
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!({"success": true, "data": {"id": "p1"}}));
}

#[tokio::test(flavor = "multi_thread")]
async fn api_failure_envelope_is_formatted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/brand-styles/missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "not found"
        })))
        .mount(&server)
        .await;

    let env = TestEnv::with_key("abc123");
    env.cmd(&server.uri())
        .args(["get-brand-style", "missing"])
        .assert()
        .success()
        .stdout("Error: not found\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_posts_formats_each_post() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/posts"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("status", "draft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "posts": [
                    {"id": "a", "status": "draft", "createdAt": "2026-10-01"},
                    {"id": "b", "title": "Launch", "status": "draft", "createdAt": "2026-10-02"}
                ],
                "pagination": {"total": 2}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::with_key("abc123");
    env.cmd(&server.uri())
        .args(["list-posts", "--page", "2", "--limit", "5", "--status", "draft"])
        .assert()
        .success()
        .stdout(
            "Total Posts: 2\n\n\
             ID: a\n  Status: draft\n  Created: 2026-10-01\n\n\
             ID: b\n  Title: Launch\n  Status: draft\n  Created: 2026-10-02\n\n",
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn update_post_sends_only_given_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/posts/p1"))
        .and(body_json(json!({"title": "New title", "status": "published"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": "p1", "status": "published"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::with_key("abc123");
    env.cmd(&server.uri())
        .args([
            "update-post",
            "p1",
            "--title",
            "New title",
            "--status",
            "published",
        ])
        .assert()
        .success()
        .stdout("Post ID: p1\n\nStatus: published\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_post_sends_platform_contents() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/posts/p1"))
        .and(body_json(json!({
            "platformContents": [
                {"platform": "twitter", "content": "short take"},
                {"platform": "linkedin", "content": "longer take"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": "p1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::with_key("abc123");
    env.cmd(&server.uri())
        .args([
            "update-post",
            "p1",
            "--platform-contents",
            r#"[{"platform":"twitter","content":"short take"},{"platform":"linkedin","content":"longer take"}]"#,
        ])
        .assert()
        .success()
        .stdout("Post ID: p1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_exits_with_status_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/posts/p1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let env = TestEnv::with_key("abc123");
    env.cmd(&server.uri())
        .args(["get-post", "p1"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "Error: HTTP Error 401: invalid api key\n",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.cmd(&server.uri())
        .args(["get-brand-styles"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: API key not found. Please create"))
        .stderr(predicate::str::contains(".config/thoth/config"));
}

#[test]
fn unreachable_api_fails() {
    let env = TestEnv::with_key("abc123");
    env.cmd("http://127.0.0.1:9")
        .args(["get-post", "p1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Request failed:"));
}

#[test]
fn no_command_prints_help_and_fails() {
    let env = TestEnv::with_key("abc123");
    env.cmd("http://127.0.0.1:9")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("create-post"));
}

#[test]
fn unknown_command_fails() {
    let env = TestEnv::with_key("abc123");
    env.cmd("http://127.0.0.1:9")
        .arg("delete-everything")
        .assert()
        .code(1);
}

#[test]
fn configure_writes_key() {
    let env = TestEnv::new();
    std::fs::write(&env.config, "# thoth\nTHOTH_API_KEY=old\n").unwrap();

    env.cmd("http://127.0.0.1:9")
        .args(["--api-key", "fresh", "configure"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API key saved to"));

    let contents = std::fs::read_to_string(&env.config).unwrap();
    assert_eq!(contents, "# thoth\nTHOTH_API_KEY=fresh\n");
}
