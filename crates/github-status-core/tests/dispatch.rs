//! Status dispatch against a mock GitHub API

use github_status_core::{
    DispatchError,
    PluginConfig,
    RequestFailure,
    StatusPlugin,
};
use serde_json::json;
use wiremock::matchers::{
    body_json,
    body_partial_json,
    header,
    method,
    path,
};
use wiremock::{
    Mock,
    MockServer,
    ResponseTemplate,
};

const SHA: &str = "6dcb09b5b57875f334f61aebed695e2e4193db5e";
const STATUSES_PATH: &str =
    "/repos/test-owner/test-repo/statuses/6dcb09b5b57875f334f61aebed695e2e4193db5e";

fn test_config(base_url: &str, contexts: &[&str]) -> PluginConfig {
    PluginConfig {
        base_url: base_url.to_string(),
        build_status: "failure".to_string(),
        commit_sha: SHA.to_string(),
        contexts: contexts.iter().map(|c| c.to_string()).collect(),
        description: "cool descrip".to_string(),
        repo_name: "test-repo".to_string(),
        repo_owner: "test-owner".to_string(),
        state: "success".to_string(),
        target_url: "https://link.to.com/build".to_string(),
        token: Some("fake".to_string()),
        ..PluginConfig::default()
    }
}

fn expected_body(context: &str) -> serde_json::Value {
    json!({
        "description": "cool descrip",
        "state": "success",
        "target_url": "https://link.to.com/build",
        "context": context,
    })
}

#[tokio::test]
async fn creates_a_single_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STATUSES_PATH))
        .and(header("authorization", "token fake"))
        .and(body_json(expected_body("some/context")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let plugin = StatusPlugin::new(test_config(&server.uri(), &["some/context"])).unwrap();
    plugin.exec().await.unwrap();
}

#[tokio::test]
async fn creates_statuses_in_context_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STATUSES_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let plugin = StatusPlugin::new(test_config(
        &server.uri(),
        &["some/context", "another/context"],
    ))
    .unwrap();
    plugin.exec().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let bodies: Vec<serde_json::Value> = requests
        .iter()
        .map(|r| r.body_json().unwrap())
        .collect();

    assert_eq!(
        bodies,
        vec![expected_body("some/context"), expected_body("another/context")]
    );
}

#[tokio::test]
async fn no_contexts_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let plugin = StatusPlugin::new(test_config(&server.uri(), &[])).unwrap();
    plugin.exec().await.unwrap();
}

#[tokio::test]
async fn uninitialized_plugin_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let plugin = StatusPlugin::uninitialized(test_config(&server.uri(), &["some/context"]));
    let err = plugin.exec().await.unwrap_err();

    assert!(matches!(err, DispatchError::NotInitialized));
}

#[tokio::test]
async fn first_failure_stops_dispatch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STATUSES_PATH))
        .and(body_partial_json(json!({ "context": "some/context" })))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(STATUSES_PATH))
        .and(body_partial_json(json!({ "context": "another/context" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let plugin = StatusPlugin::new(test_config(
        &server.uri(),
        &["some/context", "another/context"],
    ))
    .unwrap();
    let err = plugin.exec().await.unwrap_err();

    match err {
        DispatchError::RequestFailed { context, source } => {
            assert_eq!(context, "some/context");
            match source {
                RequestFailure::Status { status, body } => {
                    assert_eq!(status.as_u16(), 500);
                    assert_eq!(body, "boom");
                }
                other => panic!("unexpected failure: {other}"),
            }
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn any_success_status_is_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STATUSES_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let plugin = StatusPlugin::new(test_config(&server.uri(), &["some/context"])).unwrap();
    plugin.exec().await.unwrap();
}

#[tokio::test]
async fn basic_auth_uses_trimmed_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STATUSES_PATH))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let config = PluginConfig {
        token: None,
        username: Some(" user ".to_string()),
        password: Some("pass ".to_string()),
        ..test_config(&server.uri(), &["some/context"])
    };

    StatusPlugin::new(config).unwrap().exec().await.unwrap();
}

#[tokio::test]
async fn build_status_is_reported_without_user_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(STATUSES_PATH))
        .and(body_partial_json(json!({ "state": "failure" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let config = PluginConfig {
        state: String::new(),
        ..test_config(&server.uri(), &["some/context"])
    };

    StatusPlugin::new(config).unwrap().exec().await.unwrap();
}

#[tokio::test]
async fn scenario_single_context_with_bare_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/o/r/statuses/abc"))
        .and(header("authorization", "token t"))
        .and(body_partial_json(json!({
            "state": "success",
            "context": "ci/build",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    // server.uri() has no trailing slash
    let config = PluginConfig {
        base_url: server.uri(),
        token: Some("t".to_string()),
        repo_owner: "o".to_string(),
        repo_name: "r".to_string(),
        commit_sha: "abc".to_string(),
        state: "success".to_string(),
        contexts: vec!["ci/build".to_string()],
        ..PluginConfig::default()
    };

    StatusPlugin::new(config).unwrap().exec().await.unwrap();
}

#[tokio::test]
async fn transport_error_is_request_failure() {
    let plugin = StatusPlugin::new(test_config("http://127.0.0.1:1", &["some/context"])).unwrap();
    let err = plugin.exec().await.unwrap_err();

    assert!(matches!(
        err,
        DispatchError::RequestFailed {
            source: RequestFailure::Transport(_),
            ..
        }
    ));
}
