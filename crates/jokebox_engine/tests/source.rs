use std::time::Duration;

use jokebox_core::Joke;
use jokebox_engine::{FailureKind, FetchSettings, JokeSource, ReqwestJokeSource};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> ReqwestJokeSource {
    let settings = FetchSettings::with_base_url(format!("{}/jokes", server.uri()));
    ReqwestJokeSource::new(settings).expect("source")
}

#[tokio::test]
async fn random_joke_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [],
            "icon_url": "https://example.com/chuck.png",
            "id": "Xq1",
            "url": "https://example.com/jokes/Xq1",
            "value": "Chuck Norris can unit test entire applications with a single assert."
        })))
        .mount(&server)
        .await;

    let joke = source_for(&server).random(None).await.expect("fetch ok");
    assert_eq!(
        joke,
        Joke::new(
            "Xq1",
            "Chuck Norris can unit test entire applications with a single assert."
        )
    );
}

#[tokio::test]
async fn category_is_sent_as_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/random"))
        .and(query_param("category", "dev ops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "D1",
            "value": "x",
            "categories": ["dev ops"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let joke = source_for(&server)
        .random(Some("dev ops"))
        .await
        .expect("fetch ok");
    assert_eq!(joke.categories, vec!["dev ops".to_string()]);
}

#[tokio::test]
async fn categories_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["dev", "food"])))
        .mount(&server)
        .await;

    let categories = source_for(&server).categories().await.expect("fetch ok");
    assert_eq!(categories, vec!["dev".to_string(), "food".to_string()]);
}

#[tokio::test]
async fn unknown_category_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/random"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .random(Some("nope"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn empty_category_body_is_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = source_for(&server).random(Some("dev")).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::EmptyCategoryResult {
            category: "dev".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_body_fails_to_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/random"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let err = source_for(&server).random(None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn non_json_content_type_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/random"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let err = source_for(&server).random(None).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn source_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/random"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"id": "slow", "value": "x"})),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::with_base_url(format!("{}/jokes", server.uri()))
    };
    let source = ReqwestJokeSource::new(settings).expect("source");

    let err = source.random(None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn source_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("[\"0123456789\"]", "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::with_base_url(format!("{}/jokes", server.uri()))
    };
    let source = ReqwestJokeSource::new(settings).expect("source");

    let err = source.categories().await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(14)
        }
    );
}

#[test]
fn invalid_base_url_is_rejected_up_front() {
    let err = ReqwestJokeSource::new(FetchSettings::with_base_url("::nope")).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn record_without_value_fails_to_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/random"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "abc", "categories": []})),
        )
        .mount(&server)
        .await;

    let err = source_for(&server).random(None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn empty_category_response_body_is_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jokes/random"))
        .and(query_param("category", "dev"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = source_for(&server).random(Some("dev")).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::EmptyCategoryResult {
            category: "dev".to_string()
        }
    );
}
