//! Tests for the autocomplete API client

use super::*;
use crate::record::Identifier;
use mockito::{Matcher, Server};

fn client_for(server: &Server) -> ApiClient {
    ApiClient::new(&format!("{}/api/", server.url())).unwrap()
}

fn search_query(query: &str, record_type: &str, exclude: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("query".into(), query.into()),
        Matcher::UrlEncoded("type".into(), record_type.into()),
        Matcher::UrlEncoded("exclude".into(), exclude.into()),
    ])
}

#[tokio::test]
async fn test_search_returns_pages() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/search/")
        .match_query(search_query("foo", "page", ""))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"pages": [{"id": 1, "label": "Foo"}]}"#)
        .create_async()
        .await;

    let pages = client_for(&server).search("foo", "page", "").await.unwrap();

    mock.assert_async().await;
    assert_eq!(pages, vec![Record::new(1, "Foo")]);
}

#[tokio::test]
async fn test_search_sends_exclusions() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/search/")
        .match_query(search_query("ba", "blog.BlogTag", "1,2"))
        .with_status(200)
        .with_body(r#"{"pages": []}"#)
        .create_async()
        .await;

    let pages = client_for(&server)
        .search("ba", "blog.BlogTag", "1,2")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_search_non_200_is_status_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/search/")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("Forbidden")
        .create_async()
        .await;

    let err = client_for(&server).search("x", "page", "").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            code: 403,
            message: "Forbidden".to_string()
        }
    );
}

#[tokio::test]
async fn test_search_other_2xx_is_not_success() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/search/")
        .match_query(Matcher::Any)
        .with_status(204)
        .create_async()
        .await;

    let err = client_for(&server).search("x", "page", "").await.unwrap_err();

    assert!(matches!(err, ApiError::Status { code: 204, .. }));
}

#[tokio::test]
async fn test_search_keeps_rows_with_null_labels() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/search/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"pages": [{"id": 1, "label": null}, {"id": 2, "label": "Two"}]}"#)
        .create_async()
        .await;

    let pages = client_for(&server).search("t", "page", "").await.unwrap();

    assert_eq!(pages, vec![Record::partial(1), Record::new(2, "Two")]);
}

#[tokio::test]
async fn test_search_missing_pages_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/search/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .create_async()
        .await;

    let err = client_for(&server).search("x", "page", "").await.unwrap_err();

    assert!(matches!(err, ApiError::Malformed(_)));
}

#[tokio::test]
async fn test_search_non_array_pages_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/search/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"pages": {"id": 1}}"#)
        .create_async()
        .await;

    let err = client_for(&server).search("x", "page", "").await.unwrap_err();

    assert!(matches!(err, ApiError::Malformed(_)));
}

#[tokio::test]
async fn test_search_invalid_json_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/search/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>login</html>")
        .create_async()
        .await;

    let err = client_for(&server).search("x", "page", "").await.unwrap_err();

    assert!(matches!(err, ApiError::Malformed(_)));
}

#[tokio::test]
async fn test_objects_requests_ids() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/objects/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ids".into(), "3,4".into()),
            Matcher::UrlEncoded("type".into(), "page".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"pages": [{"id": 4, "label": "Four"}, {"id": 3, "label": "Three"}]}"#)
        .create_async()
        .await;

    let pages = client_for(&server).objects("3,4", "page").await.unwrap();

    mock.assert_async().await;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].id, Identifier::from(4));
}

#[tokio::test]
async fn test_create_posts_form() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/create/")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("type".into(), "blog.BlogTag".into()),
            Matcher::UrlEncoded("value".into(), "New Thing".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"id": 2, "label": "New Thing"}"#)
        .create_async()
        .await;

    let record = client_for(&server)
        .create("blog.BlogTag", "New Thing")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(record, Record::new(2, "New Thing"));
}

#[tokio::test]
async fn test_create_error_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/create/")
        .with_status(400)
        .with_body("Cannot create")
        .create_async()
        .await;

    let err = client_for(&server).create("page", "x").await.unwrap_err();

    assert!(matches!(err, ApiError::Status { code: 400, .. }));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let client = ApiClient::new("http://127.0.0.1:1/api/").unwrap();

    let err = client.search("x", "page", "").await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

#[test]
fn test_with_config_applies_timeout_and_agent() {
    let config = HttpConfig {
        timeout_ms: Some(50),
        user_agent: Some("test-agent".to_string()),
    };
    let client = ApiClient::with_config("http://localhost/api/", &config).unwrap();
    assert_eq!(client.api_base(), "http://localhost/api/");
}
