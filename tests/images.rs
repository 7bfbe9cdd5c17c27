//! Image extractor against a wiremock server.

use std::time::Duration;

use serde_json::json;
use toolbox::config::FetchConfig;
use toolbox::tools::images::ImageExtractor;
use toolbox::{tools, Config, Method, Request, ToolError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Gallery</title></head>
<body>
    <img src="/static/a.png" alt="A" title="First">
    <img src="https://cdn.example.com/b.jpg" alt="B">
    <img src="relative/c.gif">
    <img alt="no src">
</body>
</html>"#;

fn extractor(timeout_secs: u64) -> ImageExtractor {
    ImageExtractor::new(&FetchConfig {
        timeout_secs,
        user_agent: "toolbox-test/1.0".into(),
        max_page_size: 64 * 1024,
    })
    .unwrap()
}

#[tokio::test]
async fn fetches_page_and_resolves_root_relative_sources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gallery"))
        .and(header("user-agent", "toolbox-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/gallery", server.uri());
    let list = extractor(5).extract(&url, "").await.unwrap();

    assert_eq!(list.count, 3);
    assert_eq!(list.images[0].src, format!("{}/static/a.png", server.uri()));
    assert_eq!(list.images[0].title, "First");
    assert_eq!(list.images[1].src, "https://cdn.example.com/b.jpg");
    assert_eq!(list.images[2].src, "relative/c.gif");
    assert_eq!(list.message, "Found 3 images");
}

#[tokio::test]
async fn url_takes_precedence_over_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"<img src="from-url.png">"#, "text/html"))
        .mount(&server)
        .await;

    let list = extractor(5)
        .extract(&server.uri(), r#"<img src="from-html.png">"#)
        .await
        .unwrap();
    assert_eq!(list.images.len(), 1);
    assert_eq!(list.images[0].src, "from-url.png");
}

#[tokio::test]
async fn error_pages_are_still_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(r#"<img src="/404.png">"#, "text/html"))
        .mount(&server)
        .await;

    let list = extractor(5).extract(&server.uri(), "").await.unwrap();
    assert_eq!(list.count, 1);
}

#[tokio::test]
async fn slow_page_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let err = extractor(1).extract(&server.uri(), "").await.unwrap_err();
    assert!(matches!(err, ToolError::Network(_)));
    assert!(err.to_string().starts_with("Unable to fetch web page: "), "{err}");
}

#[tokio::test]
async fn unreachable_host_is_network_error_envelope() {
    // Bind then drop, so the port is closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let app = tools::router(&Config::load_from("tests/no-such-config").unwrap()).unwrap();
    let req = Request::new(Method::Post, "/api/tools/download-images")
        .with_json(&json!({"url": format!("http://127.0.0.1:{port}/")}));
    let resp = app.handle(req).await;

    assert_eq!(resp.status_code(), 400);
    let body = resp.json_body().unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().starts_with("Unable to fetch web page: "));
}

#[tokio::test]
async fn missing_input_never_touches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = extractor(5).extract("", "").await.unwrap_err();
    assert_eq!(err, ToolError::validation("URL or HTML content is required"));
}

#[tokio::test]
async fn oversized_page_is_network_error() {
    let server = MockServer::start().await;
    let page = format!(r#"<img src="a.png">{}"#, "x".repeat(100 * 1024));
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html"))
        .mount(&server)
        .await;

    let err = extractor(5).extract(&server.uri(), "").await.unwrap_err();
    assert_eq!(err, ToolError::Network("Web page exceeds 65536 bytes".into()));
}

#[tokio::test]
async fn whitespace_html_lists_no_images() {
    let list = extractor(5).extract("", "   ").await.unwrap();
    assert_eq!(list.count, 0);
}
